//! Types for the configuration file usable by svgpack
use std::{fs::read_to_string, io::ErrorKind, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Error, task::Task};

/// The name of the config file looked for in the root directory.
pub const CONFIG_FILE: &str = "svgpackrc.json";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// The config for the CLI usage of svgpack
pub struct Config {
    /// The tasks to run, in order
    pub tasks: Vec<Task>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks: Task::defaults(),
        }
    }
}

impl Config {
    /// Loads the config file in `root`, or the built-in tasks when there isn't one.
    ///
    /// # Errors
    ///
    /// When the config exists but cannot be read or parsed
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        match read_to_string(&path) {
            Ok(file) => {
                log::debug!("using config at {}", path.display());
                Self::parse(&file, &path)
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                log::debug!("using built-in config");
                Ok(Self::default())
            }
            Err(source) => Err(Error::ReadFailure { path, source }),
        }
    }

    /// Loads the config file at `path`.
    ///
    /// # Errors
    ///
    /// When the config cannot be read or parsed
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = read_to_string(path).map_err(|source| Error::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&file, path)
    }

    fn parse(file: &str, path: &Path) -> Result<Self, Error> {
        serde_json::from_str(file).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        assert_eq!(Config::load(root.path())?.tasks.len(), 6);

        std::fs::write(
            root.path().join(CONFIG_FILE),
            r#"{ "tasks": [
                { "name": "logos", "kind": "optimiseAndCopy", "srcDir": "logos", "outDir": "out" }
            ] }"#,
        )?;
        let config = Config::load(root.path())?;
        assert_eq!(config.tasks.len(), 1);
        assert_eq!(config.tasks[0].name, "logos");

        std::fs::write(root.path().join(CONFIG_FILE), r#"{ "tasks": {} }"#)?;
        assert!(matches!(
            Config::load(root.path()),
            Err(Error::Config { .. })
        ));
        Ok(())
    }

    #[test]
    fn round_trip_defaults() -> anyhow::Result<()> {
        let json = serde_json::to_string(&Config::default())?;
        let config: Config = serde_json::from_str(&json)?;
        assert_eq!(serde_json::to_string(&config)?, json);
        Ok(())
    }
}
