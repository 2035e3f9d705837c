//! The command line interface of svgpack.
use std::{env::current_dir, path::PathBuf};

use clap::Parser;

use crate::{config::Config, run};

#[derive(Parser, Debug)]
#[clap(
    bin_name = "svgpack",
    name = "svgpack",
    author,
    version,
    about = "Optimises SVG assets and builds them into symbol sprites",
    long_about = None
)]
/// Runs each task of the config
pub struct Args {
    /// The directory task paths and the config file are resolved against.
    /// Defaults to the current directory.
    #[clap(long, short)]
    pub root: Option<PathBuf>,
    /// A path to the specified config.
    /// If no config is specified the current config will be printed instead.
    #[clap(long, short, num_args(0..=1))]
    pub config: Option<Vec<PathBuf>>,
}

impl Args {
    /// Loads the config and runs its tasks, or prints the config when `--config` has no value.
    ///
    /// # Errors
    ///
    /// If the config can't be loaded or any task fails
    pub fn run(self) -> anyhow::Result<()> {
        let root = match self.root {
            Some(root) => root,
            None => current_dir()?,
        };

        let config = match self.config.as_deref() {
            Some([path, ..]) => {
                log::debug!("using specified config");
                Config::from_path(path)?
            }
            Some([]) => {
                log::debug!("printing config");
                serde_json::to_writer(std::io::stdout(), &Config::load(&root)?)?;
                return Ok(());
            }
            None => Config::load(&root)?,
        };

        run(&config.tasks, &root)?;
        Ok(())
    }
}

#[test]
fn parse_args() {
    let args = Args::parse_from(["svgpack"]);
    assert!(args.root.is_none());
    assert!(args.config.is_none());

    let args = Args::parse_from(["svgpack", "--root", "site", "--config"]);
    assert_eq!(args.root, Some(PathBuf::from("site")));
    assert_eq!(args.config, Some(vec![]));

    let args = Args::parse_from(["svgpack", "--config", "svgpackrc.json"]);
    assert_eq!(args.config, Some(vec![PathBuf::from("svgpackrc.json")]));
}
