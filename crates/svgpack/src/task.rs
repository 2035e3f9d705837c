//! The descriptors of each task in a run.
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use svgpack_optimiser::{ConvertColors, ConvertColorsMethod, Extends, Jobs, RemoveAttrs};

use crate::{error::Error, process};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// What a task does with the files of its source directory
pub enum TaskKind {
    /// Optimise each file and write it to the output directory
    OptimiseAndCopy,
    /// Compile the files into a sprite in the output directory
    BuildSprite,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// The sprite built by a [`TaskKind::BuildSprite`] task
pub struct SpriteConfig {
    /// The file name of the sprite
    pub sprite: String,
    /// The preset the shape jobs start from
    #[serde(default)]
    pub extends: Extends,
    /// Jobs run against each shape, on top of the preset
    #[serde(default = "Jobs::none")]
    pub extra_jobs: Jobs,
    /// Jobs to disable from the preset, by their `camelCase` name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit: Vec<String>,
    /// Whether to also write an HTML document demonstrating the sprite
    #[serde(default)]
    pub example: bool,
}

impl SpriteConfig {
    /// A sprite written to `sprite`, running the baseline jobs and `extra_jobs`.
    pub fn new(sprite: &str, extra_jobs: Jobs) -> Self {
        Self {
            sprite: sprite.to_string(),
            extends: Extends::Baseline,
            extra_jobs,
            omit: Vec::new(),
            example: false,
        }
    }

    /// Creates the jobs run against each shape
    pub fn resolve_jobs(&self) -> Jobs {
        let mut jobs = self.extends.extend(&self.extra_jobs);
        for name in &self.omit {
            jobs.omit(name);
        }
        jobs
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// A unit of work in a run
pub struct Task {
    /// The name of the task, used for logging
    pub name: String,
    /// What the task does
    pub kind: TaskKind,
    /// The directory containing the task's SVG files
    pub src_dir: PathBuf,
    /// The directory the task writes to
    pub out_dir: PathBuf,
    /// The sprite of a [`TaskKind::BuildSprite`] task.
    /// Defaults to a sprite named `<name>.symbol.svg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<SpriteConfig>,
}

impl Task {
    /// Creates a task which optimises and copies files.
    pub fn optimise_and_copy(name: &str, src_dir: &str, out_dir: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TaskKind::OptimiseAndCopy,
            src_dir: PathBuf::from(src_dir),
            out_dir: PathBuf::from(out_dir),
            sprite: None,
        }
    }

    /// Creates a task which compiles files into a sprite.
    pub fn build_sprite(name: &str, src_dir: &str, out_dir: &str, sprite: SpriteConfig) -> Self {
        Self {
            name: name.to_string(),
            kind: TaskKind::BuildSprite,
            src_dir: PathBuf::from(src_dir),
            out_dir: PathBuf::from(out_dir),
            sprite: Some(sprite),
        }
    }

    /// The built-in tasks, used when no config is given.
    pub fn defaults() -> Vec<Self> {
        let icon_jobs = Jobs {
            convert_colors: Some(ConvertColors {
                method: Some(ConvertColorsMethod::CurrentColor),
            }),
            remove_attrs: Some(RemoveAttrs::new(vec![String::from("(opacity|style)")])),
            ..Jobs::none()
        };

        vec![
            Self::build_sprite(
                "icon",
                "src/svg/icon",
                "templates/_svg",
                SpriteConfig::new("icon.symbol.svg", icon_jobs),
            ),
            Self::optimise_and_copy("inline", "src/svg/inline", "templates/_svg/inline"),
            Self::build_sprite(
                "full",
                "src/svg/full",
                "templates/_svg",
                SpriteConfig::new("full.symbol.svg", Jobs::none()),
            ),
            Self::optimise_and_copy("copyInline", "src/svg/inline", "src/static/svg/inline"),
            Self::optimise_and_copy("copyFull", "src/svg/full", "src/static/svg/full"),
            Self::optimise_and_copy("copyIcon", "src/svg/icon", "src/static/svg/icon"),
        ]
    }

    /// The sprite of the task, or one named after the task.
    pub fn sprite_config(&self) -> Cow<'_, SpriteConfig> {
        match &self.sprite {
            Some(sprite) => Cow::Borrowed(sprite),
            None => Cow::Owned(SpriteConfig::new(
                &format!("{}.symbol.svg", self.name),
                Jobs::none(),
            )),
        }
    }

    /// Runs the task with paths relative to `root`, returning the number of files written.
    ///
    /// # Errors
    ///
    /// If any step of the task fails
    pub fn run(&self, root: &Path) -> Result<usize, Error> {
        log::info!("running task {}", self.name);
        match self.kind {
            TaskKind::OptimiseAndCopy => process::optimise_and_copy(self, root),
            TaskKind::BuildSprite => process::build_sprite(self, root),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let tasks = Task::defaults();
        assert_eq!(
            tasks
                .iter()
                .map(|task| (task.name.as_str(), task.kind))
                .collect::<Vec<_>>(),
            vec![
                ("icon", TaskKind::BuildSprite),
                ("inline", TaskKind::OptimiseAndCopy),
                ("full", TaskKind::BuildSprite),
                ("copyInline", TaskKind::OptimiseAndCopy),
                ("copyFull", TaskKind::OptimiseAndCopy),
                ("copyIcon", TaskKind::OptimiseAndCopy),
            ]
        );

        let icon = tasks[0].sprite_config();
        assert_eq!(icon.sprite, "icon.symbol.svg");
        let jobs = icon.resolve_jobs().names();
        assert!(jobs.contains(&String::from("removeAttrs")));
        assert!(jobs.contains(&String::from("sortAttrs")));

        assert_eq!(
            tasks[2].sprite_config().resolve_jobs().names(),
            Jobs::baseline().names()
        );
    }

    #[test]
    fn sprite_config_fallback() {
        let task = Task {
            sprite: None,
            ..Task::optimise_and_copy("logos", "a", "b")
        };
        assert_eq!(task.sprite_config().sprite, "logos.symbol.svg");
    }

    #[test]
    fn sprite_presets() -> anyhow::Result<()> {
        let sprite: SpriteConfig = serde_json::from_str(
            r#"{
                "sprite": "logos.symbol.svg",
                "extends": "none",
                "extraJobs": { "removeTitle": {}, "sortAttrs": {} },
                "omit": ["sortAttrs"]
            }"#,
        )?;
        assert_eq!(sprite.resolve_jobs().names(), vec!["removeTitle"]);

        let sprite: SpriteConfig = serde_json::from_str(
            r#"{ "sprite": "logos.symbol.svg", "extends": "default", "omit": ["cleanup_ids"] }"#,
        )?;
        let names = sprite.resolve_jobs().names();
        assert!(names.contains(&String::from("collapseGroups")));
        assert!(!names.contains(&String::from("cleanupIds")));

        assert_eq!(
            serde_json::to_string(&SpriteConfig::new("a.svg", Jobs::none()))?,
            r#"{"sprite":"a.svg","extends":"baseline","extraJobs":{},"example":false}"#
        );
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let task: Task = serde_json::from_str(
            r#"{
                "name": "icon",
                "kind": "buildSprite",
                "srcDir": "src/svg/icon",
                "outDir": "templates/_svg",
                "sprite": {
                    "sprite": "icon.symbol.svg",
                    "extraJobs": { "removeAttrs": { "attrs": ["fill"] } }
                }
            }"#,
        )?;
        assert_eq!(task.kind, TaskKind::BuildSprite);
        let sprite = task.sprite_config();
        assert!(!sprite.example);
        assert_eq!(sprite.extra_jobs.names(), vec!["removeAttrs"]);

        assert_eq!(
            serde_json::to_string(&Task::optimise_and_copy("inline", "a", "b"))?,
            r#"{"name":"inline","kind":"optimiseAndCopy","srcDir":"a","outDir":"b"}"#
        );

        assert!(serde_json::from_str::<Task>(
            r#"{ "name": "a", "kind": "copy", "srcDir": "a", "outDir": "b" }"#
        )
        .is_err());
        Ok(())
    }
}
