/*!
The svgpack optimiser is a library for optimising SVG documents.

The optimiser works on a document from [`svgpack_ast`] which is processed by the
optimiser's [`Jobs`].

# Example

Parsing and optimising a document

```
use svgpack_optimiser::{optimise, Jobs};

let result = optimise(
    r##"<svg xmlns="http://www.w3.org/2000/svg">
        <!-- comment -->
        <path fill="#FF0000" d="M0 0h1v1z"/>
    </svg>"##,
    &Jobs::baseline(),
)
.unwrap();
assert_eq!(result, r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="red" d="M0 0h1v1z"/></svg>"##);
```
*/

mod error;
mod jobs;
pub mod utils;

use serde::{Deserialize, Serialize};
use svgpack_ast::{parse::parse, serialize::Node as _};

pub use crate::error::JobsError;
pub use crate::jobs::*;

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// A preset which the specified jobs can overwrite
pub enum Extends {
    /// A preset that contains no jobs.
    None,
    /// The default preset.
    /// Uses [`Jobs::default`]
    Default,
    /// The default preset without structural cleanups.
    /// Uses [`Jobs::baseline`]
    #[default]
    Baseline,
}

impl Extends {
    /// Creates a configuration based on the variant.
    pub fn jobs(self) -> Jobs {
        match self {
            Extends::None => Jobs::none(),
            Extends::Default => Jobs::default(),
            Extends::Baseline => Jobs::baseline(),
        }
    }

    /// Creates a configuration with the presets jobs extended by the given jobs.
    pub fn extend(self, jobs: &Jobs) -> Jobs {
        let mut result = self.jobs();
        result.extend(jobs);
        result
    }
}

/// Parses, optimises, and serializes a document with the given jobs.
///
/// # Errors
///
/// If the document cannot be parsed, a job fails, or the result cannot be serialized.
pub fn optimise(source: &str, jobs: &Jobs) -> Result<String, JobsError> {
    let mut dom = parse(source)?;
    jobs.run(&mut dom)?;
    Ok(dom.serialize()?)
}

#[cfg(test)]
pub(crate) fn test_config(config_json: &str, svg: Option<&str>) -> Result<String, JobsError> {
    let jobs: Jobs = serde_json::from_str(config_json).expect("test config should be valid");
    optimise(
        svg.unwrap_or(r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#),
        &jobs,
    )
}

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn extends() {
    let extra = Jobs {
        remove_attrs: Some(RemoveAttrs::new(vec![String::from("opacity")])),
        ..Jobs::none()
    };

    let jobs = Extends::Baseline.extend(&extra);
    assert!(jobs.remove_attrs.is_some());
    assert!(jobs.remove_comments.is_some());
    assert!(jobs.cleanup_ids.is_none());

    let jobs = Extends::None.extend(&extra);
    assert_eq!(jobs.names(), vec!["removeAttrs"]);
}

#[test]
fn baseline() -> anyhow::Result<()> {
    let source = r##"<?xml version="1.0" encoding="UTF-8"?>
<!-- Generator: Sketch -->
<svg xmlns="http://www.w3.org/2000/svg" xmlns:sketch="http://www.bohemiancoding.com/sketch/ns" viewBox="0 0 24 24" sketch:type="MSPage">
    <title>star</title>
    <desc>Created with Sketch.</desc>
    <defs><linearGradient id="unused"/></defs>
    <g>
        <path id="star" opacity="0.5" style="fill: #FF0000" fill="#FFC107" d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z"/>
    </g>
</svg>"##;
    let result = optimise(source, &Jobs::baseline())?;
    assert_eq!(
        result,
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><defs><linearGradient id="unused"/></defs><g><path id="star" fill="#ffc107" d="M12 2l3 7h7l-6 4 2 7-6-4-6 4 2-7-6-4h7z" opacity="0.5" style="fill: #FF0000"/></g></svg>"##
    );
    assert_eq!(optimise(&result, &Jobs::baseline())?, result);
    Ok(())
}

#[test]
fn current_color_icon() -> anyhow::Result<()> {
    let jobs: Jobs = serde_json::from_str(
        r#"{
            "convertColors": { "method": "currentColor" },
            "removeAttrs": { "attrs": ["(opacity|style)"] }
        }"#,
    )?;
    let jobs = Extends::Baseline.extend(&jobs);
    let result = optimise(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path fill="#FFC107" opacity="0.5" d="M0 0h24v24z"/></svg>"##,
        &jobs,
    )?;
    assert_eq!(
        result,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path fill="currentColor" d="M0 0h24v24z"/></svg>"#
    );
    assert_eq!(optimise(&result, &jobs)?, result);
    Ok(())
}
