use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use svgpack_ast::{node::Document, visitor::Visitor};

use crate::error::JobsError;

macro_rules! jobs {
    ($($name:ident: $job:ident ($preset:ident),)+) => {
        $(pub use self::$name::$job;)+

        #[skip_serializing_none]
        #[derive(Deserialize, Serialize, Clone, Debug)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        /// Each task for optimising an SVG document.
        ///
        /// Jobs run in the order of the fields below. A job set to `None` is skipped.
        pub struct Jobs {
            $(
                #[serde(default)]
                #[allow(missing_docs)]
                pub $name: Option<$job>,
            )+
        }

        impl Default for Jobs {
            /// The default preset.
            fn default() -> Self {
                Self {
                    $($name: jobs!(@preset $preset $job),)+
                }
            }
        }

        impl Jobs {
            /// A configuration where no jobs will run.
            pub fn none() -> Self {
                Self {
                    $($name: None,)+
                }
            }

            /// The default preset without structural cleanups.
            ///
            /// Documents optimised with this preset keep their ids, groups, and paths as authored,
            /// as well as every `opacity` and `style` attribute. This matches svgo's
            /// `preset-default` with `cleanupIds`, `collapseGroups`, `mergePaths`,
            /// `moveElemsAttrsToGroup`, `moveGroupAttrsToElems`, and `removeUselessStrokeAndFill`
            /// disabled.
            pub fn baseline() -> Self {
                Self {
                    $($name: jobs!(@baseline $preset $job),)+
                }
            }

            /// Overwrites any jobs in `self` with the jobs enabled in `other`.
            pub fn extend(&mut self, other: &Self) {
                $(
                    if let Some(job) = &other.$name {
                        self.$name = Some(job.clone());
                    }
                )+
            }

            /// Disables a job by either its `camelCase` or `snake_case` name.
            pub fn omit(&mut self, name: &str) {
                $(
                    if name == stringify!($name) || name == camel_case(stringify!($name)) {
                        self.$name = None;
                    }
                )+
            }

            /// The `camelCase` names of each enabled job, in order.
            pub fn names(&self) -> Vec<String> {
                let mut names = Vec::new();
                $(
                    if self.$name.is_some() {
                        names.push(camel_case(stringify!($name)));
                    }
                )+
                names
            }

            /// Runs each enabled job against the document, in order.
            ///
            /// # Errors
            ///
            /// When any job fails
            pub fn run(&self, document: &mut Document) -> Result<(), JobsError> {
                $(
                    if let Some(job) = &self.$name {
                        log::debug!("running {}", stringify!($name));
                        let outcome = job.clone().start(document)?;
                        if outcome.can_skip() {
                            log::debug!("{} skipped", stringify!($name));
                        }
                    }
                )+
                Ok(())
            }
        }
    };
    (@preset default $job:ident) => { Some($job::default()) };
    (@preset structural $job:ident) => { Some($job::default()) };
    (@preset optional $job:ident) => { None };
    (@baseline default $job:ident) => { Some($job::default()) };
    (@baseline structural $job:ident) => { None };
    (@baseline optional $job:ident) => { None };
}

jobs! {
    remove_comments: RemoveComments (default),
    remove_metadata: RemoveMetadata (default),
    remove_editors_n_s_data: RemoveEditorsNSData (default),
    remove_title: RemoveTitle (default),
    remove_desc: RemoveDesc (default),
    cleanup_attrs: CleanupAttrs (default),
    cleanup_ids: CleanupIds (structural),
    convert_colors: ConvertColors (default),
    remove_hidden_elems: RemoveHiddenElems (default),
    remove_empty_text: RemoveEmptyText (default),
    collapse_groups: CollapseGroups (structural),
    remove_attrs: RemoveAttrs (optional),
    remove_empty_attrs: RemoveEmptyAttrs (default),
    remove_empty_containers: RemoveEmptyContainers (default),
    remove_unused_n_s: RemoveUnusedNS (default),
    sort_attrs: SortAttrs (default),
}

mod cleanup_attrs;
mod cleanup_ids;
mod collapse_groups;
mod convert_colors;
mod remove_attrs;
mod remove_comments;
mod remove_desc;
mod remove_editors_n_s_data;
mod remove_empty_attrs;
mod remove_empty_containers;
mod remove_empty_text;
mod remove_hidden_elems;
mod remove_metadata;
mod remove_title;
mod remove_unused_n_s;
mod sort_attrs;

pub use self::convert_colors::Method as ConvertColorsMethod;
pub use self::sort_attrs::XMLNSOrder;

fn camel_case(snake: &str) -> String {
    let mut result = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            result.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn presets() {
        assert_eq!(
            Jobs::baseline().names(),
            vec![
                "removeComments",
                "removeMetadata",
                "removeEditorsNSData",
                "removeTitle",
                "removeDesc",
                "cleanupAttrs",
                "convertColors",
                "removeHiddenElems",
                "removeEmptyText",
                "removeEmptyAttrs",
                "removeEmptyContainers",
                "removeUnusedNS",
                "sortAttrs",
            ]
        );
        let default = Jobs::default().names();
        assert!(default.contains(&String::from("cleanupIds")));
        assert!(default.contains(&String::from("collapseGroups")));
        assert!(!default.contains(&String::from("removeAttrs")));
        assert!(Jobs::none().names().is_empty());
    }

    #[test]
    fn omit() {
        let mut jobs = Jobs::baseline();
        jobs.omit("sortAttrs");
        jobs.omit("remove_editors_n_s_data");
        let names = jobs.names();
        assert!(!names.contains(&String::from("sortAttrs")));
        assert!(!names.contains(&String::from("removeEditorsNSData")));
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn serde() -> Result<(), serde_json::Error> {
        let jobs: Jobs = serde_json::from_str(
            r#"{
            "convertColors": { "method": "currentColor" },
            "removeAttrs": { "attrs": ["(opacity|style)"] }
        }"#,
        )?;
        assert_eq!(jobs.names(), vec!["convertColors", "removeAttrs"]);
        assert_eq!(
            serde_json::to_string(&jobs)?,
            r#"{"convertColors":{"method":"currentColor"},"removeAttrs":{"attrs":["(opacity|style)"],"elemSeparator":":","preserveCurrentColor":false}}"#
        );

        assert!(serde_json::from_str::<Jobs>(r#"{ "removeEverything": {} }"#).is_err());
        Ok(())
    }

    #[test]
    fn camel_case_names() {
        assert_eq!(camel_case("remove_editors_n_s_data"), "removeEditorsNSData");
        assert_eq!(camel_case("remove_unused_n_s"), "removeUnusedNS");
        assert_eq!(camel_case("sort_attrs"), "sortAttrs");
    }
}
