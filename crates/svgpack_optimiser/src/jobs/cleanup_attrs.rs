use itertools::Itertools;
use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::Element,
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
/// Removes redundant whitespace from attribute values.
///
/// # Correctness
///
/// By default any whitespace is cleaned up. This shouldn't affect anything within the SVG
/// but may affect elements within `<foreignObject />`, which is treated as HTML.
///
/// In any other case, it should never affect the appearance of the document.
///
/// # Errors
///
/// Never.
pub struct CleanupAttrs {
    #[serde(default = "newlines_default")]
    /// Whether to replace `'\n'` with `' '`.
    pub newlines: bool,
    #[serde(default = "trim_default")]
    /// Whether to remove whitespace from each end of the value
    pub trim: bool,
    #[serde(default = "spaces_default")]
    /// Whether to replace multiple whitespace characters with a single `' '`.
    pub spaces: bool,
}

impl Visitor for CleanupAttrs {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        for attr in &mut element.attributes {
            if self.newlines && attr.value.contains('\n') {
                attr.value = attr.value.replace("\r\n", " ").replace('\n', " ");
            }
            if self.trim {
                let trimmed = attr.value.trim();
                if trimmed.len() != attr.value.len() {
                    attr.value = trimmed.to_string();
                }
            }
            if self.spaces {
                attr.value = attr.value.split_whitespace().join(" ");
            }
        }
        Ok(())
    }
}

impl Default for CleanupAttrs {
    fn default() -> Self {
        Self {
            newlines: newlines_default(),
            trim: trim_default(),
            spaces: spaces_default(),
        }
    }
}

const fn newlines_default() -> bool {
    true
}

const fn trim_default() -> bool {
    true
}

const fn spaces_default() -> bool {
    true
}

#[test]
fn cleanup_attrs() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "cleanupAttrs": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg" attr="  a      b " attr2="a
b">
    <!-- Should remove all unnecessary whitespace from attributes -->
</svg>"#
            )
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg" attr="a b" attr2="a b"><!-- Should remove all unnecessary whitespace from attributes --></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "cleanupAttrs": { "spaces": false } }"#,
            Some(r#"<svg xmlns="http://www.w3.org/2000/svg" attr=" a   b "/>"#)
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg" attr="a   b"/>"#
    );

    Ok(())
}
