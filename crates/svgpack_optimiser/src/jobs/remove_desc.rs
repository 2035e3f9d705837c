use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::{Element, Node},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes the `<desc>` element from the document when empty or only contains editor attribution.
///
/// # Correctness
///
/// By default this job should never functionally change the document.
///
/// By using `remove_any` you may deteriorate the accessibility of the document for some users.
///
/// # Errors
///
/// Never.
pub struct RemoveDesc {
    #[serde(default)]
    /// Whether to remove all `<desc>` elements
    pub remove_any: bool,
}

impl Visitor for RemoveDesc {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        element.children.retain(|child| match child {
            Node::Element(child) if child.is("desc") => {
                !(self.remove_any
                    || child.children.is_empty()
                    || STANDARD_DESCS.is_match(&child.text_content()))
            }
            _ => true,
        });
        Ok(())
    }
}

static STANDARD_DESCS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^Created (with|using)").expect("desc regex is valid"));

#[test]
fn remove_desc() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeDesc": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg">
    <desc>Created with Sketch.</desc>
    <desc/>
    <g><desc>A star</desc></g>
</svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g><desc>A star</desc></g></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "removeDesc": { "removeAny": true } }"#,
            Some(r#"<svg xmlns="http://www.w3.org/2000/svg"><desc>A star</desc></svg>"#),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#
    );

    Ok(())
}
