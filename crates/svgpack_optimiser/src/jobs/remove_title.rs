use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::{Element, Node},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes `<title>` from the document.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// Titles are used for accessibility and are shown as a tooltip by some browsers,
/// so removing them may deteriorate the accessibility of the document.
///
/// # Errors
///
/// Never.
pub struct RemoveTitle {}

impl Visitor for RemoveTitle {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        element.children.retain(|child| match child {
            Node::Element(child) => !child.is("title"),
            _ => true,
        });
        Ok(())
    }
}

#[test]
fn remove_title() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeTitle": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg">
    <title>...</title>
    <g><title>nested</title><path d="M0 0"/></g>
</svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g><path d="M0 0"/></g></svg>"#
    );

    Ok(())
}
