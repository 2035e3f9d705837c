use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::{Element, Node},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes `<metadata>` from the document.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// Metadata may contain licensing or authorship information that will be lost.
///
/// # Errors
///
/// Never.
pub struct RemoveMetadata {}

impl Visitor for RemoveMetadata {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        element.children.retain(|child| match child {
            Node::Element(child) => !child.is("metadata"),
            _ => true,
        });
        Ok(())
    }
}

#[test]
fn remove_metadata() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeMetadata": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg">
    <metadata>...</metadata>
    <g>
        <metadata><rdf/></metadata>
    </g>
</svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g/></svg>"#
    );

    Ok(())
}
