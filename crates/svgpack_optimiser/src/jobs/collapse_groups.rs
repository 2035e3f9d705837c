use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::{Element, Node},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Replaces `<g>` elements without attributes with their children.
///
/// Groups within a `<switch>` are kept, as each child of a switch is a separate candidate
/// for rendering.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// Stylesheets or scripts selecting groups by their structure, such as `g > path`,
/// may be affected.
///
/// # Errors
///
/// Never.
pub struct CollapseGroups {}

impl Visitor for CollapseGroups {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        if element.is("switch") {
            return Ok(());
        }
        while element.children.iter().any(is_collapsible) {
            let children = std::mem::take(&mut element.children);
            for child in children {
                match child {
                    Node::Element(group) if is_collapsible_group(&group) => {
                        element.children.extend(group.children);
                    }
                    child => element.children.push(child),
                }
            }
        }
        Ok(())
    }
}

fn is_collapsible(node: &Node) -> bool {
    matches!(node, Node::Element(element) if is_collapsible_group(element))
}

fn is_collapsible_group(element: &Element) -> bool {
    element.is("g") && element.attributes.is_empty()
}

#[test]
fn collapse_groups() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "collapseGroups": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg">
    <g>
        <g><path d="M0 0"/></g>
        <rect width="1"/>
    </g>
    <g fill="red"><path d="M1 1"/></g>
</svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0"/><rect width="1"/><g fill="red"><path d="M1 1"/></g></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "collapseGroups": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg"><switch><g><path d="M0 0"/></g></switch></svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><switch><g><path d="M0 0"/></g></switch></svg>"#
    );

    Ok(())
}
