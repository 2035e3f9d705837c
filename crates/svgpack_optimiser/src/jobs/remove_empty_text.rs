use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::{Element, Node},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
/// Removes empty `<text>` and `<tspan>` elements. Removes `<tref>` elements that don't
/// reference anything within the document.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// # Errors
///
/// Never.
pub struct RemoveEmptyText {
    #[serde(default = "flag_default_true")]
    /// Whether to remove empty `<text>` elements.
    pub text: bool,
    #[serde(default = "flag_default_true")]
    /// Whether to remove empty `<tspan>` elements.
    pub tspan: bool,
    #[serde(default = "flag_default_true")]
    /// Whether to remove `<tref>` elements without an `xlink:href`.
    pub tref: bool,
}

impl Default for RemoveEmptyText {
    fn default() -> Self {
        Self {
            text: flag_default_true(),
            tspan: flag_default_true(),
            tref: flag_default_true(),
        }
    }
}

impl Visitor for RemoveEmptyText {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        element.children.retain(|child| {
            let Node::Element(child) = child else {
                return true;
            };
            if child.name.prefix.is_some() {
                return true;
            }
            match child.local_name() {
                "text" if self.text => !child.children.is_empty(),
                "tspan" if self.tspan => !child.children.is_empty(),
                "tref" if self.tref => child.has_attribute("xlink:href"),
                _ => true,
            }
        });
        Ok(())
    }
}

const fn flag_default_true() -> bool {
    true
}

#[test]
fn remove_empty_text() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeEmptyText": {} }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
    <text/>
    <text>a<tspan/></text>
    <tref/>
    <tref xlink:href="#a"/>
</svg>"##
            ),
        )?,
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><text>a</text><tref xlink:href="#a"/></svg>"##
    );

    assert_eq!(
        test_config(
            r#"{ "removeEmptyText": { "text": false } }"#,
            Some(r#"<svg xmlns="http://www.w3.org/2000/svg"><text/></svg>"#),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><text/></svg>"#
    );

    Ok(())
}
