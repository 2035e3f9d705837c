use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::{Element, Node},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes container elements with no children.
///
/// The following are kept
///
/// - The root `<svg>`
/// - A `<pattern>` with attributes, as it may inherit content by `href`
/// - A `<g>` with a `filter`, as filters can render without content
/// - A `<mask>` with an `id`, as it may hide its target
/// - Any child of a `<switch>`
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// # Errors
///
/// Never.
pub struct RemoveEmptyContainers {}

const CONTAINERS: [&str; 11] = [
    "a",
    "defs",
    "foreignObject",
    "g",
    "marker",
    "mask",
    "missing-glyph",
    "pattern",
    "svg",
    "switch",
    "symbol",
];

impl Visitor for RemoveEmptyContainers {
    type Error = JobsError;

    fn exit_element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        if element.is("switch") {
            return Ok(());
        }
        element.children.retain(|child| match child {
            Node::Element(child) => !is_removable(child),
            _ => true,
        });
        Ok(())
    }
}

fn is_removable(element: &Element) -> bool {
    if element.name.prefix.is_some()
        || !element.children.is_empty()
        || !CONTAINERS.contains(&element.local_name())
    {
        return false;
    }
    match element.local_name() {
        "pattern" => element.attributes.is_empty(),
        "g" => !element.has_attribute("filter"),
        "mask" => !element.has_attribute("id"),
        _ => true,
    }
}

#[test]
fn remove_empty_containers() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeEmptyContainers": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg">
    <pattern/>
    <g>
        <marker>
            <a/>
        </marker>
    </g>
    <path d="..."/>
</svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="..."/></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "removeEmptyContainers": {} }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg">
    <pattern id="a" href="#b"/>
    <g filter="url(#f)"/>
    <mask id="m"/>
    <switch><g/></switch>
</svg>"##
            ),
        )?,
        r##"<svg xmlns="http://www.w3.org/2000/svg"><pattern id="a" href="#b"/><g filter="url(#f)"/><mask id="m"/><switch><g/></switch></svg>"##
    );

    assert_eq!(
        test_config(
            r#"{ "removeEmptyContainers": {} }"#,
            Some(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#
    );

    Ok(())
}
