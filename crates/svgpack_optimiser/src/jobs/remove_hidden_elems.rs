use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::{Element, Node},
    visitor::{Context, Visitor},
};

use crate::{error::JobsError, utils::is_zero};

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes elements which are never rendered, because they have no size or `display="none"`.
///
/// Elements with `display="none"` are removed, unless they're a `<marker>` or have an `id`
/// they might be referenced by. The following childless elements are also removed
///
/// - `<circle>` with a zero `r`
/// - `<ellipse>` with a zero `rx` or `ry`
/// - `<rect>`, `<pattern>`, or `<image>` with a zero `width` or `height`
/// - `<path>` without a `d`
/// - `<polyline>` or `<polygon>` without `points`
///
/// Elements hidden by `visibility`, `opacity`, or a stylesheet are kept.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// Scripts which later give the removed elements a size may be affected.
///
/// # Errors
///
/// Never.
pub struct RemoveHiddenElems {}

impl Visitor for RemoveHiddenElems {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        element.children.retain(|child| match child {
            Node::Element(child) if is_hidden(child) => {
                log::debug!("removing hidden <{}>", child.name);
                false
            }
            _ => true,
        });
        Ok(())
    }
}

fn is_hidden(element: &Element) -> bool {
    if element.name.prefix.is_some() {
        return false;
    }
    if element.get_attribute("display").map(str::trim) == Some("none")
        && !element.is("marker")
        && !element.has_attribute("id")
    {
        return true;
    }
    if !element.children.is_empty() {
        return false;
    }
    let is_zero_attr = |name: &str| element.get_attribute(name).is_some_and(is_zero);
    let is_empty_attr = |name: &str| {
        element
            .get_attribute(name)
            .is_none_or(|value| value.trim().is_empty())
    };
    match element.local_name() {
        "circle" => is_zero_attr("r"),
        "ellipse" => is_zero_attr("rx") || is_zero_attr("ry"),
        "rect" | "pattern" | "image" => is_zero_attr("width") || is_zero_attr("height"),
        "path" => is_empty_attr("d"),
        "polyline" | "polygon" => is_empty_attr("points"),
        _ => false,
    }
}

#[test]
fn remove_hidden_elems() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeHiddenElems": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg">
    <circle r="0"/>
    <circle r="5"/>
    <ellipse rx="0" ry="5"/>
    <rect width="0px" height="10"/>
    <g><path/><path d=""/><path d="M0 0"/></g>
    <polygon/>
    <polyline points="0 0 1 1"/>
</svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><circle r="5"/><g><path d="M0 0"/></g><polyline points="0 0 1 1"/></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "removeHiddenElems": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg"><g display="none"><path d="M0 0"/></g><rect id="a" display="none"/><marker display="none"/><rect width="5" height="5" opacity="0" visibility="hidden"/></svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="a" display="none"/><marker display="none"/><rect width="5" height="5" opacity="0" visibility="hidden"/></svg>"#
    );

    Ok(())
}
