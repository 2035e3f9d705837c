use std::{cmp::Ordering, sync::LazyLock};

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use svgpack_ast::{
    name::QualName,
    node::Element,
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// How `xmlns` declarations are ordered.
pub enum XMLNSOrder {
    /// Sort namespace declarations alphabetically, like any other attribute
    Alphabetical,
    #[default]
    /// Place namespace declarations first, starting with `xmlns`
    Front,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Sorts attributes into a predictable order.
///
/// Attributes are ordered by
///
/// 1. Namespace declarations, when `xmlns_order` is [`XMLNSOrder::Front`]
/// 2. Other prefixed attributes
/// 3. The position of the name's first `-` separated part in `order`
/// 4. Alphabetical order
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// # Errors
///
/// Never.
pub struct SortAttrs {
    /// A list of attribute names in the order they should appear.
    pub order: Option<Vec<String>>,
    /// How to order `xmlns` declarations.
    pub xmlns_order: Option<XMLNSOrder>,
}

impl Visitor for SortAttrs {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        let order = self.order.as_deref().unwrap_or(&DEFAULT_ORDER);
        let xmlns_front = self.xmlns_order.unwrap_or_default() == XMLNSOrder::Front;
        element
            .attributes
            .sort_by(|a, b| compare(&a.name, &b.name, order, xmlns_front));
        Ok(())
    }
}

fn priority(name: &QualName, xmlns_front: bool) -> u8 {
    if xmlns_front {
        if name.prefix.is_none() && name.local == "xmlns" {
            return 3;
        }
        if name.prefix.as_deref() == Some("xmlns") {
            return 2;
        }
    }
    u8::from(name.prefix.is_some())
}

fn compare(a: &QualName, b: &QualName, order: &[String], xmlns_front: bool) -> Ordering {
    let priority_order = priority(b, xmlns_front).cmp(&priority(a, xmlns_front));
    if priority_order != Ordering::Equal {
        return priority_order;
    }

    let a_name = a.to_string();
    let b_name = b.to_string();
    let a_part = a_name.split('-').next().unwrap_or_default();
    let b_part = b_name.split('-').next().unwrap_or_default();
    if a_part != b_part {
        let a_index = order.iter().position(|item| item == a_part);
        let b_index = order.iter().position(|item| item == b_part);
        match (a_index, b_index) {
            (Some(a_index), Some(b_index)) => return a_index.cmp(&b_index),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }
    }
    a_name.cmp(&b_name)
}

static DEFAULT_ORDER: LazyLock<Vec<String>> = LazyLock::new(|| {
    [
        "id", "width", "height", "x", "x1", "x2", "y", "y1", "y2", "cx", "cy", "r", "fill",
        "stroke", "marker", "d", "points",
    ]
    .into_iter()
    .map(String::from)
    .collect()
});

#[test]
fn sort_attrs() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "sortAttrs": {} }"#,
            Some(r#"<svg r="" b="" x2="" cx="" y1="" a="" y="" y2="" x1="" cy="" x=""/>"#),
        )?,
        r#"<svg x="" x1="" x2="" y="" y1="" y2="" cx="" cy="" r="" a="" b=""/>"#
    );

    assert_eq!(
        test_config(
            r#"{ "sortAttrs": {} }"#,
            Some(r#"<svg a="" fill-opacity="" stroke="" fill="" stroke-opacity=""/>"#),
        )?,
        r#"<svg fill="" fill-opacity="" stroke="" stroke-opacity="" a=""/>"#
    );

    assert_eq!(
        test_config(
            r#"{ "sortAttrs": {} }"#,
            Some(
                r##"<svg foo="bar" xmlns="http://www.w3.org/2000/svg" height="10" baz="quux" width="10" hello="world" xmlns:xlink="http://www.w3.org/1999/xlink" xlink:href="#a"/>"##
            ),
        )?,
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xlink:href="#a" width="10" height="10" baz="quux" foo="bar" hello="world"/>"##
    );

    assert_eq!(
        test_config(
            r#"{ "sortAttrs": { "order": ["d", "fill"], "xmlnsOrder": "alphabetical" } }"#,
            Some(r#"<svg xmlns="http://www.w3.org/2000/svg" fill="red" d="M0 0" a=""/>"#),
        )?,
        r#"<svg d="M0 0" fill="red" a="" xmlns="http://www.w3.org/2000/svg"/>"#
    );

    Ok(())
}
