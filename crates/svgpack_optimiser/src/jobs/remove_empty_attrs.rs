use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::Element,
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes attributes with an empty value, unless they're conditional processing attributes.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// Conditional processing attributes, such as `requiredFeatures=""`, are kept as an
/// empty value prevents the element from rendering.
///
/// # Errors
///
/// Never.
pub struct RemoveEmptyAttrs {}

const CONDITIONAL_PROCESSING: [&str; 3] =
    ["requiredExtensions", "requiredFeatures", "systemLanguage"];

impl Visitor for RemoveEmptyAttrs {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        element.attributes.retain(|attr| {
            !attr.value.is_empty()
                || (attr.name.prefix.is_none()
                    && CONDITIONAL_PROCESSING.contains(&attr.name.local.as_str()))
        });
        Ok(())
    }
}

#[test]
fn remove_empty_attrs() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeEmptyAttrs": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg">
    <g attr1="" attr2="" fill="red" requiredFeatures=""/>
</svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g fill="red" requiredFeatures=""/></svg>"#
    );

    Ok(())
}
