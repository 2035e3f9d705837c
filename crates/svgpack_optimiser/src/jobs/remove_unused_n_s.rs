use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::Document,
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes `xmlns` prefixed declarations from the root element which are never used
/// by an element or attribute in the document.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// # Errors
///
/// Never.
pub struct RemoveUnusedNS {}

impl Visitor for RemoveUnusedNS {
    type Error = JobsError;

    fn document(&mut self, document: &mut Document, _context: &Context) -> Result<(), JobsError> {
        let Some(root) = document.root_mut() else {
            return Ok(());
        };

        let mut used = HashSet::new();
        root.for_each_element(&mut |element| {
            if let Some(prefix) = &element.name.prefix {
                used.insert(prefix.clone());
            }
            for attr in &element.attributes {
                match &attr.name.prefix {
                    Some(prefix) if prefix != "xmlns" => {
                        used.insert(prefix.clone());
                    }
                    _ => {}
                }
            }
        });

        root.attributes.retain(|attr| {
            let is_unused = attr.name.prefix.as_deref() == Some("xmlns")
                && !used.contains(&attr.name.local);
            if is_unused {
                log::debug!("removing unused namespace {}", attr.name.local);
            }
            !is_unused
        });
        Ok(())
    }
}

#[test]
fn remove_unused_n_s() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeUnusedNS": {} }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:test="http://trololololololololololo.com/" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:used="http://example.com/">
    <used:g/>
    <use xlink:href="#a"/>
</svg>"##
            ),
        )?,
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" xmlns:used="http://example.com/"><used:g/><use xlink:href="#a"/></svg>"##
    );

    assert_eq!(
        test_config(
            r#"{ "removeUnusedNS": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><path d="M0 0"/></svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0"/></svg>"#
    );

    Ok(())
}
