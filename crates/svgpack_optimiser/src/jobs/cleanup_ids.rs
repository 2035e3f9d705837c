use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use svgpack_ast::{
    node::{Document, Element},
    visitor::{Context, ContextFlags, PrepareOutcome, Visitor},
};

use crate::{error::JobsError, utils::find_references};

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
/// Removes `id` attributes which aren't referenced by the document.
///
/// An id is referenced when used by `url(#id)` in any attribute, or by an `href` or `xlink:href`
/// pointing to `#id`.
///
/// # Correctness
///
/// Ids may be used to target elements from outside the document, such as by
/// stylesheets or scripts of the page embedding it, which will no longer apply.
///
/// Documents with a `<style>` or scripting are skipped, as their references can't be
/// safely determined.
///
/// # Errors
///
/// Never.
pub struct CleanupIds {
    #[serde(default = "remove_default")]
    /// Whether to remove unreferenced ids
    pub remove: bool,
    /// A list of ids to keep
    pub preserve: Option<Vec<String>>,
    /// A list of prefixes for ids to keep
    pub preserve_prefixes: Option<Vec<String>>,
    #[serde(skip)]
    referenced: HashSet<String>,
}

impl Default for CleanupIds {
    fn default() -> Self {
        Self {
            remove: remove_default(),
            preserve: None,
            preserve_prefixes: None,
            referenced: HashSet::new(),
        }
    }
}

impl Visitor for CleanupIds {
    type Error = JobsError;

    fn prepare(&mut self, _document: &Document, context_flags: &ContextFlags) -> PrepareOutcome {
        if !self.remove
            || context_flags.intersects(ContextFlags::HAS_STYLESHEET | ContextFlags::HAS_SCRIPT_REF)
        {
            PrepareOutcome::SKIP
        } else {
            PrepareOutcome::NONE
        }
    }

    fn document(&mut self, document: &mut Document, _context: &Context) -> Result<(), JobsError> {
        let Some(root) = document.root() else {
            return Ok(());
        };
        let referenced = &mut self.referenced;
        root.for_each_element(&mut |element| {
            for attr in &element.attributes {
                referenced.extend(
                    find_references(&attr.name, &attr.value)
                        .into_iter()
                        .map(String::from),
                );
            }
        });
        Ok(())
    }

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        let Some(id) = element.get_attribute("id") else {
            return Ok(());
        };
        if self.referenced.contains(id) || self.is_preserved(id) {
            return Ok(());
        }
        log::debug!("removing unreferenced id {id}");
        element.remove_attribute("id");
        Ok(())
    }
}

impl CleanupIds {
    fn is_preserved(&self, id: &str) -> bool {
        self.preserve
            .as_ref()
            .is_some_and(|preserve| preserve.iter().any(|item| item == id))
            || self
                .preserve_prefixes
                .as_ref()
                .is_some_and(|prefixes| prefixes.iter().any(|prefix| id.starts_with(prefix)))
    }
}

const fn remove_default() -> bool {
    true
}

#[test]
fn cleanup_ids() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "cleanupIds": {} }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
    <defs>
        <linearGradient id="gradient"/>
        <path id="shape" d="M0 0"/>
        <path id="unused" d="M0 0"/>
    </defs>
    <rect id="rect" fill="url(#gradient)"/>
    <use xlink:href="#shape"/>
</svg>"##
            ),
        )?,
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><defs><linearGradient id="gradient"/><path id="shape" d="M0 0"/><path d="M0 0"/></defs><rect fill="url(#gradient)"/><use xlink:href="#shape"/></svg>"##
    );

    assert_eq!(
        test_config(
            r#"{ "cleanupIds": { "preserve": ["a"], "preservePrefixes": ["icon-"] } }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="a"/><g id="icon-b"/><g id="c"/></svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="a"/><g id="icon-b"/><g/></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "cleanupIds": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg"><style>#a { fill: red }</style><g id="a"/></svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><style>#a { fill: red }</style><g id="a"/></svg>"#
    );

    Ok(())
}
