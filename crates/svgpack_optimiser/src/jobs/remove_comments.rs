use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use svgpack_ast::{
    node::{Document, Element, Node},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

const DEFAULT_PRESERVE_PATTERN: &str = "^!";

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes XML comments from the document.
///
/// By default this job ignores comments starting with `<!--!` which is often used
/// for legal information, such as copyright, licensing, or attribution.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// Scripts which target comments, or conditional comments such as `<!--[if IE 8]>`
/// may be affected.
///
/// # Errors
///
/// If one of the preserve patterns is not a valid regex.
pub struct RemoveComments {
    /// A list of regex patterns to match against comments, where matching comments will
    /// not be removed from the document.
    pub preserve_patterns: Option<Vec<String>>,
    #[serde(skip)]
    compiled: Vec<Regex>,
}

impl Visitor for RemoveComments {
    type Error = JobsError;

    fn document(&mut self, document: &mut Document, _context: &Context) -> Result<(), JobsError> {
        self.compiled = match &self.preserve_patterns {
            Some(patterns) => patterns
                .iter()
                .map(|pattern| Regex::new(pattern))
                .collect::<Result<_, _>>()?,
            None => vec![Regex::new(DEFAULT_PRESERVE_PATTERN)?],
        };
        self.remove_comments(&mut document.children);
        Ok(())
    }

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        self.remove_comments(&mut element.children);
        Ok(())
    }
}

impl RemoveComments {
    fn remove_comments(&self, children: &mut Vec<Node>) {
        children.retain(|child| match child {
            Node::Comment(value) => self.compiled.iter().any(|regex| regex.is_match(value)),
            _ => true,
        });
    }
}

#[test]
fn remove_comments() -> anyhow::Result<()> {
    use crate::test_config;

    insta::assert_snapshot!(
        test_config(
            r#"{ "removeComments": {} }"#,
            Some(
                r#"<!--!Icon Font v1--><svg xmlns="http://www.w3.org/2000/svg">
    <!--- test -->
    <g>
        <!--- test -->
    </g>
</svg>"#
            ),
        )?,
        @r#"<!--!Icon Font v1--><svg xmlns="http://www.w3.org/2000/svg"><g/></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "removeComments": { "preservePatterns": [] } }"#,
            Some(r#"<!--!Icon Font v1--><svg xmlns="http://www.w3.org/2000/svg"/>"#),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#
    );

    assert!(test_config(
        r#"{ "removeComments": { "preservePatterns": ["("] } }"#,
        None
    )
    .is_err());

    Ok(())
}
