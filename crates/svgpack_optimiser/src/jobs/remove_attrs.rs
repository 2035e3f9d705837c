use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use svgpack_ast::{
    node::{Document, Element},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

fn default_elem_separator() -> String {
    String::from(":")
}

const fn default_preserve_current_color() -> bool {
    false
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
/// Remove attributes based on whether it matches a pattern.
///
/// The patterns syntax is `[ element* : attribute* : value* ]`; where
///
/// - A regular expression matching an element's name. An asterisk or omission matches all.
/// - A regular expression matching an attribute's name.
/// - A regular expression matching an attribute's value. An asterisk or omission matches all.
///
/// # Example
///
/// Match `fill` attribute in `<path>` elements
///
/// ```
/// use svgpack_optimiser::{Jobs, RemoveAttrs};
///
/// let jobs = Jobs {
///   remove_attrs: Some(RemoveAttrs::new(vec![String::from("path:fill")])),
///   ..Jobs::none()
/// };
/// ```
///
/// # Correctness
///
/// Removing attributes may visually change the document if they're
/// presentation attributes or selected with CSS.
///
/// # Errors
///
/// If the regex fails to parse.
pub struct RemoveAttrs {
    /// A list of patterns that match attributes.
    pub attrs: Vec<String>,
    #[serde(default = "default_elem_separator")]
    /// The seperator for different parts of the pattern. By default this is `":"`.
    ///
    /// You may need to use this if you need to match attributes with a `:` (i.e. prefixed attributes).
    pub elem_separator: String,
    #[serde(default = "default_preserve_current_color")]
    /// Whether to ignore attributes set to `currentColor`
    pub preserve_current_color: bool,
    #[serde(skip)]
    parsed_attrs: Vec<[Regex; 3]>,
}

impl Default for RemoveAttrs {
    fn default() -> Self {
        RemoveAttrs {
            attrs: Vec::default(),
            elem_separator: default_elem_separator(),
            preserve_current_color: default_preserve_current_color(),
            parsed_attrs: Vec::default(),
        }
    }
}

fn create_regex(part: &str) -> Result<Regex, regex::Error> {
    if matches!(part, "*" | ".*") {
        return Ok(WILDCARD.clone());
    }
    Regex::new(&format!("^{part}$"))
}

impl RemoveAttrs {
    /// Creates the job with the given patterns and default options.
    pub fn new(attrs: Vec<String>) -> Self {
        Self {
            attrs,
            ..Self::default()
        }
    }

    fn parse_pattern(&self, pattern: &str) -> Result<[Regex; 3], regex::Error> {
        let list = match pattern.split_once(&self.elem_separator) {
            Some((start, rest)) => match rest.split_once(&self.elem_separator) {
                Some((middle, end)) => [
                    create_regex(start)?,
                    create_regex(middle)?,
                    create_regex(end)?,
                ],
                None => [create_regex(start)?, create_regex(rest)?, WILDCARD.clone()],
            },
            None => [WILDCARD.clone(), create_regex(pattern)?, WILDCARD.clone()],
        };
        Ok(list)
    }
}

impl Visitor for RemoveAttrs {
    type Error = JobsError;

    fn document(&mut self, _document: &mut Document, _context: &Context) -> Result<(), JobsError> {
        self.parsed_attrs = self
            .attrs
            .iter()
            .map(|pattern| self.parse_pattern(pattern))
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        let element_name = element.name.to_string();
        for pattern in &self.parsed_attrs {
            if !pattern[0].is_match(&element_name) {
                continue;
            }

            element.attributes.retain(|attr| {
                let is_current_color = self.preserve_current_color
                    && attr.name.prefix.is_none()
                    && matches!(attr.name.local.as_str(), "fill" | "stroke")
                    && attr.value.eq_ignore_ascii_case("currentcolor");
                if is_current_color || attr.name.is_xmlns() {
                    return true;
                }

                if !pattern[2].is_match(&attr.value) {
                    return true;
                }

                !pattern[1].is_match(&attr.name.to_string())
            });
        }

        Ok(())
    }
}

static WILDCARD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(".*").expect("wildcard regex is valid"));

#[test]
fn remove_attrs() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeAttrs": {
                "attrs": ["circle:stroke.*", "path:fill"]
            } }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg">
    <circle fill="red" stroke="#000" stroke-width="6" r="50"/>
    <path fill="red" stroke="red" d="M0 0"/>
</svg>"##
            )
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><circle fill="red" r="50"/><path stroke="red" d="M0 0"/></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "removeAttrs": {
                "attrs": ["(fill|stroke)"],
                "preserveCurrentColor": true
            } }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg">
    <circle fill="currentColor" stroke="#000" r="50"/>
</svg>"##
            )
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><circle fill="currentColor" r="50"/></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "removeAttrs": {
                "attrs": ["*:(stroke|fill):red"]
            } }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg">
    <path fill="red" stroke="#000" d="M0 0"/>
</svg>"##
            )
        )?,
        r##"<svg xmlns="http://www.w3.org/2000/svg"><path stroke="#000" d="M0 0"/></svg>"##
    );

    assert!(test_config(r#"{ "removeAttrs": { "attrs": ["("] } }"#, None).is_err());

    Ok(())
}

#[test]
fn remove_attrs_constructed() -> anyhow::Result<()> {
    use crate::{optimise, Jobs};

    let jobs = Jobs {
        remove_attrs: Some(RemoveAttrs::new(vec![String::from("(opacity|style)")])),
        ..Jobs::none()
    };
    assert_eq!(
        optimise(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><path opacity="0.5" style="fill:red" d="M0 0"/></svg>"#,
            &jobs
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0"/></svg>"#
    );
    Ok(())
}

#[test]
fn remove_attrs_opacity_and_style() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeAttrs": { "attrs": ["(opacity|style)"] } }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg" style="display:block">
    <path opacity=".5" fill-opacity=".5" style="fill:red" d="M0 0"/>
</svg>"#
            )
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><path fill-opacity=".5" d="M0 0"/></svg>"#
    );

    Ok(())
}
