//! Shapes registered with a spriter, and their conversion into `<symbol>` elements.
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use svgpack_ast::{
    name::QualName,
    node::{Attribute, Element, Node},
    parse::parse,
};
use svgpack_optimiser::{
    utils::{is_href, REFERENCES_URL},
    Jobs,
};

use crate::error::SpriteError;

/// Attributes of a shape's root which aren't carried over to its `<symbol>`.
const OMITTED_ROOT_ATTRIBUTES: [&str; 7] =
    ["id", "width", "height", "x", "y", "viewBox", "version"];

#[derive(Debug, Clone)]
/// A shape added to a spriter, waiting to be compiled.
pub struct Shape {
    /// The id of the shape within the sprite
    pub id: String,
    /// The path the shape was read from
    pub path: PathBuf,
    /// The name the shape was added with
    pub name: String,
    /// The source of the shape
    pub contents: String,
}

/// A compiled shape.
pub(crate) struct Symbol {
    /// The `<symbol>` element
    pub element: Element,
    /// The prefixed namespace declarations of the shape's root
    pub namespaces: Vec<Attribute>,
}

impl Shape {
    /// Creates a shape from a path, name, and its source.
    pub fn new(id: String, path: &Path, name: &str, contents: String) -> Self {
        Self {
            id,
            path: path.to_path_buf(),
            name: name.to_string(),
            contents,
        }
    }

    /// Parses and transforms the shape into a `<symbol>`.
    pub(crate) fn compile(
        &self,
        transform: &Jobs,
        namespace_ids: bool,
    ) -> Result<Symbol, SpriteError> {
        let mut document = parse(&self.contents).map_err(|source| SpriteError::Parse {
            name: self.name.clone(),
            source,
        })?;
        transform
            .run(&mut document)
            .map_err(|source| SpriteError::Transform {
                name: self.name.clone(),
                source,
            })?;

        let Some(mut root) = document.children.into_iter().find_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        }) else {
            return Err(SpriteError::InvalidViewBox {
                name: self.name.clone(),
            });
        };
        let view_box = self.view_box(&root)?;

        if namespace_ids {
            namespace_ids_of(&mut root, &self.id);
        }

        let mut symbol = Element::new(QualName::local("symbol"));
        symbol.attributes.push(Attribute::new("id", &self.id));
        symbol.attributes.push(Attribute::new("viewBox", &view_box));
        let mut namespaces = Vec::new();
        for attr in root.attributes {
            if attr.name.prefix.as_deref() == Some("xmlns") {
                namespaces.push(attr);
            } else if attr.name.is_xmlns()
                || (attr.name.prefix.is_none()
                    && OMITTED_ROOT_ATTRIBUTES.contains(&attr.name.local.as_str()))
            {
                continue;
            } else {
                symbol.attributes.push(attr);
            }
        }
        symbol.children = root.children;

        Ok(Symbol {
            element: symbol,
            namespaces,
        })
    }

    fn view_box(&self, root: &Element) -> Result<String, SpriteError> {
        if let Some(view_box) = root.get_attribute("viewBox") {
            return Ok(view_box.trim().to_string());
        }
        match (
            root.get_attribute("width").and_then(numeric_length),
            root.get_attribute("height").and_then(numeric_length),
        ) {
            (Some(width), Some(height)) => Ok(format!("0 0 {width} {height}")),
            _ => Err(SpriteError::InvalidViewBox {
                name: self.name.clone(),
            }),
        }
    }
}

/// Returns a length without its `px` unit, when numeric.
fn numeric_length(value: &str) -> Option<&str> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.parse::<f64>().ok().map(|_| value)
}

/// Prefixes each id within `root` with `prefix`, updating any references to them.
fn namespace_ids_of(root: &mut Element, prefix: &str) {
    let mut ids = HashSet::new();
    root.for_each_element(&mut |element| {
        if let Some(id) = element.get_attribute("id") {
            ids.insert(id.to_string());
        }
    });
    if ids.is_empty() {
        return;
    }

    root.for_each_element_mut(&mut |element| {
        for attr in &mut element.attributes {
            if attr.name.prefix.is_none() && attr.name.local == "id" {
                attr.value = format!("{prefix}-{}", attr.value);
            } else if is_href(&attr.name) {
                if let Some(id) = attr.value.trim().strip_prefix('#') {
                    if ids.contains(id) {
                        attr.value = format!("#{prefix}-{id}");
                    }
                }
            } else if let Some(value) = replace_urls(&attr.value, &ids, prefix) {
                attr.value = value;
            }
        }
        if element.is("style") {
            for child in &mut element.children {
                if let Node::Text(text) = child {
                    let selectors = replace_id_selectors(text, &ids, prefix);
                    let css = selectors.as_deref().unwrap_or(text);
                    if let Some(value) = replace_urls(css, &ids, prefix).or(selectors) {
                        *text = value;
                    }
                }
            }
        }
    });
}

/// Returns the value with each `url(#id)` of a known id prefixed, if any were found.
fn replace_urls(value: &str, ids: &HashSet<String>, prefix: &str) -> Option<String> {
    let mut replaced = false;
    let result = REFERENCES_URL.replace_all(value, |captures: &regex::Captures| {
        let id = &captures[1];
        if ids.contains(id) {
            replaced = true;
            format!("url(#{prefix}-{id})")
        } else {
            captures[0].to_string()
        }
    });
    replaced.then(|| result.into_owned())
}

/// Matches the selector list or at-rule prelude before a `{`.
static SELECTOR_PRELUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^{};]+\{").expect("prelude regex is valid"));

/// Matches an id selector, capturing the id.
static ID_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(-?[_a-zA-Z][\w-]*)").expect("id selector regex is valid"));

/// Returns the stylesheet with each `#id` selector of a known id prefixed, if any were found.
///
/// Declarations are left alone, so colors such as `#fff` are never mistaken for ids.
fn replace_id_selectors(css: &str, ids: &HashSet<String>, prefix: &str) -> Option<String> {
    let mut replaced = false;
    let result = SELECTOR_PRELUDE.replace_all(css, |prelude: &regex::Captures| {
        ID_SELECTOR
            .replace_all(&prelude[0], |selector: &regex::Captures| {
                let id = &selector[1];
                if ids.contains(id) {
                    replaced = true;
                    format!("#{prefix}-{id}")
                } else {
                    selector[0].to_string()
                }
            })
            .into_owned()
    });
    replaced.then(|| result.into_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use svgpack_ast::serialize::Node as _;

    use super::*;

    fn compile(name: &str, contents: &str) -> Result<Symbol, SpriteError> {
        let id = name.replacen(".svg", "", 1);
        Shape::new(id, Path::new(name), name, contents.to_string()).compile(&Jobs::none(), true)
    }

    #[test]
    fn symbol() -> anyhow::Result<()> {
        let symbol = compile(
            "star.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="24" height="24" viewBox="0 0 24 24" fill="none"><path d="M0 0"/></svg>"#,
        )?;
        assert_eq!(
            symbol.element.serialize()?,
            r#"<symbol id="star" viewBox="0 0 24 24" fill="none"><path d="M0 0"/></symbol>"#
        );
        assert!(symbol.namespaces.is_empty());
        Ok(())
    }

    #[test]
    fn view_box_from_size() -> anyhow::Result<()> {
        let symbol = compile(
            "a.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="16px" height="8"/>"#,
        )?;
        assert_eq!(symbol.element.get_attribute("viewBox"), Some("0 0 16 8"));

        let error = compile(
            "b.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="8"/>"#,
        );
        assert!(matches!(error, Err(SpriteError::InvalidViewBox { name }) if name == "b.svg"));
        Ok(())
    }

    #[test]
    fn namespaced_ids() -> anyhow::Result<()> {
        let symbol = compile(
            "logo.svg",
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 1 1">
    <style>.a { fill: url(#g) }</style>
    <linearGradient id="g"/>
    <path id="p" fill="url(#g)" style="stroke:url('#g')" d="M0 0"/>
    <use xlink:href="#p"/>
    <use href="#elsewhere"/>
</svg>"##,
        )?;
        assert_eq!(
            symbol.element.serialize()?,
            r##"<symbol id="logo" viewBox="0 0 1 1"><style>.a { fill: url(#logo-g) }</style><linearGradient id="logo-g"/><path id="logo-p" fill="url(#logo-g)" style="stroke:url(#logo-g)" d="M0 0"/><use xlink:href="#logo-p"/><use href="#elsewhere"/></symbol>"##
        );
        assert_eq!(
            symbol.namespaces,
            vec![Attribute::new("xmlns:xlink", "http://www.w3.org/1999/xlink")]
        );
        Ok(())
    }

    #[test]
    fn namespaced_selectors() -> anyhow::Result<()> {
        let symbol = compile(
            "badge.svg",
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1">
    <style>#g{fill:red}#other,g #g:hover{stroke:#fff}@media (prefers-color-scheme:dark){#g{fill:url(#g)}}</style>
    <path id="g" d="M0 0"/>
</svg>"##,
        )?;
        assert_eq!(
            symbol.element.serialize()?,
            r##"<symbol id="badge" viewBox="0 0 1 1"><style>#badge-g{fill:red}#other,g #badge-g:hover{stroke:#fff}@media (prefers-color-scheme:dark){#badge-g{fill:url(#badge-g)}}</style><path id="badge-g" d="M0 0"/></symbol>"##
        );
        Ok(())
    }

    #[test]
    fn parse_error() {
        assert!(matches!(
            compile("broken.svg", "<svg"),
            Err(SpriteError::Parse { name, .. }) if name == "broken.svg"
        ));
    }
}
