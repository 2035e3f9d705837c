//! Parsing methods using roxmltree
//!
//! # Quirks
//!
//! Roxmltree has some notable quirks
//!
//! - The XML declaration and doctype aren't kept as nodes, so they're never written back out
//! - CDATA is merged into the surrounding text
//! - Duplicate namespace uris are merged
//!
//! Whitespace-only text is dropped and surrounding whitespace is trimmed, except within
//! elements where text is rendered or interpreted.
use std::collections::HashMap;

use roxmltree::{NodeType, ParsingOptions};

use crate::{
    error::ParseError,
    name::{QualName, XML},
    node::{Attribute, Document, Element, Node},
};

const MAX_DEPTH: u32 = 1024;

/// Elements where whitespace in text content is significant.
const TEXT_ELEMENTS: [&str; 12] = [
    "a",
    "altGlyph",
    "desc",
    "glyph",
    "glyphRef",
    "script",
    "style",
    "text",
    "textPath",
    "title",
    "tref",
    "tspan",
];

#[derive(Debug, Default)]
struct NamespaceMap<'a> {
    uri_to_prefix: HashMap<&'a str, Option<&'a str>>,
}

type Popped<'a> = (&'a str, Option<Option<&'a str>>);

impl<'a> NamespaceMap<'a> {
    fn new() -> Self {
        let mut map = Self::default();
        map.uri_to_prefix.insert(XML, Some("xml"));
        map
    }

    /// Binds `uri` to `prefix`, returning the binding it replaced so it can be restored
    /// once the declaring element's subtree is done.
    fn insert(&mut self, prefix: Option<&'a str>, uri: &'a str) -> Popped<'a> {
        (uri, self.uri_to_prefix.insert(uri, prefix))
    }

    fn restore(&mut self, popped: Vec<Popped<'a>>) {
        for (uri, previous) in popped.into_iter().rev() {
            match previous {
                Some(prefix) => self.uri_to_prefix.insert(uri, prefix),
                None => self.uri_to_prefix.remove(uri),
            };
        }
    }

    fn get_by_uri(&self, uri: Option<&str>) -> Option<&'a str> {
        uri.and_then(|uri| self.uri_to_prefix.get(uri).copied().flatten())
    }

    fn is_bound(&self, prefix: Option<&str>, uri: &str) -> bool {
        self.uri_to_prefix
            .get(uri)
            .is_some_and(|bound| *bound == prefix)
    }
}

/// Parses an SVG document from a string.
///
/// # Errors
///
/// If the document isn't well-formed XML, has no root element, or is too deep.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let xml = roxmltree::Document::parse_with_options(
        source,
        ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        },
    )
    .map_err(ParseError::ROXML)?;

    let mut namespace_map = NamespaceMap::new();
    let mut document = Document::default();
    for xml_child in xml.root().children() {
        if let Some(child) = parse_xml_node(xml_child, 0, false, &mut namespace_map)? {
            document.children.push(child);
        }
    }
    if document.root().is_none() {
        return Err(ParseError::NoRootElement);
    }
    log::trace!("parsed document with {} top-level nodes", document.children.len());
    Ok(document)
}

fn parse_xml_node<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    depth: u32,
    preserve_whitespace: bool,
    namespace_map: &mut NamespaceMap<'a>,
) -> Result<Option<Node>, ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::NodesLimitReached);
    }

    Ok(match node.node_type() {
        NodeType::Root => None,
        NodeType::Element => Some(Node::Element(parse_element(
            node,
            depth,
            preserve_whitespace,
            namespace_map,
        )?)),
        NodeType::PI => node.pi().map(|pi| Node::ProcessingInstruction {
            target: pi.target.to_string(),
            value: pi.value.map(String::from),
        }),
        NodeType::Comment => Some(Node::Comment(node.text().unwrap_or_default().to_string())),
        NodeType::Text => {
            let text = node.text().unwrap_or_default();
            if preserve_whitespace {
                Some(Node::Text(text.to_string()))
            } else {
                let text = text.trim();
                (!text.is_empty()).then(|| Node::Text(text.to_string()))
            }
        }
    })
}

fn parse_element<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    depth: u32,
    preserve_whitespace: bool,
    namespace_map: &mut NamespaceMap<'a>,
) -> Result<Element, ParseError> {
    let mut popped_ns = vec![];
    let mut attributes = Vec::with_capacity(node.attributes().len());
    for ns in node.namespaces() {
        if let Some(attr) = find_new_xmlns(ns, namespace_map, &mut popped_ns) {
            attributes.push(attr);
        }
    }

    let tag_name = node.tag_name();
    let name = QualName::new(
        namespace_map.get_by_uri(tag_name.namespace()),
        tag_name.name(),
    );
    attributes.extend(node.attributes().map(|attr| Attribute {
        name: QualName::new(namespace_map.get_by_uri(attr.namespace()), attr.name()),
        value: attr.value().to_string(),
    }));

    let preserve_whitespace = preserve_whitespace
        || TEXT_ELEMENTS.contains(&tag_name.name())
        || node.attribute((XML, "space")) == Some("preserve");
    let mut children = Vec::new();
    for xml_child in node.children() {
        if let Some(child) =
            parse_xml_node(xml_child, depth + 1, preserve_whitespace, namespace_map)?
        {
            children.push(child);
        }
    }
    namespace_map.restore(popped_ns);

    Ok(Element {
        name,
        attributes,
        children,
    })
}

/// When a new value for `ns` is found, add it to `namespace_map`
/// and return an `xmlns` attribute to add to the source element.
fn find_new_xmlns<'a, 'input: 'a>(
    ns: &'a roxmltree::Namespace<'input>,
    namespace_map: &mut NamespaceMap<'a>,
    popped_ns: &mut Vec<Popped<'a>>,
) -> Option<Attribute> {
    let uri = ns.uri();
    if uri.is_empty() || uri == XML || namespace_map.is_bound(ns.name(), uri) {
        return None;
    }
    popped_ns.push(namespace_map.insert(ns.name(), uri));
    Some(match ns.name() {
        Some(prefix) => Attribute {
            name: QualName::new(Some("xmlns"), prefix),
            value: uri.to_string(),
        },
        None => Attribute {
            name: QualName::local("xmlns"),
            value: uri.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_namespaces() {
        let dom = parse(
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
    <g xmlns:foo="https://example.com/foo">
        <use xlink:href="#a" foo:bar="baz"/>
    </g>
</svg>"##,
        )
        .unwrap();
        let root = dom.root().unwrap();
        assert_eq!(root.name, QualName::local("svg"));
        assert_eq!(
            root.attributes,
            vec![
                Attribute::new("xmlns", "http://www.w3.org/2000/svg"),
                Attribute::new("xmlns:xlink", "http://www.w3.org/1999/xlink"),
            ]
        );

        let g = root.child_elements().next().unwrap();
        assert_eq!(
            g.attributes,
            vec![Attribute::new("xmlns:foo", "https://example.com/foo")]
        );
        let r#use = g.child_elements().next().unwrap();
        assert_eq!(
            r#use.attributes,
            vec![
                Attribute::new("xlink:href", "#a"),
                Attribute::new("foo:bar", "baz"),
            ]
        );
    }

    #[test]
    fn parse_whitespace() {
        let dom = parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
    <text>  spaced  </text>
    <g>  trimmed  </g>
</svg>"#,
        )
        .unwrap();
        let root = dom.root().unwrap();
        assert_eq!(root.children.len(), 2);
        let mut children = root.child_elements();
        assert_eq!(
            children.next().unwrap().children,
            vec![Node::Text(String::from("  spaced  "))]
        );
        assert_eq!(
            children.next().unwrap().children,
            vec![Node::Text(String::from("trimmed"))]
        );
    }

    #[test]
    fn parse_prolog() {
        let dom = parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- Generator: editor -->
<svg xmlns="http://www.w3.org/2000/svg"/>"#,
        )
        .unwrap();
        assert_eq!(dom.children.len(), 2);
        assert_eq!(
            dom.children[0],
            Node::Comment(String::from(" Generator: editor "))
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse("<svg>"), Err(ParseError::ROXML(_))));
        assert!(matches!(parse("not xml"), Err(ParseError::ROXML(_))));
    }
}
