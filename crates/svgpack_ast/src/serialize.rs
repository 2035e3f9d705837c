//! Serialization of documents and elements into markup.
use std::io::Write;

use crate::{
    error::XmlWriterError,
    node::{self, Document, Element},
    xmlwriter::{self, XmlWriter},
};

pub use crate::xmlwriter::{Indent, Options};

/// Elements whose text is written as-is rather than indented.
const PRESERVE_WHITESPACE_ELEMENTS: [&str; 8] = [
    "desc", "script", "style", "text", "textPath", "title", "tref", "tspan",
];

/// Elements whose text is written as CDATA when it would otherwise need escaping.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Serializes a node into markup.
pub trait Node {
    /// Writes the node's markup into `sink`, returning the sink once done.
    ///
    /// # Errors
    ///
    /// If writing to the sink fails.
    fn serialize_into<W: Write>(&self, sink: W, options: Options) -> Result<W, XmlWriterError>;

    /// Serializes the node into a string.
    ///
    /// # Errors
    ///
    /// If writing fails or produces invalid UTF-8.
    fn serialize_with_options(&self, options: Options) -> Result<String, XmlWriterError> {
        let bytes = self.serialize_into(Vec::new(), options)?;
        String::from_utf8(bytes).map_err(XmlWriterError::UTF8)
    }

    /// Serializes the node into a compact string.
    ///
    /// # Errors
    ///
    /// If writing fails or produces invalid UTF-8.
    fn serialize(&self) -> Result<String, XmlWriterError> {
        self.serialize_with_options(Options::default())
    }
}

impl Node for Document {
    fn serialize_into<W: Write>(&self, sink: W, options: Options) -> Result<W, XmlWriterError> {
        let mut writer = XmlWriter::new(sink, options);
        for child in &self.children {
            write_node(&mut writer, child)?;
        }
        writer.end_document()
    }
}

impl Node for Element {
    fn serialize_into<W: Write>(&self, sink: W, options: Options) -> Result<W, XmlWriterError> {
        let mut writer = XmlWriter::new(sink, options);
        write_element(&mut writer, self, false)?;
        writer.end_document()
    }
}

/// Writes a node and its subtree with an existing writer.
///
/// # Errors
///
/// If writing to the sink fails.
pub fn write_node<W: Write>(
    writer: &mut XmlWriter<W>,
    node: &node::Node,
) -> xmlwriter::Result {
    write_node_impl(writer, node, false, false)
}

fn write_node_impl<W: Write>(
    writer: &mut XmlWriter<W>,
    node: &node::Node,
    preserve_whitespace: bool,
    raw_text: bool,
) -> xmlwriter::Result {
    match node {
        node::Node::Element(element) => write_element(writer, element, preserve_whitespace),
        node::Node::Text(text) if raw_text && text.contains(['<', '>', '&']) => {
            writer.write_cdata_text(text)
        }
        node::Node::Text(text) => writer.write_text(text),
        node::Node::Comment(comment) => writer.write_comment(comment),
        node::Node::ProcessingInstruction { target, value } => {
            writer.write_processing_instruction(target, value.as_deref())
        }
    }
}

fn write_element<W: Write>(
    writer: &mut XmlWriter<W>,
    element: &Element,
    preserve_whitespace: bool,
) -> xmlwriter::Result {
    writer.start_element(element.name.clone())?;
    for attr in &element.attributes {
        writer.write_attribute(&attr.name.to_string(), &attr.value)?;
    }

    let preserve_children = preserve_whitespace
        || PRESERVE_WHITESPACE_ELEMENTS.contains(&element.local_name())
        || element.get_attribute("xml:space") == Some("preserve");
    let raw_text = RAW_TEXT_ELEMENTS.contains(&element.local_name());
    writer.set_preserve_whitespaces(preserve_children);
    for child in &element.children {
        write_node_impl(writer, child, preserve_children, raw_text)?;
    }
    writer.end_element()?;
    writer.set_preserve_whitespaces(preserve_whitespace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn serialize_compact() {
        let dom = parse(
            r##"<!--!legal-->
<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
    <?pi value?>
    <use xlink:href="#a"/>
    <text x="1">  a &amp; b  </text>
</svg>"##,
        )
        .unwrap();
        insta::assert_snapshot!(
            dom.serialize().unwrap(),
            @r##"<!--!legal--><svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><?pi value?><use xlink:href="#a"/><text x="1">  a &amp; b  </text></svg>"##
        );
    }

    #[test]
    fn serialize_style_as_cdata() {
        let dom = parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><style>g > path { fill: red }</style><style>.a{}</style></svg>"#,
        )
        .unwrap();
        assert_eq!(
            dom.serialize().unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg"><style><![CDATA[g > path { fill: red }]]></style><style>.a{}</style></svg>"#
        );
    }

    #[test]
    fn serialize_pretty() {
        let dom = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><g><path d="M0 0"/></g></svg>"#)
            .unwrap();
        assert_eq!(
            dom.serialize_with_options(Options {
                indent: Indent::Spaces(2),
                ..Options::default()
            })
            .unwrap(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <g>\n    <path d=\"M0 0\"/>\n  </g>\n</svg>\n"
        );
    }

    #[test]
    fn serialize_is_stable() {
        let source = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><g fill="red" opacity=".5"><path d="M0 0h10v10z"/></g></svg>"#;
        let once = parse(source).unwrap().serialize().unwrap();
        let twice = parse(&once).unwrap().serialize().unwrap();
        assert_eq!(once, source);
        assert_eq!(twice, once);
    }
}
