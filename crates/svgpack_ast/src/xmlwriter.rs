/*!
A streaming XML writer, loosely following the [xmlwriter](https://docs.rs/xmlwriter/latest/xmlwriter/index.html)
crate.

- Errors instead of panicking
- Writes our [`QualName`] for elements
- Allows writing custom xml declarations

```
use svgpack_ast::{name::QualName, xmlwriter::{Indent, Options, XmlWriter}};

let mut w = XmlWriter::new(Vec::<u8>::new(), Options { indent: Indent::Spaces(4), ..Options::default() });
w.start_element(QualName::local("svg")).unwrap();
w.write_attribute("viewBox", "0 0 128 128").unwrap();
w.start_element(QualName::local("text")).unwrap();
w.write_text("length < 5").unwrap();
assert_eq!(
    String::from_utf8(w.end_document().unwrap()).unwrap(),
    "<svg viewBox=\"0 0 128 128\">\n    <text>\n        length &lt; 5\n    </text>\n</svg>\n",
);
```
*/
use std::io::Write;

use crate::{error::XmlWriterError, name::QualName};

/// A result from writing part of a document.
pub type Result = std::result::Result<(), XmlWriterError>;

/// An XML node indention.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Indent {
    /// Disable indention and new lines.
    #[default]
    None,
    /// Indent with spaces. Preferred range is 0..4.
    Spaces(u8),
    /// Indent with tabs.
    Tabs,
}

/// An XML writing options.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,
    /// Set XML nodes indention.
    ///
    /// Default: `None`
    pub indent: Indent,
    /// Write self-closing tags when element is empty.
    ///
    /// Default: enabled
    pub enable_self_closing: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            use_single_quote: false,
            indent: Indent::None,
            enable_self_closing: true,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum State {
    Empty,
    Document,
    Attributes,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Escape {
    AttributeValue,
    Text,
}

#[derive(Debug)]
struct Depth {
    element_name: QualName,
    has_children: bool,
}

/// An XML writer.
#[derive(Debug)]
pub struct XmlWriter<W: Write> {
    writer: W,
    state: State,
    preserve_whitespaces: bool,
    depth_stack: Vec<Depth>,
    opt: Options,
}

impl<W: Write> XmlWriter<W> {
    /// Creates a new `XmlWriter`, writing data in the writer.
    pub fn new(writer: W, opt: Options) -> Self {
        XmlWriter {
            writer,
            state: State::Empty,
            preserve_whitespaces: false,
            depth_stack: Vec::new(),
            opt,
        }
    }

    /// Writes an XML declaration, such as `<?xml version="1.0" encoding="utf-8"?>`
    ///
    /// # Errors
    ///
    /// - When called after anything else was written.
    pub fn write_declaration(&mut self, value: &str) -> Result {
        if self.state != State::Empty {
            return Err(XmlWriterError::DeclarationAlreadyWritten);
        }
        write!(self.writer, "<?xml {value}?>")?;
        self.state = State::Document;
        Ok(())
    }

    /// Writes a processing instruction, such as `<?xml-stylesheet href="style.css"?>`
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_processing_instruction(&mut self, target: &str, value: Option<&str>) -> Result {
        self.prepare_node()?;
        match value {
            Some(value) => write!(self.writer, "<?{target} {value}?>")?,
            None => write!(self.writer, "<?{target}?>")?,
        }
        self.state = State::Document;
        Ok(())
    }

    /// Writes a comment string.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn write_comment(&mut self, text: &str) -> Result {
        self.prepare_node()?;
        write!(self.writer, "<!--{text}-->")?;
        self.state = State::Document;
        Ok(())
    }

    /// Starts writing a new element.
    ///
    /// This method writes only the `<tag-name` part.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn start_element(&mut self, name: QualName) -> Result {
        self.prepare_node()?;
        write!(self.writer, "<{name}")?;
        self.depth_stack.push(Depth {
            element_name: name,
            has_children: false,
        });
        self.state = State::Attributes;
        Ok(())
    }

    /// Writes an attribute.
    ///
    /// Any occurrence of `&<>` and the quote character in the value will be escaped.
    ///
    /// # Errors
    ///
    /// - When called before `start_element()`.
    /// - When called after `close_element()`.
    pub fn write_attribute(&mut self, name: &str, value: &str) -> Result {
        if self.state != State::Attributes {
            return Err(XmlWriterError::AttributeWrittenBeforeElement);
        }
        let quote = self.quote();
        write!(self.writer, " {name}={quote}")?;
        self.write_escaped(value, Escape::AttributeValue)?;
        write!(self.writer, "{quote}")?;
        Ok(())
    }

    /// Sets the preserve whitespaces flag.
    ///
    /// - If set, text nodes will be written as is.
    /// - If not set, text nodes will be indented.
    pub fn set_preserve_whitespaces(&mut self, preserve: bool) {
        self.preserve_whitespaces = preserve;
    }

    /// Writes a text node.
    ///
    /// `<>&` will be escaped.
    ///
    /// # Errors
    ///
    /// - When called not after `start_element()`.
    pub fn write_text(&mut self, text: &str) -> Result {
        if self.depth_stack.is_empty() {
            return Err(XmlWriterError::TextBeforeElement);
        }
        self.prepare_node()?;
        self.write_escaped(text, Escape::Text)?;
        self.state = State::Document;
        Ok(())
    }

    /// Writes text inside a `<![CDATA[ ... ]]>` node.
    ///
    /// # Errors
    ///
    /// - When called not after `start_element()`.
    /// - When the text contains the literal `]]>`.
    pub fn write_cdata_text(&mut self, text: &str) -> Result {
        if text.contains("]]>") {
            return Err(XmlWriterError::BadCDATA);
        }
        if self.depth_stack.is_empty() {
            return Err(XmlWriterError::TextBeforeElement);
        }
        self.prepare_node()?;
        write!(self.writer, "<![CDATA[{text}]]>")?;
        self.state = State::Document;
        Ok(())
    }

    /// Closes an open element.
    ///
    /// # Errors
    ///
    /// When there's no open element or when io fails.
    pub fn end_element(&mut self) -> Result {
        let Some(depth) = self.depth_stack.pop() else {
            return Err(XmlWriterError::ClosedUnopenedElement);
        };
        if !depth.has_children && self.opt.enable_self_closing {
            self.writer.write_all(b"/>")?;
        } else {
            if !depth.has_children {
                self.writer.write_all(b">")?;
            } else {
                self.write_new_line()?;
                self.write_indent(self.depth_stack.len())?;
            }
            write!(self.writer, "</{}>", depth.element_name)?;
        }
        self.state = State::Document;
        Ok(())
    }

    /// Closes all open elements and returns back the writer.
    ///
    /// # Errors
    ///
    /// When io fails.
    pub fn end_document(mut self) -> std::result::Result<W, XmlWriterError> {
        while !self.depth_stack.is_empty() {
            self.end_element()?;
        }
        if self.state != State::Empty {
            self.write_new_line()?;
        }
        Ok(self.writer)
    }

    /// Finishes an open start tag and moves to the position of the next node.
    fn prepare_node(&mut self) -> Result {
        if self.state == State::Attributes {
            if let Some(depth) = self.depth_stack.last_mut() {
                depth.has_children = true;
            }
            self.writer.write_all(b">")?;
            self.state = State::Document;
        }
        if self.state != State::Empty {
            self.write_new_line()?;
        }
        self.write_indent(self.depth_stack.len())
    }

    fn quote(&self) -> char {
        if self.opt.use_single_quote {
            '\''
        } else {
            '"'
        }
    }

    fn write_escaped(&mut self, s: &str, escape: Escape) -> Result {
        let mut part_start_pos = 0;
        for (byte_pos, byte) in s.bytes().enumerate() {
            let escaped: Option<&[u8]> = match byte {
                b'&' => Some(b"&amp;"),
                b'<' => Some(b"&lt;"),
                b'>' => Some(b"&gt;"),
                b'"' if escape == Escape::AttributeValue && !self.opt.use_single_quote => {
                    Some(b"&quot;")
                }
                b'\'' if escape == Escape::AttributeValue && self.opt.use_single_quote => {
                    Some(b"&apos;")
                }
                _ => None,
            };
            if let Some(escaped) = escaped {
                self.writer.write_all(s[part_start_pos..byte_pos].as_bytes())?;
                self.writer.write_all(escaped)?;
                part_start_pos = byte_pos + 1;
            }
        }
        self.writer.write_all(s[part_start_pos..].as_bytes())?;
        Ok(())
    }

    fn write_indent(&mut self, depth: usize) -> Result {
        if self.preserve_whitespaces {
            return Ok(());
        }
        for _ in 0..depth {
            match self.opt.indent {
                Indent::None => return Ok(()),
                Indent::Spaces(n) => {
                    for _ in 0..n {
                        self.writer.write_all(b" ")?;
                    }
                }
                Indent::Tabs => self.writer.write_all(b"\t")?,
            }
        }
        Ok(())
    }

    fn write_new_line(&mut self) -> Result {
        if self.opt.indent != Indent::None && !self.preserve_whitespaces {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(w: XmlWriter<Vec<u8>>) -> String {
        String::from_utf8(w.end_document().unwrap()).unwrap()
    }

    #[test]
    fn escaping() {
        let mut w = XmlWriter::new(Vec::new(), Options::default());
        w.start_element(QualName::local("text")).unwrap();
        w.write_attribute("data-x", r#"a "b" & 'c'"#).unwrap();
        w.write_text("1 < 2 & 'three'").unwrap();
        assert_eq!(
            finish(w),
            r#"<text data-x="a &quot;b&quot; &amp; 'c'">1 &lt; 2 &amp; 'three'</text>"#
        );

        let mut w = XmlWriter::new(
            Vec::new(),
            Options {
                use_single_quote: true,
                ..Options::default()
            },
        );
        w.start_element(QualName::local("g")).unwrap();
        w.write_attribute("data-x", r#"a "b" 'c'"#).unwrap();
        assert_eq!(finish(w), r#"<g data-x='a "b" &apos;c&apos;'/>"#);
    }

    #[test]
    fn self_closing() {
        let mut w = XmlWriter::new(
            Vec::new(),
            Options {
                enable_self_closing: false,
                ..Options::default()
            },
        );
        w.start_element(QualName::local("svg")).unwrap();
        w.start_element(QualName::local("path")).unwrap();
        assert_eq!(finish(w), "<svg><path></path></svg>");
    }

    #[test]
    fn declaration() {
        let mut w = XmlWriter::new(Vec::new(), Options::default());
        w.write_declaration(r#"version="1.0" encoding="utf-8""#)
            .unwrap();
        w.start_element(QualName::local("svg")).unwrap();
        assert!(matches!(
            w.write_declaration("version=\"1.0\""),
            Err(XmlWriterError::DeclarationAlreadyWritten)
        ));
        assert_eq!(finish(w), r#"<?xml version="1.0" encoding="utf-8"?><svg/>"#);
    }

    #[test]
    fn misuse() {
        let mut w = XmlWriter::new(Vec::new(), Options::default());
        assert!(matches!(
            w.write_attribute("x", "1"),
            Err(XmlWriterError::AttributeWrittenBeforeElement)
        ));
        assert!(matches!(
            w.write_text("x"),
            Err(XmlWriterError::TextBeforeElement)
        ));
        assert!(matches!(
            w.end_element(),
            Err(XmlWriterError::ClosedUnopenedElement)
        ));
        w.start_element(QualName::local("style")).unwrap();
        assert!(matches!(
            w.write_cdata_text("]]>"),
            Err(XmlWriterError::BadCDATA)
        ));
    }
}
