//! The nodes of a parsed document.
use crate::name::QualName;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A node within a document.
pub enum Node {
    /// An element, such as `<svg>`
    Element(Element),
    /// A text node, with entities already decoded
    Text(String),
    /// A comment, such as `<!-- comment -->`
    Comment(String),
    /// A processing instruction, such as `<?xml-stylesheet href="style.css"?>`
    ProcessingInstruction {
        /// The target of the instruction, such as `xml-stylesheet`
        target: String,
        /// The content following the target
        value: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An attribute of an element.
pub struct Attribute {
    /// The qualified name of the attribute
    pub name: QualName,
    /// The unescaped value of the attribute
    pub value: String,
}

impl Attribute {
    /// Creates an attribute from a name formatted as `prefix:local` or `local`.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: QualName::parse(name),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An element and its subtree.
///
/// Namespace declarations are kept as regular attributes, such as `xmlns` or `xmlns:xlink`,
/// on the element they were declared on.
pub struct Element {
    /// The qualified name of the element
    pub name: QualName,
    /// The attributes of the element, in document order
    pub attributes: Vec<Attribute>,
    /// The child nodes of the element
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an element without attributes or children.
    pub fn new(name: QualName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the local name of the element, such as `svg`.
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// Whether the element has the given local name and no prefix.
    pub fn is(&self, local: &str) -> bool {
        self.name.prefix.is_none() && self.name.local == local
    }

    /// Returns the value of the attribute matching the formatted name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.matches(name))
            .map(|attr| attr.value.as_str())
    }

    /// Whether the element has an attribute matching the formatted name.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Sets the value of an attribute, appending it when it doesn't exist yet.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(attr) = self.attributes.iter_mut().find(|attr| attr.name.matches(name)) {
            value.clone_into(&mut attr.value);
        } else {
            self.attributes.push(Attribute::new(name, value));
        }
    }

    /// Removes an attribute, returning its value if it existed.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|attr| attr.name.matches(name))?;
        Some(self.attributes.remove(index).value)
    }

    /// Iterates over the child nodes which are elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Iterates mutably over the child nodes which are elements.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Calls `f` for this element and each descendant element, in document order.
    pub fn for_each_element(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in self.child_elements() {
            child.for_each_element(f);
        }
    }

    /// Calls `f` for this element and each descendant element, in document order.
    pub fn for_each_element_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in self.child_elements_mut() {
            child.for_each_element_mut(f);
        }
    }

    /// Returns the concatenated text of the element's text children.
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        for child in &self.children {
            match child {
                Node::Text(text) => result.push_str(text),
                Node::Element(element) => result.push_str(&element.text_content()),
                _ => {}
            }
        }
        result
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A parsed document. The root element is one of its children, surrounded by any
/// top-level comments or processing instructions.
pub struct Document {
    /// The top-level nodes of the document
    pub children: Vec<Node>,
}

impl Document {
    /// Returns the root element of the document
    pub fn root(&self) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Returns the root element of the document
    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes() {
        let mut element = Element::new(QualName::local("path"));
        element.set_attribute("fill", "red");
        element.set_attribute("xlink:href", "#a");
        element.set_attribute("fill", "blue");

        assert_eq!(element.attributes.len(), 2);
        assert_eq!(element.get_attribute("fill"), Some("blue"));
        assert_eq!(element.get_attribute("xlink:href"), Some("#a"));
        assert_eq!(element.get_attribute("href"), None);

        assert_eq!(element.remove_attribute("fill"), Some(String::from("blue")));
        assert!(!element.has_attribute("fill"));
        assert_eq!(element.remove_attribute("fill"), None);
    }

    #[test]
    fn text_content() {
        let mut text = Element::new(QualName::local("text"));
        text.children.push(Node::Text(String::from("Hello ")));
        let mut tspan = Element::new(QualName::local("tspan"));
        tspan.children.push(Node::Text(String::from("world")));
        text.children.push(Node::Element(tspan));
        text.children.push(Node::Comment(String::from("ignored")));

        assert_eq!(text.text_content(), "Hello world");
    }
}
