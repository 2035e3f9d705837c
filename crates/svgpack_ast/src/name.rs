//! Qualified names for elements and attributes.
use std::fmt::Display;

/// The namespace uri of SVG elements.
pub const SVG: &str = "http://www.w3.org/2000/svg";
/// The namespace uri bound to the reserved `xml` prefix.
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A name with an optional prefix, e.g. `xlink:href`.
pub struct QualName {
    /// The prefix of the name, such as `xlink` in `xlink:href`
    pub prefix: Option<String>,
    /// The local part of the name, such as `href` in `xlink:href`
    pub local: String,
}

impl QualName {
    /// Creates a name with the given prefix.
    pub fn new(prefix: Option<&str>, local: &str) -> Self {
        Self {
            prefix: prefix.map(String::from),
            local: local.to_string(),
        }
    }

    /// Creates a name without a prefix.
    pub fn local(local: &str) -> Self {
        Self::new(None, local)
    }

    /// Parses a name formatted as `prefix:local` or `local`.
    pub fn parse(name: &str) -> Self {
        match name.split_once(':') {
            Some((prefix, local)) => Self::new(Some(prefix), local),
            None => Self::local(name),
        }
    }

    /// Whether this is a namespace declaration, such as `xmlns` or `xmlns:xlink`
    pub fn is_xmlns(&self) -> bool {
        match &self.prefix {
            Some(prefix) => prefix == "xmlns",
            None => self.local == "xmlns",
        }
    }

    /// Whether the name matches the formatted `prefix:local` or `local` string.
    pub fn matches(&self, name: &str) -> bool {
        match (&self.prefix, name.split_once(':')) {
            (Some(prefix), Some((other_prefix, local))) => {
                prefix == other_prefix && self.local == local
            }
            (None, None) => self.local == name,
            _ => false,
        }
    }
}

impl Display for QualName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = &self.prefix {
            f.write_str(prefix)?;
            f.write_str(":")?;
        }
        f.write_str(&self.local)
    }
}

#[test]
fn qual_name() {
    let name = QualName::parse("xlink:href");
    assert_eq!(name.prefix.as_deref(), Some("xlink"));
    assert_eq!(name.to_string(), "xlink:href");
    assert!(name.matches("xlink:href"));
    assert!(!name.matches("href"));

    assert!(QualName::local("xmlns").is_xmlns());
    assert!(QualName::parse("xmlns:xlink").is_xmlns());
    assert!(!QualName::local("fill").is_xmlns());
}
