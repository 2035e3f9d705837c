//! Helpers shared between jobs, and with crates building on the optimiser.
use std::sync::LazyLock;

use regex::Regex;
use svgpack_ast::name::QualName;

pub(crate) mod colors;

/// Matches references to ids by `url(#id)`, capturing the id.
pub static REFERENCES_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\burl\(\s*["']?#([^"'()\s]+)["']?\s*\)"#).expect("references regex is valid")
});

/// Presentation attributes which accept a color.
pub const COLOR_PROPS: [&str; 6] = [
    "color",
    "fill",
    "flood-color",
    "lighting-color",
    "stop-color",
    "stroke",
];

/// Whether the attribute is an `href` or `xlink:href`.
pub fn is_href(name: &QualName) -> bool {
    name.local == "href" && matches!(name.prefix.as_deref(), None | Some("xlink"))
}

/// Returns the ids an attribute refers to, either by `url(#id)` or an `href` to `#id`.
pub fn find_references<'a>(name: &QualName, value: &'a str) -> Vec<&'a str> {
    if is_href(name) {
        return value.trim().strip_prefix('#').into_iter().collect();
    }
    REFERENCES_URL
        .captures_iter(value)
        .filter_map(|captures| captures.get(1))
        .map(|id| id.as_str())
        .collect()
}

/// Whether a length such as `0`, `0.0`, or `0px` is zero.
pub(crate) fn is_zero(value: &str) -> bool {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.parse::<f64>().is_ok_and(|number| number == 0.0)
}

#[test]
fn references() {
    assert_eq!(
        find_references(&QualName::local("fill"), "url(#a)"),
        vec!["a"]
    );
    assert_eq!(
        find_references(
            &QualName::local("style"),
            "fill:url('#b');stroke:url( \"#c\" )"
        ),
        vec!["b", "c"]
    );
    assert_eq!(
        find_references(&QualName::parse("xlink:href"), "#d"),
        vec!["d"]
    );
    assert!(find_references(&QualName::local("href"), "https://example.com").is_empty());
    assert!(find_references(&QualName::local("fill"), "red").is_empty());
}

#[test]
fn zero() {
    assert!(is_zero("0"));
    assert!(is_zero(" 0.0 "));
    assert!(is_zero("0px"));
    assert!(!is_zero("1"));
    assert!(!is_zero("50%"));
    assert!(!is_zero(""));
}
