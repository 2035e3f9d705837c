use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use svgpack_ast::{
    node::Element,
    visitor::{Context, Visitor},
};

use crate::{
    error::JobsError,
    utils::{colors, COLOR_PROPS},
};

#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// How the colors will be converted.
pub enum Method {
    #[default]
    /// Convert each color to its shortest equivalent notation.
    Value,
    /// Convert all colors to `currentColor`.
    CurrentColor,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
/// Converts color references to their shortest equivalent.
///
/// Colors in presentation attributes such as `fill` or `stroke` are converted, in order, by
///
/// 1. Converting names to hex, e.g. `Red` to `#ff0000`
/// 2. Converting `rgb()` to hex, e.g. `rgb(255, 0, 0)` to `#ff0000`
/// 3. Lowercasing hex values
/// 4. Shortening hex values, e.g. `#ff0000` to `#f00`
/// 5. Converting hex to a shorter name, e.g. `#f00` to `red`
///
/// Values which aren't fixed colors, such as `none`, `currentColor`, or `url(#gradient)`,
/// are left as is.
///
/// # Correctness
///
/// By default this job should never visually change the document.
///
/// If the [`Method::CurrentColor`] is used all colours will inherit their text colour, which
/// may be different to original. Colors within a `<mask>` are never converted to `currentColor`,
/// as the luminance of a mask's content is significant.
///
/// # Errors
///
/// Never.
pub struct ConvertColors {
    /// Specifies how colours should be converted.
    pub method: Option<Method>,
}

impl Visitor for ConvertColors {
    type Error = JobsError;

    fn element(&mut self, element: &mut Element, context: &Context) -> Result<(), JobsError> {
        let is_masked = element.is("mask") || context.within("mask");

        let mut method = self.method.unwrap_or_default();
        if is_masked && method == Method::CurrentColor {
            method = Method::Value;
        }
        for attr in &mut element.attributes {
            if attr.name.prefix.is_some() || !COLOR_PROPS.contains(&attr.name.local.as_str()) {
                continue;
            }
            let converted = match method {
                Method::CurrentColor if is_fixed_color(&attr.value) => {
                    Some(String::from("currentColor"))
                }
                Method::CurrentColor => None,
                Method::Value => minify_color(&attr.value),
            };
            if let Some(converted) = converted {
                attr.value = converted;
            }
        }
        Ok(())
    }
}

/// Whether the value is a color which doesn't depend on its context.
fn is_fixed_color(value: &str) -> bool {
    let value = value.trim();
    colors::name_to_hex(value).is_some()
        || value.eq_ignore_ascii_case("transparent")
        || colors::expand_hex(value).is_some()
        || HEX_ALPHA.is_match(value)
        || COLOR_FUNCTION.is_match(value)
}

/// Returns the shortest notation of a color, if it can be shortened.
fn minify_color(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let mut result = match colors::name_to_hex(trimmed) {
        Some(hex) => hex.to_string(),
        None => trimmed.to_string(),
    };
    if let Some(hex) = rgb_to_hex(&result) {
        result = hex;
    }
    if colors::expand_hex(&result).is_some() {
        result = result.to_ascii_lowercase();
        if let Some(short) = colors::shorten_hex(&result) {
            result = short;
        }
        if let Some(name) = colors::hex_to_name(&result) {
            if name.len() < result.len() {
                result = name.to_string();
            }
        }
    }
    (result != value).then_some(result)
}

fn rgb_to_hex(value: &str) -> Option<String> {
    let captures = RGB.captures(value)?;
    let mut hex = String::from("#");
    for channel in 1..=3 {
        let channel = captures.get(channel)?.as_str();
        let number = match channel.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? * 2.55,
            None => channel.parse::<f64>().ok()?,
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let number = number.round().clamp(0.0, 255.0) as u8;
        hex.push_str(&format!("{number:02x}"));
    }
    Some(hex)
}

static RGB: LazyLock<Regex> = LazyLock::new(|| {
    let number = r"[+-]?(?:\d*\.\d+|\d+\.?)%?";
    let separator = r"(?:\s*,\s*|\s+)";
    Regex::new(&format!(
        r"(?i)^rgb\(\s*({number}){separator}({number}){separator}({number})\s*\)$"
    ))
    .expect("rgb regex is valid")
});

static HEX_ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{4}|[0-9a-fA-F]{8})$").expect("hex regex is valid")
});

static COLOR_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:rgba?|hsla?|hwb|lab|lch|oklab|oklch)\([^()]*\)$")
        .expect("color function regex is valid")
});

#[test]
fn convert_colors() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "convertColors": {} }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg">
    <g color="yellow" fill="#FFFFFF" stroke="rgb(64, 64, 64)"/>
    <g fill="rgb(100%,0%,0%)" stroke="#000080" stop-color="#aabbcc"/>
    <g fill="none" stroke="url(#a)" color="currentColor"/>
</svg>"##
            ),
        )?,
        r##"<svg xmlns="http://www.w3.org/2000/svg"><g color="#ff0" fill="#fff" stroke="#404040"/><g fill="red" stroke="navy" stop-color="#abc"/><g fill="none" stroke="url(#a)" color="currentColor"/></svg>"##
    );

    Ok(())
}

#[test]
fn convert_colors_current_color() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "convertColors": { "method": "currentColor" } }"#,
            Some(
                r##"<svg xmlns="http://www.w3.org/2000/svg">
    <path fill="#FFC107" stroke="rgba(0, 0, 0, 0.5)" d="M0 0"/>
    <path fill="none" stroke="url(#a)" d="M0 0"/>
    <mask id="m"><rect fill="white"/></mask>
</svg>"##
            ),
        )?,
        r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="currentColor" stroke="currentColor" d="M0 0"/><path fill="none" stroke="url(#a)" d="M0 0"/><mask id="m"><rect fill="#fff"/></mask></svg>"##
    );

    Ok(())
}

#[test]
fn minify() {
    assert_eq!(minify_color("Red").as_deref(), Some("red"));
    assert_eq!(minify_color("#FF0000").as_deref(), Some("red"));
    assert_eq!(minify_color("red"), None);
    assert_eq!(minify_color("#00f"), None);
    assert_eq!(minify_color("none"), None);
    assert_eq!(minify_color("rgb(0 0 255)").as_deref(), Some("#00f"));
}
