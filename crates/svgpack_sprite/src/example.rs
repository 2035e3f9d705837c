//! An HTML document demonstrating each symbol of a sprite.
/// Renders a page which inlines `sprite` and uses each of the symbols in `ids`.
pub fn render(title: &str, sprite: &str, ids: &[&str]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str(
        "<style>\
         .shapes{display:flex;flex-wrap:wrap;gap:1rem;list-style:none;padding:0}\
         .shapes svg{width:3rem;height:3rem}\
         </style>\n</head>\n<body>\n",
    );
    html.push_str(sprite);
    html.push_str("\n<ul class=\"shapes\">\n");
    for id in ids {
        let id = escape(id);
        html.push_str(&format!(
            "<li><svg><use href=\"#{id}\"/></svg><code>{id}</code></li>\n"
        ));
    }
    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[test]
fn example() {
    let html = render("icon.symbol.svg", "<svg/>", &["home", "a&b"]);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>icon.symbol.svg</title>"));
    assert!(html.contains("<svg/>\n<ul"));
    assert!(html.contains(r##"<li><svg><use href="#home"/></svg><code>home</code></li>"##));
    assert!(html.contains(r##"<use href="#a&amp;b"/>"##));
}
