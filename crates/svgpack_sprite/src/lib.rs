/*!
The svgpack sprite compiles a set of SVG shapes into a single sprite of `<symbol>` elements.

Each shape is transformed with optimisation [`Jobs`](svgpack_optimiser::Jobs), then wrapped in
a `<symbol>` whose id is generated from the shape's name.

# Example

```
use std::path::Path;
use svgpack_sprite::{Config, Modes, SVGSpriter, SymbolMode};

let mut spriter = SVGSpriter::new(Config {
    dest: "out".into(),
    mode: Modes {
        symbol: Some(SymbolMode {
            sprite: String::from("icon.symbol.svg"),
            inline: true,
            ..SymbolMode::default()
        }),
    },
    ..Config::default()
});
spriter.add(
    Path::new("home.svg"),
    "home.svg",
    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"><path d="M0 0h1v1z"/></svg>"#,
);
let result = spriter.compile().unwrap();
let sprite = &result["symbol"]["sprite"];
assert_eq!(sprite.path, Path::new("out/symbol/icon.symbol.svg"));
assert_eq!(
    sprite.contents,
    r#"<svg xmlns="http://www.w3.org/2000/svg" style="position:absolute;width:0;height:0" aria-hidden="true"><symbol id="home" viewBox="0 0 1 1"><path d="M0 0h1v1z"/></symbol></svg>"#,
);
```
*/

pub mod config;
pub mod error;
mod example;
mod shape;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use svgpack_ast::{
    error::XmlWriterError,
    name::{QualName, SVG},
    node::{Attribute, Element, Node},
    serialize::{write_node, Options},
    xmlwriter::XmlWriter,
};

pub use crate::config::{Config, IdGenerator, Modes, ShapeConfig, SymbolMode};
pub use crate::error::SpriteError;
pub use crate::shape::Shape;

/// The key of the sprite within a mode's resources.
pub const SPRITE_RESOURCE: &str = "sprite";
/// The key of the example document within a mode's resources.
pub const EXAMPLE_RESOURCE: &str = "example";

const INLINE_STYLE: &str = "position:absolute;width:0;height:0";
const DECLARATION: &str = r#"version="1.0" encoding="utf-8""#;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file produced by compiling a sprite.
pub struct Resource {
    /// Where the resource should be written
    pub path: PathBuf,
    /// The contents of the resource
    pub contents: String,
}

/// The resources of each compiled mode, keyed by mode and then resource name.
pub type CompileResult = BTreeMap<String, BTreeMap<String, Resource>>;

#[derive(Debug)]
/// Collects shapes and compiles them into a sprite.
pub struct SVGSpriter {
    config: Config,
    shapes: Vec<Shape>,
}

impl SVGSpriter {
    /// Creates a spriter without any shapes.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            shapes: Vec::new(),
        }
    }

    /// Registers a shape. The shape isn't parsed until [`SVGSpriter::compile`] is called.
    pub fn add(&mut self, path: &Path, name: &str, contents: &str) -> &mut Self {
        let id = (self.config.shape.id)(name);
        log::debug!("adding shape {name} as #{id}");
        self.shapes
            .push(Shape::new(id, path, name, contents.to_string()));
        self
    }

    /// The shapes registered so far, in order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Compiles the registered shapes into each configured mode.
    ///
    /// When no shapes are registered the result is empty.
    ///
    /// # Errors
    ///
    /// If a shape fails to parse or transform, has no determinable `viewBox`, or shares
    /// its id with another shape.
    pub fn compile(&self) -> Result<CompileResult, SpriteError> {
        let mut result = CompileResult::new();
        if self.shapes.is_empty() {
            log::debug!("no shapes to compile");
            return Ok(result);
        }
        if let Some(id) = self
            .shapes
            .iter()
            .map(|shape| shape.id.as_str())
            .duplicates()
            .next()
        {
            return Err(SpriteError::DuplicateShape(id.to_string()));
        }

        if let Some(symbol) = &self.config.mode.symbol {
            result.insert(
                SymbolMode::KEY.to_string(),
                self.compile_symbol(symbol)?,
            );
        }
        Ok(result)
    }

    fn compile_symbol(
        &self,
        mode: &SymbolMode,
    ) -> Result<BTreeMap<String, Resource>, SpriteError> {
        let mut root = Element::new(QualName::local("svg"));
        root.attributes.push(Attribute::new("xmlns", SVG));
        let mut namespaces: Vec<Attribute> = Vec::new();
        for shape in &self.shapes {
            let symbol = shape.compile(
                &self.config.shape.transform,
                self.config.shape.namespace_ids,
            )?;
            for namespace in symbol.namespaces {
                match namespaces.iter().find(|ns| ns.name == namespace.name) {
                    Some(bound) if bound.value != namespace.value => {
                        return Err(SpriteError::NamespaceConflict {
                            name: shape.name.clone(),
                            prefix: namespace.name.local,
                        });
                    }
                    Some(_) => {}
                    None => namespaces.push(namespace),
                }
            }
            root.children.push(Node::Element(symbol.element));
        }
        root.attributes.extend(namespaces);
        if mode.inline {
            root.set_attribute("style", INLINE_STYLE);
            root.set_attribute("aria-hidden", "true");
        }

        let mut writer = XmlWriter::new(Vec::new(), Options::default());
        if !mode.inline {
            writer.write_declaration(DECLARATION)?;
        }
        write_node(&mut writer, &Node::Element(root))?;
        let bytes = writer.end_document()?;
        let sprite = String::from_utf8(bytes).map_err(XmlWriterError::UTF8)?;

        let dest = self.config.dest.join(&mode.dest);
        let mut resources = BTreeMap::new();
        if mode.example {
            let ids = self.shapes.iter().map(|shape| shape.id.as_str()).collect_vec();
            let stem = Path::new(&mode.sprite)
                .file_stem()
                .map_or_else(|| mode.sprite.clone(), |stem| stem.to_string_lossy().to_string());
            resources.insert(
                EXAMPLE_RESOURCE.to_string(),
                Resource {
                    path: dest.join(format!("{stem}.html")),
                    contents: example::render(&mode.sprite, &sprite, &ids),
                },
            );
        }
        resources.insert(
            SPRITE_RESOURCE.to_string(),
            Resource {
                path: dest.join(&mode.sprite),
                contents: sprite,
            },
        );
        Ok(resources)
    }
}

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use svgpack_optimiser::{ConvertColors, ConvertColorsMethod, Extends, Jobs, RemoveAttrs};

    use super::*;

    fn rename(name: &str) -> String {
        name.replacen(".svg", "", 1)
    }

    fn config(inline: bool, example: bool) -> Config {
        Config {
            dest: PathBuf::from("templates/_svg"),
            mode: Modes {
                symbol: Some(SymbolMode {
                    sprite: String::from("icon.symbol.svg"),
                    inline,
                    example,
                    ..SymbolMode::default()
                }),
            },
            shape: ShapeConfig {
                id: rename,
                ..ShapeConfig::default()
            },
        }
    }

    #[test]
    fn empty() -> anyhow::Result<()> {
        let spriter = SVGSpriter::new(config(true, true));
        assert!(spriter.compile()?.is_empty());
        Ok(())
    }

    #[test]
    fn declaration() -> anyhow::Result<()> {
        let mut spriter = SVGSpriter::new(config(false, false));
        spriter.add(
            Path::new("src/a.svg"),
            "a.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 2 2"/>"#,
        );
        let result = spriter.compile()?;
        insta::assert_snapshot!(
            result["symbol"]["sprite"].contents,
            @r#"<?xml version="1.0" encoding="utf-8"?><svg xmlns="http://www.w3.org/2000/svg"><symbol id="a" viewBox="0 0 2 2"/></svg>"#
        );
        Ok(())
    }

    #[test]
    fn icons() -> anyhow::Result<()> {
        let extra = Jobs {
            convert_colors: Some(ConvertColors {
                method: Some(ConvertColorsMethod::CurrentColor),
            }),
            remove_attrs: Some(RemoveAttrs::new(vec![String::from("(opacity|style)")])),
            ..Jobs::none()
        };
        let mut config = config(true, true);
        config.shape.transform = Extends::Baseline.extend(&extra);

        let mut spriter = SVGSpriter::new(config);
        spriter
            .add(
                Path::new("src/svg/icon/star.svg"),
                "star.svg",
                r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path fill="#ff0000" opacity="0.5" d="M12 2l3 7h7z"/></svg>"##,
            )
            .add(
                Path::new("src/svg/icon/home.icon.svg"),
                "home.icon.svg",
                r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="16" height="16"><defs><path id="roof" d="M0 8l8-8 8 8"/></defs><use xlink:href="#roof" stroke="#000"/></svg>"##,
            );
        let result = spriter.compile()?;
        let resources = &result["symbol"];
        assert_eq!(
            resources.keys().collect_vec(),
            vec!["example", "sprite"]
        );

        let sprite = &resources["sprite"];
        assert_eq!(
            sprite.path,
            PathBuf::from("templates/_svg/symbol/icon.symbol.svg")
        );
        assert_eq!(
            sprite.contents,
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" style="position:absolute;width:0;height:0" aria-hidden="true"><symbol id="star" viewBox="0 0 24 24"><path fill="currentColor" d="M12 2l3 7h7z"/></symbol><symbol id="home.icon" viewBox="0 0 16 16"><defs><path id="home.icon-roof" d="M0 8l8-8 8 8"/></defs><use xlink:href="#home.icon-roof" stroke="currentColor"/></symbol></svg>"##
        );

        let example = &resources["example"];
        assert_eq!(
            example.path,
            PathBuf::from("templates/_svg/symbol/icon.symbol.html")
        );
        assert!(example.contents.contains(&sprite.contents));
        assert!(example.contents.contains(r##"<use href="#home.icon"/>"##));
        Ok(())
    }

    #[test]
    fn namespace_conflict() -> anyhow::Result<()> {
        let mut spriter = SVGSpriter::new(config(true, false));
        spriter
            .add(
                Path::new("a.svg"),
                "a.svg",
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:a="urn:a" viewBox="0 0 1 1"><path a:x="1" d="M0 0"/></svg>"#,
            )
            .add(
                Path::new("b.svg"),
                "b.svg",
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:a="urn:a" viewBox="0 0 1 1"><path a:y="1" d="M0 0"/></svg>"#,
            );
        assert_eq!(
            spriter.compile()?["symbol"]["sprite"].contents,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:a="urn:a" style="position:absolute;width:0;height:0" aria-hidden="true"><symbol id="a" viewBox="0 0 1 1"><path a:x="1" d="M0 0"/></symbol><symbol id="b" viewBox="0 0 1 1"><path a:y="1" d="M0 0"/></symbol></svg>"#
        );

        spriter.add(
            Path::new("c.svg"),
            "c.svg",
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:a="urn:b" viewBox="0 0 1 1"><path a:z="1" d="M0 0"/></svg>"#,
        );
        assert!(matches!(
            spriter.compile(),
            Err(SpriteError::NamespaceConflict { name, prefix }) if name == "c.svg" && prefix == "a"
        ));
        Ok(())
    }

    #[test]
    fn duplicate_shape() {
        let mut spriter = SVGSpriter::new(config(true, false));
        let source = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"/>"#;
        spriter
            .add(Path::new("a/home.svg"), "home.svg", source)
            .add(Path::new("b/home.svg"), "home.svg", source);
        assert_eq!(
            spriter
                .shapes()
                .iter()
                .map(|shape| shape.path.as_path())
                .collect_vec(),
            vec![Path::new("a/home.svg"), Path::new("b/home.svg")]
        );
        assert!(matches!(
            spriter.compile(),
            Err(SpriteError::DuplicateShape(id)) if id == "home"
        ));
    }
}
