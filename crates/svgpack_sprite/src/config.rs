//! Configuration for a [`crate::SVGSpriter`].
use std::path::PathBuf;

use svgpack_optimiser::Jobs;

/// Generates a shape's id from the name it was added with.
pub type IdGenerator = fn(&str) -> String;

#[derive(Debug, Clone, Default)]
/// The configuration of a spriter.
pub struct Config {
    /// The directory every resource is placed within
    pub dest: PathBuf,
    /// The output modes to compile
    pub mode: Modes,
    /// How each shape is processed
    pub shape: ShapeConfig,
}

#[derive(Debug, Clone, Default)]
/// The output modes of a spriter.
pub struct Modes {
    /// Compiles shapes to a sprite of `<symbol>` elements
    pub symbol: Option<SymbolMode>,
}

#[derive(Debug, Clone)]
/// Options for the symbol output mode.
pub struct SymbolMode {
    /// The directory of the mode's resources, relative to [`Config::dest`]
    pub dest: PathBuf,
    /// The file name of the sprite
    pub sprite: String,
    /// Whether the sprite is meant to be inlined into markup
    pub inline: bool,
    /// Whether to emit an HTML document demonstrating each symbol
    pub example: bool,
}

impl Default for SymbolMode {
    fn default() -> Self {
        Self {
            dest: PathBuf::from("symbol"),
            sprite: String::from("sprite.symbol.svg"),
            inline: false,
            example: false,
        }
    }
}

impl SymbolMode {
    /// The key of the mode in a [`crate::CompileResult`]
    pub const KEY: &'static str = "symbol";
}

#[derive(Debug, Clone)]
/// Options for processing each shape.
pub struct ShapeConfig {
    /// Generates a shape's id from its name
    pub id: IdGenerator,
    /// The jobs run against each shape before it's added to the sprite
    pub transform: Jobs,
    /// Whether to prefix the ids within a shape with the shape's id
    pub namespace_ids: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            id: file_stem,
            transform: Jobs::baseline(),
            namespace_ids: true,
        }
    }
}

/// The name without anything after its first `.`
fn file_stem(name: &str) -> String {
    name.split('.').next().unwrap_or(name).to_string()
}

#[test]
fn defaults() {
    let shape = ShapeConfig::default();
    assert_eq!((shape.id)("home.icon.svg"), "home");
    assert!(shape.namespace_ids);
    assert_eq!(SymbolMode::default().dest, PathBuf::from("symbol"));
}
