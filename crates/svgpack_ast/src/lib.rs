/*!
An owned document tree for the SVG documents handled by svgpack.

Documents are parsed with [`roxmltree`] into a [`node::Document`], transformed in place, and
written back out with [`serialize`].

# Example

```
use svgpack_ast::{parse::parse, serialize::{Node as _, Options}};

let dom = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1"/></svg>"#).unwrap();
assert_eq!(
    dom.serialize_with_options(Options::default()).unwrap(),
    r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="1"/></svg>"#,
);
```
*/

#[cfg(feature = "visitor")]
#[macro_use]
extern crate bitflags;

pub mod error;
pub mod name;
pub mod node;
pub mod parse;
pub mod serialize;
#[cfg(feature = "visitor")]
pub mod visitor;
pub mod xmlwriter;
