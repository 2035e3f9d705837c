use std::collections::HashSet;

use phf::phf_set;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use svgpack_ast::{
    node::{Document, Element, Node},
    visitor::{Context, Visitor},
};

use crate::error::JobsError;

#[skip_serializing_none]
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
/// Removes all xml namespaces associated with editing software.
///
/// Namespace declarations on the root element whose uri belongs to an editor are removed,
/// along with every element and attribute using one of those prefixes.
///
/// # Correctness
///
/// This job should never visually change the document.
///
/// Editor namespaces may be used by the editor and contain data that might be
/// lost if you try to edit the file after optimising.
///
/// # Errors
///
/// Never.
pub struct RemoveEditorsNSData {
    /// A list of additional namespaces URIs you may want to remove.
    pub additional_namespaces: Option<HashSet<String>>,
    #[serde(skip)]
    prefixes: HashSet<String>,
}

impl Visitor for RemoveEditorsNSData {
    type Error = JobsError;

    fn document(&mut self, document: &mut Document, _context: &Context) -> Result<(), JobsError> {
        let Some(root) = document.root_mut() else {
            return Ok(());
        };
        let additional = self.additional_namespaces.as_ref();
        root.attributes.retain(|attr| {
            let is_editor_ns = attr.name.prefix.as_deref() == Some("xmlns")
                && (EDITOR_NAMESPACES.contains(attr.value.as_str())
                    || additional.is_some_and(|uris| uris.contains(&attr.value)));
            if is_editor_ns {
                log::debug!("removing editor namespace {}", attr.name.local);
                self.prefixes.insert(attr.name.local.clone());
            }
            !is_editor_ns
        });
        Ok(())
    }

    fn element(&mut self, element: &mut Element, _context: &Context) -> Result<(), JobsError> {
        if self.prefixes.is_empty() {
            return Ok(());
        }
        element.attributes.retain(|attr| {
            attr.name
                .prefix
                .as_ref()
                .is_none_or(|prefix| !self.prefixes.contains(prefix))
        });
        element.children.retain(|child| match child {
            Node::Element(child) => child
                .name
                .prefix
                .as_ref()
                .is_none_or(|prefix| !self.prefixes.contains(prefix)),
            _ => true,
        });
        Ok(())
    }
}

static EDITOR_NAMESPACES: phf::Set<&'static str> = phf_set! {
    "http://creativecommons.org/ns#",
    "http://inkscape.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://krita.org/namespaces/svg/krita",
    "http://ns.adobe.com/AdobeIllustrator/10.0/",
    "http://ns.adobe.com/AdobeSVGViewerExtensions/3.0/",
    "http://ns.adobe.com/Extensibility/1.0/",
    "http://ns.adobe.com/Flows/1.0/",
    "http://ns.adobe.com/GenericCustomNamespace/1.0/",
    "http://ns.adobe.com/Graphs/1.0/",
    "http://ns.adobe.com/ImageReplacement/1.0/",
    "http://ns.adobe.com/SaveForWeb/1.0/",
    "http://ns.adobe.com/Variables/1.0/",
    "http://ns.adobe.com/XPath/1.0/",
    "http://purl.org/dc/elements/1.1/",
    "http://schemas.microsoft.com/visio/2003/SVGExtensions/",
    "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd",
    "http://taptrix.com/vectorillustrator/svg_extensions",
    "http://www.bohemiancoding.com/sketch/ns",
    "http://www.figma.com/figma/ns",
    "http://www.inkscape.org/namespaces/inkscape",
    "http://www.serif.com/",
    "http://www.vector.evaxdesign.sk",
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    "https://boxy-svg.com",
};

#[test]
fn remove_editors_ns_data() -> anyhow::Result<()> {
    use crate::test_config;

    assert_eq!(
        test_config(
            r#"{ "removeEditorsNSData": {} }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" inkscape:version="1.0">
    <sodipodi:namedview id="base"/>
    <path d="M0 0" sodipodi:nodetypes="cc"/>
</svg>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0"/></svg>"#
    );

    assert_eq!(
        test_config(
            r#"{ "removeEditorsNSData": { "additionalNamespaces": ["http://example.com/editor"] } }"#,
            Some(
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:ed="http://example.com/editor" ed:layer="1"/>"#
            ),
        )?,
        r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#
    );

    Ok(())
}
