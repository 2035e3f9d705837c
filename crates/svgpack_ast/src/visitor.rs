//! A visitor for transforming documents in place.
use crate::node::{Document, Element};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// The outcome of [`Visitor::prepare`]
    pub struct PrepareOutcome: usize {
        /// Visit the document as usual
        const NONE = 0b0;
        /// Skip visiting the document
        const SKIP = 0b1;
    }
}

impl PrepareOutcome {
    /// Whether visiting should be skipped
    pub fn can_skip(self) -> bool {
        self.contains(Self::SKIP)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    /// Information about the document gathered before visiting
    pub struct ContextFlags: usize {
        /// Whether the document has a script element or on-* attrs
        const HAS_SCRIPT_REF = 0b0001;
        /// Whether the document has a non-empty stylesheet
        const HAS_STYLESHEET = 0b0010;
    }
}

#[derive(Debug, Default)]
/// The state available while visiting an element.
pub struct Context {
    /// The local names of the ancestors of the visited element, from the root down
    pub ancestors: Vec<String>,
    /// Information gathered about the document
    pub flags: ContextFlags,
}

impl Context {
    /// Creates the context for a document.
    pub fn new(document: &Document) -> Self {
        let mut flags = ContextFlags::empty();
        if let Some(root) = document.root() {
            root.for_each_element(&mut |element| {
                if element.is("script")
                    || element
                        .attributes
                        .iter()
                        .any(|attr| attr.name.prefix.is_none() && attr.name.local.starts_with("on"))
                {
                    flags.insert(ContextFlags::HAS_SCRIPT_REF);
                }
                if element.is("style") && !element.text_content().trim().is_empty() {
                    flags.insert(ContextFlags::HAS_STYLESHEET);
                }
            });
        }
        Self {
            ancestors: Vec::new(),
            flags,
        }
    }

    /// Whether the visited element has an ancestor with the given local name.
    pub fn within(&self, local: &str) -> bool {
        self.ancestors.iter().any(|ancestor| ancestor == local)
    }
}

/// A trait for visiting or transforming the DOM
#[allow(unused_variables)]
pub trait Visitor {
    /// The error produced when a visit fails
    type Error;

    /// Visits the document, before any element.
    ///
    /// # Errors
    /// Whether the visitor fails
    fn document(&mut self, document: &mut Document, context: &Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Exits the document, after every element.
    ///
    /// # Errors
    /// Whether the visitor fails
    fn exit_document(
        &mut self,
        document: &mut Document,
        context: &Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visits an element, before its children.
    ///
    /// # Errors
    /// Whether the visitor fails
    fn element(&mut self, element: &mut Element, context: &Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Exits an element, after its children.
    ///
    /// # Errors
    /// Whether the visitor fails
    fn exit_element(
        &mut self,
        element: &mut Element,
        context: &Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Decides whether the document should be visited at all.
    fn prepare(&mut self, document: &Document, context_flags: &ContextFlags) -> PrepareOutcome {
        PrepareOutcome::NONE
    }

    /// Creates context for the document and visits it
    ///
    /// # Errors
    /// If any of the visitor's methods fail
    fn start(&mut self, document: &mut Document) -> Result<PrepareOutcome, Self::Error> {
        let mut context = Context::new(document);
        let prepare_outcome = self.prepare(document, &context.flags);
        if prepare_outcome.can_skip() {
            return Ok(prepare_outcome);
        }

        self.document(document, &context)?;
        for child in &mut document.children {
            if let crate::node::Node::Element(element) = child {
                self.visit(element, &mut context)?;
            }
        }
        self.exit_document(document, &context)?;
        Ok(prepare_outcome)
    }

    /// Visits an element and its children
    ///
    /// # Errors
    /// If any of the visitor's methods fail
    fn visit(&mut self, element: &mut Element, context: &mut Context) -> Result<(), Self::Error> {
        log::trace!("visiting <{}>", element.name);
        self.element(element, context)?;
        context.ancestors.push(element.local_name().to_string());
        let result = element
            .child_elements_mut()
            .try_for_each(|child| self.visit(child, context));
        context.ancestors.pop();
        result?;
        self.exit_element(element, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Visitor for Trace {
        type Error = ();

        fn element(&mut self, element: &mut Element, context: &Context) -> Result<(), ()> {
            self.0.push(format!(
                "{}>{}",
                context.ancestors.join("/"),
                element.local_name()
            ));
            Ok(())
        }

        fn exit_element(&mut self, element: &mut Element, _context: &Context) -> Result<(), ()> {
            self.0.push(format!("/{}", element.local_name()));
            Ok(())
        }
    }

    #[test]
    fn visit_order() {
        let mut dom = parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g><path/></g><rect/></svg>"#,
        )
        .unwrap();
        let mut trace = Trace::default();
        trace.start(&mut dom).unwrap();
        assert_eq!(
            trace.0,
            vec![">svg", "svg>g", "svg/g>path", "/path", "/g", "svg>rect", "/rect", "/svg"]
        );
    }

    #[test]
    fn context_flags() {
        let dom = parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><style>.a{fill:red}</style><g onclick="x()"/></svg>"#,
        )
        .unwrap();
        let context = Context::new(&dom);
        assert!(context.flags.contains(ContextFlags::HAS_STYLESHEET));
        assert!(context.flags.contains(ContextFlags::HAS_SCRIPT_REF));

        let dom = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><style/></svg>"#).unwrap();
        assert!(Context::new(&dom).flags.is_empty());
    }
}
