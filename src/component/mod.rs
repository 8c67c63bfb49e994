//! Components - a root descriptor paired with a root context.
//!
//! The component is the unit handed to the renderer. Construction goes
//! through [`ComponentFactory`]: identity construction from an existing
//! descriptor, or parsing a textual template via a [`TemplateAdapter`].
//!
//! Parse failures are always surfaced as [`ParseError`] - an adapter must
//! never hand back a placeholder descriptor for malformed input.

use crate::context::Context;
use crate::descriptor::NodeDescriptor;
use crate::error::ParseError;

/// A root node descriptor plus the context it renders under.
pub struct Component {
    descriptor: NodeDescriptor,
    context: Context,
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component").finish_non_exhaustive()
    }
}

impl Component {
    /// The root descriptor.
    pub fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    /// The root context.
    pub fn context(&self) -> &Context {
        &self.context
    }
}

/// Parses a textual template form into a descriptor tree.
///
/// Contract: well-formed input yields an equivalent descriptor tree;
/// malformed input fails with a [`ParseError`] naming the offending
/// location. Markup adapters live outside this crate; [`JsonTemplate`] is
/// the in-crate implementation.
pub trait TemplateAdapter {
    /// Parse one template.
    fn parse(&self, source: &str) -> Result<NodeDescriptor, ParseError>;
}

/// JSON template adapter over the descriptor's serde shape.
pub struct JsonTemplate;

impl TemplateAdapter for JsonTemplate {
    fn parse(&self, source: &str) -> Result<NodeDescriptor, ParseError> {
        serde_json::from_str(source).map_err(ParseError::from)
    }
}

/// Constructors pairing descriptors with contexts.
pub struct ComponentFactory;

impl ComponentFactory {
    /// Identity construction; always succeeds. Structural validation
    /// happens at render time.
    pub fn from_node(descriptor: NodeDescriptor, context: Context) -> Component {
        Component {
            descriptor,
            context,
        }
    }

    /// Parse a JSON template.
    pub fn from_json(source: &str, context: Context) -> Result<Component, ParseError> {
        Self::from_template(&JsonTemplate, source, context)
    }

    /// Parse a template through any adapter.
    pub fn from_template(
        adapter: &dyn TemplateAdapter,
        source: &str,
        context: Context,
    ) -> Result<Component, ParseError> {
        let descriptor = adapter.parse(source)?;
        Ok(Component {
            descriptor,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Tag;

    #[test]
    fn test_from_node_is_identity() {
        let descriptor = NodeDescriptor::text("hello!");
        let component = ComponentFactory::from_node(descriptor.clone(), Context::new());
        assert_eq!(component.descriptor(), &descriptor);
    }

    #[test]
    fn test_from_json_parses_descriptor_tree() {
        let json = r##"{
            "tag": "div",
            "children": [
                { "tag": "#text", "attributes": { "value": "hello!" } },
                { "tag": "span", "attributes": { "bind": "text" } }
            ]
        }"##;
        let component = ComponentFactory::from_json(json, Context::new()).unwrap();
        assert_eq!(component.descriptor().tag, Tag::Block);
        assert_eq!(component.descriptor().children.len(), 2);
    }

    #[test]
    fn test_malformed_json_is_an_error_not_a_placeholder() {
        let err = ComponentFactory::from_json("{ \"tag\": ", Context::new()).unwrap_err();
        assert!(err.line >= 1);
        assert!(!err.message.is_empty());
    }
}
