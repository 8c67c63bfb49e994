//! Node descriptors - the declarative, serializable view description.
//!
//! A [`NodeDescriptor`] describes one UI node and its directives; trees of
//! them are what the renderer walks. The tag set is closed ([`Tag`]), with
//! an escape hatch for unknown names so malformed descriptors remain
//! representable (they render to nothing, reported non-fatally).
//!
//! Directives are typed ([`Directive`]), not stringly attribute lookups:
//! resolution against a context either yields the right kind of binding or
//! fails with a diagnostic naming the directive and key.
//!
//! The serde shape matches the JSON template form:
//!
//! ```json
//! {
//!   "tag": "div",
//!   "attributes": { "bind": "counter" },
//!   "children": []
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RenderError;

// =============================================================================
// Tag
// =============================================================================

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Generic block container (`div`).
    Block,
    /// Inline container (`span`).
    Inline,
    /// Text leaf (`#text`), carrying its literal content in the `value`
    /// attribute.
    Text,
    /// Actionable control (`button`).
    Action,
    /// A tag outside the closed set. Representable so rendering can report
    /// it and skip the node instead of failing to construct the tree.
    Other(String),
}

impl Tag {
    /// The textual tag name as it appears in templates.
    pub fn as_str(&self) -> &str {
        match self {
            Tag::Block => "div",
            Tag::Inline => "span",
            Tag::Text => "#text",
            Tag::Action => "button",
            Tag::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        match name {
            "div" => Tag::Block,
            "span" => Tag::Inline,
            "#text" => Tag::Text,
            "button" => Tag::Action,
            other => Tag::Other(other.to_string()),
        }
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Tag::from(name.as_str()))
    }
}

// =============================================================================
// Attributes & directives
// =============================================================================

/// Recognized attributes. Unknown names are a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attributes {
    /// Name of a value stream rendered as the node's text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Name of an array stream; the node becomes a per-item template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
    /// Name of an event sink invoked on user activation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click: Option<String>,
    /// Literal text content; text leaves only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A directive as a typed value: kind plus binding name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Render a value stream as text content.
    Bind(String),
    /// Instantiate the node as a template, once per array element.
    Repeat(String),
    /// Forward activation events to an event sink.
    Click(String),
}

// =============================================================================
// NodeDescriptor
// =============================================================================

/// Declarative, data-only description of one UI node and its directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Node kind.
    pub tag: Tag,
    /// Directive and literal attributes.
    #[serde(default)]
    pub attributes: Attributes,
    /// Ordered children; meaningful only on containers and actionable
    /// controls. Under `repeat` they define the per-item template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescriptor>,
}

impl NodeDescriptor {
    /// A bare node of the given tag.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: Attributes::default(),
            children: Vec::new(),
        }
    }

    /// A text leaf with literal content.
    pub fn text(content: &str) -> Self {
        Self::new(Tag::Text).with_value(content)
    }

    /// Set the `bind` directive.
    pub fn with_bind(mut self, key: &str) -> Self {
        self.attributes.bind = Some(key.to_string());
        self
    }

    /// Set the `repeat` directive.
    pub fn with_repeat(mut self, key: &str) -> Self {
        self.attributes.repeat = Some(key.to_string());
        self
    }

    /// Set the `click` directive.
    pub fn with_click(mut self, key: &str) -> Self {
        self.attributes.click = Some(key.to_string());
        self
    }

    /// Set the literal `value` attribute.
    pub fn with_value(mut self, value: &str) -> Self {
        self.attributes.value = Some(value.to_string());
        self
    }

    /// Append a child descriptor.
    pub fn with_child(mut self, child: NodeDescriptor) -> Self {
        self.children.push(child);
        self
    }

    /// The node's creation directive under the priority rule
    /// `repeat` > `bind`. `click` is orthogonal and queried separately.
    pub fn creation_directive(&self) -> Option<Directive> {
        if let Some(key) = &self.attributes.repeat {
            Some(Directive::Repeat(key.clone()))
        } else {
            self.attributes
                .bind
                .as_ref()
                .map(|key| Directive::Bind(key.clone()))
        }
    }

    /// The per-item template: this node with the `repeat` directive
    /// stripped.
    pub fn without_repeat(&self) -> NodeDescriptor {
        let mut template = self.clone();
        template.attributes.repeat = None;
        template
    }

    /// Check structural invariants for the whole tree.
    ///
    /// Run by the renderer before any host mutation, so invalid trees fail
    /// fast without partial UI:
    /// - `bind` and `repeat` never coexist on one node
    /// - text leaves carry no children and no `bind`/`repeat`
    /// - `value` appears only on text leaves
    /// - a `repeat` node is the only child of its parent container (patch
    ///   application owns the container's child list)
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.attributes.bind.is_some() && self.attributes.repeat.is_some() {
            return Err(RenderError::InvalidDescriptor {
                reason: format!(
                    "<{}> carries both `bind` and `repeat`; a node takes at most one",
                    self.tag
                ),
            });
        }

        if self.tag == Tag::Text {
            if !self.children.is_empty() {
                return Err(RenderError::InvalidDescriptor {
                    reason: "a #text leaf cannot have children".to_string(),
                });
            }
            if self.attributes.bind.is_some() || self.attributes.repeat.is_some() {
                return Err(RenderError::InvalidDescriptor {
                    reason: "a #text leaf cannot carry `bind` or `repeat`".to_string(),
                });
            }
        } else if self.attributes.value.is_some() {
            return Err(RenderError::InvalidDescriptor {
                reason: format!("`value` is only valid on #text leaves, found on <{}>", self.tag),
            });
        }

        if self.children.len() > 1
            && self
                .children
                .iter()
                .any(|child| child.attributes.repeat.is_some())
        {
            return Err(RenderError::InvalidDescriptor {
                reason: format!(
                    "a `repeat` node must be the only child of its container (<{}> has {})",
                    self.tag,
                    self.children.len()
                ),
            });
        }

        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }
}
