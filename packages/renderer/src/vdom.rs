use pagecraft_model::StyleMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        /// CSS property names (`font-size`, not `fontSize`)
        styles: StyleMap,
        children: Vec<VNode>,
        /// Page element this node renders, for hit-testing in the editor
        #[serde(skip_serializing_if = "Option::is_none")]
        element_id: Option<String>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: StyleMap::new(),
            children: Vec::new(),
            element_id: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_styles(mut self, new_styles: StyleMap) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.extend(new_styles);
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        if let VNode::Element {
            element_id: ref mut node_id,
            ..
        } = self
        {
            *node_id = Some(id.into());
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children.as_slice(),
            _ => &[],
        }
    }

    /// Node rendering page element `id`
    pub fn find_element(&self, id: &str) -> Option<&VNode> {
        match self {
            VNode::Element {
                element_id: Some(node_id),
                ..
            } if node_id == id => Some(self),
            VNode::Element { children, .. } => children.iter().find_map(|c| c.find_element(id)),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Comment { .. } => String::new(),
            VNode::Element { children, .. } => children.iter().map(VNode::text_content).collect(),
        }
    }
}

/// `@keyframes` block used by entrance animations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframesRule {
    pub name: String,
    /// Declarations of the `from` frame; the `to` frame is the element's resting style
    pub from: String,
}

/// CSS Rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CssRule {
    pub selector: String,
    pub properties: StyleMap,
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub nodes: Vec<VNode>,
    /// Width of the canvas frame for the active breakpoint
    pub frame_width: u32,
    pub keyframes: Vec<KeyframesRule>,
    pub rules: Vec<CssRule>,
}

impl RenderedPage {
    pub fn find_element(&self, id: &str) -> Option<&VNode> {
        self.nodes.iter().find_map(|n| n.find_element(id))
    }

    pub fn add_keyframes(&mut self, name: &str, from: &str) {
        if self.keyframes.iter().any(|k| k.name == name) {
            return;
        }
        self.keyframes.push(KeyframesRule {
            name: name.to_string(),
            from: from.to_string(),
        });
    }

    pub fn add_rule(&mut self, selector: impl Into<String>, properties: StyleMap) {
        self.rules.push(CssRule {
            selector: selector.into(),
            properties,
        });
    }
}
