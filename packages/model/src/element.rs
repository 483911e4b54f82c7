//! # Document Elements
//!
//! One node of the page tree being visually edited.
//!
//! A page is an ordered `Vec<Element>` of roots. Every element owns its
//! children outright, so the tree can never contain cycles or shared nodes.
//! Which optional fields carry meaning is decided by [`ElementKind`]:
//!
//! | kind | children | content | src | menu |
//! |------|----------|---------|-----|------|
//! | section, container, columns | yes | | | |
//! | heading, text, button | | yes | | |
//! | image, video | | | yes | |
//! | navigation-menu | | | | yes |
//! | divider, spacer | | | | |

use crate::animation::Animation;
use crate::menu::MenuItem;
use crate::style::{ResponsiveOverrides, StyleMap};
use serde::{Deserialize, Serialize};

/// Element kinds known to the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Section,
    Container,
    Columns,
    Heading,
    Text,
    Image,
    Video,
    Button,
    Divider,
    Spacer,
    NavigationMenu,
}

impl ElementKind {
    pub const ALL: [ElementKind; 11] = [
        ElementKind::Section,
        ElementKind::Container,
        ElementKind::Columns,
        ElementKind::Heading,
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Video,
        ElementKind::Button,
        ElementKind::Divider,
        ElementKind::Spacer,
        ElementKind::NavigationMenu,
    ];

    /// Whether new children may be inserted into this kind
    pub fn accepts_children(self) -> bool {
        matches!(
            self,
            ElementKind::Section | ElementKind::Container | ElementKind::Columns
        )
    }

    pub fn uses_content(self) -> bool {
        matches!(
            self,
            ElementKind::Heading | ElementKind::Text | ElementKind::Button
        )
    }

    pub fn uses_src(self) -> bool {
        matches!(self, ElementKind::Image | ElementKind::Video)
    }

    pub fn uses_menu(self) -> bool {
        matches!(self, ElementKind::NavigationMenu)
    }

    /// HTML tag used when rendering this kind
    pub fn html_tag(self) -> &'static str {
        match self {
            ElementKind::Section => "section",
            ElementKind::Container | ElementKind::Columns | ElementKind::Spacer => "div",
            ElementKind::Heading => "h2",
            ElementKind::Text => "p",
            ElementKind::Image => "img",
            ElementKind::Video => "video",
            ElementKind::Button => "a",
            ElementKind::Divider => "hr",
            ElementKind::NavigationMenu => "nav",
        }
    }

    /// Human label shown in the palette and layers panel
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Section => "Section",
            ElementKind::Container => "Container",
            ElementKind::Columns => "Columns",
            ElementKind::Heading => "Heading",
            ElementKind::Text => "Text",
            ElementKind::Image => "Image",
            ElementKind::Video => "Video",
            ElementKind::Button => "Button",
            ElementKind::Divider => "Divider",
            ElementKind::Spacer => "Spacer",
            ElementKind::NavigationMenu => "Navigation Menu",
        }
    }
}

/// A node of the page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Stable identifier, assigned at creation
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ElementKind,

    /// Label for the layers panel and inspector (not identity)
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Base (desktop) style layer
    #[serde(default)]
    pub style: StyleMap,

    #[serde(default, skip_serializing_if = "ResponsiveOverrides::is_empty")]
    pub responsive_overrides: ResponsiveOverrides,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<MenuItem>,

    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            content: None,
            src: None,
            style: StyleMap::new(),
            responsive_overrides: ResponsiveOverrides::default(),
            animation: None,
            menu_items: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn accepts_children(&self) -> bool {
        self.kind.accepts_children()
    }

    /// Find a descendant (or self) by id, depth-first
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Mutable variant of [`Element::find`]
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Visit self and every descendant in document order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}
