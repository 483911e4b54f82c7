//! # Component Palette
//!
//! Templates describe what a palette entry creates. Materializing a
//! template mints a fresh id and copies the template defaults, so two
//! elements created from the same template never share state.

use crate::element::{Element, ElementKind};
use crate::id_generator::IdGenerator;
use crate::menu::MenuItem;
use crate::style::StyleMap;
use serde::{Deserialize, Serialize};

/// A palette entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementTemplate {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub name: String,
    #[serde(default)]
    pub style: StyleMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<MenuItem>,
}

impl ElementTemplate {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            name: kind.label().to_string(),
            style: StyleMap::new(),
            content: None,
            src: None,
            menu_items: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn with_menu_items(mut self, items: Vec<MenuItem>) -> Self {
        self.menu_items = items;
        self
    }

    /// Create a new element from this template
    pub fn materialize(&self, ids: &mut IdGenerator) -> Element {
        let mut element = Element::new(ids.new_id(), self.kind, self.name.clone());
        element.style = self.style.clone();
        if self.kind.uses_content() {
            element.content = self.content.clone();
        }
        if self.kind.uses_src() {
            element.src = self.src.clone();
        }
        if self.kind.uses_menu() {
            element.menu_items = self.menu_items.iter().map(|m| m.reissue(ids)).collect();
        }
        element
    }
}

/// Deep copy of `element` where the element, its descendants and its menu
/// items all receive fresh ids.
pub fn clone_with_fresh_ids(element: &Element, ids: &mut IdGenerator) -> Element {
    let mut copy = element.clone();
    copy.id = ids.new_id();
    copy.menu_items = element.menu_items.iter().map(|m| m.reissue(ids)).collect();
    copy.children = element
        .children
        .iter()
        .map(|child| clone_with_fresh_ids(child, ids))
        .collect();
    copy
}

/// The built-in palette, in display order
pub fn palette() -> Vec<ElementTemplate> {
    vec![
        ElementTemplate::new(ElementKind::Section)
            .with_style("padding", "64px 24px")
            .with_style("display", "flex")
            .with_style("flexDirection", "column")
            .with_style("gap", "24px"),
        ElementTemplate::new(ElementKind::Container)
            .with_style("padding", "16px")
            .with_style("display", "flex")
            .with_style("flexDirection", "column")
            .with_style("gap", "16px"),
        ElementTemplate::new(ElementKind::Columns)
            .with_style("display", "grid")
            .with_style("gridTemplateColumns", "repeat(2, 1fr)")
            .with_style("gap", "24px"),
        ElementTemplate::new(ElementKind::Heading)
            .with_content("New Heading")
            .with_style("fontSize", "40px")
            .with_style("fontWeight", "700"),
        ElementTemplate::new(ElementKind::Text)
            .with_content("Write something compelling here.")
            .with_style("fontSize", "16px")
            .with_style("lineHeight", "1.6"),
        ElementTemplate::new(ElementKind::Image)
            .with_src("https://placehold.co/800x450")
            .with_style("width", "100%")
            .with_style("borderRadius", "8px"),
        ElementTemplate::new(ElementKind::Video)
            .with_src("https://example.com/video.mp4")
            .with_style("width", "100%"),
        ElementTemplate::new(ElementKind::Button)
            .with_content("Get Started")
            .with_style("padding", "12px 24px")
            .with_style("backgroundColor", "#2563eb")
            .with_style("color", "#ffffff")
            .with_style("borderRadius", "6px"),
        ElementTemplate::new(ElementKind::Divider)
            .with_style("borderTop", "1px solid #e5e7eb")
            .with_style("width", "100%"),
        ElementTemplate::new(ElementKind::Spacer).with_style("height", "48px"),
        ElementTemplate::new(ElementKind::NavigationMenu)
            .with_style("display", "flex")
            .with_style("gap", "24px")
            .with_menu_items(vec![
                MenuItem::link("tpl-1", "Home", "/"),
                MenuItem::link("tpl-2", "Services", "/services"),
                MenuItem::link("tpl-3", "Contact", "/contact"),
            ]),
    ]
}

/// Look up a palette template by display name or kind label (case-insensitive)
pub fn find_template(name: &str) -> Option<ElementTemplate> {
    palette()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}
