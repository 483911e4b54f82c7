//! # Element Rendering
//!
//! Turns the page tree into virtual nodes for one breakpoint and mode.
//!
//! ```text
//! Element ──► resolve_style(bp) ──► kind dispatch ──► VNode
//!                                       │
//!                    ┌──────────────────┼───────────────────┐
//!                    ▼                  ▼                   ▼
//!              containers          leaf content       navigation menu
//!           (children / drop      (text, media)     (menu items, not
//!              placeholder)                             children)
//! ```
//!
//! Edit mode is static: selection is drawn as an outline and empty
//! containers show a drop target. Preview mode plays animations and shows
//! nothing the published page would not.
//!
//! Rendering never touches the tree. Selection comes in through
//! [`RenderOptions`] and stays outside the document.

use crate::vdom::{RenderedPage, VNode};
use pagecraft_model::{
    resolve_style, to_css_property, Animation, AnimationTrigger, Breakpoint, Element, ElementKind, MenuItem,
    MenuItemKind, StyleMap,
};
use tracing::{debug, instrument};

pub const ELEMENT_ID_ATTR: &str = "data-element-id";
pub const SELECTED_ATTR: &str = "data-selected";
pub const DROP_TARGET_ATTR: &str = "data-drop-target";

const SELECTION_OUTLINE: &str = "2px solid #2563eb";
const DROP_TARGET_LABEL: &str = "Drop elements here";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Edit,
    Preview,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub breakpoint: Breakpoint,
    /// Selected element, highlighted in edit mode
    pub selected: Option<String>,
}

impl RenderOptions {
    pub fn edit(breakpoint: Breakpoint) -> Self {
        Self {
            mode: RenderMode::Edit,
            breakpoint,
            selected: None,
        }
    }

    pub fn preview(breakpoint: Breakpoint) -> Self {
        Self {
            mode: RenderMode::Preview,
            breakpoint,
            selected: None,
        }
    }

    pub fn with_selected(mut self, id: impl Into<String>) -> Self {
        self.selected = Some(id.into());
        self
    }
}

/// Render `tree` for the given mode and breakpoint
#[instrument(skip_all, fields(roots = tree.len(), mode = ?options.mode, breakpoint = ?options.breakpoint))]
pub fn render(tree: &[Element], options: &RenderOptions) -> RenderedPage {
    let mut page = RenderedPage {
        frame_width: options.breakpoint.frame_width(),
        ..RenderedPage::default()
    };

    let nodes = tree
        .iter()
        .map(|element| render_element(element, options, &mut page))
        .collect();
    page.nodes = nodes;

    debug!(
        keyframes = page.keyframes.len(),
        rules = page.rules.len(),
        "Rendered page"
    );
    page
}

fn render_element(element: &Element, options: &RenderOptions, page: &mut RenderedPage) -> VNode {
    let mut node = VNode::element(element.kind.html_tag())
        .with_element_id(&element.id)
        .with_attr(ELEMENT_ID_ATTR, &element.id)
        .with_styles(css_styles(&resolve_style(element, options.breakpoint)));

    node = match element.kind {
        ElementKind::Section | ElementKind::Container | ElementKind::Columns => {
            render_container(node, element, options, page)
        }
        ElementKind::Heading | ElementKind::Text => node.with_child(VNode::text(content_of(element))),
        ElementKind::Button => node
            .with_attr("role", "button")
            .with_child(VNode::text(content_of(element))),
        ElementKind::Image => node
            .with_attr("src", element.src.as_deref().unwrap_or_default())
            .with_attr("alt", &element.name),
        ElementKind::Video => node
            .with_attr("src", element.src.as_deref().unwrap_or_default())
            .with_attr("controls", "controls"),
        ElementKind::Divider => node,
        ElementKind::Spacer => node.with_attr("aria-hidden", "true"),
        ElementKind::NavigationMenu => node
            .with_attr("aria-label", &element.name)
            .with_child(render_menu(&element.menu_items)),
    };

    match options.mode {
        RenderMode::Edit => {
            if options.selected.as_deref() == Some(element.id.as_str()) {
                node = node
                    .with_attr(SELECTED_ATTR, "true")
                    .with_style("outline", SELECTION_OUTLINE)
                    .with_style("outline-offset", "2px");
            }
        }
        RenderMode::Preview => {
            if let Some(animation) = element.animation.as_ref().filter(|a| a.is_active()) {
                node = apply_animation(node, &element.id, animation, page);
            }
        }
    }

    node
}

fn render_container(mut node: VNode, element: &Element, options: &RenderOptions, page: &mut RenderedPage) -> VNode {
    if element.children.is_empty() {
        if options.mode == RenderMode::Edit {
            node = node.with_child(drop_target(&element.id));
        }
        return node;
    }

    let children = element
        .children
        .iter()
        .map(|child| render_element(child, options, page))
        .collect();
    node.with_children(children)
}

fn drop_target(parent_id: &str) -> VNode {
    VNode::element("div")
        .with_attr(DROP_TARGET_ATTR, parent_id)
        .with_style("border", "2px dashed #cbd5e1")
        .with_style("padding", "24px")
        .with_style("text-align", "center")
        .with_style("color", "#94a3b8")
        .with_child(VNode::text(DROP_TARGET_LABEL))
}

fn render_menu(items: &[MenuItem]) -> VNode {
    let list = VNode::element("ul")
        .with_style("list-style", "none")
        .with_style("display", "flex")
        .with_style("gap", "inherit")
        .with_style("margin", "0")
        .with_style("padding", "0");
    list.with_children(items.iter().map(render_menu_item).collect())
}

fn render_menu_item(item: &MenuItem) -> VNode {
    let li = VNode::element("li").with_attr("data-menu-item-id", &item.id);

    let li = match item.kind {
        MenuItemKind::Link => li.with_child(VNode::element("a").with_attr("href", &item.link).with_child(VNode::text(&item.label))),
        MenuItemKind::Column => li
            .with_attr("class", "pc-menu-column")
            .with_child(VNode::element("span").with_child(VNode::text(&item.label))),
        MenuItemKind::PromoImage => {
            let image = VNode::element("img")
                .with_attr("src", item.image.as_deref().unwrap_or_default())
                .with_attr("alt", &item.label);
            li.with_attr("class", "pc-menu-promo")
                .with_child(VNode::element("a").with_attr("href", &item.link).with_child(image))
        }
    };

    if item.children.is_empty() {
        li
    } else {
        li.with_child(render_menu(&item.children))
    }
}

/// Entrance animations reference a shared `@keyframes` rule; hover
/// animations become a transition plus a `:hover` rule.
fn apply_animation(node: VNode, element_id: &str, animation: &Animation, page: &mut RenderedPage) -> VNode {
    let timing = format!(
        "{}ms {} {}ms",
        animation.duration_ms,
        animation.easing.as_css(),
        animation.delay_ms
    );
    let node = node.with_attr("data-animation-trigger", animation.trigger.as_str());

    match animation.trigger {
        AnimationTrigger::OnLoad | AnimationTrigger::OnScroll => {
            let Some(name) = animation.kind.keyframes_name() else {
                return node;
            };
            page.add_keyframes(name, animation.kind.from_frame());
            let node = node.with_style("animation", format!("{} {} both", name, timing));
            if animation.trigger == AnimationTrigger::OnScroll {
                // Host flips this to `running` once the element is in view
                node.with_style("animation-play-state", "paused")
            } else {
                node
            }
        }
        AnimationTrigger::OnHover => {
            let (property, value) = match animation.kind.hover_transform() {
                Some(transform) => ("transform", transform),
                None => ("opacity", "0.8"),
            };
            let mut hovered = StyleMap::new();
            hovered.insert(property.to_string(), value.to_string());
            page.add_rule(format!("[{}=\"{}\"]:hover", ELEMENT_ID_ATTR, css_string(element_id)), hovered);
            node.with_style("transition", format!("{} {}", property, timing))
        }
    }
}

/// Escape `value` for use inside a double-quoted CSS string
fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '<' => out.push_str("\\3c "),
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}

fn content_of(element: &Element) -> &str {
    element.content.as_deref().unwrap_or_default()
}

fn css_styles(style: &StyleMap) -> StyleMap {
    style
        .iter()
        .map(|(key, value)| (to_css_property(key), value.clone()))
        .collect()
}
