//! # Pagecraft Renderer
//!
//! Renders the page tree for the builder canvas and for publishing.
//!
//! ```text
//! Element tree ──render(mode, breakpoint)──► RenderedPage (VNode tree,
//!                                            keyframes, hover rules)
//!                                                    │
//!                                                 to_html
//!                                                    ▼
//!                                              HTML document
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_model::{Breakpoint, Element, ElementKind};
//! use pagecraft_renderer::{render, to_html, HtmlOptions, RenderOptions};
//!
//! let tree = vec![Element::new("h", ElementKind::Heading, "Title").with_content("Hello")];
//! let page = render(&tree, &RenderOptions::preview(Breakpoint::Desktop));
//! let html = to_html(&page, HtmlOptions::default());
//! assert!(html.contains("Hello</h2>"));
//! ```

mod html;
mod render;
mod vdom;

pub use html::{to_html, HtmlOptions};
pub use render::{render, RenderMode, RenderOptions, DROP_TARGET_ATTR, ELEMENT_ID_ATTR, SELECTED_ATTR};
pub use vdom::{CssRule, KeyframesRule, RenderedPage, VNode};
