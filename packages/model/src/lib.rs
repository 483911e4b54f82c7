//! # Pagecraft Model
//!
//! Document model for the visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Element tree + style resolution      │
//! │  - Element kinds and their capabilities     │
//! │  - Breakpoints and responsive overrides     │
//! │  - Animation and navigation sub-models      │
//! │  - Component palette, id generation         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: mutations, history, versions        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: tree → virtual nodes → HTML       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_model::{find_template, resolve_style, Breakpoint, IdGenerator};
//!
//! let mut ids = IdGenerator::new("home");
//! let heading = find_template("Heading").unwrap().materialize(&mut ids);
//! let style = resolve_style(&heading, Breakpoint::Mobile);
//! assert_eq!(style["fontSize"], "40px");
//! ```

pub mod animation;
pub mod element;
pub mod id_generator;
pub mod menu;
pub mod style;
pub mod template;

pub use animation::{Animation, AnimationKind, AnimationTrigger, Easing};
pub use element::{Element, ElementKind};
pub use id_generator::{get_page_seed, IdGenerator};
pub use menu::{MenuItem, MenuItemKind};
pub use style::{resolve_style, to_css_property, to_inline_css, Breakpoint, ResponsiveOverrides, StyleMap};
pub use template::{clone_with_fresh_ids, find_template, palette, ElementTemplate};

/// A page: the ordered sequence of root elements
pub type Tree = Vec<Element>;
