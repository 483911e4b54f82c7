//! # Style Resolution
//!
//! Every element carries a base (desktop) style map plus optional partial
//! maps for tablet and mobile. The effective style for a viewport is the
//! base merged with each override layer in cascade order:
//!
//! ```text
//! desktop: base
//! tablet:  base <- tablet
//! mobile:  base <- tablet <- mobile
//! ```
//!
//! Later layers win key by key. Mobile inherits tablet's cascade rather than
//! starting again from base.

use crate::element::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property name → value. Ordered so rendered output is stable.
pub type StyleMap = BTreeMap<String, String>;

/// Viewport the builder is editing or previewing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    /// Canvas width in CSS pixels
    pub fn frame_width(self) -> u32 {
        match self {
            Breakpoint::Desktop => 1280,
            Breakpoint::Tablet => 768,
            Breakpoint::Mobile => 375,
        }
    }

    /// Override layers applied on top of the base style, in order
    pub fn cascade(self) -> &'static [Breakpoint] {
        match self {
            Breakpoint::Desktop => &[],
            Breakpoint::Tablet => &[Breakpoint::Tablet],
            Breakpoint::Mobile => &[Breakpoint::Tablet, Breakpoint::Mobile],
        }
    }

    /// The breakpoint this one inherits from (`None` for desktop)
    pub fn parent(self) -> Option<Breakpoint> {
        match self {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => Some(Breakpoint::Desktop),
            Breakpoint::Mobile => Some(Breakpoint::Tablet),
        }
    }
}

/// Per-breakpoint partial style maps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsiveOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<StyleMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<StyleMap>,
}

impl ResponsiveOverrides {
    pub fn is_empty(&self) -> bool {
        self.tablet.is_none() && self.mobile.is_none()
    }

    /// Override layer for a breakpoint. Desktop has none.
    pub fn layer(&self, breakpoint: Breakpoint) -> Option<&StyleMap> {
        match breakpoint {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => self.tablet.as_ref(),
            Breakpoint::Mobile => self.mobile.as_ref(),
        }
    }

    fn layer_slot(&mut self, breakpoint: Breakpoint) -> Option<&mut Option<StyleMap>> {
        match breakpoint {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => Some(&mut self.tablet),
            Breakpoint::Mobile => Some(&mut self.mobile),
        }
    }

    /// Set one property in a breakpoint's layer.
    ///
    /// `inherited` is the value the breakpoint would see without this layer.
    /// Only differences are stored: a value equal to `inherited`, or an empty
    /// value, removes the key. Layers left empty collapse to `None`.
    pub fn set(&mut self, breakpoint: Breakpoint, key: &str, value: &str, inherited: Option<&str>) {
        let Some(slot) = self.layer_slot(breakpoint) else {
            return;
        };

        let redundant = value.is_empty() || inherited == Some(value);
        if redundant {
            if let Some(layer) = slot.as_mut() {
                layer.remove(key);
                if layer.is_empty() {
                    *slot = None;
                }
            }
        } else {
            slot.get_or_insert_with(StyleMap::new)
                .insert(key.to_string(), value.to_string());
        }
    }
}

/// Effective style of `element` at `breakpoint`
pub fn resolve_style(element: &Element, breakpoint: Breakpoint) -> StyleMap {
    let mut resolved = element.style.clone();
    for layer in breakpoint.cascade() {
        if let Some(overrides) = element.responsive_overrides.layer(*layer) {
            for (key, value) in overrides {
                resolved.insert(key.clone(), value.clone());
            }
        }
    }
    resolved
}

/// Serialize a style map as an inline CSS declaration list
pub fn to_inline_css(style: &StyleMap) -> String {
    style
        .iter()
        .map(|(key, value)| format!("{}: {}", to_css_property(key), value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// `backgroundColor` → `background-color`. Already-dashed names pass through.
pub fn to_css_property(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn styled() -> Element {
        let mut element = Element::new("e", ElementKind::Heading, "Heading")
            .with_style("fontSize", "48px")
            .with_style("color", "#111")
            .with_style("padding", "24px");
        element.responsive_overrides.tablet = Some(StyleMap::from([
            ("fontSize".to_string(), "36px".to_string()),
            ("padding".to_string(), "16px".to_string()),
        ]));
        element.responsive_overrides.mobile =
            Some(StyleMap::from([("fontSize".to_string(), "28px".to_string())]));
        element
    }

    #[test]
    fn test_desktop_is_base() {
        let element = styled();
        assert_eq!(resolve_style(&element, Breakpoint::Desktop), element.style);
    }

    #[test]
    fn test_tablet_overrides_base() {
        let resolved = resolve_style(&styled(), Breakpoint::Tablet);
        assert_eq!(resolved["fontSize"], "36px");
        assert_eq!(resolved["padding"], "16px");
        assert_eq!(resolved["color"], "#111");
    }

    #[test]
    fn test_mobile_inherits_tablet() {
        let resolved = resolve_style(&styled(), Breakpoint::Mobile);
        assert_eq!(resolved["fontSize"], "28px");
        // Not overridden on mobile, so tablet's value carries through
        assert_eq!(resolved["padding"], "16px");
        assert_eq!(resolved["color"], "#111");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let element = styled();
        for bp in Breakpoint::ALL {
            assert_eq!(resolve_style(&element, bp), resolve_style(&element, bp));
        }
    }

    #[test]
    fn test_set_drops_values_equal_to_inherited() {
        let mut overrides = ResponsiveOverrides::default();
        overrides.set(Breakpoint::Tablet, "color", "red", Some("blue"));
        assert_eq!(overrides.tablet.as_ref().unwrap()["color"], "red");

        overrides.set(Breakpoint::Tablet, "color", "blue", Some("blue"));
        assert!(overrides.tablet.is_none());
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_set_empty_value_removes_key() {
        let mut overrides = ResponsiveOverrides::default();
        overrides.set(Breakpoint::Mobile, "margin", "0", None);
        overrides.set(Breakpoint::Mobile, "width", "100%", None);
        overrides.set(Breakpoint::Mobile, "margin", "", None);

        let mobile = overrides.mobile.unwrap();
        assert!(!mobile.contains_key("margin"));
        assert_eq!(mobile["width"], "100%");
    }

    #[test]
    fn test_set_on_desktop_is_ignored() {
        let mut overrides = ResponsiveOverrides::default();
        overrides.set(Breakpoint::Desktop, "color", "red", None);
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_inline_css() {
        let style = StyleMap::from([
            ("backgroundColor".to_string(), "#fff".to_string()),
            ("font-size".to_string(), "12px".to_string()),
        ]);
        assert_eq!(to_inline_css(&style), "background-color: #fff; font-size: 12px");
    }
}
