//! Per-element animation configuration.

use serde::{Deserialize, Serialize};

/// Entrance / hover effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    #[default]
    None,
    Fade,
    SlideUp,
    SlideLeft,
    SlideRight,
    Zoom,
    Rotate,
}

impl AnimationKind {
    /// Name of the `@keyframes` rule this kind plays, if any
    pub fn keyframes_name(self) -> Option<&'static str> {
        match self {
            AnimationKind::None => None,
            AnimationKind::Fade => Some("pc-fade"),
            AnimationKind::SlideUp => Some("pc-slide-up"),
            AnimationKind::SlideLeft => Some("pc-slide-left"),
            AnimationKind::SlideRight => Some("pc-slide-right"),
            AnimationKind::Zoom => Some("pc-zoom"),
            AnimationKind::Rotate => Some("pc-rotate"),
        }
    }

    /// Starting `transform`/`opacity` declarations (the `from` frame)
    pub fn from_frame(self) -> &'static str {
        match self {
            AnimationKind::None => "",
            AnimationKind::Fade => "opacity: 0",
            AnimationKind::SlideUp => "opacity: 0; transform: translateY(40px)",
            AnimationKind::SlideLeft => "opacity: 0; transform: translateX(40px)",
            AnimationKind::SlideRight => "opacity: 0; transform: translateX(-40px)",
            AnimationKind::Zoom => "opacity: 0; transform: scale(0.8)",
            AnimationKind::Rotate => "opacity: 0; transform: rotate(-12deg)",
        }
    }

    /// Transform applied while hovered, for hover-triggered animations
    pub fn hover_transform(self) -> Option<&'static str> {
        match self {
            AnimationKind::None | AnimationKind::Fade => None,
            AnimationKind::SlideUp => Some("translateY(-8px)"),
            AnimationKind::SlideLeft => Some("translateX(-8px)"),
            AnimationKind::SlideRight => Some("translateX(8px)"),
            AnimationKind::Zoom => Some("scale(1.05)"),
            AnimationKind::Rotate => Some("rotate(3deg)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationTrigger {
    #[default]
    OnLoad,
    /// Plays when the element scrolls into view
    OnScroll,
    OnHover,
}

impl AnimationTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationTrigger::OnLoad => "on-load",
            AnimationTrigger::OnScroll => "on-scroll",
            AnimationTrigger::OnHover => "on-hover",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    Ease,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// CSS timing function keyword
    pub fn as_css(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Ease => "ease",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    #[serde(rename = "type", default)]
    pub kind: AnimationKind,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
    #[serde(default)]
    pub delay_ms: u32,
    #[serde(default)]
    pub trigger: AnimationTrigger,
    #[serde(default)]
    pub easing: Easing,
}

fn default_duration_ms() -> u32 {
    600
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            kind: AnimationKind::None,
            duration_ms: default_duration_ms(),
            delay_ms: 0,
            trigger: AnimationTrigger::OnLoad,
            easing: Easing::EaseOut,
        }
    }
}

impl Animation {
    pub fn new(kind: AnimationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Whether anything would actually play
    pub fn is_active(&self) -> bool {
        self.kind != AnimationKind::None
    }
}
