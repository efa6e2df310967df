//! Shared read-only color palette used by every chart spec.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// CSS color string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub Cow<'static, str>);

impl Color {
    pub const fn fixed(css: &'static str) -> Self {
        Self(Cow::Borrowed(css))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub const INDIGO: Color = Color::fixed("rgba(99,102,241,.88)");
pub const INDIGO_FILL: Color = Color::fixed("rgba(99,102,241,.18)");
pub const EMERALD: Color = Color::fixed("rgba(16,185,129,.86)");
pub const EMERALD_FILL: Color = Color::fixed("rgba(16,185,129,.18)");
pub const AMBER: Color = Color::fixed("rgba(245,158,11,.88)");
pub const AMBER_FILL: Color = Color::fixed("rgba(245,158,11,.18)");
pub const SKY: Color = Color::fixed("rgba(14,165,233,.86)");
pub const SKY_FILL: Color = Color::fixed("rgba(14,165,233,.18)");
pub const ROSE: Color = Color::fixed("rgba(244,63,94,.86)");
pub const ROSE_FILL: Color = Color::fixed("rgba(244,63,94,.16)");
pub const PURPLE: Color = Color::fixed("rgba(168,85,247,.86)");
pub const PURPLE_FILL: Color = Color::fixed("rgba(168,85,247,.16)");
pub const SLATE: Color = Color::fixed("rgba(15,23,42,.78)");
pub const GRID: Color = Color::fixed("rgba(15,23,42,.08)");
pub const GRID_STRONG: Color = Color::fixed("rgba(15,23,42,.12)");
pub const WHITE_STROKE: Color = Color::fixed("rgba(255,255,255,.92)");
pub const GRAY_BAR: Color = Color::fixed("rgba(148,163,184,.78)");
/// Muted slice used for the "gap" part of a progress donut.
pub const GAP: Color = Color::fixed("rgba(148,163,184,.45)");

/// The five-category rotation most bar and donut charts use.
pub fn categorical5() -> Vec<Color> {
    vec![INDIGO, EMERALD, AMBER, PURPLE, ROSE]
}
