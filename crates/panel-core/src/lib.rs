#![deny(warnings)]

//! Core types for the governance dashboard.
//!
//! This crate defines the shared vocabulary of the parameter-to-chart
//! pipeline: bounded controls, render targets, declarative chart specs,
//! render updates, the page layout and the [`PanelModel`] trait every
//! simulation panel implements. It has no rendering or I/O of its own.

pub mod chart;
pub mod control;
pub mod palette;

pub use chart::{
    Axis, Bubble, ChartKind, ChartOptions, ChartSpec, Legend, Orientation, Point, SeriesData,
    SeriesPatch, SeriesSpec, SeriesStyle,
};
pub use control::{format_number, BoundedControl, ControlDomain, ControlId, ControlSet, ControlValue};
pub use palette::Color;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Stable identifier of a render target (chart canvas, KPI text, list) on the page.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Value label mirroring a numeric control.
    pub fn echo_for(control: &ControlId) -> Self {
        Self(format!("bind:{}", control.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A render target a panel needs, declared before mounting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetDecl {
    Chart { id: TargetId, spec: ChartSpec },
    Text { id: TargetId },
    List { id: TargetId },
}

impl TargetDecl {
    pub fn chart(id: &str, spec: ChartSpec) -> Self {
        TargetDecl::Chart {
            id: TargetId::new(id),
            spec,
        }
    }

    pub fn text(id: &str) -> Self {
        TargetDecl::Text {
            id: TargetId::new(id),
        }
    }

    pub fn list(id: &str) -> Self {
        TargetDecl::List {
            id: TargetId::new(id),
        }
    }

    pub fn id(&self) -> &TargetId {
        match self {
            TargetDecl::Chart { id, .. } | TargetDecl::Text { id } | TargetDecl::List { id } => id,
        }
    }
}

/// One output of a recomputation, addressed to a render target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Update {
    /// Replace series data of a chart and redraw it.
    Chart {
        target: TargetId,
        patches: Vec<SeriesPatch>,
    },
    /// Replace the text content of a KPI display.
    Text { target: TargetId, text: String },
    /// Repopulate an advisory list.
    List { target: TargetId, items: Vec<String> },
}

impl Update {
    pub fn chart(target: &str, patches: Vec<SeriesPatch>) -> Self {
        Update::Chart {
            target: TargetId::new(target),
            patches,
        }
    }

    /// Replace series 0 only.
    pub fn series(target: &str, data: SeriesData) -> Self {
        Self::chart(target, vec![SeriesPatch::new(0, data)])
    }

    pub fn text(target: &str, text: impl Into<String>) -> Self {
        Update::Text {
            target: TargetId::new(target),
            text: text.into(),
        }
    }

    pub fn list(target: &str, items: Vec<String>) -> Self {
        Update::List {
            target: TargetId::new(target),
            items,
        }
    }

    pub fn target(&self) -> &TargetId {
        match self {
            Update::Chart { target, .. } | Update::Text { target, .. } | Update::List { target, .. } => {
                target
            }
        }
    }
}

/// Which elements exist on the page hosting the dashboard.
///
/// Every identifier is assumed present unless listed in `absent`. When
/// `charts` is false the chart collaborator itself is unavailable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default = "default_true")]
    pub charts: bool,
    #[serde(default)]
    pub absent: BTreeSet<String>,
}

fn default_true() -> bool {
    true
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::full()
    }
}

impl PageLayout {
    /// Complete page: every target present, charts available.
    pub fn full() -> Self {
        Self {
            charts: true,
            absent: BTreeSet::new(),
        }
    }

    pub fn without<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.absent.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn without_charts(mut self) -> Self {
        self.charts = false;
        self
    }

    pub fn has(&self, id: &str) -> bool {
        !self.absent.contains(id)
    }
}

/// Validation errors for control values and domains.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("value {value} is outside [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },
    #[error("label {0:?} is not declared by the control")]
    UndeclaredLabel(String),
    #[error("expected a {expected} value")]
    KindMismatch { expected: &'static str },
    #[error("value {value} is not a multiple of step {step} from the minimum")]
    OffStep { value: f64, step: f64 },
    #[error("non-finite numeric value encountered")]
    NonFinite,
    #[error("range minimum {min} exceeds maximum {max}")]
    InvertedRange { min: f64, max: f64 },
    #[error("a select control needs at least one label")]
    EmptyDomain,
}

/// Errors a panel can meet while mounting or handling input.
///
/// `MissingTarget` and `MissingDependency` are degradation signals: they are
/// recorded and logged, never shown to the end user.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("target not found on page: {0}")]
    MissingTarget(TargetId),
    #[error("rendering collaborator unavailable: {0}")]
    MissingDependency(String),
    #[error("unknown control: {0}")]
    UnknownControl(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A self-contained simulation unit: controls, derivation and render targets.
pub trait PanelModel: Send + Sync {
    /// Short stable identifier, e.g. "residual_risk".
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    /// Controls with their default values.
    fn controls(&self) -> Vec<BoundedControl>;

    /// Charts, texts and lists the panel writes to.
    fn targets(&self) -> Vec<TargetDecl>;

    /// Recompute every output from the current control values.
    ///
    /// Must be a pure function of `controls`.
    fn recompute(&self, controls: &ControlSet) -> Result<Vec<Update>, PanelError>;
}

/// `max(lo, min(hi, x))`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(x))
}

/// Round half toward positive infinity, the page's rounding rule.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round, then clamp to `[lo, hi]`.
pub fn round_clamp(x: f64, lo: i64, hi: i64) -> i64 {
    (round_half_up(x) as i64).clamp(lo, hi)
}

/// Arithmetic mean; zero for an empty slice.
pub fn avg(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / (values.len().max(1) as f64)
}
