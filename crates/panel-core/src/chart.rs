//! Declarative chart descriptions handed to a render sink.
//!
//! A [`ChartSpec`] is fixed at panel initialization. Later updates only
//! replace series data through [`SeriesPatch`]; kind, labels and styling
//! never change.

use serde::{Deserialize, Serialize};

use crate::palette::{self, Color};

/// Chart kinds the dashboard draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Donut,
    Radar,
    Line,
    Scatter,
    Bubble,
}

/// Bar orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Legend placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Legend {
    #[default]
    Hidden,
    Top,
    Bottom,
}

/// Scale configuration for one axis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub grid: bool,
    pub tick_color: Option<Color>,
    pub grid_color: Option<Color>,
}

impl Axis {
    /// Plain axis with the palette's tick and grid colors.
    pub fn plain() -> Self {
        Self {
            grid: true,
            tick_color: Some(palette::SLATE),
            grid_color: Some(palette::GRID),
            ..Self::default()
        }
    }

    pub fn bounded(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::plain()
        }
    }

    pub fn suggested(min: f64, max: f64) -> Self {
        Self {
            suggested_min: Some(min),
            suggested_max: Some(max),
            ..Self::plain()
        }
    }

    pub fn without_grid(mut self) -> Self {
        self.grid = false;
        self
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// Display options; one preset constructor per chart family.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub orientation: Orientation,
    pub legend: Legend,
    pub tooltip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Axis>,
    /// Radial scale for radar charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<Axis>,
    /// Donut hole as a percentage of the radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout_pct: Option<u8>,
}

impl ChartOptions {
    /// Vertical bars with the value axis fixed to `[0, max]`.
    pub fn bar(max: f64) -> Self {
        Self {
            tooltip: true,
            x: Some(Axis::plain().without_grid()),
            y: Some(Axis::bounded(0.0, max)),
            ..Self::default()
        }
    }

    /// Horizontal bars with the value axis fixed to `[0, max]`.
    pub fn horizontal_bar(max: f64) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            tooltip: true,
            x: Some(Axis::bounded(0.0, max)),
            y: Some(Axis::plain().without_grid()),
            ..Self::default()
        }
    }

    pub fn donut(cutout_pct: u8) -> Self {
        Self {
            legend: Legend::Bottom,
            tooltip: true,
            cutout_pct: Some(cutout_pct),
            ..Self::default()
        }
    }

    pub fn radar(min: f64, max: f64, legend: bool) -> Self {
        let mut r = Axis::bounded(min, max);
        r.grid_color = Some(palette::GRID_STRONG);
        Self {
            legend: if legend { Legend::Top } else { Legend::Hidden },
            tooltip: true,
            r: Some(r),
            ..Self::default()
        }
    }

    /// Cartesian chart (line, scatter, bubble) with a top legend.
    pub fn cartesian(x: Axis, y: Axis) -> Self {
        Self {
            legend: Legend::Top,
            tooltip: true,
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

/// A point of a scatter series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A point of a bubble series; `r` is the radius in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Data portion of one series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum SeriesData {
    Values(Vec<f64>),
    Points(Vec<Point>),
    Bubbles(Vec<Bubble>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Values(v) => v.len(),
            SeriesData::Points(v) => v.len(),
            SeriesData::Bubbles(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Integer outputs as chart values.
    pub fn ints<I: IntoIterator<Item = i64>>(values: I) -> Self {
        SeriesData::Values(values.into_iter().map(|v| v as f64).collect())
    }
}

/// Visual styling of one series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Fill colors: one entry for the whole series, or one per data point.
    pub fill: Vec<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_color: Option<Color>,
    /// Bezier tension for line charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl SeriesStyle {
    /// Rounded bars, one color per bar.
    pub fn bars(fill: Vec<Color>) -> Self {
        Self {
            fill,
            corner_radius: Some(10),
            ..Self::default()
        }
    }

    /// Donut slices separated by a white stroke.
    pub fn slices(fill: Vec<Color>) -> Self {
        Self {
            fill,
            border: Some(palette::WHITE_STROKE),
            border_width: Some(2),
            ..Self::default()
        }
    }

    /// Outlined area with matching points (radar).
    pub fn area(line: Color, fill: Color) -> Self {
        Self {
            fill: vec![fill],
            border: Some(line.clone()),
            point_color: Some(line),
            ..Self::default()
        }
    }

    /// Smoothed unfilled line.
    pub fn line(color: Color) -> Self {
        Self {
            border: Some(color),
            tension: Some(0.35),
            ..Self::default()
        }
    }

    pub fn dots(color: Color) -> Self {
        Self {
            fill: vec![color],
            ..Self::default()
        }
    }
}

/// One series of a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: SeriesData,
    pub style: SeriesStyle,
}

impl SeriesSpec {
    pub fn new(data: SeriesData, style: SeriesStyle) -> Self {
        Self {
            label: None,
            data,
            style,
        }
    }

    pub fn labelled(label: &str, data: SeriesData, style: SeriesStyle) -> Self {
        Self {
            label: Some(label.to_string()),
            data,
            style,
        }
    }
}

/// Full declarative description of a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<SeriesSpec>,
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, labels: &[&str], options: ChartOptions) -> Self {
        Self {
            kind,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            series: Vec::new(),
            options,
        }
    }

    pub fn with_series(mut self, series: SeriesSpec) -> Self {
        self.series.push(series);
        self
    }

    /// Replace the data of the patched series. Patches addressing a series
    /// that does not exist are ignored. Returns whether any data changed.
    pub fn apply(&mut self, patches: &[SeriesPatch]) -> bool {
        let mut changed = false;
        for p in patches {
            if let Some(s) = self.series.get_mut(p.index) {
                if s.data != p.data {
                    s.data = p.data.clone();
                    changed = true;
                }
            }
        }
        changed
    }
}

/// Replacement data for series `index` of an existing chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPatch {
    pub index: usize,
    pub data: SeriesData,
}

impl SeriesPatch {
    pub fn new(index: usize, data: SeriesData) -> Self {
        Self { index, data }
    }
}
