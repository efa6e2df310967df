//! Headless sink that keeps the rendered page in memory.

use panel_core::{ChartSpec, PageLayout, SeriesPatch, TargetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sink::RenderSink;

/// A rendered element with a revision that advances on visible change only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rendered<T> {
    pub value: T,
    pub revision: u64,
}

impl<T: PartialEq> Rendered<T> {
    fn new(value: T) -> Self {
        Self { value, revision: 1 }
    }

    fn replace(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.revision += 1;
        }
    }
}

/// Serializable view of everything currently drawn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub charts: BTreeMap<String, Rendered<ChartSpec>>,
    pub texts: BTreeMap<String, Rendered<String>>,
    pub lists: BTreeMap<String, Rendered<Vec<String>>>,
}

impl PageSnapshot {
    /// Sum of all revisions; unchanged when a push had no visible effect.
    pub fn total_revisions(&self) -> u64 {
        self.charts.values().map(|c| c.revision).sum::<u64>()
            + self.texts.values().map(|t| t.revision).sum::<u64>()
            + self.lists.values().map(|l| l.revision).sum::<u64>()
    }
}

/// In-memory page driven by a [`PageLayout`].
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    layout: PageLayout,
    page: PageSnapshot,
}

impl MemorySink {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            page: PageSnapshot::default(),
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn snapshot(&self) -> &PageSnapshot {
        &self.page
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.page.texts.get(id).map(|t| t.value.as_str())
    }

    pub fn list(&self, id: &str) -> Option<&[String]> {
        self.page.lists.get(id).map(|l| l.value.as_slice())
    }

    pub fn chart(&self, id: &str) -> Option<&ChartSpec> {
        self.page.charts.get(id).map(|c| &c.value)
    }

    /// Revision of any rendered element, 0 when never drawn.
    pub fn revision(&self, id: &str) -> u64 {
        self.page
            .charts
            .get(id)
            .map(|c| c.revision)
            .or_else(|| self.page.texts.get(id).map(|t| t.revision))
            .or_else(|| self.page.lists.get(id).map(|l| l.revision))
            .unwrap_or(0)
    }
}

impl RenderSink for MemorySink {
    fn has_target(&self, id: &TargetId) -> bool {
        self.layout.has(id.as_str())
    }

    fn charts_available(&self) -> bool {
        self.layout.charts
    }

    fn create_chart(&mut self, id: &TargetId, spec: &ChartSpec) {
        self.page
            .charts
            .insert(id.0.clone(), Rendered::new(spec.clone()));
    }

    fn patch_chart(&mut self, id: &TargetId, patches: &[SeriesPatch]) {
        if let Some(chart) = self.page.charts.get_mut(id.as_str()) {
            if chart.value.apply(patches) {
                chart.revision += 1;
            }
        }
    }

    fn set_text(&mut self, id: &TargetId, text: &str) {
        match self.page.texts.get_mut(id.as_str()) {
            Some(t) => t.replace(text.to_string()),
            None => {
                self.page
                    .texts
                    .insert(id.0.clone(), Rendered::new(text.to_string()));
            }
        }
    }

    fn set_list(&mut self, id: &TargetId, items: &[String]) {
        match self.page.lists.get_mut(id.as_str()) {
            Some(l) => l.replace(items.to_vec()),
            None => {
                self.page
                    .lists
                    .insert(id.0.clone(), Rendered::new(items.to_vec()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{ChartKind, ChartOptions, SeriesData, SeriesSpec, SeriesStyle};

    #[test]
    fn identical_pushes_do_not_advance_revisions() {
        let mut sink = MemorySink::new(PageLayout::full());
        let id = TargetId::new("kpi");
        sink.set_text(&id, "42");
        sink.set_text(&id, "42");
        assert_eq!(sink.revision("kpi"), 1);
        sink.set_text(&id, "43");
        assert_eq!(sink.revision("kpi"), 2);
        assert_eq!(sink.text("kpi"), Some("43"));

        let list = TargetId::new("recos");
        let items = vec!["a".to_string()];
        sink.set_list(&list, &items);
        sink.set_list(&list, &items);
        assert_eq!(sink.revision("recos"), 1);
    }

    #[test]
    fn patches_apply_to_created_charts_only() {
        let mut sink = MemorySink::new(PageLayout::full());
        let id = TargetId::new("c");
        let patch = [SeriesPatch::new(0, SeriesData::Values(vec![2.0]))];
        sink.patch_chart(&id, &patch);
        assert!(sink.chart("c").is_none());

        let spec = ChartSpec::new(ChartKind::Bar, &["x"], ChartOptions::bar(10.0)).with_series(
            SeriesSpec::new(SeriesData::Values(vec![1.0]), SeriesStyle::default()),
        );
        sink.create_chart(&id, &spec);
        sink.patch_chart(&id, &patch);
        sink.patch_chart(&id, &patch);
        assert_eq!(sink.revision("c"), 2);
        assert_eq!(
            sink.chart("c").map(|c| &c.series[0].data),
            Some(&SeriesData::Values(vec![2.0]))
        );
    }

    #[test]
    fn layout_controls_target_presence() {
        let sink = MemorySink::new(PageLayout::full().without(["gone"]).without_charts());
        assert!(!sink.has_target(&TargetId::new("gone")));
        assert!(sink.has_target(&TargetId::new("here")));
        assert!(!sink.charts_available());
    }

    #[test]
    fn snapshot_serializes_by_element_kind() {
        let mut sink = MemorySink::new(PageLayout::full());
        sink.set_text(&TargetId::new("s3_eff"), "63");
        let json = serde_json::to_value(sink.snapshot()).unwrap();
        assert_eq!(json["texts"]["s3_eff"]["value"], "63");
        assert_eq!(json["texts"]["s3_eff"]["revision"], 1);
        assert!(json["charts"].as_object().unwrap().is_empty());
    }
}
