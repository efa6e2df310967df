#![deny(warnings)]

//! Runtime for the governance dashboard.
//!
//! Owns one [`Orchestrator`] per panel plus the [`RenderSink`] they draw
//! into, and routes each control input to the panel that owns the control.
//! Everything runs synchronously on the caller's thread.

pub mod memory;
pub mod orchestrator;
pub mod sink;

pub use memory::{MemorySink, PageSnapshot, Rendered};
pub use orchestrator::{Orchestrator, Phase};
pub use sink::{Handle, RenderSink, TargetKind};

use panel_core::{ControlId, ControlValue, PanelError, PanelModel};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Mount summary returned by [`Dashboard::boot`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MountReport {
    pub active: usize,
    pub uninitialized: usize,
    /// Render targets of active panels that could not be attached.
    pub detached: usize,
}

pub struct Dashboard<S: RenderSink> {
    sink: S,
    panels: Vec<Orchestrator>,
    routes: BTreeMap<ControlId, usize>,
}

impl<S: RenderSink> Dashboard<S> {
    /// Mount every panel against `sink` in catalog order.
    ///
    /// Panels that cannot find their controls stay uninitialized; the rest
    /// render their initial outputs immediately. Every declared control is
    /// routed to its panel whatever the panel's phase.
    pub fn boot(mut sink: S, models: Vec<Box<dyn PanelModel>>) -> Self {
        let mut panels = Vec::with_capacity(models.len());
        let mut routes = BTreeMap::new();
        for model in models {
            let mut orch = Orchestrator::new(model);
            orch.mount(&mut sink);
            let idx = panels.len();
            for c in orch.controls().iter() {
                routes.insert(c.id().clone(), idx);
            }
            panels.push(orch);
        }
        let dash = Self {
            sink,
            panels,
            routes,
        };
        let report = dash.report();
        info!(
            active = report.active,
            uninitialized = report.uninitialized,
            detached = report.detached,
            "dashboard mounted"
        );
        dash
    }

    pub fn report(&self) -> MountReport {
        let mut report = MountReport::default();
        for p in &self.panels {
            match p.phase() {
                Phase::Active => {
                    report.active += 1;
                    report.detached += p.diagnostics().len();
                }
                Phase::Uninitialized => report.uninitialized += 1,
            }
        }
        report
    }

    /// Route a control value to its panel and propagate it.
    ///
    /// Returns whether the owning panel recomputed; `false` when that panel
    /// is not wired to the page.
    pub fn input(&mut self, control: &str, value: ControlValue) -> Result<bool, PanelError> {
        let Some(&idx) = self.routes.get(&ControlId::new(control)) else {
            warn!(control, "input for unknown control");
            return Err(PanelError::UnknownControl(control.to_string()));
        };
        self.panels[idx].handle_input(&mut self.sink, control, value)
    }

    /// Like [`Dashboard::input`], parsing `raw` through the control's domain.
    pub fn input_raw(&mut self, control: &str, raw: &str) -> Result<bool, PanelError> {
        let value = self
            .routes
            .get(&ControlId::new(control))
            .and_then(|&idx| self.panels[idx].controls().get(control))
            .ok_or_else(|| PanelError::UnknownControl(control.to_string()))?
            .domain()
            .parse(raw)?;
        self.input(control, value)
    }

    /// Recompute and push every active panel with unchanged controls.
    pub fn refresh(&mut self) {
        for p in &mut self.panels {
            p.refresh(&mut self.sink);
        }
    }

    pub fn panel(&self, id: &str) -> Option<&Orchestrator> {
        self.panels.iter().find(|p| p.id() == id)
    }

    pub fn panels(&self) -> &[Orchestrator] {
        &self.panels
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{PageLayout, SeriesData, ValidationError};
    use panel_models::catalog;
    use proptest::prelude::*;

    fn boot(layout: PageLayout) -> Dashboard<MemorySink> {
        Dashboard::boot(MemorySink::new(layout), catalog())
    }

    #[test]
    fn full_page_mounts_every_panel() {
        let dash = boot(PageLayout::full());
        assert_eq!(
            dash.report(),
            MountReport {
                active: 9,
                uninitialized: 0,
                detached: 0
            }
        );
        assert_eq!(dash.sink().text("s3_risk"), Some("43"));
        assert_eq!(dash.sink().text("s6_kpi_eff"), Some("53"));
        assert_eq!(dash.sink().text("s7_c1"), Some("72%"));
        assert!(dash.sink().chart("g1_componentes").is_some());
    }

    #[test]
    fn inputs_route_to_owning_panel() {
        let mut dash = boot(PageLayout::full());
        let erm_cycles = dash.panel("erm").map(|p| p.cycles());
        dash.input("s1_entorno", 100.0.into()).unwrap();
        let radar = dash.sink().chart("chart_s1_radar").unwrap();
        assert_eq!(radar.series[1].data, SeriesData::ints([85, 60, 77, 64, 55]));
        assert_eq!(dash.panel("erm").map(|p| p.cycles()), erm_cycles);
    }

    #[test]
    fn raw_inputs_are_parsed_by_domain() {
        let mut dash = boot(PageLayout::full());
        dash.input_raw("s8_enfoque", "agresivo").unwrap();
        assert_eq!(dash.sink().text("s8_r_cump"), Some("26% / 46%"));
        dash.input_raw("s3_compl", "100").unwrap();
        assert_eq!(dash.sink().text("s3_risk"), Some("53"));
        assert!(matches!(
            dash.input_raw("s8_enfoque", "temerario"),
            Err(PanelError::Validation(_))
        ));
        assert!(matches!(
            dash.input_raw("s3_compl", "mucho"),
            Err(PanelError::Validation(_))
        ));
    }

    #[test]
    fn fractional_slider_text_is_rejected() {
        let mut dash = boot(PageLayout::full());
        assert_eq!(
            dash.input_raw("s3_eval", "50.5"),
            Err(PanelError::Validation(ValidationError::OffStep {
                value: 50.5,
                step: 1.0
            }))
        );
        assert!(dash.input_raw("s6_madurez", "55.25").is_err());
        assert_eq!(dash.sink().text("bind:s3_eval"), Some("50"));
        assert_eq!(dash.sink().text("s6_kpi_mad"), Some("55"));
        let recos = dash.sink().list("s3_recos").unwrap();
        assert!(recos.iter().any(|r| r.contains("(nivel actual: 50%)")));
    }

    #[test]
    fn unknown_control_is_rejected() {
        let mut dash = boot(PageLayout::full());
        assert_eq!(
            dash.input("s9_nada", 1.0.into()),
            Err(PanelError::UnknownControl("s9_nada".into()))
        );
    }

    #[test]
    fn missing_control_isolates_one_panel() {
        let mut dash = boot(PageLayout::full().without(["s6_madurez"]));
        assert_eq!(dash.panel("monitoring").map(|p| p.phase()), Some(Phase::Uninitialized));
        assert!(dash.sink().text("s6_kpi_eff").is_none());
        assert_eq!(dash.sink().text("s3_risk"), Some("43"));
        assert_eq!(dash.input("s6_cambio", 10.0.into()), Ok(false));
        assert_eq!(dash.sink().text("bind:s6_cambio"), Some("10"));
        assert!(dash.sink().text("s6_kpi_plan").is_none());
        assert_eq!(dash.input("s3_compl", 100.0.into()), Ok(true));
        assert_eq!(dash.sink().text("s3_risk"), Some("53"));
        let report = dash.report();
        assert_eq!((report.active, report.uninitialized), (8, 1));
    }

    #[test]
    fn missing_chart_does_not_block_other_outputs() {
        let mut dash = boot(PageLayout::full().without(["chart_s3_bars"]));
        assert_eq!(dash.panel("residual_risk").map(|p| p.phase()), Some(Phase::Active));
        dash.input("s3_entorno", 40.0.into()).unwrap();
        assert!(dash.sink().chart("chart_s3_bars").is_none());
        // avg(40,50,65,55,70) = 56
        assert_eq!(dash.sink().text("s3_eff"), Some("56"));
        assert_eq!(dash.report().detached, 1);
    }

    #[test]
    fn page_without_charts_still_renders_kpis() {
        let dash = boot(PageLayout::full().without_charts());
        assert!(dash.sink().snapshot().charts.is_empty());
        assert_eq!(dash.sink().text("s5_quality"), Some("74"));
        assert_eq!(dash.sink().text("s8_kpi_mision"), Some("60"));
        assert_eq!(dash.report().active, 9);
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut dash = boot(PageLayout::full());
        let before = dash.sink().snapshot().clone();
        dash.refresh();
        assert_eq!(dash.sink().snapshot(), &before);
    }

    proptest! {
        #[test]
        fn last_input_wins(a in 0u8..=100, b in 0u8..=100) {
            let mut dash = boot(PageLayout::full());
            dash.input("s5_acc", f64::from(a).into()).unwrap();
            dash.input("s5_acc", f64::from(b).into()).unwrap();
            let mut fresh = boot(PageLayout::full());
            fresh.input("s5_acc", f64::from(b).into()).unwrap();
            prop_assert_eq!(dash.sink().text("s5_quality"), fresh.sink().text("s5_quality"));
        }
    }
}
