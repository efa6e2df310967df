//! Static split of the three objective categories.

use panel_core::palette::{ROSE, SKY, EMERALD};
use panel_core::{
    BoundedControl, ChartKind, ChartOptions, ChartSpec, ControlSet, PanelError, PanelModel,
    SeriesData, SeriesSpec, SeriesStyle, TargetDecl, Update,
};

pub const CHART: &str = "chart_s2_donut";

pub struct Objectives;

impl PanelModel for Objectives {
    fn id(&self) -> &'static str {
        "objectives"
    }

    fn title(&self) -> &'static str {
        "Categorías de objetivos"
    }

    fn controls(&self) -> Vec<BoundedControl> {
        Vec::new()
    }

    fn targets(&self) -> Vec<TargetDecl> {
        let spec = ChartSpec::new(
            ChartKind::Donut,
            &[
                "Objetivos de información",
                "Objetivos operacionales",
                "Objetivos de cumplimiento",
            ],
            ChartOptions::donut(70),
        )
        .with_series(SeriesSpec::new(
            SeriesData::Values(vec![50.0, 30.0, 20.0]),
            SeriesStyle::slices(vec![SKY, EMERALD, ROSE]),
        ));
        vec![TargetDecl::chart(CHART, spec)]
    }

    fn recompute(&self, _controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(Vec::new())
    }
}
