//! Fixed maturity snapshot of the five components: percentage texts and a donut.

use panel_core::palette::{AMBER, EMERALD, INDIGO, ROSE, SKY};
use panel_core::{
    BoundedControl, ChartKind, ChartOptions, ChartSpec, ControlSet, PanelError, PanelModel,
    SeriesData, SeriesSpec, SeriesStyle, TargetDecl, Update,
};

pub const CHART: &str = "chart_s7_donut";
pub const TEXTS: [&str; 5] = ["s7_c1", "s7_c2", "s7_c3", "s7_c4", "s7_c5"];
pub const VALUES: [i64; 5] = [72, 58, 64, 55, 61];

const LABELS: [&str; 5] = [
    "Ambiente de Control",
    "Evaluación de Riesgos",
    "Actividades de Control",
    "Info/Com",
    "Supervisión",
];

pub struct ComponentSummary;

impl PanelModel for ComponentSummary {
    fn id(&self) -> &'static str {
        "component_summary"
    }

    fn title(&self) -> &'static str {
        "Resumen de componentes"
    }

    fn controls(&self) -> Vec<BoundedControl> {
        Vec::new()
    }

    fn targets(&self) -> Vec<TargetDecl> {
        let spec = ChartSpec::new(ChartKind::Donut, &LABELS, ChartOptions::donut(68)).with_series(
            SeriesSpec::new(
                SeriesData::ints(VALUES),
                SeriesStyle::slices(vec![INDIGO, EMERALD, AMBER, SKY, ROSE]),
            ),
        );
        let mut targets = vec![TargetDecl::chart(CHART, spec)];
        targets.extend(TEXTS.iter().map(|t| TargetDecl::text(t)));
        targets
    }

    fn recompute(&self, _controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(TEXTS
            .iter()
            .zip(VALUES)
            .map(|(t, v)| Update::text(t, format!("{v}%")))
            .collect())
    }
}
