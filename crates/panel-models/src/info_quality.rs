//! Information quality profile against an optimal level.

use panel_core::palette::{EMERALD, EMERALD_FILL, INDIGO, INDIGO_FILL};
use panel_core::{
    avg, round_clamp, BoundedControl, ChartKind, ChartOptions, ChartSpec, ControlSet, PanelError,
    PanelModel, SeriesData, SeriesSpec, SeriesStyle, TargetDecl, Update,
};

pub const CONTROLS: [&str; 6] = ["s5_acc", "s5_pre", "s5_opo", "s5_pro", "s5_suf", "s5_ver"];
const DEFAULTS: [f64; 6] = [70.0, 85.0, 78.0, 80.0, 60.0, 68.0];
pub const CHART: &str = "chart_s5_radar";
pub const QUALITY: &str = "s5_quality";
pub const OPTIMAL_LEVEL: f64 = 90.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Inputs {
    /// Accessibility, precision, timeliness, protection, sufficiency, verifiability.
    pub attributes: [f64; 6],
}

impl Inputs {
    pub fn from_controls(controls: &ControlSet) -> Result<Self, PanelError> {
        Ok(Self {
            attributes: controls.numbers(CONTROLS)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    pub attributes: [f64; 6],
    pub overall: i64,
}

pub fn derive(inputs: &Inputs) -> Outputs {
    Outputs {
        attributes: inputs.attributes,
        overall: round_clamp(avg(&inputs.attributes), 0, 100),
    }
}

impl Outputs {
    pub fn updates(&self) -> Vec<Update> {
        vec![
            Update::series(CHART, SeriesData::Values(self.attributes.to_vec())),
            Update::text(QUALITY, self.overall.to_string()),
        ]
    }
}

pub struct InfoQuality;

impl PanelModel for InfoQuality {
    fn id(&self) -> &'static str {
        "info_quality"
    }

    fn title(&self) -> &'static str {
        "Calidad de la información"
    }

    fn controls(&self) -> Vec<BoundedControl> {
        CONTROLS
            .iter()
            .zip(DEFAULTS)
            .filter_map(|(id, d)| BoundedControl::numeric(id, 0.0, 100.0, d).ok())
            .collect()
    }

    fn targets(&self) -> Vec<TargetDecl> {
        let spec = ChartSpec::new(
            ChartKind::Radar,
            &[
                "Accesibilidad",
                "Precisión",
                "Oportunidad",
                "Protección",
                "Suficiencia",
                "Verificabilidad",
            ],
            ChartOptions::radar(0.0, 100.0, true),
        )
        .with_series(SeriesSpec::labelled(
            "Nivel actual",
            SeriesData::Values(DEFAULTS.to_vec()),
            SeriesStyle::area(INDIGO, INDIGO_FILL),
        ))
        .with_series(SeriesSpec::labelled(
            "Nivel óptimo",
            SeriesData::Values(vec![OPTIMAL_LEVEL; 6]),
            SeriesStyle::area(EMERALD, EMERALD_FILL),
        ));
        vec![TargetDecl::chart(CHART, spec), TargetDecl::text(QUALITY)]
    }

    fn recompute(&self, controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(derive(&Inputs::from_controls(controls)?).updates())
    }
}
