//! Control effectiveness and residual risk from five component levels and
//! the complexity of the environment.

use panel_core::palette::{AMBER, EMERALD, GRAY_BAR, INDIGO, ROSE, SKY};
use panel_core::{
    avg, format_number, round_clamp, BoundedControl, ChartKind, ChartOptions, ChartSpec,
    ControlSet, PanelError, PanelModel, SeriesData, SeriesSpec, SeriesStyle, TargetDecl, Update,
};

use crate::rules::{Rule, RuleSet};

pub const CONTROLS: [&str; 6] = [
    "s3_entorno",
    "s3_eval",
    "s3_ctrl",
    "s3_info",
    "s3_sup",
    "s3_compl",
];
pub const DEFAULTS: [f64; 6] = [75.0, 50.0, 65.0, 55.0, 70.0, 60.0];

pub const CHART: &str = "chart_s3_bars";
pub const EFFECTIVENESS: &str = "s3_eff";
pub const RESIDUAL: &str = "s3_risk";
pub const RECOMMENDATIONS: &str = "s3_recos";

/// Weight of the effectiveness gap in residual risk.
pub const RESIDUAL_GAP_WEIGHT: f64 = 0.75;
/// Weight of environment complexity in residual risk.
pub const RESIDUAL_COMPLEXITY_WEIGHT: f64 = 0.25;
pub const WEAK_COMPONENT_BELOW: f64 = 60.0;
pub const HIGH_COMPLEXITY_ABOVE: f64 = 75.0;

const COMPONENT_NAMES: [&str; 5] = [
    "Entorno de Control",
    "Evaluación de Riesgos",
    "Actividades de Control",
    "Información y Comunicación",
    "Actividades de Supervisión",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Inputs {
    pub components: [f64; 5],
    pub complexity: f64,
}

impl Inputs {
    pub fn from_controls(controls: &ControlSet) -> Result<Self, PanelError> {
        let [a, b, c, d, e, complexity] = controls.numbers(CONTROLS)?;
        Ok(Self {
            components: [a, b, c, d, e],
            complexity,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    /// The six bar heights: five components then complexity.
    pub levels: [f64; 6],
    pub effectiveness: i64,
    pub residual_risk: i64,
    pub recommendations: Vec<String>,
}

pub fn derive(inputs: &Inputs) -> Outputs {
    let effectiveness = round_clamp(avg(&inputs.components), 0, 100);
    let residual_risk = round_clamp(
        (100 - effectiveness) as f64 * RESIDUAL_GAP_WEIGHT
            + inputs.complexity * RESIDUAL_COMPLEXITY_WEIGHT,
        0,
        100,
    );
    let c = inputs.components;
    Outputs {
        levels: [c[0], c[1], c[2], c[3], c[4], inputs.complexity],
        effectiveness,
        residual_risk,
        recommendations: rules().evaluate(inputs),
    }
}

/// Advisories for weak components and a complex environment.
pub fn rules() -> RuleSet<Inputs> {
    let mut set = RuleSet::new("Buen nivel general. Mantener monitoreo continuo y ajustes puntuales.");
    for (i, name) in COMPONENT_NAMES.into_iter().enumerate() {
        set = set.with(Rule::below(
            name,
            WEAK_COMPONENT_BELOW,
            move |s: &Inputs| s.components[i],
            move |v| format!("Fortalecer {name} (nivel actual: {}%).", format_number(v)),
        ));
    }
    set.with(Rule::above(
        "complexity",
        HIGH_COMPLEXITY_ABOVE,
        |s: &Inputs| s.complexity,
        |v| {
            format!(
                "Alta complejidad del entorno ({}%) — priorizar estandarización y controles compensatorios.",
                format_number(v)
            )
        },
    ))
}

impl Outputs {
    pub fn updates(&self) -> Vec<Update> {
        vec![
            Update::series(CHART, SeriesData::Values(self.levels.to_vec())),
            Update::text(EFFECTIVENESS, self.effectiveness.to_string()),
            Update::text(RESIDUAL, self.residual_risk.to_string()),
            Update::list(RECOMMENDATIONS, self.recommendations.clone()),
        ]
    }
}

pub struct ResidualRisk;

impl PanelModel for ResidualRisk {
    fn id(&self) -> &'static str {
        "residual_risk"
    }

    fn title(&self) -> &'static str {
        "Efectividad del control y riesgo residual"
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
            ChartKind::Bar,
            &[
                "Entorno",
                "Eval. Riesgos",
                "Act. Control",
                "Info/Com",
                "Supervisión",
                "Complejidad",
            ],
            ChartOptions::bar(100.0),
        )
        .with_series(SeriesSpec::labelled(
            "Nivel",
            SeriesData::Values(DEFAULTS.to_vec()),
            SeriesStyle::bars(vec![INDIGO, EMERALD, AMBER, SKY, ROSE, GRAY_BAR]),
        ));
        vec![
            TargetDecl::chart(CHART, spec),
            TargetDecl::text(EFFECTIVENESS),
            TargetDecl::text(RESIDUAL),
            TargetDecl::list(RECOMMENDATIONS),
        ]
    }

    fn recompute(&self, controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(derive(&Inputs::from_controls(controls)?).updates())
    }
}
