//! Monitoring activities: maturity, pace of change and five activity levels
//! yield effectiveness, coverage and action-plan KPIs.

use panel_core::palette::{EMERALD, EMERALD_FILL, INDIGO, INDIGO_FILL};
use panel_core::{
    avg, format_number, round_clamp, round_half_up, BoundedControl, ChartKind, ChartOptions,
    ChartSpec, ControlSet, PanelError, PanelModel, SeriesData, SeriesSpec, SeriesStyle,
    TargetDecl, Update,
};

use crate::rules::{Rule, RuleSet};

pub const MATURITY: &str = "s6_madurez";
pub const CHANGE: &str = "s6_cambio";
pub const ACTIVITIES: [&str; 5] = ["s6_cont", "s6_ind", "s6_com", "s6_seg", "s6_mej"];
const ACTIVITY_DEFAULTS: [f64; 5] = [60.0, 45.0, 58.0, 52.0, 50.0];

pub const CHART: &str = "chart_s6_radar";
pub const KPI_EFFECTIVENESS: &str = "s6_kpi_eff";
pub const KPI_COVERAGE: &str = "s6_kpi_cov";
pub const KPI_PLANS: &str = "s6_kpi_plan";
pub const KPI_MATURITY: &str = "s6_kpi_mad";
pub const RECOMMENDATIONS: &str = "s6_recos";

pub const TARGET_LEVEL: f64 = 80.0;
pub const PLAN_EFFECTIVENESS_WEIGHT: f64 = 0.6;
pub const PLAN_MATURITY_WEIGHT: f64 = 0.4;
pub const PLAN_CHANGE_PENALTY: f64 = 0.15;
pub const WEAK_BELOW: f64 = 60.0;
pub const FAST_CHANGE_ABOVE: f64 = 70.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Inputs {
    pub maturity: f64,
    pub change: f64,
    /// Continuous, independent, communication, follow-up, improvement.
    pub activities: [f64; 5],
}

impl Inputs {
    pub fn from_controls(controls: &ControlSet) -> Result<Self, PanelError> {
        Ok(Self {
            maturity: controls.number(MATURITY)?,
            change: controls.number(CHANGE)?,
            activities: controls.numbers(ACTIVITIES)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    pub activities: [f64; 5],
    pub effectiveness: i64,
    pub coverage: i64,
    pub plans: i64,
    pub maturity: f64,
    pub recommendations: Vec<String>,
}

pub fn derive(inputs: &Inputs) -> Outputs {
    let a = inputs.activities;
    let effectiveness = round_clamp(avg(&a), 0, 100);
    let coverage = round_half_up((a[0] + a[1]) / 2.0) as i64;
    let plans = round_clamp(
        effectiveness as f64 * PLAN_EFFECTIVENESS_WEIGHT + inputs.maturity * PLAN_MATURITY_WEIGHT
            - inputs.change * PLAN_CHANGE_PENALTY,
        0,
        100,
    );
    Outputs {
        activities: a,
        effectiveness,
        coverage,
        plans,
        maturity: inputs.maturity,
        recommendations: rules().evaluate(inputs),
    }
}

/// Advisories in display order: independence, follow-up, communication,
/// maturity, pace of change.
pub fn rules() -> RuleSet<Inputs> {
    RuleSet::new(
        "Buen desempeño de supervisión. Mantener evaluaciones periódicas y mejora continua.",
    )
    .with(Rule::below("independent", WEAK_BELOW, |s: &Inputs| s.activities[1], |_| {
        "Aumentar evaluaciones independientes para fortalecer objetividad.".into()
    }))
    .with(Rule::below("follow_up", WEAK_BELOW, |s: &Inputs| s.activities[3], |_| {
        "Mejorar seguimiento: definir responsables, plazos y evidencias de cierre.".into()
    }))
    .with(Rule::below("communication", WEAK_BELOW, |s: &Inputs| s.activities[2], |_| {
        "Reforzar comunicación (canales y reportes) para visibilidad de hallazgos.".into()
    }))
    .with(Rule::below("maturity", WEAK_BELOW, |s: &Inputs| s.maturity, |_| {
        "Elevar madurez: estandarizar metodología y capacitar a responsables.".into()
    }))
    .with(Rule::above("change", FAST_CHANGE_ABOVE, |s: &Inputs| s.change, |_| {
        "Alta velocidad de cambio: elevar frecuencia de monitoreo y revisiones.".into()
    }))
}

impl Outputs {
    pub fn updates(&self) -> Vec<Update> {
        vec![
            Update::series(CHART, SeriesData::Values(self.activities.to_vec())),
            Update::text(KPI_EFFECTIVENESS, self.effectiveness.to_string()),
            Update::text(KPI_COVERAGE, self.coverage.to_string()),
            Update::text(KPI_PLANS, self.plans.to_string()),
            Update::text(KPI_MATURITY, format_number(self.maturity)),
            Update::list(RECOMMENDATIONS, self.recommendations.clone()),
        ]
    }
}

pub struct Monitoring;

impl PanelModel for Monitoring {
    fn id(&self) -> &'static str {
        "monitoring"
    }

    fn title(&self) -> &'static str {
        "Actividades de supervisión"
    }

    fn controls(&self) -> Vec<BoundedControl> {
        let mut controls = vec![
            BoundedControl::numeric(MATURITY, 0.0, 100.0, 55.0),
            BoundedControl::numeric(CHANGE, 0.0, 100.0, 50.0),
        ];
        controls.extend(
            ACTIVITIES
                .iter()
                .zip(ACTIVITY_DEFAULTS)
                .map(|(id, d)| BoundedControl::numeric(id, 0.0, 100.0, d)),
        );
        controls.into_iter().filter_map(Result::ok).collect()
    }

    fn targets(&self) -> Vec<TargetDecl> {
        let spec = ChartSpec::new(
            ChartKind::Radar,
            &[
                "Eval. continuas",
                "Eval. independientes",
                "Comunicación",
                "Seguimiento",
                "Mejora continua",
            ],
            ChartOptions::radar(0.0, 100.0, true),
        )
        .with_series(SeriesSpec::labelled(
            "Estado actual",
            SeriesData::Values(ACTIVITY_DEFAULTS.to_vec()),
            SeriesStyle::area(INDIGO, INDIGO_FILL),
        ))
        .with_series(SeriesSpec::labelled(
            "Objetivo",
            SeriesData::Values(vec![TARGET_LEVEL; 5]),
            SeriesStyle::area(EMERALD, EMERALD_FILL),
        ));
        vec![
            TargetDecl::chart(CHART, spec),
            TargetDecl::text(KPI_EFFECTIVENESS),
            TargetDecl::text(KPI_COVERAGE),
            TargetDecl::text(KPI_PLANS),
            TargetDecl::text(KPI_MATURITY),
            TargetDecl::list(RECOMMENDATIONS),
        ]
    }

    fn recompute(&self, controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(derive(&Inputs::from_controls(controls)?).updates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Inputs {
        Inputs::from_controls(&ControlSet::new(Monitoring.controls())).unwrap()
    }

    #[test]
    fn default_kpis() {
        let out = derive(&defaults());
        // avg(60,45,58,52,50) = 53
        assert_eq!(out.effectiveness, 53);
        // (60+45)/2 = 52.5
        assert_eq!(out.coverage, 53);
        // 53*0.6 + 55*0.4 - 50*0.15 = 31.8 + 22 - 7.5 = 46.3
        assert_eq!(out.plans, 46);
        assert_eq!(
            out.recommendations,
            vec![
                "Aumentar evaluaciones independientes para fortalecer objetividad.",
                "Mejorar seguimiento: definir responsables, plazos y evidencias de cierre.",
                "Reforzar comunicación (canales y reportes) para visibilidad de hallazgos.",
                "Elevar madurez: estandarizar metodología y capacitar a responsables.",
            ]
        );
    }

    #[test]
    fn healthy_monitoring_uses_fallback() {
        let out = derive(&Inputs {
            maturity: 80.0,
            change: 30.0,
            activities: [80.0; 5],
        });
        assert_eq!(out.recommendations.len(), 1);
        assert!(out.recommendations[0].starts_with("Buen desempeño"));
    }

    #[test]
    fn fast_change_penalizes_plans() {
        let calm = derive(&Inputs {
            maturity: 70.0,
            change: 0.0,
            activities: [70.0; 5],
        });
        let hectic = derive(&Inputs {
            maturity: 70.0,
            change: 100.0,
            activities: [70.0; 5],
        });
        assert_eq!(calm.plans, 70);
        assert_eq!(hectic.plans, 55);
        assert_eq!(
            hectic.recommendations,
            vec!["Alta velocidad de cambio: elevar frecuencia de monitoreo y revisiones."]
        );
    }

    #[test]
    fn maturity_is_mirrored() {
        let updates = derive(&defaults()).updates();
        assert!(updates.contains(&Update::text(KPI_MATURITY, "55")));
    }
}
