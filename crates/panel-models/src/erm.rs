//! Integral enterprise risk management panel.
//!
//! Risk appetite, investment in risk management, strategic posture and a
//! stress scenario (severity, response speed) drive every KPI and chart of
//! the panel at once.

use panel_core::palette::{
    AMBER, EMERALD, EMERALD_FILL, INDIGO, ROSE, ROSE_FILL, SKY, SKY_FILL,
};
use panel_core::{
    clamp, round_clamp, Axis, BoundedControl, Bubble, ChartKind, ChartOptions, ChartSpec,
    ControlSet, PanelError, PanelModel, Point, SeriesData, SeriesPatch, SeriesSpec, SeriesStyle,
    TargetDecl, Update,
};

pub const APPETITE: &str = "s8_apetito";
pub const INVESTMENT: &str = "s8_inversion";
pub const SEVERITY: &str = "s8_severidad";
pub const RESPONSE: &str = "s8_respuesta";
pub const POSTURE: &str = "s8_enfoque";
pub const SCENARIO: &str = "s8_escenario";

pub const SCENARIOS: [&str; 4] = [
    "crisis_financiera",
    "ciberataque",
    "pandemia",
    "disrupcion_cadena",
];

pub const CHART_RADAR: &str = "chart_s8_radar";
pub const CHART_SCATTER: &str = "chart_s8_scatter";
pub const CHART_LINE: &str = "chart_s8_line";
pub const CHART_HEAT: &str = "chart_s8_heat";
pub const CHART_KPIS: &str = "chart_s8_kpis";
pub const CHART_PERF: &str = "chart_s8_perf";

pub const KPI_MISSION: &str = "s8_kpi_mision";
pub const KPI_GROWTH: &str = "s8_kpi_crece";
pub const KPI_RESILIENCE: &str = "s8_kpi_resi";
pub const SCENARIO_IMPACT: &str = "s8_impacto";
pub const SCENARIO_RECOVERY: &str = "s8_recupera";
pub const SCENARIO_RESILIENCE: &str = "s8_resil";
pub const HEAT_TEXTS: [&str; 3] = ["s8_r_estr", "s8_r_oper", "s8_r_cump"];
pub const KPI_RESPONSE: &str = "s8_kpi_resp";
pub const KPI_PROCESS: &str = "s8_kpi_proc";
pub const KPI_CULTURE: &str = "s8_kpi_cult";
pub const KPI_ERM: &str = "s8_kpi_erm";
pub const LESSONS: &str = "s8_lessons";
pub const ACTIONS: &str = "s8_actions";

/// Baseline of the uninterrupted performance path.
pub const NORMAL_PATH: [f64; 7] = [100.0, 102.0, 104.0, 106.0, 108.0, 110.0, 112.0];
/// Floor and ceiling of the stressed performance path.
pub const EVENT_PATH_RANGE: (f64, f64) = (40.0, 112.0);
pub const EVENT_DROP_RANGE: (f64, f64) = (40.0, 95.0);
pub const EVENT_SLOPE_RANGE: (f64, f64) = (2.0, 16.0);
pub const RECOVERY_MONTHS_RANGE: (i64, i64) = (2, 24);
pub const IMPACT_RANGE: (i64, i64) = (-90, 0);
pub const RESILIENCE_IMPACT_RANGE: (i64, i64) = (-60, 20);
/// Months plotted on the yearly performance chart.
pub const PERF_MONTHS: usize = 12;

const ACTION_ITEMS: [&str; 3] = [
    "Revisar y realinear la estrategia con la misión organizacional.",
    "Fortalecer los controles operativos en procesos críticos.",
    "Implementar un programa de monitoreo de cumplimiento proactivo.",
];

/// Strategic posture; unknown labels are treated as balanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Posture {
    Conservative,
    Balanced,
    Aggressive,
}

impl Posture {
    pub fn from_label(label: &str) -> Self {
        match label {
            "conservador" => Posture::Conservative,
            "agresivo" => Posture::Aggressive,
            _ => Posture::Balanced,
        }
    }

    /// Signed factor shared by most formulas: -1, 0 or +1.
    pub fn factor(self) -> f64 {
        match self {
            Posture::Conservative => -1.0,
            Posture::Balanced => 0.0,
            Posture::Aggressive => 1.0,
        }
    }

    /// Extra exposure of compliance risk under an aggressive posture.
    fn compliance_push(self) -> f64 {
        if self == Posture::Aggressive {
            6.0
        } else {
            0.0
        }
    }

    fn culture_offset(self) -> f64 {
        match self {
            Posture::Conservative => 8.0,
            Posture::Aggressive => -4.0,
            Posture::Balanced => 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Inputs {
    /// Risk appetite, 0..10.
    pub appetite: f64,
    /// Investment in risk management, 0..10.
    pub investment: f64,
    /// Event severity, 1..10.
    pub severity: f64,
    /// Response speed, 1..10.
    pub response: f64,
    pub posture: Posture,
    pub scenario: String,
}

impl Inputs {
    pub fn from_controls(controls: &ControlSet) -> Result<Self, PanelError> {
        Ok(Self {
            appetite: controls.number(APPETITE)?,
            investment: controls.number(INVESTMENT)?,
            severity: controls.number(SEVERITY)?,
            response: controls.number(RESPONSE)?,
            posture: Posture::from_label(controls.label(POSTURE)?),
            scenario: controls.label(SCENARIO)?.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrategicKpis {
    pub mission: i64,
    pub growth: i64,
    pub resilience: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioOutcome {
    pub impact_pct: i64,
    pub recovery_months: i64,
    pub resilience_impact: i64,
    pub normal: [f64; 7],
    pub event: [f64; 7],
}

/// One risk category on the impact/probability map.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatCell {
    pub probability: i64,
    pub impact: i64,
    pub bubble: Bubble,
}

impl HeatCell {
    fn new(probability: i64, impact: i64, divisor: f64, radius: (i64, i64)) -> Self {
        let p = probability as f64;
        let i = impact as f64;
        Self {
            probability,
            impact,
            bubble: Bubble {
                x: i,
                y: round_clamp(p / 12.5, 0, 8) as f64,
                r: round_clamp((p / 10.0) * (i / 10.0) / divisor, radius.0, radius.1) as f64,
            },
        }
    }

    pub fn caption(&self) -> String {
        format!("{}% / {}%", self.probability, self.impact)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FinalKpis {
    pub response: i64,
    pub process: i64,
    pub culture: i64,
    pub erm: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    pub strategic: StrategicKpis,
    pub position: Point,
    pub framework: [f64; 5],
    pub scenario: ScenarioOutcome,
    pub lessons: Vec<String>,
    /// Strategic, operational, compliance.
    pub heat: [HeatCell; 3],
    pub actions: Vec<String>,
    pub kpis: FinalKpis,
    pub risk_index: Vec<f64>,
    pub real_performance: Vec<f64>,
}

pub fn derive(inputs: &Inputs) -> Outputs {
    let ap = inputs.appetite;
    let inv = inputs.investment;
    let sev = inputs.severity;
    let rsp = inputs.response;
    let f = inputs.posture.factor();

    let strategic = StrategicKpis {
        mission: round_clamp(55.0 + inv * 3.0 - ap * 2.0 - f * 3.0, 0, 100),
        growth: round_clamp(45.0 + ap * 4.0 + f * 6.0 - inv * 1.5, 0, 100),
        resilience: round_clamp(40.0 + inv * 4.0 - ap * 2.2 - f * 3.0, 0, 100),
    };

    let position = Point {
        x: clamp(2.0 + ap * 0.6, 0.0, 10.0),
        y: clamp(3.0 + strategic.growth as f64 * 0.07, 0.0, 10.0),
    };

    let base = clamp(55.0 + inv * 2.0 - ap * 1.2, 0.0, 100.0);
    let framework = [10.0, 6.0, 2.0, 0.0, 4.0].map(|d| clamp(base + d, 0.0, 100.0));

    let scenario = ScenarioOutcome {
        impact_pct: round_clamp(-(sev * 6.0 + ap * 1.2), IMPACT_RANGE.0, IMPACT_RANGE.1),
        recovery_months: round_clamp(
            12.0 + sev - rsp * 1.2,
            RECOVERY_MONTHS_RANGE.0,
            RECOVERY_MONTHS_RANGE.1,
        ),
        resilience_impact: round_clamp(
            -(sev * 3.0 + f * 4.0) + inv * 2.0,
            RESILIENCE_IMPACT_RANGE.0,
            RESILIENCE_IMPACT_RANGE.1,
        ),
        normal: NORMAL_PATH,
        event: event_path(sev, rsp),
    };

    let lessons = vec![
        format!("Escenario: {}.", inputs.scenario.replace('_', " ")),
        format!(
            "Impacto estimado: {}%. Revisar planes de mitigación.",
            scenario.impact_pct
        ),
        format!(
            "Tiempo de recuperación estimado: {} meses.",
            scenario.recovery_months
        ),
        format!(
            "Velocidad de respuesta actual: {}. Mejorar respuesta reduce el tiempo de recuperación.",
            panel_core::format_number(rsp)
        ),
    ];

    let push = inputs.posture.compliance_push();
    let heat = [
        HeatCell::new(
            round_clamp(50.0 + ap * 4.0 + f * 8.0, 0, 100),
            round_clamp(60.0 + ap * 3.0 + f * 6.0, 0, 100),
            3.0,
            (6, 18),
        ),
        HeatCell::new(
            round_clamp(35.0 + ap * 2.0, 0, 100),
            round_clamp(45.0 + sev * 2.0, 0, 100),
            4.0,
            (5, 16),
        ),
        HeatCell::new(
            round_clamp(25.0 - inv + push, 0, 100),
            round_clamp(40.0 + push, 0, 100),
            5.0,
            (4, 14),
        ),
    ];

    let kpis = FinalKpis {
        response: round_clamp(50.0 + rsp * 5.0, 0, 100),
        process: round_clamp(60.0 + inv * 3.0 - sev * 1.5, 0, 100),
        culture: round_clamp(55.0 + inputs.posture.culture_offset(), 0, 100),
        erm: round_clamp(50.0 + inv * 4.0 - ap * 1.5, 0, 100),
    };

    let base_risk = clamp(95.0 + ap * 0.8 + sev * 0.6, 70.0, 110.0);
    let base_real = clamp(82.0 + strategic.growth as f64 * 0.2 + inv * 1.2, 70.0, 110.0);
    let risk_index = (0..PERF_MONTHS)
        .map(|i| round_clamp(base_risk - i as f64 * 1.8, 60, 115) as f64)
        .collect();
    let real_performance = (0..PERF_MONTHS)
        .map(|i| round_clamp(base_real + i as f64 * 1.6 - sev * 0.4, 60, 120) as f64)
        .collect();

    Outputs {
        strategic,
        position,
        framework,
        scenario,
        lessons,
        heat,
        actions: ACTION_ITEMS.iter().map(|s| s.to_string()).collect(),
        kpis,
        risk_index,
        real_performance,
    }
}

/// Stressed performance path: an initial drop set by severity, then a
/// recovery where each month adds a response-driven slope to the previous one.
pub fn event_path(severity: f64, response: f64) -> [f64; 7] {
    let (lo, hi) = EVENT_PATH_RANGE;
    let drop = clamp(100.0 - severity * 8.0, EVENT_DROP_RANGE.0, EVENT_DROP_RANGE.1);
    let slope = clamp(
        2.0 + response * 1.2,
        EVENT_SLOPE_RANGE.0,
        EVENT_SLOPE_RANGE.1,
    );
    let mut path = [0.0; 7];
    path[0] = 100.0;
    path[1] = drop;
    for i in 2..path.len() {
        path[i] = clamp(path[i - 1] + slope, lo, hi);
    }
    path
}

impl Outputs {
    pub fn updates(&self) -> Vec<Update> {
        let s = &self.strategic;
        let sc = &self.scenario;
        let k = &self.kpis;
        let mut updates = vec![
            Update::text(KPI_MISSION, s.mission.to_string()),
            Update::text(KPI_GROWTH, s.growth.to_string()),
            Update::text(KPI_RESILIENCE, s.resilience.to_string()),
            Update::series(CHART_SCATTER, SeriesData::Points(vec![self.position])),
            Update::series(CHART_RADAR, SeriesData::Values(self.framework.to_vec())),
            Update::text(SCENARIO_IMPACT, sc.impact_pct.to_string()),
            Update::text(SCENARIO_RECOVERY, sc.recovery_months.to_string()),
            Update::text(SCENARIO_RESILIENCE, sc.resilience_impact.to_string()),
            Update::chart(
                CHART_LINE,
                vec![
                    SeriesPatch::new(0, SeriesData::Values(sc.normal.to_vec())),
                    SeriesPatch::new(1, SeriesData::Values(sc.event.to_vec())),
                ],
            ),
            Update::list(LESSONS, self.lessons.clone()),
        ];
        updates.extend(
            HEAT_TEXTS
                .iter()
                .zip(&self.heat)
                .map(|(t, cell)| Update::text(t, cell.caption())),
        );
        updates.push(Update::chart(
            CHART_HEAT,
            self.heat
                .iter()
                .enumerate()
                .map(|(i, cell)| SeriesPatch::new(i, SeriesData::Bubbles(vec![cell.bubble])))
                .collect(),
        ));
        updates.extend([
            Update::list(ACTIONS, self.actions.clone()),
            Update::text(KPI_RESPONSE, k.response.to_string()),
            Update::text(KPI_PROCESS, k.process.to_string()),
            Update::text(KPI_CULTURE, k.culture.to_string()),
            Update::text(KPI_ERM, k.erm.to_string()),
            Update::series(
                CHART_KPIS,
                SeriesData::ints([k.response, k.process, k.culture, k.erm]),
            ),
            Update::chart(
                CHART_PERF,
                vec![
                    SeriesPatch::new(0, SeriesData::Values(self.risk_index.clone())),
                    SeriesPatch::new(1, SeriesData::Values(self.real_performance.clone())),
                ],
            ),
        ]);
        updates
    }
}

fn values(v: &[f64]) -> SeriesData {
    SeriesData::Values(v.to_vec())
}

fn chart_specs() -> Vec<(&'static str, ChartSpec)> {
    let radar = ChartSpec::new(
        ChartKind::Radar,
        &[
            "Gobernanza y Cultura",
            "Estrategia y Objetivos",
            "Rendimiento",
            "Revisión y Monitoreo",
            "Información y Comunicación",
        ],
        ChartOptions::radar(0.0, 100.0, true),
    )
    .with_series(SeriesSpec::labelled(
        "Importancia en el marco",
        values(&[70.0, 65.0, 60.0, 58.0, 62.0]),
        SeriesStyle::area(SKY, SKY_FILL),
    ));

    let scatter = ChartSpec::new(
        ChartKind::Scatter,
        &[],
        ChartOptions::cartesian(
            Axis::plain().titled("Nivel de riesgo"),
            Axis::plain().titled("Retorno"),
        ),
    )
    .with_series(SeriesSpec::labelled(
        "Estrategia actual",
        SeriesData::Points(vec![Point { x: 4.5, y: 6.5 }]),
        SeriesStyle::dots(INDIGO),
    ))
    .with_series(SeriesSpec::labelled(
        "Estrategias alternativas",
        SeriesData::Points(vec![
            Point { x: 3.2, y: 5.0 },
            Point { x: 5.6, y: 7.8 },
            Point { x: 6.8, y: 8.6 },
        ]),
        SeriesStyle::dots(EMERALD),
    ));

    let line = ChartSpec::new(
        ChartKind::Line,
        &["Inicio", "Mes 1", "Mes 2", "Mes 3", "Mes 4", "Mes 5", "Mes 6"],
        ChartOptions::cartesian(Axis::plain(), Axis::suggested(50.0, 120.0)),
    )
    .with_series(SeriesSpec::labelled(
        "Rendimiento normal",
        values(&NORMAL_PATH),
        SeriesStyle {
            fill: vec![EMERALD_FILL],
            ..SeriesStyle::line(EMERALD)
        },
    ))
    .with_series(SeriesSpec::labelled(
        "Rendimiento con evento",
        values(&[100.0, 80.0, 70.0, 72.0, 78.0, 85.0, 92.0]),
        SeriesStyle {
            fill: vec![ROSE_FILL],
            ..SeriesStyle::line(ROSE)
        },
    ));

    let bubble = |label: &str, b: Bubble, color| {
        SeriesSpec::labelled(label, SeriesData::Bubbles(vec![b]), SeriesStyle::dots(color))
    };
    let heat = ChartSpec::new(
        ChartKind::Bubble,
        &[],
        ChartOptions::cartesian(
            Axis::bounded(0.0, 100.0).titled("Impacto"),
            Axis::bounded(0.0, 8.0).titled("Probabilidad"),
        ),
    )
    .with_series(bubble(
        "Estratégico",
        Bubble {
            x: 85.0,
            y: 7.0,
            r: 14.0,
        },
        ROSE,
    ))
    .with_series(bubble(
        "Operacional",
        Bubble {
            x: 60.0,
            y: 5.0,
            r: 10.0,
        },
        AMBER,
    ))
    .with_series(bubble(
        "Cumplimiento",
        Bubble {
            x: 40.0,
            y: 3.0,
            r: 8.0,
        },
        EMERALD,
    ));

    let kpis = ChartSpec::new(
        ChartKind::Bar,
        &[
            "Capacidad de Respuesta",
            "Madurez de Procesos",
            "Cultura de Riesgo",
            "Efectividad de ERM",
        ],
        ChartOptions::horizontal_bar(100.0),
    )
    .with_series(SeriesSpec::labelled(
        "Nivel",
        values(&[70.0, 82.0, 65.0, 78.0]),
        SeriesStyle::bars(vec![INDIGO, AMBER, EMERALD, SKY]),
    ));

    let perf = ChartSpec::new(
        ChartKind::Line,
        &[
            "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
        ],
        ChartOptions::cartesian(Axis::plain(), Axis::suggested(70.0, 110.0)),
    )
    .with_series(SeriesSpec::labelled(
        "Índice de riesgo",
        values(&[
            95.0, 96.0, 96.0, 94.0, 92.0, 90.0, 88.0, 86.0, 84.0, 82.0, 80.0, 78.0,
        ]),
        SeriesStyle::line(ROSE),
    ))
    .with_series(SeriesSpec::labelled(
        "Rendimiento real",
        values(&[
            85.0, 87.0, 86.0, 89.0, 91.0, 93.0, 95.0, 97.0, 99.0, 101.0, 103.0, 104.0,
        ]),
        SeriesStyle::line(INDIGO),
    ))
    .with_series(SeriesSpec::labelled(
        "Objetivo de rendimiento",
        values(&[
            88.0, 88.0, 88.0, 89.0, 90.0, 91.0, 92.0, 93.0, 94.0, 95.0, 96.0, 97.0,
        ]),
        SeriesStyle::line(EMERALD),
    ));

    vec![
        (CHART_RADAR, radar),
        (CHART_SCATTER, scatter),
        (CHART_LINE, line),
        (CHART_HEAT, heat),
        (CHART_KPIS, kpis),
        (CHART_PERF, perf),
    ]
}

pub struct Erm;

impl PanelModel for Erm {
    fn id(&self) -> &'static str {
        "erm"
    }

    fn title(&self) -> &'static str {
        "Gestión integral de riesgos"
    }

    fn controls(&self) -> Vec<BoundedControl> {
        [
            BoundedControl::numeric(APPETITE, 0.0, 10.0, 5.0),
            BoundedControl::numeric(INVESTMENT, 0.0, 10.0, 5.0),
            BoundedControl::numeric(SEVERITY, 1.0, 10.0, 5.0),
            BoundedControl::numeric(RESPONSE, 1.0, 10.0, 5.0),
            BoundedControl::select(
                POSTURE,
                &["conservador", "equilibrado", "agresivo"],
                "equilibrado",
            ),
            BoundedControl::select(SCENARIO, &SCENARIOS, SCENARIOS[0]),
        ]
        .into_iter()
        .filter_map(Result::ok)
        .collect()
    }

    fn targets(&self) -> Vec<TargetDecl> {
        let mut targets: Vec<TargetDecl> = chart_specs()
            .into_iter()
            .map(|(id, spec)| TargetDecl::chart(id, spec))
            .collect();
        targets.extend(
            [
                KPI_MISSION,
                KPI_GROWTH,
                KPI_RESILIENCE,
                SCENARIO_IMPACT,
                SCENARIO_RECOVERY,
                SCENARIO_RESILIENCE,
                HEAT_TEXTS[0],
                HEAT_TEXTS[1],
                HEAT_TEXTS[2],
                KPI_RESPONSE,
                KPI_PROCESS,
                KPI_CULTURE,
                KPI_ERM,
            ]
            .into_iter()
            .map(TargetDecl::text),
        );
        targets.push(TargetDecl::list(LESSONS));
        targets.push(TargetDecl::list(ACTIONS));
        targets
    }

    fn recompute(&self, controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(derive(&Inputs::from_controls(controls)?).updates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(appetite: f64, investment: f64, severity: f64, response: f64, posture: &str) -> Inputs {
        Inputs {
            appetite,
            investment,
            severity,
            response,
            posture: Posture::from_label(posture),
            scenario: "crisis_financiera".into(),
        }
    }

    #[test]
    fn balanced_defaults() {
        let out = derive(&inputs(5.0, 5.0, 5.0, 5.0, "equilibrado"));
        assert_eq!(
            out.strategic,
            StrategicKpis {
                mission: 60,
                growth: 58,
                resilience: 49
            }
        );
        assert_eq!(out.scenario.impact_pct, -36);
        assert_eq!(out.scenario.recovery_months, 11);
        assert_eq!(out.scenario.resilience_impact, -5);
        assert_eq!(
            out.kpis,
            FinalKpis {
                response: 75,
                process: 68,
                culture: 57,
                erm: 63
            }
        );
        assert_eq!(out.framework, [69.0, 65.0, 61.0, 59.0, 63.0]);
    }

    #[test]
    fn event_path_is_seeded_by_drop_and_climbs_by_slope() {
        // drop = 100 - 5*8 = 60, slope = 2 + 5*1.2 = 8
        assert_eq!(
            event_path(5.0, 5.0),
            [100.0, 60.0, 68.0, 76.0, 84.0, 92.0, 100.0]
        );
        // worst severity bottoms out at the floor, fastest response caps the slope
        let p = event_path(10.0, 10.0);
        assert_eq!(p[1], 40.0);
        assert_eq!(p[2], 54.0);
        assert_eq!(p[6], 110.0);
        // mild event recovers into the ceiling
        assert_eq!(event_path(1.0, 10.0)[6], 112.0);
    }

    #[test]
    fn heat_cells_and_captions() {
        let out = derive(&inputs(5.0, 5.0, 5.0, 5.0, "equilibrado"));
        assert_eq!(out.heat[0].caption(), "70% / 75%");
        assert_eq!(out.heat[1].caption(), "45% / 55%");
        assert_eq!(out.heat[2].caption(), "20% / 40%");
        assert_eq!(
            out.heat[0].bubble,
            Bubble {
                x: 75.0,
                y: 6.0,
                r: 18.0
            }
        );
        assert_eq!(out.heat[2].bubble.r, 4.0);
    }

    #[test]
    fn aggressive_posture_raises_compliance_exposure() {
        let calm = derive(&inputs(5.0, 5.0, 5.0, 5.0, "conservador"));
        let bold = derive(&inputs(5.0, 5.0, 5.0, 5.0, "agresivo"));
        assert_eq!(calm.heat[2].caption(), "20% / 40%");
        assert_eq!(bold.heat[2].caption(), "26% / 46%");
        assert_eq!(calm.kpis.culture, 63);
        assert_eq!(bold.kpis.culture, 51);
    }

    #[test]
    fn unknown_posture_falls_back_to_balanced() {
        assert_eq!(Posture::from_label("temerario"), Posture::Balanced);
        let a = derive(&inputs(3.0, 7.0, 2.0, 9.0, "temerario"));
        let b = derive(&inputs(3.0, 7.0, 2.0, 9.0, "equilibrado"));
        assert_eq!(a, b);
    }

    #[test]
    fn lessons_describe_the_scenario() {
        let mut i = inputs(5.0, 5.0, 5.0, 5.0, "equilibrado");
        i.scenario = "disrupcion_cadena".into();
        let out = derive(&i);
        assert_eq!(out.lessons.len(), 4);
        assert_eq!(out.lessons[0], "Escenario: disrupcion cadena.");
        assert_eq!(
            out.lessons[1],
            "Impacto estimado: -36%. Revisar planes de mitigación."
        );
        assert_eq!(out.lessons[2], "Tiempo de recuperación estimado: 11 meses.");
        assert!(out.lessons[3].starts_with("Velocidad de respuesta actual: 5."));
        assert_eq!(out.actions.len(), 3);
    }

    #[test]
    fn performance_lines_have_twelve_months() {
        let out = derive(&inputs(5.0, 5.0, 5.0, 5.0, "equilibrado"));
        assert_eq!(out.risk_index.len(), PERF_MONTHS);
        assert_eq!(out.real_performance.len(), PERF_MONTHS);
        // base risk = 95 + 4 + 3 = 102, declining 1.8 per month
        assert_eq!(out.risk_index[0], 102.0);
        assert_eq!(out.risk_index[11], 82.0);
    }

    #[test]
    fn objective_line_is_never_patched() {
        let out = derive(&inputs(5.0, 5.0, 5.0, 5.0, "equilibrado"));
        let perf = out
            .updates()
            .into_iter()
            .find(|u| u.target().as_str() == CHART_PERF)
            .unwrap();
        match perf {
            Update::Chart { patches, .. } => {
                assert!(patches.iter().all(|p| p.index < 2));
            }
            other => panic!("unexpected update {other:?}"),
        }
    }
}
