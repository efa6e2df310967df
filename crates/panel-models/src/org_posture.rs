//! Estimated control effectiveness from organization size, technology level
//! and available resources.

use panel_core::palette::{EMERALD, EMERALD_FILL, GAP, INDIGO};
use panel_core::{
    round_clamp, BoundedControl, ChartKind, ChartOptions, ChartSpec, ControlSet, Legend,
    PanelError, PanelModel, SeriesData, SeriesSpec, SeriesStyle, TargetDecl, Update,
};

pub const SIZE: &str = "s4_tipo";
pub const TECH: &str = "s4_tec";
pub const RESOURCES: &str = "s4_recursos";

pub const DONUT: &str = "chart_s4_donut";
pub const RADAR: &str = "chart_s4_radar";
pub const EFFECTIVENESS: &str = "s4_eff";

pub const RESOURCE_WEIGHT: f64 = 0.7;
pub const BASELINE: f64 = 30.0;
/// Offset applied by a non-neutral size or technology choice.
pub const MODIFIER_STEP: i64 = 6;
/// Fixed radar offsets for risk, information and supervision axes.
pub const RADAR_OFFSETS: [i64; 3] = [-4, -6, -2];

/// Organization size; unknown labels are treated as medium.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrgSize {
    Small,
    Medium,
    Large,
}

impl OrgSize {
    pub fn from_label(label: &str) -> Self {
        match label {
            "pequena" => OrgSize::Small,
            "grande" => OrgSize::Large,
            _ => OrgSize::Medium,
        }
    }

    pub fn offset(self) -> i64 {
        match self {
            OrgSize::Small => -MODIFIER_STEP,
            OrgSize::Medium => 0,
            OrgSize::Large => MODIFIER_STEP,
        }
    }
}

/// Technology level; unknown labels are treated as medium.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TechLevel {
    Low,
    Medium,
    High,
}

impl TechLevel {
    pub fn from_label(label: &str) -> Self {
        match label {
            "bajo" => TechLevel::Low,
            "alto" => TechLevel::High,
            _ => TechLevel::Medium,
        }
    }

    pub fn offset(self) -> i64 {
        match self {
            TechLevel::Low => -MODIFIER_STEP,
            TechLevel::Medium => 0,
            TechLevel::High => MODIFIER_STEP,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Inputs {
    pub size: OrgSize,
    pub tech: TechLevel,
    pub resources: f64,
}

impl Inputs {
    pub fn from_controls(controls: &ControlSet) -> Result<Self, PanelError> {
        Ok(Self {
            size: OrgSize::from_label(controls.label(SIZE)?),
            tech: TechLevel::from_label(controls.label(TECH)?),
            resources: controls.number(RESOURCES)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    pub effectiveness: i64,
    pub gap: i64,
    /// Environment, risks, control, info/com, supervision.
    pub profile: [i64; 5],
}

pub fn derive(inputs: &Inputs) -> Outputs {
    let size = inputs.size.offset();
    let tech = inputs.tech.offset();
    let eff = round_clamp(
        inputs.resources * RESOURCE_WEIGHT + BASELINE + (size + tech) as f64,
        0,
        100,
    );
    let [risk, info, supervision] = RADAR_OFFSETS;
    Outputs {
        effectiveness: eff,
        gap: 100 - eff,
        profile: [
            (eff + size).clamp(0, 100),
            (eff + risk).clamp(0, 100),
            (eff + tech).clamp(0, 100),
            (eff + info).clamp(0, 100),
            (eff + supervision).clamp(0, 100),
        ],
    }
}

impl Outputs {
    pub fn updates(&self) -> Vec<Update> {
        vec![
            Update::series(DONUT, SeriesData::ints([self.effectiveness, self.gap])),
            Update::series(RADAR, SeriesData::ints(self.profile)),
            Update::text(EFFECTIVENESS, self.effectiveness.to_string()),
        ]
    }
}

pub struct OrgPosture;

impl PanelModel for OrgPosture {
    fn id(&self) -> &'static str {
        "org_posture"
    }

    fn title(&self) -> &'static str {
        "Parámetros de la organización"
    }

    fn controls(&self) -> Vec<BoundedControl> {
        [
            BoundedControl::select(SIZE, &["pequena", "mediana", "grande"], "mediana"),
            BoundedControl::select(TECH, &["bajo", "medio", "alto"], "medio"),
            BoundedControl::numeric(RESOURCES, 0.0, 100.0, 50.0),
        ]
        .into_iter()
        .filter_map(Result::ok)
        .collect()
    }

    fn targets(&self) -> Vec<TargetDecl> {
        let mut donut_options = ChartOptions::donut(72);
        donut_options.legend = Legend::Hidden;
        let donut = ChartSpec::new(
            ChartKind::Donut,
            &["Efectividad estimada", "Brecha"],
            donut_options,
        )
        .with_series(SeriesSpec::new(
            SeriesData::Values(vec![60.0, 40.0]),
            SeriesStyle::slices(vec![INDIGO, GAP]),
        ));
        let radar = ChartSpec::new(
            ChartKind::Radar,
            &["Entorno", "Riesgos", "Control", "Info/Com", "Supervisión"],
            ChartOptions::radar(0.0, 100.0, false),
        )
        .with_series(SeriesSpec::labelled(
            "Resultado",
            SeriesData::Values(vec![62.0, 58.0, 60.0, 55.0, 57.0]),
            SeriesStyle::area(EMERALD, EMERALD_FILL),
        ));
        vec![
            TargetDecl::chart(DONUT, donut),
            TargetDecl::chart(RADAR, radar),
            TargetDecl::text(EFFECTIVENESS),
        ]
    }

    fn recompute(&self, controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(derive(&Inputs::from_controls(controls)?).updates())
    }
}
