//! Relative importance of the five control components against a typical
//! implementation level.

use panel_core::palette::{EMERALD, EMERALD_FILL, INDIGO, INDIGO_FILL};
use panel_core::{
    round_clamp, BoundedControl, ChartKind, ChartOptions, ChartSpec, ControlSet, PanelError,
    PanelModel, SeriesData, SeriesPatch, SeriesSpec, SeriesStyle, TargetDecl, Update,
};

pub const CONTROLS: [&str; 5] = [
    "s1_entorno",
    "s1_riesgos",
    "s1_actividades",
    "s1_info",
    "s1_supervision",
];
const DEFAULTS: [f64; 5] = [80.0, 70.0, 90.0, 75.0, 65.0];
pub const CHART: &str = "chart_s1_radar";

/// Typical implementation reaches this share of the stated importance.
pub const IMPLEMENTATION_RATIO: f64 = 0.85;

const LABELS: [&str; 5] = [
    "Entorno de control",
    "Administración de riesgos",
    "Actividades de control",
    "Información y comunicación",
    "Actividades de supervisión",
];

#[derive(Clone, Debug, PartialEq)]
pub struct Inputs {
    pub importance: [f64; 5],
}

impl Inputs {
    pub fn from_controls(controls: &ControlSet) -> Result<Self, PanelError> {
        Ok(Self {
            importance: controls.numbers(CONTROLS)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    pub importance: [f64; 5],
    pub implementation: [i64; 5],
}

pub fn derive(inputs: &Inputs) -> Outputs {
    Outputs {
        importance: inputs.importance,
        implementation: inputs
            .importance
            .map(|x| round_clamp(x * IMPLEMENTATION_RATIO, 0, 100)),
    }
}

impl Outputs {
    pub fn updates(&self) -> Vec<Update> {
        vec![Update::chart(
            CHART,
            vec![
                SeriesPatch::new(0, SeriesData::Values(self.importance.to_vec())),
                SeriesPatch::new(1, SeriesData::ints(self.implementation)),
            ],
        )]
    }
}

pub struct ComponentRadar;

impl PanelModel for ComponentRadar {
    fn id(&self) -> &'static str {
        "component_radar"
    }

    fn title(&self) -> &'static str {
        "Importancia vs implementación de componentes"
    }

    fn controls(&self) -> Vec<BoundedControl> {
        CONTROLS
            .iter()
            .zip(DEFAULTS)
            .filter_map(|(id, d)| BoundedControl::numeric(id, 0.0, 100.0, d).ok())
            .collect()
    }

    fn targets(&self) -> Vec<TargetDecl> {
        let spec = ChartSpec::new(ChartKind::Radar, &LABELS, ChartOptions::radar(0.0, 100.0, true))
            .with_series(SeriesSpec::labelled(
                "Importancia Relativa",
                SeriesData::Values(vec![80.0, 70.0, 90.0, 75.0, 65.0]),
                SeriesStyle::area(EMERALD, EMERALD_FILL),
            ))
            .with_series(SeriesSpec::labelled(
                "Implementación Típica",
                SeriesData::Values(vec![70.0, 60.0, 85.0, 65.0, 55.0]),
                SeriesStyle::area(INDIGO, INDIGO_FILL),
            ));
        vec![TargetDecl::chart(CHART, spec)]
    }

    fn recompute(&self, controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(derive(&Inputs::from_controls(controls)?).updates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implementation_is_scaled_importance() {
        let out = derive(&Inputs {
            importance: [80.0, 70.0, 90.0, 75.0, 65.0],
        });
        assert_eq!(out.implementation, [68, 60, 77, 64, 55]);
    }

    #[test]
    fn extremes_stay_in_range() {
        let out = derive(&Inputs {
            importance: [0.0, 100.0, 1.0, 99.0, 50.0],
        });
        assert_eq!(out.implementation, [0, 85, 1, 84, 43]);
    }

    #[test]
    fn updates_patch_both_series() {
        let set = ControlSet::new(ComponentRadar.controls());
        let updates = ComponentRadar.recompute(&set).unwrap();
        assert_eq!(updates.len(), 1);
        match &updates[0] {
            Update::Chart { patches, .. } => {
                assert_eq!(patches.len(), 2);
                assert_eq!(patches[1].data, SeriesData::Values(vec![68.0, 60.0, 77.0, 64.0, 55.0]));
            }
            other => panic!("unexpected update {other:?}"),
        }
    }
}
