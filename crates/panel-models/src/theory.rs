//! Static concept charts for the theory view (G1..G9).

use panel_core::palette::{
    AMBER, EMERALD, INDIGO, INDIGO_FILL, PURPLE, ROSE, SKY,
};
use panel_core::{
    BoundedControl, ChartKind, ChartOptions, ChartSpec, ControlSet, PanelError, PanelModel,
    SeriesData, SeriesSpec, SeriesStyle, TargetDecl, Update,
};

fn values(v: &[f64]) -> SeriesData {
    SeriesData::Values(v.to_vec())
}

fn bar_chart(labels: &[&str], data: &[f64], options: ChartOptions, fill: Vec<panel_core::Color>) -> ChartSpec {
    ChartSpec::new(ChartKind::Bar, labels, options)
        .with_series(SeriesSpec::new(values(data), SeriesStyle::bars(fill)))
}

fn donut_chart(labels: &[&str], data: &[f64], fill: Vec<panel_core::Color>) -> ChartSpec {
    ChartSpec::new(ChartKind::Donut, labels, ChartOptions::donut(68))
        .with_series(SeriesSpec::new(values(data), SeriesStyle::slices(fill)))
}

const ERM_COMPONENTS: [&str; 5] = [
    "Gobernanza y Cultura",
    "Estrategia y Obj.",
    "Rendimiento",
    "Revisión",
    "Info/Com/Informes",
];

/// Every theory chart with its target id.
pub fn charts() -> Vec<(&'static str, ChartSpec)> {
    vec![
        (
            "g1_componentes",
            bar_chart(
                &[
                    "Entorno de control",
                    "Evaluación de riesgos",
                    "Actividad de control",
                    "Información y comunicación",
                    "Actividades de supervisión",
                ],
                &[30.0, 20.0, 20.0, 15.0, 15.0],
                ChartOptions::bar(40.0),
                vec![INDIGO, EMERALD, AMBER, PURPLE, ROSE],
            ),
        ),
        (
            "g2_etico",
            donut_chart(
                &[
                    "Liderazgo ejemplar",
                    "Formalización",
                    "Evaluación continua",
                    "Acciones correctivas",
                ],
                &[35.0, 30.0, 20.0, 15.0],
                vec![INDIGO, EMERALD, AMBER, ROSE],
            ),
        ),
        (
            "g3_independencia",
            bar_chart(
                &[
                    "Identificación de responsabilidades",
                    "Competencia del Consejo",
                    "Independencia",
                    "Supervisión efectiva",
                ],
                &[85.0, 75.0, 80.0, 90.0],
                ChartOptions::horizontal_bar(100.0),
                vec![SKY, PURPLE, INDIGO, EMERALD],
            ),
        ),
        (
            "g4_tres_lineas",
            ChartSpec::new(
                ChartKind::Radar,
                &["Primera", "Segunda", "Tercera", "Comunicación", "Supervisión"],
                ChartOptions::radar(0.0, 100.0, true),
            )
            .with_series(SeriesSpec::labelled(
                "Efectividad",
                values(&[90.0, 75.0, 85.0, 90.0, 80.0]),
                SeriesStyle {
                    border_width: Some(2),
                    ..SeriesStyle::area(INDIGO, INDIGO_FILL)
                },
            )),
        ),
        (
            "g5_impacto_riesgo",
            bar_chart(
                &["Financiero", "Operacional", "Reputación", "Cumplimiento", "Estratégico"],
                &[84.0, 78.0, 86.0, 62.0, 80.0],
                ChartOptions::bar(100.0),
                vec![INDIGO, EMERALD, ROSE, AMBER, PURPLE],
            ),
        ),
        (
            "g6_riesgos_categoria",
            bar_chart(
                &[
                    "Estratégicos",
                    "Operacionales",
                    "Financieros",
                    "Cumplimiento",
                    "Tecnológicos",
                    "Reputacionales",
                ],
                &[25.0, 40.0, 30.0, 20.0, 35.0, 15.0],
                ChartOptions::horizontal_bar(45.0),
                vec![PURPLE, EMERALD, INDIGO, AMBER, SKY, ROSE],
            ),
        ),
        (
            "g7_info",
            donut_chart(
                &["Comprensibles", "Útil", "Pertinente", "Confiable", "Relevante"],
                &[20.0; 5],
                vec![INDIGO, EMERALD, AMBER, PURPLE, ROSE],
            ),
        ),
        (
            "g8_erm_componentes",
            ChartSpec::new(ChartKind::Bar, &ERM_COMPONENTS, ChartOptions::bar(30.0)).with_series(
                SeriesSpec::labelled(
                    "Peso conceptual",
                    values(&[22.0, 20.0, 22.0, 18.0, 18.0]),
                    SeriesStyle::bars(vec![INDIGO, EMERALD, AMBER, PURPLE, SKY]),
                ),
            ),
        ),
        (
            "g9_erm_principios",
            ChartSpec::new(
                ChartKind::Bar,
                &ERM_COMPONENTS,
                ChartOptions::horizontal_bar(6.0),
            )
            .with_series(SeriesSpec::labelled(
                "N° de principios",
                values(&[5.0, 4.0, 5.0, 3.0, 3.0]),
                SeriesStyle::bars(vec![INDIGO, EMERALD, AMBER, PURPLE, SKY]),
            )),
        ),
    ]
}

/// The theory gallery as a panel without controls.
pub struct TheoryGallery;

impl PanelModel for TheoryGallery {
    fn id(&self) -> &'static str {
        "theory"
    }

    fn title(&self) -> &'static str {
        "Marco conceptual"
    }

    fn controls(&self) -> Vec<BoundedControl> {
        Vec::new()
    }

    fn targets(&self) -> Vec<TargetDecl> {
        charts()
            .into_iter()
            .map(|(id, spec)| TargetDecl::chart(id, spec))
            .collect()
    }

    fn recompute(&self, _controls: &ControlSet) -> Result<Vec<Update>, PanelError> {
        Ok(Vec::new())
    }
}
