#![deny(warnings)]

//! Simulation panels of the governance dashboard.
//!
//! Every panel module exposes typed `Inputs`, a pure `derive` function that
//! produces typed `Outputs`, and a [`PanelModel`] implementation that wires
//! those to control ids and render targets:
//! - `component_radar`: component importance vs typical implementation
//! - `objectives`: static objective categories
//! - `residual_risk`: effectiveness, residual risk and advisories
//! - `org_posture`: effectiveness from size, technology and resources
//! - `info_quality`: information quality profile
//! - `monitoring`: monitoring KPIs and advisories
//! - `component_summary`: fixed component snapshot
//! - `erm`: integral enterprise risk management scenario
//! - `theory`: static concept charts

pub mod component_radar;
pub mod component_summary;
pub mod erm;
pub mod info_quality;
pub mod monitoring;
pub mod objectives;
pub mod org_posture;
pub mod residual_risk;
pub mod rules;
pub mod theory;

use panel_core::PanelModel;
use tracing::debug;

/// Every panel of the dashboard, in page order.
pub fn catalog() -> Vec<Box<dyn PanelModel>> {
    let panels: Vec<Box<dyn PanelModel>> = vec![
        Box::new(theory::TheoryGallery),
        Box::new(component_radar::ComponentRadar),
        Box::new(objectives::Objectives),
        Box::new(residual_risk::ResidualRisk),
        Box::new(org_posture::OrgPosture),
        Box::new(info_quality::InfoQuality),
        Box::new(monitoring::Monitoring),
        Box::new(component_summary::ComponentSummary),
        Box::new(erm::Erm),
    ];
    debug!(count = panels.len(), "panel catalog built");
    panels
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::{ControlSet, Update};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[test]
    fn catalog_ids_and_targets_are_unique() {
        let mut panel_ids = BTreeSet::new();
        let mut targets = BTreeSet::new();
        let mut controls = BTreeSet::new();
        for p in catalog() {
            assert!(panel_ids.insert(p.id()), "duplicate panel {}", p.id());
            for t in p.targets() {
                assert!(targets.insert(t.id().clone()), "duplicate target {}", t.id());
            }
            for c in p.controls() {
                assert!(controls.insert(c.id().clone()), "duplicate control {}", c.id());
            }
        }
        assert_eq!(panel_ids.len(), 9);
        // 5 + 6 + 3 + 6 + 7 + 6 controls
        assert_eq!(controls.len(), 33);
    }

    #[test]
    fn default_updates_only_address_declared_targets() {
        for p in catalog() {
            let declared: BTreeSet<_> = p.targets().iter().map(|t| t.id().clone()).collect();
            let updates = p.recompute(&ControlSet::new(p.controls())).unwrap();
            for u in updates {
                assert!(declared.contains(u.target()), "{}: {}", p.id(), u.target());
            }
        }
    }

    #[test]
    fn chart_patches_match_declared_series() {
        for p in catalog() {
            let targets = p.targets();
            for u in p.recompute(&ControlSet::new(p.controls())).unwrap() {
                if let Update::Chart { target, patches } = u {
                    let spec = targets
                        .iter()
                        .find_map(|t| match t {
                            panel_core::TargetDecl::Chart { id, spec } if *id == target => {
                                Some(spec)
                            }
                            _ => None,
                        })
                        .unwrap();
                    for patch in patches {
                        let series = &spec.series[patch.index];
                        assert_eq!(series.data.len(), patch.data.len(), "{target}");
                    }
                }
            }
        }
    }

    fn erm_inputs() -> impl Strategy<Value = erm::Inputs> {
        (
            0u8..=10,
            0u8..=10,
            1u8..=10,
            1u8..=10,
            prop::sample::select(vec!["conservador", "equilibrado", "agresivo", "otro"]),
        )
            .prop_map(|(ap, inv, sev, rsp, posture)| erm::Inputs {
                appetite: ap as f64,
                investment: inv as f64,
                severity: sev as f64,
                response: rsp as f64,
                posture: erm::Posture::from_label(posture),
                scenario: erm::SCENARIOS[0].to_string(),
            })
    }

    proptest! {
        #[test]
        fn residual_risk_outputs_bounded(c in prop::array::uniform5(0u8..=100), compl in 0u8..=100) {
            let out = residual_risk::derive(&residual_risk::Inputs {
                components: c.map(f64::from),
                complexity: compl as f64,
            });
            prop_assert!((0..=100).contains(&out.effectiveness));
            prop_assert!((0..=100).contains(&out.residual_risk));
            prop_assert!(!out.recommendations.is_empty());
        }

        #[test]
        fn org_posture_outputs_bounded(rec in 0u8..=100,
                                       size in prop::sample::select(vec!["pequena", "mediana", "grande", "x"]),
                                       tech in prop::sample::select(vec!["bajo", "medio", "alto", "x"])) {
            let out = org_posture::derive(&org_posture::Inputs {
                size: org_posture::OrgSize::from_label(size),
                tech: org_posture::TechLevel::from_label(tech),
                resources: rec as f64,
            });
            prop_assert!((0..=100).contains(&out.effectiveness));
            prop_assert_eq!(out.effectiveness + out.gap, 100);
            prop_assert!(out.profile.iter().all(|v| (0..=100).contains(v)));
        }

        #[test]
        fn monitoring_outputs_bounded(a in prop::array::uniform5(0u8..=100), mad in 0u8..=100, cam in 0u8..=100) {
            let out = monitoring::derive(&monitoring::Inputs {
                maturity: mad as f64,
                change: cam as f64,
                activities: a.map(f64::from),
            });
            prop_assert!((0..=100).contains(&out.effectiveness));
            prop_assert!((0..=100).contains(&out.coverage));
            prop_assert!((0..=100).contains(&out.plans));
            prop_assert!(!out.recommendations.is_empty());
        }

        #[test]
        fn info_quality_bounded(a in prop::array::uniform6(0u8..=100)) {
            let out = info_quality::derive(&info_quality::Inputs { attributes: a.map(f64::from) });
            prop_assert!((0..=100).contains(&out.overall));
        }

        #[test]
        fn component_radar_bounded(a in prop::array::uniform5(0u8..=100)) {
            let out = component_radar::derive(&component_radar::Inputs { importance: a.map(f64::from) });
            prop_assert!(out.implementation.iter().all(|v| (0..=100).contains(v)));
        }

        #[test]
        fn erm_outputs_bounded(i in erm_inputs()) {
            let out = erm::derive(&i);
            let s = &out.strategic;
            for v in [s.mission, s.growth, s.resilience, out.kpis.response, out.kpis.process, out.kpis.culture, out.kpis.erm] {
                prop_assert!((0..=100).contains(&v));
            }
            prop_assert!((-90..=0).contains(&out.scenario.impact_pct));
            prop_assert!((2..=24).contains(&out.scenario.recovery_months));
            prop_assert!((-60..=20).contains(&out.scenario.resilience_impact));
            prop_assert!(out.scenario.event.iter().skip(1).all(|v| (40.0..=112.0).contains(v)));
            prop_assert!((0.0..=10.0).contains(&out.position.x));
            prop_assert!((0.0..=10.0).contains(&out.position.y));
            prop_assert!(out.framework.iter().all(|v| (0.0..=100.0).contains(v)));
            for cell in &out.heat {
                prop_assert!((0.0..=8.0).contains(&cell.bubble.y));
                prop_assert!((4.0..=18.0).contains(&cell.bubble.r));
            }
            prop_assert!(out.risk_index.iter().all(|v| (60.0..=115.0).contains(v)));
            prop_assert!(out.real_performance.iter().all(|v| (60.0..=120.0).contains(v)));
        }

        #[test]
        fn erm_is_deterministic(i in erm_inputs()) {
            prop_assert_eq!(erm::derive(&i), erm::derive(&i));
        }

        #[test]
        fn event_path_never_decreases_after_drop(sev in 1u8..=10, rsp in 1u8..=10) {
            let p = erm::event_path(sev as f64, rsp as f64);
            prop_assert!(p.windows(2).skip(1).all(|w| w[1] >= w[0]));
        }
    }
}
