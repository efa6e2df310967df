#![deny(warnings)]

//! Headless widget loop: queued widget events are drained by an ECS system
//! into the dashboard, one synchronous update cycle per event. When a layout
//! file is given, it is watched and the page is remounted when it changes.

use bevy_ecs::prelude::*;
use page_layout::LayoutWatcher;
use panel_core::{ControlValue, PageLayout};
use panel_runtime::{Dashboard, MemorySink};
use tracing::{info, warn};

#[derive(Resource)]
struct Page(Dashboard<MemorySink>);

/// Raw widget events in arrival order: control id and the widget's text value.
#[derive(Resource, Default)]
struct PendingInputs(Vec<(String, String)>);

/// Layout file backing the page, if any.
#[derive(Resource, Default)]
struct LayoutSource(Option<LayoutWatcher>);

#[derive(Resource, Default)]
struct Hud {
    applied: u32,
    rejected: u32,
    reloads: u32,
    last_event: String,
}

fn boot_page(layout: PageLayout) -> Page {
    Page(Dashboard::boot(
        MemorySink::new(layout),
        panel_models::catalog(),
    ))
}

/// Remount the page on a changed layout, carrying every control value over.
fn reload_layout_system(
    mut source: ResMut<LayoutSource>,
    mut page: ResMut<Page>,
    mut hud: ResMut<Hud>,
) {
    let Some(watcher) = source.0.as_mut() else {
        return;
    };
    let layout = match watcher.reload_if_changed() {
        Ok(Some(layout)) => layout.clone(),
        Ok(None) => return,
        Err(e) => {
            warn!(error = %e, "layout reload failed, keeping current page");
            return;
        }
    };
    let values: Vec<(String, ControlValue)> = page
        .0
        .panels()
        .iter()
        .flat_map(|p| p.controls().iter())
        .map(|c| (c.id().as_str().to_string(), c.read().clone()))
        .collect();
    *page = boot_page(layout);
    for (control, value) in values {
        if let Err(e) = page.0.input(&control, value) {
            warn!(%control, error = %e, "control value not carried over");
        }
    }
    hud.reloads += 1;
    let r = page.0.report();
    info!(active = r.active, uninitialized = r.uninitialized, "page remounted");
}

fn apply_inputs_system(
    mut page: ResMut<Page>,
    mut pending: ResMut<PendingInputs>,
    mut hud: ResMut<Hud>,
) {
    for (control, raw) in pending.0.drain(..) {
        match page.0.input_raw(&control, &raw) {
            Ok(_) => {
                hud.applied += 1;
                hud.last_event = format!("{control}={raw}");
            }
            Err(e) => {
                warn!(%control, error = %e, "widget event rejected");
                hud.rejected += 1;
                hud.last_event = e.to_string();
            }
        }
    }
}

fn build_world(layout: PageLayout) -> World {
    let mut world = World::new();
    world.insert_resource(boot_page(layout));
    world.insert_resource(PendingInputs::default());
    world.insert_resource(LayoutSource::default());
    world.insert_resource(Hud::default());
    world
}

fn build_schedule() -> bevy_ecs::schedule::Schedule {
    let mut schedule = bevy_ecs::schedule::Schedule::default();
    schedule.add_systems((reload_layout_system, apply_inputs_system).chain());
    schedule
}

fn main() {
    let watcher = std::env::args().nth(1).and_then(|path| {
        LayoutWatcher::open(&path)
            .map_err(|e| warn!(%path, error = %e, "layout not loaded, using full page"))
            .ok()
    });
    let layout = watcher
        .as_ref()
        .map(|w| w.current().clone())
        .unwrap_or_else(PageLayout::full);
    let mut world = build_world(layout);
    world.resource_mut::<LayoutSource>().0 = watcher;
    let mut schedule = build_schedule();
    world.resource_mut::<PendingInputs>().0.extend([
        ("s8_severidad".to_string(), "9".to_string()),
        ("s8_respuesta".to_string(), "3".to_string()),
    ]);
    // No run loop: headless demo
    schedule.run(&mut world);
    let hud = world.resource::<Hud>();
    let sink = world.resource::<Page>().0.sink();
    println!(
        "dashboard-frontend: applied={} rejected={} last={} | impacto={} recupera={}",
        hud.applied,
        hud.rejected,
        hud.last_event,
        sink.text("s8_impacto").unwrap_or("-"),
        sink.text("s8_recupera").unwrap_or("-"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::time::{Duration, SystemTime};

    fn run_once(world: &mut World) {
        build_schedule().run(world);
    }

    #[test]
    fn queued_events_apply_in_order() {
        let mut world = build_world(PageLayout::full());
        world.resource_mut::<PendingInputs>().0.extend([
            ("s3_compl".to_string(), "100".to_string()),
            ("s3_compl".to_string(), "60".to_string()),
        ]);
        run_once(&mut world);
        assert!(world.resource::<PendingInputs>().0.is_empty());
        let hud = world.resource::<Hud>();
        assert_eq!((hud.applied, hud.rejected), (2, 0));
        assert_eq!(hud.last_event, "s3_compl=60");
        let sink = world.resource::<Page>().0.sink();
        assert_eq!(sink.text("s3_risk"), Some("43"));
        assert_eq!(sink.text("bind:s3_compl"), Some("60"));
    }

    #[test]
    fn bad_events_are_counted_not_fatal() {
        let mut world = build_world(PageLayout::full());
        world.resource_mut::<PendingInputs>().0.extend([
            ("s3_compl".to_string(), "250".to_string()),
            ("nope".to_string(), "1".to_string()),
            ("s5_acc".to_string(), "80".to_string()),
        ]);
        run_once(&mut world);
        let hud = world.resource::<Hud>();
        assert_eq!((hud.applied, hud.rejected), (1, 2));
        let sink = world.resource::<Page>().0.sink();
        assert_eq!(sink.text("s3_risk"), Some("43"));
    }

    #[test]
    fn changed_layout_remounts_and_keeps_values() {
        let dir = std::env::temp_dir().join(format!("dashboard-frontend-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("page.yaml");
        fs::write(&path, "charts: true\n").unwrap();

        let watcher = LayoutWatcher::open(&path).unwrap();
        let mut world = build_world(watcher.current().clone());
        world.resource_mut::<LayoutSource>().0 = Some(watcher);
        world
            .resource_mut::<PendingInputs>()
            .0
            .push(("s3_compl".to_string(), "90".to_string()));
        run_once(&mut world);
        assert!(world.resource::<Page>().0.sink().chart("chart_s3_bars").is_some());
        assert_eq!(world.resource::<Hud>().reloads, 0);

        fs::write(&path, "absent: [chart_s3_bars]\n").unwrap();
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::now() + Duration::from_secs(5))
            .unwrap();
        run_once(&mut world);

        assert_eq!(world.resource::<Hud>().reloads, 1);
        let dash = &world.resource::<Page>().0;
        assert!(dash.sink().chart("chart_s3_bars").is_none());
        assert_eq!(dash.report().detached, 1);
        assert_eq!(dash.sink().text("bind:s3_compl"), Some("90"));
        // (100-63)*0.75 + 90*0.25 = 50.25
        assert_eq!(dash.sink().text("s3_risk"), Some("50"));
        fs::remove_file(&path).ok();
    }
}
