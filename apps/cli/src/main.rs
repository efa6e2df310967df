#![deny(warnings)]

//! Headless CLI: boots the dashboard against an in-memory page, applies
//! control values and prints the resulting KPIs, advisories and charts.

use anyhow::{bail, Context, Result};
use panel_core::{PageLayout, Update};
use panel_runtime::{Dashboard, MemorySink, Orchestrator, PageSnapshot, Phase};
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, PartialEq)]
struct Args {
    layout: Option<String>,
    sets: Vec<(String, String)>,
    panel: Option<String>,
    json: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut out = Args::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--layout" => out.layout = it.next(),
            "--panel" => out.panel = it.next(),
            "--json" => out.json = true,
            "--set" => {
                let Some(pair) = it.next() else {
                    bail!("--set expects id=value");
                };
                let Some((id, value)) = pair.split_once('=') else {
                    bail!("--set expects id=value, got {pair:?}");
                };
                out.sets.push((id.trim().to_string(), value.to_string()));
            }
            _ => {}
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct PanelReport<'a> {
    id: &'a str,
    title: &'a str,
    active: bool,
    cycles: u64,
    diagnostics: Vec<String>,
    outputs: &'a [Update],
}

#[derive(Serialize)]
struct Envelope<'a> {
    generated_at: String,
    git_sha: &'a str,
    build_date: &'a str,
    panels: Vec<PanelReport<'a>>,
    page: &'a PageSnapshot,
}

fn report(p: &Orchestrator) -> PanelReport<'_> {
    PanelReport {
        id: p.id(),
        title: p.title(),
        active: p.phase() == Phase::Active,
        cycles: p.cycles(),
        diagnostics: p.diagnostics().iter().map(ToString::to_string).collect(),
        outputs: p.outputs(),
    }
}

fn print_panel(p: &Orchestrator) {
    let state = match p.phase() {
        Phase::Active => "active",
        Phase::Uninitialized => "not wired",
    };
    println!("== {} [{}] ({state})", p.title(), p.id());
    for d in p.diagnostics() {
        println!("   ! {d}");
    }
    for update in p.outputs() {
        let live = p.handle(update.target().as_str()).is_some_and(|h| h.is_live());
        let mark = if live { "" } else { " (not on page)" };
        match update {
            Update::Text { target, text } => println!("   {target}: {text}{mark}"),
            Update::List { target, items } => {
                println!("   {target}:{mark}");
                for item in items {
                    println!("     - {item}");
                }
            }
            Update::Chart { target, patches } => {
                let sizes: Vec<String> = patches
                    .iter()
                    .map(|s| format!("#{}x{}", s.index, s.data.len()))
                    .collect();
                println!("   {target}: series {}{mark}", sizes.join(" "));
            }
        }
    }
}

/// Apply `--set` pairs in order. Rejected values and unwired panels are
/// logged and skipped; returns how many inputs recomputed their panel.
fn apply_sets(dash: &mut Dashboard<MemorySink>, sets: &[(String, String)]) -> usize {
    let mut applied = 0;
    for (id, value) in sets {
        match dash.input_raw(id, value) {
            Ok(true) => applied += 1,
            Ok(false) => warn!(control = %id, "panel not wired; value stored only"),
            Err(e) => warn!(control = %id, %value, error = %e, "value rejected"),
        }
    }
    applied
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    info!(layout = ?args.layout, sets = args.sets.len(), "starting CLI");

    let layout = match &args.layout {
        Some(path) => page_layout::load_layout(path)
            .with_context(|| format!("loading layout {path}"))?,
        None => PageLayout::full(),
    };
    let mut dash = Dashboard::boot(MemorySink::new(layout), panel_models::catalog());
    let applied = apply_sets(&mut dash, &args.sets);
    info!(applied, requested = args.sets.len(), "control values applied");

    let panels: Vec<&Orchestrator> = match &args.panel {
        Some(id) => match dash.panel(id) {
            Some(p) => vec![p],
            None => bail!("unknown panel {id:?}"),
        },
        None => dash.panels().iter().collect(),
    };

    if args.json {
        let envelope = Envelope {
            generated_at: chrono::Utc::now().to_rfc3339(),
            git_sha: env!("GIT_SHA"),
            build_date: env!("BUILD_DATE"),
            panels: panels.iter().map(|p| report(p)).collect(),
            page: dash.sink().snapshot(),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        for p in panels {
            print_panel(p);
        }
        let r = dash.report();
        println!(
            "Dashboard | active: {} | not wired: {} | detached targets: {}",
            r.active, r.uninitialized, r.detached
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_repeated_sets() {
        let a = args(&["--set", "s3_compl=90", "--json", "--set", "s8_enfoque=agresivo"]).unwrap();
        assert!(a.json);
        assert_eq!(
            a.sets,
            vec![
                ("s3_compl".to_string(), "90".to_string()),
                ("s8_enfoque".to_string(), "agresivo".to_string())
            ]
        );
    }

    #[test]
    fn rejects_set_without_value() {
        assert!(args(&["--set", "s3_compl"]).is_err());
        assert!(args(&["--set"]).is_err());
    }

    #[test]
    fn bad_sets_are_skipped_not_fatal() {
        let layout = PageLayout::full().without(["s6_madurez"]);
        let mut dash = Dashboard::boot(MemorySink::new(layout), panel_models::catalog());
        let sets: Vec<(String, String)> = [
            ("s3_compl", "250"),
            ("nope", "1"),
            ("s6_cambio", "10"),
            ("s3_compl", "100"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(apply_sets(&mut dash, &sets), 1);
        assert_eq!(dash.sink().text("s3_risk"), Some("53"));
        assert_eq!(dash.sink().text("bind:s6_cambio"), Some("10"));
    }

    #[test]
    fn envelope_reports_each_panel() {
        let dash = Dashboard::boot(MemorySink::new(PageLayout::full()), panel_models::catalog());
        let p = dash.panel("residual_risk").unwrap();
        let json = serde_json::to_value(report(p)).unwrap();
        assert_eq!(json["active"], true);
        assert_eq!(json["cycles"], 1);
        assert!(json["diagnostics"].as_array().unwrap().is_empty());
        assert_eq!(json["outputs"].as_array().unwrap().len(), 4);
    }
}
