//! Per-panel update orchestration.
//!
//! An [`Orchestrator`] exclusively owns one panel's controls, its resolved
//! render handles and the outputs of its last recomputation. Every accepted
//! input runs the full cycle synchronously: commit, echo, derive, push.

use panel_core::{
    ControlId, ControlSet, ControlValue, PanelError, PanelModel, TargetId, Update,
};
use std::collections::BTreeMap;
use tracing::debug;

use crate::sink::{Handle, RenderSink};

/// Lifecycle of a panel. There is no way back from `Active`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Active,
}

pub struct Orchestrator {
    model: Box<dyn PanelModel>,
    controls: ControlSet,
    handles: BTreeMap<TargetId, Handle>,
    echoes: BTreeMap<ControlId, Handle>,
    phase: Phase,
    last: Vec<Update>,
    cycles: u64,
    diagnostics: Vec<PanelError>,
}

impl Orchestrator {
    pub fn new(model: Box<dyn PanelModel>) -> Self {
        let controls = ControlSet::new(model.controls());
        Self {
            model,
            controls,
            handles: BTreeMap::new(),
            echoes: BTreeMap::new(),
            phase: Phase::Uninitialized,
            last: Vec::new(),
            cycles: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.model.id()
    }

    pub fn title(&self) -> &'static str {
        self.model.title()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    /// Outputs of the most recent recomputation.
    pub fn outputs(&self) -> &[Update] {
        &self.last
    }

    /// Number of completed recomputations.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Targets and controls that could not be wired.
    pub fn diagnostics(&self) -> &[PanelError] {
        &self.diagnostics
    }

    pub fn handle(&self, id: &str) -> Option<&Handle> {
        self.handles.get(&TargetId::new(id))
    }

    /// Locate controls and targets, then run the first recomputation.
    ///
    /// Value labels are wired for every slider present on the page. A
    /// missing control leaves the panel uninitialized; missing render
    /// targets only detach their own handle. Mounting an uninitialized panel
    /// again re-resolves everything from scratch.
    pub fn mount<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Phase {
        if self.phase == Phase::Active {
            return self.phase;
        }
        self.diagnostics.clear();
        self.echoes.clear();

        let mut missing = Vec::new();
        for control in self.controls.iter() {
            let target = TargetId::new(control.id().as_str());
            if !sink.has_target(&target) {
                missing.push(PanelError::MissingTarget(target));
                continue;
            }
            if control.is_numeric() {
                let handle = Handle::text(sink, TargetId::echo_for(control.id()));
                if let Some(echo) = control.echo() {
                    handle.write_text(sink, &echo);
                }
                self.echoes.insert(control.id().clone(), handle);
            }
        }
        if !missing.is_empty() {
            debug!(panel = self.id(), missing = missing.len(), "controls absent, panel not wired");
            self.diagnostics = missing;
            return self.phase;
        }

        for decl in self.model.targets() {
            let handle = Handle::initialize(sink, &decl);
            if let Some(reason) = handle.detached_reason() {
                self.diagnostics.push(reason.clone());
            }
            self.handles.insert(decl.id().clone(), handle);
        }

        self.phase = Phase::Active;
        self.refresh(sink);
        self.phase
    }

    /// Commit a value to one of this panel's controls and propagate it.
    ///
    /// An unwired panel still stores the value and mirrors it on the
    /// slider's label, but recomputes nothing and returns `Ok(false)`.
    pub fn handle_input<S: RenderSink + ?Sized>(
        &mut self,
        sink: &mut S,
        control: &str,
        value: ControlValue,
    ) -> Result<bool, PanelError> {
        let c = self
            .controls
            .get_mut(control)
            .ok_or_else(|| PanelError::UnknownControl(control.to_string()))?;
        c.commit(value)?;
        if let (Some(handle), Some(echo)) = (self.echoes.get(c.id()), c.echo()) {
            handle.write_text(sink, &echo);
        }
        if self.phase != Phase::Active {
            debug!(panel = self.id(), control, "input stored by unwired panel");
            return Ok(false);
        }
        self.refresh(sink);
        Ok(true)
    }

    /// Recompute all outputs from the current controls and push every one.
    pub fn refresh<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        if self.phase != Phase::Active {
            return;
        }
        let updates = match self.model.recompute(&self.controls) {
            Ok(u) => u,
            Err(e) => {
                debug!(panel = self.id(), error = %e, "recomputation skipped");
                return;
            }
        };
        let mut pushed = 0usize;
        for update in &updates {
            match self.handles.get(update.target()) {
                Some(handle) => {
                    if handle.apply(sink, update) {
                        pushed += 1;
                    }
                }
                None => debug!(panel = self.id(), target_id = %update.target(), "undeclared target"),
            }
        }
        self.cycles += 1;
        debug!(
            panel = self.id(),
            cycle = self.cycles,
            outputs = updates.len(),
            pushed,
            "panel recomputed"
        );
        self.last = updates;
    }
}
