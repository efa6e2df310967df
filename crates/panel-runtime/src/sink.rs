//! Render sink contract and the handles panels use to reach it.

use panel_core::{ChartSpec, PanelError, SeriesPatch, TargetDecl, TargetId, Update};
use tracing::debug;

/// Anything that can materialize charts, KPI texts and advisory lists.
///
/// All calls are synchronous. Pushing identical data twice must leave the
/// visible state unchanged.
pub trait RenderSink {
    /// Whether an element with this identifier exists on the page.
    fn has_target(&self, id: &TargetId) -> bool;

    /// Whether the chart-drawing collaborator is available at all.
    fn charts_available(&self) -> bool;

    fn create_chart(&mut self, id: &TargetId, spec: &ChartSpec);

    /// Replace data of some series of an existing chart and redraw it.
    fn patch_chart(&mut self, id: &TargetId, patches: &[SeriesPatch]);

    fn set_text(&mut self, id: &TargetId, text: &str);

    fn set_list(&mut self, id: &TargetId, items: &[String]);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Chart,
    Text,
    List,
}

#[derive(Debug, PartialEq)]
enum HandleState {
    Live,
    Detached(PanelError),
}

/// A resolved render target. Detached handles swallow every update.
#[derive(Debug, PartialEq)]
pub struct Handle {
    id: TargetId,
    kind: TargetKind,
    state: HandleState,
}

impl Handle {
    /// Resolve a declared target against the sink, creating the chart when
    /// the target and the chart collaborator both exist.
    pub fn initialize<S: RenderSink + ?Sized>(sink: &mut S, decl: &TargetDecl) -> Self {
        let id = decl.id().clone();
        let kind = match decl {
            TargetDecl::Chart { .. } => TargetKind::Chart,
            TargetDecl::Text { .. } => TargetKind::Text,
            TargetDecl::List { .. } => TargetKind::List,
        };
        if !sink.has_target(&id) {
            return Self::detached(id, kind, PanelError::MissingTarget(decl.id().clone()));
        }
        if let TargetDecl::Chart { spec, .. } = decl {
            if !sink.charts_available() {
                return Self::detached(id, kind, PanelError::MissingDependency("charts".into()));
            }
            sink.create_chart(&id, spec);
        }
        Self {
            id,
            kind,
            state: HandleState::Live,
        }
    }

    /// Handle for a plain text target such as a slider value label.
    pub fn text<S: RenderSink + ?Sized>(sink: &S, id: TargetId) -> Self {
        if sink.has_target(&id) {
            Self {
                id,
                kind: TargetKind::Text,
                state: HandleState::Live,
            }
        } else {
            let err = PanelError::MissingTarget(id.clone());
            Self::detached(id, TargetKind::Text, err)
        }
    }

    fn detached(id: TargetId, kind: TargetKind, reason: PanelError) -> Self {
        debug!(target_id = %id, %reason, "render target detached");
        Self {
            id,
            kind,
            state: HandleState::Detached(reason),
        }
    }

    pub fn id(&self) -> &TargetId {
        &self.id
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn is_live(&self) -> bool {
        self.state == HandleState::Live
    }

    pub fn detached_reason(&self) -> Option<&PanelError> {
        match &self.state {
            HandleState::Live => None,
            HandleState::Detached(e) => Some(e),
        }
    }

    /// Push one update through this handle. Returns whether the sink was called.
    pub fn apply<S: RenderSink + ?Sized>(&self, sink: &mut S, update: &Update) -> bool {
        if !self.is_live() {
            return false;
        }
        match (self.kind, update) {
            (TargetKind::Chart, Update::Chart { patches, .. }) => sink.patch_chart(&self.id, patches),
            (TargetKind::Text, Update::Text { text, .. }) => sink.set_text(&self.id, text),
            (TargetKind::List, Update::List { items, .. }) => sink.set_list(&self.id, items),
            (kind, other) => {
                debug!(target_id = %self.id, ?kind, ?other, "update kind does not match target");
                return false;
            }
        }
        true
    }

    /// Write a plain string (slider echo).
    pub fn write_text<S: RenderSink + ?Sized>(&self, sink: &mut S, text: &str) {
        if self.is_live() && self.kind == TargetKind::Text {
            sink.set_text(&self.id, text);
        }
    }
}
