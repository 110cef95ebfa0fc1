//! Tabbed host for several demo instances, exactly one of which is the active slide.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::demos::DemoKind;
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::geometry::registry::GeometryProvider;
use crate::lifecycle::controller::DemoController;
use crate::lifecycle::signal::Transition;
use crate::sequence::stage::StageObserver;

/// Owns one controller per demo and routes host signals to them.
pub struct Showcase {
    controllers: Vec<DemoController>,
    active: Option<usize>,
}

impl Showcase {
    /// Host the given controllers. Names must be unique; nothing is active yet.
    pub fn new(controllers: Vec<DemoController>) -> ChoreoResult<Self> {
        let mut seen = BTreeSet::new();
        for c in &controllers {
            if !seen.insert(c.name()) {
                return Err(ChoreoError::validation(format!(
                    "duplicate demo name '{}'",
                    c.name()
                )));
            }
        }
        Ok(Self {
            controllers,
            active: None,
        })
    }

    /// Host all built-in demos on one geometry source, in [`DemoKind::ALL`] order.
    pub fn builtin(
        geometry: Arc<dyn GeometryProvider>,
        config: Arc<EngineConfig>,
        mut observer: impl FnMut(DemoKind) -> Arc<dyn StageObserver>,
    ) -> ChoreoResult<Self> {
        let controllers = DemoKind::ALL
            .into_iter()
            .map(|kind| {
                let choreo = kind.choreography(geometry.clone(), config.clone())?;
                DemoController::new(kind.name(), choreo, observer(kind))
            })
            .collect::<ChoreoResult<Vec<_>>>()?;
        Self::new(controllers)
    }

    /// Make `name` the active slide. The previous slide is stopped before the new one
    /// starts.
    #[tracing::instrument(skip(self))]
    pub fn select(&mut self, name: &str) -> ChoreoResult<Transition> {
        let index = self
            .controllers
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| ChoreoError::validation(format!("unknown demo '{name}'")))?;
        if self.active == Some(index) {
            return Ok(Transition::Unchanged);
        }
        if let Some(prev) = self.active.take() {
            self.controllers[prev].set_active_slide(false);
        }
        self.active = Some(index);
        Ok(self.controllers[index].set_active_slide(true))
    }

    /// Forward the host's viewport visibility to every instance.
    pub fn set_in_viewport(&mut self, visible: bool) {
        for c in &mut self.controllers {
            c.set_in_viewport(visible);
        }
    }

    /// Forward a resize. Returns how many tooltips were re-placed.
    pub fn on_resize(&self) -> usize {
        self.controllers.iter().filter(|c| c.on_resize()).count()
    }

    /// The active slide's controller.
    pub fn active(&self) -> Option<&DemoController> {
        self.active.map(|i| &self.controllers[i])
    }

    /// Controller by name.
    pub fn get(&self, name: &str) -> Option<&DemoController> {
        self.controllers.iter().find(|c| c.name() == name)
    }

    /// All controllers in host order.
    pub fn controllers(&self) -> &[DemoController] {
        &self.controllers
    }

    /// Number of instances with a live run.
    pub fn playing(&self) -> usize {
        self.controllers.iter().filter(|c| c.is_playing()).count()
    }

    /// Stop every instance and clear the selection.
    pub fn shutdown(&mut self) {
        self.active = None;
        for c in &mut self.controllers {
            c.shutdown();
        }
    }
}
