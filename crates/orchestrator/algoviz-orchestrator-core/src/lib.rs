//! algoviz-orchestrator
//!
//! Shell core that sits between an algorithm and a host renderer. A new input
//! runs the algorithm and yields a [`Scene`] plus a [`RenderTicket`]; the host
//! mounts the scene, then hands the ticket back through
//! [`Visualization::attach`] once its elements exist. Only then is the log
//! interpreted and played.

pub mod error;
pub mod scene;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use algoviz_algo_core::input::{ensure_ascending, normalize_text, parse_numbers, MAX_INPUT_LEN};
use algoviz_algo_core::{Algorithm, BinarySearch, RunResult, SearchInput};
use algoviz_animation_core::{
    Config, ElementResolver, Outputs, PlayerCommand, TimelineController,
};

pub use crate::error::VisualizationError;
pub use crate::scene::{cell_handle, pointer_handle, stack_handle, Scene, RESULT_HANDLE};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub animation: Config,
    /// Characters kept from text input.
    pub max_input_len: usize,
    /// Numbers kept from list input.
    pub max_items: usize,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            animation: Config::default(),
            max_input_len: MAX_INPUT_LEN,
            max_items: MAX_INPUT_LEN,
        }
    }
}

impl VisualizationConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Proof that the host rendered the scene of one particular input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderTicket {
    pub epoch: u64,
}

#[derive(Debug)]
pub struct Visualization<A: Algorithm> {
    algorithm: A,
    cfg: VisualizationConfig,
    epoch: u64,
    awaiting_render: bool,
    run: Option<RunResult<A::Output, A::Input>>,
    scene: Scene,
    controller: TimelineController,
}

impl<A: Algorithm> Visualization<A> {
    pub fn new(algorithm: A, cfg: VisualizationConfig) -> Self {
        let controller = TimelineController::new(cfg.animation.clone());
        Self {
            algorithm,
            cfg,
            epoch: 0,
            awaiting_render: false,
            run: None,
            scene: Scene::default(),
            controller,
        }
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn config(&self) -> &VisualizationConfig {
        &self.cfg
    }

    /// Run the algorithm on `input` and drop the previous program.
    ///
    /// The result is readable right away; nothing animates until the returned
    /// ticket comes back through [`Visualization::attach`].
    pub fn set_input(&mut self, input: A::Input) -> RenderTicket {
        let run = self.algorithm.run(&input);
        self.scene = Scene::from_run(self.algorithm.cells(&input), run.ops());
        debug!(
            "{}: {} ops, {} cells, {} pointers, {} stack slots",
            self.algorithm.name(),
            run.ops().len(),
            self.scene.cells.len(),
            self.scene.pointers.len(),
            self.scene.stack.len()
        );
        self.run = Some(run);
        self.controller.clear();
        self.epoch = self.epoch.wrapping_add(1);
        self.awaiting_render = true;
        RenderTicket { epoch: self.epoch }
    }

    /// Build the program against what the host mounted and, if configured,
    /// start playing.
    ///
    /// When interpretation fails the result stays readable and the controller
    /// stays `Idle`; the error is still returned.
    pub fn attach(
        &mut self,
        ticket: RenderTicket,
        resolver: &mut dyn ElementResolver,
    ) -> Result<(), VisualizationError> {
        if ticket.epoch != self.epoch {
            return Err(VisualizationError::StaleRender {
                ticket: ticket.epoch,
                current: self.epoch,
            });
        }
        let run = match (&self.run, self.awaiting_render) {
            (Some(run), true) => run,
            _ => return Err(VisualizationError::NotAwaitingRender),
        };
        self.awaiting_render = false;

        if let Err(e) = self.controller.rebuild(run.ops(), resolver) {
            warn!(
                "{}: animation unavailable [{}]: {e}",
                self.algorithm.name(),
                e.category()
            );
            return Err(e.into());
        }
        if self.cfg.animation.playback.autoplay {
            self.controller.play()?;
        }
        Ok(())
    }

    /// Mount the current scene headlessly and attach to it.
    pub fn attach_headless(&mut self, ticket: RenderTicket) -> Result<(), VisualizationError> {
        let mut resolver = self.scene.mount();
        self.attach(ticket, &mut resolver)
    }

    pub fn result(&self) -> Option<&A::Output> {
        self.run.as_ref().map(RunResult::result)
    }

    pub fn run(&self) -> Option<&RunResult<A::Output, A::Input>> {
        self.run.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_awaiting_render(&self) -> bool {
        self.awaiting_render
    }

    pub fn controller(&self) -> &TimelineController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TimelineController {
        &mut self.controller
    }

    pub fn command(&mut self, cmd: PlayerCommand) -> Result<(), VisualizationError> {
        self.controller.apply(cmd)?;
        Ok(())
    }

    pub fn update(&mut self, dt: f32) -> &Outputs {
        self.controller.update(dt)
    }
}

impl<A: Algorithm<Input = String>> Visualization<A> {
    /// Trimmed and capped text input.
    pub fn set_text(&mut self, raw: &str) -> RenderTicket {
        let text = normalize_text(raw, self.cfg.max_input_len);
        self.set_input(text)
    }
}

impl<A: Algorithm<Input = Vec<i64>>> Visualization<A> {
    /// Comma-separated integers.
    pub fn set_numbers(&mut self, raw: &str) -> Result<RenderTicket, VisualizationError> {
        let items = parse_numbers(raw, self.cfg.max_items)?;
        Ok(self.set_input(items))
    }
}

impl Visualization<BinarySearch> {
    /// Comma-separated ascending integers and a target. The previous input is
    /// kept when the list does not parse or is out of order.
    pub fn set_search(&mut self, raw: &str, target: i64) -> Result<RenderTicket, VisualizationError> {
        let items = parse_numbers(raw, self.cfg.max_items)?;
        ensure_ascending(&items)?;
        Ok(self.set_input(SearchInput::new(items, target)))
    }
}
