//! Event loop integration
//!
//! Drives the compositor state from a calloop event loop. Scene updates are
//! requested rather than run directly: any number of requests made while
//! handling events collapse into a single update once the loop goes idle, so
//! an update can never start while another one is running.
//!
//! The loop runs until [`CompositorState::stop`] is called from a callback.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use calloop::{EventLoop as CalLoop, LoopHandle};
use log::{debug, error, trace};

use crate::compositor::CompositorState;

/// Wayscene event loop wrapper
pub struct EventLoop {
    /// Calloop event loop
    event_loop: CalLoop<'static, CompositorState>,
    /// An update is queued and has not run yet
    update_pending: Rc<Cell<bool>>,
}

impl EventLoop {
    /// Create a new event loop
    pub fn new() -> anyhow::Result<Self> {
        let event_loop = CalLoop::try_new()?;

        Ok(Self {
            event_loop,
            update_pending: Rc::new(Cell::new(false)),
        })
    }

    /// Get a handle to register event sources
    pub fn handle(&self) -> LoopHandle<'static, CompositorState> {
        self.event_loop.handle()
    }

    /// Queue a scene update for the next idle point
    pub fn request_update(&self) {
        if self.update_pending.replace(true) {
            trace!("Scene update already pending");
            return;
        }

        let pending = self.update_pending.clone();
        self.event_loop.handle().insert_idle(move |state| {
            pending.set(false);
            state.update_scene();
        });
    }

    /// Whether an update is queued
    pub fn update_pending(&self) -> bool {
        self.update_pending.get()
    }

    /// Run one iteration of the event loop
    pub fn dispatch(
        &mut self,
        timeout: Option<Duration>,
        state: &mut CompositorState,
    ) -> anyhow::Result<()> {
        self.event_loop.dispatch(timeout, state)?;
        Ok(())
    }

    /// Run the event loop until the state is stopped
    pub fn run(&mut self, state: &mut CompositorState) -> anyhow::Result<()> {
        debug!("Starting event loop");

        while state.is_running() {
            // Idle callbacks only fire after polling, so a queued update must
            // not wait behind a blocking poll
            let timeout = if self.update_pending() {
                Some(Duration::ZERO)
            } else {
                None
            };
            if let Err(e) = self.dispatch(timeout, state) {
                error!("Event loop error: {}", e);
                return Err(e);
            }
        }

        debug!("Event loop stopped");
        Ok(())
    }
}
