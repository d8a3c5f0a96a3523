//! The animation loop: ties the [`ParameterStore`] to a [`FrameHost`] and a
//! [`Surface`].
//!
//! At most one tick is pending at any time. Whenever a render input changes,
//! the pending tick is cancelled, a frame is drawn straight away (if the loop
//! is running) and exactly one new tick is requested.

use rand::Rng;

use crate::{
    export::{DownloadSink, Exporter},
    params::{FluxState, ParamChange, ParameterStore},
    render::{Renderer, Surface},
    timeline::{AnimationClock, FrameHandle, FrameHost, ManualFrameHost},
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

#[derive(Debug)]
pub struct Session<H: FrameHost, S> {
    store: ParameterStore,
    renderer: Renderer,
    host: H,
    surface: S,
    pending: Option<FrameHandle>,
    mounted: bool,
}

impl<H: FrameHost, S: Surface> Session<H, S> {
    pub fn new(host: H, surface: S) -> Self {
        Self::with_parts(ParameterStore::new(), Renderer::default(), host, surface)
    }

    pub fn with_parts(store: ParameterStore, renderer: Renderer, host: H, surface: S) -> Self {
        Self {
            store,
            renderer,
            host,
            surface,
            pending: None,
            mounted: false,
        }
    }

    pub fn state(&self) -> &FluxState {
        self.store.state()
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn clock(&self) -> AnimationClock {
        self.store.clock()
    }

    pub fn loop_state(&self) -> LoopState {
        if self.store.display().is_animating {
            LoopState::Running
        } else {
            LoopState::Paused
        }
    }

    pub fn pending_tick(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Starts the loop with the current parameters.
    pub fn mount(&mut self) {
        self.mounted = true;
        self.restart();
    }

    /// Stops the loop; nothing is drawn until the next [`Session::mount`].
    pub fn unmount(&mut self) {
        self.cancel_pending();
        self.mounted = false;
    }

    pub fn apply(&mut self, change: ParamChange) {
        if self.store.set(change) {
            self.restart();
        }
    }

    /// Restores the defaults and zeroes the clock. A running loop that sees no
    /// change in its inputs simply continues from frame zero.
    pub fn reset(&mut self) {
        tracing::debug!("resetting parameters");
        if self.store.reset() {
            self.restart();
        }
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.store.randomize(rng) {
            self.restart();
        }
    }

    /// Host callback for a fired frame. Frames other than the pending one were
    /// cancelled and are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.pending != Some(handle) {
            tracing::trace!(frame = handle.id(), "ignoring stale frame");
            return;
        }
        self.pending = None;
        self.tick();
    }

    /// Writes the current gradient as a CSS card through `sink`.
    pub fn export_card<D: DownloadSink + ?Sized>(&self, sink: &mut D) -> Result<()> {
        Exporter::new().export_card(self.store.gradient(), sink)
    }

    fn restart(&mut self) {
        if !self.mounted {
            return;
        }
        self.cancel_pending();
        tracing::debug!(
            state = ?self.loop_state(),
            clock = self.store.clock().frames(),
            "restarting animation loop"
        );
        self.tick();
    }

    fn tick(&mut self) {
        if self.loop_state() == LoopState::Paused {
            return;
        }

        self.renderer
            .draw_frame(&mut self.surface, self.store.state(), self.store.clock());
        self.store.clock_mut().advance();
        self.pending = Some(self.host.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
    }
}

impl<S: Surface> Session<ManualFrameHost, S> {
    /// Simulates one display refresh and returns the number of frames fired.
    pub fn pump(&mut self) -> usize {
        let due = self.host.drain_due();
        let fired = due.len();
        for handle in due {
            self.on_frame(handle);
        }
        fired
    }
}

impl<H: FrameHost, S> Drop for Session<H, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
    }
}
