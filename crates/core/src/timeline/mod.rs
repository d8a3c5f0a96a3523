use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Frame counter driving the curve's drift. It only moves forward, one step
/// per rendered frame, and only [`AnimationClock::reset`] takes it back to zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationClock {
    frames: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn reset(&mut self) {
        self.frames = 0;
    }

    pub fn advance(&mut self) {
        self.frames += 1;
    }
}

/// Identifies one requested display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wraps a host-issued request id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The host's display refresh callback.
///
/// A requested frame fires once on the next refresh unless it is cancelled
/// first. Hosts hand out a fresh handle for every request.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Deterministic [`FrameHost`] for tests and offline rendering. Requests are
/// queued until [`ManualFrameHost::drain_due`] is called for a refresh.
#[derive(Debug, Default)]
pub struct ManualFrameHost {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrameHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every frame that is due on this refresh. Frames requested while
    /// handling them wait for the following refresh.
    pub fn drain_due(&mut self) -> Vec<FrameHandle> {
        self.pending.drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameHost for ManualFrameHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}
