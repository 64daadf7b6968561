use std::collections::BTreeSet;
use std::time::Duration;

/// Identifies one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(pub u64);

/// The display-refresh scheduler a runtime is driven by.
///
/// A host delivers each requested frame at most once by calling
/// `SimulationRuntime::tick` with the token it handed out. Cancelled tokens
/// must never be delivered.
pub trait FrameHost {
    /// Monotonic host time.
    fn now(&self) -> Duration;

    fn request_frame(&mut self) -> FrameToken;

    fn cancel_frame(&mut self, token: FrameToken);
}

/// A host whose clock only moves when told to.
#[derive(Debug, Default)]
pub struct ManualHost {
    now: Duration,
    next: u64,
    pending: BTreeSet<FrameToken>,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Removes and returns every outstanding request, oldest first.
    pub fn drain_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameHost for ManualHost {
    fn now(&self) -> Duration {
        self.now
    }

    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken(self.next);
        self.pending.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.remove(&token);
    }
}
