//! Navigation state machine: current index, in-flight transition, and the
//! request slot held until the first measurement.

use tracing::debug;

use crate::error::Error;

/// A request to move the carousel. Consumed immediately, never stored beyond
/// the deferral slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequest {
    Next,
    Previous,
    JumpTo(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning { target: usize },
}

/// Index one step forward from `current`, or `None` at the end without loop.
pub fn next_index(current: usize, count: usize, loop_enabled: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if loop_enabled {
        Some((current + 1) % count)
    } else if current + 1 < count {
        Some(current + 1)
    } else {
        None
    }
}

/// Index one step back from `current`, or `None` at the start without loop.
pub fn previous_index(current: usize, count: usize, loop_enabled: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if loop_enabled {
        Some((current + count - 1) % count)
    } else {
        current.checked_sub(1)
    }
}

/// Resolve `request` against `current`.
///
/// `Ok(None)` means the request is a no-op (boundary without loop, empty
/// carousel, or the target equals `current`).
pub fn resolve(
    request: NavigationRequest,
    current: usize,
    count: usize,
    loop_enabled: bool,
) -> Result<Option<usize>, Error> {
    let target = match request {
        NavigationRequest::Next => next_index(current, count, loop_enabled),
        NavigationRequest::Previous => previous_index(current, count, loop_enabled),
        NavigationRequest::JumpTo(index) => {
            if index >= count {
                return Err(Error::OutOfRange { index, count });
            }
            Some(index)
        }
    };
    Ok(target.filter(|&target| target != current))
}

/// Owns the current index and the transition phase.
#[derive(Debug, Clone)]
pub struct NavigationState {
    current_index: usize,
    slide_count: usize,
    loop_enabled: bool,
    phase: Phase,
    pending: Option<NavigationRequest>,
}

impl NavigationState {
    pub fn new(slide_count: usize, loop_enabled: bool) -> Self {
        Self {
            current_index: 0,
            slide_count,
            loop_enabled,
            phase: Phase::Idle,
            pending: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// Index the carousel is showing or heading to.
    pub fn target_index(&self) -> usize {
        match self.phase {
            Phase::Idle => self.current_index,
            Phase::Transitioning { target } => target,
        }
    }

    pub fn pending(&self) -> Option<NavigationRequest> {
        self.pending
    }

    pub fn set_loop(&mut self, loop_enabled: bool) {
        self.loop_enabled = loop_enabled;
    }

    /// Apply `request`.
    ///
    /// While idle this starts a transition from the current index. While a
    /// transition is in flight the request is resolved against the in-flight
    /// target and replaces it, so the latest request wins without waiting for
    /// a settle. Returns the new target, or `Ok(None)` if nothing moved. Jump
    /// targets are range-checked either way.
    pub fn request(&mut self, request: NavigationRequest) -> Result<Option<usize>, Error> {
        match self.phase {
            Phase::Transitioning { target } => {
                let retarget = resolve(request, target, self.slide_count, self.loop_enabled)?;
                if let Some(to) = retarget {
                    debug!(?request, from = target, to, "transition retargeted");
                    self.phase = Phase::Transitioning { target: to };
                }
                Ok(retarget)
            }
            Phase::Idle => self.begin(request),
        }
    }

    /// Park `request` without starting a transition.
    pub fn defer(&mut self, request: NavigationRequest) -> Result<(), Error> {
        if let NavigationRequest::JumpTo(index) = request {
            if index >= self.slide_count {
                return Err(Error::OutOfRange {
                    index,
                    count: self.slide_count,
                });
            }
        }
        self.pending = Some(request);
        Ok(())
    }

    /// Take the parked request, if any, and start it as if it just arrived.
    pub fn release_pending(&mut self) -> Option<usize> {
        if self.is_transitioning() {
            return None;
        }
        let request = self.pending.take()?;
        self.begin(request).ok().flatten()
    }

    /// Finish the in-flight transition, committing its target as the current
    /// index. Returns the committed index.
    pub fn settle(&mut self) -> Option<usize> {
        let Phase::Transitioning { target } = self.phase else {
            return None;
        };
        self.current_index = target;
        self.phase = Phase::Idle;
        debug!(index = target, "transition settled");
        Some(target)
    }

    /// Swap in a new slide count, clamping the index into range and dropping
    /// any in-flight or deferred navigation.
    pub fn reset_count(&mut self, slide_count: usize) {
        let had_context = self.slide_count > 0;
        self.slide_count = slide_count;
        self.phase = Phase::Idle;
        self.pending = None;
        self.current_index = if slide_count == 0 || !had_context {
            0
        } else {
            self.current_index.min(slide_count - 1)
        };
    }

    fn begin(&mut self, request: NavigationRequest) -> Result<Option<usize>, Error> {
        let target = resolve(
            request,
            self.current_index,
            self.slide_count,
            self.loop_enabled,
        )?;
        if let Some(target) = target {
            debug!(?request, from = self.current_index, to = target, "transition started");
            self.phase = Phase::Transitioning { target };
        }
        Ok(target)
    }
}
