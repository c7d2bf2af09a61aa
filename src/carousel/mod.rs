//! Carousel navigation engine.
//!
//! [`Carousel`] wires the slide registry, viewport measurement, navigation
//! state machine, and control surface together. It is synchronous and owns
//! no timers: whoever renders the carousel calls [`Carousel::settle`] once a
//! transition has finished animating.

pub mod controls;
pub mod navigation;
pub mod registry;
pub mod viewport;

use tracing::{debug, info, warn};

use crate::config::CarouselOptions;
use crate::error::Error;

pub use controls::{ControlInput, can_go_next, can_go_previous};
pub use navigation::{NavigationRequest, NavigationState, Phase};
pub use registry::{SlideDescriptor, SlideRegistry};
pub use viewport::{Align, SlideBasis, ViewportGeometry};

/// State observed by the render side after every change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CarouselSignals {
    pub current_index: usize,
    pub slide_count: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub is_transitioning: bool,
    pub target_offset: f32,
}

#[derive(Debug, Clone)]
pub struct Carousel<T> {
    registry: SlideRegistry<T>,
    nav: NavigationState,
    align: Align,
    basis: SlideBasis,
    container_size: f32,
    measured: bool,
    geometry: ViewportGeometry,
    target_offset: f32,
}

impl<T> Carousel<T> {
    /// Build an empty, unmeasured carousel.
    pub fn new(options: &CarouselOptions) -> Self {
        Self {
            registry: SlideRegistry::default(),
            nav: NavigationState::new(0, options.loop_enabled),
            align: options.align,
            basis: options.slide_basis,
            container_size: 0.0,
            measured: false,
            geometry: ViewportGeometry::default(),
            target_offset: 0.0,
        }
    }

    pub fn with_slides(options: &CarouselOptions, payloads: impl IntoIterator<Item = T>) -> Self {
        let mut carousel = Self::new(options);
        carousel.set_slides(payloads);
        carousel
    }

    /// Replace every slide. The current index is clamped into the new range
    /// and any in-flight or deferred navigation is dropped.
    pub fn set_slides(&mut self, payloads: impl IntoIterator<Item = T>) {
        let previous = self.nav.current_index();
        self.registry = payloads.into_iter().collect();
        self.nav.reset_count(self.registry.count());
        info!(
            slides = self.registry.count(),
            previous_index = previous,
            current_index = self.nav.current_index(),
            "slides replaced"
        );
        self.remeasure();
    }

    /// Record a new container size and recompute geometry.
    pub fn on_resize(&mut self, container_size: f32) {
        self.container_size = container_size;
        self.remeasure();
    }

    pub fn set_align(&mut self, align: Align) {
        if self.align != align {
            self.align = align;
            self.remeasure();
        }
    }

    pub fn set_loop(&mut self, loop_enabled: bool) {
        self.nav.set_loop(loop_enabled);
    }

    /// Advance one slide. Never fails; a no-op at the last slide without loop.
    pub fn next(&mut self) {
        self.dispatch_infallible(NavigationRequest::Next);
    }

    /// Step back one slide. Never fails; a no-op at the first slide without loop.
    pub fn previous(&mut self) {
        self.dispatch_infallible(NavigationRequest::Previous);
    }

    /// Seek straight to `index`.
    ///
    /// # Errors
    /// Returns [`Error::OutOfRange`] if `index` is not a valid slide index.
    /// The current index is left untouched.
    pub fn jump_to(&mut self, index: usize) -> Result<(), Error> {
        self.dispatch(NavigationRequest::JumpTo(index))
    }

    /// Translate a button or key press. Disabled controls are ignored.
    pub fn handle_input(&mut self, input: ControlInput) {
        let request = input.to_request(
            self.nav.current_index(),
            self.nav.slide_count(),
            self.nav.loop_enabled(),
        );
        match request {
            Some(request) => self.dispatch_infallible(request),
            None => debug!(?input, "control disabled"),
        }
    }

    /// Commit the in-flight target. Returns `false` if nothing was in flight.
    pub fn settle(&mut self) -> bool {
        if self.nav.settle().is_none() {
            return false;
        }
        self.update_target_offset();
        true
    }

    pub fn signals(&self) -> CarouselSignals {
        CarouselSignals {
            current_index: self.current_index(),
            slide_count: self.slide_count(),
            can_go_previous: self.can_go_previous(),
            can_go_next: self.can_go_next(),
            is_transitioning: self.is_transitioning(),
            target_offset: self.target_offset,
        }
    }

    pub fn current_index(&self) -> usize {
        self.nav.current_index()
    }

    pub fn slide_count(&self) -> usize {
        self.registry.count()
    }

    /// `false` when there is nothing to navigate.
    pub fn has_content(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn is_transitioning(&self) -> bool {
        self.nav.is_transitioning()
    }

    pub fn is_measured(&self) -> bool {
        self.measured
    }

    pub fn can_go_previous(&self) -> bool {
        can_go_previous(
            self.nav.current_index(),
            self.nav.slide_count(),
            self.nav.loop_enabled(),
        )
    }

    pub fn can_go_next(&self) -> bool {
        can_go_next(
            self.nav.current_index(),
            self.nav.slide_count(),
            self.nav.loop_enabled(),
        )
    }

    pub fn align(&self) -> Align {
        self.align
    }

    pub fn loop_enabled(&self) -> bool {
        self.nav.loop_enabled()
    }

    pub fn target_offset(&self) -> f32 {
        self.target_offset
    }

    pub fn geometry(&self) -> &ViewportGeometry {
        &self.geometry
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn slides(&self) -> &SlideRegistry<T> {
        &self.registry
    }

    /// Payload of the slide at the current index.
    pub fn current_slide(&self) -> Option<&T> {
        self.registry.payload_at(self.nav.current_index())
    }

    fn dispatch(&mut self, request: NavigationRequest) -> Result<(), Error> {
        if !self.measured {
            // Nothing to lay out against yet; keep the latest request for the
            // first successful measurement.
            if self.registry.is_empty() {
                return match request {
                    NavigationRequest::JumpTo(index) => Err(Error::OutOfRange { index, count: 0 }),
                    _ => Ok(()),
                };
            }
            self.nav.defer(request)?;
            debug!(?request, "request deferred until first measurement");
            return Ok(());
        }
        if self.geometry.is_empty() {
            if let NavigationRequest::JumpTo(index) = request {
                if index >= self.registry.count() {
                    return Err(Error::OutOfRange {
                        index,
                        count: self.registry.count(),
                    });
                }
            }
            debug!(?request, "ignored against empty geometry");
            return Ok(());
        }
        if self.nav.request(request)?.is_some() {
            self.update_target_offset();
        }
        Ok(())
    }

    fn dispatch_infallible(&mut self, request: NavigationRequest) {
        if let Err(err) = self.dispatch(request) {
            warn!(?request, %err, "navigation request rejected");
        }
    }

    fn remeasure(&mut self) {
        self.geometry = viewport::measure_with_basis(
            self.container_size,
            self.registry.count(),
            self.basis,
        );
        if !self.measured && !self.geometry.is_empty() {
            self.measured = true;
            debug!(
                container_size = self.container_size,
                slides = self.geometry.slide_count(),
                "first measurement"
            );
            self.nav.release_pending();
        }
        self.update_target_offset();
    }

    fn update_target_offset(&mut self) {
        self.target_offset = self
            .geometry
            .snap_offset(self.nav.target_index(), self.align)
            .unwrap_or(0.0);
    }
}
