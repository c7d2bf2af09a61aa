//! Previous/next controls and the input keys that drive them.

use super::navigation::NavigationRequest;

/// Whether the "previous" control should be enabled.
pub fn can_go_previous(current_index: usize, slide_count: usize, loop_enabled: bool) -> bool {
    if loop_enabled {
        slide_count > 1
    } else {
        slide_count > 0 && current_index != 0
    }
}

/// Whether the "next" control should be enabled.
pub fn can_go_next(current_index: usize, slide_count: usize, loop_enabled: bool) -> bool {
    if loop_enabled {
        slide_count > 1
    } else {
        slide_count > 0 && current_index != slide_count - 1
    }
}

/// User intent coming from buttons or the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInput {
    PreviousButton,
    NextButton,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

impl ControlInput {
    /// Map the input to a navigation request, or `None` when the matching
    /// control is disabled.
    pub fn to_request(
        self,
        current_index: usize,
        slide_count: usize,
        loop_enabled: bool,
    ) -> Option<NavigationRequest> {
        match self {
            Self::PreviousButton | Self::ArrowLeft => {
                can_go_previous(current_index, slide_count, loop_enabled)
                    .then_some(NavigationRequest::Previous)
            }
            Self::NextButton | Self::ArrowRight => {
                can_go_next(current_index, slide_count, loop_enabled)
                    .then_some(NavigationRequest::Next)
            }
            Self::Home => (slide_count > 0).then_some(NavigationRequest::JumpTo(0)),
            Self::End => {
                (slide_count > 0).then(|| NavigationRequest::JumpTo(slide_count - 1))
            }
        }
    }
}
