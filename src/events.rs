use crate::banner::Slide;
use crate::carousel::{Align, ControlInput};

/// Commands accepted by the carousel task.
#[derive(Debug, Clone)]
pub enum CarouselCommand {
    Next,
    Previous,
    JumpTo(usize),
    Input(ControlInput),
    Resize(f32),
    SetAlign(Align),
    SetLoop(bool),
    /// Replace every slide (data reload).
    Reload(Vec<Slide>),
}

impl CarouselCommand {
    /// Whether the command comes from a person rather than layout or data.
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            Self::Next | Self::Previous | Self::JumpTo(_) | Self::Input(_)
        )
    }
}
