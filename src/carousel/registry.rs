//! Ordered slide storage with stable positional indices.

/// One slide plus its position in the carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideDescriptor<T> {
    pub index: usize,
    pub content: T,
}

/// Immutable list of slides for a single render pass.
///
/// A reload never patches entries in place; callers build a new registry and
/// swap it in whole.
#[derive(Debug, Clone)]
pub struct SlideRegistry<T> {
    slides: Vec<SlideDescriptor<T>>,
}

impl<T> SlideRegistry<T> {
    /// Index the payloads in the order given. An empty input is allowed.
    pub fn new(payloads: impl IntoIterator<Item = T>) -> Self {
        let slides = payloads
            .into_iter()
            .enumerate()
            .map(|(index, content)| SlideDescriptor { index, content })
            .collect();
        Self { slides }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Borrow the payload stored at `index`.
    #[must_use]
    pub fn payload_at(&self, index: usize) -> Option<&T> {
        self.slides.get(index).map(|slide| &slide.content)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SlideDescriptor<T>> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideDescriptor<T>> {
        self.slides.iter()
    }
}

impl<T> Default for SlideRegistry<T> {
    fn default() -> Self {
        Self { slides: Vec::new() }
    }
}

impl<T> FromIterator<T> for SlideRegistry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
