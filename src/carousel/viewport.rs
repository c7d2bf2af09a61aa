//! Viewport measurement and snap-offset arithmetic.
//!
//! Everything here is a pure function of its inputs; the engine re-runs
//! [`measure`] whenever the container resizes, the slide count changes, or
//! the alignment changes.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Where the active slide is anchored inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    const ALL: &'static [Self] = &[Self::Start, Self::Center, Self::End];
    const NAMES: &'static [&'static str] = &["start", "center", "end"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Align {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|align| align.as_str() == raw)
            .copied()
            .ok_or_else(|| {
                format!(
                    "unknown align '{}', expected one of: {}",
                    raw,
                    Self::NAMES.join(", ")
                )
            })
    }
}

impl<'de> Deserialize<'de> for Align {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        for align in Self::ALL {
            if raw == align.as_str() {
                return Ok(*align);
            }
        }
        Err(de::Error::unknown_variant(&raw, Self::NAMES))
    }
}

/// How wide each slide is relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SlideBasis {
    /// Every slide spans the whole container.
    #[default]
    Full,
    /// Every slide spans this fraction of the container.
    Fraction(f32),
    /// Every slide has a fixed size in pixels.
    Fixed(f32),
}

impl SlideBasis {
    pub fn size_for(&self, container_size: f32) -> f32 {
        match *self {
            Self::Full => container_size,
            Self::Fraction(fraction) => container_size * fraction,
            Self::Fixed(px) => px,
        }
    }

    pub fn is_valid(&self) -> bool {
        match *self {
            Self::Full => true,
            Self::Fraction(fraction) => fraction.is_finite() && fraction > 0.0,
            Self::Fixed(px) => px.is_finite() && px > 0.0,
        }
    }
}

impl fmt::Display for SlideBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Fraction(fraction) => write!(f, "{}%", fraction * 100.0),
            Self::Fixed(px) => write!(f, "{px}px"),
        }
    }
}

impl FromStr for SlideBasis {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw == "full" {
            return Ok(Self::Full);
        }
        if let Some(percent) = raw.strip_suffix('%') {
            let value: f32 = percent
                .trim()
                .parse()
                .map_err(|_| format!("invalid slide basis percentage '{raw}'"))?;
            return Ok(Self::Fraction(value / 100.0));
        }
        if let Some(px) = raw.strip_suffix("px") {
            let value: f32 = px
                .trim()
                .parse()
                .map_err(|_| format!("invalid slide basis size '{raw}'"))?;
            return Ok(Self::Fixed(value));
        }
        Err(format!(
            "unknown slide basis '{raw}', expected 'full', a percentage like '80%', or a size like '320px'"
        ))
    }
}

impl<'de> Deserialize<'de> for SlideBasis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Measured layout along the scroll axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewportGeometry {
    pub container_size: f32,
    pub slide_sizes: Vec<f32>,
    pub slide_offsets: Vec<f32>,
}

impl ViewportGeometry {
    /// Geometry with no measurable slides. Navigation is inert against it.
    pub fn empty(container_size: f32) -> Self {
        Self {
            container_size,
            slide_sizes: Vec::new(),
            slide_offsets: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slide_offsets.is_empty()
    }

    pub fn slide_count(&self) -> usize {
        self.slide_offsets.len()
    }

    /// Total length of all slides laid end to end.
    pub fn content_size(&self) -> f32 {
        match (self.slide_offsets.last(), self.slide_sizes.last()) {
            (Some(offset), Some(size)) => offset + size,
            _ => 0.0,
        }
    }

    /// Largest offset the viewport can scroll to.
    pub fn max_scroll(&self) -> f32 {
        (self.content_size() - self.container_size).max(0.0)
    }

    /// Scroll offset that puts slide `index` at the requested alignment.
    ///
    /// Returns `None` for an index that has not been measured.
    pub fn snap_offset(&self, index: usize, align: Align) -> Option<f32> {
        let start = *self.slide_offsets.get(index)?;
        let size = *self.slide_sizes.get(index)?;
        let raw = match align {
            Align::Start => start,
            Align::Center => start - (self.container_size - size) / 2.0,
            Align::End => start + size - self.container_size,
        };
        Some(raw.clamp(0.0, self.max_scroll()))
    }

    /// Snap offsets for every slide, in index order.
    pub fn snap_offsets(&self, align: Align) -> Vec<f32> {
        (0..self.slide_count())
            .filter_map(|index| self.snap_offset(index, align))
            .collect()
    }
}

/// Lay out `slide_count` slides inside a container of `container_size`.
///
/// A zero, negative, or non-finite container and an empty slide list both
/// yield the empty geometry. Sizes reported by `size_of` that are negative or
/// non-finite count as zero.
pub fn measure<F>(container_size: f32, slide_count: usize, size_of: F) -> ViewportGeometry
where
    F: Fn(usize) -> f32,
{
    if !container_size.is_finite() || container_size <= 0.0 || slide_count == 0 {
        let container_size = if container_size.is_finite() {
            container_size.max(0.0)
        } else {
            0.0
        };
        return ViewportGeometry::empty(container_size);
    }

    let mut slide_sizes = Vec::with_capacity(slide_count);
    let mut slide_offsets = Vec::with_capacity(slide_count);
    let mut cursor = 0.0_f32;
    for index in 0..slide_count {
        let size = size_of(index);
        let size = if size.is_finite() { size.max(0.0) } else { 0.0 };
        slide_offsets.push(cursor);
        slide_sizes.push(size);
        cursor += size;
    }

    ViewportGeometry {
        container_size,
        slide_sizes,
        slide_offsets,
    }
}

/// [`measure`] with a uniform [`SlideBasis`].
pub fn measure_with_basis(
    container_size: f32,
    slide_count: usize,
    basis: SlideBasis,
) -> ViewportGeometry {
    measure(container_size, slide_count, |_| basis.size_for(container_size))
}
