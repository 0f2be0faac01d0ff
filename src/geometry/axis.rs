//! Concatenation axis and the per-axis view of image dimensions

/// Direction along which a strip is concatenated
///
/// The main axis is the concatenation direction; the cross axis is the one
/// equalized across all tiles of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Tiles placed left to right, heights equalized
    Horizontal,
    /// Tiles placed top to bottom, widths equalized
    Vertical,
}

impl Axis {
    /// Length along the cross axis of a `(width, height)` pair
    pub const fn cross_len(self, (width, height): (u32, u32)) -> u32 {
        match self {
            Self::Horizontal => height,
            Self::Vertical => width,
        }
    }

    /// Length along the main axis of a `(width, height)` pair
    pub const fn main_len(self, (width, height): (u32, u32)) -> u32 {
        match self {
            Self::Horizontal => width,
            Self::Vertical => height,
        }
    }

    /// Build `(width, height)` from cross- and main-axis lengths
    pub const fn dimensions(self, cross: u32, main: u32) -> (u32, u32) {
        match self {
            Self::Horizontal => (main, cross),
            Self::Vertical => (cross, main),
        }
    }

    /// Human-readable stage name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal strip",
            Self::Vertical => "vertical strip",
        }
    }
}
