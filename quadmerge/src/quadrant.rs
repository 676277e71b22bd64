//! Quadrant positions and their placement offsets.
//!
//! A merged scene is assembled from four equally sized captures. Callers
//! supply them in a fixed index order, which this module pins down as an
//! external contract:
//!
//! | Index | Quadrant     | Paste offset |
//! |-------|--------------|--------------|
//! | 0     | top-left     | (0, 0)       |
//! | 1     | top-right    | (W, 0)       |
//! | 2     | bottom-left  | (0, H)       |
//! | 3     | bottom-right | (W, H)       |
//!
//! where (W, H) are the shared dimensions of a single quadrant.

use std::fmt;

/// One of the four fixed positions in a merged scene.
///
/// # Example
///
/// ```
/// use quadmerge::quadrant::Quadrant;
///
/// assert_eq!(Quadrant::TopRight.pixel_offset(640, 512), (640, 0));
/// assert_eq!(Quadrant::BottomRight.point_offset(640, 512), (640, 512));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Index 0, pasted at the origin.
    TopLeft,
    /// Index 1, pasted at (W, 0).
    TopRight,
    /// Index 2, pasted at (0, H).
    BottomLeft,
    /// Index 3, pasted at (W, H).
    BottomRight,
}

impl Quadrant {
    /// All quadrants in index order. Iteration order is part of the
    /// caller-facing contract: inputs and merged annotation output both
    /// follow it.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// Get the fixed index of this quadrant.
    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    /// Look up a quadrant by its fixed index.
    ///
    /// Returns `None` for indices outside `0..4`.
    pub fn from_index(index: usize) -> Option<Quadrant> {
        Quadrant::ALL.get(index).copied()
    }

    /// Pixel offset at which this quadrant is pasted onto a canvas built
    /// from tiles of the given dimensions.
    pub fn pixel_offset(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::TopRight => (width, 0),
            Quadrant::BottomLeft => (0, height),
            Quadrant::BottomRight => (width, height),
        }
    }

    /// Translation applied to annotation points from this quadrant when
    /// remapping them into the combined frame.
    ///
    /// Same geometry as [`pixel_offset`](Self::pixel_offset), in the signed
    /// coordinate space annotation points live in.
    pub fn point_offset(self, width: u32, height: u32) -> (i64, i64) {
        let (dx, dy) = self.pixel_offset(width, height);
        (i64::from(dx), i64::from(dy))
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quadrant::TopLeft => "top-left",
            Quadrant::TopRight => "top-right",
            Quadrant::BottomLeft => "bottom-left",
            Quadrant::BottomRight => "bottom-right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, quadrant) in Quadrant::ALL.iter().enumerate() {
            assert_eq!(quadrant.index(), i);
        }
    }

    #[test]
    fn test_from_index_round_trip() {
        for quadrant in Quadrant::ALL {
            assert_eq!(Quadrant::from_index(quadrant.index()), Some(quadrant));
        }
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(Quadrant::from_index(4), None);
        assert_eq!(Quadrant::from_index(usize::MAX), None);
    }

    #[test]
    fn test_pixel_offsets() {
        assert_eq!(Quadrant::TopLeft.pixel_offset(640, 512), (0, 0));
        assert_eq!(Quadrant::TopRight.pixel_offset(640, 512), (640, 0));
        assert_eq!(Quadrant::BottomLeft.pixel_offset(640, 512), (0, 512));
        assert_eq!(Quadrant::BottomRight.pixel_offset(640, 512), (640, 512));
    }

    #[test]
    fn test_point_offset_matches_pixel_offset() {
        for quadrant in Quadrant::ALL {
            let (px, py) = quadrant.pixel_offset(123, 456);
            assert_eq!(
                quadrant.point_offset(123, 456),
                (i64::from(px), i64::from(py))
            );
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Quadrant::TopLeft.to_string(), "top-left");
        assert_eq!(Quadrant::BottomRight.to_string(), "bottom-right");
    }
}
