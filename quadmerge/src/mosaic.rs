//! Four-quadrant raster stitching.
//!
//! Takes four equally sized tiles and pastes them onto a double-width,
//! double-height canvas at their [`Quadrant`] offsets. The routine is
//! generic over the pixel type so the same code serves the RGB scene and
//! the single-channel thermal raster.

use image::{imageops, ImageBuffer, Pixel};
use thiserror::Error;

use crate::quadrant::Quadrant;

/// Errors that can occur while stitching a mosaic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MosaicError {
    /// The four input tiles do not share identical dimensions.
    #[error(
        "{quadrant} tile is {actual_width}\u{d7}{actual_height}, \
         expected {expected_width}\u{d7}{expected_height}"
    )]
    DimensionMismatch {
        quadrant: Quadrant,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}

/// Stitch four equally sized tiles into one (2W, 2H) mosaic.
///
/// The tiles must be supplied in quadrant index order (see
/// [`Quadrant::ALL`]). Dimensions are taken from the top-left tile; if any
/// other tile disagrees, the merge fails with
/// [`MosaicError::DimensionMismatch`] before any canvas is allocated.
///
/// # Example
///
/// ```
/// use image::GrayImage;
/// use quadmerge::mosaic::merge_quadrants;
///
/// let tiles = [
///     GrayImage::from_pixel(2, 2, image::Luma([10])),
///     GrayImage::from_pixel(2, 2, image::Luma([20])),
///     GrayImage::from_pixel(2, 2, image::Luma([30])),
///     GrayImage::from_pixel(2, 2, image::Luma([40])),
/// ];
/// let merged = merge_quadrants(&tiles).unwrap();
/// assert_eq!(merged.dimensions(), (4, 4));
/// assert_eq!(merged.get_pixel(3, 0).0, [20]);
/// ```
pub fn merge_quadrants<P>(
    tiles: &[ImageBuffer<P, Vec<P::Subpixel>>; 4],
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, MosaicError>
where
    P: Pixel,
{
    let (width, height) = tiles[0].dimensions();

    for quadrant in Quadrant::ALL {
        let (actual_width, actual_height) = tiles[quadrant.index()].dimensions();
        if (actual_width, actual_height) != (width, height) {
            return Err(MosaicError::DimensionMismatch {
                quadrant,
                expected_width: width,
                expected_height: height,
                actual_width,
                actual_height,
            });
        }
    }

    let mut canvas = ImageBuffer::new(width * 2, height * 2);
    for quadrant in Quadrant::ALL {
        let (x, y) = quadrant.pixel_offset(width, height);
        imageops::replace(
            &mut canvas,
            &tiles[quadrant.index()],
            i64::from(x),
            i64::from(y),
        );
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use proptest::prelude::*;

    fn gray_tiles(width: u32, height: u32) -> [GrayImage; 4] {
        [10u8, 20, 30, 40].map(|v| GrayImage::from_pixel(width, height, Luma([v])))
    }

    #[test]
    fn test_merged_dimensions_are_doubled() {
        let merged = merge_quadrants(&gray_tiles(3, 5)).unwrap();
        assert_eq!(merged.dimensions(), (6, 10));
    }

    #[test]
    fn test_pixel_placement_per_quadrant() {
        let merged = merge_quadrants(&gray_tiles(2, 2)).unwrap();
        // Each quadrant keeps its own fill value.
        assert_eq!(merged.get_pixel(0, 0).0, [10]);
        assert_eq!(merged.get_pixel(1, 1).0, [10]);
        assert_eq!(merged.get_pixel(2, 0).0, [20]);
        assert_eq!(merged.get_pixel(3, 1).0, [20]);
        assert_eq!(merged.get_pixel(0, 2).0, [30]);
        assert_eq!(merged.get_pixel(1, 3).0, [30]);
        assert_eq!(merged.get_pixel(2, 2).0, [40]);
        assert_eq!(merged.get_pixel(3, 3).0, [40]);
    }

    #[test]
    fn test_rgb_tiles_merge() {
        let tiles = [
            RgbImage::from_pixel(1, 1, Rgb([255, 0, 0])),
            RgbImage::from_pixel(1, 1, Rgb([0, 255, 0])),
            RgbImage::from_pixel(1, 1, Rgb([0, 0, 255])),
            RgbImage::from_pixel(1, 1, Rgb([255, 255, 255])),
        ];
        let merged = merge_quadrants(&tiles).unwrap();
        assert_eq!(merged.dimensions(), (2, 2));
        assert_eq!(merged.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(merged.get_pixel(1, 0).0, [0, 255, 0]);
        assert_eq!(merged.get_pixel(0, 1).0, [0, 0, 255]);
        assert_eq!(merged.get_pixel(1, 1).0, [255, 255, 255]);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let mut tiles = gray_tiles(4, 4);
        tiles[2] = GrayImage::new(4, 3);

        let err = merge_quadrants(&tiles).unwrap_err();
        assert_eq!(
            err,
            MosaicError::DimensionMismatch {
                quadrant: Quadrant::BottomLeft,
                expected_width: 4,
                expected_height: 4,
                actual_width: 4,
                actual_height: 3,
            }
        );
    }

    #[test]
    fn test_dimension_mismatch_names_offending_quadrant() {
        let mut tiles = gray_tiles(4, 4);
        tiles[1] = GrayImage::new(8, 4);

        let err = merge_quadrants(&tiles).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("top-right"), "message: {message}");
        assert!(message.contains("8\u{d7}4"), "message: {message}");
    }

    proptest! {
        /// Every pixel of the mosaic equals the corresponding pixel of its
        /// source quadrant.
        #[test]
        fn prop_pixel_placement(
            width in 1u32..16,
            height in 1u32..16,
            index in 0usize..4,
            seed in 0u8..255,
        ) {
            let tiles: [GrayImage; 4] = [0u8, 1, 2, 3].map(|i| {
                GrayImage::from_fn(width, height, |x, y| {
                    Luma([seed.wrapping_add(i).wrapping_add((x * 31 + y * 7) as u8)])
                })
            });
            let merged = merge_quadrants(&tiles).unwrap();

            let quadrant = Quadrant::from_index(index).unwrap();
            let (ox, oy) = quadrant.pixel_offset(width, height);
            for (x, y, pixel) in tiles[index].enumerate_pixels() {
                prop_assert_eq!(merged.get_pixel(ox + x, oy + y), pixel);
            }
        }
    }
}
