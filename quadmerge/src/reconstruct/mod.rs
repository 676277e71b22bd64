//! Scene reconstruction from four quadrant captures.
//!
//! This is the core merge: four RGB tiles, four co-registered thermal
//! tiles, and four annotation sets go in; one double-size RGB mosaic, one
//! double-size thermal mosaic, and one remapped annotation set come out.
//! Everything is computed in memory; persisting the results is the job
//! layer's concern (see [`job`]).

pub mod job;

use image::{GrayImage, RgbImage};
use tracing::debug;

use crate::annotation::{AnnotationSet, FrameSize};
use crate::mosaic::{self, MosaicError};
use crate::quadrant::Quadrant;

/// A fully merged scene.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// RGB mosaic, (2W, 2H).
    pub primary: RgbImage,
    /// Thermal mosaic, (2W, 2H).
    pub thermal: GrayImage,
    /// Merged annotation set in the combined frame.
    pub annotations: AnnotationSet,
}

/// Merge four quadrant captures into one scene.
///
/// Inputs are index-aligned with [`Quadrant::ALL`]: position 0 is the
/// top-left capture, 1 top-right, 2 bottom-left, 3 bottom-right. The
/// shared tile dimensions (W, H) are taken from the top-left RGB tile.
///
/// The merged annotation set reports a combined frame of (2W, 2H) with
/// channel depth 3 (the RGB mosaic's; the thermal mosaic shares the
/// record). Objects are appended in quadrant order, keeping their original
/// order within each quadrant, with each point shifted by its quadrant's
/// offset.
///
/// # Errors
///
/// Returns [`MosaicError::DimensionMismatch`] if either raster set is not
/// uniformly sized. No partial result is produced.
pub fn reconstruct(
    primary: [RgbImage; 4],
    thermal: [GrayImage; 4],
    annotations: [AnnotationSet; 4],
) -> Result<Reconstruction, MosaicError> {
    let (width, height) = primary[0].dimensions();

    let merged_primary = mosaic::merge_quadrants(&primary)?;
    let merged_thermal = mosaic::merge_quadrants(&thermal)?;

    let mut merged = AnnotationSet::new(FrameSize::combined(width * 2, height * 2));
    for (quadrant, set) in Quadrant::ALL.into_iter().zip(annotations) {
        let (dx, dy) = quadrant.point_offset(width, height);
        debug!(%quadrant, objects = set.len(), dx, dy, "remapping annotations");
        for mut object in set.into_objects() {
            object.translate(dx, dy);
            merged.push(object);
        }
    }

    Ok(Reconstruction {
        primary: merged_primary,
        thermal: merged_thermal,
        annotations: merged,
    })
}
