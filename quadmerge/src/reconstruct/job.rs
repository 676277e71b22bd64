//! Path-driven merge jobs.
//!
//! [`ReconstructRequest`] names the twelve input files and three output
//! files of one merge; [`run`] loads everything, performs the in-memory
//! reconstruction, and only then writes the outputs. All three artifacts
//! are encoded before the first byte hits disk, so a failing stage never
//! leaves a stale mosaic next to a missing annotation file.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{
    DynamicImage, EncodableLayout, ImageBuffer, ImageFormat, ImageReader, PixelWithColorType,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::annotation::{AnnotationError, AnnotationSet};
use crate::mosaic::MosaicError;
use crate::reconstruct::{reconstruct, Reconstruction};

/// Errors from a merge job. The first failure aborts the job; nothing is
/// retried and nothing is written after an error.
#[derive(Debug, Error)]
pub enum JobError {
    /// Failed to open or read an input file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input image could not be decoded.
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An annotation file could not be parsed.
    #[error("failed to parse annotations {}: {source}", path.display())]
    Annotation {
        path: PathBuf,
        #[source]
        source: AnnotationError,
    },

    /// The quadrant rasters do not line up.
    #[error(transparent)]
    Mosaic(#[from] MosaicError),

    /// A merged raster could not be encoded for the requested output path.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The merged annotation set could not be serialized.
    #[error("failed to serialize merged annotations: {0}")]
    Serialize(#[source] AnnotationError),

    /// Failed to write an output file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All paths for one merge, inputs in quadrant index order
/// (top-left, top-right, bottom-left, bottom-right).
#[derive(Debug, Clone)]
pub struct ReconstructRequest {
    /// Four RGB quadrant images.
    pub primary: [PathBuf; 4],
    /// Four single-channel thermal quadrant images.
    pub thermal: [PathBuf; 4],
    /// Four annotation documents, index-aligned with the rasters.
    pub annotations: [PathBuf; 4],
    /// Output path for the RGB mosaic; format follows the extension.
    pub output_primary: PathBuf,
    /// Output path for the thermal mosaic; format follows the extension.
    pub output_thermal: PathBuf,
    /// Output path for the merged annotation document.
    pub output_annotations: PathBuf,
}

impl ReconstructRequest {
    pub fn new(
        primary: [PathBuf; 4],
        thermal: [PathBuf; 4],
        annotations: [PathBuf; 4],
        output_primary: impl Into<PathBuf>,
        output_thermal: impl Into<PathBuf>,
        output_annotations: impl Into<PathBuf>,
    ) -> Self {
        Self {
            primary,
            thermal,
            annotations,
            output_primary: output_primary.into(),
            output_thermal: output_thermal.into(),
            output_annotations: output_annotations.into(),
        }
    }
}

/// Outcome summary of a completed merge job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructReport {
    /// Combined mosaic width.
    pub width: u32,
    /// Combined mosaic height.
    pub height: u32,
    /// Number of annotation objects in the merged set.
    pub objects: usize,
}

impl fmt::Display for ReconstructReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "merged scene {}\u{d7}{} with {} annotated objects",
            self.width, self.height, self.objects
        )
    }
}

/// Execute a merge job.
///
/// Loads all inputs, reconstructs the scene in memory, encodes every
/// output, and finally writes the three files. Any error aborts before
/// the write phase; write errors surface with the offending path.
pub fn run(request: &ReconstructRequest) -> Result<ReconstructReport, JobError> {
    info!(
        output = %request.output_primary.display(),
        "starting quadrant merge"
    );

    let primary = load_quadrants(&request.primary, |image| image.to_rgb8())?;
    let thermal = load_quadrants(&request.thermal, |image| image.to_luma8())?;
    let annotations = load_annotations(&request.annotations)?;

    let scene = reconstruct(primary, thermal, annotations)?;

    // Encode everything before the first write so a failure cannot leave
    // partial output behind.
    let primary_bytes = encode_raster(&scene.primary, &request.output_primary)?;
    let thermal_bytes = encode_raster(&scene.thermal, &request.output_thermal)?;
    let document = scene
        .annotations
        .to_xml_string()
        .map_err(JobError::Serialize)?;

    write_output(&request.output_primary, &primary_bytes)?;
    write_output(&request.output_thermal, &thermal_bytes)?;
    write_output(&request.output_annotations, document.as_bytes())?;

    let report = report_for(&scene);
    info!(
        width = report.width,
        height = report.height,
        objects = report.objects,
        "quadrant merge complete"
    );
    Ok(report)
}

fn report_for(scene: &Reconstruction) -> ReconstructReport {
    let (width, height) = scene.primary.dimensions();
    ReconstructReport {
        width,
        height,
        objects: scene.annotations.len(),
    }
}

fn load_quadrants<P, F>(paths: &[PathBuf; 4], convert: F) -> Result<[P; 4], JobError>
where
    F: Fn(DynamicImage) -> P,
{
    let [a, b, c, d] = paths;
    Ok([
        convert(open_image(a)?),
        convert(open_image(b)?),
        convert(open_image(c)?),
        convert(open_image(d)?),
    ])
}

fn open_image(path: &Path) -> Result<DynamicImage, JobError> {
    debug!(path = %path.display(), "loading image");
    let reader = ImageReader::open(path).map_err(|source| JobError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    reader.decode().map_err(|source| JobError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn load_annotations(paths: &[PathBuf; 4]) -> Result<[AnnotationSet; 4], JobError> {
    let [a, b, c, d] = paths;
    Ok([
        open_annotations(a)?,
        open_annotations(b)?,
        open_annotations(c)?,
        open_annotations(d)?,
    ])
}

fn open_annotations(path: &Path) -> Result<AnnotationSet, JobError> {
    debug!(path = %path.display(), "loading annotations");
    let document = fs::read_to_string(path).map_err(|source| JobError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    AnnotationSet::from_xml_str(&document).map_err(|source| JobError::Annotation {
        path: path.to_path_buf(),
        source,
    })
}

fn encode_raster<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    path: &Path,
) -> Result<Vec<u8>, JobError>
where
    P: PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
{
    let encode = |path: &Path| -> Result<Vec<u8>, image::ImageError> {
        let format = ImageFormat::from_path(path)?;
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, format)?;
        Ok(buffer.into_inner())
    };
    encode(path).map_err(|source| JobError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), JobError> {
    fs::write(path, bytes).map_err(|source| JobError::Write {
        path: path.to_path_buf(),
        source,
    })
}
