//! QuadMerge - quadrant scene reconstruction
//!
//! This library stitches four quadrant captures back into one scene: four
//! RGB images become one double-width/double-height mosaic, four
//! co-registered thermal images become a matching single-channel mosaic,
//! and four point-annotation documents are merged into one with every
//! coordinate remapped into the combined frame.
//!
//! Inputs are always supplied in quadrant index order - top-left,
//! top-right, bottom-left, bottom-right (see [`quadrant::Quadrant`]).
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use quadmerge::reconstruct::job::{run, ReconstructRequest};
//!
//! fn paths(stem: &str) -> [PathBuf; 4] {
//!     [1, 2, 3, 4].map(|i| PathBuf::from(format!("{stem}{i}.png")))
//! }
//!
//! let request = ReconstructRequest::new(
//!     paths("image"),
//!     paths("tir"),
//!     [1, 2, 3, 4].map(|i| PathBuf::from(format!("annotation{i}.xml"))),
//!     "merged.png",
//!     "merged_tir.png",
//!     "merged.xml",
//! );
//! let report = run(&request)?;
//! println!("{report}");
//! # Ok::<(), quadmerge::reconstruct::job::JobError>(())
//! ```

pub mod annotation;
pub mod mosaic;
pub mod quadrant;
pub mod reconstruct;

pub use annotation::{AnnotationError, AnnotationSet, FrameSize, Point};
pub use mosaic::{merge_quadrants, MosaicError};
pub use quadrant::Quadrant;
pub use reconstruct::job::{run, JobError, ReconstructReport, ReconstructRequest};
pub use reconstruct::{reconstruct, Reconstruction};
