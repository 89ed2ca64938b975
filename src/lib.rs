//! UEIT is an electronic test-card renderer.
//!
//! It draws the classic UEIT calibration pattern (bars, gradients, grids
//! and fiducials) as a pure function of the output size, animates a
//! frame-number/FPS overlay on top of cached backgrounds, and can batch-
//! export frame sequences as C-source pixel arrays for firmware test rigs.
//!
//! # Pipeline overview
//!
//! 1. **Place**: [`Grid`] maps the fixed 18-row logical grid (24 or 32
//!    columns, chosen by aspect ratio) to pixel rectangles with integer
//!    rational arithmetic.
//! 2. **Render**: [`render_card`] paints the static card for one of the 8
//!    [`FrameVariant`]s into a [`Canvas`] of packed `0xFFRRGGBB` words.
//! 3. **Compose**: [`FramePipeline`] caches the 8 variants and stamps the
//!    per-frame info line over the selected one.
//! 4. **Drive**: either [`run_live`] paces a display loop against a
//!    [`PresentSink`], or an [`ExportJob`] serializes frames to a
//!    `.h`/`.c` artifact pair.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: identical `(width, height, variant)`
//!   inputs produce byte-identical pixels on every platform; geometry
//!   never touches floating point.
//! - **Single owner of pixel data**: the pipeline is the only writer of
//!   the variant cache and the composed frame, whichever driver consumes
//!   it.

#![forbid(unsafe_code)]

pub mod card;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod geometry;
pub mod overlay;
pub mod pacer;
pub mod pipeline;
pub mod raster;

pub use card::render_card;
pub use config::{DEFAULT_TARGET_RATE, RunConfig};
pub use core::{Canvas, FrameVariant, OverlayState, Rgb8};
pub use error::{UeitError, UeitResult};
pub use export::{ExportArtifacts, ExportJob, derive_fps};
pub use geometry::{GRID_ROWS, Grid, grid_cols};
pub use pacer::{FpsMeter, FramePacer, Pace, PresentSink, RATE_MAX, RATE_MIN, run_live};
pub use pipeline::FramePipeline;
