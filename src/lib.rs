//! Framelift is an edge-adaptive video frame reconstruction filter.
//!
//! One pass turns a lower- (or same-) resolution source frame into an
//! output surface: an anisotropic 12-tap spatial upsampler followed by a
//! contrast-adaptive luma sharpener, computed independently for every
//! output pixel. Decoding, playback, and presentation are external
//! concerns; sources arrive through the [`Sampler`] seam and results leave
//! as plain pixel buffers.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: [`plan_frame`] validates geometry + configuration and
//!    hoists the per-frame state (letterbox fit, kernel constants).
//! 2. **Map**: [`Letterbox`] resolves each output pixel to a normalized
//!    source coordinate (aspect-preserving fit, edge inset); pixels outside
//!    the fitted area are opaque black.
//! 3. **Reconstruct**: [`easu_pixel`] runs the 12-tap edge-adaptive kernel
//!    in XYZ space.
//! 4. **Sharpen**: [`sharpen_pixel`] blends a contrast-adaptive luma boost
//!    over the 3×3 direct neighborhood.
//!
//! [`filter_frame`] and [`filter_frame_with_threading`] drive the whole
//! output grid; [`filter_pixel`] exposes the per-pixel function directly.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Stateless across frames**: every per-frame value is recomputed from
//!   (source size, canvas, configuration); nothing persists.
//! - **No IO in the filter**: decoding helpers live at the edge
//!   ([`decode_image`]); the filter itself is pure math over samplers.
//! - **Data-parallel by construction**: pixels share only read-only state,
//!   so frame passes fan out across rows without synchronization.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod filter;
mod foundation;
mod frame;
mod pipeline;

pub use color::convert::{RGB_TO_XYZ, XYZ_TO_RGB, rgb_to_xyz, xyz_to_rgb};
pub use filter::config::{FilterConfig, QualityMode, parse_quality_mode};
pub use filter::easu::{EasuConstants, easu_pixel};
pub use filter::edge::edge_strength;
pub use filter::letterbox::Letterbox;
pub use filter::sharpen::{Neighborhood, sharpen_pixel};
pub use foundation::core::{AspectState, Canvas, REC709_LUMA, Sample, rec709_luma};
pub use foundation::error::{FrameliftError, FrameliftResult};
pub use frame::decode::decode_image;
pub use frame::source::{FrameRgba, Sampler, SourceFrame};
pub use pipeline::orchestrator::{FilterPlan, filter_pixel, plan_frame};
pub use pipeline::parallel::{FilterThreading, filter_frame, filter_frame_with_threading};
