//! Per-pixel orchestration.
//!
//! Two states, selected per invocation from configuration with no history:
//! passthrough (direct letterbox sample) and enhanced (reconstruction plus
//! sharpening). Pixels outside the fitted video area are opaque black in
//! both.

use crate::filter::config::FilterConfig;
use crate::filter::easu::{EasuConstants, easu_pixel};
use crate::filter::letterbox::Letterbox;
use crate::filter::sharpen::{Neighborhood, sharpen_pixel};
use crate::foundation::core::{Canvas, Sample};
use crate::foundation::error::FrameliftResult;
use crate::frame::source::Sampler;

/// Per-frame sampling plan: the letterbox fit plus the reconstruction
/// kernel constants, hoisted once per frame and shared read-only across
/// all pixel invocations.
#[derive(Clone, Copy, Debug)]
pub struct FilterPlan {
    letterbox: Letterbox,
    constants: EasuConstants,
    canvas: Canvas,
}

impl FilterPlan {
    /// The letterbox mapper for this geometry.
    pub fn letterbox(&self) -> &Letterbox {
        &self.letterbox
    }

    /// The reconstruction constants for this geometry.
    pub fn constants(&self) -> &EasuConstants {
        &self.constants
    }

    /// The output surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }
}

/// Validate geometry and configuration, then build the per-frame plan.
///
/// Cheap and pure: callers may rebuild it per frame, or whenever the
/// source size, canvas, or configuration changes.
#[tracing::instrument(skip(src, cfg))]
pub fn plan_frame<S: Sampler + ?Sized>(
    src: &S,
    canvas: Canvas,
    cfg: &FilterConfig,
) -> FrameliftResult<FilterPlan> {
    cfg.validate()?;
    let (w, h) = (src.width(), src.height());
    let letterbox = Letterbox::new(w, h, canvas, cfg.quality)?;
    let constants = EasuConstants::new(&letterbox, w, h);
    tracing::debug!(
        source_width = w,
        source_height = h,
        canvas_width = canvas.width,
        canvas_height = canvas.height,
        "planned frame geometry"
    );
    Ok(FilterPlan {
        letterbox,
        constants,
        canvas,
    })
}

/// Compute one output pixel.
pub fn filter_pixel<S: Sampler + ?Sized>(
    src: &S,
    plan: &FilterPlan,
    cfg: &FilterConfig,
    x: u32,
    y: u32,
) -> Sample {
    let (xi, yi) = (x as i32, y as i32);
    let Some((u, v)) = plan.letterbox.map(xi, yi) else {
        return Sample::BLACK;
    };

    if !cfg.enhance {
        return src.sample(u, v);
    }

    let e = easu_pixel(src, &plan.constants, cfg, [x as f32, y as f32]);

    let nb = Neighborhood {
        tl: plan.letterbox.sample(src, xi - 1, yi - 1),
        top: plan.letterbox.sample(src, xi, yi - 1),
        tr: plan.letterbox.sample(src, xi + 1, yi - 1),
        left: plan.letterbox.sample(src, xi - 1, yi),
        right: plan.letterbox.sample(src, xi + 1, yi),
        bl: plan.letterbox.sample(src, xi - 1, yi + 1),
        bottom: plan.letterbox.sample(src, xi, yi + 1),
        br: plan.letterbox.sample(src, xi + 1, yi + 1),
    };

    sharpen_pixel(e, &nb, cfg)
}
