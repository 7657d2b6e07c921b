//! Whole-frame drivers.
//!
//! Every output pixel reads only the immutable source frame and the shared
//! plan, and writes only its own slot, so a frame pass parallelizes across
//! rows with no synchronization. The source must stay a consistent
//! snapshot for the duration of one pass; that guarantee belongs to the
//! frame source, not the filter.

use rayon::prelude::*;

use crate::filter::config::FilterConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{FrameliftError, FrameliftResult};
use crate::frame::source::{FrameRgba, Sampler};
use crate::pipeline::orchestrator::{FilterPlan, filter_pixel, plan_frame};

/// Threading options for a whole-frame pass; sequential by default.
#[derive(Clone, Debug, Default)]
pub struct FilterThreading {
    /// Fan rows out across a rayon pool instead of a single thread.
    pub parallel: bool,
    /// Pool size override; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// Filter a whole frame sequentially.
#[tracing::instrument(skip(src, cfg))]
pub fn filter_frame<S: Sampler + ?Sized>(
    src: &S,
    canvas: Canvas,
    cfg: &FilterConfig,
) -> FrameliftResult<FrameRgba> {
    let plan = plan_frame(src, canvas, cfg)?;
    let mut data = alloc_output(canvas)?;
    let row_bytes = canvas.width as usize * 4;
    for (y, row) in data.chunks_exact_mut(row_bytes).enumerate() {
        fill_row(src, &plan, cfg, y as u32, row);
    }
    Ok(FrameRgba {
        width: canvas.width,
        height: canvas.height,
        data,
    })
}

/// Filter a whole frame, optionally fanning rows out across a thread pool.
///
/// Produces byte-identical output to [`filter_frame`].
#[tracing::instrument(skip(src, cfg))]
pub fn filter_frame_with_threading<S: Sampler + ?Sized>(
    src: &S,
    canvas: Canvas,
    cfg: &FilterConfig,
    threading: &FilterThreading,
) -> FrameliftResult<FrameRgba> {
    if !threading.parallel {
        return filter_frame(src, canvas, cfg);
    }

    let plan = plan_frame(src, canvas, cfg)?;
    let pool = build_thread_pool(threading.threads)?;
    let mut data = alloc_output(canvas)?;
    let row_bytes = canvas.width as usize * 4;

    pool.install(|| {
        data.par_chunks_exact_mut(row_bytes)
            .enumerate()
            .for_each(|(y, row)| fill_row(src, &plan, cfg, y as u32, row));
    });

    Ok(FrameRgba {
        width: canvas.width,
        height: canvas.height,
        data,
    })
}

fn alloc_output(canvas: Canvas) -> FrameliftResult<Vec<u8>> {
    let len = (canvas.width as usize)
        .checked_mul(canvas.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| FrameliftError::filter("output buffer size overflow"))?;
    Ok(vec![0u8; len])
}

fn fill_row<S: Sampler + ?Sized>(
    src: &S,
    plan: &FilterPlan,
    cfg: &FilterConfig,
    y: u32,
    row: &mut [u8],
) {
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let s = filter_pixel(src, plan, cfg, x as u32, y);
        px.copy_from_slice(&s.to_rgba8());
    }
}

fn build_thread_pool(threads: Option<usize>) -> FrameliftResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FrameliftError::validation(
            "filter threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FrameliftError::filter(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Sample;
    use crate::frame::source::SourceFrame;

    fn noisy_frame(w: u32, h: u32) -> SourceFrame {
        SourceFrame::from_fn(w, h, |x, y| {
            let v = ((x * 31 + y * 17 + 7) % 11) as f32 / 11.0;
            Sample::opaque([v, 1.0 - v, (x + y) as f32 / (w + h) as f32])
        })
        .unwrap()
    }

    #[test]
    fn zero_threads_is_a_validation_error() {
        let src = noisy_frame(4, 4);
        let threading = FilterThreading {
            parallel: true,
            threads: Some(0),
        };
        let err = filter_frame_with_threading(
            &src,
            Canvas::new(8, 8).unwrap(),
            &FilterConfig::default(),
            &threading,
        )
        .unwrap_err();
        assert!(matches!(err, FrameliftError::Validation(_)));
    }

    #[test]
    fn parallel_output_matches_sequential() {
        let src = noisy_frame(6, 5);
        let canvas = Canvas::new(13, 9).unwrap();
        let cfg = FilterConfig::default();

        let seq = filter_frame(&src, canvas, &cfg).unwrap();
        let par = filter_frame_with_threading(
            &src,
            canvas,
            &cfg,
            &FilterThreading {
                parallel: true,
                threads: Some(2),
            },
        )
        .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn frame_dimensions_match_the_canvas() {
        let src = noisy_frame(4, 4);
        let canvas = Canvas::new(10, 7).unwrap();
        let out = filter_frame(&src, canvas, &FilterConfig::default()).unwrap();
        assert_eq!((out.width, out.height), (10, 7));
        assert_eq!(out.data.len(), 10 * 7 * 4);
    }
}
