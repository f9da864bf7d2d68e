use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, error, info, trace};

use mandelview_core::{
    DetailLevel, DetailScheduler, EngineConfig, Fractal, Mandelbrot, View, Viewport,
    COARSEST_LEVEL,
};

use crate::buffer::FrameBuffer;
use crate::error::RenderError;
use crate::job::RenderJob;
use crate::partition::{partition, resolve_worker_count, RowBand};
use crate::present::FramePresenter;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// What one completed frame cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub elapsed: Duration,
    pub detail_level: DetailLevel,
    pub stride: u32,
    /// Points actually run through the escape loop.
    pub samples: u64,
    pub workers: usize,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Progressive, banded frame renderer and the state it owns.
///
/// The engine holds the viewport, the current detail level, the reusable
/// frame buffer, and a worker pool sized once at construction. Input methods
/// (`pan`, `zoom_by_wheel`, ...) are called from the owning thread between
/// frames; each frame renders from a snapshot of the viewport so all workers
/// agree on center and zoom.
///
/// The engine is generic over the fractal for static dispatch; the default
/// is the Mandelbrot set.
pub struct Engine<F = Mandelbrot> {
    config: EngineConfig,
    fractal: F,
    viewport: Viewport,
    scheduler: DetailScheduler,
    detail_level: DetailLevel,
    /// Input arrived since the last completed frame.
    interaction_pending: bool,
    needs_render: bool,
    buffer: FrameBuffer,
    /// `buffer` holds a frame every band finished.
    frame_complete: bool,
    bands: Vec<RowBand>,
    pool: ThreadPool,
}

impl Engine<Mandelbrot> {
    /// Build a Mandelbrot engine using `config.max_iterations` as the cap.
    pub fn new(config: EngineConfig) -> crate::Result<Self> {
        let fractal = Mandelbrot::new(config.max_iterations);
        Self::with_fractal(config, fractal)
    }
}

impl<F: Fractal + Sync> Engine<F> {
    /// Validate `config`, allocate the frame buffer and start the workers.
    ///
    /// The worker count is fixed here for the life of the engine.
    pub fn with_fractal(config: EngineConfig, fractal: F) -> crate::Result<Self> {
        config.validate()?;

        let workers = resolve_worker_count(config.workers, config.height);
        let bands = partition(workers, config.height);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("render-{i}"))
            .build()?;

        info!(
            workers,
            width = config.width,
            height = config.height,
            max_iterations = fractal.max_iterations(),
            max_detail_level = config.max_detail_level,
            "Render engine ready"
        );

        Ok(Self {
            scheduler: DetailScheduler::from_config(&config),
            viewport: Viewport::new(Instant::now()),
            detail_level: COARSEST_LEVEL,
            // Startup counts as an interaction: the first frame is coarse.
            interaction_pending: true,
            needs_render: true,
            buffer: FrameBuffer::new(config.width, config.height),
            frame_complete: false,
            bands,
            pool,
            fractal,
            config,
        })
    }

    // -- Accessors --

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scheduler(&self) -> &DetailScheduler {
        &self.scheduler
    }

    /// Level of the last completed frame.
    pub fn detail_level(&self) -> DetailLevel {
        self.detail_level
    }

    pub fn worker_count(&self) -> usize {
        self.bands.len()
    }

    pub fn bands(&self) -> &[RowBand] {
        &self.bands
    }

    /// The last completed frame.
    ///
    /// `None` before the first frame and after a failed one, whose bands may
    /// have been partly overwritten.
    pub fn buffer(&self) -> Option<&FrameBuffer> {
        self.frame_complete.then_some(&self.buffer)
    }

    /// `false` once a full-detail frame of the current view exists and no
    /// input has arrived since.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    // -- Input --

    /// Move the center by a plane-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) -> crate::Result<()> {
        self.viewport.pan(dx, dy, Instant::now())?;
        self.mark_interaction();
        Ok(())
    }

    /// Multiply the zoom by `factor`.
    pub fn zoom_by(&mut self, factor: f64) -> crate::Result<()> {
        self.viewport.zoom_by(factor, Instant::now())?;
        self.mark_interaction();
        Ok(())
    }

    /// Zoom from a raw wheel delta: `zoom *= 1.1^(delta / 120)`.
    pub fn zoom_by_wheel(&mut self, delta: f64) -> crate::Result<()> {
        self.viewport.zoom_by_wheel(delta, Instant::now())?;
        self.mark_interaction();
        Ok(())
    }

    pub fn set_view(&mut self, view: View) -> crate::Result<()> {
        self.viewport.set_view(view, Instant::now())?;
        self.mark_interaction();
        Ok(())
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset(Instant::now());
        self.mark_interaction();
    }

    fn mark_interaction(&mut self) {
        self.interaction_pending = true;
        self.needs_render = true;
    }

    // -- Rendering --

    /// Pick the next detail level and render the current view.
    pub fn render_next_frame(&mut self) -> crate::Result<FrameStats> {
        self.render_next_frame_at(Instant::now())
    }

    /// Like [`render_next_frame`](Self::render_next_frame) with an explicit
    /// clock reading for the detail scheduler.
    pub fn render_next_frame_at(&mut self, now: Instant) -> crate::Result<FrameStats> {
        let level = if self.interaction_pending {
            COARSEST_LEVEL
        } else {
            self.scheduler
                .next_level(self.viewport.last_interaction(), now, self.detail_level)
        };

        let stats = self.render_frame(self.viewport.view(), level)?;

        self.detail_level = stats.detail_level;
        self.interaction_pending = false;
        self.needs_render = stats.detail_level < self.scheduler.max_level();
        if !self.needs_render {
            debug!(elapsed_ms = stats.elapsed.as_millis(), "Full detail reached");
        }
        Ok(stats)
    }

    /// Render the next frame and hand it to `presenter`.
    ///
    /// The presenter is only called when every worker succeeded.
    pub fn render_and_present<P>(&mut self, presenter: &mut P) -> crate::Result<FrameStats>
    where
        P: FramePresenter + ?Sized,
    {
        let stats = self.render_next_frame()?;
        presenter.present(&self.buffer);
        Ok(stats)
    }

    /// Render `view` at `detail_level` into the frame buffer.
    ///
    /// One job per band runs on the pool; this call returns only after all
    /// of them have finished. If any worker panics the whole frame fails and
    /// [`buffer`](Self::buffer) reports no frame until the next success.
    ///
    /// This is the stateless primitive under
    /// [`render_next_frame`](Self::render_next_frame): it does not touch the
    /// viewport, [`detail_level`](Self::detail_level) or
    /// [`needs_render`](Self::needs_render).
    pub fn render_frame(
        &mut self,
        view: View,
        detail_level: DetailLevel,
    ) -> crate::Result<FrameStats> {
        let start = Instant::now();
        self.frame_complete = false;
        let level = detail_level.min(self.scheduler.max_level());
        let stride = self.scheduler.stride(level);
        let (width, height) = (self.buffer.width(), self.buffer.height());
        debug!(
            width,
            height,
            workers = self.bands.len(),
            detail_level = level,
            stride,
            "Starting frame"
        );

        let fractal = &self.fractal;
        let jobs: Vec<RenderJob<'_>> = self
            .bands
            .iter()
            .zip(self.buffer.split_bands(&self.bands))
            .map(|(&rows, pixels)| RenderJob::new(rows, view, level, stride, width, height, pixels))
            .collect();

        let outcomes: Vec<std::thread::Result<u64>> = self.pool.install(|| {
            jobs.into_par_iter()
                .map(|job| panic::catch_unwind(AssertUnwindSafe(|| job.run(fractal))))
                .collect()
        });

        let mut samples = 0;
        for (band, (rows, outcome)) in self.bands.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(n) => samples += n,
                Err(_) => {
                    error!(band, start = rows.start, end = rows.end, "Render worker panicked");
                    return Err(RenderError::WorkerFailed {
                        band,
                        start: rows.start,
                        end: rows.end,
                    });
                }
            }
        }

        self.frame_complete = true;
        let elapsed = start.elapsed();
        trace!(elapsed_us = elapsed.as_micros(), samples, "Frame complete");

        Ok(FrameStats {
            elapsed,
            detail_level: level,
            stride,
            samples,
            workers: self.bands.len(),
        })
    }
}
