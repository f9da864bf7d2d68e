use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("render worker {band} failed on rows {start}..{end}; frame discarded")]
    WorkerFailed { band: usize, start: u32, end: u32 },

    #[error(transparent)]
    Core(#[from] mandelview_core::CoreError),
}
