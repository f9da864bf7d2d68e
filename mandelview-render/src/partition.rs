/// A contiguous run of frame rows owned by one worker for one frame.
///
/// `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    pub start: u32,
    pub end: u32,
}

impl RowBand {
    /// Number of rows in this band.
    pub fn height(&self) -> u32 {
        self.end - self.start
    }
}

/// Split `frame_height` rows into `worker_count` bands.
///
/// Every band is `frame_height / worker_count` rows tall except the last,
/// which also takes the remainder. The bands are contiguous, never overlap,
/// and together cover exactly `0..frame_height`.
pub fn partition(worker_count: usize, frame_height: u32) -> Vec<RowBand> {
    debug_assert!(worker_count >= 1, "need at least one worker");
    let count = worker_count.max(1) as u32;
    let band_height = frame_height / count;

    let bands: Vec<RowBand> = (0..count)
        .map(|i| RowBand {
            start: i * band_height,
            end: if i == count - 1 {
                frame_height // Last band takes any remainder rows
            } else {
                (i + 1) * band_height
            },
        })
        .collect();

    debug_assert!(covers_exactly(&bands, frame_height));
    bands
}

/// Workers to use for a frame of `frame_height` rows.
///
/// A pinned count wins; otherwise the available hardware parallelism is
/// used. Either way the count is clamped so every band gets at least one row.
pub fn resolve_worker_count(pinned: Option<usize>, frame_height: u32) -> usize {
    let requested = pinned.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    requested.clamp(1, frame_height.max(1) as usize)
}

/// `true` when `bands` tile `0..frame_height` in order with no gap or overlap.
pub fn covers_exactly(bands: &[RowBand], frame_height: u32) -> bool {
    let mut next = 0;
    for band in bands {
        if band.start != next || band.end < band.start {
            return false;
        }
        next = band.end;
    }
    next == frame_height
}
