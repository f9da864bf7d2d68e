use crate::buffer::FrameBuffer;

/// Receives finished frames for display.
///
/// Only called after every worker has completed, so the buffer is always a
/// whole frame. The presenter owns its own refresh cadence; it must copy
/// what it needs because the buffer is overwritten by the next frame.
pub trait FramePresenter {
    fn present(&mut self, frame: &FrameBuffer);
}

impl<T: FnMut(&FrameBuffer)> FramePresenter for T {
    fn present(&mut self, frame: &FrameBuffer) {
        self(frame)
    }
}
