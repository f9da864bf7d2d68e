use eframe::egui;

use mandelview_core::viewport::WHEEL_DELTA_PER_NOTCH;
use mandelview_core::View;

/// Plane delta that keeps the content under the cursor while dragging.
///
/// `drag` is in screen points over a canvas of `canvas` points showing a
/// `frame_width × frame_height` frame. Rows grow downward in both the frame
/// and the plane, so the content follows the pointer on both axes.
pub(crate) fn drag_to_plane(
    view: &View,
    drag: egui::Vec2,
    canvas: egui::Vec2,
    frame_width: u32,
    frame_height: u32,
) -> (f64, f64) {
    let scale_x = frame_width as f64 / (canvas.x as f64).max(1.0);
    let scale_y = frame_height as f64 / (canvas.y as f64).max(1.0);
    let (unit_x, unit_y) = view.units_per_pixel(frame_width, frame_height);
    (
        -(drag.x as f64) * scale_x * unit_x,
        -(drag.y as f64) * scale_y * unit_y,
    )
}

/// Convert an egui scroll amount to platform wheel units (120 per notch).
///
/// `line_scroll_speed` is the points egui adds per wheel line
/// (`InputOptions::line_scroll_speed`).
pub(crate) fn wheel_delta(scroll_points: f32, line_scroll_speed: f32) -> f64 {
    let points_per_notch = (line_scroll_speed as f64).max(f64::EPSILON);
    scroll_points as f64 / points_per_notch * WHEEL_DELTA_PER_NOTCH
}
