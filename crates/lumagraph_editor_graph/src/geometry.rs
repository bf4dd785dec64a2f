// SPDX-License-Identifier: MIT OR Apache-2.0
//! Curve and layout helpers shared by link rendering and node previews.

use egui::{Pos2, Vec2};

/// Number of points used to rasterize a link curve
pub const LINK_SEGMENTS: usize = 30;

/// Vertical offset of the link control point (negative arches upwards)
pub const LINK_ARCH: f32 = -50.0;

/// Control point for a link between two pins: the midpoint lifted by `arch`.
pub fn link_control_point(start: Pos2, end: Pos2, arch: f32) -> Pos2 {
    Pos2::new((start.x + end.x) * 0.5, (start.y + end.y) * 0.5 + arch)
}

/// Evaluate a quadratic bezier curve at `segments` evenly spaced parameters.
///
/// Point `i` is taken at `t = i / (segments - 1)`, so the first point is
/// `start` and the last one is `end`. Fewer than two segments degrade to the
/// straight line between the endpoints.
pub fn quadratic_bezier_points(start: Pos2, control: Pos2, end: Pos2, segments: usize) -> Vec<Pos2> {
    if segments < 2 {
        return vec![start, end];
    }

    let last = (segments - 1) as f32;
    (0..segments)
        .map(|i| {
            let t = i as f32 / last;
            let mt = 1.0 - t;
            let a = mt * mt;
            let b = 2.0 * mt * t;
            let c = t * t;
            Pos2::new(
                a * start.x + b * control.x + c * end.x,
                a * start.y + b * control.y + c * end.y,
            )
        })
        .collect()
}

/// Clamp that checks the lower bound first and never panics.
///
/// When `min > max` (a node larger than the canvas) the value sticks to `min`
/// if below it and to `max` otherwise.
pub fn clamp_to_range(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Fit an image into `max_size`, preserving aspect ratio and never upscaling.
pub fn preview_size(image_size: Vec2, max_size: Vec2) -> Vec2 {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return Vec2::ZERO;
    }

    let scale = (max_size.x / image_size.x)
        .min(max_size.y / image_size.y)
        .min(1.0)
        .max(0.0);
    image_size * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_endpoints() {
        let start = Pos2::new(10.0, 20.0);
        let end = Pos2::new(110.0, 80.0);
        let control = link_control_point(start, end, LINK_ARCH);
        let points = quadratic_bezier_points(start, control, end, LINK_SEGMENTS);

        assert_eq!(points.len(), LINK_SEGMENTS);
        assert_eq!(points[0], start);
        assert!((points[LINK_SEGMENTS - 1] - end).length() < 1e-4);
    }

    #[test]
    fn test_control_point_arches_upward() {
        let control = link_control_point(Pos2::new(0.0, 100.0), Pos2::new(200.0, 100.0), LINK_ARCH);
        assert_eq!(control, Pos2::new(100.0, 50.0));

        // The curve peaks above both endpoints even when they are level
        let points = quadratic_bezier_points(Pos2::new(0.0, 100.0), control, Pos2::new(200.0, 100.0), 31);
        assert!((points[15].y - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_segment_count() {
        let points = quadratic_bezier_points(Pos2::ZERO, Pos2::ZERO, Pos2::new(1.0, 1.0), 1);
        assert_eq!(points, vec![Pos2::ZERO, Pos2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_clamp_to_range() {
        assert_eq!(clamp_to_range(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_to_range(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_to_range(5.0, 0.0, 10.0), 5.0);
        // Inverted bounds do not panic
        assert_eq!(clamp_to_range(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp_to_range(12.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_preview_size() {
        // Never upscales
        assert_eq!(preview_size(Vec2::new(64.0, 64.0), Vec2::new(134.0, f32::INFINITY)), Vec2::new(64.0, 64.0));
        // Width-limited
        assert_eq!(preview_size(Vec2::new(400.0, 200.0), Vec2::new(100.0, f32::INFINITY)), Vec2::new(100.0, 50.0));
        // Height-limited
        assert_eq!(preview_size(Vec2::new(100.0, 400.0), Vec2::new(100.0, 100.0)), Vec2::new(25.0, 100.0));
        assert_eq!(preview_size(Vec2::ZERO, Vec2::splat(10.0)), Vec2::ZERO);
    }
}
