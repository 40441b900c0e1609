//! Rounded-rectangle perimeter math.
//!
//! Coordinates are y-down with the rectangle's top-left corner at the origin.
//! Arc-length positions start at `(r, 0)`, where the top-left corner arc ends,
//! and run clockwise:
//!
//! ```text
//!   start → top edge ──────────→ ╮
//!   ╭                            │ right edge
//!   │ left edge                  ↓
//!   ╰ ←────────── bottom edge ── ╯
//! ```

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::Point;

/// Clamp a corner radius into `[0, min(width, height) / 2]`.
pub fn clamp_corner_radius(width: f64, height: f64, corner_radius: f64) -> f64 {
    let limit = (width.min(height) / 2.0).max(0.0);
    corner_radius.clamp(0.0, limit)
}

/// Perimeter of a rectangle with four identical rounded corners.
///
/// Oversized radii are clamped so straight edges never go negative.
/// Non-positive extents yield `0.0`.
pub fn perimeter(width: f64, height: f64, corner_radius: f64) -> f64 {
    if !(width > 0.0 && height > 0.0) {
        return 0.0;
    }
    let r = clamp_corner_radius(width, height, corner_radius);
    2.0 * (width - 2.0 * r) + 2.0 * (height - 2.0 * r) + TAU * r
}

/// Map an arc-length distance to a point on the rounded-rectangle outline.
///
/// `distance` is taken modulo the perimeter; negative values wrap backwards.
pub fn position_along_perimeter(distance: f64, width: f64, height: f64, corner_radius: f64) -> Point {
    let total = perimeter(width, height, corner_radius);
    if total <= 0.0 || !distance.is_finite() {
        return Point::ORIGIN;
    }

    let r = clamp_corner_radius(width, height, corner_radius);
    let straight_h = width - 2.0 * r;
    let straight_v = height - 2.0 * r;
    let arc = FRAC_PI_2 * r;

    let mut s = distance.rem_euclid(total);

    // Top edge, left → right
    if s <= straight_h {
        return Point::new(r + s, 0.0);
    }
    s -= straight_h;

    // Top-right arc
    if s <= arc {
        return arc_point(Point::new(width - r, r), r, -FRAC_PI_2, s);
    }
    s -= arc;

    // Right edge, top → bottom
    if s <= straight_v {
        return Point::new(width, r + s);
    }
    s -= straight_v;

    // Bottom-right arc
    if s <= arc {
        return arc_point(Point::new(width - r, height - r), r, 0.0, s);
    }
    s -= arc;

    // Bottom edge, right → left
    if s <= straight_h {
        return Point::new(width - r - s, height);
    }
    s -= straight_h;

    // Bottom-left arc
    if s <= arc {
        return arc_point(Point::new(r, height - r), r, FRAC_PI_2, s);
    }
    s -= arc;

    // Left edge, bottom → top
    if s <= straight_v {
        return Point::new(0.0, height - r - s);
    }
    s -= straight_v;

    // Top-left arc, closing back at (r, 0)
    arc_point(Point::new(r, r), r, PI, s.min(arc))
}

/// Point `s` along a clockwise (y-down) arc of radius `r` starting at `start_angle`.
fn arc_point(center: Point, r: f64, start_angle: f64, s: f64) -> Point {
    if r <= 0.0 {
        return center;
    }
    let theta = start_angle + s / r;
    Point::new(center.x + r * theta.cos(), center.y + r * theta.sin())
}
