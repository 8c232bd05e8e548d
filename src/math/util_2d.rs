use super::trig::TRIG;
use crate::geometry::Point;

/// Returns the angle (radians) at vertex `a` of triangle `abc`, by the law of cosines.
///
/// Degenerate triangles (`a == b` or `a == c`) divide by zero and yield `NaN`.
#[must_use]
pub fn find_angle_in_triangle(a: &Point, b: &Point, c: &Point) -> f64 {
    let ab = Point::distance_between(a, b);
    let bc = Point::distance_between(b, c);
    let ac = Point::distance_between(a, c);

    let ab2 = ab * ab;
    let bc2 = bc * bc;
    let ac2 = ac * ac;

    ((ac2 + ab2 - bc2) / (2.0 * (ac * ab))).acos()
}

/// Converts screen coordinates into isometric grid coordinates.
///
/// The returned point carries the row in `x` and the column in `y`.
#[must_use]
pub fn screen_to_iso(x: f64, y: f64, cell_w: f64, cell_h: f64) -> Point {
    let div_y = y / cell_h;
    let div_x = x / cell_w;
    Point::new(div_y - div_x, div_y + div_x)
}

/// Converts isometric grid coordinates back to screen coordinates.
///
/// Both results are truncated toward zero. Results outside the `i32` range saturate.
#[must_use]
pub fn iso_to_screen(row: f64, col: f64, cell_w: f64, cell_h: f64) -> Point {
    let x = (col - row) * (cell_w * 0.5);
    let y = (col + row) * (cell_h * 0.5);
    Point::new(truncate_i32(x), truncate_i32(y))
}

/// Places a point at `angle` degrees around `center`, at the distance `target` has from it.
///
/// The angle is absolute: only its table cos/sin are used, the current angle of `target`
/// around `center` is discarded.
#[must_use]
pub fn rotate_around_center(target: &Point, center: &Point, angle: f64) -> Point {
    let radius = Point::distance_between(target, center);
    Point::new(
        center.x + TRIG.cos(angle) * radius,
        center.y + TRIG.sin(angle) * radius,
    )
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_i32(value: f64) -> f64 {
    f64::from(value as i32)
}
