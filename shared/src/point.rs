/// 2D point utilities in scene space.
/// Scene space has its origin at the top-left corner with y growing downward.

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Angle of the direction from `from` to `to`, in radians.
pub fn heading(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Point at `radius` from `center` along `angle`.
pub fn on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Floor both coordinates to whole scene units.
pub fn floor(p: Point) -> Point {
    Point::new(p.x.floor(), p.y.floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(0.0, 0.0);
        assert!((distance(a, b) - 5.0).abs() < EPS);
        assert!((distance(b, a) - 5.0).abs() < EPS);
    }

    #[test]
    fn heading_points_down_for_larger_y() {
        // y grows downward, so "below" is +PI/2.
        let h = heading(Point::new(10.0, 10.0), Point::new(10.0, 50.0));
        assert!((h - std::f64::consts::FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn on_circle_keeps_radius() {
        let c = Point::new(100.0, 200.0);
        for i in 0..16 {
            let angle = i as f64 * 0.4;
            let p = on_circle(c, 70.0, angle);
            assert!((distance(c, p) - 70.0).abs() < 1e-6);
        }
    }

    #[test]
    fn floor_truncates_toward_negative_infinity() {
        let p = floor(Point::new(12.7, -0.5));
        assert_eq!(p, Point::new(12.0, -1.0));
    }
}
