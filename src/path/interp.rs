use log::debug;

use crate::path::{PathPoint, Polyline, Trajectory};

/// Point resolved by the [interpolate] process
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interpolated {
    /// Position, time and cumulative path distance from the start
    pub point: PathPoint,
    /// Path distance from the previous point, or from the start
    /// for the first one (m)
    pub distance_from_prev_m: f64,
}

/// Result of one [interpolate] process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interpolation {
    /// Evenly spaced points, in path order
    pub points: Vec<Interpolated>,
    /// Path length between the two endpoints (m)
    pub length_m: f64,
    /// True when the dense log could not describe this path
    /// and the endpoints were directly interpolated
    pub direct: bool,
}

impl Interpolation {
    /// Path distance remaining from this point to the end point
    pub fn distance_to_end_m(&self, point: &PathPoint) -> f64 {
        (self.length_m - point.cumulative_m).max(0.0)
    }
}

/// Resolves n points evenly spaced by path distance between start and end,
/// following the flown path described by the dense [Trajectory].
/// Falls back to direct interpolation between the endpoints when less than
/// 2 dense samples lie within [start, end].
pub fn interpolate(
    start: &PathPoint,
    end: &PathPoint,
    n: usize,
    trajectory: &Trajectory,
    coalesce_m: f64,
) -> Interpolation {
    let start = PathPoint {
        cumulative_m: 0.0,
        ..*start
    };

    if trajectory.window(start.gpst_s, end.gpst_s).len() < 2 {
        debug!(
            "{:.3}s-{:.3}s: not enough dense samples, direct interpolation",
            start.gpst_s, end.gpst_s
        );
        return interpolate_direct(&start, end, n);
    }

    let polyline = Polyline::between(&start, end, trajectory, coalesce_m);
    let length_m = polyline.length_m();
    let segment_m = length_m / (n as f64 + 1.0);

    let mut points = Vec::with_capacity(n);
    let mut prev_cumulative_m = 0.0;

    for i in 1..=n {
        let point = polyline.locate(i as f64 * segment_m);
        points.push(Interpolated {
            point,
            distance_from_prev_m: point.cumulative_m - prev_cumulative_m,
        });
        prev_cumulative_m = point.cumulative_m;
    }

    Interpolation {
        points,
        length_m,
        direct: false,
    }
}

/// Equal ratio interpolation between the two endpoints,
/// distances are point to point.
fn interpolate_direct(start: &PathPoint, end: &PathPoint, n: usize) -> Interpolation {
    let mut points = Vec::<Interpolated>::with_capacity(n);
    let mut prev = *start;

    for i in 1..=n {
        let ratio = i as f64 / (n as f64 + 1.0);
        let mut point = start.lerp(end, ratio);
        let distance_from_prev_m = prev.distance_m(&point);
        point.cumulative_m = prev.cumulative_m + distance_from_prev_m;
        points.push(Interpolated {
            point,
            distance_from_prev_m,
        });
        prev = point;
    }

    let length_m = prev.cumulative_m + prev.distance_m(end);

    Interpolation {
        points,
        length_m,
        direct: true,
    }
}
