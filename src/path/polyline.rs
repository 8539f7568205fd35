use crate::{distance::haversine_m, path::Trajectory, record::GeodeticRecord};

/// A point along the flown path
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PathPoint {
    /// Latitude (decimal degrees)
    pub latitude_deg: f64,
    /// Longitude (decimal degrees)
    pub longitude_deg: f64,
    /// Ellipsoidal height (m)
    pub height_m: f64,
    /// Continuous GPST seconds
    pub gpst_s: f64,
    /// Cumulative path distance from the polyline origin (m)
    pub cumulative_m: f64,
}

impl PathPoint {
    pub(crate) fn distance_m(&self, rhs: &Self) -> f64 {
        haversine_m(
            self.latitude_deg,
            self.longitude_deg,
            rhs.latitude_deg,
            rhs.longitude_deg,
        )
    }

    /// Linear interpolation of position and time from self towards rhs
    pub(crate) fn lerp(&self, rhs: &Self, ratio: f64) -> Self {
        Self {
            latitude_deg: self.latitude_deg + ratio * (rhs.latitude_deg - self.latitude_deg),
            longitude_deg: self.longitude_deg + ratio * (rhs.longitude_deg - self.longitude_deg),
            height_m: self.height_m + ratio * (rhs.height_m - self.height_m),
            gpst_s: self.gpst_s + ratio * (rhs.gpst_s - self.gpst_s),
            cumulative_m: self.cumulative_m + ratio * (rhs.cumulative_m - self.cumulative_m),
        }
    }
}

impl From<&GeodeticRecord> for PathPoint {
    fn from(record: &GeodeticRecord) -> Self {
        Self {
            latitude_deg: record.latitude_deg,
            longitude_deg: record.longitude_deg,
            height_m: record.height_m,
            gpst_s: record.gpst_seconds(),
            cumulative_m: 0.0,
        }
    }
}

/// [Polyline] indexes the flown path between two endpoints by cumulative
/// path distance, so that any distance along the path can be resolved.
/// The endpoints are always the first and last vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    vertices: Vec<PathPoint>,
}

impl Polyline {
    /// Builds the [Polyline] between start and end, going through every
    /// dense sample strictly in between. Samples closer than coalesce_m
    /// to the previous vertex are skipped.
    pub fn between(
        start: &PathPoint,
        end: &PathPoint,
        trajectory: &Trajectory,
        coalesce_m: f64,
    ) -> Self {
        let inner = trajectory.inner_window(start.gpst_s, end.gpst_s);

        let mut vertices = Vec::with_capacity(inner.len() + 2);

        vertices.push(PathPoint {
            cumulative_m: 0.0,
            ..*start
        });

        for sample in inner {
            let mut vertex = PathPoint::from(sample);
            let last = &vertices[vertices.len() - 1];
            let dist = last.distance_m(&vertex);
            if dist < coalesce_m {
                continue;
            }
            vertex.cumulative_m = last.cumulative_m + dist;
            vertices.push(vertex);
        }

        // end vertex replaces a trailing sample it would be coalesced with
        if vertices.len() > 1 && vertices[vertices.len() - 1].distance_m(end) < coalesce_m {
            vertices.pop();
        }

        let last = &vertices[vertices.len() - 1];
        let cumulative_m = last.cumulative_m + last.distance_m(end);
        vertices.push(PathPoint {
            cumulative_m,
            ..*end
        });

        Self { vertices }
    }

    pub fn vertices(&self) -> &[PathPoint] {
        &self.vertices
    }

    /// Total path length (m)
    pub fn length_m(&self) -> f64 {
        self.vertices
            .last()
            .map(|v| v.cumulative_m)
            .unwrap_or_default()
    }

    /// Resolves the point located at this cumulative path distance, by linear
    /// interpolation between the bracketing vertices. Distances beyond the
    /// path length are clamped to the last vertex.
    pub fn locate(&self, distance_m: f64) -> PathPoint {
        let first = self.vertices[0];
        let last = self.vertices[self.vertices.len() - 1];

        if distance_m <= 0.0 {
            return first;
        }

        let index = self
            .vertices
            .partition_point(|v| v.cumulative_m < distance_m);

        if index >= self.vertices.len() {
            return last;
        }
        if index == 0 {
            return first;
        }

        let (before, after) = (&self.vertices[index - 1], &self.vertices[index]);
        let segment_m = after.cumulative_m - before.cumulative_m;
        if segment_m <= 0.0 {
            return *after;
        }

        let ratio = (distance_m - before.cumulative_m) / segment_m;
        let mut point = before.lerp(after, ratio);
        point.cumulative_m = distance_m;
        point
    }
}
