use nalgebra::Point2;

use crate::trajectory::{TimedPosition, Timestamp, Trajectory};
use crate::Precision;

/// Mean earth radius used by `geo`'s haversine.
const EARTH_RADIUS: Precision = 6_371_008.8;

fn meters_to_degrees(meters: Precision) -> Precision {
    (meters / EARTH_RADIUS).to_degrees()
}

pub fn make_line(points: Vec<[Precision; 2]>) -> Vec<Point2<Precision>> {
    points.into_iter().map(Point2::from).collect()
}

/// Points due north of (0, 0), at the given distances in meters.
pub fn meridian_line(offsets: &[Precision]) -> Vec<Point2<Precision>> {
    offsets
        .iter()
        .map(|m| Point2::new(0.0, meters_to_degrees(*m)))
        .collect()
}

/// Points due east of (0, 0), at the given distances in meters.
pub fn equator_line(offsets: &[Precision]) -> Vec<Point2<Precision>> {
    offsets
        .iter()
        .map(|m| Point2::new(meters_to_degrees(*m), 0.0))
        .collect()
}

pub fn timed(
    positions: impl IntoIterator<Item = (Precision, Precision, Timestamp)>,
) -> Trajectory<TimedPosition> {
    Trajectory::new(
        positions
            .into_iter()
            .map(|(x, y, t)| TimedPosition::new(x, y, t))
            .collect(),
    )
    .unwrap()
}
