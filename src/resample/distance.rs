//! Resample a path by placing evenly-spaced points along its great-circle length.
use log::debug;
use nalgebra::Point2;
use std::num::NonZeroU32;

use crate::trajectory::Trajectory;
use crate::{great_circle_distance, Precision};

/// Offsets closer than this fraction of the total length to the end are the end.
const END_TOLERANCE: Precision = 1e-9;

/// Create a new path by traversing the original (lon, lat) vertices,
/// placing a point every `sample_distance` meters of great-circle length.
///
/// Points are linearly interpolated between the two vertices bracketing each offset.
/// The first vertex is always kept, and so is the last, even when the
/// final gap is shorter than `sample_distance`.
///
/// A zero-point line remains zero-point; a single-point line keeps that single point.
/// A line of zero length is reduced to its first point.
///
/// `sample_distance` must be positive and finite (panics otherwise).
pub fn sample_every(
    line: &[Point2<Precision>],
    sample_distance: Precision,
) -> Vec<Point2<Precision>> {
    if !(sample_distance > 0.0 && sample_distance.is_finite()) {
        panic!("`sample_distance` must be positive");
    }
    if line.len() <= 1 {
        return line.to_vec();
    }

    let edge_lengths: Vec<Precision> = line
        .windows(2)
        .map(|pair| great_circle_distance(&pair[0], &pair[1]))
        .collect();
    let total = edge_lengths.iter().sum::<Precision>();
    if total == 0.0 {
        return vec![line[0]];
    }
    let end = total * (1.0 - END_TOLERANCE);

    let mut out = vec![line[0]];
    let mut step: u64 = 1;
    let mut offset = sample_distance;
    let mut walked = 0.0;

    for (pair, edge_length) in line.windows(2).zip(edge_lengths) {
        if edge_length == 0.0 {
            continue;
        }
        let edge_end = walked + edge_length;
        while offset < edge_end && offset < end {
            let along = (offset - walked) / edge_length;
            out.push(pair[0] + (pair[1] - pair[0]) * along);
            step += 1;
            // multiply rather than accumulate, so long paths don't drift
            offset = sample_distance * step as Precision;
        }
        walked = edge_end;
    }

    out.push(line[line.len() - 1]);
    out
}

/// Resample a trajectory with a point every `rate` meters.
pub fn resample_distance(
    trajectory: &Trajectory<Point2<Precision>>,
    rate: NonZeroU32,
) -> Vec<Point2<Precision>> {
    let out = sample_every(trajectory.positions(), rate.get() as Precision);
    debug!(
        "distance resampling every {}m: {} -> {} positions",
        rate,
        trajectory.len(),
        out.len()
    );
    out
}
