//! Reduce the point count of GPS trajectories.
//!
//! A trajectory is read from (E)WKT or hex (E)WKB, reduced with one of two strategies,
//! and written back out:
//!
//! - **distance**: a point every `rate` meters of great-circle length, linearly interpolated.
//! - **time**: the first position of every `rate`-hour bucket, always ending on the last position.
//!
//! ```
//! use trajectory_sampler::{Metric, Sampler};
//!
//! let reduced = Sampler::new(Metric::Time, 2)
//!     .with_wkt("LINESTRING Z (10 50 1577840400, 11 50 1577844000, 12 50 1577847600)")
//!     .resample()
//!     .unwrap();
//! assert_eq!(reduced, "LINESTRING Z (10 50 1577840400, 12 50 1577847600)");
//! ```
use geo::{Distance, Haversine, Point};
pub use nalgebra;
use nalgebra::Point2;

pub mod encoding;
pub mod error;
pub mod resample;
pub mod sampler;
pub mod trajectory;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use resample::{resample, Metric, Resampled, SamplingPolicy};
pub use sampler::Sampler;
pub use trajectory::{TimedPosition, Timestamp, Trajectory, Vertex};

pub type Precision = f64;

/// Great-circle distance in meters between two (longitude, latitude) points.
pub fn great_circle_distance(a: &Point2<Precision>, b: &Point2<Precision>) -> Precision {
    Haversine::distance(Point::new(a.x, a.y), Point::new(b.x, b.y))
}

/// Find the total great-circle length of a path, in meters.
pub fn path_length(line: &[Point2<Precision>]) -> Precision {
    if line.len() < 2 {
        return 0.0;
    }
    line.windows(2)
        .map(|points| great_circle_distance(&points[0], &points[1]))
        .sum::<Precision>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{equator_line, make_line, meridian_line};
    use approx::assert_relative_eq;

    #[test]
    fn length_short() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&make_line(vec![[1.0, 2.0]])), 0.0);
    }

    #[test]
    fn length_meridian() {
        let line = meridian_line(&[0.0, 250.0, 1000.0]);
        assert_relative_eq!(path_length(&line), 1000.0, max_relative = 1e-9);
    }

    #[test]
    fn length_equator() {
        let line = equator_line(&[0.0, 100.0, 50.0]);
        assert_relative_eq!(path_length(&line), 150.0, max_relative = 1e-9);
    }

    #[test]
    fn london_paris() {
        let london = Point2::new(-0.1278, 51.5074);
        let paris = Point2::new(2.3522, 48.8566);
        let d = great_circle_distance(&london, &paris);
        assert!((340_000.0..350_000.0).contains(&d), "{d}");
    }
}
