//! Ordered positions of a single trace.
use nalgebra::Point2;
use num_traits::ToPrimitive;

use crate::error::{Error, Result};
use crate::Precision;

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// A coordinate as it came out of the decoder: x (longitude), y (latitude)
/// and the optional third ordinate, which carries time in 3D traces.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub point: Point2<Precision>,
    pub z: Option<Precision>,
}

impl Vertex {
    pub fn new(x: Precision, y: Precision) -> Self {
        Self {
            point: Point2::new(x, y),
            z: None,
        }
    }

    pub fn with_z(x: Precision, y: Precision, z: Precision) -> Self {
        Self {
            point: Point2::new(x, y),
            z: Some(z),
        }
    }
}

/// A position with an exact integer timestamp.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimedPosition {
    pub point: Point2<Precision>,
    pub time: Timestamp,
}

impl TimedPosition {
    pub fn new(x: Precision, y: Precision, time: Timestamp) -> Self {
        Self {
            point: Point2::new(x, y),
            time,
        }
    }
}

/// An ordered sequence of at least two positions.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<P> {
    positions: Vec<P>,
}

impl<P> Trajectory<P> {
    pub fn new(positions: Vec<P>) -> Result<Self> {
        if positions.len() < 2 {
            return Err(Error::EmptyTrajectory {
                len: positions.len(),
            });
        }
        Ok(Self { positions })
    }

    pub fn positions(&self) -> &[P] {
        &self.positions
    }

    pub fn into_positions(self) -> Vec<P> {
        self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn first(&self) -> &P {
        &self.positions[0]
    }

    pub fn last(&self) -> &P {
        &self.positions[self.positions.len() - 1]
    }
}

impl Trajectory<Vertex> {
    /// Drop the third ordinate; great-circle distance ignores the time axis.
    pub fn flatten_to_2d(&self) -> Trajectory<Point2<Precision>> {
        Trajectory {
            positions: self.positions.iter().map(|v| v.point).collect(),
        }
    }

    /// Interpret the third ordinate as whole seconds since the epoch.
    ///
    /// Fractional seconds are truncated toward zero.
    pub fn timed(&self) -> Result<Trajectory<TimedPosition>> {
        let positions = self
            .positions
            .iter()
            .enumerate()
            .map(|(index, v)| -> Result<TimedPosition> {
                let z = v.z.ok_or(Error::MissingTimestamp { index })?;
                let time = z
                    .to_i64()
                    .ok_or(Error::InvalidTimestamp { index, value: z })?;
                Ok(TimedPosition {
                    point: v.point,
                    time,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Trajectory { positions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short() {
        assert_eq!(
            Trajectory::<Vertex>::new(vec![]),
            Err(Error::EmptyTrajectory { len: 0 })
        );
        assert_eq!(
            Trajectory::new(vec![Vertex::new(1.0, 2.0)]),
            Err(Error::EmptyTrajectory { len: 1 })
        );
    }

    #[test]
    fn never_empty() {
        let t = Trajectory::new(vec![Vertex::new(1.0, 2.0), Vertex::new(3.0, 4.0)]).unwrap();
        assert_eq!(t.len(), 2);
        assert!(!t.is_empty());
    }

    #[test]
    fn flatten() {
        let t = Trajectory::new(vec![
            Vertex::with_z(1.0, 2.0, 100.0),
            Vertex::with_z(3.0, 4.0, 200.0),
        ])
        .unwrap();
        let flat = t.flatten_to_2d();
        assert_eq!(
            flat.positions(),
            &[Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)]
        );
    }

    #[test]
    fn timed_truncates() {
        let t = Trajectory::new(vec![
            Vertex::with_z(1.0, 2.0, 100.9),
            Vertex::with_z(3.0, 4.0, 1_577_836_800.0),
        ])
        .unwrap();
        let timed = t.timed().unwrap();
        assert_eq!(timed.first().time, 100);
        assert_eq!(timed.last().time, 1_577_836_800);
    }

    #[test]
    fn timed_needs_z() {
        let t = Trajectory::new(vec![Vertex::with_z(1.0, 2.0, 100.0), Vertex::new(3.0, 4.0)])
            .unwrap();
        assert_eq!(t.timed(), Err(Error::MissingTimestamp { index: 1 }));
    }

    #[test]
    fn timed_rejects_nonfinite() {
        let t = Trajectory::new(vec![
            Vertex::with_z(1.0, 2.0, 100.0),
            Vertex::with_z(3.0, 4.0, f64::INFINITY),
        ])
        .unwrap();
        assert!(matches!(
            t.timed(),
            Err(Error::InvalidTimestamp { index: 1, .. })
        ));
    }
}
