//! Reduce the number of positions in a trajectory.
//!
//! Two strategies are available:
//! - [Metric::Distance]: uniform resampling along the great-circle length, rate in meters.
//! - [Metric::Time]: one position per time bucket, rate in hours.
pub mod distance;
pub mod time;

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::TimeDelta;
use nalgebra::Point2;
use serde::Deserialize;

use crate::encoding::{ewkb, wkt};
use crate::error::{Error, Result};
use crate::trajectory::{TimedPosition, Trajectory, Vertex};
use crate::Precision;

pub use self::distance::{resample_distance, sample_every};
pub use self::time::{resample_time, Bucketing, TimeBucket};

/// How to measure the gap between kept positions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Metric {
    /// Sample rate in meters.
    Distance,
    /// Sample rate in hours.
    Time,
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(Metric::Distance),
            "time" => Ok(Metric::Time),
            _ => Err(Error::InvalidMetric(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Distance => f.write_str("distance"),
            Metric::Time => f.write_str("time"),
        }
    }
}

/// A metric and a positive rate in that metric's unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SamplingPolicy {
    pub metric: Metric,
    pub rate: NonZeroU32,
}

impl SamplingPolicy {
    pub fn new(metric: Metric, rate: u32) -> Result<Self> {
        let rate = NonZeroU32::new(rate).ok_or(Error::InvalidSampleRate)?;
        Ok(Self { metric, rate })
    }

    pub fn interval_meters(&self) -> Precision {
        self.rate.get() as Precision
    }

    pub fn bucket_width(&self) -> TimeDelta {
        TimeDelta::hours(self.rate.get() as i64)
    }
}

/// Output of [resample]: planar for distance sampling, timed for time sampling.
#[derive(Clone, Debug, PartialEq)]
pub enum Resampled {
    Planar(Vec<Point2<Precision>>),
    Timed(Vec<TimedPosition>),
}

impl Resampled {
    pub fn len(&self) -> usize {
        match self {
            Resampled::Planar(p) => p.len(),
            Resampled::Timed(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `LINESTRING(x y,...)` or `LINESTRING Z (x y t, ...)`.
    pub fn to_wkt(&self) -> String {
        match self {
            Resampled::Planar(p) => wkt::encode(p),
            Resampled::Timed(p) => wkt::encode(p),
        }
    }

    /// Little-endian hex EWKB, with the Z flag for timed output.
    pub fn to_ewkb_hex(&self) -> Result<String> {
        match self {
            Resampled::Planar(p) => ewkb::encode(p),
            Resampled::Timed(p) => ewkb::encode(p),
        }
    }
}

/// Apply the policy's strategy to a decoded trajectory.
///
/// Distance sampling ignores any third ordinate; time sampling requires it.
pub fn resample(trajectory: &Trajectory<Vertex>, policy: &SamplingPolicy) -> Result<Resampled> {
    match policy.metric {
        Metric::Distance => Ok(Resampled::Planar(resample_distance(
            &trajectory.flatten_to_2d(),
            policy.rate,
        ))),
        Metric::Time => {
            let bucketing = Bucketing::new(policy.bucket_width())?;
            resample_time(&trajectory.timed()?, &bucketing).map(Resampled::Timed)
        }
    }
}
