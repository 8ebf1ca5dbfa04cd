//! Reduce a timed trajectory to one position per time bucket.
//!
//! Every timestamp is rounded to the nearest multiple of the bucket width
//! (counted from 0001-01-01T00:00:00Z, exact integer seconds). Halfway values round
//! up to the later boundary. Within each bucket the first position in the
//! original order is kept, and buckets are emitted in ascending time order.
use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::trajectory::{TimedPosition, Timestamp, Trajectory};

/// Seconds from 0001-01-01T00:00:00Z, where the bucket grid starts, to the Unix epoch.
const GRID_ORIGIN_OFFSET: i64 = 62_135_596_800;

/// The boundary instant a timestamp was rounded to.
pub type TimeBucket = DateTime<Utc>;

/// Assigns timestamps to buckets of a fixed width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bucketing {
    width: TimeDelta,
}

impl Bucketing {
    /// `width` must be at least one second.
    pub fn new(width: TimeDelta) -> Result<Self> {
        if width.num_seconds() < 1 {
            return Err(Error::InvalidSampleRate);
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> TimeDelta {
        self.width
    }

    /// Round to the nearest bucket boundary, in seconds.
    ///
    /// None if the boundary is not representable.
    pub fn round(&self, time: Timestamp) -> Option<Timestamp> {
        let width = self.width.num_seconds();
        let shifted = time.checked_add(GRID_ORIGIN_OFFSET)?;
        let past_floor = shifted.rem_euclid(width);
        let floor = shifted - past_floor;
        let rounded = if past_floor >= width - past_floor {
            floor.checked_add(width)?
        } else {
            floor
        };
        rounded.checked_sub(GRID_ORIGIN_OFFSET)
    }

    pub fn bucket(&self, time: Timestamp) -> Option<TimeBucket> {
        DateTime::<Utc>::from_timestamp(self.round(time)?, 0)
    }
}

/// Keep the first position (in original order) of every time bucket,
/// ordered by bucket, then make sure the trajectory's last position closes the output.
///
/// Fails if fewer than two positions remain.
pub fn resample_time(
    trajectory: &Trajectory<TimedPosition>,
    bucketing: &Bucketing,
) -> Result<Vec<TimedPosition>> {
    let positions = trajectory.positions();

    let mut first_in_bucket: BTreeMap<TimeBucket, usize> = BTreeMap::new();
    for (index, position) in positions.iter().enumerate() {
        let bucket = bucketing
            .bucket(position.time)
            .ok_or(Error::InvalidTimestamp {
                index,
                value: position.time as f64,
            })?;
        first_in_bucket.entry(bucket).or_insert(index);
    }
    debug!(
        "{} positions fall into {} buckets of {}s",
        positions.len(),
        first_in_bucket.len(),
        bucketing.width().num_seconds()
    );

    let mut reduced: Vec<TimedPosition> = first_in_bucket
        .iter()
        .map(|(bucket, &index)| {
            trace!("bucket {bucket}: keeping position {index}");
            positions[index]
        })
        .collect();

    let last = *trajectory.last();
    if reduced.last() != Some(&last) {
        reduced.push(last);
    }

    if reduced.len() < 2 {
        return Err(Error::InsufficientSamples { len: reduced.len() });
    }
    Ok(reduced)
}
