//! One resampling request, from encoded input to encoded output.
use log::debug;
use serde::Deserialize;

use crate::encoding;
use crate::error::Result;
use crate::resample::{resample, Metric, Resampled, SamplingPolicy};

/// A trajectory, in either encoding, and how to reduce it.
///
/// Can be deserialised from any serde format:
///
/// ```
/// # use trajectory_sampler::{Metric, Sampler};
/// let json = r#"{
///     "wkt_trajectory": "LINESTRING Z (10 50 1577836800, 10.1 50.1 1577844000)",
///     "metric": "time",
///     "sample_rate": 1
/// }"#;
/// let sampler: Sampler = serde_json::from_str(json).unwrap();
/// assert_eq!(sampler.metric, Metric::Time);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Sampler {
    /// e.g. `LINESTRING Z (x y timestamp, ...)`, optionally with an EWKT `SRID=n;` prefix.
    #[serde(default)]
    pub wkt_trajectory: Option<String>,
    /// Hex (E)WKB as printed by PostGIS.
    #[serde(default)]
    pub wkb_hex_trajectory: Option<String>,
    pub metric: Metric,
    /// Hours for [Metric::Time], meters for [Metric::Distance].
    pub sample_rate: u32,
}

impl Sampler {
    pub fn new(metric: Metric, sample_rate: u32) -> Self {
        Self {
            wkt_trajectory: None,
            wkb_hex_trajectory: None,
            metric,
            sample_rate,
        }
    }

    pub fn with_wkt(mut self, text: impl Into<String>) -> Self {
        self.wkt_trajectory = Some(text.into());
        self
    }

    pub fn with_wkb_hex(mut self, hex_text: impl Into<String>) -> Self {
        self.wkb_hex_trajectory = Some(hex_text.into());
        self
    }

    /// Decode, resample and return the reduced positions.
    pub fn run(&self) -> Result<Resampled> {
        let policy = SamplingPolicy::new(self.metric, self.sample_rate)?;
        let trajectory = encoding::decode(
            self.wkt_trajectory.as_deref(),
            self.wkb_hex_trajectory.as_deref(),
        )?;
        let reduced = resample(&trajectory, &policy)?;
        debug!(
            "{} sampling at rate {}: {} -> {} positions",
            policy.metric,
            policy.rate,
            trajectory.len(),
            reduced.len()
        );
        Ok(reduced)
    }

    /// Resample and encode the result as WKT.
    pub fn resample(&self) -> Result<String> {
        Ok(self.run()?.to_wkt())
    }

    /// Resample and encode the result as hex EWKB.
    pub fn resample_to_ewkb_hex(&self) -> Result<String> {
        self.run()?.to_ewkb_hex()
    }
}
