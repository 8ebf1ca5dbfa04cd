//! Convert between line-geometry encodings and [Trajectory]s.
//!
//! Two input encodings are accepted: (E)WKT and hex (E)WKB.
//! Output is written as WKT, or optionally as hex EWKB.
pub mod ewkb;
pub mod wkt;

use log::{debug, warn};

use crate::error::{Encoding, Result};
use crate::trajectory::{Trajectory, Vertex};

pub use self::ewkb::WkbCoord;
pub use self::wkt::WktCoord;

/// A trajectory in one of the supported encodings, not yet decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source<'a> {
    Wkt(&'a str),
    WkbHex(&'a str),
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.filter(|s| !s.trim().is_empty())
}

impl<'a> Source<'a> {
    /// Pick the encoding to decode from two optional fields.
    ///
    /// Blank strings count as absent. If both are given, WKT wins.
    pub fn from_fields(wkt: Option<&'a str>, wkb_hex: Option<&'a str>) -> Result<Self> {
        match (non_blank(wkt), non_blank(wkb_hex)) {
            (Some(text), Some(_)) => {
                warn!("both WKT and WKB hex trajectories given; ignoring WKB hex");
                Ok(Source::Wkt(text))
            }
            (Some(text), None) => Ok(Source::Wkt(text)),
            (None, Some(hex_text)) => Ok(Source::WkbHex(hex_text)),
            (None, None) => Err(crate::Error::MissingInput),
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Source::Wkt(_) => Encoding::Wkt,
            Source::WkbHex(_) => Encoding::WkbHex,
        }
    }

    /// Decode into a trajectory of at least two vertices.
    pub fn decode(&self) -> Result<Trajectory<Vertex>> {
        let vertices = match self {
            Source::Wkt(text) => wkt::decode(text)?,
            Source::WkbHex(hex_text) => ewkb::decode(hex_text)?,
        };
        debug!(
            "decoded {} vertices from {}",
            vertices.len(),
            self.encoding()
        );
        Trajectory::new(vertices)
    }
}

/// Decode whichever of the two encodings is present.
pub fn decode(wkt: Option<&str>, wkb_hex: Option<&str>) -> Result<Trajectory<Vertex>> {
    Source::from_fields(wkt, wkb_hex)?.decode()
}
