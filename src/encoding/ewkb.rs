//! Hex-encoded (E)WKB, as PostGIS prints geometries.
//!
//! Bytes are read and written by `geozero`; this module owns the hex layer
//! and accepts linestrings only, reporting any other geometry by name.
use geozero::error::{GeozeroError, Result as GeozeroResult};
use geozero::wkb::Ewkb;
use geozero::{CoordDimensions, GeomProcessor, GeozeroGeometry, ToWkb};
use nalgebra::Point2;

use crate::error::{Encoding, Error, Result};
use crate::trajectory::{TimedPosition, Vertex};
use crate::Precision;

/// Collects the vertices of a single top-level linestring.
#[derive(Default)]
struct LineCollector {
    vertices: Vec<Vertex>,
    saw_linestring: bool,
    wrong_type: Option<&'static str>,
}

impl LineCollector {
    fn reject(&mut self, name: &'static str) -> GeozeroResult<()> {
        self.wrong_type = Some(name);
        Err(GeozeroError::Geometry(format!("unexpected {name}")))
    }
}

impl GeomProcessor for LineCollector {
    fn dimensions(&self) -> CoordDimensions {
        CoordDimensions::xyzm()
    }

    fn xy(&mut self, x: f64, y: f64, _idx: usize) -> GeozeroResult<()> {
        self.vertices.push(Vertex::new(x, y));
        Ok(())
    }

    // M is read and discarded.
    fn coordinate(
        &mut self,
        x: f64,
        y: f64,
        z: Option<f64>,
        _m: Option<f64>,
        _t: Option<f64>,
        _tm: Option<u64>,
        _idx: usize,
    ) -> GeozeroResult<()> {
        self.vertices.push(Vertex {
            point: Point2::new(x, y),
            z,
        });
        Ok(())
    }

    fn linestring_begin(&mut self, tagged: bool, size: usize, _idx: usize) -> GeozeroResult<()> {
        if !tagged {
            return self.reject("MultiLineString");
        }
        self.saw_linestring = true;
        self.vertices.reserve(size);
        Ok(())
    }

    fn point_begin(&mut self, _idx: usize) -> GeozeroResult<()> {
        self.reject("Point")
    }

    fn empty_point(&mut self, _idx: usize) -> GeozeroResult<()> {
        self.reject("Point")
    }

    fn multipoint_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.reject("MultiPoint")
    }

    fn multilinestring_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.reject("MultiLineString")
    }

    fn polygon_begin(&mut self, _tagged: bool, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.reject("Polygon")
    }

    fn multipolygon_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.reject("MultiPolygon")
    }

    fn geometrycollection_begin(&mut self, _size: usize, _idx: usize) -> GeozeroResult<()> {
        self.reject("GeometryCollection")
    }
}

/// Decode a hex (E)WKB LINESTRING into vertices.
///
/// Either byte order; PostGIS Z/M/SRID flags. A fourth (M) ordinate is dropped.
pub fn decode(hex_text: &str) -> Result<Vec<Vertex>> {
    let bytes = hex::decode(hex_text.trim())
        .map_err(|e| Error::malformed(Encoding::WkbHex, e.to_string()))?;
    let mut collector = LineCollector::default();
    let processed = Ewkb(bytes).process_geom(&mut collector);
    if let Some(name) = collector.wrong_type {
        return Err(Error::WrongGeometryType {
            found: name.to_owned(),
        });
    }
    processed.map_err(|e| Error::malformed(Encoding::WkbHex, e.to_string()))?;
    if !collector.saw_linestring {
        return Err(Error::WrongGeometryType {
            found: "unsupported geometry".to_owned(),
        });
    }
    Ok(collector.vertices)
}

/// Positions which can be fed to a WKB writer as coordinates.
pub trait WkbCoord {
    const HAS_Z: bool;

    fn process<P: GeomProcessor>(&self, processor: &mut P, idx: usize) -> GeozeroResult<()>;
}

impl WkbCoord for Point2<Precision> {
    const HAS_Z: bool = false;

    fn process<P: GeomProcessor>(&self, processor: &mut P, idx: usize) -> GeozeroResult<()> {
        processor.xy(self.x, self.y, idx)
    }
}

impl WkbCoord for TimedPosition {
    const HAS_Z: bool = true;

    fn process<P: GeomProcessor>(&self, processor: &mut P, idx: usize) -> GeozeroResult<()> {
        // Exact below 2^53 seconds.
        let time = Some(self.time as f64);
        processor.coordinate(self.point.x, self.point.y, time, None, None, None, idx)
    }
}

/// A slice of positions seen as one linestring geometry.
struct Line<'a, P>(&'a [P]);

impl<P: WkbCoord> GeozeroGeometry for Line<'_, P> {
    fn process_geom<Pr: GeomProcessor>(&self, processor: &mut Pr) -> GeozeroResult<()> {
        processor.linestring_begin(true, self.0.len(), 0)?;
        for (idx, position) in self.0.iter().enumerate() {
            position.process(processor, idx)?;
        }
        processor.linestring_end(true, 0)
    }

    fn dims(&self) -> CoordDimensions {
        if P::HAS_Z {
            CoordDimensions::xyz()
        } else {
            CoordDimensions::xy()
        }
    }
}

/// Serialise positions as lower-case hex EWKB (little-endian, no SRID).
pub fn encode<P: WkbCoord>(positions: &[P]) -> Result<String> {
    let line = Line(positions);
    let bytes = line
        .to_ewkb(line.dims(), None)
        .map_err(|e| Error::EncodeFailed {
            encoding: Encoding::WkbHex,
            reason: e.to_string(),
        })?;
    Ok(hex::encode(bytes))
}
