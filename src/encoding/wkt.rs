//! Well-known text through the `wkt` crate.
use std::str::FromStr;

use ::wkt::types::{Coord, LineString};
use ::wkt::Wkt;

use nalgebra::Point2;

use crate::error::{Encoding, Error, Result};
use crate::trajectory::{TimedPosition, Vertex};
use crate::Precision;

/// Strip an EWKT `SRID=4326;` prefix if present.
fn strip_srid(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.split_once(';') {
        Some((head, tail)) if head.trim().to_ascii_uppercase().starts_with("SRID=") => tail.trim(),
        _ => trimmed,
    }
}

fn geometry_keyword(text: &str) -> String {
    text.split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase()
}

/// Parse a (E)WKT LINESTRING, 2D or with a `Z` ordinate.
pub fn decode(text: &str) -> Result<Vec<Vertex>> {
    let text = strip_srid(text);
    let parsed = Wkt::<Precision>::from_str(text)
        .map_err(|e| Error::malformed(Encoding::Wkt, e.to_string()))?;
    match parsed {
        Wkt::LineString(line) => Ok(line
            .0
            .into_iter()
            .map(|c| Vertex {
                point: Point2::new(c.x, c.y),
                z: c.z,
            })
            .collect()),
        _ => Err(Error::WrongGeometryType {
            found: geometry_keyword(text),
        }),
    }
}

/// Positions which can be written as a WKT coordinate.
pub trait WktCoord {
    const HAS_Z: bool;

    fn to_coord(&self) -> Coord<Precision>;
}

impl WktCoord for Point2<Precision> {
    const HAS_Z: bool = false;

    fn to_coord(&self) -> Coord<Precision> {
        Coord {
            x: self.x,
            y: self.y,
            z: None,
            m: None,
        }
    }
}

impl WktCoord for TimedPosition {
    const HAS_Z: bool = true;

    fn to_coord(&self) -> Coord<Precision> {
        Coord {
            x: self.point.x,
            y: self.point.y,
            z: Some(self.time as Precision),
            m: None,
        }
    }
}

/// Serialise positions as a WKT LINESTRING.
///
/// 2D lines use the crate's writer as is: `LINESTRING(x y,x y)`.
/// Timed lines are written `LINESTRING Z (x y t, x y t)`; the crate's line
/// writer leaves out the `Z` tag, which its parser needs to read a third ordinate.
pub fn encode<P: WktCoord>(positions: &[P]) -> String {
    let line = LineString(positions.iter().map(WktCoord::to_coord).collect());
    if !P::HAS_Z || line.0.is_empty() {
        return line.to_string();
    }
    let coords: Vec<String> = line.0.iter().map(|c| c.to_string()).collect();
    format!("LINESTRING Z ({})", coords.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_2d() {
        let v = decode("LINESTRING (30 10, 10 30, 40 40)").unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v[1], Vertex::new(10.0, 30.0));
    }

    #[test]
    fn decode_3d_with_srid() {
        let v = decode("SRID=4326;LINESTRING Z (1.5 2 1577836800, 3 4 1577840400)").unwrap();
        assert_eq!(v[0], Vertex::with_z(1.5, 2.0, 1_577_836_800.0));
        assert_eq!(v[1], Vertex::with_z(3.0, 4.0, 1_577_840_400.0));
    }

    #[test]
    fn decode_garbage() {
        assert!(matches!(
            decode("LINESTRING (1 2,"),
            Err(Error::MalformedInput {
                encoding: Encoding::Wkt,
                ..
            })
        ));
        assert!(matches!(
            decode("not wkt at all"),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn decode_point() {
        assert_eq!(
            decode("POINT (1 2)"),
            Err(Error::WrongGeometryType {
                found: "POINT".to_owned()
            })
        );
        assert_eq!(
            decode("SRID=4326;POLYGON ((0 0, 1 0, 1 1, 0 0))"),
            Err(Error::WrongGeometryType {
                found: "POLYGON".to_owned()
            })
        );
    }

    #[test]
    fn encode_planar() {
        let pts = vec![Point2::new(1.0, 2.5), Point2::new(-3.25, 4.0)];
        let text = encode(&pts);
        assert_eq!(text, "LINESTRING(1 2.5,-3.25 4)");
        assert_eq!(
            decode(&text).unwrap(),
            vec![Vertex::new(1.0, 2.5), Vertex::new(-3.25, 4.0)]
        );
    }

    #[test]
    fn encode_timed() {
        let pts = vec![
            TimedPosition::new(1.0, 2.0, 1_577_836_800),
            TimedPosition::new(3.0, 4.0, 1_577_840_400),
        ];
        assert_eq!(
            encode(&pts),
            "LINESTRING Z (1 2 1577836800, 3 4 1577840400)"
        );
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode::<Point2<Precision>>(&[]), "LINESTRING EMPTY");
    }

    #[test]
    fn round_trip() {
        let text = "LINESTRING Z (13.404954 52.520008 1577836800, 13.405 52.5201 1577840401)";
        let vertices = decode(text).unwrap();
        let timed: Vec<_> = vertices
            .iter()
            .map(|v| TimedPosition {
                point: v.point,
                time: v.z.unwrap() as i64,
            })
            .collect();
        let again = decode(&encode(&timed)).unwrap();
        assert_eq!(vertices, again);
    }
}
