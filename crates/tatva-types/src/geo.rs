//! Geographic primitives: points, raw wire coordinates, and bounding boxes.
//!
//! The search backend ships coordinates either as JSON strings (`"12.97"`)
//! or as JSON numbers. [`RawCoordinate`] accepts both, and keeps anything
//! else verbatim so one bad value never fails a whole response. A
//! [`GeoPoint`] only exists once both halves have parsed to finite,
//! in-range values.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeoError;

const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
const LNG_RANGE: (f64, f64) = (-180.0, 180.0);

/// A coordinate exactly as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
    /// Any other JSON type (`true`, `[]`, `{}`). Never parses.
    Other(Value),
}

impl RawCoordinate {
    /// Parse into a finite `f64`. Whitespace around text values is ignored.
    pub fn to_f64(&self) -> Result<f64, GeoError> {
        let value = match self {
            RawCoordinate::Number(n) => *n,
            RawCoordinate::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(GeoError::Missing);
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| GeoError::Unparsable(s.clone()))?
            }
            RawCoordinate::Other(Value::Null) => return Err(GeoError::Missing),
            RawCoordinate::Other(other) => return Err(GeoError::Unparsable(other.to_string())),
        };
        if !value.is_finite() {
            return Err(GeoError::NonFinite);
        }
        Ok(value)
    }
}

impl From<f64> for RawCoordinate {
    fn from(value: f64) -> Self {
        RawCoordinate::Number(value)
    }
}

impl From<&str> for RawCoordinate {
    fn from(value: &str) -> Self {
        RawCoordinate::Text(value.to_string())
    }
}

impl From<Value> for RawCoordinate {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(f) => RawCoordinate::Number(f),
                None => RawCoordinate::Other(Value::Number(n)),
            },
            Value::String(s) => RawCoordinate::Text(s),
            other => RawCoordinate::Other(other),
        }
    }
}

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Build a point from already-numeric values, checking finiteness and range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoError> {
        Ok(Self {
            lat: check_axis("lat", lat, LAT_RANGE)?,
            lng: check_axis("lng", lng, LNG_RANGE)?,
        })
    }

    /// Parse a point from optional wire coordinates.
    pub fn parse(
        lat: Option<&RawCoordinate>,
        lng: Option<&RawCoordinate>,
    ) -> Result<Self, GeoError> {
        let lat = lat.ok_or(GeoError::Missing)?.to_f64()?;
        let lng = lng.ok_or(GeoError::Missing)?.to_f64()?;
        Self::new(lat, lng)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

pub(crate) fn check_axis(axis: &'static str, value: f64, range: (f64, f64)) -> Result<f64, GeoError> {
    if !value.is_finite() {
        return Err(GeoError::NonFinite);
    }
    if value < range.0 || value > range.1 {
        return Err(GeoError::OutOfRange {
            axis,
            value,
            min: range.0,
            max: range.1,
        });
    }
    Ok(value)
}

pub(crate) fn check_lat(value: f64) -> Result<f64, GeoError> {
    check_axis("lat", value, LAT_RANGE)
}

pub(crate) fn check_lng(value: f64) -> Result<f64, GeoError> {
    check_axis("lng", value, LNG_RANGE)
}

/// An axis-aligned latitude/longitude box.
///
/// Boxes never wrap the antimeridian: `west <= east` and `south <= north`
/// always hold for boxes built through this API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBox {
    /// A zero-area box around a single point.
    pub fn around(point: GeoPoint) -> Self {
        Self {
            south: point.lat,
            west: point.lng,
            north: point.lat,
            east: point.lng,
        }
    }

    /// Minimal box enclosing every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::around(*first);
        for point in iter {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    /// Grow the box so it includes `point`.
    pub fn extend(&mut self, point: GeoPoint) {
        self.south = self.south.min(point.lat);
        self.north = self.north.max(point.lat);
        self.west = self.west.min(point.lng);
        self.east = self.east.max(point.lng);
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }

    /// Corner ring in drawing order: SW, NW, NE, SE.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint { lat: self.south, lng: self.west },
            GeoPoint { lat: self.north, lng: self.west },
            GeoPoint { lat: self.north, lng: self.east },
            GeoPoint { lat: self.south, lng: self.east },
        ]
    }
}
