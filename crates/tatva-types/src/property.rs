//! Listing, hub, and search-zone records as returned by the search backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeoError;
use crate::geo::{GeoBox, GeoPoint, RawCoordinate, check_lat, check_lng};
use crate::wire;

/// A rental listing.
///
/// Every field is optional on the wire and unknown fields are ignored.
/// Scalars accept either strings or numbers; a value of the wrong type only
/// blanks its own field. The coordinates stay in their raw form so a listing
/// with a bad location is still shown in list views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireProperty")]
pub struct Property {
    pub listing_id: Option<String>,
    pub property_name: Option<String>,
    pub property_type: Option<String>,
    pub location: Option<String>,
    /// City region ("South", "East", ...).
    pub zone: Option<String>,
    pub rent_price_inr_per_month: Option<f64>,
    pub size_bhk: Option<u32>,
    pub total_sqft: Option<f64>,
    pub furnishing: Option<String>,
    pub description: Option<String>,
    pub property_url: Option<String>,
    pub latitude: Option<RawCoordinate>,
    pub longitude: Option<RawCoordinate>,
}

/// A listing as it arrives, before the scalars are read.
#[derive(Deserialize)]
struct WireProperty {
    #[serde(default)]
    listing_id: Option<Value>,
    /// Row id, used when `listing_id` is absent.
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    property_name: Option<Value>,
    #[serde(default)]
    property_type: Option<Value>,
    #[serde(default)]
    location: Option<Value>,
    #[serde(default)]
    zone: Option<Value>,
    #[serde(default)]
    rent_price_inr_per_month: Option<Value>,
    #[serde(default)]
    size_bhk: Option<Value>,
    #[serde(default)]
    total_sqft: Option<Value>,
    #[serde(default)]
    furnishing: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    property_url: Option<Value>,
    #[serde(default)]
    latitude: Option<RawCoordinate>,
    #[serde(default)]
    longitude: Option<RawCoordinate>,
}

impl From<WireProperty> for Property {
    fn from(raw: WireProperty) -> Self {
        let text = |v: &Option<Value>| v.as_ref().and_then(wire::text);
        let number = |v: &Option<Value>| v.as_ref().and_then(wire::number);
        Self {
            listing_id: text(&raw.listing_id).or_else(|| text(&raw.id)),
            property_name: text(&raw.property_name),
            property_type: text(&raw.property_type),
            location: text(&raw.location),
            zone: text(&raw.zone),
            rent_price_inr_per_month: number(&raw.rent_price_inr_per_month),
            size_bhk: raw.size_bhk.as_ref().and_then(wire::count),
            total_sqft: number(&raw.total_sqft),
            furnishing: text(&raw.furnishing),
            description: text(&raw.description),
            property_url: text(&raw.property_url),
            latitude: raw.latitude,
            longitude: raw.longitude,
        }
    }
}

impl Property {
    /// The listing's map position, if it has a usable one.
    pub fn point(&self) -> Result<GeoPoint, GeoError> {
        GeoPoint::parse(self.latitude.as_ref(), self.longitude.as_ref())
    }

    /// Display name, falling back to the locality.
    pub fn display_name(&self) -> &str {
        self.property_name
            .as_deref()
            .or(self.location.as_deref())
            .unwrap_or("Unnamed listing")
    }

    /// `"BTM Layout • South Zone"`, or whichever half is known.
    pub fn locality(&self) -> Option<String> {
        match (self.location.as_deref(), self.zone.as_deref()) {
            (Some(location), Some(zone)) => Some(format!("{location} • {zone} Zone")),
            (Some(location), None) => Some(location.to_string()),
            (None, Some(zone)) => Some(format!("{zone} Zone")),
            (None, None) => None,
        }
    }
}

/// A fixed reference location such as a workplace or a family member's home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireHub")]
pub struct Hub {
    pub label: String,
    pub lat: Option<RawCoordinate>,
    pub lng: Option<RawCoordinate>,
}

#[derive(Deserialize)]
struct WireHub {
    #[serde(default)]
    label: Option<Value>,
    #[serde(default)]
    lat: Option<RawCoordinate>,
    #[serde(default)]
    lng: Option<RawCoordinate>,
}

impl From<WireHub> for Hub {
    fn from(raw: WireHub) -> Self {
        Self {
            label: raw
                .label
                .as_ref()
                .and_then(wire::text)
                .unwrap_or_else(|| "Unnamed hub".to_string()),
            lat: raw.lat,
            lng: raw.lng,
        }
    }
}

impl Hub {
    pub fn new(label: impl Into<String>, lat: impl Into<RawCoordinate>, lng: impl Into<RawCoordinate>) -> Self {
        Self {
            label: label.into(),
            lat: Some(lat.into()),
            lng: Some(lng.into()),
        }
    }

    pub fn point(&self) -> Result<GeoPoint, GeoError> {
        GeoPoint::parse(self.lat.as_ref(), self.lng.as_ref())
    }
}

/// The `search_zone` object exactly as it arrives from the backend.
///
/// Bounds may be strings or numbers, and any of them may be missing or
/// garbage; [`SearchZone::from_raw`] decides whether the zone is usable. A
/// `search_zone` that is not an object reads as a zone with no bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawSearchZone {
    pub min_lat: Option<RawCoordinate>,
    pub max_lat: Option<RawCoordinate>,
    pub min_lng: Option<RawCoordinate>,
    pub max_lng: Option<RawCoordinate>,
    pub center: Option<RawCenter>,
}

/// Optional explicit centre of a search zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCenter {
    #[serde(default)]
    pub lat: Option<RawCoordinate>,
    #[serde(default)]
    pub lng: Option<RawCoordinate>,
}

impl RawSearchZone {
    /// A zone with the four bounds set and no explicit centre.
    pub fn new(
        min_lat: impl Into<RawCoordinate>,
        max_lat: impl Into<RawCoordinate>,
        min_lng: impl Into<RawCoordinate>,
        max_lng: impl Into<RawCoordinate>,
    ) -> Self {
        Self {
            min_lat: Some(min_lat.into()),
            max_lat: Some(max_lat.into()),
            min_lng: Some(min_lng.into()),
            max_lng: Some(max_lng.into()),
            center: None,
        }
    }
}

impl From<Value> for RawSearchZone {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        let mut coord = |key: &str| match map.remove(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(RawCoordinate::from(v)),
        };
        let min_lat = coord("min_lat");
        let max_lat = coord("max_lat");
        let min_lng = coord("min_lng");
        let max_lng = coord("max_lng");
        // A centre that is not an object counts as one with no coordinates.
        let center = match map.remove("center") {
            None | Some(Value::Null) => None,
            Some(v) => Some(serde_json::from_value::<RawCenter>(v).unwrap_or_default()),
        };
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
            center,
        }
    }
}

/// An explicit rectangular search region. Authoritative over any
/// hub-derived shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchZone {
    bounds: GeoBox,
    center: GeoPoint,
}

impl SearchZone {
    /// Validate a wire zone: finite, in range, and `min <= max` on both axes.
    /// A missing centre defaults to the middle of the box.
    pub fn from_raw(raw: &RawSearchZone) -> Result<Self, GeoError> {
        let south = check_lat(bound(&raw.min_lat)?)?;
        let north = check_lat(bound(&raw.max_lat)?)?;
        let west = check_lng(bound(&raw.min_lng)?)?;
        let east = check_lng(bound(&raw.max_lng)?)?;
        if south > north {
            return Err(GeoError::InvertedBounds { min: south, max: north });
        }
        if west > east {
            return Err(GeoError::InvertedBounds { min: west, max: east });
        }

        let bounds = GeoBox { south, west, north, east };
        let center = match &raw.center {
            Some(c) => GeoPoint::parse(c.lat.as_ref(), c.lng.as_ref())?,
            None => bounds.center(),
        };
        Ok(Self { bounds, center })
    }

    pub fn bounds(&self) -> &GeoBox {
        &self.bounds
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn min_lat(&self) -> f64 {
        self.bounds.south
    }

    pub fn max_lat(&self) -> f64 {
        self.bounds.north
    }

    pub fn min_lng(&self) -> f64 {
        self.bounds.west
    }

    pub fn max_lng(&self) -> f64 {
        self.bounds.east
    }
}

fn bound(value: &Option<RawCoordinate>) -> Result<f64, GeoError> {
    value.as_ref().ok_or(GeoError::Missing)?.to_f64()
}
