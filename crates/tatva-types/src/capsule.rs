//! Search capsules: immutable snapshots of one completed search turn.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::property::{Hub, Property, SearchZone};
use crate::wire;

/// Monotonically increasing identifier of a chat turn within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The structured requirements the assistant collected for a search.
///
/// Opaque to the session logic; the accessors only read the fields that
/// capsule labels and list headers need. A `data` value that is not an
/// object reads as an empty snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct SearchSnapshot(pub Map<String, Value>);

impl SearchSnapshot {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Bedroom count. Zero means "not collected yet".
    pub fn size_bhk(&self) -> Option<u32> {
        self.number("size_bhk")
            .filter(|n| *n >= 1.0)
            .map(|n| n.round() as u32)
    }

    pub fn total_sqft(&self) -> Option<f64> {
        self.number("total_sqft").filter(|n| *n > 0.0)
    }

    /// Locality, accepting either key the backend has used.
    pub fn location(&self) -> Option<&str> {
        self.text("location").or_else(|| self.text("location_name"))
    }

    /// Monthly budget in INR.
    pub fn budget(&self) -> Option<f64> {
        self.number("rent_price_inr_per_month").filter(|n| *n > 0.0)
    }

    pub fn furnishing(&self) -> Option<&str> {
        self.text("furnishing")
    }

    pub fn stage(&self) -> Option<&str> {
        self.text("stage")
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(wire::number)
    }
}

impl From<Value> for SearchSnapshot {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => SearchSnapshot(map),
            _ => SearchSnapshot::default(),
        }
    }
}

impl From<SearchSnapshot> for Value {
    fn from(snapshot: SearchSnapshot) -> Self {
        Value::Object(snapshot.0)
    }
}

/// One completed, result-bearing search turn.
///
/// Fields are private: a capsule is never edited after construction. New
/// information produces a new capsule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCapsule {
    id: Uuid,
    turn: TurnId,
    label: String,
    properties: Vec<Property>,
    hubs: Vec<Hub>,
    zone: Option<SearchZone>,
    snapshot: SearchSnapshot,
    created_at: DateTime<Utc>,
}

impl SearchCapsule {
    pub fn new(
        turn: TurnId,
        label: String,
        properties: Vec<Property>,
        hubs: Vec<Hub>,
        zone: Option<SearchZone>,
        snapshot: SearchSnapshot,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            turn,
            label,
            properties,
            hubs,
            zone,
            snapshot,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn turn(&self) -> TurnId {
        self.turn
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    pub fn zone(&self) -> Option<&SearchZone> {
        self.zone.as_ref()
    }

    pub fn snapshot(&self) -> &SearchSnapshot {
        &self.snapshot
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> SearchSnapshot {
        SearchSnapshot::from(value)
    }

    #[test]
    fn test_snapshot_accessors() {
        let snap = snapshot(json!({
            "size_bhk": 2,
            "total_sqft": "1200",
            "location_name": " Koramangala ",
            "rent_price_inr_per_month": 35000.0,
            "stage": "collecting"
        }));
        assert_eq!(snap.size_bhk(), Some(2));
        assert_eq!(snap.total_sqft(), Some(1200.0));
        assert_eq!(snap.location(), Some("Koramangala"));
        assert_eq!(snap.budget(), Some(35000.0));
        assert_eq!(snap.stage(), Some("collecting"));
        assert_eq!(snap.furnishing(), None);
    }

    #[test]
    fn test_snapshot_zero_means_unknown() {
        let snap = snapshot(json!({"size_bhk": 0, "rent_price_inr_per_month": 0}));
        assert_eq!(snap.size_bhk(), None);
        assert_eq!(snap.budget(), None);
    }

    #[test]
    fn test_snapshot_prefers_location_over_location_name() {
        let snap = snapshot(json!({"location": "BTM", "location_name": "HSR"}));
        assert_eq!(snap.location(), Some("BTM"));
    }

    #[test]
    fn test_non_object_snapshot_is_empty() {
        let snap = snapshot(json!([1, 2, 3]));
        assert!(snap.0.is_empty());
    }

    #[test]
    fn test_snapshot_deserializes_from_any_json() {
        let snap: SearchSnapshot = serde_json::from_str(r#""pending""#).unwrap();
        assert!(snap.0.is_empty());

        let snap: SearchSnapshot = serde_json::from_str(r#"{"size_bhk": "2"}"#).unwrap();
        assert_eq!(snap.size_bhk(), Some(2));
        assert_eq!(serde_json::to_value(&snap).unwrap(), json!({"size_bhk": "2"}));
    }

    #[test]
    fn test_capsule_accessors() {
        let capsule = SearchCapsule::new(
            TurnId(3),
            "2 BHK in HSR".to_string(),
            vec![Property::default()],
            vec![Hub::new("Office", 12.9, 77.6)],
            None,
            SearchSnapshot::default(),
        );
        assert_eq!(capsule.turn(), TurnId(3));
        assert_eq!(capsule.label(), "2 BHK in HSR");
        assert_eq!(capsule.properties().len(), 1);
        assert_eq!(capsule.hubs().len(), 1);
        assert!(capsule.zone().is_none());
    }

    #[test]
    fn test_turn_ids_order() {
        assert!(TurnId(2) > TurnId(1));
        assert_eq!(TurnId(7).to_string(), "7");
    }
}
