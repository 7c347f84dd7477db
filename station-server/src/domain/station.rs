//! Station identity, coordinates and the canonical station record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::charger::{Availability, ChargerClass};
use super::error::DomainError;

/// Identifier of a station, unique within a snapshot.
///
/// Ids are opaque strings; provider ids that arrive as numbers are
/// rendered in decimal. Empty or whitespace-only ids are rejected.
///
/// # Examples
///
/// ```
/// use station_server::domain::StationId;
///
/// let id = StationId::parse("42").unwrap();
/// assert_eq!(id.as_str(), "42");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id. The input is kept verbatim.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::EmptyId);
        }
        Ok(StationId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            return Err(DomainError::EmptyId);
        }
        Ok(StationId(s))
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A latitude/longitude pair in decimal degrees.
///
/// Both components are always finite. Range validity is checked
/// separately: out-of-range coordinates are kept on the record (list
/// views still show the station) but the station is never placed on a
/// map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting NaN and infinities.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(DomainError::NonFiniteCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Check latitude ∈ [-90, 90] and longitude ∈ [-180, 180].
    pub fn validate_range(&self) -> Result<(), DomainError> {
        if self.is_placeable() {
            Ok(())
        } else {
            Err(DomainError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Whether these coordinates may be placed on a map.
    pub fn is_placeable(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Canonical charging station record.
///
/// A `Station` is never mutated once it is part of a snapshot; refreshes
/// build new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: StationId,

    /// Display name of the operator or owner.
    pub owner_label: String,

    /// Free-text address.
    pub location: String,

    /// Grouping key for region summaries, stored verbatim.
    pub city: String,

    pub coordinates: Coordinates,

    pub charger_class: ChargerClass,

    pub power_output_kw: f64,

    /// Price per hour in whole rupees.
    pub price_per_hour: f64,

    pub availability: Availability,

    pub emergency_capable: bool,

    /// Average user rating, 0 to 5.
    pub rating: f64,

    pub total_sessions: u32,

    /// Bookable time windows, as display strings.
    #[serde(default)]
    pub available_slots: Vec<String>,
}

impl Station {
    /// Check every field invariant.
    ///
    /// Coordinates must be finite and in range here: curated data that
    /// fails this check is rejected outright rather than hidden from the
    /// map.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.validate_fields()?;
        self.coordinates.validate_range()
    }

    /// Check every invariant except the coordinate range.
    ///
    /// A station that passes may still be unplaceable on a map.
    pub fn validate_fields(&self) -> Result<(), DomainError> {
        Coordinates::new(self.coordinates.latitude, self.coordinates.longitude)?;

        if !(self.power_output_kw.is_finite() && self.power_output_kw > 0.0) {
            return Err(DomainError::InvalidPower(self.power_output_kw));
        }
        if !(self.price_per_hour.is_finite() && self.price_per_hour >= 0.0) {
            return Err(DomainError::InvalidPrice(self.price_per_hour));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(DomainError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }

    /// Whether this station can be shown as a map marker.
    pub fn is_mappable(&self) -> bool {
        self.coordinates.is_placeable()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A valid Normal-class station in the given city.
    pub fn station(id: &str, city: &str) -> Station {
        Station {
            id: StationId::parse(id).unwrap(),
            owner_label: format!("Owner {id}"),
            location: format!("{id} Main Road, {city}"),
            city: city.to_string(),
            coordinates: Coordinates::new(12.97, 77.59).unwrap(),
            charger_class: ChargerClass::Normal,
            power_output_kw: 11.0,
            price_per_hour: 44.0,
            availability: Availability::Available,
            emergency_capable: false,
            rating: 4.5,
            total_sessions: 100,
            available_slots: Vec::new(),
        }
    }

    pub fn station_at(id: &str, latitude: f64, longitude: f64) -> Station {
        Station {
            coordinates: Coordinates::new(latitude, longitude).unwrap(),
            ..station(id, "Testville")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn station_id_keeps_input_verbatim() {
        let id = StationId::parse(" 7 ").unwrap();
        assert_eq!(id.as_str(), " 7 ");
        assert_eq!(format!("{id:?}"), "StationId( 7 )");
    }

    #[test]
    fn station_id_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<StationId>("\"\"").is_err());
        let id: StationId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn coordinates_reject_non_finite() {
        assert_eq!(
            Coordinates::new(f64::NAN, 0.0),
            Err(DomainError::NonFiniteCoordinates)
        );
        assert_eq!(
            Coordinates::new(0.0, f64::INFINITY),
            Err(DomainError::NonFiniteCoordinates)
        );
    }

    #[test]
    fn coordinate_range_bounds_are_inclusive() {
        assert!(Coordinates::new(90.0, 180.0).unwrap().is_placeable());
        assert!(Coordinates::new(-90.0, -180.0).unwrap().is_placeable());
        assert!(!Coordinates::new(90.1, 0.0).unwrap().is_placeable());
        assert!(!Coordinates::new(0.0, 200.0).unwrap().is_placeable());
    }

    #[test]
    fn validate_accepts_fixture() {
        assert!(station("1", "Pune").validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let s = Station {
            power_output_kw: 0.0,
            ..station("1", "Pune")
        };
        assert_eq!(s.validate(), Err(DomainError::InvalidPower(0.0)));

        let s = Station {
            price_per_hour: -1.0,
            ..station("1", "Pune")
        };
        assert_eq!(s.validate(), Err(DomainError::InvalidPrice(-1.0)));

        let s = Station {
            rating: 5.5,
            ..station("1", "Pune")
        };
        assert_eq!(s.validate(), Err(DomainError::RatingOutOfRange(5.5)));

        let s = station_at("1", 12.0, 200.0);
        assert!(matches!(
            s.validate(),
            Err(DomainError::InvalidCoordinates { .. })
        ));
        assert!(!s.is_mappable());
    }

    #[test]
    fn field_validation_allows_out_of_range_coordinates() {
        let s = station_at("1", 12.0, 200.0);
        assert!(s.validate_fields().is_ok());
        assert!(s.validate().is_err());

        let s = Station {
            rating: 7.0,
            ..station_at("1", 12.0, 200.0)
        };
        assert_eq!(s.validate_fields(), Err(DomainError::RatingOutOfRange(7.0)));
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_value(station("1", "Pune")).unwrap();
        assert_eq!(json["ownerLabel"], "Owner 1");
        assert_eq!(json["chargerClass"], "Normal");
        assert_eq!(json["powerOutputKw"], 11.0);
        assert_eq!(json["coordinates"]["latitude"], 12.97);

        let back: Station = serde_json::from_value(json).unwrap();
        assert_eq!(back, station("1", "Pune"));
    }

    #[test]
    fn available_slots_default_to_empty() {
        let mut json = serde_json::to_value(station("1", "Pune")).unwrap();
        json.as_object_mut().unwrap().remove("availableSlots");
        let back: Station = serde_json::from_value(json).unwrap();
        assert!(back.available_slots.is_empty());
    }
}
