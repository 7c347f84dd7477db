//! Marker payloads.

use serde::Serialize;

use crate::domain::{Availability, ChargerClass, Station};

/// Legend colour of a marker: green when available, red otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTone {
    Positive,
    Negative,
}

impl From<Availability> for MarkerTone {
    fn from(availability: Availability) -> Self {
        if availability.is_available() {
            MarkerTone::Positive
        } else {
            MarkerTone::Negative
        }
    }
}

/// What a marker's popup shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerInfo {
    pub owner_label: String,
    pub location: String,
    pub availability: Availability,
    pub price_per_hour: f64,
    pub power_output_kw: f64,
    pub charger_class: ChargerClass,
    pub rating: f64,
    pub tone: MarkerTone,
}

impl From<&Station> for MarkerInfo {
    fn from(station: &Station) -> Self {
        Self {
            owner_label: station.owner_label.clone(),
            location: station.location.clone(),
            availability: station.availability,
            price_per_hour: station.price_per_hour,
            power_output_kw: station.power_output_kw,
            charger_class: station.charger_class,
            rating: station.rating,
            tone: station.availability.into(),
        }
    }
}
