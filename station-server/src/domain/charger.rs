//! Charger classification and availability types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Power at or above which a charger counts as a fast (DC) charger, in kW.
pub const FAST_CHARGER_THRESHOLD_KW: f64 = 50.0;

/// Error returned when parsing an unknown enum label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownLabel {
    kind: &'static str,
    value: String,
}

/// Charging speed class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargerClass {
    Normal,
    Fast,
}

impl ChargerClass {
    /// Derive the class from a power rating.
    ///
    /// ```
    /// use station_server::domain::ChargerClass;
    ///
    /// assert_eq!(ChargerClass::from_power(50.0), ChargerClass::Fast);
    /// assert_eq!(ChargerClass::from_power(49.9), ChargerClass::Normal);
    /// ```
    pub fn from_power(power_kw: f64) -> Self {
        if power_kw >= FAST_CHARGER_THRESHOLD_KW {
            ChargerClass::Fast
        } else {
            ChargerClass::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChargerClass::Normal => "Normal",
            ChargerClass::Fast => "Fast",
        }
    }
}

impl fmt::Display for ChargerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargerClass {
    type Err = UnknownLabel;

    /// Case-insensitive, so query strings like `fast` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ChargerClass::Normal),
            "fast" => Ok(ChargerClass::Fast),
            _ => Err(UnknownLabel {
                kind: "charger class",
                value: s.to_string(),
            }),
        }
    }
}

/// Current availability of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Busy => "Busy",
            Availability::Offline => "Offline",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Availability::Available),
            "busy" => Ok(Availability::Busy),
            "offline" => Ok(Availability::Offline),
            _ => Err(UnknownLabel {
                kind: "availability",
                value: s.to_string(),
            }),
        }
    }
}
