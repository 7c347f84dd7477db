//! Filter criteria and view mode value objects.
//!
//! Both are owned by the presentation layer and passed by value into the
//! directory engine on every recomputation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::charger::{Availability, ChargerClass};
use super::station::Station;

/// User-selected constraints on the station list.
///
/// Every field is optional; an absent field (or empty search text) places
/// no constraint. Active constraints are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub city: Option<String>,
    pub charger_class: Option<ChargerClass>,
    pub availability: Option<Availability>,
}

impl FilterCriteria {
    /// Criteria with no constraints.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_charger_class(mut self, class: ChargerClass) -> Self {
        self.charger_class = Some(class);
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = Some(availability);
        self
    }

    /// True when no field constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty()
            && self.city.is_none()
            && self.charger_class.is_none()
            && self.availability.is_none()
    }

    /// Whether `station` satisfies every active constraint.
    ///
    /// The search text is matched case-insensitively as a substring of
    /// the owner label, the location or the city, each checked on its
    /// own. City, class and availability require exact equality.
    pub fn matches(&self, station: &Station) -> bool {
        self.matches_text(station)
            && self.city.as_ref().is_none_or(|c| &station.city == c)
            && self
                .charger_class
                .is_none_or(|c| station.charger_class == c)
            && self.availability.is_none_or(|a| station.availability == a)
    }

    fn matches_text(&self, station: &Station) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        [&station.owner_label, &station.location, &station.city]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// How the presentation layer is showing the filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Grid,
    List,
    #[default]
    Map,
}

impl ViewMode {
    /// Whether this mode needs the map markers kept in sync.
    pub fn shows_map(&self) -> bool {
        matches!(self, ViewMode::Map)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
            ViewMode::Map => "map",
        })
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            "map" => Ok(ViewMode::Map),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::station::fixtures::station;

    #[test]
    fn empty_criteria_match_everything() {
        let criteria = FilterCriteria::all();
        assert!(criteria.is_unconstrained());
        assert!(criteria.matches(&station("1", "Pune")));
    }

    #[test]
    fn text_matches_any_single_field() {
        let s = Station {
            owner_label: "Rajesh Kumar".into(),
            location: "42 Green Valley Road, Bengaluru".into(),
            city: "Bangalore".into(),
            ..station("1", "Bangalore")
        };
        assert!(FilterCriteria::all().with_search_text("RAJESH").matches(&s));
        assert!(FilterCriteria::all().with_search_text("valley").matches(&s));
        assert!(FilterCriteria::all().with_search_text("banga").matches(&s));
        assert!(!FilterCriteria::all().with_search_text("mumbai").matches(&s));
    }

    #[test]
    fn text_does_not_match_across_field_boundaries() {
        let s = Station {
            owner_label: "Alpha".into(),
            location: "Beta".into(),
            city: "Gamma".into(),
            ..station("1", "Gamma")
        };
        assert!(!FilterCriteria::all().with_search_text("alphabeta").matches(&s));
    }

    #[test]
    fn exact_fields_and_together() {
        let s = Station {
            charger_class: ChargerClass::Fast,
            availability: Availability::Busy,
            ..station("1", "Delhi")
        };

        let criteria = FilterCriteria::all()
            .with_city("Delhi")
            .with_charger_class(ChargerClass::Fast);
        assert!(criteria.matches(&s));

        let criteria = criteria.with_availability(Availability::Available);
        assert!(!criteria.matches(&s));

        // City equality is exact, not case-insensitive.
        assert!(!FilterCriteria::all().with_city("delhi").matches(&s));
    }

    #[test]
    fn view_mode_parsing() {
        assert_eq!("MAP".parse::<ViewMode>(), Ok(ViewMode::Map));
        assert_eq!("grid".parse::<ViewMode>(), Ok(ViewMode::Grid));
        assert!("table".parse::<ViewMode>().is_err());
        assert!(ViewMode::Map.shows_map());
        assert!(!ViewMode::List.shows_map());
        assert_eq!(ViewMode::default(), ViewMode::Map);
    }
}
