//! Conversion from provider records to canonical stations.
//!
//! Normalization is pure apart from the random source used to backfill
//! engagement figures (rating, session count) that the provider does not
//! publish. That source is injected so tests can pin it.
//!
//! Policies applied to provider records:
//! - missing or non-positive power is assumed to be a typical AC charger
//!   of [`DEFAULT_POWER_KW`]
//! - price is an estimate derived from power and class, never sourced
//! - a missing town groups under the [`UNKNOWN_CITY`] sentinel
//! - records without an id or without both coordinates are dropped

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::domain::{Availability, ChargerClass, Coordinates, DomainError, Station, StationId};

use super::types::ProviderRecord;

/// Power assumed when a record carries no usable rating, in kW.
pub const DEFAULT_POWER_KW: f64 = 22.0;

/// City used when a record has no town.
pub const UNKNOWN_CITY: &str = "Unknown City";

/// Owner label used when a record names neither operator nor site.
pub const UNKNOWN_OPERATOR: &str = "Unknown Operator";

/// Slot label for provider stations, which publish no schedule.
pub const ROUND_THE_CLOCK_SLOT: &str = "24/7 Available";

/// Estimated hourly rate per kW for fast chargers.
const FAST_RATE_PER_KW: f64 = 6.0;

/// Estimated hourly rate per kW for normal chargers.
const NORMAL_RATE_PER_KW: f64 = 4.0;

/// Open Charge Map status ids that mean "in service".
const OPERATIONAL_STATUS_IDS: [u32; 2] = [50, 75];

const MIN_BACKFILL_RATING: f64 = 4.0;
const BACKFILL_SESSIONS: std::ops::Range<u32> = 50..550;

/// Input to the normalizer.
///
/// Canonical stations are accepted as well as provider records, so that
/// normalizing an already-normalized collection is a no-op.
#[derive(Debug, Clone)]
pub enum RawRecord {
    Provider(ProviderRecord),
    Canonical(Station),
}

impl From<ProviderRecord> for RawRecord {
    fn from(record: ProviderRecord) -> Self {
        RawRecord::Provider(record)
    }
}

impl From<Station> for RawRecord {
    fn from(station: Station) -> Self {
        RawRecord::Canonical(station)
    }
}

/// Reason a record was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error("record has no id")]
    MissingId,

    #[error("record {0} has no coordinates")]
    MissingCoordinates(String),

    #[error("record {id}: {source}")]
    Invalid { id: String, source: DomainError },
}

/// Estimated hourly price for a charger, in whole rupees.
///
/// ```
/// use station_server::domain::ChargerClass;
/// use station_server::provider::normalize::estimate_price;
///
/// assert_eq!(estimate_price(ChargerClass::Fast, 60.0), 360.0);
/// assert_eq!(estimate_price(ChargerClass::Normal, 7.4), 30.0);
/// ```
pub fn estimate_price(class: ChargerClass, power_kw: f64) -> f64 {
    let rate = match class {
        ChargerClass::Fast => FAST_RATE_PER_KW,
        ChargerClass::Normal => NORMAL_RATE_PER_KW,
    };
    (power_kw * rate).round()
}

/// Power of the first connection, or the default when unusable.
pub fn effective_power(record: &ProviderRecord) -> f64 {
    record
        .connections
        .as_deref()
        .and_then(|conns| conns.first())
        .and_then(|c| c.power_kw)
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(DEFAULT_POWER_KW)
}

fn non_empty(s: Option<&String>) -> Option<&str> {
    s.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn is_operational(record: &ProviderRecord) -> bool {
    match record.status_type.as_ref().and_then(|s| s.is_operational) {
        Some(flag) => flag,
        None => record
            .status_type_id
            .is_some_and(|id| OPERATIONAL_STATUS_IDS.contains(&id)),
    }
}

/// Converts raw records into stations.
pub struct Normalizer<R = ChaCha8Rng> {
    rng: R,
}

impl Normalizer<ChaCha8Rng> {
    /// Normalizer backed by an OS-seeded generator.
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Normalizer with a fixed seed, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Normalizer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Normalize a batch, dropping records that cannot be used.
    ///
    /// Input order is preserved. When two records share an id the first
    /// one wins.
    pub fn normalize<I>(&mut self, records: I) -> Vec<Station>
    where
        I: IntoIterator,
        I::Item: Into<RawRecord>,
    {
        let mut seen = HashSet::new();
        let mut stations = Vec::new();
        let mut dropped = 0usize;

        for record in records {
            match self.normalize_record(record.into()) {
                Ok(station) => {
                    if seen.insert(station.id.clone()) {
                        stations.push(station);
                    } else {
                        debug!(id = %station.id, "dropping duplicate station id");
                        dropped += 1;
                    }
                }
                Err(e) => {
                    debug!(error = %e, "dropping unusable record");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            info!(kept = stations.len(), dropped, "normalized provider records");
        }
        stations
    }

    /// Normalize a single record.
    pub fn normalize_record(&mut self, record: RawRecord) -> Result<Station, NormalizeError> {
        match record {
            RawRecord::Canonical(station) => {
                station
                    .validate_fields()
                    .map_err(|source| NormalizeError::Invalid {
                        id: station.id.to_string(),
                        source,
                    })?;
                Ok(station)
            }
            RawRecord::Provider(record) => self.convert(&record),
        }
    }

    fn convert(&mut self, record: &ProviderRecord) -> Result<Station, NormalizeError> {
        let raw_id = record
            .id
            .as_ref()
            .map(|id| id.to_id_string())
            .ok_or(NormalizeError::MissingId)?;
        let id = StationId::try_from(raw_id.clone()).map_err(|_| NormalizeError::MissingId)?;

        let address = record.address.clone().unwrap_or_default();
        let (Some(latitude), Some(longitude)) = (address.latitude, address.longitude) else {
            return Err(NormalizeError::MissingCoordinates(raw_id));
        };
        let coordinates = Coordinates::new(latitude, longitude)
            .map_err(|source| NormalizeError::Invalid { id: raw_id, source })?;

        let town = non_empty(address.town.as_ref());
        let location = match non_empty(address.title.as_ref()) {
            Some(title) => title.to_string(),
            None => format!(
                "{}, {}",
                address.address_line_1.as_deref().unwrap_or(""),
                town.unwrap_or("")
            ),
        };
        let city = town.unwrap_or(UNKNOWN_CITY).to_string();

        let owner_label = non_empty(record.operator.as_ref().and_then(|o| o.title.as_ref()))
            .or_else(|| non_empty(record.name.as_ref()))
            .unwrap_or(UNKNOWN_OPERATOR)
            .to_string();

        let power_output_kw = effective_power(record);
        let charger_class = ChargerClass::from_power(power_output_kw);
        let availability = if is_operational(record) {
            Availability::Available
        } else {
            Availability::Offline
        };

        Ok(Station {
            id,
            owner_label,
            location,
            city,
            coordinates,
            charger_class,
            power_output_kw,
            price_per_hour: estimate_price(charger_class, power_output_kw),
            availability,
            emergency_capable: false,
            rating: self.backfill_rating(),
            total_sessions: self.rng.gen_range(BACKFILL_SESSIONS),
            available_slots: vec![ROUND_THE_CLOCK_SLOT.to_string()],
        })
    }

    /// A rating in [4.0, 5.0], to one decimal place.
    fn backfill_rating(&mut self) -> f64 {
        let raw = MIN_BACKFILL_RATING + self.rng.r#gen::<f64>();
        ((raw * 10.0).round() / 10.0).min(5.0)
    }
}
