//! Provider API response DTOs.
//!
//! These types map the Open Charge Map POI feed. Field names follow the
//! snake_case shape of the v3 JSON, with the feed's PascalCase names
//! accepted as aliases. Everything is optional: the provider omits fields
//! freely and the normalizer decides what a record must carry.

use serde::Deserialize;
use tracing::debug;

/// Provider-side station identifier, sent as a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProviderId {
    Number(u64),
    Text(String),
}

impl ProviderId {
    pub fn to_id_string(&self) -> String {
        match self {
            ProviderId::Number(n) => n.to_string(),
            ProviderId::Text(s) => s.clone(),
        }
    }
}

/// A point of interest (charging site) as returned by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderRecord {
    #[serde(default, alias = "ID")]
    pub id: Option<ProviderId>,

    #[serde(default, alias = "UUID")]
    pub uuid: Option<String>,

    /// Site name; used as the owner label when no operator is known.
    #[serde(default, alias = "Name")]
    pub name: Option<String>,

    #[serde(default, alias = "AddressInfo")]
    pub address: Option<ProviderAddress>,

    #[serde(default, alias = "Connections")]
    pub connections: Option<Vec<ProviderConnection>>,

    #[serde(default, alias = "StatusTypeID")]
    pub status_type_id: Option<u32>,

    /// Expanded status; omitted in compact responses.
    #[serde(default, alias = "StatusType")]
    pub status_type: Option<ProviderStatusType>,

    #[serde(default, alias = "OperatorInfo")]
    pub operator: Option<ProviderOperator>,

    #[serde(default, alias = "DateLastStatusUpdate")]
    pub date_last_status_update: Option<String>,
}

/// Address block of a provider record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderAddress {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,

    #[serde(default, alias = "AddressLine1")]
    pub address_line_1: Option<String>,

    #[serde(default, alias = "Town")]
    pub town: Option<String>,

    #[serde(default, alias = "StateOrProvince")]
    pub state_or_province: Option<String>,

    #[serde(default, alias = "Postcode")]
    pub postcode: Option<String>,

    #[serde(default, alias = "Latitude")]
    pub latitude: Option<f64>,

    #[serde(default, alias = "Longitude")]
    pub longitude: Option<f64>,
}

/// One connector at a site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConnection {
    #[serde(default, alias = "PowerKW")]
    pub power_kw: Option<f64>,

    #[serde(default, alias = "Quantity")]
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderStatusType {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,

    #[serde(default, alias = "IsOperational")]
    pub is_operational: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderOperator {
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
}

/// Response body: either a bare array or an envelope around one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProviderPage {
    Envelope(ProviderEnvelope),
    Bare(Vec<serde_json::Value>),
}

#[derive(Debug, Deserialize)]
pub struct ProviderEnvelope {
    pub data: Vec<serde_json::Value>,

    #[serde(default)]
    pub is_error: bool,

    #[serde(default)]
    pub status_code: Option<u16>,

    #[serde(default)]
    pub status_message: Option<String>,
}

/// A decoded page: the records that parsed plus how many did not.
#[derive(Debug, Default)]
pub struct DecodedPage {
    pub records: Vec<ProviderRecord>,
    pub rejected: usize,
}

impl ProviderPage {
    /// Decode each entry on its own, so one badly typed record does not
    /// sink the whole page.
    pub fn decode(self) -> DecodedPage {
        let values = match self {
            ProviderPage::Envelope(envelope) => envelope.data,
            ProviderPage::Bare(values) => values,
        };

        let mut page = DecodedPage {
            records: Vec::with_capacity(values.len()),
            rejected: 0,
        };
        for value in values {
            match serde_json::from_value::<ProviderRecord>(value) {
                Ok(record) => page.records.push(record),
                Err(e) => {
                    debug!(error = %e, "skipping undecodable provider record");
                    page.rejected += 1;
                }
            }
        }
        page
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_snake_case_record() {
        let json = r#"{
            "id": 101,
            "name": "Site A",
            "address": {
                "title": "Mall Parking",
                "address_line_1": "1 MG Road",
                "town": "Pune",
                "latitude": 18.52,
                "longitude": 73.85
            },
            "connections": [{ "power_kw": 60.0, "quantity": 2 }],
            "status_type": { "title": "Operational", "is_operational": true },
            "operator": { "title": "Tata Power" }
        }"#;
        let record: ProviderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(ProviderId::Number(101)));
        let address = record.address.unwrap();
        assert_eq!(address.town.as_deref(), Some("Pune"));
        assert_eq!(address.latitude, Some(18.52));
        assert_eq!(record.connections.unwrap()[0].power_kw, Some(60.0));
        assert_eq!(record.status_type.unwrap().is_operational, Some(true));
        assert_eq!(record.operator.unwrap().title.as_deref(), Some("Tata Power"));
    }

    #[test]
    fn decodes_pascal_case_record() {
        let json = r#"{
            "ID": 7,
            "AddressInfo": {
                "Title": "Station Road",
                "Town": "Kochi",
                "Latitude": 9.93,
                "Longitude": 76.26
            },
            "Connections": [{ "PowerKW": 7.4 }],
            "StatusTypeID": 50,
            "OperatorInfo": { "Title": "KSEB" }
        }"#;
        let record: ProviderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(ProviderId::Number(7)));
        assert_eq!(record.status_type_id, Some(50));
        assert_eq!(record.address.unwrap().town.as_deref(), Some("Kochi"));
        assert_eq!(record.connections.unwrap()[0].power_kw, Some(7.4));
    }

    #[test]
    fn string_ids_are_accepted() {
        let record: ProviderRecord = serde_json::from_str(r#"{"id": "abc-1"}"#).unwrap();
        assert_eq!(record.id.unwrap().to_id_string(), "abc-1");
    }

    #[test]
    fn page_accepts_bare_array_and_envelope() {
        let bare: ProviderPage = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(bare.decode().records.len(), 2);

        let envelope: ProviderPage =
            serde_json::from_str(r#"{"data": [{"id": 1}], "status_code": 200}"#).unwrap();
        assert_eq!(envelope.decode().records.len(), 1);
    }

    #[test]
    fn badly_typed_records_are_counted_not_fatal() {
        let page: ProviderPage = serde_json::from_str(
            r#"[{"id": 1}, {"id": 2, "address": {"latitude": "north"}}, {"id": 3}]"#,
        )
        .unwrap();
        let decoded = page.decode();
        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.rejected, 1);
    }

    #[test]
    fn object_without_data_is_not_a_page() {
        assert!(serde_json::from_str::<ProviderPage>(r#"{"message": "nope"}"#).is_err());
    }
}
