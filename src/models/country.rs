//! Country records and their input payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::snapshot::Snapshot;
use crate::store::{Collection, Document, Store};

/// A country as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ISO 3166-1 alpha-3 code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cca3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_url: Option<String>,
    /// References to neighbor records.
    #[serde(default)]
    pub neighbors: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Country {
    /// A fresh record with a new id, no attributes, and both timestamps at `now`.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            cca3: None,
            currency_code: None,
            currency: None,
            capital: None,
            region: None,
            subregion: None,
            area: None,
            map_url: None,
            population: None,
            flag_url: None,
            neighbors: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Document for Country {
    const COLLECTION: &'static str = "countries";

    fn id(&self) -> Uuid {
        self.id
    }

    fn collection(store: &Store) -> &Collection<Self> {
        store.countries()
    }

    fn snapshot_slot(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.countries
    }
}

/// Payload accepted by `POST /country`.
///
/// Every attribute is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCountry {
    pub name: Option<String>,
    pub cca3: Option<String>,
    pub currency_code: Option<String>,
    pub currency: Option<String>,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub area: Option<f64>,
    pub map_url: Option<String>,
    pub population: Option<f64>,
    pub flag_url: Option<String>,
    pub neighbors: Option<Vec<Uuid>>,
}

impl NewCountry {
    /// Field-level checks run before anything is written.
    pub fn validate(&self) -> Result<(), String> {
        check_non_negative("area", self.area)?;
        check_non_negative("population", self.population)?;
        check_alpha3("cca3", self.cca3.as_deref())?;
        check_alpha3("currency_code", self.currency_code.as_deref())?;
        check_http_url("map_url", self.map_url.as_deref())?;
        check_http_url("flag_url", self.flag_url.as_deref())?;
        Ok(())
    }

    /// Build the stored record, stamping both timestamps with `now`.
    pub fn into_country(self, now: DateTime<Utc>) -> Country {
        Country {
            name: self.name,
            cca3: self.cca3,
            currency_code: self.currency_code,
            currency: self.currency,
            capital: self.capital,
            region: self.region,
            subregion: self.subregion,
            area: self.area,
            map_url: self.map_url,
            population: self.population,
            flag_url: self.flag_url,
            neighbors: self.neighbors.unwrap_or_default(),
            ..Country::empty(now)
        }
    }
}

fn check_non_negative(field: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(n) if !n.is_finite() || n < 0.0 => {
            Err(format!("{} must be a non-negative number, got {}", field, n))
        }
        _ => Ok(()),
    }
}

fn check_alpha3(field: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(code) if !code.is_empty() => {
            if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(())
            } else {
                Err(format!("{} must be three letters, got '{}'", field, code))
            }
        }
        _ => Ok(()),
    }
}

fn check_http_url(field: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(raw) if !raw.is_empty() => match url::Url::parse(raw) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            _ => Err(format!("{} must be an http(s) URL, got '{}'", field, raw)),
        },
        _ => Ok(()),
    }
}
