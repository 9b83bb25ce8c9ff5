use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::utils::dates::format_date;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

static GENDERS: phf::Map<&'static str, Gender> = phf_map! {
    "MALE" => Gender::Male,
    "FEMALE" => Gender::Female,
    "OTHER" => Gender::Other,
};

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl FromStr for Gender {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GENDERS
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or("Gender must be MALE, FEMALE, or OTHER")
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prescription as returned by the backend.
///
/// The client only ever holds transient copies; the backend owns the record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: i64,
    pub prescription_date: NaiveDate,
    pub patient_name: String,
    pub patient_age: u8,
    pub patient_gender: Gender,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub medicines: Option<String>,
    #[serde(default)]
    pub next_visit_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_full_name: Option<String>,
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of a create or update request, produced by a validated form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionRequest {
    pub prescription_date: NaiveDate,
    pub patient_name: String,
    pub patient_age: u8,
    pub patient_gender: Gender,
    pub diagnosis: Option<String>,
    pub medicines: Option<String>,
    pub next_visit_date: Option<NaiveDate>,
}

/// Prescription count for one day of a report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    pub day: String,
    pub prescription_count: u64,
}

impl DayCount {
    pub fn new(day: impl Into<String>, prescription_count: u64) -> Self {
        Self {
            day: day.into(),
            prescription_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BusiestDay {
    pub day: String,
    pub count: u64,
}

/// Inclusive date range used for list and report queries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// `startDate`/`endDate` query parameters as `YYYY-MM-DD` strings.
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("startDate", format_date(self.start_date)),
            ("endDate", format_date(self.end_date)),
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
}

/// Backend timestamps use `yyyy-MM-dd HH:mm:ss` rather than ISO 8601.
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_some(&timestamp.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}
