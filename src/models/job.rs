use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// A value upstream sends either as a JSON number or as a string.
///
/// Charges, experience and country codes are passed through as-is; the
/// unit (LPA, currency, years) is for the presentation layer to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(Number),
    Text(String),
}

impl fmt::Display for NumberOrText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberOrText::Number(n) => write!(f, "{}", n),
            NumberOrText::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for NumberOrText {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match Number::from_str(s) {
            Ok(n) => NumberOrText::Number(n),
            Err(_) => NumberOrText::Text(s.to_string()),
        })
    }
}

impl From<i64> for NumberOrText {
    fn from(value: i64) -> Self {
        NumberOrText::Number(value.into())
    }
}

impl From<&str> for NumberOrText {
    fn from(value: &str) -> Self {
        NumberOrText::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_name: String,
    #[serde(default)]
    pub years: Option<NumberOrText>,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default, deserialize_with = "null_as_default")]
    pub position_name: String,
}

/// One job record as upstream returns it.
///
/// Every field tolerates being absent or `null`; fields this crate does not
/// know about are kept in `extra` and serialized back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    /// Opaque upstream key, never rewritten
    #[serde(deserialize_with = "null_as_default")]
    pub job_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub location: Option<String>,
    /// `remote`, `onsite`, `hybrid` or whatever upstream decides to send
    pub location_type: Option<String>,
    pub job_type: Option<String>,
    pub min_charge: Option<NumberOrText>,
    pub max_charge: Option<NumberOrText>,
    pub min_experience: Option<NumberOrText>,
    pub max_experience: Option<NumberOrText>,
    pub job_created_at: Option<String>,
    pub job_referral_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "null_as_default")]
    pub positions: Vec<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type JobSummary = Job;
pub type JobDetail = Job;

impl Job {
    /// Parse `jobCreatedAt`, accepting RFC 3339 or a naive timestamp taken as UTC
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.job_created_at.as_deref()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct JobListData {
    #[serde(deserialize_with = "null_as_default")]
    pub job: Vec<JobSummary>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: u64,
}

/// Envelope of the job search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub data: JobListData,
}

/// Envelope of the job description endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobDetailResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub data: JobDetail,
}

/// Deserialize `null` the same way as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
