use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

pub type SearchId = i64;

/// A saved search as returned by `GET /api/savedsearches`.
///
/// Other fields the backend sends (location, data source, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SavedSearchRecord {
    pub id: SearchId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub keywords: Option<String>,
}

/// A resource row as returned by `POST /api/resources_for_searches`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub work_status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Request body of `POST /api/resources_for_searches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceQuery<'a> {
    pub search_ids: &'a [SearchId],
}

fn null_as_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SavedSearchesLoaded(Result<Vec<SavedSearchRecord>, ApiError>),
    ResourcesFetched {
        generation: u64,
        result: Result<Vec<ResourceRecord>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Parse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Parse => write!(f, "invalid json"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_search_tolerates_nulls_and_extra_fields() {
        let body = r#"[
            {"id": 1, "name": "A", "keywords": "foo bar", "location": "remote",
             "is_active": true, "date_created": "2024-01-01", "data_source_id": null,
             "data_source_name": null, "data_source_type": null, "data_source_url": null},
            {"id": 2, "name": null, "keywords": null}
        ]"#;
        let records: Vec<SavedSearchRecord> = serde_json::from_str(body).unwrap();

        assert_eq!(records[0].keywords.as_deref(), Some("foo bar"));
        assert_eq!(
            records[0],
            SavedSearchRecord {
                id: 1,
                name: "A".to_string(),
                keywords: Some("foo bar".to_string()),
            }
        );
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].keywords, None);
    }

    #[test]
    fn resource_optional_columns_may_be_absent() {
        let body = r#"{"title": "T1", "company": "C1", "url": "http://x", "description": "d"}"#;
        let record: ResourceRecord = serde_json::from_str(body).unwrap();

        assert_eq!(record.location, None);
        assert_eq!(record.work_status, None);
        assert_eq!(record.url, "http://x");
    }

    #[test]
    fn query_serializes_ids_in_order() {
        let ids = [3, 1, 2];
        let body = serde_json::to_string(&ResourceQuery { search_ids: &ids }).unwrap();
        assert_eq!(body, r#"{"search_ids":[3,1,2]}"#);
    }
}
