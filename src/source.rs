//! Record Source - the load boundary.
//!
//! A single GET of the whole collection. No pagination parameters, no auth
//! headers, no retries. There is no write side: saves only touch
//! the local store.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;
use crate::types::Record;

/// Anything that can produce the full record list.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError>;
}

/// Fetches records from an HTTP endpoint returning a JSON array.
pub struct HttpRecordSource {
    client: Client,
    endpoint: String,
}

impl HttpRecordSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("spark-grid/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_all(&self) -> Result<Vec<Record>, FetchError> {
        debug!("GET {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        decode_records(&body)
    }
}

/// Parse a JSON array of records.
pub fn decode_records(body: &str) -> Result<Vec<Record>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;

    #[test]
    fn test_decode_records() {
        let records = decode_records(
            r#"[{"id": 1, "name": "Ann", "age": 30, "address": "X"}, {"id": 2, "name": "Bo"}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, RecordId(2));
        assert_eq!(records[1].age, None);
    }

    #[test]
    fn test_decode_null_attributes_keeps_every_row() {
        let records = decode_records(
            r#"[{"id": 1, "name": "Ann", "age": 30, "address": "X"},
                {"id": 2, "name": null, "age": null, "address": "Y"},
                {"id": 3, "name": "Cy", "age": 5, "address": null}]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Ann");
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].age, None);
        assert_eq!(records[1].address, "Y");
        assert_eq!(records[2].address, "");
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_object() {
        let err = decode_records(r#"{"users": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_missing_id() {
        assert!(decode_records(r#"[{"name": "Ann"}]"#).is_err());
    }

    #[test]
    fn test_http_source_keeps_endpoint() {
        let source = HttpRecordSource::new("http://localhost:4000/users");
        assert_eq!(source.endpoint(), "http://localhost:4000/users");
    }

    #[test]
    fn test_unreachable_endpoint_is_request_error() {
        // Nothing listens on the discard port.
        let source = HttpRecordSource::new("http://127.0.0.1:9/users");
        let err = tokio_test::block_on(source.fetch_all()).unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
    }
}
