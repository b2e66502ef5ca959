use super::domain::DealRecord;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DealIntakeError {
    #[error("failed to read deal record: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid deal record JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Body rejected before it reached the deserializer, e.g. by an HTTP extractor.
    #[error("invalid deal record payload: {0}")]
    Payload(String),
}

/// Loads deal records exported by the form layer as JSON documents.
pub struct DealRecordLoader;

impl DealRecordLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<DealRecord, DealIntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<DealRecord, DealIntakeError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(raw: &str) -> Result<DealRecord, DealIntakeError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::DealStatus;
    use std::io::Cursor;

    #[test]
    fn reads_camel_case_documents() {
        let raw = r#"{
            "dealId": "D-2002",
            "status": "Active",
            "buyerSeatId": "BS-1",
            "targeting": { "geo": ["US"] },
            "floorPrice": "4.25"
        }"#;

        let record = DealRecordLoader::from_reader(Cursor::new(raw)).expect("record loads");
        assert_eq!(record.deal_id, "D-2002");
        assert_eq!(record.status, Some(DealStatus::Active));
        assert_eq!(record.targeting.geo, vec!["US".to_string()]);
        assert!(record.targeting.devices.is_empty());
        assert_eq!(record.floor_price.as_deref(), Some("4.25"));
    }

    #[test]
    fn reports_malformed_json() {
        let err = DealRecordLoader::from_json("{ \"dealId\": ").expect_err("truncated json");
        assert!(matches!(err, DealIntakeError::Json(_)));
        assert!(err.to_string().starts_with("invalid deal record JSON"));
    }

    #[test]
    fn reports_missing_files() {
        let err = DealRecordLoader::from_path("/nonexistent/deal.json").expect_err("missing file");
        assert!(matches!(err, DealIntakeError::Io(_)));
    }
}
