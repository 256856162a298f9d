use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, ReviewRecord};

const TITLE_COLUMN: &str = "product_title";
const REVIEW_COLUMN: &str = "review";
const RATING_COLUMN: &str = "rating";

/// Converts a CSV of product reviews into records ready for ingestion.
///
/// Requires `product_title` and `review` columns. Rows whose review text
/// is empty or whitespace are skipped rather than failing the run; the
/// skip count is logged.
pub struct ReviewConverter {
    path: PathBuf,
}

impl ReviewConverter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn convert(&self) -> Result<Vec<ReviewRecord>, DomainError> {
        let file = std::fs::File::open(&self.path).map_err(|e| {
            DomainError::source_format(format!(
                "cannot open {}: {e}",
                self.path.display()
            ))
        })?;
        convert_reader(file, &self.path)
    }
}

fn convert_reader(source: impl Read, path: &Path) -> Result<Vec<ReviewRecord>, DomainError> {
    let mut reader = csv::Reader::from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| DomainError::source_format(format!("cannot read CSV headers: {e}")))?
        .clone();

    let title_idx = column_index(&headers, TITLE_COLUMN)?;
    let review_idx = column_index(&headers, REVIEW_COLUMN)?;
    let rating_idx = headers.iter().position(|h| h == RATING_COLUMN);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row.map_err(|e| {
            DomainError::source_format(format!("malformed CSV row in {}: {e}", path.display()))
        })?;

        let text = row.get(review_idx).unwrap_or("").trim();
        if text.is_empty() {
            skipped += 1;
            continue;
        }

        let title = row.get(title_idx).unwrap_or("").trim();
        let mut metadata = serde_json::json!({ "product_name": title });
        if let Some(idx) = rating_idx {
            if let Some(rating) = row.get(idx).and_then(|r| r.trim().parse::<f64>().ok()) {
                metadata["rating"] = serde_json::json!(rating);
            }
        }

        records.push(ReviewRecord::new(text).with_metadata(metadata));
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped rows with empty review text");
    }

    Ok(records)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, DomainError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DomainError::source_format(format!("missing required column: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn convert_str(csv: &str) -> Result<Vec<ReviewRecord>, DomainError> {
        convert_reader(Cursor::new(csv.to_string()), Path::new("test.csv"))
    }

    #[test]
    fn test_convert_basic_rows() {
        let records = convert_str(
            "product_title,review,rating\n\
             Acme TV 55,Excellent picture,5\n\
             Acme TV 55,Remote feels cheap,3\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "Excellent picture");
        assert_eq!(records[0].product_name(), Some("Acme TV 55"));
        assert_eq!(records[0].metadata["rating"], serde_json::json!(5.0));
    }

    #[test]
    fn test_empty_review_rows_are_skipped() {
        let records = convert_str(
            "product_title,review\n\
             Acme TV 55,Great value\n\
             Acme TV 55,\n\
             Acme TV 55,   \n",
        )
        .unwrap();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_review_column_fails() {
        let err = convert_str("product_title,body\nAcme TV 55,hello\n").unwrap_err();
        assert!(matches!(err, DomainError::SourceFormat(_)));
        assert!(err.to_string().contains("review"));
    }

    #[test]
    fn test_missing_title_column_fails() {
        let err = convert_str("name,review\nAcme TV 55,hello\n").unwrap_err();
        assert!(err.to_string().contains("product_title"));
    }

    #[test]
    fn test_rating_column_is_optional() {
        let records = convert_str("product_title,review\nAcme TV 55,Solid stand\n").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].metadata.get("rating").is_none());
    }
}
