use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::model::{ClusterDataset, SellerRecord};

/// Feature columns follow the upstream naming convention
/// `recbruta_<category>_prop` (normalized revenue share per category).
const FEATURE_PREFIX: &str = "recbruta_";
const FEATURE_SUFFIX: &str = "_prop";

const SELLER_COL: &str = "seller_id";
const DATE_COL: &str = "data";
const CLUSTER_COL: &str = "cluster_id";

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("no feature columns matching '{FEATURE_PREFIX}*{FEATURE_SUFFIX}' found")]
    NoFeatureColumns,
    #[error("row {row}: cluster_id '{value}' is not a non-negative integer")]
    BadClusterId { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

/// One CSV row as deserialized by serde. The feature columns are dynamic,
/// so everything beyond the three fixed columns lands in `extra`.
#[derive(Debug, Deserialize)]
struct RawRow {
    seller_id: String,
    #[serde(rename = "data")]
    date: String,
    cluster_id: String,
    #[serde(flatten)]
    extra: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the clustering output CSV from a file path.
pub fn load_dataset(path: &Path) -> Result<ClusterDataset> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_dataset(reader).with_context(|| format!("reading {}", path.display()))
}

/// Parse a clustering output CSV from any reader. Split out from
/// [`load_dataset`] so tests can feed in-memory CSV text.
pub fn read_dataset<R: Read>(mut reader: csv::Reader<R>) -> Result<ClusterDataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    for required in [SELLER_COL, DATE_COL, CLUSTER_COL] {
        if !headers.iter().any(|h| h == required) {
            return Err(SchemaError::MissingColumn(required).into());
        }
    }

    let feature_names = detect_feature_columns(&headers);
    if feature_names.is_empty() {
        return Err(SchemaError::NoFeatureColumns.into());
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;

        let cluster: u32 = raw
            .cluster_id
            .trim()
            .parse()
            .map_err(|_| SchemaError::BadClusterId {
                row: row_no,
                value: raw.cluster_id.clone(),
            })?;

        // Missing or unparsable feature cells become NaN here and are
        // zero-filled by the analysis layer, mirroring the upstream fillna(0).
        let features: Vec<f64> = feature_names
            .iter()
            .map(|name| {
                raw.extra
                    .get(name)
                    .and_then(|cell| cell.trim().parse::<f64>().ok())
                    .unwrap_or(f64::NAN)
            })
            .collect();

        records.push(SellerRecord {
            seller_id: raw.seller_id,
            date: parse_date(&raw.date),
            cluster,
            features,
        });
    }

    Ok(ClusterDataset::from_records(records, feature_names))
}

/// Columns matching the `recbruta_*_prop` convention, in header order.
fn detect_feature_columns(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| h.starts_with(FEATURE_PREFIX) && h.ends_with(FEATURE_SUFFIX))
        .cloned()
        .collect()
}

/// Coerce a date cell to calendar-date granularity.
///
/// Accepts plain `YYYY-MM-DD` as well as datetime strings with a time part
/// (the upstream export sometimes carries one). Anything else coerces to
/// `None` rather than failing the load.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    // "2024-01-01 00:00:00" / "2024-01-01T00:00:00" → keep the date part
    let date_part = s.split(&[' ', 'T'][..]).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset_from(text: &str) -> Result<ClusterDataset> {
        read_dataset(csv::Reader::from_reader(text.as_bytes()))
    }

    const SAMPLE: &str = "\
seller_id,data,cluster_id,recbruta_food_prop,recbruta_tech_prop,notes
s1,2024-01-01,0,0.8,0.2,x
s2,2024-01-01,1,0.1,0.9,y
s3,2024-02-01,0,0.7,,z
";

    #[test]
    fn detects_only_convention_columns() {
        let ds = dataset_from(SAMPLE).unwrap();
        assert_eq!(
            ds.feature_names,
            vec!["recbruta_food_prop", "recbruta_tech_prop"]
        );
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn missing_feature_cell_becomes_nan() {
        let ds = dataset_from(SAMPLE).unwrap();
        assert!(ds.records[2].features[1].is_nan());
        assert_eq!(ds.records[2].features[0], 0.7);
    }

    #[test]
    fn malformed_date_coerces_to_none() {
        let text = "\
seller_id,data,cluster_id,recbruta_a_prop
s1,not-a-date,0,0.5
s2,2024-03-15 00:00:00,1,0.5
";
        let ds = dataset_from(text).unwrap();
        assert!(ds.records[0].date.is_none());
        assert_eq!(
            ds.records[1].date,
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        // the unparsable row is excluded from the date index
        assert_eq!(ds.dates.len(), 1);
    }

    #[test]
    fn missing_required_column_errors() {
        let text = "seller_id,data,recbruta_a_prop\ns1,2024-01-01,0.5\n";
        let err = dataset_from(text).unwrap_err();
        assert!(err.to_string().contains("cluster_id"));
    }

    #[test]
    fn no_feature_columns_errors() {
        let text = "seller_id,data,cluster_id,other\ns1,2024-01-01,0,x\n";
        assert!(dataset_from(text).is_err());
    }

    #[test]
    fn bad_cluster_id_errors() {
        let text = "seller_id,data,cluster_id,recbruta_a_prop\ns1,2024-01-01,west,0.5\n";
        let err = dataset_from(text).unwrap_err();
        assert!(err.to_string().contains("west"));
    }
}
