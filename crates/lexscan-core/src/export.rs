use crate::error::LexscanError;
use crate::model::AnalysisRecord;
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

/// `analysis_<YYYYMMDD_HHMMSS>.json` for the given time.
pub fn file_name<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("analysis_{}.json", timestamp.format("%Y%m%d_%H%M%S"))
}

/// The record as indented JSON.
pub fn to_json(record: &AnalysisRecord) -> Result<String, LexscanError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Write the report into `dir` and return the path of the new file.
pub fn write_report<Tz: TimeZone>(
    dir: &Path,
    record: &AnalysisRecord,
    timestamp: &DateTime<Tz>,
) -> Result<PathBuf, LexscanError>
where
    Tz::Offset: std::fmt::Display,
{
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(timestamp));
    std::fs::write(&path, to_json(record)?)?;
    tracing::info!(path = %path.display(), "wrote analysis report");
    Ok(path)
}

/// Read a report previously written by [`write_report`].
pub fn read_report(path: &Path) -> Result<AnalysisRecord, LexscanError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RuleCheck, RuleStatus};
    use chrono::Utc;

    fn sample() -> AnalysisRecord {
        AnalysisRecord {
            summary: vec!["Creates a single benefit".into()],
            rule_checks: vec![RuleCheck {
                rule: Some("Act must define key terms".into()),
                status: Some(RuleStatus::Pass),
                evidence: Some("Section 40".into()),
                confidence: Some(88),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_file_name_pattern() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(file_name(&ts), "analysis_20250307_090501.json");
    }

    #[test]
    fn test_json_is_indented() {
        let json = to_json(&sample()).unwrap();
        assert!(json.contains("\n  \"summary\""));
        assert!(json.contains("\"status\": \"pass\""));
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let path = write_report(dir.path(), &sample(), &ts).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "analysis_20250102_030405.json"
        );
        assert_eq!(read_report(&path).unwrap(), sample());
    }
}
