use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Local, Timelike};
use tracing::info;

use crate::errors::InspectaError;
use crate::findings::NormalizedFinding;

/// Run-scoped accumulator for normalized findings, flushed to two JSON report
/// files at the end of a run: general findings and CIS benchmark findings.
#[derive(Default)]
pub struct FindingsCollector {
    findings: Vec<NormalizedFinding>,
    cis_findings: Vec<NormalizedFinding>,
}

/// Where a run's reports landed, and how many records each holds.
#[derive(Debug, Clone)]
pub struct SavedReports {
    pub general_path: PathBuf,
    pub general_count: usize,
    pub cis_path: PathBuf,
    pub cis_count: usize,
}

impl FindingsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_findings(&mut self, findings: Vec<NormalizedFinding>) {
        self.findings.extend(findings);
    }

    pub fn add_cis_findings(&mut self, findings: Vec<NormalizedFinding>) {
        self.cis_findings.extend(findings);
    }

    pub fn general_count(&self) -> usize {
        self.findings.len()
    }

    pub fn cis_count(&self) -> usize {
        self.cis_findings.len()
    }

    /// Write both report files under
    /// `<output>/<year>/<month>/<suffix>/<date>_<time>.json`. Both files are
    /// written even when empty so every run leaves a trace.
    pub async fn save(&self, output_dir: &Path) -> Result<SavedReports, InspectaError> {
        let now = Local::now();
        let general_path = write_stream(output_dir, &now, "inspector", &self.findings).await?;
        let cis_path = write_stream(output_dir, &now, "cis", &self.cis_findings).await?;
        Ok(SavedReports {
            general_path,
            general_count: self.findings.len(),
            cis_path,
            cis_count: self.cis_findings.len(),
        })
    }
}

async fn write_stream(
    output_dir: &Path,
    now: &DateTime<Local>,
    suffix: &str,
    findings: &[NormalizedFinding],
) -> Result<PathBuf, InspectaError> {
    let path = output_path(output_dir, now, suffix);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            InspectaError::Report(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    let json = serde_json::to_string_pretty(findings)?;
    tokio::fs::write(&path, json).await.map_err(|e| {
        InspectaError::Report(format!("Failed to write {}: {}", path.display(), e))
    })?;
    info!(path = %path.display(), count = findings.len(), "Findings saved");
    Ok(path)
}

fn output_path(output_dir: &Path, now: &DateTime<Local>, suffix: &str) -> PathBuf {
    output_dir
        .join(now.year().to_string())
        .join(format!("{:02}", now.month()))
        .join(suffix)
        .join(format!(
            "{}-{:02}-{:02}_{:02}{:02}{:02}.json",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second()
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::{normalize, ResourceKind};
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_output_path_layout() {
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap();
        let path = output_path(Path::new("output"), &now, "inspector");
        assert_eq!(
            path,
            Path::new("output/2026/03/inspector/2026-03-07_090502.json")
        );
    }

    #[tokio::test]
    async fn test_save_writes_both_streams() {
        let dir = tempfile::tempdir().unwrap();
        let mut collector = FindingsCollector::new();
        collector.add_findings(normalize(
            Some(&json!([{"findingArn": "arn:1", "severity": "HIGH"}])),
            ResourceKind::Ec2,
        ));
        collector.add_cis_findings(normalize(
            Some(&json!([{"findingArn": "arn:cis:1"}, {"findingArn": "arn:cis:2"}])),
            ResourceKind::Cis,
        ));

        let saved = collector.save(dir.path()).await.unwrap();
        assert_eq!(saved.general_count, 1);
        assert_eq!(saved.cis_count, 2);

        let general: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&saved.general_path).unwrap()).unwrap();
        assert_eq!(general.as_array().unwrap().len(), 1);
        assert_eq!(general[0]["AWS Service"], "EC2");
        assert_eq!(general[0]["findingArn"], "arn:1");

        let cis: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&saved.cis_path).unwrap()).unwrap();
        assert_eq!(cis.as_array().unwrap().len(), 2);

        assert!(saved.general_path.to_string_lossy().contains("/inspector/"));
        assert!(saved.cis_path.to_string_lossy().contains("/cis/"));
    }

    #[tokio::test]
    async fn test_save_empty_collector_still_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let collector = FindingsCollector::new();
        let saved = collector.save(dir.path()).await.unwrap();
        assert_eq!(saved.general_count, 0);
        assert_eq!(saved.cis_count, 0);
        assert!(saved.general_path.exists());
        assert!(saved.cis_path.exists());
    }
}
