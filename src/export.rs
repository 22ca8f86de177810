use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use crate::dataset::Dataset;

/// Tabular output: header row from the dataset's stable columns, one row
/// per document.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct Backup<'a> {
    generated_at: String,
    documents: Vec<BackupDocument<'a>>,
}

#[derive(Serialize)]
struct BackupDocument<'a> {
    source: &'a str,
    pages: u32,
    lines: usize,
    status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    fields: BTreeMap<&'a str, &'a str>,
}

/// Nested document → field → value dump for the backup writer, with a run
/// timestamp.
pub fn write_backup(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let backup = Backup {
        generated_at: Utc::now().to_rfc3339(),
        documents: dataset
            .records()
            .iter()
            .map(|r| BackupDocument {
                source: &r.source,
                pages: r.pages,
                lines: r.lines,
                status: r.status.as_str(),
                error: r.error.as_deref(),
                fields: r.field_map(),
            })
            .collect(),
    };
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &backup)?;
    Ok(())
}
