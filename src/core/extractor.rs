use crate::core::{
    ConnectionProfile, DatabaseConnector, ExtractSummary, TableConnection, TableRef, TableSnapshot,
};
use crate::utils::error::{PipelineError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Dumps one table to a local CSV file.
pub struct Extractor<D: DatabaseConnector> {
    connector: D,
    table: TableRef,
}

impl<D: DatabaseConnector> Extractor<D> {
    pub fn new(connector: D, table: TableRef) -> Self {
        Self { connector, table }
    }

    /// Queries the whole table and writes it to `destination`.
    ///
    /// The connection is closed on every path once it has been opened. The destination is
    /// left untouched when the connection or the query fails.
    pub async fn extract(
        &self,
        destination: &Path,
        profile: &ConnectionProfile,
    ) -> Result<ExtractSummary> {
        tracing::debug!(
            "Connecting to {}:{}/{} as {}",
            profile.host,
            profile.port,
            profile.dbname,
            profile.user
        );
        let mut connection = self.connector.connect(profile).await?;

        tracing::debug!("Running: {}", self.table.select_all_query());
        let fetched = connection.fetch_table(&self.table).await;

        if let Err(e) = connection.close().await {
            tracing::warn!("Failed to close database connection cleanly: {}", e);
        }

        let snapshot = fetched?;
        let summary = write_csv(destination, &snapshot)?;

        tracing::info!(
            "File Extraction: SUCCESS ({} rows, {} columns -> {})",
            summary.rows,
            summary.columns,
            summary.path.display()
        );
        Ok(summary)
    }
}

/// Writes header plus rows, replacing any previous file. NULL cells become empty fields.
///
/// Rows go to a sibling temp file first and are renamed into place, so a failed write
/// never leaves a truncated extract at `destination`.
pub fn write_csv(destination: &Path, snapshot: &TableSnapshot) -> Result<ExtractSummary> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let staging = staging_path(destination);
    let written = write_records(&staging, snapshot)
        .and_then(|_| fs::rename(&staging, destination).map_err(PipelineError::from));
    if let Err(e) = written {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }

    Ok(ExtractSummary {
        path: destination.to_path_buf(),
        columns: snapshot.columns.len(),
        rows: snapshot.rows.len(),
    })
}

fn write_records(path: &Path, snapshot: &TableSnapshot) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&snapshot.columns)?;
    for row in &snapshot.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    destination.with_file_name(name)
}
