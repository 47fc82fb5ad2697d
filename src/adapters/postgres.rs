use crate::core::{ConnectionProfile, DatabaseConnector, TableConnection, TableRef, TableSnapshot};
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Column, ConnectOptions, Connection, Executor, Row, Statement};
use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens one dedicated `PgConnection` per extraction (no pool).
#[derive(Debug, Clone)]
pub struct PgConnector {
    connect_timeout: Duration,
}

impl PgConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// A blank password is left unset so SQLx can fall back to `PGPASSWORD` or `.pgpass`.
    fn options(profile: &ConnectionProfile) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&profile.host)
            .port(profile.port)
            .database(&profile.dbname)
            .username(&profile.user)
            .application_name("table-export");

        if profile.password.is_empty() {
            options
        } else {
            options.password(&profile.password)
        }
    }
}

impl Default for PgConnector {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }
}

#[async_trait]
impl DatabaseConnector for PgConnector {
    type Connection = PgTableConnection;

    async fn connect(&self, profile: &ConnectionProfile) -> Result<PgTableConnection> {
        let options = Self::options(profile);
        let conn = tokio::time::timeout(self.connect_timeout, options.connect())
            .await
            .map_err(|_| PipelineError::ConnectionError {
                message: format!(
                    "timed out after {:?} connecting to {}:{}",
                    self.connect_timeout, profile.host, profile.port
                ),
            })?
            .map_err(|e| PipelineError::ConnectionError {
                message: e.to_string(),
            })?;

        Ok(PgTableConnection { conn })
    }
}

pub struct PgTableConnection {
    conn: PgConnection,
}

fn query_error(e: sqlx::Error) -> PipelineError {
    PipelineError::QueryError {
        message: e.to_string(),
    }
}

#[async_trait]
impl TableConnection for PgTableConnection {
    async fn fetch_table(&mut self, table: &TableRef) -> Result<TableSnapshot> {
        let query = table.select_all_query();

        // Column names come from the statement description so an empty table still has a header.
        let columns: Vec<String> = {
            let statement = (&mut self.conn)
                .prepare(query.as_str())
                .await
                .map_err(query_error)?;
            statement
                .columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect()
        };

        // A plain &str runs over the simple-query protocol: every value arrives as text.
        let rows = (&mut self.conn)
            .fetch_all(query.as_str())
            .await
            .map_err(query_error)?;

        let mut data = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut cells = Vec::with_capacity(row.len());
            for index in 0..row.len() {
                let cell: Option<String> = row.try_get_unchecked(index).map_err(query_error)?;
                cells.push(cell);
            }
            data.push(cells);
        }

        tracing::debug!("Fetched {} rows from {}", data.len(), table);
        Ok(TableSnapshot {
            columns,
            rows: data,
        })
    }

    async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| PipelineError::ConnectionError {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let profile = ConnectionProfile {
            host: "127.0.0.1".to_string(),
            dbname: "shop".to_string(),
            user: "reporter".to_string(),
            password: "secret".to_string(),
            // Reserved port; nothing listens here.
            port: 1,
        };

        let result = PgConnector::new(Duration::from_secs(5)).connect(&profile).await;

        assert!(matches!(result, Err(PipelineError::ConnectionError { .. })));
    }
}
