use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, Transaction};
use tracing::debug;

use crate::models::BillingRecord;
use crate::storage::{SinkError, StorageError};

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS BILLING_DATA (
        DATA_YEAR     INTEGER NOT NULL,
        DATA_MONTH    INTEGER NOT NULL,
        ACCOUNT_ID    TEXT    NOT NULL,
        PHONE_NUMBER  TEXT    NOT NULL,
        DATA_USAGE    REAL    NOT NULL,
        CALL_DURATION REAL    NOT NULL,
        SMS_COUNT     INTEGER NOT NULL
    );";

const INSERT_ROW: &str = "INSERT INTO BILLING_DATA VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

/// SQLite-backed `BILLING_DATA` table. Insert-only.
pub struct BillingStore {
    connection: Connection
}

impl BillingStore {
    /// Opens (or creates) the database file. `busy_timeout` bounds how long a commit
    /// waits on a lock held by another connection before failing transiently.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self, StorageError> {
        debug!("Opening billing database at {}", path.display());

        let connection = Connection::open(path)?;
        connection.busy_timeout(busy_timeout)?;

        Self::prepare(connection)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(connection: Connection) -> Result<Self, StorageError> {
        connection.execute_batch(CREATE_TABLE)?;

        Ok(Self { connection })
    }

    #[cfg(test)]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Starts the transaction a chunk is staged in. Dropping it without commit rolls back.
    pub fn begin(&mut self) -> Result<Transaction<'_>, SinkError> {
        Ok(self.connection.transaction()?)
    }

    pub fn insert_records(transaction: &Transaction<'_>, records: &[BillingRecord]) -> Result<(), SinkError> {
        let mut statement = transaction.prepare_cached(INSERT_ROW)?;

        for record in records {
            statement.execute(params![
                record.data_year,
                record.data_month,
                record.account_id,
                record.phone_number,
                record.data_usage,
                record.call_duration,
                record.sms_count
            ])?;
        }

        Ok(())
    }

    /// Inserts all records in one transaction.
    #[cfg(test)]
    pub fn insert_chunk(&mut self, records: &[BillingRecord]) -> Result<(), SinkError> {
        let transaction = self.begin()?;
        Self::insert_records(&transaction, records)?;
        transaction.commit()?;

        Ok(())
    }

    #[cfg(test)]
    pub fn count_rows(&self) -> Result<i64, StorageError> {
        Ok(self.connection.query_row("SELECT COUNT(*) FROM BILLING_DATA", [], |row| row.get(0))?)
    }
}
