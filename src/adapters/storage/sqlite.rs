use crate::domain::model::{Appointment, NewAppointment, SLOT_FORMAT};
use crate::domain::ports::AppointmentStore;
use crate::utils::error::{Result, TerminError};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

// Row as stored; `type` is kept as text and parsed on the way out.
#[derive(FromRow)]
struct AppointmentRow {
    id: i64,
    name: String,
    email: String,
    phone: String,
    #[sqlx(rename = "type")]
    kind: String,
    delkey: String,
    start_time: DateTime<FixedOffset>,
    end_time: DateTime<FixedOffset>,
    description: String,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = TerminError;

    fn try_from(row: AppointmentRow) -> Result<Self> {
        Ok(Appointment {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            description: row.description,
            appointment_type: row.kind.parse()?,
            start_time: row.start_time,
            end_time: row.end_time,
            deletion_key: row.delkey,
        })
    }
}

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if needed) the database at `url` and applies the
    /// embedded migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// A private in-memory database. One connection that never idles out, so
    /// the data lives as long as the store.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("Appointment schema is up to date");
        Ok(())
    }
}

fn map_insert_error(err: sqlx::Error, appointment: &NewAppointment) -> TerminError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.message().contains("start_time") {
            return TerminError::SlotTaken {
                start: appointment.start_time.format(SLOT_FORMAT).to_string(),
            };
        }
    }
    TerminError::DatabaseError(err)
}

#[async_trait]
impl AppointmentStore for SqliteStore {
    async fn create(&self, appointment: NewAppointment) -> Result<Appointment> {
        let id = sqlx::query(
            "INSERT INTO appointments (
                name,
                email,
                phone,
                type,
                delkey,
                start_time,
                end_time,
                description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&appointment.name)
        .bind(&appointment.email)
        .bind(&appointment.phone)
        .bind(appointment.appointment_type.as_str())
        .bind(&appointment.deletion_key)
        .bind(appointment.start_time)
        .bind(appointment.end_time)
        .bind(&appointment.description)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &appointment))?
        .last_insert_rowid();

        Ok(Appointment::from_new(id, appointment))
    }

    async fn list(&self) -> Result<Vec<Appointment>> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(
            "SELECT id, name, email, phone, type, delkey, start_time, end_time, description
             FROM appointments ORDER BY start_time ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn delete_by_key(&self, deletion_key: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM appointments WHERE delkey = ?1")
            .bind(deletion_key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
