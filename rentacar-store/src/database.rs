use async_trait::async_trait;
use rentacar_core::ports::RecordStore;
use rentacar_core::records::{PaymentRecord, RentalRecord};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::error::Error;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    /// Build a lazily-connecting pool. Writes fail per-call if the store is
    /// unreachable; the pipeline treats those failures as non-fatal.
    pub fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_lazy(connection_string)?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// Insert one record as a JSONB document keyed by its id. The table's
    /// primary key is the only uniqueness the pipeline gets; a replayed
    /// message collides here and the error is swallowed upstream.
    async fn insert_document<T: Serialize>(
        &self,
        table: &str,
        id: &str,
        record: &T,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let doc = serde_json::to_value(record)?;
        let statement = format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", table);
        sqlx::query(&statement)
            .bind(id)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Persistence capability, decided once at startup: a live Postgres-backed
/// document store, or a logging-only stand-in when no database is
/// configured.
pub enum DocumentStore {
    Live(DbClient),
    Disabled,
}

impl DocumentStore {
    pub async fn from_config(url: Option<&str>) -> Self {
        match url {
            Some(url) => match DbClient::new(url) {
                Ok(client) => {
                    if let Err(e) = client.migrate().await {
                        warn!("Migrations failed, store writes may be rejected: {}", e);
                    }
                    info!("Document store initialized");
                    Self::Live(client)
                }
                Err(e) => {
                    warn!("Invalid database configuration, records will be logged only: {}", e);
                    Self::Disabled
                }
            },
            None => {
                info!("No database configured, records will be logged only");
                Self::Disabled
            }
        }
    }
}

#[async_trait]
impl RecordStore for DocumentStore {
    async fn save_rental(
        &self,
        rental: &RentalRecord,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        match self {
            Self::Live(db) => {
                db.insert_document("rentals", &rental.id, rental).await?;
                Ok(())
            }
            Self::Disabled => {
                info!(
                    "Rental record (local): {}",
                    serde_json::to_string(rental)?
                );
                Ok(())
            }
        }
    }

    async fn save_payment(
        &self,
        payment: &PaymentRecord,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        match self {
            Self::Live(db) => {
                db.insert_document("payments", &payment.id, payment).await?;
                Ok(())
            }
            Self::Disabled => {
                info!(
                    "Payment record (local): {}",
                    serde_json::to_string(payment)?
                );
                Ok(())
            }
        }
    }
}
