use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use crate::domain::ports::{
    UniqueIdStore, UserRepository, PropertyRepository, MaterialRepository,
    PayoutRepository, ExpenseRepository, PaymentRepository,
};
use crate::domain::services::{
    backfill_service::BackfillService, id_allocator::IdAllocator, payout_service::PayoutService,
};
use crate::infra::repositories::{
    postgres_unique_id_store::PostgresUniqueIdStore, postgres_user_repo::PostgresUserRepo,
    postgres_property_repo::PostgresPropertyRepo, postgres_material_repo::PostgresMaterialRepo,
    postgres_payout_repo::PostgresPayoutRepo, postgres_expense_repo::PostgresExpenseRepo,
    postgres_payment_repo::PostgresPaymentRepo,
    sqlite_unique_id_store::SqliteUniqueIdStore, sqlite_user_repo::SqliteUserRepo,
    sqlite_property_repo::SqlitePropertyRepo, sqlite_material_repo::SqliteMaterialRepo,
    sqlite_payout_repo::SqlitePayoutRepo, sqlite_expense_repo::SqliteExpenseRepo,
    sqlite_payment_repo::SqlitePaymentRepo,
};

/// Backend-specific repositories, before the services are wired on top.
pub struct Stores {
    pub id_store: Arc<dyn UniqueIdStore>,
    pub user_repo: Arc<dyn UserRepository>,
    pub property_repo: Arc<dyn PropertyRepository>,
    pub material_repo: Arc<dyn MaterialRepository>,
    pub payout_repo: Arc<dyn PayoutRepository>,
    pub expense_repo: Arc<dyn ExpenseRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
}

pub fn sqlite_stores(pool: SqlitePool) -> Stores {
    Stores {
        id_store: Arc::new(SqliteUniqueIdStore::new(pool.clone())),
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        property_repo: Arc::new(SqlitePropertyRepo::new(pool.clone())),
        material_repo: Arc::new(SqliteMaterialRepo::new(pool.clone())),
        payout_repo: Arc::new(SqlitePayoutRepo::new(pool.clone())),
        expense_repo: Arc::new(SqliteExpenseRepo::new(pool.clone())),
        payment_repo: Arc::new(SqlitePaymentRepo::new(pool)),
    }
}

pub fn postgres_stores(pool: PgPool) -> Stores {
    Stores {
        id_store: Arc::new(PostgresUniqueIdStore::new(pool.clone())),
        user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
        property_repo: Arc::new(PostgresPropertyRepo::new(pool.clone())),
        material_repo: Arc::new(PostgresMaterialRepo::new(pool.clone())),
        payout_repo: Arc::new(PostgresPayoutRepo::new(pool.clone())),
        expense_repo: Arc::new(PostgresExpenseRepo::new(pool.clone())),
        payment_repo: Arc::new(PostgresPaymentRepo::new(pool)),
    }
}

pub fn assemble_state(config: &Config, stores: Stores) -> AppState {
    let id_allocator = Arc::new(IdAllocator::new(stores.id_store.clone(), config.id_max_retries));
    let payout_service = Arc::new(PayoutService::new(stores.payout_repo.clone(), stores.user_repo.clone()));
    let backfill_service = Arc::new(BackfillService::new(
        id_allocator.clone(),
        stores.user_repo.clone(),
        stores.property_repo.clone(),
        stores.material_repo.clone(),
        config.backfill_max_retries,
    ));

    AppState {
        config: config.clone(),
        user_repo: stores.user_repo,
        property_repo: stores.property_repo,
        material_repo: stores.material_repo,
        payout_repo: stores.payout_repo,
        expense_repo: stores.expense_repo,
        payment_repo: stores.payment_repo,
        id_allocator,
        payout_service,
        backfill_service,
    }
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let opts: PgConnectOptions = database_url.parse::<PgConnectOptions>()?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;
        Ok(assemble_state(config, postgres_stores(pool)))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;
        Ok(assemble_state(config, sqlite_stores(pool)))
    }
}

pub async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Postgres migrations failed: {}", e)))
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("SQLite migrations failed: {}", e)))
}
