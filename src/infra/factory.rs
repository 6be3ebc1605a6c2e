use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::models::user::{Role, User};
use crate::domain::services::auth_service::AuthService;
use crate::infra::repositories::{
    postgres_appointment_repo::PostgresAppointmentRepo, postgres_auth_repo::PostgresAuthRepo,
    postgres_pet_repo::PostgresPetRepo, postgres_schedule_repo::PostgresScheduleRepo,
    postgres_user_repo::PostgresUserRepo, postgres_vet_repo::PostgresVetRepo,
    sqlite_appointment_repo::SqliteAppointmentRepo, sqlite_auth_repo::SqliteAuthRepo,
    sqlite_pet_repo::SqlitePetRepo, sqlite_schedule_repo::SqliteScheduleRepo,
    sqlite_user_repo::SqliteUserRepo, sqlite_vet_repo::SqliteVetRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            auth_repo,
            vet_repo: Arc::new(PostgresVetRepo::new(pool.clone())),
            schedule_repo: Arc::new(PostgresScheduleRepo::new(pool.clone())),
            pet_repo: Arc::new(PostgresPetRepo::new(pool.clone())),
            appointment_repo: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            auth_service,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            auth_repo,
            vet_repo: Arc::new(SqliteVetRepo::new(pool.clone())),
            schedule_repo: Arc::new(SqliteScheduleRepo::new(pool.clone())),
            pet_repo: Arc::new(SqlitePetRepo::new(pool.clone())),
            appointment_repo: Arc::new(SqliteAppointmentRepo::new(pool.clone())),
            auth_service,
        }
    };

    ensure_bootstrap_admin(&state).await;
    state
}

/// Creates the initial admin account from config when none exists yet.
async fn ensure_bootstrap_admin(state: &AppState) {
    let existing = state.user_repo
        .find_by_username(&state.config.admin_username)
        .await
        .expect("Failed to query bootstrap admin");

    if existing.is_none() {
        let password_hash = AuthService::hash_password(&state.config.admin_password)
            .expect("Failed to hash bootstrap admin password");
        let admin = User::new(
            state.config.admin_username.clone(),
            password_hash,
            "Clinic Administrator".to_string(),
            Role::Admin,
        );
        state.user_repo.create(&admin).await.expect("Failed to create bootstrap admin");
        info!("Bootstrap admin created: {}", state.config.admin_username);
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
