use std::sync::Arc;

use crate::{
    auth::{decode_secret_key, AuthManager},
    config::Config,
};
use spendly_core::{
    blobs::BlobStoreTrait,
    goals::{GoalService, GoalServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserRepositoryTrait, UserService, UserServiceTrait},
};
use spendly_ipfs::{LocalBlobStore, PinataGateway};
use spendly_storage_sqlite::{db, users::UserRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SPENDLY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_blob_store(config: &Config) -> anyhow::Result<Arc<dyn BlobStoreTrait>> {
    match &config.pinata {
        Some(pinata) => {
            tracing::info!("Using Pinata gateway {}", pinata.gateway);
            Ok(Arc::new(PinataGateway::new(pinata.clone())))
        }
        None => {
            tracing::info!("Using local blob store at {}", config.blob_dir);
            Ok(Arc::new(LocalBlobStore::open(&config.blob_dir)?))
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let user_repository: Arc<dyn UserRepositoryTrait> =
        Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let blob_store = build_blob_store(config)?;

    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repository.clone()));
    let goal_service: Arc<dyn GoalServiceTrait> = Arc::new(GoalService::new(
        user_repository.clone(),
        blob_store.clone(),
    ));
    let transaction_service: Arc<dyn TransactionServiceTrait> = Arc::new(
        TransactionService::new(user_repository, blob_store, config.signed_url_ttl),
    );

    let secret = decode_secret_key(&config.secret_key)?;
    let auth = Arc::new(AuthManager::new(&secret, config.auth_token_ttl));

    Ok(Arc::new(AppState {
        user_service,
        goal_service,
        transaction_service,
        auth,
    }))
}
