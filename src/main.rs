use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod api;
mod state;

use docusearch_backend::config;
use docusearch_backend::search::SqliteIndex;
use docusearch_backend::storage::{FileDocumentStore, SyncedDocumentStore, TextIndexConfig};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docusearch_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_FILE_NAME.to_string());
    let app_config = config::load_config(&config_file)?;

    tracing::info!(
        "docusearch-backend {} (built {}) starting",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_TIME"),
    );

    let data_dir = app_config.get_data_dir();
    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
        tracing::info!("created data directory: {:?}", data_dir);
    }

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| app_config.get_database_url());
    let index = Arc::new(SqliteIndex::connect(&database_url).await?);
    index.init().await?;

    let file_store = Arc::new(FileDocumentStore::new(app_config.get_uploads_dir()));
    let synced_store = Arc::new(SyncedDocumentStore::new(
        file_store,
        index.clone(),
        TextIndexConfig {
            ignore_common_words: app_config.search.ignore_common_words,
        },
    ));

    let state = Arc::new(AppState {
        store: synced_store,
        search: index,
    });

    let app = Router::new()
        .route("/api/health", get(api::health_check))
        .route("/document/:id", post(api::documents::upload_document))
        .route("/document/:id", get(api::documents::get_document))
        .route("/document/:id", delete(api::documents::delete_document))
        .route("/search", get(api::search::search_word))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
