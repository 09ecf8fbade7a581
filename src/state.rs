use std::sync::Arc;

use docusearch_backend::search::SearchProvider;
use docusearch_backend::storage::DocumentStore;

/// Shared handles for the HTTP handlers.
///
/// Document writes and deletes go through `store` (the synced facade) so the
/// index stays consistent; searches query the provider directly.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub search: Arc<dyn SearchProvider>,
}
