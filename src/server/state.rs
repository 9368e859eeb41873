use std::sync::Arc;

use crate::service::CatalogService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: CatalogService,
    /// Bearer token accepted by the admin routes; `None` disables them
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(service: CatalogService, admin_token: Option<String>) -> Self {
        Self {
            service,
            admin_token: admin_token.map(Arc::from),
        }
    }
}
