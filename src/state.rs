// src/state.rs
// Shared state handed to the route layer

use std::sync::Arc;

use crate::store::FactStore;

#[derive(Clone)]
pub struct AppState {
    // -------- Storage --------
    pub fact_store: Arc<dyn FactStore>,
}

impl AppState {
    pub fn new(fact_store: Arc<dyn FactStore>) -> Arc<Self> {
        Arc::new(Self { fact_store })
    }
}
