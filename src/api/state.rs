use std::sync::Arc;

use crate::calculate::DisciplineSet;
use crate::store::RecordStore;

/// Shared handler state. The store is never written after load.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub top_disciplines: Arc<DisciplineSet>,
}

impl AppState {
    pub fn new(store: RecordStore, top_disciplines: DisciplineSet) -> Self {
        Self {
            store: Arc::new(store),
            top_disciplines: Arc::new(top_disciplines),
        }
    }
}
