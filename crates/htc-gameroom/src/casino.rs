use std::collections::HashMap;
use std::sync::Arc;

use htc_core::{CoreError, ErrorKind, SeatId};
use htc_holdem::HoldemOptions;
use tokio::sync::RwLock;

use crate::table::{Table, TableId};
use crate::transport::Transport;

/// A process-wide registry of open tables (spec §4.E "one mediator
/// instance per active table", generalized to many tables sharing one
/// transport). Grounded in the teacher's `hosting::Casino` lobby
/// registry, minus anything related to matchmaking/seating queues,
/// which this spec doesn't describe.
pub struct Casino {
    tables: RwLock<HashMap<TableId, Arc<Table>>>,
    transport: Arc<dyn Transport>,
}

impl Casino {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { tables: RwLock::new(HashMap::new()), transport }
    }

    /// Opens a fresh table seated with `players` and returns its id.
    pub async fn open_table(&self, players: Vec<SeatId>, options: HoldemOptions) -> Result<TableId, CoreError> {
        let id = TableId::new();
        let table = Table::new(id, players, options, self.transport.clone())?;
        self.tables.write().await.insert(id, Arc::new(table));
        log::info!("[casino] opened table {id}");
        Ok(id)
    }

    /// Drops a table from the registry. Any `Arc<Table>` held elsewhere
    /// (e.g. a caller mid-`apply_action`) keeps it alive until released.
    pub async fn close_table(&self, id: TableId) -> Result<(), CoreError> {
        self.tables
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::new(ErrorKind::TableNotFound, format!("no table {id} is open")))
    }

    pub async fn table(&self, id: TableId) -> Option<Arc<Table>> {
        self.tables.read().await.get(&id).cloned()
    }

    pub async fn open_table_ids(&self) -> Vec<TableId> {
        self.tables.read().await.keys().copied().collect()
    }
}
