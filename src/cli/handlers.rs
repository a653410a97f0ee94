use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::http;
use crate::storage::MemStore;

pub fn handle_serve(host: String, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("{}", e)))?;

    // One store for the process lifetime, injected into the routing layer.
    let store = MemStore::new();
    debug!(
        types = store.maintenance_types().len(),
        reasons = store.extraction_reasons().len(),
        "store initialized with seeded catalogs"
    );
    let store = Arc::new(RwLock::new(store));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(http::serve(store, addr))
}
