pub mod competitors;
pub mod connection;
pub mod head_to_head;
pub mod models;
pub mod placements;
pub mod setup;
pub mod snapshot;
pub mod tournaments;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use snapshot::{load_snapshot, save_snapshot};
