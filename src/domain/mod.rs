mod collection;
pub mod models;
mod progress;

pub use collection::TournamentCollection;
pub use models::*;
pub use progress::FetchProgress;
