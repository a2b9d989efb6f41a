mod challonge_client;
pub mod models;

pub use challonge_client::ChallongeClient;
