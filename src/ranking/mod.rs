pub mod filter;
pub mod matrix;
pub mod report;
pub mod seeding;

pub use filter::{sorted_by_rating, Filter, FilterPipeline};
pub use matrix::{CellOutcome, MatchupCell, MatchupMatrix};
pub use seeding::{seed_order, SeedEntry};
