mod client;

pub use client::{Credentials, RateLimitedClient};
