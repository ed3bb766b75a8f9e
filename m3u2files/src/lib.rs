mod config;
mod pipeline;
pub use config::*;
pub use pipeline::*;
pub mod errors;
pub mod materialize;
pub mod store;
pub mod transfer;
