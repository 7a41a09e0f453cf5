pub mod config;
pub mod context;
pub mod repository;
pub mod transport;

pub use config::*;
pub use context::*;
pub use repository::*;
pub use transport::*;
