pub mod entities;
pub mod error;
pub mod store;

pub use error::StoreError;

// Re-export tracing for use in this crate
pub use tracing;
