//! Core types shared by the ingestion pipeline: the record model, the
//! storage seam and the error type.

mod error;
mod record;
mod store;

pub use error::{Error, Result};
pub use record::{Record, ADMIN_SOURCE, SOURCES_SEPARATOR};
pub use store::RecordStore;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
