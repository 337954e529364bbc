mod error;
mod open;
mod models;
mod insert;
mod query;
mod schema;
mod arrow_schemas;
mod export_parquet;

pub use error::StoreError;
pub use open::Db;
pub use models::*;
pub use schema::quote_ident;
pub use export_parquet::export_table_to_parquet;
