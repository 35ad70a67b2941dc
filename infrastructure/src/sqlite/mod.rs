//! SQLite adapter for the evaluation store, team directory and access policy

mod catalog;
mod rows;
mod schema;
mod store;

pub use catalog::CatalogError;
pub use schema::SCHEMA_VERSION;
pub use store::SqliteStore;
