//! Shared services built on top of the database layer.

mod database;

pub use database::DatabaseService;
