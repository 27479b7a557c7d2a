//! Database layer for Luno

mod category_repository;
mod connection;
mod contact_repository;
mod migrations;
mod post_repository;
mod rows;

pub use category_repository::{CategoryRepository, LibSqlCategoryRepository};
pub use connection::Database;
pub use contact_repository::{ContactRepository, LibSqlContactRepository};
pub use post_repository::{LibSqlPostRepository, PostRepository};
