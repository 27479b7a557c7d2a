//! luno-core - Core library for Luno
//!
//! This crate contains the bilingual blog models, the post search filter,
//! the libSQL database layer, and contact form handling used by the Luno CLI.

pub mod config;
pub mod contact;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod search;
pub mod services;
pub mod util;
pub mod validation;

pub use error::{Error, Result};
pub use models::{Category, CategoryId, ContactMessage, ContactMessageId, NewPost, Post, PostId};
pub use search::{filter_posts, SearchStrategy};
