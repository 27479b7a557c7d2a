//! Data models for Luno

mod category;
mod contact_message;
mod post;

pub use category::{Category, CategoryId};
pub use contact_message::{ContactMessage, ContactMessageId};
pub use post::{NewPost, Post, PostId};
