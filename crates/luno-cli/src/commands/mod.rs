pub mod category;
pub mod common;
pub mod completions;
pub mod contact;
pub mod export;
pub mod home;
pub mod list;
pub mod post;
pub mod search;
pub mod show;
