//! Data models for Dexter

mod catalog;
mod pokemon;

pub use catalog::catalog;
pub use pokemon::{ARTWORK_BASE_URL, Pokemon};
