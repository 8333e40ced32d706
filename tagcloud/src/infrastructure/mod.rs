// tagcloud/src/infrastructure/mod.rs
pub mod di;
pub mod error;
pub mod json;
pub mod links;
pub mod repositories;
