pub mod query;
pub mod repository;
