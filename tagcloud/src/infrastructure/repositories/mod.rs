pub mod json_tag_repository;
pub mod memory_tag_repository;
