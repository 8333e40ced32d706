// tagcloud/src/domain/mod.rs
pub mod cloud;
pub mod count_text;
pub mod error;
pub mod hooks;
pub mod link;
pub mod natural;
pub mod renderer;
pub mod repositories;
pub mod tag;
