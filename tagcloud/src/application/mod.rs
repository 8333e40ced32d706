// tagcloud/src/application/mod.rs
pub mod error;
pub mod services;

pub use services::tag_cloud_service_impl::TagCloudServiceImpl;
