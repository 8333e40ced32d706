// tagcloud/src/application/services/mod.rs
pub mod tag_cloud_service;
pub mod tag_cloud_service_impl;
