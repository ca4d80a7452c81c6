pub mod app;
pub mod config;
pub mod error;
pub mod normalize;
pub mod presentation;
pub mod storage;
pub mod types;
pub mod upstream;
pub mod validation;
