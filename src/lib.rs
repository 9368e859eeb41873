pub mod cache;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod seed;
pub mod server;
pub mod service;
pub mod storage;
pub mod submission;

// Domain data shapes shared across layers
pub mod domain;
