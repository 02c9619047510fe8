pub mod chain;
pub mod config;
pub mod errors;
pub mod export;
pub mod feeds;
pub mod math;
pub mod models;
pub mod portfolio;
pub mod risk;
pub mod session;
