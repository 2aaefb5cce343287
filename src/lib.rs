pub mod config;
pub mod countries;
pub mod engine;
pub mod session;
pub mod storage;
pub mod ui;
