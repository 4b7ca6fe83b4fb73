pub mod config;
pub mod logging;

pub mod error;
pub mod fetcher;
pub mod http;
pub mod job;
pub mod locate;
pub mod manifest;
pub mod mux;
pub mod retry;
pub mod url_model;
pub mod workspace;
