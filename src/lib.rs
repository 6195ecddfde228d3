pub mod apis;
pub mod arguments;
pub mod cache;
pub mod config;
pub mod logger;
pub mod tokenomics;
pub mod webserver;
