pub mod analyzers;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod parser;
pub mod schema;
pub mod session;
pub mod stats;
