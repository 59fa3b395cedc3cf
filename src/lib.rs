// HTTP Server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod rejection;
pub mod routes;
pub mod state;

// Reply envelope and prompt assembly
pub mod prompt;
pub mod twiml;

// Customer database client
pub mod customer_db;

// LLM client layer
pub mod llm;

// Local screenshot storage
pub mod screenshots;
