//! OpenAlex MCP Server
//!
//! A Model Context Protocol (MCP) server for the OpenAlex works API.
//! Lets LLM agents search scholarly works, fetch work details, walk the
//! citation graph in both directions, and read work n-grams.
//!
//! # Features
//!
//! - **6 MCP Tools**: search, details, batch details, references, citing works, n-grams
//! - **Field selection**: root-level projection with plaintext abstracts
//! - **Cursor pagination**: cursors are relayed untouched
//! - **Uniform errors**: every call returns its payload or `{"error": ...}`
//!
//! # Example
//!
//! ```no_run
//! use openalex_mcp::{client::OpenAlexClient, config::Config, server::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = OpenAlexClient::new(&config)?;
//!
//!     McpServer::new(client).run_stdio().await
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod tools;

pub use client::{OpenAlexClient, WorksApi, WorksQuery};
pub use config::Config;
pub use error::{ClientError, ErrorEnvelope, ToolError};
