//! Documentation retrieval and code generation for PrimeNG components.
//!
//! Pages on the PrimeNG site are fetched on demand, turned into structured
//! records (properties, events, methods, guide sections), cached on disk with a
//! time-to-live and rendered as markdown for an agent calling in over MCP
//! (see [`DocsService`]).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use primeng_docs::{DocsServer, ServerConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), primeng_docs::Error> {
//!     let mut server = DocsServer::new(&ServerConfig::default())?;
//!     server.initialize().await?;
//!
//!     let response = server
//!         .call_tool("get_component_doc", &json!({"component": "button"}))
//!         .await?;
//!     println!("{}", response.text);
//!     Ok(())
//! }
//! ```

mod cache;
mod client;
mod codegen;
mod config;
mod consts;
mod error;
mod extract;
mod format;
pub mod logging;
mod mcp;
mod retry;
mod server;
mod types;
mod version;

pub use cache::{CacheStore, DocCache};
pub use client::{component_doc_from_html, guide_from_html, Client, ClientBuilder};
pub use codegen::CodeGenerator;
pub use config::{CacheConfig, LogLevel, LoggingConfig, ScrapingConfig, ServerConfig};
pub use consts::{COMPONENT_CATEGORIES, FALLBACK_COMPONENTS, PRIMENG_BASE_URL};
pub use error::{Error, Result};
pub use extract::{
    extract_basic_usage, extract_component_links, extract_description, extract_events, extract_guide_sections,
    extract_guide_title, extract_methods, extract_properties,
};
pub use format::{
    detect_code_language, format_component_doc, format_component_list, format_guide_doc, format_search_results,
};
pub use retry::{retry_with_backoff, RetryOptions};
pub use mcp::DocsService;
pub use server::{ComponentArgs, DocsServer, GenerateArgs, QueryArgs, ToolCall, ToolResponse};
pub use types::*;
pub use version::{SERVER_NAME, SERVER_VERSION};
