//! # Notion Client
//!
//! Typed access to the Notion REST API.
//!
//! - [`NotionClient`]: one async method per remote operation over a pluggable
//!   [`NotionTransport`] (the default is [`HttpTransport`], built on `reqwest`).
//! - [`models`] and [`conversions`]: the page/database/property model and the
//!   decoders that check each required field of a response.
//! - [`markdown`]: rendering of content blocks to markdown.
//! - [`config`]: settings-file discovery and environment overrides.
//!
//! ```rust,no_run
//! use notion_client::{NotionClient, NotionClientConfig, SearchQuery};
//!
//! # async fn example() -> Result<(), notion_client::NotionError> {
//! let client = NotionClient::new(&NotionClientConfig::new("secret_..."))?;
//! let results = client
//!     .search(&SearchQuery { query: "roadmap".into(), ..Default::default() })
//!     .await?;
//! println!("{} results", results.results.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod conversions;
pub mod error;
pub mod identifier;
pub mod markdown;
pub mod models;
pub mod requests;
pub mod transport;

pub use client::NotionClient;
pub use config::{api_key_from_env, load_settings, NotionClientConfig, NotionSettings};
pub use error::{NotionError, NotionResult};
pub use identifier::{normalize_id, NotionId};
pub use markdown::{render_block_to_text, render_blocks, render_rich_text};
pub use models::{
    ContentBlock, Database, Page, Parent, PropertyKind, PropertySchema, PropertyType,
    PropertyValue, RichText, SearchResult, SearchResults,
};
pub use requests::{
    BlockAppend, BlockChildrenQuery, BlockUpdate, DatabaseQuery, DatabaseUpdate, NewDatabase,
    NewPage, PageUpdate, SearchQuery,
};
pub use transport::{ApiRequest, HttpTransport, NotionTransport};
