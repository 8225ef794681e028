//! Typed Notion entities.
//!
//! All types serialize back to the service's JSON field names so tool output reads
//! like the API. Decoding lives in [`crate::conversions`], where each required field
//! is checked and reported by name.

pub mod block;
pub mod database;
pub mod page;
pub mod property;
pub mod rich_text;
pub mod search;

pub use block::ContentBlock;
pub use database::Database;
pub use page::{Page, Parent};
pub use property::{
    DateRange, PropertyKind, PropertySchema, PropertyType, PropertyValue, SelectOption,
};
pub use rich_text::{plain_text_of, Annotations, RichText, TextContent, TextLink};
pub use search::{SearchResult, SearchResults};
