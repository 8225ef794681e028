//! MCP tool implementations and their parameter/response types.
//!
//! All parameter structs derive `Deserialize + JsonSchema` for MCP tool registration.
//! Tool functions take the shared client and return the text handed back to the caller.

pub mod blocks;
pub mod databases;
pub mod helpers;
pub mod pages;
pub mod params;
pub mod search;

pub use params::*;
