//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`]: a `"provider:model"` identifier
//! - [`topic::Topic`]: a validated debate topic
//! - [`error::ResolveError`]: identifier resolution errors
//! - [`string`]: UTF-8 safe truncation helpers

pub mod error;
pub mod model;
pub mod string;
pub mod topic;
