//! gigil-core — content model and normalisation for gigil.
//!
//! This crate owns everything that does not touch the network: the shared
//! types, the layered configuration, and the normaliser that turns raw CMS
//! records into stable [`NormalizedContent`] values.
//!
//! # Data flow
//!
//! ```text
//! CMS response ──► CmsEnvelope { data } ──► Normalizer ──► NormalizedContent
//!                                              │
//!                         config::CmsConfig ───┘ (media origin, placeholders)
//! ```

pub mod config;
pub mod gifting;
pub mod normalizer;
pub mod types;

pub use normalizer::Normalizer;
pub use types::{
    Author, BlogPostQuery, Category, CmsEnvelope, ContentPage, NormalizedContent, Pagination,
};
