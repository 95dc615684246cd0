//! # softdir-core
//!
//! Core functionality for softdir - the catalog generator behind a static
//! software-download site.
//!
//! A download tree of `<software>/<version>/` folders is scanned once per
//! build and turned into a single JSON catalog that the site fetches at
//! runtime. This crate owns that pipeline:
//!
//! - **Encoding**: decoding readme and link files of unknown charset
//! - **Metadata**: reading descriptions, tags and download markers per directory
//! - **Scanning**: assembling software and versions with inheritance rules
//! - **Localization**: the `zh-CN`/`en` description fallback shared by all consumers
//! - **Catalog**: the serialized document and its atomic write
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use softdir_core::{GeneratorConfig, Result, Scanner};
//!
//! let config = GeneratorConfig::default();
//! let catalog = Scanner::new(config.scan_options()).scan(&config.source_dir)?;
//! catalog.write_to(&config.output)?;
//! println!("Indexed {} software", catalog.software.len());
//! # Ok::<(), softdir_core::Error>(())
//! ```

/// Catalog data model and JSON document
pub mod catalog;
/// Generator configuration
pub mod config;
/// Text decoding with charset detection and fallbacks
pub mod encoding;
/// Error types and result aliases
pub mod error;
/// Download paths and links for the front end
pub mod links;
/// Localized descriptions and language fallback
pub mod localization;
/// Metadata files inside software and version directories
pub mod metadata;
/// Standalone UTF-8 normalization of metadata files
pub mod normalize;
/// Download tree scanner
pub mod scanner;
/// Numeric-aware version label ordering
pub mod version_order;

// Re-export commonly used types
pub use catalog::{Catalog, Download, Software, Version};
pub use config::GeneratorConfig;
pub use encoding::{Decoded, DetectedEncoding};
pub use error::{Error, Result};
pub use links::{DownloadTarget, download_path, download_targets};
pub use localization::{Language, LocalizedDescription};
pub use normalize::{NormalizeAction, NormalizedFile, normalize_tree};
pub use scanner::{ScanOptions, Scanner, scan};
