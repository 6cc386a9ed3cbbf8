//! Parser module for ApkScope.
//!
//! This module provides deserializers for the two supported index sources:
//!
//! - **APKINDEX** (Alpine repository record format) - see [`apkindex`]
//! - **Local test format** (`name -> dep1 dep2 ...`) - see [`local`]
//!
//! Both produce the same [`PackageIndex`] shape, so the rest of the pipeline
//! does not care where the index came from.
//!
//! # Example
//!
//! ```rust
//! use apkscope::parser::{apkindex, local};
//!
//! let from_apkindex = apkindex::parse_str("P:curl\nD:musl so:libssl.so.3\n");
//! let from_local = local::parse_str("curl -> musl libssl.so.3\n");
//!
//! assert_eq!(from_apkindex, from_local);
//! ```

pub mod apkindex;
pub mod local;
pub mod types;

// Re-export commonly used items for convenience
pub use local::{ParseError, ParseResult};
pub use types::PackageIndex;
