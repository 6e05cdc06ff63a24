//! Strict RFC 2045 media type handling with async-first content sniffing.
//!
//! This crate provides:
//! - Media type parsing and formatting (`type/subtype; name="value"`) with
//!   quoted-string escapes, ordered parameters and case-insensitive comparison
//! - Main type classification into registered, IETF and `x-` extension types
//! - `charset` parameter resolution against IANA charset names
//! - Media type detection by file extension, augmented by the OS database
//! - Magic-number content sniffing of byte slices, readers and files
//!
//! File and reader sniffing is async-first using tokio.

pub mod charset;
pub mod error;
pub mod extension;
pub mod grammar;
pub mod main_type;
pub mod media_type;
pub mod parameter;
pub mod sniff;
pub mod tokenizer;

#[cfg(any(unix, windows))]
mod platform;

// Re-export commonly used types
pub use charset::{Charset, CharsetResolver, IanaCharsets};
pub use error::{Error, ParseErrorKind, Result};
pub use extension::{add_extension_type, extensions_by_type, type_by_extension};
pub use main_type::MainType;
pub use media_type::MediaType;
pub use parameter::Parameter;
pub use sniff::{ContentSniffer, SignatureSniffer, SniffConfig, Sniffer};
pub use tokenizer::Tokenizer;
