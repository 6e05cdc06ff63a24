//! Media type lookup by file extension.
//!
//! Provides functions to map file extensions to media types and vice versa.
//!
//! The built-in table is small but it is augmented, once, by the local
//! system's MIME database if one is available:
//! - /usr/local/share/mime/globs2
//! - /usr/share/mime/globs2
//! - /etc/mime.types
//! - /etc/apache2/mime.types
//! - /etc/apache/mime.types
//!
//! On Windows, media types are read from the registry.
//!
//! Text types get a `charset=utf-8` parameter when none is given.

use crate::error::{Error, Result};
use crate::main_type::MainType;
use crate::media_type::MediaType;
use once_cell::sync::{Lazy, OnceCell};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Built-in media type mappings (all lowercase extensions).
static BUILTIN_TYPES_LOWER: &[(&str, &str)] = &[
    (".avif", "image/avif"),
    (".css", "text/css; charset=utf-8"),
    (".gif", "image/gif"),
    (".htm", "text/html; charset=utf-8"),
    (".html", "text/html; charset=utf-8"),
    (".jpeg", "image/jpeg"),
    (".jpg", "image/jpeg"),
    (".js", "text/javascript; charset=utf-8"),
    (".json", "application/json"),
    (".md", "text/markdown; charset=utf-8"),
    (".mjs", "text/javascript; charset=utf-8"),
    (".mp3", "audio/mpeg"),
    (".mp4", "video/mp4"),
    (".pdf", "application/pdf"),
    (".png", "image/png"),
    (".svg", "image/svg+xml"),
    (".txt", "text/plain; charset=utf-8"),
    (".wasm", "application/wasm"),
    (".webp", "image/webp"),
    (".woff2", "font/woff2"),
    (".xml", "text/xml; charset=utf-8"),
    (".zip", "application/zip"),
];

#[derive(Default)]
struct Registry {
    /// Extension exactly as registered, e.g. ".Z".
    by_extension: HashMap<String, MediaType>,
    /// Lowercased extension, e.g. ".z".
    by_extension_lower: HashMap<String, MediaType>,
    /// Lowercased basic type to lowercased extensions.
    extensions: HashMap<String, Vec<String>>,
}

static REGISTRY: Lazy<RwLock<Registry>> = Lazy::new(|| {
    let mut registry = Registry::default();
    for (ext, raw) in BUILTIN_TYPES_LOWER {
        if let Some(media_type) = MediaType::parse(raw) {
            registry.insert(ext, media_type);
        }
    }
    RwLock::new(registry)
});

static PLATFORM_LOADED: OnceCell<()> = OnceCell::new();

impl Registry {
    fn insert(&mut self, extension: &str, media_type: MediaType) {
        let ext_lower = extension.to_lowercase();
        let key = media_type.basic_type().to_ascii_lowercase();

        self.by_extension
            .insert(extension.to_string(), media_type.clone());
        self.by_extension_lower.insert(ext_lower.clone(), media_type);

        let exts = self.extensions.entry(key).or_default();
        if !exts.contains(&ext_lower) {
            exts.push(ext_lower);
        }
    }
}

/// Makes sure the built-in table exists and, when `load_platform` is set,
/// that the OS database has been merged into it. The OS database is read at
/// most once per process.
pub(crate) fn ensure_initialized(load_platform: bool) {
    Lazy::force(&REGISTRY);
    if load_platform {
        PLATFORM_LOADED.get_or_init(|| {
            #[cfg(any(unix, windows))]
            let result = crate::platform::init_mime();
            #[cfg(not(any(unix, windows)))]
            let result: Result<()> = Ok(());

            if let Err(err) = result {
                tracing::debug!(error = %err, "platform MIME database unavailable");
            }
        });
    }
}

/// Returns the media type associated with the file extension `ext`.
///
/// The extension should begin with a leading dot, as in ".html".
/// Extensions are looked up first case-sensitively, then case-insensitively.
///
/// # Examples
///
/// ```
/// use tokio_mediatype::type_by_extension;
///
/// let html = type_by_extension(".HTML").unwrap();
/// assert_eq!(html.description(), "text/html; charset=utf-8");
/// assert!(type_by_extension(".unknown-ext").is_none());
/// ```
pub fn type_by_extension(ext: &str) -> Option<MediaType> {
    lookup(ext, true)
}

pub(crate) fn lookup(ext: &str, load_platform: bool) -> Option<MediaType> {
    ensure_initialized(load_platform);
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);

    if let Some(media_type) = registry.by_extension.get(ext) {
        return Some(media_type.clone());
    }
    let lower = if ext.is_ascii() {
        ext.to_ascii_lowercase()
    } else {
        ext.to_lowercase()
    };
    registry.by_extension_lower.get(&lower).cloned()
}

/// Returns the extensions known to be associated with `media_type`.
///
/// Parameters are ignored. The extensions are sorted and each begins with a
/// leading dot.
///
/// ```
/// use tokio_mediatype::{extensions_by_type, MediaType};
///
/// let jpeg = MediaType::parse("image/jpeg").unwrap();
/// let exts = extensions_by_type(&jpeg);
/// assert!(exts.contains(&".jpg".to_string()));
/// ```
pub fn extensions_by_type(media_type: &MediaType) -> Vec<String> {
    ensure_initialized(true);
    let registry = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let key = media_type.basic_type().to_ascii_lowercase();
    let mut exts = registry.extensions.get(&key).cloned().unwrap_or_default();
    exts.sort();
    exts
}

/// Associates the extension `ext` with the media type `media_type`.
///
/// # Errors
///
/// Fails if `ext` has no leading dot or `media_type` does not parse.
///
/// ```
/// use tokio_mediatype::{add_extension_type, type_by_extension};
///
/// add_extension_type(".foo", "application/foo").unwrap();
/// assert_eq!(type_by_extension(".foo").unwrap().basic_type(), "application/foo");
/// ```
pub fn add_extension_type(ext: &str, media_type: &str) -> Result<()> {
    if !ext.starts_with('.') {
        return Err(Error::MimeType(format!(
            "extension {:?} missing leading dot",
            ext
        )));
    }
    ensure_initialized(true);
    set_extension_type(ext, media_type, false)
}

/// Registers `extension` unless it is already known. Used while merging the
/// platform database so built-in entries win.
pub(crate) fn set_extension_type_skip_existing(extension: &str, media_type: &str) -> Result<()> {
    set_extension_type(extension, media_type, true)
}

fn set_extension_type(extension: &str, raw: &str, skip_if_exists: bool) -> Result<()> {
    let mut media_type = MediaType::try_parse(raw)?;
    if media_type.main_type() == &MainType::Text && media_type.parameter_value("charset").is_none() {
        media_type.set_parameter("charset", "utf-8");
    }

    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if skip_if_exists
        && registry
            .by_extension_lower
            .contains_key(&extension.to_lowercase())
    {
        return Ok(());
    }
    registry.insert(extension, media_type);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_by_extension() {
        let html = type_by_extension(".html").unwrap();
        assert_eq!(html.description(), "text/html; charset=utf-8");
        assert_eq!(type_by_extension(".HTML"), Some(html));
        assert_eq!(
            type_by_extension(".jpg").map(|m| m.basic_type()),
            Some("image/jpeg".to_string())
        );
        assert!(type_by_extension(".definitely-not-registered").is_none());
    }

    #[test]
    fn test_lookup_without_platform_database() {
        let png = lookup(".png", false).unwrap();
        assert_eq!(png.main_type(), &MainType::Image);
        assert_eq!(png.subtype(), "png");
    }

    #[test]
    fn test_extensions_by_type() {
        let jpeg = MediaType::parse("IMAGE/JPEG; q=1").unwrap();
        let exts = extensions_by_type(&jpeg);
        assert!(exts.contains(&".jpg".to_string()));
        assert!(exts.contains(&".jpeg".to_string()));
        let mut sorted = exts.clone();
        sorted.sort();
        assert_eq!(exts, sorted);
    }

    #[test]
    fn test_add_extension_type() {
        let err = add_extension_type("foo", "application/foo").unwrap_err();
        assert!(matches!(err, Error::MimeType(_)));

        let err = add_extension_type(".bad", "no-slash").unwrap_err();
        assert!(err.parse_kind().is_some());

        add_extension_type(".Test-Ext", "application/test").unwrap();
        assert_eq!(
            type_by_extension(".test-ext").map(|m| m.basic_type()),
            Some("application/test".to_string())
        );
    }

    #[test]
    fn test_text_types_gain_charset() {
        add_extension_type(".notes-text", "text/x-notes").unwrap();
        let notes = type_by_extension(".notes-text").unwrap();
        assert_eq!(notes.description(), "text/x-notes; charset=utf-8");

        add_extension_type(".latin-text", "text/x-latin; charset=iso-8859-1").unwrap();
        let latin = type_by_extension(".latin-text").unwrap();
        assert_eq!(latin.parameter_value("charset"), Some("iso-8859-1"));
    }
}
