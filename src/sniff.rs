//! Content sniffing.
//!
//! A [`ContentSniffer`] looks at the first bytes of some content and names
//! a media type for it as a raw string. [`Sniffer`] feeds that string through
//! [`MediaType::parse`] and, for files, falls back to the extension table.

use crate::error::Result;
use crate::extension;
use crate::media_type::MediaType;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Default number of leading bytes inspected.
pub const DEFAULT_READ_LIMIT: usize = 512;

/// Names the media type of a byte prefix.
pub trait ContentSniffer {
    /// Returns a raw media type string, or `None` if the content is not
    /// recognised.
    fn sniff(&self, bytes: &[u8]) -> Option<String>;
}

impl<F> ContentSniffer for F
where
    F: Fn(&[u8]) -> Option<String>,
{
    fn sniff(&self, bytes: &[u8]) -> Option<String> {
        self(bytes)
    }
}

/// Tunables for [`Sniffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniffConfig {
    /// How many leading bytes are read and inspected.
    pub read_limit: usize,
    /// Whether [`Sniffer::sniff_path`] consults the extension table when the
    /// content gives nothing more specific than plain text.
    pub extension_fallback: bool,
    /// Whether the extension table is augmented from the OS MIME database.
    pub load_platform_database: bool,
}

impl Default for SniffConfig {
    fn default() -> Self {
        Self {
            read_limit: DEFAULT_READ_LIMIT,
            extension_fallback: true,
            load_platform_database: true,
        }
    }
}

impl SniffConfig {
    /// Sets the number of bytes inspected.
    #[must_use]
    pub fn with_read_limit(mut self, read_limit: usize) -> Self {
        self.read_limit = read_limit;
        self
    }

    /// Enables or disables the extension fallback.
    #[must_use]
    pub fn with_extension_fallback(mut self, enabled: bool) -> Self {
        self.extension_fallback = enabled;
        self
    }

    /// Enables or disables loading the OS MIME database.
    #[must_use]
    pub fn with_platform_database(mut self, enabled: bool) -> Self {
        self.load_platform_database = enabled;
        self
    }
}

/// Magic-number sniffer for common binary formats, with a few text
/// heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureSniffer;

/// `(offset, signature, media type)`, checked in order.
static SIGNATURES: &[(usize, &[u8], &str)] = &[
    (0, b"\x89PNG\r\n\x1a\n", "image/png"),
    (0, b"\xff\xd8\xff", "image/jpeg"),
    (0, b"GIF87a", "image/gif"),
    (0, b"GIF89a", "image/gif"),
    (0, b"II*\x00", "image/tiff"),
    (0, b"MM\x00*", "image/tiff"),
    (0, b"\x00\x00\x01\x00", "image/vnd.microsoft.icon"),
    (0, b"BM", "image/bmp"),
    (0, b"%PDF-", "application/pdf"),
    (0, b"%!PS", "application/postscript"),
    (0, b"PK\x03\x04", "application/zip"),
    (0, b"PK\x05\x06", "application/zip"),
    (0, b"\x1f\x8b", "application/gzip"),
    (0, b"BZh", "application/x-bzip2"),
    (0, b"7z\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
    (0, b"\xfd7zXZ\x00", "application/x-xz"),
    (0, b"Rar!\x1a\x07", "application/vnd.rar"),
    (0, b"\x00asm", "application/wasm"),
    (0, b"\x7fELF", "application/x-executable"),
    (0, b"SQLite format 3\x00", "application/vnd.sqlite3"),
    (0, b"OggS", "audio/ogg"),
    (0, b"fLaC", "audio/flac"),
    (0, b"ID3", "audio/mpeg"),
    (0, b"\xff\xfb", "audio/mpeg"),
    (0, b"\xff\xf3", "audio/mpeg"),
    (0, b"\xff\xf2", "audio/mpeg"),
    (0, b"MThd", "audio/midi"),
    (0, b"wOFF", "font/woff"),
    (0, b"wOF2", "font/woff2"),
    (0, b"OTTO", "font/otf"),
    (0, b"\x00\x01\x00\x00\x00", "font/ttf"),
];

impl ContentSniffer for SignatureSniffer {
    fn sniff(&self, bytes: &[u8]) -> Option<String> {
        if bytes.is_empty() {
            return None;
        }
        sniff_container(bytes)
            .or_else(|| {
                SIGNATURES
                    .iter()
                    .find(|(offset, signature, _)| {
                        bytes.get(*offset..).map_or(false, |b| b.starts_with(signature))
                    })
                    .map(|(_, _, media_type)| *media_type)
            })
            .map(str::to_string)
            .or_else(|| sniff_text(bytes))
    }
}

// Formats whose signature needs more than a prefix check.
fn sniff_container(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"RIFF") {
        return match bytes.get(8..12)? {
            b"WEBP" => Some("image/webp"),
            b"WAVE" => Some("audio/wav"),
            b"AVI " => Some("video/x-msvideo"),
            _ => None,
        };
    }
    if bytes.get(4..8) == Some(&b"ftyp"[..]) {
        return Some(match bytes.get(8..12)? {
            b"avif" | b"avis" => "image/avif",
            b"heic" | b"heix" | b"mif1" => "image/heic",
            b"qt  " => "video/quicktime",
            b"M4A " => "audio/mp4",
            _ => "video/mp4",
        });
    }
    if bytes.starts_with(b"\x1a\x45\xdf\xa3") {
        let is_webm = bytes.windows(4).any(|w| w == b"webm");
        return Some(if is_webm { "video/webm" } else { "video/x-matroska" });
    }
    None
}

fn sniff_text(bytes: &[u8]) -> Option<String> {
    if bytes.starts_with(b"\xef\xbb\xbf") {
        return Some("text/plain; charset=utf-8".to_string());
    }
    if bytes.starts_with(b"\xfe\xff") {
        return Some("text/plain; charset=utf-16be".to_string());
    }
    if bytes.starts_with(b"\xff\xfe") {
        return Some("text/plain; charset=utf-16le".to_string());
    }

    let text = leading_utf8(bytes)?;
    if text
        .bytes()
        .any(|b| b.is_ascii_control() && !matches!(b, b'\t' | b'\n' | b'\r' | b'\x0c' | b'\x1b'))
    {
        return None;
    }

    let trimmed = text.trim_start();
    let starts_with = |prefix: &str| {
        trimmed
            .get(..prefix.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
    };
    let media_type = if starts_with("<!doctype html") || starts_with("<html") {
        "text/html; charset=utf-8"
    } else if starts_with("<svg") {
        "image/svg+xml"
    } else if starts_with("<?xml") {
        "text/xml; charset=utf-8"
    } else if looks_like_json(trimmed) {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    };
    Some(media_type.to_string())
}

// A prefix may cut a multi-byte character in half; that is still text.
fn leading_utf8(bytes: &[u8]) -> Option<&str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(err) if err.error_len().is_none() => std::str::from_utf8(&bytes[..err.valid_up_to()]).ok(),
        Err(_) => None,
    }
}

fn looks_like_json(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some('{') => matches!(chars.find(|c| !c.is_whitespace()), Some('"') | Some('}') | None),
        Some('[') => matches!(
            chars.find(|c| !c.is_whitespace()),
            Some('{' | '[' | '"' | ']' | '-' | '0'..='9' | 't' | 'f' | 'n') | None
        ),
        _ => false,
    }
}

/// Combines a [`ContentSniffer`] with a [`SniffConfig`].
#[derive(Debug, Clone, Default)]
pub struct Sniffer<S = SignatureSniffer> {
    sniffer: S,
    config: SniffConfig,
}

impl Sniffer {
    /// Creates a sniffer using [`SignatureSniffer`] and the default config.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ContentSniffer> Sniffer<S> {
    /// Creates a sniffer from any [`ContentSniffer`].
    pub fn with_sniffer(sniffer: S, config: SniffConfig) -> Self {
        Self { sniffer, config }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SniffConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SniffConfig {
        &self.config
    }

    /// Sniffs at most `read_limit` leading bytes of `bytes`.
    ///
    /// Returns `None` if the content is not recognised or the sniffer names a
    /// type that does not parse.
    pub fn sniff_bytes(&self, bytes: &[u8]) -> Option<MediaType> {
        let head = &bytes[..bytes.len().min(self.config.read_limit)];
        let raw = self.sniffer.sniff(head)?;
        let media_type = MediaType::parse(&raw);
        if media_type.is_none() {
            tracing::debug!(raw = %raw, "sniffer produced an unparsable media type");
        }
        media_type
    }

    /// Reads at most `read_limit` bytes from `reader` and sniffs them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if reading fails.
    pub async fn sniff_reader<R>(&self, reader: R) -> Result<Option<MediaType>>
    where
        R: AsyncRead + Unpin,
    {
        let mut head = Vec::with_capacity(self.config.read_limit.min(DEFAULT_READ_LIMIT));
        reader
            .take(self.config.read_limit as u64)
            .read_to_end(&mut head)
            .await?;
        Ok(self.sniff_bytes(&head))
    }

    /// Sniffs the file at `path`.
    ///
    /// When content sniffing finds nothing, or only plain text, and the
    /// extension fallback is enabled, the file extension decides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be opened or read.
    pub async fn sniff_path(&self, path: impl AsRef<Path>) -> Result<Option<MediaType>> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await?;
        let sniffed = self.sniff_reader(file).await?;

        let is_generic = sniffed.as_ref().map_or(true, |media_type| {
            media_type.is_text() && media_type.subtype().eq_ignore_ascii_case("plain")
        });
        if !is_generic || !self.config.extension_fallback {
            return Ok(sniffed);
        }

        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| {
                extension::lookup(&format!(".{}", ext), self.config.load_platform_database)
            });
        match by_extension {
            Some(media_type) => {
                tracing::debug!(
                    path = %path.display(),
                    media_type = %media_type,
                    "content sniffing inconclusive, using file extension"
                );
                Ok(Some(media_type))
            }
            None => Ok(sniffed),
        }
    }
}

impl MediaType {
    /// Sniffs the media type of `bytes` with the default [`Sniffer`].
    ///
    /// ```
    /// use tokio_mediatype::MediaType;
    ///
    /// let png = MediaType::sniff(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
    /// assert_eq!(png.description(), "image/png");
    /// ```
    pub fn sniff(bytes: &[u8]) -> Option<MediaType> {
        Sniffer::new().sniff_bytes(bytes)
    }

    /// Sniffs the media type of the file at `path` with the default [`Sniffer`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be opened or read.
    pub async fn sniff_path(path: impl AsRef<Path>) -> Result<Option<MediaType>> {
        Sniffer::new().sniff_path(path).await
    }
}
