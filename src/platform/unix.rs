//! Unix MIME databases.
//!
//! Implements loading from:
//! - FreeDesktop Shared MIME-info Database (globs2 format)
//! - Traditional mime.types files

use crate::error::Result;
use crate::extension::set_extension_type_skip_existing;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Paths to FreeDesktop Shared MIME-info Database globs2 files.
const MIME_GLOBS: &[&str] = &["/usr/local/share/mime/globs2", "/usr/share/mime/globs2"];

/// Common locations for mime.types files on Unix.
const TYPE_FILES: &[&str] = &[
    "/etc/mime.types",
    "/etc/apache2/mime.types",
    "/etc/apache/mime.types",
    "/etc/httpd/conf/mime.types",
];

pub(super) fn init_mime_unix() -> Result<()> {
    for filename in MIME_GLOBS {
        match load_mime_globs_file(filename) {
            Ok(count) => {
                tracing::debug!(path = *filename, entries = count, "loaded MIME globs database");
                return Ok(());
            }
            Err(err) => tracing::trace!(path = *filename, error = %err, "skipping MIME globs database"),
        }
    }

    for filename in TYPE_FILES {
        match load_mime_file(filename) {
            Ok(count) => tracing::debug!(path = *filename, entries = count, "loaded mime.types"),
            Err(err) => tracing::trace!(path = *filename, error = %err, "skipping mime.types"),
        }
    }

    Ok(())
}

/// Parses one globs2 line, `weight:mimetype:glob[:morefields...]`, into
/// `(extension, media type)` when the glob is a plain `*.ext` pattern.
///
/// See https://specifications.freedesktop.org/shared-mime-info-spec/shared-mime-info-spec-0.21.html
fn parse_globs_line(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split(':');
    let weight = fields.next()?;
    let media_type = fields.next()?;
    let glob = fields.next()?;

    if weight.is_empty() || weight.starts_with('#') || glob.len() < 3 {
        return None;
    }
    let extension = glob.strip_prefix('*')?;
    if !extension.starts_with('.') || extension.contains(&['?', '*', '['][..]) {
        return None;
    }
    Some((extension, media_type))
}

/// Returns the number of lines that named a usable extension.
fn load_mime_globs_file(filename: &str) -> Result<usize> {
    let reader = BufReader::new(File::open(filename)?);
    let mut count = 0;

    for line in reader.lines() {
        let line = line?;
        if let Some((extension, media_type)) = parse_globs_line(&line) {
            if set_extension_type_skip_existing(extension, media_type).is_ok() {
                count += 1;
            }
        }
    }

    Ok(count)
}

/// Parses one mime.types line, `mimetype ext1 ext2 ...`, into the media type
/// and its dotted extensions.
fn parse_types_line(line: &str) -> Option<(&str, Vec<String>)> {
    let mut fields = line.split_whitespace();
    let media_type = fields.next()?;
    if media_type.starts_with('#') {
        return None;
    }
    let extensions: Vec<String> = fields
        .take_while(|ext| !ext.starts_with('#'))
        .map(|ext| {
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            }
        })
        .collect();
    if extensions.is_empty() {
        return None;
    }
    Some((media_type, extensions))
}

fn load_mime_file(filename: &str) -> Result<usize> {
    let reader = BufReader::new(File::open(filename)?);
    let mut count = 0;

    for line in reader.lines() {
        let line = line?;
        if let Some((media_type, extensions)) = parse_types_line(&line) {
            for extension in extensions {
                if set_extension_type_skip_existing(&extension, media_type).is_ok() {
                    count += 1;
                }
            }
        }
    }

    Ok(count)
}
