//! Windows registry MIME associations.

use crate::error::Result;
use crate::extension::set_extension_type_skip_existing;
use winreg::enums::*;
use winreg::RegKey;

/// Reads `Content Type` values from the extension keys under HKEY_CLASSES_ROOT.
pub(super) fn init_mime_windows() -> Result<()> {
    let hkcr = RegKey::predef(HKEY_CLASSES_ROOT);
    let mut count = 0usize;

    for name in hkcr.enum_keys().filter_map(|name| name.ok()) {
        if name.len() < 2 || !name.starts_with('.') {
            continue;
        }

        let key = match hkcr.open_subkey_with_flags(&name, KEY_READ) {
            Ok(k) => k,
            Err(_) => continue,
        };

        let content_type: String = match key.get_value("Content Type") {
            Ok(v) => v,
            Err(_) => continue,
        };

        // Some installers register .js as text/plain.
        if name == ".js" && is_plain_text(&content_type) {
            continue;
        }

        if set_extension_type_skip_existing(&name, &content_type).is_ok() {
            count += 1;
        }
    }

    tracing::debug!(entries = count, "loaded MIME types from the registry");
    Ok(())
}

fn is_plain_text(raw: &str) -> bool {
    crate::MediaType::parse(raw).map_or(false, |media_type| {
        media_type.is_text() && media_type.subtype().eq_ignore_ascii_case("plain")
    })
}
