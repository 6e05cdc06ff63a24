//! Character set names for the `charset` parameter.
//!
//! The media type core only ever stores a charset name token. Mapping that
//! token to something a caller can decode with is delegated to a
//! [`CharsetResolver`]; [`IanaCharsets`] is the built-in resolver over the
//! [`Charset`] enum.

use crate::grammar::eq_ignore_case;
use std::fmt;

/// Resolves between charset names and an encoding representation.
pub trait CharsetResolver {
    /// The encoding type produced and accepted by this resolver.
    type Encoding;

    /// Returns the preferred MIME name for `encoding`, if it has one.
    fn canonical_name(&self, encoding: &Self::Encoding) -> Option<String>;

    /// Looks up the encoding registered under `name` or one of its aliases.
    fn encoding(&self, name: &str) -> Option<Self::Encoding>;
}

/// Common IANA-registered character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Charset {
    Utf8,
    Utf16,
    Utf16Be,
    Utf16Le,
    Utf32,
    UsAscii,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    Iso8859_10,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1255,
    Windows1256,
    Windows1257,
    Windows1258,
    Koi8R,
    Koi8U,
    ShiftJis,
    EucJp,
    Iso2022Jp,
    EucKr,
    Gb2312,
    Gbk,
    Gb18030,
    Big5,
    Macintosh,
}

/// Preferred MIME name first, then aliases. All lowercase.
static NAMES: &[(Charset, &[&str])] = &[
    (Charset::Utf8, &["utf-8", "utf8", "unicode-1-1-utf-8"]),
    (Charset::Utf16, &["utf-16", "utf16"]),
    (Charset::Utf16Be, &["utf-16be"]),
    (Charset::Utf16Le, &["utf-16le"]),
    (Charset::Utf32, &["utf-32", "utf32"]),
    (
        Charset::UsAscii,
        &["us-ascii", "ascii", "iso-ir-6", "ansi_x3.4-1968", "ansi_x3.4-1986", "iso646-us", "us", "cp367", "ibm367", "csascii"],
    ),
    (
        Charset::Iso8859_1,
        &["iso-8859-1", "iso_8859-1", "iso8859-1", "latin1", "l1", "iso-ir-100", "ibm819", "cp819", "csisolatin1"],
    ),
    (Charset::Iso8859_2, &["iso-8859-2", "iso_8859-2", "latin2", "l2", "csisolatin2"]),
    (Charset::Iso8859_3, &["iso-8859-3", "iso_8859-3", "latin3", "l3", "csisolatin3"]),
    (Charset::Iso8859_4, &["iso-8859-4", "iso_8859-4", "latin4", "l4", "csisolatin4"]),
    (Charset::Iso8859_5, &["iso-8859-5", "iso_8859-5", "cyrillic", "csisolatincyrillic"]),
    (Charset::Iso8859_6, &["iso-8859-6", "iso_8859-6", "arabic", "csisolatinarabic"]),
    (Charset::Iso8859_7, &["iso-8859-7", "iso_8859-7", "greek", "greek8", "csisolatingreek"]),
    (Charset::Iso8859_8, &["iso-8859-8", "iso_8859-8", "hebrew", "csisolatinhebrew"]),
    (Charset::Iso8859_9, &["iso-8859-9", "iso_8859-9", "latin5", "l5", "csisolatin5"]),
    (Charset::Iso8859_10, &["iso-8859-10", "latin6", "l6", "csisolatin6"]),
    (Charset::Iso8859_13, &["iso-8859-13"]),
    (Charset::Iso8859_14, &["iso-8859-14", "latin8", "l8"]),
    (Charset::Iso8859_15, &["iso-8859-15", "latin-9"]),
    (Charset::Windows1250, &["windows-1250", "cp1250"]),
    (Charset::Windows1251, &["windows-1251", "cp1251"]),
    (Charset::Windows1252, &["windows-1252", "cp1252"]),
    (Charset::Windows1253, &["windows-1253", "cp1253"]),
    (Charset::Windows1254, &["windows-1254", "cp1254"]),
    (Charset::Windows1255, &["windows-1255", "cp1255"]),
    (Charset::Windows1256, &["windows-1256", "cp1256"]),
    (Charset::Windows1257, &["windows-1257", "cp1257"]),
    (Charset::Windows1258, &["windows-1258", "cp1258"]),
    (Charset::Koi8R, &["koi8-r", "cskoi8r"]),
    (Charset::Koi8U, &["koi8-u"]),
    (Charset::ShiftJis, &["shift_jis", "ms_kanji", "csshiftjis", "sjis"]),
    (Charset::EucJp, &["euc-jp", "cseucpkdfmtjapanese"]),
    (Charset::Iso2022Jp, &["iso-2022-jp", "csiso2022jp"]),
    (Charset::EucKr, &["euc-kr", "cseuckr"]),
    (Charset::Gb2312, &["gb2312", "csgb2312"]),
    (Charset::Gbk, &["gbk", "cp936", "ms936", "windows-936"]),
    (Charset::Gb18030, &["gb18030"]),
    (Charset::Big5, &["big5", "csbig5"]),
    (Charset::Macintosh, &["macintosh", "mac", "csmacintosh"]),
];

impl Charset {
    /// Looks up a charset by name or alias, ignoring ASCII case.
    ///
    /// ```
    /// use tokio_mediatype::Charset;
    ///
    /// assert_eq!(Charset::from_name("UTF-8"), Some(Charset::Utf8));
    /// assert_eq!(Charset::from_name("latin1"), Some(Charset::Iso8859_1));
    /// assert_eq!(Charset::from_name("klingon"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        NAMES
            .iter()
            .find(|(_, names)| names.iter().any(|n| eq_ignore_case(n, name)))
            .map(|(charset, _)| *charset)
    }

    /// Returns the preferred MIME name, lowercased.
    pub fn name(&self) -> &'static str {
        NAMES
            .iter()
            .find(|(charset, _)| charset == self)
            .map_or("", |(_, names)| names[0])
    }

    /// Returns the registered aliases, excluding the preferred name.
    pub fn aliases(&self) -> &'static [&'static str] {
        NAMES
            .iter()
            .find(|(charset, _)| charset == self)
            .map(|(_, names)| &names[1..])
            .unwrap_or(&[])
    }

    /// Reports whether the charset is a Unicode transformation format.
    pub fn is_unicode(&self) -> bool {
        matches!(
            self,
            Charset::Utf8 | Charset::Utf16 | Charset::Utf16Be | Charset::Utf16Le | Charset::Utf32
        )
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Built-in resolver over the IANA names in [`Charset`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaCharsets;

impl CharsetResolver for IanaCharsets {
    type Encoding = Charset;

    fn canonical_name(&self, encoding: &Charset) -> Option<String> {
        Some(encoding.name().to_string())
    }

    fn encoding(&self, name: &str) -> Option<Charset> {
        Charset::from_name(name)
    }
}
