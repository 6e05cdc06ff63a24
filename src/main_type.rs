//! Top-level media type tokens.

use crate::grammar::{cmp_ignore_case, eq_ignore_case};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The part of a media type before the `/`.
///
/// Standard registrations are unit variants; anything else is kept verbatim
/// in [`MainType::Ietf`] or, when prefixed with `x-`, [`MainType::Extension`].
/// Equality and hashing ignore ASCII case.
///
/// Build values from text with [`classify`](Self::classify) or `From<&str>`.
/// A hand-built payload variant such as `Ietf("text")` is not what parsing
/// would produce; [`MediaType`](crate::MediaType) reclassifies it on the way in.
#[derive(Debug, Clone)]
pub enum MainType {
    /// `application`
    Application,
    /// `audio`
    Audio,
    /// `example`
    Example,
    /// `font`
    Font,
    /// `haptics`
    Haptics,
    /// `image`
    Image,
    /// `message`
    Message,
    /// `model`
    Model,
    /// `multipart`
    Multipart,
    /// `text`
    Text,
    /// `video`
    Video,
    /// An unregistered token without the `x-` prefix.
    Ietf(String),
    /// An `x-` prefixed private token.
    Extension(String),
}

static STANDARD: [(MainType, &str); 11] = [
    (MainType::Application, "application"),
    (MainType::Audio, "audio"),
    (MainType::Example, "example"),
    (MainType::Font, "font"),
    (MainType::Haptics, "haptics"),
    (MainType::Image, "image"),
    (MainType::Message, "message"),
    (MainType::Model, "model"),
    (MainType::Multipart, "multipart"),
    (MainType::Text, "text"),
    (MainType::Video, "video"),
];

impl MainType {
    /// Maps any token to a main type. Never fails.
    ///
    /// ```
    /// use tokio_mediatype::MainType;
    ///
    /// assert_eq!(MainType::classify("TEXT"), MainType::Text);
    /// assert_eq!(MainType::classify("x-app"), MainType::Extension("x-app".into()));
    /// assert_eq!(MainType::classify("app"), MainType::Ietf("app".into()));
    /// ```
    pub fn classify(raw: &str) -> Self {
        if let Some((standard, _)) = STANDARD
            .iter()
            .find(|(_, name)| eq_ignore_case(name, raw))
        {
            return standard.clone();
        }
        let is_extension = raw
            .get(..2)
            .map_or(false, |prefix| eq_ignore_case(prefix, "x-"));
        if is_extension {
            MainType::Extension(raw.to_string())
        } else {
            MainType::Ietf(raw.to_string())
        }
    }

    /// Returns the token: the canonical lowercase name for standard types,
    /// the original spelling otherwise.
    pub fn as_str(&self) -> &str {
        match self {
            MainType::Ietf(token) | MainType::Extension(token) => token,
            standard => STANDARD[standard.rank()].1,
        }
    }

    /// Reports whether this is one of the registered top-level types.
    pub fn is_standard(&self) -> bool {
        !matches!(self, MainType::Ietf(_) | MainType::Extension(_))
    }

    /// Re-runs [`classify`](Self::classify) on a payload variant, so that
    /// `Ietf("TEXT")` becomes [`MainType::Text`] and `Ietf("x-foo")` becomes
    /// an [`MainType::Extension`].
    pub fn reclassified(self) -> Self {
        match self {
            MainType::Ietf(token) | MainType::Extension(token) => Self::classify(&token),
            standard => standard,
        }
    }

    // Standard types in declaration order, then ietf, then extension.
    fn rank(&self) -> usize {
        match self {
            MainType::Application => 0,
            MainType::Audio => 1,
            MainType::Example => 2,
            MainType::Font => 3,
            MainType::Haptics => 4,
            MainType::Image => 5,
            MainType::Message => 6,
            MainType::Model => 7,
            MainType::Multipart => 8,
            MainType::Text => 9,
            MainType::Video => 10,
            MainType::Ietf(_) => 11,
            MainType::Extension(_) => 12,
        }
    }
}

impl fmt::Display for MainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MainType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MainType::classify(s))
    }
}

impl From<&str> for MainType {
    fn from(s: &str) -> Self {
        MainType::classify(s)
    }
}

impl PartialEq for MainType {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank() && eq_ignore_case(self.as_str(), other.as_str())
    }
}

impl Eq for MainType {}

impl Hash for MainType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        for b in self.as_str().bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for MainType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MainType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| cmp_ignore_case(self.as_str(), other.as_str()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MainType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MainType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(MainType::classify(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reclassified() {
        assert_eq!(MainType::Ietf("TEXT".to_string()).reclassified(), MainType::Text);
        assert!(matches!(
            MainType::Ietf("x-foo".to_string()).reclassified(),
            MainType::Extension(_)
        ));
        assert!(matches!(
            MainType::Extension("chemical".to_string()).reclassified(),
            MainType::Ietf(_)
        ));
        assert_eq!(MainType::Font.reclassified(), MainType::Font);
    }

    #[test]
    fn test_classify_standard() {
        for (standard, name) in STANDARD.iter() {
            assert_eq!(&MainType::classify(name), standard);
            assert_eq!(&MainType::classify(&name.to_uppercase()), standard);
        }
        assert!(MainType::classify("Image").is_standard());
    }

    #[test]
    fn test_classify_open_variants() {
        assert_eq!(
            MainType::classify("x-app"),
            MainType::Extension("x-app".to_string())
        );
        assert_eq!(
            MainType::classify("X-App"),
            MainType::Extension("X-App".to_string())
        );
        assert_eq!(MainType::classify("app"), MainType::Ietf("app".to_string()));
        assert_eq!(MainType::classify("x"), MainType::Ietf("x".to_string()));
        assert_eq!(MainType::classify(""), MainType::Ietf(String::new()));
        assert_eq!(MainType::classify("é"), MainType::Ietf("é".to_string()));
    }

    #[test]
    fn test_payload_keeps_casing() {
        assert_eq!(MainType::classify("X-Custom").as_str(), "X-Custom");
        assert_eq!(MainType::classify("TEXT").as_str(), "text");
    }

    #[test]
    fn test_equality_is_case_insensitive() {
        assert_eq!(
            MainType::Ietf("App".to_string()),
            MainType::Ietf("app".to_string())
        );
        assert_ne!(
            MainType::Extension("x-app".to_string()),
            MainType::Ietf("x-app".to_string())
        );

        let set: HashSet<MainType> = ["x-App", "X-APP", "x-app"]
            .iter()
            .map(|s| MainType::classify(s))
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering() {
        let app = MainType::Ietf("app".to_string());
        let nil = MainType::Ietf("nil".to_string());
        let ext = MainType::Extension("x-app".to_string());

        assert!(app < nil);
        assert!(nil < ext);
        assert!(MainType::Video < app);
        assert!(MainType::Application < MainType::Audio);
        assert!(MainType::Text < MainType::Video);
        assert!(MainType::Ietf("B".to_string()) > MainType::Ietf("a".to_string()));
    }

    #[test]
    fn test_classify_round_trip() {
        for raw in ["text", "x-foo", "bar", "VIDEO", "X-"] {
            let classified = MainType::classify(raw);
            assert_eq!(MainType::classify(&classified.to_string()), classified);
        }
    }
}
