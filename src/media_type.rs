//! Media type parsing and formatting.
//!
//! Implements the RFC 2045 §5.1 `type/subtype; name=value` grammar with a
//! strict tokenizer, order-preserving parameters and a description string
//! that is kept in sync with every mutation.

use crate::charset::{Charset, CharsetResolver, IanaCharsets};
use crate::error::{Error, ParseErrorKind, Result};
use crate::grammar::{cmp_ignore_case, eq_ignore_case, is_token_char};
use crate::main_type::MainType;
use crate::parameter::Parameter;
use crate::tokenizer::Tokenizer;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Number of random bytes in a generated multipart boundary.
const BOUNDARY_BYTES: usize = 30;

/// A parsed or constructed media type.
///
/// Parameters keep their insertion order. Lookups treat the list as a map
/// keyed by ASCII case-insensitive name: the first match wins, and setting
/// an existing name replaces its value in place.
///
/// # Examples
///
/// ```
/// use tokio_mediatype::{MainType, MediaType};
///
/// let media_type = MediaType::parse("application/json; charset=utf-8").unwrap();
/// assert_eq!(media_type.main_type(), &MainType::Application);
/// assert_eq!(media_type.subtype(), "json");
/// assert_eq!(media_type.parameter_value("CHARSET"), Some("utf-8"));
/// assert_eq!(media_type.description(), "application/json; charset=utf-8");
/// ```
#[derive(Debug, Clone)]
pub struct MediaType {
    main_type: MainType,
    subtype: String,
    parameters: Vec<Parameter>,
    description: String,
}

impl MediaType {
    /// Creates a media type without parameters.
    pub fn new(main_type: impl Into<MainType>, subtype: impl Into<String>) -> Self {
        Self::with_parameters(main_type, subtype, Vec::new())
    }

    /// Creates a media type from its parts.
    ///
    /// ```
    /// use tokio_mediatype::{MainType, MediaType, Parameter};
    ///
    /// let media_type = MediaType::with_parameters(
    ///     MainType::Application,
    ///     "json",
    ///     vec![Parameter::new("charset", "utf-8")],
    /// );
    /// assert_eq!(media_type.to_string(), "application/json; charset=utf-8");
    /// ```
    pub fn with_parameters(
        main_type: impl Into<MainType>,
        subtype: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        let mut media_type = Self {
            main_type: main_type.into().reclassified(),
            subtype: subtype.into(),
            parameters,
            description: String::new(),
        };
        media_type.refresh_description();
        media_type
    }

    /// Adds or replaces a parameter, builder style.
    #[must_use]
    pub fn with_parameter(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// Creates a `multipart/<subtype>` media type with a random `boundary`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Random`] if the operating system's random source fails.
    pub fn multipart(subtype: impl Into<String>) -> Result<Self> {
        let boundary = random_boundary()?;
        Ok(Self::new(MainType::Multipart, subtype).with_parameter("boundary", boundary))
    }

    /// Parses a media type, returning `None` on any grammar violation.
    ///
    /// The description of the result is exactly `raw` until the first mutation.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::try_parse(raw).ok()
    }

    /// Parses a media type, reporting where and why parsing failed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on any grammar violation. No partial result is
    /// produced.
    pub fn try_parse(raw: &str) -> Result<Self> {
        parse_media_type(raw).map_err(|err| {
            tracing::trace!(input = raw, error = %err, "media type rejected");
            err
        })
    }

    /// Returns the main type.
    pub fn main_type(&self) -> &MainType {
        &self.main_type
    }

    /// Replaces the main type.
    pub fn set_main_type(&mut self, main_type: impl Into<MainType>) {
        self.main_type = main_type.into().reclassified();
        self.refresh_description();
    }

    /// Returns the subtype as given.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Replaces the subtype.
    pub fn set_subtype(&mut self, subtype: impl Into<String>) {
        self.subtype = subtype.into();
        self.refresh_description();
    }

    /// Returns the parameters in order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Replaces the whole parameter list.
    pub fn set_parameters(&mut self, parameters: Vec<Parameter>) {
        self.parameters = parameters;
        self.refresh_description();
    }

    /// Returns the serialized form.
    ///
    /// For a freshly parsed value this is the original input.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `type/subtype` without parameters.
    pub fn basic_type(&self) -> String {
        format!("{}/{}", self.main_type, self.subtype)
    }

    /// Returns the value of the first parameter named `name`, ignoring ASCII case.
    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.has_name(name))
            .map(Parameter::value)
    }

    /// Sets `name` to `value`, replacing the first existing entry in place or
    /// appending a new one.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<String>) {
        self.install_parameter(Parameter::new(name, value));
        self.refresh_description();
    }

    /// Removes every parameter named `name`, ignoring ASCII case.
    pub fn remove_parameter(&mut self, name: &str) {
        self.parameters.retain(|p| !p.has_name(name));
        self.refresh_description();
    }

    /// Reports whether the main type and subtype match, ignoring parameters.
    pub fn essence_eq(&self, other: &MediaType) -> bool {
        self.main_type == other.main_type && eq_ignore_case(&self.subtype, &other.subtype)
    }

    /// Reports whether this is a `text/*` type.
    pub fn is_text(&self) -> bool {
        self.main_type == MainType::Text
    }

    /// Reports whether this is a `multipart/*` type.
    pub fn is_multipart(&self) -> bool {
        self.main_type == MainType::Multipart
    }

    /// Returns the `boundary` parameter.
    pub fn boundary(&self) -> Option<&str> {
        self.parameter_value("boundary")
    }

    /// Returns the charset named by the `charset` parameter, if it is known.
    pub fn charset(&self) -> Option<Charset> {
        self.charset_with(&IanaCharsets)
    }

    /// Sets the `charset` parameter to the charset's preferred MIME name.
    pub fn set_charset(&mut self, charset: Charset) {
        self.set_parameter("charset", charset.name());
    }

    /// Resolves the `charset` parameter through `resolver`.
    pub fn charset_with<R: CharsetResolver>(&self, resolver: &R) -> Option<R::Encoding> {
        self.parameter_value("charset")
            .and_then(|name| resolver.encoding(name))
    }

    /// Sets the `charset` parameter to the name `resolver` gives `encoding`.
    ///
    /// Leaves the media type untouched and returns `false` if the resolver has
    /// no name for it.
    pub fn set_charset_with<R: CharsetResolver>(
        &mut self,
        resolver: &R,
        encoding: &R::Encoding,
    ) -> bool {
        match resolver.canonical_name(encoding) {
            Some(name) => {
                self.set_parameter("charset", name);
                true
            }
            None => false,
        }
    }

    fn install_parameter(&mut self, parameter: Parameter) {
        match self
            .parameters
            .iter_mut()
            .find(|p| p.has_name(parameter.name()))
        {
            Some(existing) => existing.set_value(parameter.into_parts().1),
            None => self.parameters.push(parameter),
        }
    }

    fn canonical_description(&self) -> String {
        let mut out = self.basic_type();
        for parameter in &self.parameters {
            out.push_str("; ");
            out.push_str(parameter.description());
        }
        out
    }

    fn refresh_description(&mut self) {
        self.description = self.canonical_description();
    }
}

fn parse_media_type(raw: &str) -> Result<MediaType> {
    let mut t = Tokenizer::new(raw);

    let main_type = t.scan_while(is_token_char);
    if main_type.is_empty() {
        return Err(Error::parse(t.position(), ParseErrorKind::MissingType));
    }
    if !t.scan_char('/') {
        return Err(Error::parse(t.position(), ParseErrorKind::MissingSlash));
    }
    let subtype = t
        .scan_up_to(|c| c == ';')
        .trim_end_matches(|c: char| c.is_ascii_whitespace());
    if subtype.is_empty() {
        return Err(Error::parse(t.position(), ParseErrorKind::MissingSubtype));
    }

    let mut media_type = MediaType {
        main_type: MainType::classify(main_type),
        subtype: subtype.to_string(),
        parameters: Vec::new(),
        description: raw.to_string(),
    };
    while !t.is_at_end() {
        if !t.scan_char(';') {
            return Err(Error::parse(t.position(), ParseErrorKind::MissingSemicolon));
        }
        let parameter = Parameter::parse_from(&mut t)?;
        media_type.install_parameter(parameter);
    }
    Ok(media_type)
}

/// Generates a random multipart boundary of 60 lowercase hex digits.
fn random_boundary() -> Result<String> {
    let mut buf = [0u8; BOUNDARY_BYTES];
    getrandom::getrandom(&mut buf).map_err(|err| Error::Random(err.to_string()))?;
    let boundary: String = buf.iter().map(|b| format!("{:02x}", b)).collect();
    tracing::debug!(boundary = %boundary, "generated multipart boundary");
    Ok(boundary)
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl PartialEq for MediaType {
    fn eq(&self, other: &Self) -> bool {
        self.essence_eq(other) && self.parameters == other.parameters
    }
}

impl Eq for MediaType {}

impl Hash for MediaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.main_type.hash(state);
        for b in self.subtype.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        self.parameters.hash(state);
    }
}

impl PartialOrd for MediaType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MediaType {
    // Main type first, then the case-folded canonical rendering. A parsed
    // description may differ from it in spacing only. Distinct fields can
    // render alike (`plain; a=b` as a subtype), so the fields break ties.
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        self.main_type
            .cmp(&other.main_type)
            .then_with(|| {
                cmp_ignore_case(&self.canonical_description(), &other.canonical_description())
            })
            .then_with(|| cmp_ignore_case(&self.subtype, &other.subtype))
            .then_with(|| self.parameters.len().cmp(&other.parameters.len()))
            .then_with(|| {
                self.parameters
                    .iter()
                    .zip(&other.parameters)
                    .map(|(a, b)| {
                        cmp_ignore_case(a.name(), b.name())
                            .then_with(|| cmp_ignore_case(a.value(), b.value()))
                    })
                    .find(|ordering| ordering.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MediaType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.description)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MediaType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = <std::borrow::Cow<'de, str> as serde::Deserialize>::deserialize(deserializer)?;
        MediaType::try_parse(&raw).map_err(serde::de::Error::custom)
    }
}
