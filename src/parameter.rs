//! Media type parameters: `name=value` and `name="quoted value"`.

use crate::error::{Error, ParseErrorKind, Result};
use crate::grammar::{eq_ignore_case, is_printable_ascii, is_string_special, is_token_char};
use crate::tokenizer::Tokenizer;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A single `name=value` pair.
///
/// The rendered form is cached and rebuilt by every setter, so
/// [`Parameter::description`] is never stale. Equality and hashing ignore
/// ASCII case in both name and value.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    value: String,
    description: String,
}

impl Parameter {
    /// Creates a parameter.
    ///
    /// ```
    /// use tokio_mediatype::Parameter;
    ///
    /// assert_eq!(Parameter::new("charset", "utf-8").description(), "charset=utf-8");
    /// assert_eq!(Parameter::new("title", "a \"b\"").description(), r#"title="a \"b\"""#);
    /// ```
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        let description = render(&name, &value);
        Self {
            name,
            value,
            description,
        }
    }

    /// Parses a standalone parameter such as `charset="utf-8"`.
    ///
    /// Returns `None` on any grammar violation, including trailing input.
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Scans one parameter at the tokenizer's cursor.
    ///
    /// On failure the cursor is left where it was.
    pub fn parse_from(tokenizer: &mut Tokenizer<'_>) -> Result<Self> {
        let start = tokenizer.position();
        let result = tokenizer.without_whitespace_skipping(scan_parameter);
        if result.is_err() {
            tokenizer.reset(start);
        }
        result
    }

    /// Returns the parameter name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unescaped value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the rendered `name=value` form.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.description = render(&self.name, &self.value);
    }

    /// Replaces the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.description = render(&self.name, &self.value);
    }

    /// Reports whether this parameter's name matches `name`, ignoring ASCII case.
    pub fn has_name(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }

    /// Splits the parameter into `(name, value)`.
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.value)
    }
}

fn scan_parameter(t: &mut Tokenizer<'_>) -> Result<Parameter> {
    t.skip_whitespace();
    let name = t.scan_while(is_token_char);
    if name.is_empty() {
        return Err(Error::parse(t.position(), ParseErrorKind::MissingParameterName));
    }
    t.skip_whitespace();
    if !t.scan_char('=') {
        return Err(Error::parse(t.position(), ParseErrorKind::MissingEquals));
    }
    let value = if t.scan_char('"') {
        scan_quoted(t)?
    } else {
        t.scan_while(is_token_char).to_string()
    };
    Ok(Parameter::new(name, value))
}

// Cursor sits just past the opening quote.
fn scan_quoted(t: &mut Tokenizer<'_>) -> Result<String> {
    let mut value = String::new();
    loop {
        value.push_str(t.scan_up_to(is_string_special));
        match t.next_char() {
            Some('"') => return Ok(value),
            Some('\\') => value.push(scan_escape(t)?),
            _ => {
                return Err(Error::parse(
                    t.position(),
                    ParseErrorKind::UnterminatedQuotedString,
                ))
            }
        }
    }
}

// Cursor sits just past the backslash.
fn scan_escape(t: &mut Tokenizer<'_>) -> Result<char> {
    let offset = t.position() - 1;
    let invalid = || Error::parse(offset, ParseErrorKind::InvalidEscape);
    match t.next_char().ok_or_else(invalid)? {
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        't' => Ok('\t'),
        'u' => t
            .scan_unsigned_integer(4, 16)
            .and_then(char::from_u32)
            .ok_or_else(invalid),
        'x' => t
            .scan_unsigned_integer(2, 16)
            .and_then(char::from_u32)
            .ok_or_else(invalid),
        literal => Ok(literal),
    }
}

/// Renders a parameter, quoting and escaping the value when it is not a token.
pub(crate) fn render(name: &str, value: &str) -> String {
    let mut out = String::with_capacity(name.len() + value.len() + 3);
    out.push_str(name);
    out.push('=');
    if value.chars().all(is_token_char) {
        out.push_str(value);
        return out;
    }

    out.push('"');
    for c in value.chars() {
        if is_string_special(c) {
            out.push('\\');
            out.push(c);
        } else if is_printable_ascii(c) || !c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("\\x{:02x}", c as u32));
        }
    }
    out.push('"');
    out
}

impl FromStr for Parameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokenizer = Tokenizer::new(s);
        let parameter = Parameter::parse_from(&mut tokenizer)?;
        if !tokenizer.is_at_end() {
            return Err(Error::parse(
                tokenizer.position(),
                ParseErrorKind::TrailingInput,
            ));
        }
        Ok(parameter)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case(&self.name, &other.name) && eq_ignore_case(&self.value, &other.value)
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.name.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        // 0xff never occurs in UTF-8
        state.write_u8(0xff);
        for b in self.value.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}
