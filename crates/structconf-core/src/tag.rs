//! Field annotations.
//!
//! A field's annotation is a struct-tag string of space separated
//! `key:"value"` pairs, for example `name:"port" default:"8080"`. [`Tag`]
//! reads the four structconf facets out of it under an optional key prefix,
//! so several tag families can live on one field.

use std::borrow::Cow;
use std::fmt;

pub const TAG_NAME: &str = "name";
pub const TAG_USAGE: &str = "usage";
pub const TAG_DEFAULT: &str = "default";
pub const TAG_SHORT: &str = "short";

/// Name value that excludes a field from name-based sources.
pub const TAG_NAME_IGNORED: &str = "-";

/// The raw annotation string of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawTag(Cow<'static, str>);

impl RawTag {
    pub const fn new(raw: &'static str) -> Self {
        Self(Cow::Borrowed(raw))
    }

    pub fn owned(raw: String) -> Self {
        Self(Cow::Owned(raw))
    }

    /// Start an explicit tag without writing the string by hand.
    pub fn builder() -> TagBuilder {
        TagBuilder::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for `key`, or the empty string.
    pub fn get(&self, key: &str) -> String {
        self.lookup(key).unwrap_or_default()
    }

    /// Value for `key`; `Some("")` when the key is present with an empty value.
    ///
    /// Scanning stops at the first malformed pair.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut tag = self.as_str().as_bytes();
        while !tag.is_empty() {
            let mut i = 0;
            while i < tag.len() && tag[i] == b' ' {
                i += 1;
            }
            tag = &tag[i..];
            if tag.is_empty() {
                break;
            }

            i = 0;
            while i < tag.len()
                && tag[i] > b' '
                && tag[i] != b':'
                && tag[i] != b'"'
                && tag[i] != 0x7f
            {
                i += 1;
            }
            if i == 0 || i + 1 >= tag.len() || tag[i] != b':' || tag[i + 1] != b'"' {
                break;
            }
            let name = &tag[..i];
            tag = &tag[i + 1..];

            i = 1;
            while i < tag.len() && tag[i] != b'"' {
                if tag[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
            if i >= tag.len() {
                break;
            }
            let quoted = &tag[..=i];
            tag = &tag[i + 1..];

            if name == key.as_bytes() {
                return std::str::from_utf8(quoted).ok().and_then(unquote);
            }
        }
        None
    }
}

impl From<&'static str> for RawTag {
    fn from(raw: &'static str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for RawTag {
    fn from(raw: String) -> Self {
        Self::owned(raw)
    }
}

fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            _ => return None,
        }
    }
    Some(out)
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Builds a [`RawTag`] pair by pair.
#[derive(Debug, Clone, Default)]
pub struct TagBuilder {
    entries: Vec<(String, String)>,
}

impl TagBuilder {
    /// Add an arbitrary (possibly prefixed) key.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    pub fn name(self, value: impl Into<String>) -> Self {
        self.entry(TAG_NAME, value)
    }

    pub fn usage(self, value: impl Into<String>) -> Self {
        self.entry(TAG_USAGE, value)
    }

    pub fn default_value(self, value: impl Into<String>) -> Self {
        self.entry(TAG_DEFAULT, value)
    }

    pub fn short(self, value: impl Into<String>) -> Self {
        self.entry(TAG_SHORT, value)
    }

    pub fn build(self) -> RawTag {
        let raw = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}:{}", k, quote(v)))
            .collect::<Vec<_>>()
            .join(" ");
        RawTag::owned(raw)
    }
}

/// The structconf facets of one field's annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    raw: RawTag,
    prefix: String,
}

impl Tag {
    pub fn new(raw: RawTag, prefix: impl Into<String>) -> Self {
        Self {
            raw,
            prefix: prefix.into(),
        }
    }

    fn key(&self, facet: &str) -> String {
        format!("{}{}", self.prefix, facet)
    }

    /// Binding name; absent when missing, empty or `-`.
    pub fn name(&self) -> Option<String> {
        let v = self.raw.get(&self.key(TAG_NAME));
        if v.is_empty() || v == TAG_NAME_IGNORED {
            return None;
        }
        Some(v)
    }

    pub fn usage(&self) -> String {
        self.raw.get(&self.key(TAG_USAGE))
    }

    /// Default literal; `Some("")` for an explicitly empty default.
    pub fn default_value(&self) -> Option<String> {
        self.raw.lookup(&self.key(TAG_DEFAULT))
    }

    pub fn short(&self) -> Option<String> {
        self.raw.lookup(&self.key(TAG_SHORT))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn raw(&self) -> &RawTag {
        &self.raw
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag={} prefix={}", self.raw.as_str(), self.prefix)
    }
}
