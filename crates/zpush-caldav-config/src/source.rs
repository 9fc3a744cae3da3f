//! Parsers for the supported configuration source formats.
//!
//! Two formats are understood:
//! - TOML: a flat table of `CALDAV_*` keys.
//! - Legacy PHP: the `define('CALDAV_*', value);` file the backend has
//!   always shipped with. Only `define()` lines are read; everything else
//!   (the `<?php` tag, comment banners, blank lines) is skipped.
//!
//! Both produce [`RawEntries`]; typing happens later in
//! [`CalDavBackendConfig::from_entries`](crate::CalDavBackendConfig::from_entries).

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::error::{ConfigError, ConfigResult};
use crate::value::{RawEntries, RawValue};

/// Any `define(` call, wherever it sits on the line. `defined(` does not match.
static DEFINE_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdefine\s*\(").expect("Invalid define call regex"));

/// `define('NAME', value);` with an optional trailing line comment.
static DEFINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bdefine\s*\(\s*(?:'([^']*)'|"([^"]*)")\s*,\s*(.*?)\s*\)\s*;\s*(?:(?://|#).*)?$"#,
    )
    .expect("Invalid define regex")
});

static SINGLE_QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^'((?:[^'\\]|\\.)*)'$").expect("Invalid single quote regex"));

static DOUBLE_QUOTED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"((?:[^"\\]|\\.)*)"$"#).expect("Invalid double quote regex"));

static INTEGER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("Invalid integer regex"));

/// Format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    LegacyPhp,
}

impl SourceFormat {
    /// Picks the format from the file extension, falling back to sniffing
    /// the content for `define(` calls.
    pub fn detect(path: &Path, content: &str) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            Some(ext) if ext.eq_ignore_ascii_case("php") => Self::LegacyPhp,
            _ if content.lines().any(is_define_line) => Self::LegacyPhp,
            _ => Self::Toml,
        }
    }

    /// Parses `source` in this format.
    pub fn parse(self, source: &str) -> ConfigResult<RawEntries> {
        match self {
            Self::Toml => parse_toml(source),
            Self::LegacyPhp => parse_php(source),
        }
    }
}

/// Parses a flat TOML table.
pub fn parse_toml(source: &str) -> ConfigResult<RawEntries> {
    let table: toml::Table = toml::from_str(source)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, RawValue::from(value)))
        .collect())
}

/// Parses a legacy `define()` file.
pub fn parse_php(source: &str) -> ConfigResult<RawEntries> {
    let mut entries = RawEntries::new();

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        if !is_define_line(line) {
            continue;
        }

        let caps = DEFINE_REGEX
            .captures(line)
            .ok_or_else(|| ConfigError::syntax(line_no, "expected define('NAME', value);"))?;

        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return Err(ConfigError::syntax(line_no, "constant name is empty"));
        }

        let literal = caps.get(3).map(|m| m.as_str()).unwrap_or_default();
        let value = parse_php_literal(literal)
            .ok_or_else(|| ConfigError::syntax(line_no, format!("unsupported value {}", literal)))?;

        trace!(line = line_no, key = %name, value = %value, "parsed define");

        if entries.contains_key(&name) {
            return Err(ConfigError::DuplicateField {
                key: name,
                line: line_no,
            });
        }
        entries.insert(name, value);
    }

    Ok(entries)
}

fn is_define_line(line: &str) -> bool {
    DEFINE_CALL_REGEX.is_match(line)
}

fn parse_php_literal(literal: &str) -> Option<RawValue> {
    if let Some(caps) = SINGLE_QUOTED_REGEX.captures(literal) {
        return Some(RawValue::Str(unescape_single(&caps[1])));
    }
    if let Some(caps) = DOUBLE_QUOTED_REGEX.captures(literal) {
        return Some(RawValue::Str(unescape_double(&caps[1])));
    }
    if literal.eq_ignore_ascii_case("true") {
        return Some(RawValue::Bool(true));
    }
    if literal.eq_ignore_ascii_case("false") {
        return Some(RawValue::Bool(false));
    }
    if INTEGER_REGEX.is_match(literal) {
        return literal.parse::<i64>().ok().map(RawValue::Int);
    }
    None
}

/// Single-quoted strings only escape `\'` and `\\`.
fn unescape_single(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next @ ('\'' | '\\')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn unescape_double(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(next @ ('"' | '\\' | '$')) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}
