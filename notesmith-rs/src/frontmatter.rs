//! Frontmatter codec.
//!
//! The block is modelled as an ordered list of fields, each remembering the
//! exact byte span it occupies. Edits splice a single field's span and leave
//! every other byte of the document alone, so field order, comments and
//! formatting survive a parse → patch → serialize cycle.

use crate::error::{NoteError, Result};
use crate::parser::FrontmatterSpan;
use crate::types::source_lines;
use regex::Regex;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_yaml::Value as YamlValue;
use std::ops::Range;
use std::sync::LazyLock;

// `key: value` at column 0. The key may be quoted; the colon must be
// followed by whitespace or end of line.
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<key>"(?:[^"\\]|\\.)*"|'[^']*'|[^\s#'"\-\[\]{},&*!|>%@`?][^:]*?)[ \t]*(?P<colon>:)(?:[ \t]+(?P<value>.*?))?[ \t]*$"#,
    )
    .unwrap()
});

/// The value of a frontmatter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// No value after the colon and no continuation lines.
    Empty,
    /// A single scalar (raw text as written, quotes included).
    Scalar(String),
    /// A flow list (`[a, b]`) or block list (`- a` lines).
    List(Vec<String>),
    /// Indented continuation text that is neither a list nor a scalar block.
    Nested(String),
}

impl FieldValue {
    /// The scalar text with surrounding quotes removed.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(raw) => Some(unquote(raw)),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Empty => serializer.serialize_unit(),
            FieldValue::Scalar(raw) => match serde_yaml::from_str::<YamlValue>(raw) {
                Ok(value @ (YamlValue::Bool(_) | YamlValue::Number(_) | YamlValue::String(_))) => {
                    value.serialize(serializer)
                }
                Ok(YamlValue::Null) => serializer.serialize_unit(),
                _ => serializer.serialize_str(unquote(raw)),
            },
            FieldValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(unquote(item))?;
                }
                seq.end()
            }
            FieldValue::Nested(text) => serializer.serialize_str(text),
        }
    }
}

/// A single field of the frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterField {
    /// Field key (unquoted).
    pub key: String,
    /// Parsed value.
    pub value: FieldValue,
    /// First and one-past-last line numbers of the field (1-indexed).
    pub lines: Range<usize>,
    /// Byte range of the field's lines, terminators included.
    pub range: Range<usize>,
    /// Byte offset just past the key's colon.
    pub colon_end: usize,
}

/// An ordered view over a document's frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    span: FrontmatterSpan,
    fields: Vec<FrontmatterField>,
}

impl Frontmatter {
    /// Parse the fields inside `span` of `content`.
    pub fn parse(content: &str, span: FrontmatterSpan) -> Self {
        let mut fields: Vec<FrontmatterField> = Vec::new();
        let mut current: Option<(FrontmatterField, Vec<String>, String)> = None;
        let mut pending_blank_end: Option<(usize, usize)> = None;

        let inner_lines = source_lines(content)
            .filter(|l| l.start >= span.inner.start && l.end <= span.inner.end);

        for line in inner_lines {
            let is_continuation = line.text.starts_with([' ', '\t'])
                || line.text == "-"
                || line.text.starts_with("- ");

            if line.text.trim().is_empty() {
                if current.is_some() {
                    pending_blank_end = Some((line.number, line.end));
                }
                continue;
            }

            if is_continuation {
                if let Some((field, cont, _)) = current.as_mut() {
                    if let Some((number, end)) = pending_blank_end.take() {
                        field.lines.end = number + 1;
                        field.range.end = end;
                        cont.push(String::new());
                    }
                    field.lines.end = line.number + 1;
                    field.range.end = line.end;
                    cont.push(line.text.to_string());
                }
                continue;
            }

            pending_blank_end = None;
            if let Some(done) = current.take() {
                fields.push(finish_field(done));
            }

            if let Some(cap) = FIELD_LINE.captures(line.text) {
                let key = unquote(&cap["key"]).to_string();
                let inline = cap.name("value").map(|m| m.as_str()).unwrap_or("").to_string();
                let colon_end = line.start + cap.name("colon").map(|m| m.end()).unwrap_or(0);
                current = Some((
                    FrontmatterField {
                        key,
                        value: FieldValue::Empty,
                        lines: line.number..line.number + 1,
                        range: line.start..line.end,
                        colon_end,
                    },
                    Vec::new(),
                    inline,
                ));
            }
        }

        if let Some(done) = current.take() {
            fields.push(finish_field(done));
        }

        Self { span, fields }
    }

    /// The byte layout of the block.
    pub fn span(&self) -> &FrontmatterSpan {
        &self.span
    }

    /// Fields in document order.
    pub fn fields(&self) -> &[FrontmatterField] {
        &self.fields
    }

    /// The first field with the given key.
    pub fn get(&self, key: &str) -> Option<&FrontmatterField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    /// Rewrite the value of an existing field.
    ///
    /// Only the field's own lines change; the key text up to and including
    /// the colon is kept byte-for-byte.
    pub fn replace_value(&self, content: &str, key: &str, payload: &str) -> Result<String> {
        let field = self
            .get(key)
            .ok_or_else(|| NoteError::FrontmatterFieldNotFound(key.to_string()))?;

        let eol = line_ending(&content[field.range.clone()]);
        let mut replacement = String::with_capacity(field.range.len() + payload.len());
        replacement.push_str(&content[field.range.start..field.colon_end]);
        let value = render_value(payload, eol);
        if !value.is_empty() {
            replacement.push(' ');
            replacement.push_str(&value);
        }
        replacement.push_str(eol);

        Ok(splice(content, field.range.clone(), &replacement))
    }

    /// Add a new field as the last line of the block.
    pub fn append_field(&self, content: &str, key: &str, payload: &str) -> Result<String> {
        if self.contains_key(key) {
            return Err(NoteError::invalid_operation(
                "append",
                format!("frontmatter field '{}'", key),
                "field already exists, use replace",
            ));
        }

        let eol = line_ending(&content[..self.span.inner.start]);
        let value = render_value(payload, eol);
        let line = if value.is_empty() {
            format!("{}:{}", render_key(key), eol)
        } else {
            format!("{}: {}{}", render_key(key), value, eol)
        };
        let at = self.span.inner.end;
        Ok(splice(content, at..at, &line))
    }
}

impl Serialize for Frontmatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            if seen.insert(field.key.as_str()) {
                map.serialize_entry(&field.key, &field.value)?;
            }
        }
        map.end()
    }
}

fn finish_field((mut field, continuation, inline): (FrontmatterField, Vec<String>, String)) -> FrontmatterField {
    field.value = parse_value(&inline, &continuation);
    field
}

fn parse_value(inline: &str, continuation: &[String]) -> FieldValue {
    let inline = inline.trim();

    if !inline.is_empty() {
        if inline == "|" || inline == ">" || inline.starts_with("|-") || inline.starts_with(">-") {
            return FieldValue::Scalar(dedent(continuation));
        }
        if inline.starts_with('[') && inline.ends_with(']') {
            let inner = &inline[1..inline.len() - 1];
            let items = inner
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            return FieldValue::List(items);
        }
        return FieldValue::Scalar(inline.to_string());
    }

    let items: Vec<&str> = continuation
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    if items.is_empty() {
        FieldValue::Empty
    } else if items.iter().all(|l| *l == "-" || l.starts_with("- ")) {
        FieldValue::List(
            items
                .iter()
                .map(|l| l.trim_start_matches('-').trim().to_string())
                .collect(),
        )
    } else {
        FieldValue::Nested(dedent(continuation))
    }
}

fn dedent(lines: &[String]) -> String {
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| l.get(indent..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unquote(raw: &str) -> &str {
    let raw = raw.trim();
    if raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')))
    {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") { "\r\n" } else { "\n" }
}

fn splice(content: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(content.len() - range.len() + replacement.len());
    out.push_str(&content[..range.start]);
    out.push_str(replacement);
    out.push_str(&content[range.end..]);
    out
}

fn render_key(key: &str) -> String {
    if FIELD_LINE.is_match(&format!("{}: x", key)) && !key.contains(':') {
        key.to_string()
    } else {
        serde_json::to_string(key).unwrap_or_else(|_| key.to_string())
    }
}

/// Render a patch payload as the YAML text that follows `key: `.
///
/// JSON payloads are converted to YAML flow style; other single-line payloads
/// are used verbatim; multi-line payloads become a literal block.
pub fn render_value(payload: &str, eol: &str) -> String {
    let payload = payload.trim_end_matches(['\n', '\r']);

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(payload) {
        return render_json(&json);
    }

    if payload.contains('\n') {
        let mut block = String::from("|");
        for line in payload.lines() {
            block.push_str(eol);
            if !line.is_empty() {
                block.push_str("  ");
                block.push_str(line);
            }
        }
        return block;
    }

    payload.to_string()
}

fn render_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => render_scalar(s),
        serde_json::Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_json).collect();
            format!("[{}]", rendered.join(", "))
        }
        other => other.to_string(),
    }
}

/// Plain YAML scalar when it reads back as the same string, JSON-quoted otherwise.
fn render_scalar(s: &str) -> String {
    let plain_ok = !s.is_empty()
        && s.trim() == s
        && !s.contains(['\n', ',', '[', ']', '{', '}'])
        && matches!(serde_yaml::from_str::<YamlValue>(s), Ok(YamlValue::String(ref p)) if p == s);
    if plain_ok {
        s.to_string()
    } else {
        serde_json::to_string(s).unwrap_or_else(|_| s.to_string())
    }
}
