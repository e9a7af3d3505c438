//! Parser for the stringified literals stored in nested columns.
//!
//! Columns such as `genres`, `production_companies`, `cast` and `crew` hold
//! the textual representation of a list of dictionaries:
//!
//! ```text
//! [{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': "Children's"}]
//! ```
//!
//! This is Python literal syntax, not JSON: single-quoted strings, `None`,
//! `True`/`False`, tuples and trailing commas all show up in the dataset. The
//! parser below is a small recursive-descent reader for exactly that subset.
//! It produces a [`serde_json::Value`] so the typed records in
//! [`crate::types`] can be pulled out with plain serde.

use crate::error::{DataLoadError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

/// Deepest nesting accepted before giving up
const MAX_DEPTH: usize = 64;

/// Parse one literal value (list, tuple, dict, string, number, keyword).
///
/// The whole input must be consumed; anything but whitespace after the value
/// is an error.
pub fn parse_literal(input: &str) -> Result<Value> {
    let mut parser = LiteralParser::new(input);
    parser.skip_whitespace();
    let value = parser.parse_value(0)?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(value)
}

/// Unnest a list-of-records column.
///
/// A missing or blank cell, a malformed literal, or a literal that is not a
/// list all yield an empty vector. Elements are converted one by one and an
/// element that does not fit `T` is skipped without discarding its siblings.
pub fn parse_nested_list<T: DeserializeOwned>(raw: Option<&str>) -> Vec<T> {
    let Some(text) = non_blank(raw) else {
        return Vec::new();
    };

    match parse_literal(text) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Ok(_) => Vec::new(),
        Err(err) => {
            tracing::trace!(%err, "discarding unparseable nested value");
            Vec::new()
        }
    }
}

/// Unnest a column holding a single record (`belongs_to_collection`).
pub fn parse_nested_record<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    let text = non_blank(raw)?;
    match parse_literal(text) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|text| !text.is_empty())
}

struct LiteralParser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.src[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self, reason: impl Into<String>) -> DataLoadError {
        self.error_at(self.pos, reason)
    }

    fn error_at(&self, position: usize, reason: impl Into<String>) -> DataLoadError {
        DataLoadError::LiteralSyntax {
            position,
            reason: reason.into(),
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }

        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'[') => {
                self.pos += 1;
                Ok(Value::Array(self.parse_sequence(b']', depth)?))
            }
            Some(b'(') => {
                self.pos += 1;
                Ok(Value::Array(self.parse_sequence(b')', depth)?))
            }
            Some(b'{') => {
                self.pos += 1;
                self.parse_dict(depth)
            }
            Some(b'\'' | b'"') => Ok(Value::String(self.parse_string()?)),
            Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.parse_number(),
            Some(b) if b.is_ascii_alphabetic() => self.parse_keyword(),
            Some(_) => Err(self.error(format!(
                "unexpected character {:?}",
                self.src[self.pos..].chars().next().unwrap_or_default()
            ))),
        }
    }

    /// Items of a list or tuple, after the opening bracket
    fn parse_sequence(&mut self, close: u8, depth: usize) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat(close) {
                return Ok(items);
            }

            items.push(self.parse_value(depth + 1)?);

            self.skip_whitespace();
            if self.eat(b',') {
                continue;
            }
            if self.eat(close) {
                return Ok(items);
            }
            return Err(self.error(format!("expected ',' or '{}'", close as char)));
        }
    }

    /// Entries of a dict, after the opening brace
    fn parse_dict(&mut self, depth: usize) -> Result<Value> {
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            if self.eat(b'}') {
                return Ok(Value::Object(map));
            }

            let key_pos = self.pos;
            let key = match self.parse_value(depth + 1)? {
                Value::String(key) => key,
                Value::Number(n) => n.to_string(),
                _ => return Err(self.error_at(key_pos, "unsupported dict key")),
            };

            self.skip_whitespace();
            if !self.eat(b':') {
                return Err(self.error("expected ':'"));
            }
            self.skip_whitespace();
            let value = self.parse_value(depth + 1)?;
            map.insert(key, value);

            self.skip_whitespace();
            if self.eat(b',') {
                continue;
            }
            if self.eat(b'}') {
                return Ok(Value::Object(map));
            }
            return Err(self.error("expected ',' or '}'"));
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let start = self.pos;
        let quote = char::from(self.bytes[self.pos]);
        self.pos += 1;

        let mut out = String::new();
        loop {
            let c = self
                .next_char()
                .ok_or_else(|| self.error_at(start, "unterminated string"))?;
            match c {
                '\\' => self.parse_escape(&mut out)?,
                c if c == quote => return Ok(out),
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        let escape_pos = self.pos - 1;
        let c = self
            .next_char()
            .ok_or_else(|| self.error_at(escape_pos, "unterminated escape"))?;

        match c {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0'..='7' => out.push(self.parse_octal(c)),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            // line continuation
            '\n' => {}
            'x' => out.push(self.parse_code_point(2, escape_pos)?),
            'u' => out.push(self.parse_code_point(4, escape_pos)?),
            'U' => out.push(self.parse_code_point(8, escape_pos)?),
            // Unknown escapes are kept verbatim
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    // Up to three octal digits, the first one already consumed
    fn parse_octal(&mut self, first: char) -> char {
        let mut code = first as u32 - '0' as u32;
        for _ in 0..2 {
            match self.peek() {
                Some(b @ b'0'..=b'7') => {
                    code = code * 8 + u32::from(b - b'0');
                    self.pos += 1;
                }
                _ => break,
            }
        }
        // at most 0o777, always a valid scalar value
        char::from_u32(code).unwrap_or('\0')
    }

    fn parse_code_point(&mut self, digits: usize, escape_pos: usize) -> Result<char> {
        let end = self.pos + digits;
        let hex = self
            .src
            .get(self.pos..end)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| self.error_at(escape_pos, "truncated or invalid hex escape"))?;

        let code = u32::from_str_radix(hex, 16)
            .map_err(|e| self.error_at(escape_pos, format!("invalid hex escape: {}", e)))?;
        let c = char::from_u32(code)
            .ok_or_else(|| self.error_at(escape_pos, format!("invalid code point {:#x}", code)))?;

        self.pos = end;
        Ok(c)
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        while let Some(b) = self.peek() {
            let exponent_sign =
                matches!(b, b'+' | b'-') && matches!(self.bytes[self.pos - 1], b'e' | b'E');
            if b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'_') || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }

        let text: String = self.src[start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        let is_integer = !text.contains(['.', 'e', 'E']);

        if is_integer {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::from(n));
            }
        }

        let n: f64 = text
            .parse()
            .map_err(|_| self.error_at(start, format!("invalid number {:?}", text)))?;
        Number::from_f64(n)
            .map(Value::Number)
            .ok_or_else(|| self.error_at(start, "non-finite number"))
    }

    fn parse_keyword(&mut self) -> Result<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }

        match &self.src[start..self.pos] {
            "None" => Ok(Value::Null),
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            word => Err(self.error_at(start, format!("unknown identifier {:?}", word))),
        }
    }
}
