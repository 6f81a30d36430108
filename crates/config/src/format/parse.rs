//! Tolerant reader for PHP configuration files.
//!
//! Accepts the subset of PHP that configuration files are written in: an
//! optional open tag, comments, and `$NAME = <expr>;` statements whose
//! expressions are array literals, scalars, and string concatenations.
//! Anything else is reported as a `ParseError`.

use indexmap::IndexMap;
use thiserror::Error;

use crate::value::{ConfigMap, ConfigValue};

use super::CONFIG_VARIABLE;

/// Errors produced while reading a configuration file.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid number {text:?} at byte {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unsupported construct {name:?} at byte {offset}")]
    Unsupported { name: String, offset: usize },

    #[error("nesting deeper than {} levels at byte {offset}", MAX_DEPTH)]
    TooDeep { offset: usize },

    #[error("$CONFIG is not assigned an array")]
    NotAnArray,
}

/// Maximum nesting of arrays and unary signs in one expression.
pub const MAX_DEPTH: usize = 128;

/// Parses a configuration file and returns the array assigned to `$CONFIG`.
///
/// A file without any `$CONFIG` assignment yields an empty map. When the
/// variable is assigned several times the last assignment wins.
pub fn parse_config(src: &str) -> Result<ConfigMap, ParseError> {
    let mut parser = Parser::new(src);
    parser.skip_open_tag();

    let mut config = None;
    loop {
        parser.skip_trivia();
        if parser.at_end() || parser.eat_str("?>") {
            break;
        }
        let (name, value) = parser.assignment()?;
        if name == CONFIG_VARIABLE {
            config = Some(value);
        }
    }

    match config {
        None => Ok(ConfigMap::new()),
        Some(Expr::Array(entries)) => Ok(entries
            .into_iter()
            .map(|(key, value)| (key.into_string(), value))
            .collect()),
        Some(Expr::Value(_)) => Err(ParseError::NotAnArray),
    }
}

/// PHP normalizes array keys to either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ArrayKey {
    Int(i64),
    Str(String),
}

impl ArrayKey {
    fn from_value(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Int(i) => ArrayKey::Int(i),
            ConfigValue::String(s) => match s.parse::<i64>() {
                Ok(i) if super::render::is_integer_key(&s) => ArrayKey::Int(i),
                _ => ArrayKey::Str(s),
            },
            ConfigValue::Bool(b) => ArrayKey::Int(i64::from(b)),
            ConfigValue::Float(f) => ArrayKey::Int(f as i64),
            ConfigValue::Null => ArrayKey::Str(String::new()),
            // Rejected before reaching here; arrays are not valid keys.
            ConfigValue::List(_) | ConfigValue::Map(_) => ArrayKey::Str(String::new()),
        }
    }

    fn into_string(self) -> String {
        match self {
            ArrayKey::Int(i) => i.to_string(),
            ArrayKey::Str(s) => s,
        }
    }
}

type Entries = IndexMap<ArrayKey, ConfigValue>;

enum Expr {
    Value(ConfigValue),
    Array(Entries),
}

impl Expr {
    fn into_value(self) -> ConfigValue {
        match self {
            Expr::Value(v) => v,
            Expr::Array(entries) => entries_to_value(entries),
        }
    }
}

/// Arrays keyed exactly `0..n` in order are lists; everything else is a map.
fn entries_to_value(entries: Entries) -> ConfigValue {
    let is_list = entries
        .keys()
        .enumerate()
        .all(|(index, key)| *key == ArrayKey::Int(index as i64));
    if is_list {
        ConfigValue::List(entries.into_values().collect())
    } else {
        ConfigValue::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into_string(), value))
                .collect(),
        )
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        let src = src.strip_prefix('\u{feff}').unwrap_or(src);
        Self { src, pos: 0, depth: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_trivia();
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => ParseError::UnexpectedEof,
        }
    }

    fn skip_open_tag(&mut self) {
        self.skip_whitespace();
        if self
            .rest()
            .get(..5)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("<?php"))
        {
            self.pos += 5;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Skips whitespace and `//`, `#` and `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("//") || (rest.starts_with('#') && !rest.starts_with("#[")) {
                // A line comment also ends at a closing tag.
                let end = rest
                    .find(['\n', '\r'])
                    .into_iter()
                    .chain(rest.find("?>"))
                    .min()
                    .unwrap_or(rest.len());
                self.pos += end;
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => self.pos = self.src.len(),
                }
            } else {
                return;
            }
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c == '_' || c.is_alphanumeric())
        {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    /// `$NAME = expr ;`
    fn assignment(&mut self) -> Result<(String, Expr), ParseError> {
        let offset = self.pos;
        if !self.eat('$') {
            let word = self.identifier();
            if word.is_empty() {
                return Err(self.unexpected());
            }
            return Err(ParseError::Unsupported {
                name: word.to_string(),
                offset,
            });
        }
        let name = self.identifier().to_string();
        if name.is_empty() {
            return Err(self.unexpected());
        }
        self.expect_char('=')?;
        let value = self.expression()?;
        self.skip_trivia();
        // The closing tag implies a statement terminator.
        if !self.eat(';') && !self.rest().starts_with("?>") && !self.at_end() {
            return Err(self.unexpected());
        }
        Ok((name, value))
    }

    /// A term optionally followed by `.` string concatenations.
    fn expression(&mut self) -> Result<Expr, ParseError> {
        let first = self.term()?;
        self.skip_trivia();
        if self.peek() != Some('.') {
            return Ok(first);
        }

        let mut joined = self.concat_operand(first)?;
        loop {
            self.skip_trivia();
            if !self.eat('.') {
                return Ok(Expr::Value(ConfigValue::String(joined)));
            }
            let next = self.term()?;
            joined.push_str(&self.concat_operand(next)?);
        }
    }

    fn concat_operand(&self, expr: Expr) -> Result<String, ParseError> {
        match expr {
            Expr::Value(ConfigValue::String(s)) => Ok(s),
            Expr::Value(ConfigValue::Int(i)) => Ok(i.to_string()),
            _ => Err(ParseError::Unsupported {
                name: "concatenation of non-string".to_string(),
                offset: self.pos,
            }),
        }
    }

    /// Every nested array and unary sign passes through here.
    fn term(&mut self) -> Result<Expr, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep { offset: self.pos });
        }
        self.depth += 1;
        let term = self.nested_term();
        self.depth -= 1;
        term
    }

    fn nested_term(&mut self) -> Result<Expr, ParseError> {
        self.skip_trivia();
        let offset = self.pos;
        match self.peek() {
            None => Err(ParseError::UnexpectedEof),
            Some('\'') => self.single_quoted().map(|s| Expr::Value(s.into())),
            Some('"') => self.double_quoted().map(|s| Expr::Value(s.into())),
            Some('[') => {
                self.bump();
                self.array_body(']').map(Expr::Array)
            }
            Some('-') | Some('+') => {
                let negative = self.bump() == Some('-');
                match self.term()? {
                    Expr::Value(ConfigValue::Int(i)) if negative => Ok(Expr::Value(match i.checked_neg() {
                        Some(n) => ConfigValue::Int(n),
                        None => ConfigValue::Float(-(i as f64)),
                    })),
                    Expr::Value(ConfigValue::Float(f)) if negative => {
                        Ok(Expr::Value(ConfigValue::Float(-f)))
                    }
                    Expr::Value(v @ (ConfigValue::Int(_) | ConfigValue::Float(_))) => {
                        Ok(Expr::Value(v))
                    }
                    _ => Err(ParseError::Unsupported {
                        name: "sign on non-number".to_string(),
                        offset,
                    }),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number().map(Expr::Value),
            Some(c) if c == '_' || c.is_alphabetic() => {
                let word = self.identifier();
                match word.to_ascii_lowercase().as_str() {
                    "true" => Ok(Expr::Value(ConfigValue::Bool(true))),
                    "false" => Ok(Expr::Value(ConfigValue::Bool(false))),
                    "null" => Ok(Expr::Value(ConfigValue::Null)),
                    "array" => {
                        self.expect_char('(')?;
                        self.array_body(')').map(Expr::Array)
                    }
                    _ if word == "NAN" => Ok(Expr::Value(ConfigValue::Float(f64::NAN))),
                    _ if word == "INF" => Ok(Expr::Value(ConfigValue::Float(f64::INFINITY))),
                    _ => Err(ParseError::Unsupported {
                        name: word.to_string(),
                        offset,
                    }),
                }
            }
            Some(_) => Err(self.unexpected()),
        }
    }

    /// Entries up to and including `close`. The opening bracket is consumed.
    fn array_body(&mut self, close: char) -> Result<Entries, ParseError> {
        let mut entries = Entries::new();
        let mut next_index: i64 = 0;
        loop {
            self.skip_trivia();
            if self.eat(close) {
                return Ok(entries);
            }

            let first = self.expression()?;
            self.skip_trivia();
            let (key, value) = if self.eat_str("=>") {
                let key = match first {
                    Expr::Value(v) => ArrayKey::from_value(v),
                    Expr::Array(_) => {
                        return Err(ParseError::Unsupported {
                            name: "array as key".to_string(),
                            offset: self.pos,
                        });
                    }
                };
                (key, self.expression()?.into_value())
            } else {
                (ArrayKey::Int(next_index), first.into_value())
            };

            if let ArrayKey::Int(i) = key
                && i >= next_index
            {
                next_index = i.saturating_add(1);
            }
            entries.insert(key, value);

            self.skip_trivia();
            if !self.eat(',') {
                self.skip_trivia();
                if self.eat(close) {
                    return Ok(entries);
                }
                return Err(self.unexpected());
            }
        }
    }

    fn single_quoted(&mut self) -> Result<String, ParseError> {
        let offset = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString { offset }),
                Some('\'') => return Ok(out),
                Some('\\') => match self.peek() {
                    Some(c @ ('\\' | '\'')) => {
                        self.bump();
                        out.push(c);
                    }
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn double_quoted(&mut self) -> Result<String, ParseError> {
        let offset = self.pos;
        self.bump();
        // Octal and hex escapes produce raw bytes.
        let mut out: Vec<u8> = Vec::new();
        let mut utf8 = [0u8; 4];
        loop {
            let ch = self
                .bump()
                .ok_or(ParseError::UnterminatedString { offset })?;
            match ch {
                '"' => return Ok(String::from_utf8_lossy(&out).into_owned()),
                '\\' => {
                    let esc = self
                        .peek()
                        .ok_or(ParseError::UnterminatedString { offset })?;
                    match esc {
                        'n' | 't' | 'r' | 'v' | 'e' | 'f' | '\\' | '$' | '"' => {
                            self.bump();
                            out.push(match esc {
                                'n' => b'\n',
                                't' => b'\t',
                                'r' => b'\r',
                                'v' => 0x0b,
                                'e' => 0x1b,
                                'f' => 0x0c,
                                other => other as u8,
                            });
                        }
                        '0'..='7' => {
                            let digits = self.take_while_max(3, |c| c.is_digit(8));
                            let byte = u32::from_str_radix(digits, 8).unwrap_or(0);
                            out.push((byte & 0xff) as u8);
                        }
                        'x' if self.rest()[1..].starts_with(|c: char| c.is_ascii_hexdigit()) => {
                            self.bump();
                            let digits = self.take_while_max(2, |c| c.is_ascii_hexdigit());
                            out.push(u8::from_str_radix(digits, 16).unwrap_or(0));
                        }
                        'u' if self.rest()[1..].starts_with('{') => {
                            let close = self.rest().find('}');
                            let code = close
                                .and_then(|end| u32::from_str_radix(&self.rest()[2..end], 16).ok())
                                .and_then(char::from_u32);
                            match (close, code) {
                                (Some(end), Some(c)) => {
                                    self.pos += end + 1;
                                    out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                                }
                                _ => out.push(b'\\'),
                            }
                        }
                        _ => out.push(b'\\'),
                    }
                }
                other => out.extend_from_slice(other.encode_utf8(&mut utf8).as_bytes()),
            }
        }
    }

    fn take_while_max(&mut self, max: usize, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        let mut taken = 0;
        while taken < max && self.peek().is_some_and(&pred) {
            self.bump();
            taken += 1;
        }
        &self.src[start..self.pos]
    }

    fn number(&mut self) -> Result<ConfigValue, ParseError> {
        let offset = self.pos;
        let rest = self.rest();
        let lower = rest.get(..2).map(str::to_ascii_lowercase);
        let radix = match lower.as_deref() {
            Some("0x") => Some(16),
            Some("0b") => Some(2),
            Some("0o") => Some(8),
            _ => None,
        };
        if let Some(radix) = radix {
            self.pos += 2;
            let digits = self.take_while_max(usize::MAX, |c| c.is_digit(radix) || c == '_');
            return self.integer_or_float(&digits.replace('_', ""), radix, offset);
        }

        let text = self.take_while_max(usize::MAX, |c| c.is_ascii_digit() || c == '.' || c == '_');
        let mut text = text.to_string();
        if matches!(self.peek(), Some('e' | 'E')) {
            let save = self.pos;
            let mut exponent = String::from("e");
            self.bump();
            if let Some(sign @ ('+' | '-')) = self.peek() {
                self.bump();
                exponent.push(sign);
            }
            let digits = self.take_while_max(usize::MAX, |c| c.is_ascii_digit());
            if digits.is_empty() {
                self.pos = save;
            } else {
                exponent.push_str(digits);
                text.push_str(&exponent);
            }
        }
        let text = text.replace('_', "");
        let invalid = || ParseError::InvalidNumber {
            text: text.clone(),
            offset,
        };

        if text.contains(['.', 'e']) {
            return text.parse::<f64>().map(ConfigValue::Float).map_err(|_| invalid());
        }
        if text.len() > 1 && text.starts_with('0') {
            // Legacy octal literal.
            return self.integer_or_float(&text[1..], 8, offset);
        }
        self.integer_or_float(&text, 10, offset)
    }

    /// Integers that overflow `i64` become floats, as in PHP.
    fn integer_or_float(
        &self,
        digits: &str,
        radix: u32,
        offset: usize,
    ) -> Result<ConfigValue, ParseError> {
        if digits.is_empty() {
            return Err(ParseError::InvalidNumber {
                text: digits.to_string(),
                offset,
            });
        }
        match i64::from_str_radix(digits, radix) {
            Ok(i) => Ok(ConfigValue::Int(i)),
            Err(_) => {
                let mut acc = 0f64;
                for c in digits.chars() {
                    let d = c.to_digit(radix).ok_or_else(|| ParseError::InvalidNumber {
                        text: digits.to_string(),
                        offset,
                    })?;
                    acc = acc * f64::from(radix) + f64::from(d);
                }
                Ok(ConfigValue::Float(acc))
            }
        }
    }
}
