//! Sandboxed evaluator for data-only JavaScript expressions.
//!
//! Pages ship their result data as a JavaScript object literal passed to a
//! callback. This module evaluates that literal into a [`serde_json::Value`]
//! without running any code: only literals are understood, identifiers other
//! than `true`, `false`, `null`, `undefined`, `NaN` and `Infinity` are
//! rejected, and there are no calls, operators or property accesses.
//!
//! The result matches what `JSON.stringify` would produce for the same
//! expression: `undefined`, `NaN` and `Infinity` become `null` inside arrays,
//! and `undefined` object members are dropped.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Maximum nesting of arrays, objects and parentheses
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unexpected end of script")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("identifier `{name}` at offset {offset} is not a literal")]
    Identifier { name: String, offset: usize },

    #[error("invalid number `{text}` at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),

    #[error("unexpected input after expression at offset {0}")]
    TrailingInput(usize),

    #[error("expression evaluates to undefined")]
    Undefined,

    #[error("script is not a call to `{0}`")]
    NotACall(String),
}

/// Evaluate a literal expression
pub fn evaluate(expr: &str) -> Result<Value, ScriptError> {
    let mut ev = Evaluator::new(expr);
    let value = ev.expression(0)?;
    ev.finish()?;
    value.ok_or(ScriptError::Undefined)
}

/// Evaluate the single argument of a `callee(<literal>);` statement
/// without invoking anything
pub fn evaluate_call(script: &str, callee: &str) -> Result<Value, ScriptError> {
    let mut ev = Evaluator::new(script);
    ev.skip_trivia()?;
    if !ev.rest().starts_with(callee) {
        return Err(ScriptError::NotACall(callee.to_string()));
    }
    ev.pos += callee.len();
    ev.skip_trivia()?;
    if ev.peek() != Some('(') {
        return Err(ScriptError::NotACall(callee.to_string()));
    }
    ev.pos += 1;

    let value = ev.expression(0)?;
    ev.skip_trivia()?;
    ev.expect(')')?;
    ev.skip_trivia()?;
    if ev.peek() == Some(';') {
        ev.pos += 1;
    }
    ev.finish()?;
    value.ok_or(ScriptError::Undefined)
}

/// `None` stands for `undefined`
type Evaluated = Option<Value>;

struct Evaluator<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Evaluator<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn unexpected(&self) -> ScriptError {
        match self.peek() {
            Some(found) => ScriptError::Unexpected {
                found,
                offset: self.pos,
            },
            None => ScriptError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, want: char) -> Result<(), ScriptError> {
        if self.peek() == Some(want) {
            self.pos += want.len_utf8();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn finish(&mut self) -> Result<(), ScriptError> {
        self.skip_trivia()?;
        if self.pos < self.src.len() {
            return Err(ScriptError::TrailingInput(self.pos));
        }
        Ok(())
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<(), ScriptError> {
        loop {
            let rest = self.rest();
            if rest.starts_with("//") {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if rest.starts_with("/*") {
                let end = rest[2..].find("*/").ok_or(ScriptError::UnexpectedEnd)?;
                self.pos += end + 4;
            } else {
                match self.peek() {
                    Some(ch) if ch.is_whitespace() => self.pos += ch.len_utf8(),
                    _ => return Ok(()),
                }
            }
        }
    }

    fn expression(&mut self, depth: usize) -> Result<Evaluated, ScriptError> {
        if depth > MAX_DEPTH {
            return Err(ScriptError::TooDeep(MAX_DEPTH));
        }
        self.skip_trivia()?;
        match self.peek() {
            None => Err(ScriptError::UnexpectedEnd),
            Some('{') => self.object(depth).map(Some),
            Some('[') => self.array(depth).map(Some),
            Some(quote @ ('"' | '\'')) => self.string(quote).map(|s| Some(Value::String(s))),
            Some('(') => {
                self.pos += 1;
                let inner = self.expression(depth + 1)?;
                self.skip_trivia()?;
                self.expect(')')?;
                Ok(inner)
            }
            Some(sign @ ('-' | '+')) => {
                self.pos += 1;
                self.skip_trivia()?;
                self.signed(sign == '-').map(Some)
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.number(false).map(Some),
            Some(ch) if is_identifier_start(ch) => self.keyword(),
            Some(_) => Err(self.unexpected()),
        }
    }

    /// Operand of unary `+`/`-`: a number, `NaN` or `Infinity`
    fn signed(&mut self, negative: bool) -> Result<Value, ScriptError> {
        match self.peek() {
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.number(negative),
            Some(ch) if is_identifier_start(ch) => {
                let offset = self.pos;
                let name = self.identifier();
                match name {
                    "NaN" | "Infinity" => Ok(Value::Null),
                    _ => Err(ScriptError::Identifier {
                        name: name.to_string(),
                        offset,
                    }),
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    fn keyword(&mut self) -> Result<Evaluated, ScriptError> {
        let offset = self.pos;
        let name = self.identifier();
        match name {
            "true" => Ok(Some(Value::Bool(true))),
            "false" => Ok(Some(Value::Bool(false))),
            "null" | "NaN" | "Infinity" => Ok(Some(Value::Null)),
            "undefined" => Ok(None),
            _ => Err(ScriptError::Identifier {
                name: name.to_string(),
                offset,
            }),
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if is_identifier_part(ch) {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
        &self.src[start..self.pos]
    }

    fn object(&mut self, depth: usize) -> Result<Value, ScriptError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }

            let key = self.property_key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            if let Some(value) = self.expression(depth + 1)? {
                map.insert(key, value);
            } else {
                map.remove(&key);
            }

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        Ok(Value::Object(map))
    }

    fn property_key(&mut self) -> Result<String, ScriptError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.string(quote),
            Some(ch) if ch.is_ascii_digit() || ch == '.' => {
                let number = self.number(false)?;
                Ok(number.to_string())
            }
            Some(ch) if is_identifier_start(ch) => Ok(self.identifier().to_string()),
            _ => Err(self.unexpected()),
        }
    }

    fn array(&mut self, depth: usize) -> Result<Value, ScriptError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                // Elision, e.g. `[1,,2]`
                Some(',') => {
                    self.pos += 1;
                    items.push(Value::Null);
                    continue;
                }
                _ => {}
            }

            items.push(self.expression(depth + 1)?.unwrap_or(Value::Null));

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        Ok(Value::Array(items))
    }

    fn number(&mut self, negative: bool) -> Result<Value, ScriptError> {
        let start = self.pos;
        let mut prev = '\0';
        while let Some(ch) = self.peek() {
            let exponent_sign = (ch == '+' || ch == '-') && matches!(prev, 'e' | 'E');
            if ch.is_ascii_alphanumeric() || ch == '.' || ch == '_' || exponent_sign {
                self.pos += 1;
                prev = ch;
            } else {
                break;
            }
        }
        let text = &self.src[start..self.pos];
        let invalid = || ScriptError::InvalidNumber {
            text: text.to_string(),
            offset: start,
        };
        let digits = text.replace('_', "");

        let radix = match digits.get(..2) {
            Some("0x" | "0X") => Some(16),
            Some("0o" | "0O") => Some(8),
            Some("0b" | "0B") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            let magnitude = i64::from_str_radix(&digits[2..], radix).map_err(|_| invalid())?;
            return Ok(Value::from(if negative { -magnitude } else { magnitude }));
        }

        let is_integer = digits.bytes().all(|b| b.is_ascii_digit());
        if is_integer {
            if let Ok(n) = digits.parse::<i64>() {
                return Ok(Value::from(if negative { -n } else { n }));
            }
        }

        if !digits
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        {
            return Err(invalid());
        }
        let n: f64 = digits.parse().map_err(|_| invalid())?;
        Ok(float_value(if negative { -n } else { n }))
    }

    fn string(&mut self, quote: char) -> Result<String, ScriptError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            let offset = self.pos;
            match self.bump() {
                None => return Err(ScriptError::UnexpectedEnd),
                Some(ch) if ch == quote => return Ok(out),
                Some('\n' | '\r') => {
                    return Err(ScriptError::Unexpected {
                        found: '\n',
                        offset,
                    });
                }
                Some('\\') => self.escape(&mut out, offset)?,
                Some(ch) => out.push(ch),
            }
        }
    }

    fn escape(&mut self, out: &mut String, offset: usize) -> Result<(), ScriptError> {
        let invalid = ScriptError::InvalidEscape { offset };
        match self.bump().ok_or(ScriptError::UnexpectedEnd)? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = self.hex_digits(2).ok_or(invalid.clone())?;
                out.push(char::from_u32(code).ok_or(invalid)?);
            }
            'u' => {
                let code = self.unicode_escape().ok_or(invalid.clone())?;
                out.push(self.combine_surrogates(code));
            }
            // Line continuation
            '\r' => {
                if self.peek() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            ch if ch.is_ascii_digit() => return Err(invalid),
            other => out.push(other),
        }
        Ok(())
    }

    fn hex_digits(&mut self, count: usize) -> Option<u32> {
        let digits = self.rest().get(..count)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let code = u32::from_str_radix(digits, 16).ok()?;
        self.pos += count;
        Some(code)
    }

    /// Body of `\uXXXX` or `\u{X...}` after the `u`
    fn unicode_escape(&mut self) -> Option<u32> {
        if self.peek() == Some('{') {
            let close = self.rest().find('}')?;
            let digits = &self.rest()[1..close];
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let code = u32::from_str_radix(digits, 16).ok()?;
            self.pos += close + 1;
            Some(code)
        } else {
            self.hex_digits(4)
        }
    }

    /// Join a high surrogate with a following `\uXXXX` low surrogate.
    /// Unpaired surrogates become U+FFFD.
    fn combine_surrogates(&mut self, code: u32) -> char {
        if (0xD800..0xDC00).contains(&code) && self.rest().starts_with("\\u") {
            let saved = self.pos;
            self.pos += 2;
            match self.hex_digits(4) {
                Some(low) if (0xDC00..0xE000).contains(&low) => {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER);
                }
                _ => self.pos = saved,
            }
        }
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Numbers the way `JSON.stringify` writes them: integral values without a
/// fraction, non-finite values as null
fn float_value(n: f64) -> Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}
