//! Recursive-descent JWCC parser.
//!
//! Accepts standard JSON plus trailing commas and `//` / `/* */` comments.
//! Comment text is stored without delimiters: lines preceding a member or
//! element become its `before` trivia, a comment on the same line after a
//! value becomes its `line` trivia, and comments dangling before a closing
//! delimiter land on the container's `after` trivia.

use super::{Array, Member, Object, Scalar, Value};
use crate::error::Error;

/// Parse a complete document. The root must be an object.
pub fn parse_document(input: &str) -> Result<Object, Error> {
    let mut parser = Parser::new(input);
    let before = parser.collect_trivia()?;
    if parser.peek() != Some(b'{') {
        return Err(parser.error("expected `{` at document root"));
    }
    let mut root = parser.parse_object()?;
    root.comments.before = before;
    let trailing = parser.collect_trivia()?;
    root.comments.after.extend(trailing);
    if parser.pos != input.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(root)
}

/// Parse a single standalone value of any type.
pub fn parse_value(input: &str) -> Result<Value, Error> {
    let mut parser = Parser::new(input);
    let before = parser.collect_trivia()?;
    let mut value = parser.parse_value()?;
    let mut comments = std::mem::take(&mut value.comments_mut().before);
    let mut merged = before;
    merged.append(&mut comments);
    value.comments_mut().before = merged;
    parser.collect_trivia()?;
    if parser.pos != input.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.input[self.pos..].starts_with(pattern)
    }

    fn error(&self, message: impl Into<String>) -> Error {
        let consumed = &self.input[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
        let column = consumed[line_start..].chars().count() + 1;
        Error::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Skip whitespace and comments, returning comment text as plain lines.
    fn collect_trivia(&mut self) -> Result<Vec<String>, Error> {
        let mut lines = Vec::new();
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.bump(),
                _ if self.starts_with("//") => {
                    self.pos += 2;
                    let rest = &self.input[self.pos..];
                    let len = rest.find('\n').unwrap_or(rest.len());
                    lines.push(rest[..len].trim().to_string());
                    self.pos += len;
                }
                _ if self.starts_with("/*") => {
                    self.pos += 2;
                    let rest = &self.input[self.pos..];
                    let len = rest
                        .find("*/")
                        .ok_or_else(|| self.error("unterminated block comment"))?;
                    for line in rest[..len].lines() {
                        let text = line.trim().trim_start_matches('*').trim();
                        if !text.is_empty() {
                            lines.push(text.to_string());
                        }
                    }
                    self.pos += len + 2;
                }
                _ => break,
            }
        }
        Ok(lines)
    }

    /// A `//` comment after a value, before the next newline.
    fn same_line_comment(&mut self) -> Option<String> {
        let saved = self.pos;
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.bump();
        }
        if self.starts_with("//") {
            self.pos += 2;
            let rest = &self.input[self.pos..];
            let len = rest.find('\n').unwrap_or(rest.len());
            let text = rest[..len].trim().to_string();
            self.pos += len;
            Some(text)
        } else {
            self.pos = saved;
            None
        }
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        match self.peek() {
            Some(b'{') => Ok(Value::Object(self.parse_object()?)),
            Some(b'[') => Ok(Value::Array(self.parse_array()?)),
            Some(b'"') => Ok(Value::Scalar(Scalar::new(self.parse_string_lexeme()?))),
            Some(_) => Ok(Value::Scalar(self.parse_literal()?)),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Object, Error> {
        self.bump(); // consume `{`
        let mut obj = Object::new();
        loop {
            let before = self.collect_trivia()?;
            match self.peek() {
                None => return Err(self.error("unterminated object")),
                Some(b'}') => {
                    self.bump();
                    obj.comments.after.extend(before);
                    return Ok(obj);
                }
                Some(b'"') => {
                    let member = self.parse_member(before, &obj)?;
                    obj.members.push(member);
                }
                Some(_) => return Err(self.error("expected `\"` or `}` in object")),
            }
        }
    }

    fn parse_member(&mut self, before: Vec<String>, obj: &Object) -> Result<Member, Error> {
        let key = Scalar::new(self.parse_string_lexeme()?);
        if obj.find(&key.text()).is_some() {
            return Err(self.error(format!("duplicate key `{}`", key.text())));
        }

        let mut all_before = before;
        all_before.extend(self.collect_trivia()?);
        if self.peek() != Some(b':') {
            return Err(self.error(format!("expected `:` after key `{}`", key.text())));
        }
        self.bump();
        all_before.extend(self.collect_trivia()?);

        let value = self.parse_value()?;
        let mut member = Member::new(key, value);
        member.comments.before = all_before;

        if let Some(comment) = self.same_line_comment() {
            member.comments.line = Some(comment);
        }
        let dangling = self.collect_trivia()?;
        match self.peek() {
            Some(b',') => {
                self.bump();
                if member.comments.line.is_none() {
                    member.comments.line = self.same_line_comment();
                }
            }
            Some(b'}') => {}
            _ => return Err(self.error("expected `,` or `}` after member")),
        }
        member.comments.after = dangling;
        Ok(member)
    }

    fn parse_array(&mut self) -> Result<Array, Error> {
        self.bump(); // consume `[`
        let mut arr = Array::new();
        loop {
            let before = self.collect_trivia()?;
            match self.peek() {
                None => return Err(self.error("unterminated array")),
                Some(b']') => {
                    self.bump();
                    arr.comments.after.extend(before);
                    return Ok(arr);
                }
                Some(_) => {
                    let mut value = self.parse_value()?;
                    value.comments_mut().before = before;

                    if let Some(comment) = self.same_line_comment() {
                        value.comments_mut().line = Some(comment);
                    }
                    let dangling = self.collect_trivia()?;
                    match self.peek() {
                        Some(b',') => {
                            self.bump();
                            if value.comments().line.is_none() {
                                value.comments_mut().line = self.same_line_comment();
                            }
                        }
                        Some(b']') => {}
                        _ => return Err(self.error("expected `,` or `]` after array element")),
                    }
                    value.comments_mut().after = dangling;
                    arr.values.push(value);
                }
            }
        }
    }

    fn parse_string_lexeme(&mut self) -> Result<String, Error> {
        let start = self.pos;
        self.bump(); // consume opening quote
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(b'\n') => return Err(self.error("unescaped newline in string")),
                Some(b'\\') => {
                    self.bump();
                    if self.peek().is_none() {
                        return Err(self.error("unterminated string"));
                    }
                    self.bump();
                }
                Some(b'"') => {
                    self.bump();
                    return Ok(self.input[start..self.pos].to_string());
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn parse_literal(&mut self) -> Result<Scalar, Error> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'+' | b'-' | b'.')
        ) {
            self.bump();
        }
        if start == self.pos {
            let ch = self.input[self.pos..].chars().next().unwrap_or('?');
            return Err(self.error(format!("unexpected character `{ch}`")));
        }
        let lexeme = &self.input[start..self.pos];
        if lexeme == "true" || lexeme == "false" || lexeme == "null" || is_valid_number(lexeme) {
            Ok(Scalar::new(lexeme))
        } else {
            Err(self.error(format!("invalid literal `{lexeme}`")))
        }
    }
}

fn is_valid_number(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if b.get(i) == Some(&b'-') {
        i += 1;
    }
    if b.get(i) == Some(&b'0') {
        i += 1;
    } else if matches!(b.get(i), Some(b'1'..=b'9')) {
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    } else {
        return false;
    }
    if b.get(i) == Some(&b'.') {
        i += 1;
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(b.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    i == b.len()
}
