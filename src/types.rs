//! Type expression grammar for annotation types.
//!
//! Recursive descent over a byte cursor, one function per production.
//! `Display` is the inverse of the grammar: printing a descriptor and
//! re-parsing yields an equal value (a one-member union collapses to its
//! bare member).

use std::fmt;
use thiserror::Error;

/// A type expression did not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type `{text}` at offset {pos}: expected {expected}")]
pub struct GrammarError {
    pub text: String,
    pub pos: usize,
    pub expected: &'static str,
}

/// Parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Keyword type, quoted literal value (kept quoted), or namespaced
    /// identifier like `overseer.TaskDefinition`.
    Primitive(String),
    /// Element type followed by `[]`.
    Array(Box<TypeExpr>),
    /// `table<K, V>`.
    Table(Box<TypeExpr>, Box<TypeExpr>),
    /// `fun(a: string, b: integer): boolean`.
    Function {
        params: Vec<(String, TypeExpr)>,
        ret: Option<Box<TypeExpr>>,
    },
    /// Two or more alternatives; order is significant for display.
    Union(Vec<TypeExpr>),
}

const KEYWORDS: &[&str] = &["nil", "string", "integer", "boolean", "number", "table", "any"];

/// Only these element types form an array via the list production.
const LIST_KEYWORDS: &[&str] = &["string", "integer", "number", "any", "boolean"];

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(name) => f.write_str(name),
            TypeExpr::Array(el) => write!(f, "{}[]", el),
            TypeExpr::Table(k, v) => write!(f, "table<{}, {}>", k, v),
            TypeExpr::Function { params, ret } => {
                f.write_str("fun(")?;
                for (i, (name, ty)) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, ty)?;
                }
                f.write_str(")")?;
                if let Some(ret) = ret {
                    write!(f, ": {}", ret)?;
                }
                Ok(())
            }
            TypeExpr::Union(members) => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{}", m)?;
                }
                Ok(())
            }
        }
    }
}

/// Parse a complete type string; unconsumed trailing content is an error.
pub fn parse(text: &str) -> Result<TypeExpr, GrammarError> {
    let mut cur = Cursor::new(text);
    let ty = union_type(&mut cur)?;
    cur.skip_ws();
    if !cur.at_end() {
        return Err(cur.error("end of type"));
    }
    Ok(ty)
}

/// Parse a type at the start of `text`, returning the descriptor and the
/// number of bytes consumed. Used for types embedded in tag lines, where
/// free description text follows the type.
pub fn parse_prefix(text: &str) -> Result<(TypeExpr, usize), GrammarError> {
    let mut cur = Cursor::new(text);
    let ty = union_type(&mut cur)?;
    Ok((ty, cur.pos))
}

// -- Cursor -------------------------------------------------------------------

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Spaces and tabs are insignificant; newlines are not valid here at all
    /// (type expressions are single-line).
    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start_matches([' ', '\t']);
        self.pos = self.src.len() - trimmed.len();
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        match rest.chars().next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return None,
        }
        let end = rest
            .char_indices()
            .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_'))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += end;
        Some(&rest[..end])
    }

    fn error(&self, expected: &'static str) -> GrammarError {
        GrammarError {
            text: self.src.to_string(),
            pos: self.pos,
            expected,
        }
    }
}

// -- Productions --------------------------------------------------------------

fn union_type(cur: &mut Cursor) -> Result<TypeExpr, GrammarError> {
    let first = non_union(cur)?;
    let mut members = vec![first];
    loop {
        let checkpoint = cur.pos;
        cur.skip_ws();
        if !cur.eat('|') {
            cur.pos = checkpoint;
            break;
        }
        match non_union(cur) {
            Ok(member) => members.push(member),
            Err(_) => {
                // Not a union delimiter after all; leave the `|` unconsumed
                // so a caller embedding the type in a tag line can treat it
                // as description text.
                cur.pos = checkpoint;
                break;
            }
        }
    }
    if members.len() == 1 {
        Ok(members.remove(0))
    } else {
        Ok(TypeExpr::Union(members))
    }
}

fn non_union(cur: &mut Cursor) -> Result<TypeExpr, GrammarError> {
    cur.skip_ws();
    if cur.peek() == Some('"') {
        return quoted_literal(cur);
    }
    let start = cur.pos;
    let Some(word) = cur.ident() else {
        return Err(cur.error("a type"));
    };
    match word {
        "fun" => function_type(cur),
        "table" => {
            let checkpoint = cur.pos;
            cur.skip_ws();
            if cur.eat('<') {
                table_type(cur)
            } else {
                cur.pos = checkpoint;
                Ok(TypeExpr::Primitive("table".to_string()))
            }
        }
        kw if KEYWORDS.contains(&kw) => {
            // The `[]` must be immediate: `string []` is not a list.
            if LIST_KEYWORDS.contains(&kw) && cur.eat_str("[]") {
                Ok(TypeExpr::Array(Box::new(TypeExpr::Primitive(kw.to_string()))))
            } else {
                Ok(TypeExpr::Primitive(kw.to_string()))
            }
        }
        _ => namespaced(cur, start),
    }
}

/// Namespaced identifier: `ident(.ident)+`, optional immediate `[]` suffix.
/// The leading identifier has already been consumed; `start` is its offset.
fn namespaced(cur: &mut Cursor, start: usize) -> Result<TypeExpr, GrammarError> {
    let mut saw_dot = false;
    loop {
        let checkpoint = cur.pos;
        if !cur.eat('.') {
            break;
        }
        if cur.ident().is_none() {
            cur.pos = checkpoint;
            break;
        }
        saw_dot = true;
    }
    if !saw_dot {
        cur.pos = start;
        return Err(cur.error("a type"));
    }
    let name = cur.src[start..cur.pos].to_string();
    if cur.eat_str("[]") {
        Ok(TypeExpr::Array(Box::new(TypeExpr::Primitive(name))))
    } else {
        Ok(TypeExpr::Primitive(name))
    }
}

/// Double-quoted literal value, kept quoted in the descriptor.
fn quoted_literal(cur: &mut Cursor) -> Result<TypeExpr, GrammarError> {
    let start = cur.pos;
    cur.eat('"');
    loop {
        match cur.peek() {
            Some('"') => {
                cur.eat('"');
                return Ok(TypeExpr::Primitive(cur.src[start..cur.pos].to_string()));
            }
            Some(c) if c != '\n' => {
                cur.pos += c.len_utf8();
            }
            _ => return Err(cur.error("closing `\"`")),
        }
    }
}

/// `table<K, V>` body; the `<` has already been consumed.
fn table_type(cur: &mut Cursor) -> Result<TypeExpr, GrammarError> {
    let key = union_type(cur)?;
    cur.skip_ws();
    if !cur.eat(',') {
        return Err(cur.error("`,`"));
    }
    let value = union_type(cur)?;
    cur.skip_ws();
    if !cur.eat('>') {
        return Err(cur.error("`>`"));
    }
    Ok(TypeExpr::Table(Box::new(key), Box::new(value)))
}

/// `fun(...)` body; the `fun` keyword has already been consumed.
fn function_type(cur: &mut Cursor) -> Result<TypeExpr, GrammarError> {
    cur.skip_ws();
    if !cur.eat('(') {
        return Err(cur.error("`(`"));
    }
    let mut params = Vec::new();
    cur.skip_ws();
    if !cur.eat(')') {
        loop {
            cur.skip_ws();
            let Some(name) = cur.ident() else {
                return Err(cur.error("a parameter name"));
            };
            let name = name.to_string();
            cur.skip_ws();
            if !cur.eat(':') {
                return Err(cur.error("`:`"));
            }
            let ty = union_type(cur)?;
            params.push((name, ty));
            cur.skip_ws();
            if cur.eat(',') {
                continue;
            }
            if cur.eat(')') {
                break;
            }
            return Err(cur.error("`,` or `)`"));
        }
    }
    // Optional return type; backtrack when the `:` is not followed by a type.
    let checkpoint = cur.pos;
    cur.skip_ws();
    if cur.eat(':') {
        if let Ok(ret) = union_type(cur) {
            return Ok(TypeExpr::Function {
                params,
                ret: Some(Box::new(ret)),
            });
        }
    }
    cur.pos = checkpoint;
    Ok(TypeExpr::Function { params, ret: None })
}
