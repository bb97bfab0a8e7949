//! Heading expression language.
//!
//! A small boolean language evaluated against two string variables,
//! `filename` (document base name) and `heading` (heading text without level
//! markers):
//!
//! ```text
//! expr    := or
//! or      := and ( "||" and )*
//! and     := unary ( "&&" unary )*
//! unary   := "!" unary | compare
//! compare := primary ( ( "==" | "!=" ) primary )?
//! primary := STRING | "true" | "false" | IDENT | IDENT "(" args ")" | "(" expr ")"
//! ```
//!
//! Expressions are type-checked while parsing, so a parsed expression always
//! evaluates to a boolean without failing.

mod eval;
mod lexer;
mod parser;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub use eval::{Env, Value};

/// A parse or type error, with the byte offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at offset {offset})")]
pub struct ExprError {
    pub message: String,
    pub offset: usize,
}

impl ExprError {
    pub(crate) fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// Static type of a sub-expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Str,
    Bool,
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Type::Str => "string",
            Type::Bool => "boolean",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
    Filename,
    Heading,
}

impl Var {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "filename" => Some(Var::Filename),
            "heading" => Some(Var::Heading),
            _ => None,
        }
    }
}

/// Built-in functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Slug,
    Lower,
    Upper,
    Trim,
    HasPrefix,
    HasSuffix,
    Contains,
    Match,
    Replace,
    TrimPrefix,
    TrimSuffix,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "slug" => Func::Slug,
            "lower" => Func::Lower,
            "upper" => Func::Upper,
            "trim" => Func::Trim,
            "hasPrefix" => Func::HasPrefix,
            "hasSuffix" => Func::HasSuffix,
            "contains" => Func::Contains,
            "match" => Func::Match,
            "replace" => Func::Replace,
            "trimPrefix" => Func::TrimPrefix,
            "trimSuffix" => Func::TrimSuffix,
            _ => return None,
        })
    }

    /// Number of (string) arguments.
    fn arity(self) -> usize {
        match self {
            Func::Slug | Func::Lower | Func::Upper | Func::Trim => 1,
            Func::HasPrefix
            | Func::HasSuffix
            | Func::Contains
            | Func::Match
            | Func::TrimPrefix
            | Func::TrimSuffix => 2,
            Func::Replace => 3,
        }
    }

    fn returns(self) -> Type {
        match self {
            Func::HasPrefix | Func::HasSuffix | Func::Contains | Func::Match => Type::Bool,
            _ => Type::Str,
        }
    }
}

/// A parsed, type-checked expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Str(String),
    Bool(bool),
    Var(Var),
    Call(Func, Vec<Expr>),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Eq(Box<Expr>, Box<Expr>),
    Ne(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Parse and type-check an expression. The result must be boolean.
    pub fn parse(source: &str) -> Result<Expr, ExprError> {
        let tokens = lexer::tokenize(source)?;
        parser::Parser::new(tokens, source.len()).parse()
    }
}
