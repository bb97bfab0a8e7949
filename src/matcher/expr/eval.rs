//! Expression evaluation.

use super::{Expr, Func, Var};
use crate::document::slug;
use crate::matcher::RegexCache;

/// Variable bindings for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    pub filename: &'a str,
    pub heading: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Bool(bool),
}

impl Value {
    fn into_string(self) -> String {
        match self {
            Value::Str(s) => s,
            Value::Bool(b) => b.to_string(),
        }
    }

    fn truthy(&self) -> bool {
        matches!(self, Value::Bool(true))
    }
}

impl Expr {
    /// Evaluate a type-checked boolean expression.
    pub fn matches(&self, env: &Env<'_>, regexes: &RegexCache) -> bool {
        self.eval(env, regexes).truthy()
    }

    /// Evaluate to a value. Pure: no I/O and no state beyond the regex cache.
    pub fn eval(&self, env: &Env<'_>, regexes: &RegexCache) -> Value {
        match self {
            Expr::Str(s) => Value::Str(s.clone()),
            Expr::Bool(b) => Value::Bool(*b),
            Expr::Var(Var::Filename) => Value::Str(env.filename.to_string()),
            Expr::Var(Var::Heading) => Value::Str(env.heading.to_string()),
            Expr::Not(inner) => Value::Bool(!inner.matches(env, regexes)),
            Expr::And(l, r) => Value::Bool(l.matches(env, regexes) && r.matches(env, regexes)),
            Expr::Or(l, r) => Value::Bool(l.matches(env, regexes) || r.matches(env, regexes)),
            Expr::Eq(l, r) => Value::Bool(l.eval(env, regexes) == r.eval(env, regexes)),
            Expr::Ne(l, r) => Value::Bool(l.eval(env, regexes) != r.eval(env, regexes)),
            Expr::Call(func, args) => {
                let args: Vec<String> = args
                    .iter()
                    .map(|a| a.eval(env, regexes).into_string())
                    .collect();
                call(*func, &args, regexes)
            }
        }
    }
}

fn call(func: Func, args: &[String], regexes: &RegexCache) -> Value {
    let arg = |i: usize| args.get(i).map_or("", String::as_str);
    match func {
        Func::Slug => Value::Str(slug(arg(0))),
        Func::Lower => Value::Str(arg(0).to_lowercase()),
        Func::Upper => Value::Str(arg(0).to_uppercase()),
        Func::Trim => Value::Str(arg(0).trim().to_string()),
        Func::HasPrefix => Value::Bool(arg(0).starts_with(arg(1))),
        Func::HasSuffix => Value::Bool(arg(0).ends_with(arg(1))),
        Func::Contains => Value::Bool(arg(0).contains(arg(1))),
        Func::Match => Value::Bool(match regexes.get(arg(1)) {
            Some(re) => re.is_match(arg(0)),
            None => arg(0).contains(arg(1)),
        }),
        Func::Replace => Value::Str(arg(0).replace(arg(1), arg(2))),
        Func::TrimPrefix => Value::Str(trim_prefix(arg(0), arg(1), regexes)),
        Func::TrimSuffix => Value::Str(trim_suffix(arg(0), arg(1), regexes)),
    }
}

/// Strip a leading match of `pattern`, e.g. `trimPrefix("01-intro", "\d+-")`.
fn trim_prefix(s: &str, pattern: &str, regexes: &RegexCache) -> String {
    match regexes.get(&format!("^(?:{})", pattern)) {
        Some(re) => match re.find(s) {
            Some(m) => s[m.end()..].to_string(),
            None => s.to_string(),
        },
        None => s.strip_prefix(pattern).unwrap_or(s).to_string(),
    }
}

/// Strip a trailing match of `pattern`.
fn trim_suffix(s: &str, pattern: &str, regexes: &RegexCache) -> String {
    match regexes.get(&format!("(?:{})$", pattern)) {
        Some(re) => match re.find(s) {
            Some(m) => s[..m.start()].to_string(),
            None => s.to_string(),
        },
        None => s.strip_suffix(pattern).unwrap_or(s).to_string(),
    }
}
