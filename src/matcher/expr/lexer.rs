//! Tokenizer for heading expressions.

use super::ExprError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token {
    Ident(String),
    Str(String),
    LParen,
    RParen,
    Comma,
    And,
    Or,
    Not,
    EqEq,
    NotEq,
}

/// Tokens paired with their starting byte offset.
pub(super) fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '(' => single(&mut chars, Token::LParen),
            ')' => single(&mut chars, Token::RParen),
            ',' => single(&mut chars, Token::Comma),
            '&' => pair(&mut chars, '&', Token::And, start)?,
            '|' => pair(&mut chars, '|', Token::Or, start)?,
            '=' => pair(&mut chars, '=', Token::EqEq, start)?,
            '!' => {
                chars.next();
                if chars.peek().is_some_and(|&(_, n)| n == '=') {
                    chars.next();
                    Token::NotEq
                } else {
                    Token::Not
                }
            }
            '"' | '\'' => Token::Str(string(&mut chars, c, start)?),
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&(_, n)) = chars.peek() {
                    if n.is_alphanumeric() || n == '_' {
                        ident.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            other => {
                return Err(ExprError::new(
                    format!("unexpected character '{}'", other),
                    start,
                ));
            }
        };
        tokens.push((token, start));
    }

    Ok(tokens)
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn single(chars: &mut Chars<'_>, token: Token) -> Token {
    chars.next();
    token
}

fn pair(chars: &mut Chars<'_>, second: char, token: Token, start: usize) -> Result<Token, ExprError> {
    chars.next();
    match chars.next() {
        Some((_, c)) if c == second => Ok(token),
        _ => Err(ExprError::new(
            format!("expected '{}{}'", second, second),
            start,
        )),
    }
}

fn string(chars: &mut Chars<'_>, quote: char, start: usize) -> Result<String, ExprError> {
    chars.next();
    let mut out = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, escaped)) if escaped == quote || escaped == '\\' => out.push(escaped),
                // Unknown escapes stay verbatim so regex classes like `\d` survive.
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => break,
            },
            c if c == quote => return Ok(out),
            c => out.push(c),
        }
    }
    Err(ExprError::new("unterminated string literal", start))
}
