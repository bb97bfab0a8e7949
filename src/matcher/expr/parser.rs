//! Recursive-descent parser with inline type checking.

use super::lexer::Token;
use super::{Expr, ExprError, Func, Type, Var};

/// Deepest operator or parenthesis nesting accepted. Evaluation recurses
/// over the tree, so this also bounds the evaluator's stack use.
pub(super) const MAX_DEPTH: usize = 128;

pub(super) struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    pub(super) fn new(tokens: Vec<(Token, usize)>, end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
        }
    }

    pub(super) fn parse(mut self) -> Result<Expr, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::new("empty expression", 0));
        }

        let (expr, ty) = self.parse_or()?;
        if let Some((token, offset)) = self.tokens.get(self.pos) {
            return Err(ExprError::new(
                format!("unexpected {} after expression", describe(token)),
                *offset,
            ));
        }
        if ty != Type::Bool {
            return Err(ExprError::new(
                "expression must evaluate to a boolean",
                0,
            ));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |(_, o)| *o)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), ExprError> {
        let offset = self.offset();
        match self.advance() {
            Some(ref t) if *t == expected => Ok(()),
            Some(t) => Err(ExprError::new(
                format!("expected {} but found {}", describe(&expected), describe(&t)),
                offset,
            )),
            None => Err(ExprError::new(
                format!("expected {} but reached end of expression", describe(&expected)),
                offset,
            )),
        }
    }

    /// Go one nesting level deeper. Callers restore `depth` on success; on
    /// error the whole parse is abandoned.
    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::new(
                format!("expression nests deeper than {} levels", MAX_DEPTH),
                self.offset(),
            ));
        }
        Ok(())
    }

    fn parse_or(&mut self) -> Result<(Expr, Type), ExprError> {
        let depth = self.depth;
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.enter()?;
            let offset = self.offset();
            self.advance();
            let right = self.parse_and()?;
            require_bools("||", &left, &right, offset)?;
            left = (Expr::Or(Box::new(left.0), Box::new(right.0)), Type::Bool);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<(Expr, Type), ExprError> {
        let depth = self.depth;
        let mut left = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.enter()?;
            let offset = self.offset();
            self.advance();
            let right = self.parse_unary()?;
            require_bools("&&", &left, &right, offset)?;
            left = (Expr::And(Box::new(left.0), Box::new(right.0)), Type::Bool);
        }
        self.depth = depth;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<(Expr, Type), ExprError> {
        if self.peek() == Some(&Token::Not) {
            self.enter()?;
            let offset = self.offset();
            self.advance();
            let (inner, ty) = self.parse_unary()?;
            self.depth -= 1;
            if ty != Type::Bool {
                return Err(ExprError::new(
                    format!("'!' needs a boolean operand, found {}", ty),
                    offset,
                ));
            }
            return Ok((Expr::Not(Box::new(inner)), Type::Bool));
        }
        self.parse_compare()
    }

    fn parse_compare(&mut self) -> Result<(Expr, Type), ExprError> {
        let left = self.parse_primary()?;
        let negate = match self.peek() {
            Some(Token::EqEq) => false,
            Some(Token::NotEq) => true,
            _ => return Ok(left),
        };
        self.enter()?;
        let offset = self.offset();
        self.advance();
        let right = self.parse_primary()?;
        self.depth -= 1;
        if left.1 != right.1 {
            return Err(ExprError::new(
                format!("cannot compare {} with {}", left.1, right.1),
                offset,
            ));
        }
        let (l, r) = (Box::new(left.0), Box::new(right.0));
        let expr = if negate { Expr::Ne(l, r) } else { Expr::Eq(l, r) };
        Ok((expr, Type::Bool))
    }

    fn parse_primary(&mut self) -> Result<(Expr, Type), ExprError> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Str(s)) => Ok((Expr::Str(s), Type::Str)),
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.parse_or()?;
                self.expect(Token::RParen)?;
                self.depth -= 1;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    return self.parse_call(&name, offset);
                }
                match name.as_str() {
                    "true" => Ok((Expr::Bool(true), Type::Bool)),
                    "false" => Ok((Expr::Bool(false), Type::Bool)),
                    _ => Var::from_name(&name)
                        .map(|var| (Expr::Var(var), Type::Str))
                        .ok_or_else(|| {
                            ExprError::new(
                                format!(
                                    "unknown variable '{}' (expected 'filename' or 'heading')",
                                    name
                                ),
                                offset,
                            )
                        }),
                }
            }
            Some(token) => Err(ExprError::new(
                format!("unexpected {}", describe(&token)),
                offset,
            )),
            None => Err(ExprError::new("unexpected end of expression", offset)),
        }
    }

    fn parse_call(&mut self, name: &str, offset: usize) -> Result<(Expr, Type), ExprError> {
        let func = Func::from_name(name)
            .ok_or_else(|| ExprError::new(format!("unknown function '{}'", name), offset))?;
        self.expect(Token::LParen)?;
        self.enter()?;

        let mut args = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                let arg_offset = self.offset();
                let (arg, ty) = self.parse_or()?;
                if ty != Type::Str {
                    return Err(ExprError::new(
                        format!("argument {} of '{}' must be a string", args.len() + 1, name),
                        arg_offset,
                    ));
                }
                args.push(arg);
                if self.peek() == Some(&Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;
        self.depth -= 1;

        if args.len() != func.arity() {
            return Err(ExprError::new(
                format!(
                    "'{}' takes {} argument(s), got {}",
                    name,
                    func.arity(),
                    args.len()
                ),
                offset,
            ));
        }
        Ok((Expr::Call(func, args), func.returns()))
    }
}

fn require_bools(
    op: &str,
    left: &(Expr, Type),
    right: &(Expr, Type),
    offset: usize,
) -> Result<(), ExprError> {
    if left.1 != Type::Bool || right.1 != Type::Bool {
        return Err(ExprError::new(
            format!("'{}' needs boolean operands", op),
            offset,
        ));
    }
    Ok(())
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("'{}'", name),
        Token::Str(s) => format!("string \"{}\"", s),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::Comma => "','".to_string(),
        Token::And => "'&&'".to_string(),
        Token::Or => "'||'".to_string(),
        Token::Not => "'!'".to_string(),
        Token::EqEq => "'=='".to_string(),
        Token::NotEq => "'!='".to_string(),
    }
}
