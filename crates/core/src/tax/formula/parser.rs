//! Recursive-descent parser over lexer tokens.

use std::ops::Range;
use std::str::FromStr;

use rust_decimal::Decimal;

use super::Expr;
use super::lexer::{Token, tokenize};
use crate::tax::field::FieldCode;

type ParseResult<T> = Result<T, String>;

/// Parses formula text into an expression tree.
pub(super) fn parse(source: &str) -> ParseResult<Expr> {
    let tokens = tokenize(source)
        .map_err(|span| format!("unexpected character at {}..{}", span.start, span.end))?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some((token, span)) => Err(format!("unexpected '{token}' at {}", span.start)),
    }
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> Option<&(Token<'src>, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token<'src>> {
        let token = self.tokens.get(self.pos).map(|(token, _)| *token);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: Token<'src>) -> bool {
        if self.peek().is_some_and(|(token, _)| *token == expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token<'src>) -> ParseResult<()> {
        if self.eat(expected) {
            return Ok(());
        }
        match self.peek() {
            Some((token, span)) => Err(format!(
                "expected '{expected}', found '{token}' at {}",
                span.start
            )),
            None => Err(format!("expected '{expected}', found end of formula")),
        }
    }

    fn expr(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            if self.eat(Token::Plus) {
                lhs = Expr::Add(Box::new(lhs), Box::new(self.term()?));
            } else if self.eat(Token::Minus) {
                lhs = Expr::Sub(Box::new(lhs), Box::new(self.term()?));
            } else {
                return Ok(lhs);
            }
        }
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.factor()?;
        while self.eat(Token::Star) {
            lhs = Expr::Mul(Box::new(lhs), Box::new(self.factor()?));
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        match self.next() {
            Some(Token::Number(text)) => Decimal::from_str(text)
                .map(Expr::Constant)
                .map_err(|e| format!("invalid number '{text}': {e}")),
            Some(Token::Field(digits)) => FieldCode::parse(digits)
                .map(Expr::Field)
                .map_err(|e| e.to_string()),
            Some(Token::Minus) => Ok(Expr::Neg(Box::new(self.factor()?))),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Greatest) => {
                self.expect(Token::LParen)?;
                let mut args = vec![self.expr()?];
                while self.eat(Token::Comma) {
                    args.push(self.expr()?);
                }
                self.expect(Token::RParen)?;
                Ok(Expr::Greatest(args))
            }
            Some(token) => Err(format!("unexpected '{token}'")),
            None => Err("unexpected end of formula".to_string()),
        }
    }
}
