//! Recursive-descent parser for single coefficient or order values such as `c_α*c_γ/c_β`
//! or `α+γ-β`. Whole equations are never parsed; they are assembled from terms.

use crate::error::ModelError;
use crate::expr::Expr;
use std::iter::Peekable;
use std::str::Chars;

/// Parses a string value into an AST.
pub fn parse(input: &str) -> Result<Expr, ModelError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ModelError::Parse("empty input".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expression()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ModelError::Parse(format!("unexpected trailing {token:?}"))),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ModelError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut num_str = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    num_str.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            if let Some(&e) = chars.peek() {
                if (e == 'e' || e == 'E') && has_exponent_digits(&chars) {
                    num_str.push(e);
                    chars.next();
                    if let Some(&sign) = chars.peek() {
                        if sign == '+' || sign == '-' {
                            num_str.push(sign);
                            chars.next();
                        }
                    }
                    while let Some(&d) = chars.peek() {
                        if d.is_ascii_digit() {
                            num_str.push(d);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }
            }
            let value = num_str
                .parse()
                .map_err(|_| ModelError::Parse(format!("invalid number '{num_str}'")))?;
            tokens.push(Token::Number(value));
        } else if c.is_alphabetic() || c == '_' {
            let mut ident = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_alphanumeric() || d == '_' {
                    ident.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Identifier(ident));
        } else {
            let token = match c {
                '+' => Token::Plus,
                '-' | '−' => Token::Minus,
                '*' | '·' => Token::Star,
                '/' => Token::Slash,
                '^' => Token::Caret,
                '(' => Token::LParen,
                ')' => Token::RParen,
                _ => return Err(ModelError::Parse(format!("unexpected character '{c}'"))),
            };
            tokens.push(token);
            chars.next();
        }
    }
    Ok(tokens)
}

// Looks past an `e`/`E` for `[+-]?digit`, so `2e` followed by a name stays a product.
fn has_exponent_digits(chars: &Peekable<Chars<'_>>) -> bool {
    let mut ahead = chars.clone();
    ahead.next();
    match ahead.next() {
        Some(d) if d.is_ascii_digit() => true,
        Some('+') | Some('-') => ahead.next().is_some_and(|d| d.is_ascii_digit()),
        _ => false,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> Result<Expr, ModelError> {
        let mut left = self.parse_product()?;

        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => '+',
                Token::Minus => '-',
                _ => break,
            };
            self.consume();
            let right = self.parse_product()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_product(&mut self) -> Result<Expr, ModelError> {
        let mut left = self.parse_unary()?;

        while let Some(token) = self.peek() {
            let op = match token {
                Token::Star => '*',
                Token::Slash => '/',
                _ => break,
            };
            self.consume();
            let right = self.parse_unary()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ModelError> {
        if let Some(Token::Minus) = self.peek() {
            self.consume();
            let expr = self.parse_unary()?;
            return Ok(match expr {
                Expr::Number(n) => Expr::Number(-n),
                other => Expr::Unary('-', Box::new(other)),
            });
        }
        self.parse_power()
    }

    // Right-associative: a^b^c == a^(b^c).
    fn parse_power(&mut self) -> Result<Expr, ModelError> {
        let base = self.parse_primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.consume();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(Box::new(base), '^', Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ModelError> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Identifier(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.consume(); // eat '('
                    let arg = self.parse_expression()?;
                    self.expect_close()?;
                    Ok(Expr::Call(name, vec![arg]))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            Some(Token::LParen) => {
                let expr = self.parse_expression()?;
                self.expect_close()?;
                Ok(expr)
            }
            Some(token) => Err(ModelError::Parse(format!("unexpected {token:?}"))),
            None => Err(ModelError::Parse("unexpected end of input".to_string())),
        }
    }

    fn expect_close(&mut self) -> Result<(), ModelError> {
        match self.consume() {
            Some(Token::RParen) => Ok(()),
            _ => Err(ModelError::Parse("expected ')'".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{difference, power, product, quotient, sum};

    #[test]
    fn parses_symbolic_order() {
        let expr = parse("α+γ-β").expect("parse");
        let expected = difference(
            sum(Expr::var("α"), Expr::var("γ")),
            Expr::var("β"),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn parses_coefficient_with_precedence() {
        let expr = parse("c_a * c_g / c_b + 2").expect("parse");
        let expected = sum(
            quotient(product(Expr::var("c_a"), Expr::var("c_g")), Expr::var("c_b")),
            Expr::Number(2.0),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_unary_minus() {
        let expr = parse("-s^a^b").expect("parse");
        let expected = Expr::Unary(
            '-',
            Box::new(power(Expr::var("s"), power(Expr::var("a"), Expr::var("b")))),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn negative_literals_fold_into_numbers() {
        assert_eq!(parse("-2").expect("parse"), Expr::Number(-2.0));
        assert_eq!(parse("0.5").expect("parse"), Expr::Number(0.5));
    }

    #[test]
    fn accepts_scientific_notation() {
        assert_eq!(parse("2.5e9").expect("parse"), Expr::Number(2.5e9));
        assert_eq!(parse("1E-3").expect("parse"), Expr::Number(1e-3));
        assert_eq!(parse("4e+2").expect("parse"), Expr::Number(400.0));
        assert_eq!(
            parse("2.5e9*η").expect("parse"),
            product(Expr::Number(2.5e9), Expr::var("η"))
        );
        // Without exponent digits the `e` stays an identifier.
        assert!(matches!(parse("2e"), Err(ModelError::Parse(_))));
    }

    #[test]
    fn parses_single_argument_calls() {
        let expr = parse("exp(-t)").expect("parse");
        assert_eq!(
            expr,
            Expr::Call(
                "exp".to_string(),
                vec![Expr::Unary('-', Box::new(Expr::var("t")))]
            )
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(parse("1 +"), Err(ModelError::Parse(_))));
        assert!(matches!(parse("(a"), Err(ModelError::Parse(_))));
        assert!(matches!(parse("a b"), Err(ModelError::Parse(_))));
        assert!(matches!(parse("a $ b"), Err(ModelError::Parse(_))));
        assert!(matches!(parse("1.2.3"), Err(ModelError::Parse(_))));
        assert!(matches!(parse("   "), Err(ModelError::Parse(_))));
    }
}
