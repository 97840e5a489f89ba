//! Turns a textual expression into a symbolic expression tree.
//!
//! Two passes: a tokenizer that validates the character set, recognizes the
//! function vocabulary and inserts implicit multiplication (`2x` -> `2*x`,
//! `xy` -> `x*y`, `2(x+1)` -> `2*(x+1)`), and a recursive-descent parser with
//! the precedence ladder `+ -` < `* /` < unary `-` < `^` (right-associative).
//!
//! Parsing is deterministic and total over its result type: malformed input
//! is a typed [`ParseError`], never a substituted default expression.

use crate::errors::ParseError;
use crate::symbolic::symbolic_engine::Expr;

/// The closed function vocabulary. Anything else before a `(` is rejected.
const FUNCTIONS: [&str; 13] = [
    "sin", "cos", "tan", "sec", "csc", "cot", "exp", "log", "log10", "sqrt", "abs", "floor",
    "ceil",
];

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Num(f64),
    Var(String),
    Func(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

/// Parses a textual expression over the variables `x` and `y`.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    let tokens = tokenize(trimmed)?;
    let tokens = insert_implicit_multiplication(tokens);
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(ParseError::Malformed(format!(
            "unexpected trailing {}",
            describe(tok)
        ))),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' | '\r' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ParseError::Malformed(format!("invalid number '{}'", literal)))?;
                tokens.push(Token::Num(value));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphabetic() || chars[i].is_ascii_digit())
                {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                let next_is_paren = chars[i..].iter().find(|c| !c.is_whitespace()) == Some(&'(');
                tokenize_word(&word, next_is_paren, &mut tokens)?;
            }
            other => return Err(ParseError::InvalidCharacter(other)),
        }
    }
    Ok(tokens)
}

/// Splits a letter run into variables and an optional trailing function name.
/// `xy` -> x, y; `xsin` before `(` -> x, sin; `sin` before `(` -> sin.
fn tokenize_word(word: &str, followed_by_paren: bool, tokens: &mut Vec<Token>) -> Result<(), ParseError> {
    let mut rest = word;
    loop {
        if rest.is_empty() {
            return Ok(());
        }
        if followed_by_paren && FUNCTIONS.contains(&rest) {
            tokens.push(Token::Func(rest.to_string()));
            return Ok(());
        }
        let first = &rest[..1];
        if first == "x" || first == "y" {
            tokens.push(Token::Var(first.to_string()));
            rest = &rest[1..];
            continue;
        }
        // Not a variable prefix: the remainder is either a function used
        // without parentheses or an unsupported symbol.
        return if FUNCTIONS.contains(&rest) {
            Err(ParseError::Malformed(format!(
                "function '{}' must be followed by parentheses",
                rest
            )))
        } else if followed_by_paren {
            Err(ParseError::UnknownFunction(rest.to_string()))
        } else {
            Err(ParseError::UnknownVariable(rest.to_string()))
        };
    }
}

/// Inserts `*` between adjacent tokens that denote multiplication by
/// juxtaposition: `2x`, `x y`, `3(x+1)`, `(x+1)(y-1)`, `2sin(x)`.
fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for tok in tokens {
        let implied = matches!(
            out.last(),
            Some(Token::Num(_)) | Some(Token::Var(_)) | Some(Token::RParen)
        ) && matches!(
            tok,
            Token::Num(_) | Token::Var(_) | Token::Func(_) | Token::LParen
        );
        if implied {
            out.push(Token::Star);
        }
        out.push(tok);
    }
    out
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    let rhs = self.parse_term()?;
                    lhs = Expr::Add(lhs.boxed(), rhs.boxed());
                }
                Some(Token::Minus) => {
                    self.advance();
                    let rhs = self.parse_term()?;
                    lhs = Expr::Sub(lhs.boxed(), rhs.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    // term := unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    lhs = Expr::Mul(lhs.boxed(), rhs.boxed());
                }
                Some(Token::Slash) => {
                    self.advance();
                    let rhs = self.parse_unary()?;
                    lhs = Expr::Div(lhs.boxed(), rhs.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    // unary := '-' unary | '+' unary | power
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                let inner = self.parse_unary()?;
                Ok(Expr::Mul(Expr::Const(-1.0).boxed(), inner.boxed()))
            }
            Some(Token::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    // power := atom ('^' unary)?   -- right-associative, exponent may carry
    // a unary minus so that x^-2 parses.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_atom()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            let exponent = self.parse_unary()?;
            return Ok(Expr::Pow(base.boxed(), exponent.boxed()));
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Some(Token::Num(value)) => Ok(Expr::Const(value)),
            Some(Token::Var(name)) => Ok(Expr::Var(name)),
            Some(Token::Func(name)) => {
                self.expect_lparen(&name)?;
                let arg = self.parse_expr()?;
                match self.advance() {
                    Some(Token::RParen) => apply_function(&name, arg),
                    Some(Token::Comma) => Err(ParseError::Malformed(format!(
                        "function '{}' takes a single argument",
                        name
                    ))),
                    _ => Err(ParseError::Malformed(format!(
                        "unbalanced parentheses in '{}(...)'",
                        name
                    ))),
                }
            }
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(ParseError::Malformed("unbalanced parentheses".to_string())),
                }
            }
            Some(tok) => Err(ParseError::Malformed(format!(
                "expected an operand, found {}",
                describe(&tok)
            ))),
            None => Err(ParseError::Malformed("missing operand".to_string())),
        }
    }

    fn expect_lparen(&mut self, func: &str) -> Result<(), ParseError> {
        match self.advance() {
            Some(Token::LParen) => Ok(()),
            _ => Err(ParseError::Malformed(format!(
                "function '{}' must be followed by parentheses",
                func
            ))),
        }
    }
}

fn apply_function(name: &str, arg: Expr) -> Result<Expr, ParseError> {
    let arg = arg.boxed();
    let expr = match name {
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" => Expr::tan(arg),
        "sec" => Expr::sec(arg),
        "csc" => Expr::csc(arg),
        "cot" => Expr::cot(arg),
        "exp" => Expr::Exp(arg),
        "log" => Expr::Ln(arg),
        "log10" => Expr::Log10(arg),
        "sqrt" => Expr::Sqrt(arg),
        "abs" => Expr::Abs(arg),
        "floor" => Expr::Floor(arg),
        "ceil" => Expr::Ceil(arg),
        other => return Err(ParseError::UnknownFunction(other.to_string())),
    };
    Ok(expr)
}

fn describe(tok: &Token) -> String {
    match tok {
        Token::Num(v) => format!("number '{}'", v),
        Token::Var(name) => format!("variable '{}'", name),
        Token::Func(name) => format!("function '{}'", name),
        Token::Plus => "'+'".to_string(),
        Token::Minus => "'-'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Slash => "'/'".to_string(),
        Token::Caret => "'^'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::Comma => "','".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression("x + 2").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_power() {
        let expr = parse_expression("x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_expression("x^2^3").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Pow(
                    Box::new(Expr::Const(2.0)),
                    Box::new(Expr::Const(3.0))
                ))
            )
        );
    }

    #[test]
    fn test_negative_exponent() {
        let expr = parse_expression("x^-2").unwrap();
        let f = expr.lambdify2d();
        assert!((f.call(2.0, 0.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_unary_minus_binds_below_power() {
        // -x^2 must be -(x^2), not (-x)^2
        let expr = parse_expression("-x^2").unwrap();
        let f = expr.lambdify2d();
        assert_eq!(f.call(3.0, 0.0), -9.0);
    }

    #[test]
    fn test_precedence_mul_over_add() {
        let f = parse_expression("2 + 3*4").unwrap().lambdify2d();
        assert_eq!(f.call(0.0, 0.0), 14.0);
    }

    #[test]
    fn test_implicit_multiplication_number_variable() {
        let expr = parse_expression("2x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(2.0)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }

    #[test]
    fn test_implicit_multiplication_adjacent_variables() {
        let expr = parse_expression("xy").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Var("y".to_string()))
            )
        );
    }

    #[test]
    fn test_implicit_multiplication_with_brackets_and_functions() {
        let f = parse_expression("2(x+1)(y-1)").unwrap().lambdify2d();
        assert_eq!(f.call(2.0, 3.0), 12.0);
        let g = parse_expression("x sin(y)").unwrap().lambdify2d();
        assert!((g.call(2.0, 0.0)).abs() < 1e-12);
        // "xsin(y)" splits into x * sin(y)
        let h = parse_expression("xsin(y)").unwrap().lambdify2d();
        assert!((h.call(2.0, std::f64::consts::FRAC_PI_2) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_functions() {
        let expr = parse_expression("log(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
        let expr = parse_expression("log10(x)").unwrap();
        assert_eq!(expr, Expr::Log10(Box::new(Expr::Var("x".to_string()))));
        let expr = parse_expression("sin(cos(x))").unwrap();
        assert_eq!(
            expr,
            Expr::sin(Box::new(Expr::cos(Box::new(Expr::Var("x".to_string())))))
        );
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(parse_expression(""), Err(ParseError::EmptyExpression));
        assert_eq!(parse_expression("   "), Err(ParseError::EmptyExpression));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            parse_expression("x^2 + ; y^2"),
            Err(ParseError::InvalidCharacter(';'))
        );
        assert_eq!(
            parse_expression("x = y"),
            Err(ParseError::InvalidCharacter('='))
        );
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            parse_expression("sinh(x)"),
            Err(ParseError::UnknownFunction("sinh".to_string()))
        );
    }

    #[test]
    fn test_unknown_variable() {
        assert_eq!(
            parse_expression("x + z"),
            Err(ParseError::UnknownVariable("z".to_string()))
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(parse_expression("(x + y").is_err());
        assert!(parse_expression("sin(x").is_err());
        assert!(parse_expression("x + y)").is_err());
    }

    #[test]
    fn test_missing_operand() {
        assert!(parse_expression("x +").is_err());
        assert!(parse_expression("* x").is_err());
        assert!(parse_expression("x ^").is_err());
    }

    #[test]
    fn test_comma_is_rejected_by_grammar() {
        assert!(parse_expression("sin(x, y)").is_err());
        assert!(parse_expression("1,5").is_err());
    }

    #[test]
    fn test_function_without_parentheses() {
        let err = parse_expression("sin x").unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn test_malformed_number() {
        assert!(parse_expression("1.2.3").is_err());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let a = parse_expression("x^2.3 * log(x + y + y^2.6)").unwrap();
        let b = parse_expression("x^2.3 * log(x + y + y^2.6)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_whitespace_insensitive() {
        let a = parse_expression("x^2+y^2").unwrap();
        let b = parse_expression("  x ^ 2  +  y ^ 2 ").unwrap();
        assert_eq!(a, b);
    }
}
