//! Парсер формул с приоритетами связок.
//!
//! Грамматика (от слабой связки к сильной):
//!
//! ```text
//! implies := or ( ">>" implies )?          ; правоассоциативна
//! or      := and ( "|" and )*
//! and     := unary ( "&" unary )*
//! unary   := "~" unary | primary
//! primary := VAR | "(" implies ")"
//! ```
//!
//! Параллельно разбору парсер проверяет расстановку скобок: каждая
//! бинарная подформула обёрнута ровно одной парой скобок, остальные
//! подформулы не обёрнуты вовсе.

use super::error::FormulaError;
use super::lexer::Lexer;
use super::token::{Span, Token};
use crate::formula::Formula;

/// Результат разбора: формула и признак согласованных скобок.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub formula: Formula,
    pub well_bracketed: bool,
}

/// Подформула вместе с числом охватывающих её пар скобок.
struct Node {
    formula: Formula,
    wraps: u32,
}

/// Парсер формул.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    well_bracketed: bool,
}

impl<'a> Parser<'a> {
    /// Создать новый парсер.
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            well_bracketed: true,
        }
    }

    /// Разобрать весь ввод как одну формулу.
    pub fn parse(mut self) -> Result<Parsed, FormulaError> {
        if matches!(self.lexer.peek_token()?.value, Token::Eof) {
            return Err(FormulaError::Empty);
        }

        let root = self.parse_implies()?;
        self.settle(&root);

        let token = self.lexer.next_token()?;
        if token.value != Token::Eof {
            return Err(FormulaError::unexpected_token(
                token.span,
                "end of formula",
                &token.value,
            ));
        }

        Ok(Parsed {
            formula: root.formula,
            well_bracketed: self.well_bracketed,
        })
    }

    /// Проверить скобки подформулы, ставшей операндом (или корнем).
    fn settle(&mut self, node: &Node) {
        let expected = u32::from(node.formula.is_binary());
        if node.wraps != expected {
            self.well_bracketed = false;
        }
    }

    fn parse_implies(&mut self) -> Result<Node, FormulaError> {
        let lhs = self.parse_or()?;
        if self.lexer.peek_token()?.value != Token::Implies {
            return Ok(lhs);
        }
        self.lexer.next_token()?;
        let rhs = self.parse_implies()?;
        Ok(self.binary(lhs, rhs, Formula::implies))
    }

    fn parse_or(&mut self) -> Result<Node, FormulaError> {
        let mut lhs = self.parse_and()?;
        while self.lexer.peek_token()?.value == Token::Or {
            self.lexer.next_token()?;
            let rhs = self.parse_and()?;
            lhs = self.binary(lhs, rhs, Formula::or);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Node, FormulaError> {
        let mut lhs = self.parse_unary()?;
        while self.lexer.peek_token()?.value == Token::And {
            self.lexer.next_token()?;
            let rhs = self.parse_unary()?;
            lhs = self.binary(lhs, rhs, Formula::and);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Node, FormulaError> {
        // Глубокие цепочки `~~~…` и вложенные скобки растят стек
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
            if self.lexer.peek_token()?.value == Token::Not {
                self.lexer.next_token()?;
                let operand = self.parse_unary()?;
                self.settle(&operand);
                return Ok(Node {
                    formula: Formula::not(operand.formula),
                    wraps: 0,
                });
            }
            self.parse_primary()
        })
    }

    fn parse_primary(&mut self) -> Result<Node, FormulaError> {
        let token = self.lexer.next_token()?;
        match token.value {
            Token::Var(c) => Ok(Node {
                formula: Formula::var(c),
                wraps: 0,
            }),
            Token::LParen => {
                let inner = self.parse_implies()?;
                self.expect_rparen(token.span)?;
                Ok(Node {
                    formula: inner.formula,
                    wraps: inner.wraps + 1,
                })
            }
            Token::Eof => Err(FormulaError::unexpected_eof(token.span, "expected formula")),
            other => Err(FormulaError::unexpected_token(token.span, "formula", &other)),
        }
    }

    fn expect_rparen(&mut self, open: Span) -> Result<(), FormulaError> {
        let token = self.lexer.next_token()?;
        match token.value {
            Token::RParen => Ok(()),
            Token::Eof => Err(FormulaError::UnclosedParen { span: open }),
            other => Err(FormulaError::unexpected_token(token.span, "')'", &other)),
        }
    }

    fn binary(&mut self, lhs: Node, rhs: Node, build: fn(Formula, Formula) -> Formula) -> Node {
        self.settle(&lhs);
        self.settle(&rhs);
        Node {
            formula: build(lhs.formula, rhs.formula),
            wraps: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Parsed {
        Parser::new(source).parse().unwrap()
    }

    #[test]
    fn test_parse_var() {
        let parsed = parse("A");
        assert_eq!(parsed.formula, Formula::var('A'));
        assert!(parsed.well_bracketed);
    }

    #[test]
    fn test_parse_precedence() {
        // ~ сильнее &, & сильнее |, | сильнее >>
        let parsed = parse("~A & B | C >> D");
        assert_eq!(parsed.formula.to_string(), "(((~A & B) | C) >> D)");
        assert!(!parsed.well_bracketed);
    }

    #[test]
    fn test_implication_is_right_associative() {
        let parsed = parse("A >> B >> C");
        assert_eq!(parsed.formula.to_string(), "(A >> (B >> C))");
    }

    #[test]
    fn test_bracket_shape() {
        assert!(parse("(A >> (B >> A))").well_bracketed);
        assert!(parse("~(A | ~B)").well_bracketed);
        assert!(parse("~~A").well_bracketed);
        assert!(!parse("(A)").well_bracketed);
        assert!(!parse("((A >> B))").well_bracketed);
        assert!(!parse("(~A) >> B").well_bracketed);
        assert!(!parse("(A & B) >> C").well_bracketed);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Parser::new("").parse(), Err(FormulaError::Empty)));
        assert!(matches!(
            Parser::new("(A >> B").parse(),
            Err(FormulaError::UnclosedParen { .. })
        ));
        assert!(matches!(
            Parser::new("A B").parse(),
            Err(FormulaError::UnexpectedToken { .. })
        ));
        assert!(Parser::new("A &").parse().is_err());
        assert!(Parser::new("(A && B)").parse().is_err());
        assert!(Parser::new("(A || B)").parse().is_err());
        assert!(Parser::new("A)").parse().is_err());
    }
}
