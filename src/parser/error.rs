//! Ошибки парсера формул.

use super::token::{Span, Token};
use crate::error::ProofError;
use thiserror::Error;

/// Ошибка разбора формулы.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// Пустая строка там, где нужна формула.
    #[error("Empty formula")]
    Empty,

    /// Неожиданный токен.
    #[error("Unexpected token at position {}: expected {expected}, found {found}", span.start)]
    UnexpectedToken {
        span: Span,
        expected: String,
        found: String,
    },

    /// Неожиданный конец ввода.
    #[error("Unexpected end of input at position {}: {message}", span.start)]
    UnexpectedEof { span: Span, message: String },

    /// Незакрытая скобка.
    #[error("Unclosed parenthesis at position {}", span.start)]
    UnclosedParen { span: Span },

    /// Недопустимый символ или последовательность.
    #[error("Lexer error at position {}: unexpected character", span.start)]
    LexerError { span: Span },

    /// Скобки не соответствуют бинарным связкам.
    #[error("Inconsistent bracketing in '{0}'")]
    Brackets(String),
}

impl FormulaError {
    /// Создать ошибку "неожиданный токен".
    pub fn unexpected_token(span: Span, expected: impl Into<String>, found: &Token) -> Self {
        Self::UnexpectedToken {
            span,
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// Создать ошибку "неожиданный конец".
    pub fn unexpected_eof(span: Span, message: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            span,
            message: message.into(),
        }
    }

    /// Перевести в ошибку ядра, сохранив исходный текст.
    pub fn into_proof_error(self, text: &str) -> ProofError {
        log::trace!("rejected formula '{}': {}", text, self);
        ProofError::InvalidFormula(text.to_string())
    }
}
