//! Модуль разбора текстовой записи формул.
//!
//! # Синтаксис
//!
//! ```text
//! A B C D F G H J K L M W R T Z U   ; переменные
//! ~A                                ; отрицание
//! (A & B)                           ; конъюнкция
//! (A | B)                           ; дизъюнкция
//! (A >> B)                          ; импликация
//! ```
//!
//! Пробелы допускаются между любыми токенами и не несут смысла.
//!
//! # Пример
//!
//! ```rust,ignore
//! use hilbert_prover::parser::{parse_lenient, parse_strict};
//!
//! let parsed = parse_lenient("A & B >> C").unwrap();
//! assert!(!parsed.well_bracketed);
//! assert!(parse_strict("((A & B) >> C)").is_ok());
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::FormulaError;
pub use lexer::{tokenize, Lexer};
pub use parser::{Parsed, Parser};
pub use token::{Span, Spanned, Token};

use crate::formula::Formula;

/// Разобрать формулу по грамматике, не требуя полной расстановки скобок.
pub fn parse_lenient(source: &str) -> Result<Parsed, FormulaError> {
    Parser::new(source).parse()
}

/// Разобрать формулу и потребовать согласованные скобки.
pub fn parse_strict(source: &str) -> Result<Formula, FormulaError> {
    let parsed = parse_lenient(source)?;
    if !parsed.well_bracketed {
        return Err(FormulaError::Brackets(source.to_string()));
    }
    Ok(parsed.formula)
}
