//! Логические формулы: дерево разбора и каноническая текстовая форма.
//!
//! Формула строится над связками `>>` (импликация), `|` (дизъюнкция),
//! `&` (конъюнкция), `~` (отрицание) и однобуквенными переменными из
//! фиксированного алфавита [`ALPHABET`].
//!
//! Каноническая запись: ровно по одному пробелу вокруг бинарной связки,
//! каждая бинарная подформула в скобках, отрицание скобок не получает.
//! Две формулы равны тогда и только тогда, когда равны их канонические записи.
//!
//! ```rust,ignore
//! use hilbert_prover::Formula;
//!
//! let f: Formula = "(A>>~B)".parse().unwrap();
//! assert_eq!(f.to_string(), "(A >> ~B)");
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ProofError;
use crate::parser::{self, FormulaError};

/// Допустимые пропозициональные переменные.
pub const ALPHABET: &str = "ABCDFGHJKLMWRTZU";

/// Позиция переменной в алфавите.
pub fn alphabet_index(c: char) -> Option<usize> {
    ALPHABET.chars().position(|v| v == c)
}

/// Логическая формула.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Formula {
    Var(char),
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
}

impl Formula {
    // === Конструкторы ===

    pub fn var(c: char) -> Self {
        Formula::Var(c)
    }

    pub fn not(f: Formula) -> Self {
        Formula::Not(Box::new(f))
    }

    pub fn and(a: Formula, b: Formula) -> Self {
        Formula::And(Box::new(a), Box::new(b))
    }

    pub fn or(a: Formula, b: Formula) -> Self {
        Formula::Or(Box::new(a), Box::new(b))
    }

    pub fn implies(a: Formula, b: Formula) -> Self {
        Formula::Implies(Box::new(a), Box::new(b))
    }

    /// Разобрать формулу в строгом режиме: непустая, грамматически корректная,
    /// с согласованными скобками.
    pub fn parse(text: &str) -> Result<Formula, FormulaError> {
        parser::parse_strict(text)
    }

    /// То же, что [`Formula::parse`], но с ошибкой ядра.
    pub fn parse_checked(text: &str) -> Result<Formula, ProofError> {
        Self::parse(text).map_err(|e| e.into_proof_error(text))
    }

    /// Отрицание копии формулы.
    pub fn negated(&self) -> Formula {
        Formula::not(self.clone())
    }

    // === Структурные запросы ===

    /// Бинарная связка на верхнем уровне?
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Formula::And(..) | Formula::Or(..) | Formula::Implies(..)
        )
    }

    pub fn as_negation(&self) -> Option<&Formula> {
        match self {
            Formula::Not(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_implication(&self) -> Option<(&Formula, &Formula)> {
        match self {
            Formula::Implies(a, b) => Some((a, b)),
            _ => None,
        }
    }

    pub fn as_disjunction(&self) -> Option<(&Formula, &Formula)> {
        match self {
            Formula::Or(a, b) => Some((a, b)),
            _ => None,
        }
    }

    /// Переменные формулы в алфавитном порядке.
    pub fn variables(&self) -> BTreeSet<char> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<char>) {
        match self {
            Formula::Var(c) => {
                vars.insert(*c);
            }
            Formula::Not(inner) => inner.collect_variables(vars),
            Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) => {
                a.collect_variables(vars);
                b.collect_variables(vars);
            }
        }
    }

    /// Длина канонической записи без её построения.
    pub fn text_len(&self) -> usize {
        match self {
            Formula::Var(_) => 1,
            Formula::Not(inner) => 1 + inner.text_len(),
            // "(" a " & " b ")"
            Formula::And(a, b) | Formula::Or(a, b) => 5 + a.text_len() + b.text_len(),
            // "(" a " >> " b ")"
            Formula::Implies(a, b) => 6 + a.text_len() + b.text_len(),
        }
    }

    /// Значение формулы при данной интерпретации.
    pub fn eval(&self, valuation: &Valuation) -> bool {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || match self {
            Formula::Var(c) => valuation.get(*c),
            Formula::Not(inner) => !inner.eval(valuation),
            Formula::And(a, b) => a.eval(valuation) && b.eval(valuation),
            Formula::Or(a, b) => a.eval(valuation) || b.eval(valuation),
            Formula::Implies(a, b) => !a.eval(valuation) || b.eval(valuation),
        })
    }

    /// Одновременная подстановка: каждое вхождение связанной переменной
    /// заменяется своей формулой за один проход, без повторной подстановки.
    pub fn substitute(&self, bindings: &BTreeMap<char, Formula>) -> Formula {
        match self {
            Formula::Var(c) => bindings
                .get(c)
                .cloned()
                .unwrap_or_else(|| Formula::Var(*c)),
            Formula::Not(inner) => Formula::not(inner.substitute(bindings)),
            Formula::And(a, b) => Formula::and(a.substitute(bindings), b.substitute(bindings)),
            Formula::Or(a, b) => Formula::or(a.substitute(bindings), b.substitute(bindings)),
            Formula::Implies(a, b) => {
                Formula::implies(a.substitute(bindings), b.substitute(bindings))
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Var(c) => write!(f, "{}", c),
            Formula::Not(inner) => write!(f, "~{}", inner),
            Formula::And(a, b) => write!(f, "({} & {})", a, b),
            Formula::Or(a, b) => write!(f, "({} | {})", a, b),
            Formula::Implies(a, b) => write!(f, "({} >> {})", a, b),
        }
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

/// Интерпретация переменных: бит на каждую букву алфавита.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Valuation(u32);

impl Valuation {
    /// Интерпретация, где все переменные ложны.
    pub fn new() -> Self {
        Self::default()
    }

    /// Значение переменной (вне алфавита ложь).
    pub fn get(&self, c: char) -> bool {
        alphabet_index(c).is_some_and(|i| self.0 & (1 << i) != 0)
    }

    /// Установить значение переменной.
    pub fn set(&mut self, c: char, value: bool) {
        if let Some(i) = alphabet_index(c) {
            if value {
                self.0 |= 1 << i;
            } else {
                self.0 &= !(1 << i);
            }
        }
    }
}
