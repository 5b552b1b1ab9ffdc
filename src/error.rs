//! Определения ошибок ядра доказательств.

use crate::rules::Rule;
use thiserror::Error;

/// Основной тип `Result` для библиотеки.
pub type ProofResult<T> = Result<T, ProofError>;

/// Перечисление всех возможных ошибок.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("Invalid formula: '{0}'")]
    InvalidFormula(String),

    #[error("Rule {rule} is not applicable: {reason}")]
    RuleInapplicable { rule: Rule, reason: String },

    #[error("Formula {0} already appears in the proof")]
    DuplicateFormula(String),

    #[error("Step index {index} is out of range (ledger has {len} steps)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot construct ledger: {0}")]
    Construction(String),

    // === Ошибки состояния леджера ===
    #[error("The consequence is already proved, no more steps can be added")]
    Terminated,

    #[error("Formula {0} is not a hypothesis of the task")]
    NotAHypothesis(String),

    #[error("Unknown axiom schema: {0}")]
    UnknownAxiom(String),

    #[error("Schema {schema} has {expected} variables, got {got} substitutions")]
    ArityMismatch {
        schema: String,
        expected: usize,
        got: usize,
    },

    #[error("Formula {0} is not a tautology")]
    NotTautology(String),

    #[error("Axiom {0} is already known")]
    DuplicateAxiom(String),

    // === Ошибки решателя ===
    #[error("Task is not provable")]
    NotProvable,

    #[error("Proof not found within the search bounds")]
    ProofNotFound,

    // === Внешние коллабораторы ===
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ProofError {
    /// Формула уже есть в леджере ("уже доказано").
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ProofError::DuplicateFormula(_))
    }

    /// Обычный отрицательный результат: правило неприменимо.
    pub fn is_inapplicable(&self) -> bool {
        matches!(self, ProofError::RuleInapplicable { .. })
    }

    /// Создать ошибку "правило неприменимо".
    pub fn inapplicable(rule: Rule, reason: impl Into<String>) -> Self {
        ProofError::RuleInapplicable {
            rule,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ProofError {
    fn from(e: serde_json::Error) -> Self {
        ProofError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for ProofError {
    fn from(e: std::io::Error) -> Self {
        ProofError::Io(e.to_string())
    }
}
