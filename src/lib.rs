//! # Hilbert Prover
//!
//! Ядро построения доказательств в исчислении высказываний в стиле Гильберта.
//!
//! ## Основные модули
//!
//! - [`formula`] - Формулы и их каноническая запись
//! - [`parser`] - Лексер и парсер текстовой записи
//! - [`validator`] - Проверка корректности и скобок
//! - [`oracle`] - Оракул тавтологий (таблицы истинности)
//! - [`rules`] - Пять синтаксических правил вывода
//! - [`axioms`] - Схемы аксиом и подстановка
//! - [`ledger`] - Леджер доказательства и его инварианты
//! - [`solver`] - Автоматический решатель
//!
//! ## Внешние оболочки
//!
//! - [`generator`] - Генератор случайных задач
//! - [`store`] - Сохранение снимков леджера в JSON
//!
//! ## Пример
//!
//! ```rust,ignore
//! use hilbert_prover::{solve, AxiomSet, Ledger};
//!
//! let mut ledger = Ledger::new(&["(A >> B)", "(B >> C)"], "(A >> C)", AxiomSet::standard()?)?;
//! let proof = solve(&mut ledger)?;
//! for line in &proof.lines {
//!     println!("{}", line);
//! }
//! // 1. (A >> B) [HYP]
//! // 2. (B >> C) [HYP]
//! // 3. (A >> C) [CS(1,2)]
//! ```

// === Ядро ===
pub mod axioms;
pub mod error;
pub mod formula;
pub mod ledger;
pub mod oracle;
pub mod parser;
pub mod rules;
pub mod solver;
pub mod validator;

// === Внешние оболочки ===
pub mod generator;
pub mod store;

// === Re-exports для удобства ===
pub use axioms::{Axiom, AxiomSet, Instance, STANDARD_AXIOMS};
pub use error::{ProofError, ProofResult};
pub use formula::{Formula, Valuation, ALPHABET};
pub use ledger::{Action, AxiomPool, AxiomUse, Hint, Ledger, ProofTask, Provenance, Snapshot, Step};
pub use oracle::{is_tautology, TruthTable};
pub use rules::Rule;
pub use solver::{solve, Proof, Solver, SolverConfig};
pub use validator::{canonicalize, check_brackets, is_valid};
