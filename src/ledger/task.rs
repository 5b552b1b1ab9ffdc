//! Задача доказательства: гипотезы и следствие.

use std::fmt;

use crate::error::{ProofError, ProofResult};
use crate::formula::Formula;
use crate::oracle;

/// Множество гипотез (порядок вставки сохраняется, повторы допустимы)
/// и следствие.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofTask {
    pub hypotheses: Vec<Formula>,
    pub consequence: Formula,
}

impl ProofTask {
    pub fn new(hypotheses: Vec<Formula>, consequence: Formula) -> Self {
        Self {
            hypotheses,
            consequence,
        }
    }

    /// Разобрать тексты формул; любая некорректная формула отвергает задачу.
    pub fn from_texts<S: AsRef<str>>(hypotheses: &[S], consequence: &str) -> ProofResult<Self> {
        let hypotheses = hypotheses
            .iter()
            .map(|h| Formula::parse_checked(h.as_ref()))
            .collect::<ProofResult<Vec<_>>>()?;
        let consequence = Formula::parse_checked(consequence)?;
        Ok(Self::new(hypotheses, consequence))
    }

    /// Обратное к [`fmt::Display`]: `{f1, f2} |- c` или `{ } |- c`.
    pub fn parse_summary(summary: &str) -> ProofResult<Self> {
        let malformed = || ProofError::Construction(format!("malformed task summary '{}'", summary));

        let (left, right) = summary.split_once("|-").ok_or_else(malformed)?;
        let inner = left
            .trim()
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(malformed)?;

        // Запятая не входит в алфавит формул
        let hypotheses: Vec<&str> = inner
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .collect();
        Self::from_texts(&hypotheses, right.trim())
    }

    /// Является ли формула одной из гипотез.
    pub fn is_hypothesis(&self, formula: &Formula) -> bool {
        self.hypotheses.contains(formula)
    }

    /// Формула `~(H1 & ... & Hn & ~C)`: её общезначимость равносильна
    /// выводимости следствия из гипотез.
    ///
    /// Для пустого списка гипотез возвращает `None`.
    pub fn refutation(&self) -> Option<Formula> {
        let mut conjuncts = self.hypotheses.iter().cloned();
        let first = conjuncts.next()?;
        let chain = conjuncts
            .chain(std::iter::once(self.consequence.negated()))
            .fold(first, Formula::and);
        Some(Formula::not(chain))
    }

    /// Проверка выводимости по таблице истинности.
    /// Пустой список гипотез считается выводимым.
    pub fn is_provable(&self) -> bool {
        self.refutation()
            .is_none_or(|formula| oracle::is_tautology_formula(&formula))
    }

    /// Убрать гипотезы-тавтологии; возвращает число удалённых.
    pub fn prune_tautologies(&mut self) -> usize {
        self.prune_tautologies_except(|_| false)
    }

    /// То же, но гипотезы, для которых `keep` истинно, остаются.
    pub fn prune_tautologies_except(&mut self, keep: impl Fn(&Formula) -> bool) -> usize {
        let before = self.hypotheses.len();
        self.hypotheses
            .retain(|h| keep(h) || !oracle::is_tautology_formula(h));
        before - self.hypotheses.len()
    }
}

impl fmt::Display for ProofTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hypotheses.is_empty() {
            return write!(f, "{{ }} |- {}", self.consequence);
        }
        write!(f, "{{")?;
        for (i, hypothesis) in self.hypotheses.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", hypothesis)?;
        }
        write!(f, "}} |- {}", self.consequence)
    }
}
