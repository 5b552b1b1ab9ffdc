//! Синтаксические правила вывода.
//!
//! Каждое правило является чистой функцией над двумя формулами: структурное
//! сопоставление с образцом и извлечение подформулы. Сравнение подформул
//! только синтаксическое (равенство деревьев = равенство канонических записей).
//!
//! | Правило | Операнд 1      | Операнд 2 | Результат  |
//! |---------|----------------|-----------|------------|
//! | MP      | `(A >> B)`     | `A`       | `B`        |
//! | MT      | `(A >> B)`     | `~B`      | `~A`       |
//! | MTP     | `(A \| B)`     | `~A`      | `B`        |
//! | MPT     | `(~A >> ~B)`   | `B`       | `A`        |
//! | CS      | `(A >> B)`, `(B >> C)` в любом порядке | | `(A >> C)` |

use std::fmt;

use crate::error::{ProofError, ProofResult};
use crate::formula::Formula;

/// Правило вывода.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    ModusPonens,
    ModusTollens,
    ModusTollendoPonens,
    ModusPonendoTollens,
    ConditionalSyllogism,
}

impl Rule {
    /// Все правила в порядке приоритета, в котором их пробует решатель.
    pub const ALL: [Rule; 5] = [
        Rule::ModusPonens,
        Rule::ModusTollens,
        Rule::ModusTollendoPonens,
        Rule::ModusPonendoTollens,
        Rule::ConditionalSyllogism,
    ];

    /// Короткое имя для отображения шагов.
    pub fn tag(self) -> &'static str {
        match self {
            Rule::ModusPonens => "MP",
            Rule::ModusTollens => "MT",
            Rule::ModusTollendoPonens => "MTP",
            Rule::ModusPonendoTollens => "MPT",
            Rule::ConditionalSyllogism => "CS",
        }
    }

    /// Правило по короткому имени (регистр не важен).
    pub fn from_tag(tag: &str) -> Option<Rule> {
        Rule::ALL
            .into_iter()
            .find(|rule| rule.tag().eq_ignore_ascii_case(tag))
    }

    /// Применить правило к двум разобранным формулам.
    pub fn apply(self, first: &Formula, second: &Formula) -> ProofResult<Formula> {
        match self {
            Rule::ModusPonens => modus_ponens(first, second),
            Rule::ModusTollens => modus_tollens(first, second),
            Rule::ModusTollendoPonens => modus_tollendo_ponens(first, second),
            Rule::ModusPonendoTollens => modus_ponendo_tollens(first, second),
            Rule::ConditionalSyllogism => conditional_syllogism(first, second),
        }
    }

    /// Применить правило к текстовым формулам.
    ///
    /// Пустые, некорректные и формулы с несогласованными скобками
    /// отвергаются до сопоставления.
    pub fn apply_text(self, first: &str, second: &str) -> ProofResult<Formula> {
        let first = Formula::parse_checked(first)?;
        let second = Formula::parse_checked(second)?;
        self.apply(&first, &second)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Общий входной фильтр правил отделения: оболочка должна быть строго
/// длиннее отделяемой формулы.
fn detachment_guard(rule: Rule, first: &Formula, second: &Formula) -> ProofResult<()> {
    if first.text_len() <= second.text_len() {
        return Err(ProofError::inapplicable(
            rule,
            format!("{} is not longer than {}", first, second),
        ));
    }
    Ok(())
}

/// {A ⊃ B, A} ⊢ B
pub fn modus_ponens(implication: &Formula, detached: &Formula) -> ProofResult<Formula> {
    let rule = Rule::ModusPonens;
    detachment_guard(rule, implication, detached)?;
    let (antecedent, consequent) = implication
        .as_implication()
        .ok_or_else(|| ProofError::inapplicable(rule, format!("{} is not an implication", implication)))?;
    if antecedent != detached {
        return Err(ProofError::inapplicable(
            rule,
            format!("{} is not the antecedent of {}", detached, implication),
        ));
    }
    Ok(consequent.clone())
}

/// {A ⊃ B, ¬B} ⊢ ¬A
pub fn modus_tollens(implication: &Formula, negation: &Formula) -> ProofResult<Formula> {
    let rule = Rule::ModusTollens;
    detachment_guard(rule, implication, negation)?;
    let (antecedent, consequent) = implication
        .as_implication()
        .ok_or_else(|| ProofError::inapplicable(rule, format!("{} is not an implication", implication)))?;
    let denied = negation
        .as_negation()
        .ok_or_else(|| ProofError::inapplicable(rule, format!("{} is not a negation", negation)))?;
    if denied != consequent {
        return Err(ProofError::inapplicable(
            rule,
            format!("{} does not deny the consequent of {}", negation, implication),
        ));
    }
    Ok(antecedent.negated())
}

/// {A ∨ B, ¬A} ⊢ B
pub fn modus_tollendo_ponens(disjunction: &Formula, negation: &Formula) -> ProofResult<Formula> {
    let rule = Rule::ModusTollendoPonens;
    detachment_guard(rule, disjunction, negation)?;
    let (left, right) = disjunction
        .as_disjunction()
        .ok_or_else(|| ProofError::inapplicable(rule, format!("{} is not a disjunction", disjunction)))?;
    let denied = negation
        .as_negation()
        .ok_or_else(|| ProofError::inapplicable(rule, format!("{} is not a negation", negation)))?;
    if denied != left {
        return Err(ProofError::inapplicable(
            rule,
            format!("{} does not deny the left disjunct of {}", negation, disjunction),
        ));
    }
    Ok(right.clone())
}

/// {¬A ⊃ ¬B, B} ⊢ A
pub fn modus_ponendo_tollens(implication: &Formula, detached: &Formula) -> ProofResult<Formula> {
    let rule = Rule::ModusPonendoTollens;
    detachment_guard(rule, implication, detached)?;
    let shape = || ProofError::inapplicable(rule, format!("{} is not of the form (~A >> ~B)", implication));
    let (antecedent, consequent) = implication.as_implication().ok_or_else(shape)?;
    let result = antecedent.as_negation().ok_or_else(shape)?;
    let denied = consequent.as_negation().ok_or_else(shape)?;
    if denied != detached {
        return Err(ProofError::inapplicable(
            rule,
            format!("{} does not match the negated consequent of {}", detached, implication),
        ));
    }
    Ok(result.clone())
}

/// {A ⊃ B, B ⊃ C} ⊢ A ⊃ C, посылки в любом порядке.
pub fn conditional_syllogism(first: &Formula, second: &Formula) -> ProofResult<Formula> {
    let rule = Rule::ConditionalSyllogism;
    let (a1, b1) = first
        .as_implication()
        .ok_or_else(|| ProofError::inapplicable(rule, format!("{} is not an implication", first)))?;
    let (a2, b2) = second
        .as_implication()
        .ok_or_else(|| ProofError::inapplicable(rule, format!("{} is not an implication", second)))?;

    if b1 == a2 {
        return Ok(Formula::implies(a1.clone(), b2.clone()));
    }
    if b2 == a1 {
        return Ok(Formula::implies(a2.clone(), b1.clone()));
    }
    Err(ProofError::inapplicable(
        rule,
        format!("{} and {} share no middle term", first, second),
    ))
}
