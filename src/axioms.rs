//! Схемы аксиом и механизм подстановки.
//!
//! Базовый список аксиом передаётся явным значением [`AxiomSet`] в
//! конструктор леджера. Каждая схема при загрузке проверяется оракулом.
//!
//! Формат файла аксиом:
//!
//! ```json
//! { "axioms": ["(A >> (B >> A))", "(A >> A)"] }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProofError, ProofResult};
use crate::formula::Formula;
use crate::oracle;

/// Встроенный список базовых схем.
pub const STANDARD_AXIOMS: [&str; 14] = [
    "(A >> (B >> A))",
    "((A >> (B >> C)) >> ((A >> B) >> (A >> C)))",
    "((~A >> B) >> ((~A >> ~B) >> A))",
    "(A >> A)",
    "((A >> B) >> ((B >> C) >> (A >> C)))",
    "(A >> ~~A)",
    "(~~A >> A)",
    "((A >> B) >> (~~A >> ~~B))",
    "(A >> (B >> (A & B)))",
    "((A & B) >> A)",
    "((A & B) >> B)",
    "(B >> (A | B))",
    "(A >> (A | B))",
    "((A >> C) >> ((B >> C) >> ((A | B) >> C)))",
];

/// Схема аксиомы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axiom {
    formula: Formula,
    variables: Vec<char>,
}

/// Результат подстановки в схему.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub formula: Formula,
    /// Пары (переменная, подставленная формула) в алфавитном порядке.
    pub bindings: Vec<(char, Formula)>,
}

impl Axiom {
    /// Разобрать схему и убедиться, что она тавтология.
    pub fn new(text: &str) -> ProofResult<Axiom> {
        let formula = Formula::parse_checked(text)?;
        Self::from_formula(formula)
    }

    pub fn from_formula(formula: Formula) -> ProofResult<Axiom> {
        if !oracle::is_tautology_formula(&formula) {
            return Err(ProofError::NotTautology(formula.to_string()));
        }
        let variables = formula.variables().into_iter().collect();
        Ok(Axiom { formula, variables })
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Переменные схемы в алфавитном порядке.
    pub fn variables(&self) -> &[char] {
        &self.variables
    }

    /// Число различных переменных.
    pub fn arity(&self) -> usize {
        self.variables.len()
    }

    /// Подставить формулы вместо переменных (по алфавитному порядку).
    pub fn instantiate(&self, data: &[Formula]) -> ProofResult<Instance> {
        if data.len() != self.variables.len() {
            return Err(ProofError::ArityMismatch {
                schema: self.formula.to_string(),
                expected: self.variables.len(),
                got: data.len(),
            });
        }

        let bindings: Vec<(char, Formula)> = self
            .variables
            .iter()
            .copied()
            .zip(data.iter().cloned())
            .collect();
        let map: BTreeMap<char, Formula> = bindings.iter().cloned().collect();

        Ok(Instance {
            formula: self.formula.substitute(&map),
            bindings,
        })
    }
}

/// Упорядоченный набор схем аксиом.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxiomSet {
    axioms: Vec<Axiom>,
}

/// Файл аксиом на диске.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AxiomFile {
    #[serde(default)]
    axioms: Vec<String>,
}

impl AxiomSet {
    /// Пустой набор.
    pub fn new() -> Self {
        Self::default()
    }

    /// Встроенные схемы [`STANDARD_AXIOMS`]; проверяются так же, как файл аксиом.
    pub fn standard() -> ProofResult<Self> {
        Self::from_texts(STANDARD_AXIOMS)
    }

    /// Построить набор из текстов; любая нетавтология отвергает весь набор.
    pub fn from_texts<I, S>(texts: I) -> ProofResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for text in texts {
            let text = text.as_ref();
            let axiom = Axiom::new(text).map_err(|e| {
                log::warn!("rejected axiom '{}': {}", text, e);
                ProofError::Construction(format!("axiom '{}' rejected: {}", text, e))
            })?;
            set.push(axiom);
        }
        Ok(set)
    }

    /// Разобрать JSON вида `{"axioms": [...]}`.
    pub fn from_json_str(json: &str) -> ProofResult<Self> {
        let file: AxiomFile = serde_json::from_str(json)?;
        Self::from_texts(file.axioms)
    }

    /// Загрузить файл аксиом.
    pub fn from_path(path: &Path) -> ProofResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            ProofError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Сериализовать в формат файла аксиом.
    pub fn to_json(&self) -> ProofResult<String> {
        let file = AxiomFile {
            axioms: self.axioms.iter().map(|a| a.formula.to_string()).collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub(crate) fn push(&mut self, axiom: Axiom) {
        self.axioms.push(axiom);
    }

    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Axiom> {
        self.axioms.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Axiom> {
        self.axioms.iter()
    }

    /// Позиция схемы в наборе.
    pub fn position(&self, formula: &Formula) -> Option<usize> {
        self.axioms.iter().position(|a| &a.formula == formula)
    }

    pub fn contains(&self, formula: &Formula) -> bool {
        self.position(formula).is_some()
    }
}

/// Переменные схемы в алфавитном порядке.
pub fn variables_of(schema: &str) -> ProofResult<Vec<char>> {
    let formula = Formula::parse_checked(schema)?;
    Ok(formula.variables().into_iter().collect())
}

/// Текстовая подстановка: схема и данные проверяются как формулы леджера.
///
/// Схема здесь не обязана быть тавтологией; это проверяется при
/// добавлении схемы в набор.
pub fn substitute<S: AsRef<str>>(schema: &str, data: &[S]) -> ProofResult<Instance> {
    let formula = Formula::parse_checked(schema)?;
    let data = data
        .iter()
        .map(|d| Formula::parse_checked(d.as_ref()))
        .collect::<ProofResult<Vec<_>>>()?;

    let variables: Vec<char> = formula.variables().into_iter().collect();
    Axiom { formula, variables }.instantiate(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_axioms_are_tautologies() {
        let set = AxiomSet::standard().unwrap();
        assert_eq!(set.len(), STANDARD_AXIOMS.len());
        assert_eq!(set.get(0).unwrap().formula().to_string(), "(A >> (B >> A))");
        assert_eq!(set, AxiomSet::from_texts(STANDARD_AXIOMS).unwrap());
    }

    #[test]
    fn test_broken_schema_rejects_whole_list() {
        let mut texts = STANDARD_AXIOMS.to_vec();
        texts[3] = "(A >> B)";
        assert!(matches!(
            AxiomSet::from_texts(texts),
            Err(ProofError::Construction(_))
        ));
    }

    #[test]
    fn test_variables_of() {
        assert_eq!(
            variables_of("((C >> A) >> (B >> C))").unwrap(),
            vec!['A', 'B', 'C']
        );
        assert!(variables_of("(A >> ").is_err());
    }

    #[test]
    fn test_substitute() {
        let instance = substitute("(A >> (B >> A))", &["(C >> D)", "~A"]).unwrap();
        assert_eq!(instance.formula.to_string(), "((C >> D) >> (~A >> (C >> D)))");
        assert_eq!(instance.bindings[0].0, 'A');
        assert_eq!(instance.bindings[1].1.to_string(), "~A");
    }

    #[test]
    fn test_substitute_is_simultaneous() {
        // Новые буквы из данных не подставляются повторно
        let instance = substitute("(A >> B)", &["B", "A"]).unwrap();
        assert_eq!(instance.formula.to_string(), "(B >> A)");
    }

    #[test]
    fn test_substitute_arity_and_validity() {
        assert!(matches!(
            substitute("(A >> (B >> A))", &["C"]),
            Err(ProofError::ArityMismatch { expected: 2, got: 1, .. })
        ));
        assert!(matches!(
            substitute("(A >> A)", &["C >> D"]),
            Err(ProofError::InvalidFormula(_))
        ));
        assert!(matches!(
            substitute("(A >> A)", &[""]),
            Err(ProofError::InvalidFormula(_))
        ));
    }

    #[test]
    fn test_axiom_must_be_tautology() {
        assert!(matches!(
            Axiom::new("(A >> B)"),
            Err(ProofError::NotTautology(_))
        ));
        assert!(AxiomSet::from_texts(["(A >> A)", "(A | B)"]).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let set = AxiomSet::from_json_str(r#"{"axioms": ["(A >> A)", "(A>>(B>>A))"]}"#).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().formula().to_string(), "(A >> (B >> A))");

        let again = AxiomSet::from_json_str(&set.to_json().unwrap()).unwrap();
        assert_eq!(again, set);

        assert!(AxiomSet::from_json_str("{}").unwrap().is_empty());
        assert!(matches!(
            AxiomSet::from_json_str("not json"),
            Err(ProofError::Serialization(_))
        ));
    }
}
