//! Оракул тавтологий: таблица истинности по переменным формулы.

use crate::formula::{Formula, Valuation};
use crate::parser;

/// Тавтология ли формула, заданная текстом.
///
/// Пустой или некорректный текст тавтологией не считается. Полная расстановка
/// скобок не требуется: проверка предпосылок строит цепочки конъюнкций.
pub fn is_tautology(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    match parser::parse_lenient(text) {
        Ok(parsed) => is_tautology_formula(&parsed.formula),
        Err(_) => false,
    }
}

/// Тавтология ли уже разобранная формула.
pub fn is_tautology_formula(formula: &Formula) -> bool {
    let variables: Vec<char> = formula.variables().into_iter().collect();
    (0..row_count(&variables)).all(|row| formula.eval(&valuation_for_row(&variables, row)))
}

fn row_count(variables: &[char]) -> u64 {
    1u64 << variables.len()
}

/// Интерпретация для строки таблицы: первая переменная соответствует старшему биту.
fn valuation_for_row(variables: &[char], row: u64) -> Valuation {
    let k = variables.len();
    let mut valuation = Valuation::new();
    for (i, var) in variables.iter().enumerate() {
        valuation.set(*var, (row >> (k - 1 - i)) & 1 == 1);
    }
    valuation
}

/// Таблица истинности формулы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    /// Переменные в алфавитном порядке (столбцы).
    pub variables: Vec<char>,
    /// Строки: значения переменных и значение формулы.
    pub rows: Vec<(Vec<bool>, bool)>,
}

impl TruthTable {
    /// Построить таблицу по тексту формулы.
    pub fn build(text: &str) -> Option<TruthTable> {
        let parsed = parser::parse_lenient(text).ok()?;
        Some(Self::for_formula(&parsed.formula))
    }

    /// Построить таблицу для разобранной формулы.
    pub fn for_formula(formula: &Formula) -> TruthTable {
        let variables: Vec<char> = formula.variables().into_iter().collect();
        let rows = (0..row_count(&variables))
            .map(|row| {
                let valuation = valuation_for_row(&variables, row);
                let inputs = variables.iter().map(|v| valuation.get(*v)).collect();
                (inputs, formula.eval(&valuation))
            })
            .collect();
        TruthTable { variables, rows }
    }

    /// Все строки истинны.
    pub fn is_tautology(&self) -> bool {
        self.rows.iter().all(|(_, value)| *value)
    }
}

impl std::fmt::Display for TruthTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for var in &self.variables {
            write!(f, "{} ", var)?;
        }
        writeln!(f, "| =")?;
        for (inputs, value) in &self.rows {
            for input in inputs {
                write!(f, "{} ", u8::from(*input))?;
            }
            writeln!(f, "| {}", u8::from(*value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_bank() {
        assert!(is_tautology("(A >> (B >> A))"));
        assert!(is_tautology("((A >> (B >> C)) >> ((A >> B) >> (A >> C)))"));
        assert!(is_tautology("((~A >> B) >> ((~A >> ~B) >> A))"));
        assert!(is_tautology("(A | ~A)"));
        assert!(is_tautology("A >> A"));

        assert!(!is_tautology("A >> (B | B)"));
        assert!(!is_tautology("A"));
        assert!(!is_tautology("(A & ~A)"));
    }

    #[test]
    fn test_empty_and_invalid_are_not_tautologies() {
        assert!(!is_tautology(""));
        assert!(!is_tautology("(A > A)"));
        assert!(!is_tautology("(A >> "));
    }

    #[test]
    fn test_refutation_shape() {
        // {A >> B, A} |- B
        assert!(is_tautology("~((A >> B) & A & (~B))"));
        // {A} |- B не выводимо
        assert!(!is_tautology("~(A & (~B))"));
    }

    #[test]
    fn test_truth_table() {
        let table = TruthTable::build("(A >> B)").unwrap();
        assert_eq!(table.variables, vec!['A', 'B']);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0], (vec![false, false], true));
        assert_eq!(table.rows[2], (vec![true, false], false));
        assert!(!table.is_tautology());
        assert!(TruthTable::build("(A | ~A)").unwrap().is_tautology());
    }

    #[test]
    fn test_all_sixteen_variables() {
        let text = "(((((((((((((((A | B) | C) | D) | F) | G) | H) | J) | K) | L) | M) | W) | R) | T) | Z) | U)";
        let formula = Formula::parse(text).unwrap();
        assert_eq!(formula.variables().len(), 16);
        assert!(!is_tautology(text));
        assert!(is_tautology(&format!("({} | ~A)", text)));
    }
}
