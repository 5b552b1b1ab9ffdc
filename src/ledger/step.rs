//! Шаги доказательства и их происхождение.

use std::fmt;

use crate::formula::Formula;
use crate::rules::Rule;

/// Действие, которым получен шаг.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Hyp,
    Axiom,
    Mp,
    Mt,
    Mtp,
    Mpt,
    Cs,
}

impl Action {
    /// Имя действия в снимке и при отображении.
    pub fn tag(self) -> &'static str {
        match self {
            Action::Hyp => "HYP",
            Action::Axiom => "AXIOM",
            Action::Mp => "MP",
            Action::Mt => "MT",
            Action::Mtp => "MTP",
            Action::Mpt => "MPT",
            Action::Cs => "CS",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Action> {
        match tag {
            "HYP" => Some(Action::Hyp),
            "AXIOM" => Some(Action::Axiom),
            other => Rule::from_tag(other).map(Action::from),
        }
    }

    /// Правило вывода, если действие является правилом.
    pub fn rule(self) -> Option<Rule> {
        match self {
            Action::Mp => Some(Rule::ModusPonens),
            Action::Mt => Some(Rule::ModusTollens),
            Action::Mtp => Some(Rule::ModusTollendoPonens),
            Action::Mpt => Some(Rule::ModusPonendoTollens),
            Action::Cs => Some(Rule::ConditionalSyllogism),
            Action::Hyp | Action::Axiom => None,
        }
    }
}

impl From<Rule> for Action {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::ModusPonens => Action::Mp,
            Rule::ModusTollens => Action::Mt,
            Rule::ModusTollendoPonens => Action::Mtp,
            Rule::ModusPonendoTollens => Action::Mpt,
            Rule::ConditionalSyllogism => Action::Cs,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Использование схемы аксиомы: номер схемы и привязки переменных.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxiomUse {
    /// Номер схемы, с 1; добавленные схемы продолжают нумерацию базовых.
    pub schema: usize,
    pub bindings: Vec<(char, Formula)>,
}

impl AxiomUse {
    /// Разобрать пометку вида `[AXIOM: 3. A=(B >> C) B=~A]`.
    ///
    /// Возвращает номер схемы и привязки в текстовом виде.
    pub fn parse_note(note: &str) -> Option<(usize, Vec<(char, String)>)> {
        let body = note.strip_prefix("[AXIOM: ")?.strip_suffix(']')?;
        let (number, rest) = match body.split_once('.') {
            Some((number, rest)) => (number, rest),
            None => return None,
        };
        let schema = number.trim().parse().ok()?;

        // '=' не входит в алфавит формул, поэтому " X=" однозначно
        // начинает следующую привязку.
        let mut bindings: Vec<(char, String)> = Vec::new();
        for piece in rest.split(' ').filter(|p| !p.is_empty()) {
            let mut chars = piece.chars();
            match (chars.next(), chars.next()) {
                (Some(var), Some('=')) if var.is_ascii_uppercase() => {
                    bindings.push((var, chars.as_str().to_string()));
                }
                _ => {
                    let (_, value) = bindings.last_mut()?;
                    value.push(' ');
                    value.push_str(piece);
                }
            }
        }
        Some((schema, bindings))
    }
}

impl fmt::Display for AxiomUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[AXIOM: {}.", self.schema)?;
        for (var, formula) in &self.bindings {
            write!(f, " {}={}", var, formula)?;
        }
        write!(f, "]")
    }
}

/// Происхождение шага.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Hypothesis,
    Axiom(AxiomUse),
    /// Правило и номера шагов-посылок (оба строго меньше номера шага).
    Rule { rule: Rule, first: usize, second: usize },
}

/// Шаг доказательства.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: usize,
    pub formula: Formula,
    /// Каноническая запись `formula`.
    pub text: String,
    pub provenance: Provenance,
}

impl Step {
    pub(crate) fn new(id: usize, formula: Formula, provenance: Provenance) -> Self {
        let text = formula.to_string();
        Self {
            id,
            formula,
            text,
            provenance,
        }
    }

    pub fn action(&self) -> Action {
        match &self.provenance {
            Provenance::Hypothesis => Action::Hyp,
            Provenance::Axiom(_) => Action::Axiom,
            Provenance::Rule { rule, .. } => Action::from(*rule),
        }
    }

    /// Посылки шага-правила.
    pub fn premises(&self) -> Option<(usize, usize)> {
        match self.provenance {
            Provenance::Rule { first, second, .. } => Some((first, second)),
            _ => None,
        }
    }

    /// Строка для отображения, номера с 1.
    pub fn render(&self) -> String {
        let id = self.id + 1;
        match &self.provenance {
            Provenance::Hypothesis => format!("{}. {} [HYP]", id, self.text),
            Provenance::Axiom(axiom_use) => format!("{}. {} {}", id, self.text, axiom_use),
            Provenance::Rule {
                rule,
                first,
                second,
            } => format!(
                "{}. {} [{}({},{})]",
                id,
                self.text,
                rule,
                first + 1,
                second + 1
            ),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(text: &str) -> Formula {
        Formula::parse(text).unwrap()
    }

    #[test]
    fn test_render_hyp_and_rule() {
        let hyp = Step::new(0, f("(A >> B)"), Provenance::Hypothesis);
        assert_eq!(hyp.render(), "1. (A >> B) [HYP]");

        let cs = Step::new(
            2,
            f("(A >> C)"),
            Provenance::Rule {
                rule: Rule::ConditionalSyllogism,
                first: 0,
                second: 1,
            },
        );
        assert_eq!(cs.render(), "3. (A >> C) [CS(1,2)]");
        assert_eq!(cs.action(), Action::Cs);
        assert_eq!(cs.premises(), Some((0, 1)));
    }

    #[test]
    fn test_render_axiom() {
        let axiom_use = AxiomUse {
            schema: 1,
            bindings: vec![('A', f("(C >> D)")), ('B', f("~A"))],
        };
        let step = Step::new(
            4,
            f("((C >> D) >> (~A >> (C >> D)))"),
            Provenance::Axiom(axiom_use),
        );
        assert_eq!(
            step.render(),
            "5. ((C >> D) >> (~A >> (C >> D))) [AXIOM: 1. A=(C >> D) B=~A]"
        );
    }

    #[test]
    fn test_parse_note() {
        let (schema, bindings) = AxiomUse::parse_note("[AXIOM: 12. A=(C >> (D | F)) B=~A]").unwrap();
        assert_eq!(schema, 12);
        assert_eq!(
            bindings,
            vec![('A', "(C >> (D | F))".to_string()), ('B', "~A".to_string())]
        );

        assert!(AxiomUse::parse_note("").is_none());
        assert!(AxiomUse::parse_note("[AXIOM: x. A=B]").is_none());
        assert!(AxiomUse::parse_note("[AXIOM: 1. (A >> B)]").is_none());
    }

    #[test]
    fn test_action_tags() {
        assert_eq!(Action::from_tag("AXIOM"), Some(Action::Axiom));
        assert_eq!(Action::from_tag("MPT"), Some(Action::Mpt));
        assert_eq!(Action::from_tag("Actions.HYP"), None);
        assert_eq!(Action::Mtp.rule(), Some(Rule::ModusTollendoPonens));
        assert_eq!(Action::Hyp.rule(), None);
    }
}
