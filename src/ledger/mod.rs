//! Леджер доказательства: упорядоченная последовательность шагов.
//!
//! Леджер владеет задачей, принятыми шагами, флагом завершения и двумя
//! наборами аксиом: базовым (только чтение) и добавленным пользователем.
//!
//! # Инварианты
//!
//! - шаг `i` имеет id `i`; посылки шага-правила строго меньше его id;
//! - никакие два шага не несут равных формул ([`ProofError::DuplicateFormula`]);
//! - `terminated` истинен ровно тогда, когда следствие есть среди гипотез
//!   или среди формул шагов. Сбрасывается только откатом.
//!
//! ```rust,ignore
//! use hilbert_prover::{AxiomSet, Ledger, Rule};
//!
//! let mut ledger = Ledger::new(&["(A >> B)", "A"], "B", AxiomSet::standard()?)?;
//! ledger.add_hyp("(A >> B)")?;
//! ledger.add_hyp("A")?;
//! ledger.add_rule_step(Rule::ModusPonens, 0, 1)?;
//! assert!(ledger.is_terminated());
//! ```

pub mod snapshot;
pub mod step;
pub mod task;

pub use snapshot::{Snapshot, StepRecord};
pub use step::{Action, AxiomUse, Provenance, Step};
pub use task::ProofTask;

use std::collections::HashMap;

use crate::axioms::{Axiom, AxiomSet};
use crate::error::{ProofError, ProofResult};
use crate::formula::Formula;
use crate::rules::Rule;

/// Набор аксиом, из которого берётся схема.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxiomPool {
    Base,
    Added,
}

/// Подсказка: пара шагов и правило, дающие ещё не выведенную формулу.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub rule: Rule,
    pub first: usize,
    pub second: usize,
    pub formula: Formula,
}

/// Леджер доказательства.
#[derive(Debug, Clone)]
pub struct Ledger {
    task: ProofTask,
    steps: Vec<Step>,
    /// Формула -> id шага
    index: HashMap<Formula, usize>,
    terminated: bool,
    base_axioms: AxiomSet,
    added_axioms: AxiomSet,
}

impl Ledger {
    // === Конструирование ===

    /// Создать леджер по текстам гипотез и следствия.
    ///
    /// Любая некорректная формула отвергает построение целиком.
    pub fn new<S: AsRef<str>>(
        hypotheses: &[S],
        consequence: &str,
        base_axioms: AxiomSet,
    ) -> ProofResult<Ledger> {
        let task = ProofTask::from_texts(hypotheses, consequence)
            .map_err(|e| ProofError::Construction(e.to_string()))?;
        Ok(Self::from_task(task, base_axioms))
    }

    /// Создать леджер по уже разобранной задаче.
    pub fn from_task(task: ProofTask, base_axioms: AxiomSet) -> Ledger {
        let mut ledger = Ledger {
            task,
            steps: Vec::new(),
            index: HashMap::new(),
            terminated: false,
            base_axioms,
            added_axioms: AxiomSet::new(),
        };
        ledger.check_termination();
        log::debug!("new ledger {}", ledger.task);
        ledger
    }

    // === Запросы ===

    pub fn task(&self) -> &ProofTask {
        &self.task
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, id: usize) -> Option<&Step> {
        self.steps.get(id)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn base_axioms(&self) -> &AxiomSet {
        &self.base_axioms
    }

    pub fn added_axioms(&self) -> &AxiomSet {
        &self.added_axioms
    }

    /// Id шага с данной формулой.
    pub fn position(&self, formula: &Formula) -> Option<usize> {
        self.index.get(formula).copied()
    }

    pub fn contains(&self, formula: &Formula) -> bool {
        self.index.contains_key(formula)
    }

    /// Строки шагов в формате отображения.
    pub fn render_steps(&self) -> Vec<String> {
        self.steps.iter().map(Step::render).collect()
    }

    /// Краткая запись задачи: `{f1, f2} |- c`.
    pub fn summary(&self) -> String {
        self.task.to_string()
    }

    /// Выводимость следствия по таблице истинности.
    pub fn is_provable(&self) -> bool {
        self.task.is_provable()
    }

    // === Добавление шагов ===

    /// Добавить гипотезу задачи.
    pub fn add_hyp(&mut self, text: &str) -> ProofResult<&Step> {
        self.ensure_open()?;
        let formula = Formula::parse_checked(text)?;
        self.insert_hypothesis(formula)
    }

    /// Добавить частный случай схемы аксиомы из выбранного набора.
    pub fn add_axiom<S: AsRef<str>>(
        &mut self,
        schema: &str,
        data: &[S],
        pool: AxiomPool,
    ) -> ProofResult<&Step> {
        self.ensure_open()?;
        let schema = Formula::parse_checked(schema)?;
        let position = self
            .pool(pool)
            .position(&schema)
            .ok_or_else(|| ProofError::UnknownAxiom(schema.to_string()))?;
        let data = data
            .iter()
            .map(|d| Formula::parse_checked(d.as_ref()))
            .collect::<ProofResult<Vec<_>>>()?;
        self.instantiate_axiom(pool, position, &data)
    }

    /// Применить правило к шагам `first` и `second`.
    pub fn add_rule_step(&mut self, rule: Rule, first: usize, second: usize) -> ProofResult<&Step> {
        self.ensure_open()?;
        if first == second {
            return Err(ProofError::inapplicable(
                rule,
                format!("both premises refer to step {}", first + 1),
            ));
        }
        let a = &self.premise(first)?.formula;
        let b = &self.premise(second)?.formula;
        let formula = rule.apply(a, b)?;
        self.commit(formula, Provenance::Rule { rule, first, second })
    }

    pub(crate) fn insert_hypothesis(&mut self, formula: Formula) -> ProofResult<&Step> {
        self.ensure_open()?;
        if !self.task.is_hypothesis(&formula) {
            return Err(ProofError::NotAHypothesis(formula.to_string()));
        }
        self.commit(formula, Provenance::Hypothesis)
    }

    /// Подставить `data` в схему с позицией `position` набора `pool`.
    pub(crate) fn instantiate_axiom(
        &mut self,
        pool: AxiomPool,
        position: usize,
        data: &[Formula],
    ) -> ProofResult<&Step> {
        self.ensure_open()?;
        let axiom = self
            .pool(pool)
            .get(position)
            .ok_or_else(|| ProofError::UnknownAxiom(format!("#{}", position + 1)))?;
        let instance = axiom.instantiate(data)?;
        let schema = match pool {
            AxiomPool::Base => position + 1,
            AxiomPool::Added => self.base_axioms.len() + position + 1,
        };
        let provenance = Provenance::Axiom(AxiomUse {
            schema,
            bindings: instance.bindings,
        });
        self.commit(instance.formula, provenance)
    }

    fn pool(&self, pool: AxiomPool) -> &AxiomSet {
        match pool {
            AxiomPool::Base => &self.base_axioms,
            AxiomPool::Added => &self.added_axioms,
        }
    }

    fn premise(&self, id: usize) -> ProofResult<&Step> {
        self.steps.get(id).ok_or(ProofError::IndexOutOfRange {
            index: id,
            len: self.steps.len(),
        })
    }

    fn ensure_open(&self) -> ProofResult<()> {
        if self.terminated {
            return Err(ProofError::Terminated);
        }
        Ok(())
    }

    /// Единственная точка добавления шага.
    fn commit(&mut self, formula: Formula, provenance: Provenance) -> ProofResult<&Step> {
        if let Some(&existing) = self.index.get(&formula) {
            log::trace!("duplicate of step {}: {}", existing + 1, formula);
            return Err(ProofError::DuplicateFormula(formula.to_string()));
        }

        let id = self.steps.len();
        let step = Step::new(id, formula, provenance);
        log::debug!("commit {}", step);

        if step.formula == self.task.consequence {
            self.terminated = true;
        }
        self.index.insert(step.formula.clone(), id);
        self.steps.push(step);
        Ok(&self.steps[id])
    }

    fn check_termination(&mut self) {
        let consequence = &self.task.consequence;
        self.terminated =
            self.task.is_hypothesis(consequence) || self.index.contains_key(consequence);
    }

    // === Откат и правка задачи ===

    /// Оставить первые `index` шагов.
    pub fn rollback(&mut self, index: usize) -> ProofResult<()> {
        if self.steps.is_empty() || index >= self.steps.len() {
            return Err(ProofError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        for step in self.steps.drain(index..) {
            self.index.remove(&step.formula);
        }
        self.check_termination();
        log::debug!("rollback to {} steps, terminated={}", index, self.terminated);
        Ok(())
    }

    /// Добавить пользовательскую аксиому: корректная тавтология,
    /// которой нет ни в одном из наборов.
    pub fn add_user_axiom(&mut self, text: &str) -> ProofResult<()> {
        let axiom = Axiom::new(text)?;
        if self.base_axioms.contains(axiom.formula()) || self.added_axioms.contains(axiom.formula()) {
            return Err(ProofError::DuplicateAxiom(axiom.formula().to_string()));
        }
        log::debug!("added axiom {}", axiom.formula());
        self.added_axioms.push(axiom);
        Ok(())
    }

    /// Убрать гипотезы-тавтологии. Гипотезы, уже принятые шагом HYP, и
    /// само следствие остаются, поэтому шаги и `terminated` не меняются.
    pub fn prune_tautologies(&mut self) -> usize {
        let index = &self.index;
        let consequence = &self.task.consequence;
        let keep: Vec<Formula> = self
            .task
            .hypotheses
            .iter()
            .filter(|h| *h == consequence || index.contains_key(*h))
            .cloned()
            .collect();
        let removed = self.task.prune_tautologies_except(|h| keep.contains(h));
        if removed > 0 {
            log::debug!("pruned {} tautological hypotheses", removed);
        }
        removed
    }

    // === Подсказка ===

    /// Первая упорядоченная пара шагов и правило, дающие новую формулу.
    pub fn hint(&self) -> Option<Hint> {
        if self.terminated {
            return None;
        }
        for (first, a) in self.steps.iter().enumerate() {
            for (second, b) in self.steps.iter().enumerate() {
                if first == second {
                    continue;
                }
                for rule in Rule::ALL {
                    if let Ok(formula) = rule.apply(&a.formula, &b.formula) {
                        if !self.index.contains_key(&formula) {
                            return Some(Hint {
                                rule,
                                first,
                                second,
                                formula,
                            });
                        }
                    }
                }
            }
        }
        None
    }

    // === Снимки ===

    /// Плоская запись для сохранения.
    pub fn to_snapshot(&self) -> Snapshot {
        let steps = self
            .steps
            .iter()
            .map(|step| {
                let (note, first, second) = match &step.provenance {
                    Provenance::Hypothesis => (String::new(), 0, 0),
                    Provenance::Axiom(axiom_use) => (axiom_use.to_string(), 0, 0),
                    Provenance::Rule { first, second, .. } => (String::new(), *first, *second),
                };
                StepRecord(
                    step.id,
                    step.text.clone(),
                    step.action().tag().to_string(),
                    note,
                    first,
                    second,
                )
            })
            .collect();

        Snapshot {
            hypothesis_list: self.task.hypotheses.iter().map(Formula::to_string).collect(),
            consequence: self.task.consequence.to_string(),
            terminated: self.terminated,
            step_count: self.steps.len(),
            steps,
            task_name: self.summary(),
            added_axioms: self.added_axioms.iter().map(|a| a.formula().to_string()).collect(),
        }
    }

    /// Восстановить леджер из снимка, перепроверяя каждый шаг
    /// относительно уже загруженного префикса.
    pub fn from_snapshot(snapshot: &Snapshot, base_axioms: AxiomSet) -> ProofResult<Ledger> {
        let mut ledger = Ledger::new(&snapshot.hypothesis_list, &snapshot.consequence, base_axioms)?;

        for text in &snapshot.added_axioms {
            ledger
                .add_user_axiom(text)
                .map_err(|e| rejected(format!("added axiom '{}': {}", text, e)))?;
        }

        for record in &snapshot.steps {
            ledger
                .replay(record)
                .map_err(|e| rejected(format!("step {}: {}", record.id() + 1, e)))?;
        }

        if ledger.steps.len() != snapshot.step_count {
            return Err(rejected(format!(
                "step_count is {} but {} steps were loaded",
                snapshot.step_count,
                ledger.steps.len()
            )));
        }
        if ledger.terminated != snapshot.terminated {
            return Err(rejected(format!(
                "terminated flag is {} but the steps give {}",
                snapshot.terminated, ledger.terminated
            )));
        }
        Ok(ledger)
    }

    fn replay(&mut self, record: &StepRecord) -> ProofResult<()> {
        if record.id() != self.steps.len() {
            return Err(ProofError::Construction(format!(
                "expected id {}, found {}",
                self.steps.len(),
                record.id()
            )));
        }
        let formula = Formula::parse_checked(record.formula())?;
        let action = Action::from_tag(record.tag())
            .ok_or_else(|| ProofError::Construction(format!("unknown action '{}'", record.tag())))?;

        let produced = match action {
            Action::Hyp => self.insert_hypothesis(formula.clone())?.formula.clone(),
            Action::Axiom => self.replay_axiom(&formula, record.note())?,
            _ => {
                let rule = action
                    .rule()
                    .ok_or_else(|| ProofError::Construction(format!("unknown action '{}'", record.tag())))?;
                let (first, second) = record.premises();
                self.add_rule_step(rule, first, second)?.formula.clone()
            }
        };

        if produced != formula {
            return Err(ProofError::Construction(format!(
                "recorded {} but the step derives {}",
                formula, produced
            )));
        }
        Ok(())
    }

    /// Шаг AXIOM: по пометке повторить подстановку; без пометки формула
    /// должна дословно совпадать с одной из схем.
    fn replay_axiom(&mut self, formula: &Formula, note: &str) -> ProofResult<Formula> {
        if note.is_empty() {
            let (pool, position) = self
                .locate_schema(formula)
                .ok_or_else(|| ProofError::UnknownAxiom(formula.to_string()))?;
            let data: Vec<Formula> = formula.variables().into_iter().map(Formula::var).collect();
            return Ok(self.instantiate_axiom(pool, position, &data)?.formula.clone());
        }

        let (schema, bindings) = AxiomUse::parse_note(note)
            .ok_or_else(|| ProofError::Construction(format!("malformed axiom note '{}'", note)))?;
        let base = self.base_axioms.len();
        let (pool, position) = match schema {
            0 => return Err(ProofError::UnknownAxiom(note.to_string())),
            n if n <= base => (AxiomPool::Base, n - 1),
            n => (AxiomPool::Added, n - base - 1),
        };

        let axiom = self
            .pool(pool)
            .get(position)
            .ok_or_else(|| ProofError::UnknownAxiom(note.to_string()))?;
        let variables: Vec<char> = bindings.iter().map(|(var, _)| *var).collect();
        if variables != axiom.variables() {
            return Err(ProofError::Construction(format!(
                "bindings in '{}' do not match the schema variables",
                note
            )));
        }

        let data = bindings
            .iter()
            .map(|(_, text)| Formula::parse_checked(text))
            .collect::<ProofResult<Vec<_>>>()?;
        Ok(self.instantiate_axiom(pool, position, &data)?.formula.clone())
    }

    fn locate_schema(&self, formula: &Formula) -> Option<(AxiomPool, usize)> {
        self.base_axioms
            .position(formula)
            .map(|p| (AxiomPool::Base, p))
            .or_else(|| self.added_axioms.position(formula).map(|p| (AxiomPool::Added, p)))
    }
}

fn rejected(reason: String) -> ProofError {
    log::warn!("snapshot rejected: {}", reason);
    ProofError::Construction(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(hyps: &[&str], consequence: &str) -> Ledger {
        Ledger::new(hyps, consequence, AxiomSet::standard().unwrap()).unwrap()
    }

    fn f(text: &str) -> Formula {
        Formula::parse(text).unwrap()
    }

    #[test]
    fn test_construction_rejects_invalid() {
        let axioms = || AxiomSet::standard().unwrap();
        assert!(matches!(
            Ledger::new(&["(A >> B"], "B", axioms()),
            Err(ProofError::Construction(_))
        ));
        assert!(matches!(
            Ledger::new(&["A"], "", axioms()),
            Err(ProofError::Construction(_))
        ));
        assert!(matches!(
            Ledger::new(&["A >> B"], "B", axioms()),
            Err(ProofError::Construction(_))
        ));
        assert!(Ledger::new::<&str>(&[], "(A >> A)", axioms()).is_ok());
    }

    #[test]
    fn test_consequence_among_hypotheses() {
        let l = ledger(&["A"], "A");
        assert!(l.is_terminated());
        assert!(l.is_empty());
    }

    #[test]
    fn test_modus_ponens_closes() {
        let mut l = ledger(&["(A >> B)", "A"], "B");
        l.add_hyp("(A >> B)").unwrap();
        l.add_hyp("A").unwrap();
        assert!(!l.is_terminated());

        let step = l.add_rule_step(Rule::ModusPonens, 0, 1).unwrap();
        assert_eq!(step.render(), "3. B [MP(1,2)]");
        assert!(l.is_terminated());

        assert!(matches!(l.add_hyp("A"), Err(ProofError::Terminated)));
    }

    #[test]
    fn test_add_hyp_checks() {
        let mut l = ledger(&["(A >> B)"], "B");
        assert!(matches!(l.add_hyp("A"), Err(ProofError::NotAHypothesis(_))));
        assert!(matches!(l.add_hyp("(A >> "), Err(ProofError::InvalidFormula(_))));
        l.add_hyp("(A>>B)").unwrap();
        assert_eq!(l.steps()[0].text, "(A >> B)");
    }

    #[test]
    fn test_duplicates_raise() {
        let mut l = ledger(&["(A >> B)", "(A >> B)"], "B");
        l.add_hyp("(A >> B)").unwrap();
        let err = l.add_hyp("(A >> B)").unwrap_err();
        assert!(err.is_duplicate());

        // Та же формула через аксиому
        let mut l = ledger(&["(A >> (B >> A))"], "B");
        l.add_hyp("(A >> (B >> A))").unwrap();
        let err = l
            .add_axiom("(A >> (B >> A))", &["A", "B"], AxiomPool::Base)
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn test_rule_step_checks() {
        let mut l = ledger(&["(A >> B)", "A"], "B");
        l.add_hyp("(A >> B)").unwrap();
        l.add_hyp("A").unwrap();

        assert!(l.add_rule_step(Rule::ModusPonens, 0, 0).unwrap_err().is_inapplicable());
        assert!(matches!(
            l.add_rule_step(Rule::ModusPonens, 0, 5),
            Err(ProofError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(l.add_rule_step(Rule::ModusTollens, 0, 1).unwrap_err().is_inapplicable());
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn test_axiom_step() {
        let mut l = ledger(&["A"], "B");
        let step = l
            .add_axiom("(A >> (B >> A))", &["(C >> D)", "~A"], AxiomPool::Base)
            .unwrap();
        assert_eq!(
            step.render(),
            "1. ((C >> D) >> (~A >> (C >> D))) [AXIOM: 1. A=(C >> D) B=~A]"
        );

        assert!(matches!(
            l.add_axiom("(A >> B)", &["C", "D"], AxiomPool::Base),
            Err(ProofError::UnknownAxiom(_))
        ));
        assert!(matches!(
            l.add_axiom("(A >> A)", &["C", "D"], AxiomPool::Base),
            Err(ProofError::ArityMismatch { .. })
        ));
        assert!(matches!(
            l.add_axiom("(A >> A)", &["C >> D"], AxiomPool::Base),
            Err(ProofError::InvalidFormula(_))
        ));
    }

    #[test]
    fn test_user_axioms_continue_numbering() {
        let mut l = ledger(&["A"], "B");
        assert!(matches!(
            l.add_user_axiom("(A >> B)"),
            Err(ProofError::NotTautology(_))
        ));
        assert!(matches!(
            l.add_user_axiom("(A >> A)"),
            Err(ProofError::DuplicateAxiom(_))
        ));
        l.add_user_axiom("(A >> (~A >> B))").unwrap();
        assert!(matches!(
            l.add_user_axiom("(A>>(~A>>B))"),
            Err(ProofError::DuplicateAxiom(_))
        ));

        assert!(l.add_axiom("(A >> (~A >> B))", &["C", "D"], AxiomPool::Base).is_err());
        let step = l
            .add_axiom("(A >> (~A >> B))", &["C", "D"], AxiomPool::Added)
            .unwrap();
        assert_eq!(step.render(), "1. (C >> (~C >> D)) [AXIOM: 15. A=C B=D]");
    }

    #[test]
    fn test_rollback_law() {
        let mut l = ledger(&["(A >> B)", "A"], "B");
        l.add_hyp("(A >> B)").unwrap();
        l.add_hyp("A").unwrap();
        l.add_rule_step(Rule::ModusPonens, 0, 1).unwrap();
        let before = l.render_steps();
        assert!(l.is_terminated());

        l.rollback(1).unwrap();
        assert_eq!(l.len(), 1);
        assert!(!l.is_terminated());
        assert!(!l.contains(&f("A")));

        l.add_hyp("A").unwrap();
        l.add_rule_step(Rule::ModusPonens, 0, 1).unwrap();
        assert_eq!(l.render_steps(), before);
        assert!(l.is_terminated());
    }

    #[test]
    fn test_rollback_bounds() {
        let mut l = ledger(&["A"], "B");
        assert!(matches!(l.rollback(0), Err(ProofError::IndexOutOfRange { .. })));
        l.add_hyp("A").unwrap();
        assert!(l.rollback(1).is_err());
        l.rollback(0).unwrap();
        assert!(l.is_empty());
    }

    #[test]
    fn test_prune_tautologies() {
        let mut l = ledger(&["(A | ~A)", "A"], "A");
        assert!(l.is_terminated());
        assert_eq!(l.prune_tautologies(), 1);
        assert_eq!(l.task().hypotheses, vec![f("A")]);
        assert_eq!(l.prune_tautologies(), 0);
    }

    #[test]
    fn test_prune_keeps_consequence_and_committed() {
        let mut l = ledger(&["(A | ~A)"], "(A | ~A)");
        assert!(l.is_terminated());
        assert_eq!(l.prune_tautologies(), 0);
        assert!(l.is_terminated());

        let mut l = ledger(&["(C | ~C)", "(B | ~B)", "(A >> B)", "A"], "B");
        l.add_hyp("(C | ~C)").unwrap();
        assert_eq!(l.prune_tautologies(), 1);
        assert_eq!(l.task().hypotheses, vec![f("(C | ~C)"), f("(A >> B)"), f("A")]);
    }

    #[test]
    fn test_snapshot_round_trip_after_solve_with_tautology() {
        let mut l = ledger(&["(C | ~C)", "(A >> B)", "A"], "B");
        l.add_hyp("(C | ~C)").unwrap();
        crate::solver::solve(&mut l).unwrap();

        let restored = Ledger::from_snapshot(&l.to_snapshot(), AxiomSet::standard().unwrap()).unwrap();
        assert_eq!(restored.render_steps(), l.render_steps());
        assert_eq!(restored.task().hypotheses, l.task().hypotheses);
        assert!(restored.is_terminated());
    }

    #[test]
    fn test_hint() {
        let mut l = ledger(&["(A >> B)", "A", "(B >> C)"], "C");
        assert!(l.hint().is_none());
        l.add_hyp("(A >> B)").unwrap();
        l.add_hyp("A").unwrap();

        let hint = l.hint().unwrap();
        assert_eq!((hint.rule, hint.first, hint.second), (Rule::ModusPonens, 0, 1));
        assert_eq!(hint.formula, f("B"));

        l.add_rule_step(Rule::ModusPonens, 0, 1).unwrap();
        assert!(l.hint().is_none());
    }

    #[test]
    fn test_summary() {
        assert_eq!(ledger(&["(A >> B)", "A"], "B").summary(), "{(A >> B), A} |- B");
        assert_eq!(ledger(&[], "(A >> A)").summary(), "{ } |- (A >> A)");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut l = ledger(&["(A >> B)", "A"], "B");
        l.add_user_axiom("(A >> (~A >> B))").unwrap();
        l.add_hyp("(A >> B)").unwrap();
        l.add_hyp("A").unwrap();
        l.add_axiom("(A >> (B >> A))", &["A", "B"], AxiomPool::Base).unwrap();
        l.add_rule_step(Rule::ModusPonens, 2, 1).unwrap();
        l.add_rule_step(Rule::ModusPonens, 0, 1).unwrap();

        let snapshot = l.to_snapshot();
        assert_eq!(snapshot.step_count, 5);
        assert_eq!(snapshot.task_name, "{(A >> B), A} |- B");
        assert_eq!(
            snapshot.steps[2],
            StepRecord(2, "(A >> (B >> A))".into(), "AXIOM".into(), "[AXIOM: 1. A=A B=B]".into(), 0, 0)
        );
        assert_eq!(
            snapshot.steps[3],
            StepRecord(3, "(B >> A)".into(), "MP".into(), String::new(), 2, 1)
        );

        let json = snapshot.to_json().unwrap();
        let restored = Ledger::from_snapshot(&Snapshot::from_json(&json).unwrap(), AxiomSet::standard().unwrap()).unwrap();
        assert_eq!(restored.render_steps(), l.render_steps());
        assert!(restored.is_terminated());
        assert_eq!(restored.added_axioms().len(), 1);
    }

    #[test]
    fn test_snapshot_legacy_axiom_without_note() {
        let json = r#"{
            "hypothesis_list": ["(A >> B)", "A"],
            "consequence": "B",
            "terminated": true,
            "step_count": 5,
            "steps": [
                [0, "(A >> B)", "Actions.HYP", "", 0, 0],
                [1, "A", "Actions.HYP", "", 0, 0],
                [2, "(A >> (B >> A))", "Actions.AXIOM", "", 0, 0],
                [3, "(B >> A)", "Actions.MP", "", 2, 1],
                [4, "B", "Actions.MP", "", 0, 1]
            ],
            "added_axioms": ["(A >> (~A >> B))"]
        }"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        let l = Ledger::from_snapshot(&snapshot, AxiomSet::standard().unwrap()).unwrap();
        assert_eq!(l.len(), 5);
        assert!(l.is_terminated());
        assert_eq!(l.steps()[2].render(), "3. (A >> (B >> A)) [AXIOM: 1. A=A B=B]");
    }

    #[test]
    fn test_snapshot_corruption_rejected() {
        let mut l = ledger(&["(A >> B)", "A"], "B");
        l.add_hyp("(A >> B)").unwrap();
        l.add_hyp("A").unwrap();
        l.add_rule_step(Rule::ModusPonens, 0, 1).unwrap();
        let good = l.to_snapshot();
        let load = |s: &Snapshot| Ledger::from_snapshot(s, AxiomSet::standard().unwrap());

        let mut wrong_formula = good.clone();
        wrong_formula.steps[2].1 = "A".into();
        assert!(matches!(load(&wrong_formula), Err(ProofError::Construction(_))));

        let mut bad_premise = good.clone();
        bad_premise.steps[2].4 = 7;
        assert!(load(&bad_premise).is_err());

        let mut bad_count = good.clone();
        bad_count.step_count = 4;
        assert!(load(&bad_count).is_err());

        let mut bad_flag = good.clone();
        bad_flag.terminated = false;
        assert!(load(&bad_flag).is_err());

        let mut bad_hyp = good.clone();
        bad_hyp.steps[0].1 = "(B >> A)".into();
        assert!(load(&bad_hyp).is_err());

        let mut bad_tag = good.clone();
        bad_tag.steps[2].2 = "XX".into();
        assert!(load(&bad_tag).is_err());

        let mut bad_axiom = good;
        bad_axiom.added_axioms.push("(A >> B)".into());
        assert!(load(&bad_axiom).is_err());
    }
}
