//! Автоматический решатель.
//!
//! Ограниченный перебор в два слоя:
//!
//! 1. проверка выводимости по таблице истинности (без поиска);
//! 2. все гипотезы как шаги HYP;
//! 3. замыкание по правилам над растущим списком шагов;
//! 4. подстановка кандидатов во все базовые схемы аксиом;
//! 5. повторное замыкание по правилам.
//!
//! Если следствие не выведено, решатель честно сообщает
//! [`ProofError::ProofNotFound`]: процедура неполна. После успеха обратный
//! обход происхождения оставляет только шаги, нужные для следствия.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ProofError, ProofResult};
use crate::formula::Formula;
use crate::ledger::{AxiomPool, Ledger, ProofTask};
use crate::rules::Rule;

/// Настройки решателя.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Предел числа шагов леджера; превышение означает "не найдено".
    pub max_steps: Option<usize>,
}

/// Найденное доказательство: номера нужных шагов по возрастанию
/// и их строки отображения.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Proof {
    pub indices: Vec<usize>,
    pub lines: Vec<String>,
}

impl Proof {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Порядки подстановки для схем от трёх переменных.
const TERNARY_ORDERS: [[usize; 3]; 27] = [
    // перестановки
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
    // диагонали
    [0, 0, 0],
    [1, 1, 1],
    [2, 2, 2],
    // повторы
    [0, 0, 1],
    [0, 0, 2],
    [0, 1, 0],
    [0, 2, 0],
    [1, 0, 0],
    [2, 0, 0],
    [1, 1, 0],
    [1, 1, 2],
    [1, 0, 1],
    [1, 2, 1],
    [0, 1, 1],
    [2, 1, 1],
    [2, 2, 0],
    [2, 2, 1],
    [2, 0, 2],
    [2, 1, 2],
    [0, 2, 2],
    [1, 2, 2],
];

/// Порядки подстановки для схем от двух переменных.
const BINARY_ORDERS: [[usize; 2]; 4] = [[0, 1], [1, 0], [0, 0], [1, 1]];

/// Решатель.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Найти доказательство следствия, дописывая шаги в леджер.
    ///
    /// Невыводимая задача отвергается до поиска, леджер при этом не
    /// получает ни одного шага (гипотезы-тавтологии всё же удаляются).
    pub fn solve(&self, ledger: &mut Ledger) -> ProofResult<Proof> {
        ledger.prune_tautologies();
        if !ledger.is_provable() {
            log::info!("precheck failed for {}", ledger.summary());
            return Err(ProofError::NotProvable);
        }
        log::info!("solving {}", ledger.summary());

        if !ledger.is_terminated() {
            self.seed(ledger)?;
        }
        if !ledger.is_terminated() {
            self.close_under_rules(ledger)?;
        }
        if !ledger.is_terminated() {
            let pool = candidate_pool(ledger.task());
            log::info!(
                "rule closure left {} steps, trying axioms with {} candidates",
                ledger.len(),
                pool.len()
            );
            self.instantiate_axioms(ledger, &pool)?;
        }
        if !ledger.is_terminated() {
            self.close_under_rules(ledger)?;
        }
        if !ledger.is_terminated() {
            log::info!("proof not found after {} steps", ledger.len());
            return Err(ProofError::ProofNotFound);
        }

        let proof = extract_proof(ledger);
        log::info!(
            "proof found: {} of {} steps are needed",
            proof.len(),
            ledger.len()
        );
        Ok(proof)
    }

    fn within_budget(&self, ledger: &Ledger) -> ProofResult<()> {
        match self.config.max_steps {
            Some(max) if ledger.len() >= max => {
                log::info!("step budget of {} exhausted", max);
                Err(ProofError::ProofNotFound)
            }
            _ => Ok(()),
        }
    }

    /// Все гипотезы по порядку; повторы пропускаются.
    fn seed(&self, ledger: &mut Ledger) -> ProofResult<()> {
        let hypotheses = ledger.task().hypotheses.clone();
        for hypothesis in hypotheses {
            if ledger.is_terminated() {
                break;
            }
            if ledger.contains(&hypothesis) {
                continue;
            }
            self.within_budget(ledger)?;
            match ledger.insert_hypothesis(hypothesis) {
                Ok(_) => {}
                Err(e) if e.is_duplicate() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Все правила над всеми упорядоченными парами растущего списка шагов.
    fn close_under_rules(&self, ledger: &mut Ledger) -> ProofResult<()> {
        let mut i = 0;
        while i < ledger.len() {
            let mut j = 0;
            while j < ledger.len() {
                if i != j {
                    for rule in Rule::ALL {
                        self.within_budget(ledger)?;
                        if let Err(e) = ledger.add_rule_step(rule, i, j) {
                            log::trace!("{}({},{}) rejected: {}", rule, i + 1, j + 1, e);
                        }
                        if ledger.is_terminated() {
                            return Ok(());
                        }
                    }
                }
                j += 1;
            }
            i += 1;
        }
        Ok(())
    }

    /// Подстановка кандидатов во все базовые схемы от одной, двух и трёх
    /// переменных.
    fn instantiate_axioms(&self, ledger: &mut Ledger, pool: &[Formula]) -> ProofResult<()> {
        for position in 0..ledger.base_axioms().len() {
            let arity = match ledger.base_axioms().get(position) {
                Some(axiom) => axiom.arity(),
                None => continue,
            };
            match arity {
                1 => {
                    for a in pool {
                        self.try_axiom(ledger, position, &[a])?;
                        if ledger.is_terminated() {
                            return Ok(());
                        }
                    }
                }
                2 => {
                    for a in pool {
                        for b in pool {
                            let pair = [a, b];
                            for order in BINARY_ORDERS {
                                self.try_axiom(ledger, position, &[pair[order[0]], pair[order[1]]])?;
                                if ledger.is_terminated() {
                                    return Ok(());
                                }
                            }
                        }
                    }
                }
                3 => {
                    for a in pool {
                        for b in pool {
                            for c in pool {
                                let triple = [a, b, c];
                                for order in TERNARY_ORDERS {
                                    let data = [triple[order[0]], triple[order[1]], triple[order[2]]];
                                    self.try_axiom(ledger, position, &data)?;
                                    if ledger.is_terminated() {
                                        return Ok(());
                                    }
                                }
                            }
                        }
                    }
                }
                _ => log::debug!("schema {} with {} variables is skipped", position + 1, arity),
            }
        }
        Ok(())
    }

    fn try_axiom(&self, ledger: &mut Ledger, position: usize, data: &[&Formula]) -> ProofResult<()> {
        self.within_budget(ledger)?;
        let data: Vec<Formula> = data.iter().map(|f| (*f).clone()).collect();
        if let Err(e) = ledger.instantiate_axiom(AxiomPool::Base, position, &data) {
            log::trace!("axiom {} rejected: {}", position + 1, e);
        }
        Ok(())
    }
}

/// Решить задачу леджера с настройками по умолчанию.
pub fn solve(ledger: &mut Ledger) -> ProofResult<Proof> {
    Solver::default().solve(ledger)
}

/// Кандидаты для подстановки: каждая гипотеза и её отрицание, её
/// переменные и их отрицания, операнд отрицательной гипотезы, следствие
/// и его отрицание. Без повторов, по возрастанию канонической записи.
pub fn candidate_pool(task: &ProofTask) -> Vec<Formula> {
    let mut pool: Vec<Formula> = Vec::new();
    for hypothesis in &task.hypotheses {
        pool.push(hypothesis.clone());
        pool.push(hypothesis.negated());
        for var in hypothesis.variables() {
            pool.push(Formula::var(var));
            pool.push(Formula::not(Formula::var(var)));
        }
        if let Some(operand) = hypothesis.as_negation() {
            pool.push(operand.clone());
        }
    }
    pool.push(task.consequence.clone());
    pool.push(task.consequence.negated());

    let mut keyed: Vec<(String, Formula)> = pool.into_iter().map(|f| (f.to_string(), f)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);
    keyed.into_iter().map(|(_, f)| f).collect()
}

/// Обратный обход происхождения от шага со следствием.
///
/// Если следствие является гипотезой задачи и в шагах его нет, доказательство пусто.
pub fn extract_proof(ledger: &Ledger) -> Proof {
    let goal = match ledger.position(&ledger.task().consequence) {
        Some(goal) => goal,
        None => return Proof::default(),
    };

    let mut needed = BTreeSet::new();
    let mut work = vec![goal];
    while let Some(id) = work.pop() {
        if !needed.insert(id) {
            continue;
        }
        if let Some((first, second)) = ledger.step(id).and_then(|s| s.premises()) {
            work.push(first);
            work.push(second);
        }
    }

    let indices: Vec<usize> = needed.into_iter().collect();
    let lines = indices
        .iter()
        .filter_map(|&id| ledger.step(id))
        .map(|step| step.render())
        .collect();
    Proof { indices, lines }
}
