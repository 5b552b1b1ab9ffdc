//! Генератор случайных задач.
//!
//! Каждая формула содержит от одной до пяти переменных; перед переменной
//! отрицание ставится с вероятностью 1/6. Листья собираются в случайное
//! бинарное дерево, поэтому формулы всегда с полной расстановкой скобок.
//! Задача перегенерируется, пока проверка выводимости не пройдёт.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ProofError, ProofResult};
use crate::formula::{alphabet_index, Formula};
use crate::ledger::ProofTask;

/// Максимальное число листьев в одной формуле.
const MAX_LEAVES: usize = 5;

/// Сколько раз перегенерировать задачу, прежде чем сдаться.
pub const DEFAULT_ATTEMPTS: usize = 10_000;

/// Генератор задач поверх произвольного источника случайности.
pub struct TaskGenerator<R: Rng> {
    rng: R,
    max_attempts: usize,
}

impl TaskGenerator<StdRng> {
    /// Воспроизводимый генератор.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TaskGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Сгенерировать выводимую задачу из `count` гипотез над `variables`.
    pub fn generate(&mut self, count: usize, variables: &[char]) -> ProofResult<ProofTask> {
        check_variables(variables)?;

        for attempt in 1..=self.max_attempts {
            let hypotheses = (0..count).map(|_| self.formula(variables)).collect();
            let task = ProofTask::new(hypotheses, self.formula(variables));
            if task.is_provable() {
                log::debug!("generated {} after {} attempts", task, attempt);
                return Ok(task);
            }
        }
        log::warn!(
            "no provable task with {} hypotheses over {:?} in {} attempts",
            count,
            variables,
            self.max_attempts
        );
        Err(ProofError::NotProvable)
    }

    /// Случайная формула с полной расстановкой скобок; `variables` не пуст.
    fn formula(&mut self, variables: &[char]) -> Formula {
        let leaves = self.rng.random_range(1..=MAX_LEAVES);
        self.tree(variables, leaves)
    }

    /// Дерево из `leaves` листьев со случайной точкой разбиения.
    fn tree(&mut self, variables: &[char], leaves: usize) -> Formula {
        if leaves <= 1 {
            return self.leaf(variables);
        }
        let split = self.rng.random_range(1..leaves);
        let left = self.tree(variables, split);
        let right = self.tree(variables, leaves - split);
        match self.rng.random_range(0..3) {
            0 => Formula::implies(left, right),
            1 => Formula::or(left, right),
            _ => Formula::and(left, right),
        }
    }

    fn leaf(&mut self, variables: &[char]) -> Formula {
        let var = Formula::var(variables[self.rng.random_range(0..variables.len())]);
        if self.rng.random_range(0..6) == 0 {
            Formula::not(var)
        } else {
            var
        }
    }
}

fn check_variables(variables: &[char]) -> ProofResult<()> {
    if variables.is_empty() {
        return Err(ProofError::Construction("no variables given".to_string()));
    }
    if let Some(bad) = variables.iter().find(|c| alphabet_index(**c).is_none()) {
        return Err(ProofError::InvalidFormula(bad.to_string()));
    }
    Ok(())
}

/// Сгенерировать задачу на потоковом генераторе.
pub fn generate_task(count: usize, variables: &[char]) -> ProofResult<ProofTask> {
    TaskGenerator::new(rand::rng()).generate(count, variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator;

    #[test]
    fn test_formulas_are_well_formed() {
        let mut generator = TaskGenerator::seeded(7);
        for _ in 0..200 {
            let formula = generator.formula(&['A', 'B', 'C']);
            let text = formula.to_string();
            assert!(validator::is_well_formed(&text), "{}", text);
            assert!(formula.variables().iter().all(|v| "ABC".contains(*v)));
        }
    }

    #[test]
    fn test_generated_tasks_are_provable() {
        let mut generator = TaskGenerator::seeded(42);
        for count in 0..4 {
            let task = generator.generate(count, &['A', 'B']).unwrap();
            assert_eq!(task.hypotheses.len(), count);
            assert!(task.is_provable());
        }
    }

    #[test]
    fn test_same_seed_same_task() {
        let a = TaskGenerator::seeded(1).generate(2, &['A', 'K']).unwrap();
        let b = TaskGenerator::seeded(1).generate(2, &['A', 'K']).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_variables() {
        assert!(generate_task(1, &[]).is_err());
        assert!(matches!(
            generate_task(1, &['E']),
            Err(ProofError::InvalidFormula(_))
        ));
    }

    #[test]
    fn test_gives_up() {
        // С нулём попыток задачи не получить
        let mut generator = TaskGenerator::seeded(3).with_max_attempts(0);
        assert!(matches!(
            generator.generate(1, &['A']),
            Err(ProofError::NotProvable)
        ));
    }
}
