//! Плоская запись леджера для сохранения.
//!
//! ```json
//! {
//!   "hypothesis_list": ["(A >> B)", "A"],
//!   "consequence": "B",
//!   "terminated": true,
//!   "step_count": 3,
//!   "steps": [
//!     [0, "(A >> B)", "HYP", "", 0, 0],
//!     [1, "A", "HYP", "", 0, 0],
//!     [2, "B", "MP", "", 0, 1]
//!   ],
//!   "task_name": "{(A >> B), A} |- B",
//!   "added_axioms": []
//! }
//! ```
//!
//! Запись ничему не доверяет: при загрузке каждый шаг перепроверяется
//! (см. [`crate::Ledger::from_snapshot`]).

use serde::{Deserialize, Serialize};

use crate::error::ProofResult;

/// Сохранённый шаг: `[id, formula, action_tag, provenance_note, idx1, idx2]`.
///
/// Для шагов HYP и AXIOM индексы равны нулю; пометка непуста только у AXIOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord(
    pub usize,
    pub String,
    pub String,
    pub String,
    pub usize,
    pub usize,
);

impl StepRecord {
    pub fn id(&self) -> usize {
        self.0
    }

    pub fn formula(&self) -> &str {
        &self.1
    }

    /// Имя действия; допускается устаревшая форма `Actions.MP`.
    pub fn tag(&self) -> &str {
        self.2.strip_prefix("Actions.").unwrap_or(&self.2)
    }

    pub fn note(&self) -> &str {
        &self.3
    }

    pub fn premises(&self) -> (usize, usize) {
        (self.4, self.5)
    }
}

/// Снимок леджера.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub hypothesis_list: Vec<String>,
    pub consequence: String,
    pub terminated: bool,
    pub step_count: usize,
    pub steps: Vec<StepRecord>,
    /// Краткая запись задачи для списков сохранений.
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub added_axioms: Vec<String>,
}

impl Snapshot {
    pub fn to_json(&self) -> ProofResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ProofResult<Snapshot> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_record_is_flat_array() {
        let record = StepRecord(2, "B".into(), "MP".into(), String::new(), 0, 1);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"[2,"B","MP","",0,1]"#);
    }

    #[test]
    fn test_legacy_tag() {
        let record: StepRecord = serde_json::from_str(r#"[0, "A", "Actions.HYP", "", 0, 0]"#).unwrap();
        assert_eq!(record.tag(), "HYP");
        assert_eq!(record.premises(), (0, 0));
    }

    #[test]
    fn test_optional_fields() {
        let json = r#"{
            "hypothesis_list": ["A"],
            "consequence": "A",
            "terminated": true,
            "step_count": 0,
            "steps": []
        }"#;
        let snapshot = Snapshot::from_json(json).unwrap();
        assert!(snapshot.added_axioms.is_empty());
        assert!(snapshot.task_name.is_empty());
        assert!(Snapshot::from_json("{}").is_err());
    }
}
