//! Хранилище снимков леджера: JSON-файлы в одном каталоге.
//!
//! Ядро файловой системы не касается; этот модуль служит внешней оболочкой
//! для CLI. По умолчанию каталог `<data_dir>/hilbert/saves`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::axioms::AxiomSet;
use crate::error::{ProofError, ProofResult};
use crate::ledger::{Ledger, Snapshot};

/// Расширение файлов снимков.
const EXTENSION: &str = "json";

/// Каталог сохранений по умолчанию.
pub fn default_root() -> PathBuf {
    dirs_next::data_dir()
        .map(|p| p.join("hilbert").join("saves"))
        .unwrap_or_else(|| PathBuf::from(".hilbert_saves"))
}

/// Хранилище снимков.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Хранилище в каталоге по умолчанию.
    pub fn open_default() -> Self {
        Self::new(default_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Путь к файлу снимка по имени.
    pub fn path_for(&self, name: &str) -> ProofResult<PathBuf> {
        let name = name.trim();
        if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') || name.starts_with('.') {
            return Err(ProofError::Io(format!("invalid save name '{}'", name)));
        }
        let file = if name.ends_with(".json") {
            name.to_string()
        } else {
            format!("{}.{}", name, EXTENSION)
        };
        Ok(self.root.join(file))
    }

    /// Сохранить снимок, перезаписав файл с тем же именем.
    pub fn save(&self, name: &str, snapshot: &Snapshot) -> ProofResult<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.root).map_err(|e| {
            ProofError::Io(format!("Failed to create {}: {}", self.root.display(), e))
        })?;
        fs::write(&path, snapshot.to_json()?).map_err(|e| {
            ProofError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        log::debug!("saved {} to {}", snapshot.task_name, path.display());
        Ok(path)
    }

    /// Прочитать снимок по имени.
    pub fn load(&self, name: &str) -> ProofResult<Snapshot> {
        let path = self.path_for(name)?;
        Self::load_path(&path)
    }

    /// Прочитать снимок из произвольного файла.
    pub fn load_path(path: &Path) -> ProofResult<Snapshot> {
        let json = fs::read_to_string(path).map_err(|e| {
            ProofError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Snapshot::from_json(&json)
    }

    /// Сохранить леджер.
    pub fn save_ledger(&self, name: &str, ledger: &Ledger) -> ProofResult<PathBuf> {
        self.save(name, &ledger.to_snapshot())
    }

    /// Загрузить и перепроверить леджер.
    pub fn load_ledger(&self, name: &str, base_axioms: AxiomSet) -> ProofResult<Ledger> {
        let snapshot = self.load(name)?;
        Ledger::from_snapshot(&snapshot, base_axioms)
    }

    /// Имена сохранений по алфавиту. Для несуществующего каталога список пуст.
    pub fn list(&self) -> ProofResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
