use anyhow::Context;

use crate::db::{HISTORY_KEY, KvStore};
use crate::error::HistoryError;
use crate::models::{MAX_HISTORY_SIZE, NumberSet, split_input};

/// Lê o histórico gravado. Nunca falha: um blob ausente, ilegível ou
/// inválido resulta num histórico vazio.
pub fn read_history<S: KvStore>(store: &S) -> Vec<NumberSet> {
    let raw = match store.get(HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("Leitura do histórico impossível, histórico reiniciado: {e:#}");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<NumberSet>>(&raw) {
        Ok(mut sets) => {
            sets.truncate(MAX_HISTORY_SIZE);
            log::info!("{} conjuntos carregados", sets.len());
            sets
        }
        Err(e) => {
            log::warn!("Histórico gravado em formato inválido, histórico reiniciado: {e}");
            Vec::new()
        }
    }
}

pub struct HistoryStore<S: KvStore> {
    store: S,
    sets: Vec<NumberSet>,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn load(store: S) -> Self {
        let sets = read_history(&store);
        Self { store, sets }
    }

    pub fn sets(&self) -> &[NumberSet] {
        &self.sets
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add<T: AsRef<str>>(&mut self, candidate: &[T]) -> Result<NumberSet, HistoryError> {
        let set = NumberSet::parse(candidate)?;

        let mut next = self.sets.clone();
        next.push(set);
        if next.len() > MAX_HISTORY_SIZE {
            let overflow = next.len() - MAX_HISTORY_SIZE;
            next.drain(..overflow);
        }

        self.commit(next)?;
        Ok(set)
    }

    pub fn add_str(&mut self, input: &str) -> Result<NumberSet, HistoryError> {
        self.add(&split_input(input))
    }

    /// Substitui todo o histórico. Um único conjunto inválido rejeita o lote.
    pub fn import_batch(&mut self, candidates: &[Vec<i64>]) -> Result<usize, HistoryError> {
        let mut next = candidates
            .iter()
            .enumerate()
            .map(|(index, numbers)| {
                NumberSet::new(numbers)
                    .map_err(|source| HistoryError::InvalidImportEntry { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        next.truncate(MAX_HISTORY_SIZE);

        let count = next.len();
        self.commit(next)?;
        Ok(count)
    }

    pub fn import_json(&mut self, text: &str) -> Result<usize, HistoryError> {
        let candidates: Vec<Vec<i64>> = serde_json::from_str(text)
            .map_err(|e| HistoryError::MalformedImportFile(e.to_string()))?;
        self.import_batch(&candidates)
    }

    pub fn export(&self) -> Result<String, HistoryError> {
        if self.sets.is_empty() {
            return Err(HistoryError::EmptyHistory);
        }
        let json = serde_json::to_string_pretty(&self.sets)
            .context("Falha na serialização do histórico")?;
        Ok(json)
    }

    // Grava antes de trocar o estado em memória.
    fn commit(&mut self, next: Vec<NumberSet>) -> Result<(), HistoryError> {
        let json = serde_json::to_string(&next).context("Falha na serialização do histórico")?;
        self.store.set(HISTORY_KEY, &json)?;
        log::debug!("Histórico gravado ({} conjuntos)", next.len());
        self.sets = next;
        Ok(())
    }
}
