use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::entry::Entry;

/// Item no BTreeSet de expiração: (instante de morte, chave).
/// Ordenado por instante; empates ficam ordenados pela chave.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
struct ExpiryEntry(DateTime<Utc>, String);

/// Mapa principal + índice de expiração. Só é acessado sob o lock do `Store`,
/// então os dois nunca divergem para quem está de fora.
#[derive(Debug, Default)]
struct State {
    data: HashMap<String, Entry>,
    expiry: BTreeSet<ExpiryEntry>,
}

impl State {
    fn insert(&mut self, key: String, entry: Entry) {
        let death_time = entry.death_time();
        if let Some(old) = self.data.insert(key.clone(), entry) {
            self.expiry.remove(&ExpiryEntry(old.death_time(), key.clone()));
        }
        self.expiry.insert(ExpiryEntry(death_time, key));
    }

    fn remove(&mut self, key: &str) -> bool {
        match self.data.remove_entry(key) {
            Some((key, old)) => {
                self.expiry.remove(&ExpiryEntry(old.death_time(), key));
                true
            }
            None => false,
        }
    }
}

/// Handle para o cache in-memory.
///
/// Clonar o handle é barato; todos os clones compartilham o mesmo estado.
/// Leituras pegam o lock compartilhado, escritas o exclusivo.
#[derive(Debug, Clone, Default)]
pub struct Store {
    shared: Arc<RwLock<State>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insere ou substitui por completo a entrada de `key`.
    pub fn set(&self, key: impl Into<String>, entry: Entry) {
        let key = key.into();
        debug!("set {key} (morre em {})", entry.death_time());
        self.shared.write().insert(key, entry);
    }

    /// Não verifica expiração: quem decide é o reaper ou o chamador.
    pub fn get(&self, key: &str) -> Option<Entry> {
        self.shared.read().data.get(key).cloned()
    }

    /// Snapshot das chaves em ordem crescente de instante de morte.
    pub fn get_keys(&self) -> Vec<String> {
        self.shared
            .read()
            .expiry
            .iter()
            .map(|e| e.1.clone())
            .collect()
    }

    pub fn delete(&self, key: &str) -> bool {
        let removed = self.shared.write().remove(key);
        debug!("delete {key}: {removed}");
        removed
    }

    /// Remove várias chaves numa única seção crítica.
    /// Retorna um bool por chave, na ordem de entrada.
    pub fn batch_delete<K: AsRef<str>>(&self, keys: &[K]) -> Vec<bool> {
        let results: Vec<bool> = {
            let mut state = self.shared.write();
            keys.iter().map(|key| state.remove(key.as_ref())).collect()
        };
        let removed = results.iter().filter(|&&r| r).count();
        debug!("batch_delete: {removed} de {} chaves removidas", keys.len());
        results
    }

    pub fn contains(&self, key: &str) -> bool {
        self.shared.read().data.contains_key(key)
    }

    pub fn count(&self) -> usize {
        self.shared.read().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn clear(&self) {
        let mut state = self.shared.write();
        debug!("clear: {} chaves removidas", state.data.len());
        *state = State::default();
    }
}
