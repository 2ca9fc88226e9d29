use chrono::{DateTime, Utc};
use tracing::debug;

use crate::store::Store;

/// Índice da última chave expirada em `keys`, ou `None` se nenhuma expirou.
///
/// `keys` vem de `Store::get_keys`, já ordenado por instante de morte, então
/// as expiradas formam um prefixo. A busca binária acha o fim desse prefixo
/// com O(log n) consultas ao store.
///
/// Cada sondagem refaz o `get` no store. Uma chave removida por outra thread
/// depois do snapshot conta como "não expirada".
pub fn find_cutoff(store: &Store, keys: &[String], now: DateTime<Utc>) -> Option<usize> {
    // partition_point é busca binária sobre o predicado "expirou"
    let expired = keys.partition_point(|key| {
        store
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(now))
    });
    expired.checked_sub(1)
}

/// Remove as entradas que morreram antes de `now`, com um único `batch_delete`.
/// Retorna quantas saíram.
///
/// O `batch_delete` usa as chaves do snapshot: uma chave reescrita por outra
/// thread depois do snapshot e antes da remoção sai junto, com o valor novo.
pub fn reap_at(store: &Store, now: DateTime<Utc>) -> usize {
    let keys = store.get_keys();
    let Some(cutoff) = find_cutoff(store, &keys, now) else {
        return 0;
    };

    let removed = store
        .batch_delete(&keys[..=cutoff])
        .into_iter()
        .filter(|&deleted| deleted)
        .count();
    debug!("{removed} chaves expiradas removidas (de {} no store)", keys.len());
    removed
}

pub fn reap(store: &Store) -> usize {
    reap_at(store, Utc::now())
}
