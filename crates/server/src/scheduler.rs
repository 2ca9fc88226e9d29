use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::{self, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, error, info};

use tempocache_storage::{Store, reap};

/// Background task que chama o reaper a cada `period`.
///
/// Encerra quando o canal de shutdown recebe um valor ou é fechado.
pub fn spawn_reaper(
    store: Store,
    period: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = IntervalStream::new(ticker);

    tokio::spawn(async move {
        info!("reaper iniciado, intervalo {period:?}");
        loop {
            tokio::select! {
                Some(_) = ticks.next() => {
                    // Sweep bloqueante: lock de escrita e cópia de todas as chaves
                    let sweep = store.clone();
                    match task::spawn_blocking(move || reap(&sweep)).await {
                        Ok(0) => {}
                        Ok(removed) => {
                            debug!("reaper: {removed} chaves expiradas, {} restantes", store.count());
                        }
                        Err(e) => error!("reaper falhou: {e}"),
                    }
                }
                _ = shutdown.recv() => {
                    info!("reaper encerrado");
                    return;
                }
            }
        }
    })
}
