use crate::domain::model::{FetchResult, NormalizedCode, RaceOutcome};
use crate::domain::ports::{Provider, SharedProvider};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Upper bound on how long `race` waits for cancelled losers to wind down
/// before aborting them.
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Sends the same lookup to every provider at once and keeps the first
/// successful answer.
///
/// The decision is taken as soon as one of these happens:
/// - a provider delivers a [`FetchResult`] (checked first, so a result that is
///   already queued beats a deadline firing in the same poll),
/// - `deadline` elapses,
/// - every provider has finished without delivering anything.
///
/// Provider errors are logged and otherwise ignored. Before returning, the
/// shared token is cancelled and the remaining tasks get [`SHUTDOWN_GRACE`] to
/// finish; stragglers are aborted.
pub async fn race(
    code: &NormalizedCode,
    providers: &[SharedProvider],
    deadline: Duration,
) -> RaceOutcome {
    if providers.is_empty() {
        tracing::warn!("No providers supplied, nothing to race");
        return RaceOutcome::NoValidResponse;
    }

    tracing::debug!(
        cep = %code,
        contestants = providers.len(),
        deadline_ms = deadline.as_millis() as u64,
        "Starting race"
    );

    let started = Instant::now();
    let cancel = CancellationToken::new();
    // One slot per contestant: a finished task never waits on the coordinator.
    let (tx, mut rx) = mpsc::channel::<FetchResult>(providers.len());
    let mut tasks = JoinSet::new();

    for provider in providers {
        let provider = Arc::clone(provider);
        let code = code.clone();
        let cancel = cancel.clone();
        let tx = tx.clone();

        tasks.spawn(async move {
            match provider.fetch(&code, cancel).await {
                Ok(result) => {
                    if tx.try_send(result).is_err() {
                        tracing::debug!(
                            provider = provider.name(),
                            "Result arrived after the race was decided, discarding"
                        );
                    }
                }
                Err(e) if e.is_cancelled() => {
                    tracing::debug!(provider = provider.name(), "Fetch cancelled");
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "Provider failed");
                }
            }
        });
    }
    // Only the tasks hold senders now, so the channel closes once all finish.
    drop(tx);

    let timer = tokio::time::sleep(deadline);
    tokio::pin!(timer);

    let outcome = tokio::select! {
        biased;

        received = rx.recv() => match received {
            Some(result) => {
                tracing::info!(
                    provider = %result.source,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Race won"
                );
                RaceOutcome::Winner(result)
            }
            None => {
                tracing::warn!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Every provider finished without a usable result"
                );
                RaceOutcome::NoValidResponse
            }
        },
        _ = &mut timer => {
            tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Race timed out");
            RaceOutcome::Timeout { deadline }
        }
    };

    cancel.cancel();
    rx.close();
    shutdown(tasks).await;

    outcome
}

async fn shutdown(mut tasks: JoinSet<()>) {
    let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                if e.is_panic() {
                    tracing::error!(error = %e, "Provider task panicked");
                }
            }
        }
    })
    .await;

    if drained.is_err() {
        tracing::warn!(
            remaining = tasks.len(),
            "Aborting provider tasks that ignored cancellation"
        );
        tasks.abort_all();
    }
}
