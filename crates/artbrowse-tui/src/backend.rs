use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use artbrowse_core::{CollectionSource, FetchRequest};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Backend command listener.
///
/// Each `FetchPage` command runs as its own task so the listener keeps
/// accepting commands while a slow page is in flight. Results are reported
/// on `tx` in whatever order they resolve; the app's `Browser` discards
/// answers to superseded requests. Cancelling `cancel` stops the listener
/// and drops every outstanding fetch.
pub async fn run(
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    tx: mpsc::UnboundedSender<BackendEvent>,
    source: Arc<dyn CollectionSource>,
    client: reqwest::Client,
    timeout: Duration,
    cancel: CancellationToken,
) {
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        match cmd {
            BackendCommand::FetchPage(request) => {
                let source = Arc::clone(&source);
                let client = client.clone();
                let tx = tx.clone();
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            tracing::debug!(page = request.page, seq = request.seq, "fetch cancelled");
                        }
                        event = fetch(source.as_ref(), &client, timeout, request) => {
                            let _ = tx.send(event);
                        }
                    }
                });
            }
        }
    }
}

/// Fetch one page and turn the outcome into a [`BackendEvent`]. Failures are
/// logged here and nowhere else.
pub async fn fetch(
    source: &dyn CollectionSource,
    client: &reqwest::Client,
    timeout: Duration,
    request: FetchRequest,
) -> BackendEvent {
    match source.fetch_page(request.page, client, timeout).await {
        Ok(page) => {
            tracing::info!(
                source = source.name(),
                page = request.page,
                records = page.records.len(),
                total = page.total,
                "page loaded"
            );
            BackendEvent::PageLoaded { request, page }
        }
        Err(e) => {
            tracing::warn!(
                source = source.name(),
                page = request.page,
                error = %e,
                "failed to fetch page"
            );
            BackendEvent::FetchFailed {
                request,
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artbrowse_core::api::mock::MockCollection;

    fn request(page: u32, seq: u64) -> FetchRequest {
        FetchRequest { page, seq }
    }

    #[tokio::test]
    async fn fetch_reports_loaded_page() {
        let source = MockCollection::with_total(30);
        let client = reqwest::Client::new();
        let event = fetch(&source, &client, Duration::from_secs(1), request(3, 1)).await;
        match event {
            BackendEvent::PageLoaded { request, page } => {
                assert_eq!(request.page, 3);
                assert_eq!(page.records.len(), 6);
                assert_eq!(page.total, 30);
            }
            other => panic!("expected PageLoaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_reports_failure() {
        let source = MockCollection::with_total(30).failing_on(2);
        let client = reqwest::Client::new();
        let event = fetch(&source, &client, Duration::from_secs(1), request(2, 7)).await;
        match event {
            BackendEvent::FetchFailed { request, error } => {
                assert_eq!(request.seq, 7);
                assert!(error.contains("500"), "{error}");
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listener_answers_every_command() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let source: Arc<dyn CollectionSource> = Arc::new(MockCollection::with_total(24));

        let handle = tokio::spawn(run(
            cmd_rx,
            event_tx,
            source,
            reqwest::Client::new(),
            Duration::from_secs(1),
            cancel.clone(),
        ));

        cmd_tx.send(BackendCommand::FetchPage(request(1, 1))).unwrap();
        cmd_tx.send(BackendCommand::FetchPage(request(2, 2))).unwrap();

        let mut seqs = Vec::new();
        for _ in 0..2 {
            match event_rx.recv().await.unwrap() {
                BackendEvent::PageLoaded { request, .. } => seqs.push(request.seq),
                other => panic!("unexpected {other:?}"),
            }
        }
        seqs.sort();
        assert_eq!(seqs, vec![1, 2]);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_outstanding_fetches() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let source: Arc<dyn CollectionSource> = Arc::new(
            MockCollection::with_total(24).with_delay(Duration::from_secs(30)),
        );

        let handle = tokio::spawn(run(
            cmd_rx,
            event_tx,
            source,
            reqwest::Client::new(),
            Duration::from_secs(60),
            cancel.clone(),
        ));
        cmd_tx.send(BackendCommand::FetchPage(request(1, 1))).unwrap();
        tokio::task::yield_now().await;

        cancel.cancel();
        handle.await.unwrap();
        // Every sender is gone once the fetch task observes the cancel.
        assert!(event_rx.recv().await.is_none());
    }
}
