use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use nr_core::{
    Article, CategoryStat, Error, Filter, NewsGateway, Result, TrendingKeyword, ViewModel,
};

use crate::store::FilterStore;

const COMMAND_BUFFER: usize = 16;

/// User intents routed through the feed task.
enum Command {
    Refresh,
    BulkRefresh(oneshot::Sender<Result<()>>),
    Select(Article),
    Dismiss,
}

/// Completions reported back by spawned request tasks.
enum Outcome {
    Articles {
        seq: u64,
        result: Result<Vec<Article>>,
    },
    Trending(Vec<TrendingKeyword>),
    Stats(Vec<CategoryStat>),
    BulkDone {
        outcome: Result<()>,
        ack: oneshot::Sender<Result<()>>,
    },
}

/// Handle to the feed task that owns the [`ViewModel`].
///
/// The task subscribes to filter changes, runs the read cycle (articles
/// plus the two best-effort analytics reads), applies completions under
/// a sequence guard so a superseded articles response never overwrites
/// a newer one, and publishes every applied change as a whole snapshot.
#[derive(Clone)]
pub struct NewsFeed {
    commands: mpsc::Sender<Command>,
    view_rx: watch::Receiver<ViewModel>,
    idle_rx: watch::Receiver<bool>,
}

impl NewsFeed {
    /// Spawn the feed task. An initial fetch cycle for the store's
    /// current filter starts immediately.
    pub fn spawn(gateway: Arc<dyn NewsGateway>, store: &FilterStore) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let (results_tx, results_rx) = mpsc::channel(COMMAND_BUFFER);

        // Startup state is already loading: the first cycle begins as
        // soon as the task runs, and waiters must not observe a settled
        // empty snapshot before it does.
        let initial = ViewModel {
            loading: true,
            ..ViewModel::default()
        };
        let (view_tx, view_rx) = watch::channel(initial.clone());
        let (idle_tx, idle_rx) = watch::channel(false);

        let task = FeedTask {
            gateway,
            filter_rx: store.subscribe(),
            filters_alive: true,
            commands: commands_rx,
            results: results_rx,
            results_tx,
            view_tx,
            idle_tx,
            view: initial,
            seq: 0,
            last_applied: 0,
            outstanding: 0,
        };
        tokio::spawn(task.run(store.current()));

        Self {
            commands: commands_tx,
            view_rx,
            idle_rx,
        }
    }

    /// Current snapshot.
    pub fn view(&self) -> ViewModel {
        self.view_rx.borrow().clone()
    }

    /// Subscription to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view_rx.clone()
    }

    /// Wait for the in-flight articles cycle to finish and return the
    /// snapshot. Best-effort reads may still be pending.
    pub async fn settled(&self) -> ViewModel {
        let mut rx = self.view_rx.clone();
        let snapshot = match rx.wait_for(|view| !view.loading).await {
            Ok(view) => view.clone(),
            Err(_) => self.view(),
        };
        snapshot
    }

    /// Wait until nothing at all is in flight, analytics included, and
    /// return the snapshot. One-shot consumers render from this.
    pub async fn quiescent(&self) -> ViewModel {
        let mut idle = self.idle_rx.clone();
        let _ = idle.wait_for(|idle| *idle).await;
        self.view()
    }

    /// Re-run the read cycle for the current filter.
    pub async fn refresh(&self) {
        let _ = self.commands.send(Command::Refresh).await;
    }

    /// Run the ingestion chain (bulk fetch, then analysis) and report
    /// its outcome. When ingestion succeeds the feed re-reads all three
    /// data sources, whatever happened to the analysis step.
    pub async fn bulk_refresh(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.commands
            .send(Command::BulkRefresh(ack_tx))
            .await
            .map_err(|_| Error::Refresh("feed task is no longer running".to_string()))?;
        match ack_rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::Refresh(
                "feed task stopped before the refresh finished".to_string(),
            )),
        }
    }

    /// Open the detail overlay for an article.
    pub async fn select(&self, article: Article) {
        let _ = self.commands.send(Command::Select(article)).await;
    }

    /// Close the detail overlay. The selection is retained so the next
    /// `select` always overwrites it before the overlay reopens.
    pub async fn dismiss(&self) {
        let _ = self.commands.send(Command::Dismiss).await;
    }
}

struct FeedTask {
    gateway: Arc<dyn NewsGateway>,
    filter_rx: watch::Receiver<Filter>,
    filters_alive: bool,
    commands: mpsc::Receiver<Command>,
    results: mpsc::Receiver<Outcome>,
    results_tx: mpsc::Sender<Outcome>,
    view_tx: watch::Sender<ViewModel>,
    idle_tx: watch::Sender<bool>,
    view: ViewModel,
    seq: u64,
    last_applied: u64,
    outstanding: usize,
}

impl FeedTask {
    async fn run(mut self, initial: Filter) {
        info!("📰 news feed started");
        self.begin_cycle(&initial);

        loop {
            tokio::select! {
                changed = self.filter_rx.changed(), if self.filters_alive => {
                    match changed {
                        Ok(()) => {
                            let filter = self.filter_rx.borrow_and_update().clone();
                            info!("🔎 filter changed: {filter:?}");
                            self.begin_cycle(&filter);
                        }
                        Err(_) => self.filters_alive = false,
                    }
                }
                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => break,
                    }
                }
                Some(outcome) = self.results.recv() => {
                    self.apply(outcome);
                }
            }
        }

        debug!("news feed stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Refresh => {
                let filter = self.filter_rx.borrow().clone();
                self.begin_cycle(&filter);
            }
            Command::BulkRefresh(ack) => self.begin_bulk_refresh(ack),
            Command::Select(article) => {
                debug!(id = %article.id, "article selected");
                self.view.selected = Some(article);
                self.view.overlay_open = true;
                self.publish();
            }
            Command::Dismiss => {
                self.view.overlay_open = false;
                self.publish();
            }
        }
    }

    /// Start a read cycle: the sequence-tagged articles request plus the
    /// two untagged best-effort reads.
    fn begin_cycle(&mut self, filter: &Filter) {
        self.seq += 1;
        let seq = self.seq;
        self.view.loading = true;
        self.view.error = None;
        self.publish();
        self.outstanding += 3;
        self.idle_tx.send_replace(false);
        debug!(seq, "fetch cycle started");

        let gateway = self.gateway.clone();
        let results = self.results_tx.clone();
        let filter = filter.clone();
        tokio::spawn(async move {
            let result = gateway.list_articles(&filter).await;
            let _ = results.send(Outcome::Articles { seq, result }).await;
        });

        let gateway = self.gateway.clone();
        let results = self.results_tx.clone();
        tokio::spawn(async move {
            let keywords = gateway.trending_keywords().await;
            let _ = results.send(Outcome::Trending(keywords)).await;
        });

        let gateway = self.gateway.clone();
        let results = self.results_tx.clone();
        tokio::spawn(async move {
            let stats = gateway.category_stats().await;
            let _ = results.send(Outcome::Stats(stats)).await;
        });
    }

    fn begin_bulk_refresh(&mut self, ack: oneshot::Sender<Result<()>>) {
        info!("🔄 bulk refresh requested");
        self.view.loading = true;
        self.publish();
        self.outstanding += 1;
        self.idle_tx.send_replace(false);

        let gateway = self.gateway.clone();
        let results = self.results_tx.clone();
        tokio::spawn(async move {
            let outcome = match gateway.trigger_bulk_fetch().await {
                Ok(()) => {
                    if let Err(err) = gateway.trigger_analysis().await {
                        warn!("analysis trigger failed: {err}");
                    }
                    Ok(())
                }
                Err(err) => Err(Error::Refresh(err.to_string())),
            };
            let _ = results.send(Outcome::BulkDone { outcome, ack }).await;
        });
    }

    fn apply(&mut self, outcome: Outcome) {
        self.outstanding = self.outstanding.saturating_sub(1);
        match outcome {
            Outcome::Articles { seq, result } => {
                // A response older than the newest applied one lost the
                // race; committing it would resurrect a stale filter.
                if seq <= self.last_applied {
                    debug!(seq, latest = self.last_applied, "superseded response discarded");
                } else {
                    self.last_applied = seq;
                    match result {
                        Ok(articles) => {
                            info!("✨ {} articles ready", articles.len());
                            self.view.articles = articles;
                            self.view.error = None;
                        }
                        Err(err) => {
                            warn!("⚠️ article fetch failed: {err}");
                            self.view.articles = Vec::new();
                            self.view.error = Some(err.to_string());
                        }
                    }
                    self.view.loading = false;
                    self.publish();
                }
            }
            Outcome::Trending(keywords) => {
                self.view.trending = keywords;
                self.publish();
            }
            Outcome::Stats(stats) => {
                self.view.category_stats = stats;
                self.publish();
            }
            Outcome::BulkDone { outcome, ack } => {
                match &outcome {
                    Ok(()) => {
                        info!("💾 ingestion complete, re-reading the feed");
                        let filter = self.filter_rx.borrow().clone();
                        self.begin_cycle(&filter);
                    }
                    Err(err) => {
                        warn!("⚠️ bulk refresh failed: {err}");
                        self.view.loading = false;
                        self.view.error = Some(err.to_string());
                        self.publish();
                    }
                }
                let _ = ack.send(outcome);
            }
        }
        self.idle_tx.send_replace(self.outstanding == 0);
    }

    fn publish(&self) {
        let _ = self.view_tx.send(self.view.clone());
    }
}
