//! Product catalog lifecycle and refresh loop.
//!
//! # Responsibilities
//! - Start: create the catalog and spawn the refresh loop (first fetch is immediate)
//! - Refresh: fetch, publish on success, pace failures with exponential backoff
//! - Stop: signal the loop and wait for it to exit
//!
//! # Refresh Timing
//! ```text
//! fetch ok    → publish snapshot, backoff.reset(), wait refresh_interval
//! fetch error → keep current snapshot, wait backoff.next_delay()
//! shutdown    → exit immediately, even mid-fetch or mid-wait
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::auth::AuthContext;
use crate::config::AdapterConfig;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::product::catalog::ProductCatalog;
use crate::product::fetcher::{FetchError, HttpProductFetcher, ProductFetcher};
use crate::product::types::ApiProduct;
use crate::resilience::ExponentialBackoff;

/// Owns the product catalog and the task that keeps it current.
pub struct ProductManager {
    catalog: Arc<ProductCatalog>,
    shutdown: Shutdown,
    task: JoinHandle<()>,
}

impl ProductManager {
    /// Start refreshing a new catalog from `fetcher`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<F: ProductFetcher>(
        fetcher: F,
        refresh_interval: Duration,
        backoff: ExponentialBackoff,
    ) -> Self {
        let catalog = Arc::new(ProductCatalog::new());
        let shutdown = Shutdown::new();

        let refresher = CatalogRefresher {
            fetcher,
            catalog: catalog.clone(),
            refresh_interval,
            backoff,
        };
        let signal = shutdown.subscribe();
        let task = tokio::spawn(refresher.run(signal));

        Self {
            catalog,
            shutdown,
            task,
        }
    }

    /// Start refreshing from the management API named in the configuration.
    pub fn start_http(config: &AdapterConfig) -> Result<Self, FetchError> {
        let fetcher = HttpProductFetcher::from_base(
            &config.catalog.base_url,
            config.catalog.fetch_timeout(),
        )?;

        tracing::info!(
            url = %fetcher.products_url(),
            refresh_interval_secs = config.catalog.refresh_interval_secs,
            "Starting product catalog"
        );

        Ok(Self::start(
            fetcher,
            config.catalog.refresh_interval(),
            ExponentialBackoff::from_config(&config.backoff),
        ))
    }

    /// Shared handle to the catalog.
    pub fn catalog(&self) -> Arc<ProductCatalog> {
        self.catalog.clone()
    }

    /// Resolve the products authorizing a call against the current catalog.
    pub fn resolve(&self, ctx: &AuthContext, target: &str, path: &str) -> Vec<Arc<ApiProduct>> {
        self.catalog.resolve(ctx, target, path)
    }

    /// Stop the refresh loop and wait for it to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Product catalog refresh task failed");
        }
        tracing::info!("Product catalog stopped");
    }
}

/// Background loop keeping a catalog in sync with its source.
struct CatalogRefresher<F> {
    fetcher: F,
    catalog: Arc<ProductCatalog>,
    refresh_interval: Duration,
    backoff: ExponentialBackoff,
}

impl<F: ProductFetcher> CatalogRefresher<F> {
    async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            let result = tokio::select! {
                result = self.fetcher.fetch() => result,
                _ = shutdown.recv() => break,
            };

            let wait = self.on_fetch(result);

            tokio::select! {
                _ = sleep(wait) => {}
                _ = shutdown.recv() => break,
            }
        }

        tracing::debug!("Catalog refresher received shutdown signal, exiting loop");
    }

    /// Apply a fetch result and return how long to wait before the next fetch.
    fn on_fetch(&mut self, result: Result<Vec<ApiProduct>, FetchError>) -> Duration {
        match result {
            Ok(products) => {
                let snapshot = self.catalog.publish(products);
                self.backoff.reset();
                metrics::record_refresh("success");
                tracing::info!(
                    version = snapshot.version(),
                    products = snapshot.len(),
                    "Product catalog refreshed"
                );
                self.refresh_interval
            }
            Err(e) => {
                let delay = self.backoff.next_delay();
                metrics::record_refresh("failure");
                tracing::warn!(
                    error = %e,
                    attempt = self.backoff.attempt(),
                    retry_in_ms = delay.as_millis() as u64,
                    "Product catalog fetch failed, keeping current catalog"
                );
                delay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fetcher replaying scripted results, then repeating the last one.
    struct ScriptedFetcher {
        script: Mutex<VecDeque<Result<Vec<ApiProduct>, u16>>>,
        calls: Arc<AtomicU32>,
    }

    impl ScriptedFetcher {
        fn new(script: Vec<Result<Vec<ApiProduct>, u16>>) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            let fetcher = Self {
                script: Mutex::new(script.into()),
                calls: calls.clone(),
            };
            (fetcher, calls)
        }
    }

    impl ProductFetcher for ScriptedFetcher {
        fn fetch(&self) -> impl Future<Output = Result<Vec<ApiProduct>, FetchError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = {
                let mut script = self.script.lock().unwrap();
                if script.len() > 1 {
                    script.pop_front().unwrap()
                } else {
                    script.front().cloned().unwrap_or(Err(500))
                }
            };
            async move { next.map_err(FetchError::Status) }
        }
    }

    fn gold() -> ApiProduct {
        ApiProduct::new("gold")
            .with_attribute("istio-services", "svcA")
            .with_resource("/v1/foo")
    }

    fn fast_backoff() -> ExponentialBackoff {
        ExponentialBackoff::new(Duration::from_millis(5), Duration::from_millis(20), 2.0, false)
    }

    async fn wait_for_version(catalog: &ProductCatalog, version: u64) {
        for _ in 0..200 {
            if catalog.version() >= version {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!("catalog never reached version {}", version);
    }

    #[tokio::test]
    async fn test_first_fetch_publishes() {
        let (fetcher, calls) = ScriptedFetcher::new(vec![Ok(vec![gold()])]);
        let manager = ProductManager::start(fetcher, Duration::from_secs(3600), fast_backoff());

        wait_for_version(&manager.catalog(), 1).await;

        let ctx = AuthContext::with_products(["gold"]);
        assert_eq!(manager.resolve(&ctx, "svcA", "/v1/foo").len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        manager.stop().await;
    }

    #[tokio::test]
    async fn test_failures_are_retried_until_success() {
        let (fetcher, calls) = ScriptedFetcher::new(vec![
            Err(503),
            Err(503),
            Err(500),
            Ok(vec![gold()]),
        ]);
        let manager = ProductManager::start(fetcher, Duration::from_secs(3600), fast_backoff());

        wait_for_version(&manager.catalog(), 1).await;
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        manager.stop().await;
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_snapshot() {
        let (fetcher, _calls) = ScriptedFetcher::new(vec![Ok(vec![gold()]), Err(502)]);
        let manager = ProductManager::start(fetcher, Duration::from_millis(10), fast_backoff());

        wait_for_version(&manager.catalog(), 1).await;
        sleep(Duration::from_millis(100)).await;

        let catalog = manager.catalog();
        assert_eq!(catalog.version(), 1);
        assert!(catalog.snapshot().get("gold").is_some());

        manager.stop().await;
    }

    #[tokio::test]
    async fn test_periodic_refresh_publishes_new_versions() {
        let (fetcher, _calls) = ScriptedFetcher::new(vec![Ok(vec![gold()])]);
        let manager = ProductManager::start(fetcher, Duration::from_millis(10), fast_backoff());

        wait_for_version(&manager.catalog(), 3).await;

        manager.stop().await;
    }

    #[tokio::test]
    async fn test_stop_interrupts_long_wait() {
        let (fetcher, calls) = ScriptedFetcher::new(vec![Ok(vec![gold()])]);
        let manager = ProductManager::start(fetcher, Duration::from_secs(3600), fast_backoff());
        wait_for_version(&manager.catalog(), 1).await;

        tokio::time::timeout(Duration::from_secs(2), manager.stop())
            .await
            .expect("stop should not wait for the refresh interval");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_on_fetch_paces_with_backoff() {
        let (fetcher, _calls) = ScriptedFetcher::new(vec![]);
        let mut refresher = CatalogRefresher {
            fetcher,
            catalog: Arc::new(ProductCatalog::new()),
            refresh_interval: Duration::from_secs(120),
            backoff: ExponentialBackoff::new(
                Duration::from_millis(200),
                Duration::from_secs(1),
                2.0,
                false,
            ),
        };

        assert_eq!(refresher.on_fetch(Err(FetchError::Status(500))), Duration::from_millis(200));
        assert_eq!(refresher.on_fetch(Err(FetchError::Status(500))), Duration::from_millis(400));
        assert_eq!(refresher.on_fetch(Err(FetchError::Status(500))), Duration::from_millis(800));
        assert_eq!(refresher.on_fetch(Err(FetchError::Status(500))), Duration::from_secs(1));
        assert_eq!(refresher.backoff.attempt(), 4);

        assert_eq!(refresher.on_fetch(Ok(vec![gold()])), Duration::from_secs(120));
        assert_eq!(refresher.backoff.attempt(), 0);
        assert_eq!(refresher.catalog.version(), 1);

        assert_eq!(refresher.on_fetch(Err(FetchError::Status(500))), Duration::from_millis(200));
    }
}
