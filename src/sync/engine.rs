use crate::database::repositories::PriceRecordRepository;
use crate::quotes::QuoteClient;
use crate::sync::reconciler::{ReconcileOutcome, Reconciler};
use std::sync::Arc;

/// Per-symbol outcomes of one synchronization run
#[derive(Debug)]
pub struct SyncReport {
    pub outcomes: Vec<(String, ReconcileOutcome)>,
}

impl SyncReport {
    pub fn outcome_for(&self, symbol: &str) -> Option<&ReconcileOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == symbol)
            .map(|(_, outcome)| outcome)
    }

    pub fn synced(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, ReconcileOutcome::Created | ReconcileOutcome::Updated))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, ReconcileOutcome::Skipped(_)))
            .count()
    }
}

/// Synchronization engine - one complete pass over all tracked symbols
///
/// Symbols are reconciled in configured order; one symbol's failure never
/// prevents processing of the remaining symbols.
pub struct SyncEngine {
    reconciler: Reconciler,
    tracked_symbols: Vec<String>,
}

impl SyncEngine {
    pub fn new(
        repository: Arc<dyn PriceRecordRepository>,
        quote_client: Arc<dyn QuoteClient>,
        tracked_symbols: Vec<String>,
    ) -> Self {
        Self {
            reconciler: Reconciler::new(repository, quote_client),
            tracked_symbols,
        }
    }

    /// Execute one synchronization run
    ///
    /// Never fails as a whole; partial failure is reported per symbol.
    pub async fn run_once(&self) -> SyncReport {
        tracing::info!(
            "Starting synchronization run for {} symbols",
            self.tracked_symbols.len()
        );

        let mut outcomes = Vec::with_capacity(self.tracked_symbols.len());
        for symbol in &self.tracked_symbols {
            let outcome = self.reconciler.reconcile(symbol).await;
            outcomes.push((symbol.clone(), outcome));
        }

        let report = SyncReport { outcomes };
        tracing::info!(
            "Synchronization run completed: {} synced, {} skipped",
            report.synced(),
            report.skipped()
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::reconciler::SkipReason;
    use crate::sync::testkit::{InMemoryPriceStore, ScriptedFetch, ScriptedQuoteClient};

    #[tokio::test]
    async fn test_repeated_runs_are_idempotent() {
        let store = Arc::new(InMemoryPriceStore::new());
        let client = Arc::new(ScriptedQuoteClient::new());
        // Unchanged upstream quotes across both runs
        for _ in 0..2 {
            client.script("euro", ScriptedFetch::quote(100, 50));
            client.script("dollar", ScriptedFetch::quote(140, 120));
        }

        let engine = SyncEngine::new(
            store.clone(),
            client.clone(),
            vec!["euro".to_string(), "dollar".to_string()],
        );

        let first = engine.run_once().await;
        assert_eq!(first.synced(), 2);

        let second = engine.run_once().await;
        assert_eq!(second.synced(), 2);
        assert!(matches!(
            second.outcome_for("euro"),
            Some(ReconcileOutcome::Updated)
        ));

        // Exactly one record per symbol, identical values after both runs
        assert_eq!(store.record_count(), 2);
        let euro = store.find_by_name("euro").unwrap().unwrap();
        assert_eq!((euro.price, euro.base_price), (100, 50));
        let dollar = store.find_by_name("dollar").unwrap().unwrap();
        assert_eq!((dollar.price, dollar.base_price), (140, 120));
    }

    #[tokio::test]
    async fn test_one_symbol_failure_does_not_abort_the_run() {
        let store = Arc::new(InMemoryPriceStore::new());
        store.seed("euro", 25, 50);

        let client = Arc::new(ScriptedQuoteClient::new());
        client.script("euro", ScriptedFetch::fail());
        client.script("dollar", ScriptedFetch::quote(140, 120));

        let engine = SyncEngine::new(
            store.clone(),
            client.clone(),
            vec!["euro".to_string(), "dollar".to_string()],
        );

        let report = engine.run_once().await;

        assert!(matches!(
            report.outcome_for("euro"),
            Some(ReconcileOutcome::Skipped(SkipReason::Fetch(_)))
        ));
        assert!(matches!(
            report.outcome_for("dollar"),
            Some(ReconcileOutcome::Created)
        ));

        // euro's existing record is unchanged, dollar's was still created
        let euro = store.find_by_name("euro").unwrap().unwrap();
        assert_eq!((euro.price, euro.base_price), (25, 50));
        let dollar = store.find_by_name("dollar").unwrap().unwrap();
        assert_eq!((dollar.price, dollar.base_price), (140, 120));
    }

    #[tokio::test]
    async fn test_symbols_are_processed_in_configured_order() {
        let store = Arc::new(InMemoryPriceStore::new());
        let client = Arc::new(ScriptedQuoteClient::new());
        client.script("euro", ScriptedFetch::quote(100, 50));
        client.script("dollar", ScriptedFetch::quote(140, 120));

        let engine = SyncEngine::new(
            store.clone(),
            client.clone(),
            vec!["euro".to_string(), "dollar".to_string()],
        );

        let report = engine.run_once().await;
        let order: Vec<&str> = report.outcomes.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, vec!["euro", "dollar"]);
    }
}
