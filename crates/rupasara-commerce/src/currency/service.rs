//! Display-currency state and price conversion.

use crate::currency::{RateSource, RateTable};
use crate::error::{CommerceError, RateFetchError};
use crate::money::{format_amount, Currency};
use parking_lot::RwLock;
use rupasara_cache::Cache;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Preference key holding the selected currency code.
pub const CURRENCY_PREFERENCE_KEY: &str = "currency";

/// Owns the selected display currency and the rate table.
///
/// Catalog prices stay in the base currency; every displayed amount is
/// derived here. Conversions read whatever rates are current and never wait
/// on a refresh.
#[derive(Debug, Clone)]
pub struct CurrencyService {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    state: RwLock<State>,
    prefs: Cache,
    revision: watch::Sender<u64>,
}

#[derive(Debug)]
struct State {
    currency: Currency,
    rates: RateTable,
    refreshes_in_flight: usize,
}

impl CurrencyService {
    /// Create the service, restoring the persisted currency if there is one.
    pub fn new(prefs: Cache) -> Self {
        let currency = restore_currency(&prefs);
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(State {
                    currency,
                    rates: RateTable::fallback(),
                    refreshes_in_flight: 0,
                }),
                prefs,
                revision,
            }),
        }
    }

    /// The selected display currency.
    pub fn currency(&self) -> Currency {
        self.inner.state.read().currency
    }

    /// Copy of the current rate table.
    pub fn rates(&self) -> RateTable {
        self.inner.state.read().rates.clone()
    }

    /// Whether a rate refresh is in flight.
    pub fn is_loading_rates(&self) -> bool {
        self.inner.state.read().refreshes_in_flight > 0
    }

    /// Select a display currency and persist the choice.
    ///
    /// Persistence failures are logged and otherwise ignored.
    pub fn set_currency(&self, currency: Currency) {
        {
            // Persisting under the guard keeps the stored choice in step with memory.
            let mut state = self.inner.state.write();
            state.currency = currency;
            if let Err(e) = self.inner.prefs.set(CURRENCY_PREFERENCE_KEY, &currency) {
                tracing::warn!(%currency, error = %e, "failed to persist currency preference");
            }
        }
        tracing::debug!(%currency, "display currency changed");
        self.bump();
    }

    /// Forget the stored choice and fall back to the base currency.
    ///
    /// Unlike [`set_currency`](Self::set_currency), a store failure is returned
    /// and the selection is left as it was.
    pub fn reset_currency(&self) -> Result<(), CommerceError> {
        {
            let mut state = self.inner.state.write();
            self.inner.prefs.delete(CURRENCY_PREFERENCE_KEY)?;
            state.currency = Currency::BASE;
        }
        tracing::debug!("currency preference cleared");
        self.bump();
        Ok(())
    }

    /// Convert a base-currency amount into the selected currency.
    pub fn convert(&self, amount: Decimal) -> Decimal {
        let state = self.inner.state.read();
        amount.saturating_mul(state.rates.factor(state.currency))
    }

    /// Like [`convert`](Self::convert), with a missing amount treated as zero.
    pub fn convert_opt(&self, amount: Option<Decimal>) -> Decimal {
        self.convert(amount.unwrap_or(Decimal::ZERO))
    }

    /// Convert and format a base-currency amount, e.g. `€52.47`.
    pub fn format(&self, amount: Decimal) -> String {
        let (currency, converted) = {
            let state = self.inner.state.read();
            let factor = state.rates.factor(state.currency);
            (state.currency, amount.saturating_mul(factor))
        };
        format_amount(converted, currency)
    }

    /// Refresh rates from `source`.
    ///
    /// On failure the rates already in effect are kept. The error is returned
    /// for reporting only; the service has already recovered from it.
    pub async fn refresh_rates(&self, source: &dyn RateSource) -> Result<(), RateFetchError> {
        self.inner.state.write().refreshes_in_flight += 1;
        self.bump();

        let result = source.fetch_rates().await;
        self.settle(result, true)
    }

    /// Apply the outcome of a rate fetch: replace the whole table on success,
    /// keep the current one on failure.
    pub fn apply_refresh(
        &self,
        result: Result<RateTable, RateFetchError>,
    ) -> Result<(), RateFetchError> {
        self.settle(result, false)
    }

    // The table swap and the end of loading land under one write lock.
    fn settle(
        &self,
        result: Result<RateTable, RateFetchError>,
        finishes_refresh: bool,
    ) -> Result<(), RateFetchError> {
        let outcome = {
            let mut state = self.inner.state.write();
            if finishes_refresh {
                state.refreshes_in_flight = state.refreshes_in_flight.saturating_sub(1);
            }
            match result {
                Ok(rates) => {
                    tracing::info!(
                        eur = %rates.factor(Currency::EUR),
                        usd = %rates.factor(Currency::USD),
                        "exchange rates updated"
                    );
                    state.rates = rates;
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "rate refresh failed, keeping current rates");
                    Err(e)
                }
            }
        };
        self.bump();
        outcome
    }

    /// Refresh rates in a background task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_refresh(&self, source: Arc<dyn RateSource>) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            // Already logged and recovered.
            let _ = service.refresh_rates(source.as_ref()).await;
        })
    }

    /// Observe changes to currency, rates, or loading state.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|rev| *rev += 1);
    }
}

fn restore_currency(prefs: &Cache) -> Currency {
    match prefs.get::<String>(CURRENCY_PREFERENCE_KEY) {
        Ok(Some(code)) => Currency::from_code(&code).unwrap_or_else(|| {
            tracing::warn!(%code, "ignoring unsupported stored currency");
            Currency::BASE
        }),
        Ok(None) => Currency::BASE,
        Err(e) => {
            tracing::warn!(error = %e, "could not read currency preference");
            Currency::BASE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    struct FixedSource(Result<RateTable, RateFetchError>);

    #[async_trait]
    impl RateSource for FixedSource {
        async fn fetch_rates(&self) -> Result<RateTable, RateFetchError> {
            self.0.clone()
        }
    }

    struct GatedSource {
        gate: Arc<Notify>,
        rates: RateTable,
    }

    #[async_trait]
    impl RateSource for GatedSource {
        async fn fetch_rates(&self) -> Result<RateTable, RateFetchError> {
            self.gate.notified().await;
            Ok(self.rates.clone())
        }
    }

    fn live_rates() -> RateTable {
        RateTable::from_factors([
            (Currency::INR, Decimal::ONE),
            (Currency::EUR, dec("0.0105")),
            (Currency::USD, dec("0.0121")),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults_to_base_currency() {
        let service = CurrencyService::new(Cache::in_memory());
        assert_eq!(service.currency(), Currency::INR);
        assert_eq!(service.rates(), RateTable::fallback());
        assert!(!service.is_loading_rates());
    }

    #[test]
    fn test_convert_is_identity_in_base() {
        let service = CurrencyService::new(Cache::in_memory());
        assert_eq!(service.convert(dec("4770")), dec("4770"));
        assert_eq!(service.format(dec("4770")), "\u{20b9}4,770");
    }

    #[test]
    fn test_convert_eur_is_exact() {
        let service = CurrencyService::new(Cache::in_memory());
        service.set_currency(Currency::EUR);

        assert_eq!(service.convert(dec("4770")), dec("52.47"));
        assert_eq!(service.format(dec("4770")), "\u{20ac}52.47");
        assert_eq!(service.convert_opt(None), Decimal::ZERO);
    }

    #[test]
    fn test_format_usd() {
        let service = CurrencyService::new(Cache::in_memory());
        service.set_currency(Currency::USD);
        assert_eq!(service.format(dec("4770")), "$57.24");
    }

    #[test]
    fn test_currency_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let service = CurrencyService::new(Cache::open(&path).unwrap());
        service.set_currency(Currency::USD);
        drop(service);

        let restored = CurrencyService::new(Cache::open(&path).unwrap());
        assert_eq!(restored.currency(), Currency::USD);
    }

    #[test]
    fn test_unsupported_stored_currency_falls_back() {
        let prefs = Cache::in_memory();
        prefs.set(CURRENCY_PREFERENCE_KEY, &"GBP").unwrap();
        assert_eq!(CurrencyService::new(prefs).currency(), Currency::INR);
    }

    #[test]
    fn test_persistence_failure_still_switches() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let prefs = Cache::open(blocker.join("preferences.json")).unwrap();
        let service = CurrencyService::new(prefs);
        service.set_currency(Currency::EUR);

        assert_eq!(service.currency(), Currency::EUR);
    }

    #[test]
    fn test_concurrent_switches_persist_the_final_choice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let service = CurrencyService::new(Cache::open(&path).unwrap());

        for _ in 0..25 {
            let barrier = Arc::new(std::sync::Barrier::new(2));
            let handles: Vec<_> = [Currency::EUR, Currency::USD]
                .into_iter()
                .map(|currency| {
                    let service = service.clone();
                    let barrier = barrier.clone();
                    std::thread::spawn(move || {
                        barrier.wait();
                        service.set_currency(currency);
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let stored = CurrencyService::new(Cache::open(&path).unwrap());
            assert_eq!(stored.currency(), service.currency());
        }
    }

    #[test]
    fn test_reset_forgets_stored_currency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let service = CurrencyService::new(Cache::open(&path).unwrap());
        service.set_currency(Currency::EUR);
        service.reset_currency().unwrap();
        assert_eq!(service.currency(), Currency::INR);

        let restored = CurrencyService::new(Cache::open(&path).unwrap());
        assert_eq!(restored.currency(), Currency::INR);

        // Nothing stored is still a successful reset.
        restored.reset_currency().unwrap();
    }

    #[test]
    fn test_reset_failure_keeps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let service = CurrencyService::new(Cache::open(blocker.join("preferences.json")).unwrap());
        service.set_currency(Currency::USD);

        assert!(matches!(
            service.reset_currency(),
            Err(CommerceError::Preferences(_))
        ));
        assert_eq!(service.currency(), Currency::USD);
    }

    #[tokio::test]
    async fn test_refresh_replaces_table() {
        let service = CurrencyService::new(Cache::in_memory());
        service.set_currency(Currency::EUR);

        let result = service.refresh_rates(&FixedSource(Ok(live_rates()))).await;

        assert!(result.is_ok());
        assert_eq!(service.rates(), live_rates());
        assert_eq!(service.convert(dec("1000")), dec("10.5"));
        assert!(!service.is_loading_rates());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_rates() {
        let service = CurrencyService::new(Cache::in_memory());
        let source = FixedSource(Err(RateFetchError::Incomplete(Currency::USD)));

        let result = service.refresh_rates(&source).await;

        assert_eq!(result, Err(RateFetchError::Incomplete(Currency::USD)));
        assert_eq!(service.rates(), RateTable::fallback());
        assert!(!service.is_loading_rates());
    }

    #[tokio::test]
    async fn test_conversions_proceed_during_refresh() {
        let service = CurrencyService::new(Cache::in_memory());
        service.set_currency(Currency::EUR);

        let gate = Arc::new(Notify::new());
        let source = Arc::new(GatedSource {
            gate: gate.clone(),
            rates: live_rates(),
        });

        let mut rx = service.subscribe();
        let handle = service.spawn_refresh(source);

        while !service.is_loading_rates() {
            rx.changed().await.unwrap();
        }
        assert_eq!(service.convert(dec("4770")), dec("52.47"));

        // A currency switch during the fetch applies to the new table too.
        service.set_currency(Currency::USD);

        gate.notify_one();
        handle.await.unwrap();

        assert!(!service.is_loading_rates());
        assert_eq!(service.currency(), Currency::USD);
        assert_eq!(service.convert(dec("1000")), dec("12.1"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_loading_ends_with_new_rates_in_place() {
        let service = CurrencyService::new(Cache::in_memory());
        let tables = [live_rates(), RateTable::fallback()];

        for round in 0..40 {
            let expected = tables[round % 2].clone();
            let gate = Arc::new(Notify::new());
            let source = Arc::new(GatedSource {
                gate: gate.clone(),
                rates: expected.clone(),
            });

            let mut rx = service.subscribe();
            let handle = service.spawn_refresh(source);
            while !service.is_loading_rates() {
                rx.changed().await.unwrap();
            }

            let reader = {
                let service = service.clone();
                std::thread::spawn(move || loop {
                    let state = service.inner.state.read();
                    if state.refreshes_in_flight == 0 {
                        return state.rates.clone();
                    }
                })
            };

            gate.notify_one();
            handle.await.unwrap();
            assert_eq!(reader.join().unwrap(), expected);
        }
    }
}
