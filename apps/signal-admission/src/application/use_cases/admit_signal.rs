//! Admit Signal Use Case
//!
//! Gathers everything the risk gate needs through the driven ports, runs the
//! validator, persists circuit breaker transitions and commits approved
//! positions. Validate and commit for one user run under that user's lock so
//! concurrent candidates never share a stale open-positions snapshot.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::future::{join_all, try_join_all};
use rust_decimal::prelude::ToPrimitive;

use crate::application::dto::{AdmissionDecision, AdmissionRequest};
use crate::application::errors::AdmissionError;
use crate::application::ports::{
    CircuitBreakerStore, ClosedTradeHistory, Clock, OpenPositionStore, PortfolioConfigStore,
    RepositoryError, ReturnsProvider, SectorLookup,
};
use crate::domain::portfolio::{OpenPosition, SectorInfo};
use crate::domain::risk_management::messages;
use crate::domain::risk_management::{
    BreakerTransition, RiskValidationResult, RiskValidator, TrailingReturns, ValidationInput,
    Verdict,
};
use crate::domain::shared::{Symbol, UserId};
use crate::observability::{
    record_admission, record_circuit_breaker_trigger, record_repository_failure,
    update_portfolio_heat,
};

/// Driven ports used by the admission pipeline.
#[derive(Clone)]
pub struct AdmissionPorts {
    /// Per-user portfolio limits.
    pub configs: Arc<dyn PortfolioConfigStore>,
    /// Open positions and the commit point.
    pub positions: Arc<dyn OpenPositionStore>,
    /// Closed trade journal.
    pub trades: Arc<dyn ClosedTradeHistory>,
    /// Suspension records.
    pub breakers: Arc<dyn CircuitBreakerStore>,
    /// Symbol classification.
    pub sectors: Arc<dyn SectorLookup>,
    /// Daily returns.
    pub returns: Arc<dyn ReturnsProvider>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
}

/// Tunables that are not rule settings.
#[derive(Debug, Clone)]
pub struct AdmissionOptions {
    /// Deadline for each repository call.
    pub read_timeout: Duration,
    /// Index the candidate is correlated against.
    pub benchmark: Symbol,
    /// Classification for symbols the sector lookup does not know.
    pub fallback_sector: SectorInfo,
}

impl Default for AdmissionOptions {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(2000),
            benchmark: Symbol::new("IHSG"),
            fallback_sector: SectorInfo::unclassified(),
        }
    }
}

type UserLocks = HashMap<UserId, Arc<tokio::sync::Mutex<()>>>;

/// Use case for admitting candidate signals into a portfolio.
pub struct AdmitSignalUseCase {
    validator: RiskValidator,
    ports: AdmissionPorts,
    options: AdmissionOptions,
    locks: Mutex<UserLocks>,
}

impl AdmitSignalUseCase {
    /// Create a new AdmitSignalUseCase.
    pub fn new(validator: RiskValidator, ports: AdmissionPorts, options: AdmissionOptions) -> Self {
        Self {
            validator,
            ports,
            options,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Run the pipeline without persisting anything.
    ///
    /// The answer reflects the portfolio as read now; another admission may
    /// change it before the caller acts on it.
    pub async fn evaluate(
        &self,
        request: AdmissionRequest,
    ) -> Result<AdmissionDecision, AdmissionError> {
        let started = Instant::now();
        let now = self.ports.clock.now();
        let result = match self.gather(&request, now).await {
            Ok(input) => {
                let result = self.validator.validate(&input);
                Self::check_invariants(&input, &result, self.validator.settings().sizer.lot_size())?;
                result
            }
            Err(rejection) => rejection,
        };
        Ok(self.finish(request, result, false, started))
    }

    /// Validate and, when approved, open the position.
    ///
    /// Holds the user's lock from the first read until the commit so the
    /// heat budget is checked against the positions it will be added to.
    pub async fn admit(
        &self,
        request: AdmissionRequest,
    ) -> Result<AdmissionDecision, AdmissionError> {
        let user = request.user.clone();
        let lock = self.user_lock(&user);
        let decision = {
            let _guard = lock.lock().await;
            self.admit_locked(request).await
        };
        self.release_lock(&user, lock);
        decision
    }

    async fn admit_locked(
        &self,
        request: AdmissionRequest,
    ) -> Result<AdmissionDecision, AdmissionError> {
        let started = Instant::now();
        let now = self.ports.clock.now();
        let (result, committed) = match self.gather(&request, now).await {
            Ok(input) => {
                let result = self.validator.validate(&input);
                Self::check_invariants(&input, &result, self.validator.settings().sizer.lot_size())?;
                let result = self.apply_transitions(result, now).await;
                self.commit(&request, result).await
            }
            Err(rejection) => (rejection, false),
        };
        Ok(self.finish(request, result, committed, started))
    }

    /// Admit a batch concurrently.
    ///
    /// Candidates for different users proceed in parallel; candidates for the
    /// same user are serialized by the per-user lock.
    pub async fn admit_all(
        &self,
        requests: Vec<AdmissionRequest>,
    ) -> Result<Vec<AdmissionDecision>, AdmissionError> {
        join_all(requests.into_iter().map(|r| self.admit(r)))
            .await
            .into_iter()
            .collect()
    }

    fn user_lock(&self, user: &UserId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(user.clone()).or_default())
    }

    /// Drop the user's lock entry once no other admission holds or awaits it.
    fn release_lock(&self, user: &UserId, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one here.
        if Arc::strong_count(&lock) <= 2 {
            locks.remove(user);
        }
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    async fn guarded<T, F>(&self, store: &'static str, call: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, RepositoryError>>,
    {
        match tokio::time::timeout(self.options.read_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RepositoryError::unavailable(
                store,
                format!("timed out after {}ms", self.options.read_timeout.as_millis()),
            )),
        }
    }

    /// Read every input for one validation. `Err` carries the rejection to
    /// return instead of validating.
    async fn gather(
        &self,
        request: &AdmissionRequest,
        now: DateTime<Utc>,
    ) -> Result<ValidationInput, RiskValidationResult> {
        let user = &request.user;
        let config = match self
            .guarded("portfolio_config", self.ports.configs.get(user))
            .await
        {
            Ok(Some(config)) => config,
            Ok(None) => {
                tracing::info!(user = %user, "No portfolio configuration; rejecting signal");
                return Err(RiskValidationResult::rejected(
                    Verdict::Wait,
                    messages::config_missing(user.as_str()),
                ));
            }
            Err(e) => return Err(Self::unavailable(&e)),
        };
        if let Err(e) = config.validate() {
            tracing::warn!(user = %user, error = %e, "Portfolio configuration rejected");
            return Err(RiskValidationResult::rejected(
                Verdict::Wait,
                messages::config_invalid(&e.to_string()),
            ));
        }

        let breaker_enabled = config.circuit_breaker_enabled;
        let history = async {
            if !breaker_enabled {
                return Ok((Vec::new(), None, None));
            }
            tokio::try_join!(
                self.guarded("closed_trades", self.ports.trades.list(user)),
                self.guarded("circuit_breaker", self.ports.breakers.get_active(user)),
                self.guarded("circuit_breaker", self.ports.breakers.latest_resolved(user)),
            )
        };
        let lookback = self.validator.settings().correlation_lookback;
        let symbol = &request.candidate.symbol;
        let returns = async {
            tokio::try_join!(
                self.guarded("returns", self.ports.returns.trailing(symbol, lookback)),
                self.guarded(
                    "returns",
                    self.ports.returns.trailing(&self.options.benchmark, lookback)
                ),
            )
        };

        let gathered = tokio::try_join!(
            self.guarded("open_positions", self.ports.positions.list_open(user)),
            history,
            self.guarded("sectors", self.ports.sectors.get(symbol)),
            returns,
        );
        let (positions, (trades, active, resolved), candidate_sector, (candidate, benchmark)) =
            match gathered {
                Ok(gathered) => gathered,
                Err(e) => return Err(Self::unavailable(&e)),
            };

        let position_sectors = match self.position_sectors(&positions).await {
            Ok(sectors) => sectors,
            Err(e) => return Err(Self::unavailable(&e)),
        };

        tracing::debug!(
            user = %user,
            symbol = %symbol,
            open_positions = positions.len(),
            closed_trades = trades.len(),
            suspended = active.is_some(),
            "Risk inputs gathered"
        );

        Ok(
            ValidationInput::new(request.candidate.clone(), config, now)
                .with_positions(positions)
                .with_position_sectors(position_sectors)
                .with_candidate_sector(
                    candidate_sector.unwrap_or_else(|| self.options.fallback_sector.clone()),
                )
                .with_closed_trades(trades)
                .with_active_suspension(active)
                .with_resume_after(resolved.map(|e| e.suspended_from))
                .with_returns(Some(TrailingReturns {
                    candidate,
                    benchmark,
                })),
        )
    }

    async fn position_sectors(
        &self,
        positions: &[OpenPosition],
    ) -> Result<HashMap<Symbol, SectorInfo>, RepositoryError> {
        let symbols: HashSet<&Symbol> = positions.iter().map(|p| &p.symbol).collect();
        let lookups = symbols.into_iter().map(|symbol| async move {
            let info = self.guarded("sectors", self.ports.sectors.get(symbol)).await?;
            Ok::<_, RepositoryError>((
                symbol.clone(),
                info.unwrap_or_else(|| self.options.fallback_sector.clone()),
            ))
        });
        Ok(try_join_all(lookups).await?.into_iter().collect())
    }

    fn unavailable(err: &RepositoryError) -> RiskValidationResult {
        tracing::warn!(
            store = err.store(),
            error = %err,
            "Risk data read failed; holding signal"
        );
        record_repository_failure(err.store());
        RiskValidationResult::rejected(Verdict::Wait, messages::data_unavailable())
            .with_warnings(vec![messages::data_unavailable_detail(&err.to_string())])
    }

    fn check_invariants(
        input: &ValidationInput,
        result: &RiskValidationResult,
        lot_size: u64,
    ) -> Result<(), AdmissionError> {
        if result.heat_after < result.heat_before {
            return Err(AdmissionError::internal(format!(
                "heat decreased from {} to {}",
                result.heat_before, result.heat_after
            )));
        }
        if !result.passed {
            return Ok(());
        }
        let (Some(shares), Some(exposure), Some(cap), Some(_)) = (
            result.shares,
            result.exposure_pct,
            result.applied_cap.as_ref(),
            result.risk_taken,
        ) else {
            return Err(AdmissionError::internal("approved result without a size"));
        };
        if shares == 0 || shares % lot_size != 0 {
            return Err(AdmissionError::internal(format!(
                "{shares} shares is not a positive multiple of {lot_size}"
            )));
        }
        if exposure > cap.limit {
            return Err(AdmissionError::internal(format!(
                "exposure {exposure} above cap {}",
                cap.limit
            )));
        }
        if result.heat_after > input.config.max_heat {
            return Err(AdmissionError::internal(format!(
                "heat {} above limit {}",
                result.heat_after, input.config.max_heat
            )));
        }
        Ok(())
    }

    /// Store breaker transitions the validator reported.
    ///
    /// A trigger that cannot be stored blocks an approval: a suspension that
    /// was computed but lost must not let trading continue.
    async fn apply_transitions(
        &self,
        mut result: RiskValidationResult,
        now: DateTime<Utc>,
    ) -> RiskValidationResult {
        for transition in result.breaker_transitions.clone() {
            match transition {
                BreakerTransition::Expired { event_id } => {
                    match self
                        .guarded("circuit_breaker", self.ports.breakers.resolve(&event_id, now))
                        .await
                    {
                        Ok(()) => {
                            tracing::info!(event_id = %event_id, "Suspension expired and resolved");
                        }
                        Err(e) => {
                            tracing::warn!(event_id = %event_id, error = %e, "Failed to resolve suspension");
                            record_repository_failure(e.store());
                            result
                                .warnings
                                .push(messages::data_unavailable_detail(&e.to_string()));
                        }
                    }
                }
                BreakerTransition::Triggered { event } => {
                    record_circuit_breaker_trigger(event.trigger.as_str());
                    tracing::info!(
                        user = %event.user,
                        trigger = %event.trigger,
                        value = %event.trigger_value,
                        until = %event.suspended_until,
                        "Circuit breaker triggered"
                    );
                    if let Err(e) = self
                        .guarded("circuit_breaker", self.ports.breakers.persist(&event))
                        .await
                    {
                        tracing::warn!(event_id = %event.id, error = %e, "Failed to persist suspension");
                        record_repository_failure(e.store());
                        let detail = messages::data_unavailable_detail(&e.to_string());
                        if result.passed {
                            let heat = result.heat_before;
                            let mut warnings = std::mem::take(&mut result.warnings);
                            warnings.push(detail);
                            result = RiskValidationResult::rejected(
                                Verdict::Wait,
                                messages::data_unavailable(),
                            )
                            .with_heat(heat, heat)
                            .with_warnings(warnings)
                            .with_transitions(std::mem::take(&mut result.breaker_transitions));
                        } else {
                            result.warnings.push(detail);
                        }
                    }
                }
            }
        }
        result
    }

    async fn commit(
        &self,
        request: &AdmissionRequest,
        mut result: RiskValidationResult,
    ) -> (RiskValidationResult, bool) {
        let (true, Some(shares), Some(risk)) = (result.passed, result.shares, result.risk_taken)
        else {
            return (result, false);
        };
        let candidate = &request.candidate;
        let position = OpenPosition::new(candidate.symbol.clone(), risk, shares, candidate.entry_price);

        match self
            .guarded(
                "open_positions",
                self.ports.positions.open_position(&request.user, position),
            )
            .await
        {
            Ok(()) => (result, true),
            Err(e) => {
                tracing::warn!(
                    user = %request.user,
                    symbol = %candidate.symbol,
                    error = %e,
                    "Failed to commit approved position"
                );
                record_repository_failure(e.store());
                let heat = result.heat_before;
                let mut warnings = std::mem::take(&mut result.warnings);
                warnings.push(messages::data_unavailable_detail(&e.to_string()));
                let rejected = RiskValidationResult::rejected(
                    Verdict::Wait,
                    messages::data_unavailable(),
                )
                .with_heat(heat, heat)
                .with_warnings(warnings)
                .with_transitions(std::mem::take(&mut result.breaker_transitions));
                (rejected, false)
            }
        }
    }

    fn finish(
        &self,
        request: AdmissionRequest,
        result: RiskValidationResult,
        committed: bool,
        started: Instant,
    ) -> AdmissionDecision {
        let decision = AdmissionDecision {
            user: request.user,
            symbol: request.candidate.symbol,
            result,
            committed,
        };
        let verdict = decision.result.verdict.map_or("none", |v| v.as_str());
        record_admission(
            decision.outcome(),
            verdict,
            started.elapsed().as_secs_f64(),
        );

        let result = &decision.result;
        if committed {
            update_portfolio_heat(
                decision.user.as_str(),
                result.heat_after.to_f64().unwrap_or_default(),
            );
        }
        if result.passed {
            tracing::info!(
                user = %decision.user,
                symbol = %decision.symbol,
                shares = result.shares.unwrap_or_default(),
                heat_after = %result.heat_after,
                committed,
                "Signal approved"
            );
        } else {
            tracing::info!(
                user = %decision.user,
                symbol = %decision.symbol,
                verdict,
                reason = result.block_reason.as_deref().unwrap_or_default(),
                "Signal rejected"
            );
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        FixedClock, MockCircuitBreakerStore, MockOpenPositionStore, MockPortfolioConfigStore,
    };
    use crate::domain::portfolio::{CandidateSignal, ClosedTrade, MarketCapCategory, PortfolioConfig};
    use crate::domain::risk_management::TriggerType;
    use crate::infrastructure::persistence::{
        InMemoryPortfolioStore, InMemoryReturnsProvider, StaticSectorMap,
    };
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, 10, 0, 0).unwrap()
    }

    fn user() -> UserId {
        UserId::new("u1")
    }

    fn request(symbol: &str, entry: Decimal, stop: Decimal) -> AdmissionRequest {
        AdmissionRequest::new(user(), CandidateSignal::new(symbol, entry, stop))
    }

    fn store() -> Arc<InMemoryPortfolioStore> {
        let store = Arc::new(InMemoryPortfolioStore::new());
        store.put_config(PortfolioConfig::with_defaults(user(), dec!(1_000_000_000)));
        store
    }

    fn ports(store: Arc<InMemoryPortfolioStore>) -> AdmissionPorts {
        AdmissionPorts {
            configs: store.clone(),
            positions: store.clone(),
            trades: store.clone(),
            breakers: store,
            sectors: Arc::new(StaticSectorMap::new([(
                "ASII",
                SectorInfo::new("Automotive", MarketCapCategory::Large),
            )])),
            returns: Arc::new(InMemoryReturnsProvider::new()),
            clock: Arc::new(FixedClock(now())),
        }
    }

    fn use_case(ports: AdmissionPorts) -> AdmitSignalUseCase {
        AdmitSignalUseCase::new(RiskValidator::default(), ports, AdmissionOptions::default())
    }

    #[tokio::test]
    async fn admit_commits_approved_position() {
        let store = store();
        let uc = use_case(ports(store.clone()));

        let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(decision.committed);
        assert_eq!(decision.outcome(), "admitted");
        assert_eq!(decision.result.shares, Some(25_000));
        let open = store.positions(&user());
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].quantity, 25_000);
        assert_eq!(open[0].risk_fraction, dec!(0.01));
    }

    #[tokio::test]
    async fn evaluate_does_not_commit() {
        let store = store();
        let uc = use_case(ports(store.clone()));

        let decision = uc.evaluate(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(decision.result.passed);
        assert!(!decision.committed);
        assert_eq!(decision.outcome(), "approved");
        assert!(store.positions(&user()).is_empty());
    }

    #[tokio::test]
    async fn sequential_admissions_see_committed_heat() {
        let store = store();
        let uc = use_case(ports(store.clone()));

        for _ in 0..8 {
            let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();
            assert!(decision.committed);
        }
        let blocked = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(!blocked.committed);
        assert_eq!(blocked.result.heat_before, dec!(0.08));
        assert_eq!(store.positions(&user()).len(), 8);
    }

    #[tokio::test]
    async fn user_locks_are_released_when_idle() {
        let uc = use_case(ports(store()));
        let other = UserId::new("u2");

        let decisions = uc
            .admit_all(vec![
                request("ASII", dec!(7_200), dec!(6_800)),
                request("ASII", dec!(7_200), dec!(6_800)),
                AdmissionRequest::new(other, CandidateSignal::new("ASII", dec!(7_200), dec!(6_800))),
            ])
            .await
            .unwrap();

        assert_eq!(decisions.len(), 3);
        assert_eq!(uc.tracked_users(), 0);
    }

    #[tokio::test]
    async fn user_lock_kept_while_shared() {
        let uc = use_case(ports(store()));

        let held = uc.user_lock(&user());
        uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();
        assert_eq!(uc.tracked_users(), 1);

        drop(held);
        uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();
        assert_eq!(uc.tracked_users(), 0);
    }

    #[tokio::test]
    async fn missing_config_is_instructive_rejection() {
        let store = Arc::new(InMemoryPortfolioStore::new());
        let uc = use_case(ports(store));

        let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(!decision.result.passed);
        assert!(!decision.committed);
        assert_eq!(decision.result.verdict, Some(Verdict::Wait));
        let reason = decision.result.block_reason.unwrap();
        assert!(reason.contains("No portfolio configuration"));
    }

    #[tokio::test]
    async fn failing_config_store_holds_signal() {
        let mut configs = MockPortfolioConfigStore::new();
        configs
            .expect_get()
            .returning(|_| Err(RepositoryError::unavailable("portfolio_config", "down")));
        let mut ports = ports(store());
        ports.configs = Arc::new(configs);
        let uc = use_case(ports);

        let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(!decision.result.passed);
        assert_eq!(decision.result.verdict, Some(Verdict::Wait));
        assert!(decision.result.warnings.iter().any(|w| w.contains("portfolio_config")));
    }

    #[tokio::test]
    async fn failing_position_store_never_approves() {
        let mut positions = MockOpenPositionStore::new();
        positions
            .expect_list_open()
            .returning(|_| Err(RepositoryError::unavailable("open_positions", "refused")));
        positions.expect_open_position().never();
        let mut ports = ports(store());
        ports.positions = Arc::new(positions);
        let uc = use_case(ports);

        let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(!decision.result.passed);
        assert!(!decision.committed);
        assert_eq!(
            decision.result.block_reason.as_deref(),
            Some(messages::data_unavailable())
        );
    }

    #[tokio::test]
    async fn failed_commit_is_reported_as_rejection() {
        let mut positions = MockOpenPositionStore::new();
        positions.expect_list_open().returning(|_| Ok(Vec::new()));
        positions
            .expect_open_position()
            .times(1)
            .returning(|_, _| Err(RepositoryError::unavailable("open_positions", "write failed")));
        let mut ports = ports(store());
        ports.positions = Arc::new(positions);
        let uc = use_case(ports);

        let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(!decision.committed);
        assert!(!decision.result.passed);
        assert_eq!(decision.result.verdict, Some(Verdict::Wait));
    }

    struct SlowPositions;

    #[async_trait]
    impl OpenPositionStore for SlowPositions {
        async fn list_open(&self, _user: &UserId) -> Result<Vec<OpenPosition>, RepositoryError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        async fn open_position(
            &self,
            _user: &UserId,
            _position: OpenPosition,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn read_timeout_fails_safe() {
        let mut ports = ports(store());
        ports.positions = Arc::new(SlowPositions);
        let options = AdmissionOptions {
            read_timeout: Duration::from_millis(20),
            ..AdmissionOptions::default()
        };
        let uc = AdmitSignalUseCase::new(RiskValidator::default(), ports, options);

        let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(!decision.result.passed);
        assert!(!decision.committed);
        assert!(decision.result.warnings.iter().any(|w| w.contains("timed out")));
    }

    #[tokio::test]
    async fn new_trigger_is_persisted() {
        let store = store();
        for day in 1..=5 {
            store.add_trade(
                &user(),
                ClosedTrade::new("BBCA", dec!(-100_000), now() - chrono::Duration::days(day)),
            );
        }
        let uc = use_case(ports(store.clone()));

        let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert_eq!(decision.result.verdict, Some(Verdict::Suspended));
        let events = store.breaker_events(&user());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].trigger, TriggerType::ConsecutiveLoss);

        // The persisted record now blocks as an existing suspension.
        let again = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();
        assert_eq!(again.result.verdict, Some(Verdict::Suspended));
        assert_eq!(store.breaker_events(&user()).len(), 1);
    }

    #[tokio::test]
    async fn failed_trigger_persist_keeps_block() {
        let store = store();
        for day in 1..=5 {
            store.add_trade(
                &user(),
                ClosedTrade::new("BBCA", dec!(-100_000), now() - chrono::Duration::days(day)),
            );
        }
        let mut breakers = MockCircuitBreakerStore::new();
        breakers.expect_get_active().returning(|_| Ok(None));
        breakers.expect_latest_resolved().returning(|_| Ok(None));
        breakers
            .expect_persist()
            .returning(|_| Err(RepositoryError::unavailable("circuit_breaker", "down")));
        let mut ports = ports(store.clone());
        ports.breakers = Arc::new(breakers);
        let uc = use_case(ports);

        let decision = uc.admit(request("ASII", dec!(7_200), dec!(6_800))).await.unwrap();

        assert!(!decision.result.passed);
        assert!(!decision.committed);
        assert!(store.positions(&user()).is_empty());
    }
}
