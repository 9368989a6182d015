use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{ProviderDescriptor, ProviderKind, ProviderState, SummaryProvider};
use crate::error::{DistillError, Result};

/// Default bound on provider initialization.
pub const DEFAULT_INIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds a fresh, uninitialized provider instance.
pub type ProviderFactory =
    Box<dyn Fn() -> anyhow::Result<Box<dyn SummaryProvider>> + Send + Sync>;

struct ActiveProvider {
    kind: ProviderKind,
    provider: Box<dyn SummaryProvider>,
}

/// Compile-time table of provider factories plus the selected instance.
///
/// Mutation (`register`, `activate`, `deactivate`) takes `&mut self`; the
/// distiller keeps the registry behind a read/write lock so a provider is
/// never torn down while a summarization call is using it.
pub struct ProviderRegistry {
    factories: BTreeMap<ProviderKind, ProviderFactory>,
    active: Option<ActiveProvider>,
    unavailable: BTreeSet<ProviderKind>,
    /// Kinds whose call failures have already been warned about.
    warned: Mutex<BTreeSet<ProviderKind>>,
    init_timeout: Duration,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
            active: None,
            unavailable: BTreeSet::new(),
            warned: Mutex::new(BTreeSet::new()),
            init_timeout: DEFAULT_INIT_TIMEOUT,
        }
    }

    /// Set the initialization timeout.
    #[must_use]
    pub const fn with_init_timeout(mut self, init_timeout: Duration) -> Self {
        self.init_timeout = init_timeout;
        self
    }

    pub fn register(&mut self, kind: ProviderKind, factory: ProviderFactory) {
        info!("Registering provider: {kind}");
        self.factories.insert(kind, factory);
    }

    #[must_use]
    pub fn is_registered(&self, kind: ProviderKind) -> bool {
        self.factories.contains_key(&kind)
    }

    #[must_use]
    pub fn registered(&self) -> Vec<ProviderKind> {
        self.factories.keys().copied().collect()
    }

    #[must_use]
    pub fn state(&self, kind: ProviderKind) -> ProviderState {
        if self.unavailable.contains(&kind) {
            return ProviderState::PermanentlyUnavailable;
        }
        match &self.active {
            Some(active) if active.kind == kind && active.provider.is_ready() => {
                ProviderState::Ready
            }
            _ => ProviderState::Uninitialized,
        }
    }

    #[must_use]
    pub fn active_kind(&self) -> Option<ProviderKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    /// The selected provider, if it is ready.
    #[must_use]
    pub fn active(&self) -> Option<&dyn SummaryProvider> {
        self.active
            .as_ref()
            .filter(|a| a.provider.is_ready())
            .map(|a| a.provider.as_ref())
    }

    #[must_use]
    pub fn active_descriptor(&self) -> Option<ProviderDescriptor> {
        self.active.as_ref().map(|a| a.provider.descriptor())
    }

    /// Log a failed call on the active provider: a warning the first time
    /// that kind fails in this registry, debug afterwards.
    pub fn report_failure(&self, error: &DistillError) {
        let Some(active) = &self.active else {
            return;
        };
        if self.first_failure(active.kind) {
            warn!("Provider {} failed, using extractive fallback: {error}", active.kind);
        } else {
            debug!("Provider {} failed again: {error}", active.kind);
        }
    }

    fn first_failure(&self, kind: ProviderKind) -> bool {
        self.warned
            .lock()
            .is_ok_and(|mut warned| warned.insert(kind))
    }

    /// Instantiate, initialize and select a provider.
    ///
    /// On any failure the kind becomes permanently unavailable and the
    /// previously active provider, if any, stays selected. On success the
    /// previous provider is cleaned up before the new one takes its place.
    ///
    /// # Errors
    /// [`DistillError::ProviderNotRegistered`], [`DistillError::ProviderUnavailable`]
    /// or [`DistillError::ProviderTimeout`].
    pub async fn activate(&mut self, kind: ProviderKind) -> Result<()> {
        if self.state(kind) == ProviderState::Ready {
            debug!("Provider {kind} already active");
            return Ok(());
        }
        if self.unavailable.contains(&kind) {
            debug!("Provider {kind} previously failed to initialize, not retrying");
            return Err(DistillError::ProviderUnavailable {
                name: kind.to_string(),
                reason: "initialization previously failed".to_string(),
            });
        }

        let factory = self
            .factories
            .get(&kind)
            .ok_or(DistillError::ProviderNotRegistered(kind))?;
        let mut provider = match factory() {
            Ok(provider) => provider,
            Err(e) => {
                return Err(self.mark_unavailable(kind, &e.to_string()));
            }
        };

        info!("Initializing provider {kind} (timeout {:?})", self.init_timeout);
        let outcome = tokio::time::timeout(self.init_timeout, provider.initialize()).await;
        let failure = match outcome {
            Ok(Ok(())) if provider.is_ready() => None,
            Ok(Ok(())) => Some(self.mark_unavailable(kind, "not ready after initialization")),
            Ok(Err(e)) => Some(self.mark_unavailable(kind, &e.to_string())),
            Err(_) => {
                warn!(
                    "Provider {kind} initialization timed out after {:?}",
                    self.init_timeout
                );
                self.unavailable.insert(kind);
                Some(DistillError::ProviderTimeout {
                    name: kind.to_string(),
                    timeout: self.init_timeout,
                })
            }
        };
        if let Some(error) = failure {
            self.discard(provider).await;
            return Err(error);
        }

        if let Some(mut previous) = self.active.take() {
            info!("Tearing down provider {}", previous.kind);
            previous.provider.cleanup().await;
        }
        let descriptor = provider.descriptor();
        info!(
            "Provider {kind} ready: {} {} (gpu={}, network={})",
            descriptor.name,
            descriptor.version,
            descriptor.capabilities.gpu,
            descriptor.capabilities.network
        );
        self.active = Some(ActiveProvider { kind, provider });
        Ok(())
    }

    /// Tear down and unselect the active provider.
    pub async fn deactivate(&mut self) {
        if let Some(mut previous) = self.active.take() {
            info!("Deactivating provider {}", previous.kind);
            previous.provider.cleanup().await;
        }
    }

    fn mark_unavailable(&mut self, kind: ProviderKind, reason: &str) -> DistillError {
        warn!("Provider {kind} unavailable: {reason}");
        self.unavailable.insert(kind);
        DistillError::ProviderUnavailable {
            name: kind.to_string(),
            reason: reason.to_string(),
        }
    }

    async fn discard(&self, mut provider: Box<dyn SummaryProvider>) {
        if tokio::time::timeout(self.init_timeout, provider.cleanup())
            .await
            .is_err()
        {
            debug!("Cleanup of failed provider timed out");
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
