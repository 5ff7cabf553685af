//! Per-test session lifecycle.
//!
//! Each test case gets a fresh browser session, already navigated to the
//! application base URL, and the session is closed after the case whatever
//! its outcome. One session per test; nothing is shared across cases.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::actions::WaitOptions;
use crate::driver::{Session, UiDriver};
use crate::result::VigiaResult;

/// Source of fresh driver instances, one per test case.
#[async_trait]
pub trait DriverProvider: Send + Sync {
    /// The driver type produced.
    type Driver: UiDriver + 'static;

    /// Launch a new driver.
    async fn provide(&self) -> VigiaResult<Self::Driver>;
}

/// Adapter turning a plain closure into a [`DriverProvider`].
///
/// Handy for tests, where each case wants a mock staged the same way.
#[derive(Debug, Clone)]
pub struct ProviderFn<F>(pub F);

#[async_trait]
impl<D, F> DriverProvider for ProviderFn<F>
where
    D: UiDriver + 'static,
    F: Fn() -> VigiaResult<D> + Send + Sync,
{
    type Driver = D;

    async fn provide(&self) -> VigiaResult<D> {
        (self.0)()
    }
}

/// Builds and tears down one session per test case.
#[derive(Debug)]
pub struct SessionFixture<P: DriverProvider> {
    provider: P,
    base_url: String,
    wait: WaitOptions,
}

impl<P: DriverProvider> SessionFixture<P> {
    /// Create a fixture launching sessions against `base_url`.
    pub fn new(provider: P, base_url: impl Into<String>) -> Self {
        Self {
            provider,
            base_url: base_url.into(),
            wait: WaitOptions::default(),
        }
    }

    /// Override the wait budget handed to test cases.
    #[must_use]
    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// The application base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The wait budget handed to test cases.
    #[must_use]
    pub const fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    /// Launch a fresh session and navigate it to the base URL.
    ///
    /// # Errors
    ///
    /// Returns the provider's launch error or a navigation failure.
    pub async fn setup(&self) -> VigiaResult<Session<P::Driver>> {
        let driver = self.provider.provide().await?;
        let session = Session::new(driver);
        session.open(&self.base_url).await.map_err(|err| {
            warn!(url = %self.base_url, error = %err, "fixture navigation failed");
            err
        })?;
        info!(url = %self.base_url, "session ready");
        Ok(session)
    }

    /// Close a session. Runs after the case whatever its outcome.
    ///
    /// # Errors
    ///
    /// Returns the driver's shutdown error; callers usually log and move on.
    pub async fn teardown(&self, session: &Session<P::Driver>) -> VigiaResult<()> {
        session.close().await.map_err(|err| {
            warn!(error = %err, "session teardown failed");
            err
        })?;
        info!("session closed");
        Ok(())
    }
}
