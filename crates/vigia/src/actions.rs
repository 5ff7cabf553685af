//! Shared wait-then-act helpers for page objects.
//!
//! Every interaction goes through [`CommonActions`]: wait for the element
//! within a bounded budget, then act on it. Waits that run out of budget
//! surface as [`VigiaError::Timeout`]; an element that vanishes between the
//! wait and the action surfaces as [`VigiaError::NotFound`]. Failures are
//! logged and re-signalled, never swallowed, so a missed element always
//! fails the test that caused it.

use std::time::Instant;

use tracing::{debug, warn};

use crate::driver::{ElementHandle, Session, UiDriver};
use crate::locator::Locator;
use crate::result::{VigiaError, VigiaResult};

/// Default wait budget for element lookups (10 seconds).
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (50ms).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Budget and cadence for element waits.
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds.
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    /// Poll interval as a `Duration`.
    #[must_use]
    pub const fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}

/// Wait, act and verify primitives shared by all page objects.
#[derive(Debug)]
pub struct CommonActions<D: UiDriver> {
    session: Session<D>,
    options: WaitOptions,
}

impl<D: UiDriver> Clone for CommonActions<D> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            options: self.options.clone(),
        }
    }
}

impl<D: UiDriver> CommonActions<D> {
    /// Create actions over a session with the default wait budget.
    #[must_use]
    pub fn new(session: Session<D>) -> Self {
        Self {
            session,
            options: WaitOptions::default(),
        }
    }

    /// Create actions with an explicit wait budget.
    #[must_use]
    pub const fn with_options(session: Session<D>, options: WaitOptions) -> Self {
        Self { session, options }
    }

    /// The underlying session.
    #[must_use]
    pub const fn session(&self) -> &Session<D> {
        &self.session
    }

    /// The wait budget in force.
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Poll until the element exists, within the wait budget.
    ///
    /// The first check runs before any sleep, so a zero budget still sees
    /// elements that are already present.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Timeout`] when the budget runs out before the
    /// element appears.
    pub async fn wait_for_present(&self, locator: &Locator) -> VigiaResult<ElementHandle> {
        let deadline = Instant::now() + self.options.timeout();
        loop {
            if let Some(handle) = self.session.find(locator).await? {
                return Ok(handle);
            }
            if Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(self.options.poll_interval()).await;
        }
        warn!(
            %locator,
            timeout_ms = self.options.timeout_ms,
            "element did not appear within the wait budget"
        );
        Err(VigiaError::Timeout {
            ms: self.options.timeout_ms,
        })
    }

    /// Wait for an input, clear it, then type `value` into it.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Timeout`] when the input never appears, or
    /// [`VigiaError::NotFound`] when it vanishes before the write lands.
    pub async fn set_input(&self, locator: &Locator, value: &str) -> VigiaResult<()> {
        self.wait_for_present(locator).await?;
        debug!(%locator, "setting input value");
        self.session.clear(locator).await.map_err(|err| {
            warn!(%locator, error = %err, "clearing input failed");
            err
        })?;
        self.session.type_text(locator, value).await.map_err(|err| {
            warn!(%locator, error = %err, "typing into input failed");
            err
        })
    }

    /// Wait for an element, then click it.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Timeout`] when the element never appears, or
    /// [`VigiaError::NotFound`] when it vanishes before the click lands.
    pub async fn click_element(&self, locator: &Locator) -> VigiaResult<()> {
        self.wait_for_present(locator).await?;
        debug!(%locator, "clicking element");
        self.session.click(locator).await.map_err(|err| {
            warn!(%locator, error = %err, "click failed");
            err
        })
    }

    /// Wait for an element, then report whether it is rendered.
    ///
    /// `Ok(false)` means the element exists but has no rendered box. A wait
    /// that runs out of budget is an error, not a `false`, so callers can
    /// tell "not visible" apart from "never appeared".
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Timeout`] when the element never appears.
    pub async fn check_display(&self, locator: &Locator) -> VigiaResult<bool> {
        self.wait_for_present(locator).await?;
        let visibility = self.session.visibility(locator).await.map_err(|err| {
            warn!(%locator, error = %err, "visibility query failed");
            err
        })?;
        Ok(visibility.is_visible())
    }

    /// Current document title.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when the browser is gone.
    pub async fn page_title(&self) -> VigiaResult<String> {
        self.session.title().await
    }
}
