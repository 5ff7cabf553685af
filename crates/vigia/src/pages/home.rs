//! The vtiger home page shown after a successful login.

use crate::actions::CommonActions;
use crate::driver::UiDriver;
use crate::locator::Locator;
use crate::result::VigiaResult;

/// Home page navigation links.
#[derive(Debug, Clone)]
pub struct HomePage<D: UiDriver> {
    actions: CommonActions<D>,
    home_link: Locator,
    logout_link: Locator,
    new_lead_link: Locator,
}

impl<D: UiDriver> HomePage<D> {
    /// Bind the home-page locators over a session.
    #[must_use]
    pub fn new(actions: CommonActions<D>) -> Self {
        Self {
            actions,
            home_link: Locator::link_text("Home"),
            logout_link: Locator::link_text("Logout"),
            new_lead_link: Locator::link_text("New Lead"),
        }
    }

    /// Whether the Home link is rendered, waiting for it to appear.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Timeout`] when the link never appears.
    ///
    /// [`VigiaError::Timeout`]: crate::result::VigiaError::Timeout
    pub async fn verify_home(&self) -> VigiaResult<bool> {
        self.actions.check_display(&self.home_link).await
    }

    /// Whether the Logout link is rendered, waiting for it to appear.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Timeout`] when the link never appears.
    ///
    /// [`VigiaError::Timeout`]: crate::result::VigiaError::Timeout
    pub async fn verify_logout(&self) -> VigiaResult<bool> {
        self.actions.check_display(&self.logout_link).await
    }

    /// Whether the Home link exists right now, without waiting.
    ///
    /// Used after a failed login to assert the home page was never reached;
    /// the error banner has already proven the page settled, so there is
    /// nothing to wait for.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when the query cannot run.
    ///
    /// [`VigiaError::Session`]: crate::result::VigiaError::Session
    pub async fn home_link_present(&self) -> VigiaResult<bool> {
        self.actions.session().is_present(&self.home_link).await
    }

    /// Click the Logout link.
    ///
    /// # Errors
    ///
    /// Returns a wait failure when the link never appears.
    pub async fn click_logout(&self) -> VigiaResult<()> {
        self.actions.click_element(&self.logout_link).await
    }

    /// Click the New Lead link.
    ///
    /// # Errors
    ///
    /// Returns a wait failure when the link never appears.
    pub async fn click_new_lead(&self) -> VigiaResult<()> {
        self.actions.click_element(&self.new_lead_link).await
    }
}
