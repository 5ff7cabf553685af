//! The vtiger login page.

use crate::actions::CommonActions;
use crate::driver::UiDriver;
use crate::locator::Locator;
use crate::result::VigiaResult;

/// Login form with its logo and error banner.
#[derive(Debug, Clone)]
pub struct LoginPage<D: UiDriver> {
    actions: CommonActions<D>,
    username_input: Locator,
    password_input: Locator,
    login_button: Locator,
    logo: Locator,
    error_message: Locator,
}

impl<D: UiDriver> LoginPage<D> {
    /// Bind the login-page locators over a session.
    #[must_use]
    pub fn new(actions: CommonActions<D>) -> Self {
        Self {
            actions,
            username_input: Locator::name("user_name"),
            password_input: Locator::name("user_password"),
            login_button: Locator::name("Login"),
            logo: Locator::xpath("//img[@src='include/images/vtiger-crm.gif']"),
            error_message: Locator::xpath(
                "//*[contains(text(), 'You must specify a valid username and password')]",
            ),
        }
    }

    /// Navigate to the application URL.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Navigation`] when the page fails to load.
    ///
    /// [`VigiaError::Navigation`]: crate::result::VigiaError::Navigation
    pub async fn open(&self, url: &str) -> VigiaResult<()> {
        self.actions.session().open(url).await
    }

    /// Fill the username field.
    ///
    /// # Errors
    ///
    /// Returns a wait failure when the field never appears.
    pub async fn set_user_id(&self, username: &str) -> VigiaResult<()> {
        self.actions.set_input(&self.username_input, username).await
    }

    /// Fill the password field.
    ///
    /// # Errors
    ///
    /// Returns a wait failure when the field never appears.
    pub async fn set_user_pass(&self, password: &str) -> VigiaResult<()> {
        self.actions.set_input(&self.password_input, password).await
    }

    /// Submit the form.
    ///
    /// # Errors
    ///
    /// Returns a wait failure when the button never appears.
    pub async fn click_login(&self) -> VigiaResult<()> {
        self.actions.click_element(&self.login_button).await
    }

    /// Fill both credential fields and submit.
    ///
    /// # Errors
    ///
    /// Returns the first wait failure among the three steps.
    pub async fn login(&self, username: &str, password: &str) -> VigiaResult<()> {
        self.set_user_id(username).await?;
        self.set_user_pass(password).await?;
        self.click_login().await
    }

    /// Whether the vtiger logo is rendered.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Timeout`] when the logo never appears; an
    /// environment failure is never collapsed into `Ok(false)`.
    ///
    /// [`VigiaError::Timeout`]: crate::result::VigiaError::Timeout
    pub async fn verify_logo(&self) -> VigiaResult<bool> {
        self.actions.check_display(&self.logo).await
    }

    /// Whether the invalid-credentials banner is rendered.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Timeout`] when the banner never appears.
    ///
    /// [`VigiaError::Timeout`]: crate::result::VigiaError::Timeout
    pub async fn verify_error_message(&self) -> VigiaResult<bool> {
        self.actions.check_display(&self.error_message).await
    }

    /// Current document title.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when the browser is gone.
    ///
    /// [`VigiaError::Session`]: crate::result::VigiaError::Session
    pub async fn title(&self) -> VigiaResult<String> {
        self.actions.page_title().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::WaitOptions;
    use crate::driver::{ClickRule, MockDom, MockDriver, Session};

    fn login_dom() -> MockDom {
        MockDom::new("vtiger CRM - Commercial Open Source CRM")
            .with_element(Locator::name("user_name"), "input", "")
            .with_element(Locator::name("user_password"), "input", "")
            .with_element(Locator::name("Login"), "input", "")
            .with_element(
                Locator::xpath("//img[@src='include/images/vtiger-crm.gif']"),
                "img",
                "",
            )
    }

    fn error_dom() -> MockDom {
        login_dom().with_element(
            Locator::xpath(
                "//*[contains(text(), 'You must specify a valid username and password')]",
            ),
            "div",
            "You must specify a valid username and password",
        )
    }

    fn page_over(driver: MockDriver) -> LoginPage<MockDriver> {
        let options = WaitOptions::new().with_timeout(200).with_poll_interval(10);
        LoginPage::new(CommonActions::with_options(Session::new(driver), options))
    }

    #[tokio::test]
    async fn test_login_routes_to_home_on_valid_credentials() {
        let mut driver = MockDriver::new();
        driver.stage(login_dom());
        driver.add_rule(
            ClickRule::new(
                Locator::name("Login"),
                MockDom::new("Home").with_element(Locator::link_text("Home"), "a", "Home"),
            )
            .require_input(Locator::name("user_name"), "admin")
            .require_input(Locator::name("user_password"), "admin")
            .on_mismatch(error_dom()),
        );
        let page = page_over(driver);

        page.login("admin", "admin").await.unwrap();
        assert_eq!(page.title().await.unwrap(), "Home");
    }

    #[tokio::test]
    async fn test_login_surfaces_error_on_bad_credentials() {
        let mut driver = MockDriver::new();
        driver.stage(login_dom());
        driver.add_rule(
            ClickRule::new(Locator::name("Login"), MockDom::new("Home"))
                .require_input(Locator::name("user_name"), "admin")
                .require_input(Locator::name("user_password"), "admin")
                .on_mismatch(error_dom()),
        );
        let page = page_over(driver);

        page.login("admin12", "admin").await.unwrap();
        assert!(page.verify_error_message().await.unwrap());
    }

    #[tokio::test]
    async fn test_logo_and_title_on_the_login_page() {
        let mut driver = MockDriver::new();
        driver.stage(login_dom());
        let page = page_over(driver);

        assert!(page.verify_logo().await.unwrap());
        assert_eq!(
            page.title().await.unwrap(),
            "vtiger CRM - Commercial Open Source CRM"
        );
    }

    #[tokio::test]
    async fn test_open_navigates_the_session() {
        let mut driver = MockDriver::new();
        driver.insert_page("http://localhost:100", login_dom());
        let page = page_over(driver);

        page.open("http://localhost:100").await.unwrap();
        assert!(page.verify_logo().await.unwrap());
    }
}
