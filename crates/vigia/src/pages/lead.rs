//! The new-lead form.

use crate::actions::CommonActions;
use crate::driver::UiDriver;
use crate::locator::Locator;
use crate::result::VigiaResult;

/// Lead creation form.
#[derive(Debug, Clone)]
pub struct LeadPage<D: UiDriver> {
    actions: CommonActions<D>,
    lastname_input: Locator,
    company_input: Locator,
    save_button: Locator,
}

impl<D: UiDriver> LeadPage<D> {
    /// Bind the lead-form locators over a session.
    #[must_use]
    pub fn new(actions: CommonActions<D>) -> Self {
        Self {
            actions,
            lastname_input: Locator::name("lastname"),
            company_input: Locator::name("company"),
            save_button: Locator::xpath("//input[@title='Save [Alt+S]']"),
        }
    }

    /// Fill the mandatory lead fields and save.
    ///
    /// # Errors
    ///
    /// Returns the first wait failure among the three steps.
    pub async fn create_lead(&self, lastname: &str, company: &str) -> VigiaResult<()> {
        self.actions.set_input(&self.lastname_input, lastname).await?;
        self.actions.set_input(&self.company_input, company).await?;
        self.actions.click_element(&self.save_button).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::WaitOptions;
    use crate::driver::{ClickRule, MockDom, MockDriver, Session};

    fn lead_form() -> MockDom {
        MockDom::new("Leads")
            .with_element(Locator::name("lastname"), "input", "")
            .with_element(Locator::name("company"), "input", "")
            .with_element(Locator::xpath("//input[@title='Save [Alt+S]']"), "input", "")
    }

    #[tokio::test]
    async fn test_create_lead_fills_and_saves() {
        let mut driver = MockDriver::new();
        driver.stage(lead_form());
        driver.add_rule(
            ClickRule::new(
                Locator::xpath("//input[@title='Save [Alt+S]']"),
                MockDom::new("Lead Detail"),
            )
            .require_input(Locator::name("lastname"), "Sharma")
            .require_input(Locator::name("company"), "TestLeaf"),
        );
        let options = WaitOptions::new().with_timeout(200).with_poll_interval(10);
        let page = LeadPage::new(CommonActions::with_options(Session::new(driver), options));

        page.create_lead("Sharma", "TestLeaf").await.unwrap();
        let title = page.actions.page_title().await.unwrap();
        assert_eq!(title, "Lead Detail");
    }

    #[tokio::test]
    async fn test_create_lead_without_form_times_out() {
        let mut driver = MockDriver::new();
        driver.stage(MockDom::new("Home"));
        let options = WaitOptions::new().with_timeout(100).with_poll_interval(10);
        let page = LeadPage::new(CommonActions::with_options(Session::new(driver), options));

        let err = page.create_lead("Sharma", "TestLeaf").await.unwrap_err();
        assert!(err.is_wait_failure());
    }
}
