//! The five vtiger CRM cases, wired for the suite runner.
//!
//! Case bodies compose page objects; assertions raise
//! [`VigiaError::AssertionFailed`] so the runner can attach a screenshot
//! and report entry. Data-driven cases read the suite context's table.

use crate::data::DataTable;
use crate::driver::UiDriver;
use crate::pages::{HomePage, LeadPage, LoginPage};
use crate::result::{VigiaError, VigiaResult};
use crate::runner::TestCase;

/// Title shown by the vtiger login page.
pub const LOGIN_PAGE_TITLE: &str = "vtiger CRM - Commercial Open Source CRM";

/// Test-data sheet holding the credential and lead rows.
pub const LOGIN_DATA_SHEET: &str = "LoginData";

/// Row carrying the rejected credentials.
pub const INVALID_LOGIN_ROW: &str = "test_verify_invalidLogin_TC03";

/// Row carrying the lead's lastname and company.
pub const CREATE_LEAD_ROW: &str = "test_create_lead_TC05";

fn check(condition: bool, message: impl Into<String>) -> VigiaResult<()> {
    if condition {
        Ok(())
    } else {
        Err(VigiaError::assertion(message))
    }
}

/// TC01: the login page carries the product title.
#[must_use]
pub fn verify_title_case<D: UiDriver + 'static>() -> TestCase<D> {
    TestCase::new("test_verifyTitle_TC01", |actions, context| async move {
        let login = LoginPage::new(actions);
        login.open(&context.app.url).await?;
        let title = login.title().await?;
        check(
            title == LOGIN_PAGE_TITLE,
            format!("unexpected login page title: {title:?}"),
        )
    })
}

/// TC02: the vtiger logo is rendered on the login page.
#[must_use]
pub fn verify_logo_case<D: UiDriver + 'static>() -> TestCase<D> {
    TestCase::new("test_verifyLogo_TC02", |actions, _context| async move {
        let login = LoginPage::new(actions);
        check(
            login.verify_logo().await?,
            "login page logo is not visible",
        )
    })
}

/// TC03: rejected credentials surface the error banner and never reach
/// the home page. Expands to one case per table key.
#[must_use]
pub fn invalid_login_cases<D: UiDriver + 'static>(data: &DataTable) -> Vec<TestCase<D>> {
    data.keys()
        .map(|key| {
            let name = format!("test_verify_invalidLogin_TC03[{key}]");
            TestCase::new(name, |actions, context| async move {
                // TODO: index the table by this expansion's own key; every
                // expansion currently re-reads the TC03 row, so the other
                // rows' credentials are never exercised.
                let username = context.data.get(INVALID_LOGIN_ROW, "username")?;
                let password = context.data.get(INVALID_LOGIN_ROW, "password")?;

                let login = LoginPage::new(actions.clone());
                let home = HomePage::new(actions);
                login.login(username, password).await?;
                check(
                    login.verify_error_message().await?,
                    "login error message is not visible",
                )?;
                check(
                    !home.home_link_present().await?,
                    "home page was reached with rejected credentials",
                )
            })
        })
        .collect()
}

/// TC04: configured credentials land on the home page.
#[must_use]
pub fn valid_login_case<D: UiDriver + 'static>() -> TestCase<D> {
    TestCase::new("test_verify_validLogin_TC04", |actions, context| async move {
        let login = LoginPage::new(actions.clone());
        let home = HomePage::new(actions);
        login
            .login(&context.app.username, &context.app.password)
            .await?;
        check(
            home.verify_home().await?,
            "home link is not visible after login",
        )
    })
}

/// TC05: log in, create a lead from the data row, log out.
#[must_use]
pub fn create_lead_case<D: UiDriver + 'static>() -> TestCase<D> {
    TestCase::new("test_create_lead_TC05", |actions, context| async move {
        let login = LoginPage::new(actions.clone());
        let home = HomePage::new(actions.clone());
        let lead = LeadPage::new(actions);

        login
            .login(&context.app.username, &context.app.password)
            .await?;
        check(
            home.verify_home().await?,
            "home link is not visible after login",
        )?;

        let lastname = context.data.get(CREATE_LEAD_ROW, "lastname")?;
        let company = context.data.get(CREATE_LEAD_ROW, "company")?;
        home.click_new_lead().await?;
        lead.create_lead(lastname, company).await?;
        home.click_logout().await
    })
}

/// All cases in TC order; data-driven cases expand per table key.
#[must_use]
pub fn all_cases<D: UiDriver + 'static>(data: &DataTable) -> Vec<TestCase<D>> {
    let mut cases = vec![verify_title_case(), verify_logo_case()];
    cases.extend(invalid_login_cases(data));
    cases.push(valid_login_case());
    cases.push(create_lead_case());
    cases
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::WaitOptions;
    use crate::config::AppData;
    use crate::driver::{ClickRule, MockDom, MockDriver};
    use crate::fixture::{ProviderFn, SessionFixture};
    use crate::locator::Locator;
    use crate::runner::{SuiteContext, SuiteRunner};

    const BASE_URL: &str = "http://localhost:100";
    const LEAD_LASTNAME: &str = "Walker";
    const LEAD_COMPANY: &str = "Globex";

    fn login_dom() -> MockDom {
        MockDom::new(LOGIN_PAGE_TITLE)
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

    fn home_dom() -> MockDom {
        MockDom::new("vtiger CRM - Home")
            .with_element(Locator::link_text("Home"), "a", "Home")
            .with_element(Locator::link_text("Logout"), "a", "Logout")
            .with_element(Locator::link_text("New Lead"), "a", "New Lead")
    }

    fn lead_form_dom() -> MockDom {
        MockDom::new("vtiger CRM - New Lead")
            .with_element(Locator::name("lastname"), "input", "")
            .with_element(Locator::name("company"), "input", "")
            .with_element(Locator::xpath("//input[@title='Save [Alt+S]']"), "input", "")
            .with_element(Locator::link_text("Logout"), "a", "Logout")
    }

    fn lead_detail_dom() -> MockDom {
        MockDom::new("vtiger CRM - Lead Details")
            .with_element(Locator::link_text("Home"), "a", "Home")
            .with_element(Locator::link_text("Logout"), "a", "Logout")
    }

    fn vtiger_driver() -> MockDriver {
        let mut driver = MockDriver::new();
        driver.insert_page(BASE_URL, login_dom());
        driver.add_rule(
            ClickRule::new(Locator::name("Login"), home_dom())
                .require_input(Locator::name("user_name"), "admin")
                .require_input(Locator::name("user_password"), "admin")
                .on_mismatch(error_dom()),
        );
        driver.add_rule(ClickRule::new(Locator::link_text("New Lead"), lead_form_dom()));
        driver.add_rule(
            ClickRule::new(
                Locator::xpath("//input[@title='Save [Alt+S]']"),
                lead_detail_dom(),
            )
            .require_input(Locator::name("lastname"), LEAD_LASTNAME)
            .require_input(Locator::name("company"), LEAD_COMPANY),
        );
        driver.add_rule(ClickRule::new(Locator::link_text("Logout"), login_dom()));
        driver.set_screenshot(vec![0x89, b'P', b'N', b'G']);
        driver
    }

    fn login_data() -> DataTable {
        let mut data = DataTable::new();
        data.insert_row(
            INVALID_LOGIN_ROW,
            &[
                ("username", "admin12"),
                ("password", "admin"),
                ("lastname", ""),
                ("company", ""),
            ],
        );
        data.insert_row(
            CREATE_LEAD_ROW,
            &[
                ("username", ""),
                ("password", ""),
                ("lastname", LEAD_LASTNAME),
                ("company", LEAD_COMPANY),
            ],
        );
        data
    }

    fn suite_context(data: DataTable) -> SuiteContext {
        SuiteContext {
            app: AppData {
                url: BASE_URL.to_string(),
                username: "admin".to_string(),
                password: "admin".to_string(),
            },
            data,
        }
    }

    fn fixture() -> SessionFixture<ProviderFn<impl Fn() -> VigiaResult<MockDriver> + Send + Sync>>
    {
        SessionFixture::new(ProviderFn(|| Ok(vtiger_driver())), BASE_URL)
            .with_wait_options(WaitOptions::new().with_timeout(200).with_poll_interval(10))
    }

    mod composition_tests {
        use super::*;

        #[test]
        fn test_all_cases_follow_tc_order() {
            let data = login_data();
            let cases = all_cases::<MockDriver>(&data);
            let names: Vec<&str> = cases.iter().map(TestCase::name).collect();
            assert_eq!(
                names,
                vec![
                    "test_verifyTitle_TC01",
                    "test_verifyLogo_TC02",
                    "test_verify_invalidLogin_TC03[test_create_lead_TC05]",
                    "test_verify_invalidLogin_TC03[test_verify_invalidLogin_TC03]",
                    "test_verify_validLogin_TC04",
                    "test_create_lead_TC05",
                ]
            );
        }

        #[test]
        fn test_check_raises_assertion_failures() {
            assert!(check(true, "fine").is_ok());
            let err = check(false, "home link missing").unwrap_err();
            assert!(err.to_string().contains("home link missing"));
        }
    }

    mod suite_tests {
        use super::*;

        #[tokio::test]
        async fn test_full_suite_passes_against_the_scripted_crm() {
            let data = login_data();
            let dir = tempfile::tempdir().unwrap();
            let mut runner = SuiteRunner::new(fixture(), suite_context(data.clone()))
                .with_output_dir(dir.path());
            runner.register_all(all_cases(&data));

            let results = runner.run().await.unwrap();

            assert_eq!(results.total(), 6);
            assert!(results.all_passed(), "{:#?}", results.entries);
        }

        #[tokio::test]
        async fn test_every_expansion_reads_the_fixed_invalid_login_row() {
            // The extra row's credentials would log in successfully; the
            // expansion still passes because only the TC03 row is read.
            let mut data = login_data();
            data.insert_row(
                "test_zz_extra",
                &[("username", "admin"), ("password", "admin")],
            );

            let dir = tempfile::tempdir().unwrap();
            let mut runner = SuiteRunner::new(fixture(), suite_context(data.clone()))
                .with_output_dir(dir.path());
            runner.register_all(invalid_login_cases(&data));

            let results = runner.run().await.unwrap();

            assert_eq!(results.total(), 3);
            assert!(results.all_passed(), "{:#?}", results.entries);
        }

        #[tokio::test]
        async fn test_valid_login_case_fails_on_wrong_configured_credentials() {
            let data = login_data();
            let mut context = suite_context(data);
            context.app.password = "nope".to_string();

            let dir = tempfile::tempdir().unwrap();
            let mut runner =
                SuiteRunner::new(fixture(), context).with_output_dir(dir.path());
            runner.register(valid_login_case());

            let results = runner.run().await.unwrap();

            assert_eq!(results.failed, 1);
            // The home link never appears, so the wait itself fails the case.
            let entry = &results.entries[0];
            assert!(entry.error.as_deref().is_some_and(|e| e.contains("timed out")));
            assert!(entry.screenshot_path.is_some());
        }
    }
}
