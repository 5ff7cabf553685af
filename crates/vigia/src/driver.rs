//! Abstract browser driver.
//!
//! All page objects talk to the browser through the [`UiDriver`] trait, so
//! the same test logic runs against a live Chromium/Edge instance (the
//! `browser` feature's CDP driver) or against the in-memory [`MockDriver`]
//! in unit tests. A [`Session`] wraps one driver in a shared handle so
//! several page objects can steer a single browser window.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::locator::Locator;
use crate::result::{VigiaError, VigiaResult};

/// PNG file signature, used to sanity-check captured screenshots.
const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

/// Outcome of a single visibility query.
///
/// `Hidden` means the element exists in the DOM but has no rendered box;
/// `Absent` means the lookup matched nothing at all. Callers that only care
/// about "can the user see it" collapse this with [`Visibility::is_visible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// No element matched the locator
    Absent,
    /// Element exists but is not rendered
    Hidden,
    /// Element exists and has a rendered box
    Visible,
}

impl Visibility {
    /// True only for [`Visibility::Visible`].
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Visible)
    }

    /// True for anything that exists in the DOM, rendered or not.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Snapshot of a located element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Lowercased tag name
    pub tag: String,
    /// Text content, if any
    pub text: Option<String>,
    /// Whether the element had a rendered box when queried
    pub visible: bool,
}

impl ElementHandle {
    /// Create a handle for a visible element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            visible: true,
        }
    }

    /// Attach text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Raw screenshot bytes with capture time.
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// PNG data
    pub data: Vec<u8>,
    /// When the capture happened
    pub timestamp: SystemTime,
}

impl Screenshot {
    /// Wrap captured PNG bytes.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            timestamp: SystemTime::now(),
        }
    }

    /// Size of the encoded image.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check the PNG signature.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.data.starts_with(&PNG_MAGIC)
    }
}

/// Launch configuration shared by all driver implementations.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Run without a visible window
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Page-load budget for `navigate`
    pub navigation_timeout: Duration,
    /// Browser executable override
    pub executable_path: Option<std::path::PathBuf>,
    /// Chromium sandbox (disable in containers/CI)
    pub sandbox: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1366,
            viewport_height: 768,
            navigation_timeout: Duration::from_secs(30),
            executable_path: None,
            sandbox: true,
        }
    }
}

impl DriverConfig {
    /// Create a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode.
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions.
    #[must_use]
    pub const fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the page-load budget.
    #[must_use]
    pub const fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Point at a specific browser binary.
    #[must_use]
    pub fn executable_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Disable the Chromium sandbox (containers/CI).
    #[must_use]
    pub const fn no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// Browser automation seam.
///
/// Implementations: the CDP driver behind the `browser` feature and
/// [`MockDriver`] for unit tests. Methods that change page state take
/// `&mut self`; pure queries take `&self`.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Navigate to a URL and wait for the load to settle.
    async fn navigate(&mut self, url: &str) -> VigiaResult<()>;

    /// Current page URL.
    async fn current_url(&self) -> VigiaResult<String>;

    /// Current document title.
    async fn title(&self) -> VigiaResult<String>;

    /// Look up an element, `None` when nothing matches.
    async fn find(&self, locator: &Locator) -> VigiaResult<Option<ElementHandle>>;

    /// Whether any element matches the locator.
    async fn is_present(&self, locator: &Locator) -> VigiaResult<bool>;

    /// Typed visibility of the locator's element.
    async fn visibility(&self, locator: &Locator) -> VigiaResult<Visibility>;

    /// Click the element.
    async fn click(&mut self, locator: &Locator) -> VigiaResult<()>;

    /// Clear an input's value.
    async fn clear(&mut self, locator: &Locator) -> VigiaResult<()>;

    /// Append text to an input, as a user typing would.
    async fn type_text(&mut self, locator: &Locator, text: &str) -> VigiaResult<()>;

    /// Capture the current page as a PNG.
    async fn screenshot(&self) -> VigiaResult<Screenshot>;

    /// Shut the browser down.
    async fn close(&mut self) -> VigiaResult<()>;
}

/// One element of a scripted mock page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Lowercased tag name
    pub tag: String,
    /// Text content
    pub text: String,
    /// Rendered or not
    pub visible: bool,
}

/// A scripted page state for [`MockDriver`].
#[derive(Debug, Clone, Default)]
pub struct MockDom {
    /// Document title
    pub title: String,
    /// Elements present on the page
    pub elements: HashMap<Locator, MockElement>,
}

impl MockDom {
    /// Create an empty page with a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: HashMap::new(),
        }
    }

    /// Add a visible element.
    #[must_use]
    pub fn with_element(mut self, locator: Locator, tag: &str, text: &str) -> Self {
        self.elements.insert(
            locator,
            MockElement {
                tag: tag.to_string(),
                text: text.to_string(),
                visible: true,
            },
        );
        self
    }

    /// Add an element that exists but is not rendered.
    #[must_use]
    pub fn with_hidden_element(mut self, locator: Locator, tag: &str, text: &str) -> Self {
        self.elements.insert(
            locator,
            MockElement {
                tag: tag.to_string(),
                text: text.to_string(),
                visible: false,
            },
        );
        self
    }
}

/// Scripted response to a click in [`MockDriver`].
///
/// When `trigger` is clicked the rule compares every `require_inputs` entry
/// against what has been typed so far. On a full match the page becomes
/// `on_match`; otherwise it becomes `on_mismatch` when present, or stays
/// unchanged. Either swap clears the typed state, like a real page load.
#[derive(Debug, Clone)]
pub struct ClickRule {
    /// Element whose click activates the rule
    pub trigger: Locator,
    /// Input values that must have been typed for the happy path
    pub require_inputs: Vec<(Locator, String)>,
    /// Page shown when every required input matches
    pub on_match: MockDom,
    /// Page shown when some required input differs
    pub on_mismatch: Option<MockDom>,
}

impl ClickRule {
    /// Rule that swaps to `on_match` whenever `trigger` is clicked.
    #[must_use]
    pub fn new(trigger: Locator, on_match: MockDom) -> Self {
        Self {
            trigger,
            require_inputs: Vec::new(),
            on_match,
            on_mismatch: None,
        }
    }

    /// Require a typed value for the happy path.
    #[must_use]
    pub fn require_input(mut self, locator: Locator, value: impl Into<String>) -> Self {
        self.require_inputs.push((locator, value.into()));
        self
    }

    /// Page to show when the required inputs do not match.
    #[must_use]
    pub fn on_mismatch(mut self, dom: MockDom) -> Self {
        self.on_mismatch = Some(dom);
        self
    }

    fn matches(&self, typed: &HashMap<Locator, String>) -> bool {
        self.require_inputs
            .iter()
            .all(|(locator, value)| typed.get(locator).is_some_and(|v| v == value))
    }
}

/// In-memory driver for unit tests.
///
/// Pages are registered per URL and click rules script the transitions
/// between them, which is enough to walk a login form end to end without
/// a browser.
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Current URL
    pub current_url: String,
    /// Scripted pages keyed by URL
    pub pages: HashMap<String, MockDom>,
    /// Click transition rules
    pub click_rules: Vec<ClickRule>,
    /// PNG bytes returned by `screenshot`
    pub screenshot_data: Option<Vec<u8>>,
    /// Call history for verification
    pub call_history: Vec<String>,
    dom: MockDom,
    typed: HashMap<Locator, String>,
}

impl MockDriver {
    /// Create an empty mock driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scripted page for a URL.
    pub fn insert_page(&mut self, url: impl Into<String>, dom: MockDom) {
        self.pages.insert(url.into(), dom);
    }

    /// Replace the current page directly, without navigating.
    pub fn stage(&mut self, dom: MockDom) {
        self.dom = dom;
    }

    /// Add a click transition rule.
    pub fn add_rule(&mut self, rule: ClickRule) {
        self.click_rules.push(rule);
    }

    /// Set the PNG bytes returned by `screenshot`.
    pub fn set_screenshot(&mut self, data: Vec<u8>) {
        self.screenshot_data = Some(data);
    }

    /// Value typed into an input so far.
    #[must_use]
    pub fn typed_value(&self, locator: &Locator) -> Option<&str> {
        self.typed.get(locator).map(String::as_str)
    }

    /// Get call history.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if a method was called.
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    fn element(&self, locator: &Locator) -> VigiaResult<&MockElement> {
        self.dom
            .elements
            .get(locator)
            .ok_or_else(|| VigiaError::NotFound {
                locator: locator.to_string(),
            })
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> VigiaResult<()> {
        self.call_history.push(format!("navigate:{url}"));
        self.current_url = url.to_string();
        self.dom = self.pages.get(url).cloned().unwrap_or_default();
        self.typed.clear();
        Ok(())
    }

    async fn current_url(&self) -> VigiaResult<String> {
        Ok(self.current_url.clone())
    }

    async fn title(&self) -> VigiaResult<String> {
        Ok(self.dom.title.clone())
    }

    async fn find(&self, locator: &Locator) -> VigiaResult<Option<ElementHandle>> {
        Ok(self.dom.elements.get(locator).map(|el| ElementHandle {
            tag: el.tag.clone(),
            text: Some(el.text.clone()),
            visible: el.visible,
        }))
    }

    async fn is_present(&self, locator: &Locator) -> VigiaResult<bool> {
        Ok(self.dom.elements.contains_key(locator))
    }

    async fn visibility(&self, locator: &Locator) -> VigiaResult<Visibility> {
        Ok(match self.dom.elements.get(locator) {
            None => Visibility::Absent,
            Some(el) if el.visible => Visibility::Visible,
            Some(_) => Visibility::Hidden,
        })
    }

    async fn click(&mut self, locator: &Locator) -> VigiaResult<()> {
        self.call_history.push(format!("click:{locator}"));
        self.element(locator)?;
        let rule = self
            .click_rules
            .iter()
            .find(|rule| rule.trigger == *locator)
            .cloned();
        if let Some(rule) = rule {
            if rule.matches(&self.typed) {
                self.dom = rule.on_match;
                self.typed.clear();
            } else if let Some(dom) = rule.on_mismatch {
                self.dom = dom;
                self.typed.clear();
            }
        }
        Ok(())
    }

    async fn clear(&mut self, locator: &Locator) -> VigiaResult<()> {
        self.call_history.push(format!("clear:{locator}"));
        self.element(locator)?;
        self.typed.remove(locator);
        Ok(())
    }

    async fn type_text(&mut self, locator: &Locator, text: &str) -> VigiaResult<()> {
        self.call_history.push(format!("type:{locator}={text}"));
        self.element(locator)?;
        self.typed.entry(locator.clone()).or_default().push_str(text);
        Ok(())
    }

    async fn screenshot(&self) -> VigiaResult<Screenshot> {
        self.screenshot_data
            .clone()
            .map(Screenshot::new)
            .ok_or_else(|| VigiaError::Screenshot {
                message: "no mock screenshot set".to_string(),
            })
    }

    async fn close(&mut self) -> VigiaResult<()> {
        self.call_history.push("close".to_string());
        Ok(())
    }
}

/// Shared handle to one live driver.
///
/// Page objects each hold a clone, so a test can interleave actions on
/// several pages of the same browser window. All methods serialize through
/// an async mutex.
#[derive(Debug)]
pub struct Session<D: UiDriver> {
    inner: Arc<Mutex<D>>,
}

impl<D: UiDriver> Clone for Session<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: UiDriver> Session<D> {
    /// Wrap a driver in a shared session.
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            inner: Arc::new(Mutex::new(driver)),
        }
    }

    /// Navigate to a URL.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Navigation`] when the page fails to load.
    pub async fn open(&self, url: &str) -> VigiaResult<()> {
        self.inner.lock().await.navigate(url).await
    }

    /// Current page URL.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when the browser is gone.
    pub async fn current_url(&self) -> VigiaResult<String> {
        self.inner.lock().await.current_url().await
    }

    /// Current document title.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when the browser is gone.
    pub async fn title(&self) -> VigiaResult<String> {
        self.inner.lock().await.title().await
    }

    /// Look up an element.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when the query cannot run.
    pub async fn find(&self, locator: &Locator) -> VigiaResult<Option<ElementHandle>> {
        self.inner.lock().await.find(locator).await
    }

    /// Whether any element matches.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when the query cannot run.
    pub async fn is_present(&self, locator: &Locator) -> VigiaResult<bool> {
        self.inner.lock().await.is_present(locator).await
    }

    /// Typed visibility of the locator's element.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when the query cannot run.
    pub async fn visibility(&self, locator: &Locator) -> VigiaResult<Visibility> {
        self.inner.lock().await.visibility(locator).await
    }

    /// Click the element.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::NotFound`] when nothing matches the locator.
    pub async fn click(&self, locator: &Locator) -> VigiaResult<()> {
        self.inner.lock().await.click(locator).await
    }

    /// Clear an input's value.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::NotFound`] when nothing matches the locator.
    pub async fn clear(&self, locator: &Locator) -> VigiaResult<()> {
        self.inner.lock().await.clear(locator).await
    }

    /// Append text to an input.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::NotFound`] when nothing matches the locator.
    pub async fn type_text(&self, locator: &Locator, text: &str) -> VigiaResult<()> {
        self.inner.lock().await.type_text(locator, text).await
    }

    /// Capture the current page as a PNG.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Screenshot`] when the capture fails.
    pub async fn screenshot(&self) -> VigiaResult<Screenshot> {
        self.inner.lock().await.screenshot().await
    }

    /// Shut the browser down.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Session`] when teardown fails.
    pub async fn close(&self) -> VigiaResult<()> {
        self.inner.lock().await.close().await
    }

    /// Run a closure against the locked driver, for test inspection.
    pub async fn with_driver<R>(&self, f: impl FnOnce(&D) -> R + Send) -> R {
        f(&*self.inner.lock().await)
    }

    /// Run a closure against the locked driver with mutable access.
    pub async fn with_driver_mut<R>(&self, f: impl FnOnce(&mut D) -> R + Send) -> R {
        f(&mut *self.inner.lock().await)
    }
}
