//! Element locators for the vtiger UI.
//!
//! A [`Locator`] pairs a lookup [`Strategy`] with a value and knows how to
//! render itself as a JavaScript expression for CDP-based drivers. Page
//! objects bind their locators once at construction time, so a selector
//! change touches exactly one place.

use std::fmt;

/// How an element is looked up in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `name` attribute (form fields: `user_name`, `user_password`)
    Name,
    /// `id` attribute
    Id,
    /// CSS selector
    Css,
    /// XPath expression
    XPath,
    /// Exact trimmed text of an anchor element
    LinkText,
}

impl Strategy {
    /// Short tag used in log lines and error messages.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Id => "id",
            Self::Css => "css",
            Self::XPath => "xpath",
            Self::LinkText => "link_text",
        }
    }
}

/// A single element selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    /// Lookup strategy
    pub strategy: Strategy,
    /// Strategy-specific value
    pub value: String,
}

impl Locator {
    /// Locate by `name` attribute.
    #[must_use]
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Name,
            value: value.into(),
        }
    }

    /// Locate by `id` attribute.
    #[must_use]
    pub fn id(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Id,
            value: value.into(),
        }
    }

    /// Locate by CSS selector.
    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::Css,
            value: value.into(),
        }
    }

    /// Locate by XPath expression.
    #[must_use]
    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::XPath,
            value: value.into(),
        }
    }

    /// Locate an anchor by its exact trimmed text.
    #[must_use]
    pub fn link_text(value: impl Into<String>) -> Self {
        Self {
            strategy: Strategy::LinkText,
            value: value.into(),
        }
    }

    /// JavaScript expression evaluating to the element or a falsy value.
    #[must_use]
    pub fn element_js(&self) -> String {
        let v = &self.value;
        match self.strategy {
            Strategy::Name => format!("document.getElementsByName({v:?})[0]"),
            Strategy::Id => format!("document.getElementById({v:?})"),
            Strategy::Css => format!("document.querySelector({v:?})"),
            Strategy::XPath => {
                format!("document.evaluate({v:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Strategy::LinkText => {
                format!("Array.from(document.querySelectorAll('a')).find(el => el.textContent.trim() === {v:?})")
            }
        }
    }

    /// JavaScript expression evaluating to `true` when the element exists.
    #[must_use]
    pub fn presence_js(&self) -> String {
        format!("!!({})", self.element_js())
    }

    /// JavaScript expression evaluating to `null` when the element is
    /// absent, otherwise an object with its tag, text and visibility.
    #[must_use]
    pub fn describe_js(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) {{ return null; }} return {{ tag: el.tagName.toLowerCase(), text: el.textContent, visible: !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length) }}; }})()",
            self.element_js()
        )
    }

    /// JavaScript expression evaluating to `null` when the element is
    /// absent, otherwise a boolean for its rendered visibility.
    #[must_use]
    pub fn visibility_js(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) {{ return null; }} return !!(el.offsetWidth || el.offsetHeight || el.getClientRects().length); }})()",
            self.element_js()
        )
    }

    /// JavaScript expression that clicks the element, evaluating to `true`
    /// on success and `false` when the element is absent.
    #[must_use]
    pub fn click_js(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) {{ return false; }} el.click(); return true; }})()",
            self.element_js()
        )
    }

    /// JavaScript expression that clears the element's value.
    #[must_use]
    pub fn clear_js(&self) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) {{ return false; }} el.value = ''; return true; }})()",
            self.element_js()
        )
    }

    /// JavaScript expression that appends `text` to the element's value and
    /// fires an `input` event so framework listeners observe the change.
    #[must_use]
    pub fn type_js(&self, text: &str) -> String {
        format!(
            "(() => {{ const el = {}; if (!el) {{ return false; }} el.value = el.value + {text:?}; el.dispatchEvent(new Event('input', {{ bubbles: true }})); return true; }})()",
            self.element_js()
        )
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy.tag(), self.value)
    }
}
