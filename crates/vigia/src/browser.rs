//! Browser selection and the CDP driver.
//!
//! [`BrowserKind`] picks the executable family (`--browser` on the CLI);
//! Edge is the default. The real driver speaks the Chrome DevTools
//! Protocol through chromiumoxide and is only compiled with the
//! `browser` feature; both Chrome and Edge are Chromium, so the kind
//! matters only for executable discovery.

use std::fmt;

/// Environment override for the browser executable, checked before any
/// discovery.
pub const BROWSER_PATH_ENV: &str = "VIGIA_BROWSER_PATH";

/// Which browser family to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrowserKind {
    /// Google Chrome / Chromium
    Chrome,
    /// Microsoft Edge
    #[default]
    Edge,
}

impl BrowserKind {
    /// Canonical lowercase name, as accepted by the CLI.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Edge => "edge",
        }
    }

    /// Parse a browser name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Some(Self::Chrome),
            "edge" | "msedge" => Some(Self::Edge),
            _ => None,
        }
    }

    /// Command names probed on `PATH`, in preference order.
    #[must_use]
    pub const fn command_names(self) -> &'static [&'static str] {
        match self {
            Self::Chrome => &[
                "google-chrome",
                "google-chrome-stable",
                "chromium",
                "chromium-browser",
                "chrome",
            ],
            Self::Edge => &["microsoft-edge", "microsoft-edge-stable", "msedge"],
        }
    }

    /// Well-known install locations probed after `PATH`.
    #[must_use]
    pub const fn fallback_paths(self) -> &'static [&'static str] {
        match self {
            Self::Chrome => &[
                "/usr/bin/google-chrome",
                "/opt/google/chrome/chrome",
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
                "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe",
                "C:\\Program Files (x86)\\Google\\Chrome\\Application\\chrome.exe",
            ],
            Self::Edge => &[
                "/usr/bin/microsoft-edge",
                "/opt/microsoft/msedge/msedge",
                "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
                "C:\\Program Files (x86)\\Microsoft\\Edge\\Application\\msedge.exe",
                "C:\\Program Files\\Microsoft\\Edge\\Application\\msedge.exe",
            ],
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use std::path::PathBuf;

    use async_trait::async_trait;
    use base64::Engine;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use tracing::{info, warn};

    use super::{BrowserKind, BROWSER_PATH_ENV};
    use crate::driver::{DriverConfig, ElementHandle, Screenshot, UiDriver, Visibility};
    use crate::fixture::DriverProvider;
    use crate::locator::Locator;
    use crate::result::{VigiaError, VigiaResult};

    impl BrowserKind {
        /// Find the browser executable: env override, then `PATH`, then
        /// well-known install locations.
        ///
        /// # Errors
        ///
        /// Returns [`VigiaError::BrowserLaunch`] when nothing is found or
        /// the override points at a missing file.
        pub fn locate_executable(self) -> VigiaResult<PathBuf> {
            if let Ok(value) = std::env::var(BROWSER_PATH_ENV) {
                let path = PathBuf::from(value);
                if path.exists() {
                    return Ok(path);
                }
                return Err(VigiaError::BrowserLaunch {
                    message: format!(
                        "{BROWSER_PATH_ENV} points to a missing file: {}",
                        path.display()
                    ),
                });
            }
            for name in self.command_names() {
                if let Ok(found) = which::which(name) {
                    return Ok(found);
                }
            }
            for candidate in self.fallback_paths() {
                let path = std::path::Path::new(candidate);
                if path.exists() {
                    return Ok(path.to_path_buf());
                }
            }
            Err(VigiaError::BrowserLaunch {
                message: format!(
                    "no {self} executable found; install it or set {BROWSER_PATH_ENV}"
                ),
            })
        }
    }

    /// Real browser driver over the Chrome DevTools Protocol.
    #[derive(Debug)]
    pub struct CdpDriver {
        browser: CdpBrowser,
        page: CdpPage,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
        navigation_timeout: std::time::Duration,
    }

    impl CdpDriver {
        /// Launch the browser and open a blank page.
        ///
        /// # Errors
        ///
        /// Returns [`VigiaError::BrowserLaunch`] when no executable is
        /// found or the process fails to start.
        pub async fn launch(kind: BrowserKind, config: DriverConfig) -> VigiaResult<Self> {
            let executable = match config.executable_path.clone() {
                Some(path) => path,
                None => kind.locate_executable()?,
            };
            info!(
                browser = %kind,
                executable = %executable.display(),
                headless = config.headless,
                "launching browser"
            );

            let mut builder = CdpConfig::builder()
                .chrome_executable(&executable)
                .window_size(config.viewport_width, config.viewport_height);
            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            let cdp_config = builder
                .build()
                .map_err(|message| VigiaError::BrowserLaunch { message })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                VigiaError::BrowserLaunch {
                    message: e.to_string(),
                }
            })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| VigiaError::Session {
                    message: e.to_string(),
                })?;

            Ok(Self {
                browser,
                page,
                handle,
                navigation_timeout: config.navigation_timeout,
            })
        }

        async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> VigiaResult<T> {
            let result =
                self.page
                    .evaluate(expr)
                    .await
                    .map_err(|e| VigiaError::Session {
                        message: e.to_string(),
                    })?;
            Ok(result.into_value()?)
        }
    }

    #[async_trait]
    impl UiDriver for CdpDriver {
        async fn navigate(&mut self, url: &str) -> VigiaResult<()> {
            let load = async {
                self.page.goto(url).await?;
                self.page.wait_for_navigation().await?;
                Ok::<(), chromiumoxide::error::CdpError>(())
            };
            match tokio::time::timeout(self.navigation_timeout, load).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(VigiaError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                }),
                Err(_) => Err(VigiaError::Navigation {
                    url: url.to_string(),
                    message: format!("page load exceeded {:?}", self.navigation_timeout),
                }),
            }
        }

        async fn current_url(&self) -> VigiaResult<String> {
            let url = self.page.url().await.map_err(|e| VigiaError::Session {
                message: e.to_string(),
            })?;
            Ok(url.unwrap_or_default())
        }

        async fn title(&self) -> VigiaResult<String> {
            let title = self
                .page
                .get_title()
                .await
                .map_err(|e| VigiaError::Session {
                    message: e.to_string(),
                })?;
            Ok(title.unwrap_or_default())
        }

        async fn find(&self, locator: &Locator) -> VigiaResult<Option<ElementHandle>> {
            self.eval(locator.describe_js()).await
        }

        async fn is_present(&self, locator: &Locator) -> VigiaResult<bool> {
            self.eval(locator.presence_js()).await
        }

        async fn visibility(&self, locator: &Locator) -> VigiaResult<Visibility> {
            let state: Option<bool> = self.eval(locator.visibility_js()).await?;
            Ok(match state {
                None => Visibility::Absent,
                Some(false) => Visibility::Hidden,
                Some(true) => Visibility::Visible,
            })
        }

        async fn click(&mut self, locator: &Locator) -> VigiaResult<()> {
            let clicked: bool = self.eval(locator.click_js()).await?;
            if clicked {
                Ok(())
            } else {
                Err(VigiaError::NotFound {
                    locator: locator.to_string(),
                })
            }
        }

        async fn clear(&mut self, locator: &Locator) -> VigiaResult<()> {
            let cleared: bool = self.eval(locator.clear_js()).await?;
            if cleared {
                Ok(())
            } else {
                Err(VigiaError::NotFound {
                    locator: locator.to_string(),
                })
            }
        }

        async fn type_text(&mut self, locator: &Locator, text: &str) -> VigiaResult<()> {
            let typed: bool = self.eval(locator.type_js(text)).await?;
            if typed {
                Ok(())
            } else {
                Err(VigiaError::NotFound {
                    locator: locator.to_string(),
                })
            }
        }

        async fn screenshot(&self) -> VigiaResult<Screenshot> {
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();
            let response =
                self.page
                    .execute(params)
                    .await
                    .map_err(|e| VigiaError::Screenshot {
                        message: e.to_string(),
                    })?;
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(&response.data)
                .map_err(|e| VigiaError::Screenshot {
                    message: e.to_string(),
                })?;
            Ok(Screenshot::new(bytes))
        }

        async fn close(&mut self) -> VigiaResult<()> {
            self.browser
                .close()
                .await
                .map_err(|e| VigiaError::Session {
                    message: e.to_string(),
                })?;
            if let Err(e) = self.browser.wait().await {
                warn!(error = %e, "browser process did not exit cleanly");
            }
            Ok(())
        }
    }

    /// Launches a fresh CDP browser for every test session.
    #[derive(Debug, Clone)]
    pub struct CdpProvider {
        kind: BrowserKind,
        config: DriverConfig,
    }

    impl CdpProvider {
        /// Provider for the given browser family and launch config.
        #[must_use]
        pub const fn new(kind: BrowserKind, config: DriverConfig) -> Self {
            Self { kind, config }
        }
    }

    #[async_trait]
    impl DriverProvider for CdpProvider {
        type Driver = CdpDriver;

        async fn provide(&self) -> VigiaResult<CdpDriver> {
            CdpDriver::launch(self.kind, self.config.clone()).await
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{CdpDriver, CdpProvider};
