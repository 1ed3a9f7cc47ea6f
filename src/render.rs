//! Headless browser session for the rendered-page strategies.
//!
//! Drives headless Chromium through a Playwright script run under
//! `tokio::process`, returning the fully rendered markup. One
//! [`ChromiumRenderer`] is created per batch and owns a persistent temporary
//! profile directory, so cookies and local storage span the whole run and
//! the session is released when the renderer is dropped.
//!
//! Each page load runs its own short-lived `node` process against that
//! shared profile: the browser relaunches per load, but session state
//! carries over through the profile directory, and the sequential batch
//! guarantees the profile never has two consumers. Keeping one Playwright
//! context alive across loads would save the relaunch cost at the price of
//! a long-lived child process to supervise.

use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use thiserror::Error;

/// Errors that can occur while rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The browser process could not be started.
    #[error("failed to launch browser session: {0}")]
    Launch(#[from] std::io::Error),

    /// Navigation or in-page scripting failed.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The render did not finish within the configured timeout.
    #[error("render timed out after {0:?}")]
    Timeout(Duration),

    /// The browser produced no readable markup.
    #[error("rendered page produced no readable output")]
    EmptyOutput,
}

/// Per-render options.
///
/// Scroll pauses are sampled by the pacer up front and executed inside the
/// page session, so lazy content gets a human-looking trigger.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Pause after each simulated scroll; one scroll per entry.
    pub scroll_pauses: Vec<Duration>,
}

/// A rendered-page source: load a URL with JS execution, return final HTML.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Renders `url` and returns the final markup.
    async fn render(&self, url: &str, options: &RenderOptions) -> Result<String, RenderError>;
}

/// Production renderer: headless Chromium via a Playwright script.
pub struct ChromiumRenderer {
    user_agent: String,
    timeout: Duration,
    profile_dir: TempDir,
}

impl ChromiumRenderer {
    /// Creates the batch-scoped browser session.
    ///
    /// The temporary profile directory is the session state; dropping the
    /// renderer removes it.
    pub fn new(user_agent: String, timeout: Duration) -> Result<Self, RenderError> {
        let profile_dir = TempDir::new()?;
        Ok(Self {
            user_agent,
            timeout,
            profile_dir,
        })
    }

    /// Builds the Playwright script for one page load.
    ///
    /// All interpolated values are embedded as JSON string literals so URL
    /// or user-agent content can never escape into script syntax.
    fn build_script(&self, url: &str, options: &RenderOptions) -> String {
        let url_js = serde_json::to_string(url).unwrap_or_else(|_| "\"\"".into());
        let ua_js = serde_json::to_string(&self.user_agent).unwrap_or_else(|_| "\"\"".into());
        let profile_js = serde_json::to_string(&self.profile_dir.path().display().to_string())
            .unwrap_or_else(|_| "\"\"".into());
        let pauses: Vec<u64> = options
            .scroll_pauses
            .iter()
            .map(|p| p.as_millis() as u64)
            .collect();
        let pauses_js = serde_json::to_string(&pauses).unwrap_or_else(|_| "[]".into());
        let nav_timeout_ms = self.timeout.as_millis() as u64;

        format!(
            r#"
            const {{ chromium }} = require('playwright');
            (async () => {{
                const context = await chromium.launchPersistentContext({profile_js}, {{
                    headless: true,
                    userAgent: {ua_js},
                }});
                const page = await context.newPage();
                const response = await page.goto({url_js}, {{ waitUntil: 'networkidle', timeout: {nav_timeout_ms} }});
                if (response && response.status() >= 400) {{
                    console.error('HTTP ' + response.status());
                    await context.close();
                    process.exit(2);
                }}
                for (const pause of {pauses_js}) {{
                    await page.mouse.wheel(0, 1200);
                    await page.waitForTimeout(pause);
                }}
                const html = await page.content();
                process.stdout.write(html);
                await context.close();
            }})().catch(err => {{ console.error(String(err)); process.exit(1); }});
            "#
        )
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(&self, url: &str, options: &RenderOptions) -> Result<String, RenderError> {
        let script = self.build_script(url, options);

        log::debug!("rendering {url} ({} scrolls)", options.scroll_pauses.len());
        let output = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new("node")
                .arg("-e")
                .arg(&script)
                .output(),
        )
        .await
        .map_err(|_| RenderError::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::Navigation(stderr));
        }

        let html = String::from_utf8_lossy(&output.stdout).to_string();
        if html.trim().is_empty() {
            return Err(RenderError::EmptyOutput);
        }
        Ok(html)
    }
}
