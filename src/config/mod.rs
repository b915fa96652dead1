pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

use std::time::Duration;

pub use actions::*;
use color_eyre::eyre::{WrapErr, eyre};
use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::cli::Args;
use crate::movies::PayloadShape;
use crate::theme::DEFAULT_THEME;

/// Public film API used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://swapi.dev/api/films/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    pub shape: PayloadShape,
    /// Whether movies can be added. Unset means "only for keyed-map endpoints".
    pub writable: Option<bool>,
    /// Request timeout. Unset means requests may hang indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            shape: PayloadShape::List,
            writable: None,
            timeout_secs: None,
        }
    }
}

impl EndpointConfig {
    pub fn parsed_url(&self) -> color_eyre::Result<Url> {
        let url = Url::parse(&self.url)
            .wrap_err_with(|| format!("Invalid endpoint URL: {}", self.url))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(eyre!("Unsupported endpoint scheme '{scheme}' in {url}")),
        }
    }

    pub fn is_writable(&self) -> bool {
        self.writable
            .unwrap_or(matches!(self.shape, PayloadShape::Keyed))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl AppConfig {
    /// Apply command line overrides on top of the file configuration.
    ///
    /// Pointing at a different URL drops the file's `writable` setting.
    pub fn apply_cli_args(&mut self, args: &Args) {
        if let Some(url) = &args.endpoint {
            if *url != self.endpoint.url {
                self.endpoint.writable = None;
            }
            self.endpoint.url.clone_from(url);
        }
        if let Some(shape) = args.shape {
            self.endpoint.shape = shape;
        }
        if let Some(theme) = &args.theme {
            self.theme.name.clone_from(theme);
        }
    }
}
