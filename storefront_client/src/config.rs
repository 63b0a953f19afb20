use log::*;

pub const DEFAULT_BASE_URL: &str = "https://api.bestbuyelectronics.lk/";

/// Connection settings for the storefront API. The base URL is expected to carry its trailing
/// slash, since request paths are appended to it verbatim.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub base_url: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl StorefrontConfig {
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| {
            warn!("STOREFRONT_BASE_URL not set, using {DEFAULT_BASE_URL} as default");
            DEFAULT_BASE_URL.to_string()
        });
        Self { base_url }
    }
}
