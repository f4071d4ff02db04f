// src/remote_config.rs
//
// External config layer for a host element: a `remoteconfig` URL when present,
// otherwise an inline `<script type="application/json">` child.

use crate::utils::js_error;
use crate::zoom_config::PartialConfig;
use gloo_net::http::Request;
use web_sys::Element;

pub const REMOTE_CONFIG_ATTR: &str = "remoteconfig";
pub const INLINE_CONFIG_SELECTOR: &str = r#":scope > script[type="application/json"]"#;

/// Where the external layer comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Remote(String),
    Inline(String),
    None,
}

impl ConfigSource {
    pub fn locate(element: &Element) -> Result<Self, String> {
        if let Some(url) = element
            .get_attribute(REMOTE_CONFIG_ATTR)
            .filter(|url| !url.trim().is_empty())
        {
            return Ok(ConfigSource::Remote(url));
        }
        match element.query_selector(INLINE_CONFIG_SELECTOR) {
            Ok(Some(script)) => Ok(ConfigSource::Inline(
                script.text_content().unwrap_or_default(),
            )),
            Ok(None) => Ok(ConfigSource::None),
            Err(e) => Err(js_error(e)),
        }
    }
}

pub async fn resolve(element: &Element) -> Result<PartialConfig, String> {
    match ConfigSource::locate(element)? {
        ConfigSource::Remote(url) => fetch_remote(&url).await,
        ConfigSource::Inline(text) => PartialConfig::from_json(&text),
        ConfigSource::None => Ok(PartialConfig::default()),
    }
}

async fn fetch_remote(url: &str) -> Result<PartialConfig, String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch remote config {}: {:?}", url, e))?;
    if !resp.ok() {
        return Err(format!(
            "Remote config {} answered with status {}",
            url,
            resp.status()
        ));
    }
    let text = resp
        .text()
        .await
        .map_err(|e| format!("Failed to read remote config: {:?}", e))?;
    log::debug!("Loaded remote config from {}", url);
    PartialConfig::from_json(&text)
}
