//! Decorative banner image shown above the form
//!
//! Fetched once at startup and embedded in the page as a base64 `data:`
//! URL. A failed fetch only costs the banner.

use base64::{engine::general_purpose, Engine as _};
use std::time::Duration;

use crate::{config::BannerConfig, error::BannerError};

pub const MAX_SIZE_BYTES: usize = 20 * 1024 * 1024;
const SUPPORTED_FORMATS: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub mime_type: String,
    pub base64_data: String,
    pub caption: String,
}

impl Banner {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

/// Fetch the banner described by `config`, or `None` when disabled or unavailable
pub async fn load_banner(config: &BannerConfig) -> Option<Banner> {
    if !config.enabled {
        tracing::info!("Banner disabled");
        return None;
    }

    match fetch_banner(
        &config.url,
        &config.caption,
        Duration::from_secs(config.timeout_seconds),
        config.max_size_bytes,
    )
    .await
    {
        Ok(banner) => Some(banner),
        Err(e) => {
            tracing::warn!(url = %config.url, error = %e, "Banner unavailable, rendering without it");
            None
        }
    }
}

/// Fetch an image over HTTP(S) and encode it as base64
///
/// The body is read chunk by chunk and abandoned as soon as it grows past
/// `max_bytes`, whether or not the server announced a length.
pub async fn fetch_banner(
    url: &str,
    caption: &str,
    timeout: Duration,
    max_bytes: usize,
) -> Result<Banner, BannerError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(BannerError::UnsupportedScheme(url.to_string()));
    }

    tracing::debug!("Fetching banner from URL: {}", url);

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let mut response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(BannerError::Status(response.status()));
    }

    let mime_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();
    let mime_base = normalize_mime(&mime_type);
    if !SUPPORTED_FORMATS.contains(&mime_base.as_str()) {
        return Err(BannerError::NotAnImage(mime_type));
    }

    // Check Content-Length before downloading the body
    if let Some(length) = response.content_length() {
        let length = usize::try_from(length).unwrap_or(usize::MAX);
        if length > max_bytes {
            return Err(BannerError::TooLarge {
                size: length,
                max: max_bytes,
            });
        }
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let size = bytes.len() + chunk.len();
        if size > max_bytes {
            return Err(BannerError::TooLarge {
                size,
                max: max_bytes,
            });
        }
        bytes.extend_from_slice(&chunk);
    }

    tracing::info!(bytes = bytes.len(), mime = %mime_base, "Banner fetched");

    Ok(Banner {
        mime_type: mime_base,
        base64_data: general_purpose::STANDARD.encode(&bytes),
        caption: caption.to_string(),
    })
}

fn normalize_mime(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or(mime_type)
        .trim()
        .to_lowercase()
}
