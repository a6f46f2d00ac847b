use reqwest::Client;
use serenity::async_trait;
use songbird::input::{Compose, Input, YoutubeDl};
use tracing::{info, warn};
use url::Url;

use crate::playlist::{MediaResolver, ResolutionError, ResolvedMedia};

/// Resolves video URLs through yt-dlp (via songbird's `YoutubeDl` source).
#[derive(Clone, Default)]
pub struct YtDlpResolver {
    http: Client,
}

impl YtDlpResolver {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Checks the locator is an absolute http(s) URL.
    pub fn validate(locator: &str) -> Result<Url, ResolutionError> {
        let url = Url::parse(locator)
            .map_err(|e| ResolutionError::InvalidLocator(format!("{}: {}", locator, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ResolutionError::InvalidLocator(format!(
                "{}: unsupported scheme '{}'",
                locator, other
            ))),
        }
    }
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    type Stream = Input;

    async fn resolve(&self, locator: &str) -> Result<ResolvedMedia<Input>, ResolutionError> {
        let url = Self::validate(locator)?;
        info!("Resolving metadata for {}", url);

        let mut source = YoutubeDl::new(self.http.clone(), url.to_string());
        let metadata = source.aux_metadata().await.map_err(|e| {
            warn!("yt-dlp could not resolve {}: {}", locator, e);
            ResolutionError::Unresolvable {
                locator: locator.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(ResolvedMedia {
            title: metadata.title.unwrap_or_else(|| "Unknown Title".to_string()),
            stream: source.into(),
        })
    }

    async fn open_stream(&self, locator: &str) -> Result<Input, ResolutionError> {
        let url = Self::validate(locator)?;
        // Lazy: yt-dlp only runs once the driver starts pulling audio.
        Ok(YoutubeDl::new(self.http.clone(), url.to_string()).into())
    }
}
