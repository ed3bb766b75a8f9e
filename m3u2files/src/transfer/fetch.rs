use std::{error::Error, fmt::Display, io, path::Path, time::Duration};

use log::info;
use reqwest::{Client, Proxy};
use url::Url;

use crate::HttpConfig;

pub fn build_client(config: &HttpConfig) -> Result<Client, FetchError> {
    let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_secs));

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent)
    }

    if let Some(proxy) = &config.proxy {
        info!("With proxy: {}", proxy);
        builder = builder.proxy(Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}

/// Downloads `origin` and stores the raw bytes at `destination`.
///
/// Returns the number of bytes written.
pub async fn fetch_playlist(
    http_client: &Client,
    origin: impl AsRef<str>,
    destination: impl AsRef<Path>,
) -> Result<usize, FetchError> {
    let origin = Url::parse(origin.as_ref())?;

    let response = http_client.get(origin.clone()).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::RequestNotSuccess(response.status().as_u16()));
    }

    let bytes = response.bytes().await?;
    tokio::fs::write(destination.as_ref(), &bytes).await?;

    info!(
        "Fetched {} bytes from {} into {}",
        bytes.len(),
        origin,
        destination.as_ref().display()
    );
    Ok(bytes.len())
}

#[derive(Debug)]
pub enum FetchError {
    InvalidUrl(url::ParseError),
    RequestError(reqwest::Error),
    RequestNotSuccess(u16),
    IoError(io::Error),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl(e) => write!(f, "Invalid playlist url: {}", e),
            Self::RequestError(e) => e.fmt(f),
            Self::RequestNotSuccess(status_code) => {
                write!(f, "Server respond with status code {}", status_code)
            }
            Self::IoError(e) => write!(f, "Failed to store playlist: {}", e),
        }
    }
}

impl Error for FetchError {}

impl From<url::ParseError> for FetchError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidUrl(value)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::RequestError(value)
    }
}

impl From<io::Error> for FetchError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}
