use crate::{Error, Result};
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

/// Remote resource under test, sized once with a HEAD request
#[derive(Debug, Clone)]
pub struct Target {
    url: Url,
    length: u64,
}

impl Target {
    /// Probe the target for its size
    ///
    /// # Arguments
    /// * `url` - URL of the file
    /// * `client` - reference to a reqwest [`Client`][reqwest::Client] in case custom settings are needed
    #[instrument(skip(client), fields(URL = %url))]
    pub async fn probe(url: &str, client: &Client) -> Result<Self> {
        let parsed = Url::parse(url)?;
        let resp = client.head(parsed.clone()).send().await?;
        debug!("Response code: {}", resp.status());
        debug!("Received HEAD response: {:?}", resp.headers());
        let length = resp
            .headers()
            .get(CONTENT_LENGTH)
            .ok_or(Error::NoLen)?
            .to_str()?
            .parse::<u64>()?;
        Self::assemble(parsed, length)
    }

    /// Assemble the target manually in case the server doesn't allow head requests
    pub fn manual(url: &str, length: u64) -> Result<Self> {
        Self::assemble(Url::parse(url)?, length)
    }

    fn assemble(url: Url, length: u64) -> Result<Self> {
        if length == 0 {
            return Err(Error::NoLen);
        }
        Ok(Self { url, length })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn length(&self) -> u64 {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_rejected() {
        assert!(Target::manual("http://localhost/file.bin", 0).is_err());
    }

    #[test]
    fn bad_url_rejected() {
        assert!(Target::manual("not a url", 1024).is_err());
    }
}
