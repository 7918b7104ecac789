use percent_encoding::percent_decode_str;
use reqwest::{StatusCode, Url};

use crate::query_url::redacted;
use crate::CheckError;

/// Something that can run the one GET a check needs.
pub trait QueryClient {
    /// Fetches `url` once and returns the body of a `200 OK` response. Any other status is
    /// reported as [CheckError::UnexpectedStatus] without reading the body.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, CheckError>;
}

/// Blocking HTTP client with reqwest's default timeout and redirect policy.
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, CheckError> {
        Ok(Self {
            client: reqwest::blocking::Client::builder().build()?,
        })
    }

    /// Wraps an already configured client, e.g. one with custom proxy settings.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl QueryClient for HttpClient {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, CheckError> {
        tracing::debug!(url = %redacted(url), "querying prometheus");

        // Credentials travel in the Authorization header, never in the request line.
        let (target, credentials) = split_credentials(url);
        let mut request = self.client.get(target);
        if let Some((username, password)) = credentials {
            request = request.basic_auth(username, password);
        }

        let response = request.send()?;
        let status = response.status();
        tracing::debug!(%status, "prometheus responded");

        if status != StatusCode::OK {
            return Err(CheckError::UnexpectedStatus(status.as_u16()));
        }

        Ok(response.bytes()?.to_vec())
    }
}

fn split_credentials(url: &Url) -> (Url, Option<(String, Option<String>)>) {
    if url.username().is_empty() {
        return (url.clone(), None);
    }

    let decode = |s: &str| percent_decode_str(s).decode_utf8_lossy().into_owned();
    let credentials = (decode(url.username()), url.password().map(decode));

    let mut target = url.clone();
    let _ = target.set_username("");
    let _ = target.set_password(None);
    (target, Some(credentials))
}
