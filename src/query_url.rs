use percent_encoding::percent_decode_str;
use reqwest::Url;

use crate::{CheckError, Config};

/// Instant query endpoint of the Prometheus HTTP API.
pub const QUERY_PATH: &str = "/api/v1/query";

/// Builds `{scheme}://[user:password@]host:port/api/v1/query?query=<query>`.
///
/// The query is percent-decoded first and then form-encoded exactly once, so it doesn't matter
/// whether the command definition passes it raw or already encoded. A `+` is kept as the PromQL
/// operator and not read as an encoded space.
pub fn build_query_url(config: &Config) -> Result<Url, CheckError> {
    let scheme = if config.ssl { "https" } else { "http" };
    let base = format!("{}://{}:{}{}", scheme, config.host, config.port, QUERY_PATH);

    let mut url =
        Url::parse(&base).map_err(|e| CheckError::InvalidUrl(format!("{}: {}", base, e)))?;

    if let Some(auth) = &config.credentials {
        let no_credentials =
            |_: ()| CheckError::InvalidUrl(format!("{}: cannot carry credentials", base));
        url.set_username(&auth.username).map_err(no_credentials)?;
        url.set_password(Some(&auth.password))
            .map_err(no_credentials)?;
    }

    let query = percent_decode_str(&config.query).decode_utf8_lossy();
    url.query_pairs_mut().append_pair("query", &query);

    Ok(url)
}

/// Copy of `url` that is safe to log.
pub fn redacted(url: &Url) -> Url {
    let mut url = url.clone();
    if url.password().is_some() {
        // Can only fail for URLs without a host, which never carry a password.
        let _ = url.set_password(Some("xxxxx"));
    }
    url
}
