use reqwest::blocking::Client;
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};

pub fn build_client(config: &ScrapeConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout);
    if !config.system_proxy {
        builder = builder.no_proxy();
    }
    Ok(builder.build()?)
}

/// GETs `url` and returns the body. Any non-2xx status is an error.
pub fn get_text(client: &Client, url: &str) -> Result<String> {
    debug!("📡 GET {}", url);

    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text()?;
    debug!("✅ Fetched {} bytes from {}", body.len(), url);
    Ok(body)
}
