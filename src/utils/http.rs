use log::debug;
use reqwest::Client;
use url::Url;

use crate::error::ClerkError;

fn fetch_error(url: &Url, detail: impl ToString) -> ClerkError {
    ClerkError::Fetch {
        url: url.to_string(),
        detail: detail.to_string(),
    }
}

/// POSTs a form and returns the response body as text.
pub async fn post_form(
    client: &Client,
    url: &Url,
    form: &[(&str, String)],
    user_agent: &str,
) -> Result<String, ClerkError> {
    debug!("POST {}", url);

    let response = client
        .post(url.as_str())
        .header(reqwest::header::USER_AGENT, user_agent)
        .form(form)
        .send()
        .await
        .map_err(|e| fetch_error(url, e))?;

    debug!("Response status: {}", response.status());

    if !response.status().is_success() {
        return Err(fetch_error(
            url,
            format!("HTTP status {}", response.status()),
        ));
    }

    response.text().await.map_err(|e| fetch_error(url, e))
}

/// GETs a URL and returns the raw response body.
pub async fn fetch_bytes(
    client: &Client,
    url: &Url,
    user_agent: &str,
) -> Result<Vec<u8>, ClerkError> {
    debug!("GET {}", url);

    let response = client
        .get(url.as_str())
        .header(reqwest::header::USER_AGENT, user_agent)
        .send()
        .await
        .map_err(|e| fetch_error(url, e))?;

    debug!("Response status: {}", response.status());

    if !response.status().is_success() {
        return Err(fetch_error(
            url,
            format!("HTTP status {}", response.status()),
        ));
    }

    let content = response.bytes().await.map_err(|e| fetch_error(url, e))?;
    debug!("Received {} bytes", content.len());

    Ok(content.to_vec())
}
