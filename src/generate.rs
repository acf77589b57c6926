use crate::config::Settings;
use crate::error::Error;
use crate::ollama_api::{ErrorResponse, GenerateRequest, GenerateResponse};
use reqwest::StatusCode;
use tracing::{debug, info, warn};
use url::Url;

/// A finished request: status plus the fully read body
#[derive(Debug)]
pub struct Exchange {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Exchange {
    pub fn into_response(self) -> Result<GenerateResponse, Error> {
        if !self.status.is_success() {
            let message = match serde_json::from_slice::<ErrorResponse>(&self.body) {
                Ok(err) => err.error,
                Err(_) => String::from_utf8_lossy(&self.body).trim().to_string(),
            };
            return Err(Error::Server {
                status: self.status,
                message,
            });
        }

        let response = serde_json::from_slice::<GenerateResponse>(&self.body)?;
        debug!("Response carried {} context tokens", response.context.len());

        Ok(response)
    }
}

/// `<base>/api/generate`, keeping any path prefix the base URL has
pub fn generate_url(base: &Url) -> Url {
    let mut url = base.clone();
    let path = format!("{}/api/generate", base.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}

/// Sends one generate request with a fresh client and reads the whole body
pub async fn send(settings: &Settings, image: String) -> Result<Exchange, Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(Error::BuildRequest)?;

    let body = GenerateRequest::new(&settings.model, &settings.prompt, image);
    let url = generate_url(&settings.base_url);

    info!("Sending generate request to {url} (model {})", settings.model);

    let request = client
        .post(url)
        .json(&body)
        .build()
        .map_err(Error::BuildRequest)?;

    let response = client.execute(request).await.map_err(Error::SendRequest)?;

    let status = response.status();
    if !status.is_success() {
        warn!("Failed request. Status: {status}");
    }

    let body = response.bytes().await.map_err(Error::ReadResponse)?;

    Ok(Exchange {
        status,
        body: body.to_vec(),
    })
}
