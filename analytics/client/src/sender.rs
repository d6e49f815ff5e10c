use crate::Error;
use analytics_model::Payload;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::fmt::Debug;
use url::Url;

/// Transport for hits.
#[async_trait]
pub trait DataSender: Send + Sync + Debug {
    /// Post an already encoded body.
    ///
    /// If `read_response` is set, the response body is returned. That is only needed for hit
    /// validation, the collection endpoint returns an image.
    async fn send_data(&self, uri: &Url, body: String, read_response: bool) -> Result<Option<String>, Error>;

    /// Post the payload as a form.
    async fn send_form(&self, uri: &Url, payload: &Payload) -> Result<(), Error>;
}

/// Sends hits using a [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct HttpDataSender {
    client: reqwest::Client,
}

impl HttpDataSender {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataSender for HttpDataSender {
    async fn send_data(&self, uri: &Url, body: String, read_response: bool) -> Result<Option<String>, Error> {
        if body.is_empty() {
            return Err(Error::EmptyPayload);
        }

        log::debug!("Sending hit to {uri}: {body}");

        let response = self
            .client
            .post(uri.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        if read_response {
            Ok(Some(response.text().await?))
        } else {
            Ok(None)
        }
    }

    async fn send_form(&self, uri: &Url, payload: &Payload) -> Result<(), Error> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        log::debug!("Sending hit form to {uri}: {payload}");

        let response = self.client.post(uri.clone()).form(payload.pairs()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        Ok(())
    }
}
