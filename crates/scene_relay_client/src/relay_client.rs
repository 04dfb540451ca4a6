//! HTTP client for the relay.

use reqwest::{Client, Url};
use scene_relay_shared::{KickAck, KICK_QUEUE_ROUTE, KICK_ROUTE, PARTS_ROUTE};
use serde_json::Value;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Thin wrapper around the relay's four operations.
#[derive(Clone, Debug)]
pub struct RelayClient {
    http: Client,
    base: Url,
}

impl RelayClient {
    /// Creates a client for the relay at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let base = Url::parse(base_url).map_err(|err| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_owned(),
                reason: "not a base url".to_owned(),
            });
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    /// Relay base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds `base/route/extra...`, percent-encoding each segment.
    fn endpoint(&self, route: &str, extra: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| ClientError::InvalidUrl {
                url: self.base.to_string(),
                reason: "not a base url".to_owned(),
            })?;
            segments.pop_if_empty();
            segments.extend(route.split('/').filter(|s| !s.is_empty()));
            segments.extend(extra);
        }
        Ok(url)
    }

    /// Fetches the current snapshot document.
    pub async fn fetch_snapshot(&self) -> ClientResult<Value> {
        let url = self.endpoint(PARTS_ROUTE, &[])?;
        let document = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(document)
    }

    /// Replaces the relay's snapshot.
    pub async fn push_snapshot(&self, snapshot: &Value) -> ClientResult<()> {
        let url = self.endpoint(PARTS_ROUTE, &[])?;
        self.http
            .post(url)
            .json(snapshot)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Asks the relay to queue a kick for `id`.
    pub async fn request_kick(&self, id: &str) -> ClientResult<KickAck> {
        let url = self.endpoint(KICK_ROUTE, &[id])?;
        let ack = self
            .http
            .post(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        tracing::info!("Kick requested for {}", id);
        Ok(ack)
    }

    /// Drains the relay's kick queue.
    pub async fn drain_kick_queue(&self) -> ClientResult<Vec<String>> {
        let url = self.endpoint(KICK_QUEUE_ROUTE, &[])?;
        let ids = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(ids)
    }
}
