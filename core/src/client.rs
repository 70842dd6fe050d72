use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use reqwest::header::ACCEPT;

use crate::config::Config;
use crate::model::{Event, EventsDocument, JokeDocument};


#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not read CA bundle {path}: {source}")]
    CaFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CA bundle {path}: {source}")]
    CaParse {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}


/// A `reqwest` builder with the configured user agent that trusts the extra
/// roots in `config.ca_cert` on top of the system ones.
pub fn client_builder(config: &Config) -> Result<reqwest::ClientBuilder, FetchError> {
    let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());

    if let Some(path) = &config.ca_cert {
        let shown = path.display().to_string();
        let pem = std::fs::read(path).map_err(|source| FetchError::CaFile {
            path: shown.clone(),
            source,
        })?;
        let certs = reqwest::Certificate::from_pem_bundle(&pem)
            .map_err(|source| FetchError::CaParse { path: shown.clone(), source })?;
        tracing::info!(path = %shown, count = certs.len(), "loaded extra CA certificates");
        for cert in certs {
            builder = builder.add_root_certificate(cert);
        }
    }

    Ok(builder)
}


/// HTTP side of an invocation: the events API and the joke API.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl HistoryClient {
    pub fn new_w_client(client: reqwest::Client, config: Config) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Builds the underlying client from [`client_builder`].
    pub fn from_config(config: Config) -> Result<Self, FetchError> {
        let client = client_builder(&config)?.build()?;
        Ok(Self::new_w_client(client, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn fetch_events(&self, date: NaiveDate) -> Result<Vec<Event>, FetchError> {
        let url = self.config.events_url(date.month(), date.day());
        let res = self.client
            .get(&url)
            .timeout(self.config.events_timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(FetchError::Status { url, status: res.status().as_u16() });
        }

        let doc = res.json::<EventsDocument>().await?;
        Ok(doc.events)
    }

    pub async fn fetch_joke(&self) -> Result<Option<String>, FetchError> {
        let url = &self.config.joke_url;
        let res = self.client
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(self.config.joke_timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(FetchError::Status { url: url.clone(), status: res.status().as_u16() });
        }

        let doc = res.json::<JokeDocument>().await?;
        Ok(doc.joke)
    }

    /// Events for `date`, or none at all if the API can't be reached.
    pub async fn events_or_empty(&self, date: NaiveDate) -> Vec<Event> {
        match self.fetch_events(date).await {
            Ok(events) => {
                tracing::info!(count = events.len(), "fetched events");
                events
            }
            Err(e) => {
                tracing::warn!(error = %e, "events fetch failed, continuing without events");
                Vec::new()
            }
        }
    }

    pub async fn joke_or_none(&self) -> Option<String> {
        self.fetch_joke().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "joke fetch failed, continuing without a joke");
            None
        })
    }
}
