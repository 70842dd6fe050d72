use chrono::NaiveDate;

use crate::client::HistoryClient;
use crate::model::FactPayload;
use crate::selector::select_facts;


/// Fetches both upstreams concurrently and selects the day's facts.
///
/// Upstream failures only thin out the payload; this always returns one.
pub async fn build_payload(client: &HistoryClient, date: NaiveDate) -> FactPayload {
    let (events, joke) = tokio::join!(client.events_or_empty(date), client.joke_or_none());
    select_facts(&events, joke.as_deref(), date)
}

/// Like [`build_payload`], but also answers when the client couldn't be built.
pub async fn respond(client: Option<&HistoryClient>, date: NaiveDate) -> FactPayload {
    match client {
        Some(client) => build_payload(client, date).await,
        None => {
            tracing::error!("no HTTP client available, sending fetch-failed payload");
            FactPayload::fetch_failed(date)
        }
    }
}

/// Today in the local timezone of the host.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
