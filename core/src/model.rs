use chrono::{Datelike, NaiveDate};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};


/// One "on this day" entry as served by the events API.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Event {
    #[serde(default, deserialize_with = "year_as_string")]
    pub year: String,
    #[serde(default, deserialize_with = "text_or_none")]
    pub description: Option<String>,
}

impl Event {
    pub fn new(year: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            description: Some(description.into()),
        }
    }

    /// The description, if it is present and not blank.
    pub fn text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }

    pub fn render(&self) -> String {
        format!("{}: {}", self.year, self.description.as_deref().unwrap_or_default())
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EventsDocument {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub events: Vec<Event>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct JokeDocument {
    #[serde(default, deserialize_with = "text_or_none")]
    pub joke: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Text(String),
    Int(i64),
    Float(f64),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeEvent {
    Event(Event),
    Other(IgnoredAny),
}

// The API sends years as strings, but numbers and nulls show up in the wild.
// Anything else reads as an empty year, which never passes a year test.
fn year_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawYear>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawYear::Text(s)) => s,
        Some(RawYear::Int(n)) => n.to_string(),
        Some(RawYear::Float(n)) => n.to_string(),
        Some(RawYear::Other(_)) | None => String::new(),
    })
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawText>::deserialize(deserializer)? {
        Some(RawText::Text(s)) => Some(s),
        Some(RawText::Other(_)) | None => None,
    })
}

// One bad entry only costs that entry, not the whole day.
fn skip_malformed<'de, D>(deserializer: D) -> Result<Vec<Event>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<MaybeEvent>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();
    let events: Vec<Event> = raw
        .into_iter()
        .filter_map(|e| match e {
            MaybeEvent::Event(event) => Some(event),
            MaybeEvent::Other(_) => None,
        })
        .collect();

    if events.len() < total {
        tracing::debug!(skipped = total - events.len(), "skipped malformed events");
    }
    Ok(events)
}


/// The response body. Field order and names are what downstream digests expect.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct FactPayload {
    pub date: String,
    pub general_fact1: String,
    pub general_fact2: String,
    pub arts_fact: String,
    pub science_fact: String,
    pub sports_fact: String,
    pub dad_joke: String,
}

impl FactPayload {
    pub const FETCH_FAILED: &'static str = "Fetch failed; see logs";

    /// Envelope for an invocation that could not even set up its HTTP client.
    pub fn fetch_failed(date: NaiveDate) -> Self {
        Self {
            date: format_date(date),
            general_fact1: Self::FETCH_FAILED.to_string(),
            general_fact2: String::new(),
            arts_fact: String::new(),
            science_fact: String::new(),
            sports_fact: String::new(),
            dad_joke: String::new(),
        }
    }
}

/// `month/day`, 1-based and unpadded.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}
