//! Fact selection over a day's events.
//!
//! Five slots are filled in a fixed order: two general facts, then one fact
//! each for arts, science and sports. Every pick claims its description so
//! no later slot can report the same event.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::{format_date, Event, FactPayload};
use crate::year::year_at_least;

/// Floor for "modern" events.
pub const MODERN_MIN_YEAR: i32 = 2000;
/// Floor for "any AD year".
pub const ABSOLUTE_MIN_YEAR: i32 = 1;

pub const NO_MODERN_FACT: &str = "No modern fact found.";
pub const NO_HISTORICAL_FACT: &str = "No historical fact found.";
pub const NO_JOKE: &str = "No joke today.";


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Arts,
    Science,
    Sports,
}

impl Category {
    /// Lookup order.
    pub const ALL: [Category; 3] = [Category::Arts, Category::Science, Category::Sports];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::Arts => &[
                "art", "artist", "painting", "sculpture", "music", "musician", "album", "song",
                "opera", "theatre", "theater", "show", "release", "concert",
            ],
            Category::Science => &[
                "science", "scientist", "physics", "astronomy", "discovery", "technology",
                "invention", "engineer", "space", "launch", "medicine", "virus", "research",
                "chemistry", "biology",
            ],
            Category::Sports => &[
                "sport", "sports", "game", "team", "championship", "world series", "olympic",
                "cup", "final", "league", "race", "match", "tournament", "super bowl", "nba",
                "mlb", "nfl", "fifa",
            ],
        }
    }

    pub fn not_found(self) -> &'static str {
        match self {
            Category::Arts => "No arts/music fact found.",
            Category::Science => "No science/technology fact found.",
            Category::Sports => "No sports fact found.",
        }
    }
}


/// Descriptions already claimed during one selection run.
pub type Used = HashSet<String>;

fn mentions_any(description: &str, keywords: &[&str]) -> bool {
    let lower = description.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

fn first_match<'a>(
    events: &'a [Event],
    keywords: &[&str],
    min_year: i32,
    used: &Used,
) -> Option<&'a Event> {
    events.iter().find(|e| {
        e.text().is_some_and(|d| !used.contains(d) && mentions_any(d, keywords))
            && year_at_least(&e.year, min_year)
    })
}

/// First unclaimed event at or after `min_year` whose description contains
/// one of `keywords` (lower-case substrings). If nothing qualifies and
/// `min_year` is stricter than [`ABSOLUTE_MIN_YEAR`], the scan is repeated
/// with that floor.
///
/// Never falls back to an event that doesn't match a keyword. The caller
/// claims the result in `used`.
pub fn pick_fact<'a>(
    events: &'a [Event],
    keywords: &[&str],
    min_year: i32,
    used: &Used,
) -> Option<&'a Event> {
    first_match(events, keywords, min_year, used).or_else(|| {
        if min_year > ABSOLUTE_MIN_YEAR {
            first_match(events, keywords, ABSOLUTE_MIN_YEAR, used)
        } else {
            None
        }
    })
}

fn first_unclaimed<'a>(events: &'a [Event], min_year: i32, used: &Used) -> Option<&'a Event> {
    events.iter().find(|e| {
        e.text().is_some_and(|d| !used.contains(d)) && year_at_least(&e.year, min_year)
    })
}


/// Events chosen for each slot. `None` means nothing qualified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection<'a> {
    pub general1: Option<&'a Event>,
    pub general2: Option<&'a Event>,
    pub arts: Option<&'a Event>,
    pub science: Option<&'a Event>,
    pub sports: Option<&'a Event>,
}

impl<'a> Selection<'a> {
    pub fn category(&self, category: Category) -> Option<&'a Event> {
        match category {
            Category::Arts => self.arts,
            Category::Science => self.science,
            Category::Sports => self.sports,
        }
    }

    /// Every picked event, in slot order.
    pub fn picked(&self) -> impl Iterator<Item = &'a Event> {
        [self.general1, self.general2, self.arts, self.science, self.sports]
            .into_iter()
            .flatten()
    }

    pub fn into_payload(self, date: NaiveDate, joke: Option<&str>) -> FactPayload {
        let render = |pick: Option<&Event>, missing: &str| {
            pick.map(Event::render).unwrap_or_else(|| missing.to_string())
        };

        FactPayload {
            date: format_date(date),
            general_fact1: render(self.general1, NO_MODERN_FACT),
            general_fact2: render(self.general2, NO_HISTORICAL_FACT),
            arts_fact: render(self.arts, Category::Arts.not_found()),
            science_fact: render(self.science, Category::Science.not_found()),
            sports_fact: render(self.sports, Category::Sports.not_found()),
            dad_joke: normalize_joke(joke),
        }
    }
}


#[derive(Debug, Default)]
pub struct FactSelector {
    used: Used,
}

impl FactSelector {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim(&mut self, pick: Option<&Event>) {
        if let Some(d) = pick.and_then(Event::text) {
            self.used.insert(d.to_string());
        }
    }

    /// Runs all five picks. Consumes the selector so claimed descriptions
    /// never leak into another run.
    pub fn select(mut self, events: &[Event]) -> Selection<'_> {
        let mut selection = Selection::default();

        selection.general1 = first_unclaimed(events, MODERN_MIN_YEAR, &self.used);
        self.claim(selection.general1);

        selection.general2 = first_unclaimed(events, ABSOLUTE_MIN_YEAR, &self.used);
        self.claim(selection.general2);

        for category in Category::ALL {
            let pick = pick_fact(events, category.keywords(), MODERN_MIN_YEAR, &self.used);
            self.claim(pick);
            match category {
                Category::Arts => selection.arts = pick,
                Category::Science => selection.science = pick,
                Category::Sports => selection.sports = pick,
            }
        }

        tracing::debug!(
            events = events.len(),
            picked = selection.picked().count(),
            "selected facts"
        );
        selection
    }
}

/// Convenience wrapper: one fresh selection rendered straight to a payload.
pub fn select_facts(events: &[Event], joke: Option<&str>, date: NaiveDate) -> FactPayload {
    FactSelector::new().select(events).into_payload(date, joke)
}

/// Collapses whitespace runs and trims; blank or missing jokes get a fallback.
pub fn normalize_joke(joke: Option<&str>) -> String {
    let joke = joke
        .map(|j| j.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    if joke.is_empty() {
        NO_JOKE.to_string()
    } else {
        joke
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 20).unwrap()
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        let events = vec![Event::new("1990", "Rocket LAUNCH in orbit")];
        let pick = pick_fact(&events, Category::Science.keywords(), ABSOLUTE_MIN_YEAR, &Used::new());
        assert_eq!(pick, Some(&events[0]));

        // "art" inside "heart"
        let events = vec![Event::new("1967", "First human heart transplant")];
        let pick = pick_fact(&events, Category::Arts.keywords(), ABSOLUTE_MIN_YEAR, &Used::new());
        assert_eq!(pick, Some(&events[0]));
    }

    #[test]
    fn modern_events_are_preferred_then_any_ad_year() {
        let events = vec![
            Event::new("1850", "Opera premieres in Paris"),
            Event::new("2010", "Album tops the charts"),
        ];
        let pick = pick_fact(&events, Category::Arts.keywords(), MODERN_MIN_YEAR, &Used::new());
        assert_eq!(pick.map(|e| e.year.as_str()), Some("2010"));

        let events = vec![Event::new("1850", "Opera premieres in Paris")];
        let pick = pick_fact(&events, Category::Arts.keywords(), MODERN_MIN_YEAR, &Used::new());
        assert_eq!(pick.map(|e| e.year.as_str()), Some("1850"));
    }

    #[test]
    fn no_keyword_means_no_fact() {
        let events = vec![Event::new("2010", "A treaty is signed")];
        let pick = pick_fact(&events, Category::Sports.keywords(), MODERN_MIN_YEAR, &Used::new());
        assert_eq!(pick, None);
    }

    #[test]
    fn used_descriptions_are_skipped() {
        let events = vec![
            Event::new("2010", "World Cup final"),
            Event::new("1930", "First World Cup match"),
        ];
        let mut used = Used::new();
        used.insert("World Cup final".to_string());

        let pick = pick_fact(&events, Category::Sports.keywords(), MODERN_MIN_YEAR, &used);
        assert_eq!(pick.map(|e| e.year.as_str()), Some("1930"));
    }

    #[test]
    fn bc_and_malformed_years_never_qualify() {
        let events = vec![
            Event::new("44 BC", "A game of dice"),
            Event::new("sometime", "Chariot race"),
        ];
        assert_eq!(
            pick_fact(&events, Category::Sports.keywords(), MODERN_MIN_YEAR, &Used::new()),
            None
        );
        let selection = FactSelector::new().select(&events);
        assert_eq!(selection.general2, None);
    }

    #[test]
    fn empty_events_give_all_not_found() {
        let payload = select_facts(&[], None, date());

        assert_eq!(payload.date, "7/20");
        assert_eq!(payload.general_fact1, NO_MODERN_FACT);
        assert_eq!(payload.general_fact2, NO_HISTORICAL_FACT);
        assert_eq!(payload.arts_fact, "No arts/music fact found.");
        assert_eq!(payload.science_fact, "No science/technology fact found.");
        assert_eq!(payload.sports_fact, "No sports fact found.");
        assert_eq!(payload.dad_joke, NO_JOKE);
    }

    #[test]
    fn general_fact_claims_block_category_reuse() {
        let events = vec![
            Event::new("2005", "A rocket launch"),
            Event::new("1969", "Moon landing broadcast"),
        ];
        let payload = select_facts(&events, Some("Why did the chicken..."), date());

        assert_eq!(payload.general_fact1, "2005: A rocket launch");
        assert_eq!(payload.general_fact2, "1969: Moon landing broadcast");
        assert_eq!(payload.science_fact, "No science/technology fact found.");
        assert_eq!(payload.dad_joke, "Why did the chicken...");
    }

    #[test]
    fn categories_claim_in_order() {
        // Both lines match arts ("show") and sports ("game"/"match").
        let events = vec![
            Event::new("2001", "Filler"),
            Event::new("1999", "Filler two"),
            Event::new("2003", "Game show debuts"),
            Event::new("2004", "Match of the day show"),
        ];
        let selection = FactSelector::new().select(&events);

        assert_eq!(selection.arts.map(|e| e.year.as_str()), Some("2003"));
        assert_eq!(selection.sports.map(|e| e.year.as_str()), Some("2004"));
        assert_eq!(selection.science, None);
    }

    #[test]
    fn missing_descriptions_are_ignored() {
        let events = vec![
            Event { year: "2020".into(), description: None },
            Event::new("2021", ""),
            Event::new("2022", "Real event"),
        ];
        let selection = FactSelector::new().select(&events);
        assert_eq!(selection.general1.map(|e| e.year.as_str()), Some("2022"));
    }

    #[test]
    fn no_modern_fact_when_everything_is_old() {
        let events = vec![Event::new("1812", "Overture")];
        let payload = select_facts(&events, None, date());
        assert_eq!(payload.general_fact1, NO_MODERN_FACT);
        assert_eq!(payload.general_fact2, "1812: Overture");
    }

    #[test]
    fn joke_whitespace_is_collapsed() {
        assert_eq!(normalize_joke(Some("  Why\n did   the\tchicken ")), "Why did the chicken");
        assert_eq!(normalize_joke(Some("   ")), NO_JOKE);
        assert_eq!(normalize_joke(None), NO_JOKE);
    }
}
