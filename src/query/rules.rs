use crate::models::Status;
use crate::query::filters::Filter;
use crate::query::vocabulary::CityVocabulary;
use anyhow::{Context, Result};
use regex::Regex;
use std::sync::OnceLock;

const CRORE: f64 = 1_00_00_000.0;
const LAKH: f64 = 1_00_000.0;

/// Scale units a price literal may carry
const PRICE_UNITS: &[&str] = &["crores", "crore", "cr", "lakhs", "lakh", "lacs", "lac", "l"];

/// Words that end a locality phrase
const LOCALITY_STOP_WORDS: &[&str] = &[
    "in", "at", "near", "under", "below", "upto", "max", "less", "for", "ready",
];

/// One independent query-to-filter rule.
///
/// Rules receive the lower-cased query and must not depend on each other.
pub trait Extractor: Send + Sync {
    /// Extract this rule's filter, if the text mentions it
    fn extract(&self, text: &str) -> Option<Filter>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

fn price_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"(?:under|below|max|upto|less than|for|in)?\s*₹?\s*",
            r"([0-9]*\.?[0-9]+|[0-9]+\.)\s*(crores?|cr|lakhs?|lacs?|l)\b",
        ))
        .expect("Invalid price regex")
    })
}

fn bhk_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"\b([0-9]|one|two|three|four|five)\s*(?:bhk|bed\s*room)")
            .expect("Invalid bhk regex")
    })
}

fn locality_anchor_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\b(?:in|at|near)\s+").expect("Invalid locality regex"))
}

fn locality_phrase_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(concat!(
            r"^([a-z][a-z\s,]*?)",
            r"(?:\s*\b(?:in|at|near|under|below|upto|max|less\s+than|for|ready)\b",
            r"|\s*[^a-z\s,]|\s*$)",
        ))
        .expect("Invalid locality regex")
    })
}

/// Alternation over the vocabulary, tolerant of repeated whitespace
fn city_alternation(vocabulary: &CityVocabulary) -> String {
    vocabulary
        .keys_longest_first()
        .into_iter()
        .map(|key| {
            key.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-case every letter that follows a non-letter
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if previous_is_letter {
            result.extend(ch.to_lowercase());
        } else {
            result.extend(ch.to_uppercase());
        }
        previous_is_letter = ch.is_alphabetic();
    }
    result
}

/// Price ceiling: "under ₹80 lakh", "1.5 cr"
#[derive(Debug, Default)]
pub struct PriceRule;

impl PriceRule {
    fn scale(unit: &str) -> f64 {
        if unit.starts_with("cr") {
            CRORE
        } else {
            LAKH
        }
    }
}

impl Extractor for PriceRule {
    fn extract(&self, text: &str) -> Option<Filter> {
        let caps = price_regex().captures(text)?;
        // The pattern only admits plain decimal literals
        let value: f64 = caps[1].parse().ok()?;
        Some(Filter::MaxPrice(value * Self::scale(&caps[2])))
    }

    fn name(&self) -> &'static str {
        "price"
    }
}

/// Bedroom count: "2 bhk", "three bedroom"
#[derive(Debug, Default)]
pub struct BhkRule;

impl BhkRule {
    fn digit(word: &str) -> &str {
        match word {
            "one" => "1",
            "two" => "2",
            "three" => "3",
            "four" => "4",
            "five" => "5",
            digit => digit,
        }
    }
}

impl Extractor for BhkRule {
    fn extract(&self, text: &str) -> Option<Filter> {
        let caps = bhk_regex().captures(text)?;
        Some(Filter::Bhk(format!("{} BHK", Self::digit(&caps[1]))))
    }

    fn name(&self) -> &'static str {
        "bhk"
    }
}

/// City: "in pune", restricted to the recognised vocabulary
#[derive(Debug)]
pub struct CityRule {
    vocabulary: CityVocabulary,
    pattern: Option<Regex>,
}

impl CityRule {
    pub fn new(vocabulary: CityVocabulary) -> Result<Self> {
        let pattern = if vocabulary.is_empty() {
            None
        } else {
            let source = format!(r"\bin\s+({})\b", city_alternation(&vocabulary));
            Some(Regex::new(&source).context("Failed to compile city pattern")?)
        };

        Ok(Self {
            vocabulary,
            pattern,
        })
    }
}

impl Extractor for CityRule {
    fn extract(&self, text: &str) -> Option<Filter> {
        let caps = self.pattern.as_ref()?.captures(text)?;
        let name = normalize_whitespace(&caps[1]);
        self.vocabulary
            .canonical(&name)
            .map(|city| Filter::City(city.to_string()))
    }

    fn name(&self) -> &'static str {
        "city"
    }
}

/// Occupancy status: "ready to move", "under construction"
#[derive(Debug, Default)]
pub struct StatusRule;

impl Extractor for StatusRule {
    fn extract(&self, text: &str) -> Option<Filter> {
        if text.contains("ready to move") || text.contains("ready possession") {
            Some(Filter::Status(Status::ReadyToMove))
        } else if text.contains("under construction") {
            Some(Filter::Status(Status::UnderConstruction))
        } else {
            None
        }
    }

    fn name(&self) -> &'static str {
        "status"
    }
}

/// Locality: "near baner", "at kharadi in pune".
///
/// Each `in|at|near` anchor starts a candidate phrase of letters, spaces and
/// commas. The phrase ends at the next anchor or price/status keyword, at any
/// other character, or at the end of the text. The first candidate that is
/// neither a city nor a price unit wins.
#[derive(Debug)]
pub struct LocalityRule {
    vocabulary: CityVocabulary,
}

impl LocalityRule {
    pub fn new(vocabulary: CityVocabulary) -> Self {
        Self { vocabulary }
    }

    fn candidate(&self, phrase: &str) -> Option<String> {
        let mut candidate =
            normalize_whitespace(phrase.trim_matches(|c: char| c == ',' || c.is_whitespace()));

        let first_word = candidate.split_whitespace().next()?;
        if LOCALITY_STOP_WORDS.contains(&first_word) {
            return None;
        }

        // "baner, pune" / "baner pune" -> "baner"
        if let Some(stripped) = self.strip_trailing_city(&candidate) {
            candidate = stripped;
        }

        if candidate.is_empty() || self.vocabulary.contains(&candidate) {
            return None;
        }

        let last_word = candidate
            .rsplit(|c: char| c == ',' || c.is_whitespace())
            .find(|word| !word.is_empty())?;
        if PRICE_UNITS.contains(&last_word) {
            return None;
        }

        Some(candidate)
    }

    fn strip_trailing_city(&self, candidate: &str) -> Option<String> {
        for city in self.vocabulary.keys_longest_first() {
            if let Some(head) = candidate.strip_suffix(city) {
                if head.ends_with(|c: char| c == ',' || c.is_whitespace()) {
                    let head = head.trim_end_matches(|c: char| c == ',' || c.is_whitespace());
                    if !head.is_empty() {
                        return Some(head.to_string());
                    }
                }
            }
        }
        None
    }
}

impl Extractor for LocalityRule {
    fn extract(&self, text: &str) -> Option<Filter> {
        locality_anchor_regex()
            .find_iter(text)
            .filter_map(|anchor| {
                let caps = locality_phrase_regex().captures(&text[anchor.end()..])?;
                self.candidate(&caps[1])
            })
            .next()
            .map(|locality| Filter::Locality(title_case(&locality)))
    }

    fn name(&self) -> &'static str {
        "locality"
    }
}
