use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_REGISTERED: &str = "registered";
pub const FIELD_ENVELOPES: &str = "envelopes";
pub const FIELD_VALID_VOTES: &str = "validVotes";

/// Raw body of one fetched page and the URL it was served from.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

/// One municipality row of the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalityListing {
    pub id: String,
    pub name: String,
}

/// Aggregate counters from the top table of a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalitySummary {
    pub registered: u64,
    pub envelopes: u64,
    pub valid_votes: u64,
}

/// Party name to vote count for one municipality.
///
/// Iterates in first-insertion order. Inserting a name that is already present
/// replaces its count in place and returns the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyResults {
    votes: IndexMap<String, u64>,
}

impl PartyResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, party: impl Into<String>, votes: u64) -> Option<u64> {
        self.votes.insert(party.into(), votes)
    }

    pub fn get(&self, party: &str) -> Option<u64> {
        self.votes.get(party).copied()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.votes.iter().map(|(name, votes)| (name.as_str(), *votes))
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for PartyResults {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut results = PartyResults::new();
        for (party, votes) in iter {
            results.insert(party, votes);
        }
        results
    }
}

/// One flattened output row. Key order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Cell text for CSV output; absent keys and nulls render empty.
    pub fn cell(&self, key: &str) -> String {
        match self.data.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Everything `extract` gathered, as three index-aligned sequences.
#[derive(Debug, Clone, Default)]
pub struct ScrapedData {
    pub listings: Vec<MunicipalityListing>,
    pub summaries: Vec<MunicipalitySummary>,
    pub party_results: Vec<PartyResults>,
}

/// Records ready for export together with the resolved header.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}
