use crate::record::CheatRecord;

/// A search query folded once so it can be matched against many records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    raw: String,
    folded: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            folded: raw.trim().to_lowercase(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn matches(&self, record: &CheatRecord) -> bool {
        self.is_empty() || record.reward().to_lowercase().contains(&self.folded)
    }
}

/// Indices of the records whose reward matches `query`, in input order.
pub fn matching_indices(records: &[CheatRecord], query: &Query) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| query.matches(r))
        .map(|(i, _)| i)
        .collect()
}
