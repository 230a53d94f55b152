use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub const FIELD_REWARD: &str = "Reward";
pub const FIELD_DESCRIPTION: &str = "Description";
pub const FIELD_CODE: &str = "Code";

pub const RECOGNIZED_FIELDS: [&str; 3] = [FIELD_REWARD, FIELD_DESCRIPTION, FIELD_CODE];

/// One spreadsheet row, keyed by the header row in sheet order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheatRecord {
    fields: Vec<(String, String)>,
}

impl CheatRecord {
    pub fn from_fields(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Returns the value of the first column named `name`, or `""` when the
    /// sheet has no such column.
    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn reward(&self) -> &str {
        self.get(FIELD_REWARD)
    }

    pub fn description(&self) -> &str {
        self.get(FIELD_DESCRIPTION)
    }

    pub fn code(&self) -> &str {
        self.get(FIELD_CODE)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for CheatRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in self.fields.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
