use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;

pub const NAME_FIELD: &str = "name";
pub const CITIES_FIELD: &str = "cities";

// 2^53 - 1, largest integer an f64 holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Rewrite whole-valued floats (`1.0`, `1e3`) as integers so they print as
/// `1` and `1000`, recursing into arrays and objects.
pub fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_INTEGER => {
                Value::from(f as i64)
            }
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize_numbers(value)))
                .collect(),
        ),
        other => other,
    }
}

/// One entry of the state dataset. Fields keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateRecord {
    pub data: Map<String, Value>,
}

impl StateRecord {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Anything other than a JSON object becomes an empty record.
    pub fn from_value(value: Value) -> Self {
        match normalize_numbers(value) {
            Value::Object(data) => Self::new(data),
            _ => Self::default(),
        }
    }

    /// `None` when the field is missing or not a string.
    pub fn name(&self) -> Option<&str> {
        self.data.get(NAME_FIELD).and_then(Value::as_str)
    }

    /// Key used against the city mapping: a string name as is, a numeric
    /// name in its decimal form. Other name types never match.
    pub fn lookup_key(&self) -> Option<Cow<'_, str>> {
        match self.data.get(NAME_FIELD)? {
            Value::String(name) => Some(Cow::Borrowed(name.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            _ => None,
        }
    }
}

/// State name → city list. Values are carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityMapping {
    pub entries: HashMap<String, Value>,
}

impl CityMapping {
    pub fn new(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }

    /// Anything other than a JSON object becomes an empty mapping.
    pub fn from_value(value: Value) -> Self {
        match normalize_numbers(value) {
            Value::Object(map) => Self::new(map.into_iter().collect()),
            _ => Self::default(),
        }
    }

    pub fn get(&self, state_name: &str) -> Option<&Value> {
        self.entries.get(state_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedRecord {
    pub data: Map<String, Value>,
}

impl MergedRecord {
    pub fn name(&self) -> Option<&str> {
        self.data.get(NAME_FIELD).and_then(Value::as_str)
    }

    pub fn cities(&self) -> Option<&Value> {
        self.data.get(CITIES_FIELD)
    }
}

/// What to put in `cities` when a state's name is not in the mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MissingCities {
    /// Leave the field out.
    #[default]
    Omit,
    Null,
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct JoinInput {
    pub states: Vec<StateRecord>,
    pub cities: CityMapping,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Saved { path: String },
    Failed { reason: String },
}

impl WriteOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, WriteOutcome::Saved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub records: Vec<MergedRecord>,
    pub outcome: WriteOutcome,
}
