use crate::core::{CityMapping, MergedRecord, MissingCities, StateRecord};
use crate::domain::model::CITIES_FIELD;
use serde_json::Value;

/// Left join of `states` against `cities` by state name.
///
/// Produces one record per state, in input order. Each record is the state's
/// fields plus `cities` set to the mapping value for its name. When the name
/// is missing from the mapping (or the state has no usable `name`), `policy`
/// decides the field's value. An existing `cities` field on the state is
/// overwritten in place.
pub fn join_states(
    states: &[StateRecord],
    cities: &CityMapping,
    policy: MissingCities,
) -> Vec<MergedRecord> {
    states
        .iter()
        .map(|state| merge_state(state, cities, policy))
        .collect()
}

fn merge_state(state: &StateRecord, cities: &CityMapping, policy: MissingCities) -> MergedRecord {
    let mut data = state.data.clone();

    let found = state
        .lookup_key()
        .and_then(|key| cities.get(&key).cloned());
    match (found, policy) {
        (Some(list), _) => {
            data.insert(CITIES_FIELD.to_string(), list);
        }
        (None, MissingCities::Omit) => {
            // 保留其餘欄位的順序
            data.shift_remove(CITIES_FIELD);
        }
        (None, MissingCities::Null) => {
            data.insert(CITIES_FIELD.to_string(), Value::Null);
        }
        (None, MissingCities::Empty) => {
            data.insert(CITIES_FIELD.to_string(), Value::Array(Vec::new()));
        }
    }

    MergedRecord { data }
}

/// Number of states whose name was found in the mapping.
pub fn count_matches(states: &[StateRecord], cities: &CityMapping) -> usize {
    states
        .iter()
        .filter_map(StateRecord::lookup_key)
        .filter(|key| cities.get(key).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn states(value: Value) -> Vec<StateRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn mapping(value: Value) -> CityMapping {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_join_texas_ohio() {
        let states = states(json!([{"name": "Texas"}, {"name": "Ohio"}]));
        let cities = mapping(json!({"Texas": ["Austin", "Dallas"]}));

        let merged = join_states(&states, &cities, MissingCities::Omit);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].cities(), Some(&json!(["Austin", "Dallas"])));
        assert_eq!(merged[1].cities(), None);
        assert_eq!(
            serde_json::to_string(&merged).unwrap(),
            r#"[{"name":"Texas","cities":["Austin","Dallas"]},{"name":"Ohio"}]"#
        );
    }

    #[test]
    fn test_join_empty_states() {
        let cities = mapping(json!({"Texas": ["Austin"]}));

        let merged = join_states(&[], &cities, MissingCities::Omit);

        assert!(merged.is_empty());
        assert_eq!(serde_json::to_string(&merged).unwrap(), "[]");
    }

    #[test]
    fn test_join_preserves_order_and_fields() {
        let states = states(json!([
            {"name": "Ohio", "abbreviation": "OH", "capital": "Columbus"},
            {"name": "Alabama", "abbreviation": "AL"},
            {"name": "Texas", "abbreviation": "TX"}
        ]));
        let cities = mapping(json!({
            "Alabama": ["Birmingham"],
            "Ohio": ["Columbus", "Cleveland", "Cincinnati"]
        }));

        let merged = join_states(&states, &cities, MissingCities::Omit);

        let names: Vec<_> = merged.iter().filter_map(MergedRecord::name).collect();
        assert_eq!(names, vec!["Ohio", "Alabama", "Texas"]);

        let keys: Vec<_> = merged[0].data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "abbreviation", "capital", "cities"]);
        assert_eq!(
            merged[0].cities(),
            Some(&json!(["Columbus", "Cleveland", "Cincinnati"]))
        );
        assert_eq!(merged[2].data.get("abbreviation"), Some(&json!("TX")));
    }

    #[test]
    fn test_join_does_not_touch_inputs() {
        let states = states(json!([{"name": "Texas"}]));
        let cities = mapping(json!({"Texas": ["Austin"]}));

        let _ = join_states(&states, &cities, MissingCities::Omit);

        assert_eq!(states[0].data.len(), 1);
        assert_eq!(cities.len(), 1);
    }

    #[test]
    fn test_join_missing_null_or_bool_name() {
        let states = states(json!([
            {"abbreviation": "XX"},
            {"name": null},
            {"name": true}
        ]));
        let cities = mapping(json!({"null": ["Void"], "true": ["Yes"], "undefined": ["None"]}));

        let merged = join_states(&states, &cities, MissingCities::Omit);

        assert_eq!(merged.len(), 3);
        assert!(merged.iter().all(|r| r.cities().is_none()));
    }

    #[test]
    fn test_join_numeric_name_matches_decimal_key() {
        let states = states(json!([{"name": 42}, {"name": 7}]));
        let cities = mapping(json!({"42": ["Answer"]}));

        let merged = join_states(&states, &cities, MissingCities::Omit);

        assert_eq!(merged[0].cities(), Some(&json!(["Answer"])));
        assert_eq!(merged[1].cities(), None);
        assert_eq!(count_matches(&states, &cities), 1);
    }

    #[test]
    fn test_join_missing_cities_policies() {
        let states = states(json!([{"name": "Ohio"}]));
        let cities = CityMapping::default();

        let null = join_states(&states, &cities, MissingCities::Null);
        assert_eq!(null[0].cities(), Some(&Value::Null));

        let empty = join_states(&states, &cities, MissingCities::Empty);
        assert_eq!(empty[0].cities(), Some(&json!([])));
    }

    #[test]
    fn test_join_explicit_empty_list_is_kept() {
        let states = states(json!([{"name": "Wyoming"}]));
        let cities = mapping(json!({"Wyoming": []}));

        let merged = join_states(&states, &cities, MissingCities::Omit);

        assert_eq!(merged[0].cities(), Some(&json!([])));
    }

    #[test]
    fn test_join_overwrites_existing_cities_field() {
        let states = states(json!([
            {"name": "Texas", "cities": "stale", "capital": "Austin"},
            {"name": "Ohio", "cities": ["stale"], "capital": "Columbus"}
        ]));
        let cities = mapping(json!({"Texas": ["Houston"]}));

        let merged = join_states(&states, &cities, MissingCities::Omit);

        let keys: Vec<_> = merged[0].data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "cities", "capital"]);
        assert_eq!(merged[0].cities(), Some(&json!(["Houston"])));

        let keys: Vec<_> = merged[1].data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "capital"]);
    }

    #[test]
    fn test_join_values_are_passed_through_verbatim() {
        let states = states(json!([{"name": "Odd"}]));
        let cities = mapping(json!({"Odd": {"not": "a list"}}));

        let merged = join_states(&states, &cities, MissingCities::Omit);

        assert_eq!(merged[0].cities(), Some(&json!({"not": "a list"})));
    }

    #[test]
    fn test_count_matches() {
        let states = states(json!([{"name": "Texas"}, {"name": "Ohio"}, {}]));
        let cities = mapping(json!({"Texas": [], "Utah": []}));

        assert_eq!(count_matches(&states, &cities), 1);
    }
}
