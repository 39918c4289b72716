//! Normalized record store.
//!
//! Every object in a response becomes a record keyed by its `id` (or by a
//! `client:<parent>:<field>` path when it has none). Linked fields hold
//! `{"__ref": <id>}` pointers, so an entity returned by several queries is
//! stored once and later responses merge their fields into it.

use graphql_parser::query::{Field, Selection, Value as GqlValue};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use super::document::{FragmentAst, SelectionAst, VariableAst};
use super::FetchError;

pub type DataId = String;
pub type Record = Map<String, Value>;

pub const ROOT_ID: &str = "client:root";
pub const REF_KEY: &str = "__ref";
pub const ID_KEY: &str = "__id";
pub const FRAGMENTS_KEY: &str = "__fragments";

#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<DataId, Record>,
    version: u64,
}

/// Per-publish context: document fragments plus resolved variables.
struct Ctx<'a> {
    fragments: &'a HashMap<String, FragmentAst>,
    variables: &'a Value,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped on every publish; readers use it to skip rebuilding unchanged views.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// Write one response's `data` into the store under the root record.
    pub fn publish(
        &mut self,
        selection: &SelectionAst,
        fragments: &HashMap<String, FragmentAst>,
        variables: &Value,
        data: &Value,
    ) -> Result<(), FetchError> {
        let obj = data
            .as_object()
            .ok_or_else(|| FetchError::Missing("response data is not an object".into()))?;
        let ctx = Ctx {
            fragments,
            variables,
        };
        self.records.entry(ROOT_ID.to_string()).or_default();
        self.normalize_object(ROOT_ID, selection, obj, &ctx)?;
        self.version += 1;
        Ok(())
    }

    fn normalize_object(
        &mut self,
        id: &str,
        selection: &SelectionAst,
        value: &Map<String, Value>,
        ctx: &Ctx<'_>,
    ) -> Result<(), FetchError> {
        for item in &selection.items {
            match item {
                Selection::Field(field) => {
                    let response_key = field.alias.as_ref().unwrap_or(&field.name);
                    let key = storage_key(field, ctx.variables);
                    // Absent in this response: keep an earlier value, else record null.
                    let Some(v) = value.get(response_key) else {
                        self.records
                            .entry(id.to_string())
                            .or_default()
                            .entry(key)
                            .or_insert(Value::Null);
                        continue;
                    };
                    let stored = if field.selection_set.items.is_empty() {
                        v.clone()
                    } else {
                        self.normalize_linked(id, &key, &field.selection_set, v, ctx)?
                    };
                    self.records
                        .entry(id.to_string())
                        .or_default()
                        .insert(key, stored);
                }
                Selection::FragmentSpread(spread) => {
                    let frag = ctx.fragments.get(&spread.fragment_name).ok_or_else(|| {
                        FetchError::Document(format!("unknown fragment {}", spread.fragment_name))
                    })?;
                    self.normalize_object(id, &frag.selection_set, value, ctx)?;
                }
                Selection::InlineFragment(inline) => {
                    self.normalize_object(id, &inline.selection_set, value, ctx)?;
                }
            }
        }
        Ok(())
    }

    fn normalize_linked(
        &mut self,
        parent: &str,
        key: &str,
        selection: &SelectionAst,
        value: &Value,
        ctx: &Ctx<'_>,
    ) -> Result<Value, FetchError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Object(obj) => {
                let child = entity_id(obj).unwrap_or_else(|| client_id(parent, key));
                self.records.entry(child.clone()).or_default();
                self.normalize_object(&child, selection, obj, ctx)?;
                Ok(json!({ REF_KEY: child }))
            }
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    self.normalize_linked(parent, &format!("{key}:{i}"), selection, item, ctx)
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Err(FetchError::Missing(format!(
                "{parent}.{key}: expected object, got {other}"
            ))),
        }
    }

    /// Read `selection` starting at record `id`.
    ///
    /// Fragment spreads are masked: the output gets `__id` and a
    /// `__fragments` marker instead of the fragment's fields.
    pub fn read(
        &self,
        id: &str,
        selection: &SelectionAst,
        variables: &Value,
    ) -> Result<Value, FetchError> {
        let record = self
            .records
            .get(id)
            .ok_or_else(|| FetchError::Missing(format!("record {id}")))?;
        let mut out = Map::new();
        self.read_into(id, record, selection, variables, &mut out)?;
        Ok(Value::Object(out))
    }

    fn read_into(
        &self,
        id: &str,
        record: &Record,
        selection: &SelectionAst,
        variables: &Value,
        out: &mut Map<String, Value>,
    ) -> Result<(), FetchError> {
        for item in &selection.items {
            match item {
                Selection::Field(field) => {
                    let response_key = field.alias.as_ref().unwrap_or(&field.name);
                    let key = storage_key(field, variables);
                    let stored = record
                        .get(&key)
                        .ok_or_else(|| FetchError::Missing(format!("{id}.{key}")))?;
                    let value = if field.selection_set.items.is_empty() {
                        stored.clone()
                    } else {
                        self.read_linked(stored, &field.selection_set, variables)?
                    };
                    out.insert(response_key.clone(), value);
                }
                Selection::FragmentSpread(spread) => {
                    out.insert(ID_KEY.to_string(), Value::String(id.to_string()));
                    let markers = out
                        .entry(FRAGMENTS_KEY.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(m) = markers {
                        m.insert(spread.fragment_name.clone(), Value::Bool(true));
                    }
                }
                Selection::InlineFragment(inline) => {
                    self.read_into(id, record, &inline.selection_set, variables, out)?;
                }
            }
        }
        Ok(())
    }

    fn read_linked(
        &self,
        stored: &Value,
        selection: &SelectionAst,
        variables: &Value,
    ) -> Result<Value, FetchError> {
        match stored {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => items
                .iter()
                .map(|item| self.read_linked(item, selection, variables))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(obj) => match obj.get(REF_KEY).and_then(Value::as_str) {
                Some(child) => self.read(child, selection, variables),
                None => Err(FetchError::Missing("linked field without __ref".into())),
            },
            other => Err(FetchError::Missing(format!("linked field holds {other}"))),
        }
    }
}

fn entity_id(obj: &Map<String, Value>) -> Option<DataId> {
    match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Path id for an object without its own `id`: `client:root:allPeople(first:10)`.
fn client_id(parent: &str, key: &str) -> DataId {
    if parent.starts_with("client:") {
        format!("{parent}:{key}")
    } else {
        format!("client:{parent}:{key}")
    }
}

/// Field name plus its non-null arguments, sorted: `allPlanets(first:12)`.
pub fn storage_key(field: &Field<'static, String>, variables: &Value) -> String {
    let mut args: Vec<(&str, Value)> = field
        .arguments
        .iter()
        .map(|(name, value)| (name.as_str(), to_json(value, variables)))
        .filter(|(_, v)| !v.is_null())
        .collect();
    if args.is_empty() {
        return field.name.clone();
    }
    args.sort_by(|a, b| a.0.cmp(b.0));
    let rendered: Vec<String> = args
        .iter()
        .map(|(name, v)| format!("{name}:{v}"))
        .collect();
    format!("{}({})", field.name, rendered.join(","))
}

/// Convert a GraphQL literal (or `$variable`) into JSON.
pub fn to_json(value: &GqlValue<'static, String>, variables: &Value) -> Value {
    match value {
        GqlValue::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
        GqlValue::Int(n) => n.as_i64().map(Value::from).unwrap_or(Value::Null),
        GqlValue::Float(f) => Value::from(*f),
        GqlValue::String(s) => Value::String(s.clone()),
        GqlValue::Boolean(b) => Value::Bool(*b),
        GqlValue::Null => Value::Null,
        GqlValue::Enum(e) => Value::String(e.clone()),
        GqlValue::List(items) => Value::Array(items.iter().map(|v| to_json(v, variables)).collect()),
        GqlValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v, variables)))
                .collect(),
        ),
    }
}

/// Provided variables, with declared defaults filled in for missing ones.
pub fn with_defaults(definitions: &[VariableAst], provided: &Map<String, Value>) -> Value {
    let mut out = provided.clone();
    for def in definitions {
        if out.contains_key(&def.name) {
            continue;
        }
        if let Some(default) = &def.default_value {
            out.insert(def.name.clone(), to_json(default, &Value::Null));
        }
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::document::{Fragment, Operation};
    use pretty_assertions::assert_eq;

    static PERSON: Fragment = Fragment::new(
        "Card_person",
        "fragment Card_person on Person { id name homeworld { name } }",
    );
    static PEOPLE_FRAGMENTS: [&Fragment; 1] = [&PERSON];
    static PEOPLE: Operation = Operation::new(
        "PeopleQuery",
        "query PeopleQuery($first: Int) { allPeople(first: $first) { people { id ...Card_person } totalCount } }",
        &PEOPLE_FRAGMENTS,
    );
    static NO_FRAGMENTS: [&Fragment; 0] = [];
    static NAMES: Operation = Operation::new(
        "NamesQuery",
        "query NamesQuery { allPeople { people { id birthYear } } }",
        &NO_FRAGMENTS,
    );

    fn publish(store: &mut RecordStore, op: &Operation, vars: Value, data: Value) {
        let parsed = op.parsed().unwrap();
        store
            .publish(&parsed.selection_set, &parsed.fragments, &vars, &data)
            .unwrap();
    }

    fn people_response() -> Value {
        json!({
            "allPeople": {
                "people": [
                    {"id": "p1", "name": "Luke", "homeworld": {"name": "Tatooine"}},
                    null,
                    {"id": "p2", "name": "Leia", "homeworld": null}
                ],
                "totalCount": 82
            }
        })
    }

    #[test]
    fn storage_keys_carry_arguments() {
        let mut store = RecordStore::new();
        publish(&mut store, &PEOPLE, json!({"first": 10}), people_response());

        let root = store.get(ROOT_ID).unwrap();
        assert!(root.contains_key("allPeople(first:10)"));
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn null_variable_yields_bare_field_name() {
        let mut store = RecordStore::new();
        publish(&mut store, &PEOPLE, json!({}), people_response());
        assert!(store.get(ROOT_ID).unwrap().contains_key("allPeople"));
    }

    #[test]
    fn entities_are_keyed_by_id_and_nested_objects_by_path() {
        let mut store = RecordStore::new();
        publish(&mut store, &PEOPLE, json!({"first": 10}), people_response());

        let luke = store.get("p1").unwrap();
        assert_eq!(luke["name"], json!("Luke"));
        assert_eq!(luke["homeworld"], json!({"__ref": "client:p1:homeworld"}));
        assert_eq!(store.get("client:p1:homeworld").unwrap()["name"], json!("Tatooine"));
        assert_eq!(store.get("p2").unwrap()["homeworld"], Value::Null);
    }

    #[test]
    fn query_read_masks_fragment_fields() {
        let mut store = RecordStore::new();
        let vars = json!({"first": 10});
        publish(&mut store, &PEOPLE, vars.clone(), people_response());

        let parsed = PEOPLE.parsed().unwrap();
        let data = store.read(ROOT_ID, &parsed.selection_set, &vars).unwrap();
        assert_eq!(
            data,
            json!({
                "allPeople": {
                    "people": [
                        {"id": "p1", "__id": "p1", "__fragments": {"Card_person": true}},
                        null,
                        {"id": "p2", "__id": "p2", "__fragments": {"Card_person": true}}
                    ],
                    "totalCount": 82
                }
            })
        );
    }

    #[test]
    fn fragment_read_resolves_nested_links() {
        let mut store = RecordStore::new();
        let vars = json!({"first": 10});
        publish(&mut store, &PEOPLE, vars.clone(), people_response());

        let def = PERSON.definition().unwrap();
        let luke = store.read("p1", &def.selection_set, &vars).unwrap();
        assert_eq!(
            luke,
            json!({"id": "p1", "name": "Luke", "homeworld": {"name": "Tatooine"}})
        );
    }

    #[test]
    fn shared_entities_merge_across_queries() {
        let mut store = RecordStore::new();
        publish(&mut store, &PEOPLE, json!({"first": 10}), people_response());
        publish(
            &mut store,
            &NAMES,
            json!({}),
            json!({"allPeople": {"people": [{"id": "p1", "birthYear": "19BBY"}]}}),
        );

        let luke = store.get("p1").unwrap();
        assert_eq!(luke["name"], json!("Luke"));
        assert_eq!(luke["birthYear"], json!("19BBY"));
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn fields_absent_from_a_response_read_as_null() {
        let mut store = RecordStore::new();
        let vars = json!({"first": 10});
        publish(
            &mut store,
            &PEOPLE,
            vars.clone(),
            json!({"allPeople": {"people": [{"id": "p1", "name": "Luke"}], "totalCount": 82}}),
        );

        let def = PERSON.definition().unwrap();
        let luke = store.read("p1", &def.selection_set, &vars).unwrap();
        assert_eq!(luke, json!({"id": "p1", "name": "Luke", "homeworld": null}));

        // A later response that omits the field does not erase it.
        publish(
            &mut store,
            &PEOPLE,
            vars.clone(),
            json!({"allPeople": {"people": [{"id": "p1", "homeworld": {"name": "Tatooine"}}]}}),
        );
        publish(
            &mut store,
            &PEOPLE,
            vars,
            json!({"allPeople": {"people": [{"id": "p1", "name": "Luke"}]}}),
        );
        assert_eq!(store.get("p1").unwrap()["homeworld"], json!({"__ref": "client:p1:homeworld"}));
    }

    #[test]
    fn reading_unfetched_data_is_missing() {
        let store = RecordStore::new();
        let parsed = NAMES.parsed().unwrap();
        let err = store.read(ROOT_ID, &parsed.selection_set, &json!({}));
        assert!(matches!(err, Err(FetchError::Missing(_))));
    }

    #[test]
    fn declared_defaults_fill_missing_variables() {
        static DEFAULTED: Operation = Operation::new(
            "Defaulted",
            "query Defaulted($first: Int = 5) { allPeople(first: $first) { totalCount } }",
            &NO_FRAGMENTS,
        );
        let parsed = DEFAULTED.parsed().unwrap();
        assert_eq!(with_defaults(&parsed.variables, &Map::new()), json!({"first": 5}));

        let mut provided = Map::new();
        provided.insert("first".into(), json!(9));
        assert_eq!(with_defaults(&parsed.variables, &provided), json!({"first": 9}));
    }
}
