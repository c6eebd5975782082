mod null;
mod props;

use crate::{
    args::Arguments,
    compile::apply_predicate,
    error::Error,
    predicate::{Expression, Predicate},
    query::{CellValue, Query, Store},
    schema::{ObjectSchema, Property, PropertyType, Schema},
};
use chrono::{DateTime, TimeZone, Utc};

///
/// Shared fixtures: a Person/Dog schema, a populated store, and a
/// compile-and-find helper every test file drives.
///
/// Person rows: 0 Alice (40, links to bob and the beagle), 1 bob (30, no
/// best friend), 2 Ann (25, null balance and avatar, no dog).
///

pub(super) fn person_schema() -> Schema {
    let person = ObjectSchema::new(
        "Person",
        vec![
            Property::scalar("name", PropertyType::Text, 0),
            Property::scalar("age", PropertyType::Int, 1),
            Property::scalar("balance", PropertyType::Double, 2),
            Property::scalar("height", PropertyType::Float, 3),
            Property::scalar("active", PropertyType::Bool, 4),
            Property::scalar("avatar", PropertyType::Binary, 5),
            Property::scalar("created", PropertyType::Timestamp, 6),
            Property::object("best_friend", "Person", 7),
            Property::object("dog", "Dog", 8),
            Property::list("friends", "Person", 9),
        ],
    )
    .unwrap();

    let dog = ObjectSchema::new(
        "Dog",
        vec![
            Property::scalar("breed", PropertyType::Text, 0),
            Property::scalar("age", PropertyType::Int, 1),
            Property::object("owner", "Person", 2),
        ],
    )
    .unwrap();

    Schema::new(vec![person, dog]).unwrap()
}

pub(super) fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub(super) fn person_store(schema: &Schema) -> Store {
    let mut store = Store::from_schema(schema);

    let dogs = store.table_mut("Dog").unwrap();
    dogs.push_row(vec![
        CellValue::Text("beagle".to_string()),
        CellValue::Int(3),
        CellValue::Link(Some(0)),
    ]);
    dogs.push_row(vec![
        CellValue::Text("poodle".to_string()),
        CellValue::Int(7),
        CellValue::Link(None),
    ]);

    let people = store.table_mut("Person").unwrap();
    people.push_row(vec![
        CellValue::Text("Alice".to_string()),
        CellValue::Int(40),
        CellValue::Double(12.5),
        CellValue::Float(1.7),
        CellValue::Bool(true),
        CellValue::Binary(vec![1, 2, 3]),
        CellValue::Timestamp(ts(2024, 1, 1)),
        CellValue::Link(Some(1)),
        CellValue::Link(Some(0)),
        CellValue::LinkList(vec![1, 2]),
    ]);
    people.push_row(vec![
        CellValue::Text("bob".to_string()),
        CellValue::Int(30),
        CellValue::Double(3.0),
        CellValue::Float(1.8),
        CellValue::Bool(false),
        CellValue::Binary(Vec::new()),
        CellValue::Timestamp(ts(2023, 6, 15)),
        CellValue::Link(None),
        CellValue::Link(Some(1)),
        CellValue::LinkList(Vec::new()),
    ]);
    people.push_row(vec![
        CellValue::Text("Ann".to_string()),
        CellValue::Int(25),
        CellValue::Null,
        CellValue::Float(1.6),
        CellValue::Bool(true),
        CellValue::Null,
        CellValue::Timestamp(ts(2025, 3, 1)),
        CellValue::Link(Some(0)),
        CellValue::Link(None),
        CellValue::LinkList(vec![0]),
    ]);

    store
}

/// Compile `predicate` against Person rows and return the matching row
/// indices, or the first compile error.
pub(super) fn run(predicate: &Predicate, args: &dyn Arguments) -> Result<Vec<usize>, Error> {
    let schema = person_schema();
    let store = person_store(&schema);

    let mut query = Query::new();
    apply_predicate(&mut query, predicate, args, &schema, "Person")?;

    Ok(query.find_all(&store, "Person"))
}

pub(super) fn key(path: &str) -> Expression {
    Expression::KeyPath(path.to_string())
}

pub(super) fn text(value: &str) -> Expression {
    Expression::Text(value.to_string())
}

pub(super) fn num(value: impl ToString) -> Expression {
    Expression::Number(value.to_string())
}
