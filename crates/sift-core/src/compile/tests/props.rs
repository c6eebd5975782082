use crate::{
    args::NoArguments,
    compile::apply_predicate,
    predicate::{CompareOp, Expression, Predicate, PredicateKind},
    query::{CellValue, Query, Store, Table, TableColumn},
    schema::{ObjectSchema, Property, PropertyType, Schema},
};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn arb_sentinel_predicate() -> impl Strategy<Value = Predicate> {
    let leaf = prop_oneof![
        Just(Predicate::always_true()),
        Just(Predicate::always_false()),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::and),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Predicate::or),
            inner.prop_map(Predicate::negated),
        ]
    })
}

fn arb_ordering_op() -> impl Strategy<Value = CompareOp> {
    prop_oneof![
        Just(CompareOp::Eq),
        Just(CompareOp::Ne),
        Just(CompareOp::Lt),
        Just(CompareOp::Lte),
        Just(CompareOp::Gt),
        Just(CompareOp::Gte),
    ]
}

/// Reference semantics for sentinel-only predicate trees.
fn truth(predicate: &Predicate) -> bool {
    let value = match &predicate.kind {
        PredicateKind::True => true,
        PredicateKind::False => false,
        PredicateKind::And(subs) => subs.iter().all(truth),
        PredicateKind::Or(subs) => subs.iter().any(truth),
        PredicateKind::Comparison(_) => unreachable!("sentinel trees carry no comparisons"),
    };

    value != predicate.negate
}

fn brute_int(op: CompareOp, cell: i64, value: i64) -> bool {
    match op {
        CompareOp::Eq => cell == value,
        CompareOp::Ne => cell != value,
        CompareOp::Lt => cell < value,
        CompareOp::Lte => cell <= value,
        CompareOp::Gt => cell > value,
        CompareOp::Gte => cell >= value,
        CompareOp::StartsWith | CompareOp::EndsWith | CompareOp::Contains => {
            unreachable!("substring operators are not generated for int columns")
        }
    }
}

fn int_schema() -> Schema {
    let object = ObjectSchema::new("N", vec![Property::scalar("n", PropertyType::Int, 0)]).unwrap();
    Schema::new(vec![object]).unwrap()
}

fn int_store(values: &[i64]) -> Store {
    let mut table = Table::new(vec![TableColumn::default()]);
    for &value in values {
        table.push_row(vec![CellValue::Int(value)]);
    }

    let mut tables = BTreeMap::new();
    tables.insert("N".to_string(), table);
    Store::from_tables(tables)
}

proptest! {
    #[test]
    fn sentinel_trees_compile_to_their_truth_value(predicate in arb_sentinel_predicate()) {
        let schema = int_schema();
        let store = int_store(&[0]);

        let mut query = Query::new();
        apply_predicate(&mut query, &predicate, &NoArguments, &schema, "N").unwrap();

        prop_assert_eq!(query.validate(), "");
        prop_assert_eq!(query.matches(&store, "N", 0), truth(&predicate));
    }

    #[test]
    fn int_comparisons_match_a_brute_force_scan(
        op in arb_ordering_op(),
        value in -50i64..50,
        cells in prop::collection::vec(-50i64..50, 0..8),
    ) {
        let schema = int_schema();
        let store = int_store(&cells);

        let predicate = Predicate::compare(
            Expression::KeyPath("n".to_string()),
            op,
            Expression::Number(value.to_string()),
        );

        let mut query = Query::new();
        apply_predicate(&mut query, &predicate, &NoArguments, &schema, "N").unwrap();

        let expected: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| brute_int(op, cell, value))
            .map(|(row, _)| row)
            .collect();
        prop_assert_eq!(query.find_all(&store, "N"), expected);
    }

    #[test]
    fn negating_a_comparison_complements_its_matches(
        op in arb_ordering_op(),
        value in -50i64..50,
        cells in prop::collection::vec(-50i64..50, 0..8),
    ) {
        let schema = int_schema();
        let store = int_store(&cells);

        let predicate = Predicate::compare(
            Expression::KeyPath("n".to_string()),
            op,
            Expression::Number(value.to_string()),
        );

        let mut plain = Query::new();
        apply_predicate(&mut plain, &predicate, &NoArguments, &schema, "N").unwrap();

        let mut negated = Query::new();
        apply_predicate(
            &mut negated,
            &predicate.clone().negated(),
            &NoArguments,
            &schema,
            "N",
        )
        .unwrap();

        let plain_rows = plain.find_all(&store, "N");
        let negated_rows = negated.find_all(&store, "N");
        for row in 0..cells.len() {
            prop_assert_eq!(
                plain_rows.contains(&row),
                !negated_rows.contains(&row),
            );
        }
    }
}
