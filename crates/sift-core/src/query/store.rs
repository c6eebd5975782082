use crate::{
    query::{
        QueryNode,
        constraint::{Constraint, EqualityOp, LinkedColumn, NullableType, Operand, OrderingOp, StringOp},
    },
    schema::Schema,
};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;

///
/// In-memory column store subset.
///
/// Just enough of the storage engine to run compiled queries: typed
/// cells, to-one and to-many link cells, and link-hop traversal. Query
/// planning, indexing, and persistence live outside this crate.
///

///
/// CellValue
///

#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Binary(Vec<u8>),
    Timestamp(DateTime<Utc>),
    /// To-one link: row index in the target table, or none.
    Link(Option<usize>),
    /// To-many link: row indices in the target table.
    LinkList(Vec<usize>),
    Null,
}

///
/// Row
///

pub type Row = Vec<CellValue>;

///
/// TableColumn
///
/// Per-column metadata the evaluator needs: the target table name for
/// link columns.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TableColumn {
    pub target: Option<String>,
}

///
/// Table
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Row>,
}

impl Table {
    #[must_use]
    pub const fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row and return its index.
    pub fn push_row(&mut self, row: Row) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    #[must_use]
    pub fn link_target(&self, column: usize) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|col| col.target.as_deref())
    }
}

///
/// Store
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Store {
    tables: BTreeMap<String, Table>,
}

impl Store {
    /// Build an empty store with one table per object type, columns laid
    /// out by the schema's column indices.
    #[must_use]
    pub fn from_schema(schema: &Schema) -> Self {
        let mut tables = BTreeMap::new();
        for object in schema.objects() {
            let column_count = object
                .properties()
                .iter()
                .map(|p| p.column + 1)
                .max()
                .unwrap_or(0);

            let mut columns = vec![TableColumn::default(); column_count];
            for property in object.properties() {
                columns[property.column] = TableColumn {
                    target: property.object_type.clone(),
                };
            }

            tables.insert(object.name().to_string(), Table::new(columns));
        }

        Self { tables }
    }

    /// Build a store directly from tables, bypassing the schema.
    #[must_use]
    pub const fn from_tables(tables: BTreeMap<String, Table>) -> Self {
        Self { tables }
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.get_mut(name)
    }
}

/// Evaluate an assembled query node against one row.
pub(crate) fn eval(store: &Store, table: &str, row: usize, node: &QueryNode) -> bool {
    match node {
        QueryNode::True => true,
        QueryNode::False => false,
        QueryNode::Not(inner) => !eval(store, table, row, inner),
        QueryNode::And(terms) => terms.iter().all(|term| eval(store, table, row, term)),
        QueryNode::Or(terms) => terms.iter().any(|term| eval(store, table, row, term)),
        QueryNode::Constraint(constraint) => eval_constraint(store, table, row, constraint),
    }
}

/// Collect every terminal cell reachable from `row` through the hop
/// chain. To-one hops follow a single link; to-many hops fan out. A
/// broken or null hop yields no candidates.
fn terminal_cells<'a>(
    store: &'a Store,
    table: &str,
    row: usize,
    linked: &LinkedColumn,
) -> Vec<&'a CellValue> {
    let mut frontier = vec![(table.to_string(), row)];

    for &hop in &linked.links {
        let mut next = Vec::new();
        for (table_name, row_index) in &frontier {
            let Some(tbl) = store.table(table_name) else {
                continue;
            };
            let Some(target) = tbl.link_target(hop) else {
                continue;
            };
            match tbl.cell(*row_index, hop) {
                Some(CellValue::Link(Some(linked_row))) => {
                    next.push((target.to_string(), *linked_row));
                }
                Some(CellValue::LinkList(rows)) => {
                    next.extend(rows.iter().map(|&r| (target.to_string(), r)));
                }
                _ => {}
            }
        }
        frontier = next;
    }

    frontier
        .iter()
        .filter_map(|(table_name, row_index)| {
            store
                .table(table_name)
                .and_then(|tbl| tbl.cell(*row_index, linked.column))
        })
        .collect()
}

/// A constraint matches when any terminal cell reachable through the
/// column operand's hop chain satisfies the typed comparison. A cell of
/// the wrong kind never matches.
fn eval_constraint(store: &Store, table: &str, row: usize, constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Bool { op, lhs, rhs } => {
            eval_typed(store, table, row, lhs, rhs, |cell| match cell {
                CellValue::Bool(value) => Some(*value),
                _ => None,
            }, |a, b| eval_equality(*op, &a, &b))
        }
        Constraint::Int { op, lhs, rhs } => {
            eval_typed(store, table, row, lhs, rhs, |cell| match cell {
                CellValue::Int(value) => Some(*value),
                _ => None,
            }, |a, b| eval_ordering(*op, a.partial_cmp(&b)))
        }
        Constraint::Float { op, lhs, rhs } => {
            eval_typed(store, table, row, lhs, rhs, |cell| match cell {
                CellValue::Float(value) => Some(*value),
                _ => None,
            }, |a, b| eval_ordering(*op, a.partial_cmp(&b)))
        }
        Constraint::Double { op, lhs, rhs } => {
            eval_typed(store, table, row, lhs, rhs, |cell| match cell {
                CellValue::Double(value) => Some(*value),
                _ => None,
            }, |a, b| eval_ordering(*op, a.partial_cmp(&b)))
        }
        Constraint::Timestamp { op, lhs, rhs } => {
            eval_typed(store, table, row, lhs, rhs, |cell| match cell {
                CellValue::Timestamp(value) => Some(*value),
                _ => None,
            }, |a, b| eval_ordering(*op, a.partial_cmp(&b)))
        }
        Constraint::Text {
            op,
            case_sensitive,
            lhs,
            rhs,
        } => eval_typed(store, table, row, lhs, rhs, |cell| match cell {
            CellValue::Text(value) => Some(value.clone()),
            _ => None,
        }, |a, b| eval_text(*op, *case_sensitive, &a, &b)),
        Constraint::Binary { op, lhs, rhs } => {
            eval_typed(store, table, row, lhs, rhs, |cell| match cell {
                CellValue::Binary(value) => Some(value.clone()),
                _ => None,
            }, |a, b| eval_binary(*op, &a, &b))
        }
        Constraint::LinksTo {
            column,
            row: target_row,
        } => {
            let Some(tbl) = store.table(table) else {
                return false;
            };
            match tbl.cell(row, *column) {
                Some(CellValue::Link(Some(linked_row))) => linked_row == target_row,
                Some(CellValue::LinkList(rows)) => rows.contains(target_row),
                _ => false,
            }
        }
        Constraint::Null { column, op, ty } => {
            let cells = terminal_cells(store, table, row, column);
            if cells.is_empty() {
                return false;
            }
            cells.into_iter().any(|cell| {
                let is_null = match ty {
                    NullableType::Object => matches!(cell, CellValue::Link(None)),
                    _ => matches!(cell, CellValue::Null),
                };
                match op {
                    EqualityOp::Eq => is_null,
                    EqualityOp::Ne => !is_null,
                }
            })
        }
    }
}

/// Resolve both operands of a typed comparison and apply `compare`,
/// fanning out over the column operand's terminal cells.
fn eval_typed<T: Clone>(
    store: &Store,
    table: &str,
    row: usize,
    lhs: &Operand<T>,
    rhs: &Operand<T>,
    extract: impl Fn(&CellValue) -> Option<T>,
    compare: impl Fn(T, T) -> bool,
) -> bool {
    match (lhs, rhs) {
        (Operand::Column(column), Operand::Value(value)) => {
            terminal_cells(store, table, row, column)
                .into_iter()
                .filter_map(|cell| extract(cell))
                .any(|cell_value| compare(cell_value, value.clone()))
        }
        (Operand::Value(value), Operand::Column(column)) => {
            terminal_cells(store, table, row, column)
                .into_iter()
                .filter_map(|cell| extract(cell))
                .any(|cell_value| compare(value.clone(), cell_value))
        }
        (Operand::Value(a), Operand::Value(b)) => compare(a.clone(), b.clone()),
        (Operand::Column(a), Operand::Column(b)) => {
            let left = terminal_cells(store, table, row, a);
            let right = terminal_cells(store, table, row, b);
            left.into_iter().filter_map(|cell| extract(cell)).any(|lv| {
                right
                    .iter()
                    .filter_map(|&cell| extract(cell))
                    .any(|rv| compare(lv.clone(), rv))
            })
        }
    }
}

fn eval_equality<T: PartialEq>(op: EqualityOp, a: &T, b: &T) -> bool {
    match op {
        EqualityOp::Eq => a == b,
        EqualityOp::Ne => a != b,
    }
}

fn eval_ordering(op: OrderingOp, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return false;
    };

    match op {
        OrderingOp::Eq => ordering.is_eq(),
        OrderingOp::Ne => ordering.is_ne(),
        OrderingOp::Lt => ordering.is_lt(),
        OrderingOp::Lte => ordering.is_le(),
        OrderingOp::Gt => ordering.is_gt(),
        OrderingOp::Gte => ordering.is_ge(),
    }
}

fn eval_text(op: StringOp, case_sensitive: bool, a: &str, b: &str) -> bool {
    if case_sensitive {
        return eval_text_exact(op, a, b);
    }

    eval_text_exact(op, &a.to_lowercase(), &b.to_lowercase())
}

fn eval_text_exact(op: StringOp, a: &str, b: &str) -> bool {
    match op {
        StringOp::Eq => a == b,
        StringOp::Ne => a != b,
        StringOp::StartsWith => a.starts_with(b),
        StringOp::EndsWith => a.ends_with(b),
        StringOp::Contains => a.contains(b),
    }
}

fn eval_binary(op: StringOp, a: &[u8], b: &[u8]) -> bool {
    match op {
        StringOp::Eq => a == b,
        StringOp::Ne => a != b,
        StringOp::StartsWith => a.starts_with(b),
        StringOp::EndsWith => a.ends_with(b),
        StringOp::Contains => {
            b.is_empty() || a.windows(b.len()).any(|window| window == b)
        }
    }
}
