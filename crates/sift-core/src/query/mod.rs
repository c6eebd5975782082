mod constraint;
mod store;


pub use constraint::{
    Constraint, EqualityOp, LinkedColumn, NullableType, Operand, OrderingOp, StringOp,
};
pub use store::{CellValue, Row, Store, Table, TableColumn};

///
/// Query accumulator.
///
/// Order-sensitive expression-tree builder owned by the storage engine
/// side of the system. The compiler is its sole mutator during one
/// compilation: it appends typed constraints and sentinels, scopes them
/// with `group`/`end_group`, and connects them with `not`/`or`.
/// Structural defects are not raised eagerly; `validate` reports them
/// post hoc as a diagnostic string, empty on success.
///

///
/// QueryNode
///
/// Assembled expression tree. `True` and `False` are the sentinel
/// leaves used for structurally empty groups; they carry no table or
/// schema binding and clone freely.
///

#[derive(Clone, Debug, PartialEq)]
pub enum QueryNode {
    True,
    False,
    Constraint(Constraint),
    Not(Box<QueryNode>),
    And(Vec<QueryNode>),
    Or(Vec<QueryNode>),
}

///
/// Frame
///
/// One open group while building. Terms appended into a frame combine
/// with And unless an `or` connective is pending; `not` counts are
/// applied to the next appended term or closed group.
///

#[derive(Debug, Default)]
struct Frame {
    node: Option<QueryNode>,
    pending_not: u32,
    pending_or: bool,
}

///
/// Query
///

#[derive(Debug)]
pub struct Query {
    frames: Vec<Frame>,
    problems: Vec<String>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            problems: Vec::new(),
        }
    }

    /// Open a nested group; everything appended until the matching
    /// `end_group` combines inside it.
    pub fn group(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Close the innermost group and append it to the enclosing frame.
    pub fn end_group(&mut self) {
        if self.frames.len() == 1 {
            self.problems
                .push("end_group() without a matching group()".to_string());
            return;
        }

        let frame = self.frames.pop().unwrap_or_default();
        if frame.pending_not > 0 {
            self.problems
                .push("group closed with a dangling NOT".to_string());
        }
        if frame.pending_or {
            self.problems
                .push("group closed with a dangling OR".to_string());
        }

        // An empty group contributes nothing.
        if let Some(node) = frame.node {
            self.append(node);
        }
    }

    /// Negate the next appended term or group.
    pub fn not(&mut self) {
        self.top().pending_not += 1;
    }

    /// Connect the next appended term to the previous one with OR. A
    /// leading connective in a fresh group is harmless.
    pub fn or(&mut self) {
        let dangling = {
            let frame = self.top();
            frame.pending_or && frame.node.is_some()
        };
        if dangling {
            self.problems.push("OR with no right-hand side".to_string());
        }
        self.top().pending_or = true;
    }

    /// Append an always-true sentinel.
    pub fn push_true(&mut self) {
        self.append(QueryNode::True);
    }

    /// Append an always-false sentinel.
    pub fn push_false(&mut self) {
        self.append(QueryNode::False);
    }

    /// Append a typed comparison.
    pub fn push(&mut self, constraint: Constraint) {
        self.append(QueryNode::Constraint(constraint));
    }

    /// Structural validation of the assembled tree. Returns an empty
    /// string when the query is well formed, a diagnostic otherwise.
    #[must_use]
    pub fn validate(&self) -> String {
        if let Some(problem) = self.problems.first() {
            return problem.clone();
        }
        if self.frames.len() > 1 {
            return "missing end_group()".to_string();
        }

        let root = &self.frames[0];
        if root.pending_not > 0 {
            return "NOT with no operand".to_string();
        }
        if root.pending_or && root.node.is_some() {
            return "OR with no right-hand side".to_string();
        }

        String::new()
    }

    /// The assembled root node; `None` for an empty query, which
    /// matches every row.
    #[must_use]
    pub fn root(&self) -> Option<&QueryNode> {
        self.frames.first().and_then(|frame| frame.node.as_ref())
    }

    /// Whether the row at `row` of `table` matches this query.
    /// Comparisons that cannot be evaluated against the stored data
    /// (wrong cell type, broken link) are treated as non-matches.
    #[must_use]
    pub fn matches(&self, store: &Store, table: &str, row: usize) -> bool {
        match self.root() {
            Some(node) => store::eval(store, table, row, node),
            None => true,
        }
    }

    /// Row indices of every matching row of `table`, in table order.
    #[must_use]
    pub fn find_all(&self, store: &Store, table: &str) -> Vec<usize> {
        let Some(tbl) = store.table(table) else {
            return Vec::new();
        };

        (0..tbl.row_count())
            .filter(|&row| self.matches(store, table, row))
            .collect()
    }

    fn top(&mut self) -> &mut Frame {
        self.frames
            .last_mut()
            .expect("query always has a root frame")
    }

    fn append(&mut self, node: QueryNode) {
        let frame = self.top();

        let mut node = node;
        for _ in 0..frame.pending_not {
            node = QueryNode::Not(Box::new(node));
        }
        frame.pending_not = 0;

        let combined = if frame.pending_or {
            frame.pending_or = false;
            match frame.node.take() {
                Some(QueryNode::Or(mut terms)) => {
                    terms.push(node);
                    QueryNode::Or(terms)
                }
                Some(existing) => QueryNode::Or(vec![existing, node]),
                // Leading connective in a fresh group.
                None => node,
            }
        } else {
            match frame.node.take() {
                Some(QueryNode::And(mut terms)) => {
                    terms.push(node);
                    QueryNode::And(terms)
                }
                Some(existing) => QueryNode::And(vec![existing, node]),
                None => node,
            }
        };

        frame.node = Some(combined);
    }
}
