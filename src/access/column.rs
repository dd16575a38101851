//! Per-column ordered index.
//!
//! Every column of a table indexes the same set of rows by that column's
//! value. Non-null values live in an ordered map from value to the rows
//! holding it; rows holding NULL sit in a separate bucket because NULL has
//! no place in the key order.

use crate::access::{DataType, Row, RowId, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound;

static NULL: Value = Value::Null;

/// Index key ordered by `Value::total_cmp`
#[derive(Debug, Clone)]
struct IndexKey(Value);

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IndexKey {}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone)]
pub struct IndexedColumn {
    data_type: DataType,
    default: Value,
    nullable: bool,
    unique: bool,
    index: BTreeMap<IndexKey, Vec<Row>>,
    null_bucket: Vec<Row>,
}

impl IndexedColumn {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            default: Value::Null,
            nullable: true,
            unique: false,
            index: BTreeMap::new(),
            null_bucket: Vec::new(),
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Value used when a row is constructed without this column
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// File `row` under `value`
    pub fn insert(&mut self, value: &Value, row: Row) {
        if value.is_null() {
            self.null_bucket.push(row);
        } else {
            self.index
                .entry(IndexKey(value.clone()))
                .or_default()
                .push(row);
        }
    }

    /// Remove the row with the given identity from the bucket for `value`.
    ///
    /// Returns whether a row was removed; a missing bucket or row is a no-op.
    pub fn remove(&mut self, value: &Value, row_id: RowId) -> bool {
        if value.is_null() {
            return remove_from_bucket(&mut self.null_bucket, row_id);
        }

        let key = IndexKey(value.clone());
        let Some(bucket) = self.index.get_mut(&key) else {
            return false;
        };
        let removed = remove_from_bucket(bucket, row_id);
        if bucket.is_empty() {
            self.index.remove(&key);
        }
        removed
    }

    /// Rows holding exactly `value`; NULL looks up the null bucket
    pub fn lookup(&self, value: &Value) -> &[Row] {
        if value.is_null() {
            return &self.null_bucket;
        }
        self.index
            .get(&IndexKey(value.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, value: &Value) -> bool {
        !self.lookup(value).is_empty()
    }

    /// Distinct non-null keys between the bounds, in ascending order.
    ///
    /// A missing (or NULL) bound leaves that end open. `inclusive` applies to
    /// both bounds.
    pub fn range(&self, low: Option<&Value>, high: Option<&Value>, inclusive: bool) -> Vec<&Value> {
        let low = low.filter(|v| !v.is_null());
        let high = high.filter(|v| !v.is_null());

        if let (Some(low), Some(high)) = (low, high) {
            match low.total_cmp(high) {
                Ordering::Greater => return Vec::new(),
                Ordering::Equal if !inclusive => return Vec::new(),
                _ => {}
            }
        }

        let bound = |value: Option<&Value>| match value {
            None => Bound::Unbounded,
            Some(v) if inclusive => Bound::Included(IndexKey(v.clone())),
            Some(v) => Bound::Excluded(IndexKey(v.clone())),
        };

        self.index
            .range((bound(low), bound(high)))
            .map(|(key, _)| &key.0)
            .collect()
    }

    /// Smallest non-null key
    pub fn minimum(&self) -> Option<&Value> {
        self.index.keys().next().map(|key| &key.0)
    }

    /// Largest non-null key
    pub fn maximum(&self) -> Option<&Value> {
        self.index.keys().next_back().map(|key| &key.0)
    }

    /// Every distinct key in order, then one NULL if any row holds NULL
    pub fn keys(&self) -> impl Iterator<Item = &Value> + '_ {
        let null_marker: Option<&Value> = if self.null_bucket.is_empty() {
            None
        } else {
            Some(&NULL)
        };
        self.index.keys().map(|key| &key.0).chain(null_marker)
    }

    /// Every row, in key order, null bucket last
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.index
            .values()
            .flat_map(|bucket| bucket.iter())
            .chain(self.null_bucket.iter())
    }

    pub fn row_count(&self) -> usize {
        self.index.values().map(Vec::len).sum::<usize>() + self.null_bucket.len()
    }

    pub fn distinct_count(&self) -> usize {
        self.index.len()
    }
}

fn remove_from_bucket(bucket: &mut Vec<Row>, row_id: RowId) -> bool {
    match bucket.iter().position(|row| row.id() == row_id) {
        Some(index) => {
            bucket.remove(index);
            true
        }
        None => false,
    }
}
