//! Access layer: values, rows and indexed tables.
//!
//! - **Value**: type-safe representation of column values
//! - **Row**: immutable tuple shared by every column index of a table
//! - **IndexedColumn**: ordered value-to-rows index with a separate NULL bucket
//! - **Table**: fixed set of indexed columns kept in step on every change
//!
//! Everything is memory resident and single threaded.

pub mod column;
pub mod error;
pub mod row;
pub mod table;
pub mod value;

pub use column::IndexedColumn;
pub use error::{AccessError, AccessResult};
pub use row::{Row, RowId};
pub use table::Table;
pub use value::{DataType, Value};
