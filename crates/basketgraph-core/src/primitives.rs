//! # Primitives
//!
//! Fixed constants for the basketgraph core.
//!
//! These are compiled into the binary. Anything a user may want to change at
//! runtime (field names, delimiter, query defaults) is only a *default* here and
//! can be overridden through `Schema` or the application config.

/// Default header name of the customer identifier column.
pub const DEFAULT_CUSTOMER_FIELD: &str = "Member_number";

/// Default header name of the purchase date column.
pub const DEFAULT_DATE_FIELD: &str = "Date";

/// Default header name of the item description column.
pub const DEFAULT_ITEM_FIELD: &str = "itemDescription";

/// Default field delimiter of the transaction source.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Default number of entries returned by top-K queries.
pub const DEFAULT_TOP_K: usize = 10;

/// Default hop bound for exploration queries.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Default minimum edge weight followed by exploration queries.
pub const DEFAULT_MIN_WEIGHT: u64 = 1;

/// Upper bounds (inclusive) of the edge-weight histogram buckets.
///
/// A final open-ended bucket collects everything above the last bound.
pub const WEIGHT_BUCKET_BOUNDS: [u64; 7] = [5, 10, 20, 50, 100, 150, 250];
