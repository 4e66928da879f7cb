//! # Loader Module
//!
//! Basket construction from delimited transaction records.
//!
//! - Group rows by (customer, date), both taken verbatim
//! - Trim item values and discard empty ones
//! - Deduplicate items within a group and order them lexicographically
//! - Fail fast on a missing source or missing header fields

use crate::primitives::{
    DEFAULT_CUSTOMER_FIELD, DEFAULT_DATE_FIELD, DEFAULT_DELIMITER, DEFAULT_ITEM_FIELD,
};
use crate::{Basket, BasketError, TransactionRecord};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// =============================================================================
// SCHEMA
// =============================================================================

/// Names of the required header fields and the field delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub customer_field: String,
    pub date_field: String,
    pub item_field: String,
    pub delimiter: u8,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            customer_field: DEFAULT_CUSTOMER_FIELD.to_string(),
            date_field: DEFAULT_DATE_FIELD.to_string(),
            item_field: DEFAULT_ITEM_FIELD.to_string(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl Schema {
    /// Create a schema with custom field names and the default delimiter.
    #[must_use]
    pub fn new(
        customer_field: impl Into<String>,
        date_field: impl Into<String>,
        item_field: impl Into<String>,
    ) -> Self {
        Self {
            customer_field: customer_field.into(),
            date_field: date_field.into(),
            item_field: item_field.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Use a different field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Resolve the required fields against a header row.
    ///
    /// Missing fields are reported together, in customer, date, item order.
    /// A name repeated in the header binds to its last column.
    fn resolve(&self, header: &[String]) -> Result<Columns, BasketError> {
        let position = |name: &str| header.iter().rposition(|cell| cell == name);

        let customer = position(&self.customer_field);
        let date = position(&self.date_field);
        let item = position(&self.item_field);

        match (customer, date, item) {
            (Some(customer), Some(date), Some(item)) => Ok(Columns {
                customer,
                date,
                item,
            }),
            _ => {
                let missing = [
                    (customer, &self.customer_field),
                    (date, &self.date_field),
                    (item, &self.item_field),
                ]
                .into_iter()
                .filter(|(found, _)| found.is_none())
                .map(|(_, name)| name.clone())
                .collect();
                Err(BasketError::SchemaError { missing })
            }
        }
    }
}

/// Column positions of the required fields within a row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    customer: usize,
    date: usize,
    item: usize,
}

impl Columns {
    fn width(self) -> usize {
        self.customer.max(self.date).max(self.item) + 1
    }
}

// =============================================================================
// BASKET BUILDER
// =============================================================================

/// Groups transaction records into baskets.
///
/// Records can be pushed one at a time or read from a delimited source. The
/// builder keeps one item set per (customer, date) key until `finish` turns
/// them into baskets.
#[derive(Debug, Default)]
pub struct BasketBuilder {
    schema: Schema,
    groups: BTreeMap<(String, String), BTreeSet<String>>,
    records: usize,
}

impl BasketBuilder {
    /// Create an empty builder for the given schema.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            groups: BTreeMap::new(),
            records: 0,
        }
    }

    /// The schema used when reading delimited sources.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Add one record.
    ///
    /// The item is trimmed. Whitespace-only items are counted as read but
    /// contribute nothing, and never create a group on their own.
    pub fn push(&mut self, record: TransactionRecord) {
        self.records = self.records.saturating_add(1);

        let item = record.item.trim();
        if item.is_empty() {
            return;
        }

        self.groups
            .entry((record.customer, record.date))
            .or_default()
            .insert(item.to_string());
    }

    /// Read every record of the file at `path`.
    ///
    /// Returns the number of data rows read. On error nothing from this file is
    /// added to the builder.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize, BasketError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => BasketError::SourceNotFound(path.to_path_buf()),
            _ => BasketError::Io(format!("Cannot open '{}': {}", path.display(), e)),
        })?;
        self.load_reader(BufReader::new(file))
    }

    /// Read every record from a buffered reader.
    ///
    /// The first non-blank line is the header. Returns the number of data rows
    /// read. On error nothing from this reader is added to the builder.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> Result<usize, BasketError> {
        let records = read_records(reader, &self.schema)?;
        let count = records.len();
        for record in records {
            self.push(record);
        }
        Ok(count)
    }

    /// Number of records pushed so far, including discarded ones.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Number of (customer, date) groups holding at least one item.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Consume the builder and return one basket per group.
    ///
    /// Callers must not rely on the order of the returned baskets.
    #[must_use]
    pub fn finish(self) -> Vec<Basket> {
        self.groups.into_values().map(Basket::from).collect()
    }
}

/// Load all baskets from the file at `path`.
pub fn load_baskets(path: impl AsRef<Path>, schema: &Schema) -> Result<Vec<Basket>, BasketError> {
    let mut builder = BasketBuilder::new(schema.clone());
    builder.load(path)?;
    Ok(builder.finish())
}

// =============================================================================
// DELIMITED TEXT PARSING
// =============================================================================

/// Read the header and all data rows into records.
///
/// A quoted field may span several physical lines; the record is reported by
/// the line it starts on.
fn read_records<R: BufRead>(
    mut reader: R,
    schema: &Schema,
) -> Result<Vec<TransactionRecord>, BasketError> {
    let delimiter = char::from(schema.delimiter);
    let mut buf = String::new();
    let mut pending = String::new();
    let mut line_no = 0usize;
    let mut record_line = 0usize;
    let mut columns: Option<Columns> = None;
    let mut records = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|e| BasketError::Io(format!("Read line {}: {}", line_no + 1, e)))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        if pending.is_empty() {
            if buf.trim().is_empty() {
                continue;
            }
            record_line = line_no;
        }
        pending.push_str(&buf);

        let Some(fields) = split_record(pending.trim_end_matches(['\n', '\r']), delimiter)
        else {
            // Open quote: the field continues on the next line.
            continue;
        };
        pending.clear();

        let Some(cols) = columns else {
            let header: Vec<String> = fields
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let cell = if i == 0 {
                        cell.trim_start_matches('\u{feff}')
                    } else {
                        cell
                    };
                    cell.trim().to_string()
                })
                .collect();
            columns = Some(schema.resolve(&header)?);
            continue;
        };

        if fields.len() < cols.width() {
            return Err(BasketError::MalformedRecord {
                line: record_line,
                reason: format!(
                    "expected at least {} fields, found {}",
                    cols.width(),
                    fields.len()
                ),
            });
        }

        records.push(TransactionRecord::new(
            fields[cols.customer].as_str(),
            fields[cols.date].as_str(),
            fields[cols.item].as_str(),
        ));
    }

    if !pending.is_empty() {
        return Err(BasketError::MalformedRecord {
            line: record_line,
            reason: "unterminated quoted field".to_string(),
        });
    }

    // A source without a header row lacks every required field.
    if columns.is_none() {
        schema.resolve(&[])?;
    }

    Ok(records)
}

/// Split one record into fields.
///
/// Fields may be wrapped in double quotes; inside quotes the delimiter and
/// line breaks are literal and `""` stands for one quote character. Returns
/// `None` while a quoted field is still open at the end of `record`.
fn split_record(record: &str, delimiter: char) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = record.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' && at_field_start {
            in_quotes = true;
            at_field_start = false;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
            at_field_start = true;
        } else {
            field.push(c);
            at_field_start = false;
        }
    }

    if in_quotes {
        return None;
    }
    fields.push(field);
    Some(fields)
}

// =============================================================================
// TESTS
// =============================================================================
