//! Business-rule validation of import batches.
//!
//! # Rules
//!
//! Per row, in row order, every row checked:
//! - `title` present, a string, non-empty and at least 3 characters once trimmed
//! - `stock` present, a number, integral, non-negative, fits in an `i64`
//!
//! Across rows, once every row passed:
//! - no two titles equal after trimming and case-folding
//!
//! All row failures of a batch are reported together; duplicate detection
//! needs valid titles and so only runs on a batch with clean rows.
//!
//! # Example
//!
//! ```rust
//! use bookstock::validation::validate_batch;
//! use bookstock_contracts::parse_import_text;
//!
//! let batch = parse_import_text("title;stock\nDune;5\nEmma;2");
//! let books = validate_batch(&batch.to_request().items.unwrap()).unwrap();
//! assert_eq!(books.len(), 2);
//! ```

use std::collections::HashMap;

use bookstock_contracts::UploadItem;
use serde_json::Value;

use crate::error::{ImportError, ImportResult, RowError, RowViolation};
use crate::models::{NewBook, MIN_TITLE_CHARS};

/// Validate a whole batch and return the books to insert, in row order.
pub fn validate_batch(items: &[UploadItem]) -> ImportResult<Vec<NewBook>> {
    if items.is_empty() {
        return Err(ImportError::EmptyBatch);
    }

    let mut books = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        match validate_item(idx + 1, item) {
            Ok(book) => books.push(book),
            Err(mut row_errors) => errors.append(&mut row_errors),
        }
    }

    if !errors.is_empty() {
        return Err(ImportError::RowValidation(errors));
    }

    let duplicates = find_duplicate_titles(&books);
    if !duplicates.is_empty() {
        return Err(ImportError::DuplicateTitle(duplicates));
    }

    Ok(books)
}

/// Check one row. `row` is 1-based.
pub fn validate_item(row: usize, item: &UploadItem) -> Result<NewBook, Vec<RowError>> {
    let title = check_title(&item.title);
    let stock = check_stock(&item.stock);

    match (title, stock) {
        (Ok(title), Ok(stock)) => Ok(NewBook::new(title, stock)),
        (title, stock) => {
            let errors = title
                .err()
                .into_iter()
                .chain(stock.err().into_iter().flatten())
                .map(|violation| RowError::new(row, violation))
                .collect();
            Err(errors)
        }
    }
}

fn check_title(value: &Value) -> Result<String, RowViolation> {
    let raw = match value {
        Value::Null => return Err(RowViolation::MissingTitle),
        Value::String(s) => s,
        _ => return Err(RowViolation::TitleNotString),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RowViolation::EmptyTitle);
    }
    if trimmed.chars().count() < MIN_TITLE_CHARS {
        return Err(RowViolation::TitleTooShort {
            min: MIN_TITLE_CHARS,
        });
    }
    Ok(trimmed.to_string())
}

/// Integrality and sign are independent, so a value like `-1.5` reports both.
fn check_stock(value: &Value) -> Result<i64, Vec<RowViolation>> {
    let number = match value {
        Value::Null => return Err(vec![RowViolation::MissingStock]),
        Value::Number(n) => n,
        _ => return Err(vec![RowViolation::StockNotNumeric]),
    };

    if let Some(n) = number.as_i64() {
        return if n < 0 {
            Err(vec![RowViolation::NegativeStock])
        } else {
            Ok(n)
        };
    }
    if number.is_u64() {
        // Integral but above i64::MAX.
        return Err(vec![RowViolation::StockTooLarge]);
    }

    let f = number.as_f64().unwrap_or(f64::NAN);
    let mut violations = Vec::new();
    if f.fract() != 0.0 {
        violations.push(RowViolation::StockNotInteger);
    }
    if f < 0.0 {
        violations.push(RowViolation::NegativeStock);
    }
    if violations.is_empty() {
        if f >= i64::MAX as f64 {
            violations.push(RowViolation::StockTooLarge);
        } else {
            return Ok(f as i64);
        }
    }
    Err(violations)
}

/// Distinct normalized titles that occur more than once, in order of first
/// occurrence.
pub fn find_duplicate_titles(books: &[NewBook]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen = Vec::new();

    for book in books {
        let key = book.normalized_title();
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            first_seen.push(key);
        }
        *count += 1;
    }

    first_seen
        .into_iter()
        .filter(|key| counts.get(key).copied().unwrap_or(0) > 1)
        .collect()
}
