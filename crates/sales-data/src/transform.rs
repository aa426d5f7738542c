//! The ETL step: raw daily sales files in, normalized Pink Morsel CSV out.
//!
//! 1. Load every input file, concatenated in the order given.
//! 2. Keep rows whose product is exactly [`TARGET_PRODUCT`].
//! 3. Strip `$` and `,` from the price and parse it as a decimal.
//! 4. `sales = price * quantity`.
//! 5. Project to `Sales,Date,Region` and persist in derivation order.
//!
//! Any failure aborts the run before the output file is touched.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use sales_core::error::{Result, SalesError};
use sales_core::models::{NormalizedSalesRecord, RawSalesRecord, TARGET_PRODUCT};
use tracing::{debug, info};

use crate::reader::load_all_raw_records;

/// Header written to the normalized artifact.
pub const OUTPUT_HEADER: [&str; 3] = ["Sales", "Date", "Region"];

// ── Public types ──────────────────────────────────────────────────────────────

/// The complete output of [`transform`].
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Normalized records, in input-file then row order.
    pub records: Vec<NormalizedSalesRecord>,
    /// Number of input files read.
    pub files_read: usize,
    /// Number of raw rows read across all files.
    pub rows_read: usize,
    /// Where the records were written.
    pub output_path: PathBuf,
}

impl TransformResult {
    /// Number of rows that survived the product filter.
    pub fn rows_kept(&self) -> usize {
        self.records.len()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full transform over `inputs` and write the result to `output`.
pub fn transform(inputs: &[PathBuf], output: &Path) -> Result<TransformResult> {
    let raw = load_all_raw_records(inputs)?;
    let records = normalize_records(&raw)?;

    write_normalized_csv(output, &records)?;

    info!(
        "Transform complete: {} files, {} rows read, {} rows kept, written to {}",
        inputs.len(),
        raw.len(),
        records.len(),
        output.display()
    );

    Ok(TransformResult {
        records,
        files_read: inputs.len(),
        rows_read: raw.len(),
        output_path: output.to_path_buf(),
    })
}

/// Filter, clean and project raw rows. Pure: performs no I/O.
pub fn normalize_records(raw: &[RawSalesRecord]) -> Result<Vec<NormalizedSalesRecord>> {
    let mut records = Vec::new();
    for row in raw {
        if let Some(record) = normalize_record(row)? {
            records.push(record);
        }
    }
    debug!("{} of {} rows matched '{}'", records.len(), raw.len(), TARGET_PRODUCT);
    Ok(records)
}

/// Normalize a single row, returning `None` when it is not a Pink Morsel sale.
pub fn normalize_record(row: &RawSalesRecord) -> Result<Option<NormalizedSalesRecord>> {
    if row.product != TARGET_PRODUCT {
        return Ok(None);
    }

    let price = clean_price(&row.price).ok_or_else(|| SalesError::PriceParse {
        path: row.source.to_path_buf(),
        line: row.line,
        value: row.price.clone(),
    })?;

    let sales = price
        .checked_mul(Decimal::from(row.quantity))
        .ok_or_else(|| SalesError::SalesOverflow {
            path: row.source.to_path_buf(),
            line: row.line,
            price: row.price.clone(),
            quantity: row.quantity,
        })?;
    Ok(Some(NormalizedSalesRecord::new(sales, row.date, row.region)))
}

/// Strip every `$` and `,` from `raw` and parse the remainder as a decimal.
///
/// ```
/// use rust_decimal::Decimal;
/// use sales_data::transform::clean_price;
///
/// assert_eq!(clean_price("$1,234.50"), Some(Decimal::new(123450, 2)));
/// assert_eq!(clean_price("1234.50"), Some(Decimal::new(123450, 2)));
/// assert_eq!(clean_price("$"), None);
/// ```
pub fn clean_price(raw: &str) -> Option<Decimal> {
    let cleaned = currency_noise().replace_all(raw, "");
    Decimal::from_str(cleaned.trim()).ok()
}

/// Write `records` to `path` with the `Sales,Date,Region` header.
///
/// Rows go to a temporary sibling which is renamed over `path` once
/// complete, so a failed write never leaves a partial artifact.
pub fn write_normalized_csv(path: &Path, records: &[NormalizedSalesRecord]) -> Result<()> {
    let output_error = |source| output_write(path, source);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_error)?;
    }

    let tmp = path.with_extension("csv.tmp");
    let result = write_rows(&tmp, records).and_then(|()| {
        std::fs::rename(&tmp, path).map_err(output_error)
    });

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_rows(tmp: &Path, records: &[NormalizedSalesRecord]) -> Result<()> {
    let file = File::create(tmp).map_err(|source| output_write(tmp, source))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(OUTPUT_HEADER)
        .map_err(|e| output_write(tmp, e.into()))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| output_write(tmp, e.into()))?;
    }
    writer.flush().map_err(|source| output_write(tmp, source))?;
    Ok(())
}

fn output_write(path: &Path, source: std::io::Error) -> SalesError {
    SalesError::OutputWrite {
        path: path.to_path_buf(),
        source,
    }
}

fn currency_noise() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[$,]").expect("regex is valid"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
