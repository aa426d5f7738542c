//! CSV discovery and loading for the sales pipeline.
//!
//! Reads raw daily sales files into [`RawSalesRecord`]s and reads the
//! normalized artifact back into [`NormalizedSalesRecord`]s.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use csv::StringRecord;
use sales_core::error::{Result, SalesError};
use sales_core::models::{NormalizedSalesRecord, RawSalesRecord, Region};
use tracing::{debug, info};

/// Header columns every raw input file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["product", "price", "quantity", "date", "region"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Result<Vec<PathBuf>> {
    if !data_path.is_dir() {
        return Err(SalesError::DataPathNotFound(data_path.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    if files.is_empty() {
        return Err(SalesError::NoDataFiles(data_path.to_path_buf()));
    }

    files.sort();
    debug!("Found {} CSV files under {}", files.len(), data_path.display());
    Ok(files)
}

/// Load one raw sales file, preserving row order.
///
/// Fails when the file is missing, unreadable, lacks one of
/// [`REQUIRED_COLUMNS`], or contains a row that cannot be decoded.
pub fn load_raw_records(path: &Path) -> Result<Vec<RawSalesRecord>> {
    if !path.exists() {
        return Err(SalesError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| SalesError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| malformed(path, &e))?
        .clone();
    let columns = ColumnIndex::from_headers(path, &headers)?;
    let source: Arc<Path> = Arc::from(path);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| malformed(path, &e))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        records.push(columns.parse_row(&record, &source, line)?);
    }

    debug!("File {}: {} rows read", path.display(), records.len());
    Ok(records)
}

/// Load every file in `paths` and concatenate the rows in the given order.
///
/// The first failing file aborts the whole load.
pub fn load_all_raw_records(paths: &[PathBuf]) -> Result<Vec<RawSalesRecord>> {
    let mut all_records = Vec::new();
    for path in paths {
        all_records.extend(load_raw_records(path)?);
    }

    info!(
        "Loaded {} raw rows from {} files",
        all_records.len(),
        paths.len()
    );
    Ok(all_records)
}

/// Read the normalized artifact (`Sales,Date,Region`) back into memory.
pub fn read_normalized_records(path: &Path) -> Result<Vec<NormalizedSalesRecord>> {
    if !path.exists() {
        return Err(SalesError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| SalesError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let mut records = Vec::new();
    for result in reader.deserialize::<NormalizedSalesRecord>() {
        records.push(result.map_err(|e| malformed(path, &e))?);
    }

    debug!("File {}: {} normalized rows read", path.display(), records.len());
    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Column positions of the required fields within one file.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    product: usize,
    price: usize,
    quantity: usize,
    date: usize,
    region: usize,
}

impl ColumnIndex {
    fn from_headers(path: &Path, headers: &StringRecord) -> Result<Self> {
        let header_map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let find = |column: &str| {
            header_map
                .get(column)
                .copied()
                .ok_or_else(|| SalesError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })
        };

        Ok(Self {
            product: find("product")?,
            price: find("price")?,
            quantity: find("quantity")?,
            date: find("date")?,
            region: find("region")?,
        })
    }

    fn parse_row(&self, record: &StringRecord, source: &Arc<Path>, line: u64) -> Result<RawSalesRecord> {
        let row_error = |message: String| SalesError::MalformedRow {
            path: source.to_path_buf(),
            line,
            message,
        };
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let quantity_raw = field(self.quantity).trim();
        let quantity = quantity_raw
            .parse::<u64>()
            .map_err(|_| row_error(format!("invalid quantity '{quantity_raw}'")))?;

        let date = parse_date(field(self.date)).map_err(row_error)?;

        let region_raw = field(self.region);
        let region = region_raw
            .parse::<Region>()
            .map_err(|_| row_error(format!("unknown region '{region_raw}'")))?;

        Ok(RawSalesRecord {
            product: field(self.product).to_string(),
            price: field(self.price).to_string(),
            quantity,
            date,
            region,
            source: Arc::clone(source),
            line,
        })
    }
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn malformed(path: &Path, err: &csv::Error) -> SalesError {
    SalesError::MalformedRow {
        path: path.to_path_buf(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "product,price,quantity,date,region";

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── find_csv_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_csv_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "daily_sales_data_2.csv", &[HEADER]);
        write_csv(dir.path(), "daily_sales_data_0.csv", &[HEADER]);
        write_csv(dir.path(), "daily_sales_data_1.csv", &[HEADER]);
        write_csv(dir.path(), "notes.txt", &["ignore me"]);

        let files = find_csv_files(dir.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "daily_sales_data_0.csv",
                "daily_sales_data_1.csv",
                "daily_sales_data_2.csv"
            ]
        );
    }

    #[test]
    fn test_find_csv_files_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("2021");
        std::fs::create_dir_all(&sub).unwrap();
        write_csv(dir.path(), "a.csv", &[HEADER]);
        write_csv(&sub, "b.csv", &[HEADER]);

        assert_eq!(find_csv_files(dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_find_csv_files_missing_dir() {
        let err = find_csv_files(Path::new("/tmp/does-not-exist-pink-morsel-xyz")).unwrap_err();
        assert!(matches!(err, SalesError::DataPathNotFound(_)));
        assert!(err.is_ingest());
    }

    #[test]
    fn test_find_csv_files_empty_dir() {
        let dir = TempDir::new().unwrap();
        let err = find_csv_files(dir.path()).unwrap_err();
        assert!(matches!(err, SalesError::NoDataFiles(_)));
    }

    // ── load_raw_records ──────────────────────────────────────────────────────

    #[test]
    fn test_load_raw_records_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                HEADER,
                "pink morsel,$3.00,546,2018-02-06,north",
                "gold morsel,$9.99,12,2018-02-06,south",
            ],
        );

        let records = load_raw_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product, "pink morsel");
        assert_eq!(records[0].price, "$3.00");
        assert_eq!(records[0].quantity, 546);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2018, 2, 6).unwrap());
        assert_eq!(records[0].region, Region::North);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 3);
        assert_eq!(&*records[1].source, path.as_path());
    }

    #[test]
    fn test_load_raw_records_reordered_and_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[
                "\u{feff}Region,Date,Quantity,Price,Product,store",
                "east,2021-01-20,4,\"$1,000.00\",pink morsel,12",
            ],
        );

        let records = load_raw_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, "$1,000.00");
        assert_eq!(records[0].region, Region::East);
        assert_eq!(records[0].quantity, 4);
    }

    #[test]
    fn test_load_raw_records_missing_file() {
        let err = load_raw_records(Path::new("/tmp/pink-morsel-missing.csv")).unwrap_err();
        assert!(matches!(err, SalesError::FileNotFound(_)));
        assert!(err.is_ingest());
    }

    #[test]
    fn test_load_raw_records_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &["product,price,date,region", "pink morsel,$3.00,2021-01-01,north"],
        );

        match load_raw_records(&path).unwrap_err() {
            SalesError::MissingColumn { column, .. } => assert_eq!(column, "quantity"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_raw_records_empty_file_is_missing_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "empty.csv", &[]);
        let err = load_raw_records(&path).unwrap_err();
        assert!(matches!(err, SalesError::MissingColumn { .. }));
    }

    #[test]
    fn test_load_raw_records_bad_quantity() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[HEADER, "pink morsel,$3.00,-2,2021-01-01,north"],
        );

        match load_raw_records(&path).unwrap_err() {
            SalesError::MalformedRow { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("quantity"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_raw_records_bad_date() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[HEADER, "pink morsel,$3.00,2,15/01/2021,north"],
        );
        let err = load_raw_records(&path).unwrap_err();
        assert!(matches!(err, SalesError::MalformedRow { .. }));
    }

    #[test]
    fn test_load_raw_records_unknown_region() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "sales.csv",
            &[HEADER, "pink morsel,$3.00,2,2021-01-01,central"],
        );
        let err = load_raw_records(&path).unwrap_err();
        assert!(err.to_string().contains("unknown region 'central'"));
    }

    #[test]
    fn test_load_raw_records_wrong_field_count() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &[HEADER, "pink morsel,$3.00,2"]);
        let err = load_raw_records(&path).unwrap_err();
        assert!(matches!(err, SalesError::MalformedRow { .. }));
    }

    // ── load_all_raw_records ──────────────────────────────────────────────────

    #[test]
    fn test_load_all_raw_records_preserves_file_then_row_order() {
        let dir = TempDir::new().unwrap();
        let first = write_csv(
            dir.path(),
            "z_first.csv",
            &[HEADER, "a,$1,1,2021-01-01,north", "b,$1,1,2021-01-01,north"],
        );
        let second = write_csv(dir.path(), "a_second.csv", &[HEADER, "c,$1,1,2021-01-01,north"]);

        let records = load_all_raw_records(&[first, second]).unwrap();
        let products: Vec<&str> = records.iter().map(|r| r.product.as_str()).collect();
        assert_eq!(products, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_all_raw_records_fails_on_any_missing_file() {
        let dir = TempDir::new().unwrap();
        let good = write_csv(dir.path(), "good.csv", &[HEADER]);
        let missing = dir.path().join("missing.csv");

        let err = load_all_raw_records(&[good, missing]).unwrap_err();
        assert!(matches!(err, SalesError::FileNotFound(_)));
    }

    // ── read_normalized_records ───────────────────────────────────────────────

    #[test]
    fn test_read_normalized_records() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "formatted_sales_output.csv",
            &["Sales,Date,Region", "1638.00,2018-02-06,north", "2.5,2018-02-07,west"],
        );

        let records = read_normalized_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sales, Decimal::new(163800, 2));
        assert_eq!(records[1].region, Region::West);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2018, 2, 7).unwrap());
    }

    #[test]
    fn test_read_normalized_records_rejects_bad_sales() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "out.csv",
            &["Sales,Date,Region", "lots,2018-02-06,north"],
        );
        let err = read_normalized_records(&path).unwrap_err();
        assert!(matches!(err, SalesError::MalformedRow { .. }));
    }

    #[test]
    fn test_read_normalized_records_missing_file() {
        let err = read_normalized_records(Path::new("/tmp/no-such-output.csv")).unwrap_err();
        assert!(matches!(err, SalesError::FileNotFound(_)));
    }
}
