//! Keyed test-data tables.
//!
//! A [`DataTable`] is a CSV sheet with a header row where the `TCName`
//! column keys each row by test-case name. Rows are exposed as column→value
//! mappings with the key column itself excluded. Sheets are addressed by
//! file stem, so `LoginData` resolves to `LoginData.csv` in the data
//! directory.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;

use tracing::info;

use crate::result::{VigiaError, VigiaResult};

/// Column holding the test-case-name key.
pub const DEFAULT_KEY_COLUMN: &str = "TCName";

/// One row of a sheet, keyed by column name.
pub type DataRow = BTreeMap<String, String>;

/// A test-data sheet keyed by test-case name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: BTreeMap<String, DataRow>,
}

impl DataTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a sheet from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::MissingColumn`] when the header lacks the key
    /// column, or [`VigiaError::Csv`] / [`VigiaError::Io`] on read failures.
    pub fn from_csv_path(path: impl AsRef<Path>) -> VigiaResult<Self> {
        Self::read_from(csv::Reader::from_path(path.as_ref())?)
    }

    /// Read a sheet from any reader producing CSV text.
    ///
    /// # Errors
    ///
    /// Same failures as [`DataTable::from_csv_path`].
    pub fn from_reader<R: io::Read>(reader: R) -> VigiaResult<Self> {
        Self::read_from(csv::Reader::from_reader(reader))
    }

    /// Read the sheet named `sheet` from `dir` (`{sheet}.csv`).
    ///
    /// # Errors
    ///
    /// Same failures as [`DataTable::from_csv_path`].
    pub fn load_sheet(dir: impl AsRef<Path>, sheet: &str) -> VigiaResult<Self> {
        let path = dir.as_ref().join(format!("{sheet}.csv"));
        info!(sheet, path = %path.display(), "loading test data sheet");
        Self::from_csv_path(path)
    }

    fn read_from<R: io::Read>(mut reader: csv::Reader<R>) -> VigiaResult<Self> {
        let headers = reader.headers()?.clone();
        let key_idx = headers
            .iter()
            .position(|h| h == DEFAULT_KEY_COLUMN)
            .ok_or_else(|| VigiaError::MissingColumn {
                column: DEFAULT_KEY_COLUMN.to_string(),
            })?;

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_idx)
            .map(|(_, h)| h.to_string())
            .collect();

        let mut rows = BTreeMap::new();
        for record in reader.records() {
            let record = record?;
            let key = record.get(key_idx).unwrap_or_default().to_string();
            let mut row = DataRow::new();
            for (i, header) in headers.iter().enumerate() {
                if i == key_idx {
                    continue;
                }
                row.insert(
                    header.to_string(),
                    record.get(i).unwrap_or_default().to_string(),
                );
            }
            rows.insert(key, row);
        }

        Ok(Self { columns, rows })
    }

    /// Add or replace a row, extending the column set as needed.
    pub fn insert_row(&mut self, key: impl Into<String>, fields: &[(&str, &str)]) {
        for (column, _) in fields {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push((*column).to_string());
            }
        }
        let row = fields
            .iter()
            .map(|(c, v)| ((*c).to_string(), (*v).to_string()))
            .collect();
        self.rows.insert(key.into(), row);
    }

    /// Look up a row by test-case name.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::MissingRow`] when the key is absent.
    pub fn row(&self, key: &str) -> VigiaResult<&DataRow> {
        self.rows.get(key).ok_or_else(|| VigiaError::MissingRow {
            key: key.to_string(),
        })
    }

    /// Look up one field of a row.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::MissingRow`] or [`VigiaError::MissingColumn`].
    pub fn get(&self, key: &str, column: &str) -> VigiaResult<&str> {
        self.row(key)?
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| VigiaError::MissingColumn {
                column: column.to_string(),
            })
    }

    /// Row keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the sheet to a CSV file, header first.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Io`] / [`VigiaError::Csv`] on write failures.
    pub fn write_csv_path(&self, path: impl AsRef<Path>) -> VigiaResult<()> {
        self.write_csv(File::create(path.as_ref())?)
    }

    /// Write the sheet to any writer. Cells missing from a row are written
    /// empty so every record has the full column count.
    ///
    /// # Errors
    ///
    /// Returns [`VigiaError::Csv`] on write failures.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> VigiaResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec![DEFAULT_KEY_COLUMN.to_string()];
        header.extend(self.columns.iter().cloned());
        wtr.write_record(&header)?;

        for (key, row) in &self.rows {
            let mut record = vec![key.clone()];
            for column in &self.columns {
                record.push(row.get(column).cloned().unwrap_or_default());
            }
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const LOGIN_SHEET: &str = "\
TCName,username,password,lastname,company
test_verify_invalidLogin_TC03,admin12,admin,,
test_create_lead_TC05,,,Sharma,TestLeaf
";

    mod read_tests {
        use super::*;

        #[test]
        fn test_rows_are_keyed_by_tcname() {
            let table = DataTable::from_reader(Cursor::new(LOGIN_SHEET)).unwrap();

            assert_eq!(table.len(), 2);
            assert_eq!(
                table.get("test_verify_invalidLogin_TC03", "username").unwrap(),
                "admin12"
            );
            assert_eq!(table.get("test_create_lead_TC05", "company").unwrap(), "TestLeaf");
        }

        #[test]
        fn test_key_column_is_not_a_field() {
            let table = DataTable::from_reader(Cursor::new(LOGIN_SHEET)).unwrap();
            let row = table.row("test_create_lead_TC05").unwrap();
            assert!(!row.contains_key(DEFAULT_KEY_COLUMN));
            assert_eq!(row.len(), 4);
        }

        #[test]
        fn test_missing_key_column_fails() {
            let err =
                DataTable::from_reader(Cursor::new("name,value\na,1\n")).unwrap_err();
            assert!(matches!(
                err,
                VigiaError::MissingColumn { ref column } if column == "TCName"
            ));
        }

        #[test]
        fn test_keys_iterate_sorted() {
            let table = DataTable::from_reader(Cursor::new(LOGIN_SHEET)).unwrap();
            let keys: Vec<&str> = table.keys().collect();
            assert_eq!(
                keys,
                vec!["test_create_lead_TC05", "test_verify_invalidLogin_TC03"]
            );
        }
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn test_missing_row_is_reported_by_key() {
            let table = DataTable::from_reader(Cursor::new(LOGIN_SHEET)).unwrap();
            let err = table.row("test_unknown_TC99").unwrap_err();
            assert!(matches!(
                err,
                VigiaError::MissingRow { ref key } if key == "test_unknown_TC99"
            ));
        }

        #[test]
        fn test_missing_column_is_reported_by_name() {
            let table = DataTable::from_reader(Cursor::new(LOGIN_SHEET)).unwrap();
            let err = table.get("test_create_lead_TC05", "phone").unwrap_err();
            assert!(matches!(err, VigiaError::MissingColumn { .. }));
        }
    }

    mod write_tests {
        use super::*;

        #[test]
        fn test_write_read_round_trip() {
            let mut table = DataTable::new();
            table.insert_row(
                "test_verify_invalidLogin_TC03",
                &[
                    ("username", "admin12"),
                    ("password", "admin"),
                    ("lastname", ""),
                    ("company", ""),
                ],
            );
            table.insert_row(
                "test_create_lead_TC05",
                &[
                    ("username", ""),
                    ("password", ""),
                    ("lastname", "Sharma"),
                    ("company", "TestLeaf"),
                ],
            );

            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("LoginData.csv");
            table.write_csv_path(&path).unwrap();

            let reloaded = DataTable::from_csv_path(&path).unwrap();
            assert_eq!(reloaded, table);
        }

        #[test]
        fn test_load_sheet_by_stem() {
            let mut table = DataTable::new();
            table.insert_row("test_login_TC01", &[("username", "admin")]);

            let dir = tempfile::tempdir().unwrap();
            table.write_csv_path(dir.path().join("LoginData.csv")).unwrap();

            let loaded = DataTable::load_sheet(dir.path(), "LoginData").unwrap();
            assert_eq!(loaded.get("test_login_TC01", "username").unwrap(), "admin");
        }

        #[test]
        fn test_missing_cells_round_trip_as_empty() {
            let mut table = DataTable::new();
            table.insert_row("a", &[("username", "admin")]);
            table.insert_row("b", &[("company", "TestLeaf")]);

            let mut buf = Vec::new();
            table.write_csv(&mut buf).unwrap();

            let reloaded = DataTable::from_reader(Cursor::new(buf)).unwrap();
            assert_eq!(reloaded.get("a", "company").unwrap(), "");
            assert_eq!(reloaded.get("b", "username").unwrap(), "");
        }
    }
}
