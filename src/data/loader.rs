use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Table, COLUMNS};
use super::round2;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Loading failures. `FileNotFound`, `MissingColumn` and `Parse` are fatal
/// at startup; the File → Open dialog surfaces them as a status message
/// instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },

    /// A record failed to deserialize (e.g. non-numeric text in a currency
    /// column). `record` is 1-based; 0 means the header itself was
    /// unreadable.
    #[error("record {record}: {source}")]
    Parse {
        record: usize,
        #[source]
        source: csv::Error,
    },
}

fn open_error(path: &Path, source: io::Error) -> LoadError {
    if source.kind() == io::ErrorKind::NotFound {
        LoadError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the sales dataset from a CSV file.
///
/// Expected layout: header row with the columns in [`COLUMNS`] (order
/// irrelevant, extra columns ignored), then one record per sale. Numeric
/// columns must parse as numbers; row order is preserved.
pub fn load(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| open_error(path, e))?;
    read_table(csv::Reader::from_reader(io::BufReader::new(file)))
}

/// On-disk size of the dataset in kibibytes, rounded to two decimals.
/// Display only.
pub fn file_size_kb(path: &Path) -> Result<f64, LoadError> {
    let meta = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    Ok(round2(meta.len() as f64 / 1024.0))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn read_table<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Table, LoadError> {
    // Validate the header up front: serde would only notice a missing
    // column on the first record, which lets an empty file slip through.
    let headers = reader
        .headers()
        .map_err(|e| LoadError::Parse { record: 0, source: e })?
        .clone();
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn { column });
        }
    }

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let row = result.map_err(|e| LoadError::Parse {
            record: i + 1,
            source: e,
        })?;
        rows.push(row);
    }

    Ok(Table::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CatColumn;

    const HEADER: &str = "Area_Code,State,Market,Market_Size,Profit,Margin,Sales,COGS,\
        Total_Expenses,Marketing,Inventory,Budget_Profit,Budget_COGS,Budget_Margin,\
        Budget_Sales,ProductID,Date,Product_Type,Product,Type";

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::Reader::from_reader(data.as_bytes())
    }

    #[test]
    fn parses_records_in_order() {
        let data = format!(
            "{HEADER}\n\
             203,Connecticut,East,Small Market,107,176,219,43,69,32,777,110,40,180,220,1,2010-01-01,Coffee,Columbian,Regular\n\
             970,Colorado,West,Major Market,102,190,258,68,88,47,623,100,70,190,260,2,2010-02-01,Espresso,Caffe Latte,Decaf\n"
        );
        let table = read_table(reader(&data)).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].state, "Connecticut");
        assert_eq!(table.rows[1].area_code, 970);
        assert_eq!(table.rows[1].sales, 258.0);
        assert_eq!(table.area_code_range, (203, 970));
        assert_eq!(table.unique_values[&CatColumn::Market].len(), 2);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let data = format!(
            "{HEADER},Comment\n\
             203,Connecticut,East,Small Market,107,176,219,43,69,32,777,110,40,180,220,1,2010-01-01,Coffee,Columbian,Regular,fine\n"
        );
        let table = read_table(reader(&data)).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        // Header without the Sales column, and no data rows at all: the
        // error must still fire.
        let data = HEADER.replace(",Sales,", ",");
        let err = read_table(reader(&data)).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "Sales" }));
    }

    #[test]
    fn non_numeric_currency_cell_is_a_parse_error() {
        let data = format!(
            "{HEADER}\n\
             203,Connecticut,East,Small Market,107,176,lots,43,69,32,777,110,40,180,220,1,2010-01-01,Coffee,Columbian,Regular\n"
        );
        let err = read_table(reader(&data)).unwrap_err();
        assert!(matches!(err, LoadError::Parse { record: 1, .. }));
    }

    #[test]
    fn missing_file_is_distinguished() {
        let path = Path::new("definitely/not/here/sales.csv");
        assert!(matches!(
            load(path).unwrap_err(),
            LoadError::FileNotFound { .. }
        ));
        assert!(matches!(
            file_size_kb(path).unwrap_err(),
            LoadError::FileNotFound { .. }
        ));
    }
}
