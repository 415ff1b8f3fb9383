use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Observation, ObservationTable, SpectralIndex};

/// Header names accepted for the year column (case-insensitive).
const YEAR_COLUMNS: [&str; 2] = ["Date", "Year"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an observation table from a file.  Dispatch by extension.
///
/// Every format needs a year column (`Date` or `Year`) and the three index
/// columns `NDVI`, `NDWI`, `NDMI`; any other columns are ignored.  Rows may
/// come in any order, they are sorted by year before validation.
///
/// Supported formats:
/// * `.parquet` – as written by `export_site_table` or `df.to_parquet()`
/// * `.json`    – `[{ "Date": 2018, "NDVI": 1.0, ... }, ...]`
/// * `.csv`     – header row plus one row per year
pub fn load_file(path: &Path) -> Result<ObservationTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    into_table(rows).with_context(|| format!("validating {}", path.display()))
}

fn into_table(mut rows: Vec<Observation>) -> Result<ObservationTable> {
    rows.sort_by_key(|r| r.year);
    Ok(ObservationTable::new(rows)?)
}

fn is_year_column(name: &str) -> bool {
    YEAR_COLUMNS.iter().any(|c| c.eq_ignore_ascii_case(name.trim()))
}

/// Assemble a row from a year and a per-index lookup.
fn build_row(
    year: i32,
    row: usize,
    mut value_of: impl FnMut(SpectralIndex) -> Result<f64>,
) -> Result<Observation> {
    let mut values = [0.0; 3];
    for (slot, index) in values.iter_mut().zip(SpectralIndex::ALL) {
        *slot = value_of(index).with_context(|| format!("Row {row}: reading {index}"))?;
    }
    Ok(Observation::new(year, values[0], values[1], values[2]))
}

/// Accepts integral floats (`2018.0`) since pandas often writes years that way.
fn year_from_f64(v: f64, row: usize) -> Result<i32> {
    if v.fract() != 0.0 || v < i32::MIN as f64 || v > i32::MAX as f64 {
        bail!("Row {row}: {v} is not a valid year");
    }
    Ok(v as i32)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.reset_index().to_json(orient='records')`):
///
/// ```json
/// [
///   { "Date": 2018, "NDVI": 1.0, "NDWI": 0.711013, "NDMI": 0.3099 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Observation>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;

            let year = obj
                .iter()
                .find(|(k, _)| is_year_column(k))
                .map(|(_, v)| v)
                .with_context(|| format!("Row {i}: missing 'Date' or 'Year'"))?;
            let year = match year.as_i64() {
                Some(y) => i32::try_from(y).with_context(|| format!("Row {i}: year {y} out of range"))?,
                None => {
                    let y = year
                        .as_f64()
                        .with_context(|| format!("Row {i}: year is not a number"))?;
                    year_from_f64(y, i)?
                }
            };

            build_row(year, i, |index| {
                obj.iter()
                    .find(|(k, _)| SpectralIndex::from_column(k) == Some(index))
                    .and_then(|(_, v)| v.as_f64())
                    .with_context(|| format!("missing or non-numeric '{index}'"))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one row per year.
///   `Date,NDVI,NDWI,NDMI`
///   `2018,1,0.711013,0.3099`
fn load_csv(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let year_idx = headers
        .iter()
        .position(|h| is_year_column(h))
        .context("CSV missing 'Date' or 'Year' column")?;

    let mut index_cols = BTreeMap::new();
    for index in SpectralIndex::ALL {
        let pos = headers
            .iter()
            .position(|h| SpectralIndex::from_column(h) == Some(index))
            .with_context(|| format!("CSV missing '{index}' column"))?;
        index_cols.insert(index, pos);
    }

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let year_text = record.get(year_idx).unwrap_or("").trim();
        let year = match year_text.parse::<i32>() {
            Ok(y) => y,
            Err(_) => {
                let y = year_text
                    .parse::<f64>()
                    .with_context(|| format!("Row {row_no}: '{year_text}' is not a year"))?;
                year_from_f64(y, row_no)?
            }
        };

        let row = build_row(year, row_no, |index| {
            let tok = record.get(index_cols[&index]).unwrap_or("").trim();
            tok.parse::<f64>()
                .with_context(|| format!("'{tok}' is not a number"))
        })?;
        rows.push(row);
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one row per year.
///
/// Expected schema:
/// - `Date` or `Year`: Int32, Int64 or integral Float64
/// - `NDVI`, `NDWI`, `NDMI`: Float64 or Float32
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<Observation>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        rows.extend(rows_from_batch(&batch, rows.len())?);
    }
    Ok(rows)
}

fn rows_from_batch(batch: &RecordBatch, row_offset: usize) -> Result<Vec<Observation>> {
    let year_col = find_column(batch, is_year_column)
        .context("Parquet file missing 'Date' or 'Year' column")?;

    let mut index_cols = BTreeMap::new();
    for index in SpectralIndex::ALL {
        let col = find_column(batch, |name| SpectralIndex::from_column(name) == Some(index))
            .with_context(|| format!("Parquet file missing '{index}' column"))?;
        index_cols.insert(index, col);
    }

    (0..batch.num_rows())
        .map(|row| {
            let row_no = row_offset + row;
            let year = extract_year(year_col, row, row_no)?;
            build_row(year, row_no, |index| extract_f64(index_cols[&index], row))
        })
        .collect()
}

fn find_column<'a>(batch: &'a RecordBatch, matches: impl Fn(&str) -> bool) -> Option<&'a ArrayRef> {
    batch
        .schema()
        .fields()
        .iter()
        .position(|f| matches(f.name()))
        .map(|i| batch.column(i))
}

// -- Parquet / Arrow helpers --

fn extract_year(col: &ArrayRef, row: usize, row_no: usize) -> Result<i32> {
    if col.is_null(row) {
        bail!("Row {row_no}: null year");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            let v = arr.value(row);
            i32::try_from(v).with_context(|| format!("Row {row_no}: year {v} out of range"))
        }
        DataType::Float64 => year_from_f64(extract_f64(col, row)?, row_no),
        other => bail!("Year column has type {other:?}, expected an integer"),
    }
}

/// Extract a float cell; nulls become NaN and are rejected by table validation.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.value(row))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.value(row) as f64)
    } else {
        bail!("column type is {:?}, expected Float64 or Float32", col.data_type())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_with_date_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "site.csv",
            "Date,NDVI,NDWI,NDMI\n\
             2018,1,0.711013,0.3099\n\
             2021,1,0.626983,0.3027745\n\
             2022,0.665254,0.614526,0.295649\n\
             2023,0.64197,0.612952,0.285479\n\
             2024,0.702914,0.499578,0.269119\n",
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table, ObservationTable::peatland_site());
    }

    #[test]
    fn loads_json_and_sorts_by_year() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "site.json",
            r#"[
                {"Year": 2022, "ndvi": 0.5, "ndwi": 0.4, "ndmi": 0.3, "note": "x"},
                {"Year": 2020.0, "ndvi": 0.6, "ndwi": 0.5, "ndmi": 0.2}
            ]"#,
        );
        let table = load_file(&path).unwrap();
        assert_eq!(table.years(), vec![2020, 2022]);
        assert_eq!(table.column(SpectralIndex::Ndvi), vec![0.6, 0.5]);
    }

    #[test]
    fn rejects_duplicate_years() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "dup.csv",
            "Year,NDVI,NDWI,NDMI\n2020,0.1,0.2,0.3\n2020,0.4,0.5,0.6\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("2020"), "{err:#}");
    }

    #[test]
    fn rejects_missing_index_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "partial.csv", "Date,NDVI,NDWI\n2020,0.1,0.2\n");
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("NDMI"), "{err:#}");
    }

    #[test]
    fn rejects_non_numeric_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "bad.json",
            r#"[{"Date": 2020, "NDVI": "high", "NDWI": 0.2, "NDMI": 0.3}]"#,
        );
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn loads_parquet_with_int64_years_and_f32_values() {
        use arrow::array::Float32Array;
        use arrow::datatypes::{Field, Schema};
        use parquet::arrow::ArrowWriter;
        use std::sync::Arc;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Year", DataType::Int64, false),
            Field::new("NDVI", DataType::Float32, false),
            Field::new("NDWI", DataType::Float64, false),
            Field::new("NDMI", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2023, 2021])),
                Arc::new(Float32Array::from(vec![0.5_f32, 0.25])),
                Arc::new(Float64Array::from(vec![0.4, 0.3])),
                Arc::new(Float64Array::from(vec![0.2, 0.1])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.years(), vec![2021, 2023]);
        assert_eq!(table.column(SpectralIndex::Ndvi), vec![0.25, 0.5]);
        assert_eq!(table.column(SpectralIndex::Ndmi), vec![0.1, 0.2]);
    }

    #[test]
    fn rejects_nan_and_infinite_csv_cells() {
        let dir = tempfile::tempdir().unwrap();
        for (name, cell) in [("nan.csv", "NaN"), ("inf.csv", "inf"), ("neg_inf.csv", "-inf")] {
            let path = write_temp(
                &dir,
                name,
                &format!("Date,NDVI,NDWI,NDMI\n2020,0.6,0.5,0.3\n2021,0.7,{cell},0.2\n"),
            );
            let msg = format!("{:#}", load_file(&path).unwrap_err());
            assert!(msg.contains("2021"), "{cell}: {msg}");
            assert!(msg.contains("NDWI"), "{cell}: {msg}");
        }
    }

    #[test]
    fn rejects_null_parquet_cell() {
        use arrow::datatypes::{Field, Schema};
        use parquet::arrow::ArrowWriter;
        use std::sync::Arc;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Date", DataType::Int32, false),
            Field::new("NDVI", DataType::Float64, false),
            Field::new("NDWI", DataType::Float64, false),
            Field::new("NDMI", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int32Array::from(vec![2022, 2023])),
                Arc::new(Float64Array::from(vec![0.6, 0.7])),
                Arc::new(Float64Array::from(vec![0.5, 0.4])),
                Arc::new(Float64Array::from(vec![Some(0.3), None])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gap.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let msg = format!("{:#}", load_file(&path).unwrap_err());
        assert!(msg.contains("2023"), "{msg}");
        assert!(msg.contains("NDMI"), "{msg}");
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("table.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
