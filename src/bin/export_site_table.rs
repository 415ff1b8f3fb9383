use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use peatland_monitor::data::model::{ObservationTable, SpectralIndex};

/// Write the built-in site table as Parquet so it can be edited and re-opened.
///
/// Usage: `export_site_table [OUTPUT]` (default `site_table.parquet`).
fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("site_table.parquet"));

    let table = ObservationTable::peatland_site();

    let mut fields = vec![Field::new("Date", DataType::Int32, false)];
    fields.extend(
        SpectralIndex::ALL
            .iter()
            .map(|idx| Field::new(idx.label(), DataType::Float64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<Arc<dyn arrow::array::Array>> =
        vec![Arc::new(Int32Array::from(table.years()))];
    for idx in SpectralIndex::ALL {
        columns.push(Arc::new(Float64Array::from(table.column(idx))));
    }

    let batch = RecordBatch::try_new(schema.clone(), columns)
        .context("building record batch")?;

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    log::info!("Wrote {} observations to {}", table.row_count(), output_path.display());
    println!(
        "Wrote {} observations ({} indices each) to {}",
        table.row_count(),
        SpectralIndex::ALL.len(),
        output_path.display()
    );
    Ok(())
}
