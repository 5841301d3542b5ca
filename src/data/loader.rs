use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns every launch table must provide. Anything else is ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

/// Structural problems with an input table.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: missing value in column '{column}'")]
    MissingValue { row: usize, column: &'static str },
    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: f64 },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; the launch columns may appear among any others
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field, numeric columns of any width
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = File::open(path).context("opening CSV file")?;
            read_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            read_json(&text)
        }
        "parquet" | "pq" => {
            let file = File::open(path).context("opening parquet file")?;
            read_parquet(file)
        }
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    dataset.with_context(|| format!("loading {}", path.display()))
}

// ---------------------------------------------------------------------------
// Row shape shared by the CSV and JSON readers
// ---------------------------------------------------------------------------

/// One row as it appears on disk, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    launch_site: Option<String>,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: Option<f64>,
    class: Option<f64>,
    #[serde(rename = "Booster Version Category")]
    booster_category: Option<String>,
}

impl RawRecord {
    fn validate(self, row: usize) -> Result<LaunchRecord, LoadError> {
        let missing = |column| LoadError::MissingValue { row, column };

        let launch_site = self
            .launch_site
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing(COL_LAUNCH_SITE))?;
        let payload_mass_kg = self.payload_mass_kg.ok_or_else(|| missing(COL_PAYLOAD_MASS))?;
        let class = self.class.ok_or_else(|| missing(COL_CLASS))?;
        let outcome =
            Outcome::from_class(class).ok_or(LoadError::InvalidClass { row, value: class })?;
        let booster_category = self
            .booster_category
            .filter(|s| !s.is_empty())
            .ok_or_else(|| missing(COL_BOOSTER_CATEGORY))?;

        Ok(LaunchRecord {
            launch_site,
            payload_mass_kg,
            outcome,
            booster_category,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read a CSV launch table. Columns are matched by header name.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column).into());
        }
    }

    let mut records = Vec::new();
    for (row, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row}"))?;
        records.push(raw.validate(row)?);
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Read a records-oriented JSON array (`df.to_json(orient='records')`).
pub fn read_json(text: &str) -> Result<LaunchDataset> {
    let rows: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON")?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(row, raw)| raw.validate(row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Read a Parquet launch table.
///
/// Numeric columns may be any integer or float width (as written by Pandas or
/// Polars); `class` may also be boolean. Everything is cast to `Float64` first.
pub fn read_parquet(file: File) -> Result<LaunchDataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();
        read_batch(&batch, offset, &mut records)?;
    }

    Ok(LaunchDataset::from_records(records))
}

fn read_batch(batch: &RecordBatch, offset: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let sites = column_as(batch, COL_LAUNCH_SITE, &DataType::Utf8)?;
    let payloads = column_as(batch, COL_PAYLOAD_MASS, &DataType::Float64)?;
    let classes = column_as(batch, COL_CLASS, &DataType::Float64)?;
    let boosters = column_as(batch, COL_BOOSTER_CATEGORY, &DataType::Utf8)?;

    let sites = sites.as_string::<i32>();
    let payloads = payloads.as_primitive::<Float64Type>();
    let classes = classes.as_primitive::<Float64Type>();
    let boosters = boosters.as_string::<i32>();

    for i in 0..batch.num_rows() {
        let row = offset + i;
        let raw = RawRecord {
            launch_site: sites.is_valid(i).then(|| sites.value(i).to_string()),
            payload_mass_kg: payloads.is_valid(i).then(|| payloads.value(i)),
            class: classes.is_valid(i).then(|| classes.value(i)),
            booster_category: boosters.is_valid(i).then(|| boosters.value(i).to_string()),
        };
        out.push(raw.validate(row)?);
    }
    Ok(())
}

/// Look up a column by name and cast it to `target`.
fn column_as(batch: &RecordBatch, name: &'static str, target: &DataType) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| LoadError::MissingColumn(name))?;
    cast(batch.column(idx), target).with_context(|| format!("column '{name}' has wrong type"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const CSV: &str = "\
,Flight Number,Launch Site,Mission Outcome,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,Success,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,Success,0,0.0,F9 v1.0  B0004,v1.0
2,3,VAFB SLC-4E,Success,1,500.0,F9 v1.1  B1003,v1.1
3,4,KSC LC-39A,Success,1,2490.0,F9 FT B1031.1,FT
";

    fn load_error(err: &anyhow::Error) -> Option<&LoadError> {
        err.chain().find_map(|e| e.downcast_ref::<LoadError>())
    }

    #[test]
    fn csv_reads_launch_columns_and_ignores_others() {
        let ds = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.payload_bounds(), Some((0.0, 2490.0)));

        let last = &ds.records()[3];
        assert_eq!(last.launch_site, "KSC LC-39A");
        assert_eq!(last.payload_mass_kg, 2490.0);
        assert_eq!(last.outcome, Outcome::Success);
        assert_eq!(last.booster_category, "FT");
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let csv = "Launch Site,class,Booster Version Category\nCCAFS LC-40,1,v1.0\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::MissingColumn(COL_PAYLOAD_MASS))
        );
    }

    #[test]
    fn csv_rejects_non_binary_class() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nCCAFS LC-40,100,3,v1.0\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::InvalidClass { row: 0, value: 3.0 })
        );
    }

    #[test]
    fn csv_rejects_empty_payload() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nCCAFS LC-40,,1,v1.0\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::MissingValue {
                row: 0,
                column: COL_PAYLOAD_MASS
            })
        );
    }

    #[test]
    fn csv_with_unparsable_payload_fails() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nCCAFS LC-40,heavy,1,v1.0\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn json_records_are_read() {
        let json = r#"[
            {"Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 2500, "class": 1, "Booster Version Category": "v1.0", "Flight Number": 7},
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600.0, "class": 0, "Booster Version Category": "FT"}
        ]"#;
        let ds = read_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].payload_mass_kg, 2500.0);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_missing_field_is_reported() {
        let json = r#"[{"Launch Site": "CCAFS LC-40", "class": 1, "Booster Version Category": "v1.0"}]"#;
        let err = read_json(json).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::MissingValue {
                row: 0,
                column: COL_PAYLOAD_MASS
            })
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert_eq!(
            load_error(&err),
            Some(&LoadError::UnsupportedExtension("xlsx".into()))
        );
    }

    #[test]
    fn parquet_columns_are_cast_and_read() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["CCAFS LC-40", "KSC LC-39A"])),
                Arc::new(Float64Array::from(vec![2500.0, 5300.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["v1.0", "FT"])),
            ],
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!(
            "spacex-dash-loader-{}.parquet",
            std::process::id()
        ));
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[1].outcome, Outcome::Failure);
        assert_eq!(ds.records()[1].payload_mass_kg, 5300.0);
        assert_eq!(ds.booster_categories(), ["v1.0", "FT"]);
    }
}
