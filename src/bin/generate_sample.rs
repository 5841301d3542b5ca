use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One row in the column layout of the public launch dataset.
#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "Mission Outcome")]
    mission_outcome: String,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

/// Deterministic splitmix64 stream, so every run writes the same table.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Booster eras in flight order: (category, version prefix, flights, success rate, max payload).
const ERAS: [(&str, &str, usize, f64, f64); 5] = [
    ("v1.0", "F9 v1.0", 5, 0.0, 700.0),
    ("v1.1", "F9 v1.1", 15, 0.2, 4500.0),
    ("FT", "F9 FT", 24, 0.65, 6500.0),
    ("B4", "F9 B4", 11, 0.6, 9600.0),
    ("B5", "F9 B5", 1, 1.0, 3700.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn generate(rng: &mut SplitMix) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut flight_number = 1;

    for (era_idx, &(category, prefix, flights, success_rate, max_payload)) in
        ERAS.iter().enumerate()
    {
        for n in 0..flights {
            // Early flights all left from LC-40; later eras spread across sites.
            let site = if era_idx == 0 {
                SITES[0]
            } else {
                SITES[(rng.next_u64() % SITES.len() as u64) as usize]
            };
            let payload = (rng.next_f64() * max_payload).round();
            let class = i64::from(rng.next_f64() < success_rate);

            rows.push(Row {
                flight_number,
                launch_site: site.to_string(),
                mission_outcome: "Success".to_string(),
                class,
                payload_mass_kg: payload,
                booster_version: format!("{prefix} B{}", 1000 + era_idx * 20 + n),
                booster_category: category.to_string(),
            });
            flight_number += 1;
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn string_column<'a>(rows: &'a [Row], f: impl Fn(&'a Row) -> &'a str) -> ArrayRef {
    Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("Mission Outcome", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
        string_column(rows, |r| r.launch_site.as_str()),
        string_column(rows, |r| r.mission_outcome.as_str()),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
        Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.payload_mass_kg),
        )),
        string_column(rows, |r| r.booster_version.as_str()),
        string_column(rows, |r| r.booster_category.as_str()),
    ];
    let batch =
        RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "spacex_launch_dash.csv".to_string()),
    );

    let rows = generate(&mut SplitMix(42));

    let is_parquet = output_path
        .extension()
        .is_some_and(|e| e == "parquet" || e == "pq");
    if is_parquet {
        write_parquet(&output_path, &rows)?;
    } else {
        write_csv(&output_path, &rows)?;
    }

    println!("Wrote {} launches to {}", rows.len(), output_path.display());
    Ok(())
}
