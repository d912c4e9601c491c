//! Parquet output for reduced tables.

use crate::config::{PressureTarget, RunConfig};
use crate::constants::columns;
use crate::error::Result;
use crate::models::OutputRow;
use polars::prelude::{
    Column, DataFrame, ParquetCompression, ParquetWriter, StatisticsOptions,
};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Writes one table per derived variable, named
/// `{variable}_{year}_{month}_{roi values}.parquet`.
#[derive(Debug)]
pub struct TableWriter {
    config: Arc<RunConfig>,
}

impl TableWriter {
    pub fn new(config: Arc<RunConfig>) -> Self {
        Self { config }
    }

    /// Write `rows` as the table for `variable`; returns the output path.
    pub fn write_table(&self, rows: &[OutputRow], variable: &str) -> Result<PathBuf> {
        let mut frame = self.build_frame(rows, variable)?;
        let path = self.config.output_path(variable);

        let file = File::create(&path)?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .with_statistics(StatisticsOptions::full())
            .finish(&mut frame)?;

        info!("wrote {} rows to {}", frame.height(), path.display());
        Ok(path)
    }

    /// Assemble the output frame in table order. The run-constant region
    /// of interest materializes as one column (single-level runs) or a
    /// shallow/deep pair (integral runs).
    fn build_frame(&self, rows: &[OutputRow], variable: &str) -> Result<DataFrame> {
        let n = rows.len();
        let gather = |f: fn(&OutputRow) -> f64| -> Vec<f64> { rows.iter().map(f).collect() };

        let mut table_columns = vec![
            Column::new(columns::JULIAN_DAY.into(), gather(|r| r.julian_day)),
            Column::new(columns::LONGITUDE.into(), gather(|r| r.longitude)),
            Column::new(columns::LATITUDE.into(), gather(|r| r.latitude)),
            Column::new(
                columns::MONTH.into(),
                rows.iter().map(|r| r.month as i32).collect::<Vec<i32>>(),
            ),
        ];

        match self.config.target {
            PressureTarget::Level(level) => {
                table_columns.push(Column::new(
                    columns::INTERPOLATED_PRESSURE.into(),
                    vec![level; n],
                ));
            }
            PressureTarget::Range { shallow, deep } => {
                table_columns.push(Column::new(
                    columns::PRESSURE_RANGE_SHALLOW.into(),
                    vec![shallow; n],
                ));
                table_columns.push(Column::new(
                    columns::PRESSURE_RANGE_DEEP.into(),
                    vec![deep; n],
                ));
            }
        }

        table_columns.push(Column::new(variable.into(), gather(|r| r.value)));
        table_columns.push(Column::new(
            columns::YEAR.into(),
            rows.iter().map(|r| r.year).collect::<Vec<i32>>(),
        ));
        table_columns.push(Column::new(
            columns::CYCLE_NUMBER.into(),
            gather(|r| r.cycle_number),
        ));
        table_columns.push(Column::new(columns::FLOAT_ID.into(), gather(|r| r.float_id)));

        Ok(DataFrame::new(table_columns)?)
    }
}
