//! File-backed market data for the command line.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use pricer_core::market_data::{HistoricalPriceSeries, MarketDataError, PriceHistoryProvider, PricePoint};
use pricer_core::types::Date;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{CliError, Result};

/// Raw CSV row; header names are matched case-insensitively for the
/// common spellings.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date", alias = "DATE")]
    date: String,
    #[serde(alias = "Close", alias = "CLOSE")]
    close: f64,
}

/// Price history read from a `date,close` CSV file with ISO dates.
///
/// The file holds a single underlying; the requested ticker is only logged.
/// Rows must be in ascending date order.
#[derive(Debug, Clone)]
pub struct CsvPriceHistory {
    path: PathBuf,
}

impl CsvPriceHistory {
    /// Wraps `path`, failing early if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Reads the whole file.
    pub fn load(&self) -> std::result::Result<HistoricalPriceSeries, MarketDataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(|e| provider_error(&self.path, e))?;

        let mut points = Vec::new();
        for (row_num, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result.map_err(|e| provider_error(&self.path, e))?;
            let date = Date::parse(&row.date).map_err(|e| {
                MarketDataError::Provider(format!(
                    "{}: row {}: {}",
                    self.path.display(),
                    row_num + 1,
                    e
                ))
            })?;
            points.push(PricePoint::new(date, row.close));
        }

        info!(path = %self.path.display(), rows = points.len(), "Loaded price history");
        HistoricalPriceSeries::new(points)
    }
}

fn provider_error(path: &Path, err: csv::Error) -> MarketDataError {
    MarketDataError::Provider(format!("{}: {}", path.display(), err))
}

impl PriceHistoryProvider for CsvPriceHistory {
    fn price_history(
        &self,
        ticker: &str,
        start: Date,
        end: Option<Date>,
    ) -> std::result::Result<HistoricalPriceSeries, MarketDataError> {
        debug!(ticker, path = %self.path.display(), %start, "Reading price history");
        Ok(self.load()?.between(start, end))
    }
}
