//! Loading flight records from CSV.
//!
//! The expected layout is the `nycflights13::flights` export: a header row
//! naming the columns, in any order, followed by one flight per row. Rows
//! with an empty or `NA` field are cancelled flights and are skipped, as are
//! rows whose values do not parse.

mod error;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, info};

pub use error::IngestError;

use crate::domain::{AirportCode, CarrierCode, FlightRecord};

/// Columns a flights file must provide.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "year", "month", "day", "dep_time", "arr_time", "air_time", "carrier", "tailnum", "flight",
    "origin", "dest", "distance",
];

/// Row counts from one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    /// Rows with an empty or `NA` field.
    pub skipped_incomplete: usize,
    /// Rows with a value that failed to parse.
    pub skipped_malformed: usize,
}

/// Records and row counts from one load.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub records: Vec<FlightRecord>,
    pub report: LoadReport,
}

/// Load a flights CSV from disk.
pub fn load_path(path: impl AsRef<Path>) -> Result<Loaded, IngestError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let loaded = load_reader(file)?;
    info!(
        path = %path.display(),
        loaded = loaded.report.loaded,
        skipped_incomplete = loaded.report.skipped_incomplete,
        skipped_malformed = loaded.report.skipped_malformed,
        "Loaded flights"
    );
    Ok(loaded)
}

/// Load a flights CSV from any reader.
pub fn load_reader(reader: impl Read) -> Result<Loaded, IngestError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?;
    if headers.is_empty() {
        return Err(IngestError::Empty);
    }
    let columns = Columns::from_headers(headers)?;

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(error = %e, "Skipping unreadable row");
                report.skipped_malformed += 1;
                continue;
            }
        };

        if row.iter().any(|f| f.is_empty() || f.eq_ignore_ascii_case("NA")) {
            report.skipped_incomplete += 1;
            continue;
        }

        match columns.parse_row(&row) {
            Some(record) => {
                records.push(record);
                report.loaded += 1;
            }
            None => {
                let line = row.position().map(|p| p.line());
                debug!(?line, "Skipping malformed row");
                report.skipped_malformed += 1;
            }
        }
    }

    Ok(Loaded { records, report })
}

/// Positions of the required columns in the header row.
struct Columns {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, IngestError> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == column)
                .ok_or(IngestError::MissingColumn(column))?;
        }
        Ok(Self { positions })
    }

    fn field<'r>(&self, row: &'r StringRecord, column: &str) -> Option<&'r str> {
        let i = REQUIRED_COLUMNS.iter().position(|c| *c == column)?;
        row.get(self.positions[i])
    }

    fn parse_row(&self, row: &StringRecord) -> Option<FlightRecord> {
        let year: i32 = self.field(row, "year")?.parse().ok()?;
        let month: u32 = self.field(row, "month")?.parse().ok()?;
        let day: u32 = self.field(row, "day")?.parse().ok()?;
        let date = NaiveDate::from_ymd_opt(year, month, day)?;

        // A bad clock value leaves that time unknown rather than dropping the row.
        let dep_time = self.field(row, "dep_time").and_then(|s| s.parse().ok());
        let arr_time = self.field(row, "arr_time").and_then(|s| s.parse().ok());
        let air_time = self.field(row, "air_time").and_then(|s| s.parse().ok());

        let carrier = CarrierCode::parse(self.field(row, "carrier")?).ok()?;
        let flight_number: u32 = self.field(row, "flight")?.parse().ok()?;
        let origin = AirportCode::parse(self.field(row, "origin")?).ok()?;
        let destination = AirportCode::parse(self.field(row, "dest")?).ok()?;
        let distance: u32 = self.field(row, "distance")?.parse().ok()?;
        let tail_number = self.field(row, "tailnum")?;

        Some(
            FlightRecord::new(date, carrier, flight_number, origin, destination, distance)
                .with_schedule(dep_time, arr_time, air_time)
                .with_tail_number(tail_number),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const HEADER: &str = "year,month,day,dep_time,sched_dep_time,dep_delay,arr_time,sched_arr_time,arr_delay,carrier,flight,tailnum,origin,dest,air_time,distance,hour,minute,time_hour";

    fn load(body: &str) -> Result<Loaded, IngestError> {
        load_reader(Cursor::new(format!("{HEADER}\n{body}")))
    }

    #[test]
    fn loads_nycflights_rows() {
        let loaded = load(
            "2013,1,1,517,515,2,830,819,11,\"UA\",1545,\"N14228\",\"EWR\",\"IAH\",227,1400,5,15,\"2013-01-01 05:00:00\"\n\
             2013,1,1,533,529,4,850,830,20,\"UA\",1714,\"N24211\",\"LGA\",\"IAH\",227,1416,5,29,\"2013-01-01 05:00:00\"\n",
        )
        .unwrap();

        assert_eq!(loaded.report.loaded, 2);
        let first = &loaded.records[0];
        assert_eq!(first.carrier().as_str(), "UA");
        assert_eq!(first.flight_number(), 1545);
        assert_eq!(first.origin().as_str(), "EWR");
        assert_eq!(first.destination().as_str(), "IAH");
        assert_eq!(first.distance(), 1400);
        assert_eq!(first.tail_number(), Some("N14228"));
        assert_eq!(first.departure().unwrap().to_string(), "2013-01-01 05:17:00");
        assert_eq!(first.arrival().unwrap().to_string(), "2013-01-01 09:04:00");
    }

    #[test]
    fn skips_cancelled_rows() {
        let loaded = load(
            "2013,1,1,NA,1630,NA,NA,1815,NA,\"EV\",4308,\"N18120\",\"EWR\",\"RDU\",NA,416,16,30,\"2013-01-01 16:00:00\"\n\
             2013,1,1,,1630,,,1815,,EV,4308,N18120,EWR,RDU,,416,16,30,2013-01-01 16:00:00\n\
             2013,1,1,517,515,2,830,819,11,UA,1545,N14228,EWR,IAH,227,1400,5,15,2013-01-01 05:00:00\n",
        )
        .unwrap();

        assert_eq!(loaded.report.loaded, 1);
        assert_eq!(loaded.report.skipped_incomplete, 2);
        assert_eq!(loaded.report.skipped_malformed, 0);
    }

    #[test]
    fn skips_malformed_rows() {
        let loaded = load(
            "2013,2,30,517,515,2,830,819,11,UA,1545,N14228,EWR,IAH,227,1400,5,15,x\n\
             2013,1,1,517,515,2,830,819,11,ua,1545,N14228,EWR,IAH,227,1400,5,15,x\n\
             2013,1,1,517,515,2,830,819,11,UA,1545,N14228,NEWARK,IAH,227,1400,5,15,x\n\
             2013,1,1,517,515\n",
        )
        .unwrap();

        assert_eq!(loaded.report.loaded, 0);
        assert_eq!(loaded.report.skipped_malformed, 4);
    }

    #[test]
    fn quoted_fields_may_contain_commas() {
        let loaded = load(
            "2013,1,1,517,515,2,830,819,11,\"UA\",1545, N14228 ,EWR,IAH,227,1400,5,15,\"Jan 1, 2013\"\n",
        )
        .unwrap();

        assert_eq!(loaded.report.loaded, 1);
        assert_eq!(loaded.records[0].carrier().as_str(), "UA");
        assert_eq!(loaded.records[0].distance(), 1400);
        assert_eq!(loaded.records[0].tail_number(), Some("N14228"));
    }

    #[test]
    fn header_columns_in_any_order() {
        let csv = "dest,origin,distance,flight,tailnum,carrier,air_time,arr_time,dep_time,day,month,year\n\
                   BOS,JFK,187,1,N1,B6,38,700,600,2,1,2013\n";
        let loaded = load_reader(Cursor::new(csv)).unwrap();
        let record = &loaded.records[0];
        assert_eq!(record.origin().as_str(), "JFK");
        assert_eq!(record.destination().as_str(), "BOS");
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2013, 1, 2).unwrap());
    }

    #[test]
    fn missing_column_rejected() {
        let err = load_reader(Cursor::new("year,month,day\n2013,1,1\n")).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn("dep_time")));
    }

    #[test]
    fn empty_input_rejected() {
        let err = load_reader(Cursor::new("")).unwrap_err();
        assert!(matches!(err, IngestError::Empty));
    }

    #[test]
    fn blank_lines_ignored() {
        let loaded = load(
            "\n2013,1,1,517,515,2,830,819,11,UA,1545,N14228,EWR,IAH,227,1400,5,15,x\n\n",
        )
        .unwrap();
        assert_eq!(loaded.report, LoadReport {
            loaded: 1,
            skipped_incomplete: 0,
            skipped_malformed: 0,
        });
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(
            file,
            "2013,1,1,542,540,2,923,850,33,AA,1141,N619AA,JFK,MIA,160,1089,5,40,2013-01-01 05:00:00"
        )
        .unwrap();

        let loaded = load_path(file.path()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].carrier().as_str(), "AA");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_path(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io(_)));
    }
}
