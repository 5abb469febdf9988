//! Report: comma-delimited output, one header row followed by one row per result.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::metric::{CbrRow, ThroughputRow};

pub trait CsvRow {
    const HEADER: &'static str;

    fn fields(&self) -> Vec<String>;
}

impl CsvRow for CbrRow {
    const HEADER: &'static str = "Prodindex, CBR (%), half-full-CBR (%), is-half-full";

    fn fields(&self) -> Vec<String> {
        vec![
            self.prodindex.to_string(),
            self.cbr.to_string(),
            self.half_full_cbr.to_string(),
            u8::from(self.is_half_full()).to_string(),
        ]
    }
}

impl CsvRow for ThroughputRow {
    const HEADER: &'static str = "Sent first prodindex, Sent last prodindex, \
                                  Sender aggregate size (B), Successfully received \
                                  aggregate size (B), Throughput (bps)";

    fn fields(&self) -> Vec<String> {
        vec![
            self.first_prodindex.to_string(),
            self.last_prodindex.to_string(),
            self.sent_size.to_string(),
            self.complete_size.to_string(),
            self.throughput.to_string(),
        ]
    }
}

pub fn write_report<W: Write, R: CsvRow>(writer: W, rows: &[R]) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{}", R::HEADER)?;
    for row in rows {
        writeln!(writer, "{}", row.fields().join(","))?;
    }
    writer.flush()
}

/// Create (or truncate) `path` and write the report to it.
pub fn write_report_file<R: CsvRow>(path: &Path, rows: &[R]) -> Result<()> {
    let to_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    write_report(file, rows).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Metric;

    fn render<R: CsvRow>(rows: &[R]) -> String {
        let mut out = Vec::new();
        write_report(&mut out, rows).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cbr_report() {
        let rows = [
            CbrRow {
                prodindex: 3,
                cbr: Metric::Value(0.1),
                half_full_cbr: Metric::Value(0.25),
            },
            CbrRow {
                prodindex: 4,
                cbr: Metric::Undefined,
                half_full_cbr: Metric::Undefined,
            },
        ];
        assert_eq!(
            render(&rows),
            "Prodindex, CBR (%), half-full-CBR (%), is-half-full\n\
             3,0.1,0.25,1\n\
             4,-1,-1,0\n"
        );
    }

    #[test]
    fn test_throughput_report() {
        let rows = [ThroughputRow {
            first_prodindex: 0,
            last_prodindex: 1,
            sent_size: 250,
            complete_size: 100,
            throughput: Metric::Value(1600.0),
        }];
        assert_eq!(
            render(&rows),
            "Sent first prodindex, Sent last prodindex, Sender aggregate size (B), \
             Successfully received aggregate size (B), Throughput (bps)\n\
             0,1,250,100,1600.0\n"
        );
    }

    #[test]
    fn test_header_only_for_no_rows() {
        let rows: [CbrRow; 0] = [];
        assert_eq!(render(&rows), format!("{}\n", CbrRow::HEADER));
    }

    #[test]
    fn test_unwritable_path() {
        let rows: [CbrRow; 0] = [];
        let err = write_report_file(Path::new("/nonexistent/dir/out.csv"), &rows).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
