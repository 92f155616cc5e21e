//! Append-only CSV sink.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::rows::CsvRecord;
use crate::error::{Error, Result};

/// Writes a header and result rows to a sink, one line per call.
///
/// The sink sits behind a mutex so rows may be appended from several
/// threads; every line is flushed as soon as it is written.
///
/// # Examples
///
/// ```
/// use u_hyperheur::output::{AttemptRow, ResultWriter};
///
/// let writer = ResultWriter::in_memory();
/// writer.write_header(AttemptRow::HEADER).unwrap();
/// writer
///     .append(&AttemptRow { starting_fitness: 3.0, algorithm_index: 0, fitness: 2.0, iterations: 2 })
///     .unwrap();
/// let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert_eq!(text.lines().nth(1), Some("3,0,2,2"));
/// ```
pub struct ResultWriter<W: Write = BufWriter<File>> {
    path: PathBuf,
    sink: Mutex<W>,
}

impl ResultWriter {
    /// Opens `path` for appending, creating it if needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::io(&path, e))?;
        Ok(Self {
            path,
            sink: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl ResultWriter<Vec<u8>> {
    /// A writer collecting output in memory.
    pub fn in_memory() -> Self {
        Self::from_writer("<memory>", Vec::new())
    }
}

impl<W: Write> ResultWriter<W> {
    /// Wraps an arbitrary sink; `path` only labels errors.
    pub fn from_writer(path: impl Into<PathBuf>, sink: W) -> Self {
        Self {
            path: path.into(),
            sink: Mutex::new(sink),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_header<I, S>(&self, columns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let line = columns
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.write_line(&line)
    }

    pub fn append<R: CsvRecord>(&self, row: &R) -> Result<()> {
        self.write_line(&row.fields().join(","))
    }

    pub fn append_all<'a, R, I>(&self, rows: I) -> Result<()>
    where
        R: CsvRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        rows.into_iter().try_for_each(|row| self.append(row))
    }

    /// Returns the sink, flushed.
    pub fn into_inner(self) -> Result<W> {
        let mut sink = self.sink.into_inner().unwrap_or_else(PoisonError::into_inner);
        sink.flush().map_err(|e| Error::io(&self.path, e))?;
        Ok(sink)
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(sink, "{line}")
            .and_then(|_| sink.flush())
            .map_err(|e| Error::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RunRow;
    use std::io;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts writes but fails to flush.
    struct Unflushable;

    impl Write for Unflushable {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_header_then_rows() {
        let writer = ResultWriter::in_memory();
        writer.write_header(RunRow::header("algorithms")).unwrap();
        let row = RunRow {
            iteration: 0,
            problem_instance: 0,
            problem_seed: 1000,
            algorithm_seed: 1000,
            starting_fitness: 5.0,
            ensemble_number: 2,
            fitness: 4.0,
            runs: 3,
            label: "1;4".into(),
        };
        writer.append_all([&row, &row]).unwrap();

        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("iteration,problem instance"));
        assert!(lines[0].ends_with(",algorithms"));
        assert_eq!(lines[1], "0,0,1000,1000,5,2,4,3,1;4");
    }

    #[test]
    fn test_io_failure_is_reported_with_path() {
        let writer = ResultWriter::from_writer("out.csv", Broken);
        let err = writer.write_header(["a"]).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, PathBuf::from("out.csv")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_into_inner_reports_flush_failure() {
        let writer = ResultWriter::from_writer("late.csv", Unflushable);
        match writer.into_inner() {
            Err(Error::Io { path, .. }) => assert_eq!(path, PathBuf::from("late.csv")),
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("flush failure was swallowed"),
        }
    }

    #[test]
    fn test_create_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        {
            let writer = ResultWriter::create(&path).unwrap();
            writer.write_header(["x"]).unwrap();
        }
        {
            let writer = ResultWriter::create(&path).unwrap();
            writer.write_header(["y"]).unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x\ny\n");
    }
}
