use crate::core::trace::StepRecord;
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    Csv,
    Tsv,
    Json,
}

/// Step-by-step history of one computation, cleared on every reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvergenceTrace {
    records: Vec<StepRecord>,
}

impl ConvergenceTrace {
    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record)
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn latest(&self) -> Option<StepRecord> {
        self.records.last().copied()
    }
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }
    pub fn clear(&mut self) {
        self.records.clear()
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TraceFormat) -> Result<(), Error> {
        match fmt {
            TraceFormat::Csv => self.export_with_delimiter(path, ','),
            TraceFormat::Tsv => self.export_with_delimiter(path, '\t'),
            TraceFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        writeln!(w, "iteration{d}estimate{d}difference", d = delimiter)?;
        for r in &self.records {
            writeln!(
                w,
                "{}{d}{:.12}{d}{:.12}",
                r.iteration,
                r.estimate,
                r.difference,
                d = delimiter
            )?;
        }
        w.flush()
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &self.records)?;
        writeln!(w)?;
        w.flush()
    }
}
