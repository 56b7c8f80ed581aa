use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;

#[derive(Serialize, Debug)]
struct QueryRecord<'a> {
    script: &'a str,
    line: usize,
    op: &'static str,
    value: String,
    /// Seconds since the start of the run
    end: f32,
}

/// Records query results and timings, optionally into a CSV file
pub struct Report {
    writer: Option<csv::Writer<fs::File>>,
    start: Instant,
    operations: usize,
    queries: usize,
}

impl Report {
    pub fn new<P: AsRef<Path>>(csv_path: Option<P>) -> Result<Self, csv::Error> {
        let writer = match csv_path {
            Some(path) => Some(csv::Writer::from_path(path)?),
            None => None,
        };
        Ok(Self {
            writer,
            start: Instant::now(),
            operations: 0,
            queries: 0,
        })
    }

    /// Count an update
    pub fn update(&mut self) {
        self.operations += 1;
    }

    /// Count a query and write its result to the CSV file (if any)
    pub fn query(
        &mut self,
        script: &Path,
        line: usize,
        op: &'static str,
        value: &impl Display,
    ) -> Result<(), csv::Error> {
        self.operations += 1;
        self.queries += 1;
        if let Some(writer) = &mut self.writer {
            writer.serialize(QueryRecord {
                script: &script.to_string_lossy(),
                line,
                op,
                value: value.to_string(),
                end: self.start.elapsed().as_secs_f32(),
            })?;
        }
        Ok(())
    }

    pub fn operations(&self) -> usize {
        self.operations
    }

    pub fn queries(&self) -> usize {
        self.queries
    }

    pub fn elapsed_time(&self) -> Duration {
        self.start.elapsed()
    }

    /// Flush the CSV file
    pub fn finish(self) -> std::io::Result<()> {
        match self.writer {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}
