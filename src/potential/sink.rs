/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Destinations for the computed potential table
//!
//! Exporting `V(r)` is a diagnostic side channel. The evaluator works without
//! a sink; callers that want the table pass one in.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Receives the radius/potential pairs once they are computed
pub trait PotentialSink {
    /// Record the potential `v` on the radii `r` (both of the same length)
    fn record(&mut self, r: &[f64], v: &[f64]) -> io::Result<()>;
}

/// Writes a two-column `r  V(r)` text table
#[derive(Debug)]
pub struct TableSink<W: Write> {
    writer: W,
}

impl<W: Write> TableSink<W> {
    /// Write the table into any writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TableSink<BufWriter<File>> {
    /// Create (or truncate) a file to hold the table
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> PotentialSink for TableSink<W> {
    fn record(&mut self, r: &[f64], v: &[f64]) -> io::Result<()> {
        writeln!(self.writer, "#       r             V(r)")?;
        for (ri, vi) in r.iter().zip(v) {
            writeln!(self.writer, "{:16.8e} {:16.8e}", ri, vi)?;
        }
        self.writer.flush()
    }
}

/// Keeps the recorded pairs in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Recorded `(r, V(r))` pairs, in grid order
    pub table: Vec<(f64, f64)>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl PotentialSink for MemorySink {
    fn record(&mut self, r: &[f64], v: &[f64]) -> io::Result<()> {
        self.table = r.iter().copied().zip(v.iter().copied()).collect();
        Ok(())
    }
}
