//! Coverage Database.
//!
//! Device models record named coverage points while they evaluate. The
//! harness owns the database through the simulation context and writes it
//! to disk once, after the run has stopped.
//!
//! # File format
//!
//! ```text
//! # rtl-harness coverage v1
//! C 'counter.rising_edge' 50
//! C 'counter.wrap' 0
//! ```
//!
//! One line per point, sorted by name. Quotes and backslashes inside a point
//! name are escaped with a backslash.

use crate::common::{Result, SimError};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

const HEADER: &str = "# rtl-harness coverage v1";

/// Accumulated hit counts keyed by coverage point name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageDatabase {
    points: BTreeMap<String, u64>,
}

impl CoverageDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a point with zero hits so it appears in the output even
    /// if it is never reached.
    pub fn declare(&mut self, point: &str) {
        self.points.entry(point.to_string()).or_insert(0);
    }

    /// Records one hit on `point`.
    pub fn hit(&mut self, point: &str) {
        self.add(point, 1);
    }

    /// Records `count` hits on `point`, saturating at `u64::MAX`.
    pub fn add(&mut self, point: &str, count: u64) {
        let entry = self.points.entry(point.to_string()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Hit count of `point`, or `None` if it was never declared or hit.
    pub fn count(&self, point: &str) -> Option<u64> {
        self.points.get(point).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points with at least one hit.
    pub fn covered(&self) -> usize {
        self.points.values().filter(|&&c| c > 0).count()
    }

    /// Serializes the database in the text format described above.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", HEADER)?;
        for (point, count) in &self.points {
            writeln!(out, "C '{}' {}", escape(point), count)?;
        }
        out.flush()
    }

    /// Writes the database to `path`, replacing any existing file.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let wrap = |source| SimError::CoverageWrite {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(wrap)?;
        self.write_to(BufWriter::new(file)).map_err(wrap)?;
        debug!(
            "coverage written to {} ({} points, {} covered)",
            path.display(),
            self.len(),
            self.covered()
        );
        Ok(())
    }
}

fn escape(point: &str) -> String {
    let mut out = String::with_capacity(point.len());
    for c in point.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
