//! Run statistics collection and reporting.
//!
//! Tracks how far a run got (ticks, clock cycles, simulated time) and how
//! long it took on the host, and reports it either as a text summary or as
//! a JSON document.

use crate::common::{Result, TimeUnit};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Statistics for one simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    #[serde(skip)]
    start_time: Instant,
    pub model: String,
    pub ticks: u64,
    pub cycles: u64,
    pub sim_time: u64,
    pub time_unit: &'static str,
    pub finished: bool,
    pub host_seconds: f64,
    pub coverage_points: usize,
    pub coverage_covered: usize,
}

impl RunStats {
    pub fn new(model: &str, time_unit: TimeUnit) -> Self {
        Self {
            start_time: Instant::now(),
            model: model.to_string(),
            ticks: 0,
            cycles: 0,
            sim_time: 0,
            time_unit: time_unit.suffix(),
            finished: false,
            host_seconds: 0.0,
            coverage_points: 0,
            coverage_covered: 0,
        }
    }

    /// Freezes the host wall-clock measurement.
    pub fn stop_timer(&mut self) {
        self.host_seconds = self.start_time.elapsed().as_secs_f64();
    }

    /// Prints a formatted summary of the run.
    pub fn print(&self) {
        let seconds = if self.host_seconds > 0.0 {
            self.host_seconds
        } else {
            self.start_time.elapsed().as_secs_f64()
        };
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };

        println!("\n==========================================================");
        println!("SIMULATION STATISTICS");
        println!("==========================================================");
        println!("model                    {}", self.model);
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_ticks                {}", self.ticks);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_time                 {}{}", self.sim_time, self.time_unit);
        println!("sim_freq                 {:.2} kHz", khz);
        println!(
            "finished                 {}",
            if self.finished { "yes" } else { "no" }
        );
        if self.coverage_points > 0 {
            println!("----------------------------------------------------------");
            println!("COVERAGE");
            let pct = (self.coverage_covered as f64 / self.coverage_points as f64) * 100.0;
            println!("  points                 {}", self.coverage_points);
            println!(
                "  covered                {} ({:.2}%)",
                self.coverage_covered, pct
            );
        }
        println!("==========================================================");
    }

    /// Writes the statistics as pretty-printed JSON to `path`.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self).map_err(std::io::Error::from)?;
        writer.flush()?;
        Ok(())
    }
}
