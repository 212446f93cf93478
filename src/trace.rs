// Decision trace logging
//
// When enabled, every accepted decision is written as one JSON line so a run
// can be inspected after the fact. Writes are synchronous through a buffered
// writer: the whole program is single-threaded by design, so there is no
// request cycle to keep unblocked.

use log::error;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::bot::Decision;
use crate::types::Coord;

/// One tick's planning snapshot
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TraceRecord {
    pub turn: u64,
    pub head: Coord,
    pub snake_len: usize,
    pub goal: Coord,
    pub policy: String,
    pub offset: usize,
    pub path_len: usize,
    pub reachable_fraction: f32,
    pub chosen_move: String,
    pub timestamp: String,
}

impl TraceRecord {
    /// Builds a record from an accepted decision and the game context
    pub fn from_decision(turn: u64, head: Coord, snake_len: usize, decision: &Decision) -> Self {
        TraceRecord {
            turn,
            head,
            snake_len,
            goal: decision.goal,
            policy: decision.policy.as_str().to_string(),
            offset: decision.offset,
            path_len: decision.path_len,
            reachable_fraction: decision.reachable_fraction,
            chosen_move: decision.direction.as_str().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Appends trace records to a JSONL file, or does nothing when disabled
pub struct TraceLogger {
    writer: Option<BufWriter<File>>,
}

impl TraceLogger {
    /// Creates a new trace logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return TraceLogger { writer: None };
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Trace logging enabled: {}", log_file_path);
                TraceLogger {
                    writer: Some(BufWriter::new(file)),
                }
            }
            Err(e) => {
                error!("Failed to create trace file '{}': {}", log_file_path, e);
                TraceLogger { writer: None }
            }
        }
    }

    /// Creates a disabled trace logger (no-op)
    pub fn disabled() -> Self {
        TraceLogger { writer: None }
    }

    /// Writes one record as a JSON line and flushes it to disk
    pub fn log_tick(&mut self, record: &TraceRecord) {
        let writer = match self.writer.as_mut() {
            Some(writer) => writer,
            None => return,
        };

        match serde_json::to_string(record) {
            Ok(json_line) => {
                if let Err(e) = writeln!(writer, "{}", json_line) {
                    error!("Failed to write trace record: {}", e);
                } else if let Err(e) = writer.flush() {
                    error!("Failed to flush trace file: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize trace record: {}", e);
            }
        }
    }
}

/// Parses a JSONL trace file back into records, skipping blank lines.
/// Used by the analysis tests to verify what a run actually decided.
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceRecord>, String> {
    let file = File::open(path.as_ref())
        .map_err(|e| format!("Failed to open trace file: {}", e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Failed to read trace line: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: TraceRecord = serde_json::from_str(&line)
            .map_err(|e| format!("Malformed trace record on line {}: {}", line_number + 1, e))?;
        records.push(record);
    }
    Ok(records)
}
