#![warn(missing_docs)]
//! Testing surfaces: recording render hosts, folder fixtures and a JSONL event sink.

mod fixtures;
mod hosts;

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use fixtures::*;
pub use hosts::*;

/// One line of a build event log.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, T: Serialize> {
    /// Position of the event in the stream.
    pub seq: u64,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Event body.
    pub payload: &'a T,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    next_seq: u64,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file, next_seq: 0 })
    }

    /// Append an event to the log, numbering it after the previous one.
    pub fn write<T: Serialize>(&mut self, kind: &str, payload: &T) -> Result<u64> {
        let seq = self.next_seq;
        let line = serde_json::to_string(&EventRecord { seq, kind, payload })?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.next_seq += 1;
        Ok(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_numbers_events() {
        let path = std::env::temp_dir().join(format!(
            "contentcraft-events-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut sink = JsonlSink::create(&path).expect("sink create");
        assert_eq!(sink.write("macro", &"site.folder.front").unwrap(), 0);
        assert_eq!(sink.write("macro", &"site.folder.back").unwrap(), 1);
        drop(sink);

        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["seq"], 1);
        assert_eq!(second["payload"], "site.folder.back");
    }
}
