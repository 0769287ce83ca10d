//! Durable append-only history log
//!
//! CSV with a header row and one row per round:
//!
//! ```text
//! Round,PlayerMove,AIMove,PlayerDamage,AIDamage,PlayerMPUsed,AIMPUsed
//! 1,1,3,14,0,10,0
//! ```
//!
//! Moves use their 1-based codes. A missing or empty file reads as an empty
//! history. Rows are only ever appended.

use nom::character::complete::{char, space0, u32 as field};
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::{IResult, Parser};
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::core::{ArenaError, Move, Result};
use crate::history::HistoryRecord;

pub const HEADER: [&str; 7] = [
    "Round",
    "PlayerMove",
    "AIMove",
    "PlayerDamage",
    "AIDamage",
    "PlayerMPUsed",
    "AIMPUsed",
];

#[derive(Debug, Clone)]
pub struct DurableLog {
    path: PathBuf,
}

impl DurableLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record; a missing file is an empty history
    pub fn load(&self) -> Result<Vec<HistoryRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => parse_log(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Append one row, writing the header first if the file is new or empty
    ///
    /// A file whose last line lacks its newline gets one before the row, so
    /// the previous row is never extended.
    pub fn append(&self, record: &HistoryRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut out = String::new();
        if file.metadata()?.len() == 0 {
            out.push_str(&HEADER.join(","));
            out.push('\n');
        } else {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                out.push('\n');
            }
        }
        out.push_str(&format_row(record));
        out.push('\n');

        file.write_all(out.as_bytes())?;
        file.flush()
    }
}

/// Serialize one record as a CSV row (no trailing newline)
pub fn format_row(record: &HistoryRecord) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        record.round,
        record.player_move.code(),
        record.opponent_move.code(),
        record.player_damage,
        record.opponent_damage,
        record.player_resource_used,
        record.opponent_resource_used,
    )
}

/// Parse the full contents of a log file
pub fn parse_log(contents: &str) -> Result<Vec<HistoryRecord>> {
    let mut records = Vec::new();
    let mut saw_header = false;

    for (idx, raw) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if !saw_header {
            if !is_header(line) {
                return Err(ArenaError::LogFormat {
                    line: line_no,
                    reason: format!("expected header '{}'", HEADER.join(",")),
                });
            }
            saw_header = true;
            continue;
        }

        records.push(parse_row(line, line_no)?);
    }

    Ok(records)
}

fn is_header(line: &str) -> bool {
    line.split(',').map(str::trim).eq(HEADER.iter().copied())
}

fn row_fields(line: &str) -> IResult<&str, Vec<u32>> {
    all_consuming(separated_list1(char(','), delimited(space0, field, space0))).parse(line)
}

fn parse_row(line: &str, line_no: usize) -> Result<HistoryRecord> {
    let bad = |reason: String| ArenaError::LogFormat {
        line: line_no,
        reason,
    };

    let (_, fields) = row_fields(line).map_err(|e| bad(format!("unparseable row: {}", e)))?;
    if fields.len() != HEADER.len() {
        return Err(bad(format!(
            "expected {} columns, found {}",
            HEADER.len(),
            fields.len()
        )));
    }

    let decode = |code: u32| Move::from_code(code).ok_or_else(|| bad(format!("unknown move code {}", code)));

    Ok(HistoryRecord {
        round: fields[0],
        player_move: decode(fields[1])?,
        opponent_move: decode(fields[2])?,
        player_damage: fields[3],
        opponent_damage: fields[4],
        player_resource_used: fields[5],
        opponent_resource_used: fields[6],
    })
}
