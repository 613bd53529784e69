//! Tournament results reporting
//!
//! Renders the score and streak matrices as console tables and as
//! comma-delimited text. Consumes only the ordered name list and matrices.

use anyhow::{Context, Result};
use match_logic::{MatchReplay, Matrix, Move, Standing, TournamentResult};
use std::fmt::{Display, Write as _};
use std::fs;
use std::path::Path;

const LABEL_WIDTH: usize = 15;
const CELL_WIDTH: usize = 10;

/// Console table: blank corner, names as right-aligned column headers, one
/// line per row strategy
pub fn format_table<T: Copy + Display>(
    title: &str,
    names: &[String],
    matrix: &Matrix<T>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    let _ = write!(out, "{:>LABEL_WIDTH$}", "");
    for name in names {
        let _ = write!(out, "{:>CELL_WIDTH$}", name);
    }
    out.push('\n');

    for (name, row) in names.iter().zip(matrix.rows()) {
        let _ = write!(out, "{:>LABEL_WIDTH$}", name);
        for value in row {
            let _ = write!(out, "{:>CELL_WIDTH$}", value);
        }
        out.push('\n');
    }
    out
}

/// Delimited text: header `,name1,name2,...` then `name,v0,v1,...` per row
pub fn format_csv<T: Copy + Display>(names: &[String], matrix: &Matrix<T>) -> String {
    let mut out = String::new();
    out.push(',');
    out.push_str(&names.join(","));
    out.push('\n');

    for (name, row) in names.iter().zip(matrix.rows()) {
        out.push_str(name);
        for value in row {
            let _ = write!(out, ",{}", value);
        }
        out.push('\n');
    }
    out
}

pub fn write_csv<T: Copy + Display>(
    path: &Path,
    names: &[String],
    matrix: &Matrix<T>,
) -> Result<()> {
    fs::write(path, format_csv(names, matrix))
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Write `scores.csv` and `streaks.csv` into `dir`, creating it if needed
pub fn write_matrices(dir: &Path, result: &TournamentResult) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    write_csv(&dir.join("scores.csv"), &result.names, &result.scores)?;
    write_csv(&dir.join("streaks.csv"), &result.names, &result.streaks)?;
    Ok(())
}

/// Save the whole result as pretty JSON
pub fn write_json(path: &Path, result: &TournamentResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("failed to serialize results")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn format_standings(standings: &[Standing]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5}{:<LABEL_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}",
        "#", "Strategy", "Score", "Streak"
    );
    let _ = writeln!(out, "{}", "-".repeat(5 + LABEL_WIDTH + 2 * CELL_WIDTH));
    for (rank, s) in standings.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<5}{:<LABEL_WIDTH$}{:>CELL_WIDTH$}{:>CELL_WIDTH$}",
            rank + 1,
            s.name,
            s.total_score,
            s.longest_streak
        );
    }
    out
}

/// Full text report for a tournament run
pub fn format_report(result: &TournamentResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Iterated Prisoner's Dilemma, {} rounds per match\n", result.rounds);
    out.push_str(&format_table("Score matrix (row player)", &result.names, &result.scores));
    out.push('\n');
    out.push_str(&format_table("Longest dominance streak", &result.names, &result.streaks));
    out.push('\n');
    out.push_str("Standings\n");
    out.push_str(&format_standings(&result.standings()));
    out
}

fn move_symbol(m: Move) -> char {
    match m {
        Move::Cooperate => 'C',
        Move::Defect => 'D',
    }
}

/// Round-by-round listing of one match
pub fn format_replay(replay: &MatchReplay) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (row) vs {} (column)", replay.row, replay.column);
    let _ = writeln!(
        out,
        "{:>6}{:>5}{:>5}{:>8}{:>8}{:>8}",
        "round", "row", "col", "score", "total", "streak"
    );
    for r in &replay.rounds {
        let _ = writeln!(
            out,
            "{:>6}{:>5}{:>5}{:>8}{:>8}{:>8}",
            r.round,
            move_symbol(r.row_move),
            move_symbol(r.column_move),
            format!("{}:{}", r.row_score, r.column_score),
            format!("{}:{}", r.cumulative_row, r.cumulative_column),
            r.streak
        );
    }
    let _ = writeln!(
        out,
        "final {} : {}, longest dominance streak {}",
        replay.result.row_score, replay.result.column_score, replay.result.longest_dominance_streak
    );
    out
}
