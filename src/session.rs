//! Line-oriented interactive session.
//!
//! Reads one command per line, feeds it to the [`TriageEngine`] and reports the
//! outcome. Errors from individual decisions are shown and the session carries
//! on; only I/O failures on the terminal itself end it early.

use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

use crate::errors::{DecisionError, UndoError};
use crate::fs_ops::FileMover;
use crate::output::Painter;
use crate::shutdown;
use crate::triage::{Direction, TriageEngine, TriageState};

const HELP: &str = "\
keys: l = move left, r = move right, s = skip, u = undo, p = progress, ? = help, q = quit";

/// One operator instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Classify(Direction),
    Skip,
    Undo,
    Progress,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse a line of input. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim();
        if word.is_empty() {
            return None;
        }
        let cmd = match word.to_ascii_lowercase().as_str() {
            "l" | "left" | "h" | "a" => Command::Classify(Direction::Left),
            "r" | "right" | "d" => Command::Classify(Direction::Right),
            "s" | "skip" | "j" | "down" => Command::Skip,
            "u" | "undo" | "space" | "z" => Command::Undo,
            "p" | "progress" => Command::Progress,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" | "esc" => Command::Quit,
            _ => Command::Unknown(word.to_string()),
        };
        Some(cmd)
    }
}

/// What happened during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Images currently sitting in the left directory because of this session.
    pub left: usize,
    /// Images currently sitting in the right directory because of this session.
    pub right: usize,
    pub skipped: usize,
    pub undone: usize,
    /// Rejected moves and failed undos.
    pub errors: usize,
    pub processed: usize,
    pub total: usize,
    /// True if the operator quit (or input ended) before the engine finished.
    pub stopped_early: bool,
}

/// Drive `engine` from `input` until it is finished, the operator quits, input
/// ends, or a shutdown is requested.
pub fn run_session<M, R, W>(
    engine: &mut TriageEngine<M>,
    input: R,
    out: &mut W,
    painter: Painter,
) -> io::Result<SessionSummary>
where
    M: FileMover,
    R: BufRead,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();
    let mut announced_drained = false;

    writeln!(out, "{}", painter.info(HELP))?;

    loop {
        if shutdown::is_requested() {
            writeln!(out, "{}", painter.warn("interrupted; stopping"))?;
            summary.stopped_early = true;
            break;
        }
        match engine.state() {
            TriageState::Exhausted => break,
            TriageState::Loading => {
                let p = engine.progress();
                if let Some(item) = engine.current_item() {
                    let name = item
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| item.display().to_string());
                    // Removed or renamed by something else since the scan.
                    if item.symlink_metadata().is_err() {
                        warn!(path = %item.display(), "Image no longer in source directory; skipping");
                        writeln!(out, "{}", painter.warn(&format!("{name} is gone; skipped")))?;
                        let _ = engine.skip();
                        summary.skipped += 1;
                        continue;
                    }
                    writeln!(out, "[{}/{}] {}", p.processed + 1, p.total, name)?;
                }
                engine.mark_loaded();
                announced_drained = false;
            }
            TriageState::Drained if !announced_drained => {
                writeln!(
                    out,
                    "{}",
                    painter.info("All images processed. 'u' to undo, 'q' to quit.")
                )?;
                announced_drained = true;
            }
            TriageState::Ready | TriageState::Drained => {}
        }

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            summary.stopped_early = !engine.is_finished();
            break;
        };
        let line = line?;
        let Some(cmd) = Command::parse(&line) else {
            continue;
        };
        debug!(?cmd, "command");
        let _busy = shutdown::busy();

        match cmd {
            Command::Classify(direction) => {
                let evicted_before = engine.progress().evicted;
                match engine.classify(direction) {
                    Ok(record) => {
                        match direction {
                            Direction::Left => summary.left += 1,
                            Direction::Right => summary.right += 1,
                        }
                        writeln!(
                            out,
                            "{} {}",
                            painter.direction(direction),
                            record.destination_path.display()
                        )?;
                        if engine.progress().evicted > evicted_before {
                            writeln!(
                                out,
                                "{}",
                                painter.warn("undo history full; the oldest move can no longer be undone")
                            )?;
                        }
                    }
                    Err(DecisionError::Exhausted) => {
                        writeln!(out, "{}", painter.info("nothing left to sort"))?;
                    }
                    Err(DecisionError::Move(e)) => {
                        summary.errors += 1;
                        writeln!(out, "{}", painter.error(&e.to_string()))?;
                    }
                }
            }
            Command::Skip => match engine.skip() {
                Ok(()) => summary.skipped += 1,
                Err(_) => writeln!(out, "{}", painter.info("nothing left to skip"))?,
            },
            Command::Undo => match engine.undo() {
                Ok(record) => {
                    summary.undone += 1;
                    match record.direction {
                        Direction::Left => summary.left = summary.left.saturating_sub(1),
                        Direction::Right => summary.right = summary.right.saturating_sub(1),
                    }
                    writeln!(
                        out,
                        "{}",
                        painter.success(&format!("restored {}", record.original_path.display()))
                    )?;
                }
                Err(UndoError::HistoryEmpty) => {
                    writeln!(out, "{}", painter.info("nothing to undo"))?;
                }
                Err(e @ UndoError::RenameFailed(_)) => {
                    summary.errors += 1;
                    warn!(error = %e, "Undo failed; record kept");
                    writeln!(out, "{}", painter.error(&format!("{e}; try again or fix and retry")))?;
                }
            },
            Command::Progress => {
                let p = engine.progress();
                writeln!(
                    out,
                    "{}",
                    painter.info(&format!(
                        "{}/{} processed, {} remaining, {}/{} undo slots used, {} moves past undo",
                        p.processed,
                        p.total,
                        p.remaining(),
                        p.history_len,
                        p.history_capacity,
                        p.evicted
                    ))
                )?;
            }
            Command::Help => writeln!(out, "{}", painter.info(HELP))?,
            Command::Quit => {
                summary.stopped_early = !engine.is_finished();
                break;
            }
            Command::Unknown(word) => {
                writeln!(out, "{}", painter.warn(&format!("unknown command '{word}'; press ? for help")))?;
            }
        }
    }

    let p = engine.progress();
    summary.processed = p.processed;
    summary.total = p.total;
    if p.total > 0 && p.processed == p.total {
        writeln!(out, "All images have been processed!")?;
    }
    Ok(summary)
}
