//! User-facing message formatting.
//! Colored prefixes (`info:`, `warn:`, `error:`, `ok:`) when stdout is a TTY,
//! plain text otherwise so piped output stays greppable.

use owo_colors::OwoColorize;

use crate::triage::Direction;

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    /// Color only when stdout is a terminal.
    pub fn detect() -> Self {
        Self {
            color: atty::is(atty::Stream::Stdout),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn info(&self, msg: &str) -> String {
        if self.color {
            format!("{} {}", "info:".cyan().bold(), msg)
        } else {
            format!("info: {}", msg)
        }
    }

    pub fn warn(&self, msg: &str) -> String {
        if self.color {
            format!("{} {}", "warn:".yellow().bold(), msg)
        } else {
            format!("warn: {}", msg)
        }
    }

    pub fn error(&self, msg: &str) -> String {
        if self.color {
            format!("{} {}", "error:".red().bold(), msg)
        } else {
            format!("error: {}", msg)
        }
    }

    pub fn success(&self, msg: &str) -> String {
        if self.color {
            format!("{} {}", "ok:".green().bold(), msg)
        } else {
            format!("ok: {}", msg)
        }
    }

    /// Direction label in the colors of the on-screen arrows (left red, right green).
    pub fn direction(&self, d: Direction) -> String {
        match (self.color, d) {
            (true, Direction::Left) => "<- LEFT".red().to_string(),
            (true, Direction::Right) => "RIGHT ->".green().to_string(),
            (false, Direction::Left) => "<- LEFT".to_string(),
            (false, Direction::Right) => "RIGHT ->".to_string(),
        }
    }
}

pub fn print_info(msg: &str) {
    println!("{}", Painter::detect().info(msg));
}

pub fn print_warn(msg: &str) {
    eprintln!("{}", Painter::detect().warn(msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", Painter::detect().error(msg));
}

pub fn print_success(msg: &str) {
    println!("{}", Painter::detect().success(msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_painter_has_no_escape_codes() {
        let p = Painter::plain();
        assert_eq!(p.error("boom"), "error: boom");
        assert_eq!(p.direction(Direction::Right), "RIGHT ->");
        assert!(!p.info("x").contains('\u{1b}'));
    }
}
