//! Terminal output formatting with colors
//!
//! Color is decided per destination stream: NO_COLOR disables it,
//! CLICOLOR_FORCE enables it, CLICOLOR=0 disables it, and otherwise the
//! stream itself must be a terminal. Explicit destinations are plain.

use std::env;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use colored::{Color, Colorize};

/// Default color for success messages.
pub const INFO_COLOR: Color = Color::Green;

/// Default color for error messages.
pub const ERR_COLOR: Color = Color::Red;

/// Whether output bound for a stream should carry ANSI colors.
pub fn use_color(is_terminal: bool) -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var_os("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }
    if env::var_os("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }
    is_terminal
}

/// Write `msg` plus a newline to `out`, in `color` when `styled`.
///
/// Write failures are ignored: a closed pipe must not turn a report into a crash.
pub fn secho(out: &mut dyn Write, msg: &(impl Display + ?Sized), color: Color, styled: bool) {
    let line = msg.to_string();
    let _ = if styled {
        writeln!(out, "{}", paint(&line, color))
    } else {
        writeln!(out, "{line}")
    };
}

// `colored` consults stdout only; the caller has already decided for its own stream.
fn paint(line: &str, color: Color) -> String {
    colored::control::set_override(true);
    let painted = line.color(color).to_string();
    colored::control::unset_override();
    painted
}

/// Print success message (green) to stdout
pub fn info(msg: &(impl Display + ?Sized)) {
    info_with(msg, INFO_COLOR, None);
}

/// Print message in `color` to `file`, or stdout when no destination is given
pub fn info_with(msg: &(impl Display + ?Sized), color: Color, file: Option<&mut dyn Write>) {
    match file {
        Some(out) => secho(out, msg, color, false),
        None => {
            let stdout = io::stdout();
            let styled = use_color(stdout.is_terminal());
            secho(&mut stdout.lock(), msg, color, styled)
        }
    }
}

/// Print error message (red) to stderr
pub fn err(msg: &(impl Display + ?Sized)) {
    err_with(msg, ERR_COLOR, None);
}

/// Print message in `color` to `file`, or stderr when no destination is given
pub fn err_with(msg: &(impl Display + ?Sized), color: Color, file: Option<&mut dyn Write>) {
    match file {
        Some(out) => secho(out, msg, color, false),
        None => {
            let stderr = io::stderr();
            let styled = use_color(stderr.is_terminal());
            secho(&mut stderr.lock(), msg, color, styled)
        }
    }
}
