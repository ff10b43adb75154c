//! Terminal text helpers: section headers, tagged status lines, and a
//! progress bar for long loops.
//!
//! Everything here writes plain lines to stdout except [`ProgressBar`],
//! which redraws itself on stderr so piped stdout stays clean.

use colored::Colorize;
use console::Term;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const FALLBACK_WIDTH: usize = 80;
const BAR_SLOTS: usize = 20;

/// The current terminal width in columns, or 80 when not attached to a
/// terminal.
pub fn terminal_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Build a header line: the trimmed title, surrounded by spaces, centered
/// in a rule of `fill` characters at the given width.
pub fn center_header_in(title: &str, fill: char, width: usize) -> String {
    let msg = format!(" {} ", title.trim());
    let msg_width = msg.width();
    if msg_width >= width {
        return msg;
    }

    let pad = width - msg_width;
    let left = pad / 2;
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat(fill).take(left));
    out.push_str(&msg);
    out.extend(std::iter::repeat(fill).take(pad - left));
    out
}

/// Print a header line sized to the terminal.
pub fn print_center_header(title: &str, fill: char) {
    println!("{}", center_header_in(title, fill, terminal_width()));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageLevel {
    fn label(&self) -> &'static str {
        match self {
            MessageLevel::Info => "INFO",
            MessageLevel::Success => "SUCCESS",
            MessageLevel::Warning => "WARNING",
            MessageLevel::Error => "ERROR",
        }
    }
}

/// Format a tagged status line: `[LEVEL][TAG] - msg`.
///
/// The tag is uppercased and bracketed unless it already carries brackets.
pub fn format_msg(level: MessageLevel, msg: &str, tag: Option<&str>) -> String {
    let tag = match tag {
        Some(t) => {
            let upper = t.to_uppercase();
            if upper.starts_with('[') {
                upper
            } else {
                format!("[{}]", upper)
            }
        }
        None => String::new(),
    };
    format!("[{}]{} - {}", level.label(), tag, msg)
}

/// Print a tagged status line, colored by level.
pub fn print_msg(level: MessageLevel, msg: &str, tag: Option<&str>) {
    let line = format_msg(level, msg, tag);
    match level {
        MessageLevel::Info => println!("{}", line.dimmed()),
        MessageLevel::Success => println!("{}", line.green()),
        MessageLevel::Warning => println!("{}", line.yellow()),
        MessageLevel::Error => println!("{}", line.red()),
    }
}

/// Print an `[ERROR]` status line.
pub fn print_error_msg(msg: &str, tag: Option<&str>) {
    print_msg(MessageLevel::Error, msg, tag);
}

/// A progress bar that redraws on stderr as a loop advances.
///
/// Wraps any iterator with a known length:
///
/// ```no_run
/// use pipekit::text::ProgressBar;
///
/// for frame in ProgressBar::new(0..240) {
///     let _ = frame;
/// }
/// ```
pub struct ProgressBar<I> {
    inner: I,
    total: usize,
    index: usize,
    started: Instant,
    last: Instant,
    iteration_time: Duration,
}

impl<I: ExactSizeIterator> ProgressBar<I> {
    pub fn new(inner: I) -> Self {
        let total = inner.len();
        let now = Instant::now();
        Self {
            inner,
            total,
            index: 0,
            started: now,
            last: now,
            iteration_time: Duration::ZERO,
        }
    }

    /// How many items have been yielded so far.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Time since the bar was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn draw(&self) {
        let percent = if self.total == 0 {
            1.0
        } else {
            self.index as f64 / self.total as f64
        };
        let filled = (BAR_SLOTS as f64 * percent) as usize;

        let mut bar = String::with_capacity(BAR_SLOTS * 3);
        for slot in 0..BAR_SLOTS {
            bar.push(if slot < filled { '█' } else { ' ' });
        }

        eprint!(
            "\r|{}| {:.2}% - Iteration time: {:.4} seconds",
            bar,
            percent * 100.0,
            self.iteration_time.as_secs_f64()
        );
        let _ = io::stderr().flush();
    }
}

impl<I: ExactSizeIterator> Iterator for ProgressBar<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.index += 1;

        let now = Instant::now();
        self.iteration_time = now.duration_since(self.last);
        self.last = now;

        self.draw();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
