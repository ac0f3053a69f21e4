// Copyright (C) 2024-2026 The Rillc Team
// This file is part of the rillc library.

// The rillc library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The rillc library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the rillc library. If not, see <https://www.gnu.org/licenses/>.

use colored::{Color, Colorize};
use rillc_span::{LocKind, SourceLocId, SourceMap};
use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Severity of a single diagnostic. Ordered so that `Verbose < Info <
/// Warning < Error` comparisons work with `#[derive(PartialOrd)]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportLevel {
    Verbose,
    Info,
    Warning,
    Error,
}

impl ReportLevel {
    fn name(self) -> &'static str {
        match self {
            ReportLevel::Verbose => "verbose",
            ReportLevel::Info => "info",
            ReportLevel::Warning => "warning",
            ReportLevel::Error => "error",
        }
    }

    fn color(self) -> Color {
        match self {
            ReportLevel::Verbose => Color::White,
            ReportLevel::Info => Color::Green,
            ReportLevel::Warning => Color::Yellow,
            ReportLevel::Error => Color::Red,
        }
    }
}

const LEVEL_COUNT: usize = 4;
const ERROR_LIMIT: usize = 20;

/// What happened after a report was tallied.
#[derive(Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Normal: the report was printed and counted.
    Continued,
    /// The per-level error-limit (20, for levels at or above `Warning`) was
    /// just crossed. The caller should stop driving this translation unit.
    ///
    /// This replaces the teacher's `abort()` call with a value a driver can
    /// act on, per the error-propagation redesign.
    LimitExceeded,
}

/// Thread-safe renderer of diagnostics with single-span, ranged, and
/// two-span forms, macro-expansion backtraces, and a hard cap on error
/// count. One engine instance is constructed per compilation session (not
/// process-global), so parallel per-translation-unit compilation never
/// interleaves output between sessions.
pub struct DiagnosticEngine {
    tally: [AtomicUsize; LEVEL_COUNT],
    /// Serializes the actual `print!` calls so concurrent reports from
    /// different threads don't interleave mid-diagnostic.
    print_lock: Mutex<()>,
    pub thin_errors: bool,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        DiagnosticEngine {
            tally: Default::default(),
            print_lock: Mutex::new(()),
            thin_errors: false,
        }
    }

    pub fn with_thin_errors(thin_errors: bool) -> Self {
        DiagnosticEngine {
            thin_errors,
            ..Self::new()
        }
    }

    pub fn count(&self, level: ReportLevel) -> usize {
        self.tally[level as usize].load(Ordering::SeqCst)
    }

    /// Resets every level's counter to zero.
    pub fn clear_any_reports(&self) {
        for c in &self.tally {
            c.store(0, Ordering::SeqCst);
        }
    }

    /// `Err` if any level at or above `min` has a non-zero count.
    pub fn crash_if_reports(&self, min: ReportLevel) -> Result<(), String> {
        for lvl in [ReportLevel::Verbose, ReportLevel::Info, ReportLevel::Warning, ReportLevel::Error] {
            if lvl < min {
                continue;
            }
            let n = self.count(lvl);
            if n > 0 {
                return Err(format!("exited with {n} {}{}", lvl.name(), if n > 1 { "s" } else { "" }));
            }
        }
        Ok(())
    }

    fn tally_report_counter(&self, level: ReportLevel) -> ReportOutcome {
        let count = self.tally[level as usize].fetch_add(1, Ordering::SeqCst) + 1;
        if level > ReportLevel::Warning && count > ERROR_LIMIT {
            println!("{}", "EXCEEDED ERROR LIMIT OF 20".red().bold());
            return ReportOutcome::LimitExceeded;
        }
        ReportOutcome::Continued
    }

    /// Point diagnostic at a single location.
    pub fn report(&self, level: ReportLevel, map: &SourceMap, loc_id: SourceLocId, message: &str) -> ReportOutcome {
        let _guard = self.print_lock.lock().unwrap();
        let loc = map.loc(loc_id);

        if !self.thin_errors {
            if let Some(parent) = loc.parent {
                print_backtrace(map, parent, self.thin_errors);
            }
        }

        self.display_line_prefix(level, map, loc_id);
        println!("{message}");

        if !self.thin_errors {
            self.draw_underlined_line(map, loc_id);
        }

        self.tally_report_counter(level)
    }

    /// Ranged diagnostic: merges `start`/`end` into one span when they share
    /// a line, otherwise falls back to `start`.
    pub fn report_ranged(
        &self,
        level: ReportLevel,
        map: &SourceMap,
        start: SourceLocId,
        end: SourceLocId,
        message: &str,
    ) -> ReportOutcome {
        let _guard = self.print_lock.lock().unwrap();
        let merged = merge_source_locations(map, start, end);

        if !self.thin_errors {
            if let Some(parent) = merged.parent {
                print_backtrace(map, parent, self.thin_errors);
            }
        }

        self.display_line_prefix_loc(level, &merged, map.line(merged.line));
        println!("{message}");

        if !self.thin_errors {
            self.draw_underlined_loc(map, &merged);
        }

        self.tally_report_counter(level)
    }

    /// Two-span diagnostic. Same-line spans are drawn with both underlines
    /// on a single gutter line with per-span annotations; cross-line spans
    /// draw two separate blocks, optionally separated by `interjection`.
    #[allow(clippy::too_many_arguments)]
    pub fn report_two_spots(
        &self,
        level: ReportLevel,
        map: &SourceMap,
        loc1: SourceLocId,
        loc2: SourceLocId,
        message: &str,
        annot1: Option<&str>,
        annot2: Option<&str>,
        interjection: Option<&str>,
    ) -> ReportOutcome {
        let _guard = self.print_lock.lock().unwrap();
        let l1 = map.loc(loc1);
        let l2 = map.loc(loc2);
        let same_line = interjection.is_none()
            && map.line(l1.line).filepath == map.line(l2.line).filepath
            && map.line(l1.line).line == map.line(l2.line).line;

        if same_line {
            self.display_line_prefix(level, map, loc1);
            println!("{message}");

            if !self.thin_errors {
                let dist = draw_line(map, loc1);
                print!("      | ");
                let first_start = l1.columns.saturating_sub(dist);
                let first_end = first_start + l1.length;
                let second_start = l2.columns.saturating_sub(dist);
                let second_end = second_start + l2.length;

                let mut underline = String::new();
                for _ in 0..first_start {
                    underline.push(' ');
                }
                underline.push('^');
                for _ in first_start + 1..first_end {
                    underline.push('~');
                }
                for _ in first_end..second_start {
                    underline.push(' ');
                }
                underline.push('^');
                for _ in second_start + 1..second_end {
                    underline.push('~');
                }
                println!("{}", underline.green());

                print!("      | ");
                let mut annots = String::new();
                for _ in 0..first_start {
                    annots.push(' ');
                }
                let a1 = annot1.unwrap_or("");
                annots.push_str(a1);
                for _ in first_start + a1.len()..second_start {
                    annots.push(' ');
                }
                annots.push_str(annot2.unwrap_or(""));
                println!("{annots}");
            }
        } else {
            self.display_line_prefix(level, map, loc1);
            println!("{message}");

            if !self.thin_errors {
                self.draw_underlined_line(map, loc1);
                if let Some(a1) = annot1 {
                    print!("      | ");
                    println!("{}{a1}", " ".repeat(l1.columns.saturating_sub(draw_line_dist(map, loc1)) as usize));
                }

                if map.line(l1.line).filepath != map.line(l2.line).filepath {
                    println!("  meanwhile in... {}", map.line(l2.line).filepath);
                    println!("      | ");
                }

                if let Some(msg) = interjection {
                    println!("  {msg}");
                }
                println!("      | ");

                self.draw_underlined_line(map, loc2);
                if let Some(a2) = annot2 {
                    print!("      | ");
                    println!("{}{a2}", " ".repeat(l2.columns.saturating_sub(draw_line_dist(map, loc2)) as usize));
                }
            }
        }

        println!();
        self.tally_report_counter(level)
    }

    fn display_line_prefix(&self, level: ReportLevel, map: &SourceMap, loc_id: SourceLocId) {
        let loc = map.loc(loc_id);
        self.display_line_prefix_loc(level, loc, map.line(loc.line));
    }

    fn display_line_prefix_loc(&self, level: ReportLevel, loc: &rillc_span::SourceLoc, line: &rillc_span::SourceLine) {
        let level_tag = format!("{}: ", level.name()).color(level.color()).bold();
        if self.thin_errors {
            if !line.is_synthetic() {
                print!("{}:{}:{}: ", line.filepath, line.line, loc.columns);
            }
            print!("{level_tag}");
        } else {
            print!("{level_tag}");
            if !line.is_synthetic() {
                print!("{}:{}:{}: ", line.filepath, line.line, loc.columns);
            }
        }
    }

    /// Prints the source line for `loc_id` followed by a `^~~~` underline
    /// spanning `loc.length` columns. Caller must hold `print_lock`.
    fn draw_underlined_line(&self, map: &SourceMap, loc_id: SourceLocId) {
        self.draw_underlined_loc(map, map.loc(loc_id));
    }

    fn draw_underlined_loc(&self, map: &SourceMap, loc: &rillc_span::SourceLoc) {
        let line = map.line(loc.line);
        let trimmed = line.text.trim_start();
        let dist = (line.text.len() - trimmed.len()) as u32;
        let preview = trimmed.trim_end_matches('\n');
        if !preview.is_empty() {
            println!("      | {preview}");
        }

        print!("      | ");
        let start = loc.columns.saturating_sub(dist) as usize;
        let len = loc.length.max(1) as usize;
        let mut underline = String::new();
        for _ in 0..start {
            underline.push(' ');
        }
        underline.push('^');
        for _ in 1..len {
            underline.push('~');
        }
        println!("{}", underline.green());
    }
}

/// Prints the (whitespace-trimmed) source line for `loc_id` and returns the
/// number of leading whitespace bytes trimmed, matching the teacher's
/// `draw_line_biased` so underline columns can be rebased against it.
fn draw_line_biased(map: &SourceMap, loc_id: SourceLocId, line_bias: i64) -> u32 {
    let loc = map.loc(loc_id);
    let line = map.line(loc.line);
    let trimmed = line.text.trim_start();
    let dist = (line.text.len() - trimmed.len()) as u32;

    let preview = trimmed.trim_end_matches('\n');
    if !preview.is_empty() {
        if line_bias > 0 {
            println!(" {:>5}| {preview}", line_bias as u32 + line.line);
        } else {
            println!("      | {preview}");
        }
    }
    dist
}

fn draw_line(map: &SourceMap, loc_id: SourceLocId) -> u32 {
    draw_line_biased(map, loc_id, 0)
}

fn draw_line_dist(map: &SourceMap, loc_id: SourceLocId) -> u32 {
    let loc = map.loc(loc_id);
    let line = map.line(loc.line);
    (line.text.len() - line.text.trim_start().len()) as u32
}

fn merge_source_locations(
    map: &SourceMap,
    start_id: SourceLocId,
    end_id: SourceLocId,
) -> rillc_span::SourceLoc {
    let start = map.loc(start_id);
    let end = map.loc(end_id);
    let start_line = map.line(start.line);
    let end_line = map.line(end.line);

    if start_line.filepath != end_line.filepath || start_line.line != end_line.line {
        return *start;
    }

    let start_col = start.columns;
    let end_col = end.columns + end.length;
    if start_col >= end_col {
        return *start;
    }

    rillc_span::SourceLoc {
        line: start.line,
        columns: start_col,
        length: end_col - start_col,
        parent: start.parent,
        kind: start.kind,
        span: start.span + end.span,
    }
}

/// Recursively renders the macro-expansion chain above `loc_id`, returning
/// the line-number bias accumulated from `#include` frames so the caller can
/// renumber the line it ultimately draws.
fn print_backtrace(map: &SourceMap, loc_id: SourceLocId, thin_errors: bool) -> i64 {
    let loc = map.loc(loc_id);
    let line = map.line(loc.line);

    let line_bias = match loc.parent {
        Some(parent) => print_backtrace(map, parent, thin_errors),
        None => 0,
    };

    match loc.kind {
        LocKind::Macro => {
            let invocation = &line.text[loc.columns as usize..(loc.columns + loc.length) as usize];
            if line.is_synthetic() {
                println!("In macro '{invocation}' at line {}:", line_bias as u32 + line.line);
            } else {
                println!("In macro '{invocation}' included from {}:{}:", line.filepath, line.line);
            }

            if !thin_errors {
                let dist = draw_line_biased(map, loc_id, line_bias);
                print!("      | ");
                let start_pos = loc.columns.saturating_sub(dist);
                let mut underline = String::new();
                for _ in 0..start_pos {
                    underline.push(' ');
                }
                underline.push('^');
                for _ in 1..loc.length {
                    underline.push('~');
                }
                println!("{}", underline.green());
            }
            line_bias
        }
        LocKind::File => {
            println!("In file included from {}:{}:", line.filepath, line.line);
            line.line as i64
        }
    }
}

/// A caller-side helper used by the parser crate to build the underline
/// string without depending on `DiagnosticEngine`'s internals directly.
pub fn underline_for(map: &SourceMap, loc_id: SourceLocId) -> String {
    let loc = map.loc(loc_id);
    let dist = draw_line_dist(map, loc_id);
    let start = loc.columns.saturating_sub(dist);
    let mut s = String::new();
    for _ in 0..start {
        s.push(' ');
    }
    let _ = write!(s, "^");
    for _ in 1..loc.length {
        s.push('~');
    }
    s
}
