//! Line-oriented scanner that gives every non-void method a return statement.
//!
//! Braces are first forced onto line ends, so each line changes the brace
//! depth by at most one and a method closes on the line whose `}` brings the
//! depth back to zero. The scan is a two-state machine:
//!
//! ```text
//!            header line + `{`            depth == 0
//!  Outside ─────────────────────▶ InsideMethod ─────────▶ Outside
//!     ▲  header line, no `{` next       │ (insert default return if
//!     └─────────────────────────────────┘  none was seen and non-void)
//! ```
//!
//! Only the presence of some `return ` line inside the method span is checked,
//! not that every branch returns.

use crate::config::SynthConfig;
use crate::signature::is_header_line;
use crate::types::TypeDescriptor;

/// Per-method bookkeeping while inside a method body
#[derive(Debug, Clone, PartialEq, Eq)]
struct MethodScan {
    return_type: TypeDescriptor,
    depth: usize,
    saw_return: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Outside,
    InsideMethod(MethodScan),
}

/// Inserts default-value returns into methods that lack one
#[derive(Debug, Clone)]
pub struct SourceNormalizer {
    indent_unit: String,
}

impl Default for SourceNormalizer {
    fn default() -> Self {
        Self::from_config(&SynthConfig::default())
    }
}

impl SourceNormalizer {
    #[must_use]
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            indent_unit: indent_unit.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SynthConfig) -> Self {
        Self::new(config.indent_unit.clone())
    }

    /// Normalize one class-like source unit
    #[must_use]
    pub fn normalize(&self, source: &str) -> String {
        let expanded = break_after_braces(&source.replace("\r\n", "\n"));
        let lines = split_lines(&expanded);

        let mut out = String::with_capacity(expanded.len() + 64);
        let mut state = ScanState::Outside;
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx];
            state = match state {
                ScanState::Outside => {
                    push_line(&mut out, line);
                    let trimmed = line.trim();
                    if is_header_line(trimmed) {
                        let next = lines.get(idx + 1).copied();
                        let (state, consumed_next) = Self::enter_method(trimmed, next);
                        if consumed_next {
                            idx += 1;
                            push_line(&mut out, lines[idx]);
                        }
                        state
                    } else {
                        ScanState::Outside
                    }
                }
                ScanState::InsideMethod(scan) => self.step_method(scan, line, &mut out),
            };
            idx += 1;
        }

        out
    }

    /// Transition guard out of `Outside` on a header line.
    ///
    /// Returns the next state and whether the following line was consumed
    /// looking for the opening brace.
    fn enter_method(header: &str, next: Option<&str>) -> (ScanState, bool) {
        let inside = ScanState::InsideMethod(MethodScan {
            return_type: declared_return_type(header),
            depth: 1,
            saw_return: false,
        });

        if header.ends_with('{') {
            return (inside, false);
        }

        match next {
            Some(line) if line.trim() == "{" => (inside, true),
            // Declaration without a body brace on the next line is not tracked
            Some(_) => (ScanState::Outside, true),
            None => (ScanState::Outside, false),
        }
    }

    /// Advance over one body line, closing the method when depth returns to zero
    fn step_method(&self, mut scan: MethodScan, line: &str, out: &mut String) -> ScanState {
        let trimmed = line.trim();
        let opens = trimmed.matches('{').count();
        let closes = trimmed.matches('}').count();
        scan.depth = (scan.depth + opens).saturating_sub(closes);

        if trimmed.starts_with("return ") {
            scan.saw_return = true;
        }

        if scan.depth > 0 {
            push_line(out, line);
            return ScanState::InsideMethod(scan);
        }

        match scan.return_type.default_return() {
            Some(default_return) if !scan.saw_return => {
                log::debug!(
                    "Inserting `{default_return}` for method returning {}",
                    scan.return_type
                );
                self.close_with_default(line, &default_return, out);
            }
            _ => push_line(out, line),
        }
        ScanState::Outside
    }

    fn close_with_default(&self, line: &str, default_return: &str, out: &mut String) {
        let indent = leading_whitespace(line);
        let return_line = format!("{indent}{}{default_return}", self.indent_unit);

        match line.rfind('}') {
            Some(brace) if !line[..brace].trim().is_empty() => {
                push_line(out, line[..brace].trim_end());
                push_line(out, &return_line);
                push_line(out, &format!("{indent}{}", line[brace..].trim()));
            }
            _ => {
                push_line(out, &return_line);
                push_line(out, line);
            }
        }
    }
}

/// Second whitespace-separated token of the header, `void` if irregular
fn declared_return_type(header: &str) -> TypeDescriptor {
    let parts: Vec<&str> = header.split_whitespace().collect();
    if parts.len() >= 3 {
        TypeDescriptor::classify(parts[1])
    } else {
        TypeDescriptor::Void
    }
}

/// Put a line break after every brace that does not already end a line
fn break_after_braces(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + source.len() / 8);
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if (c == '{' || c == '}') && chars.peek() != Some(&'\n') {
            out.push('\n');
        }
    }
    out
}

/// Split on `\n`, dropping trailing empty lines
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
