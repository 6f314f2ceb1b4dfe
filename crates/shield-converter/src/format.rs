//! Fixed-column number rendering for legacy cards.

/// Render `value` into exactly `width` columns.
///
/// The value is printed with `width` decimals and cut to `width`
/// characters. Trailing zeros are stripped only when the kept text holds a
/// decimal point, then the result is right-aligned.
pub fn fixed_width_float(value: f64, width: usize) -> String {
    let full = format!("{:.*}", width, value);
    let mut kept: String = full.chars().take(width).collect();
    if kept.contains('.') {
        let trimmed = kept.trim_end_matches('0').len();
        kept.truncate(trimmed);
    }
    format!("{:>width$}", kept, width = width)
}

pub fn fixed_width_int(value: i64, width: usize) -> String {
    format!("{:>width$}", value, width = width)
}

/// One argument of a card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardArg {
    Float(f64),
    Int(i64),
    Text(String),
    /// Unused slot, rendered blank.
    Empty,
}

impl CardArg {
    pub fn render(&self, width: usize) -> String {
        match self {
            CardArg::Float(v) => fixed_width_float(*v, width),
            CardArg::Int(v) => fixed_width_int(*v, width),
            // a blank always separates text from the previous field
            CardArg::Text(s) if s.chars().count() >= width => format!(" {}", s),
            CardArg::Text(s) => format!("{:>width$}", s, width = width),
            CardArg::Empty => " ".repeat(width),
        }
    }
}

impl From<f64> for CardArg {
    fn from(v: f64) -> Self {
        CardArg::Float(v)
    }
}

impl From<i64> for CardArg {
    fn from(v: i64) -> Self {
        CardArg::Int(v)
    }
}

impl From<&str> for CardArg {
    fn from(v: &str) -> Self {
        CardArg::Text(v.to_string())
    }
}

impl From<String> for CardArg {
    fn from(v: String) -> Self {
        CardArg::Text(v)
    }
}

/// Lay `args` out `per_line` at a time after `head`, padding the last line
/// with blank fields. Continuation lines start with `indent`.
pub fn wrap_args(head: &str, indent: &str, args: &[CardArg], width: usize, per_line: usize) -> String {
    let mut out = String::new();
    if args.is_empty() {
        out.push_str(head);
        out.push('\n');
        return out;
    }
    for (line_no, chunk) in args.chunks(per_line).enumerate() {
        out.push_str(if line_no == 0 { head } else { indent });
        for arg in chunk {
            out.push_str(&arg.render(width));
        }
        for _ in chunk.len()..per_line {
            out.push_str(&" ".repeat(width));
        }
        out.push('\n');
    }
    out
}
