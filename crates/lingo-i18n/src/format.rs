//! printf-style substitution
//!
//! Directives have the form `%[flags][width][.precision][[index]]verb`.
//! Width and precision may be `*`, taking the value from the next parameter.
//! Mismatches between directives and parameters never fail; they are written
//! inline as markers such as `%!d(string=hi)`, `%!s(MISSING)`,
//! `%!v(BADINDEX)`, `%!(BADWIDTH)`, `%!(NOVERB)` and a trailing
//! `%!(EXTRA type=value, ...)`.

use crate::args::Arg;

/// Format `template` against `args` exactly as given (no flattening).
///
/// ```
/// use lingo_i18n::{format::sprintf, Arg};
///
/// assert_eq!(sprintf("%s has %d items", &[Arg::from("Ana"), Arg::from(3)]), "Ana has 3 items");
/// assert_eq!(sprintf("%d", &[Arg::from("x")]), "%!d(string=x)");
/// ```
pub fn sprintf(template: &str, args: &[Arg]) -> String {
    let params: Vec<&Arg> = args.iter().collect();
    format_params(template, &params)
}

/// Render an argument the way `%v` does.
pub fn render_default(arg: &Arg) -> String {
    let mut out = String::new();
    write_arg(&mut out, arg, 'v', &Spec::default());
    out
}

#[derive(Debug, Clone, Copy, Default)]
struct Spec {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Largest width, precision or `*` argument accepted before a directive is
/// treated as malformed.
const MAX_NUMBER: usize = 1_000_000;

struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Parses a width or precision. An absurdly long number consumes the rest
    /// of the template and reports no number, which surfaces as `%!(NOVERB)`.
    fn number(&mut self) -> Option<usize> {
        let start = self.pos;
        let mut value: usize = 0;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            if value > MAX_NUMBER {
                self.pos = self.chars.len();
                return None;
            }
            value = value * 10 + digit as usize;
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }

    /// Parses `[n]`. Returns `None` when no bracket is present, otherwise the
    /// zero-based index if it is well formed and in range.
    fn arg_index(&mut self, param_count: usize) -> Option<Option<usize>> {
        if self.peek() != Some('[') {
            return None;
        }
        let Some(close) = self.chars[self.pos..].iter().position(|&c| c == ']') else {
            // Unterminated: consume the bracket so the verb check reports it.
            self.pos += 1;
            return Some(None);
        };
        let inner: String = self.chars[self.pos + 1..self.pos + close].iter().collect();
        self.pos += close + 1;
        let index = inner
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=param_count).contains(n))
            .map(|n| n - 1);
        Some(index)
    }
}

/// Explicit `[n]` argument index bookkeeping for one directive.
struct IndexState {
    good: bool,
    reordered: bool,
}

impl Default for IndexState {
    fn default() -> Self {
        Self {
            good: true,
            reordered: false,
        }
    }
}

impl IndexState {
    /// Consumes an index at the cursor, if any, and repositions `arg_num`.
    fn take(&mut self, cur: &mut Cursor<'_>, param_count: usize, arg_num: &mut usize) -> bool {
        match cur.arg_index(param_count) {
            None => false,
            Some(index) => {
                self.reordered = true;
                match index {
                    Some(index) => *arg_num = index,
                    None => self.good = false,
                }
                true
            }
        }
    }
}

/// Core substitution over an already-flattened parameter list.
pub(crate) fn format_params(template: &str, params: &[&Arg]) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut cur = Cursor {
        chars: &chars,
        pos: 0,
    };
    let mut out = String::with_capacity(template.len() + 8);
    let mut arg_num = 0;
    let mut reordered = false;

    while let Some(c) = cur.peek() {
        cur.pos += 1;
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(flag) = cur.peek() {
            match flag {
                '-' => {
                    spec.minus = true;
                    spec.zero = false;
                }
                '+' => spec.plus = true,
                '#' => spec.sharp = true,
                '0' => spec.zero = !spec.minus,
                ' ' => spec.space = true,
                _ => break,
            }
            cur.pos += 1;
        }

        let mut index = IndexState::default();
        let mut after_index = index.take(&mut cur, params.len(), &mut arg_num);

        if cur.peek() == Some('*') {
            cur.pos += 1;
            match int_from_param(params, &mut arg_num) {
                Some(width) => {
                    if width < 0 {
                        spec.minus = true;
                        spec.zero = false;
                    }
                    spec.width = usize::try_from(width.unsigned_abs()).ok();
                }
                None => out.push_str("%!(BADWIDTH)"),
            }
            after_index = false;
        } else {
            spec.width = cur.number();
            if after_index && spec.width.is_some() {
                // "%[3]2d"
                index.good = false;
            }
        }

        // A trailing "." is the verb, not an empty precision.
        if cur.peek() == Some('.') && cur.pos + 1 < chars.len() {
            cur.pos += 1;
            if after_index {
                // "%[3].2d"
                index.good = false;
            }
            after_index = index.take(&mut cur, params.len(), &mut arg_num);
            if cur.peek() == Some('*') {
                cur.pos += 1;
                match int_from_param(params, &mut arg_num) {
                    Some(precision) if precision >= 0 => {
                        spec.precision = usize::try_from(precision).ok();
                    }
                    _ => out.push_str("%!(BADPREC)"),
                }
                after_index = false;
            } else {
                spec.precision = Some(cur.number().unwrap_or(0));
            }
        }

        if !after_index {
            index.take(&mut cur, params.len(), &mut arg_num);
        }
        reordered |= index.reordered;

        let Some(verb) = cur.peek() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        cur.pos += 1;

        if verb == '%' {
            out.push('%');
        } else if !index.good {
            out.push_str(&format!("%!{verb}(BADINDEX)"));
        } else if arg_num >= params.len() {
            out.push_str(&format!("%!{verb}(MISSING)"));
        } else {
            write_arg(&mut out, params[arg_num], verb, &spec);
            arg_num += 1;
        }
    }

    if !reordered && arg_num < params.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in params[arg_num..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if arg.is_nil() {
                out.push_str("<nil>");
            } else {
                out.push_str(arg.type_name());
                out.push('=');
                out.push_str(&render_default(arg));
            }
        }
        out.push(')');
    }

    out
}

/// Takes a `*` width or precision from the next parameter. Non-integers and
/// values beyond [`MAX_NUMBER`] still consume the parameter.
fn int_from_param(params: &[&Arg], arg_num: &mut usize) -> Option<i64> {
    let arg = params.get(*arg_num)?;
    *arg_num += 1;
    let value = match arg {
        Arg::Int(value) => *value,
        Arg::Uint(value) => i64::try_from(*value).ok()?,
        _ => return None,
    };
    let limit = i64::try_from(MAX_NUMBER).ok()?;
    (-limit..=limit).contains(&value).then_some(value)
}

fn write_arg(out: &mut String, arg: &Arg, verb: char, spec: &Spec) {
    match arg {
        Arg::Nil => match verb {
            'v' => pad(out, "<nil>", spec),
            _ => bad_verb(out, arg, verb),
        },
        Arg::Bool(value) => match verb {
            't' | 'v' => pad(out, if *value { "true" } else { "false" }, spec),
            _ => bad_verb(out, arg, verb),
        },
        Arg::Int(value) => write_integer(out, arg, value.is_negative(), value.unsigned_abs(), verb, spec),
        Arg::Uint(value) => write_integer(out, arg, false, *value, verb, spec),
        Arg::Float(value) => write_float(out, arg, *value, verb, spec),
        Arg::Str(value) => write_str(out, arg, value, verb, spec),
        Arg::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                write_arg(out, item, verb, spec);
            }
            out.push(']');
        }
    }
}

fn bad_verb(out: &mut String, arg: &Arg, verb: char) {
    out.push_str("%!");
    out.push(verb);
    out.push('(');
    if arg.is_nil() {
        out.push_str("<nil>");
    } else {
        out.push_str(arg.type_name());
        out.push('=');
        out.push_str(&render_default(arg));
    }
    out.push(')');
}

fn pad(out: &mut String, text: &str, spec: &Spec) {
    pad_with(out, text, spec, if spec.zero { '0' } else { ' ' });
}

fn pad_with(out: &mut String, text: &str, spec: &Spec, fill: char) {
    let len = text.chars().count();
    let padding = spec.width.map_or(0, |w| w.saturating_sub(len));
    if spec.minus {
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(padding));
    } else {
        out.extend(std::iter::repeat(fill).take(padding));
        out.push_str(text);
    }
}

fn sign(negative: bool, spec: &Spec) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn write_integer(out: &mut String, arg: &Arg, negative: bool, magnitude: u64, verb: char, spec: &Spec) {
    let (base, upper) = match verb {
        'd' | 'v' => (10, false),
        'b' => (2, false),
        'o' => (8, false),
        'x' => (16, false),
        'X' => (16, true),
        'c' => {
            let ch = if negative {
                char::REPLACEMENT_CHARACTER
            } else {
                u32::try_from(magnitude)
                    .ok()
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            };
            pad(out, &ch.to_string(), spec);
            return;
        }
        'q' => {
            let ch = u32::try_from(magnitude)
                .ok()
                .filter(|_| !negative)
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            pad(out, &quote(&ch.to_string(), '\''), spec);
            return;
        }
        'U' => {
            pad(out, &format!("U+{magnitude:04X}"), spec);
            return;
        }
        _ => {
            bad_verb(out, arg, verb);
            return;
        }
    };

    let mut digits = if spec.precision == Some(0) && magnitude == 0 {
        String::new()
    } else {
        match (base, upper) {
            (2, _) => format!("{magnitude:b}"),
            (8, _) => format!("{magnitude:o}"),
            (16, false) => format!("{magnitude:x}"),
            (16, true) => format!("{magnitude:X}"),
            _ => magnitude.to_string(),
        }
    };

    let sign = sign(negative, spec);
    let min_digits = match (spec.precision, spec.width) {
        (Some(precision), _) => precision,
        (None, Some(width)) if spec.zero => width.saturating_sub(sign.len()),
        _ => 0,
    };
    if digits.len() < min_digits {
        digits.insert_str(0, &"0".repeat(min_digits - digits.len()));
    }

    let prefix = match (spec.sharp, base) {
        (true, 2) => "0b",
        (true, 8) if !digits.starts_with('0') => "0",
        (true, 16) if upper => "0X",
        (true, 16) => "0x",
        _ => "",
    };

    pad_with(out, &format!("{sign}{prefix}{digits}"), spec, ' ');
}

fn write_float(out: &mut String, arg: &Arg, value: f64, verb: char, spec: &Spec) {
    if !matches!(verb, 'f' | 'F' | 'e' | 'E' | 'g' | 'G' | 'v') {
        bad_verb(out, arg, verb);
        return;
    }

    let body = if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        "Inf".to_string()
    } else {
        let magnitude = value.abs();
        match verb {
            'f' | 'F' => format!("{:.*}", spec.precision.unwrap_or(6), magnitude),
            'e' | 'E' => exponent_form(magnitude, spec.precision.unwrap_or(6), verb == 'E'),
            _ => general_form(magnitude, spec.precision, verb == 'G'),
        }
    };

    let sign = if value.is_nan() {
        if spec.plus {
            "+"
        } else if spec.space {
            " "
        } else {
            ""
        }
    } else if value.is_infinite() {
        if value.is_sign_negative() {
            "-"
        } else {
            "+"
        }
    } else {
        sign(value.is_sign_negative(), spec)
    };

    let width = spec.width.unwrap_or(0);
    let len = sign.len() + body.len();
    if spec.zero && value.is_finite() && width > len {
        out.push_str(sign);
        out.push_str(&"0".repeat(width - len));
        out.push_str(&body);
    } else {
        pad_with(out, &format!("{sign}{body}"), spec, ' ');
    }
}

/// Splits Rust's `{:e}` output into mantissa and decimal exponent.
fn split_exponent(formatted: &str) -> (&str, i32) {
    match formatted.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

fn join_exponent(mantissa: &str, exp: i32, upper: bool) -> String {
    let marker = if upper { 'E' } else { 'e' };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{exp_sign}{:02}", exp.unsigned_abs())
}

fn exponent_form(magnitude: f64, precision: usize, upper: bool) -> String {
    let formatted = format!("{magnitude:.precision$e}");
    let (mantissa, exp) = split_exponent(&formatted);
    join_exponent(mantissa, exp, upper)
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn general_form(magnitude: f64, precision: Option<usize>, upper: bool) -> String {
    if magnitude == 0.0 {
        return "0".to_string();
    }
    match precision {
        None => {
            let formatted = format!("{magnitude:e}");
            let (mantissa, exp) = split_exponent(&formatted);
            if !(-4..6).contains(&exp) {
                join_exponent(mantissa, exp, upper)
            } else {
                magnitude.to_string()
            }
        }
        Some(precision) => {
            let precision = precision.max(1);
            let formatted = format!("{:.*e}", precision - 1, magnitude);
            let (mantissa, exp) = split_exponent(&formatted);
            let limit = i32::try_from(precision).unwrap_or(i32::MAX);
            if exp < -4 || exp >= limit {
                join_exponent(trim_fraction(mantissa), exp, upper)
            } else {
                let decimals = usize::try_from(limit - 1 - exp).unwrap_or(0);
                trim_fraction(&format!("{magnitude:.decimals$}")).to_string()
            }
        }
    }
}

fn write_str(out: &mut String, arg: &Arg, value: &str, verb: char, spec: &Spec) {
    let truncated: String = match spec.precision {
        Some(precision) => value.chars().take(precision).collect(),
        None => value.to_string(),
    };
    match verb {
        's' | 'v' => pad(out, &truncated, spec),
        'q' if spec.sharp && can_backquote(&truncated) => pad(out, &format!("`{truncated}`"), spec),
        'q' => pad(out, &quote(&truncated, '"'), spec),
        'x' | 'X' => {
            let hex: String = truncated
                .bytes()
                .map(|b| if verb == 'x' { format!("{b:02x}") } else { format!("{b:02X}") })
                .collect();
            pad(out, &hex, spec);
        }
        _ => bad_verb(out, arg, verb),
    }
}

/// Quotes `text` with `delimiter`. Uses C-style escapes where one exists,
/// `\xNN` for other ASCII controls, and `\uNNNN` or `\UNNNNNNNN` for
/// remaining non-printable characters.
fn quote(text: &str, delimiter: char) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{b}' => quoted.push_str("\\v"),
            c if c < ' ' || c == '\u{7f}' => quoted.push_str(&format!("\\x{:02x}", u32::from(c))),
            c if c.is_control() || (c.is_whitespace() && c != ' ') => {
                let code = u32::from(c);
                if code < 0x10000 {
                    quoted.push_str(&format!("\\u{code:04x}"));
                } else {
                    quoted.push_str(&format!("\\U{code:08x}"));
                }
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

/// Whether `%#q` may print `text` between backquotes
fn can_backquote(text: &str) -> bool {
    text.chars()
        .all(|c| c != '`' && c != '\u{feff}' && (c == '\t' || !c.is_control()))
}
