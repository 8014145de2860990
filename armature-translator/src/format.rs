//! Positional Message Formatting
//!
//! printf-style substitution for message patterns.
//!
//! A placeholder has the shape `%[argnum$][flags][width][.precision]specifier`:
//!
//! - `argnum`: 1-based argument index (`%2$s`); does not advance the
//!   sequential argument cursor
//! - `flags`: `-` (left-justify), `+` (always print sign), `0` (zero pad),
//!   space (space pad), `'c` (pad with `c`)
//! - `specifier`: `s d u f F e E x X o b c`, plus `%%` for a literal percent
//!
//! Supplying fewer arguments than the pattern consumes is a
//! [`TranslatorError::FormatError`]. Extra arguments are ignored.

use crate::{Result, TranslatorError};
use std::fmt;

/// A positional argument for a message pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl FormatArg {
    /// Integer view. Strings contribute their leading integer, or 0.
    pub fn as_int(&self) -> i64 {
        match self {
            FormatArg::Str(s) => leading_int(s),
            FormatArg::Int(i) => *i,
            FormatArg::Float(f) => *f as i64,
        }
    }

    /// Float view. Strings contribute their leading number, or 0.
    pub fn as_float(&self) -> f64 {
        match self {
            FormatArg::Str(s) => leading_float(s),
            FormatArg::Int(i) => *i as f64,
            FormatArg::Float(f) => *f,
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Str(s) => write!(f, "{}", s),
            FormatArg::Int(i) => write!(f, "{}", i),
            FormatArg::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for FormatArg {
    fn from(s: String) -> Self {
        FormatArg::Str(s)
    }
}

impl From<&str> for FormatArg {
    fn from(s: &str) -> Self {
        FormatArg::Str(s.to_string())
    }
}

impl From<&String> for FormatArg {
    fn from(s: &String) -> Self {
        FormatArg::Str(s.clone())
    }
}

impl From<i32> for FormatArg {
    fn from(n: i32) -> Self {
        FormatArg::Int(n as i64)
    }
}

impl From<i64> for FormatArg {
    fn from(n: i64) -> Self {
        FormatArg::Int(n)
    }
}

impl From<u32> for FormatArg {
    fn from(n: u32) -> Self {
        FormatArg::Int(n as i64)
    }
}

impl From<usize> for FormatArg {
    fn from(n: usize) -> Self {
        FormatArg::Int(n as i64)
    }
}

impl From<f64> for FormatArg {
    fn from(n: f64) -> Self {
        FormatArg::Float(n)
    }
}

/// Build a `Vec<FormatArg>` from mixed values.
///
/// ```
/// use armature_translator::format_args_vec;
///
/// let args = format_args_vec!["Alice", 3, 2.5];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! format_args_vec {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::FormatArg::from($arg)),*]
    };
}

#[derive(Debug, Default)]
struct Spec {
    argnum: Option<usize>,
    left: bool,
    plus: bool,
    pad: Option<char>,
    width: usize,
    precision: Option<usize>,
}

/// Substitute `args` into `pattern`.
///
/// # Example
///
/// ```
/// use armature_translator::{sprintf, FormatArg};
///
/// let out = sprintf("Post %s", &[FormatArg::from("42")]).unwrap();
/// assert_eq!(out, "Post 42");
///
/// let args = [FormatArg::from("world"), FormatArg::from("Hello")];
/// let out = sprintf("%2$s, %1$s", &args).unwrap();
/// assert_eq!(out, "Hello, world");
/// ```
pub fn sprintf(pattern: &str, args: &[FormatArg]) -> Result<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut cursor = 0;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        i += 1;
        if chars.get(i) == Some(&'%') {
            out.push('%');
            i += 1;
            continue;
        }

        let (spec, next) = parse_spec(&chars, i)?;
        let specifier = *chars.get(next).ok_or_else(|| {
            TranslatorError::FormatError(format!("incomplete placeholder in {:?}", pattern))
        })?;
        i = next + 1;

        let arg = match spec.argnum {
            Some(n) => args.get(n - 1),
            None => {
                cursor += 1;
                args.get(cursor - 1)
            }
        }
        .ok_or_else(|| {
            TranslatorError::FormatError(format!(
                "missing argument {} for {:?} ({} given)",
                spec.argnum.unwrap_or(cursor),
                pattern,
                args.len()
            ))
        })?;

        let rendered = convert(specifier, arg, &spec)?;
        if specifier == 'c' {
            out.push_str(&rendered);
        } else {
            out.push_str(&pad(rendered, &spec));
        }
    }

    Ok(out)
}

fn parse_spec(chars: &[char], start: usize) -> Result<(Spec, usize)> {
    let mut spec = Spec::default();
    let mut i = start;

    // argnum
    let digits_end = scan_digits(chars, i);
    if digits_end > i && chars.get(digits_end) == Some(&'$') {
        let n = to_number(&chars[i..digits_end]);
        if n == 0 {
            return Err(TranslatorError::FormatError(
                "argument number must be greater than zero".to_string(),
            ));
        }
        spec.argnum = Some(n);
        i = digits_end + 1;
    }

    // flags
    while let Some(&c) = chars.get(i) {
        match c {
            '-' => spec.left = true,
            '+' => spec.plus = true,
            '0' => spec.pad = Some('0'),
            ' ' => spec.pad = Some(' '),
            '\'' => {
                i += 1;
                spec.pad = Some(*chars.get(i).ok_or_else(|| {
                    TranslatorError::FormatError("missing padding character".to_string())
                })?);
            }
            _ => break,
        }
        i += 1;
    }

    // width
    let digits_end = scan_digits(chars, i);
    spec.width = bounded(to_number(&chars[i..digits_end]), "width")?;
    i = digits_end;

    // precision
    if chars.get(i) == Some(&'.') {
        let digits_end = scan_digits(chars, i + 1);
        spec.precision = Some(bounded(to_number(&chars[i + 1..digits_end]), "precision")?);
        i = digits_end;
    }

    Ok((spec, i))
}

/// Largest width or precision a placeholder may request.
const MAX_FIELD: usize = u16::MAX as usize;

fn bounded(value: usize, field: &str) -> Result<usize> {
    if value > MAX_FIELD {
        return Err(TranslatorError::FormatError(format!(
            "{} {} exceeds the maximum of {}",
            field, value, MAX_FIELD
        )));
    }
    Ok(value)
}

fn convert(specifier: char, arg: &FormatArg, spec: &Spec) -> Result<String> {
    let rendered = match specifier {
        's' => {
            let s = arg.to_string();
            match spec.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s,
            }
        }
        'd' => signed(arg.as_int().to_string(), arg.as_int() >= 0, spec.plus),
        'u' => (arg.as_int() as u64).to_string(),
        'f' | 'F' => {
            let n = arg.as_float();
            signed(
                format!("{:.*}", spec.precision.unwrap_or(6), n),
                !n.is_sign_negative(),
                spec.plus,
            )
        }
        'e' | 'E' => {
            let n = arg.as_float();
            let s = scientific(n, spec.precision.unwrap_or(6));
            let s = if specifier == 'E' { s.to_uppercase() } else { s };
            signed(s, !n.is_sign_negative(), spec.plus)
        }
        'x' => format!("{:x}", arg.as_int() as u64),
        'X' => format!("{:X}", arg.as_int() as u64),
        'o' => format!("{:o}", arg.as_int() as u64),
        'b' => format!("{:b}", arg.as_int() as u64),
        'c' => char::from_u32(arg.as_int() as u32)
            .map(String::from)
            .unwrap_or_default(),
        other => {
            return Err(TranslatorError::FormatError(format!(
                "unknown format specifier '{}'",
                other
            )));
        }
    };

    Ok(rendered)
}

fn signed(s: String, non_negative: bool, plus: bool) -> String {
    if plus && non_negative {
        format!("+{}", s)
    } else {
        s
    }
}

// Rust renders `1.5e3`; patterns expect `1.5e+3`
fn scientific(n: f64, precision: usize) -> String {
    let s = format!("{:.*e}", precision, n);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    }
}

fn pad(s: String, spec: &Spec) -> String {
    let len = s.chars().count();
    if len >= spec.width {
        return s;
    }

    let fill = spec.pad.unwrap_or(' ');
    let padding: String = std::iter::repeat_n(fill, spec.width - len).collect();

    if spec.left {
        return format!("{}{}", s, padding);
    }

    // Zero padding goes between the sign and the digits
    if fill == '0' && (s.starts_with('-') || s.starts_with('+')) {
        let (sign, rest) = s.split_at(1);
        return format!("{}{}{}", sign, padding, rest);
    }

    format!("{}{}", padding, s)
}

fn scan_digits(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while chars.get(end).is_some_and(|c| c.is_ascii_digit()) {
        end += 1;
    }
    end
}

fn to_number(digits: &[char]) -> usize {
    digits
        .iter()
        .fold(0usize, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(c.to_digit(10).unwrap_or(0) as usize)
        })
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        if c.is_ascii_digit() || (idx == 0 && (c == '-' || c == '+')) {
            end = idx + c.len_utf8();
        } else {
            break;
        }
    }
    s[..end].parse().unwrap_or(0)
}

fn leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let candidate: String = s
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .collect();

    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}
