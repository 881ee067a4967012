//! Printf-style formatting over values.
//!
//! Supported conversions: `d i u x X o b f F e E g G s c %`, flags
//! `- + 0 # space`, width and precision, with C `printf` output. `b` is
//! binary and takes a `0b` prefix under `#`.

use std::iter::Peekable;
use std::str::Chars;

use crate::{Value, VarError, VarResult};

const MAX_FIELD: usize = i32::MAX as usize;

#[derive(Default)]
struct Spec {
    left_align: bool,
    plus_sign: bool,
    space_sign: bool,
    zero_pad: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
}

fn int_arg(arg: &Value, conv: char) -> VarResult<i64> {
    match arg {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Int(i) => Ok(*i),
        Value::Float(f) => Ok(*f as i64),
        other => Err(VarError::type_error(format!(
            "%{} format requires a number, not \"{}\".",
            conv,
            other.type_name()
        ))),
    }
}

fn float_arg(arg: &Value, conv: char) -> VarResult<f64> {
    match arg {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) => Ok(*f),
        other => Err(VarError::type_error(format!(
            "%{} format requires a number, not \"{}\".",
            conv,
            other.type_name()
        ))),
    }
}

/// A converted argument before padding. Zero fill goes between
/// `sign`+`prefix` and `body`.
struct Piece {
    sign: &'static str,
    prefix: &'static str,
    body: String,
    zero_fill: bool,
}

impl Piece {
    fn text(body: String) -> Self {
        Piece { sign: "", prefix: "", body, zero_fill: false }
    }

    fn number(spec: &Spec, negative: bool, body: String) -> Self {
        let sign = if negative {
            "-"
        } else if spec.plus_sign {
            "+"
        } else if spec.space_sign {
            " "
        } else {
            ""
        };
        Piece { sign, prefix: "", body, zero_fill: true }
    }
}

fn pad(spec: &Spec, piece: Piece) -> String {
    let len = piece.sign.len() + piece.prefix.len() + piece.body.chars().count();
    let fill = spec.width.saturating_sub(len);
    if spec.left_align {
        format!("{}{}{}{}", piece.sign, piece.prefix, piece.body, " ".repeat(fill))
    } else if spec.zero_pad && piece.zero_fill {
        format!("{}{}{}{}", piece.sign, piece.prefix, "0".repeat(fill), piece.body)
    } else {
        format!("{}{}{}{}", " ".repeat(fill), piece.sign, piece.prefix, piece.body)
    }
}

/// Integer digits widened to `precision` with leading zeros; a zero value
/// with precision 0 prints no digits.
fn int_digits(spec: &Spec, digits: String) -> String {
    match spec.precision {
        Some(0) if digits == "0" => String::new(),
        Some(p) if digits.len() < p => format!("{}{}", "0".repeat(p - digits.len()), digits),
        _ => digits,
    }
}

fn exp_form(precision: usize, f: f64, upper: bool, alternate: bool) -> String {
    let rendered = format!("{:.*e}", precision, f);
    let Some((mantissa, exp)) = rendered.split_once('e') else {
        return rendered;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    format!(
        "{}{}{}{}{:02}",
        mantissa,
        if alternate && precision == 0 { "." } else { "" },
        if upper { 'E' } else { 'e' },
        if exp < 0 { '-' } else { '+' },
        exp.unsigned_abs()
    )
}

fn strip_trailing_zeros(rendered: String) -> String {
    let split = rendered.find(|c: char| c == 'e' || c == 'E').unwrap_or(rendered.len());
    let (number, exp) = rendered.split_at(split);
    if !number.contains('.') {
        return rendered;
    }
    format!("{}{}", number.trim_end_matches('0').trim_end_matches('.'), exp)
}

fn general_form(precision: usize, f: f64, upper: bool, alternate: bool) -> String {
    let p = precision.max(1);
    let scientific = format!("{:.*e}", p - 1, f);
    let exp: i64 = scientific
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    let rendered = if exp < -4 || exp >= p as i64 {
        exp_form(p - 1, f, upper, alternate)
    } else {
        format!("{:.*}", (p as i64 - 1 - exp) as usize, f)
    };
    if alternate {
        rendered
    } else {
        strip_trailing_zeros(rendered)
    }
}

fn float_piece(spec: &Spec, conv: char, f: f64) -> Piece {
    let upper = conv.is_ascii_uppercase();
    let negative = f.is_sign_negative();
    let magnitude = f.abs();
    if !magnitude.is_finite() {
        let body = match (magnitude.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        let mut piece = Piece::number(spec, negative && !magnitude.is_nan(), body.to_string());
        piece.zero_fill = false;
        return piece;
    }
    let precision = spec.precision.unwrap_or(6);
    let body = match conv {
        'f' | 'F' => {
            let mut body = format!("{:.*}", precision, magnitude);
            if spec.alternate && precision == 0 {
                body.push('.');
            }
            body
        }
        'e' | 'E' => exp_form(precision, magnitude, upper, spec.alternate),
        _ => general_form(precision, magnitude, upper, spec.alternate),
    };
    Piece::number(spec, negative, body)
}

fn render(spec: &Spec, conv: char, arg: &Value) -> VarResult<String> {
    let piece = match conv {
        'd' | 'i' => {
            let i = int_arg(arg, conv)?;
            let mut piece = Piece::number(spec, i < 0, int_digits(spec, i.unsigned_abs().to_string()));
            piece.zero_fill = spec.precision.is_none();
            piece
        }
        'u' | 'x' | 'X' | 'o' | 'b' => {
            // Negative values print as their 64-bit two's complement.
            let bits = int_arg(arg, conv)? as u64;
            let digits = int_digits(
                spec,
                match conv {
                    'u' => bits.to_string(),
                    'x' => format!("{:x}", bits),
                    'X' => format!("{:X}", bits),
                    'o' => format!("{:o}", bits),
                    _ => format!("{:b}", bits),
                },
            );
            let prefix = match conv {
                _ if !spec.alternate => "",
                'x' if bits != 0 => "0x",
                'X' if bits != 0 => "0X",
                'b' if bits != 0 => "0b",
                'o' if !digits.starts_with('0') => "0",
                _ => "",
            };
            Piece {
                sign: "",
                prefix,
                body: digits,
                zero_fill: spec.precision.is_none(),
            }
        }
        'f' | 'F' | 'e' | 'E' | 'g' | 'G' => float_piece(spec, conv, float_arg(arg, conv)?),
        'c' => Piece::text(match arg {
            Value::String(t) if t.size() == 1 => t.to_string(),
            other => {
                let code = int_arg(other, conv)?;
                u32::try_from(code)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| VarError::value_error(format!("%c argument {} is not a character.", code)))?
                    .to_string()
            }
        }),
        's' => {
            let s = arg.to_string();
            Piece::text(match spec.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s,
            })
        }
        other => {
            return Err(VarError::value_error(format!(
                "unsupported format character '{}'.",
                other
            )))
        }
    };
    Ok(pad(spec, piece))
}

/// Width or precision digits; bounded like C's `int` field.
fn read_number(chars: &mut Peekable<Chars<'_>>, what: &str) -> VarResult<usize> {
    let mut n: usize = 0;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(d as usize))
            .filter(|n| *n <= MAX_FIELD)
            .ok_or_else(|| VarError::value_error(format!("format {} too large.", what)))?;
        chars.next();
    }
    Ok(n)
}

/// Format `args` according to `fmt`.
///
/// Fails with ValueError when the format string and the argument list do not
/// agree in number, and with TypeError when an argument does not suit its
/// conversion.
pub fn format_values(fmt: &str, args: &[Value]) -> VarResult<String> {
    let mut out = String::new();
    let mut chars = fmt.chars().peekable();
    let mut next_arg = args.iter();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left_align = true,
                '+' => spec.plus_sign = true,
                ' ' => spec.space_sign = true,
                '0' => spec.zero_pad = true,
                '#' => spec.alternate = true,
                _ => break,
            }
            chars.next();
        }
        spec.width = read_number(&mut chars, "width")?;
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(read_number(&mut chars, "precision")?);
        }

        let conv = chars
            .next()
            .ok_or_else(|| VarError::value_error("incomplete format specifier."))?;
        let arg = next_arg
            .next()
            .ok_or_else(|| VarError::value_error("not enough arguments for format string."))?;
        out.push_str(&render(&spec, conv, arg)?);
    }

    if next_arg.next().is_some() {
        return Err(VarError::value_error(
            "not all arguments converted during formatting.",
        ));
    }
    Ok(out)
}
