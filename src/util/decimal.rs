//! Decimal float text matching the exporter's established output.
//!
//! Decimal floats appear in a few places (plain scalar properties, `i`
//! lists, skin hash keys). Their text follows the shortest round-trip
//! representation with these rules:
//! - exponents in `-4..16` print positionally and always carry a fraction (`1.0`, `0.0001`)
//! - other exponents print as `1e-05` / `1.5e+16` (sign and at least two digits)
//! - non-finite values print as `nan`, `inf`, `-inf`

/// Format an `f64` as shortest round-trip decimal text.
pub fn fmt_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }

    let sci = format!("{:e}", value.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if value.is_sign_negative() {
        out.push('-');
    }

    if (-4..16).contains(&exp) {
        if exp >= 0 {
            let int_len = exp as usize + 1;
            if digits.len() <= int_len {
                out.push_str(&digits);
                out.extend(std::iter::repeat('0').take(int_len - digits.len()));
                out.push_str(".0");
            } else {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            }
        } else {
            out.push_str("0.");
            out.extend(std::iter::repeat('0').take((-exp - 1) as usize));
            out.push_str(&digits);
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exp.abs()));
    }

    out
}

/// Format an `f32` the way it reads once widened to double precision.
#[inline]
pub fn fmt_float32(value: f32) -> String {
    fmt_float(f64::from(value))
}

/// Format a 3-component position as a parenthesized tuple: `(1.0, 2.0, 3.0)`.
pub fn fmt_position(values: [f32; 3]) -> String {
    format!(
        "({}, {}, {})",
        fmt_float32(values[0]),
        fmt_float32(values[1]),
        fmt_float32(values[2])
    )
}
