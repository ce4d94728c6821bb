//! Canonical text encoding used for block hashing.
//!
//! Version 1 reproduces `json.dumps(value, sort_keys=True)` byte for byte:
//! object keys in sorted order, `", "` and `": "` separators, ASCII-only
//! string escapes and shortest round-trip floats. Blocks hashed here link
//! to blocks produced by any other implementation of the same encoding.

use serde_json::Number;
use sha2::{Digest, Sha256};

/// Bumped whenever the byte layout produced by [`Canonical`] changes.
pub const CANONICAL_ENCODING_VERSION: u8 = 1;

/// Values with a deterministic, key-sorted text encoding.
pub trait Canonical {
    fn write_canonical(&self, out: &mut String);

    fn canonical_string(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn canonical_bytes(&self) -> Vec<u8> {
        self.canonical_string().into_bytes()
    }
}

/// SHA-256 of `bytes`, rendered as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Writes one object. Fields must be added in ascending key order.
pub struct ObjectWriter<'a> {
    out: &'a mut String,
    last_key: Option<&'static str>,
}

impl<'a> ObjectWriter<'a> {
    pub fn begin(out: &'a mut String) -> Self {
        out.push('{');
        Self {
            out,
            last_key: None,
        }
    }

    pub fn field(&mut self, key: &'static str, value: &dyn Canonical) {
        if let Some(prev) = self.last_key {
            assert!(prev < key, "canonical keys out of order: {prev} before {key}");
            self.out.push_str(", ");
        }
        write_str(self.out, key);
        self.out.push_str(": ");
        value.write_canonical(self.out);
        self.last_key = Some(key);
    }

    pub fn end(self) {
        self.out.push('}');
    }
}

impl Canonical for String {
    fn write_canonical(&self, out: &mut String) {
        write_str(out, self);
    }
}

impl Canonical for u64 {
    fn write_canonical(&self, out: &mut String) {
        out.push_str(&self.to_string());
    }
}

impl Canonical for f64 {
    fn write_canonical(&self, out: &mut String) {
        write_f64(out, *self);
    }
}

/// Numbers keep the text they were parsed from (`arbitrary_precision`), so
/// integers of any size are written back digit for digit. Anything with a
/// fraction or exponent is a float and goes through [`write_f64`].
impl Canonical for Number {
    fn write_canonical(&self, out: &mut String) {
        let text = self.to_string();
        if text.contains(['.', 'e', 'E']) {
            write_f64(out, self.as_f64().unwrap_or(f64::NAN));
        } else if text == "-0" {
            out.push('0');
        } else {
            out.push_str(&text);
        }
    }
}

impl<T: Canonical> Canonical for Vec<T> {
    fn write_canonical(&self, out: &mut String) {
        out.push('[');
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            item.write_canonical(out);
        }
        out.push(']');
    }
}

/// Quoted string with every character outside printable ASCII escaped.
pub fn write_str(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
        }
    }
    out.push('"');
}

/// Float in shortest round-trip form: positional for decimal exponents in
/// `-4..16` (always with a fractional part), scientific otherwise.
pub fn write_f64(out: &mut String, v: f64) {
    if v.is_nan() {
        out.push_str("NaN");
        return;
    }
    if v.is_infinite() {
        out.push_str(if v > 0.0 { "Infinity" } else { "-Infinity" });
        return;
    }

    let sci = format!("{v:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..16).contains(&exp) {
        let plain = v.to_string();
        out.push_str(&plain);
        if !plain.contains('.') {
            out.push_str(".0");
        }
    } else {
        out.push_str(mantissa);
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exp.unsigned_abs()));
    }
}


#[cfg(test)]
pub(crate) use tests::encode_json;
