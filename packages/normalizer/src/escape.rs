//! C-style escape decoding for text fields.
//!
//! Input documents routinely carry literal two-character escapes
//! (`\t`, `\n`, `\r`, `\uXXXX`, `\\`) in input-action text. Decoding
//! happens once, at normalization time; the action engine and anything
//! upstream of it operate on the undecoded literal form.

/// Decode `\t`, `\n`, `\r`, `\uXXXX` (4 hex digits) and `\\`.
///
/// Unrecognized escapes, trailing backslashes, and `\u` sequences that do
/// not form a valid scalar value are kept as literal text.
pub fn decode_escapes(input: &str) -> String {
    if !input.contains('\\') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('t') => {
                chars.next();
                out.push('\t');
            }
            Some('r') => {
                chars.next();
                out.push('\r');
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            Some('u') => {
                let rest: String = chars.clone().collect();
                match decode_unicode(&rest) {
                    Some(decoded) => {
                        // 'u' plus four hex digits
                        for _ in 0..5 {
                            chars.next();
                        }
                        out.push(decoded);
                    }
                    None => out.push('\\'),
                }
            }
            _ => out.push('\\'),
        }
    }

    out
}

/// `rest` starts at the `u` of a candidate `\uXXXX` sequence.
fn decode_unicode(rest: &str) -> Option<char> {
    let hex: String = rest.chars().skip(1).take(4).collect();
    if hex.chars().count() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(&hex, 16).ok()?;
    char::from_u32(code)
}
