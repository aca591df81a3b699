use regex::Regex;
use std::sync::OnceLock;

/// UTF-16 code units of one JavaScript escape sequence, backslash included:
/// `\n`, `\'`, `\x41`, `\u00e9`, `\u{1F600}`, or a line continuation.
///
/// `\uXXXX` yields a single unit, so two escaped surrogate halves recombine
/// once the caller decodes the whole literal. Malformed hex escapes are kept
/// as written.
pub fn decode_js_escape(raw: &str) -> Vec<u16> {
    let Some(body) = raw.strip_prefix('\\') else {
        return raw.encode_utf16().collect();
    };
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return Vec::new();
    };
    let rest = chars.as_str();

    let decoded = match first {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '0' if rest.is_empty() => '\0',
        'x' => return hex_unit(rest).map_or_else(|| raw.encode_utf16().collect(), |u| vec![u]),
        'u' if rest.starts_with('{') => {
            let code_point = rest
                .strip_prefix('{')
                .and_then(|hex| hex.strip_suffix('}'))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .and_then(char::from_u32);
            return match code_point {
                Some(c) => c.encode_utf16(&mut [0; 2]).to_vec(),
                None => raw.encode_utf16().collect(),
            };
        }
        'u' => return hex_unit(rest).map_or_else(|| raw.encode_utf16().collect(), |u| vec![u]),
        '\r' | '\n' | '\u{2028}' | '\u{2029}' => return Vec::new(),
        other => other,
    };
    decoded.encode_utf16(&mut [0; 2]).to_vec()
}

fn hex_unit(hex: &str) -> Option<u16> {
    u16::from_str_radix(hex, 16).ok()
}

pub fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    match ANSI.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").ok()) {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// First non-blank line of a runner failure message, without colour codes.
pub fn terse_message(message: &str) -> Option<String> {
    strip_ansi(message)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
