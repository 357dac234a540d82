use aho_corasick::AhoCorasick;
use memchr::memchr;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::fmt::Write;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use pptx_templater::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape XML entity and character references.
///
/// Handles the five predefined entities and decimal/hexadecimal character
/// references in a single pass, so `&amp;lt;` becomes `&lt;` and not `<`.
/// Unknown or malformed references are left unchanged.
///
/// # Examples
///
/// ```
/// use pptx_templater::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&quot;hello&apos;"), "\"hello'");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("&#65;&#x42;"), "AB");
/// assert_eq!(unescape_xml("a & b"), "a & b");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// ```
pub fn unescape_xml(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;

    while let Some(offset) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + offset;
        out.push_str(&s[pos..amp]);

        let Some(semi) = memchr(b';', &bytes[amp..]).map(|i| amp + i) else {
            // No terminator anywhere after this point
            pos = amp;
            break;
        };

        match decode_reference(&s[amp + 1..semi]) {
            Some(ch) => {
                out.push(ch);
                pos = semi + 1;
            },
            None => {
                out.push('&');
                pos = amp + 1;
            },
        }
    }

    out.push_str(&s[pos..]);
    out
}

/// Encode characters XML 1.0 cannot carry in `_xHHHH_` form (OOXML `ST_Xstring`).
///
/// Covers C0 controls other than tab and line feed. Carriage return is
/// encoded too, since parsers normalize a raw one to a line feed. An
/// underscore that would itself read as the start of an `_xHHHH_` escape
/// becomes `_x005F_`.
///
/// # Examples
///
/// ```
/// use pptx_templater::common::xml::escape::encode_control_chars;
/// assert_eq!(encode_control_chars("A\u{1}B"), "A_x0001_B");
/// assert_eq!(encode_control_chars("_x0041_"), "_x005F_x0041_");
/// assert_eq!(encode_control_chars("tab\tok"), "tab\tok");
/// ```
pub fn encode_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let needs_encoding = |i: usize| {
        let b = bytes[i];
        (b < 0x20 && b != b'\t' && b != b'\n') || (b == b'_' && is_xstring_escape(&bytes[i..]))
    };

    let Some(first) = (0..bytes.len()).find(|&i| needs_encoding(i)) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for (i, ch) in s[first..].char_indices() {
        // only ASCII bytes are ever encoded, so char starts are byte starts
        if ch.is_ascii() && needs_encoding(first + i) {
            let _ = write!(out, "_x{:04X}_", ch as u32);
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Decode `_xHHHH_` escapes written by [`encode_control_chars`] or by Office.
///
/// # Examples
///
/// ```
/// use pptx_templater::common::xml::escape::decode_control_chars;
/// assert_eq!(decode_control_chars("A_x0001_B"), "A\u{1}B");
/// assert_eq!(decode_control_chars("_x005F_x0041_"), "_x0041_");
/// ```
pub fn decode_control_chars(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let Some(first) = (0..bytes.len()).find(|&i| is_xstring_escape(&bytes[i..])) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut pos = first;
    while pos < bytes.len() {
        if is_xstring_escape(&bytes[pos..]) {
            let decoded = u32::from_str_radix(&s[pos + 2..pos + 6], 16)
                .ok()
                .and_then(char::from_u32);
            if let Some(ch) = decoded {
                out.push(ch);
                pos += 7;
                continue;
            }
        }
        let Some(ch) = s[pos..].chars().next() else {
            break;
        };
        out.push(ch);
        pos += ch.len_utf8();
    }
    Cow::Owned(out)
}

/// Whether `bytes` starts with `_xHHHH_`.
fn is_xstring_escape(bytes: &[u8]) -> bool {
    bytes.len() >= 7
        && bytes[0] == b'_'
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

/// Decode the body of a reference (the part between `&` and `;`).
fn decode_reference(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = body.strip_prefix('#')?;
            let hex = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X'));
            let code = if let Some(hex) = hex {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                atoi_simd::parse::<u32, false, false>(digits.as_bytes()).ok()?
            };
            char::from_u32(code)
        },
    }
}
