//! TEXT value escaping (RFC 5545 section 3.3.11).

/// Escape a value for SUMMARY, DESCRIPTION or LOCATION.
///
/// Backslashes go first so the ones introduced by later steps are not doubled.
/// Carriage returns are dropped.
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
        .replace('\r', "")
}

/// Reverse of `escape`: `\\` to `\`, `\;` to `;`, `\,` to `,`, `\n`/`\N` to newline.
///
/// Unrecognized escapes keep their backslash.
pub fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next) if matches!(next, ',' | ';' | '\\') => {
                result.push(next);
                chars.next();
            }
            Some('n') | Some('N') => {
                result.push('\n');
                chars.next();
            }
            _ => result.push(c),
        }
    }

    result
}
