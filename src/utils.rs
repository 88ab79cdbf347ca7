/// Longest sanitized name in bytes, leaving room for prefixes and extensions
/// under the usual 255-byte file name limit
pub const MAX_NAME_BYTES: usize = 200;

/// Makes a keyword safe to embed in a file name
///
/// Only path separators and characters rejected by common filesystems are
/// replaced; spaces, `&` and CJK text are kept as typed.
pub fn sanitize_filename(name: &str) -> String {
    let mut cleaned = String::new();
    let chars = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        });

    // Byte limit, cut on a char boundary
    for c in chars {
        if cleaned.len() + c.len_utf8() > MAX_NAME_BYTES {
            break;
        }
        cleaned.push(c);
    }
    cleaned
}
