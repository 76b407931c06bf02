//! Word wrapping for fixed-width terminals

/// Line width used for terminal output
pub const DEFAULT_WIDTH: usize = 80;

/// Reflow `text` into lines of at most `width` characters
///
/// Words are split on any whitespace (original line breaks are not kept) and
/// packed greedily. Every line, the last included, ends with `\n`. A word longer
/// than `width` is never broken and ends up alone on an overlong line.
pub fn wrap(text: &str, width: usize) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / width.max(1) + 1);
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 {
            if line_len + 1 + word_len <= width {
                result.push(' ');
                line_len += 1;
            } else {
                result.push('\n');
                line_len = 0;
            }
        }
        result.push_str(word);
        line_len += word_len;
    }

    if line_len > 0 {
        result.push('\n');
    }
    result
}
