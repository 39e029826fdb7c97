/// Keep the first `max_bytes` bytes of `s` without splitting a UTF-8
/// character, appending `...` when anything was cut (so the result can be
/// up to three bytes longer than `max_bytes`).
///
/// Used to keep user-supplied text bounded in log lines.
pub fn truncate_str(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Split `text` into chunks of at most `max_bytes` bytes, breaking only
/// between lines. A single line longer than the limit is truncated.
pub fn split_message(text: &str, max_bytes: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line = if line.len() > max_bytes {
            truncate_str(line, max_bytes.saturating_sub(3))
        } else {
            line.to_string()
        };

        if !current.is_empty() && current.len() + 1 + line.len() > max_bytes {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(&line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
