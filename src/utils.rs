/// Splits text into contiguous slices of at most `max_chars` characters
///
/// Slicing is purely positional and may cut through a word or sentence.
/// A `max_chars` of zero is treated as one.
pub fn chunk_by_chars(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// Flattens a message onto one line so each diagnostic entry stays one line
pub fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}
