/// Characters that can end a sentence (Arabic question mark included)
const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', '\u{061F}'];

/// Splits rendered text into trimmed paragraphs, one per line, dropping
/// lines shorter than `min_chars` characters
///
/// Short lines on a rendered page are nearly always navigation or UI
/// fragments rather than prose.
pub fn split_into_paragraphs(text: &str, min_chars: usize) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|para| !para.is_empty() && para.chars().count() >= min_chars)
        .collect()
}

/// Splits a paragraph into sentences
///
/// A boundary is a single whitespace character directly after `.`, `!`,
/// `?` or `؟`, unless the punctuation closes an abbreviation:
/// - a dotted pattern such as `e.g.` or `U.S.`
/// - a capitalized two-letter abbreviation such as `Mr.` or `Dr.`
/// - a single uppercase initial such as the `J.` in `J. Smith`
///
/// The whitespace itself is consumed; sentences are returned verbatim.
pub fn split_into_sentences(paragraph: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, &(pos, ch)) in chars.iter().enumerate() {
        if !ch.is_whitespace() {
            continue;
        }
        if is_sentence_boundary(&chars[..i]) {
            sentences.push(&paragraph[start..pos]);
            start = pos + ch.len_utf8();
        }
    }
    sentences.push(&paragraph[start..]);

    sentences
}

/// Decides whether the text before a whitespace character ends a sentence
fn is_sentence_boundary(before: &[(usize, char)]) -> bool {
    // Nearest character first
    let mut prev = before.iter().rev().map(|&(_, c)| c);
    let p0 = prev.next();
    let p1 = prev.next();
    let p2 = prev.next();
    let p3 = prev.next();

    let Some(last) = p0 else {
        return false;
    };
    if !SENTENCE_TERMINATORS.contains(&last) {
        return false;
    }

    // e.g. / i.e. / U.S.
    if p1.is_some_and(is_word_char) && p2 == Some('.') && p3.is_some_and(is_word_char) {
        return false;
    }

    if last == '.' {
        // Mr. / Dr. / St.
        if p1.is_some_and(char::is_lowercase) && p2.is_some_and(char::is_uppercase) {
            return false;
        }
        // J. Smith
        if p1.is_some_and(char::is_uppercase) && !p2.is_some_and(char::is_alphanumeric) {
            return false;
        }
    }

    true
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
