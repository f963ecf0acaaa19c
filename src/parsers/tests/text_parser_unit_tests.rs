use crate::parsers::text;

#[cfg(test)]
mod paragraph_tests {
    use super::*;

    #[test]
    fn test_split_into_paragraphs() {
        // Empty text
        assert!(text::split_into_paragraphs("", 10).is_empty());

        // One paragraph per line, trimmed
        let result = text::split_into_paragraphs("  First long line  \nSecond long line\r\n", 5);
        assert_eq!(result, vec!["First long line", "Second long line"]);

        // Blank lines are skipped
        let result = text::split_into_paragraphs("Alpha beta\n\n\n\nGamma delta", 5);
        assert_eq!(result, vec!["Alpha beta", "Gamma delta"]);
    }

    #[test]
    fn test_short_paragraphs_are_dropped() {
        let prose = "We are a family business founded in 1952 and based in Antwerp.";
        let input = format!("Home\nAbout us\nContact\n{}\nCookies", prose);
        let result = text::split_into_paragraphs(&input, 60);
        assert_eq!(result, vec![prose]);
    }

    #[test]
    fn test_threshold_counts_characters_not_bytes() {
        // 10 characters, 20 bytes
        let cyrillic = "аааааааааа";
        assert_eq!(text::split_into_paragraphs(cyrillic, 10), vec![cyrillic]);
        assert!(text::split_into_paragraphs(cyrillic, 11).is_empty());
    }
}

#[cfg(test)]
mod sentence_tests {
    use super::*;

    #[test]
    fn test_basic_sentence_split() {
        let result = text::split_into_sentences("Hello world. This is Inc. Great news today.");
        assert_eq!(result, vec!["Hello world.", "This is Inc.", "Great news today."]);
    }

    #[test]
    fn test_question_and_exclamation_marks() {
        let result = text::split_into_sentences("Who are we? We build bridges! Since 1990.");
        assert_eq!(result, vec!["Who are we?", "We build bridges!", "Since 1990."]);

        let result = text::split_into_sentences("من نحن؟ نحن شركة.");
        assert_eq!(result, vec!["من نحن؟", "نحن شركة."]);
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let result = text::split_into_sentences("Founded by Mr. Peeters in Gent. It grew fast.");
        assert_eq!(result, vec!["Founded by Mr. Peeters in Gent.", "It grew fast."]);

        let result = text::split_into_sentences("We sell tools, e.g. hammers and saws. Visit us.");
        assert_eq!(result, vec!["We sell tools, e.g. hammers and saws.", "Visit us."]);

        let result = text::split_into_sentences("Led by J. Janssens since 2001. Good times.");
        assert_eq!(result, vec!["Led by J. Janssens since 2001.", "Good times."]);
    }

    #[test]
    fn test_no_terminator_is_one_sentence() {
        let result = text::split_into_sentences("Just a heading without punctuation");
        assert_eq!(result, vec!["Just a heading without punctuation"]);
    }

    #[test]
    fn test_punctuation_without_whitespace_does_not_split() {
        let result = text::split_into_sentences("Visit example.com today. Thanks.");
        assert_eq!(result, vec!["Visit example.com today.", "Thanks."]);
    }
}
