use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default selection preprocessor
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        // Unicode normalization (NFKC)
        text = text.nfkc().collect();

        text = text.replace(['\n', '\r'], " ");

        text.trim().to_lowercase()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_trimmed_and_lowercased() {
        assert_eq!(DefaultPreprocessor.process("  Atomic Bomb\n"), "atomic bomb");
    }

    #[test]
    fn fullwidth_latin_is_folded() {
        assert_eq!(DefaultPreprocessor.process("ＡＢＣ"), "abc");
    }

    #[test]
    fn blank_selection_stays_empty() {
        assert_eq!(DefaultPreprocessor.process(" \t "), "");
    }
}
