//! Line grammars of the supported dictionary dumps.
//!
//! ```text
//! ■WORD  {PART} : MEAN          EIJIRO, with part of speech
//! ■WORD : MEAN                  EIJIRO
//! WORD<TAB>MEAN1 / MEAN2 / ...  EJDIC
//! ```

use lazy_types::Sense;
use regex::Regex;

/// Compiled line grammars, built once per import
pub struct LineParser {
    eijiro_with_part: Regex,
    eijiro: Regex,
    ejdic: Regex,
    bracketed_link: Regex,
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            eijiro_with_part: Regex::new(r"■(.*)  \{(.*)\} : (.*)").expect("valid pattern"),
            eijiro: Regex::new(r"■(.*) : (.*)").expect("valid pattern"),
            ejdic: Regex::new(r"(.+)\t(.+)").expect("valid pattern"),
            bracketed_link: Regex::new(r"<→.+>").expect("valid pattern"),
        }
    }

    /// Headword and senses of one line, `None` for header, blank or comment lines
    pub fn parse(&self, line: &str) -> Option<(String, Vec<Sense>)> {
        if let Some(caps) = self.eijiro_with_part.captures(line) {
            let mean = self.link_eijiro(&caps[3]);
            return Some((caps[1].to_string(), vec![Sense::with_part(&caps[2], mean)]));
        }

        if let Some(caps) = self.eijiro.captures(line) {
            let mean = self.link_eijiro(&caps[2]);
            return Some((caps[1].to_string(), vec![Sense::new(mean)]));
        }

        if let Some(caps) = self.ejdic.captures(line) {
            let senses = caps[2].split(" / ").map(cleanse_ejdic).collect();
            return Some((caps[1].to_string(), senses));
        }

        None
    }

    /// `→word` becomes `<→word>` unless a bracketed link is already there
    fn link_eijiro(&self, mean: &str) -> String {
        if !mean.contains('→') || self.bracketed_link.is_match(mean) {
            return mean.to_string();
        }

        match mean.find('→') {
            Some(i) if i + '→'.len_utf8() < mean.len() => format!("{}<{}>", &mean[..i], &mean[i..]),
            _ => mean.to_string(),
        }
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// EJDIC alias `=word` becomes `<→word>`; other meanings keep their spacing
fn cleanse_ejdic(segment: &str) -> Sense {
    let trimmed = segment.trim();
    match trimmed.find('=') {
        Some(i) if i + 1 < trimmed.len() => {
            Sense::new(format!("{}<→{}>", &trimmed[..i], &trimmed[i + 1..]))
        }
        _ => Sense::new(segment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<(String, Vec<Sense>)> {
        LineParser::new().parse(line)
    }

    #[test]
    fn eijiro_word_and_meaning() {
        assert_eq!(
            parse("■AABBCC : meeeeaning of this word"),
            Some((
                "AABBCC".to_string(),
                vec![Sense::new("meeeeaning of this word")]
            ))
        );
    }

    #[test]
    fn eijiro_word_part_and_meaning() {
        assert_eq!(
            parse("■AABBCC  {papapart} : meeeeaning of this word"),
            Some((
                "AABBCC".to_string(),
                vec![Sense::with_part("papapart", "meeeeaning of this word")]
            ))
        );
    }

    #[test]
    fn eijiro_bracketed_link_is_kept() {
        assert_eq!(
            parse("■AABBCC : ＝<→link of this word>"),
            Some((
                "AABBCC".to_string(),
                vec![Sense::new("＝<→link of this word>")]
            ))
        );
    }

    #[test]
    fn eijiro_bare_link_is_bracketed() {
        assert_eq!(
            parse("■AA BB CC : →link of this word"),
            Some((
                "AA BB CC".to_string(),
                vec![Sense::new("<→link of this word>")]
            ))
        );
    }

    #[test]
    fn eijiro_part_and_bare_link() {
        assert_eq!(
            parse("■AA BB CC  {papa part} : →link of this word"),
            Some((
                "AA BB CC".to_string(),
                vec![Sense::with_part("papa part", "<→link of this word>")]
            ))
        );
    }

    #[test]
    fn eijiro_link_in_middle_of_meaning() {
        assert_eq!(
            parse("■colour : 《英》→color"),
            Some(("colour".to_string(), vec![Sense::new("《英》<→color>")]))
        );
        // nothing after the arrow, nothing to link
        assert_eq!(
            parse("■x : see →"),
            Some(("x".to_string(), vec![Sense::new("see →")]))
        );
    }

    #[test]
    fn ejdic_meaning_keeps_spacing() {
        assert_eq!(
            parse("AA BB CC\t meaning of AABBCC!"),
            Some((
                "AA BB CC".to_string(),
                vec![Sense::new(" meaning of AABBCC!")]
            ))
        );
    }

    #[test]
    fn ejdic_alias_becomes_link() {
        assert_eq!(
            parse("A-bomb\t =atomic bomb "),
            Some(("A-bomb".to_string(), vec![Sense::new("<→atomic bomb>")]))
        );
    }

    #[test]
    fn ejdic_splits_meanings() {
        assert_eq!(
            parse("abandon\t捨てる / =give up / 見捨てる"),
            Some((
                "abandon".to_string(),
                vec![
                    Sense::new("捨てる"),
                    Sense::new("<→give up>"),
                    Sense::new("見捨てる"),
                ]
            ))
        );
    }

    #[test]
    fn eijiro_takes_precedence_over_ejdic() {
        let (word, senses) = parse("■tab\tword : meaning").unwrap();
        assert_eq!(word, "tab\tword");
        assert_eq!(senses, vec![Sense::new("meaning")]);
    }

    #[test]
    fn non_entry_lines_fail() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("// header comment"), None);
        assert_eq!(parse("■no separator here"), None);
        assert_eq!(parse("\tmeaning without word"), None);
    }
}
