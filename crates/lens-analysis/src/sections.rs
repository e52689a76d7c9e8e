//! Parsing of marker-delimited analysis text into titled sections

use serde::{Deserialize, Serialize};

/// The delimiter token the prompt requests and this parser consumes
pub const SECTION_MARKER: &str = "[SECTION]";

/// Content used when a title arrives without a body
const FALLBACK_CONTENT: &str = "Analysis not available";

/// One titled block of the parsed analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub title: String,
    pub content: String,
}

/// Split a raw model response into ordered (title, content) sections
///
/// Fragments between markers pair up as title/content; a trailing title
/// without a body still yields a section with the fallback content. Input
/// containing no marker at all yields no sections, since a bare fragment has
/// no content half to pair with. Repeated titles are kept; the model's output
/// is authoritative, so nothing is validated against the requested titles.
pub fn parse_sections(raw: &str) -> Vec<AnalysisSection> {
    if !raw.contains(SECTION_MARKER) {
        return Vec::new();
    }

    let fragments: Vec<&str> = raw
        .split(SECTION_MARKER)
        .filter(|fragment| !fragment.is_empty())
        .collect();

    fragments
        .chunks(2)
        .map(|pair| {
            let title = pair[0].trim();
            let content = pair
                .get(1)
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .unwrap_or(FALLBACK_CONTENT);
            AnalysisSection {
                title: title.to_string(),
                content: content.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(sections: &[AnalysisSection]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_well_formed_response() {
        let sections = parse_sections("[SECTION]A[SECTION]body1[SECTION]B[SECTION]body2");
        assert_eq!(
            sections,
            vec![
                AnalysisSection {
                    title: "A".to_string(),
                    content: "body1".to_string()
                },
                AnalysisSection {
                    title: "B".to_string(),
                    content: "body2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_no_markers_yields_nothing() {
        assert!(parse_sections("no markers here").is_empty());
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn test_title_without_body_gets_fallback() {
        let sections = parse_sections("[SECTION]OnlyTitle");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "OnlyTitle");
        assert_eq!(sections[0].content, FALLBACK_CONTENT);
    }

    #[test]
    fn test_whitespace_body_gets_fallback() {
        let sections = parse_sections("[SECTION]Signal[SECTION]   \n  ");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, FALLBACK_CONTENT);
    }

    #[test]
    fn test_titles_and_bodies_are_trimmed() {
        let sections = parse_sections("[SECTION] Key Levels \n[SECTION]\n  1.1000 support\n");
        assert_eq!(sections[0].title, "Key Levels");
        assert_eq!(sections[0].content, "1.1000 support");
    }

    #[test]
    fn test_order_preserved_and_duplicates_kept() {
        let sections = parse_sections(
            "[SECTION]Signal[SECTION]first[SECTION]Notes[SECTION]middle[SECTION]Signal[SECTION]second",
        );
        assert_eq!(titles(&sections), vec!["Signal", "Notes", "Signal"]);
        assert_eq!(sections[2].content, "second");
    }

    #[test]
    fn test_leading_prose_becomes_first_title() {
        // A model that chats before the first marker: the prose pairs with
        // the first marked fragment, mirroring the original split behavior.
        let sections = parse_sections("Sure, here you go:[SECTION]Technical Summary[SECTION]Up.");
        assert_eq!(sections[0].title, "Sure, here you go:");
        assert_eq!(sections[0].content, "Technical Summary");
        assert_eq!(sections[1].title, "Up.");
        assert_eq!(sections[1].content, FALLBACK_CONTENT);
    }
}
