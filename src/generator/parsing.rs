//! Splits raw model output into a title and a body.

use super::GeneratedArticle;

pub const FALLBACK_TITLE: &str = "Rugby notes of the week";
pub const FALLBACK_CONTENT: &str = "No article text was produced this time.";

fn clean_title(line: &str) -> String {
    let mut title = line.trim().trim_start_matches('#').trim();

    if let Some(label) = title.get(..6)
        && label.eq_ignore_ascii_case("title:")
    {
        title = title[6..].trim();
    }

    for wrapper in ["**", "\"", "'", "*"] {
        if let Some(inner) = title
            .strip_prefix(wrapper)
            .and_then(|t| t.strip_suffix(wrapper))
        {
            title = inner.trim();
        }
    }

    title.to_string()
}

/// First line is the title (markdown heading marks, a `Title:` label and
/// wrapping emphasis or quotes removed), the trimmed remainder is the body.
/// Empty parts are replaced by fixed fallbacks.
pub fn parse_generated_text(raw: &str) -> GeneratedArticle {
    let raw = raw.trim();
    let (first_line, rest) = raw.split_once('\n').unwrap_or((raw, ""));

    let title = clean_title(first_line);
    let content = rest.trim();

    GeneratedArticle {
        title: if title.is_empty() {
            FALLBACK_TITLE.to_string()
        } else {
            title
        },
        content: if content.is_empty() {
            FALLBACK_CONTENT.to_string()
        } else {
            content.to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_title_and_body() {
        let parsed = parse_generated_text("# Toulouse Hold Firm\n\nFirst paragraph.\nSecond.\n\n");
        assert_eq!(parsed.title, "Toulouse Hold Firm");
        assert_eq!(parsed.content, "First paragraph.\nSecond.");
    }

    #[test]
    fn test_decorated_titles() {
        assert_eq!(parse_generated_text("## **Bold Title**\nBody").title, "Bold Title");
        assert_eq!(parse_generated_text("\"Quoted\"\nBody").title, "Quoted");
        assert_eq!(parse_generated_text("Title: Labeled\nBody").title, "Labeled");
        assert_eq!(parse_generated_text("  Plain  \r\nBody").title, "Plain");
    }

    #[test]
    fn test_fallbacks() {
        let empty = parse_generated_text("");
        assert_eq!(empty.title, FALLBACK_TITLE);
        assert_eq!(empty.content, FALLBACK_CONTENT);

        let title_only = parse_generated_text("Just a title");
        assert_eq!(title_only.title, "Just a title");
        assert_eq!(title_only.content, FALLBACK_CONTENT);

        let no_title = parse_generated_text("###\nBody survives");
        assert_eq!(no_title.title, FALLBACK_TITLE);
        assert_eq!(no_title.content, "Body survives");
    }

    #[test]
    fn test_non_ascii_title_prefix() {
        let parsed = parse_generated_text("Título é bom\nCorpo");
        assert_eq!(parsed.title, "Título é bom");
    }
}
