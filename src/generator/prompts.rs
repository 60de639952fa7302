//! Prompt texts for the two article kinds.

pub const ROUNDUP_SYSTEM_PROMPT: &str = "You are a rugby journalist writing for a personal rugby blog. \
You write weekly league round-ups from the match data you are given and never invent results, \
scores or teams that are not in the data. Write in English, in a lively but factual tone. \
Answer with the article title on the first line, without any prefix, followed by the article body \
in plain paragraphs. Do not use markdown headings inside the body.";

pub const VLOG_SYSTEM_PROMPT: &str = "You are a rugby analyst writing opinion pieces in the style \
of a video blog script for a personal rugby blog. Explain tactics and trends clearly for an \
informed fan, with concrete examples. Answer with the article title on the first line, without \
any prefix, followed by the article body in plain paragraphs.";

pub fn roundup_user_prompt(summary_text: &str) -> String {
    format!(
        "Write a weekly round-up article (400 to 600 words) based on the following data.\n\n{summary_text}"
    )
}

/// Vlog prompt. The digest lists earlier vlogs so the model can pick a fresh angle.
pub fn vlog_user_prompt(topic: &str, prior_vlogs_digest: &str) -> String {
    let mut prompt = format!(
        "Write a vlog-style opinion article (500 to 700 words) on this topic:\n{topic}\n"
    );
    if prior_vlogs_digest.trim().is_empty() {
        prompt.push_str("\nThis is the first vlog article on the blog.\n");
    } else {
        prompt.push_str(
            "\nPrevious vlog articles on the blog (avoid repeating their angle and titles):\n",
        );
        prompt.push_str(prior_vlogs_digest);
        prompt.push('\n');
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundup_prompt_embeds_summary() {
        let prompt = roundup_user_prompt("League: Top 14 (TOP14)");
        assert!(prompt.ends_with("League: Top 14 (TOP14)"));
    }

    #[test]
    fn test_vlog_prompt_lists_prior_vlogs() {
        let digest = "- Title: \"Kicking\" | Topic: kicking";
        let prompt = vlog_user_prompt("Pendulum defense", digest);
        assert!(prompt.contains("Pendulum defense"));
        assert!(prompt.contains(digest));

        let first = vlog_user_prompt("Pendulum defense", "");
        assert!(first.contains("first vlog"));
    }
}
