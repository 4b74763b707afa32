use teloxide::utils::html;

use super::QuizResult;

const WATERMARK: &str = "Scanned by redflagscorecard.com 🚩";

/// Telegram HTML rendering of a result, laid out like the share image.
pub fn render_card(result: &QuizResult) -> String {
    let mut card = format!(
        "<b>Red Flag Scorecard</b>\n\n\
         🚩 Red: <b>{}</b>\n\
         ⚠️ Yellow: <b>{}</b>\n\
         ✅ Green: <b>{}</b>\n\n\
         <b>{}</b>\n\
         <i>{}</i>\n",
        result.red_flags,
        result.yellow_flags,
        result.green_flags,
        html::escape(&result.title),
        html::escape(&result.description),
    );

    if let Some(roast) = &result.roast {
        card.push_str(&format!("\n🔥 {}\n", html::escape(roast)));
    }

    card.push_str(&format!("\n{}", WATERMARK));
    card
}

/// Plain text meant to be forwarded; the roast replaces the description
/// once one has been generated.
pub fn share_text(result: &QuizResult, share_url: &str) -> String {
    let blurb = result.roast.as_deref().unwrap_or(&result.description);
    format!(
        "I just got \"{}\" on the Red Flag Scorecard! 🚩\n\n{}\n\nTake the quiz: {}",
        result.title, blurb, share_url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Gender;

    fn result() -> QuizResult {
        QuizResult {
            red_flags: 9,
            yellow_flags: 2,
            green_flags: 0,
            title: "Queen of Chaos & Drama 🚩".to_string(),
            description: "Sis, the UN just issued sanctions on your love life.".to_string(),
            gender: Gender::Female,
            roast: None,
        }
    }

    #[test]
    fn test_card_escapes_html() {
        let card = render_card(&result());
        assert!(card.contains("Queen of Chaos &amp; Drama"));
        assert!(card.contains("🚩 Red: <b>9</b>"));
        assert!(card.contains("⚠️ Yellow: <b>2</b>"));
        assert!(card.contains("✅ Green: <b>0</b>"));
        assert!(card.ends_with(WATERMARK));
    }

    #[test]
    fn test_card_includes_roast_when_present() {
        let mut result = result();
        assert!(!render_card(&result).contains("🔥"));

        result.attach_roast("Bestie <3 chaos".to_string());
        assert!(render_card(&result).contains("🔥 Bestie &lt;3 chaos"));
    }

    #[test]
    fn test_share_text_prefers_roast() {
        let mut result = result();
        let text = share_text(&result, "https://example.org");
        assert_eq!(
            text,
            "I just got \"Queen of Chaos & Drama 🚩\" on the Red Flag Scorecard! 🚩\n\n\
             Sis, the UN just issued sanctions on your love life.\n\n\
             Take the quiz: https://example.org"
        );

        result.attach_roast("Roasted.".to_string());
        let text = share_text(&result, "https://example.org");
        assert!(text.contains("\n\nRoasted.\n\n"));
        assert!(!text.contains("sanctions"));
    }
}
