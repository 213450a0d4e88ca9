use tricard_lib::flashcards::{CardFace, Flashcard, Side};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color code when color output is on
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// One-line preview of a side: its text, or a marker for image-only sides
pub fn face_preview(face: &CardFace, max_chars: usize) -> String {
    let text = face.text_or_empty().trim();
    let mut preview = if text.is_empty() {
        String::new()
    } else {
        truncate(&text.replace('\n', " "), max_chars)
    };

    if face.image.is_some() {
        if !preview.is_empty() {
            preview.push(' ');
        }
        preview.push_str("[image]");
    }
    preview
}

/// Multi-line rendering of a card for `cards` and `add`
pub fn render_card(card: &Flashcard, use_color: bool) -> Vec<String> {
    let star = if card.is_favorite { "\u{2605}" } else { " " };
    let mut lines = vec![format!(
        "{} {}  {}",
        paint(star, Color::YELLOW, use_color),
        paint(&card.id, Color::GRAY, use_color),
        paint(&card.deck, Color::DIM, use_color),
    )];

    for side in Side::ALL {
        lines.push(format!(
            "    {} {}",
            paint(&format!("{}:", side), Color::CYAN, use_color),
            face_preview(card.face(side), 70)
        ));
    }
    lines
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_preview() {
        let face = CardFace::text("line one\nline two");
        assert_eq!(face_preview(&face, 40), "line one line two");
        assert_eq!(face_preview(&face, 5), "line\u{2026}");

        let image_only = CardFace {
            text: None,
            image: Some("data:image/png;base64,AA==".to_string()),
        };
        assert_eq!(face_preview(&image_only, 40), "[image]");
    }

    #[test]
    fn test_paint_without_color() {
        assert_eq!(paint("x", Color::RED, false), "x");
        assert_eq!(paint("x", Color::RED, true), "\x1b[31mx\x1b[0m");
    }
}
