use std::io::{BufWriter, Stdout};

use crate::canvas::Canvas;

// Two fixed panel presets, picked once from the terminal width.
const BREAKPOINT_COLS: u16 = 100;
const WIDE_INNER: usize = 60;
const NARROW_INNER: usize = 34;

const CARD_FG: (u8, u8, u8) = (244, 234, 200);
const CARD_BG: (u8, u8, u8) = (34, 22, 28);

pub fn inner_width(cols: u16) -> usize {
    if cols >= BREAKPOINT_COLS {
        WIDE_INNER
    } else {
        NARROW_INNER
    }
}

// The greeting panel raised over the running show once the box is open.
// Prebuilt as bordered lines; drawn as positioned text after the pixel pass.
pub struct Card {
    lines: Vec<String>,
}

impl Card {
    pub fn new(cols: u16, message: &str) -> Self {
        let inner = inner_width(cols);
        let text_width = inner - 4;

        let mut lines = Vec::new();
        lines.push(format!("┌{}┐", "─".repeat(inner)));
        lines.push(format!("│{}│", " ".repeat(inner)));
        for row in wrap(message, text_width) {
            lines.push(format!("│  {row:^text_width$}  │"));
        }
        lines.push(format!("│{}│", " ".repeat(inner)));
        lines.push(format!("└{}┘", "─".repeat(inner)));

        Self { lines }
    }

    pub fn draw(
        &self,
        canvas: &Canvas,
        stdout: &mut BufWriter<Stdout>,
        cols: u16,
        rows: u16,
    ) -> std::io::Result<()> {
        let width = self.lines[0].chars().count() as u16;
        let col = cols.saturating_sub(width) / 2 + 1;
        let top = rows.saturating_sub(self.lines.len() as u16) / 2 + 1;

        for (i, line) in self.lines.iter().enumerate() {
            canvas.overlay_text(stdout, top + i as u16, col, CARD_FG, CARD_BG, line)?;
        }
        Ok(())
    }
}

// Word wrap to the panel's text width; words longer than a full line are
// broken by characters.
fn wrap(message: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in message.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > width {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                rows.push(chunk.iter().collect());
            }
            continue;
        }

        let current_len = current.chars().count();
        if current.is_empty() {
            current.push_str(word);
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_picks_the_preset() {
        assert_eq!(inner_width(99), NARROW_INNER);
        assert_eq!(inner_width(100), WIDE_INNER);
        assert_eq!(inner_width(300), WIDE_INNER);
    }

    #[test]
    fn panel_lines_share_one_width() {
        for cols in [80, 160] {
            let card = Card::new(cols, "Merry Christmas to you and yours!");
            let width = card.lines[0].chars().count();
            assert_eq!(width, inner_width(cols) + 2);
            for line in &card.lines {
                assert_eq!(line.chars().count(), width);
            }
        }
    }

    #[test]
    fn message_survives_wrapping() {
        let card = Card::new(80, "warm wishes from all of us");
        let joined: String = card.lines.join(" ");
        for word in ["warm", "wishes", "from", "all", "of", "us"] {
            assert!(joined.contains(word), "lost {word}");
        }
    }

    #[test]
    fn wrap_packs_words_and_breaks_long_ones() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn chunked_word_still_fits_the_panel() {
        let card = Card::new(80, "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let width = card.lines[0].chars().count();
        for line in &card.lines {
            assert_eq!(line.chars().count(), width);
        }
    }
}
