use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use rust_i18n::t;

use crate::ui::layout::centered_rect;
use crate::ui::theme::Theme;

const SHOW_FOR: Duration = Duration::from_millis(2500);
const FRAME: Duration = Duration::from_millis(150);
const GLYPHS: [char; 6] = ['*', '+', 'o', '\u{2022}', '\u{2726}', '~'];

/// A running milestone celebration.
#[derive(Clone, Debug)]
pub struct Celebration {
    pub combo: u32,
    started: Instant,
    seed: u64,
}

impl Celebration {
    pub fn new(combo: u32, started: Instant) -> Self {
        Self {
            combo,
            started,
            seed: u64::from(combo).wrapping_mul(0x9e37_79b9_7f4a_7c15),
        }
    }

    pub fn is_over(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= SHOW_FOR
    }

    fn frame(&self, now: Instant) -> u64 {
        (now.saturating_duration_since(self.started).as_millis() / FRAME.as_millis()) as u64
    }
}

/// Confetti over the whole area with a banner in the middle.
pub struct CelebrationBanner<'a> {
    celebration: &'a Celebration,
    now: Instant,
    theme: &'a Theme,
}

impl<'a> CelebrationBanner<'a> {
    pub fn new(celebration: &'a Celebration, now: Instant, theme: &'a Theme) -> Self {
        Self {
            celebration,
            now,
            theme,
        }
    }
}

impl Widget for CelebrationBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let colors = &self.theme.colors;
        let palette = colors.confetti();

        let frame = self.celebration.frame(self.now);
        let mut rng = SmallRng::seed_from_u64(self.celebration.seed ^ frame);
        let pieces = (area.width as usize * area.height as usize) / 12;
        for _ in 0..pieces {
            let x = area.x + rng.gen_range(0..area.width);
            let y = area.y + rng.gen_range(0..area.height);
            let glyph = GLYPHS[rng.gen_range(0..GLYPHS.len())];
            let mut style = Style::default();
            if !palette.is_empty() {
                style = style.fg(palette[rng.gen_range(0..palette.len())]);
            }
            buf[(x, y)].set_char(glyph).set_style(style);
        }

        let text = t!("milestone.banner", combo = self.celebration.combo).to_string();
        let width = text.chars().count() as u16 + 8;
        let banner = centered_rect(width, 3, area);
        Clear.render(banner, buf);
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(colors.warning())
                    .bg(colors.bg())
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(colors.accent()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(banner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celebration_expires() {
        let start = Instant::now();
        let celebration = Celebration::new(5, start);
        assert!(!celebration.is_over(start + Duration::from_millis(100)));
        assert!(celebration.is_over(start + SHOW_FOR));
    }

    #[test]
    fn test_frames_advance() {
        let start = Instant::now();
        let celebration = Celebration::new(10, start);
        assert_eq!(celebration.frame(start), 0);
        assert_eq!(celebration.frame(start + Duration::from_millis(450)), 3);
    }

    #[test]
    fn test_render_fits_tiny_area() {
        let start = Instant::now();
        let celebration = Celebration::new(5, start);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 6, 2);
        let mut buf = Buffer::empty(area);
        CelebrationBanner::new(&celebration, start, &theme).render(area, &mut buf);
    }
}
