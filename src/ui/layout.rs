use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥90 cols: drill area + stats/history sidebar
    Narrow, // <90 cols: drill area over a stats/history strip
}

/// Rows the drill panel needs for problem, input and feedback.
const DRILL_MIN_HEIGHT: u16 = 10;
/// Tallest the narrow stats/history strip grows.
const STRIP_MAX_HEIGHT: u16 = 10;
/// Below this the strip is dropped rather than drawn as bare borders.
const STRIP_MIN_HEIGHT: u16 = 4;

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 90 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    /// Narrow tier only: stats and history under the drill panel.
    pub strip: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(footer_lines.max(1)),
            ])
            .split(area);

        if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(vertical[1]);

            Self {
                header: vertical[0],
                main: horizontal[0],
                sidebar: Some(horizontal[1]),
                strip: None,
                footer: vertical[2],
                tier,
            }
        } else {
            let spare = vertical[1].height.saturating_sub(DRILL_MIN_HEIGHT);
            let (main, strip) = if spare >= STRIP_MIN_HEIGHT {
                let split = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Min(DRILL_MIN_HEIGHT),
                        Constraint::Length(spare.min(STRIP_MAX_HEIGHT)),
                    ])
                    .split(vertical[1]);
                (split[0], Some(split[1]))
            } else {
                (vertical[1], None)
            };

            Self {
                header: vertical[0],
                main,
                sidebar: None,
                strip,
                footer: vertical[2],
                tier,
            }
        }
    }
}

/// Greedily packs key hints into as few lines as fit `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let left = area.x.saturating_add((area.width.saturating_sub(w)) / 2);
    let top = area.y.saturating_add((area.height.saturating_sub(h)) / 2);
    Rect::new(left, top, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_width() {
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 120, 30)), LayoutTier::Wide);
        assert_eq!(LayoutTier::from_area(Rect::new(0, 0, 60, 30)), LayoutTier::Narrow);
    }

    #[test]
    fn test_narrow_layout_has_no_sidebar() {
        let layout = AppLayout::new(Rect::new(0, 0, 60, 30), 1);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.main.width, 60);
    }

    #[test]
    fn test_default_terminal_gets_history_strip() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24), 2);
        assert_eq!(layout.tier, LayoutTier::Narrow);
        let strip = layout.strip.expect("80x24 should show stats and history");
        assert_eq!(strip.width, 80);
        assert!(strip.height >= STRIP_MIN_HEIGHT);
        assert!(layout.main.height >= DRILL_MIN_HEIGHT);
        assert_eq!(strip.y, layout.main.y + layout.main.height);
    }

    #[test]
    fn test_tall_narrow_strip_is_capped() {
        let layout = AppLayout::new(Rect::new(0, 0, 89, 40), 2);
        assert_eq!(layout.strip.map(|s| s.height), Some(STRIP_MAX_HEIGHT));
    }

    #[test]
    fn test_short_terminal_drops_strip() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 14), 2);
        assert!(layout.strip.is_none());
    }

    #[test]
    fn test_wide_layout_has_no_strip() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 30), 1);
        assert!(layout.sidebar.is_some());
        assert!(layout.strip.is_none());
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[Enter] Check", "[Esc] Quit", "[Ctrl-N] New"], 28);
        assert_eq!(lines, vec![" [Enter] Check  [Esc] Quit", " [Ctrl-N] New"]);
    }

    #[test]
    fn test_pack_hint_lines_empty() {
        assert!(pack_hint_lines(&[], 40).is_empty());
        assert!(pack_hint_lines(&["a"], 0).is_empty());
    }

    #[test]
    fn test_centered_rect_clamps() {
        let rect = centered_rect(50, 5, Rect::new(0, 0, 40, 20));
        assert_eq!(rect, Rect::new(0, 7, 40, 5));
    }
}
