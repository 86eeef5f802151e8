use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::SessionState;
use crate::ui::components::history_list::HistoryList;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

pub struct StatsSidebar<'a> {
    session: &'a SessionState,
    history_len: usize,
    theme: &'a Theme,
    compact: bool,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(session: &'a SessionState, history_len: usize, theme: &'a Theme) -> Self {
        Self {
            session,
            history_len,
            theme,
            compact: false,
        }
    }

    /// Side-by-side history and stats for the short strip of the narrow layout.
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    fn stats_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let session = self.session;
        let history = session.history();

        let accuracy = session.accuracy();
        let acc_color = if accuracy >= 90.0 {
            colors.success()
        } else if accuracy >= 70.0 {
            colors.warning()
        } else {
            colors.error()
        };

        vec![
            Line::from(vec![
                Span::styled(t!("stats.score").to_string(), Style::default().fg(colors.fg())),
                Span::styled(
                    session.score().to_string(),
                    Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled(t!("stats.combo").to_string(), Style::default().fg(colors.fg())),
                Span::styled(session.combo().to_string(), Style::default().fg(colors.warning())),
            ]),
            Line::from(vec![
                Span::styled(t!("stats.best").to_string(), Style::default().fg(colors.fg())),
                Span::styled(session.best_combo().to_string(), Style::default().fg(colors.fg())),
            ]),
            Line::from(vec![
                Span::styled(t!("stats.accuracy").to_string(), Style::default().fg(colors.fg())),
                Span::styled(format!("{accuracy:.0}%"), Style::default().fg(acc_color)),
            ]),
            Line::from(vec![
                Span::styled(t!("stats.attempts").to_string(), Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}/{}", history.correct(), history.attempts()),
                    Style::default().fg(colors.muted()),
                ),
            ]),
        ]
    }

    fn render_stats(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(t!("stats.title").to_string())
            .border_style(Style::default().fg(self.theme.colors.border()));
        Paragraph::new(self.stats_lines()).block(block).render(area, buf);
    }

    fn render_milestone(&self, area: Rect, buf: &mut Buffer) {
        let rules = self.session.rules();
        let combo = self.session.combo();
        let (label, caption) = match rules.next_milestone(combo) {
            Some(next) => (t!("stats.next_milestone").to_string(), format!("{combo}/{next}")),
            None => (t!("stats.all_milestones").to_string(), combo.to_string()),
        };
        ProgressBar::new(&label, &caption, rules.milestone_progress(combo), self.theme)
            .render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        HistoryList::new(self.session.history().recent(self.history_len), self.theme)
            .render(area, buf);
    }
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.compact {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(4), Constraint::Length(3)])
                .split(columns[1]);

            self.render_history(columns[0], buf);
            self.render_stats(right[0], buf);
            self.render_milestone(right[1], buf);
            return;
        }

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Min(4),
            ])
            .split(area);

        self.render_stats(sections[0], buf);
        self.render_milestone(sections[1], buf);
        self.render_history(sections[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::format::format_factors;
    use crate::generator::{Difficulty, RandomProblemGenerator};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn session_with_attempt() -> (SessionState, String) {
        let mut generator = RandomProblemGenerator::seeded(Difficulty::default(), 7).unwrap();
        let mut session = SessionState::default();
        let problem = *session.request_new_problem(&mut generator);
        session
            .submit(&format_factors(problem.answer()), &mut generator)
            .unwrap();
        (session, problem.question_text())
    }

    #[test]
    fn test_compact_strip_shows_history() {
        let (session, question) = session_with_attempt();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 10);
        let mut buf = Buffer::empty(area);

        StatsSidebar::new(&session, 10, &theme).compact().render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains(&question), "history missing from:\n{text}");
        assert!(text.contains("1/1"), "attempt count missing from:\n{text}");
    }

    #[test]
    fn test_full_sidebar_shows_history() {
        let (session, question) = session_with_attempt();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 24);
        let mut buf = Buffer::empty(area);

        StatsSidebar::new(&session, 10, &theme).render(area, &mut buf);

        assert!(buffer_text(&buf).contains(&question));
    }
}
