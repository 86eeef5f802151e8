use chrono::Local;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::AttemptRecord;
use crate::ui::theme::Theme;

/// Recent attempts, newest at the bottom.
pub struct HistoryList<'a> {
    records: Vec<&'a AttemptRecord>,
    theme: &'a Theme,
}

impl<'a> HistoryList<'a> {
    pub fn new(records: impl IntoIterator<Item = &'a AttemptRecord>, theme: &'a Theme) -> Self {
        Self {
            records: records.into_iter().collect(),
            theme,
        }
    }
}

impl Widget for HistoryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(t!("history.title").to_string())
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.records.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                t!("history.empty").to_string(),
                Style::default().fg(colors.muted()),
            )))
            .render(inner, buf);
            return;
        }

        // Two lines per record; keep the newest when space runs out.
        let fit = (inner.height as usize / 2).max(1);
        let skip = self.records.len().saturating_sub(fit);

        let mut lines: Vec<Line> = Vec::new();
        for record in self.records.iter().skip(skip) {
            let (mark, mark_color) = if record.correct {
                ("\u{2713}", colors.success())
            } else {
                ("\u{2717}", colors.error())
            };
            let time = record.at.with_timezone(&Local).format("%H:%M").to_string();

            lines.push(Line::from(vec![
                Span::styled(format!("{mark} "), Style::default().fg(mark_color)),
                Span::styled(record.question.clone(), Style::default().fg(colors.problem())),
                Span::styled(format!("  {time}"), Style::default().fg(colors.muted())),
            ]));

            let mut detail = vec![Span::styled(
                format!("  {}", record.answer),
                Style::default().fg(mark_color),
            )];
            if !record.correct {
                detail.push(Span::styled(" \u{2192} ", Style::default().fg(colors.muted())));
                detail.push(Span::styled(
                    record.expected.clone(),
                    Style::default().fg(colors.success()),
                ));
            }
            lines.push(Line::from(detail));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
