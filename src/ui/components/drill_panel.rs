use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::app::Feedback;
use crate::ui::line_input::AnswerInput;
use crate::ui::theme::Theme;

/// Question, answer field and the verdict for the last submission.
pub struct DrillPanel<'a> {
    question: Option<String>,
    input: &'a AnswerInput,
    feedback: Option<&'a Feedback>,
    theme: &'a Theme,
}

impl<'a> DrillPanel<'a> {
    pub fn new(
        question: Option<String>,
        input: &'a AnswerInput,
        feedback: Option<&'a Feedback>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            question,
            input,
            feedback,
            theme,
        }
    }
}

fn feedback_line(feedback: &Feedback, theme: &Theme) -> Line<'static> {
    let colors = &theme.colors;
    let (text, color) = match feedback {
        Feedback::Correct { points } => (
            t!("feedback.correct", points = points).to_string(),
            colors.success(),
        ),
        Feedback::Incorrect { expected } => (
            t!("feedback.incorrect", expected = expected).to_string(),
            colors.error(),
        ),
        Feedback::Unreadable { hint } => (
            t!("feedback.format", hint = hint).to_string(),
            colors.warning(),
        ),
        Feedback::OutOfRange { constant } => (
            t!("feedback.out_of_range", constant = constant).to_string(),
            colors.warning(),
        ),
        Feedback::Empty { hint } => (t!("feedback.empty", hint = hint).to_string(), colors.muted()),
        Feedback::NewProblem => (t!("feedback.new_problem").to_string(), colors.muted()),
        Feedback::Reset => (t!("feedback.reset").to_string(), colors.muted()),
        Feedback::Difficulty { level } => (
            t!("feedback.difficulty", level = level).to_string(),
            colors.accent(),
        ),
    };
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

impl Widget for DrillPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(area);

        let question = self.question.unwrap_or_default();
        let problem_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                question,
                Style::default()
                    .fg(colors.problem())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                t!("app.tagline").to_string(),
                Style::default().fg(colors.muted()),
            )),
        ];
        Paragraph::new(problem_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(t!("problem.title").to_string())
                    .border_style(Style::default().fg(colors.border())),
            )
            .render(layout[0], buf);

        let (before, at, after) = self.input.render_parts();
        let text_style = Style::default().fg(colors.input_fg());
        let cursor_style = Style::default().fg(colors.cursor_fg()).bg(colors.cursor_bg());
        let input_line = if self.input.value().is_empty() {
            Line::from(vec![
                Span::styled(" ", cursor_style),
                Span::styled(
                    format!(" {}", t!("input.placeholder")),
                    Style::default().fg(colors.muted()),
                ),
            ])
        } else {
            Line::from(vec![
                Span::styled(before.to_string(), text_style),
                Span::styled(at.map_or(" ".to_string(), String::from), cursor_style),
                Span::styled(after.to_string(), text_style),
            ])
        };
        Paragraph::new(input_line)
            .block(
                Block::bordered()
                    .title(t!("input.title").to_string())
                    .border_style(Style::default().fg(colors.border_focused())),
            )
            .render(layout[1], buf);

        if let Some(feedback) = self.feedback {
            Paragraph::new(feedback_line(feedback, self.theme))
                .wrap(Wrap { trim: true })
                .render(layout[2], buf);
        }
    }
}
