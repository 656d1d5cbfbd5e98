use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::diff::Outcome;
use crate::round::DisplaySnapshot;

const HORIZONTAL_MARGIN: u16 = 5;

/// One frame of the round, ready to render: correct characters green,
/// mistakes red, the rest dimmed with the cursor underlined. All escaping of
/// raw characters for the terminal happens here, not in the comparator.
pub struct RoundView<'a> {
    pub title: &'a str,
    pub target: &'a str,
    pub typed: &'a str,
    pub snapshot: &'a DisplaySnapshot,
}

// Newlines and mistyped spaces have no visible glyph of their own.
fn visible(c: char) -> String {
    match c {
        '\n' => "¶".to_string(),
        c => c.to_string(),
    }
}

impl Widget for RoundView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let mut prompt_occupied_lines =
            ((self.target.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;

        if self.target.width() <= max_chars_per_line as usize {
            prompt_occupied_lines = 1;
        }

        let header_lines = 3; // title, timer, status
        let stats_lines = 2; // padding + stats
        let pad = area
            .height
            .saturating_sub(prompt_occupied_lines + header_lines + stats_lines)
            / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(pad),
                    Constraint::Length(header_lines),
                    Constraint::Length(prompt_occupied_lines),
                    Constraint::Length(stats_lines),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(self.title.to_string(), bold_style)),
            Line::from(Span::styled(
                self.snapshot.remaining_time.clone(),
                dim_bold_style,
            )),
            Line::from(Span::styled(self.snapshot.status.clone(), bold_style)),
        ])
        .alignment(Alignment::Center);

        header.render(chunks[1], buf);

        let typed_chars: Vec<char> = self.typed.chars().collect();
        let target_chars: Vec<char> = self.target.chars().collect();

        let mut spans = self
            .snapshot
            .diff
            .outcomes
            .iter()
            .enumerate()
            .map(|(idx, outcome)| match outcome {
                Outcome::Incorrect => Span::styled(
                    match typed_chars.get(idx) {
                        Some(' ') | None => "·".to_string(),
                        Some(c) => visible(*c),
                    },
                    red_bold_style,
                ),
                Outcome::Correct => Span::styled(
                    target_chars
                        .get(idx)
                        .map(|c| visible(*c))
                        .unwrap_or_default(),
                    green_bold_style,
                ),
            })
            .collect::<Vec<Span>>();

        let mut pending = self.snapshot.diff.pending.chars();
        if let Some(cursor_char) = pending.next() {
            spans.push(Span::styled(
                visible(cursor_char),
                underlined_dim_bold_style,
            ));
        }
        let rest: String = pending.map(|c| if c == '\n' { '¶' } else { c }).collect();
        if !rest.is_empty() {
            spans.push(Span::styled(rest, dim_bold_style));
        }

        let prompt = Paragraph::new(Line::from(spans))
            .alignment(if prompt_occupied_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: false });

        prompt.render(chunks[2], buf);

        let stats = Paragraph::new(Span::styled(
            format!(
                "{} correct   {} mistakes   {} acc   {} wpm",
                self.snapshot.correct,
                self.snapshot.mistakes,
                self.snapshot.accuracy,
                self.snapshot.gross_wpm
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);

        stats.render(chunks[3], buf);
    }
}
