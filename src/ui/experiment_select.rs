use crate::experiments::{experiments_for_grade, ExperimentId};
use crate::session::LabSession;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct ExperimentSelectScreen {
    pub selected_index: usize,
    /// Shown when the chosen experiment has no bench yet
    pub notice: Option<String>,
}

impl Default for ExperimentSelectScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentSelectScreen {
    pub fn new() -> Self {
        Self {
            selected_index: 0,
            notice: None,
        }
    }

    /// The session's grade first, then everything else in catalog order.
    pub fn experiments(session: &LabSession) -> Vec<ExperimentId> {
        let mut list = experiments_for_grade(session.grade);
        list.extend(ExperimentId::ALL.into_iter().filter(|e| e.grade() != session.grade));
        list
    }

    pub fn selected(&self, session: &LabSession) -> Option<ExperimentId> {
        Self::experiments(session).get(self.selected_index).copied()
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.notice = None;
    }

    pub fn move_down(&mut self, session: &LabSession) {
        let len = Self::experiments(session).len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
        self.notice = None;
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, session: &LabSession) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Choose an Experiment",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                session.greeting(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        let experiments = Self::experiments(session);
        self.draw_list(f, main_chunks[0], &experiments, session);
        if let Some(experiment) = experiments.get(self.selected_index) {
            self.draw_details(f, main_chunks[1], *experiment);
        }

        let controls = Paragraph::new("[↑/↓] Select    [Enter] Open    [S] Sign out    [Q] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[2]);
    }

    fn draw_list(
        &self,
        f: &mut Frame,
        area: Rect,
        experiments: &[ExperimentId],
        session: &LabSession,
    ) {
        let block = Block::default()
            .title(" Experiments ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let lines: Vec<Line> = experiments
            .iter()
            .enumerate()
            .map(|(i, experiment)| {
                let prefix = if i == self.selected_index { "> " } else { "  " };
                let mut style = if experiment.grade() == session.grade {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                if i == self.selected_index {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let tag = if experiment.has_simulation() { "" } else { " (guide)" };
                Line::from(Span::styled(
                    format!("{}{}{}", prefix, experiment, tag),
                    style,
                ))
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_details(&self, f: &mut Frame, area: Rect, experiment: ExperimentId) {
        let block = Block::default()
            .title(format!(" {} ", experiment.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let mut lines = vec![
            Line::from(Span::styled(
                experiment.description(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Grade: ", Style::default().fg(Color::DarkGray)),
                Span::raw(experiment.grade().to_string()),
                Span::styled("   Duration: ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} min", experiment.duration_minutes())),
                Span::styled("   Difficulty: ", Style::default().fg(Color::DarkGray)),
                Span::raw(experiment.difficulty().name()),
            ]),
            Line::from(""),
            Line::from(Span::styled("Materials", Style::default().fg(Color::Yellow))),
        ];
        lines.extend(
            experiment
                .materials()
                .iter()
                .map(|m| Line::from(format!("  • {}", m))),
        );

        if let Some(notice) = &self.notice {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::LightRed),
            )));
        }

        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
