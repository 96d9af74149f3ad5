use crate::session::{validate_name, LabSession, GRADES};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct SignInScreen {
    pub name_input: String,
    pub cursor_position: usize,
    pub grade: u8,
    pub validation_error: Option<String>,
}

impl Default for SignInScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInScreen {
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            cursor_position: 0,
            grade: *GRADES.start(),
            validation_error: None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(4), // Name label + field
                Constraint::Length(2), // Grade
                Constraint::Length(2), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new("Virtual Science Lab")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        f.render_widget(Paragraph::new("Your name:"), chunks[2]);

        let input_area = Rect {
            x: chunks[2].x,
            y: chunks[2].y + 1,
            width: chunks[2].width,
            height: 3,
        };

        let input_text = {
            let chars: Vec<char> = self.name_input.chars().collect();
            let before: String = chars[..self.cursor_position].iter().collect();
            let after: String = chars[self.cursor_position..].iter().collect();
            format!("{}_{}", before, after)
        };

        let input_widget = Paragraph::new(input_text)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, input_area);

        let grade_line = Line::from(vec![
            Span::styled("Grade: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("◀ {} ▶", self.grade),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        f.render_widget(Paragraph::new(grade_line), chunks[3]);

        let validation_text = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if !self.name_input.trim().is_empty() {
            Line::from(Span::styled("✓ Ready", Style::default().fg(Color::Green)))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(validation_text), chunks[4]);

        let controls = Paragraph::new("[Enter] Enter the lab    [←/→] Grade    [Esc] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[6]);
    }

    pub fn handle_char_input(&mut self, c: char) {
        let byte_index = self.byte_index();
        self.name_input.insert(byte_index, c);
        self.cursor_position += 1;
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte_index = self.byte_index();
            self.name_input.remove(byte_index);
            self.validate();
        }
    }

    /// Byte offset of the cursor; names may hold multi-byte letters.
    fn byte_index(&self) -> usize {
        self.name_input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.name_input.len())
    }

    pub fn grade_up(&mut self) {
        if self.grade < *GRADES.end() {
            self.grade += 1;
        }
    }

    pub fn grade_down(&mut self) {
        if self.grade > *GRADES.start() {
            self.grade -= 1;
        }
    }

    pub fn validate(&mut self) {
        self.validation_error = validate_name(&self.name_input).err();
    }

    /// Build the session, or record why it can't be built.
    pub fn submit(&mut self) -> Option<LabSession> {
        match LabSession::new(&self.name_input, self.grade) {
            Ok(session) => Some(session),
            Err(e) => {
                self.validation_error = Some(e);
                None
            }
        }
    }
}
