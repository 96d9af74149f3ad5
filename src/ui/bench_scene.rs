//! The lab bench: scene, controls, observation log and guide.

use super::effects::BenchEffects;
use crate::error::LabError;
use crate::experiments::circuit::{CircuitComponent, ComponentKind};
use crate::experiments::solubility::{Material, WATER};
use crate::experiments::walkthrough::{Walkthrough, WalkthroughEvent};
use crate::experiments::ExperimentId;
use crate::sequencer::StepStatus;
use crate::simulation::{SimulationFacade, StepProgress};
use crossterm::event::KeyCode;
use rand::Rng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Beaker interior, in terminal cells.
const BEAKER_WIDTH: usize = 15;
const BEAKER_HEIGHT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchAction {
    Stay,
    Back,
}

pub struct BenchScreen {
    pub bench: SimulationFacade,
    pub walkthrough: Walkthrough,
    pub effects: BenchEffects,
    pub selected: usize,
    pub show_walkthrough: bool,
    last_progress: Rc<Cell<Option<StepProgress>>>,
    opened_at: Instant,
}

impl BenchScreen {
    pub fn open(experiment: ExperimentId, show_walkthrough: bool) -> Result<Self, LabError> {
        let mut bench = SimulationFacade::open(experiment)?;
        let last_progress = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last_progress);
        bench.on_progress(move |progress| {
            tracing::debug!(?progress, "bench progress");
            sink.set(Some(progress));
        });
        Ok(Self {
            bench,
            walkthrough: Walkthrough::new(experiment),
            effects: BenchEffects::new(),
            selected: 0,
            show_walkthrough,
            last_progress,
            opened_at: Instant::now(),
        })
    }

    fn elapsed(&self) -> f64 {
        self.opened_at.elapsed().as_secs_f64()
    }

    /// Step id under the cursor.
    pub fn selected_step(&self) -> Option<&str> {
        self.bench.steps().get(self.selected).map(|s| s.id.as_str())
    }

    /// Apply a step by id. Locked or finished steps are ignored.
    pub fn press(&mut self, step: &str) {
        if let Err(rejected) = self.bench.apply(step) {
            tracing::debug!(%rejected, "ignored control");
        }
    }

    pub fn reset(&mut self) {
        self.bench.reset();
        self.last_progress.set(None);
    }

    pub fn handle_key(&mut self, code: KeyCode) -> BenchAction {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => return BenchAction::Back,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.bench.steps().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(step) = self.selected_step().map(str::to_string) {
                    self.press(&step);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if let Some(step) = self.bench.steps().get(index).map(|s| s.id.clone()) {
                    self.press(&step);
                }
            }
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char(' ') => self.walkthrough.toggle(),
            KeyCode::Char('n') => {
                if self.walkthrough.next_page() == WalkthroughEvent::Finished {
                    tracing::info!(experiment = %self.bench.experiment(), "walkthrough finished");
                }
            }
            KeyCode::Char('g') => self.show_walkthrough = !self.show_walkthrough,
            _ => {}
        }
        BenchAction::Stay
    }

    /// Per-frame update for cosmetic effects.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        let elapsed = self.elapsed();
        self.effects.sync(&self.bench, elapsed, rng);
        self.effects.tick();
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Clear, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let left = if self.show_walkthrough {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(12), Constraint::Length(10)])
                .split(columns[0])
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(12)])
                .split(columns[0])
        };

        self.draw_scene(f, left[0]);
        if self.show_walkthrough {
            self.draw_walkthrough(f, left[1]);
        }

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.bench.steps().len() as u16 + 4),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(columns[1]);

        self.draw_controls(f, right[0]);
        self.draw_observations(f, right[1]);
        self.draw_progress(f, right[2]);
    }

    fn draw_scene(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.bench.experiment().title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines = match self.bench.experiment() {
            ExperimentId::ElectricCircuit => self.circuit_lines(),
            _ => self.beaker_lines(),
        };
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn component_style(&self, component: CircuitComponent) -> Style {
        if !self.bench.is_satisfied(component.id()) {
            return Style::default().fg(Color::DarkGray);
        }
        match self.effects.glow(self.elapsed()) {
            Some(intensity) if component.kind() != ComponentKind::Battery => {
                // 0.1..=0.5 mapped onto an orange that brightens and dims
                let level = (155.0 + intensity * 200.0).min(255.0) as u8;
                Style::default()
                    .fg(Color::Rgb(255, level, 0))
                    .add_modifier(Modifier::BOLD)
            }
            _ => match component.kind() {
                ComponentKind::Battery => Style::default().fg(Color::Red),
                ComponentKind::Wire => Style::default().fg(Color::Yellow),
                ComponentKind::Bulb => Style::default().fg(Color::LightYellow),
            },
        }
    }

    fn circuit_lines(&self) -> Vec<Line<'static>> {
        let wire1 = self.component_style(CircuitComponent::Wire1);
        let wire2 = self.component_style(CircuitComponent::Wire2);
        let battery = self.component_style(CircuitComponent::Battery);
        let bulb = self.component_style(CircuitComponent::Bulb);
        let lit = self.bench.is_complete();

        vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("        "),
                Span::styled("┌───── wire 1 ─────┐", wire1),
            ]),
            Line::from(vec![
                Span::raw("        "),
                Span::styled("│", wire1),
                Span::raw("                  "),
                Span::styled("│", wire1),
            ]),
            Line::from(vec![
                Span::raw("     "),
                Span::styled("[+ - ]", battery),
                Span::raw("              "),
                Span::styled(if lit { "(✺)" } else { "(o)" }, bulb),
            ]),
            Line::from(vec![
                Span::raw("    "),
                Span::styled("battery", battery),
                Span::raw("              "),
                Span::styled("bulb", bulb),
            ]),
            Line::from(vec![
                Span::raw("        "),
                Span::styled("│", wire2),
                Span::raw("                  "),
                Span::styled("│", wire2),
            ]),
            Line::from(vec![
                Span::raw("        "),
                Span::styled("└───── wire 2 ─────┘", wire2),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                if lit {
                    "  The bulb is lit!"
                } else {
                    "  The circuit is open."
                },
                Style::default().fg(if lit { Color::Green } else { Color::Gray }),
            )),
        ]
    }

    fn beaker_lines(&self) -> Vec<Line<'static>> {
        let has_water = self.bench.is_satisfied(WATER);
        // Top rows stay dry, like a beaker filled to 80%
        let water_top = BEAKER_HEIGHT / 5;

        let mut grid = vec![vec![(' ', Color::Reset); BEAKER_WIDTH]; BEAKER_HEIGHT];
        if has_water {
            for row in grid.iter_mut().skip(water_top) {
                for cell in row.iter_mut() {
                    *cell = ('~', Color::Blue);
                }
            }
        }
        for particle in self.effects.particles() {
            let col = (((particle.x + 0.75) / 1.5) * (BEAKER_WIDTH - 1) as f64).round() as usize;
            let row = ((1.0 - particle.y.clamp(0.0, 1.0)) * (BEAKER_HEIGHT - 1) as f64).round() as usize;
            let glyph = if particle.scale > 0.5 { '•' } else { '·' };
            grid[row.min(BEAKER_HEIGHT - 1)][col.min(BEAKER_WIDTH - 1)] =
                (glyph, material_color(particle.material));
        }

        let mut lines = vec![Line::from("")];
        for row in grid {
            let mut spans = vec![Span::raw("    │")];
            spans.extend(
                row.into_iter()
                    .map(|(c, color)| Span::styled(c.to_string(), Style::default().fg(color))),
            );
            spans.push(Span::raw("│"));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(format!("    └{}┘", "─".repeat(BEAKER_WIDTH))));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            if has_water {
                "  Add materials to the beaker."
            } else {
                "  Pour water into the beaker first."
            },
            Style::default().fg(Color::Gray),
        )));
        lines
    }

    fn draw_controls(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Experiment Steps ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let mut lines: Vec<Line> = self
            .bench
            .steps()
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let status = self.bench.status(&step.id).unwrap_or(StepStatus::Locked);
                let (marker, color) = match status {
                    StepStatus::Satisfied => ("✓", Color::Green),
                    StepStatus::Available => (" ", Color::White),
                    StepStatus::Locked => (" ", Color::DarkGray),
                };
                let cursor = if i == self.selected { ">" } else { " " };
                let mut style = Style::default().fg(color);
                if i == self.selected {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Line::from(Span::styled(
                    format!(
                        "{}{} {}. {}",
                        cursor,
                        marker,
                        i + 1,
                        control_label(&step.id, status == StepStatus::Satisfied)
                    ),
                    style,
                ))
            })
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter/1-9] Apply  [R] Reset  [Space] Guide  [N] Next  [G] Hide guide  [Esc] Back",
            Style::default().fg(Color::DarkGray),
        )));

        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn draw_observations(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Observations ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner_height = block.inner(area).height as usize;

        let observations = self.bench.observations();
        let lines: Vec<Line> = observations
            .iter()
            .skip(observations.len().saturating_sub(inner_height))
            .map(|o| {
                if o.is_completion() {
                    Line::from(Span::styled(
                        format!("🎉 {}", o.text),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("• {}", o.text),
                        Style::default().fg(Color::LightBlue),
                    ))
                }
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_progress(&self, f: &mut Frame, area: Rect) {
        let progress = self.bench.progress();
        let label = match self.last_progress.get() {
            Some(StepProgress::Finished(total)) => format!("{}/{} · finished", total, total),
            _ => progress.to_string(),
        };
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Progress "))
            .gauge_style(Style::default().fg(if progress.is_complete() {
                Color::Green
            } else {
                Color::Cyan
            }))
            .ratio(progress.ratio())
            .label(label);
        f.render_widget(gauge, area);
    }

    fn draw_walkthrough(&self, f: &mut Frame, area: Rect) {
        let state = if self.walkthrough.running {
            "running"
        } else {
            "paused"
        };
        let block = Block::default()
            .title(format!(
                " Guide {}/{} · {} · {}% ",
                self.walkthrough.current + 1,
                self.walkthrough.len(),
                state,
                self.walkthrough.progress_percent()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));

        let lines = self
            .walkthrough
            .page()
            .map(|page| {
                vec![
                    Line::from(Span::styled(
                        page.title,
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(page.description),
                    Line::from(vec![
                        Span::styled("To do: ", Style::default().fg(Color::Magenta)),
                        Span::raw(page.action),
                    ]),
                    Line::from(vec![
                        Span::styled("Think: ", Style::default().fg(Color::Yellow)),
                        Span::raw(page.question),
                    ]),
                ]
            })
            .unwrap_or_default();

        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}

/// Button text for a step, before or after it has been applied.
pub fn control_label(step: &str, done: bool) -> String {
    if let Some(component) = CircuitComponent::from_id(step) {
        return if done {
            component.connected_label().to_string()
        } else {
            component.action_label().to_string()
        };
    }
    if let Some(material) = Material::from_id(step) {
        return if done {
            format!("{} added", material.name())
        } else {
            format!("Add {}", material.name().to_lowercase())
        };
    }
    if step == WATER {
        return if done { "Water added" } else { "Pour the water" }.to_string();
    }
    step.to_string()
}

fn material_color(material: Material) -> Color {
    match material {
        Material::Sugar => Color::White,
        Material::Salt => Color::Gray,
        Material::Sand => Color::Rgb(212, 165, 116),
        Material::Oil => Color::Rgb(255, 235, 59),
    }
}
