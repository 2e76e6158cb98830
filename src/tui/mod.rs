//! Ratatui-based terminal UI.
//!
//! The TUI is the three-step form: pick an area, set bedrooms and bathrooms,
//! set carpet area, then predict. The selected area's reference card is shown
//! next to the form and the breakdown appears after each prediction.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::pipeline::{EstimateOutput, Session};
use crate::domain::{
    BATHROOMS_MAX, BATHROOMS_MIN, BATHROOMS_STEP, BEDROOMS, DEFAULT_BATHROOMS, DEFAULT_BEDROOMS,
    DEFAULT_FLOOR_AREA, FLOOR_AREA_MAX, FLOOR_AREA_MIN, FLOOR_AREA_STEP, PredictionRequest,
};
use crate::error::AppError;
use crate::report::{format_area, format_currency, format_rate};

/// Start the TUI on an already-loaded session.
pub fn run(session: Session) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Area,
    Bedrooms,
    Bathrooms,
    FloorArea,
}

impl Field {
    const ALL: [Field; 4] = [Field::Area, Field::Bedrooms, Field::Bathrooms, Field::FloorArea];
}

/// Form values, always inside the form bounds.
#[derive(Debug, Clone, PartialEq)]
struct FormState {
    area_index: usize,
    area_count: usize,
    bedrooms: u8,
    bathrooms: f64,
    floor_area: u32,
    selected: usize,
}

impl FormState {
    fn new(area_count: usize) -> Self {
        Self {
            area_index: 0,
            area_count,
            bedrooms: DEFAULT_BEDROOMS,
            bathrooms: DEFAULT_BATHROOMS,
            floor_area: DEFAULT_FLOOR_AREA,
            selected: 0,
        }
    }

    fn field(&self) -> Field {
        Field::ALL[self.selected.min(Field::ALL.len() - 1)]
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < Field::ALL.len() {
            self.selected += 1;
        }
    }

    /// Move the selected field by `steps` increments, clamped to its bounds.
    /// The area list wraps.
    fn adjust(&mut self, steps: i32) {
        match self.field() {
            Field::Area => {
                if self.area_count > 0 {
                    let n = self.area_count as i64;
                    let next = (self.area_index as i64 + i64::from(steps)).rem_euclid(n);
                    self.area_index = next as usize;
                }
            }
            Field::Bedrooms => {
                let next = i32::from(self.bedrooms) + steps;
                let lo = i32::from(*BEDROOMS.start());
                let hi = i32::from(*BEDROOMS.end());
                self.bedrooms = next.clamp(lo, hi) as u8;
            }
            Field::Bathrooms => {
                let next = self.bathrooms + f64::from(steps) * BATHROOMS_STEP;
                self.bathrooms = next.clamp(BATHROOMS_MIN, BATHROOMS_MAX);
            }
            Field::FloorArea => {
                let next = i64::from(self.floor_area) + i64::from(steps) * i64::from(FLOOR_AREA_STEP);
                self.floor_area = next.clamp(i64::from(FLOOR_AREA_MIN), i64::from(FLOOR_AREA_MAX)) as u32;
            }
        }
    }
}

struct App {
    session: Session,
    form: FormState,
    last: Option<(PredictionRequest, EstimateOutput)>,
    status: String,
}

impl App {
    fn new(session: Session) -> Self {
        let form = FormState::new(session.table().len());
        Self {
            session,
            form,
            last: None,
            status: "Ready.".to_string(),
        }
    }

    fn area_name(&self) -> &str {
        self.session
            .table()
            .get(self.form.area_index)
            .map(|p| p.name.as_str())
            .unwrap_or(crate::domain::FALLBACK_NEIGHBORHOOD)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user quits.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.form.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.form.select_next(),
            KeyCode::Left => self.form.adjust(-1),
            KeyCode::Right => self.form.adjust(1),
            KeyCode::PageDown => self.form.adjust(-10),
            KeyCode::PageUp => self.form.adjust(10),
            KeyCode::Enter | KeyCode::Char('p') => self.predict(),
            _ => {}
        }
        false
    }

    fn predict(&mut self) {
        match PredictionRequest::new(
            self.area_name(),
            self.form.bedrooms,
            self.form.bathrooms,
            self.form.floor_area,
        ) {
            Ok(request) => {
                let out = self.session.run_estimate(&request);
                self.status = format!("Predicted {}", format_currency(out.trace.result.predicted_price));
                self.last = Some((request, out));
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let bundle = self.session.estimator().bundle();
        let model = bundle
            .schema()
            .model_name
            .clone()
            .unwrap_or_else(|| bundle.model().describe());
        let line = Line::from(vec![
            Span::styled("pe", Style::default().fg(Color::Cyan)),
            Span::raw(" - Mumbai property price estimator"),
            Span::styled(format!(" | model: {model}"), Style::default().fg(Color::Gray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(columns[0]);

        self.draw_form(frame, left[0]);
        self.draw_area_card(frame, left[1]);
        self.draw_result(frame, columns[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items = vec![
            ListItem::new(format!("Area: {}", self.area_name())),
            ListItem::new(format!("Bedrooms: {}", self.form.bedrooms)),
            ListItem::new(format!("Bathrooms: {:.1}", self.form.bathrooms)),
            ListItem::new(format!("Carpet area: {}", format_area(self.form.floor_area))),
        ];

        let list = List::new(items)
            .block(Block::default().title("Property").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.form.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_area_card(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let profile = self.session.resolve(self.area_name());
        let lines = vec![
            Line::from(Span::styled(
                profile.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Category: {}", profile.tier.display_name())),
            Line::from(format!(
                "Price range: {} - {}",
                format_currency(profile.min_rate),
                format_rate(profile.max_rate)
            )),
            Line::from(format!("Average: {}", format_rate(profile.avg_rate))),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().title("Area").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Estimate").borders(Borders::ALL);
        let Some((request, out)) = &self.last else {
            let msg = Paragraph::new("Press Enter to predict.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let r = &out.trace.result;
        let premium_color = if r.premium < 0.0 { Color::Red } else { Color::Green };
        let lines = vec![
            Line::from(Span::styled(
                format_currency(r.predicted_price),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Base price: {}", format_currency(r.base_price))),
            Line::from(Span::styled(
                format!("Location & features premium: {}", format_currency(r.premium)),
                Style::default().fg(premium_color),
            )),
            Line::from(format!("Final price per sq ft: {}", format_currency(r.effective_rate))),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} | {} bed | {:.1} bath | {}",
                    request.neighborhood(),
                    request.bedrooms(),
                    request.bathrooms(),
                    format_area(request.floor_area())
                ),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn jump  Enter predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::testing::constant_bundle;
    use crate::reference::ReferenceTable;

    fn app(price: f64) -> App {
        App::new(Session::new(ReferenceTable::builtin(), constant_bundle(price)))
    }

    fn builtin_form() -> FormState {
        FormState::new(ReferenceTable::builtin().len())
    }

    #[test]
    fn form_starts_at_defaults() {
        let form = builtin_form();
        assert_eq!(form.bedrooms, 2);
        assert_eq!(form.bathrooms, 2.0);
        assert_eq!(form.floor_area, 1000);
        assert_eq!(form.field(), Field::Area);
    }

    #[test]
    fn adjustments_clamp_to_bounds() {
        let mut form = builtin_form();
        form.select_next();
        form.adjust(10);
        assert_eq!(form.bedrooms, 6);
        form.adjust(-10);
        assert_eq!(form.bedrooms, 1);

        form.select_next();
        form.adjust(1);
        assert_eq!(form.bathrooms, 2.5);
        form.adjust(-10);
        assert_eq!(form.bathrooms, 1.0);

        form.select_next();
        form.adjust(10);
        assert_eq!(form.floor_area, 1500);
        form.adjust(-100);
        assert_eq!(form.floor_area, 300);
        form.select_next();
        assert_eq!(form.field(), Field::FloorArea);
    }

    #[test]
    fn area_selection_wraps() {
        let mut form = builtin_form();
        let last = ReferenceTable::builtin().len() - 1;
        form.adjust(-1);
        assert_eq!(form.area_index, last);
        form.adjust(1);
        assert_eq!(form.area_index, 0);
    }

    #[test]
    fn enter_predicts_selected_area() {
        let mut app = app(50_000_000.0);
        let bandra = app.session.table().position("Bandra West").unwrap();
        app.form.area_index = bandra;

        assert!(!app.handle_key(KeyCode::Enter));
        let (request, out) = app.last.as_ref().unwrap();
        assert_eq!(request.neighborhood(), "Bandra West");
        assert_eq!(out.trace.result.premium, 10_000_000.0);
        assert!(app.status.contains("₹50,000,000"));
    }

    #[test]
    fn q_quits() {
        let mut app = app(1.0);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
    }
}
