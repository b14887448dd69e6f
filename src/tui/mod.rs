pub mod popup;

use crate::config::Config;
use crate::selector::{
    DateField, DateSelectorConfig, DateSelectorGroup, ListField, SelectableField, SelectedDate,
};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use popup::{ConfirmPopup, ErrorPopup, Popup, PopupOutcome};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::io;
use tracing::{debug, info};

pub struct App {
    pub config: Config,
    pub preset_name: Option<String>,
    pub selector: DateSelectorGroup<ListField>,
    pub focus: DateField,
    pub popup: Option<Box<dyn Popup>>,
    pub status_message: Option<String>,
    pub accepted: Option<SelectedDate>,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl App {
    pub fn new(config: Config, preset_name: Option<String>) -> Result<App> {
        let selector_config = config.resolve(preset_name.as_deref())?;
        Ok(Self::with_selector_config(config, preset_name, selector_config))
    }

    pub fn with_selector_config(
        config: Config,
        preset_name: Option<String>,
        selector_config: DateSelectorConfig,
    ) -> App {
        let mut selector =
            DateSelectorGroup::create(ListField::new(), ListField::new(), ListField::new());
        selector.set_properties(selector_config);

        let status_message = preset_name
            .as_ref()
            .map(|name| format!("Preset: {}", name));

        App {
            config,
            preset_name,
            selector,
            focus: DateField::Month,
            popup: None,
            status_message,
            accepted: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn next_item(&mut self) {
        let field = self.selector.field(self.focus);
        let count = field.item_count();
        if count == 0 {
            return;
        }
        let i = if field.selected_index() >= count - 1 {
            0
        } else {
            field.selected_index() + 1
        };
        self.selector.select(self.focus, i);
    }

    pub fn previous_item(&mut self) {
        let field = self.selector.field(self.focus);
        let count = field.item_count();
        if count == 0 {
            return;
        }
        let i = if field.selected_index() == 0 {
            count - 1
        } else {
            field.selected_index() - 1
        };
        self.selector.select(self.focus, i);
    }

    /// Rebuilds every field with the current settings, dropping selections.
    pub fn reset(&mut self) {
        let current = self.selector.config().clone();
        self.selector.set_properties(current);
        self.status_message = Some("Selection cleared".to_string());
    }

    pub fn submit(&mut self) {
        let date = self.selector.selected();
        if date.is_complete() {
            self.popup = Some(Box::new(ConfirmPopup::new(date)));
        } else {
            let missing: Vec<String> = [
                (DateField::Month, date.month.is_none()),
                (DateField::Day, date.day.is_none()),
                (DateField::Year, date.year.is_none()),
            ]
            .iter()
            .filter(|(_, missing)| *missing)
            .map(|(field, _)| field.to_string().to_lowercase())
            .collect();
            self.popup = Some(Box::new(ErrorPopup::new(format!(
                "Select a {}.",
                missing.join(", ")
            ))));
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Flow {
        if let Some(popup) = &self.popup {
            match popup::resolve(popup.as_ref(), key) {
                PopupOutcome::Ignored => {}
                PopupOutcome::Dismiss => self.popup = None,
                PopupOutcome::DismissParent => {
                    self.popup = None;
                    self.accepted = Some(self.selector.selected());
                    info!(date = %self.selector.selected(), "date accepted");
                    return Flow::Quit;
                }
            }
            return Flow::Continue;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Right | KeyCode::Tab => self.next_field(),
            KeyCode::Left | KeyCode::BackTab => self.previous_field(),
            KeyCode::Down => self.next_item(),
            KeyCode::Up => self.previous_item(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Enter => self.submit(),
            _ => {}
        }
        debug!(focus = %self.focus, date = %self.selector.selected(), "key handled");
        Flow::Continue
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<Option<SelectedDate>> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key.code) == Flow::Quit
        {
            return Ok(app.accepted);
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(size);

    if let Some(ref status) = app.status_message {
        let status_paragraph = Paragraph::new(Text::styled(
            status.as_str(),
            Style::default().fg(Color::Green),
        ))
        .block(Block::default().borders(Borders::NONE));
        f.render_widget(status_paragraph, content_chunks[0]);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ])
        .split(content_chunks[1]);

    for (field, area) in DateField::ALL.into_iter().zip(columns.iter()) {
        render_field(f, app, field, *area);
    }

    let help_text = Paragraph::new(Span::raw(
        "Use ←→ to switch fields, ↑↓ to choose, Enter to confirm, 'r' to reset, 'q' to quit",
    ))
    .block(Block::default().borders(Borders::NONE))
    .style(Style::default().add_modifier(Modifier::ITALIC));
    f.render_widget(help_text, content_chunks[2]);

    if let Some(popup) = &app.popup {
        render_popup(f, popup.as_ref(), size);
    }
}

fn render_field(f: &mut Frame, app: &App, field: DateField, area: Rect) {
    let list_field = app.selector.field(field);
    let items: Vec<ListItem> = list_field
        .labels()
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if i == 0 {
                ListItem::new(label.as_str()).style(Style::default().fg(Color::DarkGray))
            } else {
                ListItem::new(label.as_str())
            }
        })
        .collect();

    let focused = app.focus == field;
    let border_style = if focused {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default()
    };
    let title = match list_field.selected_label() {
        Some(label) if list_field.selected_index() > 0 => format!("{}: {}", field, label),
        _ => field.to_string(),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(if focused { Color::LightGreen } else { Color::Gray })
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(list_field.selected_index()));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_popup(f: &mut Frame, popup: &dyn Popup, area: Rect) {
    let popup_area = centered_rect(60, 7, area);
    let mut lines = popup.lines();
    lines.push(String::new());
    lines.push(popup.help());

    let paragraph = Paragraph::new(Text::from(lines.join("\n")))
        .block(Block::default().borders(Borders::ALL).title(popup.title()))
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height: height.min(area.height),
    }
}
