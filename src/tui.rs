use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{debug, info};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::stdout;

use crate::form::{self, Slot};
use crate::models::{EducationLevel, FieldKey, InputKind};
use crate::preview;
use crate::state::{Action, EditMode, ResumeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Form,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// View-only state: focus and status. Resume data lives in `ResumeState`.
struct Ui {
    pane: Pane,
    form_focus: usize,
    preview_focus: usize,
    status: Option<String>,
}

impl Ui {
    fn new() -> Self {
        Self {
            pane: Pane::Form,
            form_focus: 0,
            preview_focus: 0,
            status: None,
        }
    }

    fn focused_slot(&self, state: &ResumeState) -> Option<Slot> {
        form::slots(&state.draft).get(self.form_focus).cloned()
    }

    fn selected_field(&self) -> Option<FieldKey> {
        FieldKey::all().nth(self.preview_focus)
    }

    fn next(&mut self, state: &ResumeState) {
        match self.pane {
            Pane::Form => {
                let len = form::slots(&state.draft).len();
                if self.form_focus + 1 < len {
                    self.form_focus += 1;
                }
            }
            Pane::Preview => {
                if self.preview_focus + 1 < FieldKey::all().count() {
                    self.preview_focus += 1;
                }
            }
        }
    }

    fn prev(&mut self) {
        match self.pane {
            Pane::Form => self.form_focus = self.form_focus.saturating_sub(1),
            Pane::Preview => self.preview_focus = self.preview_focus.saturating_sub(1),
        }
    }

    /// Keep form focus in range after the slot list shrinks.
    fn clamp(&mut self, state: &ResumeState) {
        let len = form::slots(&state.draft).len();
        self.form_focus = self.form_focus.min(len.saturating_sub(1));
    }
}

pub fn run(state: &mut ResumeState) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    info!("session started");
    let result = run_loop(&mut terminal, state);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    info!("session ended");

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut ResumeState,
) -> Result<()> {
    let mut ui = Ui::new();

    loop {
        terminal.draw(|frame| draw(frame, state, &ui))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(&mut ui, state, key) == Flow::Quit {
                break;
            }
        }
    }
    Ok(())
}

fn handle_key(ui: &mut Ui, state: &mut ResumeState, key: KeyEvent) -> Flow {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if ctrl => return Flow::Quit,
        KeyCode::Char('s') if ctrl => {
            submit(ui, state);
            return Flow::Continue;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            ui.pane = match ui.pane {
                Pane::Form if state.snapshot.is_some() => Pane::Preview,
                _ => Pane::Form,
            };
            return Flow::Continue;
        }
        KeyCode::Down => {
            ui.next(state);
            return Flow::Continue;
        }
        KeyCode::Up => {
            ui.prev();
            return Flow::Continue;
        }
        _ => {}
    }

    match ui.pane {
        Pane::Form => handle_form_key(ui, state, key),
        Pane::Preview => handle_preview_key(ui, state, key),
    }
    Flow::Continue
}

fn handle_form_key(ui: &mut Ui, state: &mut ResumeState, key: KeyEvent) {
    let Some(slot) = ui.focused_slot(state) else {
        return;
    };
    match slot {
        Slot::Input(field) => {
            if let Some(value) = edited_field(state, field, key) {
                state.apply(Action::Change { field, value });
            } else if key.code == KeyCode::Enter {
                ui.next(state);
            }
        }
        Slot::PendingSkill => {
            if key.code == KeyCode::Enter {
                state.apply(Action::AddSkill);
            } else if let Some(text) = edited_text(&state.pending_skill, InputKind::Text, key) {
                state.apply(Action::SetPendingSkill { text });
            }
        }
        Slot::Button(button) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                match button.activate() {
                    Action::Submit => submit(ui, state),
                    action => state.apply(action),
                }
            }
        }
        Slot::Skill(index) => {
            if matches!(key.code, KeyCode::Delete | KeyCode::Backspace) {
                state.apply(Action::RemoveSkill { index });
                ui.clamp(state);
            }
        }
    }
}

fn handle_preview_key(ui: &mut Ui, state: &mut ResumeState, key: KeyEvent) {
    let Some(selected) = ui.selected_field() else {
        return;
    };
    match state.mode {
        EditMode::Editing(field) if key.code == KeyCode::Enter && field == selected => {
            state.apply(Action::SaveEdit);
            ui.status = Some(format!("Saved {}", field.label()));
        }
        EditMode::Editing(field) if key.code != KeyCode::Enter => {
            if let Some(value) = edited_field(state, field, key) {
                state.apply(Action::Change { field, value });
            }
        }
        _ if key.code == KeyCode::Enter => {
            state.apply(Action::BeginEdit { field: selected });
            ui.status = None;
        }
        _ => {}
    }
}

fn submit(ui: &mut Ui, state: &mut ResumeState) {
    match form::validate(&state.draft) {
        Ok(()) => {
            state.apply(Action::Submit);
            ui.form_focus = 0;
            ui.status = Some("Resume generated".to_string());
        }
        Err(msg) => {
            debug!("submit blocked: {}", msg);
            ui.status = Some(msg);
        }
    }
}

/// New value for a draft field after `key`, or None if the key does not edit it.
fn edited_field(state: &ResumeState, field: FieldKey, key: KeyEvent) -> Option<String> {
    match field.input_kind() {
        InputKind::Select => {
            let current = state.draft.education.highest_education;
            match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    Some(EducationLevel::step(current, true).code().to_string())
                }
                KeyCode::Left => Some(EducationLevel::step(current, false).code().to_string()),
                KeyCode::Backspace | KeyCode::Delete => Some(String::new()),
                _ => None,
            }
        }
        kind => edited_text(state.draft.value(field), kind, key),
    }
}

fn edited_text(current: &str, kind: InputKind, key: KeyEvent) -> Option<String> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if kind.accepts(c) => {
            let mut value = current.to_string();
            value.push(c);
            Some(value)
        }
        KeyCode::Backspace => {
            let mut value = current.to_string();
            value.pop()?;
            Some(value)
        }
        _ => None,
    }
}

fn draw(frame: &mut Frame, state: &ResumeState, ui: &Ui) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "Dynamic Resume Builder",
        Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, rows[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    // Left panel: form
    let form_active = ui.pane == Pane::Form;
    let (form_text, focus_line) = form::build_form(state, form_active.then_some(ui.form_focus));
    let visible = panes[0].height.saturating_sub(2) as usize;
    let scroll = (focus_line + 1).saturating_sub(visible) as u16;
    let form_widget = Paragraph::new(form_text)
        .block(pane_block(" Form ", form_active))
        .scroll((scroll, 0));
    frame.render_widget(form_widget, panes[0]);

    // Right panel: resume preview
    let preview_active = ui.pane == Pane::Preview;
    let width = panes[1].width.saturating_sub(2) as usize;
    let selected = if preview_active { ui.selected_field() } else { None };
    let (preview_text, focus_line) = preview::build_preview(state, selected, width);
    let visible = panes[1].height.saturating_sub(2) as usize;
    let scroll = (focus_line + 1).saturating_sub(visible) as u16;
    let preview_widget = Paragraph::new(preview_text)
        .block(pane_block(" Resume ", preview_active))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(preview_widget, panes[1]);

    let status = Paragraph::new(ui.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(status, rows[2]);

    // Footer help
    let help = match (ui.pane, state.mode) {
        (Pane::Form, _) => {
            " ↑/↓:move  type:edit  ←/→:choose  Enter:add/activate  Del:remove skill  Ctrl+S:generate  Tab:resume  Esc:quit"
        }
        (Pane::Preview, EditMode::Viewing) => " ↑/↓:select field  Enter:edit  Tab:form  Esc:quit",
        (Pane::Preview, EditMode::Editing(_)) => {
            " type:edit  Enter:save  ↑/↓ then Enter:edit another field  Tab:form  Esc:quit"
        }
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        rows[3],
    );
}

fn pane_block(title: &'static str, active: bool) -> Block<'static> {
    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}
