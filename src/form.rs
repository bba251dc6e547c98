use ratatui::prelude::*;

use crate::models::{FieldKey, InputKind, ResumeData};
use crate::state::{Action, ResumeState};

/// What a button does when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonBehavior {
    /// Commits the whole form.
    Submit,
    Action(Action),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub behavior: ButtonBehavior,
}

impl Button {
    pub fn add_skill() -> Self {
        Self {
            label: "Add Skill",
            behavior: ButtonBehavior::Action(Action::AddSkill),
        }
    }

    pub fn generate() -> Self {
        Self {
            label: "Generate Your Resume",
            behavior: ButtonBehavior::Submit,
        }
    }

    pub fn activate(&self) -> Action {
        match &self.behavior {
            ButtonBehavior::Submit => Action::Submit,
            ButtonBehavior::Action(action) => action.clone(),
        }
    }

    fn span(&self, focused: bool) -> Span<'static> {
        let style = if focused {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        Span::styled(format!("[ {} ]", self.label), style)
    }
}

/// One focusable row of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Input(FieldKey),
    PendingSkill,
    Button(Button),
    Skill(usize),
}

impl Slot {
    fn section(&self) -> Option<&'static str> {
        match self {
            Slot::Input(FieldKey::Personal(_)) => Some("Personal Information"),
            Slot::Input(FieldKey::Education(_)) => Some("Education"),
            Slot::Input(FieldKey::Experience(_)) => Some("Experience"),
            Slot::PendingSkill | Slot::Skill(_) => Some("Skills"),
            Slot::Button(b) if b.behavior != ButtonBehavior::Submit => Some("Skills"),
            Slot::Button(_) => None,
        }
    }
}

/// Form rows in display order. Depends on the draft because every added
/// skill gets its own removable row.
pub fn slots(draft: &ResumeData) -> Vec<Slot> {
    let mut slots: Vec<Slot> = FieldKey::PERSONAL
        .into_iter()
        .chain(FieldKey::EDUCATION)
        .map(Slot::Input)
        .collect();
    slots.push(Slot::PendingSkill);
    slots.push(Slot::Button(Button::add_skill()));
    slots.extend((0..draft.skills.len()).map(Slot::Skill));
    slots.extend(FieldKey::EXPERIENCE.into_iter().map(Slot::Input));
    slots.push(Slot::Button(Button::generate()));
    slots
}

/// Native constraint check run before a submit is dispatched.
pub fn validate(draft: &ResumeData) -> Result<(), String> {
    for key in FieldKey::all() {
        let kind = key.input_kind();
        if !kind.is_valid(draft.value(key)) {
            return Err(match kind {
                InputKind::Email => format!(
                    "Please include an '@' and a domain in the email address '{}'",
                    draft.value(key)
                ),
                _ => format!("Invalid value for {}", key.label()),
            });
        }
    }
    Ok(())
}

/// Form text plus the line index of the focused row.
pub fn build_form(state: &ResumeState, focus: Option<usize>) -> (Text<'static>, usize) {
    let mut lines: Vec<Line> = Vec::new();
    let mut focus_line = 0;
    let mut section = None;

    for (i, slot) in slots(&state.draft).iter().enumerate() {
        let focused = focus == Some(i);
        if slot.section() != section {
            if section.is_some() {
                lines.push(Line::from(""));
            }
            section = slot.section();
            if let Some(title) = section {
                lines.push(Line::from(Span::styled(
                    title,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )));
            }
        }
        if focused {
            focus_line = lines.len();
        }
        lines.push(slot_line(state, slot, focused));
    }

    (Text::from(lines), focus_line)
}

fn slot_line(state: &ResumeState, slot: &Slot, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let input_style = if focused {
        Style::default().fg(Color::White).bg(Color::Blue)
    } else {
        Style::default().fg(Color::LightBlue)
    };
    let cursor = if focused { "▏" } else { "" };

    match slot {
        Slot::Input(key) => {
            let value = match key.input_kind() {
                InputKind::Select => state
                    .draft
                    .education
                    .highest_education
                    .map(|l| format!("◀ {} ▶", l.label()))
                    .unwrap_or_else(|| "◀ Select your highest education ▶".to_string()),
                _ => format!("{}{}", state.draft.value(*key), cursor),
            };
            Line::from(vec![
                Span::raw(format!("{}{}: ", marker, key.label())),
                Span::styled(value, input_style),
            ])
        }
        Slot::PendingSkill => Line::from(vec![
            Span::styled(
                format!("{}List Your Skills Here: ", marker),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(format!("{}{}", state.pending_skill, cursor), input_style),
        ]),
        Slot::Button(button) => Line::from(vec![Span::raw(marker), button.span(focused)]),
        Slot::Skill(i) => {
            let skill = state.draft.skills.get(*i).cloned().unwrap_or_default();
            let mut spans = vec![
                Span::raw(marker),
                Span::styled(
                    format!(" {} ", skill),
                    Style::default().fg(Color::Black).bg(Color::Gray),
                ),
                Span::styled(" ×", Style::default().fg(Color::Red)),
            ];
            if focused {
                spans.push(Span::styled(
                    "  Del removes",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceField, PersonalField};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_slots_order() {
        let mut draft = ResumeData::default();
        let empty = slots(&draft);
        assert_eq!(empty.len(), 3 + 4 + 2 + 3 + 1);
        assert_eq!(empty[0], Slot::Input(FieldKey::Personal(PersonalField::Name)));
        assert_eq!(empty[7], Slot::PendingSkill);
        assert_eq!(empty[8], Slot::Button(Button::add_skill()));
        assert_eq!(
            empty[9],
            Slot::Input(FieldKey::Experience(ExperienceField::Company))
        );
        assert_eq!(empty.last(), Some(&Slot::Button(Button::generate())));

        draft.skills = vec!["A".to_string(), "B".to_string()];
        let with_skills = slots(&draft);
        assert_eq!(with_skills[9], Slot::Skill(0));
        assert_eq!(with_skills[10], Slot::Skill(1));
        assert_eq!(with_skills.len(), empty.len() + 2);
    }

    #[test]
    fn test_button_activation() {
        assert_eq!(Button::generate().activate(), Action::Submit);
        assert_eq!(Button::add_skill().activate(), Action::AddSkill);
    }

    #[test]
    fn test_validate_email() {
        let mut draft = ResumeData::default();
        assert!(validate(&draft).is_ok());

        draft.personal_info.email = "ann".to_string();
        let err = validate(&draft).unwrap_err();
        assert!(err.contains("'ann'"));

        draft.personal_info.email = "a@x.com".to_string();
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_build_form_marks_focus() {
        let mut state = ResumeState::default();
        state.draft.skills.push("Go".to_string());
        state.pending_skill = "Ru".to_string();

        let (text, focus_line) = build_form(&state, Some(7));
        let rendered: Vec<String> = text.lines.iter().map(line_text).collect();
        assert_eq!(rendered[0], "Personal Information");
        assert_eq!(rendered[focus_line], "> List Your Skills Here: Ru▏");
        assert!(rendered.iter().any(|l| l.contains(" Go  ×")));
        assert!(rendered.iter().any(|l| l.contains("◀ Select your highest education ▶")));
        assert!(rendered.iter().any(|l| l == "Experience"));
        assert!(rendered.last().unwrap().contains("[ Generate Your Resume ]"));
    }
}
