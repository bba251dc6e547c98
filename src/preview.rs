use ratatui::prelude::*;

use crate::models::{EducationField, FieldKey, ResumeData};
use crate::state::ResumeState;

const SECTIONS: [(&str, &[FieldKey]); 3] = [
    ("Personal Information", &FieldKey::PERSONAL),
    ("Education", &FieldKey::EDUCATION),
    ("Experience", &FieldKey::EXPERIENCE),
];

/// Text shown for a field in the finished resume.
pub fn display_value(data: &ResumeData, key: FieldKey) -> String {
    match key {
        FieldKey::Education(EducationField::HighestEducation) => data
            .education
            .highest_education
            .map(|l| l.label().to_string())
            .unwrap_or_default(),
        _ => data.value(key).to_string(),
    }
}

const NBSP: char = '\u{a0}';

/// Skill badges, wrapped to `width` columns. A badge only breaks when it is
/// wider than a whole line.
pub fn skill_lines(skills: &[String], width: usize) -> Vec<String> {
    if skills.is_empty() {
        return Vec::new();
    }
    let badges = skills
        .iter()
        .map(|s| format!("[{}]", s.replace(' ', &NBSP.to_string())))
        .collect::<Vec<_>>()
        .join("  ");
    let options = textwrap::Options::new(width.max(8))
        .word_splitter(textwrap::WordSplitter::NoHyphenation);
    textwrap::wrap(&badges, options)
        .into_iter()
        .map(|line| line.replace(NBSP, " "))
        .collect()
}

/// The rendered resume plus the line index of the selected field (or the
/// edited one when nothing is selected). `selected` is the field the preview
/// cursor sits on; the field under the edit cursor shows the draft value as an input.
pub fn build_preview(
    state: &ResumeState,
    selected: Option<FieldKey>,
    width: usize,
) -> (Text<'static>, usize) {
    let Some(snapshot) = &state.snapshot else {
        let empty = Text::from(Line::from(Span::styled(
            "(No resume yet: fill in the form and generate it)",
            Style::default().fg(Color::DarkGray),
        )));
        return (empty, 0);
    };
    let focus = selected.or(state.mode.field());
    let mut focus_line = 0;

    let mut lines: Vec<Line> = Vec::new();
    lines.push(
        Line::from(Span::styled(
            "Resume",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered(),
    );
    lines.push(Line::from(""));

    for (i, (title, keys)) in SECTIONS.iter().enumerate() {
        lines.push(section_header(title));
        for key in keys.iter().copied() {
            if focus == Some(key) {
                focus_line = lines.len();
            }
            lines.push(field_line(state, snapshot, key, selected == Some(key)));
        }
        lines.push(Line::from(""));

        // Skills sit between education and experience.
        if i == 1 {
            lines.push(section_header("Skills"));
            for line in skill_lines(&snapshot.skills, width.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", line),
                    Style::default().fg(Color::Cyan),
                )));
            }
            lines.push(Line::from(""));
        }
    }

    if let Some(field) = state.mode.field() {
        lines.push(Line::from(vec![
            Span::styled(
                "[ Save ]",
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(
                format!("  Enter saves {}", field.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    (Text::from(lines), focus_line)
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("➢ {}", title),
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    ))
}

fn field_line(
    state: &ResumeState,
    snapshot: &ResumeData,
    key: FieldKey,
    selected: bool,
) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    let label = Span::styled(
        format!("{}{}: ", marker, key.label()),
        Style::default().fg(Color::Gray),
    );

    if state.mode.is_editing(key) {
        let value = display_value(&state.draft, key);
        return Line::from(vec![
            label,
            Span::styled(
                format!("{}▏", value),
                Style::default().fg(Color::White).bg(Color::Blue),
            ),
        ]);
    }

    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Line::from(vec![label, Span::styled(display_value(snapshot, key), style)])
}

/// Plain-text resume for non-interactive output.
pub fn render_plain(snapshot: &ResumeData, width: usize) -> String {
    let mut out = String::from("Resume\n\n");
    for (i, (title, keys)) in SECTIONS.iter().enumerate() {
        out.push_str(&format!("== {} ==\n", title));
        for key in keys.iter().copied() {
            out.push_str(&format!("{}: {}\n", key.label(), display_value(snapshot, key)));
        }
        out.push('\n');

        if i == 1 {
            out.push_str("== Skills ==\n");
            for line in skill_lines(&snapshot.skills, width) {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationLevel, PersonalField};
    use crate::state::Action;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    fn ann() -> ResumeData {
        let mut data = ResumeData::default();
        data.personal_info.name = "Ann".to_string();
        data.personal_info.email = "a@x.com".to_string();
        data.personal_info.phone = "555".to_string();
        data.education.highest_education = Some(EducationLevel::PhD);
        data.education.school = "MIT".to_string();
        data.education.field = "CS".to_string();
        data.education.passing_year = "2020".to_string();
        data.skills = vec!["Go".to_string(), "Rust".to_string()];
        data.experience.company = "Acme".to_string();
        data.experience.position = "Eng".to_string();
        data.experience.year = "2021".to_string();
        data
    }

    fn submitted(data: ResumeData) -> ResumeState {
        let mut state = ResumeState::default();
        state.draft = data;
        state.apply(Action::Submit);
        state
    }

    #[test]
    fn test_preview_without_snapshot() {
        let state = ResumeState::default();
        let (text, focus_line) = build_preview(&state, None, 60);
        assert_eq!(text.lines.len(), 1);
        assert_eq!(focus_line, 0);
        assert!(line_text(&text.lines[0]).contains("No resume yet"));
    }

    #[test]
    fn test_preview_shows_all_fields_and_badges() {
        let state = submitted(ann());
        assert_eq!(state.draft, ResumeData::default());

        let (text, _) = build_preview(&state, None, 60);
        let rendered: Vec<String> = text.lines.iter().map(line_text).collect();
        let joined = rendered.join("\n");

        for expected in [
            "Name: Ann",
            "Email: a@x.com",
            "Phone: 555",
            "Highest Education: PhD",
            "School: MIT",
            "Field: CS",
            "Passing Year: 2020",
            "Company: Acme",
            "Position: Eng",
            "Year: 2021",
        ] {
            assert!(joined.contains(expected), "missing {expected:?} in\n{joined}");
        }
        assert!(joined.contains("[Go]  [Rust]"));
        assert!(!joined.contains("[ Save ]"));
    }

    #[test]
    fn test_preview_editing_shows_draft_and_save() {
        let mut state = submitted(ann());
        let name = FieldKey::Personal(PersonalField::Name);
        state.apply(Action::BeginEdit { field: name });
        state.apply(Action::Change {
            field: name,
            value: "Annie".to_string(),
        });

        let (text, focus_line) = build_preview(&state, Some(name), 60);
        assert!(line_text(&text.lines[focus_line]).starts_with("> Name: "));
        let joined: String = text.lines.iter().map(line_text).collect::<Vec<_>>().join("\n");
        assert!(joined.contains("> Name: Annie▏"));
        assert!(joined.contains("[ Save ]"));
    }

    #[test]
    fn test_skill_lines_wrap() {
        let skills: Vec<String> = ["Rust", "Go", "Python", "TypeScript"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let lines = skill_lines(&skills, 16);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 16));
        assert!(skill_lines(&[], 40).is_empty());
    }

    #[test]
    fn test_skill_lines_keep_badges_whole() {
        let skills: Vec<String> = ["Machine Learning", "Front-end", "Go"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let lines = skill_lines(&skills, 20);
        assert_eq!(lines, vec!["[Machine Learning]", "[Front-end]  [Go]"]);
    }

    #[test]
    fn test_education_shows_option_label() {
        let mut data = ann();
        data.education.highest_education = Some(EducationLevel::Matric);
        let key = FieldKey::Education(EducationField::HighestEducation);
        assert_eq!(display_value(&data, key), "Matriculation");
        assert_eq!(data.value(key), "Matric");
        assert!(render_plain(&data, 80).contains("Highest Education: Matriculation\n"));
    }

    #[test]
    fn test_render_plain() {
        let out = render_plain(&ann(), 80);
        assert!(out.starts_with("Resume\n"));
        assert!(out.contains("== Education ==\nHighest Education: PhD\nSchool: MIT\n"));
        assert!(out.contains("== Skills ==\n[Go]  [Rust]\n"));
        let skills_at = out.find("== Skills ==").unwrap();
        let experience_at = out.find("== Experience ==").unwrap();
        assert!(skills_at < experience_at);
    }
}
