use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// --- Education levels ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    Matric,
    Inter,
    #[serde(alias = "Graduation")]
    Bachelors,
    Masters,
    MPhil,
    PhD,
}

impl EducationLevel {
    /// Select options in display order.
    pub const ALL: [EducationLevel; 6] = [
        EducationLevel::Matric,
        EducationLevel::Inter,
        EducationLevel::Bachelors,
        EducationLevel::Masters,
        EducationLevel::MPhil,
        EducationLevel::PhD,
    ];

    pub fn code(self) -> &'static str {
        match self {
            EducationLevel::Matric => "Matric",
            EducationLevel::Inter => "Inter",
            EducationLevel::Bachelors => "Bachelors",
            EducationLevel::Masters => "Masters",
            EducationLevel::MPhil => "MPhil",
            EducationLevel::PhD => "PhD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EducationLevel::Matric => "Matriculation",
            EducationLevel::Inter => "Intermediate",
            EducationLevel::Bachelors => "Bachelors",
            EducationLevel::Masters => "Masters",
            EducationLevel::MPhil => "MPhil",
            EducationLevel::PhD => "PhD",
        }
    }

    /// Move a select one option forward or back, wrapping at both ends.
    /// An empty select starts at the first option (forward) or the last (back).
    pub fn step(current: Option<Self>, forward: bool) -> Self {
        let len = Self::ALL.len();
        let idx = match current.and_then(|c| Self::ALL.iter().position(|l| *l == c)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        Self::ALL[idx]
    }
}

impl FromStr for EducationLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "Graduation" {
            return Ok(EducationLevel::Bachelors);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.code() == s || l.label() == s)
            .ok_or_else(|| Error::UnknownEducationLevel(s.to_string()))
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// --- Resume sections ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub highest_education: Option<EducationLevel>,
    pub school: String,
    pub field: String,
    pub passing_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub year: String,
}

/// Shape shared by the draft form and the submitted snapshot.
/// `Default` is the empty form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub education: Education,
    pub skills: Vec<String>, // insertion order, duplicates allowed
    pub experience: Experience,
}

impl ResumeData {
    /// Current value of a scalar field as text. An unselected education level is "".
    pub fn value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Personal(f) => match f {
                PersonalField::Name => self.personal_info.name.as_str(),
                PersonalField::Email => self.personal_info.email.as_str(),
                PersonalField::Phone => self.personal_info.phone.as_str(),
            },
            FieldKey::Education(f) => match f {
                EducationField::HighestEducation => self
                    .education
                    .highest_education
                    .map(EducationLevel::code)
                    .unwrap_or(""),
                EducationField::School => self.education.school.as_str(),
                EducationField::Field => self.education.field.as_str(),
                EducationField::PassingYear => self.education.passing_year.as_str(),
            },
            FieldKey::Experience(f) => match f {
                ExperienceField::Company => self.experience.company.as_str(),
                ExperienceField::Position => self.experience.position.as_str(),
                ExperienceField::Year => self.experience.year.as_str(),
            },
        }
    }

    /// Overwrite one scalar field. For the education level, `value` is a code;
    /// anything unrecognized leaves the select empty.
    pub fn set(&mut self, key: FieldKey, value: &str) {
        match key {
            FieldKey::Education(EducationField::HighestEducation) => {
                self.education.highest_education = value.parse().ok();
            }
            _ => {
                if let Some(slot) = self.text_slot(key) {
                    *slot = value.to_string();
                }
            }
        }
    }

    /// Copy exactly one scalar field from `other`.
    pub fn copy_field_from(&mut self, other: &ResumeData, key: FieldKey) {
        match key {
            FieldKey::Education(EducationField::HighestEducation) => {
                self.education.highest_education = other.education.highest_education;
            }
            _ => self.set(key, other.value(key)),
        }
    }

    fn text_slot(&mut self, key: FieldKey) -> Option<&mut String> {
        match key {
            FieldKey::Personal(f) => Some(match f {
                PersonalField::Name => &mut self.personal_info.name,
                PersonalField::Email => &mut self.personal_info.email,
                PersonalField::Phone => &mut self.personal_info.phone,
            }),
            FieldKey::Education(f) => match f {
                EducationField::HighestEducation => None,
                EducationField::School => Some(&mut self.education.school),
                EducationField::Field => Some(&mut self.education.field),
                EducationField::PassingYear => Some(&mut self.education.passing_year),
            },
            FieldKey::Experience(f) => Some(match f {
                ExperienceField::Company => &mut self.experience.company,
                ExperienceField::Position => &mut self.experience.position,
                ExperienceField::Year => &mut self.experience.year,
            }),
        }
    }
}

// --- Field identifiers ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    HighestEducation,
    School,
    Field,
    PassingYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExperienceField {
    Company,
    Position,
    Year,
}

/// A scalar field, tagged with the section that owns it.
/// Skills are deliberately absent: they are edited through the skill list only.
/// Serialized as its bare field name, which is unique across sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldKey {
    Personal(PersonalField),
    Education(EducationField),
    Experience(ExperienceField),
}

impl FieldKey {
    pub const PERSONAL: [FieldKey; 3] = [
        FieldKey::Personal(PersonalField::Name),
        FieldKey::Personal(PersonalField::Email),
        FieldKey::Personal(PersonalField::Phone),
    ];

    pub const EDUCATION: [FieldKey; 4] = [
        FieldKey::Education(EducationField::HighestEducation),
        FieldKey::Education(EducationField::School),
        FieldKey::Education(EducationField::Field),
        FieldKey::Education(EducationField::PassingYear),
    ];

    pub const EXPERIENCE: [FieldKey; 3] = [
        FieldKey::Experience(ExperienceField::Company),
        FieldKey::Experience(ExperienceField::Position),
        FieldKey::Experience(ExperienceField::Year),
    ];

    /// Every editable field in preview order.
    pub fn all() -> impl Iterator<Item = FieldKey> {
        Self::PERSONAL
            .into_iter()
            .chain(Self::EDUCATION)
            .chain(Self::EXPERIENCE)
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKey::Personal(PersonalField::Name) => "name",
            FieldKey::Personal(PersonalField::Email) => "email",
            FieldKey::Personal(PersonalField::Phone) => "phone",
            FieldKey::Education(EducationField::HighestEducation) => "highestEducation",
            FieldKey::Education(EducationField::School) => "school",
            FieldKey::Education(EducationField::Field) => "field",
            FieldKey::Education(EducationField::PassingYear) => "passingYear",
            FieldKey::Experience(ExperienceField::Company) => "company",
            FieldKey::Experience(ExperienceField::Position) => "position",
            FieldKey::Experience(ExperienceField::Year) => "year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Personal(PersonalField::Name) => "Name",
            FieldKey::Personal(PersonalField::Email) => "Email",
            FieldKey::Personal(PersonalField::Phone) => "Phone",
            FieldKey::Education(EducationField::HighestEducation) => "Highest Education",
            FieldKey::Education(EducationField::School) => "School",
            FieldKey::Education(EducationField::Field) => "Field",
            FieldKey::Education(EducationField::PassingYear) => "Passing Year",
            FieldKey::Experience(ExperienceField::Company) => "Company",
            FieldKey::Experience(ExperienceField::Position) => "Position",
            FieldKey::Experience(ExperienceField::Year) => "Year",
        }
    }

    /// Classify a bare field name. Sections are checked education first,
    /// then experience, then personal info.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Self::EDUCATION
            .into_iter()
            .chain(Self::EXPERIENCE)
            .chain(Self::PERSONAL)
            .find(|k| k.name() == name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            FieldKey::Personal(PersonalField::Email) => InputKind::Email,
            FieldKey::Education(EducationField::HighestEducation) => InputKind::Select,
            _ => InputKind::Text,
        }
    }
}

impl FromStr for FieldKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<String> for FieldKey {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name)
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        key.name().to_string()
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Native constraint class of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Select,
}

impl InputKind {
    /// Whether a typed character is accepted at the key level.
    pub fn accepts(self, c: char) -> bool {
        match self {
            InputKind::Select => false,
            InputKind::Text | InputKind::Email => !c.is_control(),
        }
    }

    /// Whether a complete value passes the native check. Empty values always pass.
    pub fn is_valid(self, value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        match self {
            InputKind::Email => is_email_shaped(value),
            _ => true,
        }
    }
}

fn is_email_shaped(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}
