use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One of the two daily routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Morning,
    Evening,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Morning, Section::Evening];

    /// The other section of the same day.
    pub fn other(&self) -> Section {
        match self {
            Section::Morning => Section::Evening,
            Section::Evening => Section::Morning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Morning => "morning",
            Section::Evening => "evening",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" | "am" => Ok(Section::Morning),
            "evening" | "pm" => Ok(Section::Evening),
            _ => Err(ValidationError::UnknownSection(s.to_string())),
        }
    }
}

/// A single step of today's routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineStep {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub icon: String,
}

/// Template entry a fresh [`RoutineStep`] is stamped from each day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

impl StepTemplate {
    pub fn new(id: &str, name: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }

    fn fresh(&self) -> RoutineStep {
        RoutineStep {
            id: self.id.clone(),
            name: self.name.clone(),
            completed: false,
            icon: self.icon.clone(),
        }
    }
}

/// Ordered step templates for both sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineTemplate {
    #[serde(default = "default_morning_steps")]
    pub morning: Vec<StepTemplate>,
    #[serde(default = "default_evening_steps")]
    pub evening: Vec<StepTemplate>,
}

impl RoutineTemplate {
    pub fn steps(&self, section: Section) -> &[StepTemplate] {
        match section {
            Section::Morning => &self.morning,
            Section::Evening => &self.evening,
        }
    }

    /// Fresh, uncompleted steps for `section`.
    pub fn fresh_steps(&self, section: Section) -> Vec<RoutineStep> {
        self.steps(section).iter().map(StepTemplate::fresh).collect()
    }
}

impl Default for RoutineTemplate {
    fn default() -> Self {
        Self {
            morning: default_morning_steps(),
            evening: default_evening_steps(),
        }
    }
}

fn default_morning_steps() -> Vec<StepTemplate> {
    vec![
        StepTemplate::new("m1", "Cleanser", "🧴"),
        StepTemplate::new("m2", "Toner", "💧"),
        StepTemplate::new("m3", "Serum", "✨"),
        StepTemplate::new("m4", "Moisturizer", "🌿"),
        StepTemplate::new("m5", "SPF", "☀️"),
    ]
}

fn default_evening_steps() -> Vec<StepTemplate> {
    vec![
        StepTemplate::new("e1", "Makeup Remover", "🌙"),
        StepTemplate::new("e2", "Cleanser", "🧴"),
        StepTemplate::new("e3", "Toner", "💧"),
        StepTemplate::new("e4", "Serum", "✨"),
        StepTemplate::new("e5", "Night Cream", "🌸"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_parses_case_insensitively() {
        assert_eq!("Morning".parse::<Section>().unwrap(), Section::Morning);
        assert_eq!("pm".parse::<Section>().unwrap(), Section::Evening);
        assert!("noon".parse::<Section>().is_err());
    }

    #[test]
    fn section_other_flips() {
        assert_eq!(Section::Morning.other(), Section::Evening);
        assert_eq!(Section::Evening.other(), Section::Morning);
    }

    #[test]
    fn default_template_has_five_steps_per_section() {
        let template = RoutineTemplate::default();
        assert_eq!(template.morning.len(), 5);
        assert_eq!(template.evening.len(), 5);
        assert_eq!(template.morning[0].id, "m1");
        assert_eq!(template.evening[4].name, "Night Cream");
    }

    #[test]
    fn fresh_steps_are_uncompleted() {
        let steps = RoutineTemplate::default().fresh_steps(Section::Evening);
        assert!(steps.iter().all(|s| !s.completed));
        assert_eq!(steps[0].id, "e1");
    }
}
