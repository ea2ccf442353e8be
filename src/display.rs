//! Display mapping - turns record attributes into badge labels and emphasis
//!
//! Every status attribute goes through one lookup, [`StatusBadge::badge`],
//! so adding an enum variant fails to compile until it is given a style.

use crate::models::{Child, EducationStatus, Gender, HealthStatus};

/// Visual emphasis of a badge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Standard emphasis
    Default,
    /// Neutral, muted emphasis
    Secondary,
    /// Strong warning
    Destructive,
    /// Outline only
    Outline,
    /// Distinct accent
    Accent,
}

/// A rendered badge: text plus emphasis
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl Badge {
    fn new(label: impl Into<String>, variant: BadgeVariant) -> Self {
        Badge {
            label: label.into(),
            variant,
        }
    }
}

/// A status attribute that is shown as a badge
#[derive(Clone, Copy, Debug)]
pub enum StatusBadge<'a> {
    Education(&'a EducationStatus),
    Health(&'a HealthStatus),
    Verification(bool),
}

impl StatusBadge<'_> {
    pub fn badge(&self) -> Badge {
        match self {
            StatusBadge::Education(status) => {
                let variant = match status {
                    EducationStatus::None => BadgeVariant::Destructive,
                    EducationStatus::Primary => BadgeVariant::Secondary,
                    EducationStatus::Secondary
                    | EducationStatus::HigherSecondary
                    | EducationStatus::Vocational => BadgeVariant::Default,
                    EducationStatus::Unrecognized(_) => BadgeVariant::Secondary,
                };
                Badge::new(humanize(status.as_str()), variant)
            }
            StatusBadge::Health(status) => {
                let variant = match status {
                    HealthStatus::Excellent => BadgeVariant::Default,
                    HealthStatus::Good | HealthStatus::Fair => BadgeVariant::Secondary,
                    HealthStatus::Poor | HealthStatus::Critical => BadgeVariant::Destructive,
                    HealthStatus::Unrecognized(_) => BadgeVariant::Secondary,
                };
                Badge::new(capitalize(status.as_str()), variant)
            }
            StatusBadge::Verification(true) => Badge::new("Verified", BadgeVariant::Accent),
            StatusBadge::Verification(false) => Badge::new("Pending", BadgeVariant::Outline),
        }
    }
}

/// Uppercase the first character, leave the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `higher_secondary` -> `Higher Secondary`
pub fn humanize(text: &str) -> String {
    text.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
}

pub fn education_badge(child: &Child) -> Badge {
    StatusBadge::Education(&child.education_status).badge()
}

pub fn health_badge(child: &Child) -> Badge {
    StatusBadge::Health(&child.health_status).badge()
}

pub fn verification_badge(child: &Child) -> Badge {
    StatusBadge::Verification(child.verified).badge()
}

pub fn gender_label(gender: &Gender) -> String {
    capitalize(gender.as_str())
}

/// Secondary line under the name: `9 years old • Female`
pub fn details_line(child: &Child) -> String {
    format!("{} years old • {}", child.age, gender_label(&child.gender))
}
