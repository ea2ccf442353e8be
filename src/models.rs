use serde::{Deserialize, Serialize};

/// Gender of a registered child
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
    /// Value outside the known set, kept verbatim for display
    Unrecognized(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Gender {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            "other" => Gender::Other,
            _ => Gender::Unrecognized(raw),
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.as_str().to_string()
    }
}

/// Highest education level reached
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationStatus {
    None,
    Primary,
    Secondary,
    HigherSecondary,
    Vocational,
    Unrecognized(String),
}

impl EducationStatus {
    pub const ALL: [EducationStatus; 5] = [
        EducationStatus::None,
        EducationStatus::Primary,
        EducationStatus::Secondary,
        EducationStatus::HigherSecondary,
        EducationStatus::Vocational,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EducationStatus::None => "none",
            EducationStatus::Primary => "primary",
            EducationStatus::Secondary => "secondary",
            EducationStatus::HigherSecondary => "higher_secondary",
            EducationStatus::Vocational => "vocational",
            EducationStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for EducationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "none" => EducationStatus::None,
            "primary" => EducationStatus::Primary,
            "secondary" => EducationStatus::Secondary,
            "higher_secondary" => EducationStatus::HigherSecondary,
            "vocational" => EducationStatus::Vocational,
            _ => EducationStatus::Unrecognized(raw),
        }
    }
}

impl From<EducationStatus> for String {
    fn from(status: EducationStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Current health assessment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
    Unrecognized(String),
}

impl HealthStatus {
    pub const ALL: [HealthStatus; 5] = [
        HealthStatus::Excellent,
        HealthStatus::Good,
        HealthStatus::Fair,
        HealthStatus::Poor,
        HealthStatus::Critical,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            HealthStatus::Excellent => "excellent",
            HealthStatus::Good => "good",
            HealthStatus::Fair => "fair",
            HealthStatus::Poor => "poor",
            HealthStatus::Critical => "critical",
            HealthStatus::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for HealthStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "excellent" => HealthStatus::Excellent,
            "good" => HealthStatus::Good,
            "fair" => HealthStatus::Fair,
            "poor" => HealthStatus::Poor,
            "critical" => HealthStatus::Critical,
            _ => HealthStatus::Unrecognized(raw),
        }
    }
}

impl From<HealthStatus> for String {
    fn from(status: HealthStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A registered child, as stored in the backend `children` table.
///
/// Read-only from the dashboard's point of view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub district: String,
    pub location: String,
    pub education_status: EducationStatus,
    pub health_status: HealthStatus,
    pub verified: bool,
}

#[cfg(test)]
pub(crate) fn sample_child(n: usize, verified: bool) -> Child {
    Child {
        id: format!("child-{}", n),
        name: format!("Child {}", n),
        age: 6 + n as u32,
        gender: if n % 2 == 0 { Gender::Female } else { Gender::Male },
        district: String::from("Kathmandu"),
        location: format!("Ward {}", n),
        education_status: EducationStatus::Primary,
        health_status: HealthStatus::Good,
        verified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_row() {
        let row = r#"{
            "id": "3f1c",
            "name": "Asha",
            "age": 9,
            "gender": "female",
            "district": "Lalitpur",
            "location": "Patan",
            "education_status": "higher_secondary",
            "health_status": "critical",
            "verified": true,
            "created_at": "2025-07-27T10:00:00Z"
        }"#;
        let child: Child = serde_json::from_str(row).unwrap();
        assert_eq!(child.gender, Gender::Female);
        assert_eq!(child.education_status, EducationStatus::HigherSecondary);
        assert_eq!(child.health_status, HealthStatus::Critical);
        assert!(child.verified);
    }

    #[test]
    fn test_unknown_enum_values_are_kept() {
        let row = r#"{"id":"x","name":"N","age":3,"gender":"nonbinary","district":"d",
            "location":"l","education_status":"tertiary","health_status":"unknown","verified":false}"#;
        let child: Child = serde_json::from_str(row).unwrap();
        assert_eq!(child.gender, Gender::Unrecognized("nonbinary".into()));
        assert_eq!(child.education_status.as_str(), "tertiary");
        assert_eq!(child.health_status.as_str(), "unknown");
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let json = serde_json::to_value(sample_child(1, true)).unwrap();
        assert_eq!(json["education_status"], "primary");
        assert_eq!(json["gender"], "male");
    }
}
