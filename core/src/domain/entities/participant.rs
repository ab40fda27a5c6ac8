//! Registered participant and the fixed catalogues a registration draws from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Academic department
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "AIML")]
    Aiml,
    #[serde(rename = "ENTC")]
    Entc,
    #[serde(rename = "CS")]
    Cs,
    #[serde(rename = "COMPUTER")]
    Computer,
    Mechanical,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Aiml,
        Department::Entc,
        Department::Cs,
        Department::Computer,
        Department::Mechanical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Aiml => "AIML",
            Department::Entc => "ENTC",
            Department::Cs => "CS",
            Department::Computer => "COMPUTER",
            Department::Mechanical => "Mechanical",
        }
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Invalid department: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(format!("Invalid gender: {}", other)),
        }
    }
}

/// Events offered on sports day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    Cricket,
    Badminton,
    Carom,
    Chess,
    Running,
    #[serde(rename = "Kho-Kho")]
    KhoKho,
    Kabaddi,
    Volleyball,
}

impl Sport {
    pub const ALL: [Sport; 8] = [
        Sport::Cricket,
        Sport::Badminton,
        Sport::Carom,
        Sport::Chess,
        Sport::Running,
        Sport::KhoKho,
        Sport::Kabaddi,
        Sport::Volleyball,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Cricket => "Cricket",
            Sport::Badminton => "Badminton",
            Sport::Carom => "Carom",
            Sport::Chess => "Chess",
            Sport::Running => "Running",
            Sport::KhoKho => "Kho-Kho",
            Sport::Kabaddi => "Kabaddi",
            Sport::Volleyball => "Volleyball",
        }
    }
}

impl FromStr for Sport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.as_str() == s)
            .ok_or_else(|| format!("Invalid sport: {}", s))
    }
}

/// A confirmed registration.
///
/// `roll_no` is stored upper-cased and `email` lower-cased; both are unique
/// across participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub roll_no: String,
    pub phone: String,
    pub email: String,
    pub department: Department,
    pub batch: String,
    pub year: u8,
    pub gender: Gender,
    pub sports: Vec<Sport>,
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    /// Canonical form of a roll number
    pub fn normalize_roll_no(roll_no: &str) -> String {
        roll_no.trim().to_uppercase()
    }

    /// True when roll number, email and phone all belong to this participant
    pub fn matches_contact(&self, roll_no: &str, email: &str, phone: &str) -> bool {
        self.roll_no == Self::normalize_roll_no(roll_no)
            && self.email.eq_ignore_ascii_case(email.trim())
            && self.phone == phone.trim()
    }
}

/// Admin search over registrations. Blank fields are ignored.
///
/// `query` is a case-insensitive substring of name, roll number or email;
/// the catalogue fields must equal the stored value exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParticipantFilter {
    pub query: Option<String>,
    pub department: Option<String>,
    pub sport: Option<String>,
    pub gender: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ParticipantFilter {
    pub fn matches(&self, participant: &Participant) -> bool {
        if let Some(query) = present(&self.query) {
            let query = query.to_lowercase();
            let hit = [&participant.name, &participant.roll_no, &participant.email]
                .iter()
                .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }
        if let Some(department) = present(&self.department) {
            if participant.department.as_str() != department {
                return false;
            }
        }
        if let Some(sport) = present(&self.sport) {
            if !participant.sports.iter().any(|s| s.as_str() == sport) {
                return false;
            }
        }
        if let Some(gender) = present(&self.gender) {
            if participant.gender.as_str() != gender {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_parsing_is_exact() {
        assert_eq!("AIML".parse::<Department>().unwrap(), Department::Aiml);
        assert_eq!("Mechanical".parse::<Department>().unwrap(), Department::Mechanical);
        assert!("aiml".parse::<Department>().is_err());
        assert_eq!("Kho-Kho".parse::<Sport>().unwrap(), Sport::KhoKho);
        assert!("Football".parse::<Sport>().is_err());
        assert!("male".parse::<Gender>().is_err());
    }

    #[test]
    fn test_catalogue_serialization_matches_labels() {
        for sport in Sport::ALL {
            assert_eq!(
                serde_json::to_value(sport).unwrap(),
                serde_json::json!(sport.as_str())
            );
        }
        for department in Department::ALL {
            assert_eq!(
                serde_json::to_value(department).unwrap(),
                serde_json::json!(department.as_str())
            );
        }
    }

    #[test]
    fn test_matches_contact_normalizes_inputs() {
        let participant = Participant {
            id: Uuid::new_v4(),
            name: "Asha Patil".to_string(),
            roll_no: "CS21042".to_string(),
            phone: "9876543210".to_string(),
            email: "asha@college.edu".to_string(),
            department: Department::Cs,
            batch: "2021-2025".to_string(),
            year: 3,
            gender: Gender::Female,
            sports: vec![Sport::Chess],
            registered_at: Utc::now(),
        };

        assert!(participant.matches_contact(" cs21042 ", "Asha@College.edu", "9876543210"));
        assert!(!participant.matches_contact("CS21042", "asha@college.edu", "9876543211"));
    }

    fn sample() -> Participant {
        Participant {
            id: Uuid::new_v4(),
            name: "Asha Patil".to_string(),
            roll_no: "AI22005".to_string(),
            phone: "9876543210".to_string(),
            email: "asha@college.edu".to_string(),
            department: Department::Aiml,
            batch: "2022-2026".to_string(),
            year: 2,
            gender: Gender::Female,
            sports: vec![Sport::Badminton, Sport::KhoKho],
            registered_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_query_is_case_insensitive_substring() {
        let participant = sample();
        let by = |query: &str| ParticipantFilter {
            query: Some(query.to_string()),
            ..Default::default()
        };

        assert!(by("asha").matches(&participant));
        assert!(by("ai22").matches(&participant));
        assert!(by("COLLEGE.EDU").matches(&participant));
        assert!(!by("rahul").matches(&participant));
        assert!(by("   ").matches(&participant));
    }

    #[test]
    fn test_filter_catalogue_fields_are_exact() {
        let participant = sample();

        let filter = ParticipantFilter {
            department: Some("AIML".to_string()),
            sport: Some("Kho-Kho".to_string()),
            gender: Some("Female".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&participant));

        let filter = ParticipantFilter {
            sport: Some("Cricket".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&participant));

        let filter = ParticipantFilter {
            department: Some("aiml".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&participant));
    }
}
