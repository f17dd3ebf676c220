use serde::{Deserialize, Serialize};

/// The ten field labels a lookbook profile can carry, in the order they
/// appear on the page.
pub const FIELD_LABELS: [&str; 10] = [
    "Full Name",
    "Title",
    "Company",
    "City",
    "State",
    "Country",
    "Areas of Expertise",
    "Biography",
    "LinkedIn",
    "Website",
];

/// One mentor profile parsed from page text. Every field is optional;
/// the page enforces no schema, and absent fields stay absent in the
/// JSON output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MentorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas_of_expertise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl MentorRecord {
    /// Store a value under a field label. A repeated label overwrites the
    /// earlier value. Unknown labels are ignored (the parser never passes
    /// one).
    pub fn set(&mut self, label: &str, value: String) {
        let slot = match label {
            "Full Name" => &mut self.full_name,
            "Title" => &mut self.title,
            "Company" => &mut self.company,
            "City" => &mut self.city,
            "State" => &mut self.state,
            "Country" => &mut self.country,
            "Areas of Expertise" => &mut self.areas_of_expertise,
            "Biography" => &mut self.biography,
            "LinkedIn" => &mut self.linkedin,
            "Website" => &mut self.website,
            _ => return,
        };
        *slot = Some(value);
    }

    /// No field ever received a value.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
