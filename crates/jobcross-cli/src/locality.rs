/// Best-effort locality matching for free-text job locations.
///
/// The user's location is split naively on commas into a city and a state
/// token. A job counts as "local" when the city or the state matches the
/// job's location string under word-boundary rules, with an explicit veto
/// when the location names a different US state. This is a text heuristic,
/// not geocoding; ambiguous city names and delimiter-free locations can
/// still misclassify.
use regex::Regex;

/// All 50 states plus DC, abbreviation and full name.
const STATES: [(&str, &str); 51] = [
    ("al", "alabama"),
    ("ak", "alaska"),
    ("az", "arizona"),
    ("ar", "arkansas"),
    ("ca", "california"),
    ("co", "colorado"),
    ("ct", "connecticut"),
    ("de", "delaware"),
    ("fl", "florida"),
    ("ga", "georgia"),
    ("hi", "hawaii"),
    ("id", "idaho"),
    ("il", "illinois"),
    ("in", "indiana"),
    ("ia", "iowa"),
    ("ks", "kansas"),
    ("ky", "kentucky"),
    ("la", "louisiana"),
    ("me", "maine"),
    ("md", "maryland"),
    ("ma", "massachusetts"),
    ("mi", "michigan"),
    ("mn", "minnesota"),
    ("ms", "mississippi"),
    ("mo", "missouri"),
    ("mt", "montana"),
    ("ne", "nebraska"),
    ("nv", "nevada"),
    ("nh", "new hampshire"),
    ("nj", "new jersey"),
    ("nm", "new mexico"),
    ("ny", "new york"),
    ("nc", "north carolina"),
    ("nd", "north dakota"),
    ("oh", "ohio"),
    ("ok", "oklahoma"),
    ("or", "oregon"),
    ("pa", "pennsylvania"),
    ("ri", "rhode island"),
    ("sc", "south carolina"),
    ("sd", "south dakota"),
    ("tn", "tennessee"),
    ("tx", "texas"),
    ("ut", "utah"),
    ("vt", "vermont"),
    ("va", "virginia"),
    ("wa", "washington"),
    ("wv", "west virginia"),
    ("wi", "wisconsin"),
    ("wy", "wyoming"),
    ("dc", "district of columbia"),
];

/// The user's parsed city/state tokens, both lowercased and trimmed.
#[derive(Debug, Clone, Default)]
pub struct UserLocality {
    city: String,
    state: String,
}

impl UserLocality {
    /// Split the user's free-text location on commas: first part is the
    /// city, second the state. Anything beyond the second comma is ignored.
    pub fn parse(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        let mut parts = lower.split(',').map(|s| s.trim().to_string());
        let city = parts.next().unwrap_or_default();
        let state = parts.next().unwrap_or_default();
        Self { city, state }
    }

    /// No usable city or state token.
    pub fn is_empty(&self) -> bool {
        self.city.is_empty() && self.state.is_empty()
    }

    /// Decide whether a job belongs under the "local" filter mode.
    ///
    /// Remote-indicating postings are always excluded first; after that the
    /// job is local iff the city or the state matches.
    pub fn is_local(&self, location: &str, title: &str) -> bool {
        if self.is_empty() {
            return true;
        }

        let location = location.to_lowercase();
        let title = title.to_lowercase();

        if is_remote_indicated(&location, &title) {
            return false;
        }

        self.city_matches(&location) || self.state_matches(&location)
    }

    /// City match with word-boundary rules and an other-state veto.
    fn city_matches(&self, location: &str) -> bool {
        if self.city.is_empty() {
            return false;
        }

        // A location that names a different state is somewhere else, no
        // matter how well the city name matches ("Birmingham, MI" for a
        // user in "Birmingham, AL").
        if !self.state.is_empty() && mentions_other_state(location, &self.state) {
            return false;
        }

        let pattern = token_pattern(&self.city);
        let word = Regex::new(&format!(r"\b{pattern}\b")).expect("escaped pattern is valid");
        if word.is_match(location)
            || location.starts_with(&self.city)
            || location.contains(&format!(", {}", self.city))
            || location.contains(&format!("{},", self.city))
        {
            return true;
        }

        // Fallback for state-less locations like "Birmingham, Jefferson
        // County": accept the city at the start or right after a comma.
        // Short tokens are too collision-prone for this.
        if !self.state.is_empty() && self.city.len() > 3 {
            let anchored =
                Regex::new(&format!(r"(^|,\s*){pattern}\b")).expect("escaped pattern is valid");
            return anchored.is_match(location);
        }

        false
    }

    /// State match on either the abbreviation or the full name.
    fn state_matches(&self, location: &str) -> bool {
        if self.state.is_empty() {
            return false;
        }

        let (abbr, full) = state_forms(&self.state);
        let alternation = format!("({}|{})", regex::escape(&abbr), regex::escape(&full));

        let word =
            Regex::new(&format!(r"\b{alternation}\b")).expect("escaped pattern is valid");
        if word.is_match(location) {
            return true;
        }

        let after_comma = Regex::new(&format!(r",\s*{alternation}(\s|,|$)"))
            .expect("escaped pattern is valid");
        if after_comma.is_match(location) {
            return true;
        }

        let at_end =
            Regex::new(&format!(r"(^|\s){alternation}$")).expect("escaped pattern is valid");
        at_end.is_match(location)
    }
}

/// Remote/work-from-home exclusion list for the local filter mode.
/// Inputs must already be lowercased.
fn is_remote_indicated(location: &str, title: &str) -> bool {
    location.contains("remote")
        || title.contains("remote")
        || location.contains("work from home")
        || title.contains("work from home")
        || location.contains("wfh")
        || location == "us"
        || location.starts_with("us,")
        || location.contains("international")
        || location.contains("anywhere")
}

/// The simpler predicate behind the "remote" filter mode.
pub fn matches_remote(location: &str, title: &str) -> bool {
    let location = location.to_lowercase();
    let title = title.to_lowercase();
    location.contains("remote")
        || title.contains("remote")
        || location.contains("work from home")
        || title.contains("work from home")
        || location.contains("wfh")
}

/// Normalize a state token to `(abbreviation, full name)`. Unrecognized
/// tokens fall back to themselves in both positions.
fn state_forms(token: &str) -> (String, String) {
    for (abbr, full) in STATES {
        if token == abbr || token == full {
            return (abbr.to_string(), full.to_string());
        }
    }
    (token.to_string(), token.to_string())
}

/// True when the location names a state other than the user's, as a whole
/// word, in either abbreviation or full-name form.
fn mentions_other_state(location: &str, user_state: &str) -> bool {
    let (user_abbr, user_full) = state_forms(user_state);
    let mut others: Vec<String> = Vec::new();
    for (abbr, full) in STATES {
        if abbr == user_abbr || full == user_full {
            continue;
        }
        others.push(regex::escape(abbr));
        others.push(regex::escape(full));
    }
    let pattern = format!(r"\b({})\b", others.join("|"));
    let re = Regex::new(&pattern).expect("escaped pattern is valid");
    re.is_match(location)
}

/// Escape a multi-word token for embedding in a regex, with flexible
/// whitespace between words.
fn token_pattern(token: &str) -> String {
    token
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}
