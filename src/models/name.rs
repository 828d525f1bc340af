//! Structured person names.

use std::fmt;

use serde::{Deserialize, Serialize};

const PREFIXES: &[&str] = &["mr", "mrs", "ms", "miss", "mx", "dr", "prof", "sir"];

/// A person's name split into its parts.
///
/// The engine never interprets these parts; it only parses a free-form
/// name into them and joins them back for display.
///
/// # Example
///
/// ```
/// use shift_payroll::models::PersonName;
///
/// let name = PersonName::parse("Dr. Ada Augusta King");
/// assert_eq!(name.prefix, "Dr.");
/// assert_eq!(name.given_name, "Ada");
/// assert_eq!(name.middle_name, "Augusta");
/// assert_eq!(name.surname, "King");
/// assert_eq!(name.to_string(), "Dr. Ada Augusta King");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName {
    /// Honorific such as "Mr" or "Dr.".
    pub prefix: String,
    /// First name.
    pub given_name: String,
    /// Everything between the given name and the surname.
    pub middle_name: String,
    /// Last name.
    pub surname: String,
}

impl PersonName {
    /// Parses a free-form name.
    ///
    /// A leading honorific (with or without a trailing dot) becomes the
    /// prefix. Of the remaining words the first is the given name, the last
    /// is the surname and any in between form the middle name. A single
    /// word is taken as the given name.
    pub fn parse(full_name: &str) -> Self {
        let mut words: Vec<&str> = full_name.split_whitespace().collect();

        let prefix = if words.len() > 1 && is_prefix(words[0]) {
            words.remove(0).to_string()
        } else {
            String::new()
        };

        let (given_name, middle_name, surname) = match words.as_slice() {
            [] => (String::new(), String::new(), String::new()),
            [given] => (given.to_string(), String::new(), String::new()),
            [given, middle @ .., surname] => {
                (given.to_string(), middle.join(" "), surname.to_string())
            }
        };

        Self {
            prefix,
            given_name,
            middle_name,
            surname,
        }
    }

    /// Returns true when every part is empty.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
            && self.given_name.is_empty()
            && self.middle_name.is_empty()
            && self.surname.is_empty()
    }
}

fn is_prefix(word: &str) -> bool {
    let bare = word.trim_end_matches('.').to_ascii_lowercase();
    PREFIXES.contains(&bare.as_str())
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            self.prefix.as_str(),
            self.given_name.as_str(),
            self.middle_name.as_str(),
            self.surname.as_str(),
        ];
        let joined: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
        write!(f, "{}", joined.join(" "))
    }
}
