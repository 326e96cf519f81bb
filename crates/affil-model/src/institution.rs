use serde::{Deserialize, Serialize};

use crate::ids::RorId;

/// Joins the non-empty location fields of an output record.
pub const LOCATION_DELIMITER: &str = ", ";

/// Where an institution is located. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub subdivision: String,
    pub locality: String,
}

impl Location {
    pub fn new(
        country: impl Into<String>,
        subdivision: impl Into<String>,
        locality: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            subdivision: subdivision.into(),
            locality: locality.into(),
        }
    }

    /// Country, subdivision and locality, in that order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.country, &self.subdivision, &self.locality]
    }

    /// Non-empty fields joined with [`LOCATION_DELIMITER`].
    pub fn display(&self) -> String {
        self.fields()
            .into_iter()
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join(LOCATION_DELIMITER)
    }
}

/// An organization from the registry.
///
/// `alternate_names` keeps the original casing of every non-canonical name
/// and acronym, in dataset order: further names first, then acronyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub id: RorId,
    pub name: String,
    pub alternate_names: Vec<String>,
    pub location: Location,
}

impl Institution {
    /// Canonical name followed by every alternate.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alternate_names.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_skips_empty_fields() {
        let location = Location::new("Germany", "", "Berlin");
        assert_eq!(location.display(), "Germany, Berlin");
        assert_eq!(Location::default().display(), "");
    }

    #[test]
    fn all_names_starts_with_canonical() {
        let institution = Institution {
            id: RorId::new("X1").unwrap(),
            name: "Example University".to_string(),
            alternate_names: vec!["EU".to_string()],
            location: Location::default(),
        };
        let names: Vec<&str> = institution.all_names().collect();
        assert_eq!(names, vec!["Example University", "EU"]);
    }
}
