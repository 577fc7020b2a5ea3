use serde::{Deserialize, Serialize};

/// The two-valued classification attached to every candidate and requester.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parses a requester-supplied label, case-insensitively. Both label
    /// families used by the intake surfaces map onto the same two categories;
    /// anything else is unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" | "boy" => Some(Self::Male),
            "female" | "girl" => Some(Self::Female),
            _ => None,
        }
    }

    /// The opposite category. Match queries always target the complement of
    /// the requester's own category.
    pub fn complement(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One roster entry. Records are immutable, fixed at process start, and have
/// no identity beyond structural equality; duplicates are permitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
}

/// One match query, constructed per invocation and never persisted. The
/// threshold is a signed integer so that negative values match every age.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchQuery {
    pub min_age: i64,
    pub requester_gender: Gender,
}

/// Roster entries that satisfied a query, in roster insertion order. No sort
/// is applied and there is no bound on the result size.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub candidates: Vec<CandidateRecord>,
}

#[cfg(test)]
mod tests {
    use super::Gender;

    #[test]
    fn both_label_families_parse_case_insensitively() {
        for label in ["male", "Male", "MALE", "boy", "BOY"] {
            assert_eq!(Gender::parse(label), Some(Gender::Male), "label {label}");
        }
        for label in ["female", "Female", "FEMALE", "girl", "Girl"] {
            assert_eq!(Gender::parse(label), Some(Gender::Female), "label {label}");
        }
    }

    #[test]
    fn unrecognized_labels_do_not_parse() {
        for label in ["other", "", "  ", "mal", "males", "boys"] {
            assert_eq!(Gender::parse(label), None, "label {label:?}");
        }
    }

    #[test]
    fn complement_is_an_involution() {
        assert_eq!(Gender::Male.complement(), Gender::Female);
        assert_eq!(Gender::Female.complement(), Gender::Male);
        assert_eq!(Gender::Male.complement().complement(), Gender::Male);
    }
}
