use crate::domain::{CandidateRecord, Gender, MatchQuery, MatchResult};
use crate::errors::MatchError;

/// How [`CandidateDirectory::find_matches`] treats a requester category it
/// does not recognize.
///
/// `Lenient` reproduces the historical behavior: the query silently matches
/// nothing. `Strict` surfaces the bad label to the caller instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryPolicy {
    #[default]
    Lenient,
    Strict,
}

/// The fixed, in-memory candidate roster and the query surface over it.
///
/// The roster is set at construction and never mutated; every query re-scans
/// the full list, so concurrent readers need no coordination.
#[derive(Clone, Debug)]
pub struct CandidateDirectory {
    roster: Vec<CandidateRecord>,
    category_policy: CategoryPolicy,
}

impl Default for CandidateDirectory {
    fn default() -> Self {
        Self::new(default_roster(), CategoryPolicy::default())
    }
}

impl CandidateDirectory {
    pub fn new(roster: Vec<CandidateRecord>, category_policy: CategoryPolicy) -> Self {
        Self { roster, category_policy }
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// All roster entries of the requester's complement category whose age
    /// meets the threshold, in roster order. A negative threshold matches
    /// every age. Pure read over the roster.
    ///
    /// An unrecognized `requester_category` yields an empty result under the
    /// lenient policy and [`MatchError::UnrecognizedCategory`] under the
    /// strict one.
    pub fn find_matches(
        &self,
        min_age: i64,
        requester_category: &str,
    ) -> Result<MatchResult, MatchError> {
        let Some(requester_gender) = Gender::parse(requester_category) else {
            return match self.category_policy {
                CategoryPolicy::Lenient => Ok(MatchResult::default()),
                CategoryPolicy::Strict => {
                    Err(MatchError::UnrecognizedCategory(requester_category.to_string()))
                }
            };
        };

        Ok(self.query(&MatchQuery { min_age, requester_gender }))
    }

    /// Typed variant of [`Self::find_matches`] for callers that already hold
    /// a parsed query.
    pub fn query(&self, query: &MatchQuery) -> MatchResult {
        let target = query.requester_gender.complement();
        let candidates = self
            .roster
            .iter()
            .filter(|candidate| {
                i64::from(candidate.age) >= query.min_age && candidate.gender == target
            })
            .cloned()
            .collect();

        MatchResult { candidates }
    }
}

/// The built-in roster.
pub fn default_roster() -> Vec<CandidateRecord> {
    use Gender::{Female, Male};

    [
        ("muneeb", 22, Male),
        ("Azaan", 19, Male),
        ("ubaid", 25, Male),
        ("Ali", 20, Male),
        ("Bilal", 19, Male),
        ("Hashir", 16, Male),
        ("Atif", 30, Male),
        ("Huzaifa", 27, Male),
        ("Fariha", 25, Female),
        ("Kinza", 20, Female),
        ("Rubab", 19, Female),
    ]
    .into_iter()
    .map(|(name, age, gender)| CandidateRecord { name: name.to_string(), age, gender })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_roster, CandidateDirectory, CategoryPolicy};
    use crate::domain::{CandidateRecord, Gender};
    use crate::errors::MatchError;

    fn directory() -> CandidateDirectory {
        CandidateDirectory::default()
    }

    #[test]
    fn returns_only_complement_category_at_or_above_threshold() {
        let result = directory().find_matches(20, "female").expect("lenient query");

        assert!(!result.candidates.is_empty());
        for candidate in &result.candidates {
            assert_eq!(candidate.gender, Gender::Male);
            assert!(candidate.age >= 20, "{} is below threshold", candidate.name);
        }
    }

    #[test]
    fn never_returns_the_requesters_own_category() {
        let result = directory().find_matches(0, "male").expect("lenient query");

        assert!(result.candidates.iter().all(|candidate| candidate.gender == Gender::Female));
    }

    #[test]
    fn preserves_roster_order_and_is_idempotent() {
        let directory = directory();
        let first = directory.find_matches(18, "male").expect("lenient query");
        let second = directory.find_matches(18, "male").expect("lenient query");

        assert_eq!(first, second);
        let names: Vec<&str> =
            first.candidates.iter().map(|candidate| candidate.name.as_str()).collect();
        assert_eq!(names, vec!["Fariha", "Kinza", "Rubab"]);
    }

    #[test]
    fn category_labels_match_case_insensitively() {
        let directory = directory();
        let lower = directory.find_matches(20, "male").expect("lenient query");
        let title = directory.find_matches(20, "Male").expect("lenient query");
        let upper = directory.find_matches(20, "MALE").expect("lenient query");

        assert_eq!(lower, title);
        assert_eq!(lower, upper);
    }

    #[test]
    fn negative_threshold_matches_the_full_complement_subset() {
        let result = directory().find_matches(-5, "female").expect("lenient query");

        let male_count =
            default_roster().iter().filter(|candidate| candidate.gender == Gender::Male).count();
        assert_eq!(result.candidates.len(), male_count);
    }

    #[test]
    fn threshold_above_every_age_matches_nothing() {
        let result = directory().find_matches(99, "male").expect("lenient query");
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn unrecognized_category_degrades_to_empty_under_lenient_policy() {
        let result = directory().find_matches(0, "other").expect("lenient query");
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn unrecognized_category_errors_under_strict_policy() {
        let directory = CandidateDirectory::new(default_roster(), CategoryPolicy::Strict);
        let error = directory.find_matches(0, "other").expect_err("strict query");

        assert_eq!(error, MatchError::UnrecognizedCategory("other".to_string()));
    }

    #[test]
    fn age_boundary_is_inclusive() {
        let roster = vec![
            CandidateRecord { name: "Sana".to_string(), age: 19, gender: Gender::Female },
            CandidateRecord { name: "Hira".to_string(), age: 20, gender: Gender::Female },
        ];
        let directory = CandidateDirectory::new(roster, CategoryPolicy::Lenient);

        let result = directory.find_matches(20, "male").expect("lenient query");

        assert_eq!(result.candidates.len(), 1);
        assert_eq!(result.candidates[0].name, "Hira");
        assert_eq!(result.candidates[0].age, 20);
    }

    #[test]
    fn duplicate_records_are_preserved() {
        let twin = CandidateRecord { name: "Kinza".to_string(), age: 20, gender: Gender::Female };
        let directory =
            CandidateDirectory::new(vec![twin.clone(), twin.clone()], CategoryPolicy::Lenient);

        let result = directory.find_matches(18, "male").expect("lenient query");
        assert_eq!(result.candidates, vec![twin.clone(), twin]);
    }

    #[test]
    fn default_roster_shape_is_stable() {
        let roster = default_roster();
        assert_eq!(roster.len(), 11);
        assert_eq!(roster.iter().filter(|c| c.gender == Gender::Male).count(), 8);
        assert_eq!(roster.iter().filter(|c| c.gender == Gender::Female).count(), 3);
    }
}
