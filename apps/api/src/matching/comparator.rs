use std::collections::HashSet;

/// A case-sensitive set of skill names. Spellings are compared verbatim:
/// no trimming, no case folding, no synonyms. Repeated entries collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet<'a>(HashSet<&'a str>);

impl<'a> SkillSet<'a> {
    pub fn from_skills(skills: &'a [String]) -> Self {
        Self(skills.iter().map(String::as_str).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of skills present in both sets.
    pub fn overlap(&self, other: &SkillSet<'_>) -> usize {
        self.0.iter().filter(|skill| other.0.contains(*skill)).count()
    }
}

/// Percentage of the target's skills covered by the subject, rounded to a whole number.
///
/// The denominator is always the target's skill count, so the score is asymmetric:
/// `score(a, b)` and `score(b, a)` generally differ. Either side empty scores 0.
pub fn score(subject: &SkillSet<'_>, target: &SkillSet<'_>) -> f64 {
    if subject.is_empty() || target.is_empty() {
        return 0.0;
    }
    let matched = subject.overlap(target) as f64;
    (100.0 * matched / target.len() as f64).round()
}

/// Convenience over raw skill lists as stored on profiles and jobs.
pub fn score_skills(subject: &[String], target: &[String]) -> f64 {
    score(&SkillSet::from_skills(subject), &SkillSet::from_skills(target))
}
