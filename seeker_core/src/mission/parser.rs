// seeker_core/src/mission/parser.rs

use crate::error::{SeekerError, SeekerResult};

/// Colour adjectives are shared between targets, so they never identify one.
const COLOUR_WORDS: [&str; 8] = ["red", "pink", "green", "yellow", "blue", "orange", "purple", "white"];

/// Something that reads mission text and names the targets to visit, in
/// order. Returned names should come from `vocabulary`.
pub trait MissionPlanner {
    fn plan(&self, text: &str, vocabulary: &[String]) -> SeekerResult<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Planner,
    Keywords,
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMission {
    pub targets: Vec<String>,
    pub source: PlanSource,
}

/// Resolves mission text to targets.
///
/// The planner's answer is used when it names at least one known target.
/// Otherwise keyword matching runs over the text, and if that finds nothing
/// the first vocabulary entry becomes the only target.
pub fn plan_mission(
    planner: Option<&dyn MissionPlanner>,
    text: &str,
    vocabulary: &[String],
) -> SeekerResult<PlannedMission> {
    let default = vocabulary.first().ok_or(SeekerError::EmptyMission)?;

    if let Some(Ok(names)) = planner.map(|p| p.plan(text, vocabulary)) {
        let targets: Vec<String> = names
            .iter()
            .filter_map(|name| canonical(name, vocabulary))
            .collect();
        if !targets.is_empty() {
            return Ok(PlannedMission {
                targets,
                source: PlanSource::Planner,
            });
        }
    }

    let targets = keyword_targets(text, vocabulary);
    if !targets.is_empty() {
        return Ok(PlannedMission {
            targets,
            source: PlanSource::Keywords,
        });
    }

    Ok(PlannedMission {
        targets: vec![default.clone()],
        source: PlanSource::Default,
    })
}

/// Vocabulary entries mentioned in `text`, ordered by first mention.
/// A target is mentioned by its full name or by any of its non-colour words.
pub fn keyword_targets(text: &str, vocabulary: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut hits: Vec<(usize, &String)> = vocabulary
        .iter()
        .filter_map(|name| {
            let lower = name.to_lowercase();
            let by_name = find_word(&haystack, &lower);
            let by_word = lower
                .split_whitespace()
                .filter(|w| !COLOUR_WORDS.contains(w))
                .filter_map(|w| find_word(&haystack, w))
                .min();
            by_name.into_iter().chain(by_word).min().map(|at| (at, name))
        })
        .collect();
    hits.sort_by_key(|(at, _)| *at);
    hits.into_iter().map(|(_, name)| name.clone()).collect()
}

fn canonical(name: &str, vocabulary: &[String]) -> Option<String> {
    let name = name.trim();
    vocabulary
        .iter()
        .find(|v| v.eq_ignore_ascii_case(name))
        .cloned()
}

/// Byte offset of the first whole-word occurrence of `needle`.
fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    haystack.match_indices(needle).map(|(at, _)| at).find(|&at| {
        let before = haystack[..at].chars().next_back();
        let after = haystack[at + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> Vec<String> {
        ["Red Cube", "Pink Sphere", "Green Cone", "Yellow Cylinder", "Skeleton Head"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    struct Broken;

    impl MissionPlanner for Broken {
        fn plan(&self, _: &str, _: &[String]) -> SeekerResult<Vec<String>> {
            Err(SeekerError::Planner("offline".into()))
        }
    }

    struct Fixed(Vec<String>);

    impl MissionPlanner for Fixed {
        fn plan(&self, _: &str, _: &[String]) -> SeekerResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn keywords_follow_mention_order() {
        let found = keyword_targets("Find the sphere, then the RED CUBE and the skull... er, skeleton", &vocabulary());
        assert_eq!(found, vec!["Pink Sphere", "Red Cube", "Skeleton Head"]);
    }

    #[test]
    fn colour_alone_does_not_match() {
        assert!(keyword_targets("go to the green thing", &vocabulary()).is_empty());
        assert!(keyword_targets("cubes everywhere", &vocabulary()).is_empty());
    }

    #[test]
    fn planner_answer_is_canonicalised() {
        let planner = Fixed(vec!["green cone".into(), "Unicorn".into()]);
        let plan = plan_mission(Some(&planner), "whatever", &vocabulary()).unwrap();
        assert_eq!(plan.source, PlanSource::Planner);
        assert_eq!(plan.targets, vec!["Green Cone"]);
    }

    #[test]
    fn failed_planner_falls_back_to_keywords_then_default() {
        let plan = plan_mission(Some(&Broken), "visit the cylinder", &vocabulary()).unwrap();
        assert_eq!(plan.source, PlanSource::Keywords);
        assert_eq!(plan.targets, vec!["Yellow Cylinder"]);

        let plan = plan_mission(Some(&Fixed(vec![])), "dance", &vocabulary()).unwrap();
        assert_eq!(plan.source, PlanSource::Default);
        assert_eq!(plan.targets, vec!["Red Cube"]);
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        assert!(matches!(
            plan_mission(None, "anything", &[]),
            Err(SeekerError::EmptyMission)
        ));
    }
}
