//! Static catalog of therapeutic techniques and the selection policy.
//!
//! Selection is intentionally randomized across sessions; the random
//! source is injected so tests can pin the pick and assert the full
//! candidate set.

use crate::types::InterventionType;
use rand::Rng;

/// One technique, tagged with the trigger categories it suits
/// ("general" applies everywhere).
#[derive(Debug)]
pub struct Technique {
    pub key: &'static str,
    pub name: &'static str,
    pub kind: InterventionType,
    pub categories: &'static [&'static str],
}

/// Terminal fallback when every selection branch comes up empty.
pub const DEFAULT_KEY: &str = "box_breathing";

pub static CATALOG: &[Technique] = &[
    // grounding
    Technique {
        key: "five_senses",
        name: "5-4-3-2-1 senses grounding",
        kind: InterventionType::Grounding,
        categories: &["general"],
    },
    Technique {
        key: "feet_on_floor",
        name: "feet-on-floor anchoring",
        kind: InterventionType::Grounding,
        categories: &["work", "practical"],
    },
    Technique {
        key: "name_surroundings",
        name: "naming five things around you",
        kind: InterventionType::Grounding,
        categories: &["social", "emotional"],
    },
    // breathing
    Technique {
        key: "box_breathing",
        name: "box breathing (4-4-4-4)",
        kind: InterventionType::Breathing,
        categories: &["general"],
    },
    Technique {
        key: "paced_exhale",
        name: "long-exhale paced breathing",
        kind: InterventionType::Breathing,
        categories: &["work", "existential"],
    },
    Technique {
        key: "belly_breathing",
        name: "slow belly breathing",
        kind: InterventionType::Breathing,
        categories: &["emotional", "social"],
    },
    // cognitive
    Technique {
        key: "thought_reframe",
        name: "reframing the anxious thought",
        kind: InterventionType::Cognitive,
        categories: &["work", "identity"],
    },
    Technique {
        key: "evidence_check",
        name: "checking the evidence for the worry",
        kind: InterventionType::Cognitive,
        categories: &["identity", "life_path"],
    },
    Technique {
        key: "worry_window",
        name: "scheduling a worry window",
        kind: InterventionType::Cognitive,
        categories: &["existential", "practical"],
    },
    // mindfulness
    Technique {
        key: "body_scan",
        name: "short body scan",
        kind: InterventionType::Mindfulness,
        categories: &["general"],
    },
    Technique {
        key: "mindful_pause",
        name: "one-minute mindful pause",
        kind: InterventionType::Mindfulness,
        categories: &["social", "emotional"],
    },
    Technique {
        key: "leaves_on_stream",
        name: "leaves-on-a-stream visualization",
        kind: InterventionType::Mindfulness,
        categories: &["existential", "life_path"],
    },
    // physical
    Technique {
        key: "shoulder_release",
        name: "shoulder and jaw release",
        kind: InterventionType::Physical,
        categories: &["work"],
    },
    Technique {
        key: "brisk_walk",
        name: "five-minute brisk walk",
        kind: InterventionType::Physical,
        categories: &["life_path", "practical"],
    },
    Technique {
        key: "cold_water_reset",
        name: "cold water on wrists and face",
        kind: InterventionType::Physical,
        categories: &["emotional"],
    },
];

/// Technique types preferred at a given severity.
fn preferred_kinds(level: u8) -> &'static [InterventionType] {
    if level >= 7 {
        &[InterventionType::Grounding, InterventionType::Breathing]
    } else if level >= 4 {
        &[InterventionType::Mindfulness]
    } else {
        &[InterventionType::Cognitive, InterventionType::Physical]
    }
}

/// The candidate set the random pick draws from: category-tagged (or
/// general) techniques, narrowed by the severity type preference; each
/// narrowing falls back to the wider set rather than going empty.
pub fn candidates(category: Option<&str>, level: u8) -> Vec<&'static Technique> {
    let by_category: Vec<&Technique> = match category {
        Some(cat) => CATALOG
            .iter()
            .filter(|t| t.categories.contains(&cat) || t.categories.contains(&"general"))
            .collect(),
        None => vec![],
    };
    let pool: Vec<&Technique> = if by_category.is_empty() {
        CATALOG.iter().collect()
    } else {
        by_category
    };

    let preferred = preferred_kinds(level);
    let narrowed: Vec<&Technique> = pool
        .iter()
        .copied()
        .filter(|t| preferred.contains(&t.kind))
        .collect();
    if narrowed.is_empty() {
        pool
    } else {
        narrowed
    }
}

/// Pick a technique for `(category, level)` uniformly at random among
/// the candidates. Repeated calls with identical inputs may differ.
pub fn select_intervention<R: Rng>(
    category: Option<&str>,
    level: u8,
    rng: &mut R,
) -> &'static Technique {
    let cands = candidates(category, level);
    if cands.is_empty() {
        return CATALOG
            .iter()
            .find(|t| t.key == DEFAULT_KEY)
            .expect("default technique present in catalog");
    }
    cands[rng.gen_range(0..cands.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn severe_work_candidates_are_grounding_or_breathing() {
        let cands = candidates(Some("work"), 7);
        assert!(!cands.is_empty());
        for t in &cands {
            assert!(
                t.kind == InterventionType::Grounding || t.kind == InterventionType::Breathing,
                "{} is {:?}",
                t.key,
                t.kind
            );
        }
        let keys: HashSet<&str> = cands.iter().map(|t| t.key).collect();
        assert!(keys.contains("feet_on_floor"));
        assert!(keys.contains("paced_exhale"));
        assert!(keys.contains("box_breathing"));
        assert!(keys.contains("five_senses"));
    }

    #[test]
    fn mid_severity_prefers_mindfulness() {
        let cands = candidates(Some("social"), 5);
        assert!(cands.iter().all(|t| t.kind == InterventionType::Mindfulness));
    }

    #[test]
    fn low_severity_prefers_cognitive_or_physical() {
        let cands = candidates(Some("identity"), 2);
        assert!(cands
            .iter()
            .all(|t| t.kind == InterventionType::Cognitive
                || t.kind == InterventionType::Physical));
    }

    #[test]
    fn unknown_category_falls_back_to_full_catalog_by_severity() {
        let cands = candidates(Some("not_a_category"), 8);
        // Only the general techniques match, then severity narrows them.
        assert!(!cands.is_empty());
        assert!(cands
            .iter()
            .all(|t| t.kind == InterventionType::Grounding
                || t.kind == InterventionType::Breathing));
    }

    #[test]
    fn seeded_selection_is_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let pick_a = select_intervention(Some("work"), 7, &mut a);
        let pick_b = select_intervention(Some("work"), 7, &mut b);
        assert_eq!(pick_a.key, pick_b.key);
    }

    #[test]
    fn selection_stays_within_candidates() {
        let expected: HashSet<&str> = candidates(Some("practical"), 3)
            .iter()
            .map(|t| t.key)
            .collect();
        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pick = select_intervention(Some("practical"), 3, &mut rng);
            assert!(expected.contains(pick.key), "{}", pick.key);
        }
    }
}
