use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::recommendation::{Category, Recommendation};

/// Group recommendations by category for display.
///
/// Categories come out in their display order and the evaluator's order is
/// kept inside each category. Nothing is merged or dropped: two rules that
/// give contradictory advice both stay in the list.
pub fn aggregate(recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    recommendations
        .into_iter()
        .sorted_by_key(|rec| rec.category)
        .collect()
}

/// Split an aggregated list into its category groups.
pub fn group_by_category(
    recommendations: &[Recommendation],
) -> Vec<(Category, Vec<&Recommendation>)> {
    recommendations
        .iter()
        .chunk_by(|rec| rec.category)
        .into_iter()
        .map(|(category, recs)| (category, recs.collect()))
        .collect()
}

/// One side of a conflicting pair of solutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingAdvice {
    pub rule_id: String,
    pub solution: String,
}

/// Two solutions that move the same control in opposite directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// The control both solutions adjust, e.g. "front springs"
    pub control: String,
    pub first: ConflictingAdvice,
    pub second: ConflictingAdvice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

// Pairs of (verb, direction, axis). Verbs on the same axis with opposite
// directions conflict.
const VERBS: [(&str, Direction, u8); 7] = [
    ("stiffen", Direction::Up, 0),
    ("soften", Direction::Down, 0),
    ("increase", Direction::Up, 1),
    ("reduce", Direction::Down, 1),
    ("decrease", Direction::Down, 1),
    ("raise", Direction::Up, 2),
    ("lower", Direction::Down, 2),
];

const STOP_WORDS: [&str; 8] = ["by", "from", "to", "toward", "at", "if", "all", "slightly"];

/// Split a solution like "Soften rear sway bar by 1 step" into its
/// direction and control ("rear sway bar").
fn parse_adjustment(solution: &str) -> Option<(Direction, u8, String)> {
    let lowered = solution.to_lowercase();
    let mut words = lowered.split_whitespace();
    let verb = words.next()?;

    if verb == "move" {
        let rest: Vec<&str> = words.collect();
        let (last, control) = rest.split_last()?;
        let direction = match *last {
            "forward" => Direction::Up,
            "rearward" | "backward" => Direction::Down,
            _ => return None,
        };
        return Some((direction, 3, control.join(" ")));
    }

    let (_, direction, axis) = VERBS.iter().find(|(word, _, _)| *word == verb)?;
    let control = words
        .take_while(|word| !STOP_WORDS.contains(word))
        .collect::<Vec<_>>()
        .join(" ");
    if control.is_empty() {
        return None;
    }
    Some((*direction, *axis, control))
}

/// Find solutions from different recommendations that contradict each other.
///
/// Conflicts are reported alongside the recommendations; resolving them is
/// left to the person reading the advice.
pub fn find_conflicts(recommendations: &[Recommendation]) -> Vec<Conflict> {
    let adjustments: Vec<(usize, &str, (Direction, u8, String))> = recommendations
        .iter()
        .enumerate()
        .flat_map(|(index, rec)| {
            rec.solutions.iter().filter_map(move |solution| {
                parse_adjustment(solution).map(|parsed| (index, solution.as_str(), parsed))
            })
        })
        .collect();

    adjustments
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| {
            let (a_index, _, (a_direction, a_axis, a_control)) = a;
            let (b_index, _, (b_direction, b_axis, b_control)) = b;
            a_index != b_index
                && a_axis == b_axis
                && a_direction != b_direction
                && a_control == b_control
        })
        .map(|(a, b)| Conflict {
            control: a.2.2.clone(),
            first: ConflictingAdvice {
                rule_id: recommendations[a.0].rule_id.clone(),
                solution: a.1.to_string(),
            },
            second: ConflictingAdvice {
                rule_id: recommendations[b.0].rule_id.clone(),
                solution: b.1.to_string(),
            },
        })
        .collect()
}
