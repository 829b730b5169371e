//! Reordering opportunities by impact, urgency or ease.

use std::cmp::Reverse;
use std::str::FromStr;

use crate::Opportunity;

/// Ordinal rank shared by the impact, urgency and ease scales.
///
/// The three scales use different Spanish labels but one ranking, so a single
/// table keeps their tie-breaking identical.
const PRIORITY_ORDER: [(&str, u8); 9] = [
    ("Alto", 3),
    ("Alta", 3),
    ("Fácil", 3),
    ("Medio", 2),
    ("Media", 2),
    ("Moderado", 2),
    ("Bajo", 1),
    ("Baja", 1),
    ("Difícil", 1),
];

/// Rank of a priority label; unknown labels rank below every known one.
pub fn priority_rank(label: &str) -> u8 {
    PRIORITY_ORDER
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, rank)| *rank)
        .unwrap_or(0)
}

/// Requested ordering. Tool requests carry the key as free text and go
/// through [`SortKey::parse`], so an unrecognized key keeps input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Impact,
    Urgency,
    Ease,
    #[default]
    None,
}

impl SortKey {
    /// Lenient parse: anything other than `impact`, `urgency` or `ease` keeps input order.
    pub fn parse(s: &str) -> SortKey {
        match s.trim().to_ascii_lowercase().as_str() {
            "impact" => SortKey::Impact,
            "urgency" => SortKey::Urgency,
            "ease" => SortKey::Ease,
            _ => SortKey::None,
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

/// Return a copy of `opportunities` ordered highest-rank first by `key`.
///
/// The sort is stable, so equal ranks keep their derivation order.
pub fn prioritize(opportunities: &[Opportunity], key: SortKey) -> Vec<Opportunity> {
    let mut sorted = opportunities.to_vec();
    let label: fn(&Opportunity) -> &'static str = match key {
        SortKey::Impact => |o| o.impact.label(),
        SortKey::Urgency => |o| o.urgency.label(),
        SortKey::Ease => |o| o.ease.label(),
        SortKey::None => return sorted,
    };
    sorted.sort_by_key(|o| Reverse(priority_rank(label(o))));
    sorted
}
