use crate::catalog::{CatalogStreet, GeoPoint};
use crate::geometry::nearest_street;

/// The result of matching a map click against the rendered pool.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvaluation {
    pub clicked_name: String,
    pub is_correct: bool,
}

/// Match the click to the nearest rendered street and compare by logical
/// name, not by segment: any segment of the target street counts.
/// `pool` is the full filtered pool (everything on the map), which the
/// caller guarantees is non-empty.
pub fn evaluate_click(
    point: &GeoPoint,
    pool: &[CatalogStreet],
    target: &CatalogStreet,
) -> ClickEvaluation {
    let nearest = nearest_street(point, pool);
    ClickEvaluation {
        clicked_name: nearest.name.clone(),
        is_correct: nearest.name.eq_ignore_ascii_case(&target.name),
    }
}

/// Multiple-choice answers compare exactly: options are copied verbatim
/// from street names.
pub fn evaluate_choice(selected: &str, target: &CatalogStreet) -> bool {
    selected == target.name
}
