//! Sort orders accepted by the list endpoints.

use std::cmp::Ordering;

use crate::models::Country;

/// One of the six `sort_by` values. Anything else falls back to `AToZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    AToZ,
    ZToA,
    PopulationHighToLow,
    PopulationLowToHigh,
    AreaHighToLow,
    AreaLowToHigh,
}

impl SortKey {
    /// Parse a `sort_by` query value; absent or unknown values give the default.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("a_to_z") => SortKey::AToZ,
            Some("z_to_a") => SortKey::ZToA,
            Some("population_high_to_low") => SortKey::PopulationHighToLow,
            Some("population_low_to_high") => SortKey::PopulationLowToHigh,
            Some("area_high_to_low") => SortKey::AreaHighToLow,
            Some("area_low_to_high") => SortKey::AreaLowToHigh,
            _ => SortKey::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::AToZ => "a_to_z",
            SortKey::ZToA => "z_to_a",
            SortKey::PopulationHighToLow => "population_high_to_low",
            SortKey::PopulationLowToHigh => "population_low_to_high",
            SortKey::AreaHighToLow => "area_high_to_low",
            SortKey::AreaLowToHigh => "area_low_to_high",
        }
    }

    /// Compare two countries under this key. Missing values sort first when ascending.
    pub fn compare(self, a: &Country, b: &Country) -> Ordering {
        match self {
            SortKey::AToZ => a.name.cmp(&b.name),
            SortKey::ZToA => b.name.cmp(&a.name),
            SortKey::PopulationLowToHigh => cmp_number(a.population, b.population),
            SortKey::PopulationHighToLow => cmp_number(b.population, a.population),
            SortKey::AreaLowToHigh => cmp_number(a.area, b.area),
            SortKey::AreaHighToLow => cmp_number(b.area, a.area),
        }
    }
}

/// `None` orders before any number.
fn cmp_number(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
