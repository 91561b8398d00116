use std::collections::BTreeMap;

use crate::models::{
    apartment::{ApartmentRecord, RecordId},
    categories::CostCategory,
};

use super::{
    aggregate::monthly_total,
    money::round_half_up,
    ranking::{self, rank_by_total, Rankings, Savings, MIN_COMPARABLE},
};

/// Priced records sharing one trimmed, case-sensitive neighborhood label.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodGroup<'a> {
    pub name: String,
    /// Cheapest first.
    pub members: Vec<&'a ApartmentRecord>,
}

impl<'a> NeighborhoodGroup<'a> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn average(&self) -> f64 {
        group_average(&self.members).unwrap_or_default()
    }

    pub fn range(&self) -> (f64, f64) {
        group_range(&self.members).unwrap_or_default()
    }

    pub fn savings(&self) -> Option<Savings> {
        group_savings(&self.members)
    }

    pub fn cheapest(&self) -> Option<RecordId> {
        ranking::cheapest(self.members.iter().copied())
    }

    pub fn most_expensive(&self) -> Option<RecordId> {
        ranking::most_expensive(self.members.iter().copied())
    }

    pub fn cheapest_per_category(&self, category: CostCategory) -> Option<RecordId> {
        ranking::cheapest_per_category(self.members.iter().copied(), category)
    }

    pub fn rankings(&self) -> Rankings {
        Rankings::of(self.members.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Neighborhoods<'a> {
    /// Keyed by label, so iteration is alphabetical.
    pub groups: BTreeMap<String, NeighborhoodGroup<'a>>,
    /// Priced records without a neighborhood.
    pub ungrouped: usize,
}

impl<'a> Neighborhoods<'a> {
    pub fn names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&NeighborhoodGroup<'a>> {
        self.groups.get(name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Comparing areas needs at least two of them.
    pub fn has_multiple_areas(&self) -> bool {
        self.groups.len() >= MIN_COMPARABLE
    }

    pub fn iter(&self) -> impl Iterator<Item = &NeighborhoodGroup<'a>> {
        self.groups.values()
    }
}

/// Buckets priced records by neighborhood. Unpriced records are left out entirely.
///
/// `ungrouped` therefore counts only priced records with a blank neighborhood; an
/// unpriced record is neither grouped nor counted.
pub fn group_by_neighborhood<'a>(
    records: impl IntoIterator<Item = &'a ApartmentRecord>,
) -> Neighborhoods<'a> {
    let mut buckets: BTreeMap<String, Vec<&'a ApartmentRecord>> = BTreeMap::new();
    let mut ungrouped = 0;

    for record in records {
        if monthly_total(record) <= 0.0 {
            continue;
        }
        match record.neighborhood_label() {
            Some(label) => buckets.entry(label.to_string()).or_default().push(record),
            None => ungrouped += 1,
        }
    }

    let groups = buckets
        .into_iter()
        .map(|(name, members)| {
            let group = NeighborhoodGroup {
                name: name.clone(),
                members: rank_by_total(members),
            };
            (name, group)
        })
        .collect();

    Neighborhoods { groups, ungrouped }
}

/// Mean monthly total, rounded half-up to whole currency units.
pub fn group_average(members: &[&ApartmentRecord]) -> Option<f64> {
    if members.is_empty() {
        return None;
    }
    let sum: f64 = members.iter().map(|r| monthly_total(r)).sum();
    Some(round_half_up(sum / members.len() as f64))
}

pub fn group_range(members: &[&ApartmentRecord]) -> Option<(f64, f64)> {
    members
        .iter()
        .map(|r| monthly_total(r))
        .fold(None, |range, total| match range {
            None => Some((total, total)),
            Some((low, high)) => Some((f64::min(low, total), f64::max(high, total))),
        })
}

/// Spread between the cheapest and most expensive member; needs two members.
pub fn group_savings(members: &[&ApartmentRecord]) -> Option<Savings> {
    if members.len() < MIN_COMPARABLE {
        return None;
    }
    group_range(members).map(|(low, high)| Savings::between(low, high))
}
