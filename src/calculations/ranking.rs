use std::collections::BTreeMap;

use crate::models::{
    apartment::{ApartmentRecord, RecordId},
    categories::{CostCategory, SheetKey},
};

use super::aggregate::{category_value, monthly_total};

/// A ranking needs at least this many comparable records to say anything.
pub const MIN_COMPARABLE: usize = 2;

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Savings {
    pub monthly: f64,
    pub yearly: f64,
}

impl Savings {
    pub fn between(cheapest: f64, most_expensive: f64) -> Savings {
        let monthly = most_expensive - cheapest;
        Savings {
            monthly,
            yearly: monthly * MONTHS_PER_YEAR,
        }
    }
}

// Stable ascending sort on a precomputed key: equal keys keep their input order.
fn sort_by_value<'a>(
    records: impl IntoIterator<Item = &'a ApartmentRecord>,
    value: impl Fn(&ApartmentRecord) -> f64,
) -> Vec<(f64, &'a ApartmentRecord)> {
    let mut keyed: Vec<(f64, &ApartmentRecord)> =
        records.into_iter().map(|r| (value(r), r)).collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed
}

/// Records ordered cheapest first by monthly total.
pub fn rank_by_total<'a>(
    records: impl IntoIterator<Item = &'a ApartmentRecord>,
) -> Vec<&'a ApartmentRecord> {
    sort_by_value(records, monthly_total)
        .into_iter()
        .map(|(_, record)| record)
        .collect()
}

/// Priced records with their totals, cheapest first.
fn priced_ranking<'a>(
    records: impl IntoIterator<Item = &'a ApartmentRecord>,
) -> Vec<(f64, &'a ApartmentRecord)> {
    sort_by_value(records, monthly_total)
        .into_iter()
        .filter(|(total, _)| *total > 0.0)
        .collect()
}

/// The first priced record in ranked order, once two or more records are priced.
pub fn cheapest<'a>(records: impl IntoIterator<Item = &'a ApartmentRecord>) -> Option<RecordId> {
    let ranked = priced_ranking(records);
    if ranked.len() < MIN_COMPARABLE {
        return None;
    }
    ranked.first().map(|(_, record)| record.id())
}

/// The last priced record in ranked order, once two or more records are priced.
pub fn most_expensive<'a>(
    records: impl IntoIterator<Item = &'a ApartmentRecord>,
) -> Option<RecordId> {
    let ranked = priced_ranking(records);
    if ranked.len() < MIN_COMPARABLE {
        return None;
    }
    ranked.last().map(|(_, record)| record.id())
}

/// Lowest and highest priced totals, once two or more records are priced.
pub fn price_range<'a>(
    records: impl IntoIterator<Item = &'a ApartmentRecord>,
) -> Option<(f64, f64)> {
    let ranked = priced_ranking(records);
    if ranked.len() < MIN_COMPARABLE {
        return None;
    }
    match (ranked.first(), ranked.last()) {
        (Some((low, _)), Some((high, _))) => Some((*low, *high)),
        _ => None,
    }
}

/// What picking the cheapest priced record saves over the most expensive one.
pub fn savings<'a>(records: impl IntoIterator<Item = &'a ApartmentRecord>) -> Option<Savings> {
    price_range(records).map(|(low, high)| Savings::between(low, high))
}

/// Cheapest record for one category among those with a nonzero value for it.
pub fn cheapest_per_category<'a>(
    records: impl IntoIterator<Item = &'a ApartmentRecord>,
    category: CostCategory,
) -> Option<RecordId> {
    let ranked: Vec<_> = sort_by_value(records, |r| category_value(r, category))
        .into_iter()
        .filter(|(value, _)| *value > 0.0)
        .collect();
    if ranked.len() < MIN_COMPARABLE {
        return None;
    }
    ranked.first().map(|(_, record)| record.id())
}

/// `cheapest_per_category` for every category that has a winner.
pub fn cheapest_by_category<'a>(
    records: impl IntoIterator<Item = &'a ApartmentRecord> + Clone,
) -> BTreeMap<CostCategory, RecordId> {
    CostCategory::ALL
        .iter()
        .filter_map(|category| {
            cheapest_per_category(records.clone(), *category).map(|id| (*category, id))
        })
        .collect()
}

/// Every ranking flag the presentation layer shows for one set of records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rankings {
    pub cheapest: Option<RecordId>,
    pub most_expensive: Option<RecordId>,
    pub cheapest_per_category: BTreeMap<CostCategory, RecordId>,
    pub savings: Option<Savings>,
}

impl Rankings {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a ApartmentRecord> + Clone) -> Rankings {
        Rankings {
            cheapest: cheapest(records.clone()),
            most_expensive: most_expensive(records.clone()),
            cheapest_per_category: cheapest_by_category(records.clone()),
            savings: savings(records),
        }
    }

    pub fn is_cheapest(&self, id: RecordId) -> bool {
        self.cheapest == Some(id)
    }

    pub fn is_most_expensive(&self, id: RecordId) -> bool {
        self.most_expensive == Some(id)
    }

    pub fn is_cheapest_for(&self, category: CostCategory, id: RecordId) -> bool {
        self.cheapest_per_category.get(&category) == Some(&id)
    }
}
