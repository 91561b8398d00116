use crate::{
    calculations::{
        aggregate::{is_priced, monthly_total},
        money::round_half_up,
        neighborhoods::{group_by_neighborhood, Neighborhoods},
        ranking::{price_range, rank_by_total, Rankings},
    },
    models::apartment::{ApartmentRecord, RecordId},
};

/// Read-only view of everything derived from the current record list.
///
/// Built fresh from a snapshot on every read; nothing in it is cached across edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview<'a> {
    pub record_count: usize,
    /// Priced records, cheapest first.
    pub priced: Vec<&'a ApartmentRecord>,
    /// Mean monthly total of priced records, rounded half-up.
    pub average_monthly: Option<f64>,
    /// Cheapest and most expensive priced totals.
    pub range: Option<(f64, f64)>,
    pub rankings: Rankings,
    pub neighborhoods: Neighborhoods<'a>,
}

impl<'a> Overview<'a> {
    pub fn build(records: &'a [ApartmentRecord]) -> Overview<'a> {
        let priced: Vec<&ApartmentRecord> = rank_by_total(records)
            .into_iter()
            .filter(|r| is_priced(r))
            .collect();

        let average_monthly = if priced.is_empty() {
            None
        } else {
            let sum: f64 = priced.iter().map(|r| monthly_total(r)).sum();
            Some(round_half_up(sum / priced.len() as f64))
        };

        Overview {
            record_count: records.len(),
            average_monthly,
            range: price_range(records),
            rankings: Rankings::of(records),
            neighborhoods: group_by_neighborhood(records),
            priced,
        }
    }

    pub fn priced_count(&self) -> usize {
        self.priced.len()
    }

    pub fn area_count(&self) -> usize {
        self.neighborhoods.len()
    }

    /// Side-by-side comparison needs two priced records.
    pub fn can_compare(&self) -> bool {
        self.rankings.cheapest.is_some()
    }

    pub fn cheapest(&self) -> Option<&'a ApartmentRecord> {
        self.find(self.rankings.cheapest?)
    }

    pub fn most_expensive(&self) -> Option<&'a ApartmentRecord> {
        self.find(self.rankings.most_expensive?)
    }

    fn find(&self, id: RecordId) -> Option<&'a ApartmentRecord> {
        self.priced.iter().copied().find(|r| r.id() == id)
    }
}
