use crate::models::{
    apartment::ApartmentRecord,
    categories::{CostCategory, MoveInFee, SheetKey},
};

use super::money::{parse_area, parse_money};

pub fn category_value(record: &ApartmentRecord, category: CostCategory) -> f64 {
    parse_money(record.costs.get(category))
}

pub fn move_in_value(record: &ApartmentRecord, fee: MoveInFee) -> f64 {
    parse_money(record.movein.get(fee))
}

/// True monthly total: every recurring cost category summed.
pub fn monthly_total(record: &ApartmentRecord) -> f64 {
    CostCategory::ALL
        .iter()
        .map(|category| category_value(record, *category))
        .sum()
}

/// One-time fees due when taking the apartment.
pub fn move_in_total(record: &ApartmentRecord) -> f64 {
    MoveInFee::ALL
        .iter()
        .map(|fee| move_in_value(record, *fee))
        .sum()
}

/// A record takes part in comparisons once it has any monthly cost.
pub fn is_priced(record: &ApartmentRecord) -> bool {
    monthly_total(record) > 0.0
}

/// Monthly cost per square foot.
pub fn cost_per_area(record: &ApartmentRecord) -> Option<f64> {
    let area = parse_area(&record.sqft)?;
    let total = monthly_total(record);
    if total > 0.0 {
        Some(total / area)
    } else {
        None
    }
}

/// How many months of all-in cost the move-in fees amount to.
pub fn break_even_months(record: &ApartmentRecord) -> Option<f64> {
    let total = monthly_total(record);
    if total > 0.0 {
        Some(move_in_total(record) / total)
    } else {
        None
    }
}

/// Percentage of the monthly total taken by `category`.
pub fn category_share(record: &ApartmentRecord, category: CostCategory) -> Option<f64> {
    let total = monthly_total(record);
    if total > 0.0 {
        Some(category_value(record, category) / total * 100.0)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryLine {
    pub category: CostCategory,
    pub value: f64,
    pub share: f64,
}

/// Nonzero categories of a record with their share, in category order.
pub fn category_breakdown(record: &ApartmentRecord) -> Vec<CategoryLine> {
    let total = monthly_total(record);
    if total <= 0.0 {
        return vec![];
    }

    CostCategory::ALL
        .iter()
        .map(|category| (*category, category_value(record, *category)))
        .filter(|(_, value)| *value > 0.0)
        .map(|(category, value)| CategoryLine {
            category,
            value,
            share: value / total * 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{apartment::RecordId, categories::MetaField};

    fn record() -> ApartmentRecord {
        ApartmentRecord::blank(RecordId(1))
    }

    #[test]
    fn monthly_total_sums_every_category() {
        let apartment = record()
            .with(CostCategory::Rent, "2000")
            .with(CostCategory::Parking, "150")
            .with(CostCategory::Internet, "60.5");
        assert_eq!(monthly_total(&apartment), 2210.5);
    }

    #[test]
    fn garbage_contributes_nothing() {
        let with_garbage = record()
            .with(CostCategory::Rent, "abc")
            .with(CostCategory::Water, "40");
        let without = record().with(CostCategory::Water, "40");
        assert_eq!(monthly_total(&with_garbage), monthly_total(&without));
        assert_eq!(monthly_total(&with_garbage), 40.0);
    }

    #[test]
    fn empty_record_totals_zero() {
        assert_eq!(monthly_total(&record()), 0.0);
        assert_eq!(move_in_total(&record()), 0.0);
        assert!(!is_priced(&record()));
    }

    #[test]
    fn move_in_total_sums_fees() {
        let apartment = record()
            .with(MoveInFee::FirstMonth, "2000")
            .with(MoveInFee::Deposit, "2000")
            .with(MoveInFee::ApplicationFee, "45")
            .with(MoveInFee::BrokerFee, "-100");
        assert_eq!(move_in_total(&apartment), 4045.0);
    }

    #[test]
    fn cost_per_area_needs_positive_area_and_total() {
        let apartment = record()
            .with(CostCategory::Rent, "1500")
            .with(MetaField::Sqft, "600");
        assert_eq!(cost_per_area(&apartment), Some(2.5));

        let zero_area = record()
            .with(CostCategory::Rent, "1500")
            .with(MetaField::Sqft, "0");
        assert_eq!(cost_per_area(&zero_area), None);

        let no_cost = record().with(MetaField::Sqft, "600");
        assert_eq!(cost_per_area(&no_cost), None);
    }

    #[test]
    fn break_even_is_undefined_without_monthly_cost() {
        let apartment = record()
            .with(CostCategory::Rent, "2000")
            .with(MoveInFee::Deposit, "3000");
        assert_eq!(break_even_months(&apartment), Some(1.5));

        let only_fees = record().with(MoveInFee::Deposit, "3000");
        assert_eq!(break_even_months(&only_fees), None);
    }

    #[test]
    fn category_share_is_a_percentage() {
        let apartment = record()
            .with(CostCategory::Rent, "1500")
            .with(CostCategory::Parking, "500");
        assert_eq!(category_share(&apartment, CostCategory::Rent), Some(75.0));
        assert_eq!(category_share(&apartment, CostCategory::Gas), Some(0.0));
        assert_eq!(category_share(&record(), CostCategory::Rent), None);
    }

    #[test]
    fn breakdown_lists_nonzero_categories_in_order() {
        let apartment = record()
            .with(CostCategory::Water, "250")
            .with(CostCategory::Rent, "750");
        let lines = category_breakdown(&apartment);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].category, CostCategory::Rent);
        assert_eq!(lines[0].share, 75.0);
        assert_eq!(lines[1].share, 25.0);
        assert_eq!(lines[1].category, CostCategory::Water);
        assert!(category_breakdown(&record()).is_empty());
    }

    #[test]
    fn aggregation_is_repeatable() {
        let apartment = record()
            .with(CostCategory::Rent, "1999.99")
            .with(CostCategory::Electricity, "80.01");
        assert_eq!(monthly_total(&apartment), monthly_total(&apartment));
        assert_eq!(cost_per_area(&apartment), cost_per_area(&apartment));
    }
}
