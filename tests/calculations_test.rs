#[cfg(test)]
mod cost_comparison {
    use apt_compare::{
        category_share, cheapest, cheapest_per_category, cost_per_area, group_by_neighborhood,
        monthly_total, most_expensive, rank_by_total, savings, ApartmentRecord, CostCategory,
        MetaField, MoveInFee, RecordId, Rankings, SheetKey,
    };

    fn apartment(id: u64, rent: &str) -> ApartmentRecord {
        ApartmentRecord::blank(RecordId(id)).with(CostCategory::Rent, rent)
    }

    #[test]
    fn two_apartments_cheapest_and_savings() {
        let records = vec![apartment(1, "2000"), apartment(2, "2500")];

        assert_eq!(cheapest(&records), Some(RecordId(1)));
        assert_eq!(most_expensive(&records), Some(RecordId(2)));

        let savings = Rankings::of(&records).savings.unwrap();
        assert_eq!(savings.monthly, 500.0);
        assert_eq!(savings.yearly, 6000.0);
    }

    #[test]
    fn single_apartment_gets_no_badges() {
        let records = vec![apartment(1, "1800")];
        assert_eq!(cheapest(&records), None);
        assert_eq!(most_expensive(&records), None);
    }

    #[test]
    fn non_numeric_rent_is_ignored() {
        let record = apartment(1, "abc").with(CostCategory::Water, "45");
        assert_eq!(monthly_total(&record), 45.0);

        let only_garbage = apartment(2, "abc");
        assert_eq!(monthly_total(&only_garbage), 0.0);
    }

    #[test]
    fn neighborhood_summary() {
        let records = vec![
            apartment(1, "2200").with(MetaField::Neighborhood, "Echo Park"),
            apartment(2, "1500").with(MetaField::Neighborhood, ""),
            apartment(3, "2600").with(MetaField::Neighborhood, "Echo Park"),
        ];
        let neighborhoods = group_by_neighborhood(&records);

        assert_eq!(neighborhoods.len(), 1);
        assert_eq!(neighborhoods.ungrouped, 1);

        let echo_park = neighborhoods.get("Echo Park").unwrap();
        assert_eq!(echo_park.len(), 2);
        assert_eq!(echo_park.average(), 2400.0);
        assert_eq!(echo_park.range(), (2200.0, 2600.0));
        assert_eq!(echo_park.savings().map(|s| s.monthly), Some(400.0));
        assert!(echo_park.members.iter().all(|r| r.id() != RecordId(2)));
    }

    #[test]
    fn zero_area_has_no_cost_per_area() {
        let record = apartment(1, "1500").with(MetaField::Sqft, "0");
        assert_eq!(monthly_total(&record), 1500.0);
        assert_eq!(cost_per_area(&record), None);
    }

    #[test]
    fn totals_are_never_negative() {
        let record = apartment(1, "-2000")
            .with(CostCategory::Parking, "-50")
            .with(CostCategory::Gas, "20");
        assert_eq!(monthly_total(&record), 20.0);
    }

    #[test]
    fn total_is_sum_of_every_category() {
        let mut record = ApartmentRecord::blank(RecordId(1));
        for (i, category) in CostCategory::ALL.iter().enumerate() {
            record.costs.set(*category, (i + 1).to_string());
        }
        // 1 + 2 + ... + 11
        assert_eq!(monthly_total(&record), 66.0);
    }

    #[test]
    fn move_in_fees_do_not_affect_ranking() {
        let records = vec![
            apartment(1, "2100").with(MoveInFee::BrokerFee, "5000"),
            apartment(2, "2000"),
        ];
        let ranked: Vec<RecordId> = rank_by_total(&records).iter().map(|r| r.id()).collect();
        assert_eq!(ranked, vec![RecordId(2), RecordId(1)]);
    }

    #[test]
    fn ranking_is_stable_for_equal_totals() {
        let records = vec![
            apartment(7, "2000"),
            apartment(3, "1900").with(CostCategory::Water, "100"),
            apartment(5, "2000"),
        ];
        let ranked: Vec<RecordId> = rank_by_total(&records).iter().map(|r| r.id()).collect();
        assert_eq!(ranked, vec![RecordId(7), RecordId(3), RecordId(5)]);
        assert_eq!(cheapest(&records), Some(RecordId(7)));
    }

    #[test]
    fn repeated_calls_agree() {
        let records = vec![
            apartment(1, "2000").with(CostCategory::Internet, "60"),
            apartment(2, "2050").with(CostCategory::Internet, "45"),
        ];
        assert_eq!(Rankings::of(&records), Rankings::of(&records));
        assert_eq!(
            cheapest_per_category(&records, CostCategory::Internet),
            Some(RecordId(2))
        );
        assert_eq!(group_by_neighborhood(&records), group_by_neighborhood(&records));
    }

    #[test]
    fn enormous_amounts_keep_results_finite() {
        let records = vec![
            apartment(1, "1e308").with(CostCategory::Parking, "1e308"),
            apartment(2, "1e308").with(CostCategory::Water, "1e308"),
        ];
        let total = monthly_total(&records[0]);
        assert!(total.is_finite());
        assert_eq!(category_share(&records[0], CostCategory::Rent), Some(50.0));

        let gap = savings(&records).unwrap();
        assert_eq!(gap.monthly, 0.0);
        assert_eq!(gap.yearly, 0.0);
    }
}
