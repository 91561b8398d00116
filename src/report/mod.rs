use std::fmt::Write;

use colored::Colorize;

use crate::{
    calculations::{
        aggregate::{
            break_even_months, category_breakdown, cost_per_area, monthly_total, move_in_total,
        },
        neighborhoods::NeighborhoodGroup,
        ranking::Savings,
    },
    models::{apartment::ApartmentRecord, categories::SheetKey},
    services::comparison::Overview,
};

/// Formats an amount with thousands separators and at most two decimals.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{sign}${grouped}"),
        f if f % 10 == 0 => format!("{sign}${grouped}.{}", f / 10),
        f => format!("{sign}${grouped}.{f:02}"),
    }
}

const DATE_FORMAT: &str = "%b %-d, %Y";

/// "2024-03-05" -> "Mar 5, 2024".
pub fn format_available_date(raw: &str) -> Option<String> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|date| date.format(DATE_FORMAT).to_string())
}

fn display_name(record: &ApartmentRecord) -> &str {
    match record.name.trim() {
        "" => "Untitled apartment",
        name => name,
    }
}

fn write_savings(out: &mut String, who: &str, savings: &Savings) {
    let _ = writeln!(
        out,
        "  {} saves you {}/mo, that's {}/year compared to the most expensive.",
        who,
        format_money(savings.monthly).green(),
        format_money(savings.yearly).green()
    );
}

fn write_record(out: &mut String, overview: &Overview, record: &ApartmentRecord) {
    let id = record.id();
    let badge = if overview.rankings.is_cheapest(id) {
        format!(" {}", "BEST".green().bold())
    } else if overview.rankings.is_most_expensive(id) {
        format!(" {}", "PRICIEST".red())
    } else {
        String::new()
    };

    let _ = writeln!(
        out,
        "{}{}  {}/mo",
        display_name(record).bold(),
        badge,
        format_money(monthly_total(record))
    );

    let details: Vec<String> = [
        record.neighborhood_label().map(str::to_string),
        (!record.bedrooms.trim().is_empty()).then(|| format!("{} bd", record.bedrooms.trim())),
        (!record.sqft.trim().is_empty()).then(|| format!("{} sqft", record.sqft.trim())),
        format_available_date(&record.date_available).map(|d| format!("available {}", d)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !details.is_empty() {
        let _ = writeln!(out, "  {}", details.join(" · "));
    }

    for line in category_breakdown(record) {
        let marker = if overview.rankings.is_cheapest_for(line.category, id) {
            " (lowest)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "    {:<20} {:>10} {:>4.0}%{}",
            line.category.label(),
            format_money(line.value),
            line.share,
            marker
        );
    }

    if let Some(per_area) = cost_per_area(record) {
        let _ = writeln!(out, "    {} per sqft/mo", format_money(per_area));
    }

    let move_in = move_in_total(record);
    if move_in > 0.0 {
        let _ = write!(out, "    move-in {}", format_money(move_in));
        if let Some(months) = break_even_months(record) {
            let _ = write!(out, ", breaks even in {:.1} months", months);
        }
        let _ = writeln!(out);
    }
}

fn write_group(out: &mut String, group: &NeighborhoodGroup) {
    let (low, high) = group.range();
    let plural = if group.len() > 1 { "s" } else { "" };
    let _ = writeln!(
        out,
        "{}  {} apartment{}, avg {}/mo, range {} - {}",
        group.name.bold(),
        group.len(),
        plural,
        format_money(group.average()),
        format_money(low),
        format_money(high)
    );

    let rankings = group.rankings();
    for record in &group.members {
        let flag = if rankings.is_cheapest(record.id()) {
            " (cheapest here)"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {:<24} {:>10}/mo{}",
            display_name(record),
            format_money(monthly_total(record)),
            flag
        );
    }

    if let Some(savings) = &rankings.savings {
        write_savings(out, "Picking the cheapest here", savings);
    }
}

/// Renders the overview as a plain-text report.
pub fn render(overview: &Overview) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "True Monthly Cost Calculator".bold());
    let range = match overview.range {
        Some((low, high)) => format!("{} - {}", format_money(low), format_money(high)),
        None => "-".to_string(),
    };
    let average = overview
        .average_monthly
        .map(format_money)
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "Apartments: {}  Avg monthly: {}  Range: {}  Areas: {}",
        overview.record_count,
        average,
        range,
        overview.area_count()
    );
    let _ = writeln!(out);

    if overview.priced.is_empty() {
        let _ = writeln!(out, "No apartments with costs entered yet.");
        return out;
    }

    for record in &overview.priced {
        write_record(&mut out, overview, record);
        let _ = writeln!(out);
    }

    if let (Some(cheapest), Some(savings)) = (overview.cheapest(), &overview.rankings.savings) {
        write_savings(&mut out, display_name(cheapest), savings);
        let _ = writeln!(out);
    }

    if overview.neighborhoods.has_multiple_areas() {
        let _ = writeln!(out, "{}", "By area".bold());
        for group in overview.neighborhoods.iter() {
            write_group(&mut out, group);
        }
    }

    let ungrouped = overview.neighborhoods.ungrouped;
    if ungrouped > 0 {
        let _ = writeln!(
            out,
            "{} apartment{} missing a neighborhood.",
            ungrouped,
            if ungrouped > 1 { "s are" } else { " is" }
        );
    }

    out
}
