//! Terminal formatting: currency, area cards, estimates, listings, bundles.

use crate::artifacts::ArtifactBundle;
use crate::domain::{NeighborhoodProfile, PredictionRequest, PredictionResult, Tier};
use crate::reference::ReferenceTable;

const RUPEE: &str = "₹";

/// `₹` + comma-grouped whole rupees. Negative values keep the sign after the
/// symbol (`₹-1,250`).
pub fn format_currency(value: f64) -> String {
    format!("{RUPEE}{}", group_thousands(value.round()))
}

/// `₹40,000 per sq ft`
pub fn format_rate(value: f64) -> String {
    format!("{} per sq ft", format_currency(value))
}

/// `1,250 sq ft`
pub fn format_area(floor_area: u32) -> String {
    format!("{} sq ft", group_thousands(f64::from(floor_area)))
}

/// Reference card for one neighborhood.
pub fn format_area_card(profile: &NeighborhoodProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", profile.name));
    out.push_str(&format!("  Category   : {}\n", profile.tier.display_name()));
    out.push_str(&format!(
        "  Price range: {} - {}\n",
        format_currency(profile.min_rate),
        format_rate(profile.max_rate)
    ));
    out.push_str(&format!("  Average    : {}\n", format_rate(profile.avg_rate)));
    out
}

/// Echo of the user's inputs.
pub fn format_property_summary(request: &PredictionRequest) -> String {
    let mut out = String::new();
    out.push_str("Property summary:\n");
    out.push_str(&format!("  Area       : {}\n", request.neighborhood()));
    out.push_str(&format!("  Bedrooms   : {}\n", request.bedrooms()));
    out.push_str(&format!("  Bathrooms  : {:.1}\n", request.bathrooms()));
    out.push_str(&format!("  Carpet area: {}\n", format_area(request.floor_area())));
    out
}

/// Predicted price and its breakdown.
pub fn format_breakdown(result: &PredictionResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Predicted price: {}\n", format_currency(result.predicted_price)));
    out.push_str(&format!("  Base price                 : {}\n", format_currency(result.base_price)));
    out.push_str(&format!("  Location & features premium: {}\n", format_currency(result.premium)));
    out.push_str(&format!("  Final price per sq ft      : {}\n", format_currency(result.effective_rate)));
    out
}

/// Full one-shot report: area card, inputs, breakdown.
pub fn format_estimate(request: &PredictionRequest, profile: &NeighborhoodProfile, result: &PredictionResult) -> String {
    let mut out = String::new();
    out.push_str("=== pe - Mumbai property price estimate ===\n");
    if profile.name != request.neighborhood() {
        out.push_str(&format!(
            "(no reference data for '{}', using '{}')\n",
            request.neighborhood(),
            profile.name
        ));
    }
    out.push('\n');
    out.push_str(&format_area_card(profile));
    out.push('\n');
    out.push_str(&format_property_summary(request));
    out.push('\n');
    out.push_str(&format_breakdown(result));
    out
}

/// Reference table grouped by tier, optionally restricted to one tier.
pub fn format_area_list(table: &ReferenceTable, tier: Option<Tier>) -> String {
    let mut out = String::new();
    let tiers: Vec<Tier> = match tier {
        Some(t) => vec![t],
        None => Tier::ALL.to_vec(),
    };

    for t in tiers {
        let rows: Vec<&NeighborhoodProfile> = table.by_tier(t).collect();
        if rows.is_empty() {
            continue;
        }
        out.push_str(&format!("{} ({}):\n", t.display_name(), rows.len()));
        out.push_str(format!("  {:<28} {:>10} {:>10} {:>10}", "area", "min", "avg", "max").trim_end());
        out.push('\n');
        for p in rows {
            out.push_str(
                format!(
                    "  {:<28} {:>10} {:>10} {:>10}",
                    truncate(&p.name, 28),
                    format_currency(p.min_rate),
                    format_currency(p.avg_rate),
                    format_currency(p.max_rate),
                )
                .trim_end(),
            );
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

/// Self-description of a loaded bundle.
pub fn format_bundle_summary(bundle: &ArtifactBundle, table: &ReferenceTable) -> String {
    let schema = bundle.schema();
    let encoder = bundle.encoder();
    let mut out = String::new();

    out.push_str("=== pe - artifact bundle ===\n");
    out.push_str(&format!("Model     : {}\n", bundle.model().describe()));
    if let Some(name) = &schema.model_name {
        out.push_str(&format!("Name      : {name}\n"));
    }
    if let Some(date) = schema.trained_on {
        out.push_str(&format!("Trained on: {date}\n"));
    }
    out.push_str(&format!("Scaler    : {}\n", bundle.scaler().describe()));
    out.push_str(&format!("Vocabulary: {} areas\n", encoder.classes().len()));

    let unencoded: Vec<&str> = table.names().filter(|n| !encoder.contains(n)).collect();
    if !unencoded.is_empty() {
        out.push_str(&format!(
            "  {} reference areas are not in the vocabulary and encode as 'Other'\n",
            unencoded.len()
        ));
    }

    out.push_str("\nFeatures:\n");
    let mismatches = schema.mismatches();
    for (i, name) in schema.feature_names.iter().enumerate() {
        let flag = if mismatches.contains(&i) { " (!)" } else { "" };
        out.push_str(&format!("  {i:>2}. {name}{flag}\n"));
    }

    out
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && digits != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
