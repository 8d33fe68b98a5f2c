use crate::models::{PropertyRecord, Status};

const CRORE: f64 = 1_00_00_000.0;
const LAKH: f64 = 1_00_000.0;

/// "₹1.20 Cr" above one crore, "₹80.00 L" below
pub fn format_price(price: f64) -> String {
    if price >= CRORE {
        format!("₹{:.2} Cr", price / CRORE)
    } else {
        format!("₹{:.2} L", price / LAKH)
    }
}

fn possession_line(record: &PropertyRecord) -> String {
    match (&record.status, &record.possession_date) {
        (Some(Status::ReadyToMove), _) => "🔑 Ready for possession".to_string(),
        (_, Some(date)) => format!("🔑 Possession by {}", date),
        _ => "🔑 Under construction".to_string(),
    }
}

/// Plain-text card for one record
pub fn render_card(record: &PropertyRecord) -> String {
    let mut lines = vec![record.project_name.clone()];

    lines.push(format!(
        "   📍 {}, {}",
        record.locality.as_deref().unwrap_or("N/A"),
        record.city.as_deref().unwrap_or("N/A")
    ));

    let price = record
        .price
        .map(|p| format_price(p as f64))
        .unwrap_or_else(|| "N/A".to_string());
    let area = record
        .carpet_area
        .map(|a| format!("{} sq.ft", a as i64))
        .unwrap_or_else(|| "N/A".to_string());
    lines.push(format!(
        "   {} | {} | {}",
        price,
        record.bhk.as_deref().unwrap_or("N/A"),
        area
    ));

    let mut details = Vec::new();
    if let Some(bathrooms) = record.bathrooms {
        details.push(format!("Bathrooms: {}", bathrooms));
    }
    if let Some(parking) = &record.parking_type {
        details.push(format!("Parking: {}", parking));
    }
    if let Some(furnished) = &record.furnished_type {
        details.push(format!("Furnishing: {}", furnished));
    }
    if !details.is_empty() {
        lines.push(format!("   {}", details.join(", ")));
    }

    lines.push(format!("   {}", possession_line(record)));
    lines.join("\n")
}

/// Numbered cards for at most `max_results` records
pub fn render_results(results: &[PropertyRecord], max_results: usize) -> String {
    let mut out: Vec<String> = results
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(i, record)| format!("{}. {}", i + 1, render_card(record)))
        .collect();

    if results.len() > max_results {
        out.push(format!("... and {} more", results.len() - max_results));
    }

    out.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PropertyRecord {
        PropertyRecord {
            project_name: "Skyline Towers".to_string(),
            city: Some("Pune".to_string()),
            locality: Some("Baner".to_string()),
            bhk: Some("2 BHK".to_string()),
            price: Some(7_500_000),
            status: Some(Status::UnderConstruction),
            carpet_area: Some(850.7),
            bathrooms: Some(2.0),
            furnished_type: None,
            parking_type: Some("COVERED".to_string()),
            possession_date: Some("Dec 2026".to_string()),
            slug: "skyline".to_string(),
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(8_000_000.0), "₹80.00 L");
        assert_eq!(format_price(12_000_000.0), "₹1.20 Cr");
        assert_eq!(format_price(10_000_000.0), "₹1.00 Cr");
    }

    #[test]
    fn test_render_card() {
        let card = render_card(&record());
        assert!(card.starts_with("Skyline Towers"));
        assert!(card.contains("📍 Baner, Pune"));
        assert!(card.contains("₹75.00 L | 2 BHK | 850 sq.ft"));
        assert!(card.contains("Bathrooms: 2, Parking: COVERED"));
        assert!(card.contains("Possession by Dec 2026"));
    }

    #[test]
    fn test_render_card_missing_fields() {
        let mut bare = record();
        bare.price = None;
        bare.carpet_area = None;
        bare.possession_date = None;
        bare.bathrooms = None;
        bare.parking_type = None;

        let card = render_card(&bare);
        assert!(card.contains("N/A | 2 BHK | N/A"));
        assert!(card.contains("Under construction"));
        assert!(!card.contains("Bathrooms"));
    }

    #[test]
    fn test_render_results_truncates() {
        let results = vec![record(); 12];
        let text = render_results(&results, 10);
        assert!(text.contains("10. Skyline Towers"));
        assert!(!text.contains("11. "));
        assert!(text.ends_with("... and 2 more"));
    }
}
