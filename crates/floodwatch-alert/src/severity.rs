use floodwatch_common::types::{FeedEntry, Severity};

/// Severity by keyword precedence: "Red" wins over "Orange", anything else
/// is low. The color words are the upstream feed's alert-level convention
/// and arrive capitalized, so the match is case-sensitive.
pub fn classify_severity(title: &str, description: &str) -> Severity {
    if title.contains("Red") || description.contains("Red") {
        Severity::High
    } else if title.contains("Orange") || description.contains("Orange") {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Whether an entry concerns the monitored region: its title or
/// description contains a region keyword or the word "flood",
/// case-insensitive.
pub fn matches_region(entry: &FeedEntry, region_keywords: &[String]) -> bool {
    let haystack = format!("{} {}", entry.title, entry.description).to_lowercase();
    if haystack.contains("flood") {
        return true;
    }
    region_keywords
        .iter()
        .any(|kw| haystack.contains(&kw.to_lowercase()))
}
