//! Dashboard statistics over listing records
//!
//! This module computes the headline numbers of a dataset: listing count,
//! category count, average price, per-category breakdown and the most
//! expensive listings.

use crate::crawler::ListingRecord;
use std::collections::HashMap;

/// Default length of the most-expensive list
pub const DEFAULT_TOP_N: usize = 10;

/// Dashboard statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Total number of listings
    pub total_listings: usize,

    /// Number of distinct category labels
    pub category_count: usize,

    /// Mean of the numeric prices, `None` if no listing has one
    ///
    /// Listings carrying the `"0 FCFA"` placeholder are left out.
    pub average_price: Option<f64>,

    /// Listings per category, largest first
    pub by_category: Vec<(String, usize)>,

    /// Listings with the highest numeric price, most expensive first
    pub top_priced: Vec<ListingRecord>,
}

impl DashboardStats {
    /// Computes statistics over `records`
    ///
    /// # Arguments
    ///
    /// * `records` - The listings to summarize
    /// * `top_n` - Length of the most-expensive list
    pub fn from_records(records: &[ListingRecord], top_n: usize) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.category_label.as_str()).or_insert(0) += 1;
        }

        let mut by_category: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count))
            .collect();
        by_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        // The missing-price placeholder is not a price of zero
        let mut priced: Vec<(f64, &ListingRecord)> = records
            .iter()
            .filter(|r| r.has_price())
            .filter_map(|r| r.price_value().map(|p| (p, r)))
            .collect();

        let average_price = if priced.is_empty() {
            None
        } else {
            Some(priced.iter().map(|(p, _)| p).sum::<f64>() / priced.len() as f64)
        };

        // Stable sort keeps file order among equal prices
        priced.sort_by(|a, b| b.0.total_cmp(&a.0));
        let top_priced = priced
            .into_iter()
            .take(top_n)
            .map(|(_, r)| r.clone())
            .collect();

        Self {
            total_listings: records.len(),
            category_count: by_category.len(),
            average_price,
            by_category,
            top_priced,
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &DashboardStats) {
    println!("=== Dashboard ===\n");

    println!("Overview:");
    println!("  Total listings: {}", stats.total_listings);
    println!("  Categories: {}", stats.category_count);
    match stats.average_price {
        Some(avg) => println!("  Average price: {:.0} FCFA", avg),
        None => println!("  Average price: n/a"),
    }
    println!();

    println!("Listings by Category:");
    for (label, count) in &stats.by_category {
        let percentage = if stats.total_listings > 0 {
            (*count as f64 / stats.total_listings as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", label, count, percentage);
    }
    println!();

    if !stats.top_priced.is_empty() {
        println!("Top {} most expensive:", stats.top_priced.len());
        for (i, record) in stats.top_priced.iter().enumerate() {
            println!(
                "  {}. {} - {} ({})",
                i + 1,
                record.name,
                record.price_text,
                record.category_label
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::PRICE_SENTINEL;

    fn record(category: &str, name: &str, price: &str) -> ListingRecord {
        ListingRecord {
            category_label: category.to_string(),
            name: name.to_string(),
            price_text: price.to_string(),
            address_text: "Dakar".to_string(),
            image_url: String::new(),
            source_page: 1,
        }
    }

    #[test]
    fn test_empty_dataset() {
        let stats = DashboardStats::from_records(&[], DEFAULT_TOP_N);
        assert_eq!(stats.total_listings, 0);
        assert_eq!(stats.category_count, 0);
        assert_eq!(stats.average_price, None);
        assert!(stats.by_category.is_empty());
        assert!(stats.top_priced.is_empty());
    }

    #[test]
    fn test_counts_and_average() {
        let records = vec![
            record("Les Moutons", "Bélier", "60000 FCFA"),
            record("Les Moutons", "Brebis", "40000 FCFA"),
            record("Les Chiens", "Berger", "Prix sur demande"),
            record("Autres Animaux", "Tortue", "20000 FCFA"),
        ];
        let stats = DashboardStats::from_records(&records, DEFAULT_TOP_N);

        assert_eq!(stats.total_listings, 4);
        assert_eq!(stats.category_count, 3);
        // The listing without a number is left out of the mean
        assert_eq!(stats.average_price, Some(40000.0));
        assert_eq!(
            stats.by_category,
            vec![
                ("Les Moutons".to_string(), 2),
                ("Autres Animaux".to_string(), 1),
                ("Les Chiens".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_missing_price_placeholder_not_averaged() {
        let records = vec![
            record("Les Chiens", "Berger", "100000 FCFA"),
            record("Les Chiens", "Sans prix", PRICE_SENTINEL),
        ];
        let stats = DashboardStats::from_records(&records, DEFAULT_TOP_N);

        assert_eq!(stats.total_listings, 2);
        assert_eq!(stats.average_price, Some(100000.0));
        assert_eq!(stats.top_priced.len(), 1);
        assert_eq!(stats.top_priced[0].name, "Berger");
    }

    #[test]
    fn test_top_priced_order_and_limit() {
        let records: Vec<ListingRecord> = (1..=15)
            .map(|i| record("Les Moutons", &format!("m{}", i), &format!("{} FCFA", i * 1000)))
            .collect();
        let stats = DashboardStats::from_records(&records, DEFAULT_TOP_N);

        assert_eq!(stats.top_priced.len(), 10);
        assert_eq!(stats.top_priced[0].name, "m15");
        assert_eq!(stats.top_priced[9].name, "m6");
    }

    #[test]
    fn test_top_priced_ties_keep_file_order() {
        let records = vec![
            record("A", "first", "100 FCFA"),
            record("A", "second", "100 FCFA"),
        ];
        let stats = DashboardStats::from_records(&records, 1);
        assert_eq!(stats.top_priced.len(), 1);
        assert_eq!(stats.top_priced[0].name, "first");
    }
}
