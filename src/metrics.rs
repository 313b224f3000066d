//! Running statistics over the records written by a stream.

use crate::types::transaction::{MerchantCategory, Transaction};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Dataset statistics collected batch by batch
pub struct DatasetMetrics {
    /// Total records written
    pub records: u64,
    /// Records labelled as fraud
    pub fraud_labels: u64,
    /// Records whose address carries a private leading group
    pub private_ips: u64,
    /// Batches recorded
    pub batches: u64,
    /// Risk score distribution, buckets of width 10 (the last one includes 100)
    score_buckets: [u64; 10],
    /// Records per merchant category
    by_category: BTreeMap<MerchantCategory, u64>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl DatasetMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            records: 0,
            fraud_labels: 0,
            private_ips: 0,
            batches: 0,
            score_buckets: [0; 10],
            by_category: BTreeMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Record one written batch
    pub fn record_batch(&mut self, batch: &[Transaction]) {
        self.batches += 1;
        for tx in batch {
            self.records += 1;
            if tx.is_fraud {
                self.fraud_labels += 1;
            }
            if tx.is_private_ip {
                self.private_ips += 1;
            }
            let bucket = usize::from(tx.risk_score / 10).min(9);
            self.score_buckets[bucket] += 1;
            *self.by_category.entry(tx.merchant_category).or_insert(0) += 1;
        }
    }

    /// Share of records labelled fraud, in percent
    pub fn fraud_rate(&self) -> f64 {
        percent(self.fraud_labels, self.records)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Records per second since the collector was created
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.records as f64 / elapsed
        } else {
            0.0
        }
    }

    pub fn get_score_distribution(&self) -> [u64; 10] {
        self.score_buckets
    }

    pub fn get_category_counts(&self) -> &BTreeMap<MerchantCategory, u64> {
        &self.by_category
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        info!("╔══════════════════════════════════════════════════════════════╗");
        info!("║            SYNTHETIC FRAUD DATASET - SUMMARY                 ║");
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!(
            "║ Records Written: {:>10}  │  Throughput: {:>9.1} rec/s ║",
            self.records,
            self.get_throughput()
        );
        info!(
            "║ Fraud Labels:    {:>10}  │  Fraud Rate: {:>9.2}%     ║",
            self.fraud_labels,
            self.fraud_rate()
        );
        info!(
            "║ Private IPs:     {:>10}  │  Batches:    {:>10}      ║",
            self.private_ips, self.batches
        );
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Records by Merchant Category:                                ║");
        for (category, count) in &self.by_category {
            info!(
                "║   {:13}: {:>8} ({:>5.1}%)",
                category.as_str(),
                count,
                percent(*count, self.records)
            );
        }
        info!("╠══════════════════════════════════════════════════════════════╣");
        info!("║ Risk Score Distribution:                                     ║");
        for (i, &count) in self.score_buckets.iter().enumerate() {
            let pct = percent(count, self.records);
            let bar: String = "█".repeat(((pct / 2.0) as usize).min(20));
            let upper = if i == 9 { 100 } else { i * 10 + 9 };
            info!("║   {:>3}-{:<3}: {:>8} ({:>5.1}%) {}", i * 10, upper, count, pct, bar);
        }
        info!("╚══════════════════════════════════════════════════════════════╝");
    }
}

impl Default for DatasetMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesizer::synthesize;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_metrics_recording() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut metrics = DatasetMetrics::new();

        let first = synthesize(&mut rng, Utc::now(), 300).unwrap();
        let second = synthesize(&mut rng, Utc::now(), 200).unwrap();
        metrics.record_batch(&first);
        metrics.record_batch(&second);

        assert_eq!(metrics.batches, 2);
        assert_eq!(metrics.records, 500);
        assert_eq!(metrics.get_score_distribution().iter().sum::<u64>(), 500);
        assert_eq!(metrics.get_category_counts().values().sum::<u64>(), 500);

        let fraud = first.iter().chain(&second).filter(|t| t.is_fraud).count() as u64;
        assert_eq!(metrics.fraud_labels, fraud);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = DatasetMetrics::default();
        assert_eq!(metrics.fraud_rate(), 0.0);
        assert_eq!(metrics.get_score_distribution(), [0; 10]);
        metrics.print_summary();
    }
}
