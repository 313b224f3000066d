//! Record synthesis: per-transaction field generation and fraud scoring.
//!
//! Every random draw comes from the generator handle passed in, in a fixed
//! order per record, so a seeded generator reproduces a batch exactly.

use crate::catalog::{
    self, AMOUNT_CAP, AMOUNT_CAP_PROBABILITY, CITIES, COUNTRIES, DEVICE_TYPES, MERCHANTS,
    PAYMENT_METHODS, REGION_CODES, TRANSACTION_STATUSES, TRANSACTION_TYPES,
};
use crate::error::{GeneratorError, Result};
use crate::risk::{self, RiskSignals};
use crate::types::transaction::{PaymentMethod, Transaction, TransactionStatus, TransactionType};
use chrono::{DateTime, Duration, Timelike, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::net::Ipv4Addr;
use tracing::debug;

/// Each user appears roughly this many times per batch
pub const RECORDS_PER_USER: usize = 8;

/// Length of the timestamp window ending at the anchor
pub const HISTORY_DAYS: i64 = 730;

/// Probability that the hour is drawn from the daytime band
pub const DAYTIME_PROBABILITY: f64 = 0.7;
pub const DAYTIME_HOURS: (u32, u32) = (8, 22);

/// Probability that a record gets a private-range address
pub const PRIVATE_IP_PROBABILITY: f64 = 0.05;

/// Leading groups that mark an address as private
const PRIVATE_PREFIXES: [&str; 3] = ["10.", "192.", "172."];

/// Private blocks: (network, prefix length)
const PRIVATE_BLOCKS: [(Ipv4Addr, u32); 3] = [
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
];

const DEVICE_ID_MODULUS: u64 = 10_000;

/// Generates batches of synthetic transactions.
///
/// Timestamps fall in the [`HISTORY_DAYS`] window ending at `anchor`; pin the
/// anchor to get byte-identical output across runs.
pub struct RecordSynthesizer {
    anchor: DateTime<Utc>,
    payment_methods: WeightedIndex<u32>,
    transaction_types: WeightedIndex<u32>,
    transaction_statuses: WeightedIndex<u32>,
}

impl RecordSynthesizer {
    /// Create a synthesizer whose timestamp window ends at `anchor`
    pub fn new(anchor: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            anchor,
            payment_methods: weighted(&PAYMENT_METHODS)?,
            transaction_types: weighted(&TRANSACTION_TYPES)?,
            transaction_statuses: weighted(&TRANSACTION_STATUSES)?,
        })
    }

    pub fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Generate `count` records from a user pool drawn fresh for this call.
    ///
    /// Fails with `InvalidArgument` if `count` is zero.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<Transaction>> {
        if count == 0 {
            return Err(GeneratorError::invalid("record count must be at least 1"));
        }

        let users = user_pool(rng, count);
        debug!(count, pool_size = users.len(), "Synthesizing batch");

        let records = (0..count)
            .map(|_| {
                let user_id = &users[rng.gen_range(0..users.len())];
                self.record(rng, user_id)
            })
            .collect();

        Ok(records)
    }

    fn record<R: Rng + ?Sized>(&self, rng: &mut R, user_id: &str) -> Transaction {
        let (merchant_name, category) = MERCHANTS[rng.gen_range(0..MERCHANTS.len())];
        let device_type = DEVICE_TYPES[rng.gen_range(0..DEVICE_TYPES.len())];

        let hour = draw_hour(rng);
        let timestamp = self.draw_timestamp(rng, hour);

        let (min, max) = catalog::amount_range(category);
        let mut amount = round_cents(rng.gen_range(min..=max));
        if amount > AMOUNT_CAP && rng.gen::<f64>() < AMOUNT_CAP_PROBABILITY {
            amount = round_cents(rng.gen_range(min..=AMOUNT_CAP));
        }

        let payment_method: PaymentMethod =
            PAYMENT_METHODS[self.payment_methods.sample(rng)].0;

        let country = COUNTRIES[rng.gen_range(0..COUNTRIES.len())];
        let city = CITIES[rng.gen_range(0..CITIES.len())];
        let region = REGION_CODES[rng.gen_range(0..REGION_CODES.len())];
        let geolocation = format!("{city}, {region}, {country}");

        let ip_address = if rng.gen::<f64>() < PRIVATE_IP_PROBABILITY {
            private_ipv4(rng)
        } else {
            public_ipv4(rng)
        }
        .to_string();
        let is_private_ip = has_private_prefix(&ip_address);

        let transaction_type: TransactionType =
            TRANSACTION_TYPES[self.transaction_types.sample(rng)].0;
        let transaction_status: TransactionStatus =
            TRANSACTION_STATUSES[self.transaction_statuses.sample(rng)].0;

        let signals = RiskSignals {
            amount,
            hour,
            category,
            payment_method,
            status: transaction_status,
            is_private_ip,
        };
        let risk_score = risk::score(&signals, rng);
        let is_fraud = risk::is_fraud(risk_score, rng);

        Transaction {
            transaction_id: random_uuid(rng),
            user_id: user_id.to_string(),
            transaction_timestamp: timestamp,
            transaction_amount: amount,
            merchant_id: format!("merchant_{merchant_name}"),
            merchant_category: category,
            payment_method,
            ip_address,
            geolocation,
            device_id: device_id(user_id),
            device_type,
            transaction_type,
            transaction_status,
            is_fraud,
            risk_score,
            is_private_ip,
        }
    }

    /// Uniform second in the history window, with the hour replaced by `hour`
    fn draw_timestamp<R: Rng + ?Sized>(&self, rng: &mut R, hour: u32) -> DateTime<Utc> {
        let window = Duration::days(HISTORY_DAYS);
        let offset = rng.gen_range(0..=window.num_seconds());
        let ts = self.anchor - window + Duration::seconds(offset);
        // UTC has no DST gaps, so replacing the hour always succeeds
        ts.with_hour(hour).unwrap_or(ts)
    }
}

/// Convenience wrapper: build a synthesizer for `anchor` and generate one batch
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    anchor: DateTime<Utc>,
    count: usize,
) -> Result<Vec<Transaction>> {
    RecordSynthesizer::new(anchor)?.synthesize(rng, count)
}

/// Users for one batch: `max(1, count / 8)` random identifiers
pub fn user_pool<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    let size = (count / RECORDS_PER_USER).max(1);
    (0..size).map(|_| random_uuid(rng)).collect()
}

/// `device_NNNN`, a pure function of the user id
pub fn device_id(user_id: &str) -> String {
    format!("device_{:04}", fnv1a_64(user_id.as_bytes()) % DEVICE_ID_MODULUS)
}

/// Whether an address string starts with one of the private leading groups
pub fn has_private_prefix(ip: &str) -> bool {
    PRIVATE_PREFIXES.iter().any(|p| ip.starts_with(p))
}

fn weighted<T>(table: &[(T, u32)]) -> Result<WeightedIndex<u32>> {
    WeightedIndex::new(table.iter().map(|(_, w)| *w))
        .map_err(|e| GeneratorError::invalid(format!("bad weight table: {e}")))
}

fn draw_hour<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen::<f64>() < DAYTIME_PROBABILITY {
        rng.gen_range(DAYTIME_HOURS.0..=DAYTIME_HOURS.1)
    } else {
        rng.gen_range(0..=23)
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}

fn private_ipv4<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    let (network, prefix) = PRIVATE_BLOCKS[rng.gen_range(0..PRIVATE_BLOCKS.len())];
    let host_mask = u32::MAX >> prefix;
    Ipv4Addr::from(u32::from(network) | (rng.gen::<u32>() & host_mask))
}

fn public_ipv4<R: Rng + ?Sized>(rng: &mut R) -> Ipv4Addr {
    loop {
        let addr = Ipv4Addr::from(rng.gen::<u32>());
        if is_public(addr) {
            return addr;
        }
    }
}

fn is_public(addr: Ipv4Addr) -> bool {
    let [a, b, ..] = addr.octets();
    let shared = a == 100 && (b & 0xc0) == 64;
    let reserved = a == 0 || a >= 240;
    !(addr.is_private()
        || addr.is_loopback()
        || addr.is_link_local()
        || addr.is_multicast()
        || addr.is_broadcast()
        || addr.is_documentation()
        || shared
        || reserved)
}

/// 64-bit FNV-1a; unsalted so device ids are stable across runs
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}
