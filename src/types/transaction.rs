//! Synthetic transaction record and its categorical fields

use chrono::{DateTime, Timelike, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Timestamp layout written to the output file (lexicographically sortable)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column order of the output file, matching the field order of [`Transaction`]
pub const COLUMNS: [&str; 15] = [
    "transaction_id",
    "user_id",
    "transaction_timestamp",
    "transaction_amount",
    "merchant_id",
    "merchant_category",
    "payment_method",
    "ip_address",
    "geolocation",
    "device_id",
    "device_type",
    "transaction_type",
    "transaction_status",
    "is_fraud",
    "risk_score",
];

/// Merchant category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantCategory {
    Online,
    Retail,
    Restaurant,
    Gas,
    Subscription,
    Transport,
    Financial,
}

impl MerchantCategory {
    pub const ALL: [MerchantCategory; 7] = [
        MerchantCategory::Online,
        MerchantCategory::Retail,
        MerchantCategory::Restaurant,
        MerchantCategory::Gas,
        MerchantCategory::Subscription,
        MerchantCategory::Transport,
        MerchantCategory::Financial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MerchantCategory::Online => "online",
            MerchantCategory::Retail => "retail",
            MerchantCategory::Restaurant => "restaurant",
            MerchantCategory::Gas => "gas",
            MerchantCategory::Subscription => "subscription",
            MerchantCategory::Transport => "transport",
            MerchantCategory::Financial => "financial",
        }
    }
}

/// Payment instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    DigitalWallet,
    BankTransfer,
}

/// Device class the transaction originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Purchase,
    Withdrawal,
    Transfer,
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Failed,
    Pending,
}

impl fmt::Display for MerchantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic transaction.
///
/// Field order is the column order of the output file. The private-address flag
/// feeds the risk score but is not written out.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// Unique transaction identifier (UUID)
    pub transaction_id: String,

    /// User identifier drawn from the batch's user pool
    pub user_id: String,

    /// Transaction time, biased toward daytime hours
    #[serde(serialize_with = "serialize_timestamp")]
    pub transaction_timestamp: DateTime<Utc>,

    /// Amount rounded to cents
    #[serde(serialize_with = "serialize_amount")]
    pub transaction_amount: f64,

    /// `merchant_<name>`
    pub merchant_id: String,

    pub merchant_category: MerchantCategory,

    pub payment_method: PaymentMethod,

    /// Dotted IPv4 address
    pub ip_address: String,

    /// "city, region, country"
    pub geolocation: String,

    /// Device identifier derived from the user id
    pub device_id: String,

    pub device_type: DeviceType,

    pub transaction_type: TransactionType,

    pub transaction_status: TransactionStatus,

    /// Fraud label (gated by risk score)
    pub is_fraud: bool,

    /// Heuristic risk score, 0-100
    pub risk_score: u8,

    /// Whether the address starts with a private-range leading group
    #[serde(skip)]
    pub is_private_ip: bool,
}

impl Transaction {
    /// Hour of day of the transaction timestamp
    pub fn hour(&self) -> u32 {
        self.transaction_timestamp.hour()
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

fn serialize_amount<S: Serializer>(amount: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&format_args!("{:.2}", amount))
}
