//! Fixed lookup tables the synthesizer draws from

use crate::types::transaction::{
    DeviceType, MerchantCategory, PaymentMethod, TransactionStatus, TransactionType,
};

/// Merchant catalog: (name, category), drawn uniformly
pub const MERCHANTS: [(&str, MerchantCategory); 12] = [
    ("amazon", MerchantCategory::Online),
    ("walmart", MerchantCategory::Retail),
    ("mcdonalds", MerchantCategory::Restaurant),
    ("shell", MerchantCategory::Gas),
    ("starbucks", MerchantCategory::Restaurant),
    ("target", MerchantCategory::Retail),
    ("uber", MerchantCategory::Transport),
    ("netflix", MerchantCategory::Subscription),
    ("paypal", MerchantCategory::Financial),
    ("apple", MerchantCategory::Online),
    ("google", MerchantCategory::Online),
    ("microsoft", MerchantCategory::Online),
];

pub const COUNTRIES: [&str; 11] = [
    "US", "GB", "DE", "FR", "CA", "IN", "BR", "ZA", "NG", "CN", "RU",
];

pub const CITIES: [&str; 24] = [
    "Springfield",
    "Riverside",
    "Franklin",
    "Greenville",
    "Bristol",
    "Clinton",
    "Fairview",
    "Salem",
    "Madison",
    "Georgetown",
    "Arlington",
    "Ashland",
    "Dover",
    "Oxford",
    "Jackson",
    "Burlington",
    "Manchester",
    "Milton",
    "Newport",
    "Auburn",
    "Dayton",
    "Lexington",
    "Milford",
    "Winchester",
];

pub const REGION_CODES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

pub const DEVICE_TYPES: [DeviceType; 3] =
    [DeviceType::Mobile, DeviceType::Desktop, DeviceType::Tablet];

pub const PAYMENT_METHODS: [(PaymentMethod, u32); 4] = [
    (PaymentMethod::CreditCard, 45),
    (PaymentMethod::DebitCard, 35),
    (PaymentMethod::DigitalWallet, 15),
    (PaymentMethod::BankTransfer, 5),
];

pub const TRANSACTION_TYPES: [(TransactionType, u32); 4] = [
    (TransactionType::Purchase, 75),
    (TransactionType::Withdrawal, 15),
    (TransactionType::Transfer, 8),
    (TransactionType::Refund, 2),
];

pub const TRANSACTION_STATUSES: [(TransactionStatus, u32); 3] = [
    (TransactionStatus::Completed, 92),
    (TransactionStatus::Failed, 6),
    (TransactionStatus::Pending, 2),
];

/// Amounts above this are pulled back under it with probability [`AMOUNT_CAP_PROBABILITY`]
pub const AMOUNT_CAP: f64 = 300.0;
pub const AMOUNT_CAP_PROBABILITY: f64 = 0.7;

/// Inclusive amount range for a merchant category
pub fn amount_range(category: MerchantCategory) -> (f64, f64) {
    match category {
        MerchantCategory::Restaurant => (5.0, 150.0),
        MerchantCategory::Retail => (10.0, 500.0),
        MerchantCategory::Gas => (20.0, 100.0),
        MerchantCategory::Online => (15.0, 300.0),
        MerchantCategory::Transport => (10.0, 80.0),
        MerchantCategory::Subscription => (5.0, 50.0),
        MerchantCategory::Financial => (50.0, 1000.0),
    }
}
