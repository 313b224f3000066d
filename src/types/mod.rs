//! Type definitions for generated records

pub mod transaction;

pub use transaction::{
    DeviceType, MerchantCategory, PaymentMethod, Transaction, TransactionStatus, TransactionType,
};
