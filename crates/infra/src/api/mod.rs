//! REST senders for the ERP API domains

pub mod sender;

pub use sender::{build_url, HttpApiSender};
