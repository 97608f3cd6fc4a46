//! Wallet capability interface and the concrete wallet adapters

mod durable;
mod handle;
mod trade;

pub use durable::DurableWallet;
pub use handle::{Amount, WalletHandle, WalletKind};
pub use trade::TradeKeyHolder;
