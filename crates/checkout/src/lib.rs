//! Checkout: order summary math, XLM display formatting, and the wallet stub.
//!
//! Nothing here talks to the Stellar network. The wallet connector only reports
//! that wallet integration is pending.

pub mod summary;
pub mod wallet;

pub use summary::{
    CheckoutSummary, LINE_DECIMALS, SUMMARY_DECIMALS, SummaryLine, TRANSACTION_FEE, format_xlm,
};
pub use wallet::{SUPPORTED_WALLETS, StubWallet, WALLET_PENDING_NOTICE, WalletConnection, WalletConnector};
