//! Wallet connection seam.
//!
//! The storefront only ever talks to a [`WalletConnector`]. The shipped
//! implementation is [`StubWallet`], which builds no transaction, asks for no
//! signature and never contacts the network.

use serde::Serialize;

use crate::summary::CheckoutSummary;

/// Notice shown wherever a wallet would be needed.
pub const WALLET_PENDING_NOTICE: &str =
    "Wallet connection will be implemented with Stellar integration";

/// Wallet names listed on the payment card.
pub const SUPPORTED_WALLETS: &[&str] = &["Freighter", "xBull", "Albedo"];

/// Outcome of a wallet interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[non_exhaustive]
pub enum WalletConnection {
    /// Integration not available yet; nothing happened.
    Pending { notice: &'static str },
}

impl WalletConnection {
    pub fn notice(&self) -> &'static str {
        match self {
            WalletConnection::Pending { notice } => notice,
        }
    }
}

pub trait WalletConnector: Send + Sync {
    fn connect(&self) -> WalletConnection;

    /// Pay for `summary`. Must leave the cart untouched.
    fn confirm_payment(&self, summary: &CheckoutSummary) -> WalletConnection;

    fn supported_wallets(&self) -> &'static [&'static str] {
        SUPPORTED_WALLETS
    }
}

/// Placeholder connector.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubWallet;

impl WalletConnector for StubWallet {
    fn connect(&self) -> WalletConnection {
        tracing::info!("wallet connect requested; integration pending");
        WalletConnection::Pending {
            notice: WALLET_PENDING_NOTICE,
        }
    }

    fn confirm_payment(&self, summary: &CheckoutSummary) -> WalletConnection {
        tracing::info!(
            lines = summary.lines.len(),
            total_stroops = summary.total.stroops(),
            "payment confirmation requested; integration pending"
        );
        WalletConnection::Pending {
            notice: WALLET_PENDING_NOTICE,
        }
    }
}
