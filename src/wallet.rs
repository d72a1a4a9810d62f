//! Simulated wallet
//!
//! There is no chain behind this: connecting sets a placeholder address and a
//! mint is a fixed 2 second pause that ends in an attempts refill. The timing
//! lives in the simulation scheduler; this type only tracks the flags.

use serde::Serialize;

/// Address shown once "connected"
pub const PLACEHOLDER_ADDRESS: &str = "0x1234...abcd";

pub const MINT_PROMPT_MESSAGE: &str = "APPROVE TRANSACTION IN YOUR WALLET";
pub const MINT_DONE_MESSAGE: &str = "PROUD OF YOU! 3 ATTEMPTS GRANTED.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Wallet {
    pub address: Option<String>,
    pub is_minting: bool,
}

impl Wallet {
    pub fn connect(&mut self) {
        if self.address.is_none() {
            log::info!("Wallet connected: {}", PLACEHOLDER_ADDRESS);
        }
        self.address = Some(PLACEHOLDER_ADDRESS.to_string());
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Mark a mint in flight. False if not connected or already minting.
    pub fn begin_mint(&mut self) -> bool {
        if !self.is_connected() || self.is_minting {
            return false;
        }
        self.is_minting = true;
        true
    }

    /// Clear the in-flight flag. False if no mint was running.
    pub fn finish_mint(&mut self) -> bool {
        std::mem::replace(&mut self.is_minting, false)
    }
}
