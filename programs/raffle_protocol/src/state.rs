use anchor_lang::prelude::*;

use crate::constants::MAX_PLAYERS;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum RaffleState {
    /// Accepting entries.
    #[default]
    Open,
    /// Randomness requested, waiting for the oracle.
    Calculating,
}

/// Oracle parameters fixed at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct VrfConfig {
    /// Key allowed to fulfil requests, directly or through an ed25519 attestation.
    pub oracle: Pubkey,
    /// Selects the oracle key / price tier, forwarded with every request.
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_compute_units: u32,
    pub request_confirmations: u16,
    pub num_words: u32,
}

#[account]
#[derive(InitSpace, Default)]
pub struct Raffle {
    pub admin: Pubkey,
    pub bump: u8,

    // System-owned PDA vault (holds lamports, no data)
    pub vault: Pubkey,
    pub vault_bump: u8,

    // Coordinator account injected at initialization
    pub request_queue: Pubkey,

    pub status: RaffleState,
    pub entrance_fee: u64,
    pub interval: i64,
    pub last_timestamp: i64,

    /// Entry order is winner-selection order. One slot per entry.
    #[max_len(MAX_PLAYERS)]
    pub players: Vec<Pubkey>,
    pub pot_lamports: u64,

    pub pending_request_id: Option<u64>,
    pub recent_winner: Option<Pubkey>,

    // set only while the prize is in flight
    pub payout_locked: bool,

    /// Index of the current round; bumped on each payout.
    pub round: u64,

    pub vrf: VrfConfig,
    pub version: u16,
}

#[account]
#[derive(InitSpace, Default)]
pub struct RequestQueue {
    pub raffle: Pubkey,
    pub bump: u8,

    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,
    pub pending_pre_seed: [u8; 32],
    pub requested_at: i64,
    pub fulfilled_count: u64,

    pub version: u16,
}

/// Result of the upkeep gate. Each flag gates readiness on its own.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    pub is_open: bool,
    pub time_passed: bool,
    pub has_players: bool,
    pub has_balance: bool,
    /// Opaque payload handed back to `perform_upkeep`.
    pub perform_data: Vec<u8>,
}

/// Arguments to `initialize_raffle`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeRaffleParams {
    pub entrance_fee: u64,
    pub interval: i64,
    pub oracle: Pubkey,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub callback_compute_units: u32,
    pub request_confirmations: u16,
    pub num_words: u32,
}
