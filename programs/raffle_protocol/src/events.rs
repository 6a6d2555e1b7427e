use anchor_lang::prelude::*;

#[event]
pub struct RaffleEntered {
    pub player: Pubkey,
    pub amount: u64,
    pub entry_index: u64,
    pub round: u64,
}

#[event]
pub struct RequestedRaffleWinner {
    pub request_id: u64,
    pub round: u64,
}

/// Picked up by the off-chain oracle.
#[event]
pub struct RandomWordsRequested {
    pub request_id: u64,
    pub consumer: Pubkey,
    pub pre_seed: [u8; 32],
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_units: u32,
    pub num_words: u32,
}

#[event]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub amount: u64,
    pub request_id: u64,
    pub round: u64,
}
