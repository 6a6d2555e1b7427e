// Centralized Protocol Constants

// PDA seeds
// =========

pub const RAFFLE_SEED: &[u8] = b"raffle_v1";
pub const VAULT_SEED: &[u8] = b"raffle_vault_v1";
pub const REQUEST_QUEUE_SEED: &[u8] = b"request_queue_v1";

// Entry bounds
// ============

/// Smallest entrance fee accepted at initialization. Rent-exempt minimum of
/// a zero-data system account, so a one-entry pot can always fund an empty
/// winner wallet.
pub const MIN_ENTRANCE_FEE: u64 = 890_880;

// Account bounds
// ==============

/// Maximum number of entries held in one round.
/// Keeps the Raffle account under the 10 KiB CPI allocation limit
/// (250 * 32 bytes of player keys plus the fixed fields).
pub const MAX_PLAYERS: usize = 250;

/// Upper bound on random words the oracle may return per request.
pub const MAX_NUM_WORDS: u32 = 4;

// Randomness request defaults
// ===========================

/// Number of confirmations the oracle waits before answering.
pub const DEFAULT_REQUEST_CONFIRMATIONS: u16 = 3;

/// Compute units reserved for the fulfillment transaction.
pub const DEFAULT_CALLBACK_COMPUTE_UNITS: u32 = 200_000;

/// Only the first word selects the winner.
pub const DEFAULT_NUM_WORDS: u32 = 1;

/// Request ids start at 1 so that 0 never names a live request.
pub const FIRST_REQUEST_ID: u64 = 1;

// Attestation
// ===========

/// Domain separator for oracle-signed fulfillment messages.
pub const FULFILL_MSG_DOMAIN: &[u8] = b"raffle-protocol:fulfill_v1";

/// Domain separator for request pre-seeds.
pub const PRE_SEED_DOMAIN: &[u8] = b"raffle-protocol:pre_seed_v1";

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
