use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    #[msg("Entry amount is below the entrance fee")]
    SendMoreToEnterRaffle,
    #[msg("Raffle is not open")]
    RaffleNotOpen,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Prize transfer failed")]
    TransferFailed,

    #[msg("Raffle is not awaiting randomness")]
    RaffleNotCalculating,
    #[msg("Unknown or already fulfilled request")]
    UnknownRequest,
    #[msg("A randomness request is already pending")]
    RequestAlreadyPending,
    #[msg("Random words do not match the request")]
    InvalidRandomWords,
    #[msg("Winner account does not match the selected winner")]
    WinnerAccountMismatch,

    #[msg("Raffle is full")]
    RaffleFull,
    #[msg("Payout in progress")]
    PayoutInProgress,
    #[msg("Player index out of bounds")]
    PlayerIndexOutOfBounds,

    #[msg("Entrance fee below the rent-exempt minimum")]
    InvalidEntranceFee,
    #[msg("Interval must be positive")]
    InvalidInterval,
    #[msg("Invalid number of random words")]
    InvalidNumWords,
    #[msg("Oracle pubkey not set")]
    OracleNotSet,

    #[msg("Request queue mismatch")]
    RequestQueueMismatch,

    #[msg("Missing or invalid ed25519 verify instruction")]
    MissingOrInvalidEd25519Ix,
    #[msg("Ed25519 pubkey mismatch")]
    Ed25519PubkeyMismatch,
    #[msg("Ed25519 message mismatch")]
    Ed25519MessageMismatch,

    #[msg("Math overflow")]
    MathOverflow,
}
