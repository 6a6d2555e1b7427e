use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::RaffleError;
use crate::state::{InitializeRaffleParams, RaffleState, VrfConfig};
use crate::InitializeRaffle;

/// Rejects configurations the raffle could never run with.
pub fn validate_params(params: &InitializeRaffleParams) -> Result<()> {
    require!(
        params.entrance_fee >= MIN_ENTRANCE_FEE,
        RaffleError::InvalidEntranceFee
    );
    require!(params.interval > 0, RaffleError::InvalidInterval);
    require!(params.oracle != Pubkey::default(), RaffleError::OracleNotSet);
    require!(
        params.num_words > 0 && params.num_words <= MAX_NUM_WORDS,
        RaffleError::InvalidNumWords
    );
    Ok(())
}

pub fn initialize_raffle(
    ctx: Context<InitializeRaffle>,
    params: InitializeRaffleParams,
) -> Result<()> {
    validate_params(&params)?;

    let now = Clock::get()?.unix_timestamp;
    let raffle_key = ctx.accounts.raffle.key();

    let queue = &mut ctx.accounts.request_queue;
    queue.raffle = raffle_key;
    queue.bump = ctx.bumps.request_queue;
    queue.next_request_id = FIRST_REQUEST_ID;
    queue.pending_request_id = None;
    queue.pending_pre_seed = [0u8; 32];
    queue.requested_at = 0;
    queue.fulfilled_count = 0;
    queue.version = INITIAL_VERSION;

    let raffle = &mut ctx.accounts.raffle;

    raffle.admin = ctx.accounts.admin.key();
    raffle.bump = ctx.bumps.raffle;

    raffle.vault = ctx.accounts.vault.key();
    raffle.vault_bump = ctx.bumps.vault;
    raffle.request_queue = queue.key();

    raffle.status = RaffleState::Open;
    raffle.entrance_fee = params.entrance_fee;
    raffle.interval = params.interval;
    raffle.last_timestamp = now;

    raffle.players = Vec::new();
    raffle.pot_lamports = 0;
    raffle.pending_request_id = None;
    raffle.recent_winner = None;
    raffle.payout_locked = false;
    raffle.round = 0;

    raffle.vrf = VrfConfig {
        oracle: params.oracle,
        key_hash: params.key_hash,
        subscription_id: params.subscription_id,
        callback_compute_units: params.callback_compute_units,
        request_confirmations: params.request_confirmations,
        num_words: params.num_words,
    };

    raffle.version = INITIAL_VERSION;

    msg!(
        "Raffle initialized: fee={} interval={} oracle={}",
        params.entrance_fee,
        params.interval,
        params.oracle
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::assert_raffle_err;

    fn params() -> InitializeRaffleParams {
        InitializeRaffleParams {
            entrance_fee: 10_000_000,
            interval: 30,
            oracle: Pubkey::new_unique(),
            key_hash: [0x47; 32],
            subscription_id: 588,
            callback_compute_units: DEFAULT_CALLBACK_COMPUTE_UNITS,
            request_confirmations: DEFAULT_REQUEST_CONFIRMATIONS,
            num_words: DEFAULT_NUM_WORDS,
        }
    }

    #[test]
    fn accepts_sane_params() {
        validate_params(&params()).unwrap();
    }

    #[test]
    fn rejects_fee_below_rent_exempt_pot() {
        for entrance_fee in [0, 1, MIN_ENTRANCE_FEE - 1] {
            let p = InitializeRaffleParams { entrance_fee, ..params() };
            assert_raffle_err(validate_params(&p), RaffleError::InvalidEntranceFee);
        }

        let p = InitializeRaffleParams { entrance_fee: MIN_ENTRANCE_FEE, ..params() };
        validate_params(&p).unwrap();
    }

    #[test]
    fn rejects_non_positive_interval() {
        for interval in [0, -1, i64::MIN] {
            let p = InitializeRaffleParams { interval, ..params() };
            assert_raffle_err(validate_params(&p), RaffleError::InvalidInterval);
        }
    }

    #[test]
    fn rejects_missing_oracle() {
        let p = InitializeRaffleParams { oracle: Pubkey::default(), ..params() };
        assert_raffle_err(validate_params(&p), RaffleError::OracleNotSet);
    }

    #[test]
    fn bounds_word_count() {
        let none = InitializeRaffleParams { num_words: 0, ..params() };
        assert_raffle_err(validate_params(&none), RaffleError::InvalidNumWords);

        let too_many = InitializeRaffleParams { num_words: MAX_NUM_WORDS + 1, ..params() };
        assert_raffle_err(validate_params(&too_many), RaffleError::InvalidNumWords);

        let max = InitializeRaffleParams { num_words: MAX_NUM_WORDS, ..params() };
        validate_params(&max).unwrap();
    }
}
