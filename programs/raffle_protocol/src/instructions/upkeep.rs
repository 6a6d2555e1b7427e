use anchor_lang::prelude::*;

use crate::events::{RandomWordsRequested, RequestedRaffleWinner};
use crate::state::UpkeepCheck;
use crate::{PerformUpkeep, ViewRaffle};

/// Read-only readiness probe for keepers. `check_data` is accepted and ignored.
pub fn check_upkeep(ctx: Context<ViewRaffle>, _check_data: Vec<u8>) -> Result<UpkeepCheck> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.raffle.check_upkeep(now))
}

pub fn perform_upkeep(ctx: Context<PerformUpkeep>, _perform_data: Vec<u8>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let consumer = ctx.accounts.raffle.key();

    let raffle = &mut ctx.accounts.raffle;
    let queue = &mut ctx.accounts.request_queue;

    let request_id = raffle.perform_upkeep(consumer, now, &mut **queue)?;

    emit!(RandomWordsRequested {
        request_id,
        consumer,
        pre_seed: queue.pending_pre_seed,
        key_hash: raffle.vrf.key_hash,
        subscription_id: raffle.vrf.subscription_id,
        request_confirmations: raffle.vrf.request_confirmations,
        callback_compute_units: raffle.vrf.callback_compute_units,
        num_words: raffle.vrf.num_words,
    });

    emit!(RequestedRaffleWinner {
        request_id,
        round: raffle.round,
    });

    Ok(())
}
