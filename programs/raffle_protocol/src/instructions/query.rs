use anchor_lang::prelude::*;

use crate::state::RaffleState;
use crate::ViewRaffle;

pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
    ctx.accounts.raffle.player(index)
}

pub fn get_number_of_players(ctx: Context<ViewRaffle>) -> Result<u64> {
    Ok(ctx.accounts.raffle.number_of_players())
}

pub fn get_entrance_fee(ctx: Context<ViewRaffle>) -> Result<u64> {
    Ok(ctx.accounts.raffle.entrance_fee())
}

pub fn get_interval(ctx: Context<ViewRaffle>) -> Result<i64> {
    Ok(ctx.accounts.raffle.interval())
}

pub fn get_last_timestamp(ctx: Context<ViewRaffle>) -> Result<i64> {
    Ok(ctx.accounts.raffle.last_timestamp())
}

pub fn get_recent_winner(ctx: Context<ViewRaffle>) -> Result<Option<Pubkey>> {
    Ok(ctx.accounts.raffle.recent_winner)
}

pub fn get_raffle_state(ctx: Context<ViewRaffle>) -> Result<RaffleState> {
    Ok(ctx.accounts.raffle.raffle_state())
}

pub fn get_pending_request_id(ctx: Context<ViewRaffle>) -> Result<Option<u64>> {
    Ok(ctx.accounts.raffle.pending_request_id)
}
