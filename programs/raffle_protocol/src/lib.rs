use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod oracle;
pub mod round;
pub mod state;
pub mod utils;
pub mod contexts;
pub mod constants;


pub use utils::*;
pub use instructions::*;
pub use state::*;
pub use errors::*;
pub use contexts::*;
pub use constants::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "Raffle Protocol",
    project_url: "https://github.com/raffle-protocol/raffle-protocol",
    contacts: "link:https://github.com/raffle-protocol/raffle-protocol/issues",
    policy: "https://github.com/raffle-protocol/raffle-protocol/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/raffle-protocol/raffle-protocol"
}

declare_id!("7mVq3Ff8dDqvEouZhBZ8KN7F3hJbBqkcTnFNwYQ3oGqE");

#[program]
pub mod raffle_protocol {
    use super::*;
    use crate::instructions::{admin, entry, fulfill, query, upkeep};

    pub fn initialize_raffle(
        ctx: Context<InitializeRaffle>,
        params: InitializeRaffleParams,
    ) -> Result<()> {
        admin::initialize_raffle(ctx, params)
    }

    // ----------------------------
    // Entries
    // ----------------------------
    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        entry::enter_raffle(ctx, amount)
    }

    // ----------------------------
    // Keeper upkeep
    // ----------------------------
    pub fn check_upkeep(ctx: Context<ViewRaffle>, check_data: Vec<u8>) -> Result<UpkeepCheck> {
        upkeep::check_upkeep(ctx, check_data)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        upkeep::perform_upkeep(ctx, perform_data)
    }

    // ----------------------------
    // Oracle callback
    // ----------------------------
    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_words: Vec<u64>,
    ) -> Result<()> {
        fulfill::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn fulfill_random_words_signed(
        ctx: Context<FulfillRandomWordsSigned>,
        request_id: u64,
        random_words: Vec<u64>,
    ) -> Result<()> {
        fulfill::fulfill_random_words_signed(ctx, request_id, random_words)
    }

    // ----------------------------
    // Views
    // ----------------------------
    pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
        query::get_player(ctx, index)
    }

    pub fn get_number_of_players(ctx: Context<ViewRaffle>) -> Result<u64> {
        query::get_number_of_players(ctx)
    }

    pub fn get_entrance_fee(ctx: Context<ViewRaffle>) -> Result<u64> {
        query::get_entrance_fee(ctx)
    }

    pub fn get_interval(ctx: Context<ViewRaffle>) -> Result<i64> {
        query::get_interval(ctx)
    }

    pub fn get_last_timestamp(ctx: Context<ViewRaffle>) -> Result<i64> {
        query::get_last_timestamp(ctx)
    }

    pub fn get_recent_winner(ctx: Context<ViewRaffle>) -> Result<Option<Pubkey>> {
        query::get_recent_winner(ctx)
    }

    pub fn get_raffle_state(ctx: Context<ViewRaffle>) -> Result<RaffleState> {
        query::get_raffle_state(ctx)
    }

    pub fn get_pending_request_id(ctx: Context<ViewRaffle>) -> Result<Option<u64>> {
        query::get_pending_request_id(ctx)
    }
}
