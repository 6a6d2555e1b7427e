// programs/raffle_protocol/src/contexts.rs

use anchor_lang::prelude::*;

use crate::errors::RaffleError;
use crate::state::{Raffle, RequestQueue};

#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [crate::RAFFLE_SEED],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: system-owned vault PDA, holds lamports, no data
    #[account(
        init,
        payer = admin,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + RequestQueue::INIT_SPACE,
        seeds = [crate::REQUEST_QUEUE_SEED, raffle.key().as_ref()],
        bump
    )]
    pub request_queue: Account<'info, RequestQueue>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: system-owned vault PDA. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump = raffle.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Read-only access for the view instructions.
#[derive(Accounts)]
pub struct ViewRaffle<'info> {
    #[account(
        seeds = [crate::RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        mut,
        seeds = [crate::REQUEST_QUEUE_SEED, raffle.key().as_ref()],
        bump = request_queue.bump,
        address = raffle.request_queue @ RaffleError::RequestQueueMismatch
    )]
    pub request_queue: Account<'info, RequestQueue>,

    /// Any keeper may trigger upkeep.
    pub keeper: Signer<'info>,
}

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        mut,
        seeds = [crate::REQUEST_QUEUE_SEED, raffle.key().as_ref()],
        bump = request_queue.bump,
        address = raffle.request_queue @ RaffleError::RequestQueueMismatch
    )]
    pub request_queue: Account<'info, RequestQueue>,

    /// CHECK: system-owned vault PDA. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump = raffle.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: compared against the selected winner in the handler
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    pub oracle: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct FulfillRandomWordsSigned<'info> {
    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        mut,
        seeds = [crate::REQUEST_QUEUE_SEED, raffle.key().as_ref()],
        bump = request_queue.bump,
        address = raffle.request_queue @ RaffleError::RequestQueueMismatch
    )]
    pub request_queue: Account<'info, RequestQueue>,

    /// CHECK: system-owned vault PDA. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, raffle.key().as_ref()],
        bump = raffle.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    /// CHECK: compared against the selected winner in the handler
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    /// Pays the fee; authority comes from the oracle's ed25519 attestation.
    pub relayer: Signer<'info>,

    /// CHECK: instruction sysvar (for ed25519 introspection). Address enforced.
    #[account(address = anchor_lang::solana_program::sysvar::instructions::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
