use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};

use crate::{
    errors::RaffleError,
    events::WinnerPicked,
    instructions::payout::VaultPayout,
    state::{Raffle, RequestQueue},
    utils::{assert_ed25519_ix_matches, expected_fulfillment_msg},
    FulfillRandomWords, FulfillRandomWordsSigned,
};

fn settle(
    raffle: &mut Raffle,
    queue: &mut RequestQueue,
    caller: &Pubkey,
    request_id: u64,
    random_words: &[u64],
    vault: &mut VaultPayout,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let payout = raffle.fulfill_random_words(caller, request_id, random_words, now, queue, vault)?;

    emit!(WinnerPicked {
        winner: payout.winner,
        amount: payout.amount,
        request_id: payout.request_id,
        round: payout.round,
    });

    Ok(())
}

/// Message the oracle must have signed to fulfil `request_id`.
///
/// Fails before any signature work unless both the raffle and its queue are
/// waiting on that id, so an attestation over an older pre-seed never matches.
pub fn attested_fulfillment_msg(
    program_id: &Pubkey,
    raffle_key: &Pubkey,
    raffle: &Raffle,
    queue: &RequestQueue,
    request_id: u64,
    random_words: &[u64],
) -> Result<Vec<u8>> {
    require!(raffle.vrf.oracle != Pubkey::default(), RaffleError::OracleNotSet);
    require!(
        raffle.pending_request_id == Some(request_id),
        RaffleError::Unauthorized
    );
    // the stored pre-seed only belongs to the pending request
    require!(
        queue.pending_request_id == Some(request_id),
        RaffleError::UnknownRequest
    );

    Ok(expected_fulfillment_msg(
        program_id,
        raffle_key,
        request_id,
        &queue.pending_pre_seed,
        random_words,
    ))
}

/// Oracle delivers the words itself, signing the transaction.
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<u64>,
) -> Result<()> {
    let caller = ctx.accounts.oracle.key();

    let mut vault = VaultPayout {
        raffle: ctx.accounts.raffle.key(),
        vault: ctx.accounts.vault.to_account_info(),
        vault_bump: ctx.accounts.raffle.vault_bump,
        winner: ctx.accounts.winner.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
    };

    settle(
        &mut ctx.accounts.raffle,
        &mut ctx.accounts.request_queue,
        &caller,
        request_id,
        &random_words,
        &mut vault,
    )
}

/// Any relayer delivers the words; the oracle's authority comes from an
/// ed25519 verify instruction placed immediately before this one.
pub fn fulfill_random_words_signed(
    ctx: Context<FulfillRandomWordsSigned>,
    request_id: u64,
    random_words: Vec<u64>,
) -> Result<()> {
    let raffle_key = ctx.accounts.raffle.key();
    let oracle = ctx.accounts.raffle.vrf.oracle;

    let expected = attested_fulfillment_msg(
        ctx.program_id,
        &raffle_key,
        &ctx.accounts.raffle,
        &ctx.accounts.request_queue,
        request_id,
        &random_words,
    )?;

    let ix_sys = ctx.accounts.instructions.to_account_info();
    let current_ix = load_current_index_checked(&ix_sys)? as usize;
    require!(current_ix >= 1, RaffleError::MissingOrInvalidEd25519Ix);

    let ed_ix = load_instruction_at_checked(current_ix - 1, &ix_sys)
        .map_err(|_| error!(RaffleError::MissingOrInvalidEd25519Ix))?;

    assert_ed25519_ix_matches(&ed_ix, &oracle, expected.as_slice())?;

    let mut vault = VaultPayout {
        raffle: raffle_key,
        vault: ctx.accounts.vault.to_account_info(),
        vault_bump: ctx.accounts.raffle.vault_bump,
        winner: ctx.accounts.winner.to_account_info(),
        system_program: ctx.accounts.system_program.to_account_info(),
    };

    settle(
        &mut ctx.accounts.raffle,
        &mut ctx.accounts.request_queue,
        &oracle,
        request_id,
        &random_words,
        &mut vault,
    )
}
