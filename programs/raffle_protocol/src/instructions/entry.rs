use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};

use crate::events::RaffleEntered;
use crate::EnterRaffle;

pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();

    let raffle = &mut ctx.accounts.raffle;
    let entry_index = raffle.record_entry(player, amount)?;
    let round = raffle.round;

    // full payment goes to the vault, not just the fee
    let ix = system_instruction::transfer(&player, &ctx.accounts.vault.key(), amount);
    invoke(
        &ix,
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    emit!(RaffleEntered {
        player,
        amount,
        entry_index,
        round,
    });

    Ok(())
}
