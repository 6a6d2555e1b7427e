use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::errors::RaffleError;
use crate::round::PrizeTransfer;
use crate::VAULT_SEED;

/// Pays the prize out of the raffle's system-owned vault PDA.
pub struct VaultPayout<'info> {
    pub raffle: Pubkey,
    pub vault: AccountInfo<'info>,
    pub vault_bump: u8,
    pub winner: AccountInfo<'info>,
    pub system_program: AccountInfo<'info>,
}

impl<'info> PrizeTransfer for VaultPayout<'info> {
    fn transfer(&mut self, winner: &Pubkey, lamports: u64) -> Result<()> {
        // the oracle picks the account off-chain; it must be the one we selected
        require_keys_eq!(*self.winner.key, *winner, RaffleError::WinnerAccountMismatch);

        if lamports == 0 {
            return Ok(());
        }

        let ix = system_instruction::transfer(self.vault.key, self.winner.key, lamports);
        let signer_seeds: &[&[u8]] = &[VAULT_SEED, self.raffle.as_ref(), &[self.vault_bump]];

        invoke_signed(
            &ix,
            &[
                self.vault.clone(),
                self.winner.clone(),
                self.system_program.clone(),
            ],
            &[signer_seeds],
        )
        .map_err(|e| {
            msg!("Vault transfer failed: {:?}", e);
            error!(RaffleError::TransferFailed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::assert_raffle_err;

    #[test]
    fn refuses_account_other_than_selected_winner() {
        let raffle = Pubkey::new_unique();
        let system = anchor_lang::solana_program::system_program::ID;

        let vault_key = Pubkey::new_unique();
        let winner_key = Pubkey::new_unique();
        let program_key = system;

        let (mut vault_lamports, mut winner_lamports, mut program_lamports) = (1_000u64, 0u64, 1u64);
        let (mut vault_data, mut winner_data, mut program_data) = ([0u8; 0], [0u8; 0], [0u8; 0]);

        let mut payout = VaultPayout {
            raffle,
            vault: AccountInfo::new(&vault_key, false, true, &mut vault_lamports, &mut vault_data, &system, false, 0),
            vault_bump: 255,
            winner: AccountInfo::new(&winner_key, false, true, &mut winner_lamports, &mut winner_data, &system, false, 0),
            system_program: AccountInfo::new(&program_key, false, false, &mut program_lamports, &mut program_data, &system, true, 0),
        };

        assert_raffle_err(
            payout.transfer(&Pubkey::new_unique(), 500),
            RaffleError::WinnerAccountMismatch,
        );
        // nothing to move, no CPI
        payout.transfer(&winner_key, 0).unwrap();
    }
}
