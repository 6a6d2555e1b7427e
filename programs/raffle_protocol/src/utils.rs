use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use solana_sha256_hasher::hashv;

use crate::{
    constants::{FULFILL_MSG_DOMAIN, PRE_SEED_DOMAIN},
    errors::RaffleError,
};

// Ed25519SigVerify111111111111111111111111111
pub fn ed25519_program_id() -> Pubkey {
    Pubkey::new_from_array([
        3, 125, 70, 214, 124, 147, 251, 190, 18, 249, 66, 143, 131, 141, 64, 255,
        5, 112, 116, 73, 39, 244, 138, 100, 252, 202, 112, 68, 128, 0, 0, 0,
    ])
}

// -------------------------
// Winner selection
// -------------------------

/// Maps a random word onto the entry list. `None` when there are no entries.
pub fn select_winner_index(random_word: u64, player_count: usize) -> Option<usize> {
    if player_count == 0 {
        return None;
    }
    Some((random_word % player_count as u64) as usize)
}

// -------------------------
// Request pre-seed
// -------------------------

/// Seed the oracle must feed into its VRF for this request.
/// Binds the output to the key, consumer, subscription and request id.
pub fn derive_pre_seed(
    key_hash: &[u8; 32],
    consumer: &Pubkey,
    subscription_id: u64,
    request_id: u64,
) -> [u8; 32] {
    hashv(&[
        PRE_SEED_DOMAIN,
        key_hash.as_ref(),
        consumer.as_ref(),
        subscription_id.to_le_bytes().as_ref(),
        request_id.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

// -------------------------
// Oracle fulfillment message
// -------------------------
pub fn expected_fulfillment_msg(
    program_id: &Pubkey,
    raffle: &Pubkey,
    request_id: u64,
    pre_seed: &[u8; 32],
    random_words: &[u64],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        FULFILL_MSG_DOMAIN.len() + 32 + 32 + 8 + 32 + 8 * random_words.len(),
    );
    out.extend_from_slice(FULFILL_MSG_DOMAIN);
    out.extend_from_slice(program_id.as_ref());
    out.extend_from_slice(raffle.as_ref());
    out.extend_from_slice(&request_id.to_le_bytes());
    out.extend_from_slice(pre_seed);
    for word in random_words {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out
}

// -------------------------
// ed25519 parsing
// -------------------------
pub fn parse_ed25519_ix_pubkey_and_msg(ix: &Instruction) -> Result<(Pubkey, Vec<u8>)> {
    require!(
        ix.program_id == ed25519_program_id(),
        RaffleError::MissingOrInvalidEd25519Ix
    );

    let data = &ix.data;
    require!(data.len() >= 16, RaffleError::MissingOrInvalidEd25519Ix);

    let num_sigs = data[0];
    require!(num_sigs == 1, RaffleError::MissingOrInvalidEd25519Ix);

    // Offsets must point into this same instruction (index == u16::MAX)
    let sig_ix = u16::from_le_bytes([data[4], data[5]]);
    let pk_ix = u16::from_le_bytes([data[8], data[9]]);
    let msg_ix = u16::from_le_bytes([data[14], data[15]]);
    require!(sig_ix == u16::MAX, RaffleError::MissingOrInvalidEd25519Ix);
    require!(pk_ix == u16::MAX, RaffleError::MissingOrInvalidEd25519Ix);
    require!(msg_ix == u16::MAX, RaffleError::MissingOrInvalidEd25519Ix);

    let pk_off = u16::from_le_bytes([data[6], data[7]]) as usize;
    let msg_off = u16::from_le_bytes([data[10], data[11]]) as usize;
    let msg_sz = u16::from_le_bytes([data[12], data[13]]) as usize;

    require!(pk_off + 32 <= data.len(), RaffleError::MissingOrInvalidEd25519Ix);
    require!(msg_off + msg_sz <= data.len(), RaffleError::MissingOrInvalidEd25519Ix);

    let pk_bytes: [u8; 32] = data[pk_off..pk_off + 32]
        .try_into()
        .map_err(|_| error!(RaffleError::MissingOrInvalidEd25519Ix))?;
    let msg = data[msg_off..msg_off + msg_sz].to_vec();

    Ok((Pubkey::new_from_array(pk_bytes), msg))
}

pub fn assert_ed25519_ix_matches(
    ix: &Instruction,
    expected_pubkey: &Pubkey,
    expected_msg: &[u8],
) -> Result<()> {
    let (pk, msg) = parse_ed25519_ix_pubkey_and_msg(ix)?;

    require_keys_eq!(pk, *expected_pubkey, RaffleError::Ed25519PubkeyMismatch);
    require!(msg.as_slice() == expected_msg, RaffleError::Ed25519MessageMismatch);

    Ok(())
}
