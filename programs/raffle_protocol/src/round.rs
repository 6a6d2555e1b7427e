use anchor_lang::prelude::*;

use crate::{
    constants::MAX_PLAYERS,
    errors::RaffleError,
    oracle::{RandomWordsRequest, RandomnessCoordinator},
    state::{Raffle, RaffleState, UpkeepCheck},
    utils::select_winner_index,
};

/// Moves the prize out of custody.
pub trait PrizeTransfer {
    fn transfer(&mut self, winner: &Pubkey, lamports: u64) -> Result<()>;
}

/// A settled round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payout {
    pub winner: Pubkey,
    pub amount: u64,
    pub request_id: u64,
    pub round: u64,
}

impl Raffle {
    pub fn raffle_state(&self) -> RaffleState {
        self.status
    }

    pub fn entrance_fee(&self) -> u64 {
        self.entrance_fee
    }

    pub fn interval(&self) -> i64 {
        self.interval
    }

    /// Start of the current round.
    pub fn last_timestamp(&self) -> i64 {
        self.last_timestamp
    }

    pub fn number_of_players(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn player(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.players.get(i))
            .copied()
            .ok_or_else(|| error!(RaffleError::PlayerIndexOutOfBounds))
    }

    fn ensure_unlocked(&self) -> Result<()> {
        require!(!self.payout_locked, RaffleError::PayoutInProgress);
        Ok(())
    }

    // -------------------------
    // Entries
    // -------------------------

    /// Appends one entry and returns its index.
    pub fn record_entry(&mut self, player: Pubkey, amount: u64) -> Result<u64> {
        self.ensure_unlocked()?;
        require!(self.status == RaffleState::Open, RaffleError::RaffleNotOpen);
        require!(amount >= self.entrance_fee, RaffleError::SendMoreToEnterRaffle);
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RaffleFull);

        self.pot_lamports = self
            .pot_lamports
            .checked_add(amount)
            .ok_or_else(|| error!(RaffleError::MathOverflow))?;
        self.players.push(player);

        Ok(self.number_of_players() - 1)
    }

    // -------------------------
    // Upkeep
    // -------------------------

    pub fn check_upkeep(&self, now: i64) -> UpkeepCheck {
        let is_open = self.status == RaffleState::Open;
        let time_passed = now.saturating_sub(self.last_timestamp) >= self.interval;
        let has_players = !self.players.is_empty();
        let has_balance = self.pot_lamports > 0;

        UpkeepCheck {
            upkeep_needed: is_open && time_passed && has_players && has_balance,
            is_open,
            time_passed,
            has_players,
            has_balance,
            perform_data: Vec::new(),
        }
    }

    /// Closes entries and asks the coordinator for randomness.
    pub fn perform_upkeep<C: RandomnessCoordinator>(
        &mut self,
        consumer: Pubkey,
        now: i64,
        coordinator: &mut C,
    ) -> Result<u64> {
        self.ensure_unlocked()?;

        let check = self.check_upkeep(now);
        if !check.upkeep_needed {
            msg!(
                "Upkeep not needed: balance={} players={} open={} time_passed={}",
                self.pot_lamports,
                self.players.len(),
                check.is_open,
                check.time_passed
            );
            return err!(RaffleError::UpkeepNotNeeded);
        }

        let request = RandomWordsRequest::new(consumer, &self.vrf, now);
        let request_id = coordinator.request_random_words(&request)?;

        self.status = RaffleState::Calculating;
        self.pending_request_id = Some(request_id);

        msg!("Round {} calculating, request {}", self.round, request_id);
        Ok(request_id)
    }

    // -------------------------
    // Fulfillment
    // -------------------------

    /// Winner for `random_words` under the current entry list.
    pub fn select_winner(&self, random_words: &[u64]) -> Result<Pubkey> {
        require!(
            random_words.len() == self.vrf.num_words as usize,
            RaffleError::InvalidRandomWords
        );
        let word = *random_words
            .first()
            .ok_or_else(|| error!(RaffleError::InvalidRandomWords))?;
        let index = select_winner_index(word, self.players.len())
            .ok_or_else(|| error!(RaffleError::PlayerIndexOutOfBounds))?;

        Ok(self.players[index])
    }

    /// Consumes the pending request, records the winner and pays the pot.
    ///
    /// `caller` is the key that authorised the fulfillment: the oracle signer,
    /// or the oracle key recovered from an ed25519 attestation.
    pub fn fulfill_random_words<C: RandomnessCoordinator, T: PrizeTransfer>(
        &mut self,
        caller: &Pubkey,
        request_id: u64,
        random_words: &[u64],
        now: i64,
        coordinator: &mut C,
        transfer: &mut T,
    ) -> Result<Payout> {
        self.ensure_unlocked()?;
        require_keys_eq!(*caller, self.vrf.oracle, RaffleError::Unauthorized);
        require!(
            self.status == RaffleState::Calculating,
            RaffleError::RaffleNotCalculating
        );
        require!(
            self.pending_request_id == Some(request_id),
            RaffleError::Unauthorized
        );

        let winner = self.select_winner(random_words)?;
        coordinator.consume_request(request_id)?;

        self.recent_winner = Some(winner);
        self.pending_request_id = None;

        let round = self.round;
        let amount = self.pay_winner(winner, now, transfer)?;

        Ok(Payout {
            winner,
            amount,
            request_id,
            round,
        })
    }

    // -------------------------
    // Payout
    // -------------------------

    /// Pays the whole pot to `winner` and reopens the raffle.
    ///
    /// Entries and pot are taken out of the account before the transfer runs
    /// and the guard is held for its duration. A failed transfer puts them
    /// back and leaves the raffle CALCULATING with the winner recorded.
    fn pay_winner<T: PrizeTransfer>(
        &mut self,
        winner: Pubkey,
        now: i64,
        transfer: &mut T,
    ) -> Result<u64> {
        let next_round = self
            .round
            .checked_add(1)
            .ok_or_else(|| error!(RaffleError::MathOverflow))?;

        let entrants = std::mem::take(&mut self.players);
        let amount = std::mem::take(&mut self.pot_lamports);
        // in-memory only; the account is not written back before the CPI
        self.payout_locked = true;

        let sent = transfer.transfer(&winner, amount);
        self.payout_locked = false;

        if let Err(e) = sent {
            msg!("Prize transfer of {} lamports to {} failed", amount, winner);
            self.players = entrants;
            self.pot_lamports = amount;
            return Err(e);
        }

        self.last_timestamp = now;
        self.status = RaffleState::Open;
        self.round = next_round;

        msg!("Round {} paid {} lamports to {}", next_round - 1, amount, winner);
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::mock::MockCoordinator;
    use crate::tests::{assert_raffle_err, raffle_fixture, RecordingTransfer, FEE, INTERVAL, START};

    fn open_with_entries(n: usize) -> Raffle {
        let mut raffle = raffle_fixture();
        for _ in 0..n {
            raffle.record_entry(Pubkey::new_unique(), FEE).unwrap();
        }
        raffle
    }

    fn calculating(n: usize) -> (Raffle, MockCoordinator, u64) {
        let mut raffle = open_with_entries(n);
        let mut coordinator = MockCoordinator::default();
        let id = raffle
            .perform_upkeep(Pubkey::new_unique(), START + INTERVAL + 1, &mut coordinator)
            .unwrap();
        (raffle, coordinator, id)
    }

    // ----- entries -----

    #[test]
    fn entry_below_fee_is_rejected_without_mutation() {
        let mut raffle = raffle_fixture();
        for amount in [0, 1, FEE - 1] {
            assert_raffle_err(
                raffle.record_entry(Pubkey::new_unique(), amount),
                RaffleError::SendMoreToEnterRaffle,
            );
        }
        assert!(raffle.players.is_empty());
        assert_eq!(raffle.pot_lamports, 0);
    }

    #[test]
    fn entry_at_or_above_fee_appends_one_slot() {
        let mut raffle = raffle_fixture();
        let alice = Pubkey::new_unique();

        assert_eq!(raffle.record_entry(alice, FEE).unwrap(), 0);
        assert_eq!(raffle.record_entry(alice, FEE * 3).unwrap(), 1);

        assert_eq!(raffle.players, vec![alice, alice]);
        assert_eq!(raffle.pot_lamports, FEE * 4);
        assert_eq!(raffle.number_of_players(), 2);
    }

    #[test]
    fn entry_while_calculating_is_rejected_for_any_amount() {
        let (mut raffle, _, _) = calculating(1);
        for amount in [0, FEE, FEE * 100] {
            assert_raffle_err(
                raffle.record_entry(Pubkey::new_unique(), amount),
                RaffleError::RaffleNotOpen,
            );
        }
        assert_eq!(raffle.number_of_players(), 1);
    }

    #[test]
    fn entry_rejected_when_full() {
        let mut raffle = open_with_entries(MAX_PLAYERS);
        assert_raffle_err(
            raffle.record_entry(Pubkey::new_unique(), FEE),
            RaffleError::RaffleFull,
        );
    }

    #[test]
    fn entry_rejected_while_payout_guard_held() {
        let mut raffle = raffle_fixture();
        raffle.payout_locked = true;
        assert_raffle_err(
            raffle.record_entry(Pubkey::new_unique(), FEE),
            RaffleError::PayoutInProgress,
        );
    }

    #[test]
    fn config_queries_hold_across_a_round() {
        let (mut raffle, mut coordinator, id) = calculating(2);
        let oracle = raffle.vrf.oracle;
        let mut transfer = RecordingTransfer::default();

        assert_eq!(raffle.entrance_fee(), FEE);
        assert_eq!(raffle.interval(), INTERVAL);
        assert_eq!(raffle.last_timestamp(), START);

        raffle
            .fulfill_random_words(&oracle, id, &[1], START + 77, &mut coordinator, &mut transfer)
            .unwrap();

        assert_eq!(raffle.entrance_fee(), FEE);
        assert_eq!(raffle.interval(), INTERVAL);
        assert_eq!(raffle.last_timestamp(), START + 77);
    }

    #[test]
    fn player_lookup_is_bounds_checked() {
        let raffle = open_with_entries(2);
        assert!(raffle.player(1).is_ok());
        assert_raffle_err(raffle.player(2), RaffleError::PlayerIndexOutOfBounds);
        assert_raffle_err(raffle.player(u64::MAX), RaffleError::PlayerIndexOutOfBounds);
    }

    // ----- upkeep gate -----

    #[test]
    fn upkeep_false_without_players_whatever_the_time() {
        let raffle = raffle_fixture();
        for elapsed in [0, INTERVAL, INTERVAL * 1_000] {
            let check = raffle.check_upkeep(START + elapsed);
            assert!(!check.upkeep_needed);
            assert!(!check.has_players);
            assert!(!check.has_balance);
        }
    }

    #[test]
    fn upkeep_false_before_interval() {
        let raffle = open_with_entries(1);
        let check = raffle.check_upkeep(START + INTERVAL - 10);
        assert!(!check.upkeep_needed);
        assert!(!check.time_passed);
        assert!(check.is_open && check.has_players && check.has_balance);
    }

    #[test]
    fn upkeep_true_at_exact_interval() {
        let raffle = open_with_entries(1);
        assert!(raffle.check_upkeep(START + INTERVAL).upkeep_needed);
    }

    #[test]
    fn upkeep_false_while_calculating() {
        let (raffle, _, _) = calculating(1);
        let check = raffle.check_upkeep(START + INTERVAL * 10);
        assert!(!check.upkeep_needed);
        assert!(!check.is_open);
    }

    #[test]
    fn upkeep_false_without_balance() {
        let mut raffle = open_with_entries(1);
        raffle.pot_lamports = 0;
        let check = raffle.check_upkeep(START + INTERVAL + 1);
        assert!(!check.upkeep_needed);
        assert!(check.has_players && !check.has_balance);
    }

    #[test]
    fn upkeep_is_the_conjunction_of_all_flags() {
        for mask in 0u8..16 {
            let open = mask & 1 != 0;
            let time = mask & 2 != 0;
            let players = mask & 4 != 0;
            let balance = mask & 8 != 0;

            let mut raffle = open_with_entries(1);
            if !open {
                raffle.status = RaffleState::Calculating;
            }
            if !players {
                raffle.players.clear();
            }
            if !balance {
                raffle.pot_lamports = 0;
            }
            let now = if time { START + INTERVAL } else { START + INTERVAL - 1 };

            let check = raffle.check_upkeep(now);
            assert_eq!(
                check.upkeep_needed,
                open && time && players && balance,
                "mask {mask:04b}"
            );
        }
    }

    #[test]
    fn check_upkeep_does_not_mutate() {
        let raffle = open_with_entries(2);
        let before = (raffle.players.clone(), raffle.pot_lamports, raffle.status, raffle.last_timestamp);
        let _ = raffle.check_upkeep(START + INTERVAL + 1);
        assert_eq!(before, (raffle.players.clone(), raffle.pot_lamports, raffle.status, raffle.last_timestamp));
    }

    // ----- perform upkeep -----

    #[test]
    fn perform_upkeep_fails_when_gate_closed() {
        let mut raffle = open_with_entries(1);
        let mut coordinator = MockCoordinator::default();

        assert_raffle_err(
            raffle.perform_upkeep(Pubkey::new_unique(), START + 1, &mut coordinator),
            RaffleError::UpkeepNotNeeded,
        );
        assert_eq!(raffle.status, RaffleState::Open);
        assert_eq!(raffle.pending_request_id, None);
        assert!(coordinator.requests.is_empty());
    }

    #[test]
    fn perform_upkeep_requests_once_and_calculates() {
        let (raffle, coordinator, id) = calculating(2);

        assert_eq!(raffle.status, RaffleState::Calculating);
        assert_eq!(raffle.pending_request_id, Some(id));
        assert_eq!(coordinator.requests.len(), 1);

        let (issued, request) = &coordinator.requests[0];
        assert_eq!(*issued, id);
        assert_eq!(request.num_words, raffle.vrf.num_words);
        assert_eq!(request.key_hash, raffle.vrf.key_hash);
        assert_eq!(request.subscription_id, raffle.vrf.subscription_id);
    }

    #[test]
    fn perform_upkeep_twice_fails_second_time() {
        let (mut raffle, mut coordinator, id) = calculating(1);

        assert_raffle_err(
            raffle.perform_upkeep(Pubkey::new_unique(), START + INTERVAL + 2, &mut coordinator),
            RaffleError::UpkeepNotNeeded,
        );
        assert_eq!(raffle.pending_request_id, Some(id));
        assert_eq!(coordinator.requests.len(), 1);
    }

    // ----- fulfillment -----

    #[test]
    fn fulfillment_by_stranger_is_unauthorized() {
        let (mut raffle, mut coordinator, id) = calculating(1);
        let mut transfer = RecordingTransfer::default();

        assert_raffle_err(
            raffle.fulfill_random_words(
                &Pubkey::new_unique(),
                id,
                &[5],
                START + 100,
                &mut coordinator,
                &mut transfer,
            ),
            RaffleError::Unauthorized,
        );
        assert_eq!(raffle.status, RaffleState::Calculating);
        assert!(transfer.sent.is_empty());
    }

    #[test]
    fn fulfillment_with_wrong_id_fails() {
        let (mut raffle, mut coordinator, id) = calculating(1);
        let oracle = raffle.vrf.oracle;
        let mut transfer = RecordingTransfer::default();

        for bad in [0, id + 1, u64::MAX] {
            assert_raffle_err(
                raffle.fulfill_random_words(&oracle, bad, &[5], START + 100, &mut coordinator, &mut transfer),
                RaffleError::Unauthorized,
            );
        }
        assert_eq!(raffle.pending_request_id, Some(id));
        assert_eq!(coordinator.pending, Some(id));
    }

    #[test]
    fn fulfillment_before_any_request_fails() {
        let mut raffle = open_with_entries(1);
        let oracle = raffle.vrf.oracle;
        let mut coordinator = MockCoordinator::default();
        let mut transfer = RecordingTransfer::default();

        assert_raffle_err(
            raffle.fulfill_random_words(&oracle, 1, &[5], START + 100, &mut coordinator, &mut transfer),
            RaffleError::RaffleNotCalculating,
        );
    }

    #[test]
    fn fulfillment_with_wrong_word_count_fails() {
        let (mut raffle, mut coordinator, id) = calculating(1);
        let oracle = raffle.vrf.oracle;
        let mut transfer = RecordingTransfer::default();

        for words in [&[][..], &[1, 2][..]] {
            assert_raffle_err(
                raffle.fulfill_random_words(&oracle, id, words, START + 100, &mut coordinator, &mut transfer),
                RaffleError::InvalidRandomWords,
            );
        }
        assert_eq!(coordinator.pending, Some(id));
    }

    #[test]
    fn replayed_fulfillment_fails() {
        let (mut raffle, mut coordinator, id) = calculating(1);
        let oracle = raffle.vrf.oracle;
        let mut transfer = RecordingTransfer::default();

        raffle
            .fulfill_random_words(&oracle, id, &[5], START + 100, &mut coordinator, &mut transfer)
            .unwrap();
        assert_raffle_err(
            raffle.fulfill_random_words(&oracle, id, &[5], START + 101, &mut coordinator, &mut transfer),
            RaffleError::RaffleNotCalculating,
        );
        assert_eq!(transfer.sent.len(), 1);
    }

    #[test]
    fn coordinator_tracking_rejects_request_it_never_issued() {
        let (mut raffle, _, id) = calculating(1);
        let oracle = raffle.vrf.oracle;
        // a fresh coordinator has no record of `id`
        let mut stranger_coordinator = MockCoordinator::default();
        let mut transfer = RecordingTransfer::default();

        assert_raffle_err(
            raffle.fulfill_random_words(&oracle, id, &[5], START + 100, &mut stranger_coordinator, &mut transfer),
            RaffleError::UnknownRequest,
        );
        assert_eq!(raffle.pending_request_id, Some(id));
        assert_eq!(raffle.recent_winner, None);
    }

    #[test]
    fn fulfillment_picks_word_mod_entries_and_resets() {
        let (mut raffle, mut coordinator, id) = calculating(4);
        let oracle = raffle.vrf.oracle;
        let expected = raffle.players[7 % 4];
        let mut transfer = RecordingTransfer::default();

        let payout = raffle
            .fulfill_random_words(&oracle, id, &[7], START + 500, &mut coordinator, &mut transfer)
            .unwrap();

        assert_eq!(payout.winner, expected);
        assert_eq!(payout.amount, FEE * 4);
        assert_eq!(payout.request_id, id);
        assert_eq!(payout.round, 0);

        assert_eq!(transfer.sent, vec![(expected, FEE * 4)]);
        assert_eq!(raffle.recent_winner, Some(expected));
        assert_eq!(raffle.status, RaffleState::Open);
        assert_eq!(raffle.pending_request_id, None);
        assert!(raffle.players.is_empty());
        assert_eq!(raffle.pot_lamports, 0);
        assert_eq!(raffle.last_timestamp, START + 500);
        assert_eq!(raffle.round, 1);
        assert!(!raffle.payout_locked);
    }

    #[test]
    fn select_winner_is_deterministic() {
        let raffle = open_with_entries(9);
        let first = raffle.select_winner(&[123_456_789]).unwrap();
        for _ in 0..50 {
            assert_eq!(raffle.select_winner(&[123_456_789]).unwrap(), first);
        }
        assert_eq!(first, raffle.players[(123_456_789 % 9) as usize]);
    }

    // ----- payout -----

    #[test]
    fn rejected_transfer_leaves_round_calculating_with_winner_recorded() {
        let (mut raffle, mut coordinator, id) = calculating(3);
        let oracle = raffle.vrf.oracle;
        let players = raffle.players.clone();
        let mut transfer = RecordingTransfer::rejecting();

        assert_raffle_err(
            raffle.fulfill_random_words(&oracle, id, &[4], START + 500, &mut coordinator, &mut transfer),
            RaffleError::TransferFailed,
        );

        assert_eq!(raffle.status, RaffleState::Calculating);
        assert_eq!(raffle.recent_winner, Some(players[1]));
        assert_eq!(raffle.pending_request_id, None);
        assert_eq!(raffle.players, players);
        assert_eq!(raffle.pot_lamports, FEE * 3);
        assert_eq!(raffle.last_timestamp, START);
        assert_eq!(raffle.round, 0);
        assert!(!raffle.payout_locked);
        assert!(transfer.sent.is_empty());

        // stuck: no new request can be raised and entries stay closed
        assert!(!raffle.check_upkeep(START + INTERVAL * 100).upkeep_needed);
        assert_raffle_err(
            raffle.record_entry(Pubkey::new_unique(), FEE),
            RaffleError::RaffleNotOpen,
        );
    }

    #[test]
    fn fulfillment_rejected_while_payout_guard_held() {
        let (mut raffle, mut coordinator, id) = calculating(1);
        let oracle = raffle.vrf.oracle;
        raffle.payout_locked = true;
        let mut transfer = RecordingTransfer::default();

        assert_raffle_err(
            raffle.fulfill_random_words(&oracle, id, &[0], START + 500, &mut coordinator, &mut transfer),
            RaffleError::PayoutInProgress,
        );
        assert_raffle_err(
            raffle.perform_upkeep(Pubkey::new_unique(), START + 500, &mut coordinator),
            RaffleError::PayoutInProgress,
        );
    }
}
