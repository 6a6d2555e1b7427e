use anchor_lang::prelude::*;

use crate::{
    errors::RaffleError,
    state::{RequestQueue, VrfConfig},
    utils::derive_pre_seed,
};

/// Parameters forwarded to the oracle with each request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomWordsRequest {
    pub consumer: Pubkey,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_units: u32,
    pub num_words: u32,
    pub requested_at: i64,
}

impl RandomWordsRequest {
    pub fn new(consumer: Pubkey, vrf: &VrfConfig, requested_at: i64) -> Self {
        Self {
            consumer,
            key_hash: vrf.key_hash,
            subscription_id: vrf.subscription_id,
            request_confirmations: vrf.request_confirmations,
            callback_compute_units: vrf.callback_compute_units,
            num_words: vrf.num_words,
            requested_at,
        }
    }
}

/// The oracle side of the request/fulfill protocol.
///
/// The raffle never talks to a concrete oracle. It asks a coordinator for a
/// request id and later asks it to consume that id, so the production queue
/// and the test mock are interchangeable.
pub trait RandomnessCoordinator {
    /// Registers a request and returns its id.
    fn request_random_words(&mut self, request: &RandomWordsRequest) -> Result<u64>;

    /// Marks `request_id` fulfilled. Fails for ids never issued or already consumed.
    fn consume_request(&mut self, request_id: u64) -> Result<()>;
}

impl RandomnessCoordinator for RequestQueue {
    fn request_random_words(&mut self, request: &RandomWordsRequest) -> Result<u64> {
        require!(
            self.pending_request_id.is_none(),
            RaffleError::RequestAlreadyPending
        );

        let request_id = self.next_request_id;
        self.next_request_id = request_id
            .checked_add(1)
            .ok_or_else(|| error!(RaffleError::MathOverflow))?;

        self.pending_request_id = Some(request_id);
        self.pending_pre_seed = derive_pre_seed(
            &request.key_hash,
            &request.consumer,
            request.subscription_id,
            request_id,
        );
        self.requested_at = request.requested_at;

        Ok(request_id)
    }

    fn consume_request(&mut self, request_id: u64) -> Result<()> {
        require!(
            self.pending_request_id == Some(request_id),
            RaffleError::UnknownRequest
        );

        self.pending_request_id = None;
        self.fulfilled_count = self
            .fulfilled_count
            .checked_add(1)
            .ok_or_else(|| error!(RaffleError::MathOverflow))?;

        Ok(())
    }
}

#[cfg(any(test, feature = "mock-oracle"))]
pub mod mock {
    use super::*;
    use crate::constants::FIRST_REQUEST_ID;

    /// In-memory coordinator for off-chain harnesses.
    #[derive(Debug)]
    pub struct MockCoordinator {
        pub next_request_id: u64,
        pub pending: Option<u64>,
        pub requests: Vec<(u64, RandomWordsRequest)>,
        pub consumed: Vec<u64>,
    }

    impl Default for MockCoordinator {
        fn default() -> Self {
            Self {
                next_request_id: FIRST_REQUEST_ID,
                pending: None,
                requests: Vec::new(),
                consumed: Vec::new(),
            }
        }
    }

    impl RandomnessCoordinator for MockCoordinator {
        fn request_random_words(&mut self, request: &RandomWordsRequest) -> Result<u64> {
            require!(self.pending.is_none(), RaffleError::RequestAlreadyPending);

            let request_id = self.next_request_id;
            self.next_request_id += 1;
            self.pending = Some(request_id);
            self.requests.push((request_id, request.clone()));
            Ok(request_id)
        }

        fn consume_request(&mut self, request_id: u64) -> Result<()> {
            require!(self.pending == Some(request_id), RaffleError::UnknownRequest);
            self.pending = None;
            self.consumed.push(request_id);
            Ok(())
        }
    }
}
