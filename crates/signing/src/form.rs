use std::sync::Arc;
use std::time::{Duration, Instant};

use studio_session::AccountsStore;
use tracing::debug;

use crate::method::SignMethod;
use crate::signer::{KeeperSigner, SeedSigner};

const JUST_SIGNED_TTL: Duration = Duration::from_secs(4);

/// What a validated sign attempt resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignOutcome {
    /// The collaborator added the signature.
    Signed,
    /// The collaborator reported failure; state is left for the caller.
    Failed,
    /// Validation refused the attempt; no collaborator was invoked.
    Blocked,
}

/// Work a sign attempt hands to a collaborator. `begin_sign` resolves the
/// selected method against the account registry so the async half never
/// needs the form borrowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignRequest {
    Seed {
        tx_json: String,
        seed: String,
        proof_index: usize,
    },
    Keeper {
        tx_json: String,
    },
}

/// State behind the transaction-signing form: the transaction text, the
/// selected sign method and proof slot, the validation error, and the
/// transient flow flags (awaiting external confirmation, just-signed
/// acknowledgment).
pub struct SigningForm {
    pub tx_json: String,
    pub seed: String,
    pub available_proof_indexes: Vec<usize>,
    pub proof_index: usize,
    pub method: SignMethod,
    pub error: Option<String>,
    pub awaiting_confirmation: bool,
    seed_signer: Arc<dyn SeedSigner>,
    keeper: Option<Arc<dyn KeeperSigner>>,
    just_signed_until: Option<Instant>,
}

impl SigningForm {
    pub fn new(seed_signer: Arc<dyn SeedSigner>) -> Self {
        Self {
            tx_json: String::new(),
            seed: String::new(),
            available_proof_indexes: Vec::new(),
            proof_index: 0,
            method: SignMethod::Seed,
            error: None,
            awaiting_confirmation: false,
            seed_signer,
            keeper: None,
            just_signed_until: None,
        }
    }

    /// Attaches the external signer capability detected in the host
    /// environment.
    pub fn with_keeper(mut self, keeper: Arc<dyn KeeperSigner>) -> Self {
        self.keeper = Some(keeper);
        self
    }

    #[must_use]
    pub fn keeper_available(&self) -> bool {
        self.keeper.is_some()
    }

    // --- field updates ---

    pub fn set_tx_json(&mut self, value: &str) {
        self.tx_json = value.to_string();
    }

    pub fn set_seed(&mut self, value: &str) {
        self.seed = value.to_string();
    }

    pub fn set_proof_index(&mut self, index: usize) {
        self.proof_index = index;
    }

    /// Selecting the keeper method is refused while the capability is
    /// absent, mirroring the selector that only offers it when detected.
    pub fn set_method(&mut self, method: SignMethod) -> bool {
        if method == SignMethod::Keeper && self.keeper.is_none() {
            return false;
        }
        self.method = method;
        true
    }

    /// Replaces the candidate proof slots. The current selection is kept
    /// when still valid, otherwise it snaps to the first candidate.
    pub fn set_available_proof_indexes(&mut self, indexes: Vec<usize>) {
        self.available_proof_indexes = indexes;
        if !self.available_proof_indexes.contains(&self.proof_index) {
            self.proof_index = self.available_proof_indexes.first().copied().unwrap_or(0);
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // --- predicates ---

    /// Sign is refused while an error is present, while the typed seed is
    /// the selected source but empty, or while the selected proof slot is
    /// not among the candidates.
    #[must_use]
    pub fn sign_disabled(&self) -> bool {
        if self.error.is_some() {
            return true;
        }
        if self.method == SignMethod::Seed && self.seed.is_empty() {
            return true;
        }
        !self.available_proof_indexes.contains(&self.proof_index)
    }

    /// The proof-slot selector shows an error only when candidates exist
    /// and the selection is not one of them.
    #[must_use]
    pub fn proof_index_invalid(&self) -> bool {
        !self.available_proof_indexes.is_empty()
            && !self.available_proof_indexes.contains(&self.proof_index)
    }

    #[must_use]
    pub fn seed_missing(&self) -> bool {
        self.method == SignMethod::Seed && self.seed.is_empty()
    }

    // --- sign flow ---

    /// Validates the attempt and resolves the selected method into a
    /// [`SignRequest`]. For the keeper method this also raises the waiting
    /// affordance, which stays up until `finish_sign` or `cancel_waiting`.
    pub fn begin_sign(&mut self, accounts: &AccountsStore) -> Result<SignRequest, String> {
        if self.sign_disabled() {
            return Err("signing is disabled".to_string());
        }
        match self.method {
            SignMethod::Seed => Ok(SignRequest::Seed {
                tx_json: self.tx_json.clone(),
                seed: self.seed.clone(),
                proof_index: self.proof_index,
            }),
            SignMethod::Account(index) => {
                let Some(account) = accounts.get(index) else {
                    self.set_error("Selected account no longer exists");
                    return Err("selected account no longer exists".to_string());
                };
                Ok(SignRequest::Seed {
                    tx_json: self.tx_json.clone(),
                    seed: account.seed.clone(),
                    proof_index: self.proof_index,
                })
            }
            SignMethod::Keeper => {
                if self.keeper.is_none() {
                    return Err("external signer is not available".to_string());
                }
                self.awaiting_confirmation = true;
                Ok(SignRequest::Keeper {
                    tx_json: self.tx_json.clone(),
                })
            }
        }
    }

    /// Records the collaborator's verdict: drops the waiting affordance
    /// and, on success, raises the transient just-signed acknowledgment.
    pub fn finish_sign(&mut self, signed: bool, now: Instant) {
        self.awaiting_confirmation = false;
        if signed {
            self.just_signed_until = Some(now + JUST_SIGNED_TTL);
        }
    }

    /// Runs a full sign attempt against the configured collaborators. On
    /// `Blocked` nothing was invoked; on `Failed` no retry is attempted.
    pub async fn sign(&mut self, accounts: &AccountsStore, now: Instant) -> SignOutcome {
        let request = match self.begin_sign(accounts) {
            Ok(request) => request,
            Err(reason) => {
                debug!(%reason, "sign attempt blocked");
                return SignOutcome::Blocked;
            }
        };
        let signed = match &request {
            SignRequest::Seed {
                tx_json,
                seed,
                proof_index,
            } => {
                self.seed_signer
                    .clone()
                    .sign(tx_json, seed, *proof_index)
                    .await
            }
            SignRequest::Keeper { tx_json } => match self.keeper.clone() {
                Some(keeper) => {
                    debug!("awaiting external signer confirmation");
                    keeper.sign(tx_json).await
                }
                None => false,
            },
        };
        self.finish_sign(signed, now);
        if signed {
            SignOutcome::Signed
        } else {
            SignOutcome::Failed
        }
    }

    /// Dismisses the waiting affordance. The in-flight operation is not
    /// aborted; a late verdict still lands through `finish_sign`.
    pub fn cancel_waiting(&mut self) {
        self.awaiting_confirmation = false;
    }

    // --- just-signed acknowledgment ---

    #[must_use]
    pub fn just_signed(&self, now: Instant) -> bool {
        self.just_signed_until.is_some_and(|until| until > now)
    }

    /// Blur or a second click dismisses the acknowledgment immediately.
    pub fn clear_just_signed(&mut self) {
        self.just_signed_until = None;
    }

    /// Housekeeping tick; returns whether anything expired.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.just_signed_until.is_some_and(|until| until <= now) {
            self.just_signed_until = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use async_trait::async_trait;
    use studio_session::{Account, AccountsStore};

    use super::{SignOutcome, SignRequest, SigningForm};
    use crate::method::SignMethod;
    use crate::signer::{KeeperSigner, SeedSigner};

    struct StubSigner {
        result: bool,
        calls: AtomicUsize,
    }

    impl StubSigner {
        fn succeeding() -> Arc<Self> {
            Arc::new(Self {
                result: true,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                result: false,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SeedSigner for StubSigner {
        async fn sign(&self, _tx_json: &str, _seed: &str, _proof_index: usize) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
        }
    }

    struct StubKeeper {
        result: bool,
    }

    #[async_trait]
    impl KeeperSigner for StubKeeper {
        async fn sign(&self, _tx_json: &str) -> bool {
            self.result
        }
    }

    fn accounts() -> AccountsStore {
        let mut store = AccountsStore::default();
        store.add(Account {
            label: "Account 1".to_string(),
            seed: "stored seed phrase".to_string(),
            default: true,
        });
        store
    }

    fn form(signer: Arc<StubSigner>) -> SigningForm {
        let mut form = SigningForm::new(signer);
        form.set_tx_json("{\"type\": 4}");
        form.set_available_proof_indexes(vec![0, 1]);
        form
    }

    #[test]
    fn empty_seed_without_an_account_disables_signing() {
        let mut form = form(StubSigner::succeeding());
        form.set_method(SignMethod::from_account_selector(-1));

        assert!(form.sign_disabled());
        assert!(form.seed_missing());

        form.set_seed("typed seed phrase");
        assert!(!form.sign_disabled());
    }

    #[test]
    fn a_selected_account_enables_signing_with_an_empty_seed_field() {
        let mut form = form(StubSigner::succeeding());
        form.set_method(SignMethod::from_account_selector(0));

        assert!(!form.sign_disabled());
    }

    #[test]
    fn an_error_or_a_stray_proof_index_disables_signing() {
        let mut form = form(StubSigner::succeeding());
        form.set_method(SignMethod::Account(0));

        form.set_error("tx is not valid json");
        assert!(form.sign_disabled());
        form.clear_error();
        assert!(!form.sign_disabled());

        form.proof_index = 5;
        assert!(form.sign_disabled());
        assert!(form.proof_index_invalid());
    }

    #[test]
    fn an_empty_candidate_list_disables_signing_without_an_error_highlight() {
        let mut form = form(StubSigner::succeeding());
        form.set_method(SignMethod::Account(0));
        form.set_available_proof_indexes(Vec::new());

        assert!(form.sign_disabled());
        assert!(!form.proof_index_invalid());
    }

    #[test]
    fn replacing_candidates_snaps_an_invalidated_selection() {
        let mut form = form(StubSigner::succeeding());
        form.set_proof_index(1);

        form.set_available_proof_indexes(vec![1, 2, 3]);
        assert_eq!(form.proof_index, 1);

        form.set_available_proof_indexes(vec![4, 5]);
        assert_eq!(form.proof_index, 4);
    }

    #[test]
    fn keeper_method_is_refused_while_the_capability_is_absent() {
        let mut form = form(StubSigner::succeeding());
        assert!(!form.keeper_available());
        assert!(!form.set_method(SignMethod::Keeper));
        assert_eq!(form.method, SignMethod::Seed);

        let mut form =
            form.with_keeper(Arc::new(StubKeeper { result: true }));
        assert!(form.keeper_available());
        assert!(form.set_method(SignMethod::Keeper));
    }

    #[test]
    fn begin_sign_resolves_the_selected_account_seed() {
        let mut form = form(StubSigner::succeeding());
        form.set_method(SignMethod::Account(0));

        let request = form.begin_sign(&accounts()).expect("sign request");
        assert_eq!(
            request,
            SignRequest::Seed {
                tx_json: "{\"type\": 4}".to_string(),
                seed: "stored seed phrase".to_string(),
                proof_index: 0,
            }
        );
    }

    #[test]
    fn begin_sign_flags_a_dangling_account_selection() {
        let mut form = form(StubSigner::succeeding());
        form.set_method(SignMethod::Account(9));

        assert!(form.begin_sign(&accounts()).is_err());
        assert!(form.error.is_some());
        assert!(form.sign_disabled());
    }

    #[test]
    fn keeper_begin_raises_the_waiting_affordance_and_cancel_drops_it() {
        let mut form = form(StubSigner::succeeding())
            .with_keeper(Arc::new(StubKeeper { result: true }));
        form.set_method(SignMethod::Keeper);

        let request = form.begin_sign(&accounts()).expect("sign request");
        assert!(matches!(request, SignRequest::Keeper { .. }));
        assert!(form.awaiting_confirmation);

        form.cancel_waiting();
        assert!(!form.awaiting_confirmation);
    }

    #[tokio::test]
    async fn successful_sign_raises_the_transient_acknowledgment() {
        let signer = StubSigner::succeeding();
        let mut form = form(signer.clone());
        form.set_seed("typed seed phrase");

        let now = Instant::now();
        let outcome = form.sign(&accounts(), now).await;

        assert_eq!(outcome, SignOutcome::Signed);
        assert_eq!(signer.calls.load(Ordering::SeqCst), 1);
        assert!(form.just_signed(now));
        assert!(!form.awaiting_confirmation);

        let later = now + Duration::from_secs(5);
        assert!(form.expire(later));
        assert!(!form.just_signed(later));
    }

    #[tokio::test]
    async fn failed_sign_leaves_state_for_the_caller() {
        let signer = StubSigner::failing();
        let mut form = form(signer.clone());
        form.set_seed("typed seed phrase");

        let now = Instant::now();
        let outcome = form.sign(&accounts(), now).await;

        assert_eq!(outcome, SignOutcome::Failed);
        assert_eq!(signer.calls.load(Ordering::SeqCst), 1);
        assert!(!form.just_signed(now));
        assert!(form.error.is_none());
    }

    #[tokio::test]
    async fn blocked_sign_never_invokes_the_collaborator() {
        let signer = StubSigner::succeeding();
        let mut form = form(signer.clone());

        let outcome = form.sign(&accounts(), Instant::now()).await;

        assert_eq!(outcome, SignOutcome::Blocked);
        assert_eq!(signer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn keeper_sign_runs_the_full_flow() {
        let mut form = form(StubSigner::succeeding())
            .with_keeper(Arc::new(StubKeeper { result: true }));
        form.set_method(SignMethod::Keeper);

        let now = Instant::now();
        let outcome = form.sign(&accounts(), now).await;

        assert_eq!(outcome, SignOutcome::Signed);
        assert!(!form.awaiting_confirmation);
        assert!(form.just_signed(now));
    }

    #[test]
    fn acknowledgment_clears_on_blur() {
        let mut form = form(StubSigner::succeeding());
        let now = Instant::now();
        form.finish_sign(true, now);
        assert!(form.just_signed(now));

        form.clear_just_signed();
        assert!(!form.just_signed(now));
        assert!(!form.expire(now + Duration::from_secs(10)));
    }
}
