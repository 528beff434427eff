use crate::error::WhitelistHookError;
use crate::registry::{find_role, match_accounts, AccountRole, RecordedAccounts};
use crate::state::WhiteList;
use anchor_lang::prelude::*;

/// Context of a single transfer as seen by the hook.
#[derive(Clone, Copy, Debug)]
pub struct TransferInvocation<'a> {
    pub source: Pubkey,
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    /// Accounts appended after the five base `Execute` accounts, in order.
    pub extra_accounts: &'a [Pubkey],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NotWhitelisted,
}

impl From<RejectReason> for WhitelistHookError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::NotWhitelisted => WhitelistHookError::NotWhitelisted,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected(RejectReason),
}

impl Decision {
    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Approved => Ok(()),
            Decision::Rejected(reason) => Err(WhitelistHookError::from(reason).into()),
        }
    }
}

/// Decides whether a transfer may proceed.
///
/// Implementations read state but never write it. Callers must provide a
/// consistent snapshot of that state for the whole call; on chain the runtime
/// serializes transactions touching the same accounts, so no locking happens here.
/// An `Err` means the invocation itself is malformed.
pub trait TransferAuthorizer {
    fn authorize(&self, invocation: &TransferInvocation) -> Result<Decision>;
}

/// Approves a transfer when its source token account is on the white list.
///
/// The attached accounts are checked against the descriptors recorded for the
/// transfer's mint, and the store is the one that record names.
pub struct SenderAllowList<'a> {
    program_id: Pubkey,
    recorded: &'a RecordedAccounts,
    white_list_key: Pubkey,
    white_list: &'a WhiteList,
}

impl<'a> SenderAllowList<'a> {
    pub fn new(
        program_id: Pubkey,
        recorded: &'a RecordedAccounts,
        white_list_key: Pubkey,
        white_list: &'a WhiteList,
    ) -> Self {
        Self {
            program_id,
            recorded,
            white_list_key,
            white_list,
        }
    }
}

impl TransferAuthorizer for SenderAllowList<'_> {
    fn authorize(&self, invocation: &TransferInvocation) -> Result<Decision> {
        require_keys_eq!(
            invocation.mint,
            self.recorded.mint,
            WhitelistHookError::AccountSetMismatch
        );

        let required = self.recorded.resolve(&self.program_id)?;
        match_accounts(&required, invocation.extra_accounts)?;

        // only the store the registry declared may decide
        let declared = find_role(&required, AccountRole::WhiteList)?;
        require_keys_eq!(
            declared,
            self.white_list_key,
            WhitelistHookError::AccountSetMismatch
        );

        if !self.white_list.is_on || self.white_list.contains(&invocation.source) {
            Ok(Decision::Approved)
        } else {
            Ok(Decision::Rejected(RejectReason::NotWhitelisted))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pda::find_white_list_address;
    use crate::registry::extra_account_metas;
    use spl_tlv_account_resolution::account::ExtraAccountMeta;

    struct Fixture {
        recorded: RecordedAccounts,
        white_list_key: Pubkey,
        white_list: WhiteList,
        admin: Pubkey,
    }

    impl Fixture {
        fn new() -> Self {
            let admin = Pubkey::new_unique();
            let (white_list_key, bump) = find_white_list_address(&crate::ID);
            Self {
                recorded: RecordedAccounts {
                    mint: Pubkey::new_unique(),
                    metas: extra_account_metas(&crate::ID).expect("metas"),
                },
                white_list_key,
                white_list: WhiteList::new(admin, 10, bump).expect("white list"),
                admin,
            }
        }

        fn invocation<'a>(
            &self,
            source: Pubkey,
            extra_accounts: &'a [Pubkey],
        ) -> TransferInvocation<'a> {
            TransferInvocation {
                source,
                mint: self.recorded.mint,
                destination: Pubkey::new_unique(),
                authority: Pubkey::new_unique(),
                amount: 1_000,
                extra_accounts,
            }
        }

        fn policy(&self) -> SenderAllowList<'_> {
            SenderAllowList::new(
                crate::ID,
                &self.recorded,
                self.white_list_key,
                &self.white_list,
            )
        }

        fn decide(&self, source: Pubkey, extra_accounts: &[Pubkey]) -> Result<Decision> {
            self.policy().authorize(&self.invocation(source, extra_accounts))
        }
    }

    #[test]
    fn test_unlisted_sender_rejected_then_accepted_once_listed() {
        let mut fixture = Fixture::new();
        let sender = Pubkey::new_unique();
        let extras = [fixture.white_list_key];

        assert_eq!(
            fixture.decide(sender, &extras).expect("valid invocation"),
            Decision::Rejected(RejectReason::NotWhitelisted)
        );

        let admin = fixture.admin;
        fixture
            .white_list
            .insert(sender, &admin)
            .expect("admin insert");
        assert_eq!(
            fixture.decide(sender, &extras).expect("valid invocation"),
            Decision::Approved
        );
    }

    #[test]
    fn test_destination_listing_does_not_help_sender() {
        let mut fixture = Fixture::new();
        let sender = Pubkey::new_unique();
        let admin = fixture.admin;
        fixture
            .white_list
            .insert(Pubkey::new_unique(), &admin)
            .expect("admin insert");

        let decision = fixture
            .decide(sender, &[fixture.white_list_key])
            .expect("valid invocation");
        assert_eq!(
            decision.into_result().unwrap_err(),
            WhitelistHookError::NotWhitelisted.into()
        );
    }

    #[test]
    fn test_decision_leaves_store_untouched() {
        let mut fixture = Fixture::new();
        let admin = fixture.admin;
        let listed = Pubkey::new_unique();
        fixture.white_list.insert(listed, &admin).expect("insert");
        let snapshot = fixture.white_list.clone();

        for source in [listed, Pubkey::new_unique()] {
            let _ = fixture.decide(source, &[fixture.white_list_key]);
        }
        let _ = fixture.decide(listed, &[Pubkey::new_unique()]);

        assert_eq!(fixture.white_list, snapshot);
    }

    #[test]
    fn test_substituted_store_is_refused() {
        let fixture = Fixture::new();
        let forged = Pubkey::new_unique();

        assert_eq!(
            fixture.decide(Pubkey::new_unique(), &[forged]).unwrap_err(),
            WhitelistHookError::AccountSetMismatch.into()
        );

        // declared key attached, but the handle points elsewhere
        let extras = [fixture.white_list_key];
        let err = SenderAllowList::new(crate::ID, &fixture.recorded, forged, &fixture.white_list)
            .authorize(&fixture.invocation(Pubkey::new_unique(), &extras))
            .unwrap_err();
        assert_eq!(err, WhitelistHookError::AccountSetMismatch.into());
    }

    #[test]
    fn test_store_named_by_record_wins_over_derived_address() {
        let mut fixture = Fixture::new();
        let admin = fixture.admin;
        let sender = Pubkey::new_unique();
        fixture.white_list.insert(sender, &admin).expect("insert");

        // the mint's record names another store than the canonical one
        let recorded_store = Pubkey::new_unique();
        fixture.recorded.metas =
            vec![ExtraAccountMeta::new_with_pubkey(&recorded_store, false, false).expect("meta")];

        let err = fixture
            .decide(sender, &[fixture.white_list_key])
            .unwrap_err();
        assert_eq!(err, WhitelistHookError::AccountSetMismatch.into());

        let err = fixture.decide(sender, &[recorded_store]).unwrap_err();
        assert_eq!(err, WhitelistHookError::AccountSetMismatch.into());
    }

    #[test]
    fn test_record_of_another_mint_is_refused() {
        let fixture = Fixture::new();
        let extras = [fixture.white_list_key];
        let mut invocation = fixture.invocation(Pubkey::new_unique(), &extras);
        invocation.mint = Pubkey::new_unique();

        assert_eq!(
            fixture.policy().authorize(&invocation).unwrap_err(),
            WhitelistHookError::AccountSetMismatch.into()
        );
    }

    #[test]
    fn test_enforcement_off_approves_everyone() {
        let mut fixture = Fixture::new();
        let admin = fixture.admin;
        fixture
            .white_list
            .set_enforcement(false, &admin)
            .expect("toggle");

        assert_eq!(
            fixture
                .decide(Pubkey::new_unique(), &[fixture.white_list_key])
                .expect("valid invocation"),
            Decision::Approved
        );
        // account integrity is still enforced
        assert!(fixture.decide(Pubkey::new_unique(), &[]).is_err());
    }

    #[test]
    fn test_unauthorized_remove_keeps_sender_listed() {
        let mut fixture = Fixture::new();
        let admin = fixture.admin;
        let sender = Pubkey::new_unique();
        fixture.white_list.insert(sender, &admin).expect("insert");

        let stranger = Pubkey::new_unique();
        assert_eq!(
            fixture.white_list.remove(&sender, &stranger).unwrap_err(),
            WhitelistHookError::Unauthorized.into()
        );
        assert!(fixture.white_list.contains(&sender));
        assert_eq!(
            fixture
                .decide(sender, &[fixture.white_list_key])
                .expect("valid invocation"),
            Decision::Approved
        );
    }
}
