//! Custodial wallet behavior: ownership handoff and reclamation.

use std::sync::Arc;

use strongbox_audit::AuditAction;
use strongbox_ledger::{InMemoryBank, InMemoryToken, NativeCurrency, TokenLedger};
use strongbox_treasury::CustodialWallet;
use strongbox_types::{Account, Amount, TokenId, TreasuryError};

struct Fixture {
    owner: Account,
    bank: Arc<InMemoryBank>,
    wallet: CustodialWallet,
}

fn fixture() -> Fixture {
    let owner = Account::new();
    let bank = Arc::new(InMemoryBank::new());
    let wallet = CustodialWallet::new(owner.clone(), bank.clone());
    Fixture {
        owner,
        bank,
        wallet,
    }
}

// ============================================================================
// Ownable ruleset
// ============================================================================

#[tokio::test]
async fn owner_assigns_and_replaces_the_trustee() {
    let f = fixture();
    let (t1, t2) = (Account::new(), Account::new());

    f.wallet.assign_trustee(&f.owner, &t1).await.unwrap();
    assert_eq!(f.wallet.trustee().await, Some(t1));

    f.wallet.assign_trustee(&f.owner, &t2).await.unwrap();
    assert_eq!(f.wallet.trustee().await, Some(t2));
}

#[tokio::test]
async fn rejects_the_zero_account_as_trustee() {
    let f = fixture();
    let result = f.wallet.assign_trustee(&f.owner, &Account::zero()).await;
    assert!(matches!(result, Err(TreasuryError::ZeroAccount)));
}

#[tokio::test]
async fn trustee_sets_a_new_owner() {
    let f = fixture();
    let trustee = Account::new();
    let next_owner = Account::new();

    f.wallet.assign_trustee(&f.owner, &trustee).await.unwrap();

    // A non-trustee cannot reassign
    assert!(matches!(
        f.wallet.reassign_owner(&f.owner, &next_owner).await,
        Err(TreasuryError::TrusteeRequired { .. })
    ));

    f.wallet
        .reassign_owner(&trustee, &next_owner)
        .await
        .unwrap();
    assert_eq!(f.wallet.owner().await, next_owner);

    // Trustee authority expired with the handoff
    assert!(matches!(
        f.wallet.reassign_owner(&trustee, &Account::new()).await,
        Err(TreasuryError::TrusteeRequired { .. })
    ));
}

// ============================================================================
// Reclaim ruleset
// ============================================================================

#[tokio::test]
async fn owner_recovers_accidentally_sent_tokens() {
    let f = fixture();
    let sender = Account::new();
    let token = InMemoryToken::new(TokenId::new(), sender.clone(), Amount::new(1_000));

    token
        .transfer(&sender, f.wallet.account(), Amount::new(1_000))
        .await
        .unwrap();

    // Cannot reclaim while paused
    f.wallet.pause(&f.owner).await.unwrap();
    assert!(matches!(
        f.wallet.reclaim_token(&f.owner, &token).await,
        Err(TreasuryError::Paused)
    ));
    f.wallet.unpause(&f.owner).await.unwrap();

    // Cannot reclaim unless owner
    let next_owner = Account::new();
    assert!(matches!(
        f.wallet.reclaim_token(&next_owner, &token).await,
        Err(TreasuryError::OwnerRequired { .. })
    ));

    // Hand ownership over, then the new owner sweeps the full balance
    f.wallet.assign_trustee(&f.owner, &next_owner).await.unwrap();
    f.wallet
        .reassign_owner(&next_owner, &next_owner)
        .await
        .unwrap();
    f.wallet.reclaim_token(&next_owner, &token).await.unwrap();

    assert_eq!(token.balance_of(&next_owner).await, Amount::new(1_000));
    assert_eq!(token.balance_of(f.wallet.account()).await, Amount::zero());
}

#[tokio::test]
async fn owner_recovers_force_credited_currency() {
    let f = fixture();

    // Currency arrives outside any receive path
    f.bank
        .force_credit(f.wallet.account(), Amount::new(1_000_000))
        .await
        .unwrap();

    f.wallet.pause(&f.owner).await.unwrap();
    assert!(matches!(
        f.wallet.reclaim_currency(&f.owner).await,
        Err(TreasuryError::Paused)
    ));
    f.wallet.unpause(&f.owner).await.unwrap();

    assert!(matches!(
        f.wallet.reclaim_currency(&Account::new()).await,
        Err(TreasuryError::OwnerRequired { .. })
    ));

    let opening = f.bank.balance_of(&f.owner).await;
    f.wallet.reclaim_currency(&f.owner).await.unwrap();

    assert_eq!(
        f.bank.balance_of(f.wallet.account()).await,
        Amount::zero()
    );
    assert_eq!(
        f.bank.balance_of(&f.owner).await,
        opening.checked_add(Amount::new(1_000_000)).unwrap()
    );

    let entries = f.wallet.audit().entries().await;
    assert!(matches!(
        entries.last().unwrap().action,
        AuditAction::CurrencyReclaimed { amount } if amount == Amount::new(1_000_000)
    ));
}

#[tokio::test]
async fn reclaiming_an_empty_wallet_is_a_valid_no_op() {
    let f = fixture();
    let token = InMemoryToken::new(TokenId::new(), Account::new(), Amount::new(10));

    let before = f.wallet.audit().len().await;
    f.wallet.reclaim_token(&f.owner, &token).await.unwrap();
    f.wallet.reclaim_currency(&f.owner).await.unwrap();

    // Nothing moved, nothing recorded
    assert_eq!(f.wallet.audit().len().await, before);
}

#[tokio::test]
async fn wallet_gate_is_admin_controlled() {
    let f = fixture();
    let admins: Vec<Account> = (0..3).map(|_| Account::new()).collect();
    let stranger = Account::new();

    f.wallet.add_many_admins(&f.owner, &admins).await.unwrap();

    assert!(matches!(
        f.wallet.pause(&stranger).await,
        Err(TreasuryError::AdminRequired { .. })
    ));

    f.wallet.pause(&admins[0]).await.unwrap();
    assert!(f.wallet.is_paused().await);

    f.wallet.remove_admin(&f.owner, &admins[0]).await.unwrap();
    assert!(matches!(
        f.wallet.unpause(&admins[0]).await,
        Err(TreasuryError::AdminRequired { .. })
    ));
    f.wallet.unpause(&admins[1]).await.unwrap();
    assert!(!f.wallet.is_paused().await);
}
