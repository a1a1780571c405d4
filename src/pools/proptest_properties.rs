//! Property-based tests using `proptest` for pool invariant validation.
//!
//! Covers:
//!
//! 1. **Share conservation**: Σ balances == total shares after any sequence.
//! 2. **k non-decreasing**: `Rn × Ra` never shrinks across a swap.
//! 3. **Ratio preservation**: active deposits keep `Ra / Rn` within one unit.
//! 4. **Round-trip**: add then remove returns at most what was deposited,
//!    and at most one unit less per side.
//! 5. **Share value**: reserve per share moves only by truncation across a
//!    deposit and a withdrawal.
//! 6. **Drain-to-empty**: burning every share zeroes the pool.
//! 7. **Swap reversibility**: native → asset → native never gains value.

use std::sync::Arc;

use primitive_types::U256;
use proptest::prelude::*;

use super::curve::invariant;
use super::LiquidityPool;
use crate::config::{DepositPolicy, PoolConfig};
use crate::domain::{AccountId, Amount, AssetId, BasisPoints, FeeTier, ShareToken, Shares, SwapDirection};
use crate::events::NullSink;
use crate::ledger::{MemoryAssetLedger, MemoryNativeBank};
use crate::traits::{AssetLedger, NativeBank};

const ALICE: AccountId = AccountId::from_bytes([1; 32]);
const BOB: AccountId = AccountId::from_bytes([2; 32]);
const CAROL: AccountId = AccountId::from_bytes([3; 32]);
const FUNDING: u128 = 1 << 100;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

struct World {
    pool: LiquidityPool,
    bank: Arc<MemoryNativeBank>,
    ledger: Arc<MemoryAssetLedger>,
}

impl World {
    fn new(fee_bps: u32, policy: DepositPolicy) -> Self {
        let Ok(config) = PoolConfig::new(FeeTier::new(BasisPoints::new(fee_bps)), policy) else {
            panic!("valid config");
        };
        let asset_id = AssetId::from_bytes([9; 32]);
        let bank = Arc::new(MemoryNativeBank::new());
        let ledger = Arc::new(MemoryAssetLedger::new(asset_id));
        let Ok(pool) = LiquidityPool::new(
            asset_id,
            ShareToken::new("Prop", "PRP"),
            config,
            bank.clone(),
            ledger.clone(),
            Arc::new(NullSink),
        ) else {
            panic!("valid pool");
        };
        let world = Self { pool, bank, ledger };
        for who in [ALICE, BOB, CAROL] {
            let Ok(()) = world.bank.deposit(&who, Amount::new(FUNDING)) else {
                panic!("fund native");
            };
            let Ok(()) = world.ledger.mint(&who, Amount::new(FUNDING)) else {
                panic!("fund asset");
            };
            world.ledger.approve(&who, world.pool.address(), Amount::MAX);
        }
        world
    }

    fn seeded(fee_bps: u32, policy: DepositPolicy, asset: u128, native: u128) -> Self {
        let world = Self::new(fee_bps, policy);
        let Ok(_) = world.add(&ALICE, asset, native) else {
            panic!("seed deposit");
        };
        world
    }

    fn add(
        &self,
        who: &AccountId,
        asset: u128,
        native: u128,
    ) -> Result<crate::domain::Deposit, crate::error::AmmError> {
        self.pool
            .add_liquidity(who, Amount::new(asset), Amount::new(native))
    }

    fn share_sum(&self) -> Option<Shares> {
        self.pool
            .snapshot()
            .share_balances
            .iter()
            .try_fold(Shares::ZERO, |acc, (_, s)| acc.checked_add(s))
    }
}

/// Reserve values in range [10_000, 10^24] (up to a million 18-decimal units).
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=1_000_000_000_000_000_000_000_000u128
}

fn fee_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), Just(5), Just(30), Just(100), 1u32..=1_000]
}

#[derive(Debug, Clone)]
enum Op {
    Add { who: u8, asset: u128, native: u128 },
    Remove { who: u8, permille: u16 },
    Swap { who: u8, native_in: bool, amount: u128 },
    Transfer { from: u8, to: u8, permille: u16 },
}

fn account(who: u8) -> AccountId {
    [ALICE, BOB, CAROL][usize::from(who % 3)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let amount = 1u128..=1_000_000_000_000_000_000_000u128;
    prop_oneof![
        (any::<u8>(), amount.clone(), amount.clone())
            .prop_map(|(who, asset, native)| Op::Add { who, asset, native }),
        (any::<u8>(), 1u16..=1_000).prop_map(|(who, permille)| Op::Remove { who, permille }),
        (any::<u8>(), any::<bool>(), amount)
            .prop_map(|(who, native_in, amount)| Op::Swap { who, native_in, amount }),
        (any::<u8>(), any::<u8>(), 1u16..=1_000)
            .prop_map(|(from, to, permille)| Op::Transfer { from, to, permille }),
    ]
}

fn portion(shares: Shares, permille: u16) -> Shares {
    Shares::new(shares.get() / 1_000 * u128::from(permille))
}

fn wide(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Checks `r0/t0 ≤ r1/t1 ≤ r0/t0 + 1/t1` by cross-multiplying.
fn per_share_within_one(r0: Amount, t0: Shares, r1: Amount, t1: Shares) -> bool {
    let before = wide(r0.get(), t1.get());
    let after = wide(r1.get(), t0.get());
    before <= after && after <= before + U256::from(t0.get())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_share_conservation(
        policy in prop_oneof![Just(DepositPolicy::Trim), Just(DepositPolicy::Strict)],
        ops in proptest::collection::vec(op_strategy(), 1..40),
    ) {
        let world = World::new(30, policy);
        for op in ops {
            // Individual operations may legitimately fail; the invariant
            // must hold regardless.
            match op {
                Op::Add { who, asset, native } => {
                    let _ = world.add(&account(who), asset, native);
                }
                Op::Remove { who, permille } => {
                    let owner = account(who);
                    let amount = portion(world.pool.share_balance_of(&owner), permille);
                    let _ = world.pool.remove_liquidity(&owner, amount);
                }
                Op::Swap { who, native_in, amount } => {
                    let direction = if native_in {
                        SwapDirection::NativeToAsset
                    } else {
                        SwapDirection::AssetToNative
                    };
                    let _ = world.pool.swap_tokens(
                        &account(who), direction, Amount::new(amount), Amount::ZERO,
                    );
                }
                Op::Transfer { from, to, permille } => {
                    let owner = account(from);
                    let amount = portion(world.pool.share_balance_of(&owner), permille);
                    let _ = world.pool.transfer_shares(&owner, &account(to), amount);
                }
            }
            prop_assert_eq!(world.share_sum(), Some(world.pool.total_shares()));
            let (native, asset) = world.pool.reserves();
            let empty = world.pool.total_shares().is_zero();
            prop_assert_eq!(empty, native.is_zero());
            prop_assert_eq!(empty, asset.is_zero());
            prop_assert_eq!(world.ledger.balance_of(world.pool.address()), asset);
            prop_assert_eq!(world.bank.balance_of(world.pool.address()), native);
        }
    }

    #[test]
    fn prop_k_non_decreasing_across_swaps(
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        fee in fee_strategy(),
        swaps in proptest::collection::vec((any::<bool>(), 1u128..=1_000_000_000_000_000_000_000u128), 1..20),
    ) {
        let world = World::seeded(fee, DepositPolicy::Trim, ra, rn);
        for (native_in, amount) in swaps {
            let direction = if native_in {
                SwapDirection::NativeToAsset
            } else {
                SwapDirection::AssetToNative
            };
            let (n0, a0) = world.pool.reserves();
            if world.pool.swap_tokens(&BOB, direction, Amount::new(amount), Amount::ZERO).is_ok() {
                let (n1, a1) = world.pool.reserves();
                prop_assert!(invariant(n1, a1) >= invariant(n0, a0));
            } else {
                prop_assert_eq!(world.pool.reserves(), (n0, a0));
            }
        }
    }

    #[test]
    fn prop_ratio_preserved_on_deposit(
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        asset in reserve_strategy(),
        native in reserve_strategy(),
    ) {
        let world = World::seeded(30, DepositPolicy::Trim, ra, rn);
        let Ok(_) = world.add(&BOB, asset, native) else {
            return Ok(());
        };
        let (n1, a1) = world.pool.reserves();
        // Each side is charged under one unit above its exact share value, so
        // |a1·rn − ra·n1| < max(ra, rn).
        let lhs = invariant(a1, Amount::new(rn));
        let rhs = invariant(Amount::new(ra), n1);
        let diff = if lhs > rhs { lhs - rhs } else { rhs - lhs };
        prop_assert!(diff < invariant(Amount::new(ra.max(rn)), Amount::new(1)));
    }

    #[test]
    fn prop_round_trip_returns_at_most_deposit(
        policy in prop_oneof![Just(DepositPolicy::Trim), Just(DepositPolicy::Strict)],
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        asset in reserve_strategy(),
        native in reserve_strategy(),
    ) {
        let world = World::seeded(30, policy, ra, rn);
        let Ok(deposit) = world.add(&BOB, asset, native) else {
            return Ok(());
        };
        prop_assert!(deposit.asset_amount.get() <= asset);
        prop_assert!(deposit.native_amount.get() <= native);
        let Ok(withdrawal) = world.pool.remove_liquidity(&BOB, deposit.shares_minted) else {
            return Ok(());
        };
        for (paid, returned) in [
            (deposit.native_amount, withdrawal.native_amount),
            (deposit.asset_amount, withdrawal.asset_amount),
        ] {
            prop_assert!(returned <= paid);
            let Some(shortfall) = paid.checked_sub(&returned) else {
                return Err(TestCaseError::fail("withdrawal exceeded deposit"));
            };
            prop_assert!(
                shortfall <= Amount::new(1),
                "lost {} of {} on an immediate withdrawal",
                shortfall, paid
            );
        }
    }

    #[test]
    fn prop_share_value_stable_across_deposit_and_withdrawal(
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        asset in reserve_strategy(),
        native in reserve_strategy(),
    ) {
        let world = World::seeded(30, DepositPolicy::Trim, ra, rn);
        let t0 = world.pool.total_shares();
        let (n0, a0) = world.pool.reserves();
        let Ok(deposit) = world.add(&BOB, asset, native) else {
            return Ok(());
        };
        let t1 = world.pool.total_shares();
        let (n1, a1) = world.pool.reserves();
        prop_assert!(per_share_within_one(n0, t0, n1, t1));
        prop_assert!(per_share_within_one(a0, t0, a1, t1));
        prop_assert!(invariant(n1, a1) >= invariant(n0, a0));

        let Ok(_) = world.pool.remove_liquidity(&BOB, deposit.shares_minted) else {
            return Ok(());
        };
        let t2 = world.pool.total_shares();
        let (n2, a2) = world.pool.reserves();
        prop_assert_eq!(t2, t0);
        prop_assert!(per_share_within_one(n1, t1, n2, t2));
        prop_assert!(per_share_within_one(a1, t1, a2, t2));
        prop_assert!(invariant(n2, a2) <= invariant(n1, a1));
        prop_assert!(invariant(n2, a2) >= invariant(n0, a0));
    }

    #[test]
    fn prop_drain_to_empty(
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        swaps in proptest::collection::vec((any::<bool>(), 1u128..=1_000_000_000_000u128), 0..5),
    ) {
        let world = World::seeded(30, DepositPolicy::Trim, ra, rn);
        for (native_in, amount) in swaps {
            let direction = if native_in {
                SwapDirection::NativeToAsset
            } else {
                SwapDirection::AssetToNative
            };
            let _ = world.pool.swap_tokens(&BOB, direction, Amount::new(amount), Amount::ZERO);
        }
        let all = world.pool.total_shares();
        prop_assert!(world.pool.remove_liquidity(&ALICE, all).is_ok());
        prop_assert_eq!(world.pool.reserves(), (Amount::ZERO, Amount::ZERO));
        prop_assert_eq!(world.pool.total_shares(), Shares::ZERO);
    }

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rn in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let world = World::seeded(fee, DepositPolicy::Trim, ra, rn);
        let swap_in = Amount::new((rn / 1_000).max(1));
        let Ok(there) = world.pool.swap_tokens(&BOB, SwapDirection::NativeToAsset, swap_in, Amount::ZERO) else {
            return Ok(());
        };
        let Ok(back) = world.pool.swap_tokens(&BOB, SwapDirection::AssetToNative, there.amount_out(), Amount::ZERO) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out() <= swap_in,
            "round-trip should lose value: final={} > input={}",
            back.amount_out(), swap_in
        );
    }
}
