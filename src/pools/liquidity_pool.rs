//! Native/asset constant-product liquidity pool.
//!
//! A [`LiquidityPool`] owns the reserve pair for one non-native asset
//! against the native unit, plus the share ledger of its liquidity
//! providers.  It is **Empty** while no shares are outstanding and
//! **Active** otherwise.  The first deposit activates it and withdrawing the
//! last share empties it again.
//!
//! # Execution order
//!
//! A pool is bound to the native bank and the asset ledger it was created
//! with, and settles every operation against those two stores only.  The
//! ledger must report the pool's own asset id.
//!
//! Every mutating call runs under a per-pool reentrancy guard and
//! proceeds in this order:
//!
//! 1. validate and compute the post-call state from a copy;
//! 2. pull inbound value from the caller;
//! 3. commit the new state;
//! 4. push outbound value to the caller;
//! 5. emit the event.
//!
//! A failure in step 2 refunds whatever was already pulled.  A failure in
//! step 4 restores the pre-call state and refunds step 2, so each call is
//! all-or-nothing.
//!
//! # Concurrency
//!
//! The guard rejects overlap, it does not queue it.  Two threads calling
//! the same pool at once get [`AmmError::Reentrancy`] on one side, so hosts
//! must serialize mutating calls per pool.  Queries only take the state
//! lock and may run at any time.

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use super::curve;
use super::guard::ReentrancyGuard;
use super::share_ledger::ShareLedger;
use super::{PoolSnapshot, PriceView};
use crate::config::PoolConfig;
use crate::domain::{
    AccountId, Amount, AssetId, Deposit, FeeTier, ShareToken, Shares, Side, SpotPrices,
    SwapDirection, SwapResult, Withdrawal,
};
use crate::error::AmmError;
use crate::events::PoolEvent;
use crate::math::CheckedArithmetic;
use crate::traits::{
    AssetLedger, EventSink, NativeBank, Settlement, SharedAssetLedger, SharedNativeBank,
};

/// Domain separator for pool address derivation.
const POOL_ADDRESS_DOMAIN: &[u8] = b"QITE_POOL_V1";

/// Deterministic pool address: `blake3("QITE_POOL_V1" ‖ asset_id)`.
///
/// The pool holds its reserves on both ledgers under this account.
#[must_use]
pub fn pool_address(asset_id: &AssetId) -> AccountId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(POOL_ADDRESS_DOMAIN);
    hasher.update(&asset_id.as_bytes());
    AccountId::from_bytes(*hasher.finalize().as_bytes())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct PoolState {
    reserve_native: Amount,
    reserve_asset: Amount,
    shares: ShareLedger,
}

impl PoolState {
    const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::Native => self.reserve_native,
            Side::Asset => self.reserve_asset,
        }
    }

    fn set_reserve(&mut self, side: Side, amount: Amount) {
        match side {
            Side::Native => self.reserve_native = amount,
            Side::Asset => self.reserve_asset = amount,
        }
    }
}

/// The pool's bound stores, viewed as a [`Settlement`].
type BoundSettlement<'a> =
    Settlement<'a, dyn NativeBank + Send + Sync, dyn AssetLedger + Send + Sync>;

/// One value movement between the pool and its counterparty.
#[derive(Debug, Clone, Copy)]
struct Leg {
    side: Side,
    amount: Amount,
}

impl Leg {
    const fn new(side: Side, amount: Amount) -> Self {
        Self { side, amount }
    }
}

/// Reserve pair, share ledger, and swap/deposit/withdraw logic for one
/// asset against the native unit.
///
/// All methods take `&self`; pools are shared as `Arc<LiquidityPool>`
/// handles.  Mutating calls never block: an overlapping call on the same
/// pool fails with [`AmmError::Reentrancy`].  That covers a callback from
/// a ledger mid-operation as well as a second thread, so hosts serialize
/// mutating calls per pool.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use qite_dex::config::PoolConfig;
/// use qite_dex::domain::{AccountId, Amount, AssetId, ShareToken, SwapDirection};
/// use qite_dex::events::NullSink;
/// use qite_dex::ledger::{MemoryAssetLedger, MemoryNativeBank};
/// use qite_dex::pools::LiquidityPool;
///
/// let asset_id = AssetId::from_bytes([1; 32]);
/// let bank = Arc::new(MemoryNativeBank::new());
/// let ledger = Arc::new(MemoryAssetLedger::new(asset_id));
/// let pool = LiquidityPool::new(
///     asset_id,
///     ShareToken::new("Token1", "TK1"),
///     PoolConfig::default(),
///     bank.clone(),
///     ledger.clone(),
///     Arc::new(NullSink),
/// )
/// .expect("valid config");
///
/// let alice = AccountId::from_bytes([2; 32]);
/// bank.deposit(&alice, Amount::new(20_000)).expect("fund");
/// ledger.mint(&alice, Amount::new(100_000)).expect("fund");
/// ledger.approve(&alice, pool.address(), Amount::new(100_000));
///
/// pool.add_liquidity(&alice, Amount::new(100_000), Amount::new(10_000))
///     .expect("deposit");
/// let swap = pool
///     .swap_tokens(&alice, SwapDirection::NativeToAsset, Amount::new(1_000), Amount::new(9_000))
///     .expect("swap");
/// assert_eq!(swap.amount_out(), Amount::new(9_066));
/// ```
pub struct LiquidityPool {
    asset_id: AssetId,
    address: AccountId,
    share_token: ShareToken,
    config: PoolConfig,
    state: Mutex<PoolState>,
    guard: ReentrancyGuard,
    native: SharedNativeBank,
    ledger: SharedAssetLedger,
    events: Arc<dyn EventSink>,
}

/// Collaborators a pool is bound to for its whole life.
struct Bindings {
    native: SharedNativeBank,
    ledger: SharedAssetLedger,
    events: Arc<dyn EventSink>,
}

impl Bindings {
    fn checked(
        asset_id: &AssetId,
        native: SharedNativeBank,
        ledger: SharedAssetLedger,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, AmmError> {
        if ledger.asset_id() != *asset_id {
            warn!(%asset_id, ledger_asset = %ledger.asset_id(), "ledger bound to another asset");
            return Err(AmmError::Validation("asset ledger does not track this pool's asset"));
        }
        Ok(Self {
            native,
            ledger,
            events,
        })
    }
}

impl LiquidityPool {
    /// Creates an Empty pool for `asset_id`, settling against `native`
    /// and `ledger` for its whole life.
    ///
    /// # Errors
    ///
    /// - Propagates [`PoolConfig::validate`] errors.
    /// - [`AmmError::Validation`] if `ledger` keeps a different asset.
    pub fn new(
        asset_id: AssetId,
        share_token: ShareToken,
        config: PoolConfig,
        native: SharedNativeBank,
        ledger: SharedAssetLedger,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, AmmError> {
        config.validate()?;
        let bindings = Bindings::checked(&asset_id, native, ledger, events)?;
        Ok(Self::with_state(asset_id, share_token, config, PoolState::default(), bindings))
    }

    /// Rebuilds a pool from a persisted [`PoolSnapshot`].
    ///
    /// # Errors
    ///
    /// - [`AmmError::CorruptState`] if the snapshot violates any pool
    ///   invariant: an out-of-range fee, reserves inconsistent with the
    ///   share total, duplicate holders, or balances that do not sum to the
    ///   total.
    /// - [`AmmError::Validation`] if `ledger` keeps a different asset.
    pub fn from_snapshot(
        snapshot: PoolSnapshot,
        native: SharedNativeBank,
        ledger: SharedAssetLedger,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, AmmError> {
        let bindings = Bindings::checked(&snapshot.asset_id, native, ledger, events)?;
        let config = snapshot.validated_config()?;
        let shares = ShareLedger::from_balances(&snapshot.share_balances)?;
        if shares.total() != snapshot.total_shares {
            return Err(AmmError::CorruptState("share balances do not sum to total"));
        }
        let state = PoolState {
            reserve_native: snapshot.reserve_native,
            reserve_asset: snapshot.reserve_asset,
            shares,
        };
        Ok(Self::with_state(
            snapshot.asset_id,
            snapshot.share_token,
            config,
            state,
            bindings,
        ))
    }

    fn with_state(
        asset_id: AssetId,
        share_token: ShareToken,
        config: PoolConfig,
        state: PoolState,
        bindings: Bindings,
    ) -> Self {
        Self {
            address: pool_address(&asset_id),
            asset_id,
            share_token,
            config,
            state: Mutex::new(state),
            guard: ReentrancyGuard::default(),
            native: bindings.native,
            ledger: bindings.ledger,
            events: bindings.events,
        }
    }

    /// Captures the current state for persistence.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        let state = self.lock_state();
        PoolSnapshot {
            asset_id: self.asset_id,
            share_token: self.share_token.clone(),
            reserve_native: state.reserve_native,
            reserve_asset: state.reserve_asset,
            total_shares: state.shares.total(),
            fee_bps: self.config.fee_tier().basis_points(),
            deposit_policy: self.config.deposit_policy(),
            share_balances: state.shares.holders(),
        }
    }

    // -- Queries -------------------------------------------------------------

    /// The non-native asset this pool trades.
    #[must_use]
    pub const fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    /// Account holding the pool's reserves.
    #[must_use]
    pub const fn address(&self) -> &AccountId {
        &self.address
    }

    /// Share-token metadata.
    #[must_use]
    pub const fn share_token(&self) -> &ShareToken {
        &self.share_token
    }

    /// The pool's configuration.
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        self.config
    }

    /// The swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }

    /// Current `(reserve_native, reserve_asset)`.
    #[must_use]
    pub fn reserves(&self) -> (Amount, Amount) {
        let state = self.lock_state();
        (state.reserve_native, state.reserve_asset)
    }

    /// Outstanding shares.
    pub fn total_shares(&self) -> Shares {
        self.lock_state().shares.total()
    }

    /// Shares held by `owner`.
    pub fn share_balance_of(&self, owner: &AccountId) -> Shares {
        self.lock_state().shares.balance_of(owner)
    }

    /// `true` while shares are outstanding.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.total_shares().is_zero()
    }

    /// Spot prices `(asset in native, native in asset)` from the current
    /// reserves.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if the pool is Empty.
    pub fn get_token_price(&self) -> Result<SpotPrices, AmmError> {
        let (native, asset) = self.reserves();
        PriceView::from_reserves(native, asset)
    }

    /// Previews [`swap_tokens`](Self::swap_tokens) without moving value.
    ///
    /// # Errors
    ///
    /// Same as `swap_tokens`, minus slippage and ledger errors.
    pub fn quote_swap(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapResult, AmmError> {
        if amount_in.is_zero() {
            return Err(AmmError::Validation("swap input must be non-zero"));
        }
        let state = self.lock_state();
        self.compute_swap(&state, direction, amount_in)
            .map(|(result, _)| result)
    }

    // -- Mutations -----------------------------------------------------------

    /// Deposits liquidity and credits shares to `provider`.
    ///
    /// The first deposit into an Empty pool takes both amounts as offered
    /// and mints `floor(sqrt(asset × native))` shares.  Later deposits are
    /// matched to the current reserve ratio according to the pool's
    /// [`DepositPolicy`](crate::config::DepositPolicy) and mint
    /// `min(asset × T / Ra, native × T / Rn)`.  The provider then pays
    /// `ceil(R × minted / T)` per side, never more than offered, and keeps
    /// the rest.
    ///
    /// The asset leg is drawn with `transfer_from`, so `provider` must
    /// have approved the pool's [`address`](Self::address).
    ///
    /// # Errors
    ///
    /// - [`AmmError::Validation`] if either amount is zero or the deposit
    ///   is too small to mint a share.
    /// - [`AmmError::RatioMismatch`] under the strict policy.
    /// - [`AmmError::InsufficientBalance`] / [`AmmError::InsufficientAllowance`]
    ///   from the ledgers.
    /// - [`AmmError::Reentrancy`] if another operation is in progress.
    pub fn add_liquidity(
        &self,
        provider: &AccountId,
        asset_amount: Amount,
        native_amount: Amount,
    ) -> Result<Deposit, AmmError> {
        let _entered = self.guard.enter()?;
        debug!(pool = %self.address, %provider, %asset_amount, %native_amount, "add_liquidity");
        if asset_amount.is_zero() || native_amount.is_zero() {
            return Err(AmmError::Validation("deposit amounts must be non-zero"));
        }

        let before = self.lock_state().clone();
        let total = before.shares.total();
        let (asset_used, native_used, minted) = if total.is_zero() {
            let minted = curve::bootstrap_shares(asset_amount, native_amount)?;
            (asset_amount, native_amount, minted)
        } else {
            let (asset_used, native_used) = curve::match_deposit(
                self.config.deposit_policy(),
                asset_amount,
                native_amount,
                before.reserve_asset,
                before.reserve_native,
            )
            .inspect_err(|err| warn!(pool = %self.address, %err, "deposit rejected"))?;
            let minted = curve::proportional_shares(
                asset_used,
                native_used,
                before.reserve_asset,
                before.reserve_native,
                total,
            )?;
            let (asset_cost, native_cost) = curve::deposit_cost(
                minted,
                total,
                before.reserve_asset,
                before.reserve_native,
                asset_used,
                native_used,
            )?;
            (asset_cost, native_cost, minted)
        };

        let mut after = before.clone();
        after.reserve_asset = after.reserve_asset.safe_add(&asset_used)?;
        after.reserve_native = after.reserve_native.safe_add(&native_used)?;
        after.shares.mint(provider, minted)?;

        let inbound = [
            Leg::new(Side::Native, native_used),
            Leg::new(Side::Asset, asset_used),
        ];
        self.settle(provider, before, after, &inbound, &[])?;

        self.emit(&PoolEvent::LiquidityAdded {
            pool: self.address,
            provider: *provider,
            native_amount: native_used,
            asset_amount: asset_used,
            shares_minted: minted,
        });
        Ok(Deposit {
            native_amount: native_used,
            asset_amount: asset_used,
            shares_minted: minted,
        })
    }

    /// Burns `shares` from `provider` and pays out the proportional part of
    /// both reserves, rounded down.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Validation`] if `shares` is zero or too small to pay
    ///   out anything.
    /// - [`AmmError::InsufficientShares`] if `provider` holds fewer shares.
    /// - [`AmmError::Reentrancy`] if another operation is in progress.
    pub fn remove_liquidity(
        &self,
        provider: &AccountId,
        shares: Shares,
    ) -> Result<Withdrawal, AmmError> {
        let _entered = self.guard.enter()?;
        debug!(pool = %self.address, %provider, %shares, "remove_liquidity");
        if shares.is_zero() {
            return Err(AmmError::Validation("share amount must be non-zero"));
        }

        let before = self.lock_state().clone();
        if before.shares.balance_of(provider) < shares {
            return Err(AmmError::InsufficientShares);
        }
        let (native_out, asset_out) = curve::withdrawal_amounts(
            shares,
            before.shares.total(),
            before.reserve_native,
            before.reserve_asset,
        )?;

        let mut after = before.clone();
        after.reserve_native = after.reserve_native.safe_sub(&native_out)?;
        after.reserve_asset = after.reserve_asset.safe_sub(&asset_out)?;
        after.shares.burn(provider, shares)?;

        let outbound = [
            Leg::new(Side::Native, native_out),
            Leg::new(Side::Asset, asset_out),
        ];
        self.settle(provider, before, after, &[], &outbound)?;

        self.emit(&PoolEvent::LiquidityRemoved {
            pool: self.address,
            provider: *provider,
            native_amount: native_out,
            asset_amount: asset_out,
            shares_burned: shares,
        });
        Ok(Withdrawal {
            native_amount: native_out,
            asset_amount: asset_out,
            shares_burned: shares,
        })
    }

    /// Swaps `amount_in` of the input side for at least `min_amount_out` of
    /// the output side.
    ///
    /// The whole `amount_in` (fee included) enters the input reserve.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Validation`] if `amount_in` is zero.
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_amount_out`;
    ///   nothing moves.
    /// - [`AmmError::InsufficientLiquidity`] if the pool is Empty or the
    ///   output rounds to zero.
    /// - Ledger errors from settling the input.
    /// - [`AmmError::Reentrancy`] if another operation is in progress.
    pub fn swap_tokens(
        &self,
        trader: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapResult, AmmError> {
        let _entered = self.guard.enter()?;
        debug!(pool = %self.address, %trader, %direction, %amount_in, %min_amount_out, "swap_tokens");
        if amount_in.is_zero() {
            return Err(AmmError::Validation("swap input must be non-zero"));
        }

        let before = self.lock_state().clone();
        let (result, after) = self.compute_swap(&before, direction, amount_in)?;
        if result.amount_out() < min_amount_out {
            warn!(pool = %self.address, amount_out = %result.amount_out(), %min_amount_out, "slippage exceeded");
            return Err(AmmError::SlippageExceeded {
                amount_out: result.amount_out(),
                min_amount_out,
            });
        }

        let inbound = [Leg::new(direction.input(), amount_in)];
        let outbound = [Leg::new(direction.output(), result.amount_out())];
        self.settle(trader, before, after, &inbound, &outbound)?;

        self.emit(&PoolEvent::Swapped {
            pool: self.address,
            trader: *trader,
            direction,
            amount_in,
            amount_out: result.amount_out(),
        });
        Ok(result)
    }

    /// Moves shares between holders.  Reserves and the share total are
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Validation`] if `amount` is zero.
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer shares.
    /// - [`AmmError::Reentrancy`] if another operation is in progress.
    pub fn transfer_shares(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: Shares,
    ) -> Result<(), AmmError> {
        let _entered = self.guard.enter()?;
        debug!(pool = %self.address, %from, %to, %amount, "transfer_shares");
        if amount.is_zero() {
            return Err(AmmError::Validation("share amount must be non-zero"));
        }
        self.lock_state().shares.transfer(from, to, amount)?;
        self.emit(&PoolEvent::SharesTransferred {
            pool: self.address,
            from: *from,
            to: *to,
            amount,
        });
        Ok(())
    }

    // -- Internals -----------------------------------------------------------

    fn lock_state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settlement(&self) -> BoundSettlement<'_> {
        Settlement::new(&*self.native, &*self.ledger)
    }

    fn emit(&self, event: &PoolEvent) {
        info!(pool = %self.address, event = event.event_type(), "pool event");
        self.events.emit(event);
    }

    /// Swap outcome and post-swap state.  Verifies that `k` did not shrink.
    fn compute_swap(
        &self,
        state: &PoolState,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<(SwapResult, PoolState), AmmError> {
        let reserve_in = state.reserve(direction.input());
        let reserve_out = state.reserve(direction.output());
        let (amount_out, fee) =
            curve::swap_output(self.config.fee_tier(), amount_in, reserve_in, reserve_out)?;

        let mut after = state.clone();
        after.set_reserve(direction.input(), reserve_in.safe_add(&amount_in)?);
        after.set_reserve(direction.output(), reserve_out.safe_sub(&amount_out)?);

        let k_before = curve::invariant(state.reserve_native, state.reserve_asset);
        let k_after = curve::invariant(after.reserve_native, after.reserve_asset);
        if k_after < k_before {
            error!(pool = %self.address, %k_before, %k_after, "constant product decreased");
            return Err(AmmError::CorruptState("constant product decreased across swap"));
        }

        let result = SwapResult::new(direction, amount_in, amount_out, fee)?;
        Ok((result, after))
    }

    /// Pulls `inbound`, commits `after`, then pushes `outbound`, unwinding
    /// on failure.  Zero-amount legs are skipped.
    fn settle(
        &self,
        counterparty: &AccountId,
        before: PoolState,
        after: PoolState,
        inbound: &[Leg],
        outbound: &[Leg],
    ) -> Result<(), AmmError> {
        let settlement = self.settlement();
        let inbound: Vec<Leg> = inbound.iter().copied().filter(|l| !l.amount.is_zero()).collect();
        let outbound: Vec<Leg> = outbound.iter().copied().filter(|l| !l.amount.is_zero()).collect();

        for (i, leg) in inbound.iter().enumerate() {
            let pulled = settlement
                .side(leg.side)
                .pull(counterparty, &self.address, leg.amount);
            if let Err(err) = pulled {
                self.refund(&settlement, counterparty, &inbound[..i])?;
                return Err(err);
            }
        }

        *self.lock_state() = after;

        for (i, leg) in outbound.iter().enumerate() {
            let pushed = settlement
                .side(leg.side)
                .push(&self.address, counterparty, leg.amount);
            if let Err(err) = pushed {
                warn!(pool = %self.address, %err, side = %leg.side, "payout failed, rolling back");
                self.unwind(&settlement, counterparty, before, &inbound, &outbound[..i])?;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Reverses a partially settled call: claws back `paid` legs, restores
    /// `before`, and refunds `pulled` legs.
    fn unwind(
        &self,
        settlement: &BoundSettlement<'_>,
        counterparty: &AccountId,
        before: PoolState,
        pulled: &[Leg],
        paid: &[Leg],
    ) -> Result<(), AmmError> {
        for leg in paid {
            settlement
                .side(leg.side)
                .pull(counterparty, &self.address, leg.amount)
                .map_err(|err| {
                    error!(pool = %self.address, %err, side = %leg.side, "could not reclaim payout");
                    AmmError::CorruptState("settlement failed and could not be unwound")
                })?;
        }
        *self.lock_state() = before;
        self.refund(settlement, counterparty, pulled)
    }

    fn refund(
        &self,
        settlement: &BoundSettlement<'_>,
        counterparty: &AccountId,
        legs: &[Leg],
    ) -> Result<(), AmmError> {
        for leg in legs {
            settlement
                .side(leg.side)
                .push(&self.address, counterparty, leg.amount)
                .map_err(|err| {
                    error!(pool = %self.address, %err, side = %leg.side, "refund failed");
                    AmmError::CorruptState("refund of pulled value failed")
                })?;
        }
        Ok(())
    }
}

impl fmt::Debug for LiquidityPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("LiquidityPool")
            .field("asset_id", &self.asset_id)
            .field("address", &self.address)
            .field("share_token", &self.share_token)
            .field("config", &self.config)
            .field("reserve_native", &state.reserve_native)
            .field("reserve_asset", &state.reserve_asset)
            .field("total_shares", &state.shares.total())
            .finish_non_exhaustive()
    }
}
