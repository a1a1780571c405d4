//! Pool lifecycle walkthrough.
//!
//! Creates a pool through the registry, bootstraps it, swaps in both
//! directions, moves shares, and withdraws everything.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=qite_dex=debug cargo run --example constant_product
//! ```

use std::sync::Arc;

use qite_dex::config::RegistryConfig;
use qite_dex::domain::{AccountId, Amount, AssetId, Shares, SwapDirection};
use qite_dex::events::EventLog;
use qite_dex::ledger::{MemoryAssetLedger, MemoryNativeBank};
use qite_dex::registry::PoolRegistry;
use qite_dex::traits::{AssetLedger, NativeBank};
use tracing_subscriber::EnvFilter;

const E18: u128 = 1_000_000_000_000_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Native / asset constant-product pool ===\n");

    // ── 1. Registry and pool ────────────────────────────────────────────
    let log = Arc::new(EventLog::new());
    let bank = Arc::new(MemoryNativeBank::new());
    let mut registry = PoolRegistry::new(RegistryConfig::default(), bank.clone(), log.clone())?;
    let token1 = AssetId::from_bytes([0x11; 32]);
    let ledger = Arc::new(MemoryAssetLedger::new(token1));
    let pool = registry.create_pool(token1, ledger.clone(), "Token1", "TK1")?;
    println!("Pool for {token1}");
    println!("  address     : {}", pool.address());
    println!("  share token : {}", pool.share_token());
    println!("  fee         : {}\n", pool.fee_tier());

    // ── 2. Balances ─────────────────────────────────────────────────────
    let alice = AccountId::from_bytes([1; 32]);
    let bob = AccountId::from_bytes([2; 32]);
    bank.deposit(&alice, Amount::new(10 * E18))?;
    bank.deposit(&bob, Amount::new(5 * E18))?;
    ledger.mint(&alice, Amount::new(100 * E18))?;
    ledger.approve(&alice, pool.address(), Amount::new(100 * E18));

    // ── 3. Bootstrap ────────────────────────────────────────────────────
    let deposit = pool.add_liquidity(&alice, Amount::new(100 * E18), Amount::new(10 * E18))?;
    println!("Alice bootstraps: {deposit}");
    println!("  price       : {}\n", pool.get_token_price()?);

    // ── 4. Slippage-protected swap ──────────────────────────────────────
    let quote = pool.quote_swap(SwapDirection::NativeToAsset, Amount::new(E18))?;
    println!("Quote 1 native → {} asset", quote.amount_out());
    let tight = Amount::new(9_080_000_000_000_000_000);
    if let Err(err) = pool.swap_tokens(&bob, SwapDirection::NativeToAsset, Amount::new(E18), tight) {
        println!("  min {tight}: {err}");
    }
    let result = pool.swap_tokens(
        &bob,
        SwapDirection::NativeToAsset,
        Amount::new(E18),
        Amount::new(9 * E18),
    )?;
    println!("  min 9e18: received {} (fee {})", result.amount_out(), result.fee());
    let (rn, ra) = pool.reserves();
    println!("  reserves    : native={rn} asset={ra}\n");

    // ── 5. Swap back ────────────────────────────────────────────────────
    let half = Amount::new(result.amount_out().get() / 2);
    ledger.approve(&bob, pool.address(), half);
    let back = pool.swap_tokens(&bob, SwapDirection::AssetToNative, half, Amount::new(1))?;
    println!("Bob sells {half} asset → {} native\n", back.amount_out());

    // ── 6. Shares move, then everything is withdrawn ────────────────────
    let gift = Shares::new(deposit.shares_minted.get() / 4);
    pool.transfer_shares(&alice, &bob, gift)?;
    for who in [alice, bob] {
        let shares = pool.share_balance_of(&who);
        let w = pool.remove_liquidity(&who, shares)?;
        println!("{who} withdraws {w}");
    }
    println!("  pool active : {}\n", pool.is_active());

    println!("Final balances:");
    for (name, who) in [("alice", alice), ("bob", bob)] {
        println!(
            "  {name}: native={} asset={}",
            bank.balance_of(&who),
            ledger.balance_of(&who)
        );
    }

    println!("\nEvents:");
    for event in log.events() {
        println!("  {}", event.event_type());
    }
    Ok(())
}
