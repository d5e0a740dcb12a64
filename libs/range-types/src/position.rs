use soroban_sdk::contracttype;

/// One liquidity provider's ledger entry. The pool has a single price range,
/// so positions are keyed by owner address alone - one position per owner.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    /// Liquidity contributed by this owner
    pub liquidity: u128,
    /// Fee growth snapshot at last settlement (token0)
    pub fee_growth_inside_0_last_x128: u128,
    /// Fee growth snapshot at last settlement (token1)
    pub fee_growth_inside_1_last_x128: u128,
    /// Settled, withdrawable token0 balance
    pub tokens_owed_0: u128,
    /// Settled, withdrawable token1 balance
    pub tokens_owed_1: u128,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    /// A position with no liquidity and nothing owed is equivalent to
    /// one that was never created.
    pub fn is_empty(&self) -> bool {
        self.liquidity == 0 && self.tokens_owed_0 == 0 && self.tokens_owed_1 == 0
    }
}
