//! Trade/snapshot registries and the append-only portfolio history.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::error::BookError;
use crate::market::MarketSnapshot;
use crate::portfolio::book::{ModelTable, TradePortfolio};
use crate::portfolio::trade::Trade;

/// One book's full history: every trade, every market snapshot, and the
/// portfolio state after each applied trade.
///
/// `portfolios[i]` is the state after the first `i` trades; index 0 is the
/// empty genesis state. States are derived copy-on-write, so re-marking a
/// historical state never leaks into its successors.
#[derive(Debug, Clone)]
pub struct TradeTransaction {
    /// External identity of this book.
    pub id: u64,
    trades: BTreeMap<u64, Arc<Trade>>,
    snapshots: BTreeMap<u64, Arc<MarketSnapshot>>,
    portfolios: Vec<TradePortfolio>,
}

impl TradeTransaction {
    /// An empty history using the injected model table.
    pub fn new(id: u64, models: Arc<ModelTable>) -> Self {
        Self {
            id,
            trades: BTreeMap::new(),
            snapshots: BTreeMap::new(),
            portfolios: vec![TradePortfolio::new(models)],
        }
    }

    /// Reassembles a stored history; entry point for the serialization
    /// boundary. `portfolios` must already contain the genesis state.
    pub fn restore(
        id: u64,
        trades: Vec<Arc<Trade>>,
        snapshots: Vec<Arc<MarketSnapshot>>,
        portfolios: Vec<TradePortfolio>,
    ) -> Self {
        Self {
            id,
            trades: trades.into_iter().map(|tr| (tr.id, tr)).collect(),
            snapshots: snapshots.into_iter().map(|ss| (ss.id, ss)).collect(),
            portfolios,
        }
    }

    /// Registers `trade`, derives the successor portfolio state, and
    /// appends it. Returns the new state's index (= number of trades
    /// applied so far).
    pub fn apply_trade(
        &mut self,
        trade: Trade,
        underlying_price: Option<f64>,
    ) -> Result<usize, BookError> {
        if self.trades.contains_key(&trade.id) {
            return Err(BookError::DuplicateTrade(trade.id));
        }
        let trade = Arc::new(trade);
        let next = self
            .portfolios
            .last()
            .expect("transaction always holds the genesis portfolio state")
            .apply_trade(&trade, underlying_price);
        self.trades.insert(trade.id, trade);
        self.portfolios.push(next);
        Ok(self.portfolios.len() - 1)
    }

    /// Marks the historical state at `index` against `snapshot` and, on
    /// success, registers the snapshot. States after `index` are never
    /// touched; a failed mark registers nothing and changes nothing.
    pub fn apply_snapshot(
        &mut self,
        index: usize,
        snapshot: MarketSnapshot,
    ) -> Result<(), BookError> {
        if index >= self.portfolios.len() {
            return Err(BookError::IndexOutOfRange {
                index,
                len: self.portfolios.len(),
            });
        }
        if self.snapshots.contains_key(&snapshot.id) {
            return Err(BookError::DuplicateSnapshot(snapshot.id));
        }
        let snapshot = Arc::new(snapshot);
        self.portfolios[index].snapshot(&snapshot)?;
        self.snapshots.insert(snapshot.id, snapshot);
        Ok(())
    }

    /// All portfolio states, genesis first.
    pub fn portfolios(&self) -> &[TradePortfolio] {
        &self.portfolios
    }

    /// The state after the most recent trade.
    pub fn latest(&self) -> &TradePortfolio {
        self.portfolios
            .last()
            .expect("transaction always holds the genesis portfolio state")
    }

    /// Registered trade by id.
    pub fn trade(&self, id: u64) -> Result<&Arc<Trade>, BookError> {
        self.trades.get(&id).ok_or(BookError::UnknownTrade(id))
    }

    /// Registered market snapshot by id.
    pub fn snapshot(&self, id: u64) -> Result<&Arc<MarketSnapshot>, BookError> {
        self.snapshots
            .get(&id)
            .ok_or(BookError::UnknownSnapshot(id))
    }

    /// Registered trades, id-ordered.
    pub fn trades(&self) -> impl Iterator<Item = &Arc<Trade>> {
        self.trades.values()
    }

    /// Registered market snapshots, id-ordered.
    pub fn market_snapshots(&self) -> impl Iterator<Item = &Arc<MarketSnapshot>> {
        self.snapshots.values()
    }
}
