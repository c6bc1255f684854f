//! Stable flat records for every book entity.
//!
//! These payloads are what the (external) persistence layer stores and
//! transports: field names and numeric encodings are part of the
//! compatibility contract — asset kinds travel as the 0..4 tag, option
//! directions as ±1, and days as fractional offsets from the 2000-01-01
//! UTC anchor. Converting an entity to its record is infallible; the
//! reverse direction resolves name/id references and fails with a
//! [`BookError`] naming whatever is missing.
//!
//! # Examples
//! ```rust
//! use ferrobook::assets::{Asset, AssetRegistry};
//! use ferrobook::core::serialization::{
//!     asset_from_record, asset_record, from_json, to_json_pretty,
//! };
//!
//! let mut registry = AssetRegistry::new();
//! let gold = registry.register(Asset::general("AU"));
//! registry.register(Asset::future("AU2412", 900.0, gold));
//!
//! let record = asset_record(&registry.find("AU2412").unwrap());
//! let json = to_json_pretty(&record).expect("json serialization");
//! let decoded = from_json(&json).expect("json deserialization");
//! let rebuilt = asset_from_record(&decoded, &registry).expect("resolution");
//! assert_eq!(rebuilt.name, "AU2412");
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::assets::{Asset, AssetKind, AssetRegistry};
use crate::core::error::BookError;
use crate::core::time::Day;
use crate::core::types::OptionDirection;
use crate::market::MarketSnapshot;
use crate::portfolio::{
    ModelTable, PortfolioSnapshot, Trade, TradePortfolio, TradePosition, TradeTransaction,
};

/// Flat asset payload; derived terms present only for futures and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub name: String,
    /// Kind tag: 0 general, 1 future, 2 option, 3 bond, 4 currency.
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mature: Option<Day>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<f64>,
    /// ±1 option side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<f64>,
}

/// Flat trade payload referencing its asset by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: u64,
    pub asset: String,
    pub marginal: bool,
    pub amount: f64,
    pub day: Day,
    pub rate: f64,
    pub price: f64,
    pub fee: f64,
}

/// Flat market-snapshot payload with name-keyed price/margin tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshotRecord {
    pub id: u64,
    pub day: Day,
    pub rate: f64,
    pub prices: BTreeMap<String, f64>,
    pub margins: BTreeMap<String, f64>,
}

/// Flat position payload referencing its opening trade by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePositionRecord {
    pub trade: u64,
    pub amount: f64,
    pub day: Day,
    pub rate: f64,
    pub price: f64,
    pub profit: f64,
    pub impl_vol: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Flat portfolio-snapshot payload referencing its market snapshot by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshotRecord {
    pub snapshot: u64,
    pub profit: f64,
    pub margin: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Flat portfolio-state payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePortfolioRecord {
    pub positions: Vec<TradePositionRecord>,
    pub snapshots: Vec<PortfolioSnapshotRecord>,
    pub cost: f64,
    pub income: f64,
}

/// Flat transaction payload: registries plus the full state sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeTransactionRecord {
    pub id: u64,
    pub trades: Vec<TradeRecord>,
    pub snapshots: Vec<MarketSnapshotRecord>,
    pub portfolios: Vec<TradePortfolioRecord>,
}

pub fn asset_record(asset: &Asset) -> AssetRecord {
    let (mature, underlying, exercise, direction) = match &asset.kind {
        AssetKind::Future { mature, underlying } => {
            (Some(*mature), Some(underlying.name.clone()), None, None)
        }
        AssetKind::Option {
            mature,
            underlying,
            exercise,
            direction,
        } => (
            Some(*mature),
            Some(underlying.name.clone()),
            Some(*exercise),
            Some(direction.sign()),
        ),
        _ => (None, None, None, None),
    };
    AssetRecord {
        name: asset.name.clone(),
        kind: asset.kind.tag(),
        mature,
        underlying,
        exercise,
        direction,
    }
}

/// Resolves a stored asset; future/option underlyings must already be
/// registered.
pub fn asset_from_record(
    record: &AssetRecord,
    registry: &AssetRegistry,
) -> Result<Asset, BookError> {
    fn mature_of(record: &AssetRecord) -> Result<Day, BookError> {
        record
            .mature
            .ok_or_else(|| BookError::InvalidRecord(format!("asset '{}' has no mature", record.name)))
    }
    fn underlying_of(
        record: &AssetRecord,
        registry: &AssetRegistry,
    ) -> Result<Arc<Asset>, BookError> {
        let name = record.underlying.as_deref().ok_or_else(|| {
            BookError::InvalidRecord(format!("asset '{}' has no underlying", record.name))
        })?;
        registry.find(name)
    }

    let kind = match record.kind {
        0 => AssetKind::General,
        1 => AssetKind::Future {
            mature: mature_of(record)?,
            underlying: underlying_of(record, registry)?,
        },
        2 => {
            let exercise = record.exercise.ok_or_else(|| {
                BookError::InvalidRecord(format!("asset '{}' has no exercise", record.name))
            })?;
            let direction = record
                .direction
                .and_then(OptionDirection::from_sign)
                .ok_or_else(|| {
                    BookError::InvalidRecord(format!("asset '{}' has no direction", record.name))
                })?;
            AssetKind::Option {
                mature: mature_of(record)?,
                underlying: underlying_of(record, registry)?,
                exercise,
                direction,
            }
        }
        3 => AssetKind::Bond,
        4 => AssetKind::Currency,
        other => {
            return Err(BookError::InvalidRecord(format!(
                "asset '{}' has unknown kind tag {other}",
                record.name
            )))
        }
    };
    Ok(Asset {
        name: record.name.clone(),
        kind,
    })
}

pub fn trade_record(trade: &Trade) -> TradeRecord {
    TradeRecord {
        id: trade.id,
        asset: trade.asset.name.clone(),
        marginal: trade.marginal,
        amount: trade.amount,
        day: trade.day,
        rate: trade.rate,
        price: trade.price,
        fee: trade.fee,
    }
}

pub fn trade_from_record(record: &TradeRecord, registry: &AssetRegistry) -> Result<Trade, BookError> {
    Ok(Trade::new(
        record.id,
        registry.find(&record.asset)?,
        record.marginal,
        record.amount,
        record.day,
        record.rate,
        record.price,
        record.fee,
    ))
}

pub fn market_snapshot_record(snapshot: &MarketSnapshot) -> MarketSnapshotRecord {
    MarketSnapshotRecord {
        id: snapshot.id,
        day: snapshot.day,
        rate: snapshot.rate,
        prices: snapshot.prices.clone(),
        margins: snapshot.margins.clone(),
    }
}

pub fn market_snapshot_from_record(record: &MarketSnapshotRecord) -> MarketSnapshot {
    MarketSnapshot {
        id: record.id,
        day: record.day,
        rate: record.rate,
        prices: record.prices.clone(),
        margins: record.margins.clone(),
    }
}

pub fn position_record(position: &TradePosition) -> TradePositionRecord {
    TradePositionRecord {
        trade: position.trade.id,
        amount: position.amount,
        day: position.day,
        rate: position.rate,
        price: position.price,
        profit: position.profit,
        impl_vol: position.implied_vol,
        delta: position.delta,
        gamma: position.gamma,
        theta: position.theta,
        vega: position.vega,
        rho: position.rho,
    }
}

/// Resolves a stored position against the transaction's trade registry.
pub fn position_from_record(
    record: &TradePositionRecord,
    trades: &BTreeMap<u64, Arc<Trade>>,
) -> Result<TradePosition, BookError> {
    let trade = trades
        .get(&record.trade)
        .ok_or(BookError::UnknownTrade(record.trade))?;
    Ok(TradePosition {
        trade: Arc::clone(trade),
        amount: record.amount,
        day: record.day,
        rate: record.rate,
        price: record.price,
        profit: record.profit,
        implied_vol: record.impl_vol,
        delta: record.delta,
        gamma: record.gamma,
        theta: record.theta,
        vega: record.vega,
        rho: record.rho,
    })
}

pub fn portfolio_snapshot_record(snapshot: &PortfolioSnapshot) -> PortfolioSnapshotRecord {
    PortfolioSnapshotRecord {
        snapshot: snapshot.snapshot_id,
        profit: snapshot.profit,
        margin: snapshot.margin,
        delta: snapshot.delta,
        gamma: snapshot.gamma,
        theta: snapshot.theta,
        vega: snapshot.vega,
        rho: snapshot.rho,
    }
}

pub fn portfolio_snapshot_from_record(record: &PortfolioSnapshotRecord) -> PortfolioSnapshot {
    PortfolioSnapshot {
        snapshot_id: record.snapshot,
        profit: record.profit,
        margin: record.margin,
        delta: record.delta,
        gamma: record.gamma,
        theta: record.theta,
        vega: record.vega,
        rho: record.rho,
    }
}

pub fn portfolio_record(portfolio: &TradePortfolio) -> TradePortfolioRecord {
    TradePortfolioRecord {
        positions: portfolio.positions.iter().map(position_record).collect(),
        snapshots: portfolio
            .snapshots
            .iter()
            .map(portfolio_snapshot_record)
            .collect(),
        cost: portfolio.cost,
        income: portfolio.income,
    }
}

/// Restores a stored portfolio state against the trade registry and the
/// injected model table.
pub fn portfolio_from_record(
    record: &TradePortfolioRecord,
    trades: &BTreeMap<u64, Arc<Trade>>,
    models: Arc<ModelTable>,
) -> Result<TradePortfolio, BookError> {
    let positions = record
        .positions
        .iter()
        .map(|pos| position_from_record(pos, trades))
        .collect::<Result<Vec<_>, _>>()?;
    let snapshots = record
        .snapshots
        .iter()
        .map(portfolio_snapshot_from_record)
        .collect();
    Ok(TradePortfolio::restore(
        positions,
        snapshots,
        record.cost,
        record.income,
        models,
    ))
}

pub fn transaction_record(transaction: &TradeTransaction) -> TradeTransactionRecord {
    TradeTransactionRecord {
        id: transaction.id,
        trades: transaction.trades().map(|tr| trade_record(tr)).collect(),
        snapshots: transaction
            .market_snapshots()
            .map(|ss| market_snapshot_record(ss))
            .collect(),
        portfolios: transaction.portfolios().iter().map(portfolio_record).collect(),
    }
}

/// Restores a full history. Trade assets resolve through `registry`; each
/// portfolio snapshot's market-snapshot id must be present in the record's
/// own snapshot list.
pub fn transaction_from_record(
    record: &TradeTransactionRecord,
    registry: &AssetRegistry,
    models: Arc<ModelTable>,
) -> Result<TradeTransaction, BookError> {
    if record.portfolios.is_empty() {
        return Err(BookError::InvalidRecord(
            "transaction has no genesis portfolio state".to_string(),
        ));
    }

    let mut trades: BTreeMap<u64, Arc<Trade>> = BTreeMap::new();
    for tr in &record.trades {
        trades.insert(tr.id, Arc::new(trade_from_record(tr, registry)?));
    }
    let mut snapshots: BTreeMap<u64, Arc<MarketSnapshot>> = BTreeMap::new();
    for ss in &record.snapshots {
        snapshots.insert(ss.id, Arc::new(market_snapshot_from_record(ss)));
    }

    let mut portfolios = Vec::with_capacity(record.portfolios.len());
    for pf in &record.portfolios {
        for ps in &pf.snapshots {
            if !snapshots.contains_key(&ps.snapshot) {
                return Err(BookError::UnknownSnapshot(ps.snapshot));
            }
        }
        portfolios.push(portfolio_from_record(pf, &trades, Arc::clone(&models))?);
    }

    Ok(TradeTransaction::restore(
        record.id,
        trades.into_values().collect(),
        snapshots.into_values().collect(),
        portfolios,
    ))
}

pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(payload)
}

pub fn to_msgpack<T: Serialize>(value: &T) -> Result<Vec<u8>, rmp_serde::encode::Error> {
    rmp_serde::to_vec_named(value)
}

pub fn from_msgpack<T: DeserializeOwned>(payload: &[u8]) -> Result<T, rmp_serde::decode::Error> {
    rmp_serde::from_slice(payload)
}
