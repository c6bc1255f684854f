//! Stable-record round trips across the serialization boundary.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use ferrobook::assets::{Asset, AssetRegistry};
use ferrobook::core::serialization::{
    from_json, from_msgpack, to_json_pretty, to_msgpack, transaction_from_record,
    transaction_record, TradeTransactionRecord,
};
use ferrobook::core::{BookError, OptionDirection};
use ferrobook::market::MarketSnapshot;
use ferrobook::portfolio::{ModelTable, Trade, TradeTransaction};
use ferrobook::pricing::{Black76Model, PricingModel};

fn registry() -> AssetRegistry {
    let mut registry = AssetRegistry::new();
    let gold = registry.register(Asset::general("AU"));
    let future = registry.register(Asset::future("AU2412", 365.0, gold));
    registry.register(Asset::option(
        "AU2412C560",
        365.0,
        future,
        560.0,
        OptionDirection::Call,
    ));
    registry
}

fn marked_book(registry: &AssetRegistry) -> TradeTransaction {
    let future = registry.find("AU2412").unwrap();
    let call = registry.find("AU2412C560").unwrap();

    let mut book = TradeTransaction::new(42, Arc::new(ModelTable::default()));
    book.apply_trade(Trade::new(1, future, true, 2.0, 0.0, 0.02, 555.0, 1.0), None)
        .unwrap();
    let premium = Black76Model.price(555.0, 560.0, 0.02, 0.2, 1.0, OptionDirection::Call);
    book.apply_trade(
        Trade::new(2, call, true, -3.0, 0.0, 0.02, premium, 1.5),
        Some(555.0),
    )
    .unwrap();

    let mark = Black76Model.price(560.0, 560.0, 0.02, 0.2, 0.98, OptionDirection::Call);
    let ss = MarketSnapshot::builder(1, 5.0, 0.02)
        .price("AU2412", 560.0)
        .price("AU2412C560", mark)
        .margin("AU2412", 0.08)
        .build();
    book.apply_snapshot(2, ss).unwrap();
    book
}

#[test]
fn transaction_round_trips_through_json_and_msgpack() {
    let registry = registry();
    let book = marked_book(&registry);
    let record = transaction_record(&book);

    let json = to_json_pretty(&record).expect("json serialization");
    let from_json_record: TradeTransactionRecord = from_json(&json).expect("json deserialization");
    assert_eq!(from_json_record, record);

    let bytes = to_msgpack(&record).expect("msgpack serialization");
    let from_msgpack_record: TradeTransactionRecord =
        from_msgpack(&bytes).expect("msgpack deserialization");
    assert_eq!(from_msgpack_record, record);
}

#[test]
fn restored_transaction_preserves_book_state() {
    let registry = registry();
    let book = marked_book(&registry);
    let record = transaction_record(&book);

    let restored =
        transaction_from_record(&record, &registry, Arc::new(ModelTable::default())).unwrap();
    assert_eq!(restored.id, 42);
    assert_eq!(restored.portfolios().len(), book.portfolios().len());

    let (before, after) = (book.latest(), restored.latest());
    assert_eq!(before.positions.len(), after.positions.len());
    for (b, a) in before.positions.iter().zip(&after.positions) {
        assert_eq!(b.trade.id, a.trade.id);
        assert_abs_diff_eq!(b.amount, a.amount, epsilon = 1e-12);
        assert_abs_diff_eq!(b.price, a.price, epsilon = 1e-12);
        assert_abs_diff_eq!(b.delta, a.delta, epsilon = 1e-12);
    }
    assert_eq!(before.snapshots, after.snapshots);
    assert_abs_diff_eq!(before.cost, after.cost, epsilon = 1e-12);
    assert_abs_diff_eq!(before.income, after.income, epsilon = 1e-12);

    // A restored book keeps trading.
    let mut restored = restored;
    let stock = registry.find("AU2412").unwrap();
    restored
        .apply_trade(Trade::new(3, stock, true, -2.0, 6.0, 0.02, 561.0, 0.5), None)
        .unwrap();
    assert_eq!(restored.portfolios().len(), book.portfolios().len() + 1);
}

#[test]
fn dangling_references_fail_by_id() {
    let registry = registry();
    let book = marked_book(&registry);
    let mut record = transaction_record(&book);

    // Drop the trade registry entry a position depends on.
    record.trades.retain(|tr| tr.id != 1);
    let err =
        transaction_from_record(&record, &registry, Arc::new(ModelTable::default())).unwrap_err();
    assert_eq!(err, BookError::UnknownTrade(1));

    // Drop the market snapshot a portfolio snapshot references.
    let mut record = transaction_record(&book);
    record.snapshots.clear();
    let err =
        transaction_from_record(&record, &registry, Arc::new(ModelTable::default())).unwrap_err();
    assert_eq!(err, BookError::UnknownSnapshot(1));
}

#[test]
fn day_offsets_survive_the_record_encoding() {
    use chrono::NaiveDate;
    use ferrobook::core::{day_from_datetime, day_to_datetime};

    let at = NaiveDate::from_ymd_opt(2024, 7, 15)
        .unwrap()
        .and_hms_milli_opt(9, 30, 0, 500)
        .unwrap();
    let day = day_from_datetime(at);

    let registry = registry();
    let trade = Trade::new(9, registry.find("AU").unwrap(), false, 1.0, day, 0.02, 10.0, 0.0);
    let record = ferrobook::core::serialization::trade_record(&trade);
    let json = to_json_pretty(&record).unwrap();
    let decoded: ferrobook::core::serialization::TradeRecord = from_json(&json).unwrap();
    assert_eq!(day_to_datetime(decoded.day), Some(at));
}
