mod common;

use chrono::{Duration, Utc};
use common::{draft, setup};
use tradelog::domain::ports::trade_repository::TradeFilter;
use tradelog::domain::values::direction::Direction;
use tradelog::domain::values::trade_status::TradeStatus;

#[test]
fn test_symbol_filter_is_case_insensitive_substring() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    journal
        .log_trade(&owner.id, draft("RELIANCE", Direction::Long, 10, 100.0, 90.0))
        .unwrap();
    journal
        .log_trade(&owner.id, draft("TATAMOTORS", Direction::Long, 10, 100.0, 90.0))
        .unwrap();
    journal
        .log_trade(&owner.id, draft("TATASTEEL", Direction::Long, 10, 100.0, 90.0))
        .unwrap();

    let mut filter = TradeFilter::for_owner(&owner.id);
    filter.symbol = Some("tata".to_string());
    let trades = journal.list_trades(&filter).unwrap();
    assert_eq!(trades.len(), 2);
    assert!(trades.iter().all(|t| t.symbol.starts_with("TATA")));
}

#[test]
fn test_status_filter() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let open = journal
        .log_trade(&owner.id, draft("A", Direction::Long, 10, 100.0, 90.0))
        .unwrap();
    let closed = journal
        .log_trade(&owner.id, draft("B", Direction::Long, 10, 100.0, 90.0))
        .unwrap();
    journal.close_trade(&closed.id, &owner.id, 110.0).unwrap();

    let mut filter = TradeFilter::for_owner(&owner.id);
    filter.status = Some(TradeStatus::Open);
    let trades = journal.list_trades(&filter).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].id, open.id);

    filter.status = Some(TradeStatus::Closed);
    let trades = journal.list_trades(&filter).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].id, closed.id);
}

#[test]
fn test_date_range_is_inclusive() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("A", Direction::Long, 10, 100.0, 90.0))
        .unwrap();

    let mut filter = TradeFilter::for_owner(&owner.id);
    filter.from = Some(trade.opened_at);
    filter.to = Some(trade.opened_at);
    assert_eq!(journal.list_trades(&filter).unwrap().len(), 1);

    filter.from = Some(trade.opened_at + Duration::seconds(1));
    filter.to = None;
    assert_eq!(journal.list_trades(&filter).unwrap().len(), 0);

    filter.from = None;
    filter.to = Some(trade.opened_at - Duration::seconds(1));
    assert_eq!(journal.list_trades(&filter).unwrap().len(), 0);

    filter.from = Some(Utc::now() - Duration::days(1));
    filter.to = Some(Utc::now() + Duration::days(1));
    assert_eq!(journal.list_trades(&filter).unwrap().len(), 1);
}

#[test]
fn test_ordering_is_opened_at_ascending() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    for symbol in ["A", "B", "C", "D"] {
        journal
            .log_trade(&owner.id, draft(symbol, Direction::Long, 10, 100.0, 90.0))
            .unwrap();
    }

    let trades = journal.list_trades(&TradeFilter::for_owner(&owner.id)).unwrap();
    assert_eq!(trades.len(), 4);
    for pair in trades.windows(2) {
        assert!(pair[0].opened_at <= pair[1].opened_at);
    }

    // Deterministic: repeated queries return the same order.
    let again = journal.list_trades(&TradeFilter::for_owner(&owner.id)).unwrap();
    let ids: Vec<_> = trades.iter().map(|t| &t.id).collect();
    let again_ids: Vec<_> = again.iter().map(|t| &t.id).collect();
    assert_eq!(ids, again_ids);
}

#[test]
fn test_limit_caps_results() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    for symbol in ["A", "B", "C"] {
        journal
            .log_trade(&owner.id, draft(symbol, Direction::Long, 10, 100.0, 90.0))
            .unwrap();
    }

    let mut filter = TradeFilter::for_owner(&owner.id);
    filter.limit = Some(2);
    assert_eq!(journal.list_trades(&filter).unwrap().len(), 2);
}
