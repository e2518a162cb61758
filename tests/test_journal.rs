mod common;

use common::{draft, setup};
use tradelog::application::journal::{TradeDraft, TradePatch};
use tradelog::domain::error::DomainError;
use tradelog::domain::values::charges::ChargeSchedule;
use tradelog::domain::values::direction::Direction;
use tradelog::domain::values::trade_status::TradeStatus;
use tradelog::TradeJournal;

#[test]
fn test_log_and_round_trip() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let mut d = draft("RELIANCE", Direction::Long, 50, 100.0, 80.0);
    d.target_price = Some(150.0);
    d.notes = Some("breakout over resistance".to_string());
    let logged = journal.log_trade(&owner.id, d).unwrap();

    assert_eq!(logged.symbol, "RELIANCE");
    assert_eq!(logged.status, TradeStatus::Open);
    assert!(logged.charges.is_none());
    assert!(logged.net_pnl.is_none());

    let fetched = journal.get_trade(&logged.id, &owner.id).unwrap();
    assert_eq!(
        serde_json::to_value(&fetched).unwrap(),
        serde_json::to_value(&logged).unwrap()
    );
}

#[test]
fn test_quantity_derived_from_capital_and_risk() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let d = TradeDraft {
        symbol: Some("INFY".to_string()),
        direction: Some(Direction::Long),
        entry_price: Some(100.0),
        stop_loss: Some(80.0),
        capital: Some(100_000.0),
        risk_percent: Some(1.0),
        ..TradeDraft::default()
    };
    let trade = journal.log_trade(&owner.id, d).unwrap();
    assert_eq!(trade.quantity, 50);
}

#[test]
fn test_missing_required_fields_name_the_field() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();

    let no_symbol = TradeDraft {
        direction: Some(Direction::Long),
        entry_price: Some(100.0),
        stop_loss: Some(80.0),
        quantity: Some(10),
        ..TradeDraft::default()
    };
    match journal.log_trade(&owner.id, no_symbol) {
        Err(DomainError::Validation { field, .. }) => assert_eq!(field, "symbol"),
        other => panic!("expected symbol validation, got {other:?}"),
    }

    let no_quantity = TradeDraft {
        symbol: Some("INFY".to_string()),
        direction: Some(Direction::Long),
        entry_price: Some(100.0),
        stop_loss: Some(80.0),
        ..TradeDraft::default()
    };
    match journal.log_trade(&owner.id, no_quantity) {
        Err(DomainError::Validation { field, .. }) => assert_eq!(field, "quantity"),
        other => panic!("expected quantity validation, got {other:?}"),
    }
}

#[test]
fn test_zero_quantity_rejected() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let err = journal
        .log_trade(&owner.id, draft("INFY", Direction::Long, 0, 100.0, 80.0))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation { field: "quantity", .. }
    ));
}

#[test]
fn test_entry_equals_stop_is_flagged_not_a_crash() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let d = TradeDraft {
        symbol: Some("INFY".to_string()),
        direction: Some(Direction::Long),
        entry_price: Some(100.0),
        stop_loss: Some(100.0),
        capital: Some(100_000.0),
        risk_percent: Some(1.0),
        ..TradeDraft::default()
    };
    let err = journal.log_trade(&owner.id, d).unwrap_err();
    assert!(matches!(err, DomainError::ZeroRisk));
}

#[test]
fn test_close_computes_economics() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("RELIANCE", Direction::Long, 50, 100.0, 80.0))
        .unwrap();

    let closed = journal.close_trade(&trade.id, &owner.id, 110.0).unwrap();
    assert_eq!(closed.status, TradeStatus::Closed);
    assert_eq!(closed.exit_price, Some(110.0));
    assert!(closed.closed_at.is_some());

    let charges = closed.charges.unwrap();
    assert_eq!(charges.brokerage, 3.15);
    assert_eq!(charges.transaction_tax, 1.05);
    assert_eq!(charges.exchange_fee, 0.34);
    assert_eq!(charges.government_tax, 0.63);
    assert_eq!(charges.stamp_duty, 0.15);
    assert_eq!(charges.total, charges.component_sum());

    assert_eq!(closed.gross_pnl, Some(500.0));
    assert_eq!(closed.net_pnl, Some(500.0 - charges.total));
}

#[test]
fn test_short_trade_profits_on_falling_price() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("TATASTEEL", Direction::Short, 10, 200.0, 210.0))
        .unwrap();
    let closed = journal.close_trade(&trade.id, &owner.id, 180.0).unwrap();
    assert_eq!(closed.gross_pnl, Some(200.0));
    assert!(closed.net_pnl.unwrap() > 0.0);
}

#[test]
fn test_option_trade_uses_option_tax_branch() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("NIFTY24SEP25000CE", Direction::Call, 50, 100.0, 80.0))
        .unwrap();
    let closed = journal.close_trade(&trade.id, &owner.id, 110.0).unwrap();
    // option transaction tax runs on the sell leg: 50 * 110 * 0.0005
    assert_eq!(closed.charges.unwrap().transaction_tax, 2.75);
}

#[test]
fn test_log_closed_at_birth() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let mut d = draft("INFY", Direction::Long, 50, 100.0, 80.0);
    d.exit_price = Some(110.0);
    let trade = journal.log_trade(&owner.id, d).unwrap();
    assert_eq!(trade.status, TradeStatus::Closed);
    assert!(trade.charges.is_some());
    assert!(trade.net_pnl.is_some());
}

#[test]
fn test_closed_status_without_exit_rejected() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let mut d = draft("INFY", Direction::Long, 50, 100.0, 80.0);
    d.status = Some(TradeStatus::Closed);
    match journal.log_trade(&owner.id, d) {
        Err(DomainError::Validation { field, .. }) => assert_eq!(field, "exit_price"),
        other => panic!("expected exit_price validation, got {other:?}"),
    }
}

#[test]
fn test_edit_recomputes_derived_fields() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("RELIANCE", Direction::Long, 50, 100.0, 80.0))
        .unwrap();
    let closed = journal.close_trade(&trade.id, &owner.id, 110.0).unwrap();
    let before = closed.charges.unwrap();

    let patch = TradePatch {
        exit_price: Some(120.0),
        ..TradePatch::default()
    };
    let edited = journal.edit_trade(&trade.id, &owner.id, patch).unwrap();
    let after = edited.charges.unwrap();
    assert_ne!(before.total, after.total);
    assert_eq!(edited.gross_pnl, Some(1000.0));
    assert_eq!(edited.net_pnl, Some(1000.0 - after.total));
}

#[test]
fn test_edit_is_idempotent() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("RELIANCE", Direction::Long, 50, 100.0, 80.0))
        .unwrap();

    let patch = TradePatch {
        exit_price: Some(110.0),
        status: Some(TradeStatus::Closed),
        quantity: Some(60),
        ..TradePatch::default()
    };
    let once = journal.edit_trade(&trade.id, &owner.id, patch.clone()).unwrap();
    let twice = journal.edit_trade(&trade.id, &owner.id, patch).unwrap();
    assert_eq!(
        serde_json::to_value(&once).unwrap(),
        serde_json::to_value(&twice).unwrap()
    );
}

#[test]
fn test_reopen_clears_derived_fields() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("RELIANCE", Direction::Long, 50, 100.0, 80.0))
        .unwrap();
    journal.close_trade(&trade.id, &owner.id, 110.0).unwrap();

    let patch = TradePatch {
        status: Some(TradeStatus::Open),
        ..TradePatch::default()
    };
    let reopened = journal.edit_trade(&trade.id, &owner.id, patch).unwrap();
    assert_eq!(reopened.status, TradeStatus::Open);
    assert!(reopened.charges.is_none());
    assert!(reopened.net_pnl.is_none());
    assert!(reopened.closed_at.is_none());
}

#[test]
fn test_patch_rejects_derived_fields() {
    for field in ["charges", "net_pnl", "gross_pnl", "total_charges", "brokerage"] {
        let mut obj = serde_json::Map::new();
        obj.insert(field.to_string(), serde_json::json!(123.45));
        let value = serde_json::Value::Object(obj);
        match TradePatch::from_json(&value) {
            Err(DomainError::DerivedField(name)) => assert_eq!(name, field),
            other => panic!("expected DerivedField for {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_patch_rejects_identity_fields() {
    let value = serde_json::json!({ "owner_id": "someone-else" });
    assert!(matches!(
        TradePatch::from_json(&value),
        Err(DomainError::Validation { field: "patch", .. })
    ));
}

#[test]
fn test_delete_is_permanent() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("INFY", Direction::Long, 10, 100.0, 90.0))
        .unwrap();

    journal.delete_trade(&trade.id, &owner.id).unwrap();
    assert!(matches!(
        journal.get_trade(&trade.id, &owner.id),
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        journal.delete_trade(&trade.id, &owner.id),
        Err(DomainError::NotFound(_))
    ));
}

#[test]
fn test_unknown_id_is_not_found() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    assert!(matches!(
        journal.close_trade("no-such-id", &owner.id, 100.0),
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        journal.edit_trade("no-such-id", &owner.id, TradePatch::default()),
        Err(DomainError::NotFound(_))
    ));
}

#[test]
fn test_attach_images_round_trip() {
    let journal = setup();
    let owner = journal.resolve_owner("alice").unwrap();
    let trade = journal
        .log_trade(&owner.id, draft("INFY", Direction::Long, 10, 100.0, 90.0))
        .unwrap();

    let entry_png = vec![0x89, 0x50, 0x4E, 0x47];
    let updated = journal
        .attach_images(&trade.id, &owner.id, Some(entry_png.clone()), None)
        .unwrap();
    assert_eq!(updated.entry_image, Some(entry_png.clone()));
    assert!(updated.exit_image.is_none());

    let fetched = journal.get_trade(&trade.id, &owner.id).unwrap();
    assert_eq!(fetched.entry_image, Some(entry_png));
}

#[test]
fn test_journal_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("journal.db");
    let db_path = db_path.to_str().unwrap();

    let (owner_id, trade_id) = {
        let journal = TradeJournal::with_schedule(db_path, ChargeSchedule::default()).unwrap();
        let owner = journal.resolve_owner("alice").unwrap();
        let trade = journal
            .log_trade(&owner.id, draft("RELIANCE", Direction::Long, 50, 100.0, 80.0))
            .unwrap();
        journal.close_trade(&trade.id, &owner.id, 110.0).unwrap();
        (owner.id, trade.id)
    };

    let reopened = TradeJournal::with_schedule(db_path, ChargeSchedule::default()).unwrap();
    let trade = reopened.get_trade(&trade_id, &owner_id).unwrap();
    assert_eq!(trade.status, TradeStatus::Closed);
    let charges = trade.charges.unwrap();
    assert_eq!(charges.total, charges.component_sum());
    assert_eq!(trade.net_pnl, Some(500.0 - charges.total));
}
