use clap::Parser;
use tradelog::application::journal::{TradeDraft, TradePatch};
use tradelog::cli::commands::{Cli, Commands};
use tradelog::domain::ports::trade_repository::TradeFilter;
use tradelog::domain::values::direction::Direction;
use tradelog::domain::values::trade_status::TradeStatus;
use tradelog::TradeJournal;

fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("TRADELOG_DB").unwrap_or_else(|_| "./tradelog.db".into());

    let journal = match TradeJournal::new(&db_path) {
        Ok(journal) => journal,
        Err(e) => {
            eprintln!("Error initializing tradelog: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(journal, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_command(journal: TradeJournal, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Log { json, owner } => {
            let draft: TradeDraft = serde_json::from_str(&json)?;
            if let Some(psych) = draft.psychology {
                if psych.is_caution_state() {
                    eprintln!("Warning: logging a trade in '{psych}' state. Step away before entering.");
                }
            }
            let owner = journal.resolve_owner(&owner)?;
            let trade = journal.log_trade(&owner.id, draft)?;
            println!("{}", serde_json::to_string_pretty(&trade).unwrap());
        }
        Commands::Edit { id, json, owner } => {
            let value: serde_json::Value = serde_json::from_str(&json)?;
            let patch = TradePatch::from_json(&value)?;
            let owner = journal.resolve_owner(&owner)?;
            let trade = journal.edit_trade(&id, &owner.id, patch)?;
            println!("{}", serde_json::to_string_pretty(&trade).unwrap());
        }
        Commands::Close {
            id,
            exit_price,
            owner,
        } => {
            let owner = journal.resolve_owner(&owner)?;
            let trade = journal.close_trade(&id, &owner.id, exit_price)?;
            println!("{}", serde_json::to_string_pretty(&trade).unwrap());
        }
        Commands::Delete { id, owner } => {
            let owner = journal.resolve_owner(&owner)?;
            journal.delete_trade(&id, &owner.id)?;
            println!("Trade {id} deleted");
        }
        Commands::Get { id, owner } => {
            let owner = journal.resolve_owner(&owner)?;
            let trade = journal.get_trade(&id, &owner.id)?;
            println!("{}", serde_json::to_string_pretty(&trade).unwrap());
        }
        Commands::List {
            owner,
            symbol,
            status,
            from,
            to,
            limit,
        } => {
            let owner = journal.resolve_owner(&owner)?;
            let filter = build_filter(&owner.id, symbol, status, from, to, limit)?;
            let trades = journal.list_trades(&filter)?;
            println!("{}", serde_json::to_string_pretty(&trades).unwrap());
        }
        Commands::Export {
            owner,
            symbol,
            status,
            from,
            to,
        } => {
            let owner = journal.resolve_owner(&owner)?;
            let filter = build_filter(&owner.id, symbol, status, from, to, None)?;
            let trades = journal.list_trades(&filter)?;
            println!("{}", serde_json::to_string_pretty(&trades).unwrap());
        }
        Commands::Stats { owner } => {
            let owner = journal.resolve_owner(&owner)?;
            let stats = journal.stats(&owner.id)?;
            println!("{}", serde_json::to_string_pretty(&stats).unwrap());
        }
        Commands::Equity { owner } => {
            let owner = journal.resolve_owner(&owner)?;
            let curve = journal.equity_curve(&owner.id)?;
            println!("{}", serde_json::to_string_pretty(&curve).unwrap());
        }
        Commands::Size {
            capital,
            risk_percent,
            entry,
            stop,
            target,
            direction,
        } => {
            let direction: Direction = direction.parse().map_err(|e: String| e)?;
            let sizing = journal.position_size(capital, risk_percent, entry, stop, direction)?;
            let reward_to_risk = target
                .map(|t| journal.reward_to_risk(entry, t, stop, direction))
                .transpose()?;
            let preview = serde_json::json!({
                "quantity": sizing.quantity,
                "risk_amount": sizing.risk_amount,
                "risk_per_unit": sizing.risk_per_unit,
                "reward_to_risk": reward_to_risk,
            });
            println!("{}", serde_json::to_string_pretty(&preview).unwrap());
        }
        Commands::Attach {
            id,
            entry_image,
            exit_image,
            owner,
        } => {
            let entry_bytes = entry_image.map(std::fs::read).transpose()?;
            let exit_bytes = exit_image.map(std::fs::read).transpose()?;
            if entry_bytes.is_none() && exit_bytes.is_none() {
                return Err("provide --entry-image and/or --exit-image".into());
            }
            let owner = journal.resolve_owner(&owner)?;
            let trade = journal.attach_images(&id, &owner.id, entry_bytes, exit_bytes)?;
            println!("{}", serde_json::to_string_pretty(&trade).unwrap());
        }
    }
    Ok(())
}

fn build_filter(
    owner_id: &str,
    symbol: Option<String>,
    status: Option<String>,
    from: Option<String>,
    to: Option<String>,
    limit: Option<usize>,
) -> Result<TradeFilter, String> {
    let status = status
        .map(|s| s.parse::<TradeStatus>())
        .transpose()?;
    let mut filter = TradeFilter::for_owner(owner_id);
    filter.symbol = symbol;
    filter.status = status;
    filter.from = parse_date(&from, false)?;
    filter.to = parse_date(&to, true)?;
    filter.limit = limit;
    Ok(filter)
}

/// Parse YYYY-MM-DD or RFC3339. A bare date on the end of the range means
/// the whole day, so it expands to 23:59:59.
fn parse_date(
    s: &Option<String>,
    end_of_day: bool,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, String> {
    match s {
        None => Ok(None),
        Some(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                return Ok(Some(dt.with_timezone(&chrono::Utc)));
            }
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                let (h, m, sec) = if end_of_day { (23, 59, 59) } else { (0, 0, 0) };
                let dt = date.and_hms_opt(h, m, sec).unwrap();
                return Ok(Some(chrono::DateTime::from_naive_utc_and_offset(
                    dt,
                    chrono::Utc,
                )));
            }
            Err(format!(
                "Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"
            ))
        }
    }
}
