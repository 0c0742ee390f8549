use clap::Parser;
use renaissance::config::cli::{BrowseArgs, CheckoutArgs, Command, SplitArgs};
use renaissance::utils::{logger, money::format_percent, validation::Validate};
use renaissance::{
    AppConfig, CliConfig, ErrorCategory, LedgerExporter, LocalStorage, Marketplace,
    RenaissanceError, SessionManager,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting renaissance CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        report_and_exit(&e);
    }
}

async fn run(cli: &CliConfig) -> renaissance::Result<()> {
    cli.validate()?;

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path).inspect_err(|_| {
            tracing::error!("failed to load config file '{}'", path);
        })?,
        None => AppConfig::default(),
    };
    let marketplace = Arc::new(config.build_marketplace()?);

    match &cli.command {
        Command::Tiers => {
            print_tiers(&marketplace);
            Ok(())
        }
        Command::Browse(args) => browse(&marketplace, args),
        Command::Split(args) => split(&marketplace, args),
        Command::Checkout(args) => checkout(marketplace, args).await,
    }
}

fn report_and_exit(e: &RenaissanceError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.category() {
        ErrorCategory::Validation | ErrorCategory::Configuration => 1,
        ErrorCategory::Precondition => 2,
        ErrorCategory::System => 3,
    };
    std::process::exit(exit_code);
}

fn print_tiers(marketplace: &Marketplace) {
    for (tier, policy) in marketplace.tiers().iter() {
        println!(
            "{:<15} {:>6}  {:<8} {}",
            tier.display_name(),
            format_percent(policy.fee_pct),
            policy.color,
            policy.description
        );
    }
}

fn browse(marketplace: &Marketplace, args: &BrowseArgs) -> renaissance::Result<()> {
    let query = args.to_query()?;
    let results = marketplace.browse(&query);

    if results.is_empty() {
        println!("No art pieces match your current filters. Try broadening your search!");
        return Ok(());
    }

    println!("Total results found: {}", results.len());
    for item in results {
        let badges = item.badges();
        let badges = if badges.is_empty() {
            "Standard Listing".to_string()
        } else {
            badges.join(" | ")
        };
        println!(
            "#{:<3} {:<22} {:<18} {:>12}  {:<15} {:<14} [{}]",
            item.id,
            item.title,
            item.artist,
            marketplace.format_amount(item.price),
            item.tier.display_name(),
            item.category,
            badges
        );
    }
    Ok(())
}

fn split(marketplace: &Marketplace, args: &SplitArgs) -> renaissance::Result<()> {
    let result = match (args.item, args.price, args.tier) {
        (Some(item_id), _, _) => marketplace.quote(item_id, args.studio_pct)?,
        (None, Some(price), Some(tier)) => marketplace.split(price, tier, args.studio_pct)?,
        _ => {
            return Err(RenaissanceError::ValidationError {
                message: "pass either --item <id> or both --price and --tier".to_string(),
            })
        }
    };

    println!("Transaction breakdown for a {} sale", marketplace.format_amount(result.gross));
    println!(
        "  Artist payout:     {} ({} of sale)",
        marketplace.format_amount(result.artist_payout),
        format_percent(result.artist_pct)
    );
    println!(
        "  Platform fee:      {} ({})",
        marketplace.format_amount(result.platform_fee),
        format_percent(result.platform_fee_pct)
    );
    match (result.studio_fee, result.studio_fee_pct) {
        (Some(fee), Some(pct)) => println!(
            "  Studio/Gallery:    {} ({})",
            marketplace.format_amount(fee),
            format_percent(pct)
        ),
        _ => println!("  No Studio/Gallery commission applied."),
    }
    Ok(())
}

async fn checkout(marketplace: Arc<Marketplace>, args: &CheckoutArgs) -> renaissance::Result<()> {
    let manager = SessionManager::new(marketplace.clone());
    let session = manager.open_session().await;

    for item_id in &args.items {
        manager.add_to_cart(session, *item_id).await?;
    }

    for entry in manager.cart(session).await? {
        println!(
            "  {} by {} ({})",
            entry.item.title,
            entry.item.artist,
            marketplace.format_amount(entry.price())
        );
    }

    let record = manager.checkout(session, &args.payment()).await?;
    let tax_pct = format_percent(record.tax_rate * rust_decimal::Decimal::ONE_HUNDRED);

    println!("✅ Transaction {} settled", record.reference);
    println!("  Items:     {}", record.item_count);
    println!("  Subtotal:  {}", marketplace.format_amount(record.subtotal));
    println!("  Tax ({}): {}", tax_pct, marketplace.format_amount(record.tax));
    println!("  Total:     {}", marketplace.format_amount(record.gross_total));
    println!("  Paid with: {}", record.payment_method);

    if let Some(dir) = &args.export {
        let ledger = manager.ledger(session).await?;
        let exporter = LedgerExporter::new(LocalStorage::new(dir));
        for path in exporter.export(&ledger).await? {
            println!("📁 Ledger written to: {}", path);
        }
    }

    let closed = manager.close_session(session).await?;
    let settled = closed.ledger().total_settled()?;
    let tax = closed.ledger().total_tax()?;
    tracing::debug!(settled = %settled, tax = %tax, "session totals");
    Ok(())
}
