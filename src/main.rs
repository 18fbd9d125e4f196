use clap::Parser;
use salon_stylists::config::cli::Command;
use salon_stylists::core::formatting;
use salon_stylists::core::report::{parse_report_date, report_to_csv};
use salon_stylists::domain::ports::StylistStore;
use salon_stylists::utils::error::ErrorSeverity;
use salon_stylists::utils::{logger, validation::Validate};
use salon_stylists::{CliConfig, InMemoryStore, SalonConfig, SalonError, StylistRoster};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 載入配置檔，不存在時使用預設值

    let mut config = if Path::new(&args.config).exists() {
        match SalonConfig::from_file(&args.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    } else {
        SalonConfig::for_data_file("salon.json")
    };
    // 命令列參數優先於配置檔
    if let Some(data_file) = &args.data_file {
        config.store.data_file = data_file.clone();
    }

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose, config.log_level());
    }
    tracing::debug!("CLI args: {:?}", args);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(&config, args.command).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 依錯誤嚴重程度決定結束碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

/// 執行子命令；會修改資料的命令完成後寫回資料檔
async fn run(config: &SalonConfig, command: Command) -> salon_stylists::Result<()> {
    let data_file = &config.store.data_file;
    tracing::info!("📁 Loading salon data from: {}", data_file);
    let roster = StylistRoster::with_settings(InMemoryStore::load(data_file)?, config.roster_settings());

    match command {
        Command::Calendar { salon } => {
            for (column, stylist) in roster.calendar_stylists(salon).await?.iter().enumerate() {
                println!(
                    "{:>3}  {:<24} rent {:>8}  service {:>5}  retail {:>5}",
                    column,
                    stylist.name,
                    formatting::formatted_rent(stylist),
                    formatting::formatted_service_commission_rate(stylist),
                    formatting::formatted_retail_commission_rate(stylist),
                );
            }
        }
        Command::Position { stylist } => {
            let stylist = find_stylist(&roster, stylist).await?;
            println!("{}: {}", stylist.name, roster.position(&stylist).await?);
        }
        Command::Resave { salon } => {
            let updated = roster.resave_salon(salon).await?;
            roster.store().save_to(data_file).await?;
            println!("✅ Recomputed order index for {} stylists", updated);
        }
        Command::Report { stylist, date, csv } => {
            let stylist = find_stylist(&roster, stylist).await?;
            let rows = roster.report(&stylist, &date).await?;
            if csv {
                print!("{}", report_to_csv(&rows)?);
            } else {
                for row in &rows {
                    println!(
                        "{}  {:<20} {:<24} {:>8.2}",
                        row.start_time, row.client_name, row.item_label, row.price
                    );
                }
            }
        }
        Command::PayRent { stylist, date } => {
            let stylist = find_stylist(&roster, stylist).await?;
            let date = date.as_deref().map(parse_report_date).transpose()?;
            let payment = roster.pay_rent(&stylist, date).await?;
            roster.store().save_to(data_file).await?;
            println!("✅ {} paid {:.2} on {}", stylist.name, payment.amount, payment.date);
        }
    }

    Ok(())
}

/// 以 id 取得美髮師，找不到時回傳 NotFound
async fn find_stylist(
    roster: &StylistRoster<InMemoryStore>,
    id: i64,
) -> salon_stylists::Result<salon_stylists::domain::model::Stylist> {
    roster
        .store()
        .stylist(id)
        .await?
        .ok_or(SalonError::NotFound {
            entity: "stylist",
            id,
        })
}
