//! Market analysis CLI
//!
//! # Usage
//!
//! ```bash
//! # Point at any OpenAI-compatible endpoint
//! export OPENAI_API_KEY="sk-..."
//! export OPENAI_MODEL="gpt-4"            # optional
//! export OPENAI_API_BASE="https://..."   # optional
//!
//! marketlens analyze EURUSD=X --style technical
//! marketlens quote AAPL
//! marketlens symbols
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use lens_analysis::{AnalysisEngine, AnalysisStyle, EngineConfig};
use lens_llm::providers::{OpenAIConfig, OpenAIProvider};
use lens_market::{Instrument, Quote, YahooMarketData, market_categories};
use std::env;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "marketlens")]
#[command(about = "AI-assisted market analysis from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch market data and generate an LLM trading analysis
    Analyze {
        /// Instrument symbol (e.g. AAPL, EURUSD=X, BTC-USD)
        symbol: String,

        /// Analysis style: general, technical or multi-horizon
        #[arg(short, long, default_value_t = AnalysisStyle::Technical)]
        style: AnalysisStyle,
    },

    /// Fetch the current quote and history without generating an analysis
    Quote {
        /// Instrument symbol
        symbol: String,
    },

    /// List the known symbols by market category
    Symbols,
}

#[tokio::main]
async fn main() -> Result<()> {
    lens_utils::init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze { symbol, style } => analyze(&symbol, style).await,
        Command::Quote { symbol } => quote(&symbol).await,
        Command::Symbols => {
            print_symbols();
            Ok(())
        }
    }
}

fn build_engine() -> Result<AnalysisEngine> {
    let market = Arc::new(YahooMarketData::new());

    let api_key = env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: OPENAI_API_KEY not set, analysis requests will likely fail");
        "not-needed".to_string()
    });
    let mut llm_config = OpenAIConfig::new(api_key);
    if let Ok(api_base) = env::var("OPENAI_API_BASE") {
        llm_config = llm_config.with_api_base(api_base);
    }
    let llm = Arc::new(OpenAIProvider::with_config(llm_config)?);

    let mut engine_config = EngineConfig::default();
    if let Ok(model) = env::var("OPENAI_MODEL") {
        engine_config.model = model;
    }

    Ok(AnalysisEngine::with_config(market, llm, engine_config))
}

async fn analyze(symbol: &str, style: AnalysisStyle) -> Result<()> {
    let engine = build_engine()?;
    println!("Analyzing {} ({style})...\n", symbol.to_uppercase());

    let bundle = engine.analyze(symbol, style).await?;
    print_quote_card(&bundle.instrument, &bundle.quote);

    if bundle.sections.is_empty() {
        // The model ignored the markers; show its raw text instead
        println!("\n{}", bundle.analysis.trim());
    } else {
        for section in &bundle.sections {
            println!("\n── {} ──", section.title);
            println!("{}", section.content);
        }
    }

    Ok(())
}

async fn quote(symbol: &str) -> Result<()> {
    let engine = build_engine()?;
    let snapshot = engine.market_data(symbol).await?;

    print_quote_card(&snapshot.instrument, &snapshot.quote);
    println!("{} daily bars fetched", snapshot.historical.len());
    Ok(())
}

fn print_quote_card(instrument: &Instrument, quote: &Quote) {
    let decimals = if instrument.is_forex() { 5 } else { 2 };
    let price = |value: f64| {
        if value > 0.0 {
            format!("${value:.decimals$}")
        } else {
            "N/A".to_string()
        }
    };

    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Symbol".to_string(), instrument.display_symbol().to_string()]);
    table.add_row(vec!["Price".to_string(), price(quote.regular_market_price)]);
    table.add_row(vec![
        "Previous Close".to_string(),
        price(quote.regular_market_previous_close),
    ]);
    table.add_row(vec![
        "Day Range".to_string(),
        format!(
            "{} - {}",
            price(quote.regular_market_day_low),
            price(quote.regular_market_day_high)
        ),
    ]);
    table.add_row(vec![
        "Volume".to_string(),
        if quote.regular_market_volume > 0 {
            quote.regular_market_volume.to_string()
        } else {
            "N/A".to_string()
        },
    ]);
    table.add_row(vec![
        "52-Week Range".to_string(),
        format!(
            "{} - {}",
            price(quote.fifty_two_week_low),
            price(quote.fifty_two_week_high)
        ),
    ]);
    table.add_row(vec![
        "Change".to_string(),
        format!("{:+.2}%", quote.regular_market_change_percent),
    ]);

    println!("{table}");
}

fn print_symbols() {
    for category in market_categories() {
        println!("\n{} ({})", category.name, category.id);
        for listed in category.symbols {
            println!("  {:<10} {}", listed.symbol, listed.name);
        }
    }
}
