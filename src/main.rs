use anyhow::{Context, Result};
use std::env;

use news_browser::news::Category;
use news_browser::{browser, config, logging, ui};

fn main() -> Result<()> {
    // Before the runtime spawns its workers.
    ui::init_local_offset();
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?
        .block_on(start())
}

async fn start() -> Result<()> {
    // Minimal CLI: optional --config <path> and --category <name>
    let mut args = env::args().skip(1);
    let mut config_override: Option<String> = None;
    let mut category_override: Option<String> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(p) = args.next() {
                    config_override = Some(p);
                }
            }
            "--category" => {
                if let Some(c) = args.next() {
                    category_override = Some(c);
                }
            }
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            other => eprintln!("ignoring unknown argument: {}", other),
        }
    }

    let mut cfg = config::load(config_override)?;
    if let Some(name) = category_override {
        cfg.category = name
            .parse::<Category>()
            .context("invalid --category")?;
    }
    logging::init(cfg.log_file.as_deref())?;
    config::ensure_api_key(&mut cfg)?;

    browser::run(&cfg).await
}

fn print_help() {
    println!("news-browser");
    println!("Usage: news-browser [--config <path>] [--category <name>]");
    println!("  --config <path>     Path to a config.toml");
    println!("  --category <name>   Starting category: general, business, technology,");
    println!("                      entertainment, sports, science or health");
    println!();
    println!("The API key comes from ${} or `api_key` in config.toml.", config::API_KEY_ENV);
}
