use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::{Style, Term};
use gpu_prices_core::{
    apply_filters, assist,
    config::Config,
    fallback,
    provider::{determine_region, display_name, find_provider, provider_for_url, PROVIDERS},
    scrape::{FirecrawlClient, OfflineScraper, Scraper},
    stats::provider_stats,
    store::{FileStore, ListingStore},
    update::{run_reset, run_update, ProviderOutcome, UpdateReport, UpdateRequest},
    FilterState, GpuListing, NormalizeError, Normalizer, SortDirection, SortKey,
};
use tracing_subscriber::EnvFilter;

// ── Palette ──────────────────────────────────────────────────────────

fn s_header() -> Style { Style::new().color256(252).bold() }  // bright gray, bold
fn s_dim() -> Style    { Style::new().color256(248) }         // light gray
fn s_tree() -> Style   { Style::new().color256(245) }         // mid gray
fn s_hint() -> Style   { Style::new().color256(243) }         // soft gray
fn s_hot() -> Style    { Style::new().color256(114) }         // green
fn s_warm() -> Style   { Style::new().color256(214) }         // amber
fn s_err() -> Style    { Style::new().color256(167) }         // red
fn s_price() -> Style  { Style::new().color256(109) }         // teal
fn s_bold() -> Style   { Style::new().bold() }
fn s_label() -> Style  { Style::new().color256(146) }         // muted lavender

fn sep(width: usize) -> String {
    s_tree().apply_to("\u{2500}".repeat(width)).to_string()
}

fn fmt_price(v: f64) -> String {
    format!("${v:.4}")
}

fn fmt_price_short(v: f64) -> String {
    format!("${v:.2}")
}

fn fmt_vram(gb: u32) -> String {
    if gb >= 1000 {
        format!("{:.1} TB", gb as f64 / 1000.0)
    } else {
        format!("{gb} GB")
    }
}

fn fmt_relative(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - at).num_seconds();
    if secs < 60 {
        return "just now".to_string();
    }
    let (n, unit) = if secs < 3_600 {
        (secs / 60, "minute")
    } else if secs < 86_400 {
        (secs / 3_600, "hour")
    } else {
        (secs / 86_400, "day")
    };
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

// ── CLI Args ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "gpu-prices",
    about = "Scrape, normalize and compare cloud GPU rental prices",
    version,
    after_help = "examples:\n  \
        gpu-prices update                        (refresh stale providers)\n  \
        gpu-prices update --force --offline      (store fallback data for all)\n  \
        gpu-prices list --min-vram 48 --sort price-per-gb\n  \
        gpu-prices list -p runpod -p vast --search H100\n  \
        gpu-prices normalize scrape.json -p digitalOcean\n  \
        gpu-prices scrape https://vast.ai/pricing   (live scrape, then normalize)\n  \
        gpu-prices reset --offline               (wipe the store, reload fallbacks)\n  \
        gpu-prices ask \"For a tight budget, try an A6000 on Vast\""
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v info, -vv debug). RUST_LOG works too.
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file [default: <config dir>/gpu-prices/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Listings store [default: <cache dir>/gpu-prices/listings.json]
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known providers.
    Providers,
    /// Normalize a scrape result (JSON file, or - for stdin).
    Normalize {
        input: String,
        #[arg(long, short)]
        provider: String,
        #[arg(long, short)]
        json: bool,
    },
    /// Show the fallback catalog for a provider.
    Fallback {
        provider: String,
        #[arg(long, short)]
        json: bool,
    },
    /// Scrape providers and store their listings.
    Update {
        /// Provider keys; default is every stale provider.
        providers: Vec<String>,
        /// Update all providers when none is stale.
        #[arg(long)]
        force: bool,
        /// Skip scraping and store fallback data.
        #[arg(long)]
        offline: bool,
        #[arg(long, short)]
        json: bool,
    },
    /// Clear the store, then repopulate every registered provider.
    Reset {
        /// Skip scraping and store fallback data.
        #[arg(long)]
        offline: bool,
        #[arg(long, short)]
        json: bool,
    },
    /// Scrape any page and show what the normalizer makes of it.
    Scrape {
        url: String,
        /// CSS selector to wait for before the page is captured.
        #[arg(long)]
        wait_for_selector: Option<String>,
        /// Provider key for names and region [default: matched from the URL]
        #[arg(long, short)]
        provider: Option<String>,
        #[arg(long, short)]
        json: bool,
    },
    /// Filtered, sorted table of stored listings.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, short)]
        json: bool,
    },
    /// Best prices per provider.
    Stats {
        #[arg(long, short)]
        json: bool,
    },
    /// Turn an assistant answer into filters and price notes.
    Ask {
        text: String,
        #[arg(long, short)]
        json: bool,
    },
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    min_vram: Option<u32>,
    #[arg(long)]
    max_vram: Option<u32>,
    /// USD per hour.
    #[arg(long)]
    min_price: Option<f64>,
    /// USD per hour.
    #[arg(long)]
    max_price: Option<f64>,
    /// Provider key or name; repeatable.
    #[arg(long, short)]
    provider: Vec<String>,
    /// Matches model, provider or region.
    #[arg(long, short)]
    search: Option<String>,
    /// price, price-per-gb or vram
    #[arg(long)]
    sort: Option<SortKey>,
    #[arg(long, conflicts_with = "desc")]
    asc: bool,
    #[arg(long)]
    desc: bool,
}

impl FilterArgs {
    fn to_state(&self) -> FilterState {
        let mut f = FilterState::default();
        if let Some(v) = self.min_vram {
            f.vram_range.0 = v;
        }
        if let Some(v) = self.max_vram {
            f.vram_range.1 = v;
        }
        if let Some(p) = self.min_price {
            f.price_range.0 = p;
        }
        if let Some(p) = self.max_price {
            f.price_range.1 = p;
        }
        f.selected_providers = self.provider.iter().map(|p| provider_name(p)).collect();
        if let Some(s) = &self.search {
            f.search_term = s.clone();
        }
        if let Some(key) = self.sort {
            f.sort_by = key;
            f.sort_direction = match key {
                SortKey::Vram => SortDirection::Desc,
                _ => SortDirection::Asc,
            };
        }
        if self.asc {
            f.sort_direction = SortDirection::Asc;
        }
        if self.desc {
            f.sort_direction = SortDirection::Desc;
        }
        f
    }
}

/// Listings carry display names; accept a registry key as well.
fn provider_name(input: &str) -> String {
    find_provider(input)
        .map(|p| p.display_name.to_string())
        .unwrap_or_else(|| input.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let store = cli.store.as_deref();

    match cli.command {
        Commands::Providers => cmd_providers(),
        Commands::Normalize {
            input,
            provider,
            json,
        } => cmd_normalize(&config, &input, &provider, json)?,
        Commands::Fallback { provider, json } => cmd_fallback(&provider, json)?,
        Commands::Update {
            providers,
            force,
            offline,
            json,
        } => {
            let request = UpdateRequest { force, providers };
            cmd_update(&config, store, Some(&request), offline, json).await?;
        }
        Commands::Reset { offline, json } => cmd_update(&config, store, None, offline, json).await?,
        Commands::Scrape {
            url,
            wait_for_selector,
            provider,
            json,
        } => cmd_scrape(&config, &url, wait_for_selector.as_deref(), provider.as_deref(), json).await?,
        Commands::List { filter, json } => cmd_list(store, &filter, json)?,
        Commands::Stats { json } => cmd_stats(store, json)?,
        Commands::Ask { text, json } => cmd_ask(store, &text, json)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_store(path: Option<&Path>) -> anyhow::Result<FileStore> {
    Ok(match path {
        Some(p) => FileStore::open(p)?,
        None => FileStore::open_default()?,
    })
}

// ── Providers ────────────────────────────────────────────────────────

fn cmd_providers() {
    println!();
    println!("{}", s_header().apply_to("gpu providers"));
    println!("{}", sep(72));

    for p in PROVIDERS {
        println!(
            "  {:<15} {:<15} {:<14} {}",
            s_bold().apply_to(p.key),
            s_dim().apply_to(p.display_name),
            s_label().apply_to(p.region),
            s_hint().apply_to(p.url)
        );
    }

    println!("{}", sep(72));
    println!(
        "{}",
        s_hint().apply_to(format!(
            "  {} providers   gpu-prices fallback <key> for built-in prices",
            PROVIDERS.len()
        ))
    );
    println!();
}

// ── Normalize ────────────────────────────────────────────────────────

fn cmd_normalize(config: &Config, input: &str, provider: &str, json: bool) -> anyhow::Result<()> {
    let text = if input == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };
    let raw: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("{input} is not valid JSON"))?;

    let (listings, reason) = normalize_or_fallback(config, &raw, provider);

    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }
    print_normalized(provider, &listings, reason.as_ref());
    Ok(())
}

/// Listings plus the reason fallback data was served instead, if it was.
fn normalize_or_fallback(
    config: &Config,
    raw: &serde_json::Value,
    provider: &str,
) -> (Vec<GpuListing>, Option<NormalizeError>) {
    let normalizer = Normalizer::with_policy(config.normalize.clone());
    match normalizer.try_normalize(Some(raw), provider) {
        Ok(l) => (l, None),
        Err(e) => (fallback::fallback_listings(provider), Some(e)),
    }
}

fn print_normalized(provider: &str, listings: &[GpuListing], reason: Option<&NormalizeError>) {
    println!();
    println!(
        "{}  {}",
        s_bold().apply_to(display_name(provider)),
        s_dim().apply_to(determine_region(provider))
    );
    println!("{}", sep(72));
    if let Some(e) = reason {
        println!("  {}", s_warm().apply_to(format!("fallback data: {e}")));
        println!();
    }
    print_listings(listings);
    println!("{}", sep(72));
    println!(
        "{}",
        s_hint().apply_to(format!("  {} listings", listings.len()))
    );
    println!();
}

// ── Scrape ───────────────────────────────────────────────────────────

const RAW_PREVIEW_CHARS: usize = 2000;

async fn cmd_scrape(
    config: &Config,
    url: &str,
    wait_for_selector: Option<&str>,
    provider: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let registered = match provider {
        Some(key) => find_provider(key),
        None => provider_for_url(url),
    };
    let key = provider
        .or(registered.map(|p| p.key))
        .unwrap_or("custom");
    let wait = wait_for_selector.or(registered.map(|p| p.wait_for_selector));

    let client = FirecrawlClient::new(&config.firecrawl)?;
    let term = Term::stderr();
    if !json {
        term.write_line(&format!("{}", s_dim().apply_to(format!("scraping {url}..."))))?;
    }
    let raw = client.scrape_url(url, wait).await?.unwrap_or(serde_json::Value::Null);
    let (listings, reason) = normalize_or_fallback(config, &raw, key);

    if json {
        let out = serde_json::json!({
            "provider": key,
            "raw": raw,
            "listings": listings,
            "fallbackReason": reason.map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("{}", s_header().apply_to("raw payload"));
    println!("{}", sep(72));
    let pretty = serde_json::to_string_pretty(&raw)?;
    let preview: String = pretty.chars().take(RAW_PREVIEW_CHARS).collect();
    println!("{preview}");
    if preview.len() < pretty.len() {
        println!(
            "{}",
            s_hint().apply_to(format!("  ... truncated, {} bytes total (use --json)", pretty.len()))
        );
    }
    print_normalized(key, &listings, reason.as_ref());
    Ok(())
}

// ── Fallback ─────────────────────────────────────────────────────────

fn cmd_fallback(provider: &str, json: bool) -> anyhow::Result<()> {
    let listings = fallback::fallback_listings(provider);
    if json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    let known = find_provider(provider).is_some();
    println!();
    println!(
        "{}  {}",
        s_bold().apply_to(format!("{} fallback catalog", display_name(provider))),
        s_dim().apply_to(determine_region(provider))
    );
    println!("{}", sep(72));
    if !known {
        println!(
            "  {}",
            s_warm().apply_to(format!("unknown provider '{provider}', showing the default catalog"))
        );
        println!();
    }
    print_listings(&listings);
    println!("{}", sep(72));
    println!();
    Ok(())
}

// ── Update ───────────────────────────────────────────────────────────

/// `request` of `None` resets the store instead of updating it.
async fn cmd_update(
    config: &Config,
    store_path: Option<&Path>,
    request: Option<&UpdateRequest>,
    offline: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut store = open_store(store_path)?;
    let normalizer = Normalizer::with_policy(config.normalize.clone());

    let term = Term::stderr();
    if !json {
        let status = if request.is_some() { "updating prices..." } else { "resetting store..." };
        term.write_line(&format!("{}", s_dim().apply_to(status)))?;
    }

    let report = if offline {
        refresh(&OfflineScraper, &mut store, &normalizer, request, config).await?
    } else {
        let client = FirecrawlClient::new(&config.firecrawl)
            .context("pass --offline to store fallback data without scraping")?;
        refresh(&client, &mut store, &normalizer, request, config).await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_update_report(&report, config.update.stale_after_hours, store.path());
    Ok(())
}

async fn refresh<S: Scraper>(
    scraper: &S,
    store: &mut FileStore,
    normalizer: &Normalizer,
    request: Option<&UpdateRequest>,
    config: &Config,
) -> gpu_prices_core::error::Result<UpdateReport> {
    match request {
        Some(r) => run_update(scraper, store, normalizer, r, &config.update).await,
        None => run_reset(scraper, store, normalizer, &config.update).await,
    }
}

fn print_update_report(report: &UpdateReport, stale_after_hours: u64, path: &Path) {
    println!();
    if report.results.is_empty() {
        println!(
            "  {}",
            s_dim().apply_to(format!(
                "nothing to update, every provider was scraped in the last {stale_after_hours}h"
            ))
        );
        println!(
            "  {}",
            s_hint().apply_to("gpu-prices update --force to refresh anyway")
        );
        println!();
        return;
    }

    for (key, outcome) in &report.results {
        match outcome {
            ProviderOutcome::Updated { count } => println!(
                "  {} {:<15} {}",
                s_hot().apply_to("\u{2713}"),
                s_bold().apply_to(key),
                s_dim().apply_to(format!("{count} listings"))
            ),
            ProviderOutcome::Failed { error } => println!(
                "  {} {:<15} {}",
                s_err().apply_to("\u{2717}"),
                s_bold().apply_to(key),
                s_err().apply_to(error)
            ),
        }
    }
    println!();
    println!(
        "  {}",
        s_hint().apply_to(format!(
            "{} of {} updated, stored in {}",
            report.updated,
            report.results.len(),
            path.display()
        ))
    );
    println!();
}

// ── List ─────────────────────────────────────────────────────────────

fn cmd_list(store_path: Option<&Path>, filter: &FilterArgs, json: bool) -> anyhow::Result<()> {
    let store = open_store(store_path)?;
    let all = store.all_listings()?;
    let state = filter.to_state();
    let rows = apply_filters(&all, &state);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if all.is_empty() {
        eprintln!("{}", s_err().apply_to("error: no listings stored yet"));
        eprintln!(
            "{}",
            s_dim().apply_to("  Run gpu-prices update (or update --offline) first")
        );
        return Ok(());
    }

    println!();
    println!(
        "{}  {}",
        s_header().apply_to("gpu listings"),
        s_dim().apply_to(format!("{} of {}", rows.len(), all.len()))
    );
    println!("{}", sep(72));
    if rows.is_empty() {
        println!("  {}", s_dim().apply_to("no listings match these filters"));
    } else {
        print_listings(&rows);
    }
    println!("{}", sep(72));

    let newest = store.scrape_log()?.into_iter().map(|(_, at)| at).max();
    if let Some(at) = newest {
        println!(
            "{}",
            s_hint().apply_to(format!("  last updated {}", fmt_relative(at, Utc::now())))
        );
    }
    println!();
    Ok(())
}

// ── Stats ────────────────────────────────────────────────────────────

fn cmd_stats(store_path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let store = open_store(store_path)?;
    let all = store.all_listings()?;
    let stats = provider_stats(&all);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    if stats.is_empty() {
        eprintln!("{}", s_err().apply_to("error: no listings stored yet"));
        return Ok(());
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("  Provider").fg(Color::AnsiValue(243)),
        Cell::new("GPUs").fg(Color::AnsiValue(243)),
        Cell::new("Best $/hr").fg(Color::AnsiValue(243)),
        Cell::new("Best $/GB/hr").fg(Color::AnsiValue(243)),
        Cell::new("Updated").fg(Color::AnsiValue(243)),
    ]);

    for (i, s) in stats.iter().enumerate() {
        let updated = PROVIDERS
            .iter()
            .find(|p| p.display_name == s.provider)
            .and_then(|p| store.last_scraped(p.key).ok().flatten())
            .map(|at| fmt_relative(at, now))
            .unwrap_or_else(|| "-".to_string());
        let per_gb_color = if i == 0 { 114 } else { 109 };
        table.add_row(vec![
            Cell::new(format!("  {}", s.provider)).fg(Color::AnsiValue(252)),
            Cell::new(s.gpu_count).set_alignment(CellAlignment::Right),
            Cell::new(fmt_price_short(s.best_price))
                .fg(Color::AnsiValue(109))
                .set_alignment(CellAlignment::Right),
            Cell::new(fmt_price(s.best_price_per_gb))
                .fg(Color::AnsiValue(per_gb_color))
                .set_alignment(CellAlignment::Right),
            Cell::new(updated).fg(Color::AnsiValue(248)),
        ]);
    }

    println!();
    println!("{}", s_header().apply_to("provider stats"));
    println!("{}", sep(72));
    println!("{table}");
    println!("{}", sep(72));
    if let Some(best) = stats.first() {
        println!(
            "{}",
            s_hint().apply_to(format!(
                "  best value: {} at {} per GB of VRAM{}",
                best.provider,
                fmt_price(best.best_price_per_gb),
                best.website_url.map(|u| format!("   {u}")).unwrap_or_default()
            ))
        );
    }
    println!();
    Ok(())
}

// ── Ask ──────────────────────────────────────────────────────────────

fn cmd_ask(store_path: Option<&Path>, text: &str, json: bool) -> anyhow::Result<()> {
    let store = open_store(store_path)?;
    let mut all = store.all_listings()?;
    if all.is_empty() {
        tracing::info!("store is empty, answering from fallback catalogs");
        all = PROVIDERS
            .iter()
            .flat_map(|p| fallback::fallback_listings(p.key))
            .collect();
    }

    let filters = assist::filters_from_response(text);
    let rows = apply_filters(&all, &filters);
    let notes = assist::recommendation_notes(text, &all);

    if json {
        let out = serde_json::json!({
            "filters": filters,
            "listings": rows,
            "notes": notes,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("{}", s_header().apply_to("filters"));
    println!("{}", sep(72));
    print_filters(&filters);
    println!("{}", sep(72));
    if rows.is_empty() {
        println!("  {}", s_dim().apply_to("no listings match"));
    } else {
        print_listings(&rows[..rows.len().min(10)]);
        if rows.len() > 10 {
            println!(
                "{}",
                s_hint().apply_to(format!("  ... {} more", rows.len() - 10))
            );
        }
    }

    if !notes.is_empty() {
        println!("{}", sep(72));
        for n in &notes {
            println!("  {}", s_price().apply_to(n));
        }
    }
    println!();
    Ok(())
}

fn print_filters(f: &FilterState) {
    let dir = match f.sort_direction {
        SortDirection::Asc => "ascending",
        SortDirection::Desc => "descending",
    };
    let sort = match f.sort_by {
        SortKey::Price => "price",
        SortKey::PricePerGb => "price per GB",
        SortKey::Vram => "VRAM",
    };
    let rows = [
        ("sort", format!("{sort}, {dir}")),
        ("vram", format!("{} to {}", fmt_vram(f.vram_range.0), fmt_vram(f.vram_range.1))),
        (
            "price",
            format!("{} to {}", fmt_price_short(f.price_range.0), fmt_price_short(f.price_range.1)),
        ),
        (
            "search",
            if f.search_term.is_empty() { "-".to_string() } else { f.search_term.clone() },
        ),
        (
            "providers",
            if f.selected_providers.is_empty() {
                "all".to_string()
            } else {
                f.selected_providers.join(", ")
            },
        ),
    ];
    for (label, value) in rows {
        println!("  {:<11} {}", s_label().apply_to(label), value);
    }
}

// ── Display ──────────────────────────────────────────────────────────

fn print_listings(listings: &[GpuListing]) {
    let best = listings
        .iter()
        .map(GpuListing::price_per_gb_vram)
        .fold(f64::INFINITY, f64::min);

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("  Provider").fg(Color::AnsiValue(243)),
        Cell::new("GPU").fg(Color::AnsiValue(243)),
        Cell::new("VRAM").fg(Color::AnsiValue(243)),
        Cell::new("$/hr").fg(Color::AnsiValue(243)),
        Cell::new("$/GB/hr").fg(Color::AnsiValue(243)),
        Cell::new("Region").fg(Color::AnsiValue(243)),
    ]);

    for l in listings {
        let per_gb = l.price_per_gb_vram();
        let per_gb_color = if per_gb <= best { 114 } else { 248 };
        table.add_row(vec![
            Cell::new(format!("  {}", l.provider)).fg(Color::AnsiValue(248)),
            Cell::new(&l.gpu_model).fg(Color::AnsiValue(252)),
            Cell::new(fmt_vram(l.vram_gb)).set_alignment(CellAlignment::Right),
            Cell::new(fmt_price_short(l.price_per_hour))
                .fg(Color::AnsiValue(109))
                .set_alignment(CellAlignment::Right),
            Cell::new(fmt_price(per_gb))
                .fg(Color::AnsiValue(per_gb_color))
                .set_alignment(CellAlignment::Right),
            Cell::new(&l.region).fg(Color::AnsiValue(146)),
        ]);
    }
    println!("{table}");
}
