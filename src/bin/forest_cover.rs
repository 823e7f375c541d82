use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use forest_cover::{Client, DateSpec, Percent, SquareKm};
use forest_cover::{series, stats, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "forest-cover",
    version,
    about = "Fetch World Bank land & forest indicators and chart estimated forest area"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch both indicator series, join them, and render per-year histograms.
    Plot(PlotArgs),
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Years to fetch, separated by comma or semicolon (e.g., 1990,2000,2005)
    #[arg(short, long, default_value = "1990,2000,2005")]
    years: String,
    /// Indicator code for total area in km²
    #[arg(long, default_value = "AG.SRF.TOTL.K2")]
    area_indicator: String,
    /// Indicator code for forest cover as percent of land
    #[arg(long, default_value = "AG.LND.FRST.ZS")]
    forest_indicator: String,
    /// API base URL
    #[arg(long, default_value = "https://api.worldbank.org/v2")]
    base_url: String,
    /// API key (falls back to the WORLD_BANK_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,
    /// Chart output path (.svg or .png)
    #[arg(long, default_value = "forest.svg")]
    out: PathBuf,
    /// Width of the plot (default 1200).
    #[arg(long, default_value_t = 1200)]
    width: u32,
    /// Height of the plot (default 700).
    #[arg(long, default_value_t = 700)]
    height: u32,
    /// Locale for axis tick labels (e.g., en or de)
    #[arg(long, default_value = "en")]
    locale: String,
    /// Chart title
    #[arg(long, default_value = "Forest area by region")]
    title: String,
    /// Print the joined raw records as JSON to stdout.
    #[arg(long, default_value_t = false)]
    dump: bool,
}

fn parse_years(s: &str) -> Result<Vec<i32>> {
    let years: Vec<i32> = s
        .split([',', ';'])
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .map(|x| x.parse::<i32>().with_context(|| format!("invalid year {x:?}")))
        .collect::<Result<_>>()?;
    if years.is_empty() {
        anyhow::bail!("at least one year required");
    }
    Ok(years)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
    }
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let years = parse_years(&args.years)?;
    let api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var("WORLD_BANK_API_KEY").ok());
    let client = Client::new(args.base_url.clone(), api_key);

    let regions = client.fetch_regions().context("fetch region catalog")?;
    eprintln!("Fetched {} regions", regions.len());

    // One fetch task per (indicator, year); area requests first, then forest.
    let mut requests = Vec::with_capacity(2 * years.len());
    for code in [&args.area_indicator, &args.forest_indicator] {
        for &y in &years {
            requests.push((code.clone(), DateSpec::Year(y)));
        }
    }
    let fetched = client.fetch_all(&requests).context("fetch indicators")?;

    let area_records: Vec<_> = fetched[..years.len()]
        .iter()
        .flat_map(|pages| series::extract_records(pages))
        .collect();
    let forest_records: Vec<_> = fetched[years.len()..]
        .iter()
        .flat_map(|pages| series::extract_records(pages))
        .collect();
    eprintln!(
        "Extracted {} area records, {} forest records",
        area_records.len(),
        forest_records.len()
    );

    if args.dump {
        println!("{}", serde_json::to_string_pretty(&area_records)?);
        println!("{}", serde_json::to_string_pretty(&forest_records)?);
    }

    let areas = series::build_series::<SquareKm>(&area_records)?;
    let forests = series::build_series::<Percent>(&forest_records)?;

    let qualifying = stats::available_regions(&areas, &forests, &years, &regions);
    if qualifying.is_empty() {
        anyhow::bail!("no region has data in both series for every requested year");
    }
    let per_year = stats::yearly_stats(&years, &qualifying, &areas, &forests);

    viz::plot_histograms_locale(
        &qualifying,
        &per_year,
        &args.out,
        args.width,
        args.height,
        &args.locale,
        &args.title,
    )?;
    eprintln!(
        "Wrote plot for {} regions x {} years to {}",
        qualifying.len(),
        years.len(),
        args.out.display()
    );

    Ok(())
}
