use catalog_export::{
    load_records, CatalogExporter, CatalogFilter, Category, ExportError, PriceOrder,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Export the supplement catalog as a paginated PDF", long_about = None)]
struct Args {
    /// JSON array of catalog records
    catalog: PathBuf,

    /// Directory the PDF is written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// JSON export configuration (branding, contact, theme, geometry, images)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Root directory that image locators resolve against
    #[arg(long, default_value = "public")]
    assets: PathBuf,

    /// Keep records whose product name or flavors contain this text
    #[arg(long)]
    search: Option<String>,

    /// Keep one category, by slug (e.g. "proteina")
    #[arg(long)]
    category: Option<String>,

    /// Keep one brand
    #[arg(long)]
    brand: Option<String>,

    /// Order records by price within each category
    #[arg(long, value_enum)]
    sort: Option<SortArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for PriceOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => PriceOrder::Ascending,
            SortArg::Desc => PriceOrder::Descending,
        }
    }
}

impl Args {
    fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            search: self.search.clone(),
            category: self.category.as_deref().map(Category::from_slug),
            brand: self.brand.clone(),
            price_order: self.sort.map(PriceOrder::from),
        }
    }
}

async fn run(args: Args) -> Result<(), ExportError> {
    let mut builder = CatalogExporter::builder().with_asset_dir(&args.assets);
    if let Some(path) = &args.config {
        builder = builder.with_config_file(path)?;
    }
    let exporter = builder.build()?;

    let records = args.filter().apply(&load_records(&args.catalog)?);
    let artifact = exporter.export(&records).await?;
    let path = artifact.write_to(&args.output)?;

    println!(
        "Generated {} ({} records, {} pages)",
        path.display(),
        artifact.rows_rendered,
        artifact.page_count
    );
    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "catalog_export=info";

/// Logging honours `RUST_LOG` and falls back to info-level export logs.
fn logger() -> env_logger::Builder {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
}

#[tokio::main]
async fn main() -> ExitCode {
    logger().init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
