use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dreambuild_lib::commands::design::generate_architecture_image;
use dreambuild_lib::commands::estimate::{generate_cost_estimate, EstimateReport};
use dreambuild_lib::commands::pros::{find_local_pros, NO_MAP_LOCATIONS_MESSAGE};
use dreambuild_lib::commands::GenerationContext;
use dreambuild_lib::config::{resolve_api_key, AppConfig, SecretsConfig};
use dreambuild_lib::parsers::{decode_data_uri, map_source_cards};
use dreambuild_lib::server::{self, ServerAppState};
use dreambuild_lib::shutdown::{register_signal_handlers, ShutdownState};
use dreambuild_lib::{HouseSpecs, ProfessionalCategory, ViewMode};
use std::path::PathBuf;

/// DreamBuild - AI home design, cost estimates and local professionals for Pakistan
#[derive(Parser, Debug)]
#[command(name = "dreambuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.dreambuild/config.toml)
    #[arg(long, global = true, env = "DREAMBUILD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the browser app (HTTP + WebSocket)
    Serve {
        /// Port to bind the server to
        #[arg(long, env = "DREAMBUILD_PORT")]
        port: Option<u16>,

        /// Address to bind the server to
        #[arg(long, env = "DREAMBUILD_BIND")]
        bind: Option<String>,

        /// Allowed CORS origins, comma separated (default: any)
        #[arg(long, value_delimiter = ',')]
        cors_origins: Option<Vec<String>>,
    },

    /// Render one visualization and save it as a PNG
    Visualize {
        #[command(flatten)]
        specs: SpecArgs,

        /// exterior, interior or garden
        #[arg(long, default_value = "exterior")]
        view: ViewMode,

        #[arg(long, short, default_value = "dreambuild.png")]
        output: PathBuf,
    },

    /// Print a construction cost estimate
    Estimate {
        #[command(flatten)]
        specs: SpecArgs,

        /// Print the raw estimate as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find local professionals in a city
    Pros {
        #[arg(long, default_value = "Karachi")]
        city: String,

        /// architects, contractors or suppliers
        #[arg(long, default_value = "architects")]
        category: ProfessionalCategory,
    },
}

/// House specification overrides; unset fields keep their defaults
#[derive(Args, Debug)]
struct SpecArgs {
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    plot_size: Option<String>,
    #[arg(long)]
    dimensions: Option<String>,
    #[arg(long)]
    floors: Option<u32>,
    #[arg(long)]
    style: Option<String>,
    #[arg(long)]
    exterior_color: Option<String>,
    #[arg(long)]
    layout: Option<String>,
    #[arg(long)]
    features: Option<String>,
}

impl SpecArgs {
    fn into_specs(self) -> HouseSpecs {
        let defaults = HouseSpecs::default();
        HouseSpecs {
            city: self.city.unwrap_or(defaults.city),
            plot_size: self.plot_size.unwrap_or(defaults.plot_size),
            dimensions: self.dimensions.unwrap_or(defaults.dimensions),
            floors: self.floors.unwrap_or(defaults.floors),
            style: self.style.unwrap_or(defaults.style),
            exterior_color: self.exterior_color.unwrap_or(defaults.exterior_color),
            layout: self.layout.unwrap_or(defaults.layout),
            features: self.features.unwrap_or(defaults.features),
            budget: defaults.budget,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    let secrets = SecretsConfig::load().unwrap_or_else(|e| {
        log::warn!("Ignoring secrets file: {}", e);
        SecretsConfig::default()
    });
    let api_key = resolve_api_key(|name| std::env::var(name).ok(), &secrets).context(
        "No Gemini API key configured. Set GEMINI_API_KEY (or API_KEY), \
         or add gemini_api_key to ~/.dreambuild/secrets.toml",
    )?;

    let ctx = dreambuild_lib::gemini_context(&config, &api_key)?;
    log::info!(
        "Using models {} (image) and {} (text)",
        ctx.image_model,
        ctx.text_model
    );

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    rt.block_on(async move {
        match cli.command {
            Command::Serve {
                port,
                bind,
                cors_origins,
            } => {
                let port = port.unwrap_or(config.server.port);
                let bind = bind.unwrap_or_else(|| config.server.bind.clone());
                let cors_origins = cors_origins.unwrap_or_else(|| config.server.cors_origins.clone());
                serve(ctx, port, &bind, cors_origins).await
            }
            Command::Visualize {
                specs,
                view,
                output,
            } => visualize(&ctx, specs.into_specs(), view, output).await,
            Command::Estimate { specs, json } => estimate(&ctx, specs.into_specs(), json).await,
            Command::Pros { city, category } => pros(&ctx, &city, category).await,
        }
    })
}

async fn serve(
    ctx: GenerationContext,
    port: u16,
    bind: &str,
    cors_origins: Vec<String>,
) -> Result<()> {
    let shutdown_state = ShutdownState::new();
    if let Err(e) = register_signal_handlers(shutdown_state.clone()) {
        log::warn!("Failed to register signal handlers: {}", e);
    }

    let state = ServerAppState::new(shutdown_state, ctx);
    server::run_server(port, bind, state, cors_origins)
        .await
        .map_err(anyhow::Error::msg)
}

async fn visualize(
    ctx: &GenerationContext,
    specs: HouseSpecs,
    view: ViewMode,
    output: PathBuf,
) -> Result<()> {
    if !specs.is_ready() {
        bail!("City and plot size are required");
    }

    println!("Designing your {} home in {}...", specs.style, specs.city);
    let uri = generate_architecture_image(ctx.backend.as_ref(), &ctx.image_model, &specs, view)
        .await?;
    let bytes = decode_data_uri(&uri).map_err(anyhow::Error::msg)?;

    std::fs::write(&output, bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Saved {} view to {}", view, output.display());
    Ok(())
}

async fn estimate(ctx: &GenerationContext, specs: HouseSpecs, json: bool) -> Result<()> {
    if !specs.is_ready() {
        bail!("City and plot size are required");
    }

    let estimate = generate_cost_estimate(ctx.backend.as_ref(), &ctx.text_model, &specs).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    let report = EstimateReport::from_estimate(&estimate);
    println!(
        "Based on current market rates in {} for a {} plot.\n",
        specs.city, specs.plot_size
    );
    println!("Total Estimated Cost: {}\n", report.total_display);
    for row in &report.rows {
        println!("  {:<28} {:>22}", row.category, row.amount_display);
        if !row.description.is_empty() {
            println!("    {}", row.description);
        }
    }
    println!("\n{}", report.summary);
    Ok(())
}

async fn pros(ctx: &GenerationContext, city: &str, category: ProfessionalCategory) -> Result<()> {
    if city.is_empty() {
        bail!("A city is required");
    }

    let result = find_local_pros(
        ctx.backend.as_ref(),
        &ctx.text_model,
        city,
        category.search_phrase(),
        ctx.grounding,
    )
    .await?;

    println!("{}\n", result.text);

    if result.chunks.is_empty() {
        println!("{}", NO_MAP_LOCATIONS_MESSAGE);
    }
    for card in map_source_cards(&result.chunks) {
        println!("* {} - {}", card.title, card.uri);
        for snippet in card.review_snippets {
            println!("    \"{}\"", snippet);
        }
    }
    Ok(())
}
