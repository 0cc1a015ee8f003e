use anyhow::Result;
use clap::{Parser, Subcommand};
use diet_service_client::DietService;
use diet_service_client::config::Config;
use diet_service_client::http_client::ReqwestDietClient;
use diet_service_client::profile::{Activity, Gender, Period, ProfileDraft};
use tracing_subscriber::EnvFilter;

mod recipes;
mod render;
mod storage;

#[derive(Parser)]
#[command(name = "diet-planner")]
#[command(
    about = "Diet planner CLI - profile management, calorie estimation and ration optimization",
    long_about = None
)]
struct Cli {
    /// Diet Service base URL (overrides DIET_SERVICE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Directory holding locally persisted data
    #[arg(long, global = true, default_value = ".diet_planner")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the locally stored profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Estimate the daily calorie norm (TDEE) for the stored profile
    Tdee,

    /// Request a cost-optimized ration for the stored profile
    Optimize,

    /// View products and update prices
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },

    /// List recipes compatible with the stored allergens and dislikes
    Recipes,

    /// Probe the Diet Service
    Health,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Update and save profile fields; omitted fields keep their stored values
    Set {
        /// "female" or "male"
        #[arg(long)]
        gender: Option<Gender>,

        /// Age in years; blank or non-numeric input clears the field
        #[arg(long)]
        age: Option<String>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<String>,

        /// Height in cm
        #[arg(long)]
        height: Option<String>,

        /// "low", "moderate" or "high"
        #[arg(long)]
        activity: Option<Activity>,

        /// "day" or "week"
        #[arg(long)]
        period: Option<Period>,

        /// Replace the allergen list (repeatable)
        #[arg(long = "allergen")]
        allergens: Vec<String>,

        /// Replace the dislike list (repeatable)
        #[arg(long = "dislike")]
        dislikes: Vec<String>,

        /// Drop all stored allergens
        #[arg(long)]
        clear_allergens: bool,

        /// Drop all stored dislikes
        #[arg(long)]
        clear_dislikes: bool,
    },

    /// Print the stored profile
    Show,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products and prices
    List,

    /// Update a product price
    SetPrice {
        /// Product id
        id: i64,

        /// New price per 100 g
        price: f64,
    },
}

fn service_client(base_url: Option<&str>) -> Result<ReqwestDietClient> {
    let config = match base_url {
        Some(url) => Config {
            base_url: url.to_string(),
        },
        None => Config::from_env()?,
    };
    Ok(ReqwestDietClient::from_config(&config))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging from env var `DIET_PLANNER_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("DIET_PLANNER_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = EnvFilter::try_new(&log_env).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();
    let store = storage::ProfileStore::new(&cli.data_dir);

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileAction::Set {
                gender,
                age,
                weight,
                height,
                activity,
                period,
                allergens,
                dislikes,
                clear_allergens,
                clear_dislikes,
            } => {
                let mut draft = ProfileDraft::from_profile(&store.load());
                if let Some(gender) = gender {
                    draft.gender = gender;
                }
                if let Some(age) = age {
                    draft.age = age;
                }
                if let Some(weight) = weight {
                    draft.weight = weight;
                }
                if let Some(height) = height {
                    draft.height = height;
                }
                if let Some(activity) = activity {
                    draft.activity = activity;
                }
                if let Some(period) = period {
                    draft.period = period;
                }
                if clear_allergens {
                    draft.allergens.clear();
                }
                if !allergens.is_empty() {
                    draft.allergens = allergens;
                }
                if clear_dislikes {
                    draft.dislikes.clear();
                }
                if !dislikes.is_empty() {
                    draft.dislikes = dislikes;
                }

                let profile = draft.normalize();
                store.save(&profile)?;
                tracing::info!(key = storage::PROFILE_KEY, "profile saved");
                print!("{}", render::render_profile(&profile));
            }
            ProfileAction::Show => {
                print!("{}", render::render_profile(&store.load()));
            }
        },

        Commands::Tdee => {
            let profile = store.load();
            let client = service_client(cli.base_url.as_deref())?;
            let estimate = client.estimate_calories(&profile.tdee_request()).await?;
            print!("{}", render::render_estimate(&estimate));
        }

        Commands::Optimize => {
            let profile = store.load();
            let client = service_client(cli.base_url.as_deref())?;
            let result = client.optimize_diet(&profile.optimize_request()).await?;
            print!("{}", render::render_diet(&result));
        }

        Commands::Products { action } => match action {
            ProductsAction::List => {
                let client = service_client(cli.base_url.as_deref())?;
                let products = client.list_products().await?;
                print!("{}", render::render_products(&products));
            }
            ProductsAction::SetPrice { id, price } => {
                let client = service_client(cli.base_url.as_deref())?;
                client.update_product_price(id, price).await?;
                println!("Price updated.");
            }
        },

        Commands::Recipes => {
            let profile = store.load();
            let matching =
                recipes::compatible(recipes::CATALOG, &profile.allergens, &profile.dislikes);
            print!("{}", render::render_recipes(&matching));
        }

        Commands::Health => {
            let client = service_client(cli.base_url.as_deref())?;
            let health = client.health().await?;
            if health.ok {
                println!("Diet Service is up.");
            } else {
                println!("Diet Service reported a degraded state.");
            }
        }
    }

    Ok(())
}
