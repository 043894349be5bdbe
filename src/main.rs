use anyhow::anyhow;
use dotenvy::dotenv;
use tracing::{info, warn};

mod blueprint;
mod config;
mod generator;
mod llm;
mod utils;

use blueprint::categories::{default_category, is_known_category, CATEGORIES};
use blueprint::render::render_result;
use config::CONFIG;
use blueprint::{ProductInput, ReferenceImage};
use generator::{generate_blueprints, ResultSource};
use llm::load_reference_image;
use utils::logging::init_logging;
use utils::timing::{complete_command_timer, start_command_timer};

#[derive(Debug, Clone, PartialEq, Eq)]
struct GenerateArgs {
    name: String,
    category: String,
    image: Option<String>,
    json: bool,
    offline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Generate(GenerateArgs),
    Categories,
    Help,
}

fn usage() -> &'static str {
    "Usage:\n  prompt_engine_pro generate --name <product> [--category <label>] [--image <path|data-url>] [--json] [--offline]\n  prompt_engine_pro categories"
}

fn parse_generate_args(args: &[String]) -> anyhow::Result<Command> {
    let mut name: Option<String> = None;
    let mut category: Option<String> = None;
    let mut image: Option<String> = None;
    let mut json = false;
    let mut offline = false;

    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--name" | "-n" => {
                index += 1;
                let value = args
                    .get(index)
                    .ok_or_else(|| anyhow!("Missing value for --name"))?;
                name = Some(value.clone());
            }
            "--category" | "-c" => {
                index += 1;
                let value = args
                    .get(index)
                    .ok_or_else(|| anyhow!("Missing value for --category"))?;
                category = Some(value.clone());
            }
            "--image" | "-i" => {
                index += 1;
                let value = args
                    .get(index)
                    .ok_or_else(|| anyhow!("Missing value for --image"))?;
                image = Some(value.clone());
            }
            "--json" => {
                json = true;
            }
            "--offline" => {
                offline = true;
            }
            "--help" | "-h" => {
                return Ok(Command::Help);
            }
            other => {
                return Err(anyhow!(
                    "Unknown generate argument: {other}\n{}",
                    usage()
                ));
            }
        }
        index += 1;
    }

    let name = name.unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return Err(anyhow!("Please enter a product name."));
    }
    let category = category
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default_category().to_string());

    Ok(Command::Generate(GenerateArgs {
        name,
        category,
        image,
        json,
        offline,
    }))
}

fn parse_command(args: &[String]) -> anyhow::Result<Command> {
    match args.get(1).map(|value| value.as_str()) {
        Some("generate") => parse_generate_args(&args[2..]),
        Some("categories") => Ok(Command::Categories),
        Some("--help") | Some("-h") | Some("help") | None => Ok(Command::Help),
        Some(other) => Err(anyhow!("Unknown command: {other}\n{}", usage())),
    }
}

/// The reference image is optional; a bad path or data URL never blocks generation.
async fn resolve_reference_image(source: Option<&str>) -> Option<ReferenceImage> {
    let source = source?;
    match load_reference_image(source).await {
        Ok(image) => Some(image),
        Err(err) => {
            warn!("Ignoring reference image: {:#}", err);
            None
        }
    }
}

async fn generate_and_print(args: &GenerateArgs) -> anyhow::Result<ResultSource> {
    if !is_known_category(&args.category) {
        warn!(
            "Category '{}' is not in the catalogue; generic defaults may apply",
            args.category
        );
    }

    let image = resolve_reference_image(args.image.as_deref()).await;
    let input = ProductInput::new(args.name.clone(), args.category.clone()).with_image(image);

    let (result, source) = generate_blueprints(&input, args.offline).await;
    info!(
        "Generated {} blueprint(s) for '{}' via {}",
        result.blueprints.len(),
        input.name,
        source.as_str()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_result(&result));
    }

    Ok(source)
}

async fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut timer = start_command_timer("generate", &args.name, &args.category);
    match generate_and_print(&args).await {
        Ok(source) => {
            complete_command_timer(&mut timer, source.as_str(), None);
            Ok(())
        }
        Err(err) => {
            complete_command_timer(&mut timer, "error", Some(format!("{err:#}")));
            Err(err)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guards = init_logging();
    CONFIG.log_summary();

    let args: Vec<String> = std::env::args().collect();
    match parse_command(&args)? {
        Command::Generate(generate_args) => run_generate(generate_args).await?,
        Command::Categories => {
            for category in CATEGORIES {
                println!("{category}");
            }
        }
        Command::Help => println!("{}", usage()),
    }

    Ok(())
}
