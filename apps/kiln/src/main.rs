//! kiln - recipe-driven CMake package builds
//!
//! This is the CLI host that loads a package recipe and drives it through
//! its lifecycle: layout, dependency resolution, generator emission, then
//! CMake's configure and build phases.

mod cli;
mod error;
mod events;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use kiln_builder::{detect_host_compiler, export_sources, load_recipe, Builder, Recipe};
use kiln_config::Config;
use kiln_events::EventReceiver;
use kiln_types::{BuildConfiguration, ConfigurationDraft};
use std::path::{Path, PathBuf};
use std::process;
use tokio::select;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting kiln v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence: file config (or defaults),
    // then environment variables, then CLI flags.
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;

    match cli.command {
        Commands::Build {
            recipe,
            build_type,
            compiler,
            jobs,
            store,
        } => {
            cmd_build(
                &cli.global,
                config,
                &recipe,
                build_type.as_deref(),
                compiler.as_deref(),
                jobs,
                store,
            )
            .await
        }
        Commands::Info { recipe } => cmd_info(&recipe).await,
        Commands::Export { recipe, output_dir } => cmd_export(&recipe, output_dir).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn cmd_build(
    global: &GlobalArgs,
    mut config: Config,
    recipe_path: &Path,
    build_type: Option<&str>,
    compiler: Option<&str>,
    jobs: Option<usize>,
    store: Option<PathBuf>,
) -> Result<(), CliError> {
    if let Some(store) = store {
        config.paths.store_path = Some(store);
    }
    if let Some(jobs) = jobs {
        config.build.build_jobs = jobs;
    }

    let recipe = load_recipe(recipe_path).await?;
    let source_dir = source_dir_of(recipe_path)?;
    let configuration = resolve_configuration(&config, build_type, compiler).await?;

    info!(
        package = %recipe.name,
        configuration = %configuration,
        "Resolved build configuration"
    );

    let (event_sender, event_receiver) = kiln_events::channel();
    let mut event_handler = EventHandler::new(global.debug);

    let builder = Builder::new(Box::new(recipe), source_dir, configuration, config)
        .with_event_sender(event_sender);

    execute_build_with_events(builder, event_receiver, &mut event_handler).await?;
    Ok(())
}

/// Execute configure + build with concurrent event handling
async fn execute_build_with_events(
    mut builder: Builder,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<(), CliError> {
    let mut build_future = Box::pin(async move {
        builder.configure().await?;
        builder.build().await
    });

    loop {
        select! {
            // Build completed
            result = &mut build_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result.map_err(CliError::from);
            }

            // Event received
            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => { /* Channel closed: keep waiting for the build to finish */ }
                }
            }
        }
    }
}

async fn cmd_info(recipe_path: &Path) -> Result<(), CliError> {
    let recipe = load_recipe(recipe_path).await?;

    println!("{}@{}", recipe.name, recipe.version);
    if let Some(description) = &recipe.description {
        println!("  {description}");
    }
    if let Some(license) = &recipe.license {
        println!("  license: {license}");
    }

    let settings: Vec<String> = recipe.settings().iter().map(ToString::to_string).collect();
    println!("  settings: {}", settings.join(", "));

    let generators: Vec<String> = recipe
        .generators()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("  generators: {}", generators.join(", "));
    println!("  build folder: {}", recipe.layout.build_folder);

    let requirements = recipe.declare_requirements();
    if requirements.is_empty() {
        println!("  requires: none");
    } else {
        println!("  requires:");
        for spec in &requirements {
            println!("    {spec}");
        }
    }

    Ok(())
}

async fn cmd_export(recipe_path: &Path, output_dir: Option<PathBuf>) -> Result<(), CliError> {
    let recipe = load_recipe(recipe_path).await?;
    let source_dir = source_dir_of(recipe_path)?;
    let out_dir = output_dir.unwrap_or_else(|| source_dir.clone());

    let archive = export_sources(&recipe, &source_dir, &out_dir)?;
    println!("Exported sources to {}", archive.display());
    Ok(())
}

/// Absolute directory containing the recipe file
fn source_dir_of(recipe_path: &Path) -> Result<PathBuf, CliError> {
    let dir = recipe_path.parent().map_or_else(
        || PathBuf::from("."),
        |p| {
            if p.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                p.to_path_buf()
            }
        },
    );
    Ok(dir.canonicalize()?)
}

/// Resolve the build configuration from host detection, config, and flags
async fn resolve_configuration(
    config: &Config,
    build_type: Option<&str>,
    compiler: Option<&str>,
) -> Result<BuildConfiguration, CliError> {
    let mut draft = ConfigurationDraft::detect_host();

    draft = match build_type {
        Some(raw) => draft.with_build_type(raw.parse().map_err(kiln_errors::Error::from)?),
        None => draft.with_build_type(config.build.build_type),
    };

    let compiler = match compiler {
        Some(raw) => Some(raw.parse().map_err(kiln_errors::Error::from)?),
        None => match config.build.compiler {
            Some(compiler) => Some(compiler),
            None => detect_host_compiler().await,
        },
    };
    if let Some(compiler) = compiler {
        draft = draft.with_compiler(compiler);
    }

    let configuration = draft.resolve().map_err(kiln_errors::Error::from)?;
    Ok(configuration)
}

fn init_tracing(debug_enabled: bool) {
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
