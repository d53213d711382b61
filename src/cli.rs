use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

/// Route Explorer - Discover HTTP routes across an application's module graph
#[derive(Parser, Debug)]
#[command(name = "route-explorer")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the module descriptor document
    #[arg(value_name = "ENTRY_PATH")]
    pub entry_path: PathBuf,

    /// Name of the module class discovery starts from
    #[arg(value_name = "MODULE_CLASS", default_value = "AppModule")]
    pub module_name: String,

    /// Emit the route map as pretty-printed JSON instead of text
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Global prefix applied ahead of every controller path
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    info!("Entry document: {}", args.entry_path.display());
    info!("Entry module class: {}", args.module_name);
    if let Some(ref prefix) = args.prefix {
        info!("Global prefix: {}", prefix);
    }
    info!(
        "Output format: {}",
        if args.json { "json" } else { "text" }
    );
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::loader::{JsonModuleLoader, ModuleLoader};
    use crate::metadata::AttachedMetadata;
    use crate::render::{render, write_to_file, OutputFormat};
    use crate::walker::ModuleGraphWalker;

    info!("Starting route discovery...");

    // Step 1: Load the module descriptor document
    info!("Loading module document: {}", args.entry_path.display());
    let loader = JsonModuleLoader;
    let exports = loader.load(&args.entry_path)?;
    info!("Document declares {} modules", exports.names().count());

    // Step 2: Select the entry module by class name
    let entry = exports.entry(&args.module_name)?;
    info!("Entry module: {}", entry.name());

    // Step 3: Walk the module graph and extract routes
    info!("Discovering routes...");
    let reader = AttachedMetadata;
    let walker = ModuleGraphWalker::new(&reader);
    let routes = walker.discover(&entry, args.prefix.as_deref());

    let total: usize = routes.values().map(Vec::len).sum();
    info!(
        "Discovered {} routes in {} controllers",
        total,
        routes.len()
    );

    // Step 4: Render in the requested format
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let content = render(&routes, format)?;

    // Step 5: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)?;
        info!("Wrote route map to {}", output_path.display());
    } else {
        println!("{}", content);
    }

    info!("Discovery complete");
    Ok(())
}
