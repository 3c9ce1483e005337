use clap::{Parser, Subcommand};
use component_files::render::{self, PathsReport};
use component_files::{
    ComponentFiles, ComponentFilesConfig, ContentTree, FallbackResolver, Result, ResourceResolver,
    diagnostics,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "component-files")]
#[command(about = "List component files by resource type", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the paths of component files matching a filter regex.
    Paths {
        /// JSON export of the content tree the request resolves against.
        #[arg(long)]
        tree: String,

        /// Tree visible to the privileged service resolver; preferred over --tree.
        #[arg(long)]
        service_tree: Option<String>,

        /// files.json with resourceTypes / filterRegex / inherited.
        #[arg(short = 'c', long)]
        config: Option<String>,

        /// Root resource type; repeat for several. Replaces the config list.
        #[arg(short = 't', long = "resource-type")]
        resource_types: Vec<String>,

        #[arg(short = 'r', long)]
        filter_regex: Option<String>,

        /// Follow sling:resourceSuperType chains.
        #[arg(long, conflicts_with = "no_inherited")]
        inherited: bool,

        /// Do not follow super types, even if the config file enables it.
        #[arg(long)]
        no_inherited: bool,

        /// Search path for relative resource types; repeat for several.
        #[arg(long = "search-path")]
        search_paths: Vec<String>,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Paths {
            tree,
            service_tree,
            config,
            resource_types,
            filter_regex,
            inherited,
            no_inherited,
            search_paths,
            json,
        } => {
            // 1) Build the component configuration (file first, flags override).
            let inherited = match (inherited, no_inherited) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let config = build_config(config, resource_types, filter_regex, inherited)?;

            // 2) Load the content tree(s).
            let request_tree = load_tree(&tree, &search_paths)?;
            let service_tree = service_tree
                .map(|path| load_tree(&path, &search_paths))
                .transpose()?;
            let resolver = FallbackResolver::new(
                service_tree.as_ref().map(|t| t as &dyn ResourceResolver),
                &request_tree,
            );

            // 3) Resolve.
            let files = ComponentFiles::new(config, resolver)?;

            // 4) Render.
            let out = if json {
                render::render_json(&PathsReport {
                    resource_types: files.resource_types(),
                    inherited: files.inherited(),
                    paths: files.paths(),
                })?
            } else {
                render::render_text(files.paths())
            };
            print!("{}", out);
        }
    }

    Ok(())
}

fn build_config(
    path: Option<String>,
    resource_types: Vec<String>,
    filter_regex: Option<String>,
    inherited: Option<bool>,
) -> Result<ComponentFilesConfig> {
    let mut config = match path {
        Some(path) => ComponentFilesConfig::from_file(&path)?,
        None => {
            let Some(filter_regex) = filter_regex.clone() else {
                anyhow::bail!(
                    "{}",
                    diagnostics::error_message("either --config or --filter-regex is required")
                );
            };
            ComponentFilesConfig::new(Vec::<String>::new(), filter_regex)
        }
    };

    if !resource_types.is_empty() {
        config.resource_types = resource_types;
    }
    if let Some(filter_regex) = filter_regex {
        config.filter_regex = filter_regex;
    }
    if let Some(inherited) = inherited {
        config.inherited = inherited;
    }
    Ok(config)
}

fn load_tree(path: &str, search_paths: &[String]) -> Result<ContentTree> {
    let mut tree = ContentTree::from_file(path)?;
    if !search_paths.is_empty() {
        tree = tree.with_search_paths(search_paths.iter().cloned())?;
    }
    tracing::debug!(
        path,
        nodes = tree.node_count(),
        search_paths = ?tree.search_paths(),
        "loaded content tree"
    );
    Ok(tree)
}
