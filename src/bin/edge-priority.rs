//! Edge Priority CLI: validate routing profiles and inspect edge priorities.
//!
//! Usage:
//!   edge-priority check <profile> [--profiles-dir path]
//!   edge-priority eval <profile> --set road_class=PRIMARY --set max_speed=110/50
//!   edge-priority attributes

use clap::{Parser, Subcommand, ValueEnum};
use edge_priority::model::default_profiles_dir;
use edge_priority::{
    AttributeRegistry, AttributeSet, DomainKind, EdgeRecord, PriorityEvaluator, Profile,
    ProfileResult,
};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "edge-priority",
    version,
    about = "Rule-driven edge priority for routing profiles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Directory searched for profiles given by name
    #[arg(long, global = true)]
    profiles_dir: Option<PathBuf>,
    /// Log compilation details
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a profile and report its rules
    Check {
        /// Profile file, or name of a profile in the profiles directory
        profile: String,
    },
    /// Evaluate the priority of a synthetic edge
    Eval {
        /// Profile file, or name of a profile in the profiles directory
        profile: String,
        /// Attribute value as NAME=VALUE, or NAME=FORWARD/BACKWARD for directional attributes
        #[arg(long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,
        /// Traversal direction to evaluate
        #[arg(long, value_enum, default_value_t = DirectionArg::Both)]
        direction: DirectionArg,
    },
    /// List the standard road attributes
    Attributes,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Forward,
    Backward,
    Both,
}

fn load_evaluator(
    registry: &AttributeSet,
    profile: &str,
    profiles_dir: &Path,
) -> ProfileResult<(Profile, PriorityEvaluator)> {
    let path = Profile::locate(profile, profiles_dir)?;
    let profile = Profile::from_path(&path)?;
    let evaluator = PriorityEvaluator::compile(&profile.priority, registry)?;
    Ok((profile, evaluator))
}

fn cmd_check(registry: &AttributeSet, profile: &str, profiles_dir: &Path) -> i32 {
    let (profile, evaluator) = match load_evaluator(registry, profile, profiles_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let model = evaluator.model();
    println!(
        "Profile '{}' is valid: {} attribute(s), {} rule(s)",
        profile.name,
        model.len(),
        model.rule_count()
    );
    for table in model.tables() {
        println!("  {} ({})", table.attribute().name(), table.attribute().kind());
        for rule in table.rules() {
            println!("    {:<16} {}", rule.pattern().to_string(), rule.factor());
        }
    }
    0
}

/// Apply one `NAME=VALUE` or `NAME=FORWARD/BACKWARD` assignment
fn apply_assignment(
    registry: &AttributeSet,
    edge: &mut EdgeRecord,
    assignment: &str,
) -> Result<(), String> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", assignment))?;
    let handle = registry
        .resolve(name.trim())
        .ok_or_else(|| format!("unknown attribute '{}'", name.trim()))?;

    let result = match value.split_once('/') {
        Some((forward, backward)) => {
            edge.set_text_directional(handle, forward.trim(), backward.trim())
        }
        None => edge.set_text(handle, value.trim()),
    };
    result.map_err(|e| e.to_string())
}

fn cmd_eval(
    registry: &AttributeSet,
    profile: &str,
    profiles_dir: &Path,
    values: &[String],
    direction: DirectionArg,
) -> i32 {
    let (profile, evaluator) = match load_evaluator(registry, profile, profiles_dir) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut edge = EdgeRecord::new(registry);
    for assignment in values {
        if let Err(e) = apply_assignment(registry, &mut edge, assignment) {
            eprintln!("Error: {}", e);
            return 1;
        }
    }

    let (forward, backward) = evaluator.evaluate_both(&edge);
    match direction {
        DirectionArg::Forward => println!("{}", forward),
        DirectionArg::Backward => println!("{}", backward),
        DirectionArg::Both => {
            println!("profile:  {}", profile.name);
            println!("forward:  {}", forward);
            println!("backward: {}", backward);
        }
    }
    0
}

fn cmd_attributes(registry: &AttributeSet) -> i32 {
    println!("{:<18}  {:<12}  {:<11}  {}", "NAME", "KIND", "DIRECTIONAL", "VALUES");
    println!("{}", "-".repeat(72));
    for handle in registry.attributes() {
        let values = match handle.kind() {
            DomainKind::Continuous => "<number>".to_string(),
            _ => handle.values().join(", "),
        };
        println!(
            "{:<18}  {:<12}  {:<11}  {}",
            handle.name(),
            handle.kind().to_string(),
            if handle.is_directional() { "yes" } else { "no" },
            values
        );
    }
    0
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let registry = AttributeSet::road_defaults();
    let profiles_dir = cli.profiles_dir.unwrap_or_else(default_profiles_dir);

    let code = match cli.command {
        Commands::Check { profile } => cmd_check(&registry, &profile, &profiles_dir),
        Commands::Eval {
            profile,
            values,
            direction,
        } => cmd_eval(&registry, &profile, &profiles_dir, &values, direction),
        Commands::Attributes => cmd_attributes(&registry),
    };
    std::process::exit(code);
}

