//! Scenesel CLI
//!
//! Runs a CSS-like selector against a JSON scene and prints the nodes it
//! returns.

mod logger;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use scenesel_common::warning::clear_warnings;
use scenesel_query::{SelectorGroup, compile, match_groups, to_selector_string};
use scenesel_scene::{NodeData, SceneTree};

/// Scenesel - query scene trees with CSS-like selectors
#[derive(Parser, Debug)]
#[command(name = "scenesel")]
#[command(author, version, about, long_about = None)]
#[command(allow_missing_positional = true)]
#[command(after_help = r#"EXAMPLES:
    # Every rectangle in a scene
    scenesel scene.json rect

    # Direct rectangle children of #header whose fill lists "banner"
    scenesel scene.json '#header > rect[fill~="banner"]'

    # Inline scene, JSON output
    scenesel --inline '{"id":"p","type":"PAGE","children":[{"id":"r","type":"RECT"}]}' \
        --format json rect

    # Show how the selector was compiled
    scenesel --explain scene.json 'frame [name^="btn"]'
"#)]
struct Cli {
    /// Path to a JSON scene file
    #[arg(value_name = "SCENE", conflicts_with = "inline")]
    scene: Option<PathBuf>,

    /// Selector to run against the scene
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// Scene JSON given directly instead of a file
    #[arg(long, value_name = "JSON")]
    inline: Option<String>,

    /// Output format for the matched nodes
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the compiled selector groups before matching
    #[arg(long)]
    explain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per node
    Text,
    /// JSON array of node data
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(logger::level_for_verbosity(cli.verbose))
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;

    let tree = load_scene(&cli)?;
    log::info!(target: "scene", "scene has {} node(s)", tree.len());

    clear_warnings();
    let groups = compile(&cli.selector);
    if cli.explain {
        explain(&groups)?;
    }

    let matched: Vec<&NodeData> = match_groups(&groups, &tree, tree.root())
        .into_iter()
        .filter_map(|id| tree.data(id))
        .collect();
    log::info!(target: "matching", "{} node(s) matched", matched.len());

    match cli.format {
        OutputFormat::Text => {
            for data in &matched {
                println!("{}", describe(data));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&matched)?);
        }
    }

    Ok(())
}

/// Load the scene from `--inline` or the SCENE path.
fn load_scene(cli: &Cli) -> Result<SceneTree> {
    if let Some(ref json) = cli.inline {
        SceneTree::from_json_str(json).context("failed to parse inline scene")
    } else if let Some(ref path) = cli.scene {
        SceneTree::from_json_file(path)
            .with_context(|| format!("failed to load scene from {}", path.display()))
    } else {
        anyhow::bail!("a scene file path or --inline JSON is required")
    }
}

fn explain(groups: &[SelectorGroup]) -> Result<()> {
    println!("{} {}", "selector:".bold(), to_selector_string(groups));
    for (index, group) in groups.iter().enumerate() {
        let combinator = if index == 0 {
            "start"
        } else if group.direct_children_only {
            "child"
        } else {
            "descendant"
        };
        println!("  {index}: {group} {}", format!("({combinator})").dimmed());
    }
    println!("{}", serde_json::to_string_pretty(groups)?);
    Ok(())
}

/// Render a matched node as `TYPE #id attr=value ...`, attributes sorted by name.
fn describe(data: &NodeData) -> String {
    let mut attrs: Vec<_> = data.attrs.iter().collect();
    attrs.sort_unstable_by_key(|&(name, _)| name);

    let mut line = format!("{} #{}", data.node_type.cyan().bold(), data.id.green());
    for (name, value) in attrs {
        line.push_str(&format!(" {}={value}", name.dimmed()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_selector_alone_with_inline_scene() {
        let cli = Cli::try_parse_from(["scenesel", "--inline", "{}", "rect"]).unwrap();
        assert_eq!(cli.scene, None);
        assert_eq!(cli.selector, "rect");
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_scene_and_selector() {
        let cli =
            Cli::try_parse_from(["scenesel", "-vv", "--format", "json", "s.json", "#a"]).unwrap();
        assert_eq!(cli.scene, Some(PathBuf::from("s.json")));
        assert_eq!(cli.selector, "#a");
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_inline_scene_is_loaded() {
        let cli = Cli::try_parse_from([
            "scenesel",
            "--inline",
            r#"{"id":"p","type":"PAGE","children":[{"id":"r","type":"RECT"}]}"#,
            "rect",
        ])
        .unwrap();
        let tree = load_scene(&cli).unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_missing_scene_is_an_error() {
        let cli = Cli::try_parse_from(["scenesel", "rect"]).unwrap();
        assert!(load_scene(&cli).is_err());
    }

    #[test]
    fn test_describe_lists_sorted_attributes() {
        let data = NodeData::new("banner", "rect")
            .with_attr("visible", true)
            .with_attr("fill", "red");
        let line = describe(&data);
        assert!(line.contains("RECT"));
        assert!(line.contains("banner"));
        let fill = line.find("=red").unwrap();
        let visible = line.find("=true").unwrap();
        assert!(fill < visible);
    }
}
