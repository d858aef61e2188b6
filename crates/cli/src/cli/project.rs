use clap::Args;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use typegap_core::projection::qualified_name;
use typegap_core::{Catalog, ModelRegistry, ProjectionConfig, TypeProjector};

use crate::cli::run_cli;

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(value_name = "CATALOG", help = "Path to the JSON type catalog")]
    pub catalog: PathBuf,
    #[arg(
        value_name = "TYPE",
        help = "Full host names to project instead of the catalog roots"
    )]
    pub types: Vec<String>,
    #[arg(long, value_name = "FILE", help = "Path to a TOML projection config")]
    pub config: Option<PathBuf>,
    #[arg(long = "strict-nulls", help = "Add a `| null` arm to nullable types")]
    pub strict_nulls: bool,
    #[arg(
        long,
        value_name = "NAMESPACE",
        help = "Qualify every complex type with this namespace"
    )]
    pub namespace: Option<String>,
    #[arg(
        long = "show-registered",
        help = "List the complex types that need a declaration"
    )]
    pub show_registered: bool,
}

/// Config file sections only the CLI reads.
#[derive(Debug, Default, Deserialize)]
struct ModuleSection {
    /// Host namespace to target module name
    #[serde(default)]
    modules: HashMap<String, String>,
}

pub fn run(args: ProjectArgs) -> i32 {
    run_cli(|| run_inner(&args))
}

fn run_inner(args: &ProjectArgs) -> Result<(), String> {
    let report = project_report(args)?;
    print!("{report}");
    Ok(())
}

fn project_report(args: &ProjectArgs) -> Result<String, String> {
    let (mut config, modules) = match &args.config {
        Some(path) => load_config(path)?,
        None => (ProjectionConfig::new(), ModuleSection::default()),
    };
    if args.strict_nulls {
        config = config.strict_nulls(true);
    }
    if let Some(namespace) = &args.namespace {
        config = config.global_namespace(namespace);
    }

    let json = fs::read_to_string(&args.catalog).map_err(|err| {
        format!(
            "Failed to read catalog {}: {err}",
            args.catalog.display()
        )
    })?;
    let catalog = Catalog::from_json(&json).map_err(|err| err.to_string())?;

    let roots = if args.types.is_empty() {
        catalog.resolve_roots()
    } else {
        args.types
            .iter()
            .map(|name| catalog.resolve_name(name))
            .collect()
    }
    .map_err(|err| err.to_string())?;
    debug!(roots = roots.len(), "Projecting catalog roots.");

    let registry = modules
        .modules
        .into_iter()
        .fold(ModelRegistry::new(), |registry, (namespace, module)| {
            registry.with_module(namespace, module)
        });
    let registry = Arc::new(registry);
    let projector = TypeProjector::new(config, registry.clone());

    let mut report = String::new();
    for root in &roots {
        let text = projector.render(root);
        let _ = writeln!(report, "{root} => {text}");
    }

    if args.show_registered {
        let registered = registry.registered();
        let _ = writeln!(report, "\nRegistered types ({}):", registered.len());
        for ty in &registered {
            let name = qualified_name(ty, projector.config(), registry.as_ref());
            let _ = writeln!(report, "  {name} ({})", ty.definition_name());
        }
    }

    Ok(report)
}

fn load_config(path: &Path) -> Result<(ProjectionConfig, ModuleSection), String> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read config file {}: {err}", path.display()))?;
    let config = ProjectionConfig::from_toml(&text).map_err(|err| err.to_string())?;
    let modules: ModuleSection =
        toml::from_str(&text).map_err(|err| format!("Failed to parse config: {err}"))?;
    Ok((config, modules))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"{
        "types": [
            { "namespace": "Shop", "name": "Widget" },
            { "namespace": "Shop.Orders", "name": "Order" }
        ],
        "roots": [
            "System.Int32",
            "Shop.Widget[]",
            { "type": "System.Collections.Generic.Dictionary`2", "args": ["System.String", "Shop.Orders.Order"] }
        ]
    }"#;

    fn args(dir: &TempDir) -> ProjectArgs {
        let catalog = dir.path().join("catalog.json");
        fs::write(&catalog, CATALOG).unwrap();
        ProjectArgs {
            catalog,
            types: Vec::new(),
            config: None,
            strict_nulls: false,
            namespace: None,
            show_registered: false,
        }
    }

    #[test]
    fn test_project_roots() {
        let dir = TempDir::new().unwrap();
        let report = project_report(&args(&dir)).unwrap();
        assert_eq!(
            report,
            "System.Int32 => number\n\
             Shop.Widget[] => Shop.Widget[]\n\
             System.Collections.Generic.Dictionary<System.String, Shop.Orders.Order> => { [key: string]: Shop.Orders.Order }\n"
        );
    }

    #[test]
    fn test_project_named_types_strict() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.types = vec!["Shop.Widget".into()];
        args.strict_nulls = true;

        let report = project_report(&args).unwrap();
        assert_eq!(report, "Shop.Widget => Shop.Widget | null\n");
    }

    #[test]
    fn test_config_file_with_modules() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("typegap.toml");
        fs::write(
            &config,
            r#"
            strict_nulls = true

            [overrides]
            "System.Int32" = "int"

            [modules]
            "Shop.Orders" = "Orders"
            "#,
        )
        .unwrap();

        let mut args = args(&dir);
        args.config = Some(config);
        args.show_registered = true;

        let report = project_report(&args).unwrap();
        assert!(report.starts_with("System.Int32 => int\n"));
        assert!(report.contains("=> { [key: string | null]: (Orders.Order | null) }\n"));
        assert!(report.contains(
            "Registered types (2):\n  Shop.Widget (Shop.Widget)\n  Orders.Order (Shop.Orders.Order)\n"
        ));
    }

    #[test]
    fn test_show_registered_names_generic_definition() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("generic.json");
        fs::write(
            &catalog,
            r#"{
                "types": [
                    { "namespace": "Shop", "name": "Widget" },
                    { "namespace": "Shop", "name": "Box", "generic_params": ["T"] }
                ],
                "roots": [
                    { "type": "Shop.Box`1", "args": ["Shop.Widget"] },
                    { "type": "Shop.Box`1", "args": ["System.String"] }
                ]
            }"#,
        )
        .unwrap();

        let mut args = args(&dir);
        args.catalog = catalog;
        args.show_registered = true;

        let report = project_report(&args).unwrap();
        assert!(report.ends_with(
            "Registered types (2):\n  Shop.Box (Shop.Box`1)\n  Shop.Widget (Shop.Widget)\n"
        ));
    }

    #[test]
    fn test_namespace_flag() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.types = vec!["Shop.Orders.Order".into()];
        args.namespace = Some("Api".into());

        let report = project_report(&args).unwrap();
        assert_eq!(report, "Shop.Orders.Order => Api.Order\n");
    }

    #[test]
    fn test_missing_catalog() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.catalog = dir.path().join("missing.json");

        let err = project_report(&args).unwrap_err();
        assert!(err.starts_with("Failed to read catalog"));
        assert_eq!(run(args), 1);
    }

    #[test]
    fn test_unknown_type() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.types = vec!["Shop.Gadget".into()];

        let err = project_report(&args).unwrap_err();
        assert_eq!(err, "Unknown type 'Shop.Gadget'");
    }
}
