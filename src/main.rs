use clap::{Parser, Subcommand};
use kin_nav::config::{self, NAV_CONFIG_FILE, NavConfig};
use kin_nav::context::{RequestContext, RestResource};
use kin_nav::nav::{self, NavOptions, display_navigation};
use kin_nav::output;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kin-nav")]
#[command(about = "Declare navigation menus once, render them per request")]
#[command(long_about = "\
Declare navigation menus once, render them per request

Menus are read from navigation.toml. Each item has an id, a label, and a URL
(static, or built from the resource being viewed). Items can be hidden behind
guards and marked active by controller/action patterns:

  users/show           one action
  users/{index,show}   any of several actions
  users/*  or  users   any action of the controller
  */*  or  *           everything

A specific pattern beats a controller pattern, which beats a catch-all.

Run 'kin-nav gen-config' to generate a documented navigation.toml.")]
#[command(version)]
struct Cli {
    /// Menu configuration file; repeat to layer overrides on top
    #[arg(long = "config", default_value = NAV_CONFIG_FILE, global = true)]
    configs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// The request a menu is rendered for.
#[derive(clap::Args, Clone)]
struct RequestArgs {
    /// Controller handling the request
    #[arg(long, default_value = "home")]
    controller: String,

    /// Action handling the request
    #[arg(long, default_value = "index")]
    action: String,
}

#[derive(Subcommand)]
enum Command {
    /// Render a menu as HTML
    Render {
        /// Menu to render
        #[arg(default_value = nav::DEFAULT_MENU)]
        menu: String,

        #[command(flatten)]
        request: RequestArgs,

        /// Label content as ITEM=VALUE; repeat ITEM to fill several placeholders
        #[arg(long = "inject", value_parser = parse_key_value)]
        inject: Vec<(String, String)>,

        /// Guard to set true; unset guards are false
        #[arg(long = "guard")]
        guards: Vec<String>,

        /// Resource being viewed, as collection/id (e.g. users/42)
        #[arg(long, value_parser = parse_resource)]
        resource: Option<RestResource>,

        /// Formatter to render with instead of the configured one
        #[arg(long)]
        formatter: Option<String>,

        /// Right-hand item for --formatter has_right; repeatable
        #[arg(long = "right", requires = "formatter")]
        right: Vec<String>,
    },
    /// List configured menus, items, and matchers
    List,
    /// Show which item each menu marks active for a request
    Active {
        /// Only report this menu
        menu: Option<String>,

        #[command(flatten)]
        request: RequestArgs,
    },
    /// Validate the configuration without rendering
    Check,
    /// Print a stock navigation.toml with all options documented
    GenConfig,
    /// Print the resolved configuration as JSON
    Dump,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            menu,
            request,
            inject,
            guards,
            resource,
            formatter,
            right,
        } => {
            let registry = load(&cli.configs)?.into_registry()?;
            let mut options = NavOptions::new();
            for (item, value) in inject {
                options.inject.entry(item).or_default().push(value);
            }
            for guard in guards {
                options = options.guard(guard, true);
            }
            if let Some(resource) = &resource {
                options = options.resource(resource);
            }
            if let Some(name) = formatter {
                let Some(formatter) = nav::by_name(&name, &right) else {
                    return Err(format!("unknown formatter {name:?}").into());
                };
                options = options.formatter(formatter);
            }

            let ctx = RequestContext::new(request.controller, request.action);
            match display_navigation(&registry, &menu, &ctx, &options)? {
                Some(html) => println!("{}", html),
                None => return Err(format!("no menu named {menu:?}").into()),
            }
        }
        Command::List => {
            let registry = load(&cli.configs)?.into_registry()?;
            output::print_registry(&registry);
        }
        Command::Active { menu, request } => {
            let registry = load(&cli.configs)?.into_registry()?;
            let ctx = RequestContext::new(request.controller, request.action);
            match menu {
                Some(name) => {
                    let Some(menu) = registry.get(&name) else {
                        return Err(format!("no menu named {name:?}").into());
                    };
                    println!("{}", output::format_active_line(menu, &ctx));
                }
                None => output::print_active(&registry, &ctx),
            }
        }
        Command::Check => {
            for path in &cli.configs {
                println!("==> Checking {}", path.display());
            }
            let registry = load(&cli.configs)?.into_registry()?;
            println!("{}", output::format_check_summary(&registry));
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Dump => {
            let config = load(&cli.configs)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn load(paths: &[PathBuf]) -> Result<NavConfig, config::ConfigError> {
    config::load_layered(paths)
}

fn parse_key_value(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected ITEM=VALUE, got {value:?}"))
}

fn parse_resource(value: &str) -> Result<RestResource, String> {
    RestResource::parse(value).ok_or_else(|| format!("expected collection/id, got {value:?}"))
}
