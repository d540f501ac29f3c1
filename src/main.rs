use std::fmt::Display;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Instrument};

use inventory_admin::actor_framework::Entity;
use inventory_admin::app_system::{setup_tracing, ApiConfig, Backend, InventorySystem, SharedAccessor};
use inventory_admin::error::ViewError;
use inventory_admin::views::EntityView;

/// Manage products, customers, suppliers and orders.
#[derive(Parser, Debug)]
#[command(name = "inventory-admin", version)]
struct Cli {
    /// Use the built-in sample data instead of the REST API
    #[arg(long, global = true)]
    mock: bool,

    /// REST API base URL; overrides INVENTORY_API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in milliseconds; overrides INVENTORY_API_TIMEOUT_MS
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    entity: EntityCommand,
}

#[derive(Subcommand, Debug)]
enum EntityCommand {
    /// Product catalogue
    Products {
        #[command(subcommand)]
        action: Action,
    },
    /// Customer records
    Customers {
        #[command(subcommand)]
        action: Action,
    },
    /// Supplier records
    Suppliers {
        #[command(subcommand)]
        action: Action,
    },
    /// Purchase orders
    Orders {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Subcommand, Debug, Clone)]
enum Action {
    /// List every record
    List,
    /// Show one record
    Get { id: u64 },
    /// Create a record from form fields
    Create(FieldArgs),
    /// Edit a record; unset fields keep their current value
    Update {
        id: u64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a record
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the form fields accepted by --set
    Fields,
}

#[derive(Args, Debug, Clone)]
struct FieldArgs {
    /// Form field assignment, e.g. --set nombreProducto="Cerveza Lager"
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{raw}'")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let backend = if cli.mock {
        Backend::Mock
    } else {
        let mut config = ApiConfig::from_env().context("invalid API environment")?;
        if let Some(base_url) = &cli.base_url {
            config = config
                .with_base_url(base_url)
                .context("invalid --base-url")?;
        }
        if let Some(ms) = cli.timeout_ms {
            config = config
                .with_timeout(Duration::from_millis(ms))
                .context("invalid --timeout-ms")?;
        }
        Backend::Http(config)
    };

    let system = InventorySystem::new(backend)?;
    let span = tracing::info_span!("command");
    let outcome = async {
        match cli.entity {
            EntityCommand::Products { action } => run(system.product_view(), action).await,
            EntityCommand::Customers { action } => run(system.customer_view(), action).await,
            EntityCommand::Suppliers { action } => run(system.supplier_view(), action).await,
            EntityCommand::Orders { action } => run(system.order_view(), action).await,
        }
    }
    .instrument(span)
    .await;

    system.shutdown().await?;
    outcome
}

async fn run<T: Entity + Display>(mut view: EntityView<T, SharedAccessor<T>>, action: Action) -> Result<()> {
    match action {
        Action::List => {
            view.load().await?;
            println!("{}\n", view.summary());
            for item in view.items() {
                println!("{item}\n");
            }
        }
        Action::Get { id } => {
            let item = view.fetch(id).await?;
            println!("{item}");
        }
        Action::Create(fields) => {
            view.open_modal(None);
            submit(&mut view, fields).await?;
        }
        Action::Update { id, fields } => {
            view.load().await?;
            view.open_edit(id)?;
            submit(&mut view, fields).await?;
        }
        Action::Delete { id, yes } => {
            view.load().await?;
            let prompt = view.request_delete(id)?;
            println!("{}", prompt.message());
            if !yes {
                println!("Vuelva a ejecutar con --yes para confirmar.");
                return Ok(());
            }
            view.confirm_delete().await?;
            info!(id, "Deleted");
            println!("{}", view.summary());
        }
        Action::Fields => {
            for spec in T::fields() {
                println!("{:<20} {:<18} {}", spec.key, spec.api_field, spec.label);
            }
        }
    }
    Ok(())
}

async fn submit<T: Entity>(
    view: &mut EntityView<T, SharedAccessor<T>>,
    fields: FieldArgs,
) -> Result<()> {
    if let Some(modal) = view.modal() {
        println!("{}", modal.title());
    }
    for (key, value) in fields.set {
        view.set_field(&key, value)?;
    }

    match view.submit().await {
        Ok(_) => {
            println!("{}", view.summary());
            Ok(())
        }
        Err(ViewError::Validation(errors)) => {
            for (field, message) in &errors.0 {
                eprintln!("  {field}: {message}");
            }
            bail!("El formulario tiene errores")
        }
        Err(e) => Err(e.into()),
    }
}
