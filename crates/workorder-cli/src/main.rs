use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use workorder_core::{
    DraftStore, Edit, LineItemId, Photo, Signature, SignatureRole, WorkOrder,
};
use workorder_runtime::{
    AppConfig, Command, DownloadSink, EmailSink, NasUploadSink, ReportSink, ShareSink, Update,
    worker_task,
};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Parser)]
#[command(name = "wot", about = "Work order tool", version)]
struct Cli {
    /// Config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Drafts directory, overrides the config
    #[arg(long, global = true)]
    drafts: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty work order draft
    New { draft: String },

    /// Apply one edit to a draft
    Edit {
        draft: String,

        #[command(subcommand)]
        action: EditAction,
    },

    /// List saved drafts
    Drafts,

    /// Delete a draft
    Delete { draft: String },

    /// Show how a draft would be paginated
    Plan { draft: String },

    /// Generate the report and distribute it
    Generate {
        draft: String,

        /// Save the PDF into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Upload to network storage; uses the configured endpoint without a URL
        #[arg(long)]
        nas: Option<Option<String>>,

        /// Send by mail through a relay; uses the configured endpoint without a URL
        #[arg(long)]
        email: Option<Option<String>>,

        /// Mail recipient, overrides the config
        #[arg(long)]
        to: Option<String>,

        /// Hand the PDF to the configured share command
        #[arg(long)]
        share: bool,
    },
}

#[derive(Subcommand)]
enum EditAction {
    /// Set a header or free text field
    SetField {
        #[arg(value_enum)]
        field: FieldArg,
        value: String,
    },
    /// Add an empty line item
    AddItem,
    /// Remove a line item
    RemoveItem { id: u64 },
    /// Rename a line item
    ItemName { id: u64, name: String },
    /// Change the quantity of a line item
    Quantity { id: u64, quantity: u32 },
    /// Set one serial number of a line item (1-based)
    Serial { id: u64, number: usize, value: String },
    /// Attach a photo
    AddPhoto {
        path: PathBuf,

        /// Caption, defaults to the file name
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove a photo (1-based)
    RemovePhoto { number: usize },
    /// Store a signature image
    Sign {
        #[arg(value_enum)]
        role: RoleArg,
        path: PathBuf,
    },
    /// Remove a signature
    ClearSignature {
        #[arg(value_enum)]
        role: RoleArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    /// Date and time, `YYYY-MM-DD HH:MM`
    Date,
    Unit,
    Contact,
    Phone,
    Tasks,
    Status,
    Remarks,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Customer,
    Technician,
}

impl From<RoleArg> for SignatureRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Customer => Self::Customer,
            RoleArg::Technician => Self::Technician,
        }
    }
}

/// Turn a command line action into an edit, reading any files it names.
async fn build_edit(action: EditAction) -> Result<Edit> {
    let edit = match action {
        EditAction::SetField { field, value } => match field {
            FieldArg::Date => {
                let date_time = NaiveDateTime::parse_from_str(&value, DATE_TIME_FORMAT)
                    .with_context(|| format!("Invalid date/time '{value}', expected YYYY-MM-DD HH:MM"))?;
                Edit::SetDateTime(date_time)
            }
            FieldArg::Unit => Edit::SetServiceUnit(value),
            FieldArg::Contact => Edit::SetContactPerson(value),
            FieldArg::Phone => Edit::SetContactPhone(value),
            FieldArg::Tasks => Edit::SetTasks(value),
            FieldArg::Status => Edit::SetStatus(value),
            FieldArg::Remarks => Edit::SetRemarks(value),
        },
        EditAction::AddItem => Edit::AddLineItem,
        EditAction::RemoveItem { id } => Edit::RemoveLineItem(LineItemId(id)),
        EditAction::ItemName { id, name } => Edit::SetItemName {
            id: LineItemId(id),
            name,
        },
        EditAction::Quantity { id, quantity } => Edit::SetQuantity {
            id: LineItemId(id),
            quantity,
        },
        EditAction::Serial { id, number, value } => Edit::SetSerialNumber {
            id: LineItemId(id),
            index: one_based(number)?,
            value,
        },
        EditAction::AddPhoto { path, name } => {
            let data = read_file(&path).await?;
            let name = name.or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            });
            let photo = Photo::new(data);
            Edit::AddPhoto(match name {
                Some(name) => photo.with_name(name),
                None => photo,
            })
        }
        EditAction::RemovePhoto { number } => Edit::RemovePhoto(one_based(number)?),
        EditAction::Sign { role, path } => Edit::SaveSignature {
            role: role.into(),
            signature: Signature::new(read_file(&path).await?),
        },
        EditAction::ClearSignature { role } => Edit::ClearSignature(role.into()),
    };
    Ok(edit)
}

fn one_based(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Numbers start at 1"))
}

async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn print_order(order: &WorkOrder) {
    println!(
        "{}  {}  {} {}",
        order.date_time().format(DATE_TIME_FORMAT),
        order.service_unit(),
        order.contact_person(),
        order.contact_phone()
    );
    for item in order.line_items() {
        println!(
            "  item {}: {} x{} [{}]",
            item.id(),
            item.name(),
            item.quantity(),
            item.serial_numbers().join(", ")
        );
    }
    println!(
        "  {} photo(s), signatures: customer {}, technician {}",
        order.photos().len(),
        yes_no(order.signature(SignatureRole::Customer).is_some()),
        yes_no(order.signature(SignatureRole::Technician).is_some()),
    );
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Collect the sinks selected on the command line.
fn build_sinks(
    config: &AppConfig,
    output: Option<PathBuf>,
    nas: Option<Option<String>>,
    email: Option<Option<String>>,
    to: Option<String>,
    share: bool,
) -> Result<Vec<Arc<dyn ReportSink>>> {
    let mut sinks: Vec<Arc<dyn ReportSink>> = Vec::new();

    if let Some(dir) = output {
        sinks.push(Arc::new(DownloadSink::new(dir)));
    }
    if let Some(endpoint) = nas {
        let endpoint = endpoint
            .or_else(|| config.nas_endpoint.clone())
            .ok_or_else(|| anyhow!("No NAS endpoint given or configured"))?;
        sinks.push(Arc::new(NasUploadSink::new(endpoint)?));
    }
    if let Some(endpoint) = email {
        let endpoint = endpoint
            .or_else(|| config.email_endpoint.clone())
            .ok_or_else(|| anyhow!("No mail endpoint given or configured"))?;
        let recipient = to
            .or_else(|| config.email_recipient.clone())
            .ok_or_else(|| anyhow!("No mail recipient given or configured"))?;
        sinks.push(Arc::new(EmailSink::new(endpoint, recipient)?));
    }
    if share {
        sinks.push(Arc::new(ShareSink::new(config.share_command.clone())));
    }

    // Nothing selected: save next to the other reports.
    if sinks.is_empty() {
        sinks.push(Arc::new(DownloadSink::new(config.download_dir.clone())));
    }
    Ok(sinks)
}

/// Run one generation through the session worker and report the updates.
async fn generate(
    order: WorkOrder,
    config: AppConfig,
    sinks: Vec<Arc<dyn ReportSink>>,
) -> Result<()> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(worker_task(command_rx, update_tx, config));

    command_tx.send(Command::Load(order))?;
    command_tx.send(Command::Generate { sinks })?;

    let mut failed = false;
    while let Some(update) = update_rx.recv().await {
        match update {
            Update::Changed { .. } => {}
            Update::ReportReady {
                file_name,
                page_numbers,
                skipped,
                partial,
            } => {
                println!("Report {} ({} page(s))", file_name, page_numbers.len());
                if partial {
                    for err in &skipped {
                        log::warn!("{}", err);
                    }
                }
            }
            Update::Dispatched { outcomes } => {
                for outcome in &outcomes {
                    println!("  {}", outcome);
                }
                failed = outcomes.iter().any(|o| !o.is_ok());
                break;
            }
            Update::GenerationFailed { message } => bail!(message),
            Update::EditRejected { error } => bail!("Edit rejected: {error}"),
            Update::GenerationBusy => bail!("A report is already being generated"),
        }
    }

    drop(command_tx);
    worker.await?;

    if failed {
        bail!("Some destinations failed");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(dir) = cli.drafts {
        config.drafts_dir = dir;
    }
    let limits = config.report.limits;
    let store = DraftStore::new(&config.drafts_dir).with_limits(limits);

    match cli.command {
        Commands::New { draft } => {
            let order = WorkOrder::new();
            let path = store.save(&draft, &order).await?;
            println!("Created {} → {}", draft, path.display());
        }

        Commands::Edit { draft, action } => {
            let order = store.load(&draft).await?;
            let edit = build_edit(action).await?;
            let order = order
                .apply(edit, &limits)
                .map_err(|e| anyhow!("Edit rejected, {} left unchanged: {}", draft, e))?;
            store.save(&draft, &order).await?;
            print_order(&order);
        }

        Commands::Drafts => {
            let names = store.list().await?;
            if names.is_empty() {
                println!("No drafts in {}", store.dir().display());
            }
            for name in names {
                println!("{}", name);
            }
        }

        Commands::Delete { draft } => {
            store.delete(&draft).await?;
            println!("Deleted {}", draft);
        }

        Commands::Plan { draft } => {
            let order = store.load(&draft).await?;
            let summary = workorder_report::summarize(&order, &limits);
            println!("Page plan for {}:", draft);
            println!("  Total pages: {}", summary.total_pages);
            println!(
                "  Text pages: {}{}",
                summary.text_pages,
                if summary.split { " (split)" } else { "" }
            );
            println!(
                "  Photo pages: {} ({} photo(s))",
                summary.photo_pages, summary.photos
            );
            println!(
                "  Lines: tasks {}, status {}, products {}, remarks {} = {} of {}",
                summary.tasks_lines,
                summary.status_lines,
                summary.products_lines,
                summary.remarks_lines,
                summary.total_lines,
                summary.total_content_limit
            );
        }

        Commands::Generate {
            draft,
            output,
            nas,
            email,
            to,
            share,
        } => {
            let order = store.load(&draft).await?;
            let sinks = build_sinks(&config, output, nas, email, to, share)?;
            generate(order, config, sinks).await?;
        }
    }

    Ok(())
}
