//! News, service catalog, contact messages and dashboard commands.

use clap::Subcommand;

use aos_micepp_client::paths;
use aos_micepp_client::services::catalog::ServiceCatalog;
use aos_micepp_client::services::dashboard::DashboardService;
use aos_micepp_client::services::messages::MessagesService;
use aos_micepp_client::services::news::{DocumentUpload, NewsService};
use aos_micepp_core::{DocumentId, ServiceId};

use super::Context;

#[derive(Subcommand)]
pub enum NewsAction {
    /// List published documents
    List,
    /// Show one document's metadata
    Show {
        /// Document id
        id: i32,
    },
    /// Publish a document
    Publish {
        /// Path of the file to upload
        file: std::path::PathBuf,

        /// Document title
        #[arg(short, long)]
        titre: String,

        /// Document description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Document category (e.g. ACTUALITE, COMMUNIQUE)
        #[arg(short, long, default_value = "ACTUALITE")]
        kind: String,

        /// MIME type of the file
        #[arg(long, default_value = "application/pdf")]
        content_type: String,
    },
    /// Delete a document
    Delete {
        /// Document id
        id: i32,
    },
    /// Download a document's file
    Download {
        /// Document id
        id: i32,

        /// Where to write the file
        #[arg(short, long)]
        output: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ServicesAction {
    /// List catalog entries
    List,
    /// Show one entry
    Show {
        /// Entry id
        id: i32,
    },
    /// Flip an entry between active and inactive
    Toggle {
        /// Entry id
        id: i32,
    },
    /// List the available service types
    Types,
}

#[derive(Subcommand)]
pub enum MessagesAction {
    /// List received contact messages
    List,
}

#[derive(Subcommand)]
pub enum DashboardAction {
    /// Aggregate platform statistics
    Stats,
    /// Component health
    Status {
        /// Ask the backend to re-probe before reporting
        #[arg(long)]
        refresh: bool,
    },
}

pub async fn run_news(ctx: &Context, action: NewsAction) -> Result<(), Box<dyn std::error::Error>> {
    ctx.enter_screen(paths::ADMIN_NEWS)?;
    let service = NewsService::new(&ctx.client);

    match action {
        NewsAction::List => {
            for document in service.list().await? {
                println!(
                    "{:>4}  {:<10} {:<40} {}",
                    document.id,
                    document.kind.as_deref().unwrap_or("-"),
                    document.titre,
                    if document.published { "publié" } else { "brouillon" }
                );
            }
        }
        NewsAction::Show { id } => {
            let document = service.get(DocumentId::new(id)).await?;
            println!("{} ({})", document.titre, document.kind.as_deref().unwrap_or("-"));
            if let Some(description) = &document.description {
                println!("{description}");
            }
            if let Some(author) = &document.published_by_name {
                println!("publié par : {author}");
            }
            if let Some(file) = &document.file_name {
                println!("fichier    : {file}");
            }
        }
        NewsAction::Publish {
            file,
            titre,
            description,
            kind,
            content_type,
        } => {
            let content = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_owned());

            let created = service
                .create(DocumentUpload {
                    titre,
                    description,
                    kind,
                    published: true,
                    file_name,
                    content_type,
                    content,
                })
                .await?;
            println!("Document {} publié", created.id);
        }
        NewsAction::Delete { id } => {
            service.delete(DocumentId::new(id)).await?;
            println!("Document {id} supprimé");
        }
        NewsAction::Download { id, output } => {
            let bytes = service.download(DocumentId::new(id)).await?;
            std::fs::write(&output, bytes)?;
            println!("Écrit : {}", output.display());
        }
    }
    Ok(())
}

pub async fn run_services(
    ctx: &Context,
    action: ServicesAction,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.enter_screen(paths::ADMIN_SERVICES)?;
    let catalog = ServiceCatalog::new(&ctx.client);

    match action {
        ServicesAction::List => {
            for entry in catalog.list().await? {
                println!(
                    "{:>4}  {:<16} {:<28} {}",
                    entry.id.map_or_else(|| "-".to_owned(), |id| id.to_string()),
                    entry.kind,
                    entry.nom,
                    match entry.is_active {
                        Some(true) => "actif",
                        Some(false) => "inactif",
                        None => "-",
                    }
                );
            }
        }
        ServicesAction::Show { id } => {
            let entry = catalog.get(ServiceId::new(id)).await?;
            println!("{} ({})", entry.nom, entry.kind);
            if let Some(title) = &entry.title {
                println!("{title}");
            }
            if let Some(description) = &entry.description {
                println!("{description}");
            }
            for feature in &entry.features {
                println!("  - {feature}");
            }
        }
        ServicesAction::Toggle { id } => {
            let entry = catalog.toggle_status(ServiceId::new(id)).await?;
            println!(
                "{} : {}",
                entry.nom,
                if entry.is_active == Some(true) { "actif" } else { "inactif" }
            );
        }
        ServicesAction::Types => {
            for kind in catalog.types().await? {
                println!("{kind}");
            }
        }
    }
    Ok(())
}

pub async fn run_messages(
    ctx: &Context,
    action: MessagesAction,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.enter_screen(paths::ADMIN_CONTACT)?;
    let service = MessagesService::new(&ctx.client);

    match action {
        MessagesAction::List => {
            for message in service.list().await? {
                println!(
                    "{}  {} {} <{}> : {}",
                    message
                        .created_date
                        .map_or_else(|| "-".to_owned(), |d| d.format("%Y-%m-%d %H:%M").to_string()),
                    message.prenom,
                    message.nom,
                    message.email,
                    message.sujet
                );
            }
        }
    }
    Ok(())
}

pub async fn run_dashboard(
    ctx: &Context,
    action: DashboardAction,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.enter_screen(paths::ADMIN_DASHBOARD)?;
    let dashboard = DashboardService::new(&ctx.client);

    match action {
        DashboardAction::Stats => {
            let stats = dashboard.stats().await?;
            println!("utilisateurs        : {}", stats.total_users);
            println!("demandes            : {}", stats.total_requests);
            println!("demandes en attente : {}", stats.pending_requests);
            println!("demandes traitées   : {}", stats.completed_requests);
            println!("satisfaction        : {:.1}%", stats.satisfaction_rate);
        }
        DashboardAction::Status { refresh } => {
            let status = if refresh {
                dashboard.refresh_system_status().await?
            } else {
                dashboard.system_status().await?
            };
            println!("serveur      : {:?}", status.server);
            println!("base         : {:?}", status.database);
            println!(
                "stockage     : {:?} ({:.0}%)",
                status.storage.status, status.storage.usage_percentage
            );
            println!("api          : {:?}", status.api);
        }
    }
    Ok(())
}
