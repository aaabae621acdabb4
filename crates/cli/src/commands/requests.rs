//! Demande (service request) commands.

use clap::Subcommand;

use aos_micepp_client::paths;
use aos_micepp_client::services::requests::{NewRequest, RequestsService, ServiceRequest};
use aos_micepp_core::{RequestId, RequestStatus, ServiceId, UserId};

use super::Context;

#[derive(Subcommand)]
pub enum RequestsAction {
    /// List all demandes
    List,
    /// Show one demande
    Show {
        /// Demande id
        id: i32,
    },
    /// List the signed-in user's demandes
    Mine,
    /// Submit a new demande
    Create {
        /// Description of the demande
        #[arg(short, long)]
        description: String,

        /// Catalog service the demande belongs to
        #[arg(short, long)]
        service: i32,

        /// Optional comment
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Move a demande to a new status
    SetStatus {
        /// Demande id
        id: i32,

        /// Target status (EN_ATTENTE, EN_COURS, ACCEPTEE, REFUSEE)
        status: RequestStatus,
    },
    /// Assign a demande to a handler
    Assign {
        /// Demande id
        id: i32,

        /// Handler user id
        #[arg(long)]
        user: i32,
    },
    /// Demande counters (total and pending)
    Count,
}

pub async fn run(ctx: &Context, action: RequestsAction) -> Result<(), Box<dyn std::error::Error>> {
    let service = RequestsService::new(&ctx.client);

    match action {
        RequestsAction::List => {
            ctx.enter_screen(paths::ADMIN_REQUESTS)?;
            print_requests(&service.list().await?);
        }
        RequestsAction::Show { id } => {
            ctx.enter_screen(&format!("{}/{id}", paths::ADMIN_REQUESTS))?;
            print_request(&service.get(RequestId::new(id)).await?);
        }
        RequestsAction::Mine => {
            ctx.enter_screen(paths::ADMIN_MY_REQUESTS)?;
            let Some(user) = ctx.session.current_user() else {
                return Err("non connecté".into());
            };
            print_requests(&service.for_user(user.id).await?);
        }
        RequestsAction::Create {
            description,
            service: service_id,
            comment,
        } => {
            ctx.enter_screen(paths::ADMIN_MY_REQUESTS)?;
            let created = service
                .create(&NewRequest {
                    description,
                    service_id: ServiceId::new(service_id),
                    commentaire: comment,
                })
                .await?;
            println!("Demande {} soumise ({})", created.id, created.statut);
        }
        RequestsAction::SetStatus { id, status } => {
            ctx.enter_screen(paths::ADMIN_REQUESTS)?;
            let updated = service.update_status(RequestId::new(id), status).await?;
            println!("Demande {} : {}", updated.id, updated.statut);
        }
        RequestsAction::Assign { id, user } => {
            ctx.enter_screen(paths::ADMIN_REQUESTS)?;
            let updated = service.assign(RequestId::new(id), UserId::new(user)).await?;
            println!(
                "Demande {} affectée à {}",
                updated.id,
                updated.assigned_to_username.as_deref().unwrap_or("?")
            );
        }
        RequestsAction::Count => {
            ctx.enter_screen(paths::ADMIN_REQUESTS)?;
            println!("total      : {}", service.count().await?);
            println!("en attente : {}", service.count_pending().await?);
        }
    }
    Ok(())
}

fn print_requests(requests: &[ServiceRequest]) {
    for request in requests {
        println!(
            "{:>4}  {:<12} {:<28} {:<24} {}",
            request.id,
            request.statut,
            request.utilisateur_nom.as_deref().unwrap_or("?"),
            request.service_nom.as_deref().unwrap_or("-"),
            request.description.as_deref().unwrap_or("")
        );
    }
    println!("{} demande(s)", requests.len());
}

fn print_request(request: &ServiceRequest) {
    println!("Demande {}", request.id);
    println!("statut      : {}", request.statut);
    if let Some(description) = &request.description {
        println!("description : {description}");
    }
    if let Some(name) = &request.utilisateur_nom {
        println!("demandeur   : {name}");
    }
    if let Some(service) = &request.service_nom {
        println!("service     : {service}");
    }
    if let Some(assigned) = &request.assigned_to_username {
        println!("affectée à  : {assigned}");
    }
    if let Some(comment) = &request.commentaire {
        println!("commentaire : {comment}");
    }
    if !request.documents_justificatifs.is_empty() {
        println!("justificatifs :");
        for document in &request.documents_justificatifs {
            println!(
                "  [{}] {}",
                document.id,
                document.file_name.as_deref().unwrap_or("?")
            );
        }
    }
}
