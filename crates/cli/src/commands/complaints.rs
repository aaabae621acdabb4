//! Réclamation (complaint) commands.

use clap::Subcommand;

use aos_micepp_client::paths;
use aos_micepp_client::services::complaints::{Complaint, ComplaintsService};
use aos_micepp_core::{ComplaintId, ComplaintStatus, UserId};

use super::Context;

#[derive(Subcommand)]
pub enum ComplaintsAction {
    /// List all réclamations
    List,
    /// Show one réclamation
    Show {
        /// Réclamation id
        id: i32,
    },
    /// List the support users réclamations can be assigned to
    Supports,
    /// Assign a réclamation to a support user, or free it
    Assign {
        /// Réclamation id
        id: i32,

        /// Support user id
        #[arg(long, conflicts_with = "unassign")]
        user: Option<i32>,

        /// Remove the current assignment
        #[arg(long)]
        unassign: bool,
    },
    /// Move a réclamation to a new status
    SetStatus {
        /// Réclamation id
        id: i32,

        /// Target status (EN_ATTENTE, AFFECTEE, RESOLUE, REJETEE)
        status: ComplaintStatus,
    },
    /// Attach a treatment comment
    Comment {
        /// Réclamation id
        id: i32,

        /// Comment text
        text: String,
    },
}

pub async fn run(
    ctx: &Context,
    action: ComplaintsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = ComplaintsService::new(&ctx.client);

    match action {
        ComplaintsAction::List => {
            ctx.enter_screen(paths::ADMIN_COMPLAINTS)?;
            print_complaints(&service.list().await?);
        }
        ComplaintsAction::Show { id } => {
            ctx.enter_screen(&format!("{}/{id}", paths::ADMIN_COMPLAINTS))?;
            print_complaint(&service.get(ComplaintId::new(id)).await?);
        }
        ComplaintsAction::Supports => {
            ctx.enter_screen(paths::ADMIN_COMPLAINTS)?;
            for user in service.support_users().await? {
                println!("{:>4}  {} <{}>", user.id, user.full_name(), user.email);
            }
        }
        ComplaintsAction::Assign { id, user, unassign } => {
            ctx.enter_screen(paths::ADMIN_COMPLAINTS)?;
            if user.is_none() && !unassign {
                return Err("précisez --user <id> ou --unassign".into());
            }
            let updated = service
                .assign(ComplaintId::new(id), user.map(UserId::new))
                .await?;
            match &updated.assigned_to {
                Some(assignee) => {
                    println!("Réclamation {} affectée à {}", updated.id, assignee.email);
                }
                None => println!("Réclamation {} désaffectée", updated.id),
            }
        }
        ComplaintsAction::SetStatus { id, status } => {
            ctx.enter_screen(paths::ADMIN_COMPLAINTS)?;
            let updated = service.update_status(ComplaintId::new(id), status).await?;
            println!("Réclamation {} : {}", updated.id, updated.statut);
        }
        ComplaintsAction::Comment { id, text } => {
            ctx.enter_screen(paths::ADMIN_COMPLAINTS)?;
            service.add_comment(ComplaintId::new(id), &text).await?;
            println!("Commentaire enregistré.");
        }
    }
    Ok(())
}

fn print_complaints(complaints: &[Complaint]) {
    for complaint in complaints {
        println!(
            "{:>4}  {:<12} {:<32} {}",
            complaint.id,
            complaint.statut,
            complaint.utilisateur.email,
            complaint.objet
        );
    }
    println!("{} réclamation(s)", complaints.len());
}

fn print_complaint(complaint: &Complaint) {
    println!("Réclamation {} - {}", complaint.id, complaint.objet);
    println!("statut     : {}", complaint.statut);
    println!(
        "déposée par: {} {} <{}>",
        complaint.utilisateur.first_name, complaint.utilisateur.last_name, complaint.utilisateur.email
    );
    if let Some(assignee) = &complaint.assigned_to {
        println!("affectée à : {} {}", assignee.first_name, assignee.last_name);
    }
    if let Some(comment) = &complaint.commentaire {
        println!("commentaire: {comment}");
    }
    println!();
    println!("{}", complaint.contenu);
}
