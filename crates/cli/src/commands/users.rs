//! User directory commands.

use clap::Subcommand;

use aos_micepp_client::paths;
use aos_micepp_client::services::users::{RegisterUserRequest, UserDirectory};
use aos_micepp_core::{Role, User, UserId};

use super::Context;

#[derive(Subcommand)]
pub enum UsersAction {
    /// List users, optionally filtered by role
    List {
        /// Only users holding this role (ADMIN, SUPPORT, AGENT, VISITOR)
        #[arg(long)]
        role: Option<Role>,

        /// Only users created in the last 30 days
        #[arg(long)]
        recent: bool,
    },
    /// Show one user
    Show {
        /// User id
        id: i32,
    },
    /// Register a new user
    Register {
        #[arg(short, long)]
        first_name: String,

        #[arg(short, long)]
        last_name: String,

        #[arg(short, long)]
        email: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        cin: String,

        #[arg(long)]
        matricule: String,

        /// Role of the account (ADMIN, SUPPORT, AGENT)
        #[arg(long, default_value = "AGENT")]
        role: Role,
    },
    /// Total number of users
    Count,
}

pub async fn run(ctx: &Context, action: UsersAction) -> Result<(), Box<dyn std::error::Error>> {
    ctx.enter_screen(paths::ADMIN_USERS)?;
    let directory = UserDirectory::new(&ctx.client);

    match action {
        UsersAction::List { role, recent } => {
            let users = match (role, recent) {
                (Some(role), _) => directory.by_role(role).await?,
                (None, true) => directory.recent().await?,
                (None, false) => directory.list().await?,
            };
            print_users(&users);
        }
        UsersAction::Show { id } => {
            ctx.enter_screen(&format!("{}/{id}", paths::ADMIN_USERS))?;
            let user = directory.get(UserId::new(id)).await?;
            print_user(&user);
        }
        UsersAction::Register {
            first_name,
            last_name,
            email,
            phone,
            cin,
            matricule,
            role,
        } => {
            ctx.enter_screen(&format!("{}/add", paths::ADMIN_USERS))?;
            let receipt = directory
                .register_user(&RegisterUserRequest {
                    first_name,
                    last_name,
                    email,
                    phone_number: phone,
                    cin,
                    matricule,
                    role,
                })
                .await?;
            println!("{receipt}");
        }
        UsersAction::Count => {
            println!("{}", directory.count().await?);
        }
    }
    Ok(())
}

fn print_users(users: &[User]) {
    for user in users {
        println!(
            "{:>4}  {:<28} {:<32} {:<8} {}",
            user.id,
            user.full_name(),
            user.email,
            user.role,
            if user.enabled { "actif" } else { "désactivé" }
        );
    }
    println!("{} utilisateur(s)", users.len());
}

fn print_user(user: &User) {
    println!("{} <{}>", user.full_name(), user.email);
    println!("id          : {}", user.id);
    println!("rôle        : {}", user.role);
    println!("actif       : {}", user.enabled);
    if let Some(phone) = &user.phone {
        println!("téléphone   : {phone}");
    }
    if let Some(department) = &user.department {
        println!("département : {department}");
    }
    if let Some(cin) = &user.cin {
        println!("CIN         : {cin}");
    }
    if let Some(matricule) = &user.matricule {
        println!("matricule   : {matricule}");
    }
}
