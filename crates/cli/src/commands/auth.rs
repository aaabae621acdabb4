//! Session commands: login, logout, whoami, change-password, open, lang.

use secrecy::SecretString;

use aos_micepp_client::paths;
use aos_micepp_client::services::auth::{self, ChangePasswordRequest};

use super::Context;

/// Sign in and persist the session.
pub async fn login(
    ctx: &Context,
    email: &str,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    // The login screen is guest-only: an established session is sent back
    // into the application instead of re-authenticating.
    let nav = ctx.navigator.navigate(paths::LOGIN);
    if !nav.reached_target() {
        return Err(format!(
            "déjà connecté ; redirigé vers {}",
            nav.destination.path
        )
        .into());
    }

    let password = SecretString::from(password);
    let user = auth::login(&ctx.client, email, &password).await?;

    println!("Connecté : {} <{}> [{}]", user.full_name(), user.email, user.role);
    if ctx.session.must_change_password() {
        println!("Votre mot de passe doit être changé : aos change-password");
    }
    Ok(())
}

/// Clear the local session. No network call involved.
pub fn logout(ctx: &Context) {
    ctx.session.logout();
    println!("Session fermée.");
}

/// Print the signed-in identity.
pub fn whoami(ctx: &Context) {
    match ctx.session.current_user() {
        Some(user) if ctx.session.is_authenticated() => {
            println!("{} <{}>", user.full_name(), user.email);
            println!("rôle        : {}", user.role);
            if let Some(department) = &user.department {
                println!("département : {department}");
            }
        }
        _ => println!("Non connecté."),
    }
}

/// Change the account password.
pub async fn change_password(
    ctx: &Context,
    current: String,
    new: String,
    confirm: String,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.enter_screen(paths::CHANGE_PASSWORD)?;

    if new != confirm {
        return Err("le nouveau mot de passe et sa confirmation ne correspondent pas".into());
    }

    auth::change_password(
        &ctx.client,
        &ChangePasswordRequest {
            current_password: current,
            new_password: new,
            confirm_password: confirm,
        },
    )
    .await?;

    println!("Mot de passe changé.");
    Ok(())
}

/// Run the guards against a path and report the destination.
pub fn open(ctx: &Context, path: &str) {
    let nav = ctx.navigator.navigate(path);
    if nav.reached_target() {
        println!("{path} : accès autorisé");
    } else {
        println!(
            "{path} : accès refusé, redirigé vers {} (via {})",
            nav.destination.path,
            nav.redirects.join(" -> ")
        );
    }
}

/// Get or set the language preference.
pub fn lang(ctx: &Context, code: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match code {
        Some(code) => {
            ctx.session.set_language(code)?;
            println!("Langue : {code}");
        }
        None => println!("Langue : {}", ctx.session.language()),
    }
    Ok(())
}
