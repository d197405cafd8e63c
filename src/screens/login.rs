use super::prompt;
use crate::dto::auth_dto::LoginPayload;
use crate::error::Result;
use crate::models::user::{SessionUser, UserRole};
use crate::AppState;

/// Entry loop: resume a saved session if one exists, otherwise prompt for
/// credentials. Returns when the user quits at the login prompt.
pub async fn run(state: &AppState) -> Result<()> {
    if let Some(user) = state.session.current_user() {
        println!("Welcome back, {}.", user.username);
        route(state, &user).await?;
    }

    loop {
        println!("\nExam Console — sign in (blank username to quit)");
        let username = prompt("Username")?;
        if username.is_empty() {
            return Ok(());
        }
        let password = prompt("Password")?;
        match state
            .auth_service
            .login(&LoginPayload { username, password })
            .await
        {
            Ok(user) => {
                state.session.save(&user)?;
                route(state, &user).await?;
            }
            Err(e) => println!("{e}"),
        }
    }
}

async fn route(state: &AppState, user: &SessionUser) -> Result<()> {
    match user.role {
        UserRole::Admin => super::admin::menu(state).await,
        UserRole::Teacher => super::lecturer::menu(state, user).await,
        UserRole::Student => super::student::menu(state, user).await,
        UserRole::Unknown => {
            println!("This account's role is not supported here; signing out.");
            state.session.clear()
        }
    }
}
