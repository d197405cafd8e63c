use super::{prompt, prompt_i64};
use crate::dto::admin_dto::{NewUser, UserUpdate};
use crate::dto::auth_dto::Credentials;
use crate::error::Result;
use crate::models::user::{Role, User};
use crate::AppState;

pub async fn menu(state: &AppState) -> Result<()> {
    loop {
        println!("\nAdmin dashboard — [1] modules  [2] users  [0] log out");
        match prompt("Select")?.as_str() {
            "1" => {
                if let Err(e) = modules(state).await {
                    println!("{e}");
                }
            }
            "2" => {
                if let Err(e) = users(state).await {
                    println!("{e}");
                }
            }
            "0" => {
                state.session.clear()?;
                println!("Logged out.");
                return Ok(());
            }
            _ => println!("Unknown option."),
        }
    }
}

/// Module management. The full list is re-fetched at the top of every
/// iteration, so each mutation is immediately reflected from server state
/// rather than patched locally.
async fn modules(state: &AppState) -> Result<()> {
    loop {
        let modules = state.module_service.list().await?;
        println!("\nModules ({}):", modules.len());
        for module in &modules {
            println!("  {:>4}  {}", module.id, module.name);
        }
        println!("[a]dd  [r]ename  [d]elete  [b]ack");
        match prompt("Action")?.as_str() {
            "a" => {
                let name = prompt("Module name")?;
                if name.is_empty() {
                    println!("Module name is required.");
                    continue;
                }
                if let Err(e) = state.module_service.create(&name).await {
                    println!("{e}");
                }
            }
            "r" => {
                let Some(id) = prompt_i64("Module id")? else {
                    continue;
                };
                let name = prompt("New name")?;
                if name.is_empty() {
                    println!("Module name is required.");
                    continue;
                }
                if let Err(e) = state.module_service.update(id, &name).await {
                    println!("{e}");
                }
            }
            "d" => {
                let Some(id) = prompt_i64("Module id")? else {
                    continue;
                };
                if let Err(e) = state.module_service.delete(id).await {
                    println!("{e}");
                }
            }
            "b" => return Ok(()),
            _ => println!("Unknown option."),
        }
    }
}

async fn users(state: &AppState) -> Result<()> {
    loop {
        let users = state.user_service.list_users().await?;
        let roles = state.user_service.list_roles().await?;
        render_users(&users, &roles, "");

        println!("[a]dd  [e]dit  [d]elete  [f]ilter  [b]ack");
        match prompt("Action")?.as_str() {
            "a" => {
                if let Err(e) = add_user(state, &roles).await {
                    println!("{e}");
                }
            }
            "e" => {
                if let Err(e) = edit_user(state, &users, &roles).await {
                    println!("{e}");
                }
            }
            "d" => {
                if let Err(e) = delete_user(state).await {
                    println!("{e}");
                }
            }
            "f" => {
                let needle = prompt("Filter by username or role")?;
                render_users(&users, &roles, &needle);
            }
            "b" => return Ok(()),
            _ => println!("Unknown option."),
        }
    }
}

fn render_users(users: &[User], roles: &[Role], filter: &str) {
    let needle = filter.to_lowercase();
    let visible: Vec<&User> = users
        .iter()
        .filter(|u| {
            needle.is_empty()
                || u.username.to_lowercase().contains(&needle)
                || role_name(roles, u.role_id).to_lowercase().contains(&needle)
        })
        .collect();
    println!("\nUsers ({}):", visible.len());
    for user in visible {
        println!(
            "  {:>4}  {:<24} {}",
            user.user_id,
            user.username,
            role_name(roles, user.role_id)
        );
    }
}

fn role_name(roles: &[Role], role_id: i64) -> &str {
    roles
        .iter()
        .find(|r| r.role_id == role_id)
        .map(|r| r.name.as_str())
        .unwrap_or("Unknown")
}

async fn add_user(state: &AppState, roles: &[Role]) -> Result<()> {
    let username = prompt("Username")?;
    let password = prompt("Password")?;
    for role in roles {
        println!("  {:>4}  {}", role.role_id, role.name);
    }
    let Some(role_id) = prompt_i64("Role id")? else {
        return Ok(());
    };
    state
        .user_service
        .create(&NewUser {
            username,
            password,
            role_id,
        })
        .await?;
    println!("User created.");
    Ok(())
}

async fn edit_user(state: &AppState, users: &[User], roles: &[Role]) -> Result<()> {
    let Some(user_id) = prompt_i64("User id")? else {
        return Ok(());
    };
    let Some(existing) = users.iter().find(|u| u.user_id == user_id) else {
        println!("No such user.");
        return Ok(());
    };

    let username = prompt(&format!("Username [{}]", existing.username))?;
    let username = if username.is_empty() {
        existing.username.clone()
    } else {
        username
    };

    for role in roles {
        println!("  {:>4}  {}", role.role_id, role.name);
    }
    let role_id = match prompt(&format!("Role id [{}]", existing.role_id))?.parse() {
        Ok(id) => id,
        Err(_) => existing.role_id,
    };

    let password = prompt("New password (blank to keep)")?;
    let password = (!password.is_empty()).then_some(password);

    state
        .user_service
        .update(&UserUpdate {
            user_id,
            username,
            password,
            role_id,
        })
        .await?;
    println!("User updated.");
    Ok(())
}

/// Deletion re-prompts for the acting admin's own password; the backend
/// re-authorizes with those credentials before removing the target.
async fn delete_user(state: &AppState) -> Result<()> {
    let Some(admin) = state.session.current_user() else {
        println!("Not authenticated.");
        return Ok(());
    };
    let Some(user_id) = prompt_i64("User id to delete")? else {
        return Ok(());
    };
    let password = prompt("Enter your password to confirm deletion")?;
    if password.is_empty() {
        return Ok(());
    }
    state
        .user_service
        .delete(
            user_id,
            &Credentials {
                username: admin.username,
                password,
            },
        )
        .await?;
    println!("User deleted.");
    Ok(())
}
