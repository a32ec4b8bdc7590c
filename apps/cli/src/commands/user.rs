use anyhow::Result;
use folio_core::users::NewUser;

use crate::context::{Context, Credentials};
use crate::output::Output;
use crate::prompt;

pub async fn register(
    ctx: &Context,
    out: &Output,
    credentials: &Credentials,
    email: String,
    confirm: Option<String>,
) -> Result<()> {
    let username = credentials.require_username()?.to_string();

    // Prompted passwords are always confirmed.
    let (password, password_confirmation) = match credentials.password.clone() {
        Some(password) => (password, confirm),
        None => {
            let password = prompt::read_secret("Password: ")?;
            let confirmation = match confirm {
                Some(confirmation) => confirmation,
                None => prompt::read_secret("Confirm password: ")?,
            };
            (password, Some(confirmation))
        }
    };

    let user = ctx
        .users
        .register(NewUser {
            username,
            email,
            password,
            password_confirmation,
        })
        .await?;
    tracing::info!("Registered user {}", user.id);

    out.emit(&user, |user| {
        format!("User '{}' registered with id {}", user.username, user.id)
    })
}
