//! Account commands.

use qkart_core::{LoginForm, RegistrationForm};
use qkart_storefront::{Notice, ShopError, notice};

use super::{CliError, Context};
use crate::output;

const NOT_LOGGED_IN: &str = "Not logged in";

/// Log in and save the session for later commands.
pub async fn login(ctx: &mut Context, username: String, password: String) -> Result<(), CliError> {
    let session = ctx.shop.login(&LoginForm { username, password }).await?;
    ctx.store.save(session).map_err(ShopError::from)?;
    output::notice(&Notice::success(notice::LOGGED_IN));
    Ok(())
}

pub async fn register(
    ctx: &Context,
    username: String,
    password: String,
    confirm_password: String,
) -> Result<(), CliError> {
    let form = RegistrationForm {
        username,
        password,
        confirm_password,
    };
    ctx.shop.register(&form).await?;
    output::notice(&Notice::success(notice::REGISTERED));
    output::message("Log in with `qkart login` to start shopping");
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<(), CliError> {
    ctx.store.clear().map_err(ShopError::from)?;
    match ctx.shop.logout() {
        Some(session) => {
            output::notice(&Notice::info(format!("Logged out {}", session.username())));
        }
        None => output::notice(&Notice::info(NOT_LOGGED_IN)),
    }
    Ok(())
}

pub fn whoami(ctx: &Context) {
    match ctx.shop.session() {
        Some(session) => output::message(&format!(
            "{} (wallet balance: {})",
            session.username(),
            session.balance()
        )),
        None => output::notice(&Notice::info(NOT_LOGGED_IN)),
    }
}
