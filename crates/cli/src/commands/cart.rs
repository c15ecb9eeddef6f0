//! Cart commands. All of them need a saved session.

use qkart_core::ProductId;
use qkart_storefront::{AddOptions, Notice};

use super::{CliError, Context};
use crate::output;

pub async fn show(ctx: &mut Context) -> Result<(), CliError> {
    if ctx.shop.session().is_none() {
        output::notice(&Notice::warning("Login to view your cart"));
        return Ok(());
    }

    ctx.shop.load().await?;
    output::cart(ctx.shop.cart());
    Ok(())
}

/// Add a product, refusing one that is already in the cart.
pub async fn add(ctx: &mut Context, product_id: &ProductId, qty: u32) -> Result<(), CliError> {
    ctx.shop.load().await?;
    let items = ctx
        .shop
        .add_to_cart(product_id, qty, AddOptions::prevent_duplicate())
        .await?;
    output::cart(items);
    Ok(())
}

/// Set a product's quantity. Zero removes it.
pub async fn set(ctx: &mut Context, product_id: &ProductId, qty: u32) -> Result<(), CliError> {
    ctx.shop.load().await?;
    let items = ctx.shop.set_quantity(product_id, qty).await?;
    output::cart(items);
    Ok(())
}
