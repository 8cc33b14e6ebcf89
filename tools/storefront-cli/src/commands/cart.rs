//! Cart commands. The cart lives in a JSON file in the user data directory.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;
use storefront_commerce::cart::CartLineKey;
use storefront_commerce::catalog::ProductSelection;
use storefront_commerce::ids::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    ctx.load_cart()?;
    // Checkout destination depends on the session.
    if let Err(e) = ctx.resume_session().await {
        ctx.output.debug(&format!("{:#}", e));
    }

    match args.command.unwrap_or(CartCommand::List) {
        CartCommand::List => return list(ctx),
        CartCommand::Add {
            product,
            size,
            color,
            qty,
        } => add(ctx, product, size, color, qty).await?,
        CartCommand::Update {
            product,
            size,
            color,
            qty,
        } => {
            let key = CartLineKey::new(product, size, color.as_deref());
            if ctx.storefront.cart().get(&key).is_none() {
                bail!("No cart line for {} ({}, {})", key.product_id, key.size, key.color);
            }
            ctx.storefront.update_cart_quantity(key, qty)?;
            ctx.output.success("Quantity updated");
        }
        CartCommand::Remove { product, size, color } => {
            let key = CartLineKey::new(product, size, color.as_deref());
            if ctx.storefront.cart().get(&key).is_none() {
                ctx.output.warn("That line is not in the cart");
                return Ok(());
            }
            ctx.storefront.remove_from_cart(key);
            ctx.output.success("Removed from cart");
        }
        CartCommand::Clear { yes } => {
            if ctx.storefront.cart().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes
                && !Confirm::new()
                    .with_prompt("Remove every item from the cart?")
                    .default(false)
                    .interact()?
            {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            ctx.storefront.clear_cart();
            ctx.output.success("Cart cleared");
        }
    }

    ctx.save_cart()?;
    list(ctx)
}

async fn add(ctx: &Context, product: String, size: String, color: Option<String>, qty: i64) -> Result<()> {
    let id = ProductId::new(product);
    let spinner = ctx.output.spinner("Loading product...");
    let result = ctx.storefront.fetch_product(&id).await;
    spinner.finish_and_clear();
    let product = result.with_context(|| format!("Failed to load product {}", id))?;

    let mut selection = ProductSelection::for_product(&product);
    if let Some(color) = color {
        if !product.colors.iter().any(|c| c == &color) {
            bail!("{} is not available in {}", product.name, color);
        }
        selection.select_color(color);
    }
    selection.select_size(size);

    let line = selection.to_cart_line(&product, qty)?;
    ctx.storefront.add_to_cart(line)?;
    ctx.output.success(&format!("Added {} × {} to cart", qty, product.name));
    Ok(())
}

fn list(ctx: &Context) -> Result<()> {
    let cart = ctx.storefront.cart();
    let totals = cart.totals()?;
    let checkout = ctx.storefront.checkout_path();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "cart": cart,
            "totals": totals,
            "checkout": checkout,
        }));
        return Ok(());
    }

    ctx.output.header("SHOPPING CART");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [24, 28, 10, 4, 12];
    ctx.output.table_row(&["PRODUCT", "NAME", "SIZE/COLOR", "QTY", "TOTAL"], &widths);
    for (line, total) in cart.lines.iter().zip(&totals.lines) {
        let variant = match &line.color {
            Some(color) => format!("{}/{}", line.size, color),
            None => line.size.clone(),
        };
        ctx.output.table_row(
            &[
                line.product_id.as_str(),
                &line.name,
                &variant,
                &line.qty.to_string(),
                &total.total.display(),
            ],
            &widths,
        );
    }

    ctx.output.kv("items", &totals.item_label());
    ctx.output.kv("subtotal", &totals.subtotal.display());
    ctx.output.kv("checkout", checkout);
    Ok(())
}
