//! Sign-in, registration, the profile picture and the signed-in user's orders.

use anyhow::{Context as _, Result};
use dialoguer::Password;
use storefront_commerce::account::{AvatarUpload, LoginRequest, RegistrationForm, User};

use super::{AvatarArgs, LoginArgs, RegisterArgs};
use crate::context::{Context, SavedSession};
use crate::output::status_badge;

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let password = match args.password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };
    let request = LoginRequest::new(args.email, password);

    let spinner = ctx.output.spinner("Signing in...");
    let result = ctx.storefront.login(&request).await;
    spinner.finish_and_clear();
    let user = result.map_err(|e| anyhow::anyhow!(e.user_message())).context("Sign in failed")?;

    remember(ctx, &user)?;
    ctx.output.success(&format!("Signed in as {} ({})", user.name, user.role().badge()));
    Ok(())
}

/// Run the register command.
pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let form = RegistrationForm {
        name: args.name,
        email: args.email,
        password: Password::new().with_prompt("Password").interact()?,
        confirm_password: Password::new().with_prompt("Confirm password").interact()?,
    };

    let spinner = ctx.output.spinner("Creating account...");
    let result = ctx.storefront.register(&form).await;
    spinner.finish_and_clear();
    let user = result
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Registration failed")?;

    remember(ctx, &user)?;
    ctx.output.success(&format!("Welcome, {}!", user.name));
    Ok(())
}

fn remember(ctx: &Context, user: &User) -> Result<()> {
    if let Some(token) = user.bearer() {
        ctx.save_session(&SavedSession {
            token: token.to_string(),
            email: user.email.clone(),
        })?;
    }
    Ok(())
}

/// Run the logout command: forget the token and empty the cart.
pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.storefront.logout();
    ctx.clear_session()?;
    ctx.save_cart()?;
    ctx.output.success("Signed out");
    Ok(())
}

/// Run the avatar command: upload a new profile picture.
pub async fn avatar(args: AvatarArgs, ctx: &Context) -> Result<()> {
    if !ctx.resume_session().await? {
        anyhow::bail!("Please sign in to continue");
    }

    let upload = read_avatar(&args.path)?;
    let spinner = ctx.output.spinner("Uploading picture...");
    let result = ctx.storefront.upload_avatar(&upload).await;
    spinner.finish_and_clear();
    let user = result
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("Upload failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
        return Ok(());
    }
    ctx.output.success("Profile picture updated");
    if let Some(url) = &user.avatar {
        ctx.output.kv("avatar", url);
    }
    Ok(())
}

fn read_avatar(path: &std::path::Path) -> Result<AvatarUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "avatar".into());
    Ok(AvatarUpload::from_file_name(file_name, bytes))
}

/// Run the orders command.
pub async fn orders(ctx: &Context) -> Result<()> {
    if !ctx.resume_session().await? {
        anyhow::bail!("Please sign in to continue");
    }

    let spinner = ctx.output.spinner("Loading orders...");
    let result = ctx.storefront.fetch_my_orders().await;
    spinner.finish_and_clear();
    let orders = result.context("Failed to load orders")?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("MY ORDERS");
    if orders.is_empty() {
        ctx.output.info("You have not placed any orders yet.");
        return Ok(());
    }
    let widths = [10, 12, 6, 12, 12];
    ctx.output.table_row(&["ORDER", "DATE", "ITEMS", "TOTAL", "STATUS"], &widths);
    for order in &orders {
        ctx.output.table_row(
            &[
                &format!("#{}", order.reference()),
                &order
                    .created_at
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".into()),
                &order.item_count().to_string(),
                &order.total_price.display(),
                &status_badge(order.status()),
            ],
            &widths,
        );
    }
    Ok(())
}
