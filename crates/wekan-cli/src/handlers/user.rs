use crate::cli::UserAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: UserAction) -> anyhow::Result<()> {
    match action {
        UserAction::List => {
            let users = ctx.api.get_all_users().await?;
            output::output_list(users);
        }
        UserAction::Get(selector) => {
            let user = ctx.user(&selector).await?;
            output::output_success(&user);
        }
        UserAction::Create {
            new_username,
            email,
            new_password,
        } => {
            let user = ctx
                .api
                .create_new_user(&new_username, &email, &new_password)
                .await?;
            output::output_success(&user);
        }
        UserAction::Delete(selector) => {
            let user = ctx.user(&selector).await?;
            let deleted = ctx.api.delete_user(&user.id).await?;
            output::output_success(serde_json::json!({"deleted": deleted}));
        }
    }
    Ok(())
}
