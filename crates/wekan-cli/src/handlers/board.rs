use crate::cli::{BoardAction, BoardStyleArgs};
use crate::context::CliContext;
use crate::output;
use wekan_domain::{BoardConfiguration, BoardOptions};

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::List { user_id, public } => {
            let boards = if public {
                ctx.api.get_public_boards().await?
            } else {
                let user_id = user_id.unwrap_or_else(|| ctx.session_user().id.clone());
                ctx.api.get_user_boards(&user_id).await?
            };
            output::output_list(boards);
        }
        BoardAction::Get(selector) => {
            let board = ctx.board(&selector).await?;
            output::output_success(&board);
        }
        BoardAction::Create(args) => {
            let owner = args
                .owner
                .unwrap_or_else(|| ctx.session_user().id.clone());
            let board = ctx
                .api
                .create_board(&args.title, &owner, &board_options(&args.options))
                .await?;
            output::output_success(&board);
        }
        BoardAction::Delete(selector) => {
            let board = ctx.board(&selector).await?;
            ctx.api.delete_board(&board.id).await?;
            output::output_success(serde_json::json!({"deleted": board.id}));
        }
        BoardAction::Duplicate { source, new_title } => {
            let board = ctx.board(&source).await?;
            let copy = ctx.api.duplicate_board(&board, &new_title).await?;
            output::output_success(&copy);
        }
        BoardAction::Export {
            source,
            output: path,
            template_title,
        } => {
            let board = ctx.board(&source).await?;
            let title = template_title.unwrap_or_else(|| board.title.clone());
            let config = ctx.api.capture_configuration(&board, &title).await?;
            config.save(&path)?;
            output::output_success(serde_json::json!({
                "board_id": board.id,
                "file": path.display().to_string(),
                "lists": config.lists.len(),
                "cards": config.card_count(),
            }));
        }
        BoardAction::Apply {
            file,
            owner,
            options,
        } => {
            let config = BoardConfiguration::load(&file)?;
            let owner = owner.unwrap_or_else(|| ctx.session_user().id.clone());
            let board = ctx
                .api
                .create_board_from_configuration(&config, &owner, &board_options(&options))
                .await?;
            output::output_success(&board);
        }
    }
    Ok(())
}

fn board_options(args: &BoardStyleArgs) -> BoardOptions {
    let mut options = BoardOptions::default();
    if let Some(permission) = args.permission {
        options = options.with_permission(permission);
    }
    if let Some(color) = args.color {
        options = options.with_color(color);
    }
    options
}
