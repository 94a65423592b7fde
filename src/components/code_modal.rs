use std::sync::Arc;

use serenity::all::{
    ActionRowComponent, Context, CreateActionRow, CreateInputText, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateModal, InputTextStyle, ModalInteraction,
};
use tracing::error;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::gate::GENERIC_FAILURE;
use crate::services::gate::access;

pub const MODAL_ID: &str = "gate_code_modal";
const CODE_INPUT_ID: &str = "access_code";

/// Build the code-entry modal.
pub fn create_modal() -> CreateModal {
    CreateModal::new(MODAL_ID, "Enter Access Code").components(vec![CreateActionRow::InputText(
        CreateInputText::new(InputTextStyle::Short, "Enter your access code", CODE_INPUT_ID)
            .placeholder("Enter code here...")
            .required(true),
    )])
}

/// Handle a code modal submission. Acknowledges immediately, then hands the
/// code to the access gate; some reply is guaranteed on every path.
pub async fn handle_submission(
    ctx: &Context,
    data: &Arc<Data>,
    modal: &ModalInteraction,
) -> Result<(), Error> {
    // Acknowledge within the interaction window; the slow store/API work
    // happens afterwards and edits this response.
    modal
        .create_response(
            ctx,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await?;

    let Some(code) = extract_code(modal) else {
        access::edit_reply(ctx, modal, GENERIC_FAILURE).await?;
        return Ok(());
    };

    if let Err(e) = access::handle_code_submission(ctx, data, modal, &code).await {
        error!(
            "Code submission error for user {}: {:?}",
            modal.user.id, e
        );
        // Never leave the interaction without an outcome message.
        if let Err(reply_err) = access::edit_reply(ctx, modal, GENERIC_FAILURE).await {
            error!("Failed to send error response: {:?}", reply_err);
        }
    }

    Ok(())
}

fn extract_code(modal: &ModalInteraction) -> Option<String> {
    modal
        .data
        .components
        .iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| {
            if let ActionRowComponent::InputText(input) = component {
                if input.custom_id == CODE_INPUT_ID {
                    return input.value.clone().filter(|v| !v.is_empty());
                }
            }
            None
        })
}
