use std::sync::Arc;

use serenity::all::{
    ButtonStyle, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
};
use tracing::{debug, error};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::components::code_modal;
use crate::config::GateConfig;
use crate::constants::embeds;
use crate::services::gate::access;

pub const ENTER_CODE_ID: &str = "gate_enter_code";
const ROLE_BUTTON_PREFIX: &str = "gate_role_";

/// Build the gate panel: one button per configured role grant, plus the
/// code-entry button.
pub fn create_panel(gate: &GateConfig) -> CreateMessage {
    let embed = embeds::standard_embed()
        .title("🚪 The Door")
        .footer(serenity::all::CreateEmbedFooter::new(
            "Press for role or enter the secret code",
        ));

    let mut buttons: Vec<CreateButton> = gate
        .role_buttons
        .iter()
        .map(|b| {
            CreateButton::new(format!("{}{}", ROLE_BUTTON_PREFIX, b.id))
                .label(b.label.clone())
                .style(ButtonStyle::Primary)
        })
        .collect();

    buttons.push(
        CreateButton::new(ENTER_CODE_ID)
            .label("Enter Code")
            .style(ButtonStyle::Danger),
    );

    CreateMessage::new().embed(embed).components(button_rows(buttons))
}

/// Discord caps an action row at five buttons.
const BUTTONS_PER_ROW: usize = 5;

fn button_rows(buttons: Vec<CreateButton>) -> Vec<CreateActionRow> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| CreateActionRow::Buttons(row.to_vec()))
        .collect()
}

/// Handle a panel button press: either open the code modal or grant the
/// button's roles directly.
pub async fn handle_button(
    ctx: &Context,
    data: &Arc<Data>,
    component: &ComponentInteraction,
) -> Result<(), Error> {
    let custom_id = &component.data.custom_id;
    debug!("Gate panel button: {}", custom_id);

    if custom_id == ENTER_CODE_ID {
        component
            .create_response(
                ctx,
                CreateInteractionResponse::Modal(code_modal::create_modal()),
            )
            .await?;
        return Ok(());
    }

    let Some(button_id) = custom_id.strip_prefix(ROLE_BUTTON_PREFIX) else {
        debug!("Unknown gate button: {}", custom_id);
        return Ok(());
    };

    let Some(button) = data.gate.button(button_id) else {
        reply_ephemeral(ctx, component, "ERROR CONTACT DEV").await?;
        return Ok(());
    };

    let guild_id = component
        .guild_id
        .ok_or_else(|| Error::custom("gate button pressed outside a guild"))?;
    let member = component
        .member
        .as_ref()
        .ok_or_else(|| Error::custom("button interaction carries no member"))?;

    let content = match access::grant_roles(ctx, data, guild_id, member, &button.roles).await {
        Ok(granted) => format!("WELCOME I GAVE YOU THE ROLE: {}", granted.join(", ")),
        Err(e) => {
            error!(
                "Failed to grant button roles to {}: {:?}",
                component.user.id, e
            );
            "ERROR CONTACT DEV".to_string()
        }
    };

    reply_ephemeral(ctx, component, &content).await
}

async fn reply_ephemeral(
    ctx: &Context,
    component: &ComponentInteraction,
    content: &str,
) -> Result<(), Error> {
    component
        .create_response(
            ctx,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(n: usize) -> Vec<CreateButton> {
        (0..n)
            .map(|i| CreateButton::new(format!("b{}", i)).label("x"))
            .collect()
    }

    #[test]
    fn five_buttons_fit_one_row() {
        assert_eq!(button_rows(buttons(1)).len(), 1);
        assert_eq!(button_rows(buttons(5)).len(), 1);
    }

    #[test]
    fn six_or_more_buttons_spill_into_extra_rows() {
        assert_eq!(button_rows(buttons(6)).len(), 2);
        assert_eq!(button_rows(buttons(10)).len(), 2);
        assert_eq!(button_rows(buttons(11)).len(), 3);
    }
}
