//! Durable attempt records, encoded as embed messages in the log channel.
//!
//! The log channel is the sole source of truth: no count survives a restart
//! in memory. A record is one message; its embed carries the ordered attempt
//! list and a footer keyed by the subject's user id. Resolution re-renders
//! the message under a concluded title so lookups skip it, but the message
//! itself stays behind as an audit trail.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serenity::all::{
    ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage, Embed, GetMessages,
    Http, MessageId, Timestamp, UserId,
};
use tracing::warn;

use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::gate::MESSAGE_SCAN_LIMIT;

pub const ACTIVE_TITLE: &str = "🔒 Code Entry Tracking";
pub const RESOLVED_TITLE: &str = "✅ Code Tracker Concluded";

const ATTEMPTS_FIELD: &str = "Attempts";
const RESOLVED_MARKER: &str = " | Resolved";

/// One failed code submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptEntry {
    pub code: String,
    pub submitted_at: DateTime<Utc>,
}

/// One user's in-progress (or just-concluded) code-guessing session.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub user_id: UserId,
    /// Storage handle: the tracking message holding this record
    pub message_id: MessageId,
    /// Insertion order is attempt order
    pub entries: Vec<AttemptEntry>,
}

impl AttemptRecord {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn first_attempt_at(&self) -> Option<DateTime<Utc>> {
        self.entries.first().map(|e| e.submitted_at)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Success,
    Lockout,
}

/// Read/write access to attempt records. Kept as a trait so the
/// channel-backed store can be swapped for a real key-value store without
/// touching the tracker or the access gate.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Locate the active (unresolved) record for a user, if any.
    async fn find_active(&self, user_id: UserId) -> Result<Option<AttemptRecord>, Error>;

    /// Start a new record with a single entry.
    async fn create(
        &self,
        user_id: UserId,
        code: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error>;

    /// Append an entry to an existing active record, preserving order.
    async fn append(
        &self,
        record: &AttemptRecord,
        code: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error>;

    /// Terminally mark a record; it will no longer be found by `find_active`.
    async fn resolve(&self, record: &AttemptRecord, outcome: Resolution) -> Result<(), Error>;
}

#[async_trait]
impl<T: AttemptStore + ?Sized> AttemptStore for &T {
    async fn find_active(&self, user_id: UserId) -> Result<Option<AttemptRecord>, Error> {
        (**self).find_active(user_id).await
    }

    async fn create(
        &self,
        user_id: UserId,
        code: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error> {
        (**self).create(user_id, code, submitted_at).await
    }

    async fn append(
        &self,
        record: &AttemptRecord,
        code: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error> {
        (**self).append(record, code, submitted_at).await
    }

    async fn resolve(&self, record: &AttemptRecord, outcome: Resolution) -> Result<(), Error> {
        (**self).resolve(record, outcome).await
    }
}

/// Attempt store backed by a Discord text channel's message history.
pub struct ChannelStore {
    http: Arc<Http>,
    channel: ChannelId,
}

impl ChannelStore {
    pub fn new(http: Arc<Http>, channel: ChannelId) -> Self {
        Self { http, channel }
    }

    fn active_embed(record: &AttemptRecord) -> CreateEmbed {
        embeds::tracking_embed()
            .title(ACTIVE_TITLE)
            .description(format!("Tracking attempts for <@{}>", record.user_id))
            .field(ATTEMPTS_FIELD, render_attempts(&record.entries), false)
            .footer(CreateEmbedFooter::new(footer_text(record.user_id)))
            .timestamp(Timestamp::now())
    }

    fn resolved_embed(record: &AttemptRecord, outcome: Resolution) -> CreateEmbed {
        let base = match outcome {
            Resolution::Success => embeds::success_embed(),
            Resolution::Lockout => embeds::error_embed(),
        };
        base.title(RESOLVED_TITLE)
            .description(format!("Tracking attempts for <@{}>", record.user_id))
            .field(ATTEMPTS_FIELD, render_attempts(&record.entries), false)
            .footer(CreateEmbedFooter::new(format!(
                "{}{}",
                footer_text(record.user_id),
                RESOLVED_MARKER
            )))
            .timestamp(Timestamp::now())
    }
}

#[async_trait]
impl AttemptStore for ChannelStore {
    async fn find_active(&self, user_id: UserId) -> Result<Option<AttemptRecord>, Error> {
        // Best-effort lookup: a failed fetch is logged and treated as "no
        // record" rather than propagated (matches the bounded-window,
        // non-transactional nature of this store).
        let messages = match self
            .channel
            .messages(&self.http, GetMessages::new().limit(MESSAGE_SCAN_LIMIT))
            .await
        {
            Ok(m) => m,
            Err(e) => {
                warn!(
                    "Failed to scan log channel {} for tracking records: {:?}",
                    self.channel, e
                );
                return Ok(None);
            }
        };

        // Messages arrive newest-first; the first match is the most recent.
        for message in &messages {
            if let Some(embed) = message.embeds.first() {
                if is_active_record(embed, user_id) {
                    let entries = embed
                        .fields
                        .iter()
                        .find(|f| f.name == ATTEMPTS_FIELD)
                        .map(|f| parse_attempts(&f.value))
                        .unwrap_or_default();

                    return Ok(Some(AttemptRecord {
                        user_id,
                        message_id: message.id,
                        entries,
                    }));
                }
            }
        }

        Ok(None)
    }

    async fn create(
        &self,
        user_id: UserId,
        code: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error> {
        let entries = vec![AttemptEntry {
            code: code.to_string(),
            submitted_at,
        }];

        let embed = embeds::tracking_embed()
            .title(ACTIVE_TITLE)
            .description(format!("Tracking attempts for <@{}>", user_id))
            .field(ATTEMPTS_FIELD, render_attempts(&entries), false)
            .footer(CreateEmbedFooter::new(footer_text(user_id)))
            .timestamp(Timestamp::now());

        let message = self
            .channel
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(AttemptRecord {
            user_id,
            message_id: message.id,
            entries,
        })
    }

    async fn append(
        &self,
        record: &AttemptRecord,
        code: &str,
        submitted_at: DateTime<Utc>,
    ) -> Result<AttemptRecord, Error> {
        let mut updated = record.clone();
        updated.entries.push(AttemptEntry {
            code: code.to_string(),
            submitted_at,
        });

        self.channel
            .edit_message(
                &self.http,
                updated.message_id,
                EditMessage::new().embed(Self::active_embed(&updated)),
            )
            .await?;

        Ok(updated)
    }

    async fn resolve(&self, record: &AttemptRecord, outcome: Resolution) -> Result<(), Error> {
        self.channel
            .edit_message(
                &self.http,
                record.message_id,
                EditMessage::new().embed(Self::resolved_embed(record, outcome)),
            )
            .await?;

        Ok(())
    }
}

/// True if this embed is the active tracking record for the given user.
fn is_active_record(embed: &Embed, user_id: UserId) -> bool {
    embed.title.as_deref() == Some(ACTIVE_TITLE)
        && embed
            .footer
            .as_ref()
            .and_then(|f| parse_footer_user(&f.text))
            == Some(user_id)
}

/// Footer carries the lookup key.
pub(crate) fn footer_text(user_id: UserId) -> String {
    format!("User ID: {} | First Attempt", user_id)
}

/// Extract the user id from a tracking footer.
pub(crate) fn parse_footer_user(footer: &str) -> Option<UserId> {
    let rest = footer.strip_prefix("User ID: ")?;
    let id_part = rest.split_whitespace().next()?;
    id_part.parse::<u64>().ok().map(UserId::new)
}

/// Render the ordered attempt list: one `{i}. `code` at <t:unix:F>` per line.
pub(crate) fn render_attempts(entries: &[AttemptEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            format!(
                "{}. `{}` at <t:{}:F>",
                i + 1,
                e.code,
                e.submitted_at.timestamp()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse the attempt list back out of a rendered field value. Malformed
/// lines are skipped rather than failing the whole record.
pub(crate) fn parse_attempts(value: &str) -> Vec<AttemptEntry> {
    value.lines().filter_map(parse_attempt_line).collect()
}

fn parse_attempt_line(line: &str) -> Option<AttemptEntry> {
    let (_, rest) = line.split_once('`')?;
    let (code, rest) = rest.rsplit_once("` at <t:")?;
    let secs: i64 = rest.split(':').next()?.parse().ok()?;
    let submitted_at = DateTime::from_timestamp(secs, 0)?;

    Some(AttemptEntry {
        code: code.to_string(),
        submitted_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn renders_numbered_ordered_lines() {
        let entries = vec![
            AttemptEntry {
                code: "nope".into(),
                submitted_at: at(1_700_000_000),
            },
            AttemptEntry {
                code: "try2".into(),
                submitted_at: at(1_700_000_060),
            },
        ];

        let rendered = render_attempts(&entries);
        assert_eq!(
            rendered,
            "1. `nope` at <t:1700000000:F>\n2. `try2` at <t:1700000060:F>"
        );
    }

    #[test]
    fn parse_recovers_rendered_entries() {
        let entries = vec![
            AttemptEntry {
                code: "hunter2".into(),
                submitted_at: at(1_700_000_000),
            },
            AttemptEntry {
                code: "open sesame".into(),
                submitted_at: at(1_700_003_600),
            },
        ];

        let parsed = parse_attempts(&render_attempts(&entries));
        assert_eq!(parsed, entries);
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let value = "1. `good` at <t:1700000000:F>\nnot a record line\n2. `also bad at nowhere";
        let parsed = parse_attempts(value);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].code, "good");
    }

    #[test]
    fn footer_round_trips_user_id() {
        let user = UserId::new(123456789012345678);
        assert_eq!(parse_footer_user(&footer_text(user)), Some(user));
    }

    #[test]
    fn footer_parse_rejects_non_tracking_text() {
        assert_eq!(parse_footer_user("some other footer"), None);
        assert_eq!(parse_footer_user("User ID: notanumber | x"), None);
    }

    #[test]
    fn resolved_footer_still_carries_the_user_id() {
        let user = UserId::new(42);
        let resolved = format!("{}{}", footer_text(user), RESOLVED_MARKER);
        // The id survives, but the active-title check is what gates lookups.
        assert_eq!(parse_footer_user(&resolved), Some(user));
    }
}
