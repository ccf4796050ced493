//! Activity pipeline orchestration.
//!
//! Runs once per committed action: resolve mentions, select recipients,
//! store a notification per recipient and push a realtime hint for each
//! stored row. Storage and relay failures for one recipient never affect
//! another, and relay failures never reach the caller.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use taskflow_core::config::NotificationsConfig;
use taskflow_core::events::realtime::{RealtimeEvent, RelayPayload};
use taskflow_core::result::AppResult;
use taskflow_core::traits::relay::RealtimeRelay;
use taskflow_core::types::channel::Channel;
use taskflow_core::types::id::{MessageId, UserId};
use taskflow_database::store::{MentionStore, NotificationStore};
use taskflow_entity::activity::ActionContext;
use taskflow_entity::mention::Mention;
use taskflow_entity::notification::Notification;
use taskflow_entity::project::ProjectMembership;

use super::mention::{MentionResolution, MentionResolver};
use super::recipients::RecipientSelector;
use super::writer::NotificationWriter;

/// Input to [`ActivityEngine::process`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRequest {
    /// The committed action.
    pub context: ActionContext,
    /// Membership of `context.project_id`, or `None` when the caller could
    /// not find the project.
    pub membership: Option<ProjectMembership>,
}

impl ActivityRequest {
    /// Creates a request for a project that was found.
    pub fn new(context: ActionContext, membership: ProjectMembership) -> Self {
        Self {
            context,
            membership: Some(membership),
        }
    }
}

/// What the pipeline did for one action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityOutcome {
    /// Stored notifications, in recipient order.
    pub notifications: Vec<Notification>,
    /// Recipients whose notification could not be stored.
    pub failed_recipients: Vec<UserId>,
    /// Stored mention rows (chat actions only).
    pub mentions: Vec<Mention>,
    /// Realtime publishes that failed and were dropped.
    pub relay_failures: usize,
}

/// The activity notification engine.
#[derive(Debug, Clone)]
pub struct ActivityEngine {
    /// Mention resolver.
    resolver: MentionResolver,
    /// Recipient selector.
    selector: RecipientSelector,
    /// Notification writer.
    writer: NotificationWriter,
    /// Mention store.
    mentions: Arc<dyn MentionStore>,
    /// Realtime relay.
    relay: Arc<dyn RealtimeRelay>,
    /// Fan-out settings.
    config: NotificationsConfig,
}

impl ActivityEngine {
    /// Creates a new engine.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        mentions: Arc<dyn MentionStore>,
        relay: Arc<dyn RealtimeRelay>,
        config: NotificationsConfig,
    ) -> Self {
        Self {
            resolver: MentionResolver::new(),
            selector: RecipientSelector::new(),
            writer: NotificationWriter::new(notifications),
            mentions,
            relay,
            config,
        }
    }

    /// Processes one committed action.
    ///
    /// # Errors
    ///
    /// Only recipient selection can fail the call (`NotFound` for a missing
    /// project, `Validation` for an incomplete action). Per-recipient write
    /// failures are reported in the outcome; relay failures are counted.
    #[instrument(
        skip_all,
        fields(
            kind = %request.context.kind,
            project_id = %request.context.project_id,
            actor_id = %request.context.actor_id,
        )
    )]
    pub async fn process(&self, request: &ActivityRequest) -> AppResult<ActivityOutcome> {
        let ctx = &request.context;
        let membership = request.membership.as_ref();

        let resolution = if ctx.kind.is_chat() {
            let known = membership.map(|m| m.members.as_slice()).unwrap_or_default();
            self.resolver.resolve(&ctx.subject_title_or_content, known)
        } else {
            MentionResolution::default()
        };

        let recipients = self.selector.select(ctx, membership, &resolution)?;

        let mut outcome = ActivityOutcome {
            mentions: self.store_mentions(ctx, &resolution).await,
            ..ActivityOutcome::default()
        };

        let total = recipients.len();
        let concurrency = self.config.fanout_concurrency.max(1);
        let report = self
            .writer
            .write_all(ctx.actor_id, recipients, concurrency)
            .await;
        if !report.is_complete() {
            warn!(
                failed = report.failed.len(),
                recipients = total,
                "Some recipients were skipped"
            );
        }
        outcome.failed_recipients = report.failed.iter().map(|f| f.user_id).collect();

        // Only stored rows are announced.
        let hints: Vec<(Channel, RelayPayload)> = report
            .created
            .iter()
            .map(|n| (Channel::User(n.user_id), n.relay_payload()))
            .collect();
        let relayed: Vec<bool> = stream::iter(hints)
            .map(move |(channel, payload)| async move {
                self.publish(&channel, RealtimeEvent::NewNotification, &payload)
                    .await
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;
        outcome.relay_failures += relayed.iter().filter(|ok| !**ok).count();
        outcome.notifications = report.created;

        if ctx.kind.is_chat() {
            let payload = RelayPayload {
                project_id: Some(ctx.project_id),
                message_id: Some(MessageId::from_uuid(ctx.subject_id)),
                kind: Some(ctx.kind.as_str().to_string()),
                ..RelayPayload::default()
            };
            let channel = Channel::Project(ctx.project_id);
            if !self.publish(&channel, RealtimeEvent::NewMessage, &payload).await {
                outcome.relay_failures += 1;
            }
        }

        info!(
            recipients = total,
            stored = outcome.notifications.len(),
            failed = outcome.failed_recipients.len(),
            mentions = outcome.mentions.len(),
            relay_failures = outcome.relay_failures,
            "Activity processed"
        );

        Ok(outcome)
    }

    /// Stores mention rows for a chat message. Failures are logged only.
    async fn store_mentions(&self, ctx: &ActionContext, resolution: &MentionResolution) -> Vec<Mention> {
        if !ctx.kind.is_chat() || !self.config.persist_mentions || !resolution.has_mentions() {
            return Vec::new();
        }

        let message_id = MessageId::from_uuid(ctx.subject_id);
        let mentions: Vec<Mention> = resolution
            .user_ids
            .iter()
            .map(|user_id| Mention::new(message_id, *user_id))
            .collect();

        match self.mentions.create_many(&mentions).await {
            Ok(_) => mentions,
            Err(e) => {
                error!(message_id = %message_id, error = %e, "Failed to store mentions");
                Vec::new()
            }
        }
    }

    /// Best-effort publish; returns whether it succeeded.
    async fn publish(&self, channel: &Channel, event: RealtimeEvent, payload: &RelayPayload) -> bool {
        match self.relay.publish(channel, event, payload).await {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    channel = %channel,
                    event = %event,
                    backend = self.relay.backend_name(),
                    error = %e,
                    "Realtime publish failed"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use taskflow_core::error::ErrorKind;
    use taskflow_core::types::id::ProjectId;
    use taskflow_database::memory::{MemoryMentionStore, MemoryNotificationStore};
    use taskflow_entity::activity::TaskStatus;
    use taskflow_entity::notification::NotificationType;
    use taskflow_entity::project::ProjectMember;
    use uuid::Uuid;

    use super::*;
    use crate::test_support::{
        BrokenMentionStore, FailingRelay, FlakyNotificationStore, RecordingRelay,
    };

    struct Fixture {
        project: ProjectId,
        alice: UserId,
        mike: UserId,
        carol: UserId,
        membership: ProjectMembership,
        store: Arc<MemoryNotificationStore>,
        mentions: Arc<MemoryMentionStore>,
        relay: Arc<RecordingRelay>,
        engine: ActivityEngine,
    }

    fn fixture() -> Fixture {
        let project = ProjectId::new();
        let (alice, mike, carol) = (UserId::new(), UserId::new(), UserId::new());
        let membership = ProjectMembership::new(
            project,
            vec![
                ProjectMember::new(alice, "Alice"),
                ProjectMember::new(mike, "Mike"),
                ProjectMember::new(carol, "Carol"),
            ],
        );
        let store = Arc::new(MemoryNotificationStore::new());
        let mentions = Arc::new(MemoryMentionStore::new());
        let relay = Arc::new(RecordingRelay::new());
        let engine = ActivityEngine::new(
            store.clone(),
            mentions.clone(),
            relay.clone(),
            NotificationsConfig::default(),
        );
        Fixture {
            project,
            alice,
            mike,
            carol,
            membership,
            store,
            mentions,
            relay,
            engine,
        }
    }

    async fn owned(store: &MemoryNotificationStore, user: UserId) -> Vec<Notification> {
        store.find_by_user(user).await.unwrap()
    }

    #[tokio::test]
    async fn test_task_created_scenario() {
        let f = fixture();
        let ctx = ActionContext::task_created(f.alice, f.project, Uuid::new_v4(), "Plan sprint", Some(f.mike));
        let outcome = f
            .engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        assert_eq!(outcome.notifications.len(), 2);
        let mike = owned(&f.store, f.mike).await;
        assert_eq!(mike.len(), 1);
        assert_eq!(mike[0].kind, NotificationType::TaskAssigned);
        let carol = owned(&f.store, f.carol).await;
        assert_eq!(carol.len(), 1);
        assert_eq!(carol[0].kind, NotificationType::TaskCreated);
        assert!(owned(&f.store, f.alice).await.is_empty());

        let to_mike = f.relay.on_channel(&Channel::User(f.mike));
        assert_eq!(to_mike.len(), 1);
        assert_eq!(to_mike[0].event, RealtimeEvent::NewNotification);
        assert_eq!(to_mike[0].payload.notification_id, Some(mike[0].id));
        assert!(f.relay.on_channel(&Channel::Project(f.project)).is_empty());
    }

    #[tokio::test]
    async fn test_task_moved_scenario() {
        let f = fixture();
        let ctx = ActionContext::task_moved(
            f.alice,
            f.project,
            Uuid::new_v4(),
            "Release",
            TaskStatus::Todo,
            TaskStatus::Done,
            Some(f.mike),
        );
        let outcome = f
            .engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        assert_eq!(outcome.notifications.len(), 2);
        let mike = owned(&f.store, f.mike).await;
        assert_eq!(mike.len(), 1);
        assert_eq!(mike[0].title, "Your Task Moved");
        let carol = owned(&f.store, f.carol).await;
        assert_eq!(carol[0].kind, NotificationType::TaskMoved);
        assert!(carol[0].message.contains("To Do"));
        assert!(carol[0].message.contains("Done"));
        assert!(owned(&f.store, f.alice).await.is_empty());
    }

    #[tokio::test]
    async fn test_chat_mention_scenario() {
        let f = fixture();
        let message = Uuid::new_v4();
        let ctx = ActionContext::chat_message(f.alice, f.project, message, "Great job @Mike!");
        let outcome = f
            .engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        let mike = owned(&f.store, f.mike).await;
        assert_eq!(mike.len(), 1);
        assert_eq!(mike[0].kind, NotificationType::ChatMention);
        let carol = owned(&f.store, f.carol).await;
        assert_eq!(carol.len(), 1);
        assert_eq!(carol[0].kind, NotificationType::ChatMessage);
        assert!(owned(&f.store, f.alice).await.is_empty());

        assert_eq!(outcome.mentions.len(), 1);
        let stored = f
            .mentions
            .find_by_message(MessageId::from_uuid(message))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].user_id, f.mike);

        let project_events = f.relay.on_channel(&Channel::Project(f.project));
        assert_eq!(project_events.len(), 1);
        assert_eq!(project_events[0].event, RealtimeEvent::NewMessage);
        assert_eq!(
            project_events[0].payload.message_id,
            Some(MessageId::from_uuid(message))
        );
    }

    #[tokio::test]
    async fn test_recipients_are_distinct_and_exclude_actor() {
        let f = fixture();
        let ctx = ActionContext::chat_message(f.alice, f.project, Uuid::new_v4(), "@Mike @Carol @Alice");
        let outcome = f
            .engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        let owners: Vec<UserId> = outcome.notifications.iter().map(|n| n.user_id).collect();
        let distinct: HashSet<UserId> = owners.iter().copied().collect();
        assert_eq!(owners.len(), distinct.len());
        assert_eq!(distinct, HashSet::from([f.mike, f.carol]));
        assert!(
            outcome
                .notifications
                .iter()
                .all(|n| n.kind == NotificationType::ChatMention && !n.is_read)
        );
        // Self-mention is still recorded as a mention row.
        assert_eq!(outcome.mentions.len(), 3);
    }

    #[tokio::test]
    async fn test_relay_down_still_stores_everything() {
        let f = fixture();
        let relay = Arc::new(FailingRelay::new());
        let engine = ActivityEngine::new(
            f.store.clone(),
            f.mentions.clone(),
            relay.clone(),
            NotificationsConfig::default(),
        );
        let ctx = ActionContext::chat_message(f.alice, f.project, Uuid::new_v4(), "standup in 5");

        let outcome = engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        assert_eq!(outcome.notifications.len(), 2);
        assert_eq!(f.store.len(), 2);
        // Two personal hints plus the project-wide message.
        assert_eq!(relay.attempts(), 3);
        assert_eq!(outcome.relay_failures, 3);
    }

    #[tokio::test]
    async fn test_failed_write_skips_only_that_recipient() {
        let f = fixture();
        let store = Arc::new(FlakyNotificationStore::failing_for([f.mike]));
        let engine = ActivityEngine::new(
            store.clone(),
            f.mentions.clone(),
            f.relay.clone(),
            NotificationsConfig {
                fanout_concurrency: 1,
                ..NotificationsConfig::default()
            },
        );
        let ctx = ActionContext::task_created(f.alice, f.project, Uuid::new_v4(), "T", Some(f.mike));

        let outcome = engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        assert_eq!(outcome.failed_recipients, vec![f.mike]);
        assert_eq!(outcome.notifications.len(), 1);
        assert_eq!(outcome.notifications[0].user_id, f.carol);
        // No relay for a row that was never stored.
        assert!(f.relay.on_channel(&Channel::User(f.mike)).is_empty());
        assert_eq!(f.relay.on_channel(&Channel::User(f.carol)).len(), 1);
    }

    #[tokio::test]
    async fn test_mention_store_failure_does_not_abort() {
        let f = fixture();
        let engine = ActivityEngine::new(
            f.store.clone(),
            Arc::new(BrokenMentionStore),
            f.relay.clone(),
            NotificationsConfig::default(),
        );
        let ctx = ActionContext::chat_message(f.alice, f.project, Uuid::new_v4(), "@Mike ping");

        let outcome = engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        assert!(outcome.mentions.is_empty());
        assert_eq!(outcome.notifications.len(), 2);
    }

    #[tokio::test]
    async fn test_mentions_not_persisted_when_disabled() {
        let f = fixture();
        let engine = ActivityEngine::new(
            f.store.clone(),
            f.mentions.clone(),
            f.relay.clone(),
            NotificationsConfig {
                persist_mentions: false,
                ..NotificationsConfig::default()
            },
        );
        let message = Uuid::new_v4();
        let ctx = ActionContext::chat_message(f.alice, f.project, message, "@Mike ping");

        let outcome = engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        assert!(outcome.mentions.is_empty());
        assert_eq!(owned(&f.store, f.mike).await[0].kind, NotificationType::ChatMention);
        assert!(
            f.mentions
                .find_by_message(MessageId::from_uuid(message))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_missing_project_aborts_without_side_effects() {
        let f = fixture();
        let ctx = ActionContext::chat_message(f.alice, f.project, Uuid::new_v4(), "@Mike hi");
        let request = ActivityRequest {
            context: ctx,
            membership: None,
        };

        let err = f.engine.process(&request).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(f.store.is_empty());
        assert!(f.relay.published().is_empty());
    }

    #[tokio::test]
    async fn test_process_runs_on_a_spawned_task() {
        let f = fixture();
        let engine = f.engine.clone();
        let ctx = ActionContext::chat_message(f.alice, f.project, Uuid::new_v4(), "@Mike deploy done");
        let request = ActivityRequest::new(ctx, f.membership.clone());

        let outcome = tokio::spawn(async move { engine.process(&request).await })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.notifications.len(), 2);
        assert_eq!(outcome.notifications[0].user_id, f.mike);
        assert_eq!(f.relay.on_channel(&Channel::User(f.carol)).len(), 1);
    }

    #[tokio::test]
    async fn test_unchanged_status_is_a_no_op() {
        let f = fixture();
        let ctx = ActionContext::task_moved(
            f.alice,
            f.project,
            Uuid::new_v4(),
            "T",
            TaskStatus::InProgress,
            TaskStatus::InProgress,
            Some(f.mike),
        );
        let outcome = f
            .engine
            .process(&ActivityRequest::new(ctx, f.membership.clone()))
            .await
            .unwrap();

        assert!(outcome.notifications.is_empty());
        assert!(f.relay.published().is_empty());
    }
}
