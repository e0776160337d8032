//! Remote list controller — use-cases of the remotes page.

use somfyctl_domain::action::{RemoteAction, SettingsAction};
use somfyctl_domain::id::RemoteId;
use somfyctl_domain::remote::{Remote, sanitize_name};

use crate::gateway::GatewayApi;
use crate::model::remote_list::{FailurePolicy, PendingChange, RemoteList, Settlement};
use crate::ports::{ClientError, HttpTransport};
use crate::ui_event::RemoteEvent;

/// Drives the remote list: every operation is one request, with the list
/// updated before the response arrives.
pub struct RemoteListController<T> {
    api: GatewayApi<T>,
    list: RemoteList,
}

impl<T: HttpTransport> RemoteListController<T> {
    /// Create a controller with an empty list.
    pub fn new(api: GatewayApi<T>, policy: FailurePolicy) -> Self {
        Self {
            api,
            list: RemoteList::new(policy),
        }
    }

    #[must_use]
    pub fn list(&self) -> &RemoteList {
        &self.list
    }

    #[must_use]
    pub fn api(&self) -> &GatewayApi<T> {
        &self.api
    }

    /// Fetch the remotes and replace the list.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure; the list is left as it was.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> Result<&[Remote], ClientError> {
        match self.api.list_remotes().await {
            Ok(remotes) => {
                tracing::debug!(count = remotes.len(), "remotes loaded");
                self.list.replace(remotes);
                Ok(self.list.rows())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load remotes");
                Err(err)
            }
        }
    }

    /// Send an action for a remote.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure after the list was settled according to
    /// its [`FailurePolicy`].
    #[tracing::instrument(skip(self, action), fields(action = %action))]
    pub async fn send_action(
        &mut self,
        id: RemoteId,
        action: RemoteAction,
    ) -> Result<(), ClientError> {
        let pending = self.list.begin_action(id, action);
        self.complete(pending).await
    }

    /// Rename a remote from the raw text of its name field.
    ///
    /// Returns the sanitised name that was stored and sent.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure after the list was settled.
    #[tracing::instrument(skip(self))]
    pub async fn rename(&mut self, id: RemoteId, raw: &str) -> Result<String, ClientError> {
        let name = sanitize_name(raw);
        let pending = self.list.begin_rename_to(id, name.clone());
        self.complete(pending).await.map(|()| name)
    }

    /// Run the operation chosen in the settings panel.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure after the list was settled.
    #[tracing::instrument(skip(self, action), fields(action = %action))]
    pub async fn settings_action(
        &mut self,
        id: RemoteId,
        action: SettingsAction,
    ) -> Result<(), ClientError> {
        let pending = self.list.begin_settings(id, action);
        self.complete(pending).await
    }

    /// Create a remote and append the row the gateway answered with.
    ///
    /// Nothing is added while the request is in flight or when it fails.
    ///
    /// # Errors
    ///
    /// Returns the gateway failure.
    #[tracing::instrument(skip(self))]
    pub async fn create(&mut self, name: &str) -> Result<Remote, ClientError> {
        match self.api.create_remote(name).await {
            Ok(remote) => {
                tracing::info!(id = %remote.id, name = %remote.name, "remote created");
                self.list.push(remote.clone());
                Ok(remote)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to create remote");
                Err(err)
            }
        }
    }

    /// Route a page event to the matching operation.
    ///
    /// Name edits are ignored until the commit key is pressed.
    ///
    /// # Errors
    ///
    /// Returns the failure of the operation the event triggered.
    pub async fn handle(&mut self, event: RemoteEvent) -> Result<(), ClientError> {
        if !event.is_actionable() {
            return Ok(());
        }
        match event {
            RemoteEvent::Load => self.load().await.map(drop),
            RemoteEvent::ActionClicked { id, action } => self.send_action(id, action).await,
            RemoteEvent::NameKeyDown { id, text, .. } => self.rename(id, &text).await.map(drop),
            RemoteEvent::SettingsConfirmed { id, action } => {
                self.settings_action(id, action).await
            }
            RemoteEvent::CreateSubmitted { name } => self.create(&name).await.map(drop),
        }
    }

    async fn complete(&mut self, pending: PendingChange) -> Result<(), ClientError> {
        let change = pending.change().clone();
        let outcome = self.api.dispatch(&change).await;
        match self.list.settle(pending, &outcome) {
            Settlement::Confirmed => {}
            Settlement::Kept => {
                tracing::warn!(remote_id = %change.remote_id(), ?change, "request failed, keeping optimistic state");
            }
            Settlement::RolledBack => {
                tracing::warn!(remote_id = %change.remote_id(), ?change, "request failed, change rolled back");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{FakeTransport, api};
    use crate::ports::Method;
    use somfyctl_domain::remote::RollingCode;

    fn remotes_body() -> serde_json::Value {
        serde_json::json!([
            {"id": 1, "name": "Kitchen", "rolling_code": 10},
            {"id": 2, "name": "Bedroom", "rolling_code": 3}
        ])
    }

    async fn loaded(
        transport: &FakeTransport,
        policy: FailurePolicy,
    ) -> RemoteListController<&FakeTransport> {
        transport.respond_ok(remotes_body());
        let mut controller = RemoteListController::new(api(transport), policy);
        controller.load().await.unwrap();
        controller
    }

    #[tokio::test]
    async fn should_mirror_response_rows_on_load() {
        let transport = FakeTransport::default();
        let controller = loaded(&transport, FailurePolicy::Rollback).await;

        let rows = controller.list().rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, RemoteId::new(1));
        assert_eq!(rows[0].name, "Kitchen");
        assert_eq!(rows[0].rolling_code, RollingCode::new(10));
    }

    #[tokio::test]
    async fn should_not_duplicate_rows_when_loading_twice() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;
        transport.respond_ok(remotes_body());

        controller.handle(RemoteEvent::Load).await.unwrap();

        assert_eq!(controller.list().len(), 2);
    }

    #[tokio::test]
    async fn should_keep_list_when_load_fails() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;
        transport.respond_unreachable();

        assert!(controller.load().await.is_err());
        assert_eq!(controller.list().len(), 2);
    }

    #[tokio::test]
    async fn should_post_action_and_increment_code() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;

        controller
            .handle(RemoteEvent::ActionClicked {
                id: RemoteId::new(2),
                action: RemoteAction::Down,
            })
            .await
            .unwrap();

        let sent = &transport.requests()[1];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "/api/v1/remotes/2/action");
        assert_eq!(sent.payload.get("action"), Some("down"));
        assert_eq!(
            controller.list().find(RemoteId::new(2)).unwrap().rolling_code,
            RollingCode::new(4)
        );
    }

    #[tokio::test]
    async fn should_keep_increment_on_network_failure_with_keep_policy() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Keep).await;
        transport.respond_unreachable();

        let result = controller
            .send_action(RemoteId::new(1), RemoteAction::Up)
            .await;

        assert!(result.is_err());
        assert_eq!(
            controller.list().find(RemoteId::new(1)).unwrap().rolling_code,
            RollingCode::new(11)
        );
    }

    #[tokio::test]
    async fn should_roll_back_increment_on_network_failure() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;
        transport.respond_unreachable();

        let result = controller
            .send_action(RemoteId::new(1), RemoteAction::Up)
            .await;

        assert!(result.is_err());
        assert_eq!(
            controller.list().find(RemoteId::new(1)).unwrap().rolling_code,
            RollingCode::new(10)
        );
    }

    #[tokio::test]
    async fn should_rename_on_enter_with_sanitised_name() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;

        controller
            .handle(RemoteEvent::NameKeyDown {
                id: RemoteId::new(1),
                key: "Enter".to_string(),
                text: "  My Blind Name Is Long  ".to_string(),
            })
            .await
            .unwrap();

        let sent = &transport.requests()[1];
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, "/api/v1/remotes/1");
        assert_eq!(sent.payload.get("name"), Some("My Blind Name I"));
        assert_eq!(
            controller.list().find(RemoteId::new(1)).unwrap().name,
            "My Blind Name I"
        );
    }

    #[tokio::test]
    async fn should_return_the_name_cut_at_the_limit() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;

        let stored = controller
            .rename(RemoteId::new(2), "  Bedroom blind left")
            .await
            .unwrap();

        assert_eq!(stored, "Bedroom blind l");
        assert_eq!(transport.requests()[1].payload.get("name"), Some("Bedroom blind l"));
        assert_eq!(controller.list().find(RemoteId::new(2)).unwrap().name, stored);
    }

    #[tokio::test]
    async fn should_keep_trailing_space_left_by_the_cut() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;

        let stored = controller
            .rename(RemoteId::new(2), "Bedroom shades x")
            .await
            .unwrap();

        assert_eq!(stored, "Bedroom shades ");
        assert_eq!(transport.requests()[1].payload.get("name"), Some("Bedroom shades "));
        assert_eq!(controller.list().find(RemoteId::new(2)).unwrap().name, stored);
    }

    #[tokio::test]
    async fn should_ignore_keys_other_than_enter() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;

        controller
            .handle(RemoteEvent::NameKeyDown {
                id: RemoteId::new(1),
                key: "a".to_string(),
                text: "Kitchena".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(transport.requests().len(), 1);
        assert_eq!(controller.list().find(RemoteId::new(1)).unwrap().name, "Kitchen");
    }

    #[tokio::test]
    async fn should_remove_row_immediately_on_delete_even_if_gateway_fails() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Keep).await;
        transport.respond(Err(ClientError::Status {
            url: "/api/v1/remotes/1".to_string(),
            status: 500,
            message: "boom".to_string(),
        }));

        let result = controller
            .settings_action(RemoteId::new(1), SettingsAction::Delete)
            .await;

        assert!(result.is_err());
        assert!(controller.list().find(RemoteId::new(1)).is_none());
        assert_eq!(transport.requests()[1].method, Method::Delete);
    }

    #[tokio::test]
    async fn should_zero_code_on_reset() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;

        controller
            .handle(RemoteEvent::SettingsConfirmed {
                id: RemoteId::new(1),
                action: SettingsAction::from("reset"),
            })
            .await
            .unwrap();

        assert_eq!(transport.requests()[1].payload.get("action"), Some("reset"));
        assert_eq!(
            controller.list().find(RemoteId::new(1)).unwrap().rolling_code,
            RollingCode::ZERO
        );
    }

    #[tokio::test]
    async fn should_append_created_remote_from_gateway_answer() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;
        transport.respond_ok(serde_json::json!({"id": 7, "name": "Office", "rolling_code": 0}));

        let created = controller.create("Office").await.unwrap();

        assert_eq!(created.id, RemoteId::new(7));
        assert_eq!(controller.list().len(), 3);
        assert_eq!(transport.requests()[1].payload.get("name"), Some("Office"));
    }

    #[tokio::test]
    async fn should_not_add_row_when_create_fails() {
        let transport = FakeTransport::default();
        let mut controller = loaded(&transport, FailurePolicy::Rollback).await;
        transport.respond_unreachable();

        let result = controller
            .handle(RemoteEvent::CreateSubmitted {
                name: "Office".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert_eq!(controller.list().len(), 2);
    }
}
