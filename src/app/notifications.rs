use crate::models::{Deployment, Resource};
use std::collections::HashSet;
use std::fmt::Display;

/// Deployment notifications as seen by the bell and the panel.
///
/// The displayed list is always the latest successful poll. Unviewed entries
/// are those whose `session_id` has not been acknowledged, so re-fetching an
/// acknowledged deployment never resurrects it.
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    pub deployments: Vec<Deployment>,
    viewed: HashSet<String>,
    pub panel_open: bool,
    /// Revealed credentials keyed by (session_id, deployment_id)
    revealed: HashSet<(String, String)>,
    /// Flat index into the resources of the unviewed deployments
    pub selected: usize,
    in_flight: usize,
    last_applied: Option<u64>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deployments not yet acknowledged, in server order
    pub fn unviewed(&self) -> Vec<&Deployment> {
        self.deployments
            .iter()
            .filter(|d| !self.viewed.contains(&d.session_id))
            .collect()
    }

    pub fn has_unviewed(&self) -> bool {
        self.deployments.iter().any(|d| !self.viewed.contains(&d.session_id))
    }

    pub fn unviewed_count(&self) -> usize {
        self.unviewed().len()
    }

    pub fn is_viewed(&self, session_id: &str) -> bool {
        self.viewed.contains(session_id)
    }

    /// Bell action. Visibility only, nothing is acknowledged.
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
        self.clamp_selection();
    }

    /// Close action. Everything currently unviewed becomes viewed.
    pub fn dismiss_panel(&mut self) {
        let ids: Vec<String> = self.unviewed().iter().map(|d| d.session_id.clone()).collect();
        tracing::debug!(count = ids.len(), "acknowledging deployments");
        self.viewed.extend(ids);
        self.panel_open = false;
        self.selected = 0;
    }

    pub fn poll_started(&mut self, seq: u64) {
        tracing::trace!(seq, "deployment poll started");
        self.in_flight += 1;
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight > 0
    }

    /// Apply a completed poll. Responses older than the newest one already
    /// applied are dropped. A failure keeps the current list. Returns whether
    /// the displayed list was replaced.
    pub fn apply_poll<E: Display>(&mut self, seq: u64, outcome: Result<Vec<Deployment>, E>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.last_applied.is_some_and(|last| seq <= last) {
            tracing::debug!(seq, last = ?self.last_applied, "discarding stale deployment poll");
            return false;
        }

        match outcome {
            Ok(deployments) => {
                tracing::debug!(seq, count = deployments.len(), "deployments updated");
                self.deployments = deployments;
                self.last_applied = Some(seq);
                self.prune_revealed();
                self.clamp_selection();
                true
            }
            Err(e) => {
                tracing::warn!(seq, error = %e, "deployment poll failed");
                false
            }
        }
    }

    /// Resources of the unviewed deployments, paired with their session id
    pub fn visible_resources(&self) -> Vec<(&str, &Resource)> {
        self.unviewed()
            .into_iter()
            .flat_map(|d| d.resources.iter().map(move |r| (d.session_id.as_str(), r)))
            .collect()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_resources().len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.visible_resources().len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    pub fn selected_resource(&self) -> Option<(&str, &Resource)> {
        self.visible_resources().get(self.selected).copied()
    }

    /// Flip credential visibility for the selected resource. Only resources
    /// with a credentials row can be revealed.
    pub fn toggle_reveal_selected(&mut self) {
        let Some((session_id, resource)) = self.selected_resource() else {
            return;
        };
        if !resource.shows_credentials() {
            return;
        }

        let key = (session_id.to_string(), resource.deployment_id.clone());
        if !self.revealed.remove(&key) {
            self.revealed.insert(key);
        }
    }

    pub fn is_revealed(&self, session_id: &str, deployment_id: &str) -> bool {
        self.revealed
            .contains(&(session_id.to_string(), deployment_id.to_string()))
    }

    /// Forget the signed-in user's notifications. The sequence high-water
    /// mark is kept since numbering continues across sessions.
    pub fn reset(&mut self) {
        *self = Self {
            last_applied: self.last_applied,
            ..Self::default()
        };
    }

    fn prune_revealed(&mut self) {
        let live: HashSet<(String, String)> = self
            .deployments
            .iter()
            .flat_map(|d| {
                d.resources
                    .iter()
                    .map(move |r| (d.session_id.clone(), r.deployment_id.clone()))
            })
            .collect();
        self.revealed.retain(|key| live.contains(key));
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_resources().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment(session_id: &str, resources: &[(&str, &str)]) -> Deployment {
        Deployment {
            session_id: session_id.to_string(),
            timestamp: "2024-05-01T10:30:00Z".to_string(),
            resources: resources
                .iter()
                .map(|(id, kind)| Resource {
                    deployment_id: id.to_string(),
                    resource_type: kind.to_string(),
                    resource_name: format!("{}-name", id),
                    username: Some("admin".to_string()),
                    password: Some("secret".to_string()),
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn ok(list: Vec<Deployment>) -> Result<Vec<Deployment>, String> {
        Ok(list)
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = NotificationState::new();
        assert!(!state.has_unviewed());
        assert!(!state.panel_open);
        assert!(!state.is_fetching());
    }

    #[test]
    fn test_poll_replaces_list() {
        let mut state = NotificationState::new();
        state.poll_started(1);
        assert!(state.is_fetching());
        assert!(state.apply_poll(1, ok(vec![deployment("s1", &[]), deployment("s2", &[])])));
        assert!(!state.is_fetching());
        assert_eq!(state.unviewed_count(), 2);

        assert!(state.apply_poll(2, ok(vec![deployment("s2", &[])])));
        assert_eq!(state.deployments.len(), 1);
        assert_eq!(state.deployments[0].session_id, "s2");
    }

    #[test]
    fn test_failed_poll_retains_list() {
        let mut state = NotificationState::new();
        state.apply_poll(1, ok(vec![deployment("s1", &[])]));
        assert!(!state.apply_poll::<String>(2, Err("500".to_string())));
        assert_eq!(state.deployments.len(), 1);
        assert!(state.has_unviewed());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state = NotificationState::new();
        state.poll_started(1);
        state.poll_started(2);

        assert!(state.apply_poll(2, ok(vec![deployment("new", &[])])));
        assert!(!state.apply_poll(1, ok(vec![deployment("old", &[])])));
        assert_eq!(state.deployments[0].session_id, "new");
        assert!(!state.is_fetching());
    }

    #[test]
    fn test_failure_does_not_advance_sequence() {
        let mut state = NotificationState::new();
        state.apply_poll(1, ok(vec![deployment("a", &[])]));
        state.apply_poll::<String>(3, Err("timeout".to_string()));
        assert!(state.apply_poll(2, ok(vec![deployment("b", &[])])));
        assert_eq!(state.deployments[0].session_id, "b");
    }

    #[test]
    fn test_toggle_does_not_acknowledge() {
        let mut state = NotificationState::new();
        state.apply_poll(1, ok(vec![deployment("s1", &[])]));

        state.toggle_panel();
        assert!(state.panel_open);
        state.toggle_panel();
        assert!(!state.panel_open);
        assert!(state.has_unviewed());
    }

    #[test]
    fn test_dismiss_acknowledges_and_closes() {
        let mut state = NotificationState::new();
        state.apply_poll(1, ok(vec![deployment("s1", &[]), deployment("s2", &[])]));
        state.toggle_panel();
        state.dismiss_panel();

        assert!(!state.panel_open);
        assert!(!state.has_unviewed());
        assert!(state.is_viewed("s1"));
        assert!(state.is_viewed("s2"));
    }

    #[test]
    fn test_viewed_survives_refetch() {
        let mut state = NotificationState::new();
        state.apply_poll(1, ok(vec![deployment("s1", &[])]));
        state.dismiss_panel();

        state.apply_poll(2, ok(vec![deployment("s1", &[]), deployment("s3", &[])]));
        let unviewed: Vec<&str> = state.unviewed().iter().map(|d| d.session_id.as_str()).collect();
        assert_eq!(unviewed, vec!["s3"]);
    }

    #[test]
    fn test_dismiss_with_nothing_unviewed_still_closes() {
        let mut state = NotificationState::new();
        state.toggle_panel();
        state.dismiss_panel();
        assert!(!state.panel_open);
    }

    #[test]
    fn test_selection_wraps_over_unviewed_resources() {
        let mut state = NotificationState::new();
        state.apply_poll(
            1,
            ok(vec![
                deployment("s1", &[("d1", "RDS"), ("d2", "EC2")]),
                deployment("s2", &[("d3", "ECS")]),
            ]),
        );

        assert_eq!(state.selected_resource().unwrap().1.deployment_id, "d1");
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_resource().unwrap().0, "s2");
        state.select_next();
        assert_eq!(state.selected_resource().unwrap().1.deployment_id, "d1");
        state.select_prev();
        assert_eq!(state.selected_resource().unwrap().1.deployment_id, "d3");
    }

    #[test]
    fn test_reveal_is_per_session_and_resource() {
        let mut state = NotificationState::new();
        state.apply_poll(
            1,
            ok(vec![deployment("s1", &[("d1", "RDS")]), deployment("s2", &[("d1", "RDS")])]),
        );

        state.toggle_reveal_selected();
        assert!(state.is_revealed("s1", "d1"));
        assert!(!state.is_revealed("s2", "d1"));

        state.toggle_reveal_selected();
        assert!(!state.is_revealed("s1", "d1"));
    }

    #[test]
    fn test_reveal_ignores_resources_without_credentials() {
        let mut state = NotificationState::new();
        state.apply_poll(1, ok(vec![deployment("s1", &[("d1", "EC2")])]));
        state.toggle_reveal_selected();
        assert!(!state.is_revealed("s1", "d1"));
    }

    #[test]
    fn test_reveal_pruned_when_resource_disappears() {
        let mut state = NotificationState::new();
        state.apply_poll(1, ok(vec![deployment("s1", &[("d1", "RDS")])]));
        state.toggle_reveal_selected();

        state.apply_poll(2, ok(vec![deployment("s2", &[("d9", "RDS")])]));
        assert!(!state.is_revealed("s1", "d1"));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = NotificationState::new();
        state.apply_poll(5, ok(vec![deployment("s1", &[])]));
        state.dismiss_panel();
        state.reset();

        assert!(state.deployments.is_empty());
        assert!(!state.is_viewed("s1"));
        assert!(!state.apply_poll(4, ok(vec![deployment("old", &[])])));
        assert!(state.apply_poll(6, ok(vec![deployment("s1", &[])])));
        assert!(state.has_unviewed());
    }
}
