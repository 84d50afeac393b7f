//! Drag-and-Drop Coordinator
//!
//! Turns drag lifecycle events into store operations:
//! - start: remember the dragged task (overlay only)
//! - over a task in the same project: local array move, no server call
//! - over a task or column of another project: commit the move right away
//! - end: clear the marker; every move already happened during `over`
//!
//! A rejected commit never escapes the event handler. It is undone by the
//! store and reported through `notice`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{
    bind_drag_events, create_dnd_signals, DndSignals, DragEvent, DragPhase, DropTarget,
};

use crate::reorder::locate_task;
use crate::store::{WorkspaceStateStoreFields, WorkspaceStore};

/// Where a hover resolves to
#[derive(Debug, Clone, PartialEq)]
enum HoverAction {
    Reorder { over_id: String },
    Move { project_id: String, index: Option<usize> },
    Ignore,
}

/// Create the coordinator, bind the document-level drag listeners and
/// provide it to all children
pub fn provide_drag_coordinator(store: WorkspaceStore) -> DragCoordinator {
    let coordinator = DragCoordinator::new(store);
    bind_drag_events(coordinator.dnd, coordinator.handler());
    provide_context(coordinator.clone());
    coordinator
}

pub fn use_drag_coordinator() -> DragCoordinator {
    expect_context::<DragCoordinator>()
}

#[derive(Clone)]
pub struct DragCoordinator {
    store: WorkspaceStore,
    dnd: DndSignals<String>,
    notice: RwSignal<Option<String>>,
}

impl DragCoordinator {
    pub fn new(store: WorkspaceStore) -> Self {
        Self {
            store,
            dnd: create_dnd_signals(),
            notice: RwSignal::new(None),
        }
    }

    /// Callback form of `handle`, for `leptos_dragdrop` bindings
    pub fn handler(&self) -> Callback<DragEvent<String>> {
        let this = self.clone();
        Callback::new(move |event| this.handle(event))
    }

    pub fn signals(&self) -> DndSignals<String> {
        self.dnd
    }

    /// Last rejected operation, shown as a transient toast
    pub fn notice(&self) -> RwSignal<Option<String>> {
        self.notice
    }

    pub fn phase(&self) -> DragPhase<String> {
        self.dnd.session.with_untracked(|s| s.phase().clone())
    }

    /// Event sink for `leptos_dragdrop` bindings. Commits run in the background.
    pub fn handle(&self, event: DragEvent<String>) {
        match event {
            DragEvent::Start(task_id) => {
                // bind_drag_events opens the session before reporting
                if self.dnd.active_untracked().as_ref() == Some(&task_id) {
                    log::debug!("[DND] Drag start: {}", task_id);
                } else {
                    self.drag_start(task_id);
                }
            }
            DragEvent::Over { target, .. } => {
                let this = self.clone();
                spawn_local(async move { this.drag_over(target).await });
            }
            DragEvent::End { .. } => self.drag_end(),
        }
    }

    pub fn drag_start(&self, task_id: String) -> bool {
        let mut started = false;
        self.dnd.session.update(|s| started = s.start(task_id.clone()));
        if started {
            log::debug!("[DND] Drag start: {}", task_id);
        }
        started
    }

    pub async fn drag_over(&self, target: DropTarget<String>) {
        let Some(active) = self.dnd.active_untracked() else { return };

        match self.resolve(&active, &target) {
            HoverAction::Reorder { over_id } => {
                self.store.reorder_task(&active, &over_id);
            }
            HoverAction::Move { project_id, index } => {
                self.commit_move(active, project_id, index).await;
            }
            HoverAction::Ignore => {}
        }
    }

    pub fn drag_end(&self) {
        self.dnd.session.update(|s| s.end());
        self.dnd.drop_target.set(None);
        self.dnd.pending.set(None);
        log::debug!("[DND] Drag end");
    }

    fn resolve(&self, active: &str, target: &DropTarget<String>) -> HoverAction {
        self.store.state().projects().with_untracked(|projects| {
            let Some((active_pi, _)) = locate_task(projects, active) else {
                return HoverAction::Ignore;
            };
            match target {
                DropTarget::Item(over_id) => match locate_task(projects, over_id) {
                    Some((pi, _)) if pi == active_pi => HoverAction::Reorder {
                        over_id: over_id.clone(),
                    },
                    Some((pi, ti)) => HoverAction::Move {
                        project_id: projects[pi].id.clone(),
                        index: Some(ti),
                    },
                    None => HoverAction::Ignore,
                },
                DropTarget::Container(project_id) => {
                    if projects[active_pi].id == *project_id {
                        HoverAction::Ignore
                    } else {
                        HoverAction::Move {
                            project_id: project_id.clone(),
                            index: None,
                        }
                    }
                }
            }
        })
    }

    async fn commit_move(&self, active: String, project_id: String, index: Option<usize>) {
        let mut began = false;
        self.dnd.session.update(|s| began = s.begin_commit(project_id.clone()));
        if !began {
            log::debug!("[DND] Commit in flight, ignoring hover on {}", project_id);
            return;
        }

        match self.store.drag_task_on_project(&active, &project_id, index).await {
            Ok(()) => self.dnd.session.update(|s| s.commit_succeeded()),
            Err(err) => {
                self.dnd.session.update(|s| s.commit_failed());
                log::warn!("[DND] Move of {} to {} failed: {}", active, project_id, err);
                self.notice.set(Some(format!("Could not move task: {}", err)));
                // the store already put the task back
                self.dnd.session.update(|s| s.revert_finished());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::mock_api::MockApi;
    use crate::reorder::fixtures::{ids, make_project};

    fn setup(api: Arc<MockApi>) -> (Owner, WorkspaceStore, DragCoordinator) {
        let owner = Owner::new();
        owner.set();
        let store = WorkspaceStore::new(api);
        store.set_user_id(Some("u-1".into()));
        store.set_current_board_id(Some("b-1".into()));
        store.set_projects(vec![
            make_project("p-1", &["t-1", "t-2", "t-3"]),
            make_project("p-2", &["t-4"]),
        ]);
        let dnd = DragCoordinator::new(store.clone());
        (owner, store, dnd)
    }

    fn seeded_api() -> Arc<MockApi> {
        Arc::new(MockApi::with_projects(vec![
            make_project("p-1", &["t-1", "t-2", "t-3"]),
            make_project("p-2", &["t-4"]),
        ]))
    }

    #[tokio::test]
    async fn test_same_project_hover_reorders_locally() {
        let api = seeded_api();
        let (_owner, store, dnd) = setup(api.clone());

        assert!(dnd.drag_start("t-3".into()));
        dnd.drag_over(DropTarget::Item("t-1".into())).await;

        assert_eq!(ids(&store.projects()[0]), ["t-3", "t-1", "t-2"]);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cross_project_hover_commits_during_drag() {
        let api = seeded_api();
        let (_owner, store, dnd) = setup(api.clone());

        dnd.drag_start("t-1".into());
        dnd.drag_over(DropTarget::Item("t-4".into())).await;

        let projects = store.projects();
        assert_eq!(ids(&projects[0]), ["t-2", "t-3"]);
        assert_eq!(ids(&projects[1]), ["t-1", "t-4"]);
        assert_eq!(dnd.phase(), DragPhase::Dragging { active: "t-1".into() });

        dnd.drag_end();
        assert_eq!(dnd.phase(), DragPhase::Idle);
        assert_eq!(ids(&store.projects()[1]), ["t-1", "t-4"]);
    }

    #[tokio::test]
    async fn test_hover_over_column_appends() {
        let api = seeded_api();
        let (_owner, store, dnd) = setup(api);

        dnd.drag_start("t-2".into());
        dnd.drag_over(DropTarget::Container("p-2".into())).await;

        assert_eq!(ids(&store.projects()[1]), ["t-4", "t-2"]);
    }

    #[tokio::test]
    async fn test_rejected_move_is_reverted_and_reported() {
        let api = seeded_api();
        api.fail_moves(true);
        let (_owner, store, dnd) = setup(api);
        let before = store.projects();

        dnd.drag_start("t-2".into());
        dnd.drag_over(DropTarget::Item("t-4".into())).await;

        assert_eq!(store.projects(), before);
        assert!(dnd.notice().get_untracked().is_some());
        // gesture keeps going after the failure
        assert_eq!(dnd.phase(), DragPhase::Dragging { active: "t-2".into() });
    }

    #[tokio::test]
    async fn test_hover_without_drag_does_nothing() {
        let api = seeded_api();
        let (_owner, store, dnd) = setup(api.clone());
        let before = store.projects();

        dnd.drag_over(DropTarget::Item("t-4".into())).await;

        assert_eq!(store.projects(), before);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_drop_on_own_slot_is_noop() {
        let api = seeded_api();
        let (_owner, store, dnd) = setup(api);
        let before = store.projects();

        dnd.drag_start("t-2".into());
        dnd.drag_over(DropTarget::Item("t-2".into())).await;
        dnd.drag_end();

        assert_eq!(store.projects(), before);
    }
}
