//! Leptos DragDrop Utilities
//!
//! Drag session state machine and mouse-event bindings for Leptos.
//! Uses movement threshold to distinguish click from drag.
//!
//! The session moves through `Idle -> Dragging -> (Committing -> Reverting?)* -> Idle`.
//! Callers own the meaning of a commit; this crate only tracks which phase the
//! gesture is in so that a second commit cannot start while one is in flight.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// How long `drag_just_ended` stays raised after a drop (suppresses the trailing click)
const DRAG_END_CLICK_GUARD_MS: i32 = 100;

/// What the pointer is currently over
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget<Id> {
    /// Another draggable item
    Item(Id),
    /// A container, e.g. the empty tail of a column
    Container(Id),
}

/// Lifecycle events reported to the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragEvent<Id> {
    /// Pointer moved past the threshold while holding an item
    Start(Id),
    /// Pointer entered a drop target while dragging
    Over { active: Id, target: DropTarget<Id> },
    /// Pointer released
    End { active: Option<Id> },
}

/// Drag phase
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPhase<Id> {
    Idle,
    /// Local, unconfirmed changes only
    Dragging { active: Id },
    /// A remote commit for `active` into `target` is in flight
    Committing { active: Id, target: Id },
    /// The last commit failed and its local change is being undone
    Reverting { active: Id },
}

impl<Id> Default for DragPhase<Id> {
    fn default() -> Self {
        DragPhase::Idle
    }
}

/// Drag session state machine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession<Id> {
    phase: DragPhase<Id>,
    /// Pointer was released while a commit or revert was still settling
    released: bool,
}

impl<Id> Default for DragSession<Id> {
    fn default() -> Self {
        Self {
            phase: DragPhase::Idle,
            released: false,
        }
    }
}

impl<Id: Clone + PartialEq> DragSession<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &DragPhase<Id> {
        &self.phase
    }

    /// The item being dragged, if any (including while a commit settles)
    pub fn active(&self) -> Option<&Id> {
        match &self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging { active }
            | DragPhase::Committing { active, .. }
            | DragPhase::Reverting { active } => Some(active),
        }
    }

    /// The item to render as the drag overlay. Cleared as soon as the pointer is released.
    pub fn overlay(&self) -> Option<&Id> {
        if self.released {
            None
        } else {
            self.active()
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, DragPhase::Idle)
    }

    /// A commit or revert is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            DragPhase::Committing { .. } | DragPhase::Reverting { .. }
        )
    }

    /// Idle -> Dragging. Returns false if a gesture is already running.
    pub fn start(&mut self, active: Id) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = DragPhase::Dragging { active };
        self.released = false;
        true
    }

    /// Dragging -> Committing. Returns false if not dragging (e.g. a commit is already running).
    pub fn begin_commit(&mut self, target: Id) -> bool {
        match &self.phase {
            DragPhase::Dragging { active } => {
                self.phase = DragPhase::Committing {
                    active: active.clone(),
                    target,
                };
                true
            }
            _ => false,
        }
    }

    /// Committing -> Dragging, or Idle if the pointer was released meanwhile.
    pub fn commit_succeeded(&mut self) {
        if let DragPhase::Committing { active, .. } = &self.phase {
            let active = active.clone();
            self.settle(active);
        }
    }

    /// Committing -> Reverting
    pub fn commit_failed(&mut self) {
        if let DragPhase::Committing { active, .. } = &self.phase {
            self.phase = DragPhase::Reverting {
                active: active.clone(),
            };
        }
    }

    /// Reverting -> Dragging, or Idle if the pointer was released meanwhile.
    pub fn revert_finished(&mut self) {
        if let DragPhase::Reverting { active } = &self.phase {
            let active = active.clone();
            self.settle(active);
        }
    }

    /// Pointer released. A running commit keeps its phase until it settles.
    pub fn end(&mut self) {
        match self.phase {
            DragPhase::Idle => {}
            DragPhase::Dragging { .. } => {
                self.phase = DragPhase::Idle;
                self.released = false;
            }
            DragPhase::Committing { .. } | DragPhase::Reverting { .. } => {
                self.released = true;
            }
        }
    }

    fn settle(&mut self, active: Id) {
        if self.released {
            self.phase = DragPhase::Idle;
            self.released = false;
        } else {
            self.phase = DragPhase::Dragging { active };
        }
    }
}

/// True once the pointer has moved far enough from `start` to count as a drag
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    let dx = (now.0 - start.0).abs();
    let dy = (now.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// DnD state signals
pub struct DndSignals<Id: Send + Sync + 'static> {
    pub session: RwSignal<DragSession<Id>>,
    pub drop_target: RwSignal<Option<DropTarget<Id>>>,
    pub drag_just_ended: RwSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending: RwSignal<Option<Id>>,
    /// Start position for movement detection
    pub start_pos: RwSignal<(i32, i32)>,
}

impl<Id: Send + Sync + 'static> Clone for DndSignals<Id> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Id: Send + Sync + 'static> Copy for DndSignals<Id> {}

pub fn create_dnd_signals<Id: Send + Sync + 'static>() -> DndSignals<Id> {
    DndSignals {
        session: RwSignal::new(DragSession::default()),
        drop_target: RwSignal::new(None),
        drag_just_ended: RwSignal::new(false),
        pending: RwSignal::new(None),
        start_pos: RwSignal::new((0, 0)),
    }
}

impl<Id> DndSignals<Id>
where
    Id: Clone + PartialEq + Send + Sync + 'static,
{
    /// Reactive: the item to render as drag overlay
    pub fn overlay(&self) -> Option<Id> {
        self.session.with(|s| s.overlay().cloned())
    }

    pub fn active_untracked(&self) -> Option<Id> {
        self.session.with_untracked(|s| s.active().cloned())
    }
}

/// End drag operation
pub fn end_drag<Id>(dnd: &DndSignals<Id>)
where
    Id: Clone + PartialEq + Send + Sync + 'static,
{
    dnd.session.update(|s| s.end());
    dnd.drop_target.set(None);
    dnd.pending.set(None);
    dnd.drag_just_ended.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            DRAG_END_CLICK_GUARD_MS,
        );
        cb.forget();
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown<Id>(dnd: DndSignals<Id>, item_id: Id) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    Id: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Ignore if target is input or button
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending.set(Some(item_id.clone()));
        dnd.start_pos.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mouseenter handler for a drop target
pub fn make_on_target_mouseenter<Id>(
    dnd: DndSignals<Id>,
    target: DropTarget<Id>,
    handler: Callback<DragEvent<Id>>,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    Id: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        let Some(active) = dnd.active_untracked() else { return };
        // Don't report hovering over self
        if target == DropTarget::Item(active.clone()) {
            return;
        }
        dnd.drop_target.set(Some(target.clone()));
        handler.run(DragEvent::Over {
            active,
            target: target.clone(),
        });
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<Id>(dnd: DndSignals<Id>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    Id: Clone + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.active_untracked().is_some() {
            dnd.drop_target.set(None);
        }
    }
}

/// Bind global mousemove (drag start) and mouseup (drag end) handlers
pub fn bind_drag_events<Id>(dnd: DndSignals<Id>, handler: Callback<DragEvent<Id>>)
where
    Id: Clone + PartialEq + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending.get_untracked() else { return };
        if !dnd.session.with_untracked(|s| s.is_idle()) {
            return;
        }
        if exceeds_threshold(dnd.start_pos.get_untracked(), (ev.client_x(), ev.client_y())) {
            let mut started = false;
            dnd.session.update(|s| started = s.start(pending.clone()));
            if started {
                handler.run(DragEvent::Start(pending));
            }
        }
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let active = dnd.active_untracked();
        let was_dragging = dnd.session.with_untracked(|s| s.overlay().is_some());
        dnd.pending.set(None);
        if was_dragging {
            end_drag(&dnd);
            handler.run(DragEvent::End { active });
        }
        // Not dragging: the click event fires naturally on the element
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
    on_mouseup.forget();
}
