//! Integration tests for the full interaction flow: activation, hover
//! tracking, drop commit, cancellation, and registry hygiene. Headless, no
//! real timers; time is driven with explicit instants.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use dragkit::{
    ActivationConstraint, DragCoordinator, DragEvent, DragPhase, DraggableController, DropTarget,
    InteractionId, Key, PointerButton,
};
use dragkit_core::geometry::Rect;
use dragkit_core::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    Block,
    Chip,
}

/// Shape payload in the style of the block-puzzle game layer built on top
/// of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Shape {
    cells: Vec<Vec<bool>>,
}

#[derive(Default)]
struct TargetLog {
    enters: usize,
    overs: usize,
    leaves: usize,
    drops: Vec<(Shape, Vec2)>,
}

/// Build a target wired to a shared log of callback invocations.
fn logged_target(
    id: &str,
    region: Rect,
    log: &Rc<RefCell<TargetLog>>,
) -> DropTarget<Kind, Shape> {
    let enters = log.clone();
    let overs = log.clone();
    let leaves = log.clone();
    let drops = log.clone();
    DropTarget::new(id)
        .fixed_region(region)
        .accepts(Kind::Block)
        .on_drag_enter(move |_: &Shape| enters.borrow_mut().enters += 1)
        .on_drag_over(move |_, _| overs.borrow_mut().overs += 1)
        .on_drag_leave(move || leaves.borrow_mut().leaves += 1)
        .on_drop(move |payload, position| {
            drops.borrow_mut().drops.push((payload.clone(), position));
        })
}

fn single_cell() -> Shape {
    Shape {
        cells: vec![vec![true]],
    }
}

#[test]
fn end_to_end_block_drop_on_grid() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let log = Rc::new(RefCell::new(TargetLog::default()));
    coordinator.register_target(logged_target("grid", Rect::new(0.0, 0.0, 400.0, 400.0), &log));

    let mut block = DraggableController::new("b1", Kind::Block, single_cell())
        .activation(ActivationConstraint::immediate());
    let now = Instant::now();

    block.on_pointer_down(
        &mut coordinator,
        PointerButton::Primary,
        Vec2::new(50.0, 50.0),
        now,
    );
    // Pick-up point is already inside the grid, so enter fires on the first
    // evaluation and over on each subsequent move.
    assert_eq!(log.borrow().enters, 1);

    block.on_pointer_move(&mut coordinator, Vec2::new(80.0, 80.0), now);
    block.on_pointer_move(&mut coordinator, Vec2::new(120.0, 120.0), now);
    assert_eq!(log.borrow().enters, 1);
    assert_eq!(log.borrow().overs, 2);
    assert_eq!(
        coordinator.hovered_target(),
        Some(InteractionId::new("grid"))
    );

    block.on_pointer_up(&mut coordinator, Vec2::new(120.0, 120.0), now);

    let log = log.borrow();
    assert_eq!(log.drops.len(), 1);
    assert_eq!(log.drops[0], (single_cell(), Vec2::new(120.0, 120.0)));
    assert_eq!(log.leaves, 1);
    assert_eq!(coordinator.phase(), DragPhase::Idle);
}

#[test]
fn mutual_exclusion_across_controllers() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let mut first = DraggableController::new("b1", Kind::Block, single_cell());
    let mut second = DraggableController::new("b2", Kind::Block, single_cell());
    let now = Instant::now();

    first.on_pointer_down(&mut coordinator, PointerButton::Primary, Vec2::ZERO, now);
    second.on_pointer_down(
        &mut coordinator,
        PointerButton::Primary,
        Vec2::new(10.0, 10.0),
        now,
    );

    assert!(first.is_dragging());
    assert!(!second.is_dragging());
    assert_eq!(coordinator.active_item(), Some(InteractionId::new("b1")));
}

#[test]
fn activation_by_distance() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let mut block = DraggableController::new("b1", Kind::Block, single_cell())
        .activation(ActivationConstraint::distance(10.0));
    let now = Instant::now();

    block.on_pointer_down(&mut coordinator, PointerButton::Primary, Vec2::ZERO, now);
    block.on_pointer_move(&mut coordinator, Vec2::new(9.0, 0.0), now);
    assert_eq!(block.phase(), DragPhase::Pending);
    assert_eq!(coordinator.phase(), DragPhase::Idle);

    block.on_pointer_move(&mut coordinator, Vec2::new(10.0, 0.0), now);
    assert_eq!(block.phase(), DragPhase::Dragging);
    let op = coordinator.operation().unwrap();
    // Initial position is the pick-up point; the triggering position arrives
    // as the first update.
    assert_eq!(op.initial_position, Vec2::ZERO);
    assert_eq!(op.pointer_position, Vec2::new(10.0, 0.0));
}

#[test]
fn activation_by_delay_with_tolerance() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let mut block = DraggableController::new("b1", Kind::Block, single_cell())
        .activation(ActivationConstraint::delay(Duration::from_millis(300), 5.0));
    let start = Instant::now();

    block.on_pointer_down(&mut coordinator, PointerButton::Primary, Vec2::ZERO, start);

    // Drift within tolerance keeps the gesture pending with the timer armed
    block.on_pointer_move(
        &mut coordinator,
        Vec2::new(5.0, 0.0),
        start + Duration::from_millis(100),
    );
    assert!(block.is_pending());

    // The deadline promotes it
    block.poll(&mut coordinator, start + Duration::from_millis(300));
    assert!(block.is_dragging());
    assert_eq!(coordinator.operation().unwrap().initial_position, Vec2::ZERO);
}

#[test]
fn tolerance_aborts_before_deadline() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let mut block = DraggableController::new("b1", Kind::Block, single_cell())
        .activation(ActivationConstraint::delay(Duration::from_millis(300), 5.0));
    let start = Instant::now();

    block.on_pointer_down(&mut coordinator, PointerButton::Primary, Vec2::ZERO, start);
    block.on_pointer_move(
        &mut coordinator,
        Vec2::new(6.0, 0.0),
        start + Duration::from_millis(100),
    );

    // No drag starts, not even after the original deadline
    block.poll(&mut coordinator, start + Duration::from_millis(400));
    assert_eq!(block.phase(), DragPhase::Idle);
    assert_eq!(coordinator.phase(), DragPhase::Idle);
}

#[test]
fn escape_cancels_without_any_drop() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let log = Rc::new(RefCell::new(TargetLog::default()));
    coordinator.register_target(logged_target("grid", Rect::new(0.0, 0.0, 400.0, 400.0), &log));

    let ended = Rc::new(RefCell::new(Vec::new()));
    let sink = ended.clone();
    coordinator.subscribe(move |event| {
        if let DragEvent::Ended {
            cancelled,
            drop_zone,
            ..
        } = event
        {
            sink.borrow_mut().push((*cancelled, *drop_zone));
        }
    });

    let mut block = DraggableController::new("b1", Kind::Block, single_cell());
    let now = Instant::now();
    block.on_pointer_down(
        &mut coordinator,
        PointerButton::Primary,
        Vec2::new(50.0, 50.0),
        now,
    );
    block.on_key_down(&mut coordinator, Key::Escape);

    assert_eq!(coordinator.phase(), DragPhase::Idle);
    assert_eq!(*ended.borrow(), vec![(true, None)]);
    assert!(log.borrow().drops.is_empty());
    // The hovered target still received its synthetic leave
    assert_eq!(log.borrow().leaves, 1);
}

#[test]
fn commit_requires_hover_at_release() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let log = Rc::new(RefCell::new(TargetLog::default()));
    coordinator.register_target(logged_target("grid", Rect::new(0.0, 0.0, 100.0, 100.0), &log));

    let mut block = DraggableController::new("b1", Kind::Block, single_cell());
    let now = Instant::now();

    // Hover the target mid-gesture, then leave it before release
    block.on_pointer_down(
        &mut coordinator,
        PointerButton::Primary,
        Vec2::new(50.0, 50.0),
        now,
    );
    block.on_pointer_move(&mut coordinator, Vec2::new(200.0, 200.0), now);
    assert_eq!(log.borrow().enters, 1);
    assert_eq!(log.borrow().leaves, 1);

    block.on_pointer_up(&mut coordinator, Vec2::new(200.0, 200.0), now);
    assert!(log.borrow().drops.is_empty());
    assert_eq!(coordinator.phase(), DragPhase::Idle);
}

#[test]
fn commit_respects_kind_filtering() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let log = Rc::new(RefCell::new(TargetLog::default()));
    // Accepts blocks only
    coordinator.register_target(logged_target("grid", Rect::new(0.0, 0.0, 400.0, 400.0), &log));

    let mut chip = DraggableController::new("c1", Kind::Chip, single_cell());
    let now = Instant::now();
    chip.on_pointer_down(
        &mut coordinator,
        PointerButton::Primary,
        Vec2::new(50.0, 50.0),
        now,
    );
    chip.on_pointer_move(&mut coordinator, Vec2::new(60.0, 60.0), now);

    // Wrong kind: not a candidate regardless of geometry
    assert_eq!(log.borrow().enters, 0);
    assert_eq!(coordinator.hovered_target(), None);

    chip.on_pointer_up(&mut coordinator, Vec2::new(60.0, 60.0), now);
    assert!(log.borrow().drops.is_empty());
}

#[test]
fn commit_respects_can_drop_predicate() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let dropped = Rc::new(RefCell::new(0));
    let drops = dropped.clone();
    coordinator.register_target(
        DropTarget::new("grid")
            .fixed_region(Rect::new(0.0, 0.0, 400.0, 400.0))
            .accepts(Kind::Block)
            .can_drop(|shape: &Shape| shape.cells.len() > 1)
            .on_drop(move |_, _| *drops.borrow_mut() += 1),
    );

    let mut block = DraggableController::new("b1", Kind::Block, single_cell());
    let now = Instant::now();
    block.on_pointer_down(
        &mut coordinator,
        PointerButton::Primary,
        Vec2::new(50.0, 50.0),
        now,
    );

    // Target is hovered but semantically rejecting
    let state = coordinator.target_state("grid").unwrap();
    assert!(state.is_over);
    assert!(!state.can_drop);

    block.on_pointer_up(&mut coordinator, Vec2::new(50.0, 50.0), now);
    assert_eq!(*dropped.borrow(), 0);
    assert_eq!(coordinator.phase(), DragPhase::Idle);
}

#[test]
fn unregistered_target_gets_synthetic_leave_and_no_drop() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let log = Rc::new(RefCell::new(TargetLog::default()));
    let other = Rc::new(RefCell::new(TargetLog::default()));
    coordinator.register_target(logged_target("grid", Rect::new(0.0, 0.0, 100.0, 100.0), &log));
    coordinator.register_target(logged_target(
        "tray",
        Rect::new(200.0, 0.0, 100.0, 100.0),
        &other,
    ));

    let mut block = DraggableController::new("b1", Kind::Block, single_cell());
    let now = Instant::now();
    block.on_pointer_down(
        &mut coordinator,
        PointerButton::Primary,
        Vec2::new(50.0, 50.0),
        now,
    );
    assert_eq!(log.borrow().enters, 1);

    coordinator.unregister_target("grid");
    assert_eq!(log.borrow().leaves, 1);
    assert_eq!(coordinator.hovered_target(), None);
    // Unrelated target saw nothing
    assert_eq!(other.borrow().enters, 0);
    assert_eq!(other.borrow().leaves, 0);

    block.on_pointer_up(&mut coordinator, Vec2::new(50.0, 50.0), now);
    assert!(log.borrow().drops.is_empty());
}

#[test]
fn moving_region_is_requeried_each_update() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let region = Rc::new(RefCell::new(Some(Rect::new(0.0, 0.0, 100.0, 100.0))));
    let provider = region.clone();
    let log = Rc::new(RefCell::new(TargetLog::default()));
    let leaves = log.clone();
    coordinator.register_target(
        DropTarget::new("grid")
            .region(move || *provider.borrow())
            .accepts(Kind::Block)
            .on_drag_leave(move || leaves.borrow_mut().leaves += 1),
    );

    let mut block = DraggableController::new("b1", Kind::Block, single_cell());
    let now = Instant::now();
    block.on_pointer_down(
        &mut coordinator,
        PointerButton::Primary,
        Vec2::new(50.0, 50.0),
        now,
    );
    assert!(coordinator.hovered_target().is_some());

    // Element detaches mid-drag: provider starts returning None
    *region.borrow_mut() = None;
    block.on_pointer_move(&mut coordinator, Vec2::new(51.0, 50.0), now);
    assert_eq!(coordinator.hovered_target(), None);
    assert_eq!(log.borrow().leaves, 1);
}

#[test]
fn keyboard_pick_up_and_commit() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let log = Rc::new(RefCell::new(TargetLog::default()));
    coordinator.register_target(logged_target("grid", Rect::new(0.0, 0.0, 400.0, 400.0), &log));

    let mut block = DraggableController::new("b1", Kind::Block, single_cell())
        .region(|| Some(Rect::new(40.0, 40.0, 20.0, 20.0)))
        .keyboard_step(10.0);

    // Enter picks up from the element center (50, 50)
    block.on_key_down(&mut coordinator, Key::Enter);
    assert!(block.is_dragging());
    assert_eq!(
        coordinator.operation().unwrap().initial_position,
        Vec2::new(50.0, 50.0)
    );

    block.on_key_down(&mut coordinator, Key::ArrowRight);
    block.on_key_down(&mut coordinator, Key::ArrowDown);
    assert_eq!(
        coordinator.operation().unwrap().pointer_position,
        Vec2::new(60.0, 60.0)
    );

    // Second Enter commits
    block.on_key_down(&mut coordinator, Key::Enter);
    assert_eq!(log.borrow().drops.len(), 1);
    assert_eq!(log.borrow().drops[0].1, Vec2::new(60.0, 60.0));
    assert_eq!(coordinator.phase(), DragPhase::Idle);
}

#[test]
fn hover_events_in_order() {
    let mut coordinator: DragCoordinator<Kind, Shape> = DragCoordinator::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    coordinator.subscribe(move |event| {
        let name = match event {
            DragEvent::Started { .. } => "started",
            DragEvent::Moved { .. } => "moved",
            DragEvent::HoverChanged { target: Some(_) } => "hover",
            DragEvent::HoverChanged { target: None } => "unhover",
            DragEvent::Ended { .. } => "ended",
        };
        sink.borrow_mut().push(name);
    });
    coordinator.register_target(
        DropTarget::new("grid")
            .fixed_region(Rect::new(100.0, 0.0, 100.0, 100.0))
            .accepts(Kind::Block),
    );

    let mut block = DraggableController::new("b1", Kind::Block, single_cell());
    let now = Instant::now();
    block.on_pointer_down(&mut coordinator, PointerButton::Primary, Vec2::ZERO, now);
    block.on_pointer_move(&mut coordinator, Vec2::new(150.0, 50.0), now);
    block.on_pointer_move(&mut coordinator, Vec2::new(250.0, 50.0), now);
    block.on_pointer_up(&mut coordinator, Vec2::new(250.0, 50.0), now);

    assert_eq!(
        *events.borrow(),
        vec!["started", "moved", "hover", "moved", "unhover", "ended"]
    );
}
