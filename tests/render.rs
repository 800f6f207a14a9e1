use cairo::{Context, Format, ImageSurface};
use kidsdraw::Config;
use kidsdraw::draw::{CanvasSurface, GREEN, RED, Raster, WHITE};
use kidsdraw::input::{Action, InputState, PointerEvent, ToolCommand};

fn make_input_state() -> InputState {
    InputState::from_config(&Config::default())
}

fn paint(state: &InputState, width: i32, height: i32) -> Raster {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        state.surface.render(&ctx).unwrap();
    }
    Raster::from_surface(&surface).unwrap()
}

fn stroke(state: &mut InputState, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    state.on_pointer_event(PointerEvent::Down {
        x: first.0,
        y: first.1,
    });
    for &(x, y) in rest {
        state.on_pointer_event(PointerEvent::Move { x, y });
    }
    state.on_pointer_event(PointerEvent::Up { x: 0.0, y: 0.0 });
}

#[test]
fn blank_canvas_renders_paper() {
    let state = make_input_state();
    assert_eq!(paint(&state, 10, 10), Raster::filled(10, 10, WHITE).unwrap());
}

#[test]
fn rendering_twice_is_identical() {
    let mut state = make_input_state();
    stroke(&mut state, &[(5.0, 5.0), (40.0, 30.0), (10.0, 45.0)]);
    state.on_pointer_event(PointerEvent::Down { x: 25.0, y: 25.0 });

    assert_eq!(paint(&state, 50, 50), paint(&state, 50, 50));
}

#[test]
fn undo_restores_previous_pixels() {
    let mut state = make_input_state();
    stroke(&mut state, &[(5.0, 10.0), (45.0, 10.0)]);
    let one_stroke = paint(&state, 50, 50);

    state.handle_action(Action::Tool(ToolCommand::SetColor(RED)));
    stroke(&mut state, &[(5.0, 40.0), (45.0, 40.0)]);
    assert_ne!(paint(&state, 50, 50), one_stroke);

    state.handle_action(Action::Undo);
    assert_eq!(paint(&state, 50, 50), one_stroke);

    state.handle_action(Action::Undo);
    assert_eq!(paint(&state, 50, 50), Raster::filled(50, 50, WHITE).unwrap());
}

#[test]
fn strokes_paint_over_background() {
    let mut state = make_input_state();
    let background = Raster::filled(30, 30, GREEN).unwrap();
    state.handle_action(Action::SetBackground(background.clone()));
    assert_eq!(paint(&state, 30, 30), background);

    state.handle_action(Action::Tool(ToolCommand::SetColor(RED)));
    stroke(&mut state, &[(0.0, 15.0), (30.0, 15.0)]);
    let painted = paint(&state, 30, 30);
    assert_eq!(painted.argb_at(15, 15), Some(RED.to_argb()));
    assert_eq!(painted.argb_at(15, 0), Some(GREEN.to_argb()));
}

#[test]
fn snapshot_renders_like_surface() {
    let mut canvas = CanvasSurface::default();
    canvas.begin_stroke(3.0, 3.0);
    canvas.extend_stroke(17.0, 12.0);

    let snapshot = canvas.snapshot();
    let from_snapshot =
        Raster::from_surface(&snapshot.render_to_surface(20, 20).unwrap()).unwrap();
    assert_eq!(from_snapshot, canvas.render_to_raster(20, 20).unwrap());

    canvas.commit_stroke();
    canvas.undo();
    assert_ne!(from_snapshot, canvas.render_to_raster(20, 20).unwrap());
}
