use tui_2048::core::{BoardEngine, EngineConfig, GameSnapshot, Presentation};
use tui_2048::term::{GameView, Viewport};
use tui_2048::types::Outcome;

fn screen_text(fb: &tui_2048::term::FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let mut engine = BoardEngine::new(EngineConfig::default().with_seed(1)).unwrap();
    let report = engine.start_game();
    let view = GameView::default();

    // 4 tiles of 7x3 plus a border => 30x14, three rows of status below.
    let fb = view.render(&report.snapshot, engine.presentation(), Viewport::new(30, 17));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(29, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 13).unwrap().ch, '└');
    assert_eq!(fb.get(29, 13).unwrap().ch, '┘');
}

#[test]
fn term_view_prints_tile_values_and_score() {
    let snap = GameSnapshot {
        size: 2,
        tiles: vec![2048, 0, 0, 16],
        score: 1234,
        step: 56,
        outcome: Outcome::Move,
    };
    let view = GameView::default();
    let fb = view.render(&snap, &Presentation::default(), Viewport::new(60, 20));
    let text = screen_text(&fb);

    assert!(text.contains("2048"));
    assert!(text.contains("16"));
    assert!(text.contains("SCORE 1234"));
    assert!(text.contains("STEP 56"));
}

#[test]
fn term_view_shows_banner_on_game_over() {
    let snap = GameSnapshot {
        size: 2,
        tiles: vec![2, 4, 4, 2],
        score: 0,
        step: 3,
        outcome: Outcome::GameOver,
    };
    let fb = GameView::default().render(&snap, &Presentation::default(), Viewport::new(40, 12));
    assert!(screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_tolerates_tiny_viewport() {
    let snap = GameSnapshot {
        size: 4,
        tiles: vec![0; 16],
        score: 0,
        step: 0,
        outcome: Outcome::Start,
    };
    let fb = GameView::default().render(&snap, &Presentation::default(), Viewport::new(5, 3));
    assert_eq!((fb.width(), fb.height()), (5, 3));
}
