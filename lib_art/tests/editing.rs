mod common;

use common::{brush, mixed_grid, session, temp_path, RED, SMALL_ART};
use lib_art::cart;
use lib_art::{Cell, Channel, FileError, Grid, Mode, Position};

fn paint_at(session: &mut lib_art::Session, x: i32, y: i32) {
    session.press(Channel::Paint, Position::new(x, y)).unwrap();
    session.release(Channel::Paint);
}

#[test]
fn test_resize_preserves_overlap() {
    let original = mixed_grid();
    let mut grid = original.clone();

    grid.resize(6, 2).unwrap();
    assert_eq!(grid.dimensions(), (6, 2));
    for y in 0..2 {
        for x in 0..6 {
            let expected = if x < 4 { original.get(x, y).unwrap() } else { Cell::EMPTY };
            assert_eq!(grid.get(x, y).unwrap(), expected);
        }
    }

    grid.resize(4, 3).unwrap();
    assert_eq!(grid.get(2, 1).unwrap(), original.get(2, 1).unwrap());
    assert_eq!(grid.get(0, 2).unwrap(), Cell::EMPTY);
}

#[test]
fn test_undo_redo_walks_back_and_forth() {
    let mut session = session(4, 4, 16);
    session.toolbar_mut().set_brush(brush());

    let mut states = vec![session.grid().clone()];
    for i in 0..4 {
        paint_at(&mut session, i, i);
        states.push(session.grid().clone());
    }

    for expected in states.iter().rev().skip(1) {
        assert!(session.undo());
        assert_eq!(session.grid(), expected);
    }
    assert!(!session.undo());

    for expected in states.iter().skip(1) {
        assert!(session.redo());
        assert_eq!(session.grid(), expected);
    }
    assert!(!session.redo());
}

#[test]
fn test_noop_stroke_records_nothing() {
    let mut session = session(3, 3, 16);
    session.toolbar_mut().set_brush(brush());
    paint_at(&mut session, 0, 0);
    assert_eq!(session.history().undo_len(), 1);

    // Erasing an empty cell and repainting an identical cell change nothing.
    session.press(Channel::Erase, Position::new(2, 2)).unwrap();
    session.release(Channel::Erase);
    paint_at(&mut session, 0, 0);
    paint_at(&mut session, -4, 1);

    assert_eq!(session.history().undo_len(), 1);
}

#[test]
fn test_history_is_bounded() {
    const UNDO_LENGTH: usize = 5;
    let mut session = session(8, 1, UNDO_LENGTH);
    session.toolbar_mut().set_brush(brush());

    for x in 0..8 {
        paint_at(&mut session, x, 0);
    }
    assert_eq!(session.history().undo_len(), UNDO_LENGTH);

    for _ in 0..UNDO_LENGTH {
        assert!(session.undo());
    }
    assert!(!session.undo());

    // The three oldest strokes were evicted and can no longer be undone.
    let painted: Vec<bool> = session.grid().cells().iter().map(|cell| !cell.is_empty()).collect();
    assert_eq!(painted, [true, true, true, false, false, false, false, false]);
}

#[test]
fn test_noop_stroke_on_full_history_keeps_oldest_step() {
    const UNDO_LENGTH: usize = 3;
    let mut session = session(4, 1, UNDO_LENGTH);
    session.toolbar_mut().set_brush(brush());

    for x in 0..3 {
        paint_at(&mut session, x, 0);
    }
    assert_eq!(session.history().undo_len(), UNDO_LENGTH);

    paint_at(&mut session, -5, -5);
    assert_eq!(session.history().undo_len(), UNDO_LENGTH);

    for _ in 0..UNDO_LENGTH {
        assert!(session.undo());
    }
    assert!(!session.undo());
    assert_eq!(session.grid(), &Grid::new(4, 1).unwrap());
}

#[test]
fn test_box_released_at_origin_paints_one_cell() {
    let mut session = session(6, 6, 16);
    session.toolbar_mut().set_brush(brush());
    session.set_mode(Mode::Box);

    session.press(Channel::Paint, Position::new(2, 3)).unwrap();
    session.drag(Channel::Paint, Position::new(5, 5));
    session.drag(Channel::Paint, Position::new(0, 0));
    session.drag(Channel::Paint, Position::new(2, 3));
    session.release(Channel::Paint);

    let painted: Vec<(usize, usize)> = (0..6)
        .flat_map(|y| (0..6).map(move |x| (x, y)))
        .filter(|&(x, y)| !session.grid().get(x, y).unwrap().is_empty())
        .collect();
    assert_eq!(painted, vec![(2, 3)]);
    assert_eq!(session.history().undo_len(), 1);
}

#[test]
fn test_paint_undo_and_cart_scenario() {
    let mut session = session(3, 3, 16);
    session.toolbar_mut().set_brush(brush());

    paint_at(&mut session, 1, 1);
    let cell = session.grid().get(1, 1).unwrap();
    assert_eq!(cell.character, Some('x'));
    assert_eq!(cell.foreground, Some(RED));
    assert_eq!(cell.background, None);
    assert_eq!(session.grid(), &lib_art::art::decode(SMALL_ART).unwrap());

    let painted = session.grid().clone();
    let data = cart::encode(&painted);
    assert_eq!(data.len(), 97);
    assert_eq!(cart::decode(&data).unwrap(), painted);

    assert!(session.undo());
    assert_eq!(session.grid(), &Grid::new(3, 3).unwrap());
}

#[test]
fn test_failed_import_keeps_grid() {
    let mut session = session(3, 3, 16);
    session.toolbar_mut().set_brush(brush());
    paint_at(&mut session, 2, 0);
    let before = session.grid().clone();

    let path = temp_path("broken.cart");
    std::fs::write(&path, [3, 0, 0]).unwrap();
    let result = session.import(&path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(FileError::CartDecode(_))));
    assert_eq!(session.grid(), &before);
    assert_eq!(session.history().undo_len(), 1);
}

#[test]
fn test_export_then_import_is_undoable() {
    let mut session = session(3, 3, 16);
    session.toolbar_mut().set_brush(brush());
    paint_at(&mut session, 0, 0);

    let path = temp_path("exported.art");
    session.export(&path).unwrap();
    session.new_texture(5, 5).unwrap();
    let imported = session.import(&path);
    let _ = std::fs::remove_file(&path);
    imported.unwrap();

    assert_eq!(session.grid().dimensions(), (3, 3));
    assert_eq!(session.grid().get(0, 0).unwrap(), brush());

    assert!(session.undo());
    assert_eq!(session.grid(), &Grid::new(5, 5).unwrap());
}
