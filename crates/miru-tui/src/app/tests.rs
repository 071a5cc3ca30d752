use super::*;
use crate::action::Action;
use crate::model::series_view::Footer;
use miru_core::{Key, NewSeries, SeriesId, SqliteStore, Status};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Create an App over a fresh in-memory store.
fn test_app() -> App {
    let store = SqliteStore::open_in_memory().unwrap();
    App::new(Box::new(store), Theme::classic(), OrderField::Name).unwrap()
}

fn seed(app: &mut App, name: &str, seen: u32, episodes: u32, status: Option<Status>) -> SeriesId {
    let id = app
        .store
        .insert(&NewSeries {
            name: name.to_string(),
            episodes,
            seen,
            status,
        })
        .unwrap();
    app.display_view(app.current).unwrap();
    id
}

fn key(app: &mut App, key: Key) -> bool {
    app.update(Action::Key(key)).unwrap()
}

fn keys(app: &mut App, text: &str) {
    for c in text.chars() {
        key(app, Key::Char(c));
    }
}

fn names(app: &App, category: Category) -> Vec<String> {
    app.store
        .query(category, OrderField::Name)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect()
}

fn visible_names(app: &App) -> Vec<String> {
    app.current_view()
        .walker
        .entries()
        .iter()
        .map(|e| e.series().name.clone())
        .collect()
}

// ── Startup ─────────────────────────────────────────────────────

#[test]
fn starts_on_watching_with_title() {
    let mut app = test_app();
    assert_eq!(app.views.len(), 5);
    assert_eq!(app.current, 0);
    assert_eq!(
        app.take_pending_title().as_deref(),
        Some("Miru - Currently Watching")
    );
    assert_eq!(app.take_pending_title(), None);
}

// ── View switching ──────────────────────────────────────────────

#[test]
fn left_and_right_wrap_around() {
    let mut app = test_app();
    key(&mut app, Key::Char('h'));
    assert_eq!(app.current, 4);
    assert_eq!(app.take_pending_title().as_deref(), Some("Miru - Plan to Watch"));
    key(&mut app, Key::Right);
    assert_eq!(app.current, 0);
    key(&mut app, Key::Char('l'));
    assert_eq!(app.current, 1);
    key(&mut app, Key::Left);
    assert_eq!(app.current, 0);
}

#[test]
fn digits_jump_to_views() {
    let mut app = test_app();
    keys(&mut app, "4");
    assert_eq!(app.current_view().category(), Category::Dropped);
    keys(&mut app, "2");
    assert_eq!(app.current_view().category(), Category::Completed);
    // Out of range digits do nothing.
    keys(&mut app, "9");
    assert_eq!(app.current, 1);
}

#[test]
fn switching_reloads_the_new_view() {
    let mut app = test_app();
    keys(&mut app, "3");
    app.store
        .insert(&NewSeries {
            name: "Paused".to_string(),
            episodes: 3,
            seen: 1,
            status: Some(Status::Hold),
        })
        .unwrap();
    assert!(app.current_view().walker.is_empty());
    keys(&mut app, "l");
    keys(&mut app, "h");
    assert_eq!(visible_names(&app), ["Paused"]);
}

// ── Quit ────────────────────────────────────────────────────────

#[test]
fn q_quits() {
    let mut app = test_app();
    assert!(key(&mut app, Key::Char('Q')));
    assert!(app.should_quit);
}

#[test]
fn ctrl_c_action_quits_even_in_dialog() {
    let mut app = test_app();
    keys(&mut app, "a");
    assert!(app.update(Action::Quit).unwrap());
}

#[test]
fn q_inside_prompt_is_text() {
    let mut app = test_app();
    seed(&mut app, "Show", 0, 3, None);
    keys(&mut app, "x");
    assert!(!key(&mut app, Key::Char('q')));
    assert!(!app.should_quit);
}

// ── Row commands through the app ────────────────────────────────

#[test]
fn advancing_to_completion_moves_series() {
    let mut app = test_app();
    seed(&mut app, "Show A", 0, 12, None);
    for _ in 0..12 {
        keys(&mut app, "i");
    }
    assert!(visible_names(&app).is_empty());
    assert_eq!(names(&app, Category::Completed), ["Show A"]);
    keys(&mut app, "2");
    assert_eq!(visible_names(&app), ["Show A"]);
    assert_eq!(app.current_view().total_seen, 12);
}

#[test]
fn marking_dropped_then_advancing_returns_to_watching() {
    let mut app = test_app();
    seed(&mut app, "Show B", 2, 10, None);
    keys(&mut app, "md");
    assert!(visible_names(&app).is_empty());

    keys(&mut app, "4");
    assert_eq!(visible_names(&app), ["Show B"]);
    keys(&mut app, "i");
    assert!(visible_names(&app).is_empty());
    assert_eq!(names(&app, Category::Watching), ["Show B"]);
}

#[test]
fn marking_swallows_global_keys() {
    let mut app = test_app();
    seed(&mut app, "Show", 0, 3, None);
    keys(&mut app, "m");
    assert!(matches!(app.current_view().footer, Footer::MarkingPrompt));
    // 'l' is not a status letter: marking ends, no view switch.
    keys(&mut app, "l");
    assert_eq!(app.current, 0);
    assert!(matches!(app.current_view().footer, Footer::Totals));
}

// ── Prompts ─────────────────────────────────────────────────────

#[test]
fn set_seen_parses_leniently_and_clamps() {
    let mut app = test_app();
    let id = seed(&mut app, "Show", 3, 10, None);

    keys(&mut app, "s");
    keys(&mut app, "999");
    key(&mut app, Key::Enter);
    assert_eq!(app.store.get(id).unwrap().unwrap().seen, 10);

    keys(&mut app, "2");
    keys(&mut app, "s");
    key(&mut app, Key::Enter);
    assert_eq!(app.store.get(id).unwrap().unwrap().seen, 0);
}

#[test]
fn set_seen_prompt_drops_letters() {
    let mut app = test_app();
    let id = seed(&mut app, "Show", 3, 10, None);
    keys(&mut app, "s");
    keys(&mut app, "abc");
    key(&mut app, Key::Enter);
    assert_eq!(app.store.get(id).unwrap().unwrap().seen, 0);
}

#[test]
fn delete_needs_confirmation() {
    let mut app = test_app();
    let id = seed(&mut app, "Show", 0, 3, None);

    keys(&mut app, "xn");
    key(&mut app, Key::Enter);
    assert!(app.store.get(id).unwrap().is_some());
    assert_eq!(visible_names(&app), ["Show"]);

    keys(&mut app, "x");
    key(&mut app, Key::Esc);
    assert!(app.store.get(id).unwrap().is_some());

    keys(&mut app, "x Y ");
    key(&mut app, Key::Enter);
    assert!(app.store.get(id).unwrap().is_none());
    assert!(visible_names(&app).is_empty());
}

// ── Ordering ────────────────────────────────────────────────────

#[test]
fn ordering_broadcasts_to_all_views() {
    let mut app = test_app();
    seed(&mut app, "Alpha", 5, 9, None);
    seed(&mut app, "Beta", 1, 9, None);
    assert_eq!(visible_names(&app), ["Alpha", "Beta"]);

    keys(&mut app, "os");
    assert_eq!(visible_names(&app), ["Beta", "Alpha"]);
    assert!(
        app.views
            .iter()
            .all(|v| v.walker.order_by() == OrderField::Seen)
    );
}

#[test]
fn ordering_reloads_only_active_view() {
    let mut app = test_app();
    app.store
        .insert(&NewSeries {
            name: "Done".to_string(),
            episodes: 1,
            seen: 1,
            status: None,
        })
        .unwrap();
    keys(&mut app, "oe");
    // Completed was never displayed, so its snapshot is still empty.
    assert!(app.views[1].walker.is_empty());
    keys(&mut app, "2");
    assert_eq!(visible_names(&app), ["Done"]);
}

#[test]
fn unknown_order_key_falls_through_to_global() {
    let mut app = test_app();
    keys(&mut app, "ol");
    assert_eq!(app.current, 1);
    assert!(app.views.iter().all(|v| v.walker.order_by() == OrderField::Name));

    keys(&mut app, "o");
    assert!(key(&mut app, Key::Char('q')));
}

// ── Add dialog ──────────────────────────────────────────────────

fn add_via_dialog(app: &mut App, name: &str, episodes: &str) {
    keys(app, "a");
    assert!(app.dialog.is_some());
    keys(app, name);
    key(app, Key::Tab);
    keys(app, episodes);
    key(app, Key::Enter);
}

#[test]
fn add_from_watching() {
    let mut app = test_app();
    add_via_dialog(&mut app, "Fresh", "24");
    assert!(app.dialog.is_none());
    assert_eq!(visible_names(&app), ["Fresh"]);
    let s = &app.store.query(Category::Watching, OrderField::Name).unwrap()[0];
    assert_eq!((s.seen, s.episodes, s.status), (0, 24, None));
}

#[test]
fn add_from_completed_is_fully_watched() {
    let mut app = test_app();
    keys(&mut app, "2");
    add_via_dialog(&mut app, "Movie", "");
    let s = &app.store.query(Category::Completed, OrderField::Name).unwrap()[0];
    assert_eq!((s.seen, s.episodes, s.status), (1, 1, None));
    assert_eq!(visible_names(&app), ["Movie"]);
}

#[test]
fn add_from_hold_carries_status() {
    let mut app = test_app();
    keys(&mut app, "3");
    add_via_dialog(&mut app, "Later", "12");
    let s = &app.store.query(Category::Hold, OrderField::Name).unwrap()[0];
    assert_eq!((s.seen, s.status), (0, Some(Status::Hold)));
}

#[test]
fn dialog_captures_global_keys_and_cancels() {
    let mut app = test_app();
    keys(&mut app, "a");
    keys(&mut app, "ql");
    assert!(!app.should_quit);
    assert_eq!(app.current, 0);
    key(&mut app, Key::Esc);
    assert!(app.dialog.is_none());
    assert!(names(&app, Category::Watching).is_empty());
}

#[test]
fn invalid_name_keeps_dialog_open() {
    let mut app = test_app();
    add_via_dialog(&mut app, "   ", "3");
    let dialog = app.dialog.as_ref().unwrap();
    assert!(dialog.error.is_some());
    assert!(names(&app, Category::Watching).is_empty());
}

// ── Help overlay ────────────────────────────────────────────────

#[test]
fn help_opens_and_any_key_closes() {
    let mut app = test_app();
    keys(&mut app, "?");
    assert!(app.show_help);
    keys(&mut app, "q");
    assert!(!app.show_help);
    assert!(!app.should_quit);
}

// ── Rendering ───────────────────────────────────────────────────

#[test]
fn renders_view_with_overlays() {
    let mut app = test_app();
    seed(&mut app, "Kino", 3, 13, None);
    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();

    terminal.draw(|f| app.view(f)).unwrap();
    keys(&mut app, "a");
    terminal.draw(|f| app.view(f)).unwrap();
    key(&mut app, Key::Esc);
    keys(&mut app, "?");
    terminal.draw(|f| app.view(f)).unwrap();

    let buffer = terminal.backend().buffer();
    let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("Keys (any key closes)"));
    assert!(text.contains("Currently Watching"));
}
