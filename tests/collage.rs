use collage_wasm::collage::{CollageState, Cursor, EntryPhase};
use glam::DVec2;

fn choose(state: &mut CollageState, index: usize, data_url: &str) {
    let ticket = state.begin_read(index).expect("entry exists");
    assert!(state.finish_read(ticket, data_url.to_owned()));
}

#[test]
fn commits_append_one_entry_each() {
    let mut state = CollageState::with_entries(1);
    for n in 0..5 {
        let last = state.len() - 1;
        choose(&mut state, last, &format!("data:image/png;base64,{n}"));
        let added = state.commit_add().expect("pending image commits");
        assert_eq!(added, last + 1);
    }
    assert_eq!(state.commit_count(), 5);
    assert_eq!(state.len(), 6);
    for (i, entry) in state.entries().iter().enumerate() {
        assert_eq!(entry.index(), i);
    }
}

#[test]
fn add_without_pending_is_a_no_op() {
    let mut state = CollageState::with_entries(1);
    assert!(!state.is_pending());
    assert_eq!(state.commit_add(), None);
    assert_eq!(state.len(), 1);
    assert_eq!(state.commit_count(), 0);
}

#[test]
fn choose_then_add_resets_pending_and_places_photo() {
    let mut state = CollageState::with_entries(1);
    assert_eq!(state.entry(0).unwrap().phase(), EntryPhase::Empty);

    choose(&mut state, 0, "data:image/png;base64,AAAA");
    assert!(state.is_pending());
    assert_eq!(state.entry(0).unwrap().phase(), EntryPhase::Previewing);
    assert_eq!(state.entry(0).unwrap().image(), Some("data:image/png;base64,AAAA"));

    assert_eq!(state.commit_add(), Some(1));
    assert!(!state.is_pending());
    assert_eq!(state.entry(0).unwrap().phase(), EntryPhase::Placed);
    assert_eq!(state.entry(1).unwrap().phase(), EntryPhase::Empty);

    // a second add needs a fresh choice
    assert_eq!(state.commit_add(), None);
}

#[test]
fn rechoosing_a_placed_photo_keeps_it_placed() {
    let mut state = CollageState::with_entries(1);
    choose(&mut state, 0, "data:a");
    state.commit_add();
    choose(&mut state, 0, "data:b");
    assert!(state.is_pending());
    assert_eq!(state.entry(0).unwrap().phase(), EntryPhase::Placed);
    assert_eq!(state.entry(0).unwrap().image(), Some("data:b"));
}

#[test]
fn stale_read_is_ignored() {
    let mut state = CollageState::with_entries(1);
    let first = state.begin_read(0).unwrap();
    let second = state.begin_read(0).unwrap();

    assert!(!state.is_current(first));
    assert!(!state.finish_read(first, "data:old".to_owned()));
    assert!(!state.is_pending());
    assert_eq!(state.entry(0).unwrap().image(), None);

    assert!(state.finish_read(second, "data:new".to_owned()));
    assert_eq!(state.entry(0).unwrap().image(), Some("data:new"));
}

#[test]
fn tickets_are_per_entry() {
    let mut state = CollageState::with_entries(2);
    let a = state.begin_read(0).unwrap();
    let _b = state.begin_read(1).unwrap();
    assert!(state.is_current(a));
    assert!(state.begin_read(7).is_none());
}

#[test]
fn clicks_toggle_held_on_alternate_clicks() {
    let mut state = CollageState::with_entries(1);
    choose(&mut state, 0, "data:a");

    let expected = [true, false, true, false];
    for (click, held) in expected.iter().enumerate() {
        let outcome = state.click(0).unwrap();
        assert_eq!(outcome.held, *held, "click {}", click + 1);
    }
}

#[test]
fn cursor_follows_held_state() {
    let mut state = CollageState::with_entries(1);
    choose(&mut state, 0, "data:a");
    assert_eq!(state.cursor(), Cursor::Grab);
    state.click(0);
    assert_eq!(state.cursor(), Cursor::Grabbing);
    assert_eq!(state.cursor().css(), "grabbing");
    state.click(0);
    assert_eq!(state.cursor().css(), "grab");
}

#[test]
fn later_click_is_on_top() {
    let mut state = CollageState::with_entries(3);
    choose(&mut state, 0, "data:a");
    choose(&mut state, 1, "data:b");

    state.click(0);
    state.click(1);
    let a = state.entry(0).unwrap().z_index();
    let b = state.entry(1).unwrap().z_index();
    assert!(b > a, "a={a} b={b}");

    state.click(0);
    assert!(state.entry(0).unwrap().z_index() > b);
}

#[test]
fn empty_entry_toggles_held_like_any_other() {
    let mut state = CollageState::with_entries(2);
    let held: Vec<bool> = (0..3).map(|_| state.click(1).unwrap().held).collect();
    assert_eq!(held, [true, false, true]);
    assert_eq!(state.held(), Some(1));
    assert_eq!(state.entry(1).unwrap().z_index(), 3);
    assert!(state.click(5).is_none());
}

#[test]
fn clicking_another_photo_releases_the_held_one() {
    let mut state = CollageState::with_entries(2);
    choose(&mut state, 0, "data:a");
    choose(&mut state, 1, "data:b");

    state.click(0);
    assert_eq!(state.held(), Some(0));

    let outcome = state.click(1).unwrap();
    assert_eq!(outcome.released, Some(0));
    assert!(!outcome.held);
    assert_eq!(state.held(), None);

    assert!(state.click(1).unwrap().held);
}

#[test]
fn only_the_held_photo_follows_the_pointer() {
    let mut state = CollageState::with_entries(2);
    choose(&mut state, 0, "data:a");
    choose(&mut state, 1, "data:b");
    let to = DVec2::new(-120.0, 40.0);

    assert_eq!(state.drag_to(0, to), None);
    state.click(0);
    assert_eq!(state.drag_to(1, to), None);
    assert_eq!(state.drag_to(0, to), Some(to));
    assert_eq!(state.entry(0).unwrap().position(), to);

    state.click(0);
    assert_eq!(state.drag_to(0, DVec2::ZERO), None);
    assert_eq!(state.entry(0).unwrap().position(), to);
}

#[test]
fn captions_are_stored_per_entry() {
    let mut state = CollageState::with_entries(2);
    assert!(state.set_caption(1, "summer"));
    assert!(!state.set_caption(2, "nope"));
    assert_eq!(state.entry(0).unwrap().caption(), "");
    assert_eq!(state.entry(1).unwrap().caption(), "summer");
}
