use eightball_core::{is_activation_key, HostProps, PressTracker, PromptSync};

#[test]
fn prompt_revision_bumps_only_on_change() {
    let mut props = HostProps::new(false, "Will it rain?");
    assert_eq!(props.prompt_revision(), 0);
    assert!(!props.set_prompt_text("Will it rain?"));
    assert_eq!(props.prompt_revision(), 0);
    assert!(props.set_prompt_text("Will it snow?"));
    assert_eq!(props.prompt_text(), "Will it snow?");
    assert_eq!(props.prompt_revision(), 1);
}

#[test]
fn prompt_sync_tracks_drawn_revision() {
    let mut props = HostProps::new(true, "");
    let mut sync = PromptSync::default();
    assert!(sync.needs_redraw(&props));
    sync.mark_drawn(props.prompt_revision());
    assert!(!sync.needs_redraw(&props));
    props.set_prompt_text("again");
    assert!(sync.needs_redraw(&props));
    sync.mark_drawn(props.prompt_revision());
    assert!(!sync.needs_redraw(&props));
}

#[test]
fn flags_are_plain_setters() {
    let mut props = HostProps::new(false, "");
    props.set_revealed(true);
    props.set_disabled(true);
    assert!(props.revealed() && props.disabled());
}

#[test]
fn press_needs_down_and_up_on_same_pointer() {
    let mut press = PressTracker::default();
    press.pointer_down(3, false);
    assert!(press.is_pressing());
    assert!(press.pointer_up(3, false));
    assert!(!press.is_pressing());
    // a stray release does not press
    assert!(!press.pointer_up(3, false));

    press.pointer_down(1, false);
    assert!(!press.pointer_up(2, false));
}

#[test]
fn disabled_surface_never_presses() {
    let mut press = PressTracker::default();
    press.pointer_down(1, true);
    assert!(!press.is_pressing());
    assert!(!press.pointer_up(1, false));

    press.pointer_down(1, false);
    assert!(!press.pointer_up(1, true));
}

#[test]
fn cancel_drops_the_press() {
    let mut press = PressTracker::default();
    press.pointer_down(7, false);
    press.cancel();
    assert!(!press.pointer_up(7, false));
}

#[test]
fn activation_keys() {
    for key in ["Enter", " ", "Spacebar"] {
        assert!(is_activation_key(key));
    }
    for key in ["Escape", "a", "Tab", "enter"] {
        assert!(!is_activation_key(key));
    }
}
