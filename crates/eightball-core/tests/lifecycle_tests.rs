use eightball_core::{Dispose, ResourceArena, ResourceKind};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<&'static str>>>;

struct Spy {
    name: &'static str,
    log: Log,
}

impl Dispose for Spy {
    fn dispose(&mut self) {
        self.log.borrow_mut().push(self.name);
    }
}

fn spy(name: &'static str, log: &Log) -> Spy {
    Spy {
        name,
        log: log.clone(),
    }
}

#[test]
fn dispose_all_releases_newest_first_once() {
    let log = Log::default();
    let mut arena = ResourceArena::new();
    arena.insert(ResourceKind::Geometry, "sphere", spy("sphere", &log));
    arena.insert(ResourceKind::Material, "sphere", spy("material", &log));
    arena.insert(ResourceKind::Texture, "glyph", spy("glyph", &log));
    assert_eq!(arena.live_count(), 3);

    assert_eq!(arena.dispose_all(), 3);
    assert_eq!(*log.borrow(), vec!["glyph", "material", "sphere"]);
    assert_eq!(arena.live_count(), 0);

    assert_eq!(arena.dispose_all(), 0);
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(arena.disposed_count(), 3);
}

#[test]
fn dropping_the_arena_disposes_leftovers() {
    let log = Log::default();
    {
        let mut arena = ResourceArena::new();
        arena.insert(ResourceKind::Uniforms, "frame", spy("frame", &log));
    }
    assert_eq!(*log.borrow(), vec!["frame"]);
}

#[test]
fn drop_after_dispose_all_does_nothing_more() {
    let log = Log::default();
    {
        let mut arena = ResourceArena::new();
        arena.insert(ResourceKind::Texture, "prompt", spy("prompt", &log));
        arena.dispose_all();
    }
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn replace_disposes_previous_resource() {
    let log = Log::default();
    let mut arena = ResourceArena::new();
    let id = arena.insert(ResourceKind::RenderTarget, "depth", spy("depth-1", &log));
    assert!(arena.replace(id, spy("depth-2", &log)));
    assert_eq!(*log.borrow(), vec!["depth-1"]);
    assert_eq!(arena.get(id).map(|s| s.name), Some("depth-2"));
    assert_eq!(arena.live_count(), 1);
    assert_eq!(arena.disposed_count(), 1);
}

#[test]
fn replace_on_released_id_disposes_the_newcomer() {
    let log = Log::default();
    let mut arena = ResourceArena::new();
    let id = arena.insert(ResourceKind::RenderTarget, "depth", spy("old", &log));
    arena.dispose_all();
    assert!(!arena.replace(id, spy("new", &log)));
    assert_eq!(*log.borrow(), vec!["old", "new"]);
    assert_eq!(arena.live_count(), 0);
}

#[test]
fn ids_from_another_mount_are_rejected() {
    let log = Log::default();
    let mut first = ResourceArena::new();
    let mut second = ResourceArena::new();
    assert_ne!(first.epoch(), second.epoch());
    let id = first.insert(ResourceKind::Texture, "glyph", spy("a", &log));
    second.insert(ResourceKind::Texture, "glyph", spy("b", &log));

    assert_eq!(id.epoch(), first.epoch());
    assert!(second.get(id).is_none());
    assert!(!second.replace(id, spy("c", &log)));
    assert_eq!(*log.borrow(), vec!["c"]);
    assert_eq!(second.get(id).map(|s| s.name), None);
    assert_eq!(first.get(id).map(|s| s.name), Some("a"));
}

#[test]
fn census_counts_live_resources_by_kind() {
    let log = Log::default();
    let mut arena = ResourceArena::new();
    arena.insert(ResourceKind::Geometry, "sphere", spy("g1", &log));
    arena.insert(ResourceKind::Geometry, "glyph", spy("g2", &log));
    arena.insert(ResourceKind::Texture, "glyph", spy("t1", &log));
    let census = arena.census();
    assert_eq!(census.get(&ResourceKind::Geometry), Some(&2));
    assert_eq!(census.get(&ResourceKind::Texture), Some(&1));
    assert_eq!(census.get(&ResourceKind::Material), None);
    arena.dispose_all();
    assert!(arena.census().is_empty());
}
