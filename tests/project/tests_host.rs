//! ConfigHost publishing tests.

use std::sync::Arc;

use uimeta::project::SourceSet;
use uimeta::{ConfigHost, LoadOptions};

fn menu_sources(names: &[&str]) -> SourceSet {
    let mut sources = SourceSet::new();
    for name in names {
        sources.add_text(format!("{name}.ci"), format!("Menu(\"{name}\") {{ }}"));
    }
    sources
}

#[test]
fn test_reload_returns_published_result() {
    let host = ConfigHost::new(LoadOptions::default().with_parallel(false));
    let published = host.reload(&menu_sources(&["A"]));
    assert!(Arc::ptr_eq(&published, &host.snapshot()));
    assert_eq!(host.generation(), 1);
}

#[test]
fn test_old_snapshot_is_unchanged_by_reload() {
    let host = ConfigHost::default();
    host.reload(&menu_sources(&["A", "B"]));
    let old = host.snapshot();

    host.reload(&menu_sources(&["C"]));
    assert_eq!(old.graph().len(), 2);
    assert!(old.get("C").is_none());
    assert_eq!(host.snapshot().graph().len(), 1);
}

#[test]
fn test_failed_definitions_still_publish() {
    let host = ConfigHost::default();
    let mut sources = SourceSet::new();
    sources.add_text("bad.ci", r#"Menu("M") { addChild(MenuRef("Missing")); }"#);

    let result = host.reload(&sources);
    assert!(result.has_errors());
    assert!(host.snapshot().get("M").is_some());
}

#[test]
fn test_readers_see_whole_generations() {
    let host = ConfigHost::default();
    host.reload(&menu_sources(&["A0", "B0"]));

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for round in 1..20 {
                let a = format!("A{round}");
                let b = format!("B{round}");
                host.reload(&menu_sources(&[&a, &b]));
            }
        });
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let snapshot = host.snapshot();
                    // Both menus of one generation, never a mix
                    let names: Vec<_> = snapshot.graph().iter().map(|e| e.name.to_string()).collect();
                    assert_eq!(names.len(), 2);
                    assert_eq!(names[0][1..], names[1][1..]);
                }
            });
        }
    });

    assert_eq!(host.generation(), 20);
}
