use super::*;
use crate::cache::SiteSnapshot;
use crate::link::{Destination, LinkOptions};
use crate::vfs::PhysicalFileSystem;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_note(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config_for(root: &Path) -> SiteConfig {
    let mut config = SiteConfig::default();
    config.site.notes_dir = root.to_path_buf();
    config
}

fn build(config: SiteConfig) -> Site {
    init_logging();
    SiteBuilder::new(config, Arc::new(PhysicalFileSystem))
        .build()
        .expect("build should succeed")
}

fn create_garden() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_note(
        root,
        "Home.md",
        "# Home\n\nStart at [[Rust Notes]] or [the book](<Rust Notes> \"Read me\").\n\n[top](#home)",
    );
    write_note(
        root,
        "topics/Rust Notes.md",
        "---\ntitle: Rust\n---\nBack to [home](Home). See [[Missing Page]] and <https://rust-lang.org>.",
    );
    write_note(root, "topics/Orphan.md", "# Orphan\n\n![diagram](img/d.png)");
    write_note(root, "topics/img/readme.txt", "not a note");
    temp_dir
}

#[test]
fn test_build_indexes_every_note() {
    let temp_dir = create_garden();
    let site = build(config_for(temp_dir.path()));

    let names: Vec<&str> = site.notes().map(|n| n.file_name.as_str()).collect();
    assert_eq!(names, ["Home", "Orphan", "Rust Notes"]);
    assert_eq!(site.index().len(), 3);

    let rust = site.note_by_slug("rust-notes").unwrap();
    assert_eq!(rust.title.as_deref(), Some("Rust"));
    assert_eq!(rust.path, PathBuf::from("topics/Rust Notes.md"));

    assert_eq!(site.stats().total_files, 3);
    assert_eq!(site.stats().notes, 3);
}

#[test]
fn test_build_records_forward_and_backlinks() {
    let temp_dir = create_garden();
    let site = build(config_for(temp_dir.path()));

    // Two links from Home to Rust Notes, kept as two edges
    assert_eq!(site.outgoing("Home"), ["Rust Notes", "Rust Notes"]);
    assert_eq!(site.backlinks("Rust Notes"), ["Home", "Home"]);
    assert_eq!(site.unique_backlinks("Rust Notes"), ["Home"]);

    assert_eq!(site.outgoing("Rust Notes"), ["Home"]);
    assert_eq!(site.backlinks("Home"), ["Rust Notes"]);

    assert!(site.backlinks("Orphan").is_empty());
    assert_eq!(site.graph().edge_count(), 3);
}

#[test]
fn test_build_resolves_links_per_note() {
    let temp_dir = create_garden();
    let site = build(config_for(temp_dir.path()));

    let links = site.links_of("Home");
    assert_eq!(links.len(), 3);
    assert_eq!(
        links[0].destination.as_router().map(|r| r.slug()),
        Some("rust-notes")
    );
    assert_eq!(links[1].title.as_deref(), Some("Read me"));
    assert_eq!(links[1].label, "the book");
    assert_eq!(
        links[2].destination,
        Destination::RawLink("#home".to_string())
    );

    let links = site.links_of("Rust Notes");
    assert_eq!(
        links[1].destination,
        Destination::RawLink("Missing Page".to_string())
    );
    assert_eq!(
        links[2].destination,
        Destination::RawLink("https://rust-lang.org".to_string())
    );

    assert_eq!(site.stats().routed_links, 3);
    assert_eq!(site.stats().raw_links, 4);
    assert!(site.links_of("Nobody").is_empty());
}

#[test]
fn test_build_reports_unresolved_links() {
    let temp_dir = create_garden();
    let site = build(config_for(temp_dir.path()));

    let unresolved: Vec<(&str, &str)> = site
        .unresolved()
        .iter()
        .map(|u| (u.source.as_str(), u.destination.as_str()))
        .collect();
    assert_eq!(unresolved, [("Rust Notes", "Missing Page")]);
    assert_eq!(site.stats().unresolved_links, 1);
}

#[test]
fn test_build_joins_base_uri() {
    let temp_dir = create_garden();
    let mut config = config_for(temp_dir.path());
    config.site.base_uri = Some("https://garden.example/notes/".to_string());
    let site = build(config);

    let links = site.links_of("Orphan");
    assert_eq!(
        links[0].destination,
        Destination::RawLink("https://garden.example/notes/img/d.png".to_string())
    );

    // Note links still route, anchors still pass through
    let home = site.links_of("Home");
    assert!(home[0].destination.as_router().is_some());
    assert_eq!(home[2].destination.as_raw_link(), Some("#home"));
}

#[test]
fn test_build_sanitizes_script_links() {
    let temp_dir = TempDir::new().unwrap();
    write_note(temp_dir.path(), "Evil.md", "[click](javascript:alert(1))");

    let site = build(config_for(temp_dir.path()));
    assert_eq!(site.links_of("Evil")[0].destination.as_raw_link(), Some("#"));

    let mut config = config_for(temp_dir.path());
    config.links.sanitize_links = false;
    let site = build(config);
    assert_eq!(
        site.links_of("Evil")[0].destination.as_raw_link(),
        Some("javascript:alert(1)")
    );
}

#[test]
fn test_build_sanitizes_links_hidden_by_control_characters() {
    let temp_dir = TempDir::new().unwrap();
    write_note(
        temp_dir.path(),
        "Evil.md",
        "[a](java&#9;script:alert%281%29) [b](&#1;javascript:alert%281%29) \
         [c](java&#10;script:x) [d](<java\tscript:x>)",
    );

    let site = build(config_for(temp_dir.path()));
    let dests: Vec<Option<&str>> = site
        .links_of("Evil")
        .iter()
        .map(|l| l.destination.as_raw_link())
        .collect();
    assert_eq!(dests, [Some("#"), Some("#"), Some("#"), Some("#")]);
}

#[test]
fn test_build_email_autolink_becomes_mailto() {
    let temp_dir = TempDir::new().unwrap();
    write_note(temp_dir.path(), "Contact.md", "Mail <me@x.com>");
    let mut config = config_for(temp_dir.path());
    config.site.base_uri = Some("https://garden.example/notes/".to_string());

    let site = build(config);
    assert_eq!(
        site.links_of("Contact")[0].destination,
        Destination::RawLink("mailto:me@x.com".to_string())
    );
    assert!(site.unresolved().is_empty());
}

#[test]
fn test_build_tree_routes_notes() {
    let temp_dir = create_garden();
    let site = build(config_for(temp_dir.path()));

    let flat: Vec<(&str, Option<&str>)> = site
        .flat_tree()
        .iter()
        .map(|n| (n.name.as_str(), n.route_path.as_deref()))
        .collect();
    assert_eq!(
        flat,
        [
            ("Home.md", Some("/note/home")),
            ("topics", None),
            ("Orphan.md", Some("/note/orphan")),
            ("Rust Notes.md", Some("/note/rust-notes")),
            ("img", None),
            ("readme.txt", None),
        ]
    );
    assert_eq!(site.tree().route_path, None);
    assert_eq!(site.route_path("orphan").as_deref(), Some("/note/orphan"));
    assert_eq!(site.route_path("nope"), None);
}

#[test]
fn test_build_skips_ignored_directories() {
    let temp_dir = create_garden();
    write_note(temp_dir.path(), "node_modules/pkg/README.md", "# Pkg");

    let site = build(config_for(temp_dir.path()));
    assert!(site.note("README").is_none());
    assert!(site
        .flat_tree()
        .iter()
        .all(|n| n.name != "node_modules"));
}

#[test]
fn test_duplicate_note_names_fail_the_build() {
    let temp_dir = TempDir::new().unwrap();
    write_note(temp_dir.path(), "a/Note.md", "one");
    write_note(temp_dir.path(), "b/Note.md", "two");

    let result = SiteBuilder::new(config_for(temp_dir.path()), Arc::new(PhysicalFileSystem)).build();
    assert!(matches!(result, Err(SiteError::DuplicateKey(key)) if key == "Note"));
}

#[test]
fn test_missing_notes_dir_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    let result = SiteBuilder::new(config_for(&missing), Arc::new(PhysicalFileSystem)).build();
    match result {
        Err(SiteError::Io { path, .. }) => assert_eq!(path, missing),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("build should fail"),
    }
}

#[test]
fn test_invalid_base_uri_fails_the_build() {
    let temp_dir = create_garden();
    let mut config = config_for(temp_dir.path());
    config.site.base_uri = Some("relative/base".to_string());

    let result = SiteBuilder::new(config, Arc::new(PhysicalFileSystem)).build();
    assert!(matches!(result, Err(SiteError::InvalidBaseUri { .. })));
}

#[test]
fn test_config_loaded_from_file_drives_build() {
    let temp_dir = create_garden();
    let config_path = temp_dir.path().join("site.yaml");
    fs::write(
        &config_path,
        format!(
            "site:\n  name: Garden\n  notes_dir: {}\n  route_prefix: /garden\nlogging:\n  show_build_stats: false\n",
            temp_dir.path().display()
        ),
    )
    .unwrap();

    let config = SiteConfig::load(&config_path, &PhysicalFileSystem).unwrap();
    let site = build(config);
    assert_eq!(site.route_path("home").as_deref(), Some("/garden/home"));
    assert_eq!(site.config().site.name, "Garden");
}

#[test]
fn test_context_phases_with_precomputed_index() {
    let mut index = SlugIndex::new();
    index
        .insert_slug("note", "note-slug", Path::new("note.md"))
        .unwrap();
    let options = LinkOptions {
        base_uri: Some(Url::parse("https://x.com/a/").unwrap()),
        ..LinkOptions::default()
    };
    let mut context = SiteContext::with_index(index, options);

    {
        let mut resolver = context.resolver("home");
        assert_eq!(
            resolver.resolve("note").as_router().map(|r| r.slug()),
            Some("note-slug")
        );
        assert_eq!(resolver.resolve("b").as_raw_link(), Some("https://x.com/a/b"));
        assert_eq!(resolver.resolve("#x").as_raw_link(), Some("#x"));
    }
    {
        let mut resolver = context.resolver("other");
        resolver.resolve("note");
    }
    assert_eq!(context.graph().links_to("note"), ["home", "other"]);

    let (index, graph) = context.finalize();
    assert_eq!(index.len(), 1);
    assert_eq!(graph.outgoing("home"), ["note"]);
    assert_eq!(graph.backlinks("note"), ["home", "other"]);
}

#[test]
fn test_snapshot_round_trip_and_change_detection() {
    let temp_dir = create_garden();
    let site = build(config_for(temp_dir.path()));

    let snapshot_path = temp_dir.path().join(".cache/site.bin");
    site.save_snapshot(&snapshot_path, &PhysicalFileSystem)
        .expect("save snapshot");

    let snapshot = SiteSnapshot::load(&snapshot_path, &PhysicalFileSystem).expect("load snapshot");
    assert_eq!(snapshot.version, SiteSnapshot::CURRENT_VERSION);
    assert_eq!(&snapshot.graph, site.graph());
    assert_eq!(snapshot.index.lookup("Home"), Some(&"home".to_string()));
    assert!(site.changed_since(&snapshot).is_empty());

    write_note(temp_dir.path(), "topics/Orphan.md", "# Orphan\n\nEdited.");
    let rebuilt = build(config_for(temp_dir.path()));
    assert_eq!(rebuilt.changed_since(&snapshot), ["Orphan"]);
}

#[test]
fn test_snapshot_version_mismatch_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("old.bin");
    let mut snapshot = SiteSnapshot::new(SlugIndex::new(), Default::default(), Default::default());
    snapshot.version = 0;
    snapshot.save(&path, &PhysicalFileSystem).unwrap();

    let err = SiteSnapshot::load(&path, &PhysicalFileSystem).err().unwrap();
    assert!(matches!(
        err,
        SiteError::SnapshotVersion {
            found: 0,
            expected: 1
        }
    ));
}
