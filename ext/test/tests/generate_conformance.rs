//! End-to-end generation over the fixture source tree.

use atlas::prelude::*;
use atlas_test::{register, source_root, NAMESPACE};

fn registry() -> UnitRegistry {
    register(UnitRegistryBuilder::new()).build()
}

fn generator(registry: &UnitRegistry) -> MapGenerator<'_> {
    MapGenerator::new(registry)
        .path(source_root())
        .namespace(NAMESPACE)
        .route_method("route")
}

#[test]
fn test_full_tree_with_handler_capability() {
    let registry = registry();
    let table = generator(&registry)
        .interface("RouteHandler")
        .generate()
        .unwrap();

    // Deterministic scan order: audit (no capability), base (abstract),
    // and the unregistered lib.rs / mod.rs files are all skipped.
    assert_eq!(
        table.flatten(),
        vec![
            (vec!["health".to_owned()], "atlas_test::handlers::status".to_owned()),
            (vec!["ping".to_owned()], "atlas_test::handlers::status".to_owned()),
            (vec!["user/me".to_owned()], "atlas_test::handlers::user::me".to_owned()),
            (
                vec![r"user/profile/(?P<id>\d+)".to_owned()],
                "atlas_test::handlers::user::profile".to_owned(),
            ),
            (vec!["user/update".to_owned()], "atlas_test::handlers::user::update".to_owned()),
        ]
    );
    assert!(table.get(GENERATED_KEY).is_some());
}

#[test]
fn test_without_interface_middleware_is_included() {
    let registry = registry();
    let table = generator(&registry).generate().unwrap();

    let handlers: Vec<String> = table.flatten().into_iter().map(|(_, h)| h).collect();
    assert!(handlers.contains(&"atlas_test::handlers::audit".to_owned()));
    // abstract stays out regardless
    assert!(!handlers.contains(&"atlas_test::handlers::base".to_owned()));
}

#[test]
fn test_method_filter_excludes_post_handlers() {
    let registry = registry();
    let table = generator(&registry)
        .interface("RouteHandler")
        .filter("method", "GET")
        .generate()
        .unwrap();

    let keys: Vec<String> = table.flatten().into_iter().map(|(mut p, _)| p.remove(0)).collect();
    assert!(keys.contains(&"user/me".to_owned()));
    assert!(!keys.contains(&"user/update".to_owned()));
}

#[test]
fn test_filters_compare_loosely() {
    let registry = registry();
    // "2" (string) against the integer api_version accessor
    let table = generator(&registry)
        .interface("RouteHandler")
        .filter("api_version", "2")
        .generate()
        .unwrap();

    let handlers: Vec<String> = table.flatten().into_iter().map(|(_, h)| h).collect();
    assert_eq!(
        handlers,
        vec![
            "atlas_test::handlers::user::me".to_owned(),
            "atlas_test::handlers::user::profile".to_owned(),
            "atlas_test::handlers::user::update".to_owned(),
        ]
    );
}

#[test]
fn test_internal_filter_compares_booleans() {
    let registry = registry();
    let table = generator(&registry)
        .interface("RouteHandler")
        .filter("internal", false)
        .generate()
        .unwrap();

    let handlers: Vec<String> = table.flatten().into_iter().map(|(_, h)| h).collect();
    assert!(!handlers.contains(&"atlas_test::handlers::status".to_owned()));
    assert!(handlers.contains(&"atlas_test::handlers::user::me".to_owned()));
}

#[test]
fn test_category_introduces_version_levels() {
    let registry = registry();
    let table = generator(&registry)
        .interface("RouteHandler")
        .category("api_version")
        .generate()
        .unwrap();

    assert_eq!(
        table.flatten(),
        vec![
            (
                vec!["1".to_owned(), "health".to_owned()],
                "atlas_test::handlers::status".to_owned()
            ),
            (
                vec!["1".to_owned(), "ping".to_owned()],
                "atlas_test::handlers::status".to_owned()
            ),
            (
                vec!["2".to_owned(), "user/me".to_owned()],
                "atlas_test::handlers::user::me".to_owned()
            ),
            (
                vec!["2".to_owned(), r"user/profile/(?P<id>\d+)".to_owned()],
                "atlas_test::handlers::user::profile".to_owned()
            ),
            (
                vec!["2".to_owned(), "user/update".to_owned()],
                "atlas_test::handlers::user::update".to_owned()
            ),
        ]
    );
}

#[test]
fn test_stacked_categories_nest_in_configured_order() {
    let registry = registry();
    let table = generator(&registry)
        .interface("RouteHandler")
        .category("method")
        .category("api_version")
        .generate()
        .unwrap();

    let update = table
        .flatten()
        .into_iter()
        .find(|(_, h)| h == "atlas_test::handlers::user::update")
        .unwrap();
    assert_eq!(
        update.0,
        vec!["POST".to_owned(), "2".to_owned(), "user/update".to_owned()]
    );
}

#[test]
fn test_repeated_builds_are_identical_modulo_timestamp() {
    let registry = registry();
    let first = generator(&registry).interface("RouteHandler").generate().unwrap();
    let second = generator(&registry).interface("RouteHandler").generate().unwrap();
    // flatten skips the @generated marker, the only varying entry
    assert_eq!(first.flatten(), second.flatten());
}

#[test]
fn test_empty_directory_yields_only_the_timestamp() {
    let registry = registry();
    let dir = tempfile::tempdir().unwrap();

    let table = MapGenerator::new(&registry)
        .path(dir.path())
        .route_method("route")
        .generate()
        .unwrap();

    assert_eq!(table.len(), 1);
    assert!(table.get(GENERATED_KEY).is_some());
    assert!(table.flatten().is_empty());
}

#[test]
fn test_collision_aborts_before_any_output_is_written() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.rs"), "").unwrap();
    std::fs::write(dir.path().join("b.rs"), "").unwrap();

    let registry = UnitRegistryBuilder::new()
        .register(
            UnitDescriptor::new("a", "a.rs").accessor("route", || KeyValue::from("clash")),
        )
        .register(
            UnitDescriptor::new("b", "b.rs").accessor("route", || KeyValue::from("clash")),
        )
        .build();

    let out = dir.path().join("map.json");
    let err = MapGenerator::new(&registry)
        .path(dir.path())
        .route_method("route")
        .output_file(&out)
        .unwrap()
        .generate()
        .unwrap_err();

    assert!(matches!(err, MapError::Collision { .. }));
    assert!(!out.exists());
}

#[test]
fn test_output_file_round_trips_through_json() {
    let registry = registry();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.json");

    let table = generator(&registry)
        .interface("RouteHandler")
        .output_file(&out)
        .unwrap()
        .generate()
        .unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let decoded: RouteTable = serde_json::from_str(&written).unwrap();
    assert_eq!(decoded, table);
}

#[test]
fn test_output_file_round_trips_through_ron() {
    let registry = registry();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.ron");

    generator(&registry)
        .interface("RouteHandler")
        .format(Format::Ron)
        .unwrap()
        .output_file(&out)
        .unwrap()
        .generate()
        .unwrap();

    let mut mapper = RouteMapper::from_file(&out).unwrap();
    let hit = mapper.search("user/me").unwrap();
    assert_eq!(hit.handler, "atlas_test::handlers::user::me");
}
