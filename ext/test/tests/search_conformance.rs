//! End-to-end lookup over tables generated from the fixture tree.

use atlas::prelude::*;
use atlas_test::{register, source_root, NAMESPACE};

fn registry() -> UnitRegistry {
    register(UnitRegistryBuilder::new()).build()
}

fn handler_table(registry: &UnitRegistry) -> RouteTable {
    MapGenerator::new(registry)
        .path(source_root())
        .namespace(NAMESPACE)
        .route_method("route")
        .interface("RouteHandler")
        .generate()
        .unwrap()
}

#[test]
fn test_resolves_fixture_routes() {
    let registry = registry();
    let mut mapper = RouteMapper::from_table(handler_table(&registry));

    assert_eq!(mapper.search("user/me").unwrap().handler, "atlas_test::handlers::user::me");
    assert_eq!(mapper.search("health").unwrap().handler, "atlas_test::handlers::status");
    assert_eq!(mapper.search("ping").unwrap().handler, "atlas_test::handlers::status");
}

#[test]
fn test_captures_named_parameters() {
    let registry = registry();
    let mut mapper = RouteMapper::from_table(handler_table(&registry));

    let hit = mapper.search("user/profile/1337").unwrap();
    assert_eq!(hit.handler, "atlas_test::handlers::user::profile");
    assert_eq!(hit.params["id"], "1337");

    // pattern requires digits
    assert!(mapper.search("user/profile/alice").is_none());
}

#[test]
fn test_excluded_units_are_unreachable() {
    let registry = registry();
    let mut mapper = RouteMapper::from_table(handler_table(&registry));

    assert!(mapper.search("audit/log").is_none());
    assert!(mapper.search("base").is_none());
    assert!(mapper.search("no/such/route").is_none());
}

#[test]
fn test_version_category_requires_a_filter() {
    let registry = registry();
    let table = MapGenerator::new(&registry)
        .path(source_root())
        .namespace(NAMESPACE)
        .route_method("route")
        .interface("RouteHandler")
        .category("api_version")
        .generate()
        .unwrap();

    let mut mapper = RouteMapper::from_table(table);
    // the version level is a literal key, not a pattern prefix of the input
    assert!(mapper.search("user/me").is_none());

    mapper.filter("2");
    assert_eq!(mapper.search("user/me").unwrap().handler, "atlas_test::handlers::user::me");

    // that filter was consumed; version 1 routes need their own
    mapper.filter("1");
    assert_eq!(mapper.search("ping").unwrap().handler, "atlas_test::handlers::status");
}

#[test]
fn test_search_through_persisted_json_map() {
    let registry = registry();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("map.json");

    MapGenerator::new(&registry)
        .path(source_root())
        .namespace(NAMESPACE)
        .route_method("route")
        .interface("RouteHandler")
        .output_file(&out)
        .unwrap()
        .generate()
        .unwrap();

    let mut mapper = RouteMapper::from_file(&out).unwrap();
    let hit = mapper.search("user/profile/7").unwrap();
    assert_eq!(hit.handler, "atlas_test::handlers::user::profile");
    assert_eq!(hit.params["id"], "7");
}
