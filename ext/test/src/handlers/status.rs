//! Liveness endpoint claiming two route keys at once.

use atlas::{KeyValue, UnitDescriptor};

pub(crate) fn descriptor() -> UnitDescriptor {
    UnitDescriptor::new("atlas_test::handlers::status", "handlers/status.rs")
        .capability("RouteHandler")
        .accessor("route", || KeyValue::from(vec!["health", "ping"]))
        .accessor("method", || KeyValue::from("GET"))
        .accessor("api_version", || KeyValue::Int(1))
        .accessor("internal", || KeyValue::Bool(true))
}
