//! Middleware unit; carries a route but not the handler capability.

use atlas::{KeyValue, UnitDescriptor};

pub(crate) fn descriptor() -> UnitDescriptor {
    UnitDescriptor::new("atlas_test::handlers::audit", "handlers/audit.rs")
        .capability("Middleware")
        .accessor("route", || KeyValue::from("audit/log"))
        .accessor("method", || KeyValue::from("POST"))
        .accessor("api_version", || KeyValue::Int(1))
        .accessor("internal", || KeyValue::Bool(true))
}
