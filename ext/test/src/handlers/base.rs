//! Abstract base unit; registered but never mapped.

use atlas::{KeyValue, UnitDescriptor};

pub(crate) fn descriptor() -> UnitDescriptor {
    UnitDescriptor::new("atlas_test::handlers::base", "handlers/base.rs")
        .abstract_unit()
        .capability("RouteHandler")
        .accessor("route", || KeyValue::from("base"))
        .accessor("method", || KeyValue::from("GET"))
        .accessor("api_version", || KeyValue::Int(1))
        .accessor("internal", || KeyValue::Bool(true))
}
