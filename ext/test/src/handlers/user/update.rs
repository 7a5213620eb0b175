//! Profile update endpoint; the only non-GET fixture.

use atlas::{KeyValue, UnitDescriptor};

pub(crate) fn descriptor() -> UnitDescriptor {
    UnitDescriptor::new("atlas_test::handlers::user::update", "handlers/user/update.rs")
        .capability("RouteHandler")
        .accessor("route", || KeyValue::from("user/update"))
        .accessor("method", || KeyValue::from("POST"))
        .accessor("api_version", || KeyValue::Int(2))
        .accessor("internal", || KeyValue::Bool(false))
}
