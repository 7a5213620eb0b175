//! Current-user endpoint, no captures.

use atlas::{KeyValue, UnitDescriptor};

pub(crate) fn descriptor() -> UnitDescriptor {
    UnitDescriptor::new("atlas_test::handlers::user::me", "handlers/user/me.rs")
        .capability("RouteHandler")
        .accessor("route", || KeyValue::from("user/me"))
        .accessor("method", || KeyValue::from("GET"))
        .accessor("api_version", || KeyValue::Int(2))
        .accessor("internal", || KeyValue::Bool(false))
}
