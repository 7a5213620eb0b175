//! Profile lookup by numeric user id.

use atlas::{KeyValue, UnitDescriptor};

pub(crate) fn descriptor() -> UnitDescriptor {
    UnitDescriptor::new("atlas_test::handlers::user::profile", "handlers/user/profile.rs")
        .capability("RouteHandler")
        .accessor("route", || KeyValue::from(r"user/profile/(?P<id>\d+)"))
        .accessor("method", || KeyValue::from("GET"))
        .accessor("api_version", || KeyValue::Int(2))
        .accessor("internal", || KeyValue::Bool(false))
}
