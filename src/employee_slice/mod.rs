//! Employee collection.
//!
//! Employees are users with the `employee` role. They share the `/api/users` endpoints and
//! the [`User`] record, but live in their own slice so the staff screen and the user screen
//! never overwrite each other's lists.

use crate::clients::EmployeeClient;
use crate::model::User;
use std::sync::Arc;
use sync_framework::{CollectionSlice, Resource, SettlementPolicy, SliceActor, Transport};

pub const ROLE: &str = "employee";

pub const RESOURCE: Resource = Resource {
    path: "/api/users",
    list_query: Some("role=employee"),
    singular: "employee",
    plural: "employees",
    list_keys: &["data", "users", "employees"],
    record_keys: &["user", "employee", "data"],
};

pub type EmployeeSlice = CollectionSlice<User>;

/// Creates a new Employee slice actor and its client.
pub fn new(
    buffer_size: usize,
    policy: SettlementPolicy,
    transport: Arc<dyn Transport>,
) -> (SliceActor<EmployeeSlice>, EmployeeClient) {
    let (actor, inner) = SliceActor::new(CollectionSlice::new(RESOURCE.plural, policy), buffer_size);
    (actor, EmployeeClient::new(inner, transport))
}
