//! # Employee Client
use crate::clients::collection_client::CollectionClient;
use crate::employee_slice::{EmployeeSlice, RESOURCE, ROLE};
use crate::model::{User, UserCreate, UserUpdate};
use crate::user_slice::SIGNUP_PATH;
use std::sync::Arc;
use sync_framework::{AsyncOutcome, NoAction, Resource, SliceClient, Transport};
use tracing::{debug, instrument};

/// Client for the employees collection.
#[derive(Clone)]
pub struct EmployeeClient {
    inner: SliceClient<EmployeeSlice>,
    transport: Arc<dyn Transport>,
}

impl EmployeeClient {
    pub fn new(inner: SliceClient<EmployeeSlice>, transport: Arc<dyn Transport>) -> Self {
        Self { inner, transport }
    }

    /// Sign up a staff account. The role is forced to `employee`.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn create(&self, mut params: UserCreate) -> AsyncOutcome<User> {
        debug!("Sending request");
        params.role = Some(ROLE.to_string());
        self.submit_create(SIGNUP_PATH, &params).await
    }
}

impl CollectionClient for EmployeeClient {
    type Record = User;
    type Update = UserUpdate;
    type Action = NoAction;

    fn inner(&self) -> &SliceClient<EmployeeSlice> {
        &self.inner
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    fn resource(&self) -> &Resource {
        &RESOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sync_framework::mock::MockTransport;
    use sync_framework::{Method, SettlementPolicy};

    #[tokio::test]
    async fn test_employee_fetch_and_signup_use_role() {
        let mock = MockTransport::new();
        let (actor, employees) =
            crate::employee_slice::new(8, SettlementPolicy::default(), Arc::new(mock.clone()));
        tokio::spawn(actor.run());

        mock.expect(Method::GET, "/api/users?role=employee")
            .return_ok(json!({ "users": [{ "_id": "E1", "role": "employee" }] }));
        mock.expect(Method::POST, "/api/users/signup")
            .return_ok(json!({ "user": { "_id": "E2", "name": "Kim", "role": "employee" } }));

        employees.fetch_all().await;
        let created = employees
            .create(UserCreate {
                name: "Kim".into(),
                email: "kim@example.com".into(),
                password: "secret".into(),
                role: None,
            })
            .await;
        assert!(created.is_succeeded());

        let calls = mock.calls();
        let signup = &calls[1];
        assert_eq!(signup.body.as_ref().unwrap()["role"], "employee");

        let ids: Vec<_> = employees
            .state()
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["E1", "E2"]);
        mock.verify();
    }
}
