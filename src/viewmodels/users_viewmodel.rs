// ============================================================================
// USERS VIEWMODEL - Gestión de usuarios (solo admin)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{NewAdmin, Role, UserAccount};
use crate::services::ApiClient;
use crate::state::{ListFilter, ResourceList};
use crate::viewmodels::feedback::{ActionError, Confirm};

#[derive(Clone)]
pub struct UsersViewModel {
    api: ApiClient,
    list: Rc<RefCell<ResourceList<UserAccount>>>,
}

impl UsersViewModel {
    pub fn new(api: ApiClient, page_size: usize) -> Self {
        Self {
            api,
            list: Rc::new(RefCell::new(ResourceList::new(page_size))),
        }
    }

    pub fn list(&self) -> Rc<RefCell<ResourceList<UserAccount>>> {
        self.list.clone()
    }

    pub async fn refresh(&self) -> Result<(), ActionError> {
        let users = self
            .api
            .list_users()
            .await
            .map_err(|e| ActionError::from_fetch(e, "Failed to fetch users", self.api.session()))?;
        self.list.borrow_mut().replace_snapshot(users);
        Ok(())
    }

    pub fn set_filter(&self, filter: ListFilter<Role>) {
        self.list.borrow_mut().set_filter(filter);
    }

    /// user <-> admin, previa confirmación. Devuelve el rol nuevo.
    pub async fn toggle_role(&self, user: &UserAccount, confirm: &dyn Confirm) -> Result<Role, ActionError> {
        let new_role = user.role.toggled();
        if !confirm.confirm(&format!("Change user role to {}?", new_role.as_str())) {
            return Err(ActionError::Cancelled);
        }
        self.api
            .update_user_role(&user.id, new_role)
            .await
            .map_err(|e| ActionError::from_row_action(e, "Failed to change role", self.api.session()))?;
        self.converge().await?;
        Ok(new_role)
    }

    pub async fn create_admin(&self, admin: &NewAdmin) -> Result<(), ActionError> {
        admin.validate()?;
        self.api
            .create_admin(admin)
            .await
            .map_err(|e| ActionError::from_api(e, "Failed to create admin", self.api.session()))?;
        self.converge().await
    }

    async fn converge(&self) -> Result<(), ActionError> {
        self.list.borrow_mut().reset_page();
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Identity, Session};
    use crate::services::transport::mock::MockTransport;
    use crate::state::SessionStore;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    fn user(id: &str, role: &str) -> Value {
        json!({
            "id": id,
            "name": format!("User {}", id),
            "email": format!("{}@example.org", id),
            "role": role,
            "createdAt": "2024-02-01T00:00:00Z"
        })
    }

    fn setup() -> (Rc<MockTransport>, UsersViewModel) {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let identity = Identity {
            id: "root".into(),
            name: "Root".into(),
            role: Role::Admin,
            email: None,
        };
        store.save(&Session::new(identity, "tok")).unwrap();
        let transport = Rc::new(MockTransport::new());
        let api = ApiClient::with_transport("http://api.test", transport.clone(), store);
        (transport, UsersViewModel::new(api, 10))
    }

    #[test]
    fn toggle_promotes_user_and_refreshes() {
        let (transport, vm) = setup();
        transport.push_json(200, json!([user("u1", "user")]));
        block_on(vm.refresh()).unwrap();
        let account = vm.list().borrow().snapshot()[0].clone();

        transport.push_json(200, user("u1", "admin"));
        transport.push_json(200, json!([user("u1", "admin")]));
        let role = block_on(vm.toggle_role(&account, &|q: &str| q == "Change user role to admin?")).unwrap();

        assert_eq!(role, Role::Admin);
        assert_eq!(vm.list().borrow().snapshot()[0].role, Role::Admin);
        assert_eq!(transport.requests()[1].body, Some(json!({ "role": "admin" })));
    }

    #[test]
    fn declined_toggle_sends_nothing() {
        let (transport, vm) = setup();
        transport.push_json(200, json!([user("u1", "admin")]));
        block_on(vm.refresh()).unwrap();
        let account = vm.list().borrow().snapshot()[0].clone();

        assert_eq!(
            block_on(vm.toggle_role(&account, &|_: &str| false)),
            Err(ActionError::Cancelled)
        );
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn rejected_toggle_shows_banner_and_keeps_list() {
        let (transport, vm) = setup();
        transport.push_json(200, json!([user("root", "admin")]));
        block_on(vm.refresh()).unwrap();
        let account = vm.list().borrow().snapshot()[0].clone();

        transport.push_json(400, json!({ "message": "You cannot demote yourself" }));
        assert_eq!(
            block_on(vm.toggle_role(&account, &|_: &str| true)),
            Err(ActionError::Banner("You cannot demote yourself".into()))
        );
        assert_eq!(vm.list().borrow().snapshot()[0].role, Role::Admin);
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn create_admin_validates_locally() {
        let (transport, vm) = setup();
        let admin = NewAdmin {
            name: "  ".into(),
            email: "x@example.org".into(),
            password: "pw".into(),
        };
        assert!(matches!(block_on(vm.create_admin(&admin)), Err(ActionError::Invalid(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn create_admin_surfaces_server_message() {
        let (transport, vm) = setup();
        transport.push_json(409, json!({ "message": "Email already registered" }));
        let admin = NewAdmin {
            name: "Eve".into(),
            email: "eve@example.org".into(),
            password: "pw".into(),
        };
        assert_eq!(
            block_on(vm.create_admin(&admin)),
            Err(ActionError::Form("Email already registered".into()))
        );
    }

    #[test]
    fn role_filter_narrows_list() {
        let (transport, vm) = setup();
        transport.push_json(200, json!([user("a", "user"), user("b", "admin"), user("c", "user")]));
        block_on(vm.refresh()).unwrap();
        vm.set_filter(ListFilter::Only(Role::User));
        assert_eq!(vm.list().borrow().filtered_count(), 2);
    }
}
