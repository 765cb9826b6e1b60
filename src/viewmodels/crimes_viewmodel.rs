// ============================================================================
// CRIMES VIEWMODEL - Lista de reportes + mutaciones con refresh forzado
// ============================================================================
// Tras cualquier mutación correcta: vuelta a la página 1 y re-fetch completo.
// Si la mutación falla, el snapshot en caché no se toca.
// No hay lock: dos clicks seguidos lanzan dos peticiones y el último refresh
// en resolverse gana.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{CrimeDraft, CrimeReport, CrimeStatus, CrimeUpdate};
use crate::services::ApiClient;
use crate::state::{ListFilter, ResourceList};
use crate::viewmodels::feedback::{ActionError, Confirm};

#[derive(Clone)]
pub struct CrimesViewModel {
    api: ApiClient,
    list: Rc<RefCell<ResourceList<CrimeReport>>>,
}

impl CrimesViewModel {
    pub fn new(api: ApiClient, page_size: usize) -> Self {
        Self {
            api,
            list: Rc::new(RefCell::new(ResourceList::new(page_size))),
        }
    }

    pub fn list(&self) -> Rc<RefCell<ResourceList<CrimeReport>>> {
        self.list.clone()
    }

    /// Re-fetch incondicional; conserva el orden del servidor
    pub async fn refresh(&self) -> Result<(), ActionError> {
        let crimes = self
            .api
            .list_crimes()
            .await
            .map_err(|e| ActionError::from_fetch(e, "Failed to fetch crimes", self.api.session()))?;
        self.list.borrow_mut().replace_snapshot(crimes);
        Ok(())
    }

    pub fn set_filter(&self, filter: ListFilter<CrimeStatus>) {
        self.list.borrow_mut().set_filter(filter);
    }

    pub fn next_page(&self) -> bool {
        self.list.borrow_mut().next_page()
    }

    pub fn prev_page(&self) -> bool {
        self.list.borrow_mut().prev_page()
    }

    /// Los `limit` primeros reportes del snapshot (dashboard de usuario)
    pub fn recent(&self, limit: usize) -> Vec<CrimeReport> {
        self.list.borrow().snapshot().iter().take(limit).cloned().collect()
    }

    pub async fn create(&self, draft: &CrimeDraft) -> Result<(), ActionError> {
        draft.validate()?;
        self.api
            .create_crime(draft)
            .await
            .map_err(|e| ActionError::from_api(e, "Failed to report crime", self.api.session()))?;
        self.converge().await
    }

    pub async fn update(&self, crime_id: &str, update: &CrimeUpdate) -> Result<(), ActionError> {
        update.validate()?;
        self.api
            .update_crime(crime_id, update)
            .await
            .map_err(|e| ActionError::from_api(e, "Failed to update crime report", self.api.session()))?;
        self.converge().await
    }

    /// Avanza al siguiente estado del ciclo (Resolved vuelve a Pending)
    pub async fn cycle_status(&self, report: &CrimeReport) -> Result<CrimeStatus, ActionError> {
        let next = report.status.next();
        self.api
            .update_crime_status(&report.id, next)
            .await
            .map_err(|e| ActionError::from_row_action(e, "Failed to update status", self.api.session()))?;
        self.converge().await?;
        Ok(next)
    }

    pub async fn delete(&self, report: &CrimeReport, confirm: &dyn Confirm) -> Result<(), ActionError> {
        let question = format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            report.title
        );
        if !confirm.confirm(&question) {
            return Err(ActionError::Cancelled);
        }
        self.api
            .delete_crime(&report.id)
            .await
            .map_err(|e| ActionError::from_row_action(e, "Failed to delete crime report", self.api.session()))?;
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
    use crate::models::{Identity, Role, Session};
    use crate::services::transport::mock::MockTransport;
    use crate::services::transport::HttpMethod;
    use crate::state::SessionStore;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    fn crime(id: &str, title: &str, status: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": "desc",
            "location": "loc",
            "status": status,
            "createdAt": "2024-05-01T08:00:00Z"
        })
    }

    fn crimes(n: usize) -> Value {
        Value::Array((1..=n).map(|i| crime(&format!("c-{}", i), &format!("Case {}", i), "Pending")).collect())
    }

    fn setup() -> (Rc<MockTransport>, SessionStore, CrimesViewModel) {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let identity = Identity {
            id: "u-1".into(),
            name: "Ada".into(),
            role: Role::Admin,
            email: None,
        };
        store.save(&Session::new(identity, "tok")).unwrap();
        let transport = Rc::new(MockTransport::new());
        let api = ApiClient::with_transport("http://api.test", transport.clone(), store.clone());
        (transport, store, CrimesViewModel::new(api, 5))
    }

    fn titles(vm: &CrimesViewModel) -> Vec<String> {
        vm.list().borrow().page_items().iter().map(|c| c.title.clone()).collect()
    }

    #[test]
    fn refresh_twice_yields_same_snapshot() {
        let (transport, _, vm) = setup();
        transport.push_json(200, crimes(7));
        transport.push_json(200, crimes(7));

        block_on(vm.refresh()).unwrap();
        let first = vm.list().borrow().snapshot().to_vec();
        block_on(vm.refresh()).unwrap();
        let second = vm.list().borrow().snapshot().to_vec();

        assert_eq!(first, second);
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn filter_uses_cached_snapshot_without_fetching() {
        let (transport, _, vm) = setup();
        transport.push_json(
            200,
            json!([crime("a", "A", "Pending"), crime("b", "B", "Resolved"), crime("c", "C", "Resolved")]),
        );
        block_on(vm.refresh()).unwrap();

        vm.set_filter(ListFilter::Only(CrimeStatus::Resolved));
        assert_eq!(titles(&vm), vec!["B", "C"]);
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn blank_field_is_rejected_before_any_request() {
        let (transport, _, vm) = setup();
        let drafts = [
            CrimeDraft::new("", "Wallet stolen", "Main St"),
            CrimeDraft::new("Theft", "   ", "Main St"),
            CrimeDraft::new("Theft", "Wallet stolen", "\t"),
        ];
        for draft in drafts {
            assert!(matches!(block_on(vm.create(&draft)), Err(ActionError::Invalid(_))));
        }
        let update = CrimeUpdate::default();
        assert!(matches!(block_on(vm.update("c-1", &update)), Err(ActionError::Invalid(_))));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn created_report_appears_on_first_page_after_refresh() {
        let (transport, _, vm) = setup();
        transport.push_json(200, crimes(12));
        block_on(vm.refresh()).unwrap();
        vm.next_page();
        assert_eq!(vm.list().borrow().current_page(), 2);

        let mut after = vec![crime("new", "Theft", "Pending")];
        if let Value::Array(rest) = crimes(12) {
            after.extend(rest);
        }
        transport.push_json(201, crime("new", "Theft", "Pending"));
        transport.push_json(200, Value::Array(after));

        block_on(vm.create(&CrimeDraft::new("Theft", "Wallet stolen", "Main St"))).unwrap();

        let list = vm.list();
        assert_eq!(list.borrow().current_page(), 1);
        assert_eq!(titles(&vm).first().map(String::as_str), Some("Theft"));

        let requests = transport.requests();
        assert_eq!(requests[1].method, HttpMethod::Post);
        assert_eq!(
            requests[1].body,
            Some(json!({ "title": "Theft", "description": "Wallet stolen", "location": "Main St" }))
        );
        assert_eq!(requests[2].method, HttpMethod::Get);
    }

    #[test]
    fn failed_mutation_keeps_cached_list() {
        let (transport, _, vm) = setup();
        transport.push_json(200, crimes(3));
        block_on(vm.refresh()).unwrap();
        let before = vm.list().borrow().snapshot().to_vec();

        transport.push_json(400, json!({ "message": "Duplicate report" }));
        let err = block_on(vm.create(&CrimeDraft::new("a", "b", "c"))).unwrap_err();

        assert_eq!(err, ActionError::Form("Duplicate report".into()));
        assert_eq!(vm.list().borrow().snapshot(), before.as_slice());
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn cycle_status_sends_next_value() {
        let (transport, _, vm) = setup();
        transport.push_json(200, json!([crime("c-1", "A", "Resolved")]));
        block_on(vm.refresh()).unwrap();
        let report = vm.list().borrow().snapshot()[0].clone();

        transport.push_status(200);
        transport.push_json(200, json!([crime("c-1", "A", "Pending")]));
        let next = block_on(vm.cycle_status(&report)).unwrap();

        assert_eq!(next, CrimeStatus::Pending);
        let request = &transport.requests()[1];
        assert_eq!(request.url, "http://api.test/api/crimes/c-1/status");
        assert_eq!(request.body, Some(json!({ "status": "Pending" })));
    }

    #[test]
    fn rejected_row_actions_surface_in_banner() {
        let (transport, _, vm) = setup();
        transport.push_json(200, json!([crime("c-1", "A", "Pending")]));
        block_on(vm.refresh()).unwrap();
        let report = vm.list().borrow().snapshot()[0].clone();

        transport.push_json(403, json!({ "message": "Only the reporter may change this" }));
        let err = block_on(vm.cycle_status(&report)).unwrap_err();
        assert_eq!(err, ActionError::Banner("Only the reporter may change this".into()));

        transport.push_status(409);
        let err = block_on(vm.delete(&report, &|_: &str| true)).unwrap_err();
        assert_eq!(err, ActionError::Banner("Failed to delete crime report".into()));

        assert_eq!(vm.list().borrow().snapshot().len(), 1);
        assert_eq!(transport.request_count(), 3);
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let (transport, _, vm) = setup();
        transport.push_json(200, json!([crime("c-1", "Burglary", "Pending")]));
        block_on(vm.refresh()).unwrap();
        let report = vm.list().borrow().snapshot()[0].clone();

        let asked = RefCell::new(String::new());
        let decline = |q: &str| {
            *asked.borrow_mut() = q.to_string();
            false
        };
        assert_eq!(block_on(vm.delete(&report, &decline)), Err(ActionError::Cancelled));
        assert!(asked.borrow().contains("\"Burglary\""));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn confirmed_delete_refreshes() {
        let (transport, _, vm) = setup();
        transport.push_json(200, json!([crime("c-1", "Burglary", "Pending")]));
        block_on(vm.refresh()).unwrap();
        let report = vm.list().borrow().snapshot()[0].clone();

        transport.push_status(204);
        transport.push_json(200, json!([]));
        block_on(vm.delete(&report, &|_: &str| true)).unwrap();

        assert!(vm.list().borrow().snapshot().is_empty());
        assert_eq!(transport.requests()[1].method, HttpMethod::Delete);
    }

    #[test]
    fn unauthorized_refresh_clears_session() {
        let (transport, store, vm) = setup();
        transport.push_status(401);
        assert_eq!(block_on(vm.refresh()), Err(ActionError::SessionExpired));
        assert!(store.load().is_none());
    }

    #[test]
    fn recent_takes_first_reports_in_server_order() {
        let (transport, _, vm) = setup();
        transport.push_json(200, crimes(12));
        block_on(vm.refresh()).unwrap();
        let recent = vm.recent(9);
        assert_eq!(recent.len(), 9);
        assert_eq!(recent[0].id, "c-1");
        assert_eq!(recent[8].id, "c-9");
    }
}
