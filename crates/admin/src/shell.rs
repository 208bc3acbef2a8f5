//! The authenticated shell: record lists, edit forms, and the save/delete
//! flows against the backend.

use thiserror::Error;

use superstore_client::{ApiError, RestClient};
use superstore_core::{DomainError, RecordId};
use superstore_records::{Product, ProductDraft, User, UserDraft};

use crate::notify::Notice;
use crate::view::{self, AdminView, Screen};

#[derive(Debug, Error)]
pub enum ShellError {
    /// The form did not validate; nothing was sent.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Application state for one signed-in operator.
///
/// Lists are replaced wholesale from the backend after every load and after
/// every mutation; nothing is patched locally. A failed save keeps the form
/// open with the typed-in values intact.
pub struct AdminShell {
    api: RestClient,
    view: AdminView,
    products: Vec<Product>,
    users: Vec<User>,
    product_form: Option<ProductDraft>,
    user_form: Option<UserDraft>,
    notices: Vec<Notice>,
}

impl AdminShell {
    pub fn new(api: RestClient) -> Self {
        Self {
            api,
            view: AdminView::default(),
            products: Vec::new(),
            users: Vec::new(),
            product_form: None,
            user_form: None,
            notices: Vec::new(),
        }
    }

    /// The screen to render, derived from the session phase.
    pub fn screen(&self) -> Screen {
        view::select_screen(self.api.session().phase(), self.view)
    }

    pub fn view(&self) -> AdminView {
        self.view
    }

    /// Switch sections. Any open form belongs to the old section and is
    /// dropped.
    pub fn select_view(&mut self, view: AdminView) {
        if view != self.view {
            self.view = view;
            self.product_form = None;
            self.user_form = None;
        }
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain pending notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // --- products ---

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product_form(&self) -> Option<&ProductDraft> {
        self.product_form.as_ref()
    }

    pub fn product_form_mut(&mut self) -> Option<&mut ProductDraft> {
        self.product_form.as_mut()
    }

    /// Fetch the product list, replacing the current one wholesale.
    pub async fn load_products(&mut self) -> Result<(), ShellError> {
        match self.api.list_products().await {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading products failed");
                self.notices.push(Notice::error("could not load products"));
                Err(e.into())
            }
        }
    }

    /// Table rows for the product view: name plus formatted price.
    pub fn product_rows(&self) -> Vec<(String, String)> {
        self.products
            .iter()
            .map(|p| (p.name.clone(), view::format_price(p.price)))
            .collect()
    }

    /// Open the form: empty for a new record, seeded for an edit.
    pub fn open_product_form(&mut self, record: Option<&Product>) {
        self.product_form = Some(match record {
            Some(product) => ProductDraft::from_record(product),
            None => ProductDraft::default(),
        });
    }

    pub fn cancel_product_form(&mut self) {
        self.product_form = None;
    }

    /// Submit the open product form.
    ///
    /// Validation failure or a rejected request leaves the form open with
    /// its values intact. On success the form closes and the list is
    /// refetched.
    pub async fn save_product(&mut self) -> Result<(), ShellError> {
        let Some(draft) = self.product_form.as_ref() else {
            return Ok(());
        };

        let product = match draft.validate() {
            Ok(product) => product,
            Err(e) => {
                self.notices.push(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        match self.api.save_product(&product).await {
            Ok(_) => {
                self.product_form = None;
                self.notices.push(Notice::success("product saved"));
                self.load_products().await
            }
            Err(e) => {
                tracing::warn!(error = %e, "saving product failed");
                self.notices.push(Notice::error("could not save product"));
                Err(e.into())
            }
        }
    }

    /// Delete a product, then refetch the list so the view reflects the
    /// backend rather than a local guess.
    pub async fn delete_product(&mut self, id: RecordId) -> Result<(), ShellError> {
        match self.api.delete_product(id).await {
            Ok(()) => {
                self.notices.push(Notice::success("product deleted"));
                self.load_products().await
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "deleting product failed");
                self.notices.push(Notice::error("could not delete product"));
                Err(e.into())
            }
        }
    }

    // --- users ---

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user_form(&self) -> Option<&UserDraft> {
        self.user_form.as_ref()
    }

    pub fn user_form_mut(&mut self) -> Option<&mut UserDraft> {
        self.user_form.as_mut()
    }

    pub async fn load_users(&mut self) -> Result<(), ShellError> {
        match self.api.list_users().await {
            Ok(users) => {
                self.users = users;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading users failed");
                self.notices.push(Notice::error("could not load users"));
                Err(e.into())
            }
        }
    }

    pub fn open_user_form(&mut self, record: Option<&User>) {
        self.user_form = Some(match record {
            Some(user) => UserDraft::from_record(user),
            None => UserDraft::default(),
        });
    }

    pub fn cancel_user_form(&mut self) {
        self.user_form = None;
    }

    /// Submit the open user form; same contract as [`save_product`].
    ///
    /// [`save_product`]: AdminShell::save_product
    pub async fn save_user(&mut self) -> Result<(), ShellError> {
        let Some(draft) = self.user_form.as_ref() else {
            return Ok(());
        };

        let user = match draft.validate() {
            Ok(user) => user,
            Err(e) => {
                self.notices.push(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        match self.api.save_user(&user).await {
            Ok(_) => {
                self.user_form = None;
                self.notices.push(Notice::success("user saved"));
                self.load_users().await
            }
            Err(e) => {
                tracing::warn!(error = %e, "saving user failed");
                self.notices.push(Notice::error("could not save user"));
                Err(e.into())
            }
        }
    }

    pub async fn delete_user(&mut self, id: RecordId) -> Result<(), ShellError> {
        match self.api.delete_user(id).await {
            Ok(()) => {
                self.notices.push(Notice::success("user deleted"));
                self.load_users().await
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "deleting user failed");
                self.notices.push(Notice::error("could not delete user"));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeLevel;
    use superstore_auth::{SessionContext, TokenClaims};
    use superstore_core::SubjectId;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn authenticated_session() -> SessionContext {
        let session = SessionContext::new();
        session.authenticate(
            "tok".to_string(),
            TokenClaims {
                sub: "6f1c1a2e-0f4e-4a8c-9d3e-5b6a7c8d9e0f"
                    .parse::<SubjectId>()
                    .unwrap(),
                preferred_username: Some("admin".to_string()),
                email: None,
                iat: 100,
                exp: i64::MAX,
            },
        );
        session
    }

    fn shell_for(server: &MockServer) -> AdminShell {
        AdminShell::new(RestClient::new(server.uri(), authenticated_session()))
    }

    #[test]
    fn failed_handshake_lands_on_the_login_prompt() {
        let session = SessionContext::new();
        session.begin_bootstrap().unwrap();
        session.auth_error("provider rejected the check");
        session.complete_bootstrap().unwrap();

        let shell = AdminShell::new(RestClient::new("http://localhost:9", session));
        assert_eq!(shell.screen(), Screen::LoginPrompt);
    }

    #[test]
    fn loading_session_shows_the_loading_screen() {
        let session = SessionContext::new();
        session.begin_bootstrap().unwrap();

        let shell = AdminShell::new(RestClient::new("http://localhost:9", session));
        assert_eq!(shell.screen(), Screen::Loading);
    }

    #[tokio::test]
    async fn product_rows_carry_name_and_formatted_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Widget", "price": 9.99},
            ])))
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.load_products().await.unwrap();

        assert_eq!(shell.screen(), Screen::Shell(AdminView::Products));
        assert_eq!(
            shell.product_rows(),
            vec![("Widget".to_string(), "$9.99".to_string())]
        );
    }

    #[tokio::test]
    async fn delete_refetches_the_list_from_the_backend() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Widget", "price": 9.99},
                {"id": 2, "name": "Gadget", "price": 24.5},
            ])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/products/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 2, "name": "Gadget", "price": 24.5},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.load_products().await.unwrap();
        assert_eq!(shell.products().len(), 2);

        shell.delete_product(RecordId::new(1)).await.unwrap();

        // The list is what the backend returned, not a local removal.
        assert_eq!(shell.products().len(), 1);
        assert_eq!(shell.products()[0].name, "Gadget");
    }

    #[tokio::test]
    async fn new_record_saves_with_a_post_and_closes_the_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .and(body_json(serde_json::json!({"name": "Widget", "price": 9.99})))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                serde_json::json!({"id": 5, "name": "Widget", "price": 9.99}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 5, "name": "Widget", "price": 9.99},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.open_product_form(None);
        {
            let draft = shell.product_form_mut().unwrap();
            draft.name = "Widget".to_string();
            draft.price = 9.99;
        }

        shell.save_product().await.unwrap();

        assert!(shell.product_form().is_none());
        assert_eq!(shell.products().len(), 1);
        assert!(
            shell
                .notices()
                .iter()
                .any(|n| n.level == NoticeLevel::Success)
        );
    }

    #[tokio::test]
    async fn editing_an_existing_record_saves_with_a_put() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 5, "name": "Widget", "price": 12.0},
            ])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/products/5"))
            .and(body_json(serde_json::json!({
                "id": 5,
                "name": "Widget",
                "price": 12.0,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"id": 5, "name": "Widget", "price": 12.0}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.load_products().await.unwrap();
        let existing = shell.products()[0].clone();

        shell.open_product_form(Some(&existing));
        shell.product_form_mut().unwrap().price = 12.0;
        shell.save_product().await.unwrap();

        assert!(shell.product_form().is_none());
    }

    #[tokio::test]
    async fn rejected_save_keeps_the_form_and_its_values() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.open_product_form(None);
        {
            let draft = shell.product_form_mut().unwrap();
            draft.name = "Widget".to_string();
            draft.price = 9.99;
        }

        let err = shell.save_product().await.unwrap_err();
        assert!(matches!(err, ShellError::Api(ApiError::Status { status: 500, .. })));

        // The typed-in values survive the failure.
        let draft = shell.product_form().unwrap();
        assert_eq!(draft.name, "Widget");
        assert_eq!(draft.price, 9.99);
        assert!(shell.notices().iter().any(|n| n.level == NoticeLevel::Error));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.open_product_form(None);
        shell.product_form_mut().unwrap().price = 1.0;

        let err = shell.save_product().await.unwrap_err();
        assert!(matches!(err, ShellError::Domain(_)));
        assert!(shell.product_form().is_some());
    }

    #[tokio::test]
    async fn user_flow_mirrors_the_product_flow() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                serde_json::json!({"id": 3, "name": "Ada", "email": "ada@example.com"}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 3, "name": "Ada", "email": "ada@example.com"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut shell = shell_for(&server);
        shell.select_view(AdminView::Users);
        shell.open_user_form(None);
        {
            let draft = shell.user_form_mut().unwrap();
            draft.name = "Ada".to_string();
            draft.email = "ada@example.com".to_string();
        }

        shell.save_user().await.unwrap();

        assert_eq!(shell.screen(), Screen::Shell(AdminView::Users));
        assert!(shell.user_form().is_none());
        assert_eq!(shell.users().len(), 1);
    }

    #[tokio::test]
    async fn switching_sections_drops_open_forms() {
        let server = MockServer::start().await;
        let mut shell = shell_for(&server);

        shell.open_product_form(None);
        shell.select_view(AdminView::Users);

        assert!(shell.product_form().is_none());
        assert_eq!(shell.view(), AdminView::Users);
    }
}
