//! User resource endpoints. Same shape as the product endpoints.

use superstore_core::RecordId;
use superstore_records::{NewUser, User};

use crate::error::ApiError;
use crate::http::RestClient;

impl RestClient {
    /// `GET /users`.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users").await
    }

    /// Create or update, dispatched on the id.
    pub async fn save_user(&self, user: &User) -> Result<User, ApiError> {
        if user.is_unsaved() {
            self.post_json("/users", &NewUser::from(user)).await
        } else {
            self.put_json(&format!("/users/{}", user.id), user).await
        }
    }

    /// `DELETE /users/{id}`.
    pub async fn delete_user(&self, id: RecordId) -> Result<(), ApiError> {
        self.delete(&format!("/users/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superstore_auth::{SessionContext, TokenClaims};
    use superstore_core::SubjectId;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RestClient {
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
        RestClient::new(server.uri(), session)
    }

    #[tokio::test]
    async fn lists_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Ada", "email": "ada@example.com"},
            ])))
            .mount(&server)
            .await;

        let users = client_for(&server).list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "ada@example.com");
    }

    #[tokio::test]
    async fn save_dispatches_on_the_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                serde_json::json!({"id": 4, "name": "Ada", "email": "ada@example.com"}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/users/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"id": 4, "name": "Ada L.", "email": "ada@example.com"}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let new = User {
            id: RecordId::UNSAVED,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        let created = client.save_user(&new).await.unwrap();
        assert_eq!(created.id, RecordId::new(4));

        let mut renamed = created.clone();
        renamed.name = "Ada L.".to_string();
        let updated = client.save_user(&renamed).await.unwrap();
        assert_eq!(updated.name, "Ada L.");
    }

    #[tokio::test]
    async fn delete_targets_the_record_resource() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete_user(RecordId::new(9)).await.unwrap();
    }
}
