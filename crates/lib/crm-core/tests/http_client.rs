use crm_core::CrmError;
use crm_core::client::{CrmApi, HttpCrmClient};
use crm_model::{AssociationLink, ObjectType, OwnerQuery, SearchRequest};
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, token: Option<&str>) -> HttpCrmClient {
    HttpCrmClient::builder()
        .base_url(format!("{}/crm/v3", server.uri()))
        .access_token(token.map(str::to_string))
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn get_sends_bearer_token_and_projection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/contacts/42"))
        .and(header("authorization", "Bearer secret"))
        .and(query_param("properties", "email,company"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "42", "properties": {} })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let object = client
        .get_object(
            ObjectType::Contacts,
            "42",
            &["email".to_string(), "company".to_string()],
        )
        .await
        .expect("get should succeed");

    assert_eq!(object["id"], json!("42"));
}

#[tokio::test]
async fn non_success_status_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/pipelines/deals"))
        .respond_with(ResponseTemplate::new(403).set_body_string("{\"message\":\"missing scopes\"}"))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("secret"))
        .list_deal_pipelines()
        .await
        .expect_err("403 should fail");

    assert!(matches!(err, CrmError::Remote { status: 403, .. }));
    let message = err.to_string();
    assert!(message.contains("403"));
    assert!(message.contains("missing scopes"));
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server, None)
        .list_owners(&OwnerQuery {
            limit: 100,
            after: None,
            email: None,
        })
        .await
        .expect_err("unconfigured client should fail");

    assert!(matches!(err, CrmError::NotConfigured));
}

#[tokio::test]
async fn search_posts_only_present_members() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/crm/v3/objects/deals/search"))
        .and(body_json(json!({ "query": "renewal", "limit": 20 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 0, "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest {
        query: Some("renewal".to_string()),
        limit: 20,
        ..SearchRequest::default()
    };
    let page = client_for(&server, Some("secret"))
        .search_objects(ObjectType::Deals, &request)
        .await
        .expect("search should succeed");

    assert_eq!(page["total"], json!(0));
}

#[tokio::test]
async fn associations_and_deletes_accept_empty_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/crm/v3/objects/deals/9/associations/contacts/10/deal_to_contact"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/crm/v3/objects/tasks/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let linked = client
        .create_association(&AssociationLink {
            from_type: ObjectType::Deals,
            from_id: "9".to_string(),
            to_type: ObjectType::Contacts,
            to_id: "10".to_string(),
            label: "deal_to_contact",
        })
        .await
        .expect("association should succeed");
    assert!(linked.is_null());

    client
        .delete_object(ObjectType::Tasks, "5")
        .await
        .expect("delete should succeed");
}
