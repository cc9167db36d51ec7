mod common;

use std::sync::Arc;

use common::RecordingApi;
use crm_core::CrmError;
use crm_core::control::{CreateDealRequest, CrmControlPlane, EngagementRequest, ListRequest};
use crm_core::shaping::{CompactOptions, ExclusionFilter, PageMeta};
use crm_model::{EngagementKind, ObjectType, PropertyMap};
use serde_json::{Value, json};

fn control(api: RecordingApi) -> (CrmControlPlane<RecordingApi>, Arc<RecordingApi>) {
    let api = Arc::new(api);
    (CrmControlPlane::from_arc(api.clone()), api)
}

fn properties(value: Value) -> PropertyMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[tokio::test]
async fn listing_contacts_drops_excluded_companies() {
    let api = RecordingApi::new().reply(
        "list_objects:contacts",
        json!({
            "results": [
                { "id": "1", "properties": { "company": "Acme Corp", "jobtitle": "CEO" } },
                { "id": "2", "properties": { "company": "Globex", "jobtitle": "CTO" } },
                { "id": "3", "properties": { "company": "Acme Corp", "jobtitle": "CFO" } },
                { "id": "4", "properties": { "company": "Initech", "jobtitle": null } },
                { "id": "5", "properties": { "jobtitle": "Founder" } }
            ],
            "paging": { "next": { "after": "5" } }
        }),
    );
    let (control, api) = control(api);

    let page = control
        .list_objects(
            ObjectType::Contacts,
            ListRequest {
                exclusions: ExclusionFilter::new(["Acme"], Vec::<String>::new()),
                ..ListRequest::default()
            },
        )
        .await
        .expect("list should succeed");

    assert_eq!(page.results.len(), 3);
    assert_eq!(page.meta, Some(PageMeta { excluded: 2 }));
    assert_eq!(page.paging, Some(json!({ "next": { "after": "5" } })));

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("list_objects contacts limit=20"));
    assert!(calls[0].contains("company"));
    assert!(calls[0].contains("jobtitle"));
}

#[tokio::test]
async fn creating_a_deal_links_contact_then_company() {
    let (control, api) = control(RecordingApi::new());

    let result = control
        .create_deal(CreateDealRequest {
            properties: properties(json!({ "dealname": "Q1 Renewal" })),
            contact_id: Some("10".to_string()),
            company_id: Some("20".to_string()),
        })
        .await
        .expect("create should succeed");

    assert_eq!(
        api.calls(),
        vec![
            "create_object deals",
            "create_association deals/900 -> contacts/10 deal_to_contact",
            "create_association deals/900 -> companies/20 deal_to_company",
        ]
    );
    assert_eq!(result["success"], json!(true));
    assert_eq!(result["deal"]["id"], json!("900"));
    assert_eq!(
        result["associations"],
        json!({ "contactId": "10", "companyId": "20" })
    );
}

#[tokio::test]
async fn failed_association_fails_the_call_after_the_create() {
    let api = RecordingApi::new().fail("create_association:deals", 400, "bad association");
    let (control, api) = control(api);

    let err = control
        .create_deal(CreateDealRequest {
            properties: properties(json!({ "dealname": "Orphan" })),
            contact_id: Some("10".to_string()),
            company_id: Some("20".to_string()),
        })
        .await
        .expect_err("association failure should fail the call");

    assert!(matches!(err, CrmError::Remote { status: 400, .. }));
    assert_eq!(
        api.calls(),
        vec![
            "create_object deals",
            "create_association deals/900 -> contacts/10 deal_to_contact",
        ]
    );
}

#[tokio::test]
async fn updating_without_fields_makes_no_remote_call() {
    let (control, api) = control(RecordingApi::new());

    let err = control
        .update_object(ObjectType::Tasks, "5".to_string(), PropertyMap::new())
        .await
        .expect_err("empty update should be rejected");

    assert!(matches!(err, CrmError::Validation(_)));
    assert!(err.to_string().starts_with("at least one property"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn deleting_does_not_fetch_the_object() {
    let (control, api) = control(RecordingApi::new());

    let result = control
        .delete_object(ObjectType::Companies, "77".to_string())
        .await
        .expect("delete should succeed");

    assert_eq!(result, json!({ "success": true, "deleted": "77" }));
    assert_eq!(api.calls(), vec!["delete_object companies/77"]);
}

#[tokio::test]
async fn one_failing_engagement_type_degrades_to_empty() {
    let api = RecordingApi::new()
        .fail("list_associations:calls", 500, "upstream exploded")
        .reply(
            "list_associations:emails",
            json!({ "results": [{ "id": "e1", "type": "contact_to_email" }] }),
        )
        .reply(
            "batch_read:emails",
            json!({
                "results": [
                    { "id": "e1", "properties": { "hs_email_subject": "Renewal terms" } }
                ]
            }),
        );
    let (control, api) = control(api);

    let report = control
        .get_engagements(EngagementRequest {
            contact_id: "10".to_string(),
            ..EngagementRequest::default()
        })
        .await
        .expect("engagement fetch should succeed");

    assert_eq!(report.engagements.len(), EngagementKind::ALL.len());
    assert!(report.engagements[&EngagementKind::Calls].is_empty());
    let emails = &report.engagements[&EngagementKind::Emails];
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].properties["hs_email_subject"], json!("Renewal terms"));

    let calls = api.calls();
    assert!(calls.contains(&"batch_read emails e1".to_string()));
    assert!(!calls.iter().any(|call| call.starts_with("batch_read calls")));
}

#[tokio::test]
async fn engagement_types_can_be_narrowed() {
    let (control, api) = control(RecordingApi::new());

    let report = control
        .get_engagements(EngagementRequest {
            contact_id: "10".to_string(),
            kinds: vec![EngagementKind::Notes, EngagementKind::Notes],
            limit: None,
            shaping: CompactOptions::default(),
        })
        .await
        .expect("engagement fetch should succeed");

    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value, json!({ "contactId": "10", "engagements": { "notes": [] } }));
    assert_eq!(api.calls(), vec!["list_associations contacts/10 -> notes"]);
}

#[tokio::test]
async fn notes_are_timestamped_and_linked() {
    let (control, api) = control(RecordingApi::new());

    let result = control
        .create_note("10".to_string(), properties(json!({ "hs_note_body": "Called back" })))
        .await
        .expect("note should be created");

    assert!(result["note"]["properties"]["hs_timestamp"].is_string());
    assert_eq!(result["associations"], json!({ "contactId": "10" }));
    assert_eq!(
        api.calls(),
        vec![
            "create_object notes",
            "create_association notes/900 -> contacts/10 note_to_contact",
        ]
    );
}
