// tests/api_tests.rs

mod common;

use axum::http::{header, StatusCode};
use chrono::{Datelike, Utc};
use serde_json::json;
use uuid::Uuid;

use common::{sample_class, TestApp};

// =============================================================================
//  WIZARD DE ABERTURA
// =============================================================================

#[tokio::test]
async fn bootstrap_writes_class_directory_and_events() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();

    let res = app.post("/api/classes").token(owner).json(sample_class()).send().await;

    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["childrenCreated"], 5);
    assert_eq!(res.body["parentsCreated"], 3);
    assert_eq!(res.body["staffCreated"], 1);
    assert_eq!(res.body["eventsCreated"], 1);
    assert_eq!(res.body["warnings"], json!([]));

    // 100 por criança x 5 crianças (as estimadas não contam quando há lista)
    let class = &res.body["class"];
    assert_eq!(class["totalBudget"].as_f64(), Some(500.0));
    assert_eq!(class["inviteCode"].as_str().unwrap().len(), 8);

    let class_id: Uuid = class["id"].as_str().unwrap().parse().unwrap();

    // Quem abriu a turma vira admin
    let mine = app.get("/api/me/classes").token(owner).send().await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body[0]["role"], "admin");

    let events = app.get("/api/class/events").token(owner).class(class_id).send().await;
    let purim = &events.body[0];
    assert_eq!(purim["icon"], "🎭");
    assert_eq!(purim["category"], "holiday");
    // 20 x 5 crianças + 50 x 1 funcionária
    assert_eq!(purim["allocatedBudget"].as_f64(), Some(150.0));

    let directory = app.get("/api/class/directory").token(owner).class(class_id).send().await;
    let staff = directory.body["staff"].as_array().unwrap();
    assert_eq!(staff.len(), 1);
    let year = Utc::now().year();
    assert_eq!(staff[0]["birthday"], format!("{}-11-03", year));

    let maya = directory.body["children"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "Maya Shapiro")
        .unwrap();
    assert_eq!(maya["birthday"], format!("{}-03-03", year));
}

#[tokio::test]
async fn bootstrap_rejects_bad_rows_before_writing() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();

    let mut payload = sample_class();
    payload["children"][1]["parent1Phone"] = json!("não é telefone");
    payload["children"][2]["birthday"] = json!("31/02/2020");

    let res = app.post("/api/classes").token(owner).json(payload).send().await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "validation_failed");
    assert_eq!(res.body["details"]["children[1].parent1Phone"], "invalid_phone");
    assert_eq!(res.body["details"]["children[2].birthday"], "invalid_birthday");

    let mine = app.get("/api/me/classes").token(owner).send().await;
    assert_eq!(mine.body, json!([]));
}

#[tokio::test]
async fn bootstrap_keeps_class_when_parents_fail() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    app.memory.fail_inserts_into("parents").await;

    let res = app.post("/api/classes").token(owner).json(sample_class()).send().await;

    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["childrenCreated"], 5);
    assert_eq!(res.body["parentsCreated"], 0);
    let warnings = res.body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 3);
    assert!(warnings.contains(&json!("children[0].parent1: not saved")));
}

#[tokio::test]
async fn bootstrap_failure_removes_the_class() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    app.memory.fail_inserts_into("events").await;

    let res = app.post("/api/classes").token(owner).json(sample_class()).send().await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["code"], "internal_error");

    let mine = app.get("/api/me/classes").token(owner).send().await;
    assert_eq!(mine.body, json!([]));
}

#[tokio::test]
async fn total_mode_ignores_child_count() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let mut payload = sample_class();
    payload["budgetType"] = json!("total");
    payload["budgetAmount"] = json!(3000);

    let res = app.post("/api/classes").token(owner).json(payload).send().await;

    assert_eq!(res.body["class"]["totalBudget"].as_f64(), Some(3000.0));
}

#[tokio::test]
async fn bootstrap_rejects_events_above_total() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let mut payload = sample_class();
    // 1000 x 5 crianças + 50 x 1 contra um total de 500
    payload["events"][0]["amountPerKid"] = json!(1000);

    let res = app.post("/api/classes").token(owner).json(payload).send().await;

    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["code"], "allocation_exceeds_budget");

    let mine = app.get("/api/me/classes").token(owner).send().await;
    assert_eq!(mine.body, json!([]));
}

#[tokio::test]
async fn bootstrap_rejects_huge_amounts() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();

    let mut payload = sample_class();
    payload["budgetAmount"] = json!(10_000_000);
    let res = app.post("/api/classes").token(owner).json(payload).send().await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "validation_failed");

    let mut payload = sample_class();
    payload["events"][0]["amountPerStaff"] = json!(10_000_000);
    let res = app.post("/api/classes").token(owner).json(payload).send().await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let mine = app.get("/api/me/classes").token(owner).send().await;
    assert_eq!(mine.body, json!([]));
}

// =============================================================================
//  AUTENTICAÇÃO E ESCOPO DA TURMA
// =============================================================================

#[tokio::test]
async fn requests_without_token_are_rejected() {
    let app = TestApp::new();

    let res = app.get("/api/me").send().await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["code"], "invalid_token");

    let res = app
        .get("/api/me")
        .header("authorization", "Bearer not-a-jwt")
        .send()
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn errors_follow_accept_language() {
    let app = TestApp::new();

    let en = app.get("/api/me").send().await;
    let he = app.get("/api/me").header("accept-language", "he-IL,he;q=0.9").send().await;

    assert_eq!(he.body["code"], en.body["code"]);
    assert_ne!(he.body["error"], en.body["error"]);
}

#[tokio::test]
async fn class_routes_need_header_and_membership() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    let res = app.get("/api/class").token(owner).send().await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "missing_class_header");

    let res = app.get("/api/class").token(stranger).class(class_id).send().await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["code"], "not_class_member");

    let res = app.get("/api/class").token(owner).class(class_id).send().await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "גן חבצלת");
}

#[tokio::test]
async fn members_can_read_but_only_admins_write() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let member = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    let res = app
        .post("/api/class/members")
        .token(owner)
        .class(class_id)
        .json(json!({ "userId": member }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["role"], "member");

    let res = app.get("/api/class/directory").token(member).class(class_id).send().await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .post("/api/class/children")
        .token(member)
        .class(class_id)
        .json(json!({ "name": "Eli" }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["code"], "admin_required");

    // Segunda vez: já é membro
    let res = app
        .post("/api/class/members")
        .token(owner)
        .class(class_id)
        .json(json!({ "userId": member }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

// =============================================================================
//  DIRETÓRIO
// =============================================================================

#[tokio::test]
async fn add_child_with_single_parent() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    let res = app
        .post("/api/class/children")
        .token(owner)
        .class(class_id)
        .json(json!({ "name": "Eli Ben-David", "parent1Name": "Sara Ben-David" }))
        .send()
        .await;

    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    let parents = res.body["parents"].as_array().unwrap();
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0]["relationship"], "parent1");
    assert_eq!(parents[0]["name"], "Sara Ben-David");
}

#[tokio::test]
async fn update_child_fills_missing_parent_and_delete_cleans_up() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    let created = app
        .post("/api/class/children")
        .token(owner)
        .class(class_id)
        .json(json!({ "name": "Eli", "parent1Name": "Sara" }))
        .send()
        .await;
    let child_id = created.body["id"].as_str().unwrap().to_string();

    let res = app
        .put(&format!("/api/class/children/{}", child_id))
        .token(owner)
        .class(class_id)
        .json(json!({ "parent1Phone": "050-1112223", "parent2Name": "Avi" }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    let parents = res.body["parents"].as_array().unwrap();
    assert_eq!(parents.len(), 2);
    assert_eq!(parents[0]["name"], "Sara");
    assert_eq!(parents[0]["phone"], "050-1112223");
    assert_eq!(parents[1]["relationship"], "parent2");

    let res = app
        .delete(&format!("/api/class/children/{}", child_id))
        .token(owner)
        .class(class_id)
        .send()
        .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app
        .delete(&format!("/api/class/children/{}", child_id))
        .token(owner)
        .class(class_id)
        .send()
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "child_not_found");
}

#[tokio::test]
async fn update_child_of_another_class_is_not_found() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_a, _) = app.bootstrap_class(owner, sample_class()).await;
    let (class_b, _) = app.bootstrap_class(owner, sample_class()).await;

    let directory = app.get("/api/class/directory").token(owner).class(class_b).send().await;
    let foreign = directory.body["children"][0]["id"].as_str().unwrap().to_string();

    let res = app
        .put(&format!("/api/class/children/{}", foreign))
        .token(owner)
        .class(class_a)
        .json(json!({ "parent2Name": "Intrusa" }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "child_not_found");

    // Nenhum responsável novo apareceu na turma A
    let directory = app.get("/api/class/directory").token(owner).class(class_a).send().await;
    let names: Vec<&str> = directory.body["children"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|c| c["parents"].as_array().unwrap())
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert!(!names.contains(&"Intrusa"));
}

// =============================================================================
//  ORÇAMENTO
// =============================================================================

#[tokio::test]
async fn budget_cannot_drop_below_allocated() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    // Purim já aloca 150; 20 x 5 = 100 não cobre
    let res = app
        .put("/api/class/budget")
        .token(owner)
        .class(class_id)
        .json(json!({ "budgetType": "per-child", "budgetAmount": 20 }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["code"], "budget_below_allocated");

    let res = app
        .put("/api/class/budget")
        .token(owner)
        .class(class_id)
        .json(json!({ "budgetType": "total", "budgetAmount": 1000 }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["totalBudget"].as_f64(), Some(1000.0));

    let summary = app.get("/api/class/budget/summary").token(owner).class(class_id).send().await;
    assert_eq!(summary.body["allocated"].as_f64(), Some(150.0));
    assert_eq!(summary.body["remaining"].as_f64(), Some(850.0));
    assert_eq!(summary.body["overAllocated"], false);
}

#[tokio::test]
async fn events_cannot_exceed_total() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    // 500 no total, 150 já alocados: 80 x 5 = 400 estoura
    let res = app
        .post("/api/class/events")
        .token(owner)
        .class(class_id)
        .json(json!({ "eventType": "hanukkah", "amountPerKid": 80 }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["code"], "allocation_exceeds_budget");

    let res = app
        .post("/api/class/events")
        .token(owner)
        .class(class_id)
        .json(json!({ "eventType": "Pizza day", "amountPerKid": 10 }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["icon"], "📅");
    assert_eq!(res.body["category"], "other");
    assert_eq!(res.body["eventDate"], json!(null));
}

#[tokio::test]
async fn free_event_accepted_when_class_is_over_allocated() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    // Sobra uma criança: total 100 contra os 150 do Purim
    let directory = app.get("/api/class/directory").token(owner).class(class_id).send().await;
    let ids: Vec<String> = directory.body["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect();
    for id in &ids[1..] {
        let res = app
            .delete(&format!("/api/class/children/{}", id))
            .token(owner)
            .class(class_id)
            .send()
            .await;
        assert_eq!(res.status, StatusCode::NO_CONTENT);
    }

    let summary = app.get("/api/class/budget/summary").token(owner).class(class_id).send().await;
    assert_eq!(summary.body["overAllocated"], true);

    let res = app
        .post("/api/class/events")
        .token(owner)
        .class(class_id)
        .json(json!({ "eventType": "Picnic" }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);

    let res = app
        .post("/api/class/events")
        .token(owner)
        .class(class_id)
        .json(json!({ "eventType": "Bowling", "amountPerKid": 1 }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn event_amounts_have_a_ceiling() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    let res = app
        .post("/api/class/events")
        .token(owner)
        .class(class_id)
        .json(json!({ "eventType": "Trip", "amountPerKid": 1_000_001 }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .put("/api/class/budget")
        .token(owner)
        .class(class_id)
        .json(json!({ "budgetType": "per-child", "budgetAmount": 5_000_000 }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "validation_failed");
}

// =============================================================================
//  PAGAMENTOS
// =============================================================================

#[tokio::test]
async fn payments_are_summarized_against_expected() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    let directory = app.get("/api/class/directory").token(owner).class(class_id).send().await;
    let parent_id = directory.body["children"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "Noa Cohen")
        .unwrap()["parents"][0]["parentId"]
        .clone();

    let res = app
        .post("/api/class/payments")
        .token(owner)
        .class(class_id)
        .json(json!({ "parentId": parent_id, "amount": 100, "status": "completed", "method": "bit" }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);

    let res = app
        .post("/api/class/payments")
        .token(owner)
        .class(class_id)
        .json(json!({ "parentId": Uuid::new_v4(), "amount": 100 }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "parent_not_found");

    let summary = app.get("/api/class/payments/summary").token(owner).class(class_id).send().await;
    assert_eq!(summary.body["expected"].as_f64(), Some(500.0));
    assert_eq!(summary.body["collected"].as_f64(), Some(100.0));
    assert_eq!(summary.body["outstanding"].as_f64(), Some(400.0));
}

// =============================================================================
//  VISÃO PÚBLICA
// =============================================================================

#[tokio::test]
async fn public_directory_hides_contacts() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (_, code) = app.bootstrap_class(owner, sample_class()).await;

    let res = app
        .get(&format!("/api/public/{}/directory", code.to_uppercase()))
        .send()
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["children"].as_array().unwrap().len(), 5);
    let raw = res.body.to_string();
    assert!(!raw.contains("050-1234567"));
    assert!(!raw.contains("Dana Cohen"));
    assert!(!raw.contains("Herzl 10"));

    let res = app.get("/api/public/zzzzzzzz").send().await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "invite_code_not_found");
}

#[tokio::test]
async fn public_calendar_lists_month_birthdays_and_holidays() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (_, code) = app.bootstrap_class(owner, sample_class()).await;

    let res = app
        .get(&format!("/api/public/{}/calendar?year=2026&month=3", code))
        .send()
        .await;

    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    let birthdays = res.body["birthdays"].as_array().unwrap();
    let names: Vec<&str> = birthdays.iter().map(|b| b["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Maya Shapiro", "Noa Cohen"]);
    assert_eq!(birthdays[1]["date"], "2026-03-15");

    let holidays = res.body["holidays"].as_array().unwrap();
    assert!(holidays.iter().any(|h| h["name"] == "פורים" && h["date"] == "2026-03-03"));

    let res = app
        .get(&format!("/api/public/{}/calendar?year=-2147483648&month=1", code))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["details"]["year"], "invalid_year");
}

#[tokio::test]
async fn intake_updates_child_with_same_name() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, code) = app.bootstrap_class(owner, sample_class()).await;
    let uri = format!("/api/public/{}/parent-form", code);

    let res = app
        .post(&uri)
        .json(json!({ "name": "Lior Katz", "parent1Name": "Gili Katz" }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["created"], true);

    let res = app
        .post(&uri)
        .json(json!({ "name": "  lior KATZ ", "birthday": "01/09/2020", "parent1Phone": "054-9998887" }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    assert_eq!(res.body["created"], false);
    assert_eq!(res.body["childName"], "Lior Katz");

    let directory = app.get("/api/class/directory").token(owner).class(class_id).send().await;
    let liors: Vec<_> = directory.body["children"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["name"] == "Lior Katz")
        .collect();
    assert_eq!(liors.len(), 1);
    assert_eq!(liors[0]["birthday"], "2020-09-01");
    assert_eq!(liors[0]["parents"][0]["phone"], "054-9998887");
}

#[tokio::test]
async fn intake_closed_by_directory_settings() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, code) = app.bootstrap_class(owner, sample_class()).await;

    let res = app
        .put("/api/class/directory-settings")
        .token(owner)
        .class(class_id)
        .json(json!({ "allowParentIntake": false }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["showChildren"], true);

    let form = app.get(&format!("/api/public/{}/parent-form", code)).send().await;
    assert_eq!(form.body["isOpen"], false);

    let res = app
        .post(&format!("/api/public/{}/parent-form", code))
        .json(json!({ "name": "Lior Katz" }))
        .send()
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["code"], "intake_closed");
}

#[tokio::test]
async fn join_link_redirects_to_parent_form() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (_, code) = app.bootstrap_class(owner, sample_class()).await;

    let res = app.get(&format!("/join/{}", code.to_uppercase())).send().await;

    assert_eq!(res.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        res.headers[header::LOCATION].to_str().unwrap(),
        format!("/parent-form/{}", code)
    );
}

#[tokio::test]
async fn regenerated_code_replaces_the_old_one() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, old_code) = app.bootstrap_class(owner, sample_class()).await;

    let res = app.post("/api/class/invite-code").token(owner).class(class_id).send().await;
    let new_code = res.body["inviteCode"].as_str().unwrap().to_string();
    assert_ne!(new_code, old_code);

    let res = app.get(&format!("/api/public/{}", old_code)).send().await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    let res = app.get(&format!("/api/public/{}", new_code)).send().await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn invite_qr_served_as_png_and_svg() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let (class_id, _) = app.bootstrap_class(owner, sample_class()).await;

    let png = app.get("/api/class/invite-qr").token(owner).class(class_id).send().await;
    assert_eq!(png.status, StatusCode::OK);
    assert_eq!(png.headers[header::CONTENT_TYPE], "image/png");

    let svg = app
        .get("/api/class/invite-qr?format=svg")
        .token(owner)
        .class(class_id)
        .send()
        .await;
    assert_eq!(svg.headers[header::CONTENT_TYPE], "image/svg+xml");
}

// =============================================================================
//  CALENDÁRIO
// =============================================================================

#[tokio::test]
async fn holidays_endpoint_returns_month() {
    let app = TestApp::new();

    let res = app.get("/api/holidays?year=2025&month=9").send().await;
    assert_eq!(res.status, StatusCode::OK);
    let first = &res.body[0];
    assert_eq!(first["date"], "2025-09-23");
    assert_eq!(first["icon"], "🍎");
    assert_eq!(first["isSchoolOff"], true);
    assert_eq!(first["category"], "major");

    let res = app.get("/api/holidays?year=2026&month=13").send().await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["details"]["month"], "invalid_month");

    let res = app.get("/api/holidays?year=2147483647&month=9").send().await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["details"]["year"], "invalid_year");
}

#[tokio::test]
async fn event_catalog_and_health_are_public() {
    let app = TestApp::new();

    let catalog = app.get("/api/event-catalog").send().await;
    assert_eq!(catalog.status, StatusCode::OK);
    let purim = catalog.body.as_array().unwrap().iter().find(|e| e["id"] == "purim").unwrap();
    assert_eq!(purim["icon"], "🎭");

    let health = app.get("/api/health").send().await;
    assert_eq!(health.status, StatusCode::OK);

    let docs = app.get("/api-docs/openapi.json").send().await;
    assert!(docs.body["paths"]["/api/classes"].is_object());
}
