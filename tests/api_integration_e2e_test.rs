// ==========================================
// API 端到端集成测试
// ==========================================
// 测试范围:
// 1. 字段命名: camelCase 请求/响应，snake_case 请求兼容
// 2. 创建/读取/删除 与 状态码
// 3. 错误映射: 404 / 409 / 422，统一 {"message": ...}
// 4. 分页参数
// ==========================================

mod helpers;

use axum::http::StatusCode;
use fertigung_api::config::ServerConfig;
use helpers::api_test_helper::ApiTestEnv;
use helpers::test_data_builder::{MachineBuilder, MaterialBuilder, ProductBuilder};
use serde_json::json;

// ==========================================
// 机器
// ==========================================

#[tokio::test]
async fn test_create_machine_camel_case_round_trip() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let body = MachineBuilder::new("Drehbank")
        .capability("drehen", 3.5)
        .capability("bohren", 1.25)
        .staff(2, 4)
        .to_json();

    let (status, created) = env.post("/maschinen/", body).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().expect("缺少 id").to_string();
    assert_eq!(id.len(), 32);
    assert_eq!(created["name"], json!("Drehbank"));
    assert_eq!(created["kostenMinute"], json!(1.5));
    assert_eq!(created["ausfallWahrscheinlichkeit"], json!(0.02));
    assert_eq!(created["mitarbeiterMin"], json!(2));
    assert_eq!(created["mitarbeiterMax"], json!(4));
    assert!(created.get("kosten_minute").is_none());

    let capabilities = created["maschinenbefaehigungen"].as_array().unwrap();
    assert_eq!(capabilities.len(), 2);
    assert_eq!(capabilities[0]["schrittId"], json!("drehen"));
    assert_eq!(capabilities[1]["taktrate"], json!(1.25));
    assert_ne!(capabilities[0]["id"], capabilities[1]["id"]);

    let (status, fetched) = env.get(&format!("/maschinen/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_machine_accepts_snake_case_fields() {
    let env = ApiTestEnv::new().unwrap();

    let (status, created) = env
        .post(
            "/maschinen/",
            json!({
                "name": "Schweißroboter",
                "ruestzeit": 30.0,
                "kosten_minute": 4.0,
                "ausfall_wahrscheinlichkeit": 0.1,
                "mitarbeiter_min": 0,
                "mitarbeiter_max": 1,
                "maschinenbefaehigungen": [{"schritt_id": "schweissen", "taktrate": 2.0}]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["kostenMinute"], json!(4.0));
    assert_eq!(
        created["maschinenbefaehigungen"][0]["schrittId"],
        json!("schweissen")
    );
}

#[tokio::test]
async fn test_delete_machine_then_get_is_not_found() {
    let env = ApiTestEnv::new().unwrap();

    let (_, created) = env
        .post(
            "/maschinen/",
            MachineBuilder::new("Säge").capability("saegen", 1.0).to_json(),
        )
        .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = env.delete(&format!("/maschinen/{}/", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        json!(format!("Maschine with id: {} deleted successfully!", id))
    );
    assert_eq!(env.count_rows("maschinenbefaehigung", "maschine_id", &id), 0);

    let (status, body) = env.get(&format!("/maschinen/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn test_delete_unknown_id_returns_not_found() {
    let env = ApiTestEnv::new().unwrap();

    for uri in ["/maschinen/unknown/", "/material/unknown/", "/produkte/unknown"] {
        let (status, body) = env.delete(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri={}", uri);
        assert!(body["message"].as_str().unwrap().contains("not found"));
    }
}

#[tokio::test]
async fn test_invalid_machine_is_rejected_with_violations() {
    let env = ApiTestEnv::new().unwrap();

    let mut body = MachineBuilder::new("Kaputt").staff(3, 1).to_json();
    body["ausfallWahrscheinlichkeit"] = json!(2.0);

    let (status, error) = env.post("/maschinen/", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["message"].is_string());

    let fields: Vec<&str> = error["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"ausfallWahrscheinlichkeit"));
    assert!(fields.contains(&"mitarbeiterMin"));
    assert_eq!(env.count_all("maschine"), 0);
}

#[tokio::test]
async fn test_malformed_body_is_validation_failure() {
    let env = ApiTestEnv::new().unwrap();

    // 缺少 kostenStueck
    let (status, error) = env
        .post(
            "/material/",
            json!({"name": "Stahl", "bestand": 1.0, "aufstockenMinute": 0.0}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["message"].as_str().unwrap().contains("kostenStueck"));
}

// ==========================================
// 物料与分页
// ==========================================

#[tokio::test]
async fn test_material_pagination() {
    let env = ApiTestEnv::new().unwrap();

    for i in 1..=5 {
        let (status, _) = env
            .post("/material/", MaterialBuilder::new(&format!("M{}", i)).to_json())
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = env.get("/material/?skip=0&take=2").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["M1", "M2"]);

    let (_, page) = env.get("/material/?skip=4").await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["name"], json!("M5"));

    // 无末尾斜杠同样可用
    let (status, all) = env.get("/material").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_invalid_pagination_is_rejected() {
    let config = ServerConfig {
        max_take: 10,
        default_take: 5,
        ..ServerConfig::default()
    };
    let env = ApiTestEnv::with_config(config).unwrap();

    let (status, _) = env.get("/material/?take=0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = env.get("/material/?take=11").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = env.get("/material/?skip=-1").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_default_take_from_config() {
    let config = ServerConfig {
        default_take: 3,
        ..ServerConfig::default()
    };
    let env = ApiTestEnv::with_config(config).unwrap();

    for i in 1..=4 {
        env.post("/material/", MaterialBuilder::new(&format!("M{}", i)).to_json())
            .await;
    }

    let (_, page) = env.get("/material/").await;
    assert_eq!(page.as_array().unwrap().len(), 3);
}

// ==========================================
// 产品
// ==========================================

#[tokio::test]
async fn test_create_product_with_material_requirements() {
    let env = ApiTestEnv::new().unwrap();

    let (_, holz) = env.post("/material/", MaterialBuilder::new("Holz").to_json()).await;
    let holz_id = holz["id"].as_str().unwrap().to_string();

    let (status, created) = env
        .post(
            "/produkte/",
            json!({
                "name": "Tisch",
                "verkaufspreis": 199.0,
                "produktionsschritte": [{"schritt": 1}, {"schritt": 2}],
                "materialbedarf": [{"materialId": holz_id, "menge": 4.0}]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["verkaufspreis"], json!(199.0));
    assert_eq!(created["produktionsschritte"][0]["schritt"], json!(1));
    assert_eq!(created["produktionsschritte"][1]["schritt"], json!(2));
    assert_eq!(created["materialbedarf"][0]["materialId"], json!(holz_id));
    assert_eq!(created["materialbedarf"][0]["menge"], json!(4.0));

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = env.get(&format!("/produkte/{}/", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_product_with_unknown_material_fails_before_persistence() {
    let env = ApiTestEnv::new().unwrap();

    let ghost = MaterialBuilder::new("Geist").build();
    let body = ProductBuilder::new("Stuhl")
        .step(1)
        .requirement(&ghost, 1.0)
        .to_json();

    let (status, error) = env.post("/produkte/", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["message"].as_str().unwrap().contains(&ghost.id));
    assert_eq!(
        error["violations"][0]["field"],
        json!("materialbedarf[0].materialId")
    );

    let (_, products) = env.get("/produkte/").await;
    assert!(products.as_array().unwrap().is_empty());
    assert_eq!(env.count_all("produktionsschritt"), 0);
}

#[tokio::test]
async fn test_delete_referenced_material_is_conflict() {
    let env = ApiTestEnv::new().unwrap();

    let (_, kupfer) = env.post("/material/", MaterialBuilder::new("Kupfer").to_json()).await;
    let kupfer_id = kupfer["id"].as_str().unwrap().to_string();
    let (status, produkt) = env
        .post(
            "/produkte/",
            json!({
                "name": "Kabel",
                "verkaufspreis": 5.0,
                "produktionsschritte": [],
                "materialbedarf": [{"material_id": kupfer_id, "menge": 2.0}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = env.delete(&format!("/material/{}/", kupfer_id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["message"].is_string());

    // 删除产品后物料可删除
    let produkt_id = produkt["id"].as_str().unwrap();
    let (status, body) = env.delete(&format!("/produkte/{}/", produkt_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        json!(format!("Produkt with id: {} deleted successfully!", produkt_id))
    );

    let (status, _) = env.delete(&format!("/material/{}", kupfer_id)).await;
    assert_eq!(status, StatusCode::OK);
}

// ==========================================
// 健康检查
// ==========================================

#[tokio::test]
async fn test_health_reports_schema_version() {
    let env = ApiTestEnv::new().unwrap();

    let (status, body) = env.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(
        body["schemaVersion"],
        json!(fertigung_api::db::CURRENT_SCHEMA_VERSION)
    );
    assert_eq!(body["version"], json!(fertigung_api::VERSION));
}
