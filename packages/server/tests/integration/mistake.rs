use serde_json::json;

use crate::common::{
    ORIGINAL_BASE64, ORIGINAL_BYTES, PHOTO_BYTES, PHOTO_DATA_URL, TestApp, routes,
};

fn assert_utc_millis(value: &str) {
    // YYYY-MM-DDTHH:mm:ss.sssZ
    assert_eq!(value.len(), 24, "unexpected timestamp {value}");
    assert_eq!(&value[10..11], "T");
    assert_eq!(&value[19..20], ".");
    assert!(value.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(value).is_ok());
}

mod create {
    use super::*;

    #[tokio::test]
    async fn create_returns_record_and_location() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::MISTAKES,
                &json!({
                    "description": "Left the stove on",
                    "photo": PHOTO_DATA_URL,
                    "originalPhoto": ORIGINAL_BASE64,
                }),
            )
            .await;

        assert_eq!(res.status, 201);
        let id = res.body["id"].as_i64().unwrap();
        assert!(id > 0);
        assert_eq!(res.body["description"], "Left the stove on");
        assert!(
            res.body["photoPath"]
                .as_str()
                .unwrap()
                .ends_with("_compressed.jpg")
        );
        assert!(
            res.body["originalPhotoPath"]
                .as_str()
                .unwrap()
                .ends_with("_original.jpg")
        );
        assert_utc_millis(res.body["createdAt"].as_str().unwrap());
        assert_eq!(res.header("location"), Some(routes::mistake(id).as_str()));
        assert_eq!(app.photo_files().len(), 2);
    }

    #[tokio::test]
    async fn created_record_is_retrievable() {
        let app = TestApp::spawn().await;
        let id = app.create_mistake("Forgot keys").await;

        let res = app.get(&routes::mistake(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"].as_i64().unwrap(), id);
        assert_eq!(res.body["description"], "Forgot keys");

        let list = app.get(routes::MISTAKES).await;
        assert_eq!(list.status, 200);
        let ids: Vec<i64> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![id]);
    }

    #[tokio::test]
    async fn photos_are_served_as_decoded_bytes() {
        let app = TestApp::spawn().await;
        let id = app.create_mistake("Spilled coffee").await;

        let photo = app.get(&routes::photo(id)).await;
        assert_eq!(photo.status, 200);
        assert_eq!(photo.header("content-type"), Some("image/jpeg"));
        assert_eq!(photo.bytes, PHOTO_BYTES);

        let original = app.get(&routes::original_photo(id)).await;
        assert_eq!(original.status, 200);
        assert_eq!(original.header("content-type"), Some("image/jpeg"));
        assert_eq!(original.bytes, ORIGINAL_BYTES);
    }

    #[tokio::test]
    async fn description_is_trimmed() {
        let app = TestApp::spawn().await;
        let id = app.create_mistake("  Missed the bus \n").await;

        let res = app.get(&routes::mistake(id)).await;
        assert_eq!(res.body["description"], "Missed the bus");
    }
}

mod validation {
    use super::*;

    async fn assert_rejected(app: &TestApp, body: serde_json::Value) {
        let res = app.post(routes::MISTAKES, &body).await;
        assert_eq!(res.status, 400, "body: {}", res.body);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    async fn assert_nothing_stored(app: &TestApp) {
        let list = app.get(routes::MISTAKES).await;
        assert_eq!(list.body.as_array().unwrap().len(), 0);
        assert!(app.photo_files().is_empty());
    }

    #[tokio::test]
    async fn empty_description_rejected() {
        let app = TestApp::spawn().await;
        assert_rejected(
            &app,
            json!({"description": "", "photo": PHOTO_DATA_URL, "originalPhoto": ORIGINAL_BASE64}),
        )
        .await;
        assert_nothing_stored(&app).await;
    }

    #[tokio::test]
    async fn whitespace_description_rejected() {
        let app = TestApp::spawn().await;
        assert_rejected(
            &app,
            json!({"description": "   ", "photo": PHOTO_DATA_URL, "originalPhoto": ORIGINAL_BASE64}),
        )
        .await;
        assert_nothing_stored(&app).await;
    }

    #[tokio::test]
    async fn empty_photo_rejected() {
        let app = TestApp::spawn().await;
        assert_rejected(
            &app,
            json!({"description": "Oops", "photo": "", "originalPhoto": ORIGINAL_BASE64}),
        )
        .await;
        assert_nothing_stored(&app).await;
    }

    #[tokio::test]
    async fn empty_original_photo_rejected() {
        let app = TestApp::spawn().await;
        assert_rejected(
            &app,
            json!({"description": "Oops", "photo": PHOTO_DATA_URL, "originalPhoto": ""}),
        )
        .await;
        assert_nothing_stored(&app).await;
    }

    #[tokio::test]
    async fn missing_fields_rejected() {
        let app = TestApp::spawn().await;
        let res = app
            .post(routes::MISTAKES, &json!({"description": "Oops"}))
            .await;

        assert_eq!(res.status, 400);
        assert!(res.body["message"].as_str().unwrap().contains("originalPhoto"));
        assert_nothing_stored(&app).await;
    }

    #[tokio::test]
    async fn invalid_base64_rejected() {
        let app = TestApp::spawn().await;
        assert_rejected(
            &app,
            json!({"description": "Oops", "photo": PHOTO_DATA_URL, "originalPhoto": "not*base64"}),
        )
        .await;
        assert_nothing_stored(&app).await;
    }

    #[tokio::test]
    async fn oversized_photo_rejected() {
        // The original decodes to 10 bytes, the compressed photo to 6.
        let app = TestApp::spawn_with_photo_limit(8).await;
        let res = app
            .post(
                routes::MISTAKES,
                &json!({"description": "Oops", "photo": PHOTO_DATA_URL, "originalPhoto": ORIGINAL_BASE64}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["message"].as_str().unwrap().contains("size limit"));
        assert_nothing_stored(&app).await;
    }

    #[tokio::test]
    async fn malformed_json_rejected() {
        let app = TestApp::spawn().await;
        let res = app.post_raw(routes::MISTAKES, "{\"description\": ").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_nothing_stored(&app).await;
    }

    #[tokio::test]
    async fn non_numeric_id_rejected() {
        let app = TestApp::spawn().await;
        let res = app.get("/api/mistakes/abc").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn list_is_newest_first() {
        let app = TestApp::spawn().await;

        let mut created = Vec::new();
        for description in ["first", "second", "third"] {
            created.push(app.create_mistake(description).await);
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let res = app.get(routes::MISTAKES).await;
        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();

        let descriptions: Vec<&str> = items
            .iter()
            .map(|m| m["description"].as_str().unwrap())
            .collect();
        assert_eq!(descriptions, vec!["third", "second", "first"]);

        let timestamps: Vec<&str> = items
            .iter()
            .map(|m| m["createdAt"].as_str().unwrap())
            .collect();
        for pair in timestamps.windows(2) {
            assert!(pair[0] > pair[1], "not strictly descending: {pair:?}");
        }

        created.reverse();
        let ids: Vec<i64> = items.iter().map(|m| m["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, created);
    }

    #[tokio::test]
    async fn empty_list() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::MISTAKES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }
}

mod lookup {
    use super::*;

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::mistake(999)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        assert_eq!(app.get(&routes::photo(999)).await.status, 404);
        assert_eq!(app.get(&routes::original_photo(999)).await.status, 404);
    }

    #[tokio::test]
    async fn missing_photo_file_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_mistake("Lost file").await;

        let record = app.get(&routes::mistake(id)).await;
        std::fs::remove_file(record.body["photoPath"].as_str().unwrap()).unwrap();

        let photo = app.get(&routes::photo(id)).await;
        assert_eq!(photo.status, 404);
        assert_eq!(photo.body["code"], "NOT_FOUND");

        // The other variant is unaffected.
        assert_eq!(app.get(&routes::original_photo(id)).await.status, 200);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn delete_removes_record_and_photos() {
        let app = TestApp::spawn().await;
        let id = app.create_mistake("Burnt toast").await;
        assert_eq!(app.photo_files().len(), 2);

        let res = app.delete(&routes::mistake(id)).await;
        assert_eq!(res.status, 204);
        assert!(res.bytes.is_empty());

        assert_eq!(app.get(&routes::mistake(id)).await.status, 404);
        assert_eq!(app.get(&routes::photo(id)).await.status, 404);
        assert_eq!(app.get(&routes::original_photo(id)).await.status, 404);

        let list = app.get(routes::MISTAKES).await;
        assert_eq!(list.body, json!([]));
        assert!(app.photo_files().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_id_has_no_side_effects() {
        let app = TestApp::spawn().await;
        let kept = app.create_mistake("Keep me").await;

        let res = app.delete(&routes::mistake(kept + 100)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        assert_eq!(app.get(&routes::mistake(kept)).await.status, 200);
        assert_eq!(app.photo_files().len(), 2);
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_mistake("Once").await;

        assert_eq!(app.delete(&routes::mistake(id)).await.status, 204);
        assert_eq!(app.delete(&routes::mistake(id)).await.status, 404);
    }

    #[tokio::test]
    async fn delete_only_touches_its_own_photos() {
        let app = TestApp::spawn().await;
        let first = app.create_mistake("First").await;
        let second = app.create_mistake("Second").await;

        assert_eq!(app.delete(&routes::mistake(first)).await.status, 204);

        assert_eq!(app.photo_files().len(), 2);
        assert_eq!(app.get(&routes::photo(second)).await.bytes, PHOTO_BYTES);
    }
}

mod ambient {
    use mistakemate_server::mistake::MistakeService;

    use super::*;

    #[tokio::test]
    async fn cors_allows_any_origin_by_default() {
        let app = TestApp::spawn().await;
        let res = app
            .client
            .get(format!("http://{}{}", app.addr, routes::MISTAKES))
            .header("Origin", "http://example.com")
            .send()
            .await
            .unwrap();

        assert_eq!(
            res.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let app = TestApp::spawn().await;
        let res = app.get("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/mistakes/{id}"));
        assert!(paths.contains_key("/api/mistakes/photo/{id}/original"));
    }

    #[tokio::test]
    async fn database_matches_api_view() {
        let app = TestApp::spawn().await;
        let id = app.create_mistake("Checked twice").await;

        let service = MistakeService::new(&app.db);
        let row = service.get(id as i32).await.unwrap().unwrap();
        assert_eq!(row.description, "Checked twice");
        assert_eq!(service.count().await.unwrap(), 1);
    }
}
