#![cfg(not(coverage))]

use super::*;
use crate::utils::storage::SessionStore;
use httpmock::prelude::*;
use serde_json::json;

fn user_json(id: &str, flowers: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Ana María",
        "identification": "1020304050",
        "email": "ana@example.com",
        "role": "user",
        "flowers": flowers
    })
}

fn session_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "sessionId": "EMA-2026-03",
        "name": "Retiro de marzo",
        "startsAt": "2026-03-07T13:00:00Z",
        "endsAt": "2026-03-07T17:00:00Z",
        "isActive": true,
        "sessionPin": "4821",
        "createdAt": "2026-03-01T10:00:00Z"
    })
}

fn group_json(id: &str, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Grupo Marta",
        "memberCount": 4,
        "isActive": active
    })
}

fn summary_json() -> serde_json::Value {
    json!({
        "created": [{ "identification": "1", "name": "Ana" }],
        "updated": [],
        "errors": [{ "identification": "2", "name": "Eva", "error": "duplicada" }],
        "total": 2
    })
}

fn api_client(server: &MockServer) -> ApiClient {
    let client = ApiClient::new_with_base_url(server.url("/api"));
    client.session().save_token("tok-123").unwrap();
    client
}

#[tokio::test]
async fn login_persists_token_and_profile() {
    let server = MockServer::start_async().await;
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({ "identification": "1020304050" }));
        then.status(200).json_body(json!({
            "data": { "token": "fresh-token", "user": user_json("u1", 2) }
        }));
    });

    let session = SessionStore::in_memory();
    let client = ApiClient::new_with_base_url(server.url("/api")).with_session(session.clone());
    let response = client
        .login(LoginRequest {
            identification: "1020304050".into(),
        })
        .await
        .unwrap();

    login.assert();
    assert_eq!(response.user.flowers, 2);
    assert_eq!(session.token().as_deref(), Some("fresh-token"));
    assert_eq!(session.cached_user().map(|u| u.id), Some("u1".to_string()));
}

#[tokio::test]
async fn requests_without_token_are_never_sent() {
    let server = MockServer::start_async().await;
    let me = server.mock(|when, then| {
        when.method(GET).path("/api/me");
        then.status(200).json_body(json!({ "data": user_json("u1", 0) }));
    });

    let client = ApiClient::new_with_base_url(server.url("/api"));
    let err = client.get_me().await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.status, None);
    me.assert_hits(0);
}

#[tokio::test]
async fn unauthorized_response_clears_stored_identity() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/me");
        then.status(401).json_body(json!({ "message": "Token vencido" }));
    });

    let client = api_client(&server);
    let err = client.get_me().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "401: Token vencido");
    assert!(client.session().token().is_none());
}

#[tokio::test]
async fn scan_and_leaderboard_endpoints_succeed() {
    let server = MockServer::start_async().await;
    let scan = server.mock(|when, then| {
        when.method(POST)
            .path("/api/attendance/scan")
            .header("authorization", "Bearer tok-123")
            .json_body(json!({ "sessionPin": "1234" }));
        then.status(200).json_body(json!({
            "data": {
                "added": true,
                "message": "¡Asistencia registrada!",
                "flowers": 5,
                "session": { "id": "s1", "name": "Retiro", "date": "2026-03-07" }
            }
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/leaderboard");
        then.status(200).json_body(json!({
            "data": {
                "entries": [
                    { "rank": 1, "user": { "id": "u2", "name": "Eva" }, "flowers": 9 },
                    { "rank": 2, "user": { "id": "u1", "name": "Ana" }, "flores": 5, "isCurrentUser": true }
                ],
                "currentUser": { "rank": 2, "user": { "id": "u1", "name": "Ana" }, "flowers": 5 }
            }
        }));
    });

    let client = api_client(&server);
    let result = client
        .scan_attendance(&ScanRequest::SessionPin("1234".into()))
        .await
        .unwrap();
    scan.assert();
    assert!(result.added);
    assert_eq!(result.flowers, 5);
    assert_eq!(result.session.map(|s| s.name), Some("Retiro".to_string()));

    let board = client.get_leaderboard().await.unwrap();
    assert_eq!(board.entries.len(), 2);
    assert!(board.entries[1].is_current_user);
    assert_eq!(board.entries[1].flowers, 5);
    assert_eq!(board.current_user.map(|e| e.rank), Some(2));
}

#[tokio::test]
async fn duplicate_scan_is_not_an_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/attendance/scan");
        then.status(200).json_body(json!({
            "data": { "added": false, "message": "Ya registraste esta sesión", "flowers": 4 }
        }));
    });

    let client = api_client(&server);
    let result = client
        .scan_attendance(&ScanRequest::QrCode("EMA-2026-03".into()))
        .await
        .unwrap();
    assert!(!result.added);
    assert_eq!(result.message, "Ya registraste esta sesión");
}

#[tokio::test]
async fn session_admin_endpoints_succeed() {
    let server = MockServer::start_async().await;
    let mut created = session_json("s1");
    created["qrCode"] = json!("data:image/png;base64,AAAA");
    server.mock(|when, then| {
        when.method(POST).path("/api/admin/sessions");
        then.status(201).json_body(json!({ "data": created }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/admin/sessions");
        then.status(200)
            .json_body(json!({ "data": [session_json("s1"), session_json("s2")] }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/admin/sessions/s1/qr");
        then.status(200).json_body(json!({
            "data": { "sessionId": "EMA-2026-03", "name": "Retiro de marzo", "qrCode": "EMA-2026-03" }
        }));
    });
    let deactivate = server.mock(|when, then| {
        when.method(PUT).path("/api/admin/sessions/s1/deactivate");
        then.status(200).json_body(json!({
            "data": { "message": "Sesión desactivada", "sessionId": "s1" }
        }));
    });

    let client = api_client(&server);
    let request = CreateSessionRequest {
        name: "Retiro de marzo".into(),
        starts_at: "2026-03-07T13:00:00Z".parse().unwrap(),
        ends_at: "2026-03-07T17:00:00Z".parse().unwrap(),
    };
    let session = client.create_session(&request).await.unwrap();
    assert_eq!(session.session.id, "s1");
    assert!(session.qr_code.starts_with("data:image"));

    assert_eq!(client.list_sessions().await.unwrap().len(), 2);
    assert_eq!(client.get_session_qr("s1").await.unwrap().qr_code, "EMA-2026-03");

    let response = client.deactivate_session("s1").await.unwrap();
    deactivate.assert();
    assert_eq!(response.session_id, "s1");
}

#[tokio::test]
async fn bulk_and_csv_imports_share_summary_shape() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/admin/users/bulk").json_body(json!({
            "users": [{ "name": "Ana", "identification": "1", "role": "user" }]
        }));
        then.status(200).json_body(json!({ "data": summary_json() }));
    });
    let csv = server.mock(|when, then| {
        when.method(POST)
            .path("/api/admin/users/csv")
            .body_contains("name,identification,role");
        then.status(200).json_body(json!({ "data": summary_json() }));
    });

    let client = api_client(&server);
    let bulk = client
        .create_users_bulk(&BulkUsersRequest {
            users: vec![BulkUserInput {
                name: "Ana".into(),
                identification: "1".into(),
                role: Role::User,
            }],
        })
        .await
        .unwrap();
    let uploaded = client
        .upload_users_csv(CsvUpload {
            file_name: "usuarias.csv".into(),
            bytes: b"name,identification,role\nAna,1,user\n".to_vec(),
        })
        .await
        .unwrap();

    csv.assert();
    assert_eq!(bulk, uploaded);
    assert_eq!(bulk.created.len(), 1);
    assert_eq!(bulk.errors[0].error, "duplicada");
}

#[tokio::test]
async fn group_endpoints_succeed() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/groups");
        then.status(200)
            .json_body(json!({ "data": [group_json("g1", true), group_json("g2", false)] }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/groups/me");
        then.status(200).json_body(json!({
            "data": { "hasGroup": true, "group": { "id": "g1", "name": "Grupo Marta", "isActive": true } }
        }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/groups/join")
            .json_body(json!({ "groupId": "g1" }));
        then.status(200).json_body(json!({
            "data": { "message": "Te uniste", "groupId": "g1", "groupName": "Grupo Marta" }
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/admin/groups");
        then.status(200).json_body(json!({ "data": [group_json("g1", true)] }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/admin/groups");
        then.status(201).json_body(json!({
            "data": { "message": "Grupo creado", "group": group_json("g3", true) }
        }));
    });
    server.mock(|when, then| {
        when.method(PUT)
            .path("/api/admin/groups/g3")
            .json_body(json!({ "isActive": false }));
        then.status(200).json_body(json!({
            "data": { "message": "Grupo actualizado", "group": group_json("g3", false) }
        }));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/admin/groups/g3");
        then.status(200).json_body(json!({
            "data": { "message": "Grupo eliminado", "groupId": "g3" }
        }));
    });

    let client = api_client(&server);
    let groups = client.list_groups().await.unwrap();
    assert!(!groups[1].is_active);
    assert!(client.get_my_group().await.unwrap().has_group());
    let joined = client
        .join_group(&JoinGroupRequest {
            group_id: "g1".into(),
        })
        .await
        .unwrap();
    assert_eq!(joined.group_name, "Grupo Marta");
    assert_eq!(client.list_all_groups().await.unwrap().len(), 1);

    let created = client
        .create_group(&CreateGroupRequest {
            name: "Grupo Lidia".into(),
            is_active: true,
        })
        .await
        .unwrap();
    assert_eq!(created.group.id, "g3");

    let updated = client
        .update_group(
            "g3",
            &UpdateGroupRequest {
                name: None,
                is_active: Some(false),
            },
        )
        .await
        .unwrap();
    assert!(!updated.group.is_active);
    assert_eq!(client.delete_group("g3").await.unwrap().group_id, "g3");
}

#[tokio::test]
async fn group_assignment_and_history() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/admin/users");
        then.status(200)
            .json_body(json!({ "data": [user_json("u1", 1), user_json("u2", 0)] }));
    });
    server.mock(|when, then| {
        when.method(PUT)
            .path("/api/admin/users/u1/group")
            .json_body(json!({ "groupId": "g2", "reason": "Cambio de horario" }));
        then.status(200).json_body(json!({
            "data": {
                "message": "Grupo asignado",
                "user": { "id": "u1", "name": "Ana", "group": { "id": "g2", "name": "Grupo Rut" } }
            }
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/admin/users/u1/group-history");
        then.status(200).json_body(json!({
            "data": { "history": [{
                "id": 7,
                "groupId": "g1",
                "groupName": "Grupo Marta",
                "changedBy": "admin",
                "changedAt": "2026-02-01T12:00:00Z",
                "reason": null
            }] }
        }));
    });

    let client = api_client(&server);
    assert_eq!(client.list_users().await.unwrap().len(), 2);
    let assigned = client
        .assign_user_group(
            "u1",
            &AssignGroupRequest {
                group_id: "g2".into(),
                reason: Some("Cambio de horario".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(assigned.user.group.name, "Grupo Rut");

    let history = client.get_user_group_history("u1").await.unwrap();
    assert_eq!(history.history[0].id, 7);
}

#[tokio::test]
async fn error_responses_map_to_closed_kinds() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/groups/join");
        then.status(409)
            .json_body(json!({ "message": "Ya perteneces a un grupo" }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/admin/sessions");
        then.status(403).body("");
    });

    let client = api_client(&server);
    let conflict = client
        .join_group(&JoinGroupRequest {
            group_id: "g1".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(conflict.kind, ApiErrorKind::Conflict);
    assert_eq!(conflict.message, "Ya perteneces a un grupo");

    let forbidden = client.list_sessions().await.unwrap_err();
    assert_eq!(forbidden.kind, ApiErrorKind::Forbidden);
    assert_eq!(forbidden.to_string(), "403: Error en la solicitud");
    assert!(client.session().token().is_some());
}

#[tokio::test]
async fn connection_failure_is_network_error() {
    let client = ApiClient::new_with_base_url("http://127.0.0.1:9/api");
    client.session().save_token("tok").unwrap();
    let err = client.get_leaderboard().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_eq!(err.message, "Error de conexión");
}
