//! Resource hooks over the query cache. Reads share keys so every view of
//! the same data is refreshed by a single invalidation.

use leptos::*;

use crate::{
    api::{
        ApiClient, ApiError, AssignGroupRequest, AssignGroupResponse, AttendanceScanResult,
        BulkUsersRequest, CreateGroupRequest, CreateSessionRequest, CreatedSession, CsvUpload,
        DeactivateSessionResponse, DeleteGroupResponse, Group, GroupHistory,
        GroupMutationResponse, ImportSummary, JoinGroupRequest, JoinGroupResponse, Leaderboard,
        MyGroup, ScanRequest, Session, SessionQr, UpdateGroupRequest, User,
    },
    state::{
        auth::use_auth,
        query::{create_mutation, use_query, Query, QueryKey, QueryOptions, QueryScope},
    },
};

pub const SCAN_INVALIDATES: &[QueryScope] = &[QueryScope::Leaderboard, QueryScope::CurrentUser];
pub const SESSION_WRITE_INVALIDATES: &[QueryScope] = &[QueryScope::Sessions];
pub const USER_IMPORT_INVALIDATES: &[QueryScope] = &[QueryScope::Users];
pub const JOIN_GROUP_INVALIDATES: &[QueryScope] = &[
    QueryScope::MyGroup,
    QueryScope::Groups,
    QueryScope::CurrentUser,
];
pub const ASSIGN_GROUP_INVALIDATES: &[QueryScope] = &[
    QueryScope::Users,
    QueryScope::Groups,
    QueryScope::AllGroups,
    QueryScope::UserGroupHistory,
];
pub const GROUP_WRITE_INVALIDATES: &[QueryScope] = &[QueryScope::AllGroups, QueryScope::Groups];

fn api() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(ApiClient::new)
}

fn fixed(scope: QueryScope) -> impl Fn() -> Option<QueryKey> + 'static {
    move || Some(QueryKey::new(scope))
}

pub fn use_leaderboard() -> Query<Leaderboard> {
    let api = api();
    use_query(fixed(QueryScope::Leaderboard), QueryOptions::live(), move |_| {
        let api = api.clone();
        async move { api.get_leaderboard().await }
    })
}

/// Profile held by the auth context; refreshed when `user` is invalidated.
pub fn use_current_user() -> Signal<Option<User>> {
    let (auth, _) = use_auth();
    Signal::derive(move || auth.with(|state| state.user.clone()))
}

pub fn use_sessions() -> Query<Vec<Session>> {
    let api = api();
    use_query(fixed(QueryScope::Sessions), QueryOptions::default(), move |_| {
        let api = api.clone();
        async move { api.list_sessions().await }
    })
}

/// Disabled while no session is selected.
pub fn use_session_qr(session_id: Signal<Option<String>>) -> Query<SessionQr> {
    let api = api();
    use_query(
        move || {
            session_id
                .get()
                .map(|id| QueryKey::with_param(QueryScope::SessionQr, id))
        },
        QueryOptions::default(),
        move |key| {
            let api = api.clone();
            async move { api.get_session_qr(key.param()).await }
        },
    )
}

pub fn use_users() -> Query<Vec<User>> {
    let api = api();
    use_query(fixed(QueryScope::Users), QueryOptions::default(), move |_| {
        let api = api.clone();
        async move { api.list_users().await }
    })
}

pub fn use_groups() -> Query<Vec<Group>> {
    let api = api();
    use_query(fixed(QueryScope::Groups), QueryOptions::default(), move |_| {
        let api = api.clone();
        async move { api.list_groups().await }
    })
}

pub fn use_my_group() -> Query<MyGroup> {
    let api = api();
    use_query(fixed(QueryScope::MyGroup), QueryOptions::default(), move |_| {
        let api = api.clone();
        async move { api.get_my_group().await }
    })
}

pub fn use_all_groups() -> Query<Vec<Group>> {
    let api = api();
    use_query(fixed(QueryScope::AllGroups), QueryOptions::default(), move |_| {
        let api = api.clone();
        async move { api.list_all_groups().await }
    })
}

pub fn use_user_group_history(user_id: Signal<Option<String>>) -> Query<GroupHistory> {
    let api = api();
    use_query(
        move || {
            user_id
                .get()
                .map(|id| QueryKey::with_param(QueryScope::UserGroupHistory, id))
        },
        QueryOptions::default(),
        move |key| {
            let api = api.clone();
            async move { api.get_user_group_history(key.param()).await }
        },
    )
}

pub fn use_scan_attendance() -> Action<ScanRequest, Result<AttendanceScanResult, ApiError>> {
    let api = api();
    create_mutation(SCAN_INVALIDATES, move |request: ScanRequest| {
        let api = api.clone();
        async move { api.scan_attendance(&request).await }
    })
}

pub fn use_create_session() -> Action<CreateSessionRequest, Result<CreatedSession, ApiError>> {
    let api = api();
    create_mutation(SESSION_WRITE_INVALIDATES, move |request: CreateSessionRequest| {
        let api = api.clone();
        async move { api.create_session(&request).await }
    })
}

pub fn use_deactivate_session() -> Action<String, Result<DeactivateSessionResponse, ApiError>> {
    let api = api();
    create_mutation(SESSION_WRITE_INVALIDATES, move |id: String| {
        let api = api.clone();
        async move { api.deactivate_session(&id).await }
    })
}

pub fn use_bulk_create_users() -> Action<BulkUsersRequest, Result<ImportSummary, ApiError>> {
    let api = api();
    create_mutation(USER_IMPORT_INVALIDATES, move |request: BulkUsersRequest| {
        let api = api.clone();
        async move { api.create_users_bulk(&request).await }
    })
}

pub fn use_upload_users_csv() -> Action<CsvUpload, Result<ImportSummary, ApiError>> {
    let api = api();
    create_mutation(USER_IMPORT_INVALIDATES, move |upload: CsvUpload| {
        let api = api.clone();
        async move { api.upload_users_csv(upload).await }
    })
}

pub fn use_join_group() -> Action<String, Result<JoinGroupResponse, ApiError>> {
    let api = api();
    create_mutation(JOIN_GROUP_INVALIDATES, move |group_id: String| {
        let api = api.clone();
        async move { api.join_group(&JoinGroupRequest { group_id }).await }
    })
}

pub fn use_assign_group(
) -> Action<(String, AssignGroupRequest), Result<AssignGroupResponse, ApiError>> {
    let api = api();
    create_mutation(
        ASSIGN_GROUP_INVALIDATES,
        move |(user_id, request): (String, AssignGroupRequest)| {
            let api = api.clone();
            async move { api.assign_user_group(&user_id, &request).await }
        },
    )
}

pub fn use_create_group() -> Action<CreateGroupRequest, Result<GroupMutationResponse, ApiError>> {
    let api = api();
    create_mutation(GROUP_WRITE_INVALIDATES, move |request: CreateGroupRequest| {
        let api = api.clone();
        async move { api.create_group(&request).await }
    })
}

pub fn use_update_group(
) -> Action<(String, UpdateGroupRequest), Result<GroupMutationResponse, ApiError>> {
    let api = api();
    create_mutation(
        GROUP_WRITE_INVALIDATES,
        move |(id, request): (String, UpdateGroupRequest)| {
            let api = api.clone();
            async move { api.update_group(&id, &request).await }
        },
    )
}

pub fn use_delete_group() -> Action<String, Result<DeleteGroupResponse, ApiError>> {
    let api = api();
    create_mutation(GROUP_WRITE_INVALIDATES, move |id: String| {
        let api = api.clone();
        async move { api.delete_group(&id).await }
    })
}
