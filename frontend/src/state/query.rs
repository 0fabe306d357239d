//! Minimal query cache: logical keys, per-scope invalidation, read retries.
//!
//! Each scope owns a generation counter. Resources read the counter in their
//! source closure, so bumping it refetches every mounted query of that scope
//! and makes cached values of older generations unreachable.

use leptos::*;
use std::{any::Any, cell::RefCell, collections::HashMap, future::Future, rc::Rc};

use crate::api::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryScope {
    Leaderboard,
    CurrentUser,
    Sessions,
    SessionQr,
    Users,
    Groups,
    MyGroup,
    AllGroups,
    UserGroupHistory,
}

const SCOPE_COUNT: usize = 9;

impl QueryScope {
    pub const ALL: [QueryScope; SCOPE_COUNT] = [
        QueryScope::Leaderboard,
        QueryScope::CurrentUser,
        QueryScope::Sessions,
        QueryScope::SessionQr,
        QueryScope::Users,
        QueryScope::Groups,
        QueryScope::MyGroup,
        QueryScope::AllGroups,
        QueryScope::UserGroupHistory,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QueryScope::Leaderboard => "leaderboard",
            QueryScope::CurrentUser => "user",
            QueryScope::Sessions => "sessions",
            QueryScope::SessionQr => "session-qr",
            QueryScope::Users => "users",
            QueryScope::Groups => "groups",
            QueryScope::MyGroup => "my-group",
            QueryScope::AllGroups => "all-groups",
            QueryScope::UserGroupHistory => "user-group-history",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub scope: QueryScope,
    pub param: Option<String>,
}

impl QueryKey {
    pub fn new(scope: QueryScope) -> Self {
        Self { scope, param: None }
    }

    pub fn with_param(scope: QueryScope, param: impl Into<String>) -> Self {
        Self {
            scope,
            param: Some(param.into()),
        }
    }

    pub fn param(&self) -> &str {
        self.param.as_deref().unwrap_or_default()
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}/{}", self.scope.as_str(), param),
            None => write!(f, "{}", self.scope.as_str()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refetch {
    /// Mounting and `refetch` always hit the network. A key change inside a
    /// mounted query is served from cache when the current generation has it.
    IfStale,
    Always,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    pub retry: u8,
    pub refetch_on_mount: Refetch,
    pub refetch_on_focus: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            retry: 1,
            refetch_on_mount: Refetch::IfStale,
            refetch_on_focus: false,
        }
    }
}

impl QueryOptions {
    /// Never served from cache; refetched on mount and window focus.
    pub fn live() -> Self {
        Self {
            refetch_on_mount: Refetch::Always,
            refetch_on_focus: true,
            ..Self::default()
        }
    }
}

struct CacheEntry {
    generation: u32,
    value: Rc<dyn Any>,
}

#[derive(Clone)]
pub struct QueryClient {
    generations: [RwSignal<u32>; SCOPE_COUNT],
    cache: Rc<RefCell<HashMap<QueryKey, CacheEntry>>>,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self {
            generations: std::array::from_fn(|_| create_rw_signal(0u32)),
            cache: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn generation(&self, scope: QueryScope) -> u32 {
        self.generations[scope.index()].get()
    }

    pub fn generation_untracked(&self, scope: QueryScope) -> u32 {
        self.generations[scope.index()].get_untracked()
    }

    pub fn cached<T: Clone + 'static>(&self, key: &QueryKey, generation: u32) -> Option<T> {
        let cache = self.cache.borrow();
        let entry = cache.get(key)?;
        if entry.generation != generation {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    pub fn store<T: 'static>(&self, key: QueryKey, generation: u32, value: T) {
        if generation != self.generation_untracked(key.scope) {
            return;
        }
        self.cache.borrow_mut().insert(
            key,
            CacheEntry {
                generation,
                value: Rc::new(value),
            },
        );
    }

    /// Drops every key of the scope, parameterized ones included.
    pub fn invalidate(&self, scope: QueryScope) {
        log::debug!("invalidating {}", scope.as_str());
        self.cache.borrow_mut().retain(|key, _| key.scope != scope);
        self.generations[scope.index()].update(|generation| *generation = generation.wrapping_add(1));
    }

    pub fn invalidate_all(&self, scopes: &[QueryScope]) {
        for scope in scopes {
            self.invalidate(*scope);
        }
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
        for signal in &self.generations {
            signal.update(|generation| *generation = generation.wrapping_add(1));
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().unwrap_or_else(QueryClient::new)
}

pub async fn fetch_with_retry<T, F, Fut>(retries: u8, mut attempt: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut remaining = retries;
    loop {
        match attempt().await {
            Err(err) if remaining > 0 && err.kind.is_retryable() => {
                log::debug!("retrying read after {}", err);
                remaining -= 1;
            }
            other => return other,
        }
    }
}

/// Whether a fetch may be answered from cache instead of the network.
fn serve_from_cache(policy: Refetch, first_load: bool, forced: bool) -> bool {
    policy == Refetch::IfStale && !first_load && !forced
}

async fn load_query<T, F, Fut>(
    client: &QueryClient,
    key: QueryKey,
    generation: u32,
    from_cache: bool,
    retry: u8,
    fetcher: &F,
) -> Result<T, ApiError>
where
    T: Clone + 'static,
    F: Fn(QueryKey) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    if from_cache {
        if let Some(hit) = client.cached::<T>(&key, generation) {
            return Ok(hit);
        }
    }
    let result = fetch_with_retry(retry, || fetcher(key.clone())).await;
    match &result {
        Ok(value) => client.store(key, generation, value.clone()),
        Err(err) => log::warn!("query {} failed: {}", key, err),
    }
    result
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Disabled,
    Loading,
    Ready(T),
    Failed(ApiError),
}

impl<T> QueryState<T> {
    pub fn from_resource(value: Option<Option<Result<T, ApiError>>>) -> Self {
        match value {
            None => QueryState::Loading,
            Some(None) => QueryState::Disabled,
            Some(Some(Ok(value))) => QueryState::Ready(value),
            Some(Some(Err(err))) => QueryState::Failed(err),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct QuerySource {
    key: Option<QueryKey>,
    generation: u32,
    nudge: u32,
}

pub struct Query<T: 'static> {
    resource: Resource<QuerySource, Option<Result<T, ApiError>>>,
    nudge: RwSignal<u32>,
    forced: StoredValue<bool>,
}

impl<T: 'static> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Query<T> {}

impl<T: Clone + 'static> Query<T> {
    pub fn state(&self) -> QueryState<T> {
        QueryState::from_resource(self.resource.get())
    }

    pub fn data(&self) -> Option<T> {
        self.resource.get().flatten().and_then(Result::ok)
    }

    pub fn loading(&self) -> Signal<bool> {
        self.resource.loading()
    }

    /// Bypasses the cache for the next fetch.
    pub fn refetch(&self) {
        self.forced.set_value(true);
        self.nudge.update(|nudge| *nudge = nudge.wrapping_add(1));
    }
}

pub fn use_query<T, F, Fut>(
    key: impl Fn() -> Option<QueryKey> + 'static,
    options: QueryOptions,
    fetcher: F,
) -> Query<T>
where
    T: Clone + 'static,
    F: Fn(QueryKey) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let nudge = create_rw_signal(0u32);
    let forced = store_value(false);
    let loaded = store_value(false);

    #[cfg(target_arch = "wasm32")]
    if options.refetch_on_focus {
        let handle = window_event_listener(ev::focus, move |_| {
            forced.set_value(true);
            nudge.update(|nudge| *nudge = nudge.wrapping_add(1));
        });
        on_cleanup(move || handle.remove());
    }

    let fetcher = Rc::new(fetcher);
    let source_client = client.clone();
    let resource = create_local_resource(
        move || {
            let key = key();
            let generation = key
                .as_ref()
                .map(|key| source_client.generation(key.scope))
                .unwrap_or_default();
            QuerySource {
                key,
                generation,
                nudge: nudge.get(),
            }
        },
        move |source: QuerySource| {
            let client = client.clone();
            let fetcher = Rc::clone(&fetcher);
            let first_load = source.key.is_some() && !loaded.get_value();
            if first_load {
                loaded.set_value(true);
            }
            let bypass = forced.get_value();
            forced.set_value(false);
            let from_cache = serve_from_cache(options.refetch_on_mount, first_load, bypass);
            async move {
                let key = source.key?;
                Some(
                    load_query(&client, key, source.generation, from_cache, options.retry, &*fetcher)
                        .await,
                )
            }
        },
    );

    Query {
        resource,
        nudge,
        forced,
    }
}

/// Applies a finished mutation to the cache; writes are never retried.
pub fn settle_mutation<T>(
    client: &QueryClient,
    invalidates: &[QueryScope],
    result: Result<T, ApiError>,
) -> Result<T, ApiError> {
    if result.is_ok() {
        client.invalidate_all(invalidates);
    }
    result
}

pub fn create_mutation<I, T, F, Fut>(
    invalidates: &'static [QueryScope],
    mutate: F,
) -> Action<I, Result<T, ApiError>>
where
    I: Clone + 'static,
    T: 'static,
    F: Fn(I) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    create_action(move |input: &I| {
        let pending = mutate(input.clone());
        let client = client.clone();
        async move { settle_mutation(&client, invalidates, pending.await) }
    })
}
