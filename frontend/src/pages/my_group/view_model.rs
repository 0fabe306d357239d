use leptos::*;

use super::utils::join_error_message;
use crate::{
    api::{ApiError, Group, JoinGroupResponse, MyGroup},
    state::{
        queries::{use_groups, use_join_group, use_my_group},
        query::Query,
    },
};

#[derive(Clone, Copy)]
pub struct MyGroupViewModel {
    pub my_group: Query<MyGroup>,
    pub groups: Query<Vec<Group>>,
    pub selected: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub join_action: Action<String, Result<JoinGroupResponse, ApiError>>,
}

impl MyGroupViewModel {
    pub fn select(&self, group_id: String) {
        self.error.set(None);
        self.selected.set(Some(group_id));
    }

    pub fn cancel(&self) {
        if self.join_action.pending().get_untracked() {
            return;
        }
        self.error.set(None);
        self.selected.set(None);
    }

    pub fn confirm(&self) {
        if self.join_action.pending().get_untracked() {
            return;
        }
        if let Some(group_id) = self.selected.get_untracked() {
            self.error.set(None);
            self.join_action.dispatch(group_id);
        }
    }
}

pub fn use_my_group_view_model() -> MyGroupViewModel {
    let vm = MyGroupViewModel {
        my_group: use_my_group(),
        groups: use_groups(),
        selected: create_rw_signal(None),
        error: create_rw_signal(None),
        join_action: use_join_group(),
    };

    let join_action = vm.join_action;
    create_effect(move |_| match join_action.value().get() {
        Some(Ok(response)) => {
            log::info!("joined group {}", response.group_id);
            vm.selected.set(None);
        }
        Some(Err(err)) => vm.error.set(Some(join_error_message(&err.message))),
        None => {}
    });

    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn select_then_cancel_clears_choice() {
        with_runtime(|| {
            let vm = use_my_group_view_model();
            vm.error.set(Some("previo".into()));
            vm.select("g1".into());
            assert_eq!(vm.selected.get().as_deref(), Some("g1"));
            assert_eq!(vm.error.get(), None);
            vm.cancel();
            assert_eq!(vm.selected.get(), None);
        });
    }

    #[test]
    fn confirm_without_selection_does_nothing() {
        with_runtime(|| {
            let vm = use_my_group_view_model();
            vm.confirm();
            assert_eq!(vm.join_action.version().get(), 0);
        });
    }
}
