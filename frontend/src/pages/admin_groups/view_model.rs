use leptos::*;

use super::utils::{
    create_request, edit_request, message_or, toggle_request, GroupFormMode,
    MUTATION_FALLBACK_ERROR,
};
use crate::{
    api::{
        ApiError, CreateGroupRequest, DeleteGroupResponse, Group, GroupMutationResponse,
        UpdateGroupRequest,
    },
    components::layout::{clear_flash_after, FLASH_MILLIS},
    state::{
        queries::{use_all_groups, use_create_group, use_delete_group, use_update_group},
        query::Query,
    },
};

/// Where the last update request came from, so its error lands in the right place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdateOrigin {
    Form,
    Toggle,
}

#[derive(Clone, Copy)]
pub struct GroupFormState {
    pub mode: RwSignal<GroupFormMode>,
    pub name: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl GroupFormState {
    fn new() -> Self {
        Self {
            mode: create_rw_signal(GroupFormMode::Closed),
            name: create_rw_signal(String::new()),
            is_active: create_rw_signal(true),
            error: create_rw_signal(None),
        }
    }

    fn close(&self) {
        self.mode.set(GroupFormMode::Closed);
        self.name.set(String::new());
        self.is_active.set(true);
        self.error.set(None);
    }
}

#[derive(Clone, Copy)]
pub struct AdminGroupsViewModel {
    pub groups: Query<Vec<Group>>,
    pub form: GroupFormState,
    pub create_action: Action<CreateGroupRequest, Result<GroupMutationResponse, ApiError>>,
    pub update_action: Action<(String, UpdateGroupRequest), Result<GroupMutationResponse, ApiError>>,
    pub delete_action: Action<String, Result<DeleteGroupResponse, ApiError>>,
    pub members: RwSignal<Option<Group>>,
    pub pending_delete: RwSignal<Option<Group>>,
    pub action_error: RwSignal<Option<ApiError>>,
    pub flash: RwSignal<Option<String>>,
    update_origin: StoredValue<UpdateOrigin>,
}

impl AdminGroupsViewModel {
    pub fn busy(&self) -> bool {
        self.update_action.pending().get() || self.delete_action.pending().get()
    }

    pub fn open_create(&self) {
        self.form.close();
        self.form.mode.set(GroupFormMode::Creating);
    }

    pub fn edit(&self, group: &Group) {
        self.form.name.set(group.name.clone());
        self.form.is_active.set(group.is_active);
        self.form.error.set(None);
        self.form.mode.set(GroupFormMode::Editing(group.id.clone()));
    }

    pub fn cancel_form(&self) {
        self.form.close();
    }

    pub fn submit_form(&self) {
        if self.create_action.pending().get_untracked()
            || self.update_action.pending().get_untracked()
        {
            return;
        }
        let name = self.form.name.get_untracked();
        let is_active = self.form.is_active.get_untracked();
        let outcome = match self.form.mode.get_untracked() {
            GroupFormMode::Closed => return,
            GroupFormMode::Creating => {
                create_request(&name, is_active).map(|request| self.create_action.dispatch(request))
            }
            GroupFormMode::Editing(id) => edit_request(&name, is_active).map(|request| {
                self.update_origin.set_value(UpdateOrigin::Form);
                self.update_action.dispatch((id, request));
            }),
        };
        match outcome {
            Ok(()) => self.form.error.set(None),
            Err(msg) => self.form.error.set(Some(msg)),
        }
    }

    pub fn toggle_active(&self, group: &Group) {
        if self.busy() {
            return;
        }
        self.action_error.set(None);
        self.update_origin.set_value(UpdateOrigin::Toggle);
        self.update_action
            .dispatch((group.id.clone(), toggle_request(group)));
    }

    /// Groups without members have nothing to show.
    pub fn view_members(&self, group: Group) {
        if group.member_count > 0 {
            self.members.set(Some(group));
        }
    }

    pub fn close_members(&self) {
        self.members.set(None);
    }

    pub fn ask_delete(&self, group: Group) {
        self.pending_delete.set(Some(group));
    }

    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    pub fn confirm_delete(&self) {
        if let Some(group) = self.pending_delete.get_untracked() {
            self.action_error.set(None);
            self.delete_action.dispatch(group.id);
        }
        self.pending_delete.set(None);
    }
}

pub fn use_admin_groups_view_model() -> AdminGroupsViewModel {
    let vm = AdminGroupsViewModel {
        groups: use_all_groups(),
        form: GroupFormState::new(),
        create_action: use_create_group(),
        update_action: use_update_group(),
        delete_action: use_delete_group(),
        members: create_rw_signal(None),
        pending_delete: create_rw_signal(None),
        action_error: create_rw_signal(None),
        flash: create_rw_signal(None),
        update_origin: store_value(UpdateOrigin::Toggle),
    };

    let create_action = vm.create_action;
    create_effect(move |_| match create_action.value().get() {
        Some(Ok(response)) => {
            vm.form.close();
            vm.flash.set(Some(message_or(response.message, "Grupo creado")));
            clear_flash_after(vm.flash, FLASH_MILLIS);
        }
        Some(Err(err)) => vm
            .form
            .error
            .set(Some(message_or(err.message, MUTATION_FALLBACK_ERROR))),
        None => {}
    });

    let update_action = vm.update_action;
    create_effect(move |_| {
        let Some(result) = update_action.value().get() else {
            return;
        };
        match (vm.update_origin.get_value(), result) {
            (UpdateOrigin::Form, Ok(response)) => {
                let closes = vm
                    .form
                    .mode
                    .with_untracked(|mode| mode.editing_id() == Some(response.group.id.as_str()));
                if closes {
                    vm.form.close();
                }
                vm.flash.set(Some(message_or(response.message, "Grupo actualizado")));
                clear_flash_after(vm.flash, FLASH_MILLIS);
            }
            (UpdateOrigin::Toggle, Ok(response)) => {
                log::info!(
                    "group {} is now {}",
                    response.group.id,
                    if response.group.is_active { "active" } else { "inactive" }
                );
            }
            (UpdateOrigin::Form, Err(err)) => vm
                .form
                .error
                .set(Some(message_or(err.message, MUTATION_FALLBACK_ERROR))),
            (UpdateOrigin::Toggle, Err(err)) => vm.action_error.set(Some(err)),
        }
    });

    let delete_action = vm.delete_action;
    create_effect(move |_| match delete_action.value().get() {
        Some(Ok(response)) => {
            vm.members.update(|open| {
                if open.as_ref().map(|group| group.id.as_str()) == Some(response.group_id.as_str()) {
                    *open = None;
                }
            });
            vm.flash.set(Some(message_or(response.message, "Grupo eliminado")));
            clear_flash_after(vm.flash, FLASH_MILLIS);
        }
        Some(Err(err)) => vm.action_error.set(Some(err)),
        None => {}
    });

    vm
}
