use leptos::*;
use uuid::Uuid;

use super::utils::{
    assign_request, bulk_request, created_message, is_csv_file_name, remove_row, BulkRow,
    UsersTab, INVALID_CSV_MESSAGE,
};
use crate::{
    api::{
        ApiError, AssignGroupRequest, AssignGroupResponse, BulkUsersRequest, CsvUpload, Group,
        GroupHistory, ImportSummary, User,
    },
    components::layout::clear_flash_after,
    state::{
        queries::{
            use_assign_group, use_bulk_create_users, use_groups, use_upload_users_csv,
            use_user_group_history, use_users,
        },
        query::Query,
    },
};

const CREATED_FLASH_MILLIS: u32 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCsv {
    pub name: String,
    pub size: f64,
}

#[derive(Clone, Copy)]
pub struct CsvState {
    pub selected: RwSignal<Option<SelectedCsv>>,
    pub error: RwSignal<Option<String>>,
    pub reading: RwSignal<bool>,
    file: StoredValue<Option<web_sys::File>>,
}

#[derive(Clone, Copy)]
pub struct AssignState {
    pub user: RwSignal<Option<User>>,
    pub group_id: RwSignal<Option<String>>,
    pub reason: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
}

#[derive(Clone, Copy)]
pub struct AdminUsersViewModel {
    pub tab: RwSignal<UsersTab>,
    pub rows: RwSignal<Vec<BulkRow>>,
    pub bulk_action: Action<BulkUsersRequest, Result<ImportSummary, ApiError>>,
    pub csv_action: Action<CsvUpload, Result<ImportSummary, ApiError>>,
    pub csv: CsvState,
    pub result: RwSignal<Option<ImportSummary>>,
    pub flash: RwSignal<Option<String>>,
    pub bulk_error: RwSignal<Option<ApiError>>,
    pub csv_upload_error: RwSignal<Option<ApiError>>,
    pub users: Query<Vec<User>>,
    pub groups: Query<Vec<Group>>,
    pub assign: AssignState,
    pub assign_action: Action<(String, AssignGroupRequest), Result<AssignGroupResponse, ApiError>>,
    pub history: Query<GroupHistory>,
}

impl AdminUsersViewModel {
    pub fn add_row(&self) {
        self.rows.update(|rows| rows.push(BulkRow::default()));
    }

    pub fn remove_row(&self, key: Uuid) {
        self.rows.update(|rows| remove_row(rows, key));
    }

    pub fn edit_row(&self, key: Uuid, edit: impl FnOnce(&mut BulkRow)) {
        self.rows.update(|rows| {
            if let Some(row) = rows.iter_mut().find(|row| row.key == key) {
                edit(row);
            }
        });
    }

    pub fn submit_bulk(&self) {
        if self.bulk_action.pending().get_untracked() {
            return;
        }
        if let Some(request) = self.rows.with_untracked(|rows| bulk_request(rows)) {
            self.bulk_error.set(None);
            self.bulk_action.dispatch(request);
        }
    }

    /// Keeps the file only when its name ends in `.csv`.
    pub fn select_csv(&self, name: String, size: f64, file: Option<web_sys::File>) {
        if !is_csv_file_name(&name) {
            self.csv.error.set(Some(INVALID_CSV_MESSAGE.to_string()));
            return;
        }
        self.csv.error.set(None);
        self.csv.file.set_value(file);
        self.csv.selected.set(Some(SelectedCsv { name, size }));
    }

    pub fn clear_csv(&self) {
        self.csv.file.set_value(None);
        self.csv.selected.set(None);
        self.csv.error.set(None);
    }

    pub fn upload_csv(&self) {
        if self.csv_action.pending().get_untracked() || self.csv.reading.get_untracked() {
            return;
        }
        let Some(selected) = self.csv.selected.get_untracked() else {
            return;
        };
        let Some(file) = self.csv.file.get_value() else {
            self.csv.error.set(Some(INVALID_CSV_MESSAGE.to_string()));
            return;
        };
        let vm = *self;
        vm.csv.reading.set(true);
        vm.csv_upload_error.set(None);
        spawn_local(async move {
            let read = read_file_bytes(file).await;
            vm.csv.reading.try_set(false);
            match read {
                Ok(bytes) => vm.csv_action.dispatch(CsvUpload {
                    file_name: selected.name,
                    bytes,
                }),
                Err(err) => {
                    log::warn!("could not read csv: {}", err);
                    vm.csv.error.try_set(Some(INVALID_CSV_MESSAGE.to_string()));
                }
            }
        });
    }

    pub fn open_assign(&self, user: User) {
        self.assign.group_id.set(user.group.as_ref().map(|group| group.id.clone()));
        self.assign.reason.set(String::new());
        self.assign.error.set(None);
        self.assign.user.set(Some(user));
    }

    pub fn close_assign(&self) {
        if self.assign_action.pending().get_untracked() {
            return;
        }
        self.assign.user.set(None);
    }

    pub fn submit_assign(&self) {
        if self.assign_action.pending().get_untracked() {
            return;
        }
        let Some(user) = self.assign.user.get_untracked() else {
            return;
        };
        let request = self
            .assign
            .reason
            .with_untracked(|reason| assign_request(self.assign.group_id.get_untracked(), reason));
        match request {
            Some(request) => {
                self.assign.error.set(None);
                self.assign_action.dispatch((user.id, request));
            }
            None => self.assign.error.set(Some("Selecciona un grupo".to_string())),
        }
    }

    fn show_created(&self, summary: ImportSummary) {
        self.flash.set(Some(created_message(summary.created.len())));
        clear_flash_after(self.flash, CREATED_FLASH_MILLIS);
        self.result.set(Some(summary));
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_file_bytes(file: web_sys::File) -> Result<Vec<u8>, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("{:?}", err))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_file_bytes(_file: web_sys::File) -> Result<Vec<u8>, String> {
    Err("file reading requires a browser".to_string())
}

pub fn use_admin_users_view_model() -> AdminUsersViewModel {
    let assign_user = create_rw_signal(None::<User>);
    let history_for = Signal::derive(move || assign_user.with(|user| user.as_ref().map(|u| u.id.clone())));

    let vm = AdminUsersViewModel {
        tab: create_rw_signal(UsersTab::default()),
        rows: create_rw_signal(vec![BulkRow::default()]),
        bulk_action: use_bulk_create_users(),
        csv_action: use_upload_users_csv(),
        csv: CsvState {
            selected: create_rw_signal(None),
            error: create_rw_signal(None),
            reading: create_rw_signal(false),
            file: store_value(None),
        },
        result: create_rw_signal(None),
        flash: create_rw_signal(None),
        bulk_error: create_rw_signal(None),
        csv_upload_error: create_rw_signal(None),
        users: use_users(),
        groups: use_groups(),
        assign: AssignState {
            user: assign_user,
            group_id: create_rw_signal(None),
            reason: create_rw_signal(String::new()),
            error: create_rw_signal(None),
        },
        assign_action: use_assign_group(),
        history: use_user_group_history(history_for),
    };

    let bulk_action = vm.bulk_action;
    create_effect(move |_| match bulk_action.value().get() {
        Some(Ok(summary)) => {
            vm.rows.set(vec![BulkRow::default()]);
            vm.show_created(summary);
        }
        Some(Err(err)) => vm.bulk_error.set(Some(err)),
        None => {}
    });

    let csv_action = vm.csv_action;
    create_effect(move |_| match csv_action.value().get() {
        Some(Ok(summary)) => {
            vm.clear_csv();
            vm.show_created(summary);
        }
        Some(Err(err)) => vm.csv_upload_error.set(Some(err)),
        None => {}
    });

    let assign_action = vm.assign_action;
    create_effect(move |_| match assign_action.value().get() {
        Some(Ok(response)) => {
            log::info!("user {} moved to {}", response.user.id, response.user.group.id);
            vm.assign.user.set(None);
            vm.flash.set(Some(if response.message.is_empty() {
                format!("{} ahora está en {}", response.user.name, response.user.group.name)
            } else {
                response.message
            }));
            clear_flash_after(vm.flash, CREATED_FLASH_MILLIS);
        }
        Some(Err(err)) => vm.assign.error.set(Some(err.message)),
        None => {}
    });

    vm
}
