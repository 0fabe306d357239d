#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{GroupRef, Role, User};
    use crate::state::auth::AuthState;
    use leptos::*;

    pub fn admin_user() -> User {
        User {
            id: "u-admin".into(),
            name: "Marta Servidora".into(),
            identification: "900".into(),
            email: Some("marta@example.org".into()),
            role: Role::Admin,
            flowers: 12,
            avatar: None,
            group: None,
        }
    }

    pub fn regular_user() -> User {
        User {
            id: "u-regular".into(),
            name: "Lucía Participante".into(),
            identification: "1001".into(),
            email: None,
            role: Role::User,
            flowers: 3,
            avatar: None,
            group: None,
        }
    }

    pub fn grouped_user(group_id: &str, group_name: &str) -> User {
        User {
            group: Some(GroupRef {
                id: group_id.into(),
                name: group_name.into(),
            }),
            ..regular_user()
        }
    }

    pub fn provide_auth(user: Option<User>) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
