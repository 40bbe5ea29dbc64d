use std::rc::Rc;

use shared::validation::{validate_avatar, FormErrors, ProfileField, ProfileInput};
use shared::views::{Notifier, ProfileController, ProfileState, SavedProfile, SubmitOutcome};
use shared::Profile;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, Url};
use yew::prelude::*;

use super::use_api::use_api;
use super::use_toasts::use_notifier;
use crate::services::config::client_config;
use crate::services::logging::Logger;

const COMPONENT: &str = "use_profile";

pub enum ProfileAction {
    Loaded(Profile),
    LoadFailed,
    Input(ProfileInput),
    Invalid(FormErrors<ProfileField>),
    Preview(Option<String>),
    Saved(SavedProfile),
    Saving(bool),
}

#[derive(Clone, PartialEq, Default)]
pub struct ProfileStore {
    pub state: ProfileState,
    pub saving: bool,
}

impl Reducible for ProfileStore {
    type Action = ProfileAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.state.clone();
        let mut saving = self.saving;
        match action {
            ProfileAction::Loaded(profile) => state.set_profile(profile),
            ProfileAction::LoadFailed => state.loaded = true,
            ProfileAction::Input(input) => state.apply_input(input),
            ProfileAction::Invalid(errors) => state.errors = errors,
            ProfileAction::Preview(url) => state.avatar_preview = url,
            ProfileAction::Saved(saved) => revoke_preview(state.apply_saved(saved).as_deref()),
            ProfileAction::Saving(value) => saving = value,
        }
        Rc::new(Self { state, saving })
    }
}

pub struct UseProfileResult {
    pub state: ProfileState,
    pub loading: bool,
    pub saving: bool,
    pub actions: UseProfileActions,
}

#[derive(Clone)]
pub struct UseProfileActions {
    pub on_input: Callback<ProfileInput>,
    pub pick_avatar: Callback<File>,
    pub submit: Callback<()>,
}

fn revoke_preview(url: Option<&str>) {
    if let Some(url) = url {
        if let Err(e) = Url::revoke_object_url(url) {
            Logger::debug_with_component(COMPONENT, &format!("Could not revoke preview: {:?}", e));
        }
    }
}

#[hook]
pub fn use_profile() -> UseProfileResult {
    let store = use_reducer(ProfileStore::default);
    let avatar = use_mut_ref(|| Option::<File>::None);
    let api = use_api();
    let notifier = use_notifier();

    {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let api = api.tracked();
                let controller = ProfileController::new(&api, &notifier);
                match controller.load().await {
                    Ok(profile) => dispatcher.dispatch(ProfileAction::Loaded(profile)),
                    Err(_) => dispatcher.dispatch(ProfileAction::LoadFailed),
                }
            });
            || ()
        });
    }

    let on_input = {
        let dispatcher = store.dispatcher();
        Callback::from(move |input: ProfileInput| dispatcher.dispatch(ProfileAction::Input(input)))
    };

    // The picked file is held until the next save; only its preview URL lives in state
    let pick_avatar = {
        let dispatcher = store.dispatcher();
        let notifier = notifier.clone();
        let avatar = avatar.clone();
        let previous = store.state.avatar_preview.clone();
        Callback::from(move |file: File| {
            let max_bytes = client_config().max_avatar_bytes;
            if let Err(e) = validate_avatar(&file.type_(), file.size() as u64, max_bytes) {
                notifier.error(e.to_string());
                return;
            }

            match Url::create_object_url_with_blob(&file) {
                Ok(url) => {
                    revoke_preview(previous.as_deref());
                    dispatcher.dispatch(ProfileAction::Preview(Some(url)));
                }
                Err(e) => Logger::warn_with_component(COMPONENT, &format!("No preview for avatar: {:?}", e)),
            }
            *avatar.borrow_mut() = Some(file);
        })
    };

    let submit = {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        let avatar = avatar.clone();
        let form = store.state.form.clone();
        let saving = store.saving;
        Callback::from(move |_: ()| {
            if saving {
                return;
            }

            let api = api.clone();
            let notifier = notifier.clone();
            let dispatcher = dispatcher.clone();
            let form = form.clone();
            let avatar = avatar.clone();
            let file = avatar.borrow().clone();

            dispatcher.dispatch(ProfileAction::Saving(true));
            spawn_local(async move {
                let api = api.tracked();
                let controller = ProfileController::new(&api, &notifier);
                match controller.save(&form, file).await {
                    SubmitOutcome::Invalid(errors) => dispatcher.dispatch(ProfileAction::Invalid(errors)),
                    SubmitOutcome::Failed(message) => {
                        Logger::error_with_component(COMPONENT, &format!("Saving profile failed: {}", message));
                    }
                    SubmitOutcome::Saved(saved) => {
                        // a failed upload keeps the picked file for the next save
                        if !saved.avatar_pending {
                            avatar.borrow_mut().take();
                        }
                        dispatcher.dispatch(ProfileAction::Saved(saved));
                    }
                }
                dispatcher.dispatch(ProfileAction::Saving(false));
            });
        })
    };

    UseProfileResult {
        state: store.state.clone(),
        loading: api.loading,
        saving: store.saving,
        actions: UseProfileActions {
            on_input,
            pick_avatar,
            submit,
        },
    }
}
