use shared::validation::{ProfileField, ProfileInput};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::modal::FieldErrorText;
use crate::hooks::use_profile::use_profile;

fn input_callback(on_input: &Callback<ProfileInput>, wrap: fn(String) -> ProfileInput) -> Callback<InputEvent> {
    let on_input = on_input.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_input.emit(wrap(input.value()));
    })
}

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let profile = use_profile();
    let state = &profile.state;
    let actions = profile.actions.clone();

    let on_full_name_input = input_callback(&actions.on_input, ProfileInput::FullName);
    let on_clinic_name_input = input_callback(&actions.on_input, ProfileInput::ClinicName);
    let on_email_input = input_callback(&actions.on_input, ProfileInput::Email);
    let on_phone_input = input_callback(&actions.on_input, ProfileInput::Phone);

    let on_avatar_change = {
        let pick_avatar = actions.pick_avatar.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                pick_avatar.emit(file);
            }
            // Picking the same file again must fire another change event
            input.set_value("");
        })
    };

    let on_submit = {
        let submit = actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    if !state.loaded {
        return html! {
            <section class="profile-page">
                <div class="loading-indicator">{"Loading profile..."}</div>
            </section>
        };
    }

    let busy = profile.saving || profile.loading;
    let form = &state.form;

    html! {
        <section class="profile-page">
            <div class="page-header">
                <h2>{"Profile"}</h2>
            </div>

            <form class="profile-form" onsubmit={on_submit}>
                <div class="avatar-section">
                    {match state.avatar_src() {
                        Some(src) => html! { <img class="avatar" src={src.to_string()} alt="Avatar" /> },
                        None => html! { <div class="avatar avatar-initials">{state.initials()}</div> },
                    }}
                    <label class="btn btn-secondary avatar-picker">
                        {"Change photo"}
                        <input
                            type="file"
                            accept="image/*"
                            class="hidden-input"
                            onchange={on_avatar_change}
                            disabled={busy}
                        />
                    </label>
                </div>

                <div class="form-group">
                    <label for="profile-full-name">{"Full name"}</label>
                    <input
                        id="profile-full-name"
                        type="text"
                        value={form.full_name.clone()}
                        oninput={on_full_name_input}
                        disabled={busy}
                    />
                    <FieldErrorText message={state.errors.message(ProfileField::FullName)} />
                </div>

                <div class="form-group">
                    <label for="profile-clinic-name">{"Clinic name"}</label>
                    <input
                        id="profile-clinic-name"
                        type="text"
                        value={form.clinic_name.clone()}
                        oninput={on_clinic_name_input}
                        disabled={busy}
                    />
                    <FieldErrorText message={state.errors.message(ProfileField::ClinicName)} />
                </div>

                <div class="form-group">
                    <label for="profile-email">{"Email"}</label>
                    <input
                        id="profile-email"
                        type="email"
                        value={form.email.clone()}
                        oninput={on_email_input}
                        disabled={busy}
                    />
                    <FieldErrorText message={state.errors.message(ProfileField::Email)} />
                </div>

                <div class="form-group">
                    <label for="profile-phone">{"Phone"}</label>
                    <input
                        id="profile-phone"
                        type="tel"
                        value={form.phone.clone()}
                        oninput={on_phone_input}
                        disabled={busy}
                    />
                    <FieldErrorText message={state.errors.message(ProfileField::Phone)} />
                </div>

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={busy}>
                        {if profile.saving { "Saving..." } else { "Save profile" }}
                    </button>
                </div>
            </form>
        </section>
    }
}
