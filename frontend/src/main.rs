use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::bookings_page::BookingsPage;
use components::header::{Header, Tab};
use components::profile_page::ProfilePage;
use components::services_page::ServicesPage;
use components::toast::ToastContainer;
use hooks::use_toasts::{use_toasts, ToastHandle};
use services::config::client_config;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let toasts = use_toasts(client_config().toast_duration_ms);
    let active_tab = use_state(|| Tab::Bookings);

    let on_select_tab = {
        let active_tab = active_tab.clone();
        Callback::from(move |tab: Tab| {
            Logger::debug_with_component("app", &format!("Switching to {:?}", tab));
            active_tab.set(tab);
        })
    };

    // Each page owns its state; switching tabs remounts it and reloads from the backend
    let page = match *active_tab {
        Tab::Bookings => html! { <BookingsPage /> },
        Tab::Services => html! { <ServicesPage /> },
        Tab::Profile => html! { <ProfilePage /> },
    };

    html! {
        <ContextProvider<ToastHandle> context={toasts.handle.clone()}>
            <div class="app">
                <Header active={*active_tab} on_select={on_select_tab} />
                <main class="main">
                    <div class="container">
                        {page}
                    </div>
                </main>
                <ToastContainer
                    toasts={toasts.toasts.clone()}
                    display_ms={toasts.display_ms}
                    handle={toasts.handle.clone()}
                />
            </div>
        </ContextProvider<ToastHandle>>
    }
}

fn main() {
    Logger::info_with_component("app", &format!("Starting AgendAi against {}", client_config().api_base_url));
    yew::Renderer::<App>::new().render();
}
