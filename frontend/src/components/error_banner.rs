use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub error: Option<String>,
    pub on_dismiss: Callback<()>,
}

/// Last failed request of a page, until dismissed or the next request starts
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let Some(error) = props.error.clone() else {
        return html! {};
    };

    let on_dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <div class="error-banner" role="alert">
            <span>{error}</span>
            <button class="error-banner-close" onclick={on_dismiss}>{"×"}</button>
        </div>
    }
}
