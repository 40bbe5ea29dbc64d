use gloo::timers::callback::Timeout;
use shared::Toast;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_toasts::ToastHandle;

#[derive(Properties, PartialEq)]
pub struct ToastContainerProps {
    pub toasts: Vec<Toast>,
    pub display_ms: u32,
    pub handle: ToastHandle,
}

#[function_component(ToastContainer)]
pub fn toast_container(props: &ToastContainerProps) -> Html {
    html! {
        <div class="toast-container">
            {for props.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id.value().to_string()}
                    toast={toast.clone()}
                    display_ms={props.display_ms}
                    handle={props.handle.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastItemProps {
    pub toast: Toast,
    pub display_ms: u32,
    pub handle: ToastHandle,
}

#[function_component(ToastItem)]
pub fn toast_item(props: &ToastItemProps) -> Html {
    // One timer per toast; unmounting (dismissal) drops and so cancels it
    {
        let handle = props.handle.clone();
        let display_ms = props.display_ms;
        use_effect_with(props.toast.id, move |id| {
            let id = *id;
            let timeout = Timeout::new(display_ms, move || handle.expire(id));
            move || drop(timeout)
        });
    }

    let on_dismiss = {
        let handle = props.handle.clone();
        let id = props.toast.id;
        Callback::from(move |_: MouseEvent| handle.dismiss(id))
    };

    html! {
        <div class={props.toast.kind.css_class()} role="alert">
            <span class="toast-icon">{props.toast.kind.icon()}</span>
            <span class="toast-message">{&props.toast.message}</span>
            <button class="toast-close" onclick={on_dismiss}>{"×"}</button>
        </div>
    }
}
