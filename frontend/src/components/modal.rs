use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// Backdrop plus dialog box; clicking the backdrop closes it
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-header">
                    <h3 class="modal-title">{props.title.clone()}</h3>
                    <button class="modal-close" onclick={on_close_click}>{"×"}</button>
                </div>
                <div class="modal-content">
                    {props.children.clone()}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FieldErrorProps {
    pub message: Option<String>,
}

#[function_component(FieldErrorText)]
pub fn field_error_text(props: &FieldErrorProps) -> Html {
    match &props.message {
        Some(message) => html! { <span class="field-error">{message}</span> },
        None => html! {},
    }
}
