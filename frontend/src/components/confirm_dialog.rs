use web_sys::MouseEvent;
use yew::prelude::*;

use super::modal::Modal;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: AttrValue,
    pub message: AttrValue,
    pub confirm_label: AttrValue,
    pub on_confirm: Callback<()>,
    pub on_dismiss: Callback<()>,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    let on_dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <Modal title={props.title.clone()} on_close={props.on_dismiss.clone()}>
            <p class="confirm-message">{props.message.clone()}</p>
            <div class="modal-buttons">
                <button class="btn btn-danger" onclick={on_confirm}>{props.confirm_label.clone()}</button>
                <button class="btn btn-secondary" onclick={on_dismiss}>{"Keep"}</button>
            </div>
        </Modal>
    }
}
