use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Bookings,
    Services,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Bookings, Tab::Services, Tab::Profile];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Bookings => "Bookings",
            Tab::Services => "Services",
            Tab::Profile => "Profile",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub active: Tab,
    pub on_select: Callback<Tab>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"AgendAi"}</h1>
                <nav class="header-tabs">
                    {for Tab::ALL.iter().map(|tab| {
                        let tab = *tab;
                        let onclick = {
                            let on_select = props.on_select.clone();
                            Callback::from(move |_: MouseEvent| on_select.emit(tab))
                        };
                        let class = if tab == props.active { "tab active" } else { "tab" };
                        html! { <button {class} {onclick}>{tab.label()}</button> }
                    })}
                </nav>
            </div>
        </header>
    }
}
