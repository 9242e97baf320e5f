//! Fill assistant: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic, view rendering, and helpers.
//!
//! The component owns the whole fill flow: upload and detection, the guided
//! conversation over the detected placeholders, the live preview, and the
//! export actions. All document state lives in one explicitly-owned
//! `DocumentSession`; a new upload replaces it wholesale.

use yew::prelude::*;

mod helpers;
mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::AssistantComponent;

impl Component for AssistantComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        AssistantComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
