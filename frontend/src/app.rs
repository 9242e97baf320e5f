use crate::components::assistant::AssistantComponent;
use crate::components::documents::DocumentsComponent;
use yew::{classes, html, Component, Context, Html};

/// Top-level shell: a nav bar switching between the fill assistant and the
/// document history.
pub struct App {
    active_view: View,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum View {
    Assistant,
    Documents,
}

pub enum Msg {
    Show(View),
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            active_view: View::Assistant,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Show(view) => {
                self.active_view = view;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tab = |view: View, label: &str| {
            html! {
                <button
                    class={classes!("nav-btn", (self.active_view == view).then_some("active"))}
                    onclick={link.callback(move |_| Msg::Show(view))}
                >
                    { label }
                </button>
            }
        };

        html! {
            <div class="app-root">
                <header class="app-header">
                    <h1>{ "LexFill" }</h1>
                    <nav>
                        { tab(View::Assistant, "Assistant") }
                        { tab(View::Documents, "Documents") }
                    </nav>
                </header>
                {
                    match self.active_view {
                        View::Assistant => html! { <AssistantComponent /> },
                        View::Documents => html! { <DocumentsComponent /> },
                    }
                }
            </div>
        }
    }
}
