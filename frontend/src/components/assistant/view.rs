//! View rendering for the fill assistant component.
//!
//! Three stages share the pane: the upload zone before a document exists, a
//! processing indicator while extraction/detection runs, and the workspace —
//! placeholder list on the left, the guided conversation in the middle, and
//! a live preview built with the same substitution engine the exporters use.

use common::fill;
use common::model::placeholder::PlaceholderDescriptor;
use common::model::session::DocumentSession;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::AssistantComponent;

pub fn view(component: &AssistantComponent, ctx: &Context<AssistantComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="assistant-root">
            { build_file_input(component, link) }
            {
                if component.processing {
                    build_processing()
                } else if let Some(session) = &component.session {
                    build_workspace(component, session, link)
                } else {
                    build_upload_zone(component, link)
                }
            }
        </div>
    }
}

fn build_file_input(component: &AssistantComponent, link: &Scope<AssistantComponent>) -> Html {
    let on_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target()?.dyn_into().ok()?;
        let file = input.files()?.get(0)?;
        // Allow re-selecting the same file later.
        input.set_value("");
        Some(Msg::FileSelected(file))
    });

    html! {
        <input
            ref={component.file_input_ref.clone()}
            type="file"
            accept=".docx"
            style="display: none;"
            onchange={on_change}
        />
    }
}

fn build_upload_zone(component: &AssistantComponent, link: &Scope<AssistantComponent>) -> Html {
    html! {
        <div class="upload-zone">
            <h2>{ "Upload a legal document template" }</h2>
            <p>{ "The assistant finds the blank fields and walks you through filling them." }</p>
            <button class="primary" onclick={link.callback(|_| Msg::OpenFileDialog)}>
                { "Choose a .docx file" }
            </button>
            {
                if let Some(error) = &component.error {
                    html! { <p class="error-text">{ error }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_processing() -> Html {
    html! {
        <div class="processing">
            <div class="spinner"></div>
            <p>{ "Reading the document and detecting blank fields..." }</p>
        </div>
    }
}

fn build_workspace(
    component: &AssistantComponent,
    session: &DocumentSession,
    link: &Scope<AssistantComponent>,
) -> Html {
    html! {
        <div class="workspace">
            <div class="workspace-columns">
                { build_placeholder_list(session, link) }
                { build_conversation(component, session, link) }
            </div>
            { build_validation_errors(component) }
            { build_export_bar(component, session, link) }
            { build_preview(session) }
        </div>
    }
}

fn build_placeholder_list(session: &DocumentSession, link: &Scope<AssistantComponent>) -> Html {
    html! {
        <aside class="placeholder-list">
            <div class="list-header">
                <strong>{ &session.file_name }</strong>
                <span>{ format!("{} of {} filled", session.filled_count(), session.placeholders.len()) }</span>
                {
                    if !session.saved {
                        html! { <span class="local-only">{ "working locally" }</span> }
                    } else {
                        html! {}
                    }
                }
            </div>
            <ul>
                { for session.placeholders.iter().enumerate().map(|(index, p)| {
                    build_placeholder_item(index, p, index == session.current_index, link)
                }) }
            </ul>
        </aside>
    }
}

fn build_placeholder_item(
    index: usize,
    placeholder: &PlaceholderDescriptor,
    active: bool,
    link: &Scope<AssistantComponent>,
) -> Html {
    html! {
        <li
            class={classes!("placeholder-item", active.then_some("active"), placeholder.is_filled.then_some("filled"))}
            onclick={link.callback(move |_| Msg::Select(index))}
        >
            <span class="check">{ if placeholder.is_filled { "✓" } else { "○" } }</span>
            <span class="label">{ &placeholder.label }</span>
            <span class="type">{ placeholder.field_type.as_str() }</span>
        </li>
    }
}

fn build_conversation(
    component: &AssistantComponent,
    session: &DocumentSession,
    link: &Scope<AssistantComponent>,
) -> Html {
    let Some(current) = session.current() else {
        return html! {
            <section class="conversation">
                <p>{ "No blank fields were detected in this document." }</p>
                { build_reset_button(link) }
            </section>
        };
    };

    let question = current
        .prompt
        .clone()
        .unwrap_or_else(|| format!("What should \"{}\" be?", current.label));
    let editing = current.is_filled;

    let on_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::InputChanged(input.value())
    });
    let on_keypress =
        link.batch_callback(|e: KeyboardEvent| (e.key() == "Enter").then_some(Msg::Submit));

    html! {
        <section class="conversation">
            <p class="question">{ question }</p>
            {
                if let Some(note) = &current.validation_note {
                    html! { <p class="hint">{ note }</p> }
                } else {
                    html! {}
                }
            }
            <div class="answer-row">
                <input
                    type="text"
                    placeholder={format!("{} ({})", current.label, current.field_type.as_str())}
                    value={component.input_value.clone()}
                    oninput={on_input}
                    onkeypress={on_keypress}
                />
                <button class="primary" onclick={link.callback(|_| Msg::Submit)}>
                    { if editing { "Update" } else { "Save answer" } }
                </button>
            </div>
            {
                if session.all_filled() {
                    html! { <p class="done-note">{ "All fields are filled — the document is ready to export." }</p> }
                } else {
                    html! {}
                }
            }
            { build_reset_button(link) }
        </section>
    }
}

fn build_reset_button(link: &Scope<AssistantComponent>) -> Html {
    html! {
        <button class="link-btn" onclick={link.callback(|_| Msg::Reset)}>
            { "Start over with another document" }
        </button>
    }
}

fn build_validation_errors(component: &AssistantComponent) -> Html {
    if component.validation_errors.is_empty() {
        return html! {};
    }
    html! {
        <div class="validation-errors">
            <strong>{ "Fix these before exporting:" }</strong>
            <ul>
                { for component.validation_errors.iter().map(|e| html! { <li>{ e }</li> }) }
            </ul>
        </div>
    }
}

fn build_export_bar(
    component: &AssistantComponent,
    session: &DocumentSession,
    link: &Scope<AssistantComponent>,
) -> Html {
    let disabled = component.exporting;
    html! {
        <div class="export-bar">
            <span>
                { if component.exporting { "Preparing download..." } else { "Export:" } }
            </span>
            <button disabled={disabled} onclick={link.callback(|_| Msg::ExportBinary)}>
                { "Filled original (.docx)" }
            </button>
            <button disabled={disabled} onclick={link.callback(|_| Msg::Export("docx"))}>
                { "Plain .docx" }
            </button>
            <button disabled={disabled} onclick={link.callback(|_| Msg::Export("pdf"))}>
                { ".pdf" }
            </button>
            <button disabled={disabled} onclick={link.callback(|_| Msg::Export("html"))}>
                { ".html" }
            </button>
            {
                if !session.all_filled() {
                    html! { <span class="export-note">{ "Unfilled fields will block the export." }</span> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_preview(session: &DocumentSession) -> Html {
    let preview = fill::substitute(&session.original_text, &session.placeholders);
    html! {
        <section class="preview">
            <h3>{ "Preview" }</h3>
            <pre>{ preview }</pre>
        </section>
    }
}
