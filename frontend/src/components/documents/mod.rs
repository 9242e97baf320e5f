//! Document history: lists the persisted documents with their fill progress
//! and status, and offers deletion. Deletion is a soft delete on the backend;
//! the row simply disappears from this list.

use common::model::document::DocumentSummary;
use gloo_net::http::Request;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

pub struct DocumentsComponent {
    documents: Vec<DocumentSummary>,
    loading: bool,
    error: Option<String>,
    loaded: bool,
}

pub enum Msg {
    Refresh,
    Loaded(Result<Vec<DocumentSummary>, String>),
    Delete(String),
    Deleted(String, Result<(), String>),
}

impl Component for DocumentsComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            documents: Vec::new(),
            loading: false,
            error: None,
            loaded: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Refresh => {
                self.loading = true;
                self.error = None;
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Loaded(fetch_documents().await));
                });
                true
            }
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(documents) => self.documents = documents,
                    Err(message) => self.error = Some(message),
                }
                true
            }
            Msg::Delete(id) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = delete_document(&id).await;
                    link.send_message(Msg::Deleted(id, result));
                });
                false
            }
            Msg::Deleted(id, result) => {
                match result {
                    Ok(()) => self.documents.retain(|d| d.id != id),
                    Err(message) => self.error = Some(message),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="documents-root">
                <div class="documents-header">
                    <h2>{ "Your documents" }</h2>
                    <button onclick={link.callback(|_| Msg::Refresh)}>{ "Refresh" }</button>
                </div>
                {
                    if let Some(error) = &self.error {
                        html! { <p class="error-text">{ error }</p> }
                    } else {
                        html! {}
                    }
                }
                {
                    if self.loading {
                        html! { <p>{ "Loading..." }</p> }
                    } else if self.documents.is_empty() {
                        html! { <p>{ "No documents yet. Process one in the assistant." }</p> }
                    } else {
                        self.build_table(link)
                    }
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            ctx.link().send_message(Msg::Refresh);
        }
    }
}

impl DocumentsComponent {
    fn build_table(&self, link: &Scope<Self>) -> Html {
        html! {
            <table class="documents-table">
                <thead>
                    <tr>
                        <th>{ "Title" }</th>
                        <th>{ "Status" }</th>
                        <th>{ "Progress" }</th>
                        <th>{ "Created" }</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for self.documents.iter().map(|d| self.build_row(d, link)) }
                </tbody>
            </table>
        }
    }

    fn build_row(&self, document: &DocumentSummary, link: &Scope<Self>) -> Html {
        let id = document.id.clone();
        html! {
            <tr>
                <td>{ &document.title }</td>
                <td><span class={format!("status status-{}", document.status.as_str())}>
                    { document.status.as_str() }
                </span></td>
                <td>{ format!("{}/{}", document.filled_placeholders, document.total_placeholders) }</td>
                <td>{ &document.created_at }</td>
                <td>
                    <button class="danger" onclick={link.callback(move |_| Msg::Delete(id.clone()))}>
                        { "Delete" }
                    </button>
                </td>
            </tr>
        }
    }
}

async fn fetch_documents() -> Result<Vec<DocumentSummary>, String> {
    let response = Request::get("/api/documents")
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status() != 200 {
        return Err(response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to load documents".to_string()));
    }
    response.json().await.map_err(|e| e.to_string())
}

async fn delete_document(id: &str) -> Result<(), String> {
    let response = Request::delete(&format!("/api/documents/{}", id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if response.status() != 200 {
        return Err(response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to delete document".to_string()));
    }
    Ok(())
}
