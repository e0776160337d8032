//! Toast notifications for request outcomes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use somfyctl_app::ports::ClientError;

/// How long a toast stays on screen.
const TOAST_MILLIS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            Self::Info => "toast toast-info",
            Self::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToastMessage {
    pub id: u32,
    pub kind: ToastKind,
    pub text: String,
}

/// Handle to the toast list, shared through the Leptos context.
#[derive(Debug, Clone, Copy)]
pub struct ToastProvider {
    toasts: RwSignal<Vec<ToastMessage>>,
    next_id: RwSignal<u32>,
}

impl ToastProvider {
    fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    /// Show a message; it goes away on its own after a few seconds.
    pub fn push(self, kind: ToastKind, text: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id.wrapping_add(1));
        self.toasts.update(|list| list.push(ToastMessage { id, kind, text }));

        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            self.dismiss(id);
        });
    }

    pub fn info(self, text: impl Into<String>) {
        self.push(ToastKind::Info, text.into());
    }

    pub fn error(self, err: &ClientError) {
        self.push(ToastKind::Error, err.to_string());
    }

    pub fn dismiss(self, id: u32) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

/// Toast provider of the enclosing [`ToastContainer`].
///
/// Outside of a container the messages are kept but never displayed.
#[must_use]
pub fn use_toasts() -> ToastProvider {
    use_context::<ToastProvider>().unwrap_or_else(ToastProvider::new)
}

/// Provides the toast context to `children` and renders the active toasts.
#[component]
pub fn ToastContainer(children: Children) -> impl IntoView {
    let provider = ToastProvider::new();
    provide_context(provider);

    view! {
        {children()}
        <div class="toast-container">
            {move || {
                provider
                    .toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        view! {
                            <div class=toast.kind.class()>
                                <button class="toast-dismiss" on:click=move |_| provider.dismiss(id)>
                                    "\u{00D7}"
                                </button>
                                {toast.text}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
