use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="not-found">
            <h1>"404 - Page Not Found"</h1>
            <p>
                <a href="/">"Back to the remotes"</a>
            </p>
        </div>
    }
}
