use leptos::prelude::*;

#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav>
            <ul>
                <li><a href="/">"Remotes"</a></li>
                <li><a href="/configuration">"Configuration"</a></li>
            </ul>
        </nav>
    }
}
