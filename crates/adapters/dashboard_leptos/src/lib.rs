//! # somfyctl-dashboard-leptos
//!
//! Browser dashboard served next to the gateway API: a remotes page and a
//! configuration page. Pages keep their state in signals holding the
//! application model and talk to the gateway through [`api::FetchTransport`].

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

pub mod api;
mod components;
mod pages;

use components::{Nav, ToastContainer};
use pages::{Configuration, NotFound, Remotes};

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <ToastContainer>
            <Router>
                <Nav/>
                <main>
                    <Routes fallback=|| view! { <NotFound/> }>
                        <Route path=path!("/") view=Remotes/>
                        <Route path=path!("configuration") view=Configuration/>
                    </Routes>
                </main>
            </Router>
        </ToastContainer>
    }
}
