use backend_host_web::build_backend_services;
use catalog_runtime::{AdminPage, CatalogProvider, HomePage, NoticeShelf, SignInPage};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="APK Repository" />
        <Meta name="description" content="Browse and download verified Android applications." />

        <CatalogProvider backend=build_backend_services()>
            <Router>
                <main class="site-root">
                    <Routes>
                        <Route path="" view=HomePage />
                        <Route path="/auth" view=SignInPage />
                        <Route path="/admin" view=AdminPage />
                        <Route path="/*any" view=NotFoundRoute />
                    </Routes>
                </main>
            </Router>
            <NoticeShelf />
        </CatalogProvider>
    }
}

#[component]
fn NotFoundRoute() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"Page not found"</h1>
            <p>"The page you are looking for does not exist."</p>
            <A href="/">"Back to the catalog"</A>
        </section>
    }
}
