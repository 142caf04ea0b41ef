//! App Router

use salvo::Router;

use crate::{categories, companies};

pub fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(categories::get::handler)
                        .put(categories::update::handler)
                        .patch(categories::partial_update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("companies")
                .get(companies::index::handler)
                .post(companies::create::handler)
                .push(Router::with_path("{id}").get(companies::get::handler)),
        )
}
