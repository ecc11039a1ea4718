use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/mistakes", mistake_routes(config))
}

fn mistake_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::mistake::list_mistakes,
            handlers::mistake::create_mistake
        ))
        .routes(routes!(
            handlers::mistake::get_mistake,
            handlers::mistake::delete_mistake
        ))
        .routes(routes!(handlers::mistake::get_photo))
        .routes(routes!(handlers::mistake::get_original_photo))
        .layer(handlers::mistake::mistake_body_limit(
            config.storage.max_request_size,
        ))
}
