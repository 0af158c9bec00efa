use axum::{
    Router,
    routing::{delete, get},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use jaothui_core::error::not_found;
use jaothui_core::health::healthz;
use jaothui_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    activity::{create_activity, delete_activity, get_activity, list_activities, update_activity},
    animal::{create_animal, delete_animal, get_animal, list_animals, update_animal},
    farm::{
        check_farm_access, create_farm, ensure_farm, get_farm, get_my_farm, list_farms,
        update_my_farm,
    },
    health::readyz,
    member::{add_member, list_members, remove_member},
    notification::get_notification_count,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Farms
        .route("/farms", get(list_farms).post(create_farm))
        .route(
            "/farms/@me",
            get(get_my_farm).post(ensure_farm).patch(update_my_farm),
        )
        .route("/farms/{farm_id}", get(get_farm))
        .route("/farms/{farm_id}/access", get(check_farm_access))
        // Members
        .route("/farms/@me/members", get(list_members).post(add_member))
        .route("/farms/@me/members/{user_id}", delete(remove_member))
        // Animals
        .route("/animals", get(list_animals).post(create_animal))
        .route(
            "/animals/{animal_id}",
            get(get_animal).patch(update_animal).delete(delete_animal),
        )
        // Activities
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/{activity_id}",
            get(get_activity)
                .patch(update_activity)
                .delete(delete_activity),
        )
        // Notifications
        .route("/notifications/count", get(get_notification_count))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
