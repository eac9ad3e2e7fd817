use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model,
    server::{
        controller::{
            analytics::{self, ANALYTICS_TAG},
            auth::{self, AUTH_TAG},
            customer::{self, CUSTOMER_TAG},
            document::{self, DOCUMENT_TAG},
            favorite::{self, FAVORITE_TAG},
            import::{self, IMPORT_TAG},
            make::{self, MAKE_TAG},
            upload::{self, UPLOAD_TAG},
            user::{self, USER_TAG},
            vehicle::{self, VEHICLE_TAG},
            vin::{self, VIN_TAG},
        },
        state::AppState,
    },
};

/// Registers the `bearer_auth` scheme referenced by every protected endpoint.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from `/auth/signin`."))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DealerDesk API",
        description = "Back office of a car dealership: inventory, customers, documents and user accounts."
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = AUTH_TAG, description = "Sign in, token refresh and password reset"),
        (name = USER_TAG, description = "User accounts and invitations"),
        (name = MAKE_TAG, description = "Vehicle makes and models"),
        (name = VEHICLE_TAG, description = "Vehicle inventory"),
        (name = UPLOAD_TAG, description = "Vehicles with images"),
        (name = IMPORT_TAG, description = "CSV import of vehicles"),
        (name = CUSTOMER_TAG, description = "Customers"),
        (name = FAVORITE_TAG, description = "Favorite vehicles"),
        (name = DOCUMENT_TAG, description = "Customer and vehicle documents"),
        (name = VIN_TAG, description = "VIN decoding"),
        (name = ANALYTICS_TAG, description = "Dashboard totals")
    ),
    paths(
        auth::sign_in,
        auth::refresh,
        auth::forgot_password,
        auth::reset_password,
        auth::request_password_reset,
        user::create_user,
        user::get_users,
        user::get_me,
        user::delete_user,
        user::force_logout,
        user::verify,
        user::activate,
        user::update_profile,
        make::get_makes,
        make::get_make,
        make::find_or_create_make,
        make::get_models_by_make,
        make::find_or_create_model,
        vehicle::create_vehicle,
        vehicle::get_vehicles,
        vehicle::get_map_points,
        vehicle::export_vehicles,
        vehicle::get_vehicle,
        vehicle::update_vehicle,
        vehicle::delete_vehicle,
        vehicle::assign_customer,
        upload::create_vehicle_with_images,
        upload::update_vehicle_with_images,
        import::parse_upload,
        import::validate_make_model,
        import::bulk_create,
        customer::suggest_customers,
        customer::create_or_update_customer,
        customer::get_customers,
        favorite::add_favorite,
        favorite::remove_favorite,
        favorite::get_favorites,
        document::upload_document,
        document::get_customer_documents,
        document::get_vehicle_documents,
        document::delete_document,
        vin::decode_vin,
        analytics::get_analytics,
    ),
    components(
        schemas(
            model::api::ErrorDto,
            model::api::FieldErrorDto,
            model::api::MessageDto,
            model::auth::SignInDto,
            model::auth::SignInResponseDto,
            model::auth::RefreshDto,
            model::auth::RefreshResponseDto,
            model::auth::ForgotPasswordDto,
            model::auth::ResetPasswordDto,
            model::user::UserDto,
            model::user::PaginatedUsersDto,
            model::user::CreateUserDto,
            model::user::UpdateProfileDto,
            model::user::ActivateUserDto,
            model::user::ActivateUserResponseDto,
            model::user::InvitedUserDto,
            model::make::MakeDto,
            model::make::VehicleModelDto,
            model::make::MakeIdDto,
            model::make::ModelIdDto,
            model::vehicle::VehicleInputDto,
            model::vehicle::VehicleDto,
            model::vehicle::VehicleImageDto,
            model::vehicle::VehicleModelWithMakeDto,
            model::vehicle::VehicleDetailDto,
            model::vehicle::PaginatedVehiclesDto,
            model::vehicle::MapPointDto,
            model::vehicle::VehicleWithImagesDto,
            model::vehicle::AssignCustomerResponseDto,
            model::vehicle::FavoriteRequestDto,
            model::customer::CustomerDto,
            model::customer::CustomerInputDto,
            model::document::DocumentDto,
            model::import::ImportRowDto,
            model::import::ValidateMakeModelDto,
            model::import::MakeModelValidationDto,
            model::import::BulkVehicleRowDto,
            model::import::BulkCreateDto,
            model::import::BulkCreateResponseDto,
            model::vin::DecodedVinDto,
            model::analytics::AnalyticsDto,
        )
    ),
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signin", post(auth::sign_in))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route(
            "/auth/request-password-reset",
            post(auth::request_password_reset),
        )
        .route(
            "/users",
            post(user::create_user)
                .get(user::get_users)
                .patch(user::update_profile),
        )
        .route("/users/me", get(user::get_me))
        .route("/users/verify", get(user::verify))
        .route("/users/activate", patch(user::activate))
        .route("/users/{id}", delete(user::delete_user))
        .route("/users/{id}/force-logout", post(user::force_logout))
        .route("/makes", get(make::get_makes))
        .route("/makes/find-or-create-make", get(make::find_or_create_make))
        .route("/makes/{id}", get(make::get_make))
        .route("/models/bymake/{make_id}", get(make::get_models_by_make))
        .route(
            "/models/find-or-create-model",
            get(make::find_or_create_model),
        )
        .route(
            "/vehicles",
            post(vehicle::create_vehicle).get(vehicle::get_vehicles),
        )
        .route("/vehicles/map", get(vehicle::get_map_points))
        .route("/vehicles/export", get(vehicle::export_vehicles))
        .route("/vehicles/import/parse", post(import::parse_upload))
        .route(
            "/vehicles/import/validate-make-model",
            post(import::validate_make_model),
        )
        .route("/vehicles/import/bulk", post(import::bulk_create))
        .route(
            "/vehicles/{id}",
            get(vehicle::get_vehicle)
                .put(vehicle::update_vehicle)
                .delete(vehicle::delete_vehicle),
        )
        .route(
            "/vehicles/{id}/assign-customer",
            post(vehicle::assign_customer),
        )
        .route(
            "/upload-vehicle-with-images",
            post(upload::create_vehicle_with_images),
        )
        .route(
            "/upload-vehicle-with-images/{id}",
            put(upload::update_vehicle_with_images),
        )
        .route("/customers/suggest", get(customer::suggest_customers))
        .route(
            "/customers",
            post(customer::create_or_update_customer).get(customer::get_customers),
        )
        .route(
            "/favorites",
            post(favorite::add_favorite)
                .delete(favorite::remove_favorite)
                .get(favorite::get_favorites),
        )
        .route("/documents", post(document::upload_document))
        .route(
            "/documents/customer/{customer_id}",
            get(document::get_customer_documents),
        )
        .route(
            "/documents/vehicle/{vehicle_id}",
            get(document::get_vehicle_documents),
        )
        .route("/documents/{id}", delete(document::delete_document))
        .route("/vin", get(vin::decode_vin))
        .route("/analytics", get(analytics::get_analytics))
        .merge(SwaggerUi::new("/docs").url("/swagger.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that every handler is documented under its route.
    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();

        for path in [
            "/auth/signin",
            "/users/{id}/force-logout",
            "/vehicles/export",
            "/vehicles/{id}/assign-customer",
            "/upload-vehicle-with-images/{id}",
            "/vehicles/import/bulk",
            "/documents/customer/{customer_id}",
            "/analytics",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    /// Tests that the bearer scheme is registered.
    #[test]
    fn test_openapi_security_scheme() {
        let doc = ApiDoc::openapi();

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
