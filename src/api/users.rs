use actix_web::{web, HttpResponse, Scope};

use super::{blocking, ApiError, AppState};
use crate::models::User;
use crate::photo;

/// Largest picture body accepted by `PUT /API/Users/{id}/Picture`.
pub const MAX_PICTURE_BYTES: usize = 16 * 1024 * 1024;

pub fn scope() -> Scope {
    web::scope("/API/Users")
        .route("/{id}", web::get().to(get_user))
        .service(
            web::resource("/{id}/Picture")
                .app_data(web::PayloadConfig::new(MAX_PICTURE_BYTES))
                .route(web::put().to(update_picture)),
        )
}

fn users_reply(user: Option<User>) -> HttpResponse {
    HttpResponse::Ok().json(user.into_iter().collect::<Vec<_>>())
}

async fn get_user(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let users = state.users.clone();
    let id = id.into_inner();
    Ok(users_reply(blocking(move || users.get_user(id)).await?))
}

/// Replaces the stored picture wholesale with the request body.
async fn update_picture(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("picture body is empty".to_string()));
    }
    let users = state.users.clone();
    let id = id.into_inner();
    let picture = body.to_vec();
    let updated = blocking(move || photo::store_picture(&*users, id, picture)).await?;
    if let Some(ref user) = updated {
        info!("user {} picture replaced", user.id);
    }
    Ok(users_reply(updated))
}
