use actix_web::{web, HttpResponse, Scope};
use serde::Deserialize;

use super::{blocking, ApiError, AppState};
use crate::models::{NewVisit, VisitChanges, VisitedLocation};

type Reply = Result<HttpResponse, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVisitParams {
    pub user_id: i32,
    pub location_id: i32,
    pub points: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationParam {
    pub location_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParam {
    pub user_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct PointsParam {
    pub points: i32,
}

pub fn scope() -> Scope {
    web::scope("/API/VisitedLocations")
        .service(
            web::resource(["", "/"])
                .route(web::get().to(list_all))
                .route(web::post().to(create))
                .route(web::delete().to(delete_all)),
        )
        .route("/User/{user_id}", web::get().to(list_by_user))
        .route("/Last/{user_id}", web::get().to(last_for_user))
        .route("/Last/{user_id}/{n}", web::get().to(last_n_for_user))
        .route("/First/{user_id}", web::get().to(first_for_user))
        .route("/First/{user_id}/{n}", web::get().to(first_n_for_user))
        .route("/Location/{location_id}", web::get().to(list_by_location))
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_by_id))
                .route(web::put().to(update))
                .route(web::delete().to(delete_by_id)),
        )
        .route("/{id}/Location", web::put().to(update_location))
        .route("/{id}/User", web::put().to(update_user))
        .route("/{id}/Points", web::put().to(update_points))
}

fn many(visits: Vec<VisitedLocation>) -> HttpResponse {
    HttpResponse::Ok().json(visits)
}

fn one(visit: Option<VisitedLocation>) -> HttpResponse {
    many(visit.into_iter().collect())
}

async fn list_all(state: web::Data<AppState>) -> Reply {
    let visits = state.visits.clone();
    Ok(many(blocking(move || visits.list_all()).await?))
}

async fn get_by_id(state: web::Data<AppState>, id: web::Path<i32>) -> Reply {
    let visits = state.visits.clone();
    let id = id.into_inner();
    Ok(one(blocking(move || visits.get_by_id(id)).await?))
}

async fn list_by_user(state: web::Data<AppState>, user_id: web::Path<i32>) -> Reply {
    let visits = state.visits.clone();
    let user_id = user_id.into_inner();
    Ok(many(blocking(move || visits.list_by_user(user_id)).await?))
}

async fn last_for_user(state: web::Data<AppState>, user_id: web::Path<i32>) -> Reply {
    let visits = state.visits.clone();
    let user_id = user_id.into_inner();
    Ok(one(blocking(move || visits.last_for_user(user_id)).await?))
}

async fn last_n_for_user(state: web::Data<AppState>, path: web::Path<(i32, i64)>) -> Reply {
    let visits = state.visits.clone();
    let (user_id, n) = path.into_inner();
    Ok(many(blocking(move || visits.last_n_for_user(user_id, n)).await?))
}

async fn first_for_user(state: web::Data<AppState>, user_id: web::Path<i32>) -> Reply {
    let visits = state.visits.clone();
    let user_id = user_id.into_inner();
    Ok(one(blocking(move || visits.first_for_user(user_id)).await?))
}

async fn first_n_for_user(state: web::Data<AppState>, path: web::Path<(i32, i64)>) -> Reply {
    let visits = state.visits.clone();
    let (user_id, n) = path.into_inner();
    Ok(many(blocking(move || visits.first_n_for_user(user_id, n)).await?))
}

async fn list_by_location(state: web::Data<AppState>, location_id: web::Path<i32>) -> Reply {
    let visits = state.visits.clone();
    let location_id = location_id.into_inner();
    Ok(many(blocking(move || visits.list_by_location(location_id)).await?))
}

async fn create(state: web::Data<AppState>, params: web::Query<NewVisitParams>) -> Reply {
    let visits = state.visits.clone();
    let params = params.into_inner();
    let new_visit =
        NewVisit::new(params.user_id, params.location_id).with_points(params.points.unwrap_or(0));
    let created = blocking(move || visits.create(new_visit)).await?;
    Ok(one(Some(created)))
}

async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    changes: web::Query<VisitChanges>,
) -> Reply {
    let visits = state.visits.clone();
    let id = id.into_inner();
    let changes = changes.into_inner();
    Ok(one(blocking(move || visits.update(id, changes)).await?))
}

async fn update_location(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    param: web::Query<LocationParam>,
) -> Reply {
    let visits = state.visits.clone();
    let id = id.into_inner();
    let location_id = param.location_id;
    Ok(one(blocking(move || visits.update_location(id, location_id)).await?))
}

async fn update_user(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    param: web::Query<UserParam>,
) -> Reply {
    let visits = state.visits.clone();
    let id = id.into_inner();
    let user_id = param.user_id;
    Ok(one(blocking(move || visits.update_user(id, user_id)).await?))
}

async fn update_points(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    param: web::Query<PointsParam>,
) -> Reply {
    let visits = state.visits.clone();
    let id = id.into_inner();
    let points = param.points;
    Ok(one(blocking(move || visits.update_points(id, points)).await?))
}

async fn delete_all(state: web::Data<AppState>) -> Reply {
    let visits = state.visits.clone();
    blocking(move || visits.delete_all()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Answers with the lookup made after the delete, which is `[]` once the
/// visit is gone.
async fn delete_by_id(state: web::Data<AppState>, id: web::Path<i32>) -> Reply {
    let visits = state.visits.clone();
    let id = id.into_inner();
    Ok(one(blocking(move || visits.delete_by_id(id)).await?))
}
