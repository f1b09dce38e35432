use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use serde::Deserialize;
use serde_json::json;

use fitcontent_core::{
    ContentKind, ContentQuery, Difficulty, Error, ExercisePatch, ExerciseQuery, Instruction,
    InstructionPatch, LibraryQuery, MuscleGroup, NewExercise, NewInstruction, NewVideo, NewWorkout,
    VideoPatch, WorkoutQuery, WorkoutType,
};
use fitcontent_similarity::{cosine_similarity, encode};
use fitcontent_storage::CatalogStore;

use crate::cache::ResponseCache;
use crate::services::{CommsClient, MediaClient, ServiceConfig};

const EXERCISE_CACHE_TTL: Duration = Duration::from_secs(300);

pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub cache: ResponseCache,
    pub media: MediaClient,
    pub comms: CommsClient,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        store: Arc<CatalogStore>,
        services: ServiceConfig,
        port: u16,
    ) -> std::io::Result<()> {
        let state = web::Data::new(AppState {
            store,
            cache: ResponseCache::new(EXERCISE_CACHE_TTL),
            media: MediaClient::new(&services),
            comms: CommsClient::new(&services),
        });

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .configure(routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Route table for the `/content` scope.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/content")
            // exercise management
            .route("/exercises/library", web::get().to(exercise_library))
            .route(
                "/exercises/by-muscle-group/{group}",
                web::get().to(exercises_by_muscle_group),
            )
            .route(
                "/exercises/by-difficulty/{level}",
                web::get().to(exercises_by_difficulty),
            )
            .route("/exercises", web::get().to(list_exercises))
            .route("/exercises", web::post().to(create_exercise))
            .route("/exercises/{id}", web::get().to(get_exercise))
            .route("/exercises/{id}", web::put().to(update_exercise))
            .route(
                "/exercises/{id}/instructions",
                web::post().to(add_instructions),
            )
            .route("/exercises/{id}/videos", web::post().to(link_video))
            .route(
                "/exercise-attributes/{id}",
                web::get().to(exercise_attributes),
            )
            // workouts
            .route("/workouts/search", web::get().to(search_workouts))
            .route("/workouts", web::post().to(create_workout))
            .route(
                "/workouts/{difficulty}/{muscle_group}",
                web::get().to(filtered_workouts),
            )
            .route("/workout/{id}", web::get().to(get_workout))
            // discovery
            .route("/search", web::get().to(search_content))
            // recommendation features
            .route("/all-exercises", web::get().to(ml_all_exercises))
            .route(
                "/exercise-features/{id}",
                web::get().to(ml_exercise_features),
            )
            .route(
                "/exercise-similarity-data",
                web::get().to(ml_similarity_data),
            )
            .route(
                "/exercise-similarity",
                web::post().to(ml_exercise_similarity),
            )
            // instructions
            .route(
                "/exercise-instructions/{id}",
                web::get().to(exercise_instructions),
            )
            .route("/instructions/{id}", web::put().to(update_instruction))
            .route("/instructions/{id}", web::delete().to(delete_instruction))
            // videos
            .route("/exercise-videos/{id}", web::get().to(exercise_videos))
            .route("/videos/{id}", web::put().to(update_video))
            .route("/videos/{id}", web::delete().to(delete_video)),
    );
}

fn api_error(error: &Error) -> HttpResponse {
    match error {
        Error::ExerciseNotFound(_) => not_found("Exercise not found"),
        Error::WorkoutNotFound(_) => not_found("Workout not found"),
        Error::InstructionNotFound(_) => not_found("Instruction not found"),
        Error::VideoNotFound(_) => not_found("Video not found"),
        Error::MuscleGroupNotFound(_) => not_found("Muscle group not found"),
        Error::InvalidInput(message) => bad_request(message),
        _ => HttpResponse::InternalServerError().json(json!({
            "success": false,
            "message": error.to_string(),
        })),
    }
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "message": message,
    }))
}

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "success": false,
        "message": message,
    }))
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn user_id_header(req: &HttpRequest) -> Option<u64> {
    req.headers()
        .get("X-User-Id")?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn split_equipment(equipment: Option<&str>) -> Vec<String> {
    equipment
        .unwrap_or("")
        .split(',')
        .map(str::to_string)
        .collect()
}

fn raw_features(attributes: &fitcontent_similarity::ExerciseAttributes) -> serde_json::Value {
    json!({
        "difficulty_level": attributes.difficulty_level,
        "muscle_groups": attributes.muscle_groups,
        "duration": attributes.duration_seconds,
        "intensity": attributes.calories_per_minute,
        "equipment": split_equipment(attributes.equipment.as_deref()),
        "category": attributes.category,
    })
}

// ==================== Exercise management ====================

#[derive(Deserialize)]
struct ExerciseListParams {
    difficulty: Option<String>,
    muscle_groups: Option<String>,
    limit: Option<usize>,
}

async fn list_exercises(
    state: web::Data<AppState>,
    req: HttpRequest,
    params: web::Query<ExerciseListParams>,
) -> ActixResult<HttpResponse> {
    let cache_key = format!("exercises:{}", req.query_string());
    if let Some(cached) = state.cache.get(&cache_key) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let query = ExerciseQuery {
        difficulty: params.difficulty.clone(),
        muscle_groups: params
            .muscle_groups
            .as_deref()
            .map(|groups| {
                groups
                    .split(',')
                    .map(|group| group.trim().to_string())
                    .filter(|group| !group.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        limit: params.limit,
    };

    let exercises = state.store.exercises(&query);
    let body = json!({
        "success": true,
        "data": exercises,
    });
    state.cache.put(cache_key, body.clone());
    Ok(HttpResponse::Ok().json(body))
}

async fn get_exercise(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    match state.store.exercise_detail(path.into_inner()) {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": detail,
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

async fn create_exercise(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<NewExercise>,
) -> ActixResult<HttpResponse> {
    match state.store.create_exercise(payload.into_inner()) {
        Ok(detail) => {
            state.cache.clear();

            if let (Some(token), Some(user_id)) = (bearer_token(&req), user_id_header(&req)) {
                let comms = state.comms.clone();
                let exercise_name = detail.exercise.name.clone();
                actix_web::rt::spawn(async move {
                    comms
                        .send_achievement_notification(
                            &token,
                            user_id,
                            "New Exercise Created!",
                            &format!(
                                "You've successfully created a new exercise: {exercise_name}"
                            ),
                        )
                        .await;
                });
            }

            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": "Exercise created successfully",
                "data": detail,
            })))
        }
        Err(e) => Ok(api_error(&e)),
    }
}

async fn update_exercise(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    payload: web::Json<ExercisePatch>,
) -> ActixResult<HttpResponse> {
    match state.store.update_exercise(path.into_inner(), &payload) {
        Ok(detail) => {
            state.cache.clear();
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Exercise updated successfully",
                "data": detail,
            })))
        }
        Err(e) => Ok(api_error(&e)),
    }
}

#[derive(Deserialize)]
struct LibraryParams {
    search: Option<String>,
    difficulty: Option<String>,
    muscle_group: Option<String>,
    page: Option<usize>,
    per_page: Option<usize>,
}

async fn exercise_library(
    state: web::Data<AppState>,
    params: web::Query<LibraryParams>,
) -> ActixResult<HttpResponse> {
    let mut query = LibraryQuery {
        search: params.search.clone(),
        page: params.page,
        per_page: params.per_page,
        ..LibraryQuery::default()
    };

    if let Some(label) = &params.difficulty {
        match Difficulty::from_filter_label(label) {
            Some(difficulty) => query.difficulty = Some(difficulty),
            None => return Ok(bad_request("Invalid difficulty level")),
        }
    }
    if let Some(name) = &params.muscle_group {
        match MuscleGroup::from_name(name) {
            Some(group) => query.muscle_group = Some(group),
            None => return Ok(bad_request("Invalid muscle group")),
        }
    }

    let page = state.store.library_page(&query);
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": page.exercises,
        "pagination": page.pagination,
        "stats": page.stats,
    })))
}

async fn exercise_attributes(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    match state.store.exercise_attributes(path.into_inner()) {
        Ok((exercise, attributes)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": {
                "exercise_id": exercise.id,
                "features": raw_features(&attributes),
            },
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

// ==================== Discovery ====================

async fn exercises_by_muscle_group(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let Some(group) = MuscleGroup::from_name(&path.into_inner()) else {
        return Ok(bad_request("Invalid muscle group"));
    };
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": state.store.exercises_by_muscle_group(group),
    })))
}

async fn exercises_by_difficulty(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let Some(difficulty) = Difficulty::from_name(&path.into_inner()) else {
        return Ok(bad_request("Invalid difficulty level"));
    };
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": state.store.exercises_by_difficulty(difficulty),
    })))
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
    #[serde(rename = "type")]
    kind: Option<ContentKind>,
    difficulty: Option<String>,
    muscle_group: Option<String>,
    equipment: Option<String>,
    limit: Option<usize>,
}

async fn search_content(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> ActixResult<HttpResponse> {
    let term = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty());
    let Some(term) = term else {
        return Ok(bad_request("Search term is required"));
    };

    let mut query = ContentQuery {
        term: term.to_string(),
        kind: params.kind.unwrap_or_default(),
        difficulty: None,
        muscle_group: None,
        equipment: params.equipment.clone(),
        limit: params.limit,
    };

    if let Some(label) = &params.difficulty {
        match Difficulty::from_name(label) {
            Some(difficulty) => query.difficulty = Some(difficulty),
            None => return Ok(bad_request("Invalid difficulty level")),
        }
    }
    if let Some(name) = &params.muscle_group {
        match MuscleGroup::from_name(name) {
            Some(group) => query.muscle_group = Some(group),
            None => return Ok(bad_request("Invalid muscle group")),
        }
    }

    let (exercises, workouts) = state.store.search_content(&query);
    let mut data = serde_json::Map::new();
    if query.kind.includes_exercises() {
        data.insert("exercises".to_string(), json!(exercises));
    }
    if query.kind.includes_workouts() {
        data.insert("workouts".to_string(), json!(workouts));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": data,
        "search_term": term,
    })))
}

// ==================== Workouts ====================

async fn filtered_workouts(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (difficulty_raw, group_raw) = path.into_inner();

    let difficulty = match difficulty_raw.as_str() {
        "all" => None,
        value => match Difficulty::from_name(value) {
            Some(difficulty) => Some(difficulty),
            None => {
                return Ok(HttpResponse::Ok().json(json!({
                    "success": true,
                    "data": [],
                })))
            }
        },
    };
    let muscle_group = match group_raw.as_str() {
        "all" => None,
        value => match MuscleGroup::from_name(value) {
            Some(group) => Some(group),
            None => {
                return Ok(HttpResponse::Ok().json(json!({
                    "success": true,
                    "data": [],
                })))
            }
        },
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": state.store.workouts_filtered(difficulty, muscle_group),
    })))
}

#[derive(Deserialize)]
struct WorkoutSearchParams {
    difficulty: Option<String>,
    muscle_groups: Option<String>,
    workout_type: Option<String>,
    duration_min: Option<u32>,
    duration_max: Option<u32>,
    search_term: Option<String>,
}

async fn search_workouts(
    state: web::Data<AppState>,
    params: web::Query<WorkoutSearchParams>,
) -> ActixResult<HttpResponse> {
    let mut query = WorkoutQuery {
        duration_min: params.duration_min,
        duration_max: params.duration_max,
        search_term: params.search_term.clone(),
        ..WorkoutQuery::default()
    };

    if let Some(label) = &params.difficulty {
        match Difficulty::from_name(label) {
            Some(difficulty) => query.difficulty = Some(difficulty),
            None => return Ok(bad_request("Invalid difficulty level")),
        }
    }
    if let Some(groups) = &params.muscle_groups {
        for name in groups.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            match MuscleGroup::from_name(name) {
                Some(group) => query.muscle_groups.push(group),
                None => return Ok(bad_request("Invalid muscle group")),
            }
        }
    }
    if let Some(name) = &params.workout_type {
        match WorkoutType::from_name(name) {
            Some(workout_type) => query.workout_type = Some(workout_type),
            None => return Ok(bad_request("Invalid workout type")),
        }
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": state.store.search_workouts(&query),
    })))
}

async fn get_workout(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    match state.store.workout_detail(path.into_inner()) {
        Ok(detail) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": detail,
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

async fn create_workout(
    state: web::Data<AppState>,
    payload: web::Json<NewWorkout>,
) -> ActixResult<HttpResponse> {
    match state.store.create_workout(payload.into_inner()) {
        Ok(detail) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "Workout created successfully",
            "data": detail,
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

// ==================== Recommendation features ====================

async fn ml_all_exercises(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let data: Vec<serde_json::Value> = state
        .store
        .all_exercise_attributes()
        .into_iter()
        .map(|(exercise, attributes)| {
            json!({
                "exercise_id": exercise.id,
                "features": raw_features(&attributes),
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": data,
    })))
}

async fn ml_exercise_features(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    match state.store.exercise_attributes(path.into_inner()) {
        Ok((exercise, attributes)) => {
            let feature_vector = encode(&attributes);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "exercise_id": exercise.id,
                    "feature_vector": feature_vector,
                },
            })))
        }
        Err(e) => Ok(api_error(&e)),
    }
}

async fn ml_similarity_data(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let data: Vec<serde_json::Value> = state
        .store
        .all_exercise_attributes()
        .into_iter()
        .map(|(exercise, attributes)| {
            json!({
                "exercise_id": exercise.id,
                "exercise_name": exercise.name,
                "feature_vector": encode(&attributes),
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": data,
    })))
}

#[derive(Deserialize)]
struct SimilarityRequest {
    exercise_id_1: u64,
    exercise_id_2: u64,
}

async fn ml_exercise_similarity(
    state: web::Data<AppState>,
    payload: web::Json<SimilarityRequest>,
) -> ActixResult<HttpResponse> {
    // both exercises must resolve before any encoding happens
    let (exercise_1, attributes_1) = match state.store.exercise_attributes(payload.exercise_id_1) {
        Ok(found) => found,
        Err(e) => return Ok(api_error(&e)),
    };
    let (exercise_2, attributes_2) = match state.store.exercise_attributes(payload.exercise_id_2) {
        Ok(found) => found,
        Err(e) => return Ok(api_error(&e)),
    };

    let similarity = cosine_similarity(&encode(&attributes_1), &encode(&attributes_2));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "exercise_1": { "id": exercise_1.id, "name": exercise_1.name },
            "exercise_2": { "id": exercise_2.id, "name": exercise_2.name },
            "similarity_score": similarity,
        },
    })))
}

// ==================== Instructions ====================

async fn exercise_instructions(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    match state.store.instructions_for(path.into_inner()) {
        Ok((exercise, instructions)) => {
            let mut grouped: BTreeMap<String, Vec<Instruction>> = BTreeMap::new();
            for instruction in instructions {
                grouped
                    .entry(instruction.instruction_type.as_str().to_string())
                    .or_default()
                    .push(instruction);
            }

            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "exercise": {
                        "exercise_id": exercise.id,
                        "exercise_name": exercise.name,
                    },
                    "instructions": grouped,
                },
            })))
        }
        Err(e) => Ok(api_error(&e)),
    }
}

#[derive(Deserialize)]
struct AddInstructionsRequest {
    instructions: Vec<NewInstruction>,
}

async fn add_instructions(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    payload: web::Json<AddInstructionsRequest>,
) -> ActixResult<HttpResponse> {
    match state
        .store
        .add_instructions(path.into_inner(), payload.into_inner().instructions)
    {
        Ok(created) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "Instructions added successfully",
            "data": created,
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

async fn update_instruction(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    payload: web::Json<InstructionPatch>,
) -> ActixResult<HttpResponse> {
    match state.store.update_instruction(path.into_inner(), &payload) {
        Ok(instruction) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Instruction updated successfully",
            "data": instruction,
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

async fn delete_instruction(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    match state.store.delete_instruction(path.into_inner()) {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Instruction deleted successfully",
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

// ==================== Videos ====================

async fn exercise_videos(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    let exercise_id = path.into_inner();
    match state.store.videos_for(exercise_id) {
        Ok((exercise, local_videos)) => {
            let media_service_videos = state.media.exercise_videos(exercise_id).await;
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "data": {
                    "exercise": {
                        "exercise_id": exercise.id,
                        "exercise_name": exercise.name,
                    },
                    "local_videos": local_videos,
                    "media_service_videos": media_service_videos,
                },
            })))
        }
        Err(e) => Ok(api_error(&e)),
    }
}

async fn link_video(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    payload: web::Json<NewVideo>,
) -> ActixResult<HttpResponse> {
    match state.store.link_video(path.into_inner(), payload.into_inner()) {
        Ok(video) => Ok(HttpResponse::Created().json(json!({
            "success": true,
            "message": "Video linked successfully",
            "data": video,
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

async fn update_video(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    payload: web::Json<VideoPatch>,
) -> ActixResult<HttpResponse> {
    match state.store.update_video(path.into_inner(), &payload) {
        Ok(video) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Video updated successfully",
            "data": video,
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}

async fn delete_video(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> ActixResult<HttpResponse> {
    match state.store.delete_video(path.into_inner()) {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Video deleted successfully",
        }))),
        Err(e) => Ok(api_error(&e)),
    }
}
