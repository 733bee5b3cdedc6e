use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Task, TaskInput, TaskQuery, TaskUpdate},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Retrieves a list of tasks for the authenticated user.
///
/// This endpoint fetches tasks owned by the authenticated user, ordered by
/// creation date in descending order.
///
/// ## Query Parameters:
/// - `completed` (optional): Filters tasks by completion state.
/// - `search` (optional): A string to search for in task titles and descriptions (case-insensitive).
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("")]
pub async fn get_tasks(
    store: web::Data<TaskStore>,
    query_params: web::Query<TaskQuery>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = store.list(user.0, &query_params)?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// Expects a JSON payload conforming to `TaskInput`. The `user_id` of the
/// task is automatically set to the ID of the authenticated user.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If input validation on `TaskInput` fails (e.g., empty title).
#[post("")]
pub async fn create_task(
    store: web::Data<TaskStore>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.0);
    let created = store.insert(task)?;

    Ok(HttpResponse::Created().json(created))
}

/// Deletes every task owned by the authenticated user.
///
/// Registered before the `/{id}` routes so that "all" is never parsed as a
/// task id.
///
/// ## Responses:
/// - `200 OK`: Confirmation message plus how many tasks were removed.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[delete("/all")]
pub async fn delete_all_tasks(
    store: web::Data<TaskStore>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let deleted = store.clear(user.0)?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "All tasks deleted successfully",
        "deleted": deleted
    })))
}

/// Retrieves a specific task by its ID.
///
/// The authenticated user must be the owner of the task; someone else's task
/// reads as 404 so task ids are not leaked across users.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON if found and owned by the user.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the authenticated user.
#[get("/{id}")]
pub async fn get_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    match store.get(task_id.into_inner(), user.0)? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Updates an existing task.
///
/// Expects a JSON payload conforming to `TaskUpdate`; only the fields present
/// are applied. Only the owner of the task can update it.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the authenticated user.
/// - `422 Unprocessable Entity`: If input validation on `TaskUpdate` fails.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    match store.update(task_id.into_inner(), user.0, task_data.into_inner())? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task by its ID.
///
/// Only the owner of the task can delete it.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the authenticated user.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    if !store.remove(task_id.into_inner(), user.0)? {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
