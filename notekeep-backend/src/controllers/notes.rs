//! Notes REST API — owner-scoped CRUD endpoints.
//!
//! Every route resolves the caller's identity from the bearer token before
//! any service logic runs; the service then enforces the ownership guard.

use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::error::ServiceError;
use crate::models::{CreateNoteRequest, UpdateNoteRequest};
use crate::AppState;

/// Resolve the caller identity from the request's bearer token.
fn resolve_identity_from_request(
    state: &web::Data<AppState>,
    req: &HttpRequest,
) -> Result<String, HttpResponse> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim_start_matches("Bearer ").to_string());

    let token = match token {
        Some(t) => t,
        None => {
            return Err(HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "No authorization token provided"
            })));
        }
    };

    match state.db.validate_session(&token) {
        Ok(Some(session)) => Ok(session.user_id),
        Ok(None) => Err(HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Invalid or expired session"
        }))),
        Err(e) => {
            log::error!("Session validation error: {}", e);
            Err(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })))
        }
    }
}

/// Map a service failure to its HTTP response. Storage detail never
/// reaches the caller; it goes to the server log only.
fn error_response(operation: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(errors) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }))
        }
        ServiceError::Authorization => HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Not authorized"
        })),
        ServiceError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Note not found"
        })),
        ServiceError::Conflict => {
            // Duplicate titles surface to the caller as a plain write failure.
            log::warn!("{}: duplicate note title", operation);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
        ServiceError::Internal(detail) => {
            log::error!("{}: {}", operation, detail);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}

async fn list_notes(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let caller = match resolve_identity_from_request(&data, &req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match data.notes.list(&caller) {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => error_response("Failed to list notes", e),
    }
}

async fn create_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<CreateNoteRequest>,
) -> impl Responder {
    let caller = match resolve_identity_from_request(&data, &req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };

    match data.notes.create(&caller, body.into_inner()) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => error_response("Failed to create note", e),
    }
}

async fn update_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateNoteRequest>,
) -> impl Responder {
    let caller = match resolve_identity_from_request(&data, &req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let note_id = path.into_inner();

    match data.notes.update(&caller, &note_id, body.into_inner()) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => error_response("Failed to update note", e),
    }
}

async fn delete_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let caller = match resolve_identity_from_request(&data, &req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let note_id = path.into_inner();

    match data.notes.delete(&caller, &note_id) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Note removed"
        })),
        Err(e) => error_response("Failed to delete note", e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
