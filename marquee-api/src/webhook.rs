use axum::{
    extract::{Json, State},
    routing::get,
    Router,
};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::dialog::{
    display_param, merge_context_parameters, numeric_param, string_param, OutboundContext,
    WebhookRequest, WebhookResponse,
};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(root).post(webhook))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Movie Booking API" }))
}

/// The conversation steps the dialog platform can dispatch to us, keyed by
/// intent display name. Anything unrecognized falls through to `Unhandled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    GetMovieList,
    BookTicket,
    CollectSeats,
    CollectUserId,
    ConfirmBooking,
    Unhandled,
}

impl Intent {
    fn from_display_name(name: &str) -> Self {
        match name {
            "Get Movie List Intent" => Intent::GetMovieList,
            "Book Ticket Intent" => Intent::BookTicket,
            "Collect Seats Intent" => Intent::CollectSeats,
            "Collect User ID Intent" => Intent::CollectUserId,
            "Confirm Booking Intent" => Intent::ConfirmBooking,
            _ => Intent::Unhandled,
        }
    }
}

/// POST /
/// Webhook entry point for the dialog platform.
async fn webhook(
    State(state): State<AppState>,
    Json(req): Json<WebhookRequest>,
) -> Result<Json<WebhookResponse>, AppError> {
    let intent = Intent::from_display_name(&req.query_result.intent.display_name);
    let params = &req.query_result.parameters;
    let context = merge_context_parameters(&req.query_result.output_contexts);
    let session = &req.session;

    debug!("Intent: {}", req.query_result.intent.display_name);
    debug!("Parameters: {:?}", params);
    debug!("Context parameters: {:?}", context);

    let response = match intent {
        Intent::GetMovieList => get_movie_list(&state, session).await?,
        Intent::BookTicket => book_ticket(&state, params, session).await?,
        Intent::CollectSeats => collect_seats(params, &context, session),
        Intent::CollectUserId => collect_user_id(params, &context, session),
        Intent::ConfirmBooking => confirm_booking(&state, &context).await?,
        Intent::Unhandled => WebhookResponse::text("Intent not handled."),
    };

    Ok(Json(response))
}

async fn get_movie_list(state: &AppState, session: &str) -> Result<WebhookResponse, AppError> {
    let movies = state
        .movies
        .list_movies()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let fulfillment_text = if movies.is_empty() {
        "No movies available currently.".to_string()
    } else {
        let movie_list = movies
            .iter()
            .map(|movie| movie.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Here are the available movies: {}. Which movie would you like to book?",
            movie_list
        )
    };

    Ok(WebhookResponse::text(fulfillment_text)
        .with_context(OutboundContext::new(session, "awaiting_movie_selection")))
}

async fn book_ticket(
    state: &AppState,
    params: &Map<String, Value>,
    session: &str,
) -> Result<WebhookResponse, AppError> {
    let movie_title = match string_param(params, "movie_title") {
        Some(title) => title,
        None => {
            return Ok(WebhookResponse::text(
                "Please specify a movie title to book a ticket.",
            ))
        }
    };

    let movie = state
        .movies
        .find_by_title(&movie_title)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let response = match movie {
        None => WebhookResponse::text(format!(
            "Sorry, the movie '{}' is not available.",
            movie_title
        )),
        Some(movie) => {
            let mut parameters = Map::new();
            parameters.insert("movie_title".to_string(), Value::String(movie.title.clone()));

            WebhookResponse::text(format!(
                "You chose {}. How many seats would you like to book?",
                movie.title
            ))
            .with_context(OutboundContext::new(session, "awaiting_seats").with_parameters(parameters))
        }
    };

    Ok(response)
}

fn collect_seats(
    params: &Map<String, Value>,
    context: &Map<String, Value>,
    session: &str,
) -> WebhookResponse {
    // No validation on this turn; whatever arrived is carried forward for
    // the confirmation step to judge.
    let seats = params.get("seats").cloned().unwrap_or(Value::Null);
    let movie_title = context.get("movie_title").cloned().unwrap_or(Value::Null);

    let fulfillment_text = format!(
        "ok {} selected for {}, Please provide your user ID to proceed with the booking.",
        display_param(&seats),
        display_param(&movie_title),
    );

    let mut parameters = Map::new();
    parameters.insert("movie_title".to_string(), movie_title);
    parameters.insert("seats".to_string(), seats);

    WebhookResponse::text(fulfillment_text)
        .with_context(OutboundContext::new(session, "awaiting_user_id").with_parameters(parameters))
}

fn collect_user_id(
    params: &Map<String, Value>,
    context: &Map<String, Value>,
    session: &str,
) -> WebhookResponse {
    let user_id = params.get("userid").cloned().unwrap_or(Value::Null);
    let movie_title = context.get("movie_title").cloned().unwrap_or(Value::Null);
    let seats = context.get("seats").cloned().unwrap_or(Value::Null);

    let fulfillment_text = format!(
        "Thank you user id: {}. Please confirm your booking: {} seats for the movie '{}'?",
        display_param(&user_id),
        display_param(&seats),
        display_param(&movie_title),
    );

    let mut parameters = Map::new();
    parameters.insert("movie_title".to_string(), movie_title);
    parameters.insert("seats".to_string(), seats);
    parameters.insert("userid".to_string(), user_id);

    WebhookResponse::text(fulfillment_text).with_context(
        OutboundContext::new(session, "awaiting_confirmation").with_parameters(parameters),
    )
}

async fn confirm_booking(
    state: &AppState,
    context: &Map<String, Value>,
) -> Result<WebhookResponse, AppError> {
    let user_id = numeric_param(context, "userid");
    let movie_title = string_param(context, "movie_title");
    let seats = numeric_param(context, "seats");

    debug!(
        "User ID: {:?}, Movie Title: {:?}, Seats: {:?}",
        user_id, movie_title, seats
    );

    // 1. Anything missing short-circuits before touching the store.
    let (user_id, movie_title, seats) = match (user_id, movie_title, seats) {
        (Some(user_id), Some(movie_title), Some(seats)) => (user_id, movie_title, seats),
        _ => {
            return Ok(WebhookResponse::text(
                "Missing required parameters. Please provide user ID, movie title, and seats.",
            ))
        }
    };

    // 2. The user id must be among the known users.
    let users = state
        .users
        .list_users()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !users.iter().any(|user| i64::from(user.id) == user_id) {
        return Ok(WebhookResponse::text("Login first pls"));
    }

    // 3. Insert the booking and report the generated id.
    let booking = state
        .bookings
        .create_booking(user_id as i32, &movie_title, seats as i32)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!("Booking confirmed: {}", booking.id);

    Ok(WebhookResponse::text(format!(
        "Booking confirmed for {} seats for the movie '{}'. Your booking ID is {}. Enjoy your movie!",
        seats, movie_title, booking.id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_parses_known_display_names() {
        assert_eq!(
            Intent::from_display_name("Get Movie List Intent"),
            Intent::GetMovieList
        );
        assert_eq!(
            Intent::from_display_name("Book Ticket Intent"),
            Intent::BookTicket
        );
        assert_eq!(
            Intent::from_display_name("Collect Seats Intent"),
            Intent::CollectSeats
        );
        assert_eq!(
            Intent::from_display_name("Collect User ID Intent"),
            Intent::CollectUserId
        );
        assert_eq!(
            Intent::from_display_name("Confirm Booking Intent"),
            Intent::ConfirmBooking
        );
    }

    #[test]
    fn unknown_display_names_fall_through() {
        assert_eq!(Intent::from_display_name("Order Popcorn"), Intent::Unhandled);
        assert_eq!(Intent::from_display_name(""), Intent::Unhandled);
        // Matching is exact, not case-insensitive.
        assert_eq!(
            Intent::from_display_name("get movie list intent"),
            Intent::Unhandled
        );
    }
}
